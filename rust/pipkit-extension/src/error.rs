//! Errors raised at the browser boundary.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure at the boundary between the engine and the browser.
#[derive(Error, Debug)]
pub enum ExtensionError {
    /// The script is not running in a window with a document
    #[error("No window or document is available")]
    NoDocument,

    /// A `chrome.*` API the extension relies on is missing
    #[error("Extension API is unavailable: chrome.{0}")]
    MissingApi(String),

    /// A JavaScript call threw or rejected
    #[error("JavaScript error: {0}")]
    Js(String),

    /// A message or record did not have the expected shape
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl From<JsValue> for ExtensionError {
    fn from(value: JsValue) -> Self {
        ExtensionError::Js(js_message(&value))
    }
}

/// Best-effort text of a thrown value: the string itself, an `Error`'s
/// message, or its debug form.
pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &"message".into())
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

impl From<ExtensionError> for JsValue {
    fn from(value: ExtensionError) -> Self {
        format!("{value}").into()
    }
}
