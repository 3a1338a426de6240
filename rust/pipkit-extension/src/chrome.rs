//! The `chrome.*` extension APIs the extension uses, reached through
//! `Reflect` on the global object.
//!
//! Messages cross this boundary as JSON: incoming objects are stringified
//! and decoded with serde, outgoing ones are encoded and parsed back into
//! plain objects.

use js_sys::{Function, JSON, Object, Promise, Reflect};
use pipkit_engine::{
    Ack, Localizer, MessageKey, PipWindowSize, RelayMessage, SIZE_KEY, SizeStore, StorageError,
    TabInfo, encode_size,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::{ExtensionError, js_message};

/// Resolve `chrome.<path>`.
fn api(path: &str) -> Result<JsValue, ExtensionError> {
    let mut value: JsValue = js_sys::global().into();
    for segment in std::iter::once("chrome").chain(path.split('.')) {
        value = Reflect::get(&value, &segment.into())
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
            .ok_or_else(|| ExtensionError::MissingApi(path.to_string()))?;
    }
    Ok(value)
}

/// Call `chrome.<object>.<method>(...args)`.
fn call(object: &str, method: &str, args: &[&JsValue]) -> Result<JsValue, ExtensionError> {
    let target = api(object)?;
    let function: Function = Reflect::get(&target, &method.into())?
        .dyn_into()
        .map_err(|_| ExtensionError::MissingApi(format!("{object}.{method}")))?;

    let arguments = args.iter().copied().collect::<js_sys::Array>();
    Ok(Reflect::apply(&function, &target, &arguments)?)
}

fn add_listener(event: &str, listener: &JsValue) -> Result<(), ExtensionError> {
    call(event, "addListener", &[listener]).map(drop)
}

fn to_object<T: serde::Serialize>(value: &T) -> Result<JsValue, ExtensionError> {
    Ok(JSON::parse(&serde_json::to_string(value)?)?)
}

fn from_object<T: serde::de::DeserializeOwned>(value: &JsValue) -> Result<T, ExtensionError> {
    let text = JSON::stringify(value)?
        .as_string()
        .ok_or_else(|| ExtensionError::Js("value is not serializable".into()))?;
    Ok(serde_json::from_str(&text)?)
}

/// Messages from `_locales/*/messages.json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromeI18n;

impl Localizer for ChromeI18n {
    fn message(&self, key: MessageKey) -> String {
        call("i18n", "getMessage", &[&JsValue::from_str(key.as_str())])
            .ok()
            .and_then(|message| message.as_string())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| key.as_str().to_string())
    }
}

/// Window size persistence in `chrome.storage.local`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChromeStorage;

impl SizeStore for ChromeStorage {
    fn save(&self, size: PipWindowSize) -> Result<(), StorageError> {
        let record = JSON::parse(&encode_size(size)?)
            .map_err(|error| StorageError::Encode(js_message(&error)))?;
        let items = Object::new();
        Reflect::set(&items, &SIZE_KEY.into(), &record)
            .map_err(|error| StorageError::Encode(js_message(&error)))?;
        let items: JsValue = items.into();

        let pending = call("storage.local", "set", &[&items])
            .map_err(|error| StorageError::Unavailable(error.to_string()))?;

        if let Ok(pending) = pending.dyn_into::<Promise>() {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(error) = JsFuture::from(pending).await {
                    tracing::warn!(error = %js_message(&error), "Could not save window size");
                }
            });
        }
        Ok(())
    }
}

/// Deliver relay messages to `handler`. Messages that do not decode are
/// left for other listeners and get no reply from us.
pub fn on_message(handler: impl Fn(RelayMessage) -> Ack + 'static) -> Result<(), ExtensionError> {
    let listener = Closure::<dyn FnMut(JsValue, JsValue, Function) -> JsValue>::new(
        move |message: JsValue, _sender: JsValue, send_response: Function| -> JsValue {
            let Ok(message) = from_object::<RelayMessage>(&message) else {
                return JsValue::FALSE;
            };

            let ack = handler(message);
            match to_object(&ack) {
                Ok(reply) => {
                    let _ = send_response.call1(&JsValue::UNDEFINED, &reply);
                }
                Err(error) => tracing::warn!(%error, "Could not encode reply"),
            }
            JsValue::FALSE
        },
    );
    add_listener("runtime.onMessage", listener.as_ref())?;

    // Leak the closure so it lives for the page lifetime
    listener.forget();
    Ok(())
}

/// Deliver keyboard commands declared in the manifest to `handler`.
pub fn on_command(handler: impl Fn(String) + 'static) -> Result<(), ExtensionError> {
    let listener = Closure::<dyn FnMut(JsValue)>::new(move |command: JsValue| {
        if let Some(command) = command.as_string() {
            handler(command);
        }
    });
    add_listener("commands.onCommand", listener.as_ref())?;
    listener.forget();
    Ok(())
}

/// The active tab of the current window.
pub async fn active_tab() -> Result<TabInfo, ExtensionError> {
    let query = JSON::parse(r#"{"active":true,"currentWindow":true}"#)?;
    let pending: Promise = call("tabs", "query", &[&query])?
        .dyn_into()
        .map_err(|_| ExtensionError::Js("tabs.query did not return a promise".into()))?;

    let tabs: js_sys::Array = JsFuture::from(pending).await?.dyn_into()?;
    let first = tabs.get(0);
    if first.is_undefined() {
        return Ok(TabInfo::default());
    }
    from_object(&first)
}

/// Send a relay message to a tab's content script.
pub async fn send_to_tab(tab: i64, message: &RelayMessage) -> Result<JsValue, ExtensionError> {
    let message = to_object(message)?;
    let tab = JsValue::from_f64(tab as f64);
    let pending: Promise = call("tabs", "sendMessage", &[&tab, &message])?
        .dyn_into()
        .map_err(|_| ExtensionError::Js("tabs.sendMessage did not return a promise".into()))?;
    Ok(JsFuture::from(pending).await?)
}
