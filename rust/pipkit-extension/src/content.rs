//! Content script: runs in every matching page and drives the engine.

use std::rc::Rc;

use pipkit_engine::{EngineConfig, Services};

use crate::chrome::{self, ChromeI18n, ChromeStorage};
use crate::error::ExtensionError;
use crate::logging;
use crate::page::WebPage;

/// Start the engine for the current page once it has been parsed.
pub fn run() -> Result<(), ExtensionError> {
    logging::init();

    let page = Rc::new(WebPage::new()?);
    let origin = page.origin()?;

    page.clone().when_ready(move || {
        let services = Services {
            text: Box::new(ChromeI18n),
            sizes: Box::new(ChromeStorage),
        };
        let Some(runtime) = pipkit_engine::start(page, &origin, services, EngineConfig::default())
        else {
            return;
        };
        tracing::info!(site = %runtime.site(), "Picture-in-Picture control enabled");

        let runtime = Rc::new(runtime);
        let relay = runtime.clone();
        if let Err(error) = chrome::on_message(move |message| relay.handle_message(message)) {
            tracing::warn!(%error, "Relay messages are unavailable");
        }

        // Lives until the page unloads
        std::mem::forget(runtime);
    });
    Ok(())
}
