//! Background service worker: turns keyboard commands into relay
//! messages for the active tab.

use pipkit_engine::route_command;
use wasm_bindgen_futures::spawn_local;

use crate::chrome;
use crate::error::ExtensionError;
use crate::logging;

/// Listen for manifest commands.
pub fn run() -> Result<(), ExtensionError> {
    logging::init();

    chrome::on_command(|command| {
        spawn_local(async move {
            let tab = match chrome::active_tab().await {
                Ok(tab) => tab,
                Err(error) => {
                    tracing::warn!(%error, "Could not query the active tab");
                    return;
                }
            };
            let Some((id, message)) = route_command(&command, &tab) else {
                return;
            };
            // Tabs without a content script reject the message
            if let Err(error) = chrome::send_to_tab(id, &message).await {
                tracing::debug!(tab = id, %error, "Relay message was not delivered");
            }
        });
    })
}
