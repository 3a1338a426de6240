//! Messages exchanged between the privileged background context and the
//! page context.
//!
//! The background context turns the `toggle-pip` keyboard command into a
//! [`RelayMessage::TogglePip`] for the active tab. Messages are plain
//! objects on the wire:
//!
//! - `{ "action": "toggle-pip" }`
//! - `{ "action": "set-auto-pip", "enabled": true }`
//!
//! Both are answered with `{ "ok": true }` as soon as they are applied;
//! senders never wait for the Picture-in-Picture call itself. Anything else
//! is not ours and gets no reply.

use serde::{Deserialize, Serialize};

use crate::site::Site;

/// Name of the keyboard command declared by the extension manifest.
pub const TOGGLE_COMMAND: &str = "toggle-pip";

/// A message delivered to the page context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum RelayMessage {
    /// Toggle Picture-in-Picture as if the control was clicked
    TogglePip,
    /// Enable or disable auto-PiP for this page
    SetAutoPip {
        /// New enablement
        enabled: bool,
    },
}

impl RelayMessage {
    /// Decode a message from its JSON form. Returns `None` for messages
    /// meant for someone else.
    pub fn from_json(source: &str) -> Option<Self> {
        serde_json::from_str(source).ok()
    }

    /// Encode for the wire.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Reply to a handled [`RelayMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Whether the message was applied
    pub ok: bool,
}

impl Ack {
    /// Successful acknowledgement.
    pub fn ok() -> Self {
        Ack { ok: true }
    }
}

/// The active tab as reported by `chrome.tabs.query`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    /// Tab id; absent for some special tabs
    pub id: Option<i64>,
    /// Tab URL; absent without the `tabs` permission
    pub url: Option<String>,
}

/// Decide where a keyboard command goes. Only the toggle command is
/// routed, and only to a tab showing a supported site.
pub fn route_command(command: &str, tab: &TabInfo) -> Option<(i64, RelayMessage)> {
    if command != TOGGLE_COMMAND {
        return None;
    }
    let id = tab.id.filter(|id| *id > 0)?;
    let url = tab.url.as_deref()?;
    Site::from_origin(url)?;

    Some((id, RelayMessage::TogglePip))
}
