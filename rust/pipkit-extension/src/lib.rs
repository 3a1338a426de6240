#![warn(missing_docs)]

//! Browser extension wiring for [`pipkit_engine`].
//!
//! The extension ships two WASM entry points:
//!
//! ```text
//! ┌────────────────────────────┐   tabs.sendMessage   ┌──────────────────────────┐
//! │ background (service worker)│ ───────────────────▸ │ content script (page)    │
//! │  commands.onCommand        │   {"action": ...}    │  runtime.onMessage       │
//! │  tabs.query (active tab)   │ ◂─────────────────── │  Engine ── WebPage (DOM) │
//! └────────────────────────────┘     {"ok": true}     └──────────────────────────┘
//! ```
//!
//! - `content`: binds the engine to the page through [`page::WebPage`],
//!   localizes with `chrome.i18n` and persists window sizes to
//!   `chrome.storage.local`
//! - `background`: forwards the `toggle-pip` keyboard command to the
//!   content script of the active tab
//!
//! Everything here is compiled only for `wasm32-unknown-unknown`; the
//! engine itself is platform independent.

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod background;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod chrome;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod content;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod error;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod logging;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod page;
