#![warn(missing_docs)]

//! Picture-in-Picture overlay engine for third-party video pages.
//!
//! The engine adds a Picture-in-Picture control to a page it does not own,
//! keeps that control alive while the page re-renders around it, mirrors
//! the browser's native Picture-in-Picture session in the control and
//! enters Picture-in-Picture by itself when a playing tab is hidden.
//!
//! # Architecture
//!
//! - [`SiteAdapter`]: per-site lookups and control construction, selected
//!   once from the page origin through [`Site`]
//! - [`Engine`]: session state machine ([`PipSession`]), auto-PiP policy
//!   ([`AutoPip`]), rendering and relay message handling
//! - [`Supervisor`]: idempotent injection driven by mutations, a retry
//!   schedule and site navigation signals
//! - [`Host`] / [`Dom`]: everything the engine needs from the page. The
//!   browser implementation lives in `pipkit-extension`; tests use the
//!   in-memory page behind the `helpers` feature
//!
//! # Example
//!
//! ```no_run
//! # use std::rc::Rc;
//! # use pipkit_engine::{EngineConfig, Host, Services};
//! # fn run<H: Host>(page: Rc<H>) {
//! let Some(runtime) = pipkit_engine::start(
//!     page,
//!     "https://www.youtube.com",
//!     Services::default(),
//!     EngineConfig::default(),
//! ) else {
//!     return;
//! };
//! // The runtime must outlive the page's callbacks
//! std::mem::forget(runtime);
//! # }
//! ```

mod adapter;
mod config;
mod engine;
mod error;
mod host;
mod policy;
mod protocol;
mod services;
mod session;
mod site;
mod supervisor;

#[cfg(any(test, feature = "helpers"))]
#[allow(missing_docs)]
pub mod helpers;

pub use adapter::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use host::*;
pub use policy::*;
pub use protocol::*;
pub use services::*;
pub use session::*;
pub use site::*;
pub use supervisor::*;

use std::rc::Rc;

/// A started engine and its supervisor. Every callback registered with the
/// host refers back to these weakly, so the page goes quiet once the
/// runtime is dropped.
pub struct Runtime<H: Host> {
    site: Site,
    supervisor: Rc<Supervisor<H>>,
}

impl<H: Host> Runtime<H> {
    /// The site selected for this page.
    pub fn site(&self) -> Site {
        self.site
    }

    /// The page's engine.
    pub fn engine(&self) -> &Rc<Engine<H>> {
        self.supervisor.engine()
    }

    /// The page's injection supervisor.
    pub fn supervisor(&self) -> &Rc<Supervisor<H>> {
        &self.supervisor
    }

    /// Apply a relay message.
    pub fn handle_message(&self, message: RelayMessage) -> Ack {
        self.engine().handle_message(message)
    }
}

/// Activate the engine on a page.
///
/// Returns `None` without touching the page when `origin` does not belong
/// to a supported site.
pub fn start<H: Host>(
    host: Rc<H>,
    origin: &str,
    services: Services,
    config: EngineConfig,
) -> Option<Runtime<H>> {
    let site = match origin.parse::<Site>() {
        Ok(site) => site,
        Err(error) => {
            tracing::debug!(%error, "Staying inactive");
            return None;
        }
    };
    tracing::debug!(%site, "Starting Picture-in-Picture engine");

    let engine = Engine::new(host.clone(), site.adapter(), services, config);

    let visibility = Rc::downgrade(&engine);
    host.on_visibility_change(Box::new(move || {
        if let Some(engine) = visibility.upgrade() {
            engine.handle_visibility();
        }
    }));

    let supervisor = Supervisor::new(engine);
    supervisor.start();

    Some(Runtime { site, supervisor })
}
