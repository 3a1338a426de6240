//! The site-agnostic core: toggling, session tracking, rendering and the
//! auto-PiP policy for one page.
//!
//! An [`Engine`] is owned through an `Rc` and hands only `Weak` references
//! to the callbacks it registers with the host, so dropping the engine
//! turns every outstanding callback into a no-op.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;

use crate::adapter::{CONTROL_ID, SiteAdapter};
use crate::config::EngineConfig;
use crate::error::PlatformError;
use crate::host::{Host, PipEvent, PipWindowSize, SurfaceSet};
use crate::policy::{AutoPip, Visibility};
use crate::protocol::{Ack, RelayMessage};
use crate::services::{Localizer, Services};
use crate::session::{PipCall, PipPhase, PipSession};

struct EngineState<H: Host> {
    session: PipSession,
    auto_pip: AutoPip,
    surfaces: H::Surfaces,
}

/// Per-page Picture-in-Picture engine.
pub struct Engine<H: Host> {
    me: Weak<Engine<H>>,
    host: Rc<H>,
    adapter: Box<dyn SiteAdapter<H>>,
    services: Services,
    config: EngineConfig,
    state: RefCell<EngineState<H>>,
}

impl<H: Host> Engine<H> {
    /// Create an engine for a page. The session starts from the native
    /// status of the page at this point.
    pub fn new(
        host: Rc<H>,
        adapter: Box<dyn SiteAdapter<H>>,
        services: Services,
        config: EngineConfig,
    ) -> Rc<Self> {
        let state = EngineState {
            session: PipSession::new(host.pip_element().is_some()),
            auto_pip: AutoPip::new(config.auto_pip),
            surfaces: host.surface_set(),
        };
        Rc::new_cyclic(|me| Engine {
            me: me.clone(),
            host,
            adapter,
            services,
            config,
            state: RefCell::new(state),
        })
    }

    /// The page this engine drives.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Timing and feature settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn adapter(&self) -> &dyn SiteAdapter<H> {
        self.adapter.as_ref()
    }

    pub(crate) fn text(&self) -> &dyn Localizer {
        self.services.text.as_ref()
    }

    pub(crate) fn weak(&self) -> Weak<Self> {
        self.me.clone()
    }

    /// Current phase of the Picture-in-Picture session.
    pub fn phase(&self) -> PipPhase {
        self.state.borrow().session.phase()
    }

    /// Whether hiding a playing tab enters Picture-in-Picture.
    pub fn auto_pip_enabled(&self) -> bool {
        self.state.borrow().auto_pip.is_enabled()
    }

    /// The page's current video surface, with host restrictions lifted.
    pub fn surface(&self) -> Option<H::Element> {
        let surface = self.adapter.locate_video_surface(&*self.host)?;
        self.adapter.prepare_surface(&*self.host, &surface);
        Some(surface)
    }

    /// Enter or leave Picture-in-Picture.
    ///
    /// Dropped while a native call is pending, and when there is nothing
    /// to put in a window.
    pub fn toggle(&self) {
        let surface = self.surface();
        let permitted = surface.is_some() && self.host.pip_enabled();

        let call = self.state.borrow_mut().session.toggle(permitted);
        match (call, &surface) {
            (Some(PipCall::Request), Some(surface)) => {
                let request = self.host.request_pip(surface);
                self.issue(PipCall::Request, request);
            }
            (Some(PipCall::Exit), _) => {
                let exit = self.host.exit_pip();
                self.issue(PipCall::Exit, exit);
            }
            _ => {
                tracing::debug!(
                    phase = %self.phase(),
                    permitted,
                    "Ignoring Picture-in-Picture toggle"
                );
            }
        }

        self.render();
    }

    /// React to a document visibility transition.
    pub fn handle_visibility(&self) {
        let visibility = Visibility::from_hidden(self.host.is_hidden());
        if visibility == Visibility::Visible {
            return;
        }

        let surface = self.surface();
        let playing = surface.as_ref().map(|surface| !self.host.is_paused(surface));

        let requested = {
            let mut state = self.state.borrow_mut();
            let phase = state.session.phase();
            state.auto_pip.should_enter(visibility, playing, phase) && state.session.request()
        };

        if let (true, Some(surface)) = (requested, surface) {
            tracing::debug!("Entering Picture-in-Picture for hidden tab");
            let request = self.host.request_pip(&surface);
            self.issue(PipCall::Request, request);
        }
    }

    /// Apply a relay message. The reply is sent before any native call
    /// completes.
    pub fn handle_message(&self, message: RelayMessage) -> Ack {
        match message {
            RelayMessage::TogglePip => self.toggle(),
            RelayMessage::SetAutoPip { enabled } => self.set_auto_pip(enabled),
        }
        Ack::ok()
    }

    /// Enable or disable automatic entry.
    pub fn set_auto_pip(&self, enabled: bool) {
        tracing::debug!(enabled, "Auto Picture-in-Picture");
        self.state.borrow_mut().auto_pip.set_enabled(enabled);
    }

    /// Start observing native events on `surface`. Returns `false` if the
    /// surface was already bound.
    pub fn bind_surface(&self, surface: &H::Element) -> bool {
        if !self.state.borrow_mut().surfaces.insert(surface) {
            return false;
        }

        let engine = self.weak();
        self.host.on_pip_event(
            surface,
            Box::new(move |event| {
                if let Some(engine) = engine.upgrade() {
                    engine.handle_pip_event(event);
                }
            }),
        );
        true
    }

    /// Resynchronize a stable session with the page and redraw.
    pub fn sync_from_native(&self) {
        let native_active = self.host.pip_element().is_some();
        self.state.borrow_mut().session.resync(native_active);
        self.render();
    }

    /// Redraw the control, if it is in the document.
    pub fn render(&self) {
        let Some(control) = self.host.element_by_id(CONTROL_ID) else {
            return;
        };
        let active = self.state.borrow().session.is_active();
        self.adapter
            .render_control_state(&*self.host, &control, active, self.text());
    }

    fn handle_pip_event(&self, event: PipEvent) {
        match event {
            PipEvent::Enter(size) => {
                self.state.borrow_mut().session.entered();
                self.render();
                if let Some(size) = size {
                    self.persist(size);
                }
            }
            PipEvent::Resize(size) => self.persist(size),
            PipEvent::Leave => {
                self.state.borrow_mut().session.left();
                self.render();
            }
        }
    }

    fn persist(&self, size: PipWindowSize) {
        if let Err(error) = self.services.sizes.save(size) {
            tracing::warn!(%error, "Could not save Picture-in-Picture window size");
        }
    }

    fn issue(&self, call: PipCall, pending: LocalBoxFuture<'static, Result<(), PlatformError>>) {
        let engine = self.weak();
        self.host.spawn(
            async move {
                let outcome = pending.await;
                if let Some(engine) = engine.upgrade() {
                    engine.settle(call, outcome);
                }
            }
            .boxed_local(),
        );
    }

    fn settle(&self, call: PipCall, outcome: Result<(), PlatformError>) {
        if let Err(error) = &outcome {
            tracing::warn!(?call, %error, "Picture-in-Picture call failed");
        }
        let native_active = self.host.pip_element().is_some();
        self.state.borrow_mut().session.settled(call, native_active);
        self.render();
    }
}
