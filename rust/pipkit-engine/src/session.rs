//! The Picture-in-Picture session state machine.
//!
//! ```text
//!             toggle (permitted)           native accept / enter
//!  Inactive ─────────────────────▶ Requesting ─────────────────▶ Active
//!     ▲                                │                           │
//!     │        native reject           │                    toggle │
//!     ├────────────────────────────────┘                           ▼
//!     └──────────────────────────────────────────────────────── Exiting
//!                      completion / leave
//! ```
//!
//! The transient phases exist so that a second toggle arriving while a
//! native call is still pending is dropped instead of issuing an
//! overlapping call. Native `enter` / `leave` events win over whatever the
//! machine expected.

use std::fmt;

/// Phase of the page's Picture-in-Picture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipPhase {
    /// No window is open
    #[default]
    Inactive,
    /// A native request is in flight
    Requesting,
    /// The surface is in a floating window
    Active,
    /// A native exit is in flight
    Exiting,
}

impl fmt::Display for PipPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipPhase::Inactive => "inactive",
            PipPhase::Requesting => "requesting",
            PipPhase::Active => "active",
            PipPhase::Exiting => "exiting",
        };
        f.write_str(name)
    }
}

/// Native call the engine must issue after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipCall {
    /// `requestPictureInPicture` on the bound surface
    Request,
    /// `document.exitPictureInPicture`
    Exit,
}

/// Owned session state. All transitions are synchronous; the engine issues
/// the native call a transition asks for and reports back through
/// [`PipSession::settled`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipSession {
    phase: PipPhase,
}

impl PipSession {
    /// A session matching the native status observed at bind time.
    pub fn new(native_active: bool) -> Self {
        Self {
            phase: stable(native_active),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> PipPhase {
        self.phase
    }

    /// Whether the control should render as active. A pending exit is
    /// still active until the platform confirms it.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, PipPhase::Active | PipPhase::Exiting)
    }

    /// User or relay toggle. `permitted` is whether a request may be
    /// issued at all (PiP enabled and a surface bound); exiting needs no
    /// permission. Returns the native call to issue, if any.
    pub fn toggle(&mut self, permitted: bool) -> Option<PipCall> {
        match self.phase {
            PipPhase::Inactive if permitted => {
                self.phase = PipPhase::Requesting;
                Some(PipCall::Request)
            }
            PipPhase::Active => {
                self.phase = PipPhase::Exiting;
                Some(PipCall::Exit)
            }
            PipPhase::Inactive | PipPhase::Requesting | PipPhase::Exiting => None,
        }
    }

    /// Request transition used by auto-PiP. Only valid from `Inactive`.
    pub fn request(&mut self) -> bool {
        if self.phase != PipPhase::Inactive {
            return false;
        }
        self.phase = PipPhase::Requesting;
        true
    }

    /// Native `enterpictureinpicture`.
    pub fn entered(&mut self) {
        self.phase = PipPhase::Active;
    }

    /// Native `leavepictureinpicture`. While a request is in flight the
    /// leave belongs to whichever element held the window before, so the
    /// request's own outcome decides.
    pub fn left(&mut self) {
        if self.phase != PipPhase::Requesting {
            self.phase = PipPhase::Inactive;
        }
    }

    /// A native call finished. `native_active` is the platform's status
    /// after the call; it is authoritative whether the call succeeded or
    /// not. Stale completions (the phase already moved on) are ignored.
    pub fn settled(&mut self, call: PipCall, native_active: bool) {
        let pending = match call {
            PipCall::Request => PipPhase::Requesting,
            PipCall::Exit => PipPhase::Exiting,
        };
        if self.phase == pending {
            self.phase = stable(native_active);
        }
    }

    /// Align a stable phase with the native status. In-flight phases are
    /// left for their call to settle.
    pub fn resync(&mut self, native_active: bool) {
        if matches!(self.phase, PipPhase::Inactive | PipPhase::Active) {
            self.phase = stable(native_active);
        }
    }
}

fn stable(native_active: bool) -> PipPhase {
    if native_active {
        PipPhase::Active
    } else {
        PipPhase::Inactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_starts_from_the_native_status() {
        assert_eq!(PipSession::new(false).phase(), PipPhase::Inactive);
        assert_eq!(PipSession::new(true).phase(), PipPhase::Active);
    }

    #[test]
    fn it_round_trips_through_a_request_and_an_exit() {
        let mut session = PipSession::new(false);

        assert_eq!(session.toggle(true), Some(PipCall::Request));
        assert_eq!(session.phase(), PipPhase::Requesting);
        assert!(!session.is_active());

        session.settled(PipCall::Request, true);
        assert_eq!(session.phase(), PipPhase::Active);

        assert_eq!(session.toggle(true), Some(PipCall::Exit));
        assert!(session.is_active());

        session.settled(PipCall::Exit, false);
        assert_eq!(session, PipSession::new(false));
    }

    #[test]
    fn it_refuses_to_request_without_permission() {
        let mut session = PipSession::new(false);

        assert_eq!(session.toggle(false), None);
        assert_eq!(session.phase(), PipPhase::Inactive);
    }

    #[test]
    fn it_exits_without_permission() {
        let mut session = PipSession::new(true);

        assert_eq!(session.toggle(false), Some(PipCall::Exit));
    }

    #[test]
    fn it_drops_toggles_while_a_call_is_in_flight() {
        let mut session = PipSession::new(false);
        session.toggle(true);

        assert_eq!(session.toggle(true), None);
        assert!(!session.request());
        assert_eq!(session.phase(), PipPhase::Requesting);

        session.entered();
        session.toggle(true);
        assert_eq!(session.toggle(true), None);
        assert_eq!(session.phase(), PipPhase::Exiting);
    }

    #[test]
    fn it_falls_back_to_inactive_on_rejection() {
        let mut session = PipSession::new(false);
        session.toggle(true);

        session.settled(PipCall::Request, false);
        assert_eq!(session.phase(), PipPhase::Inactive);
    }

    #[test]
    fn it_stays_active_when_an_exit_fails() {
        let mut session = PipSession::new(true);
        session.toggle(true);

        session.settled(PipCall::Exit, true);
        assert_eq!(session.phase(), PipPhase::Active);
    }

    #[test]
    fn it_follows_native_events_without_a_toggle() {
        let mut session = PipSession::new(false);

        session.entered();
        assert_eq!(session.phase(), PipPhase::Active);

        session.left();
        assert_eq!(session.phase(), PipPhase::Inactive);
    }

    #[test]
    fn it_ignores_stale_completions() {
        let mut session = PipSession::new(false);
        session.toggle(true);
        session.entered();

        // The request's own completion arrives after the enter event
        session.settled(PipCall::Request, true);
        assert_eq!(session.phase(), PipPhase::Active);

        // An exit completion with no exit pending changes nothing
        session.settled(PipCall::Exit, false);
        assert_eq!(session.phase(), PipPhase::Active);
    }

    #[test]
    fn it_leaves_in_flight_phases_alone_on_resync() {
        let mut session = PipSession::new(false);
        session.toggle(true);

        session.resync(false);
        assert_eq!(session.phase(), PipPhase::Requesting);

        session.left();
        assert_eq!(session.phase(), PipPhase::Requesting);

        let mut session = PipSession::new(false);
        session.resync(true);
        assert_eq!(session.phase(), PipPhase::Active);
    }
}
