//! When to enter Picture-in-Picture without being asked.

use crate::session::PipPhase;

/// Document visibility after a `visibilitychange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// The tab is in the foreground
    Visible,
    /// The tab is in the background or minimized
    Hidden,
}

impl Visibility {
    /// From `document.hidden`.
    pub fn from_hidden(hidden: bool) -> Self {
        if hidden {
            Visibility::Hidden
        } else {
            Visibility::Visible
        }
    }
}

/// Auto-PiP enablement for one page context. Not persisted: every page
/// load starts from the configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoPip {
    enabled: bool,
}

impl AutoPip {
    /// A policy that starts enabled or disabled.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether automatic entry is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn automatic entry on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether a visibility transition should trigger a request.
    ///
    /// `playing` is `None` when no surface is bound. Becoming visible never
    /// triggers anything: an automatically entered window is left for the
    /// user to close.
    pub fn should_enter(&self, visibility: Visibility, playing: Option<bool>, phase: PipPhase) -> bool {
        self.enabled
            && visibility == Visibility::Hidden
            && playing == Some(true)
            && phase == PipPhase::Inactive
    }
}

impl Default for AutoPip {
    fn default() -> Self {
        Self::new(true)
    }
}
