//! Per-site lookups and control construction.
//!
//! Every supported site implements [`SiteAdapter`]. Lookups are pure and
//! synchronous; when the host page has not rendered the expected structure
//! yet they return `None` and the supervisor tries again later.

mod icon;
mod netflix;
mod youtube;

pub use icon::*;
pub use netflix::*;
pub use youtube::*;

use crate::host::Dom;
use crate::services::Localizer;

/// Reserved id of the injected control. Its presence in the document is
/// the only idempotency guard for injection.
pub const CONTROL_ID: &str = "pip-ext-button";

/// Reserved id of a spacer injected next to the control. The host may
/// remove the control and leave the spacer behind, so a stale spacer is
/// dropped before every fresh injection.
pub const SPACER_ID: &str = "pip-ext-spacer";

/// Class set on the control while Picture-in-Picture is active.
pub const ACTIVE_CLASS: &str = "pip-ext-active";

/// Where the control goes when no reference sibling is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// First child of the container
    Prepend,
    /// Last child of the container
    Append,
}

/// A freshly built, still detached control.
#[derive(Debug, Clone)]
pub struct Control<E> {
    /// The interactive element carrying [`CONTROL_ID`]
    pub handle: E,
    /// Top-level nodes to insert, in document order
    pub nodes: Vec<E>,
}

impl<E: Clone> Control<E> {
    /// A control made of a single node.
    pub fn single(handle: E) -> Self {
        Self {
            nodes: vec![handle.clone()],
            handle,
        }
    }
}

/// Lookup and construction contract shared by all supported sites.
pub trait SiteAdapter<D: Dom> {
    /// The page's playable media element.
    fn locate_video_surface(&self, dom: &D) -> Option<D::Element>;

    /// The element the control is inserted into.
    fn locate_insertion_container(&self, dom: &D) -> Option<D::Element>;

    /// The child of `container` the control is inserted before.
    fn locate_insertion_reference(&self, dom: &D, container: &D::Element) -> Option<D::Element>;

    /// Fallback position inside the container.
    fn fallback_edge(&self) -> Edge;

    /// Build the detached control in its inactive state.
    fn build_control(&self, dom: &D, text: &dyn Localizer) -> Option<Control<D::Element>>;

    /// Bring the control's visuals in line with the session state.
    fn render_control_state(
        &self,
        dom: &D,
        control: &D::Element,
        active: bool,
        text: &dyn Localizer,
    );

    /// Undo host-page restrictions on the surface before it is used.
    fn prepare_surface(&self, _dom: &D, _surface: &D::Element) {}

    /// Document event the site fires after a client-side navigation.
    fn navigation_event(&self) -> Option<&'static str> {
        None
    }
}
