//! The seam between the engine and the page it runs in.
//!
//! [`Dom`] is the slice of the document API that site adapters need: pure
//! lookups plus the handful of mutations required to build and place the
//! control. [`Host`] adds the native Picture-in-Picture surface, event
//! subscriptions, timers and a local task spawner.
//!
//! In the browser both are implemented over `web-sys` by `pipkit-extension`.
//! Tests use the in-memory page from [`crate::helpers`].

use std::time::Duration;

use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::{DomError, PlatformError};

/// A handler for a repeating page event.
pub type Callback = Box<dyn FnMut()>;

/// Document tree access used by site adapters.
///
/// Element handles are cheap clones referring to nodes the page owns. None
/// of the lookups may fail: missing structure is reported as `None`.
pub trait Dom {
    /// A handle to a node in the host document
    type Element: Clone + 'static;

    /// First element in the document matching a CSS selector.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// First descendant of `scope` matching a CSS selector.
    fn query_in(&self, scope: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// The element carrying the given id, if it is in the document.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Parent element.
    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Previous element sibling.
    fn previous_sibling(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Number of element children.
    fn child_count(&self, element: &Self::Element) -> usize;

    /// Whether two handles refer to the same node.
    fn is_same(&self, a: &Self::Element, b: &Self::Element) -> bool;

    /// Create a detached HTML element.
    fn create_element(&self, tag: &str) -> Option<Self::Element>;

    /// Create a detached SVG element.
    fn create_svg_element(&self, tag: &str) -> Option<Self::Element>;

    /// Deep copy of a subtree, without event listeners.
    fn clone_subtree(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Set or overwrite an attribute.
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    /// Remove an attribute if present.
    fn remove_attribute(&self, element: &Self::Element, name: &str);

    /// Replace the element's content with a text node.
    fn set_text(&self, element: &Self::Element, text: &str);

    /// Add or remove a class.
    fn set_class(&self, element: &Self::Element, class: &str, enabled: bool);

    /// Insert `child` as the last child of `parent`.
    fn append(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), DomError>;

    /// Insert `child` as the first child of `parent`.
    fn prepend(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), DomError>;

    /// Insert `child` into `parent` right before `reference`.
    fn insert_before(
        &self,
        parent: &Self::Element,
        child: &Self::Element,
        reference: &Self::Element,
    ) -> Result<(), DomError>;

    /// Replace every child of `parent` with `child`.
    fn replace_children(&self, parent: &Self::Element, child: &Self::Element);

    /// Detach an element from its parent.
    fn remove(&self, element: &Self::Element);
}

/// Size of the floating Picture-in-Picture window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipWindowSize {
    /// Width in CSS pixels
    pub width: u32,
    /// Height in CSS pixels
    pub height: u32,
}

/// Native Picture-in-Picture lifecycle event observed on a video surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipEvent {
    /// The surface entered Picture-in-Picture (`enterpictureinpicture`)
    Enter(Option<PipWindowSize>),
    /// The floating window was resized
    Resize(PipWindowSize),
    /// The surface left Picture-in-Picture (`leavepictureinpicture`)
    Leave,
}

/// Identity-keyed set of video surfaces with weak membership.
///
/// Membership must not keep a surface alive: the page may drop a media
/// element at any time and the set should forget it when that happens.
pub trait SurfaceSet<E> {
    /// Insert a surface, returning `true` if it was not already a member.
    fn insert(&mut self, surface: &E) -> bool;
}

/// Everything the engine needs from the page beyond tree access.
pub trait Host: Dom + 'static {
    /// Registry type used to remember instrumented surfaces
    type Surfaces: SurfaceSet<Self::Element>;

    /// A fresh, empty surface registry.
    fn surface_set(&self) -> Self::Surfaces;

    /// `document.pictureInPictureEnabled`
    fn pip_enabled(&self) -> bool;

    /// `document.pictureInPictureElement`
    fn pip_element(&self) -> Option<Self::Element>;

    /// Whether the media surface is paused.
    fn is_paused(&self, surface: &Self::Element) -> bool;

    /// Whether the document is currently hidden.
    fn is_hidden(&self) -> bool;

    /// Ask the platform to move `surface` into a floating window.
    fn request_pip(&self, surface: &Self::Element)
    -> LocalBoxFuture<'static, Result<(), PlatformError>>;

    /// Ask the platform to close the floating window.
    fn exit_pip(&self) -> LocalBoxFuture<'static, Result<(), PlatformError>>;

    /// Run `handler` whenever the user activates `element`. The host's own
    /// handling of the activation must be suppressed.
    fn on_activate(&self, element: &Self::Element, handler: Callback);

    /// Observe native Picture-in-Picture events on `surface`.
    fn on_pip_event(&self, surface: &Self::Element, handler: Box<dyn FnMut(PipEvent)>);

    /// Observe document visibility transitions.
    fn on_visibility_change(&self, handler: Callback);

    /// Observe structural mutations anywhere below the document body.
    fn on_mutation(&self, handler: Callback);

    /// Observe a named event dispatched on the document.
    fn on_document_event(&self, name: &str, handler: Callback);

    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);

    /// Drive `task` to completion on the page's local executor.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}
