//! [`Dom`] and [`Host`] over the live document.
//!
//! Picture-in-Picture members (`requestPictureInPicture`,
//! `pictureInPictureElement`, ...) are reached through `Reflect` so the
//! page keeps working in browsers that lack them: they read as disabled
//! rather than failing to link.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use js_sys::{Function, Object, Promise, Reflect, WeakSet};
use pipkit_engine::{
    Callback, Dom, DomError, Host, PipEvent, PipWindowSize, PlatformError, SurfaceSet,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlMediaElement, MutationObserver,
    MutationObserverInit, Node, Window,
};

use crate::error::{ExtensionError, js_message};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// The document the content script runs in.
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    /// Bind to the current window's document.
    pub fn new() -> Result<Self, ExtensionError> {
        let window = web_sys::window().ok_or(ExtensionError::NoDocument)?;
        let document = window.document().ok_or(ExtensionError::NoDocument)?;
        Ok(WebPage { window, document })
    }

    /// `location.origin` of the page.
    pub fn origin(&self) -> Result<String, ExtensionError> {
        Ok(self.window.location().origin()?)
    }

    /// Whether the document is still being parsed.
    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    /// Run `task` once the document has been parsed.
    pub fn when_ready(&self, task: impl FnOnce() + 'static) {
        if !self.is_loading() {
            task();
            return;
        }
        let mut task = Some(task);
        listen(&self.document, "DOMContentLoaded", move |_| {
            if let Some(task) = task.take() {
                task();
            }
        });
    }
}

/// Add an event listener that lives as long as the page.
fn listen(target: &EventTarget, name: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(error) =
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
    {
        tracing::warn!(event = name, error = %js_message(&error), "Could not add listener");
    }
    closure.forget();
}

fn dom_error(value: JsValue) -> DomError {
    DomError::Operation(js_message(&value))
}

impl Dom for WebPage {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_in(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn previous_sibling(&self, element: &Element) -> Option<Element> {
        element.previous_element_sibling()
    }

    fn child_count(&self, element: &Element) -> usize {
        element.child_element_count() as usize
    }

    fn is_same(&self, a: &Element, b: &Element) -> bool {
        let b: &Node = b;
        a.is_same_node(Some(b))
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn create_svg_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element_ns(Some(SVG_NS), tag).ok()
    }

    fn clone_subtree(&self, element: &Element) -> Option<Element> {
        element.clone_node_with_deep(true).ok()?.dyn_into().ok()
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        let _ = element.set_attribute(name, value);
    }

    fn remove_attribute(&self, element: &Element, name: &str) {
        let _ = element.remove_attribute(name);
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_class(&self, element: &Element, class: &str, enabled: bool) {
        let _ = element.class_list().toggle_with_force(class, enabled);
    }

    fn append(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent.append_child(child).map(drop).map_err(dom_error)
    }

    fn prepend(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent.prepend_with_node_1(child).map_err(dom_error)
    }

    fn insert_before(
        &self,
        parent: &Element,
        child: &Element,
        reference: &Element,
    ) -> Result<(), DomError> {
        let reference: &Node = reference;
        parent
            .insert_before(child, Some(reference))
            .map(drop)
            .map_err(dom_error)
    }

    fn replace_children(&self, parent: &Element, child: &Element) {
        let _ = parent.replace_children_with_node_1(child);
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }
}

/// Surfaces held in a `WeakSet`, so a media element the page drops can be
/// collected.
pub struct WebSurfaces(WeakSet);

impl SurfaceSet<Element> for WebSurfaces {
    fn insert(&mut self, surface: &Element) -> bool {
        let key: &Object = surface.unchecked_ref();
        if self.0.has(key) {
            return false;
        }
        self.0.add(key);
        true
    }
}

fn invoke(target: &JsValue, method: &str) -> Result<Promise, PlatformError> {
    let function = Reflect::get(target, &method.into())
        .ok()
        .and_then(|function| function.dyn_into::<Function>().ok())
        .ok_or(PlatformError::Unsupported)?;
    function
        .call0(target)
        .map_err(platform_error)?
        .dyn_into::<Promise>()
        .map_err(|_| PlatformError::Failed(format!("{method} did not return a promise")))
}

/// Await a native call. The call itself has already been made, so it ran
/// inside whatever user gesture was active.
fn completion(
    call: Result<Promise, PlatformError>,
) -> LocalBoxFuture<'static, Result<(), PlatformError>> {
    async move {
        JsFuture::from(call?)
            .await
            .map(drop)
            .map_err(platform_error)
    }
    .boxed_local()
}

fn platform_error(value: JsValue) -> PlatformError {
    let name = Reflect::get(&value, &"name".into())
        .ok()
        .and_then(|name| name.as_string());
    match name.as_deref() {
        Some("NotAllowedError") => PlatformError::NotAllowed(js_message(&value)),
        Some("NotSupportedError") => PlatformError::Unsupported,
        _ => PlatformError::Failed(js_message(&value)),
    }
}

fn window_size(window: &JsValue) -> Option<PipWindowSize> {
    let dimension = |name: &str| {
        Reflect::get(window, &name.into())
            .ok()?
            .as_f64()
            .map(|value| value as u32)
    };
    Some(PipWindowSize {
        width: dimension("width")?,
        height: dimension("height")?,
    })
}

impl Host for WebPage {
    type Surfaces = WebSurfaces;

    fn surface_set(&self) -> WebSurfaces {
        WebSurfaces(WeakSet::new())
    }

    fn pip_enabled(&self) -> bool {
        Reflect::get(&self.document, &"pictureInPictureEnabled".into())
            .ok()
            .and_then(|enabled| enabled.as_bool())
            .unwrap_or(false)
    }

    fn pip_element(&self) -> Option<Element> {
        Reflect::get(&self.document, &"pictureInPictureElement".into())
            .ok()?
            .dyn_into()
            .ok()
    }

    fn is_paused(&self, surface: &Element) -> bool {
        surface
            .dyn_ref::<HtmlMediaElement>()
            .is_none_or(|media| media.paused())
    }

    fn is_hidden(&self) -> bool {
        self.document.hidden()
    }

    fn request_pip(&self, surface: &Element) -> LocalBoxFuture<'static, Result<(), PlatformError>> {
        completion(invoke(surface, "requestPictureInPicture"))
    }

    fn exit_pip(&self) -> LocalBoxFuture<'static, Result<(), PlatformError>> {
        completion(invoke(&self.document, "exitPictureInPicture"))
    }

    fn on_activate(&self, element: &Element, mut handler: Callback) {
        listen(element, "click", move |event| {
            event.prevent_default();
            event.stop_propagation();
            handler();
        });
    }

    fn on_pip_event(&self, surface: &Element, handler: Box<dyn FnMut(PipEvent)>) {
        let handler = Rc::new(RefCell::new(handler));

        let on_enter = handler.clone();
        listen(surface, "enterpictureinpicture", move |event| {
            let window = Reflect::get(&event, &"pictureInPictureWindow".into())
                .ok()
                .filter(|window| window.is_object());

            if let Some(window) = &window {
                let on_resize = on_enter.clone();
                listen(window.unchecked_ref(), "resize", move |event| {
                    let size = event.target().and_then(|window| window_size(&window));
                    if let Some(size) = size {
                        (on_resize.borrow_mut())(PipEvent::Resize(size));
                    }
                });
            }

            let size = window.as_ref().and_then(window_size);
            (on_enter.borrow_mut())(PipEvent::Enter(size));
        });

        listen(surface, "leavepictureinpicture", move |_| {
            (handler.borrow_mut())(PipEvent::Leave);
        });
    }

    fn on_visibility_change(&self, mut handler: Callback) {
        listen(&self.document, "visibilitychange", move |_| handler());
    }

    fn on_mutation(&self, mut handler: Callback) {
        let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |_records: js_sys::Array, _observer: MutationObserver| handler(),
        );
        let observer = match MutationObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(error) => {
                tracing::warn!(error = %js_message(&error), "Could not create mutation observer");
                return;
            }
        };
        callback.forget();

        let Some(body) = self.document.body() else {
            tracing::warn!("Document has no body to observe");
            return;
        };
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        if let Err(error) = observer.observe_with_options(&body, &options) {
            tracing::warn!(error = %js_message(&error), "Could not observe mutations");
        }
    }

    fn on_document_event(&self, name: &str, mut handler: Callback) {
        listen(&self.document, name, move |_| handler());
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(error) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                timeout,
            )
        {
            tracing::warn!(error = %js_message(&error), "Could not schedule timer");
        }
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
