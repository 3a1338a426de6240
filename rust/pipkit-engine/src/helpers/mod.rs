//! In-memory page for exercising the engine without a browser.
//!
//! [`FakePage`] implements [`Dom`] and [`Host`] over a small tree of
//! [`FakeElement`]s. Everything the real page does asynchronously is driven
//! explicitly by the test:
//!
//! - mutations: [`FakePage::notify_mutation`]
//! - timers: [`FakePage::advance`] moves a virtual clock
//! - native Picture-in-Picture calls: resolved according to [`NativeMode`],
//!   or one by one with [`FakePage::accept_next`] / [`FakePage::reject_next`]
//! - spawned tasks: [`FakePage::run_until_stalled`]

mod fixtures;
mod selector;

pub use fixtures::*;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;

use crate::error::{DomError, PlatformError, StorageError};
use crate::host::{Callback, Dom, Host, PipEvent, PipWindowSize, SurfaceSet};
use crate::services::SizeStore;

use selector::Selector;

type Shared<T> = Rc<RefCell<T>>;
type PipHandler = Shared<Box<dyn FnMut(PipEvent)>>;

struct Node {
    tag: String,
    svg: bool,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<FakeElement>,
    parent: Weak<RefCell<Node>>,
    paused: bool,
    activate: Vec<Shared<Callback>>,
    pip: Vec<PipHandler>,
}

/// A node in a [`FakePage`].
#[derive(Clone)]
pub struct FakeElement(Rc<RefCell<Node>>);

impl FakeElement {
    /// A detached HTML element.
    pub fn new(tag: &str) -> Self {
        Self::create(tag, false)
    }

    /// A detached SVG element.
    pub fn svg(tag: &str) -> Self {
        Self::create(tag, true)
    }

    fn create(tag: &str, svg: bool) -> Self {
        FakeElement(Rc::new(RefCell::new(Node {
            tag: tag.to_ascii_lowercase(),
            svg,
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent: Weak::new(),
            paused: true,
            activate: Vec::new(),
            pip: Vec::new(),
        })))
    }

    /// Builder: set an attribute.
    pub fn attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder: append a child.
    pub fn with(self, child: FakeElement) -> Self {
        self.append_child(&child);
        self
    }

    /// Builder: set the text content.
    pub fn text_content(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn is_svg(&self) -> bool {
        self.0.borrow().svg
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .borrow()
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    pub fn id(&self) -> Option<String> {
        self.attribute("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Concatenated text of this node and its descendants.
    pub fn text(&self) -> String {
        let node = self.0.borrow();
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&child.text());
        }
        text
    }

    pub fn children(&self) -> Vec<FakeElement> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<FakeElement> {
        self.0.borrow().parent.upgrade().map(FakeElement)
    }

    pub fn previous_sibling(&self) -> Option<FakeElement> {
        let parent = self.parent()?;
        let siblings = parent.children();
        let index = siblings.iter().position(|s| s.ptr_eq(self))?;
        index.checked_sub(1).map(|i| siblings[i].clone())
    }

    pub fn ptr_eq(&self, other: &FakeElement) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_paused(&self) -> bool {
        self.0.borrow().paused
    }

    /// Start or stop "playback" of a media element.
    pub fn set_paused(&self, paused: bool) {
        self.0.borrow_mut().paused = paused;
    }

    /// Simulate a user click on the element.
    pub fn click(&self) {
        let handlers = self.0.borrow().activate.clone();
        for handler in handlers {
            (handler.borrow_mut())();
        }
    }

    pub fn append_child(&self, child: &FakeElement) {
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    /// Detach the element from its parent, like `Element.remove()`.
    pub fn remove(&self) {
        self.detach();
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        let mut node = self.0.borrow_mut();
        match node.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => node.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attributes.retain(|(key, _)| key != name);
    }

    fn set_text(&self, text: &str) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in children {
            child.0.borrow_mut().parent = Weak::new();
        }
        self.0.borrow_mut().text = text.to_string();
    }

    fn detach(&self) {
        let parent = self.0.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent.borrow_mut().children.retain(|c| !c.ptr_eq(self));
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    fn insert_at(&self, child: &FakeElement, index: usize) {
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        let mut node = self.0.borrow_mut();
        let index = index.min(node.children.len());
        node.children.insert(index, child.clone());
    }

    fn deep_clone(&self) -> FakeElement {
        let node = self.0.borrow();
        let copy = FakeElement::create(&node.tag, node.svg);
        {
            let mut target = copy.0.borrow_mut();
            target.attributes = node.attributes.clone();
            target.text = node.text.clone();
            target.paused = node.paused;
        }
        for child in &node.children {
            copy.append_child(&child.deep_clone());
        }
        copy
    }

    fn find_first(&self, selector: &Selector) -> Option<FakeElement> {
        for child in self.children() {
            if selector.matches(&child) {
                return Some(child);
            }
            if let Some(found) = child.find_first(selector) {
                return Some(found);
            }
        }
        None
    }

    fn find_all(&self, selector: &Selector, found: &mut Vec<FakeElement>) {
        for child in self.children() {
            if selector.matches(&child) {
                found.push(child.clone());
            }
            child.find_all(selector, found);
        }
    }

    fn fire_pip(&self, event: PipEvent) {
        let handlers = self.0.borrow().pip.clone();
        for handler in handlers {
            (handler.borrow_mut())(event);
        }
    }
}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("FakeElement")
            .field("tag", &node.tag)
            .field("attributes", &node.attributes)
            .field("children", &node.children.len())
            .finish()
    }
}

/// How the fake platform answers native Picture-in-Picture calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeMode {
    /// Calls succeed once the spawned task is polled
    Accept,
    /// Calls fail as if no user gesture was available
    Reject,
    /// Calls stay pending until the test resolves them
    Manual,
}

/// A native call held back by [`NativeMode::Manual`].
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
    Request(FakeElement),
    Exit,
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

struct Pending {
    call: NativeCall,
    reply: oneshot::Sender<Result<(), PlatformError>>,
}

struct Timer {
    due: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

/// A scriptable, single-threaded stand-in for a browser page.
pub struct FakePage {
    me: Weak<FakePage>,
    root: FakeElement,
    body: FakeElement,

    pip_enabled: Cell<bool>,
    pip_element: RefCell<Option<FakeElement>>,
    window: Cell<PipWindowSize>,
    hidden: Cell<bool>,
    native: Cell<NativeMode>,
    pending: RefCell<VecDeque<Pending>>,
    requests: Cell<usize>,
    exits: Cell<usize>,

    lookups: Cell<usize>,
    subscriptions: Cell<usize>,
    refuse: Cell<bool>,
    mutation: RefCell<Vec<Shared<Callback>>>,
    visibility: RefCell<Vec<Shared<Callback>>>,
    events: RefCell<Vec<(String, Shared<Callback>)>>,

    clock: Cell<Duration>,
    seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl FakePage {
    /// An empty, visible document with Picture-in-Picture enabled.
    pub fn new() -> Rc<Self> {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        let body = FakeElement::new("body");
        let root = FakeElement::new("#document").with(FakeElement::new("html").with(body.clone()));

        Rc::new_cyclic(|me| FakePage {
            me: me.clone(),
            root,
            body,
            pip_enabled: Cell::new(true),
            pip_element: RefCell::new(None),
            window: Cell::new(PipWindowSize {
                width: 400,
                height: 225,
            }),
            hidden: Cell::new(false),
            native: Cell::new(NativeMode::Accept),
            pending: RefCell::new(VecDeque::new()),
            requests: Cell::new(0),
            exits: Cell::new(0),
            lookups: Cell::new(0),
            subscriptions: Cell::new(0),
            refuse: Cell::new(false),
            mutation: RefCell::new(Vec::new()),
            visibility: RefCell::new(Vec::new()),
            events: RefCell::new(Vec::new()),
            clock: Cell::new(Duration::ZERO),
            seq: Cell::new(0),
            timers: RefCell::new(Vec::new()),
            pool: RefCell::new(pool),
            spawner,
        })
    }

    pub fn body(&self) -> FakeElement {
        self.body.clone()
    }

    /// Append a subtree to the body. Does not notify mutation observers.
    pub fn mount(&self, element: FakeElement) -> FakeElement {
        self.body.append_child(&element);
        element
    }

    /// Uncounted lookup for assertions.
    pub fn find(&self, selector: &str) -> Option<FakeElement> {
        self.root.find_first(&Selector::parse(selector)?)
    }

    /// Number of elements matching a selector.
    pub fn count(&self, selector: &str) -> usize {
        let mut found = Vec::new();
        if let Some(selector) = Selector::parse(selector) {
            self.root.find_all(&selector, &mut found);
        }
        found.len()
    }

    /// Number of document lookups performed through [`Dom`].
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    /// Number of listeners and timers registered through [`Host`].
    pub fn subscriptions(&self) -> usize {
        self.subscriptions.get()
    }

    /// Make every insertion through [`Dom`] fail, like a document that
    /// throws `HierarchyRequestError`.
    pub fn refuse_insertions(&self, refuse: bool) {
        self.refuse.set(refuse);
    }

    pub fn set_pip_enabled(&self, enabled: bool) {
        self.pip_enabled.set(enabled);
    }

    pub fn set_native_mode(&self, mode: NativeMode) {
        self.native.set(mode);
    }

    /// Number of `requestPictureInPicture` calls issued.
    pub fn requests(&self) -> usize {
        self.requests.get()
    }

    /// Number of `exitPictureInPicture` calls issued.
    pub fn exits(&self) -> usize {
        self.exits.get()
    }

    /// Native calls waiting for [`FakePage::accept_next`] or
    /// [`FakePage::reject_next`].
    pub fn pending_calls(&self) -> Vec<NativeCall> {
        self.pending.borrow().iter().map(|p| p.call.clone()).collect()
    }

    /// Resolve the oldest pending native call successfully, firing the
    /// matching lifecycle event first.
    pub fn accept_next(&self) -> bool {
        let Some(pending) = self.pending.borrow_mut().pop_front() else {
            return false;
        };
        match &pending.call {
            NativeCall::Request(surface) => self.enter_natively(surface),
            NativeCall::Exit => self.close_native_window(),
        }
        let _ = pending.reply.send(Ok(()));
        self.run_until_stalled();
        true
    }

    /// Reject the oldest pending native call.
    pub fn reject_next(&self, error: PlatformError) -> bool {
        let Some(pending) = self.pending.borrow_mut().pop_front() else {
            return false;
        };
        let _ = pending.reply.send(Err(error));
        self.run_until_stalled();
        true
    }

    /// The platform moves `surface` into a floating window, e.g. through
    /// the browser's own controls.
    pub fn enter_natively(&self, surface: &FakeElement) {
        let previous = self.pip_element.borrow_mut().replace(surface.clone());
        if let Some(previous) = previous {
            if !previous.ptr_eq(surface) {
                previous.fire_pip(PipEvent::Leave);
            }
        }
        surface.fire_pip(PipEvent::Enter(Some(self.window.get())));
    }

    /// The user closes the floating window directly.
    pub fn close_native_window(&self) {
        let previous = self.pip_element.borrow_mut().take();
        if let Some(previous) = previous {
            previous.fire_pip(PipEvent::Leave);
        }
    }

    /// The user resizes the floating window.
    pub fn resize_native_window(&self, size: PipWindowSize) {
        self.window.set(size);
        let current = self.pip_element.borrow().clone();
        if let Some(current) = current {
            current.fire_pip(PipEvent::Resize(size));
        }
    }

    /// Switch tabs away (`true`) or back (`false`).
    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
        let handlers = self.visibility.borrow().clone();
        for handler in handlers {
            (handler.borrow_mut())();
        }
    }

    /// Deliver one structural mutation notification.
    pub fn notify_mutation(&self) {
        let handlers = self.mutation.borrow().clone();
        for handler in handlers {
            (handler.borrow_mut())();
        }
    }

    /// Dispatch a named event on the document.
    pub fn dispatch_event(&self, name: &str) {
        let handlers: Vec<_> = self
            .events
            .borrow()
            .iter()
            .filter(|(event, _)| event == name)
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            (handler.borrow_mut())();
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.clock.get()
    }

    /// Move the virtual clock forward, firing due timers in order.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.get() + by;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let index = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.seq))
                    .map(|(index, _)| index);
                index.map(|index| timers.remove(index))
            };
            let Some(timer) = next else {
                break;
            };
            self.clock.set(timer.due);
            (timer.task)();
            self.run_until_stalled();
        }
        self.clock.set(target);
    }

    /// Poll spawned tasks until none can make progress.
    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    fn subscribe(&self) {
        self.subscriptions.set(self.subscriptions.get() + 1);
    }

    fn insertion(&self) -> Result<(), DomError> {
        if self.refuse.get() {
            return Err(DomError::Operation("insertion refused".into()));
        }
        Ok(())
    }

    fn lookup(&self) {
        self.lookups.set(self.lookups.get() + 1);
    }

    fn hold(&self, call: NativeCall) -> LocalBoxFuture<'static, Result<(), PlatformError>> {
        let (reply, answer) = oneshot::channel();
        self.pending.borrow_mut().push_back(Pending { call, reply });
        async move {
            answer
                .await
                .unwrap_or_else(|_| Err(PlatformError::Failed("call abandoned".into())))
        }
        .boxed_local()
    }
}

impl Dom for FakePage {
    type Element = FakeElement;

    fn query(&self, selector: &str) -> Option<FakeElement> {
        self.lookup();
        self.root.find_first(&Selector::parse(selector)?)
    }

    fn query_in(&self, scope: &FakeElement, selector: &str) -> Option<FakeElement> {
        self.lookup();
        scope.find_first(&Selector::parse(selector)?)
    }

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        self.lookup();
        self.root.find_first(&Selector::parse(&format!("#{id}"))?)
    }

    fn parent(&self, element: &FakeElement) -> Option<FakeElement> {
        element.parent()
    }

    fn previous_sibling(&self, element: &FakeElement) -> Option<FakeElement> {
        element.previous_sibling()
    }

    fn child_count(&self, element: &FakeElement) -> usize {
        element.0.borrow().children.len()
    }

    fn is_same(&self, a: &FakeElement, b: &FakeElement) -> bool {
        a.ptr_eq(b)
    }

    fn create_element(&self, tag: &str) -> Option<FakeElement> {
        Some(FakeElement::new(tag))
    }

    fn create_svg_element(&self, tag: &str) -> Option<FakeElement> {
        Some(FakeElement::svg(tag))
    }

    fn clone_subtree(&self, element: &FakeElement) -> Option<FakeElement> {
        Some(element.deep_clone())
    }

    fn set_attribute(&self, element: &FakeElement, name: &str, value: &str) {
        element.set_attribute(name, value);
    }

    fn remove_attribute(&self, element: &FakeElement, name: &str) {
        element.remove_attribute(name);
    }

    fn set_text(&self, element: &FakeElement, text: &str) {
        element.set_text(text);
    }

    fn set_class(&self, element: &FakeElement, class: &str, enabled: bool) {
        let current = element.attribute("class").unwrap_or_default();
        let mut classes: Vec<&str> = current.split_whitespace().filter(|c| *c != class).collect();
        if enabled {
            classes.push(class);
        }
        element.set_attribute("class", &classes.join(" "));
    }

    fn append(&self, parent: &FakeElement, child: &FakeElement) -> Result<(), DomError> {
        self.insertion()?;
        parent.append_child(child);
        Ok(())
    }

    fn prepend(&self, parent: &FakeElement, child: &FakeElement) -> Result<(), DomError> {
        self.insertion()?;
        parent.insert_at(child, 0);
        Ok(())
    }

    fn insert_before(
        &self,
        parent: &FakeElement,
        child: &FakeElement,
        reference: &FakeElement,
    ) -> Result<(), DomError> {
        self.insertion()?;
        if !reference.parent().is_some_and(|p| p.ptr_eq(parent)) {
            return Err(DomError::NotAChild);
        }
        child.detach();
        let index = parent
            .children()
            .iter()
            .position(|c| c.ptr_eq(reference))
            .ok_or(DomError::NotAChild)?;
        parent.insert_at(child, index);
        Ok(())
    }

    fn replace_children(&self, parent: &FakeElement, child: &FakeElement) {
        parent.set_text("");
        parent.append_child(child);
    }

    fn remove(&self, element: &FakeElement) {
        element.remove();
    }
}

/// Weakly held set of surfaces, keyed by node identity.
#[derive(Default)]
pub struct FakeSurfaces(Vec<Weak<RefCell<Node>>>);

impl FakeSurfaces {
    /// Number of surfaces still alive.
    pub fn live(&self) -> usize {
        self.0.iter().filter(|w| w.strong_count() > 0).count()
    }
}

impl SurfaceSet<FakeElement> for FakeSurfaces {
    fn insert(&mut self, surface: &FakeElement) -> bool {
        self.0.retain(|member| member.strong_count() > 0);
        let key = Rc::as_ptr(&surface.0);
        if self.0.iter().any(|member| member.as_ptr() == key) {
            return false;
        }
        self.0.push(Rc::downgrade(&surface.0));
        true
    }
}

impl Host for FakePage {
    type Surfaces = FakeSurfaces;

    fn surface_set(&self) -> FakeSurfaces {
        FakeSurfaces::default()
    }

    fn pip_enabled(&self) -> bool {
        self.pip_enabled.get()
    }

    fn pip_element(&self) -> Option<FakeElement> {
        self.pip_element.borrow().clone()
    }

    fn is_paused(&self, surface: &FakeElement) -> bool {
        surface.is_paused()
    }

    fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    fn request_pip(
        &self,
        surface: &FakeElement,
    ) -> LocalBoxFuture<'static, Result<(), PlatformError>> {
        self.requests.set(self.requests.get() + 1);
        if !self.pip_enabled.get() {
            return async { Err(PlatformError::Unsupported) }.boxed_local();
        }
        match self.native.get() {
            NativeMode::Accept => {
                let page = self.me.clone();
                let surface = surface.clone();
                async move {
                    if let Some(page) = page.upgrade() {
                        page.enter_natively(&surface);
                    }
                    Ok(())
                }
                .boxed_local()
            }
            NativeMode::Reject => {
                async { Err(PlatformError::NotAllowed("no user gesture".into())) }.boxed_local()
            }
            NativeMode::Manual => self.hold(NativeCall::Request(surface.clone())),
        }
    }

    fn exit_pip(&self) -> LocalBoxFuture<'static, Result<(), PlatformError>> {
        self.exits.set(self.exits.get() + 1);
        match self.native.get() {
            NativeMode::Accept => {
                let page = self.me.clone();
                async move {
                    let page = page
                        .upgrade()
                        .ok_or_else(|| PlatformError::Failed("page closed".into()))?;
                    if page.pip_element.borrow().is_none() {
                        return Err(PlatformError::Failed(
                            "no element is in Picture-in-Picture".into(),
                        ));
                    }
                    page.close_native_window();
                    Ok(())
                }
                .boxed_local()
            }
            NativeMode::Reject => {
                async { Err(PlatformError::Failed("exit refused".into())) }.boxed_local()
            }
            NativeMode::Manual => self.hold(NativeCall::Exit),
        }
    }

    fn on_activate(&self, element: &FakeElement, handler: Callback) {
        self.subscribe();
        element
            .0
            .borrow_mut()
            .activate
            .push(Rc::new(RefCell::new(handler)));
    }

    fn on_pip_event(&self, surface: &FakeElement, handler: Box<dyn FnMut(PipEvent)>) {
        self.subscribe();
        surface
            .0
            .borrow_mut()
            .pip
            .push(Rc::new(RefCell::new(handler)));
    }

    fn on_visibility_change(&self, handler: Callback) {
        self.subscribe();
        self.visibility
            .borrow_mut()
            .push(Rc::new(RefCell::new(handler)));
    }

    fn on_mutation(&self, handler: Callback) {
        self.subscribe();
        self.mutation.borrow_mut().push(Rc::new(RefCell::new(handler)));
    }

    fn on_document_event(&self, name: &str, handler: Callback) {
        self.subscribe();
        self.events
            .borrow_mut()
            .push((name.to_string(), Rc::new(RefCell::new(handler))));
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.subscribe();
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.clock.get() + delay,
            seq,
            task,
        });
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        let _ = self.spawner.spawn_local(task);
    }
}

/// Records every saved window size; can be told to fail.
#[derive(Default)]
pub struct MemorySizes {
    saved: RefCell<Vec<PipWindowSize>>,
    broken: Cell<bool>,
}

impl MemorySizes {
    pub fn saved(&self) -> Vec<PipWindowSize> {
        self.saved.borrow().clone()
    }

    /// Make every further write fail.
    pub fn break_storage(&self) {
        self.broken.set(true);
    }
}

impl SizeStore for MemorySizes {
    fn save(&self, size: PipWindowSize) -> Result<(), StorageError> {
        if self.broken.get() {
            return Err(StorageError::Unavailable("storage.local is gone".into()));
        }
        self.saved.borrow_mut().push(size);
        Ok(())
    }
}
