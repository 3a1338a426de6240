//! Keeps the control in the page.
//!
//! The host page re-renders its player whenever it likes and takes the
//! control with it. The supervisor never tracks what the page did; it just
//! re-runs [`Supervisor::attempt_injection`], which is idempotent, from
//! three triggers:
//!
//! - every structural mutation below the document body
//! - a fixed one-shot retry schedule after start
//! - the site's navigation signal, after a short delay

use std::rc::{Rc, Weak};

use crate::adapter::{CONTROL_ID, Control, Edge, SPACER_ID};
use crate::engine::Engine;
use crate::error::DomError;
use crate::host::{Dom, Host};

/// Outcome of one injection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// The control is already in the document
    AlreadyPresent,
    /// The page has not rendered an insertion container yet
    NoContainer,
    /// The adapter could not build the control from the current page
    Unbuildable,
    /// The document refused the insertion
    InsertFailed,
    /// A fresh control was inserted
    Injected,
}

/// Drives injection attempts for one [`Engine`].
pub struct Supervisor<H: Host> {
    me: Weak<Supervisor<H>>,
    engine: Rc<Engine<H>>,
}

impl<H: Host> Supervisor<H> {
    /// Supervise injection for `engine`. Nothing happens until [`Supervisor::start`].
    pub fn new(engine: Rc<Engine<H>>) -> Rc<Self> {
        Rc::new_cyclic(|me| Supervisor {
            me: me.clone(),
            engine,
        })
    }

    /// The supervised engine.
    pub fn engine(&self) -> &Rc<Engine<H>> {
        &self.engine
    }

    /// Make a first attempt and subscribe to every trigger.
    pub fn start(&self) {
        let host = self.engine.host();

        self.refresh();

        host.on_mutation(self.callback(|supervisor| {
            supervisor.refresh();
        }));

        for delay in self.engine.config().retry_delays() {
            let supervisor = self.me.clone();
            host.schedule(
                delay,
                Box::new(move || {
                    if let Some(supervisor) = supervisor.upgrade() {
                        supervisor.refresh();
                    }
                }),
            );
        }

        if let Some(event) = self.engine.adapter().navigation_event() {
            host.on_document_event(
                event,
                self.callback(|supervisor| supervisor.after_navigation()),
            );
        }
    }

    /// Lift surface restrictions, inject if needed and bind a new surface.
    pub fn refresh(&self) -> Injection {
        let injection = self.attempt_injection();
        if let Some(surface) = self.engine.surface() {
            self.engine.bind_surface(&surface);
        }
        injection
    }

    /// Insert the control unless it is already there. Safe to call at any
    /// frequency; never produces a second control.
    pub fn attempt_injection(&self) -> Injection {
        let host = self.engine.host();
        let adapter = self.engine.adapter();

        if host.element_by_id(CONTROL_ID).is_some() {
            return Injection::AlreadyPresent;
        }

        if let Some(stale) = host.element_by_id(SPACER_ID) {
            host.remove(&stale);
        }

        let Some(container) = adapter.locate_insertion_container(host) else {
            return Injection::NoContainer;
        };

        let Some(control) = adapter.build_control(host, self.engine.text()) else {
            tracing::debug!("Could not build the Picture-in-Picture control");
            return Injection::Unbuildable;
        };

        let reference = adapter.locate_insertion_reference(host, &container);
        let edge = adapter.fallback_edge();
        if let Err(error) = insert(host, &container, reference.as_ref(), edge, &control) {
            tracing::debug!(%error, "Could not insert the Picture-in-Picture control");
            for node in &control.nodes {
                host.remove(node);
            }
            return Injection::InsertFailed;
        }

        let engine = Rc::downgrade(&self.engine);
        host.on_activate(
            &control.handle,
            Box::new(move || {
                if let Some(engine) = engine.upgrade() {
                    engine.toggle();
                }
            }),
        );

        tracing::debug!("Injected the Picture-in-Picture control");
        if let Some(surface) = self.engine.surface() {
            self.engine.bind_surface(&surface);
        }
        self.engine.sync_from_native();

        Injection::Injected
    }

    fn after_navigation(&self) {
        let supervisor = self.me.clone();
        self.engine.host().schedule(
            self.engine.config().navigation_delay(),
            Box::new(move || {
                if let Some(supervisor) = supervisor.upgrade() {
                    supervisor.refresh();
                }
            }),
        );
    }

    fn callback<F>(&self, run: F) -> Box<dyn FnMut()>
    where
        F: Fn(&Supervisor<H>) + 'static,
    {
        let supervisor = self.me.clone();
        Box::new(move || {
            if let Some(supervisor) = supervisor.upgrade() {
                run(&supervisor);
            }
        })
    }
}

fn insert<D: Dom>(
    dom: &D,
    container: &D::Element,
    reference: Option<&D::Element>,
    edge: Edge,
    control: &Control<D::Element>,
) -> Result<(), DomError> {
    match (reference, edge) {
        (Some(reference), _) => {
            for node in &control.nodes {
                dom.insert_before(container, node, reference)?;
            }
        }
        (None, Edge::Append) => {
            for node in &control.nodes {
                dom.append(container, node)?;
            }
        }
        (None, Edge::Prepend) => {
            for node in control.nodes.iter().rev() {
                dom.prepend(container, node)?;
            }
        }
    }
    Ok(())
}
