// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event routing for a single dropdown.
//!
//! ## Overview
//!
//! The router reproduces the platform's propagation for the listeners a
//! [`Dropdown`] binds (see [`Dropdown::bindings`]):
//!
//! 1. **Element phase**: walk the target's ancestor path from the target outward
//!    (bubble order) and run every element-bound listener whose element and event kind
//!    match. `focus` does not bubble, so only the target itself is considered for it.
//! 2. **Document phase**: unless a handler stopped propagation, run the document-bound
//!    listeners.
//!
//! Stopping takes effect after the current element's listeners have all run, matching
//! `stopPropagation` semantics.
//!
//! For many instances on one page, use [`DropdownSet`](crate::registry::DropdownSet),
//! which shares the path walk and lets a stop on one instance's trigger hide the event
//! from every instance's document listener, as the platform does.

use alloc::vec::Vec;

use crate::dropdown::Dropdown;
use crate::host::{Host, ParentLookup, path_to_root};
use crate::types::{Binding, EventKind, InputEvent, Listener, ListenerTarget, Response};

/// Event type of an input event.
pub fn event_kind<E>(event: &InputEvent<E>) -> EventKind {
    match event {
        InputEvent::Click { .. } => EventKind::Click,
        InputEvent::KeyDown { .. } => EventKind::KeyDown,
        InputEvent::Focus { .. } => EventKind::Focus,
        InputEvent::FocusOut { .. } => EventKind::FocusOut,
    }
}

/// Elements that see the event during the element phase, innermost first.
///
/// Empty for keydowns with no focused element (they go straight to the document).
pub fn bubble_path<E: Copy>(event: &InputEvent<E>, lookup: &impl ParentLookup<E>) -> Vec<E> {
    match *event {
        InputEvent::Focus { target } => alloc::vec![target],
        _ => match event.target() {
            Some(target) => {
                let mut path = path_to_root(lookup, target);
                path.reverse();
                path
            }
            None => Vec::new(),
        },
    }
}

/// Listeners in `bindings` bound to `node` for `kind`, in registration order.
pub fn element_listeners<E: Copy + Eq>(
    bindings: &[Binding<E>],
    node: E,
    kind: EventKind,
) -> impl Iterator<Item = Listener> + '_ {
    bindings
        .iter()
        .filter(move |b| b.kind == kind && b.target == ListenerTarget::Element(node))
        .map(|b| b.listener)
}

/// Document-bound listeners in `bindings` for `kind`.
pub fn document_listeners<E: Copy + Eq>(
    bindings: &[Binding<E>],
    kind: EventKind,
) -> impl Iterator<Item = Listener> + '_ {
    bindings
        .iter()
        .filter(move |b| b.kind == kind && b.target == ListenerTarget::Document)
        .map(|b| b.listener)
}

/// Route one event through one dropdown's listeners.
///
/// ```
/// # use understory_dropdown::types::{InputEvent, Outcome};
/// # use understory_dropdown::router::route;
/// # fn demo<E: Copy + Eq, H: understory_dropdown::host::Host<E>>(
/// #     dd: &mut understory_dropdown::dropdown::Dropdown<E>, host: &mut H) {
/// let trigger = dd.trigger();
/// let response = route(dd, &InputEvent::Click { target: trigger }, host);
/// assert_eq!(response.outcome, Outcome::StopAndConsume);
/// assert!(dd.is_open());
/// # }
/// ```
pub fn route<E: Copy + Eq>(
    dropdown: &mut Dropdown<E>,
    event: &InputEvent<E>,
    host: &mut impl Host<E>,
) -> Response {
    let kind = event_kind(event);
    let path = bubble_path(event, &*host);
    let mut response = Response::IGNORED;

    for node in path {
        let listeners: Vec<Listener> = element_listeners(dropdown.bindings(), node, kind).collect();
        for listener in listeners {
            response.merge(dropdown.invoke(listener, event, host));
        }
        if response.outcome.is_stopped() {
            return response;
        }
    }

    let listeners: Vec<Listener> = document_listeners(dropdown.bindings(), kind).collect();
    for listener in listeners {
        response.merge(dropdown.invoke(listener, event, host));
    }
    response
}
