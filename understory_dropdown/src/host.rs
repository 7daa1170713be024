// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities: the element operations and scheduling the widget relies on.
//!
//! ## Overview
//!
//! The widget never owns the elements it drives. It reads and writes them through
//! [`Surface`], walks ancestry through [`ParentLookup`], and hands deferred work to a
//! [`Scheduler`]. A browser binding implements these over real DOM nodes; a headless
//! document (see the `understory_dom` crate) implements them over an in-memory tree.
//!
//! ## Re-entrancy
//!
//! [`Surface::focus`] and [`Surface::activate`] cause the platform to fire further events
//! (`focusout`, `focus`, `click`). Implementations must queue those events and deliver them
//! after the current handler returns instead of calling back into the widget synchronously.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Rect;

use crate::types::{StyleProp, Task};

/// Look up the parent of an element to walk its ancestor chain.
pub trait ParentLookup<E> {
    /// Returns the parent of `el`, or `None` if `el` is a root (or detached).
    fn parent_of(&self, el: &E) -> Option<E>;
}

/// Returns true if `el` is `ancestor` or one of its descendants.
pub fn is_within<E: Copy + Eq>(lookup: &impl ParentLookup<E>, el: E, ancestor: E) -> bool {
    let mut cur = Some(el);
    while let Some(c) = cur {
        if c == ancestor {
            return true;
        }
        cur = lookup.parent_of(&c);
    }
    false
}

/// Root→`el` path (inclusive), reconstructed via [`ParentLookup`].
pub fn path_to_root<E: Copy>(lookup: &impl ParentLookup<E>, el: E) -> Vec<E> {
    let mut out = Vec::new();
    let mut cur = el;
    // Caller ensures acyclic ancestry.
    loop {
        out.push(cur);
        match lookup.parent_of(&cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}

/// Element operations the widget performs on externally owned nodes.
pub trait Surface<E>: ParentLookup<E> {
    /// Set an attribute (`aria-expanded`, `tabindex`, `data-open`, ...).
    fn set_attribute(&mut self, el: E, name: &str, value: &str);

    /// Set (`Some`) or clear (`None`) an inline style property.
    fn set_style(&mut self, el: E, prop: StyleProp, value: Option<&str>);

    /// Add (`on == true`) or remove a class.
    fn set_class(&mut self, el: E, class: &str, on: bool);

    /// Bounding box in viewport coordinates.
    ///
    /// Must reflect every style write made so far, forcing a layout pass if needed.
    fn measure(&mut self, el: E) -> Rect;

    /// Height of the layout viewport.
    fn viewport_height(&self) -> f64;

    /// Move input focus to `el`.
    fn focus(&mut self, el: E);

    /// The element that currently has input focus, if any.
    fn active_element(&self) -> Option<E>;

    /// The element's text content.
    fn text_content(&self, el: E) -> String;

    /// Descendants of `root` (excluding `root`) carrying `class`, in document order.
    fn query_class(&self, root: E, class: &str) -> Vec<E>;

    /// Run the element's own activation behavior (a synthetic click).
    fn activate(&mut self, el: E);
}

/// Queue for deferred widget work.
pub trait Scheduler {
    /// Run `task` once `delay` has elapsed and the current event has finished dispatching.
    ///
    /// Tasks with equal deadlines run in the order they were deferred.
    fn defer(&mut self, task: Task, delay: Duration);
}

/// Everything a [`Dropdown`](crate::dropdown::Dropdown) needs from its host.
pub trait Host<E>: Surface<E> + Scheduler {}

impl<E, T: Surface<E> + Scheduler> Host<E> for T {}
