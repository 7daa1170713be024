// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element tree: structure, attributes, focus, and queries.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;
use core::time::Duration;

use kurbo::{Point, Rect, Size};
use understory_dropdown::host::{ParentLookup, Scheduler, Surface};
use understory_dropdown::types::{InputEvent, StyleProp, Task};

use crate::timers::Timers;
use crate::types::{Element, ElementFlags, ElementId};

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    element: Element,
    styles: BTreeMap<StyleProp, String>,
}

impl Node {
    fn new(generation: u32, parent: Option<ElementId>, element: Element) -> Self {
        Self {
            generation,
            parent,
            children: Vec::new(),
            element,
            styles: BTreeMap::new(),
        }
    }
}

/// An in-memory document rooted at a `body` element.
///
/// Widgets see it through the [`Surface`], [`ParentLookup`], and [`Scheduler`] capabilities.
/// Events the document itself causes (focus moves, synthetic clicks) are queued and
/// drained with [`Document::pop_event`]; deferred tasks go to [`Document::timers_mut`].
pub struct Document {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    body: ElementId,
    viewport: Size,
    active: Option<ElementId>,
    pending: VecDeque<InputEvent<ElementId>>,
    timers: Timers,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("viewport", &self.viewport)
            .field("active", &self.active)
            .field("pending", &self.pending.len())
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a document whose `body` covers a viewport of the given size.
    pub fn new(viewport: Size) -> Self {
        let body = Element::new("body").bounds(Rect::from_origin_size(Point::ZERO, viewport));
        Self {
            nodes: alloc::vec![Some(Node::new(1, None, body))],
            generations: alloc::vec![1],
            free_list: Vec::new(),
            body: ElementId::new(0, 1),
            viewport,
            active: None,
            pending: VecDeque::new(),
            timers: Timers::new(),
        }
    }

    /// The root element.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resize the viewport. The body's bounds follow.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        let body = self.body;
        self.set_bounds(body, Rect::from_origin_size(Point::ZERO, viewport));
    }

    /// Append `element` as the last child of `parent`.
    ///
    /// A stale `parent` attaches the element to the body instead.
    pub fn insert(&mut self, parent: ElementId, element: Element) -> ElementId {
        let parent = if self.is_alive(parent) {
            parent
        } else {
            log::warn!("insert under stale {parent:?}; attaching to body");
            self.body
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, Some(parent), element));
            (idx, generation)
        } else {
            self.nodes.push(Some(Node::new(1, Some(parent), element)));
            self.generations.push(1);
            (self.nodes.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId uses 32-bit indices by design."
        )]
        let id = ElementId::new(idx as u32, generation);
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Remove an element and its subtree. The body cannot be removed.
    ///
    /// If focus was inside the subtree it is dropped without firing events.
    pub fn remove(&mut self, id: ElementId) {
        if id == self.body || !self.is_alive(id) {
            return;
        }
        if let Some(active) = self.active
            && self.is_within(active, id)
        {
            self.active = None;
        }
        if let Some(parent) = self.parent(id)
            && let Some(p) = self.node_mut(parent)
        {
            p.children.retain(|c| *c != id);
        }
        for el in self.preorder(id) {
            self.nodes[el.idx()] = None;
            self.free_list.push(el.idx());
        }
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.node(id).is_some()
    }

    /// The element's data.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.node(id).map(|n| &n.element)
    }

    /// The element's data, mutably.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.node_mut(id).map(|n| &mut n.element)
    }

    /// Parent element, `None` for the body and stale ids.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id)?.parent
    }

    /// Direct children in document order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// `id` followed by its descendants in document (pre-)order.
    pub fn preorder(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut stack = alloc::vec![id];
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(self.children(el).iter().rev().copied());
        }
        out
    }

    /// True if `el` is `ancestor` or one of its descendants.
    pub fn is_within(&self, el: ElementId, ancestor: ElementId) -> bool {
        understory_dropdown::host::is_within(self, el, ancestor)
    }

    /// Attribute value.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id)?.attributes.get(name).map(String::as_str)
    }

    /// True if the element's class list contains `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Inline style value.
    pub fn style(&self, id: ElementId, prop: StyleProp) -> Option<&str> {
        self.node(id)?.styles.get(&prop).map(String::as_str)
    }

    /// Inline styles serialized as a CSS declaration list.
    pub fn style_text(&self, id: ElementId) -> String {
        let mut out = String::new();
        if let Some(node) = self.node(id) {
            for (prop, value) in &node.styles {
                if !out.is_empty() {
                    out.push(' ');
                }
                let _ = write!(out, "{}: {value};", prop.css_name());
            }
        }
        out
    }

    /// Set the element's border box.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(e) = self.element_mut(id) {
            e.bounds = bounds;
        }
    }

    /// True if the element or one of its ancestors is [`ElementFlags::INERT`].
    pub fn is_inert(&self, id: ElementId) -> bool {
        let mut cur = Some(id);
        while let Some(el) = cur {
            match self.node(el) {
                Some(n) if n.element.flags.contains(ElementFlags::INERT) => return true,
                Some(n) => cur = n.parent,
                None => return false,
            }
        }
        false
    }

    /// True if script may focus the element: natively focusable or carrying any `tabindex`.
    pub fn is_focusable(&self, id: ElementId) -> bool {
        if id == self.body || self.is_inert(id) {
            return false;
        }
        self.element(id).is_some_and(|e| {
            e.flags.contains(ElementFlags::FOCUSABLE) || e.tab_index().is_some()
        })
    }

    /// True if sequential (Tab) navigation stops at the element.
    ///
    /// Positive `tabindex` values are treated like `0`: tab order is document order.
    pub fn is_tabbable(&self, id: ElementId) -> bool {
        if !self.is_focusable(id) {
            return false;
        }
        self.element(id)
            .is_some_and(|e| match e.tab_index() {
                Some(t) => t >= 0,
                None => e.flags.contains(ElementFlags::FOCUSABLE),
            })
    }

    /// The next tabbable element after `from` in document order (from the start if `None`).
    pub fn next_tabbable(&self, from: Option<ElementId>) -> Option<ElementId> {
        let order = self.preorder(self.body);
        let start = from
            .and_then(|f| order.iter().position(|&e| e == f))
            .map_or(0, |p| p + 1);
        order[start..].iter().copied().find(|&e| self.is_tabbable(e))
    }

    /// Move focus to `id`, queueing `focusout` on the old element and `focus` on the new one.
    ///
    /// Returns false (and does nothing) if the element cannot take focus.
    /// Focusing the already focused element fires nothing.
    pub fn set_focus(&mut self, id: ElementId) -> bool {
        if !self.is_focusable(id) {
            log::trace!("{id:?} is not focusable");
            return false;
        }
        if self.active == Some(id) {
            return true;
        }
        if let Some(old) = self.active.replace(id) {
            self.pending.push_back(InputEvent::FocusOut { target: old });
        }
        self.pending.push_back(InputEvent::Focus { target: id });
        true
    }

    /// Drop focus, queueing `focusout` on the element that had it.
    pub fn blur(&mut self) {
        if let Some(old) = self.active.take() {
            self.pending.push_back(InputEvent::FocusOut { target: old });
        }
    }

    /// The topmost element whose bounds contain `pt`.
    ///
    /// Later siblings paint over earlier ones and children over parents, so this is the
    /// last match in document order. Inert subtrees and subtrees rooted at an element with
    /// `aria-hidden="true"` (a closed menu) are skipped.
    pub fn hit_test(&self, pt: Point) -> Option<ElementId> {
        let mut hit = None;
        let mut stack = alloc::vec![self.body];
        while let Some(el) = stack.pop() {
            let Some(node) = self.node(el) else {
                continue;
            };
            if node.element.flags.contains(ElementFlags::INERT)
                || node.element.attributes.get("aria-hidden").is_some_and(|v| v == "true")
            {
                continue;
            }
            if node.element.bounds.contains(pt) {
                hit = Some(el);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        hit
    }

    /// Queue an input event for delivery.
    pub fn push_event(&mut self, event: InputEvent<ElementId>) {
        self.pending.push_back(event);
    }

    /// Take the oldest queued event.
    pub fn pop_event(&mut self) -> Option<InputEvent<ElementId>> {
        self.pending.pop_front()
    }

    /// Number of queued events.
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Deferred tasks.
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Deferred tasks, mutably.
    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes
            .get(id.idx())?
            .as_ref()
            .filter(|n| n.generation == id.1)
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())?
            .as_mut()
            .filter(|n| n.generation == id.1)
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

impl ParentLookup<ElementId> for Document {
    fn parent_of(&self, el: &ElementId) -> Option<ElementId> {
        self.parent(*el)
    }
}

impl Surface<ElementId> for Document {
    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(el) {
            e.attributes.insert(name.into(), value.into());
        }
    }

    fn set_style(&mut self, el: ElementId, prop: StyleProp, value: Option<&str>) {
        let Some(node) = self.node_mut(el) else {
            return;
        };
        match value {
            Some(v) => {
                node.styles.insert(prop, v.into());
            }
            None => {
                node.styles.remove(&prop);
            }
        }
    }

    fn set_class(&mut self, el: ElementId, class: &str, on: bool) {
        if let Some(e) = self.element_mut(el) {
            e.classes.retain(|c| c != class);
            if on {
                e.classes.push(class.into());
            }
        }
    }

    fn measure(&mut self, el: ElementId) -> Rect {
        let Some(node) = self.node(el) else {
            return Rect::ZERO;
        };
        let mut rect = node.element.bounds;
        if let Some(max) = node.styles.get(&StyleProp::MaxHeight).and_then(|v| parse_px(v))
            && rect.height() > max
        {
            rect.y1 = rect.y0 + max;
        }
        rect
    }

    fn viewport_height(&self) -> f64 {
        self.viewport.height
    }

    fn focus(&mut self, el: ElementId) {
        self.set_focus(el);
    }

    fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn text_content(&self, el: ElementId) -> String {
        let mut out = String::new();
        for id in self.preorder(el) {
            if let Some(e) = self.element(id) {
                out.push_str(&e.text);
            }
        }
        out
    }

    fn query_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        self.preorder(root)
            .into_iter()
            .skip(1)
            .filter(|&id| self.has_class(id, class))
            .collect()
    }

    fn activate(&mut self, el: ElementId) {
        if self.is_alive(el) {
            self.pending.push_back(InputEvent::Click { target: el });
        }
    }
}

impl Scheduler for Document {
    fn defer(&mut self, task: Task, delay: Duration) {
        self.timers.schedule(task, delay);
    }
}
