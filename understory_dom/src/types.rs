// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: element identifiers, flags, and element data.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

/// Identifier for an element in a [`Document`](crate::Document).
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Stale ids never alias a different live element because the generation must match;
/// use [`Document::is_alive`](crate::Document::is_alive) to check.
///
/// The derived ordering (slot, then generation) has no document meaning; it only lets
/// ids key ordered maps.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling focus and interaction.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Natively focusable (a button, a link): tabbable unless `tabindex` says otherwise.
        const FOCUSABLE = 0b0000_0001;
        /// Excluded from focus, tab order, and hit testing, together with its subtree.
        const INERT     = 0b0000_0010;
    }
}

/// Data for a new element.
///
/// ```
/// use kurbo::Rect;
/// use understory_dom::Element;
///
/// let button = Element::new("button")
///     .class("dropdown__button")
///     .text("Fruit")
///     .bounds(Rect::new(0.0, 0.0, 120.0, 40.0));
/// assert!(button.classes.iter().any(|c| c == "dropdown__button"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Element {
    /// Tag name, informational only.
    pub tag: String,
    /// Class list.
    pub classes: Vec<String>,
    /// Attributes, including `tabindex` and ARIA state.
    pub attributes: BTreeMap<String, String>,
    /// Own text (descendant text is added by [`Document::text_content`](crate::Document::text_content)).
    pub text: String,
    /// Border box in viewport coordinates. The document does no layout; hosts set this.
    pub bounds: Rect,
    /// Focus and interaction flags.
    pub flags: ElementFlags,
}

impl Element {
    /// An element with the given tag. `button` and `a` are natively focusable.
    pub fn new(tag: &str) -> Self {
        let flags = match tag {
            "button" | "a" => ElementFlags::FOCUSABLE,
            _ => ElementFlags::empty(),
        };
        Self {
            tag: tag.into(),
            flags,
            ..Default::default()
        }
    }

    /// Add a class.
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the element's own text.
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.into();
        self
    }

    /// Set the border box.
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Add flags.
    pub fn flags(mut self, flags: ElementFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// True if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Parsed `tabindex`, if present and numeric.
    pub fn tab_index(&self) -> Option<i32> {
        self.attributes.get("tabindex")?.trim().parse().ok()
    }
}
