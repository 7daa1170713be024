// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the dropdown: keys, input events, outcomes, deferred tasks, and listener bindings.
//!
//! ## Overview
//!
//! These types describe what flows into a [`Dropdown`](crate::dropdown::Dropdown) and what comes back out.
//! They are produced by hosts (a browser binding, a headless document, a test harness) and consumed by
//! the [`router`](crate::router) and the [`registry`](crate::registry).

/// Identifier of a dropdown instance within a [`DropdownSet`](crate::registry::DropdownSet).
///
/// Stand-alone instances built with [`Dropdown::new`](crate::dropdown::Dropdown::new) pick their own id;
/// it is only echoed back through [`Task::dropdown`] so the host can route deferred work.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DropdownId(pub u32);

/// A logical key, already decoded from whatever the platform reports.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// Down arrow.
    ArrowDown,
    /// Up arrow.
    ArrowUp,
    /// Home.
    Home,
    /// End.
    End,
    /// Escape.
    Escape,
    /// Tab (with or without Shift).
    Tab,
    /// A single character key.
    Char(char),
    /// Anything else (function keys, modifiers, ...).
    Other,
}

impl Key {
    /// Decode a DOM `KeyboardEvent.key` string.
    ///
    /// Multi-character names that are not listed here map to [`Key::Other`].
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "Home" => Self::Home,
            "End" => Self::End,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }

    /// Returns the character to search for, if this key starts a type-ahead search.
    ///
    /// Only single, printable, non-whitespace characters qualify.
    pub fn search_char(self) -> Option<char> {
        match self {
            Self::Char(c) if !c.is_whitespace() && !c.is_control() => Some(c),
            _ => None,
        }
    }
}

/// An input event delivered to the widget.
///
/// `target` is the element the platform dispatched the event at; the router walks
/// its ancestors (see [`ParentLookup`](crate::host::ParentLookup)) to decide which
/// listeners are relevant.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputEvent<E> {
    /// A pointer click (or synthetic activation) on `target`.
    Click {
        /// Element that was clicked.
        target: E,
    },
    /// A key press while `target` has focus.
    KeyDown {
        /// Focused element at the time of the press, if any.
        target: Option<E>,
        /// The decoded key.
        key: Key,
    },
    /// `target` received focus. Does not bubble.
    Focus {
        /// Element that gained focus.
        target: E,
    },
    /// `target` lost focus. Bubbles.
    FocusOut {
        /// Element that lost focus.
        target: E,
    },
}

impl<E: Copy> InputEvent<E> {
    /// The element the event was dispatched at.
    pub fn target(&self) -> Option<E> {
        match *self {
            Self::Click { target } | Self::Focus { target } | Self::FocusOut { target } => {
                Some(target)
            }
            Self::KeyDown { target, .. } => target,
        }
    }
}

/// Handler outcome controlling propagation and default actions.
///
/// Ordered from weakest to strongest so outcomes from several handlers
/// can be merged with [`Ord::max`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub enum Outcome {
    /// Not handled; continue propagation, keep the default action.
    #[default]
    Continue,
    /// Handled; the default action should be prevented, propagation continues.
    Consume,
    /// Handled; prevent the default action and stop propagation.
    StopAndConsume,
}

impl Outcome {
    /// True if propagation must not reach further listeners.
    pub fn is_stopped(self) -> bool {
        self == Self::StopAndConsume
    }

    /// True if the platform's default action should be suppressed.
    pub fn default_prevented(self) -> bool {
        self != Self::Continue
    }
}

/// Result of routing a single input event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Response {
    /// Merged propagation outcome of every handler that ran.
    pub outcome: Outcome,
    /// Index of the item activated by this event, if any.
    ///
    /// Selection semantics belong to the host; the widget only reports which
    /// item was activated and closes the menu.
    pub activated: Option<usize>,
}

impl Response {
    /// A response that leaves the event untouched.
    pub const IGNORED: Self = Self {
        outcome: Outcome::Continue,
        activated: None,
    };

    /// A response carrying only an outcome.
    pub fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            activated: None,
        }
    }

    /// Fold another handler's response into this one.
    pub fn merge(&mut self, other: Self) {
        self.outcome = self.outcome.max(other.outcome);
        if other.activated.is_some() {
            self.activated = other.activated;
        }
    }
}

/// Which item keyboard-opening seeds as active.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Seed {
    /// First item (Enter, Space, `ArrowDown`).
    First,
    /// Last item (`ArrowUp`).
    Last,
}

/// Work the widget asks the host to run later.
///
/// Every action re-validates the widget state when it runs, so a stale task
/// is harmless and tasks never need to be cancelled.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Deferred {
    /// Close if focus has left the container once the focus move has settled.
    FocusCheck,
    /// Re-run placement after the menu has been laid out.
    Reposition,
    /// Make the seeded item active after opening from the keyboard.
    Seed(Seed),
}

/// A deferred action addressed to one dropdown instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Task {
    /// Instance that scheduled the task.
    pub dropdown: DropdownId,
    /// What to run.
    pub action: Deferred,
}

/// Inline style properties the positioner writes on the menu wrapper.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum StyleProp {
    /// `top`
    Top,
    /// `bottom`
    Bottom,
    /// `transform`
    Transform,
    /// `max-height`
    MaxHeight,
    /// `overflow-y`
    OverflowY,
}

impl StyleProp {
    /// CSS property name.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Transform => "transform",
            Self::MaxHeight => "max-height",
            Self::OverflowY => "overflow-y",
        }
    }
}

/// Event types a listener can be bound to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// `click`
    Click,
    /// `keydown`
    KeyDown,
    /// `focus`
    Focus,
    /// `focusout`
    FocusOut,
}

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ListenerTarget<E> {
    /// A specific element.
    Element(E),
    /// The document itself; sees every event that was not stopped.
    Document,
}

/// The widget handler a binding invokes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Listener {
    /// Toggle on trigger click.
    TriggerClick,
    /// Open and seed on trigger keydown.
    TriggerKeyDown,
    /// Auto-open on trigger focus.
    TriggerFocus,
    /// Deferred outside-focus check.
    ContainerFocusOut,
    /// Outside-click close.
    DocumentClick,
    /// In-menu navigation.
    DocumentKeyDown,
    /// Close after the item at this index was clicked.
    ItemClick(usize),
}

/// One entry of a dropdown's typed listener surface.
///
/// See [`Dropdown::bindings`](crate::dropdown::Dropdown::bindings).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Binding<E> {
    /// Where the listener lives.
    pub target: ListenerTarget<E>,
    /// Which event type it listens for.
    pub kind: EventKind,
    /// Which handler runs.
    pub listener: Listener,
}
