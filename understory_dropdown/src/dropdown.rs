// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dropdown instance: open/close state machine, active item, and listener handlers.
//!
//! ## States
//!
//! A dropdown is either closed (the initial state) or open.
//!
//! - Entering *open* writes `aria-expanded="true"` on the trigger, `aria-hidden="false"` on the
//!   menu, `data-open="true"` on the container, makes the first item tabbable, places the menu,
//!   and defers a second placement pass for after layout.
//! - Entering *closed* clears the active item, writes the inverse attributes, and removes every
//!   item from the tab sequence.
//!
//! Opening an open dropdown or closing a closed one does nothing.
//!
//! ## Roving tabindex
//!
//! While open, exactly one item has `tabindex="0"`: the active item, or the first item when
//! nothing is active. Every change of the active item moves that marker and focuses the item.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use crate::config::DropdownConfig;
use crate::error::BuildError;
use crate::host::{Host, Surface, is_within};
use crate::navigation::{NavCommand, next_index, search_by_char_with};
use crate::position::{Placement, reposition};
use crate::types::{
    Binding, Deferred, DropdownId, EventKind, InputEvent, Key, Listener, ListenerTarget, Outcome,
    Response, Seed, Task,
};

const TRUE: &str = "true";
const FALSE: &str = "false";

/// One dropdown bound to one container.
///
/// The element handles are not owned: the widget only reads and writes attributes,
/// styles, and focus on them through a [`Host`].
#[derive(Clone, Debug)]
pub struct Dropdown<E> {
    id: DropdownId,
    container: E,
    trigger: E,
    menu_wrapper: E,
    menu: E,
    items: Vec<E>,
    bindings: Vec<Binding<E>>,
    is_open: bool,
    active: Option<usize>,
    // Set while the widget itself moves focus back to the trigger, so that
    // focus event does not re-open the menu.
    returning_focus: bool,
    above_class: String,
    scroll_margin: f64,
    seed_delay: Duration,
}

impl<E: Copy + Eq> Dropdown<E> {
    /// Bind a dropdown to `container`.
    ///
    /// Looks up the trigger, menu wrapper, menu, and items by the classes in `config`
    /// (the first match wins for the single parts), writes the closed-state attributes,
    /// and computes an initial placement.
    pub fn new(
        id: DropdownId,
        container: E,
        host: &mut impl Surface<E>,
        config: &DropdownConfig,
    ) -> Result<Self, BuildError> {
        let find = |class: &str| host.query_class(container, class).first().copied();
        let trigger = find(&config.trigger_class)
            .ok_or_else(|| BuildError::MissingTrigger(config.trigger_class.clone()))?;
        let menu_wrapper = find(&config.menu_wrapper_class)
            .ok_or_else(|| BuildError::MissingMenuWrapper(config.menu_wrapper_class.clone()))?;
        let menu = find(&config.menu_class)
            .ok_or_else(|| BuildError::MissingMenu(config.menu_class.clone()))?;
        let items = host.query_class(container, &config.item_class);

        let mut bindings = Vec::with_capacity(6 + items.len());
        let mut bind = |target, kind, listener| {
            bindings.push(Binding {
                target,
                kind,
                listener,
            });
        };
        bind(
            ListenerTarget::Element(trigger),
            EventKind::Click,
            Listener::TriggerClick,
        );
        bind(
            ListenerTarget::Element(trigger),
            EventKind::KeyDown,
            Listener::TriggerKeyDown,
        );
        bind(
            ListenerTarget::Element(trigger),
            EventKind::Focus,
            Listener::TriggerFocus,
        );
        bind(
            ListenerTarget::Element(container),
            EventKind::FocusOut,
            Listener::ContainerFocusOut,
        );
        bind(
            ListenerTarget::Document,
            EventKind::Click,
            Listener::DocumentClick,
        );
        bind(
            ListenerTarget::Document,
            EventKind::KeyDown,
            Listener::DocumentKeyDown,
        );
        for (i, &item) in items.iter().enumerate() {
            bind(
                ListenerTarget::Element(item),
                EventKind::Click,
                Listener::ItemClick(i),
            );
        }

        let dropdown = Self {
            id,
            container,
            trigger,
            menu_wrapper,
            menu,
            items,
            bindings,
            is_open: false,
            active: None,
            returning_focus: false,
            above_class: config.above_class.clone(),
            scroll_margin: config.scroll_margin,
            seed_delay: config.seed_delay,
        };
        dropdown.sync_closed(host);
        dropdown.place(host);
        log::debug!(
            "dropdown {:?} bound with {} items",
            dropdown.id,
            dropdown.items.len()
        );
        Ok(dropdown)
    }

    /// Instance identifier, echoed in every [`Task`] it defers.
    pub fn id(&self) -> DropdownId {
        self.id
    }

    /// True while the menu is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Index of the keyboard-active item, if any. Always `None` while closed.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Items in navigation order.
    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// The container element.
    pub fn container(&self) -> E {
        self.container
    }

    /// The trigger button.
    pub fn trigger(&self) -> E {
        self.trigger
    }

    /// The positioned wrapper around the menu.
    pub fn menu_wrapper(&self) -> E {
        self.menu_wrapper
    }

    /// The menu list.
    pub fn menu(&self) -> E {
        self.menu
    }

    /// Every listener this instance needs, in registration order.
    ///
    /// Element-bound listeners come first, then the two document listeners, then one
    /// click listener per item.
    pub fn bindings(&self) -> &[Binding<E>] {
        &self.bindings
    }

    /// Open the menu. Returns false if it was already open.
    pub fn open(&mut self, host: &mut impl Host<E>) -> bool {
        if self.is_open {
            return false;
        }
        self.is_open = true;
        host.set_attribute(self.trigger, "aria-expanded", TRUE);
        host.set_attribute(self.menu, "aria-hidden", FALSE);
        host.set_attribute(self.container, "data-open", TRUE);
        if let Some(&first) = self.items.first() {
            host.set_attribute(first, "tabindex", "0");
        }
        self.place(host);
        self.defer(host, Deferred::Reposition, Duration::ZERO);
        log::debug!("dropdown {:?} opened", self.id);
        true
    }

    /// Close the menu. Returns false if it was already closed.
    pub fn close(&mut self, host: &mut impl Surface<E>) -> bool {
        if !self.is_open {
            return false;
        }
        self.is_open = false;
        self.active = None;
        self.sync_closed(host);
        log::debug!("dropdown {:?} closed", self.id);
        true
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self, host: &mut impl Host<E>) {
        if self.is_open {
            self.close(host);
        } else {
            self.open(host);
        }
    }

    /// Make the item at `index` active: move the tabbable marker to it and focus it.
    ///
    /// Ignored while closed or when `index` is out of range.
    pub fn set_active(&mut self, index: usize, host: &mut impl Surface<E>) {
        if !self.is_open || index >= self.items.len() {
            return;
        }
        for &item in &self.items {
            host.set_attribute(item, "tabindex", "-1");
        }
        let item = self.items[index];
        host.set_attribute(item, "tabindex", "0");
        host.focus(item);
        self.active = Some(index);
        log::trace!("dropdown {:?} active item {index}", self.id);
    }

    /// Apply a navigation command to the active item.
    pub fn navigate(&mut self, cmd: NavCommand, host: &mut impl Surface<E>) {
        if let Some(i) = next_index(self.active, cmd, self.items.len()) {
            self.set_active(i, host);
        }
    }

    /// Type-ahead: activate the next item whose label starts with `ch`.
    ///
    /// Returns true if an item matched.
    pub fn search(&mut self, ch: char, host: &mut impl Surface<E>) -> bool {
        let items = &self.items;
        let hit = search_by_char_with(items.len(), self.active, ch, |i| {
            host.text_content(items[i])
        });
        match hit {
            Some(i) => {
                self.set_active(i, host);
                true
            }
            None => false,
        }
    }

    /// Activate the active item, close, and return focus to the trigger.
    ///
    /// The item's own activation (a synthetic click) is requested from the host and
    /// reaches this widget again as an item click, which reports the activation.
    /// Returns the activated index, or `None` (doing nothing) if no item is active.
    pub fn activate_active(&mut self, host: &mut impl Surface<E>) -> Option<usize> {
        let index = self.active?;
        host.activate(self.items[index]);
        self.close(host);
        self.return_focus(host);
        Some(index)
    }

    /// Handle a click on the trigger.
    pub fn on_trigger_click(&mut self, host: &mut impl Host<E>) -> Response {
        self.toggle(host);
        // A single click must never also count as an outside click.
        Response::with_outcome(Outcome::StopAndConsume)
    }

    /// Handle a keydown on the trigger.
    ///
    /// Enter, Space, and `ArrowDown` open and seed the first item; `ArrowUp` seeds the last.
    /// While already open, keys fall through to [`Self::on_document_key_down`].
    pub fn on_trigger_key_down(&mut self, key: Key, host: &mut impl Host<E>) -> Response {
        let seed = match key {
            Key::Enter | Key::Space | Key::ArrowDown => Seed::First,
            Key::ArrowUp => Seed::Last,
            _ => return Response::IGNORED,
        };
        if self.is_open {
            return Response::IGNORED;
        }
        self.open(host);
        self.defer(host, Deferred::Seed(seed), self.seed_delay);
        // Seeding is the only navigation this key may cause.
        Response::with_outcome(Outcome::StopAndConsume)
    }

    /// Handle the trigger gaining focus: open, unless the widget itself returned focus.
    pub fn on_trigger_focus(&mut self, host: &mut impl Host<E>) -> Response {
        if core::mem::take(&mut self.returning_focus) {
            return Response::IGNORED;
        }
        self.open(host);
        Response::IGNORED
    }

    /// Handle focus leaving an element inside the container.
    ///
    /// The check runs deferred, once the platform has moved focus to its destination.
    pub fn on_container_focus_out(&mut self, host: &mut impl Host<E>) -> Response {
        self.defer(host, Deferred::FocusCheck, Duration::ZERO);
        Response::IGNORED
    }

    /// Handle a click anywhere in the document: close if it landed outside the container.
    pub fn on_document_click(&mut self, target: E, host: &mut impl Surface<E>) -> Response {
        if self.is_open && !is_within(&*host, target, self.container) {
            self.close(host);
        }
        Response::IGNORED
    }

    /// Handle a keydown anywhere in the document: in-menu navigation while open.
    pub fn on_document_key_down(&mut self, key: Key, host: &mut impl Surface<E>) -> Response {
        if !self.is_open {
            return Response::IGNORED;
        }
        match key {
            // No focus trap: close and let focus move on.
            Key::Tab => {
                self.close(host);
                Response::IGNORED
            }
            Key::Escape => {
                self.close(host);
                self.return_focus(host);
                Response::with_outcome(Outcome::Consume)
            }
            Key::Enter | Key::Space => {
                self.activate_active(host);
                Response::with_outcome(Outcome::Consume)
            }
            _ => {
                if let Some(cmd) = NavCommand::from_key(key) {
                    self.navigate(cmd, host);
                    Response::with_outcome(Outcome::Consume)
                } else if let Some(ch) = key.search_char() {
                    self.search(ch, host);
                    Response::with_outcome(Outcome::Consume)
                } else {
                    Response::IGNORED
                }
            }
        }
    }

    /// Handle a click on the item at `index`: close and report the activation.
    pub fn on_item_click(&mut self, index: usize, host: &mut impl Surface<E>) -> Response {
        self.close(host);
        Response {
            outcome: Outcome::Continue,
            activated: Some(index),
        }
    }

    /// Run the handler behind `listener` for `event`.
    ///
    /// Mismatched pairs (for example a keydown listener given a click) are ignored.
    pub fn invoke(
        &mut self,
        listener: Listener,
        event: &InputEvent<E>,
        host: &mut impl Host<E>,
    ) -> Response {
        match (listener, *event) {
            (Listener::TriggerClick, InputEvent::Click { .. }) => self.on_trigger_click(host),
            (Listener::TriggerKeyDown, InputEvent::KeyDown { key, .. }) => {
                self.on_trigger_key_down(key, host)
            }
            (Listener::TriggerFocus, InputEvent::Focus { .. }) => self.on_trigger_focus(host),
            (Listener::ContainerFocusOut, InputEvent::FocusOut { .. }) => {
                self.on_container_focus_out(host)
            }
            (Listener::DocumentClick, InputEvent::Click { target }) => {
                self.on_document_click(target, host)
            }
            (Listener::DocumentKeyDown, InputEvent::KeyDown { key, .. }) => {
                self.on_document_key_down(key, host)
            }
            (Listener::ItemClick(i), InputEvent::Click { .. }) => self.on_item_click(i, host),
            _ => Response::IGNORED,
        }
    }

    /// Run deferred work scheduled by this instance.
    ///
    /// Each action re-checks the current state first, so stale tasks are no-ops.
    pub fn run_deferred(&mut self, action: Deferred, host: &mut impl Host<E>) {
        log::trace!("dropdown {:?} deferred {action:?}", self.id);
        match action {
            Deferred::FocusCheck => {
                let inside = host
                    .active_element()
                    .is_some_and(|el| is_within(&*host, el, self.container));
                if self.is_open && !inside {
                    self.close(host);
                }
            }
            Deferred::Reposition => {
                if self.is_open {
                    self.place(host);
                }
            }
            Deferred::Seed(seed) => {
                if self.is_open && !self.items.is_empty() {
                    let index = match seed {
                        Seed::First => 0,
                        Seed::Last => self.items.len() - 1,
                    };
                    self.set_active(index, host);
                }
            }
        }
    }

    fn place(&self, host: &mut impl Surface<E>) -> Placement {
        reposition(
            host,
            self.trigger,
            self.menu_wrapper,
            &self.above_class,
            self.scroll_margin,
        )
    }

    fn sync_closed(&self, host: &mut impl Surface<E>) {
        host.set_attribute(self.trigger, "aria-expanded", FALSE);
        host.set_attribute(self.menu, "aria-hidden", TRUE);
        host.set_attribute(self.container, "data-open", FALSE);
        for &item in &self.items {
            host.set_attribute(item, "tabindex", "-1");
        }
    }

    fn return_focus(&mut self, host: &mut impl Surface<E>) {
        self.returning_focus = host.active_element() != Some(self.trigger);
        host.focus(self.trigger);
        if host.active_element() != Some(self.trigger) {
            // Refused: no focus event will arrive to consume the flag.
            self.returning_focus = false;
        }
    }

    fn defer(&self, host: &mut impl Host<E>, action: Deferred, delay: Duration) {
        host.defer(
            Task {
                dropdown: self.id,
                action,
            },
            delay,
        );
    }
}
