// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A page driver: a [`Document`] plus the dropdowns bound to it.
//!
//! [`Page`] plays the part of the browser's event loop. Every user action is
//! dispatched into the [`DropdownSet`], then the events the handlers caused
//! (focus moves, synthetic clicks) are delivered in order. Deferred tasks only
//! run when virtual time is advanced with [`Page::advance`] or [`Page::settle`].

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Rect};
use understory_dropdown::types::{DropdownId, InputEvent, Key, Response};
use understory_dropdown::{DropdownConfig, DropdownSet};

use crate::document::Document;
use crate::types::{Element, ElementId};

/// Height of one item in [`insert_dropdown`] markup.
pub const ITEM_HEIGHT: f64 = 32.0;

/// Handles to the parts of a dropdown built by [`insert_dropdown`].
#[derive(Clone, Debug)]
pub struct DropdownMarkup {
    /// The `dropdown` container.
    pub container: ElementId,
    /// The trigger button.
    pub trigger: ElementId,
    /// The positioned menu wrapper.
    pub wrapper: ElementId,
    /// The menu list.
    pub menu: ElementId,
    /// Items in order.
    pub items: Vec<ElementId>,
}

/// Build dropdown markup under `parent` using the class names in `config`.
///
/// The menu is laid out directly below `trigger`, one [`ITEM_HEIGHT`] row per item
/// plus 8px of padding.
pub fn insert_dropdown(
    doc: &mut Document,
    parent: ElementId,
    label: &str,
    items: &[&str],
    trigger: Rect,
    config: &DropdownConfig,
) -> DropdownMarkup {
    #[allow(clippy::cast_precision_loss, reason = "Item counts are small.")]
    let menu_height = items.len() as f64 * ITEM_HEIGHT + 8.0;
    let menu_rect = Rect::new(trigger.x0, trigger.y1, trigger.x1, trigger.y1 + menu_height);

    let container = doc.insert(
        parent,
        Element::new("div")
            .class(&config.container_class)
            .bounds(trigger.union(menu_rect)),
    );
    let trigger_el = doc.insert(
        container,
        Element::new("button")
            .class(&config.trigger_class)
            .attr("aria-haspopup", "menu")
            .text(label)
            .bounds(trigger),
    );
    let wrapper = doc.insert(
        container,
        Element::new("div")
            .class(&config.menu_wrapper_class)
            .bounds(menu_rect),
    );
    let menu = doc.insert(
        wrapper,
        Element::new("ul")
            .class(&config.menu_class)
            .attr("role", "menu")
            .bounds(menu_rect),
    );
    let items = items
        .iter()
        .enumerate()
        .map(|(i, text)| {
            #[allow(clippy::cast_precision_loss, reason = "Item counts are small.")]
            let top = menu_rect.y0 + 4.0 + i as f64 * ITEM_HEIGHT;
            doc.insert(
                menu,
                Element::new("li")
                    .class(&config.item_class)
                    .attr("role", "menuitem")
                    .text(text)
                    .bounds(Rect::new(menu_rect.x0, top, menu_rect.x1, top + ITEM_HEIGHT)),
            )
        })
        .collect();

    DropdownMarkup {
        container,
        trigger: trigger_el,
        wrapper,
        menu,
        items,
    }
}

/// An item activation observed by the page.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Activation {
    /// Instance whose item was activated.
    pub dropdown: DropdownId,
    /// Index of the item within its menu.
    pub index: usize,
    /// The item element.
    pub item: ElementId,
}

/// A document with its dropdowns bound and an event loop to drive them.
#[derive(Debug)]
pub struct Page {
    doc: Document,
    dropdowns: DropdownSet<ElementId>,
    activations: Vec<Activation>,
}

impl Page {
    /// Bind every dropdown in `doc` with the default configuration.
    pub fn new(doc: Document) -> Self {
        Self::with_config(doc, DropdownConfig::default())
    }

    /// Bind every dropdown in `doc` with `config`.
    pub fn with_config(mut doc: Document, config: DropdownConfig) -> Self {
        let body = doc.body();
        let dropdowns = DropdownSet::scan(body, &mut doc, config);
        let mut page = Self {
            doc,
            dropdowns,
            activations: Vec::new(),
        };
        page.pump();
        page
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The document, mutably. Events queued through it are delivered on the next action.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The bound dropdowns.
    pub fn dropdowns(&self) -> &DropdownSet<ElementId> {
        &self.dropdowns
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.doc.timers().now()
    }

    /// Click `target`.
    pub fn click(&mut self, target: ElementId) -> Response {
        let response = self.deliver(InputEvent::Click { target });
        self.pump();
        response
    }

    /// Click whatever is at `pt`. Returns `None` if nothing was hit.
    pub fn click_at(&mut self, pt: Point) -> Option<Response> {
        let target = self.doc.hit_test(pt)?;
        Some(self.click(target))
    }

    /// Press `key` on the focused element.
    ///
    /// An unprevented Tab moves focus to the next tabbable element, or out of the
    /// document if there is none.
    pub fn key(&mut self, key: Key) -> Response {
        let target = self.active_element();
        let response = self.deliver(InputEvent::KeyDown { target, key });
        if key == Key::Tab && !response.outcome.default_prevented() {
            match self.doc.next_tabbable(target) {
                Some(next) => {
                    self.doc.set_focus(next);
                }
                None => self.doc.blur(),
            }
        }
        self.pump();
        response
    }

    /// Press Tab.
    pub fn tab(&mut self) -> Response {
        self.key(Key::Tab)
    }

    /// Move focus to `target` as a script or pointer would.
    pub fn focus(&mut self, target: ElementId) -> bool {
        let moved = self.doc.set_focus(target);
        self.pump();
        moved
    }

    /// The focused element.
    pub fn active_element(&self) -> Option<ElementId> {
        use understory_dropdown::host::Surface as _;
        self.doc.active_element()
    }

    /// Let `dt` of virtual time pass, running every task that falls due.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.now() + dt;
        while let Some(task) = self.doc.timers_mut().pop_due(until) {
            self.dropdowns.run_deferred(task, &mut self.doc);
            self.pump();
        }
        self.doc.timers_mut().advance_to(until);
    }

    /// Run tasks until none are left, advancing time as far as needed.
    pub fn settle(&mut self) {
        self.pump();
        while let Some(deadline) = self.doc.timers().next_deadline() {
            let dt = deadline.saturating_sub(self.now());
            self.advance(dt);
        }
    }

    /// Activations observed since the last call.
    pub fn take_activations(&mut self) -> Vec<Activation> {
        core::mem::take(&mut self.activations)
    }

    /// Deliver queued events until the queue is empty.
    fn pump(&mut self) {
        while let Some(event) = self.doc.pop_event() {
            self.deliver(event);
        }
    }

    fn deliver(&mut self, event: InputEvent<ElementId>) -> Response {
        log::trace!("deliver {event:?}");
        let response = self.dropdowns.dispatch(&event, &mut self.doc);
        if let (Some(index), Some(target)) = (response.activated, event.target()) {
            self.record_activation(index, target);
        }
        response
    }

    fn record_activation(&mut self, index: usize, target: ElementId) {
        let owner = self.dropdowns.iter().find_map(|d| {
            let item = *d.items().get(index)?;
            self.doc
                .is_within(target, item)
                .then_some((d.id(), item))
        });
        match owner {
            Some((dropdown, item)) => {
                log::debug!("item {index} of dropdown {dropdown:?} activated");
                self.activations.push(Activation {
                    dropdown,
                    index,
                    item,
                });
            }
            None => log::warn!("activation of item {index} with no owning dropdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Size;
    use understory_dropdown::types::{Outcome, StyleProp};

    const FRUIT: [&str; 4] = ["Apple", "Banana", "Cherry", "Beet"];
    const SEED: Duration = Duration::from_millis(10);

    struct Fixture {
        page: Page,
        dd: DropdownMarkup,
        before: ElementId,
        after: ElementId,
    }

    /// Body > [button "before", dropdown, button "after"].
    fn fixture_at(trigger: Rect) -> Fixture {
        let config = DropdownConfig::default();
        let mut doc = Document::new(Size::new(1024.0, 750.0));
        let body = doc.body();
        let before = doc.insert(
            body,
            Element::new("button").bounds(Rect::new(300.0, 0.0, 400.0, 40.0)),
        );
        let dd = insert_dropdown(&mut doc, body, "Fruit", &FRUIT, trigger, &config);
        let after = doc.insert(
            body,
            Element::new("button").bounds(Rect::new(500.0, 0.0, 600.0, 40.0)),
        );
        Fixture {
            page: Page::with_config(doc, config),
            dd,
            before,
            after,
        }
    }

    fn fixture() -> Fixture {
        fixture_at(Rect::new(0.0, 100.0, 120.0, 140.0))
    }

    impl Fixture {
        fn is_open(&self) -> bool {
            self.page
                .dropdowns()
                .by_container(self.dd.container)
                .is_some_and(|d| d.is_open())
        }

        fn attr(&self, el: ElementId, name: &str) -> Option<&str> {
            self.page.document().attribute(el, name)
        }
    }

    #[test]
    fn scan_binds_and_writes_closed_state() {
        let f = fixture();
        assert_eq!(f.page.dropdowns().len(), 1);
        assert!(!f.is_open());
        assert_eq!(f.attr(f.dd.trigger, "aria-expanded"), Some("false"));
        assert_eq!(f.attr(f.dd.menu, "aria-hidden"), Some("true"));
        assert_eq!(f.attr(f.dd.container, "data-open"), Some("false"));
        for &item in &f.dd.items {
            assert_eq!(f.attr(item, "tabindex"), Some("-1"));
        }
    }

    #[test]
    fn click_toggles_and_outside_click_closes() {
        let mut f = fixture();
        let r = f.page.click(f.dd.trigger);
        assert_eq!(r.outcome, Outcome::StopAndConsume);
        assert!(f.is_open());
        assert_eq!(f.attr(f.dd.trigger, "aria-expanded"), Some("true"));
        assert_eq!(f.attr(f.dd.items[0], "tabindex"), Some("0"));

        f.page.click_at(Point::new(900.0, 700.0));
        assert!(!f.is_open());

        f.page.click(f.dd.trigger);
        f.page.click(f.dd.trigger);
        assert!(!f.is_open());
    }

    #[test]
    fn click_inside_menu_keeps_it_open() {
        let mut f = fixture();
        f.page.click(f.dd.trigger);
        f.page.click(f.dd.menu);
        assert!(f.is_open());
    }

    #[test]
    fn tab_onto_trigger_opens_then_arrows_navigate() {
        let mut f = fixture();
        f.page.focus(f.before);
        f.page.tab();
        assert_eq!(f.page.active_element(), Some(f.dd.trigger));
        assert!(f.is_open(), "focusing the trigger opens the menu");

        // Already open: the trigger key falls through to menu navigation.
        let r = f.page.key(Key::ArrowDown);
        assert_eq!(r.outcome, Outcome::Consume);
        f.page.settle();
        assert_eq!(f.page.active_element(), Some(f.dd.items[0]));
        assert!(f.is_open(), "focus stayed inside the container");

        f.page.key(Key::ArrowUp);
        assert_eq!(f.page.active_element(), Some(f.dd.items[3]));
        assert_eq!(f.attr(f.dd.items[3], "tabindex"), Some("0"));
        assert_eq!(f.attr(f.dd.items[0], "tabindex"), Some("-1"));
    }

    #[test]
    fn keyboard_open_seeds_after_delay() {
        let mut f = fixture();
        f.page.focus(f.dd.trigger);
        f.page.key(Key::Escape);
        assert!(!f.is_open());
        assert_eq!(f.page.active_element(), Some(f.dd.trigger));

        let r = f.page.key(Key::ArrowUp);
        assert_eq!(r.outcome, Outcome::StopAndConsume);
        assert!(f.is_open());
        assert_eq!(f.page.active_element(), Some(f.dd.trigger), "seeding waits");

        f.page.advance(SEED - Duration::from_millis(1));
        assert_eq!(f.page.active_element(), Some(f.dd.trigger));
        f.page.advance(Duration::from_millis(1));
        assert_eq!(f.page.active_element(), Some(f.dd.items[3]));
        assert_eq!(f.page.now(), SEED);
    }

    #[test]
    fn type_ahead_then_enter_activates() {
        let mut f = fixture();
        f.page.click(f.dd.trigger);
        f.page.key(Key::Char('b'));
        assert_eq!(f.page.active_element(), Some(f.dd.items[1]));
        f.page.key(Key::Char('B'));
        assert_eq!(f.page.active_element(), Some(f.dd.items[3]));

        let r = f.page.key(Key::Enter);
        assert!(r.outcome.default_prevented());
        f.page.settle();

        assert!(!f.is_open());
        assert_eq!(f.page.active_element(), Some(f.dd.trigger));
        assert_eq!(
            f.page.take_activations(),
            vec![Activation {
                dropdown: DropdownId(0),
                index: 3,
                item: f.dd.items[3],
            }]
        );
        assert!(f.page.take_activations().is_empty());
    }

    #[test]
    fn pointer_activation_reports_item() {
        let mut f = fixture();
        f.page.click(f.dd.trigger);
        let item = f.dd.items[2];
        let center = f.page.document().element(item).map(|e| e.bounds.center());
        let r = center.and_then(|pt| f.page.click_at(pt));
        assert_eq!(r.and_then(|r| r.activated), Some(2));
        assert!(!f.is_open());
        assert_eq!(f.page.take_activations().len(), 1);
    }

    #[test]
    fn pointer_on_closed_menu_hits_what_is_underneath() {
        let mut f = fixture();
        let item = f.dd.items[1];
        let center = f.page.document().element(item).map(|e| e.bounds.center());
        let Some(pt) = center else {
            panic!("item has no bounds");
        };
        assert_eq!(f.page.document().hit_test(pt), Some(f.dd.wrapper));

        let r = f.page.click_at(pt);
        assert_eq!(r.and_then(|r| r.activated), None);
        assert!(f.page.take_activations().is_empty());
        assert!(!f.is_open());
    }

    #[test]
    fn escape_returns_focus_without_reopening() {
        let mut f = fixture();
        f.page.click(f.dd.trigger);
        f.page.key(Key::ArrowDown);
        assert_eq!(f.page.active_element(), Some(f.dd.items[0]));

        let r = f.page.key(Key::Escape);
        assert_eq!(r.outcome, Outcome::Consume);
        f.page.settle();
        assert!(!f.is_open());
        assert_eq!(f.page.active_element(), Some(f.dd.trigger));
        assert_eq!(f.attr(f.dd.trigger, "aria-expanded"), Some("false"));
    }

    #[test]
    fn tab_out_of_menu_closes_and_moves_on() {
        let mut f = fixture();
        f.page.click(f.dd.trigger);
        f.page.key(Key::ArrowDown);
        let r = f.page.tab();
        assert!(!r.outcome.default_prevented());
        f.page.settle();
        assert!(!f.is_open());
        assert_eq!(f.page.active_element(), Some(f.after));
        for &item in &f.dd.items {
            assert_eq!(f.attr(item, "tabindex"), Some("-1"));
        }
    }

    #[test]
    fn focus_leaving_container_closes_after_check() {
        let mut f = fixture();
        f.page.click(f.dd.trigger);
        f.page.key(Key::ArrowDown);
        f.page.focus(f.after);
        assert!(f.is_open(), "the check is deferred");
        f.page.settle();
        assert!(!f.is_open());
    }

    #[test]
    fn opens_above_near_viewport_bottom() {
        let mut f = fixture_at(Rect::new(0.0, 660.0, 120.0, 700.0));
        f.page.click(f.dd.trigger);
        let doc = f.page.document();
        assert!(doc.has_class(f.dd.wrapper, "dropdown__menu-container--above"));
        assert_eq!(doc.style(f.dd.wrapper, StyleProp::Bottom), Some("100%"));
        assert_eq!(doc.style(f.dd.wrapper, StyleProp::Top), None);
        assert_eq!(doc.style(f.dd.wrapper, StyleProp::MaxHeight), None);
    }

    #[test]
    fn caps_height_when_viewport_is_short() {
        let mut f = fixture_at(Rect::new(0.0, 60.0, 120.0, 100.0));
        f.page.document_mut().set_viewport(Size::new(1024.0, 150.0));
        f.page.click(f.dd.trigger);
        let doc = f.page.document();
        // 50px below, 60px above: the larger side wins and is capped.
        assert!(doc.has_class(f.dd.wrapper, "dropdown__menu-container--above"));
        assert_eq!(doc.style(f.dd.wrapper, StyleProp::MaxHeight), Some("50px"));
        assert_eq!(doc.style(f.dd.wrapper, StyleProp::OverflowY), Some("auto"));
    }

    #[test]
    fn several_dropdowns_share_the_page() {
        let config = DropdownConfig::default();
        let mut doc = Document::new(Size::new(1024.0, 750.0));
        let body = doc.body();
        let a = insert_dropdown(
            &mut doc,
            body,
            "Fruit",
            &FRUIT,
            Rect::new(0.0, 0.0, 120.0, 40.0),
            &config,
        );
        let b = insert_dropdown(
            &mut doc,
            body,
            "Color",
            &["Red", "Green"],
            Rect::new(200.0, 0.0, 320.0, 40.0),
            &config,
        );
        let mut page = Page::new(doc);
        assert_eq!(page.dropdowns().len(), 2);
        let open = |page: &Page, c| page.dropdowns().by_container(c).is_some_and(|d| d.is_open());

        page.click(a.trigger);
        page.click(b.trigger);
        // The second trigger stopped propagation, so the first never saw an outside click.
        assert!(open(&page, a.container));
        assert!(open(&page, b.container));

        // An item click in the second menu is an outside click for the first.
        page.click(b.items[1]);
        assert!(!open(&page, b.container));
        assert!(!open(&page, a.container));
        let acts = page.take_activations();
        assert_eq!(acts.len(), 1);
        assert_eq!(acts[0].dropdown, DropdownId(1));
        assert_eq!(acts[0].item, b.items[1]);

        page.click(a.trigger);
        page.click_at(Point::new(900.0, 700.0));
        assert!(!open(&page, a.container));
    }

    #[test]
    fn broken_markup_is_skipped() {
        let config = DropdownConfig::default();
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let body = doc.body();
        let broken = doc.insert(body, Element::new("div").class(&config.container_class));
        doc.insert(broken, Element::new("button").class(&config.trigger_class));
        let page = Page::new(doc);
        assert!(page.dropdowns().is_empty());
    }
}
