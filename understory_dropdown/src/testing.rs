// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal in-memory host for unit tests.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::Cell;
use core::time::Duration;

use kurbo::Rect;

use crate::host::{ParentLookup, Scheduler, Surface};
use crate::types::{StyleProp, Task};

#[derive(Debug, Default)]
pub(crate) struct MockHost {
    parents: BTreeMap<u32, u32>,
    classes: BTreeMap<u32, Vec<String>>,
    text: BTreeMap<u32, String>,
    rects: BTreeMap<u32, Rect>,
    pub(crate) attrs: BTreeMap<(u32, String), String>,
    pub(crate) styles: BTreeMap<(u32, StyleProp), String>,
    pub(crate) focused: Option<u32>,
    pub(crate) focus_calls: Vec<u32>,
    pub(crate) activated: Vec<u32>,
    pub(crate) tasks: Vec<(Task, Duration)>,
    pub(crate) viewport: f64,
    /// Elements that refuse focus.
    pub(crate) unfocusable: Vec<u32>,
    pub(crate) text_reads: Cell<usize>,
}

/// Element handles of the stock fixture built by [`MockHost::fixture`].
pub(crate) const CONTAINER: u32 = 1;
pub(crate) const TRIGGER: u32 = 2;
pub(crate) const WRAPPER: u32 = 3;
pub(crate) const MENU: u32 = 4;
pub(crate) const OUTSIDE: u32 = 99;

pub(crate) fn item(i: usize) -> u32 {
    #[allow(clippy::cast_possible_truncation, reason = "Fixtures are tiny.")]
    let i = i as u32;
    10 + i
}

impl MockHost {
    /// Body(0) > container(1) > [trigger(2), wrapper(3) > menu(4) > items(10..)], plus outside(99).
    pub(crate) fn fixture(labels: &[&str]) -> Self {
        let mut h = Self {
            viewport: 750.0,
            ..Self::default()
        };
        h.add(CONTAINER, 0, "dropdown");
        h.add(TRIGGER, CONTAINER, "dropdown__button");
        h.add(WRAPPER, CONTAINER, "dropdown__menu-container");
        h.add(MENU, WRAPPER, "dropdown__menu");
        for (i, label) in labels.iter().enumerate() {
            h.add(item(i), MENU, "dropdown__menu-item");
            h.text.insert(item(i), label.to_string());
        }
        h.add(OUTSIDE, 0, "");
        h.rects.insert(TRIGGER, Rect::new(0.0, 100.0, 120.0, 140.0));
        h.rects.insert(WRAPPER, Rect::new(0.0, 0.0, 120.0, 200.0));
        h
    }

    pub(crate) fn add(&mut self, el: u32, parent: u32, class: &str) {
        self.parents.insert(el, parent);
        if !class.is_empty() {
            self.classes.insert(el, alloc::vec![class.to_string()]);
        }
    }

    pub(crate) fn set_rect(&mut self, el: u32, rect: Rect) {
        self.rects.insert(el, rect);
    }

    pub(crate) fn attr(&self, el: u32, name: &str) -> Option<&str> {
        self.attrs.get(&(el, name.to_string())).map(String::as_str)
    }

    pub(crate) fn style(&self, el: u32, prop: StyleProp) -> Option<&str> {
        self.styles.get(&(el, prop)).map(String::as_str)
    }

    pub(crate) fn has_class(&self, el: u32, class: &str) -> bool {
        self.classes
            .get(&el)
            .is_some_and(|c| c.iter().any(|x| x == class))
    }

    pub(crate) fn take_tasks(&mut self) -> Vec<(Task, Duration)> {
        core::mem::take(&mut self.tasks)
    }

    /// Elements with `tabindex="0"`.
    pub(crate) fn tabbable(&self) -> Vec<u32> {
        self.attrs
            .iter()
            .filter(|((_, name), value)| name == "tabindex" && value.as_str() == "0")
            .map(|((el, _), _)| *el)
            .collect()
    }
}

impl ParentLookup<u32> for MockHost {
    fn parent_of(&self, el: &u32) -> Option<u32> {
        self.parents.get(el).copied()
    }
}

impl Surface<u32> for MockHost {
    fn set_attribute(&mut self, el: u32, name: &str, value: &str) {
        self.attrs.insert((el, name.to_string()), value.to_string());
    }

    fn set_style(&mut self, el: u32, prop: StyleProp, value: Option<&str>) {
        match value {
            Some(v) => {
                self.styles.insert((el, prop), v.to_string());
            }
            None => {
                self.styles.remove(&(el, prop));
            }
        }
    }

    fn set_class(&mut self, el: u32, class: &str, on: bool) {
        let classes = self.classes.entry(el).or_default();
        classes.retain(|c| c != class);
        if on {
            classes.push(class.to_string());
        }
    }

    fn measure(&mut self, el: u32) -> Rect {
        self.rects.get(&el).copied().unwrap_or(Rect::ZERO)
    }

    fn viewport_height(&self) -> f64 {
        self.viewport
    }

    fn focus(&mut self, el: u32) {
        self.focus_calls.push(el);
        if !self.unfocusable.contains(&el) {
            self.focused = Some(el);
        }
    }

    fn active_element(&self) -> Option<u32> {
        self.focused
    }

    fn text_content(&self, el: u32) -> String {
        self.text_reads.set(self.text_reads.get() + 1);
        self.text.get(&el).cloned().unwrap_or_default()
    }

    fn query_class(&self, root: u32, class: &str) -> Vec<u32> {
        // Keys are ordered, which doubles as document order for fixtures.
        self.classes
            .iter()
            .filter(|(el, c)| {
                **el != root
                    && c.iter().any(|x| x == class)
                    && crate::host::is_within(self, **el, root)
            })
            .map(|(el, _)| *el)
            .collect()
    }

    fn activate(&mut self, el: u32) {
        self.activated.push(el);
    }
}

impl Scheduler for MockHost {
    fn defer(&mut self, task: Task, delay: Duration) {
        self.tasks.push((task, delay));
    }
}
