// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A page-wide set of dropdowns sharing one dispatcher.
//!
//! ## Overview
//!
//! Binding each instance's listeners separately means every page-level event runs N
//! document listeners and N ancestor walks. [`DropdownSet`] keeps an element → listener
//! index over all live instances, walks the target's ancestor path once, and then runs
//! the document phase for every instance.
//!
//! ## Construction
//!
//! [`DropdownSet::scan`] looks for containers once, at page load. A container that is
//! missing a required part is logged and skipped; it never becomes a live instance.
//!
//! ## Propagation
//!
//! As on the platform, a handler that stops propagation (the trigger's click handler)
//! hides the event from *every* instance's document listener, not only its own.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::config::DropdownConfig;
use crate::dropdown::Dropdown;
use crate::error::BuildError;
use crate::host::{Host, Surface};
use crate::router::{bubble_path, document_listeners, event_kind};
use crate::types::{DropdownId, EventKind, InputEvent, Listener, ListenerTarget, Response, Task};

/// All dropdowns of one page.
#[derive(Clone, Debug)]
pub struct DropdownSet<E> {
    dropdowns: Vec<Dropdown<E>>,
    by_element: BTreeMap<E, Vec<(usize, EventKind, Listener)>>,
    config: DropdownConfig,
}

impl<E: Copy + Ord> DropdownSet<E> {
    /// Create an empty set that binds new instances with `config`.
    pub fn new(config: DropdownConfig) -> Self {
        Self {
            dropdowns: Vec::new(),
            by_element: BTreeMap::new(),
            config,
        }
    }

    /// Bind every container below `root`.
    ///
    /// Containers that fail to build are skipped with a warning.
    pub fn scan(root: E, host: &mut impl Surface<E>, config: DropdownConfig) -> Self {
        let mut set = Self::new(config);
        let containers = host.query_class(root, &set.config.container_class);
        for container in containers {
            if let Err(err) = set.insert(container, host) {
                log::warn!("skipping dropdown container: {err}");
            }
        }
        log::debug!("scan bound {} dropdowns", set.len());
        set
    }

    /// Bind one more container.
    pub fn insert(
        &mut self,
        container: E,
        host: &mut impl Surface<E>,
    ) -> Result<DropdownId, BuildError> {
        let slot = self.dropdowns.len();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "DropdownId uses 32-bit indices by design."
        )]
        let id = DropdownId(slot as u32);
        let dropdown = Dropdown::new(id, container, host, &self.config)?;
        for binding in dropdown.bindings() {
            if let ListenerTarget::Element(el) = binding.target {
                self.by_element
                    .entry(el)
                    .or_default()
                    .push((slot, binding.kind, binding.listener));
            }
        }
        self.dropdowns.push(dropdown);
        Ok(id)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.dropdowns.len()
    }

    /// True if no container was bound.
    pub fn is_empty(&self) -> bool {
        self.dropdowns.is_empty()
    }

    /// The configuration new instances are bound with.
    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    /// Look up an instance.
    pub fn get(&self, id: DropdownId) -> Option<&Dropdown<E>> {
        self.dropdowns.get(id.0 as usize)
    }

    /// Look up an instance mutably.
    pub fn get_mut(&mut self, id: DropdownId) -> Option<&mut Dropdown<E>> {
        self.dropdowns.get_mut(id.0 as usize)
    }

    /// The instance bound to `container`, if any.
    pub fn by_container(&self, container: E) -> Option<&Dropdown<E>> {
        self.dropdowns.iter().find(|d| d.container() == container)
    }

    /// Iterate over all instances in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &Dropdown<E>> {
        self.dropdowns.iter()
    }

    /// Route an input event to every relevant listener of every instance.
    pub fn dispatch(&mut self, event: &InputEvent<E>, host: &mut impl Host<E>) -> Response {
        let kind = event_kind(event);
        let mut response = Response::IGNORED;

        for node in bubble_path(event, &*host) {
            let Some(entries) = self.by_element.get(&node) else {
                continue;
            };
            let matching: Vec<(usize, Listener)> = entries
                .iter()
                .filter(|(_, k, _)| *k == kind)
                .map(|&(slot, _, listener)| (slot, listener))
                .collect();
            for (slot, listener) in matching {
                response.merge(self.dropdowns[slot].invoke(listener, event, host));
            }
            if response.outcome.is_stopped() {
                return response;
            }
        }

        for dropdown in &mut self.dropdowns {
            let listeners: Vec<Listener> = document_listeners(dropdown.bindings(), kind).collect();
            for listener in listeners {
                response.merge(dropdown.invoke(listener, event, host));
            }
        }
        response
    }

    /// Run a deferred task on the instance that scheduled it.
    ///
    /// Tasks addressed to unknown instances are dropped.
    pub fn run_deferred(&mut self, task: Task, host: &mut impl Host<E>) {
        match self.get_mut(task.dropdown) {
            Some(dropdown) => dropdown.run_deferred(task.action, host),
            None => log::warn!("dropping task for unknown dropdown {:?}", task.dropdown),
        }
    }
}
