// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Dropdown: a headless, `no_std` accessible dropdown menu.
//!
//! ## Overview
//!
//! This crate implements the behavior of a menu button: a trigger that reveals a flat list of
//! items, operable by pointer and keyboard. It owns the decisions and none of the elements.
//! Elements are opaque handles `E` that the widget reads and writes through the
//! [`Surface`](crate::host::Surface) capability, so the same state machine drives a browser DOM,
//! a native toolkit, or a headless test document.
//!
//! - [`Dropdown`](crate::dropdown::Dropdown): open/close state machine, active item, roving
//!   tabindex, and the listener handlers.
//! - [`navigation`]: wraparound arrow/Home/End stepping and type-ahead character search.
//! - [`position`]: viewport-aware placement (below, above, or height-capped and scrollable).
//! - [`router`]: element-phase then document-phase propagation for one instance.
//! - [`DropdownSet`](crate::registry::DropdownSet): one dispatcher for every instance on a page.
//!
//! ## Observable state
//!
//! | element      | written                                                           |
//! |--------------|-------------------------------------------------------------------|
//! | trigger      | `aria-expanded` = `"true"` / `"false"`                            |
//! | menu         | `aria-hidden` = `"false"` / `"true"`                              |
//! | container    | `data-open` = `"true"` / `"false"`                                |
//! | menu wrapper | inline `top`/`bottom`/`max-height`/`overflow-y`, the "above" class |
//! | each item    | `tabindex` = `"0"` for the one reachable item, else `"-1"`        |
//!
//! ## Deferred work
//!
//! Some decisions must wait for the platform: where focus actually landed after a `focusout`,
//! and the menu's size once it is laid out. The widget hands these to a
//! [`Scheduler`](crate::host::Scheduler) as [`Task`](crate::types::Task)s; the host runs them
//! later through [`Dropdown::run_deferred`](crate::dropdown::Dropdown::run_deferred). Every task
//! re-checks the widget state when it runs, so nothing is ever cancelled.
//!
//! ## Minimal placement example
//!
//! ```
//! use kurbo::Rect;
//! use understory_dropdown::position::{Side, place};
//!
//! // Trigger near the bottom of a 750px viewport: 50px below, 660px above.
//! let trigger = Rect::new(0.0, 660.0, 120.0, 700.0);
//! assert_eq!(place(trigger, 80.0, 750.0, 10.0).side, Side::Above);
//!
//! // A menu taller than either side is capped on the roomier one.
//! let capped = place(trigger, 900.0, 750.0, 10.0);
//! assert_eq!(capped.max_height, Some(650.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod dropdown;
pub mod error;
pub mod host;
pub mod navigation;
pub mod position;
pub mod registry;
pub mod router;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::DropdownConfig;
pub use dropdown::Dropdown;
pub use error::BuildError;
pub use registry::DropdownSet;
