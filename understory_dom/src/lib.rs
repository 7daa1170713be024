// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory DOM: a headless element tree for driving Understory widgets without a browser.
//!
//! - Stores elements with tags, classes, attributes, text, inline styles, and Kurbo bounds.
//! - Tracks focus and tab order, and queues the `focus`/`focusout`/`click` events a real
//!   document would fire.
//! - Keeps a virtual clock so deferred widget work runs deterministically.
//!
//! [`Document`] implements the host capabilities of [`understory_dropdown::host`]; [`Page`]
//! binds every dropdown in a document and acts as its event loop.
//!
//! ## Not a layout engine
//!
//! Bounds are whatever the caller sets. Inline styles are stored but only `max-height` has an
//! effect (on [`measure`](understory_dropdown::host::Surface::measure)); nothing moves when a
//! menu flips above its trigger.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_dom::{Document, Page, insert_dropdown};
//! use understory_dropdown::DropdownConfig;
//! use understory_dropdown::types::Key;
//!
//! let mut doc = Document::new(Size::new(800.0, 600.0));
//! let body = doc.body();
//! let dd = insert_dropdown(
//!     &mut doc,
//!     body,
//!     "Fruit",
//!     &["Apple", "Banana", "Cherry"],
//!     Rect::new(10.0, 10.0, 130.0, 50.0),
//!     &DropdownConfig::default(),
//! );
//! let mut page = Page::new(doc);
//!
//! page.click(dd.trigger);
//! page.key(Key::Char('c'));
//! page.key(Key::Enter);
//! page.settle();
//!
//! let activated = page.take_activations();
//! assert_eq!(activated[0].index, 2);
//! assert_eq!(page.active_element(), Some(dd.trigger));
//! ```

#![no_std]

extern crate alloc;

mod document;
mod page;
mod timers;
mod types;

pub use document::Document;
pub use page::{Activation, DropdownMarkup, ITEM_HEIGHT, Page, insert_dropdown};
pub use timers::Timers;
pub use types::{Element, ElementFlags, ElementId};
