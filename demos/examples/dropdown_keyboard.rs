// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard walkthrough.
//!
//! Tabs onto a dropdown trigger, navigates with arrows and type-ahead, activates an
//! item with Enter, and prints the ARIA state after each step.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example dropdown_keyboard`

use std::time::Duration;

use kurbo::{Rect, Size};
use understory_dom::{Document, DropdownMarkup, Element, Page, insert_dropdown};
use understory_dropdown::DropdownConfig;
use understory_dropdown::types::Key;

fn dump(page: &Page, dd: &DropdownMarkup, step: &str) {
    let doc = page.document();
    let tabbable: Vec<usize> = dd
        .items
        .iter()
        .enumerate()
        .filter(|(_, el)| doc.attribute(**el, "tabindex") == Some("0"))
        .map(|(i, _)| i)
        .collect();
    let focused = page
        .active_element()
        .and_then(|el| dd.items.iter().position(|i| *i == el));
    println!(
        "{step:<22} aria-expanded={:<5} aria-hidden={:<5} tabbable={tabbable:?} focused_item={focused:?}",
        doc.attribute(dd.trigger, "aria-expanded").unwrap_or("-"),
        doc.attribute(dd.menu, "aria-hidden").unwrap_or("-"),
    );
}

fn main() {
    env_logger::init();

    let config = DropdownConfig::default();
    let mut doc = Document::new(Size::new(1024.0, 768.0));
    let body = doc.body();
    doc.insert(
        body,
        Element::new("a")
            .text("Skip link")
            .bounds(Rect::new(0.0, 0.0, 80.0, 20.0)),
    );
    let dd = insert_dropdown(
        &mut doc,
        body,
        "Fruit",
        &["Apple", "Banana", "Cherry", "Beet", "Blueberry"],
        Rect::new(20.0, 40.0, 180.0, 80.0),
        &config,
    );
    let mut page = Page::with_config(doc, config);

    println!("== Keyboard ==");
    dump(&page, &dd, "initial");
    page.tab();
    dump(&page, &dd, "tab (skip link)");
    page.tab();
    dump(&page, &dd, "tab (trigger opens)");
    page.key(Key::ArrowDown);
    dump(&page, &dd, "ArrowDown");
    page.key(Key::End);
    dump(&page, &dd, "End");
    for ch in ['b', 'b', 'b'] {
        page.key(Key::Char(ch));
        dump(&page, &dd, "type 'b'");
    }
    page.key(Key::Enter);
    page.advance(Duration::from_millis(20));
    dump(&page, &dd, "Enter");

    for act in page.take_activations() {
        let label = page
            .document()
            .element(act.item)
            .map(|e| e.text.clone())
            .unwrap_or_default();
        println!("activated item {} ({label})", act.index);
    }
    log::info!("finished at t={:?}", page.now());
}
