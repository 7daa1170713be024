// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement table.
//!
//! Evaluates the placement decision for a 200px menu at several trigger positions in a
//! 600px viewport, then applies one through a headless document to show the inline styles
//! the widget writes.
//!
//! Run:
//! - `cargo run -p understory_demos --example dropdown_placement`

use kurbo::{Rect, Size};
use understory_dom::{Document, Page, insert_dropdown};
use understory_dropdown::DropdownConfig;
use understory_dropdown::position::place;

fn main() {
    env_logger::init();

    let viewport = 600.0;
    let menu_height = 200.0;
    let margin = DropdownConfig::default().scroll_margin;

    println!("== Placement (viewport {viewport}px, menu {menu_height}px) ==");
    for top in [20.0, 150.0, 350.0, 480.0, 550.0] {
        let trigger = Rect::new(0.0, top, 120.0, top + 40.0);
        let p = place(trigger, menu_height, viewport, margin);
        println!(
            "  trigger y={top:>5}  side={:?}  max_height={:?}",
            p.side, p.max_height
        );
    }

    // A tall menu in a short viewport gets capped and scrolls.
    let labels: Vec<String> = (1..=12).map(|i| format!("Option {i}")).collect();
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
    let config = DropdownConfig::default();
    let mut doc = Document::new(Size::new(800.0, 300.0));
    let body = doc.body();
    let dd = insert_dropdown(
        &mut doc,
        body,
        "Options",
        &labels,
        Rect::new(0.0, 120.0, 160.0, 160.0),
        &config,
    );
    let mut page = Page::with_config(doc, config);
    page.click(dd.trigger);

    let doc = page.document();
    let above = doc.has_class(dd.wrapper, &page.dropdowns().config().above_class);
    println!("== Applied ==");
    println!("  above={above}  style=\"{}\"", doc.style_text(dd.wrapper));
}
