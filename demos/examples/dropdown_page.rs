// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Several dropdowns on one page.
//!
//! Scans a document holding three dropdowns (one with broken markup, which is skipped),
//! then drives them with pointer clicks at coordinates.
//!
//! Run:
//! - `RUST_LOG=understory_dropdown=debug cargo run -p understory_demos --example dropdown_page`

use kurbo::{Point, Rect, Size};
use understory_dom::{Document, Element, Page, insert_dropdown};
use understory_dropdown::DropdownConfig;

fn main() {
    env_logger::init();

    let config = DropdownConfig::default();
    let mut doc = Document::new(Size::new(1024.0, 768.0));
    let body = doc.body();
    let fruit = insert_dropdown(
        &mut doc,
        body,
        "Fruit",
        &["Apple", "Banana", "Cherry"],
        Rect::new(0.0, 0.0, 150.0, 40.0),
        &config,
    );
    let color = insert_dropdown(
        &mut doc,
        body,
        "Color",
        &["Red", "Green", "Blue"],
        Rect::new(200.0, 0.0, 350.0, 40.0),
        &config,
    );
    // No menu: logged and skipped by the scan.
    let broken = doc.insert(body, Element::new("div").class(&config.container_class));
    doc.insert(broken, Element::new("button").class(&config.trigger_class));

    let mut page = Page::with_config(doc, config);
    println!("bound {} dropdowns", page.dropdowns().len());

    let report = |page: &Page, step: &str| {
        let states: Vec<String> = page
            .dropdowns()
            .iter()
            .map(|d| format!("{:?}:{}", d.id(), if d.is_open() { "open" } else { "closed" }))
            .collect();
        println!("{step:<28} {}", states.join("  "));
    };

    let center = |page: &Page, el| {
        page.document()
            .element(el)
            .map(|e| e.bounds.center())
            .unwrap_or(Point::ZERO)
    };

    report(&page, "initial");
    let pt = center(&page, fruit.trigger);
    page.click_at(pt);
    report(&page, "click Fruit");
    let pt = center(&page, color.trigger);
    page.click_at(pt);
    report(&page, "click Color");
    let pt = center(&page, color.items[2]);
    page.click_at(pt);
    report(&page, "click Color > Blue");
    page.click_at(Point::new(900.0, 700.0));
    report(&page, "click empty space");

    for act in page.take_activations() {
        println!("activated {:?} item {}", act.dropdown, act.index);
    }
}
