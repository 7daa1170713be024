// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_dom::{Document, DropdownMarkup, Page, insert_dropdown};
use understory_dropdown::DropdownConfig;
use understory_dropdown::types::Key;

const LABELS: [&str; 6] = ["Apple", "Banana", "Cherry", "Date", "Elderberry", "Fig"];

/// A page with `n` dropdowns laid out in a grid of 150x40 triggers.
fn gen_page(n: usize) -> (Page, Vec<DropdownMarkup>) {
    let config = DropdownConfig::default();
    let mut doc = Document::new(Size::new(1920.0, 100_000.0));
    let body = doc.body();
    let markup = (0..n)
        .map(|i| {
            let x = (i % 10) as f64 * 180.0;
            let y = (i / 10) as f64 * 300.0;
            insert_dropdown(
                &mut doc,
                body,
                "Menu",
                &LABELS,
                Rect::new(x, y, x + 150.0, y + 40.0),
                &config,
            )
        })
        .collect();
    (Page::with_config(doc, config), markup)
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    for &n in &[1_usize, 16, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(gen_page(n)));
        });
    }
    group.finish();
}

fn bench_outside_click(c: &mut Criterion) {
    // Every document click runs one containment walk per instance.
    let mut group = c.benchmark_group("toggle_then_outside_click");
    for &n in &[1_usize, 16, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || gen_page(n),
                |(mut page, markup)| {
                    page.click(markup[n / 2].trigger);
                    page.click(page.document().body());
                    page
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_keyboard_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyboard_session");
    for &n in &[1_usize, 16, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || gen_page(n),
                |(mut page, markup)| {
                    page.focus(markup[0].trigger);
                    for key in [Key::ArrowDown, Key::ArrowDown, Key::Char('f'), Key::End] {
                        page.key(key);
                    }
                    page.key(Key::Enter);
                    page.settle();
                    page.take_activations()
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_scan,
    bench_outside_click,
    bench_keyboard_session
);
criterion_main!(benches);
