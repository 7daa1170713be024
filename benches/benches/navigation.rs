// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_dropdown::navigation::{NavCommand, next_index, search_by_char};

fn gen_labels(n: usize) -> Vec<String> {
    // Every label starts with one of 26 letters, so a search visits ~n/26 labels per match.
    (0..n)
        .map(|i| {
            let first = char::from(b'a' + (i % 26) as u8);
            format!("{first}{i:05} item")
        })
        .collect()
}

fn bench_next_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_index");
    for &len in &[8_usize, 256, 4096] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("cycle_next", len), &len, |b, &len| {
            b.iter(|| {
                let mut cur = None;
                for _ in 0..len {
                    cur = next_index(cur, NavCommand::Next, black_box(len));
                }
                cur
            });
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_by_char");
    for &len in &[8_usize, 256, 4096] {
        let labels = gen_labels(len);
        group.bench_with_input(BenchmarkId::new("hit", len), &labels, |b, labels| {
            b.iter(|| search_by_char(labels, black_box(Some(0)), black_box('z')));
        });
        group.bench_with_input(BenchmarkId::new("miss", len), &labels, |b, labels| {
            b.iter(|| search_by_char(labels, black_box(Some(0)), black_box('#')));
        });
        let upper: Vec<String> = labels.iter().map(|l| l.to_uppercase()).collect();
        group.bench_with_input(BenchmarkId::new("case_fold", len), &upper, |b, labels| {
            b.iter(|| search_by_char(labels, black_box(None), black_box('m')));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_next_index, bench_search);
criterion_main!(benches);
