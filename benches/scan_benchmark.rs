//! Reveal scan and trigger evaluation benchmarks.
//!
//! A scan walks the whole document three times (marked, sections, cards) and a
//! scroll frame re-checks every unfired trigger, so both should stay linear in
//! page size.
//!
//! Run with: cargo bench --bench scan_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use folio_motion::model::{
    AnimationKind, AnimationSpec, Document, Element, Rect, Tag, Viewport,
};
use folio_motion::reveal::RevealAnimationController;

/// A page of `sections` sections, each holding a marked heading and a grid of
/// four cards.
fn generate_page(sections: usize) -> Document {
    let mut doc = Document::new(Viewport::new(1280.0, 800.0));
    let body = doc.body();
    for s in 0..sections {
        let top = s as f64 * 1000.0;
        let section = doc.append(body, Element::new(Tag::Section).rect(Rect::block(top, 1000.0)));
        let kind = AnimationKind::ALL[s % AnimationKind::ALL.len()];
        doc.append(
            section,
            Element::new(Tag::Div)
                .animate(AnimationSpec::new(kind, 0.1))
                .rect(Rect::block(top, 100.0)),
        );
        let grid = doc.append(
            section,
            Element::new(Tag::Div).class("grid").rect(Rect::block(top + 200.0, 800.0)),
        );
        for c in 0..4 {
            doc.append(
                grid,
                Element::new(Tag::Div).rect(Rect::block(top + 200.0 + c as f64 * 200.0, 200.0)),
            );
        }
    }
    doc
}

/// Benchmark the full scan (initialize plus the settle-delay frame).
fn benchmark_scan_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_scan");

    for sections in [10, 100, 1_000] {
        let doc = generate_page(sections);
        group.bench_with_input(BenchmarkId::new("scan", sections), &doc, |b, doc| {
            b.iter(|| {
                let mut doc = doc.clone();
                let mut reveal = RevealAnimationController::default();
                reveal.initialize(&doc, Duration::ZERO);
                black_box(reveal.advance(&mut doc, Duration::from_millis(100)))
            });
        });
    }

    group.finish();
}

/// Benchmark one scroll frame after binding, with most triggers still armed.
fn benchmark_scroll_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_scroll_frame");

    for sections in [10, 100, 1_000] {
        let mut doc = generate_page(sections);
        let mut reveal = RevealAnimationController::default();
        reveal.initialize(&doc, Duration::ZERO);
        reveal.advance(&mut doc, Duration::from_millis(100));

        group.bench_function(BenchmarkId::new("frame", sections), |b| {
            b.iter(|| {
                reveal.notify_scroll();
                black_box(reveal.advance(&mut doc, Duration::from_millis(116)))
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5));
    targets = benchmark_scan_scaling, benchmark_scroll_frame
}
criterion_main!(benches);
