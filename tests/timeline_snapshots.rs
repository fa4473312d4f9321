//! Timeline snapshots for the landing page fixture.
//!
//! Replays `fixtures/landing.json` (hero, about, two-card grid) through a
//! fixed scroll script and pins the exact event sequence.

use std::path::PathBuf;
use std::time::Duration;

use folio_motion::model::PageFixture;
use folio_motion::reveal::RevealTiming;
use folio_motion::simulate::{self, Resize, ScrollScript};

fn landing() -> folio_motion::model::Document {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/landing.json");
    PageFixture::load(&path)
        .expect("fixture should load")
        .build()
        .expect("fixture should build")
}

fn script(resize: Option<Resize>) -> ScrollScript {
    ScrollScript {
        step_px: 200.0,
        frames: 14,
        frame_interval: Duration::from_millis(100),
        resize,
    }
}

#[test]
fn landing_scroll_through() {
    let mut doc = landing();
    let timeline = simulate::run(&mut doc, &script(None), RevealTiming::default());

    insta::assert_snapshot!(timeline.to_string(), @r"
    t=0.000s section hero
    t=0.100s bound #1 fadeIn marked delay=0.00
    t=0.100s bound #3 slideUp section delay=0.10
    t=0.100s bound #5 slideUp card delay=0.00
    t=0.100s bound #6 slideUp card delay=0.10
    t=0.100s fired #1 fadeIn start=0.100s
    t=0.100s fired #3 slideUp start=0.200s
    t=0.100s nav hidden
    t=0.400s section about
    t=0.500s fired #5 slideUp start=0.500s
    t=0.500s fired #6 slideUp start=0.600s
    t=1.100s completed #1
    t=1.200s completed #3
    t=1.300s completed #5
    t=1.400s completed #6
    final scroll 1200
    ");
}

#[test]
fn landing_without_scrolling_reveals_only_the_fold() {
    let mut doc = landing();
    let mut still = script(None);
    still.step_px = 0.0;
    let timeline = simulate::run(&mut doc, &still, RevealTiming::default());

    let hero = doc.get_by_id("hero");
    assert_eq!(timeline.fired().into_iter().map(Some).collect::<Vec<_>>(), vec![hero]);
    assert_eq!(timeline.final_scroll, 0.0);
}

#[test]
fn landing_resize_to_tall_viewport_reveals_everything() {
    let mut doc = landing();
    let mut still = script(Some(Resize {
        frame: 2,
        width: 1000.0,
        height: 2000.0,
    }));
    still.step_px = 0.0;
    let timeline = simulate::run(&mut doc, &still, RevealTiming::default());
    let lines: Vec<String> = timeline.entries.iter().map(ToString::to_string).collect();

    assert!(lines.contains(&"t=0.200s resize 1000x2000".to_string()));
    // the tall viewport's trigger line sits at 1700px, past the grid top
    assert_eq!(timeline.fired().len(), 4);
}
