//! End-to-end overlay scenarios on a laid-out page.
//!
//! A project card opens a detail modal over a page whose sections reveal on
//! scroll. The modal must own focus and scrolling while open and hand both
//! back when it closes, however it closes.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_motion::model::{Document, NodeId, PageFixture};
use folio_motion::overlay::{KeyOutcome, OverlayFocusController};
use folio_motion::reveal::{RevealAnimationController, RevealEvent};

const PAGE: &str = r#"{
    "viewport": { "width": 1280, "height": 800 },
    "body": {
        "tag": "body",
        "children": [
            { "tag": "section", "id": "projects", "top": 0, "height": 1200,
              "children": [
                { "tag": "button", "id": "open-modal", "top": 300, "height": 48 }
              ] },
            { "tag": "section", "id": "contact", "top": 1200, "height": 800 },
            { "tag": "div", "id": "backdrop", "class": "fixed inset-0", "top": 0, "height": 800,
              "children": [
                { "tag": "div", "id": "dialog", "tabindex": -1, "top": 100, "height": 600,
                  "children": [
                    { "tag": "button", "id": "close", "top": 120, "height": 32 },
                    { "tag": "a", "id": "live-demo", "href": "https://example.com", "top": 600, "height": 40 },
                    { "tag": "a", "id": "no-href", "top": 640, "height": 40 },
                    { "tag": "a", "id": "source", "href": "https://example.com/src", "top": 640, "height": 40 }
                  ] }
              ] }
        ]
    }
}"#;

struct Page {
    doc: Document,
    opener: NodeId,
    backdrop: NodeId,
    dialog: NodeId,
}

impl Page {
    fn load() -> Self {
        let doc = PageFixture::from_json(PAGE)
            .and_then(|f| f.build())
            .expect("page fixture should build");
        let id = |name: &str| doc.get_by_id(name).expect(name);
        let (opener, backdrop, dialog) = (id("open-modal"), id("backdrop"), id("dialog"));
        Self {
            doc,
            opener,
            backdrop,
            dialog,
        }
    }

    fn id(&self, name: &str) -> NodeId {
        self.doc.get_by_id(name).expect(name)
    }

    fn overlay(&self, closes: &Rc<RefCell<Vec<&'static str>>>) -> OverlayFocusController {
        let log = Rc::clone(closes);
        OverlayFocusController::new(self.dialog)
            .with_backdrop(self.backdrop)
            .with_close_handler(move || log.borrow_mut().push("closed"))
    }
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

#[test]
fn tab_cycles_only_through_reachable_dialog_controls() {
    let mut page = Page::load();
    let closes = Rc::default();
    let mut overlay = page.overlay(&closes);
    page.doc.focus(page.opener);
    overlay.on_open(&mut page.doc);

    // an anchor without href is skipped
    assert_eq!(
        page.doc.focusable_within(page.dialog),
        vec![page.id("close"), page.id("live-demo"), page.id("source")]
    );

    page.doc.focus(page.id("source"));
    assert_eq!(overlay.handle_keydown(&mut page.doc, press(KeyCode::Tab)), KeyOutcome::Wrapped);
    assert_eq!(page.doc.active_element(), Some(page.id("close")));

    assert_eq!(
        overlay.handle_keydown(&mut page.doc, press(KeyCode::BackTab)),
        KeyOutcome::Wrapped
    );
    assert_eq!(page.doc.active_element(), Some(page.id("source")));
}

#[test]
fn every_close_path_restores_focus_and_scrolling() {
    type CloseWith = fn(&mut OverlayFocusController, &mut Page);
    let paths: [(&str, CloseWith); 3] = [
        ("escape", |o, p| {
            assert_eq!(o.handle_keydown(&mut p.doc, press(KeyCode::Esc)), KeyOutcome::Closed);
        }),
        ("backdrop", |o, p| {
            assert!(o.handle_click(&mut p.doc, p.backdrop));
        }),
        ("close button", |o, p| o.close(&mut p.doc)),
    ];

    for (name, close_with) in paths {
        let mut page = Page::load();
        let closes = Rc::default();
        let mut overlay = page.overlay(&closes);
        page.doc.focus(page.opener);
        overlay.on_open(&mut page.doc);

        page.doc.scroll_to(500.0);
        assert_eq!(page.doc.viewport().scroll_y, 0.0, "{name}: page scrolled while locked");

        close_with(&mut overlay, &mut page);

        assert!(!overlay.is_open(), "{name}");
        assert_eq!(page.doc.active_element(), Some(page.opener), "{name}");
        assert!(!page.doc.scroll_lock().is_locked(), "{name}");
        assert_eq!(*closes.borrow(), vec!["closed"], "{name}");

        page.doc.scroll_to(500.0);
        assert_eq!(page.doc.viewport().scroll_y, 500.0, "{name}");
    }
}

#[test]
fn clicks_inside_the_dialog_do_not_close_it() {
    let mut page = Page::load();
    let closes = Rc::default();
    let mut overlay = page.overlay(&closes);
    overlay.on_open(&mut page.doc);

    for inside in ["dialog", "close", "live-demo"] {
        let target = page.id(inside);
        assert!(!overlay.handle_click(&mut page.doc, target), "{inside}");
    }
    assert!(overlay.is_open());
    assert!(closes.borrow().is_empty());
}

#[test]
fn reveals_wait_while_modal_holds_the_scroll_lock() {
    let mut page = Page::load();
    let closes = Rc::default();
    let mut overlay = page.overlay(&closes);
    let mut reveal = RevealAnimationController::default();
    let contact = page.id("contact");

    reveal.initialize(&page.doc, Duration::ZERO);
    reveal.advance(&mut page.doc, Duration::from_millis(100));
    assert!(reveal.target(contact).is_some_and(|t| !t.has_fired()));

    overlay.on_open(&mut page.doc);
    page.doc.scroll_to(1000.0);
    reveal.notify_scroll();
    reveal.advance(&mut page.doc, Duration::from_millis(200));
    assert!(reveal.target(contact).is_some_and(|t| !t.has_fired()));

    overlay.handle_keydown(&mut page.doc, press(KeyCode::Esc));
    page.doc.scroll_to(1000.0);
    reveal.notify_scroll();
    let events = reveal.advance(&mut page.doc, Duration::from_millis(300));
    assert!(events.iter().any(|e| matches!(
        e,
        RevealEvent::Fired { node, .. } if *node == contact
    )));
}

#[test]
fn removing_the_opener_while_open_leaves_focus_in_place() {
    let mut page = Page::load();
    let closes = Rc::default();
    let mut overlay = page.overlay(&closes);
    page.doc.focus(page.opener);
    overlay.on_open(&mut page.doc);
    page.doc.focus(page.id("close"));

    let projects = page.id("projects");
    page.doc.remove(projects);
    overlay.handle_keydown(&mut page.doc, press(KeyCode::Esc));

    assert!(!page.doc.is_attached(page.opener));
    assert_eq!(page.doc.active_element(), Some(page.id("close")));
    assert!(!page.doc.scroll_lock().is_locked());
}
