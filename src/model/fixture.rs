//! JSON page fixtures.
//!
//! A fixture describes a laid-out page so the controllers can be replayed
//! without a browser:
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 800 },
//!   "loading": false,
//!   "body": {
//!     "tag": "body",
//!     "children": [
//!       { "tag": "section", "id": "hero", "top": 0, "height": 800,
//!         "animate": { "kind": "fadeIn", "delay": 0.2 } }
//!     ]
//!   }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::animation::{AnimationKind, AnimationSpec};
use super::document::{Document, Element, ReadyState, Rect, Tag, Viewport};
use super::error::FixtureError;
use super::identifiers::NodeId;

/// Root of a fixture file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageFixture {
    /// Viewport size in pixels.
    pub viewport: ViewportFixture,
    /// Start the document in the loading state.
    #[serde(default)]
    pub loading: bool,
    /// Root node. Its children are appended under the body.
    pub body: NodeFixture,
}

/// Viewport size.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportFixture {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

/// `animate` marker on a node.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerFixture {
    /// Marker name such as `slideUp`.
    pub kind: String,
    /// Extra delay in seconds.
    #[serde(default)]
    pub delay: f64,
}

/// One element and its subtree.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeFixture {
    /// Tag name.
    pub tag: String,
    /// `id` attribute.
    #[serde(default)]
    pub id: Option<String>,
    /// Whitespace-separated classes.
    #[serde(default)]
    pub class: Option<String>,
    /// Tab index.
    #[serde(default)]
    pub tabindex: Option<i32>,
    /// Link target.
    #[serde(default)]
    pub href: Option<String>,
    /// Entrance animation marker.
    #[serde(default)]
    pub animate: Option<MarkerFixture>,
    /// Top edge in document coordinates.
    #[serde(default)]
    pub top: f64,
    /// Box height in pixels.
    #[serde(default)]
    pub height: f64,
    /// Left edge.
    #[serde(default)]
    pub left: f64,
    /// Box width in pixels.
    #[serde(default)]
    pub width: f64,
    /// Child nodes in document order.
    #[serde(default)]
    pub children: Vec<NodeFixture>,
}

impl NodeFixture {
    fn to_element(&self) -> Element {
        let mut element = Element::new(Tag::parse(&self.tag)).rect(Rect::new(
            self.top,
            self.left,
            self.width,
            self.height,
        ));
        if let Some(id) = &self.id {
            element = element.id(id.clone());
        }
        if let Some(class) = &self.class {
            element = element.class(class);
        }
        if let Some(index) = self.tabindex {
            element = element.tab_index(index);
        }
        if let Some(href) = &self.href {
            element = element.href(href.clone());
        }
        if let Some(marker) = &self.animate {
            element = element.animate(AnimationSpec::new(
                AnimationKind::from_marker(&marker.kind),
                marker.delay,
            ));
        }
        element
    }
}

impl PageFixture {
    /// Parse a fixture from JSON text.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a fixture file.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let contents = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Build the document. The fixture's root node becomes the body; its own
    /// tag is ignored.
    pub fn build(&self) -> Result<Document, FixtureError> {
        let ViewportFixture { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(FixtureError::InvalidViewport { width, height });
        }
        let mut doc = Document::new(Viewport::new(width, height));
        if self.loading {
            doc.set_ready_state(ReadyState::Loading);
        }
        let body = doc.body();
        for child in &self.body.children {
            append_tree(&mut doc, body, child);
        }
        Ok(doc)
    }
}

fn append_tree(doc: &mut Document, parent: NodeId, node: &NodeFixture) {
    let id = doc.append(parent, node.to_element());
    for child in &node.children {
        append_tree(doc, id, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"{
        "viewport": { "width": 1280, "height": 800 },
        "body": {
            "tag": "body",
            "children": [
                { "tag": "section", "id": "hero", "top": 0, "height": 800,
                  "animate": { "kind": "slideLeft", "delay": 0.3 },
                  "children": [ { "tag": "a", "href": "#about", "top": 600, "height": 40 } ] },
                { "tag": "div", "class": "grid cols-3", "top": 800, "height": 400,
                  "children": [ { "tag": "div", "top": 800, "height": 200 } ] }
            ]
        }
    }"##;

    #[test]
    fn builds_document_in_order() {
        let doc = PageFixture::from_json(PAGE).unwrap().build().unwrap();
        let order = doc.document_order();
        assert_eq!(order.len(), 4);
        assert_eq!(doc.get_by_id("hero"), Some(order[0]));
        assert_eq!(doc.cards(), vec![order[3]]);
        assert_eq!(doc.focusable_within(order[0]), vec![order[1]]);
    }

    #[test]
    fn marker_is_parsed_into_typed_spec() {
        let doc = PageFixture::from_json(PAGE).unwrap().build().unwrap();
        let hero = doc.get_by_id("hero").unwrap();
        let spec = doc.element(hero).unwrap().animation.unwrap();
        assert_eq!(spec.kind, AnimationKind::SlideLeft);
        assert_eq!(spec.delay, 0.3);
    }

    #[test]
    fn loading_flag_sets_ready_state() {
        let json = r#"{ "viewport": { "width": 800, "height": 600 }, "loading": true,
                        "body": { "tag": "body" } }"#;
        let doc = PageFixture::from_json(json).unwrap().build().unwrap();
        assert_eq!(doc.ready_state(), ReadyState::Loading);
    }

    #[test]
    fn zero_viewport_is_rejected() {
        let json = r#"{ "viewport": { "width": 0, "height": 600 }, "body": { "tag": "body" } }"#;
        let err = PageFixture::from_json(json).unwrap().build().unwrap_err();
        assert!(matches!(err, FixtureError::InvalidViewport { .. }));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let json = r#"{ "viewport": { "width": 1, "height": 1 }, "body": { "tag": "body", "colour": "red" } }"#;
        assert!(matches!(
            PageFixture::from_json(json),
            Err(FixtureError::Json(_))
        ));
    }

    #[test]
    fn missing_file_reports_read_error() {
        let err = PageFixture::load(Path::new("/nonexistent/folio/page.json")).unwrap_err();
        assert!(matches!(err, FixtureError::Read { .. }));
    }
}
