//! Headless document tree.
//!
//! Stands in for the live page: an arena of nodes in document order with the
//! attributes the controllers read (tag, classes, tab index, animation marker,
//! layout), plus the page-level state they write (focus, inline visual
//! overrides, body scroll lock, scroll position).
//!
//! Removing a node only detaches it. Its slot stays in the arena so that any
//! `NodeId` still held elsewhere resolves to "not attached" instead of to an
//! unrelated node.

use super::animation::{AnimationSpec, VisualState};
use super::identifiers::NodeId;
use super::scroll_lock::ScrollLockManager;

/// Element tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `<body>`
    Body,
    /// `<section>`
    Section,
    /// `<div>`
    Div,
    /// `<button>`
    Button,
    /// `<a>`
    Anchor,
    /// `<input>`
    Input,
    /// `<select>`
    Select,
    /// `<textarea>`
    TextArea,
    /// Any other tag, lowercased.
    Other(String),
}

impl Tag {
    /// Parse an HTML tag name. Unknown names become `Other`.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "body" => Self::Body,
            "section" => Self::Section,
            "div" => Self::Div,
            "button" => Self::Button,
            "a" => Self::Anchor,
            "input" => Self::Input,
            "select" => Self::Select,
            "textarea" => Self::TextArea,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Layout box in document coordinates (pixels from the top-left of the page).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Box from its edges and size.
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Full-width block at `top` with the given height.
    pub fn block(top: f64, height: f64) -> Self {
        Self::new(top, 0.0, 0.0, height)
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Document loading state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    /// Still loading. Scans wait for ready.
    Loading,
    /// Fully loaded.
    #[default]
    Complete,
}

/// Visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Vertical scroll offset of the page.
    pub scroll_y: f64,
}

impl Viewport {
    /// Viewport of the given size, scrolled to the top.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }
}

/// Attributes of an element, built before insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element tag.
    pub tag: Tag,
    /// `id` attribute.
    pub id: Option<String>,
    /// Class list.
    pub classes: Vec<String>,
    /// Explicit tab index.
    pub tab_index: Option<i32>,
    /// Link target, for anchors.
    pub href: Option<String>,
    /// Entrance animation marker.
    pub animation: Option<AnimationSpec>,
    /// Layout box.
    pub rect: Rect,
}

impl Element {
    /// Bare element with no attributes.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            tab_index: None,
            href: None,
            animation: None,
            rect: Rect::default(),
        }
    }

    /// Set the `id` attribute.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add whitespace-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    /// Set an explicit tab index.
    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    /// Set the link target.
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Attach an animation marker.
    pub fn animate(mut self, spec: AnimationSpec) -> Self {
        self.animation = Some(spec);
        self
    }

    /// Set the layout box.
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Whether the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Keyboard-reachable by Tab: buttons, links with href, form fields and
    /// explicit tab indices. A tab index of -1 always removes the element.
    pub fn is_focusable(&self) -> bool {
        if self.tab_index == Some(-1) {
            return false;
        }
        match self.tag {
            Tag::Button | Tag::Input | Tag::Select | Tag::TextArea => true,
            Tag::Anchor if self.href.is_some() => true,
            _ => self.tab_index.is_some(),
        }
    }
}

/// A node in the document arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Authored attributes.
    pub element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
    inline: Option<VisualState>,
}

impl Node {
    /// Parent node, `None` for the body.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Inline visual override, `None` when the authored style applies.
    pub fn inline_style(&self) -> Option<VisualState> {
        self.inline
    }
}

/// The page: node arena, viewport, focus, readiness and body scroll lock.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    ready: ReadyState,
    viewport: Viewport,
    active: Option<NodeId>,
    body_lock: ScrollLockManager,
}

impl Document {
    /// Empty, fully loaded document with a `<body>` root.
    pub fn new(viewport: Viewport) -> Self {
        let body = Node {
            element: Element::new(Tag::Body),
            parent: None,
            children: Vec::new(),
            attached: true,
            inline: None,
        };
        Self {
            nodes: vec![body],
            root: NodeId::new(0),
            ready: ReadyState::Complete,
            viewport,
            active: None,
            body_lock: ScrollLockManager::new(),
        }
    }

    /// Root node. It is never detached.
    pub fn body(&self) -> NodeId {
        self.root
    }

    /// Append `element` as the last child of `parent`.
    ///
    /// Appending under a detached parent yields a detached node.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let attached = self.is_attached(parent);
        self.nodes.push(Node {
            element,
            parent: Some(parent),
            children: Vec::new(),
            attached,
            inline: None,
        });
        if let Some(p) = self.nodes.get_mut(parent.index()) {
            p.children.push(id);
        }
        id
    }

    /// Detach `node` and its subtree. The body cannot be removed.
    ///
    /// If focus was inside the subtree it falls back to nothing, as a browser
    /// returns focus to the body.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.root || !self.is_attached(node) {
            return;
        }
        let subtree = self.subtree(node);
        for id in &subtree {
            self.nodes[id.index()].attached = false;
        }
        if let Some(parent) = self.nodes[node.index()].parent {
            self.nodes[parent.index()].children.retain(|c| *c != node);
        }
        if self.active.is_some_and(|a| subtree.contains(&a)) {
            self.active = None;
        }
    }

    /// Whether `node` is still in the tree.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.nodes.get(node.index()).is_some_and(|n| n.attached)
    }

    /// Arena slot for `node`, attached or not.
    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.index())
    }

    /// Attributes of `node`.
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.node(node).map(|n| &n.element)
    }

    /// First attached node with the given `id` attribute.
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|n| self.nodes[n.index()].element.id.as_deref() == Some(id))
    }

    /// Whether `node` is `ancestor` or lies beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(Node::parent);
        }
        false
    }

    /// Attached descendants of `root` in document order, `root` excluded.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        if !self.is_attached(root) {
            return Vec::new();
        }
        let mut out = self.subtree(root);
        out.remove(0);
        out
    }

    /// Every attached node below the body, in document order.
    pub fn document_order(&self) -> Vec<NodeId> {
        self.descendants(self.root)
    }

    /// Elements carrying an explicit animation marker.
    pub fn marked(&self) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|n| self.nodes[n.index()].element.animation.is_some())
            .collect()
    }

    /// Top-level page sections.
    pub fn sections(&self) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|n| self.nodes[n.index()].element.tag == Tag::Section)
            .collect()
    }

    /// Card-like elements: any class containing `card`, or a `div` directly
    /// inside a `grid` container.
    pub fn cards(&self) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|n| self.is_card(*n))
            .collect()
    }

    fn is_card(&self, node: NodeId) -> bool {
        let n = &self.nodes[node.index()];
        if n.element.classes.iter().any(|c| c.contains("card")) {
            return true;
        }
        n.element.tag == Tag::Div
            && n
                .parent
                .and_then(|p| self.element(p))
                .is_some_and(|p| p.has_class("grid"))
    }

    /// Tab-reachable elements inside `root`, in document order.
    pub fn focusable_within(&self, root: NodeId) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.nodes[n.index()].element.is_focusable())
            .collect()
    }

    /// Focused element, `None` when the body has focus.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// Move focus to `node`. Returns `false` (and leaves focus alone) when the
    /// node is not attached.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !self.is_attached(node) {
            return false;
        }
        self.active = Some(node);
        true
    }

    /// Drop focus back to the body.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// Inline override on `node`, if any.
    pub fn inline_style(&self, node: NodeId) -> Option<VisualState> {
        self.node(node).and_then(Node::inline_style)
    }

    /// Write or clear an inline override. Detached nodes are ignored.
    pub fn set_inline_style(&mut self, node: NodeId, state: Option<VisualState>) {
        if self.is_attached(node) {
            self.nodes[node.index()].inline = state;
        }
    }

    /// Layout box of `node`.
    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.element(node).map(|e| e.rect)
    }

    /// Update the layout box of a node, e.g. after a content swap.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            n.element.rect = rect;
        }
    }

    /// Loading state.
    pub fn ready_state(&self) -> ReadyState {
        self.ready
    }

    /// Set the loading state.
    pub fn set_ready_state(&mut self, ready: ReadyState) {
        self.ready = ready;
    }

    /// Current viewport, including the scroll offset.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Change viewport dimensions, keeping the scroll offset in range.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.viewport.scroll_y = self.viewport.scroll_y.min(self.max_scroll());
    }

    /// Height of the laid-out page: the lowest bottom edge of any attached node.
    pub fn document_height(&self) -> f64 {
        self.document_order()
            .into_iter()
            .map(|n| self.nodes[n.index()].element.rect.bottom())
            .fold(self.nodes[self.root.index()].element.rect.bottom(), f64::max)
    }

    /// Furthest the page can scroll.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    /// Scroll the page to `y`, clamped to the scrollable range.
    ///
    /// Ignored while the body scroll lock is held.
    pub fn scroll_to(&mut self, y: f64) {
        if self.body_lock.is_locked() {
            return;
        }
        self.viewport.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    /// Body scroll lock.
    pub fn scroll_lock(&self) -> &ScrollLockManager {
        &self.body_lock
    }

    /// Mutable access to the body scroll lock.
    pub fn scroll_lock_mut(&mut self) -> &mut ScrollLockManager {
        &mut self.body_lock
    }

    /// Preorder walk of `root`'s subtree including `root`.
    fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.index()].children.iter().rev().copied());
        }
        out
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
