#![forbid(unsafe_code)]

//! In-memory [`Document`] for tests.
//!
//! Elements are laid out in document coordinates; [`Document::bounding_box`]
//! derives the viewport box by subtracting page scroll and the scroll offset
//! of every scrollable ancestor, the way a browser would. Fixed elements keep
//! their stored box as-is.
//!
//! Cloning a `MockDocument` shares the same tree, so a test can keep a handle
//! to resize or scroll while the code under test owns another.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::document::{ComputedStyle, Document, ElementId, Overflow, PositionMode};
use crate::geometry::{Rect, ScrollPosition, Size};

/// Description of one element inserted into a [`MockDocument`].
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    rect: Rect,
    style: ComputedStyle,
    scroll: ScrollPosition,
    selector: Option<String>,
    attributes: BTreeMap<String, String>,
}

impl MockElement {
    /// Element laid out at `rect` (document coordinates).
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    /// Selector this element answers to in [`Document::query_selector`].
    #[must_use]
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set the computed `position`.
    #[must_use]
    pub fn position(mut self, position: PositionMode) -> Self {
        self.style.position = position;
        self
    }

    /// Set overflow on both axes.
    #[must_use]
    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.style.overflow_x = overflow;
        self.style.overflow_y = overflow;
        self
    }

    /// Initial content scroll.
    #[must_use]
    pub fn scroll(mut self, top: f64, left: f64) -> Self {
        self.scroll = ScrollPosition::new(top, left);
        self
    }

    /// Attach an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ElementId>,
    connected: bool,
    element: MockElement,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
    viewport: Size,
    page_scroll: ScrollPosition,
}

/// Shared in-memory document tree.
#[derive(Debug, Clone)]
pub struct MockDocument {
    inner: Arc<RwLock<Tree>>,
}

impl MockDocument {
    /// Document with an empty body sized to the viewport.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let body = Node {
            parent: None,
            connected: true,
            element: MockElement::new(Rect::from_size(viewport)).selector("body"),
        };
        Self {
            inner: Arc::new(RwLock::new(Tree {
                nodes: vec![body],
                viewport,
                page_scroll: ScrollPosition::default(),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Tree> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tree> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert `element` as the last child of `parent`.
    pub fn insert(&self, parent: ElementId, element: MockElement) -> ElementId {
        let mut tree = self.write();
        let id = ElementId(tree.nodes.len() as u64);
        tree.nodes.push(Node {
            parent: Some(parent),
            connected: true,
            element,
        });
        id
    }

    /// Insert a plain element under the body.
    pub fn add(&self, rect: Rect) -> ElementId {
        let body = self.body();
        self.insert(body, MockElement::new(rect))
    }

    /// Resize the viewport.
    pub fn set_viewport(&self, viewport: Size) {
        self.write().viewport = viewport;
    }

    /// Scroll the page.
    pub fn set_page_scroll(&self, top: f64, left: f64) {
        self.write().page_scroll = ScrollPosition::new(top, left);
    }

    /// Scroll an element's content.
    pub fn set_scroll(&self, element: ElementId, top: f64, left: f64) {
        if let Some(node) = self.write().nodes.get_mut(element.0 as usize) {
            node.element.scroll = ScrollPosition::new(top, left);
        }
    }

    /// Move or resize an element.
    pub fn set_rect(&self, element: ElementId, rect: Rect) {
        if let Some(node) = self.write().nodes.get_mut(element.0 as usize) {
            node.element.rect = rect;
        }
    }

    /// Detach an element from the document.
    pub fn detach(&self, element: ElementId) {
        if let Some(node) = self.write().nodes.get_mut(element.0 as usize) {
            node.connected = false;
        }
    }

    fn with_node<R>(&self, element: ElementId, f: impl FnOnce(&Node) -> R) -> Option<R> {
        self.read().nodes.get(element.0 as usize).map(f)
    }

    fn attached(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            match self.with_node(id, |node| (node.connected, node.parent)) {
                Some((true, parent)) => current = parent,
                _ => return false,
            }
        }
        true
    }
}

impl Document for MockDocument {
    fn body(&self) -> ElementId {
        ElementId(0)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.with_node(element, |node| node.parent).flatten()
    }

    fn bounding_box(&self, element: ElementId) -> Rect {
        if !self.attached(element) {
            return Rect::default();
        }
        let Some(rect) = self.with_node(element, |node| node.element.rect) else {
            return Rect::default();
        };
        if self.is_fixed(element) {
            return rect;
        }
        let page = self.page_scroll();
        let (dy, dx) = self
            .ancestors(element)
            .filter(|ancestor| self.computed_style(*ancestor).is_scrollable())
            .map(|ancestor| self.scroll_position(ancestor))
            .fold((page.top, page.left), |(top, left), scroll| {
                (top + scroll.top, left + scroll.left)
            });
        rect.translate(-dx, -dy)
    }

    fn computed_style(&self, element: ElementId) -> ComputedStyle {
        self.with_node(element, |node| node.element.style)
            .unwrap_or_default()
    }

    fn scroll_position(&self, element: ElementId) -> ScrollPosition {
        self.with_node(element, |node| node.element.scroll)
            .unwrap_or_default()
    }

    fn page_scroll(&self) -> ScrollPosition {
        self.read().page_scroll
    }

    fn viewport_size(&self) -> Size {
        self.read().viewport
    }

    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        let tree = self.read();
        tree.nodes
            .iter()
            .position(|node| node.connected && node.element.selector.as_deref() == Some(selector))
            .map(|idx| ElementId(idx as u64))
    }

    fn is_connected(&self, element: ElementId) -> bool {
        self.attached(element)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.with_node(element, |node| node.element.attributes.get(name).cloned())
            .flatten()
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<ElementId> {
        let tree = self.read();
        tree.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.element.attributes.contains_key(name))
            .map(|(idx, _)| ElementId(idx as u64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_subtracts_page_scroll() {
        let doc = MockDocument::new(Size::new(1000.0, 800.0));
        let el = doc.add(Rect::new(100.0, 500.0, 50.0, 20.0));
        doc.set_page_scroll(200.0, 0.0);
        assert_eq!(doc.bounding_box(el), Rect::new(100.0, 300.0, 50.0, 20.0));
    }

    #[test]
    fn bounding_box_subtracts_container_scroll() {
        let doc = MockDocument::new(Size::new(1000.0, 800.0));
        let body = doc.body();
        let pane = doc.insert(
            body,
            MockElement::new(Rect::new(0.0, 100.0, 400.0, 300.0)).overflow(Overflow::Auto),
        );
        let el = doc.insert(pane, MockElement::new(Rect::new(10.0, 600.0, 50.0, 20.0)));
        doc.set_scroll(pane, 450.0, 0.0);
        assert_eq!(doc.bounding_box(el), Rect::new(10.0, 150.0, 50.0, 20.0));
    }

    #[test]
    fn fixed_elements_ignore_scroll() {
        let doc = MockDocument::new(Size::new(1000.0, 800.0));
        let body = doc.body();
        let el = doc.insert(
            body,
            MockElement::new(Rect::new(0.0, 0.0, 100.0, 40.0)).position(PositionMode::Fixed),
        );
        doc.set_page_scroll(500.0, 0.0);
        assert_eq!(doc.bounding_box(el), Rect::new(0.0, 0.0, 100.0, 40.0));
        assert!(doc.is_fixed(el));
    }

    #[test]
    fn detached_elements_have_empty_boxes() {
        let doc = MockDocument::new(Size::new(1000.0, 800.0));
        let body = doc.body();
        let parent = doc.insert(body, MockElement::new(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let child = doc.insert(
            parent,
            MockElement::new(Rect::new(0.0, 0.0, 10.0, 10.0)).selector("#child"),
        );
        doc.detach(parent);
        assert!(!doc.is_connected(child));
        assert!(doc.bounding_box(child).is_empty());
    }

    #[test]
    fn attribute_lookup_in_document_order() {
        let doc = MockDocument::new(Size::new(1000.0, 800.0));
        let body = doc.body();
        let a = doc.insert(body, MockElement::default().attr("data-intro", "a"));
        let _plain = doc.add(Rect::default());
        let b = doc.insert(body, MockElement::default().attr("data-intro", "b"));
        assert_eq!(doc.elements_with_attribute("data-intro"), vec![a, b]);
        assert_eq!(doc.attribute(b, "data-intro").as_deref(), Some("b"));
        assert_eq!(doc.attribute(b, "data-step"), None);
    }

    #[test]
    fn clones_share_the_tree() {
        let doc = MockDocument::new(Size::new(1000.0, 800.0));
        let handle = doc.clone();
        handle.set_viewport(Size::new(320.0, 640.0));
        assert_eq!(doc.viewport_size(), Size::new(320.0, 640.0));
    }
}
