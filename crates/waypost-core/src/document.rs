#![forbid(unsafe_code)]

//! The document collaborator: element handles, measured boxes, and computed
//! style.
//!
//! Waypost never owns the interface it annotates. Everything it knows about
//! the host (where an element is, whether it scrolls, how big the viewport
//! is) comes through the [`Document`] trait, so the placement engine can run
//! against a browser bridge, a native widget tree, or the in-memory
//! `MockDocument` used in tests.

use crate::geometry::{Rect, ScrollPosition, Size};

/// Opaque handle to an element in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Computed `position` of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionMode {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl PositionMode {
    /// Relative and sticky elements establish a reference frame for offsets.
    #[inline]
    pub const fn is_positioned_frame(self) -> bool {
        matches!(self, Self::Relative | Self::Sticky)
    }
}

/// Computed `overflow` on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
}

impl Overflow {
    /// `auto` and `scroll` make a container scrollable.
    #[inline]
    pub const fn is_scrollable(self) -> bool {
        matches!(self, Self::Auto | Self::Scroll)
    }
}

/// The subset of computed style the placement engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComputedStyle {
    pub position: PositionMode,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
}

impl ComputedStyle {
    /// Scrollable on either axis.
    #[inline]
    pub const fn is_scrollable(&self) -> bool {
        self.overflow_x.is_scrollable() || self.overflow_y.is_scrollable()
    }
}

/// Read-only view of the host document.
///
/// Implementations must never fail: an element that is detached, hidden, or
/// unknown reports a zero-sized box, default style, and no parent.
pub trait Document {
    /// The document body. Offsets default to this frame.
    fn body(&self) -> ElementId;

    /// Parent element, `None` at the root or for detached elements.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Viewport-relative border box (`getBoundingClientRect` semantics).
    fn bounding_box(&self, element: ElementId) -> Rect;

    /// Computed style of the element.
    fn computed_style(&self, element: ElementId) -> ComputedStyle;

    /// Scroll offset of the element's own content.
    fn scroll_position(&self, element: ElementId) -> ScrollPosition;

    /// Page scroll offsets.
    fn page_scroll(&self) -> ScrollPosition;

    /// Current viewport dimensions. Read on every placement pass.
    fn viewport_size(&self) -> Size;

    /// Resolve a selector to the first matching element.
    fn query_selector(&self, selector: &str) -> Option<ElementId>;

    /// Whether the element is attached to the document.
    fn is_connected(&self, element: ElementId) -> bool;

    /// Read an attribute value.
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// All elements carrying `name`, in document order.
    fn elements_with_attribute(&self, name: &str) -> Vec<ElementId>;

    /// Walk the ancestor chain starting at the element's parent.
    fn ancestors(&self, element: ElementId) -> Ancestors<'_, Self>
    where
        Self: Sized,
    {
        Ancestors {
            document: self,
            next: self.parent(element),
        }
    }

    /// The element or one of its ancestors is `position: fixed`.
    fn is_fixed(&self, element: ElementId) -> bool
    where
        Self: Sized,
    {
        if self.computed_style(element).position == PositionMode::Fixed {
            return true;
        }
        self.ancestors(element)
            .any(|ancestor| self.computed_style(ancestor).position == PositionMode::Fixed)
    }
}

/// Iterator over an element's ancestors, nearest first.
pub struct Ancestors<'a, D: Document + ?Sized> {
    document: &'a D,
    next: Option<ElementId>,
}

impl<D: Document + ?Sized> Iterator for Ancestors<'_, D> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.next?;
        self.next = self.document.parent(current);
        Some(current)
    }
}

impl<D: Document + ?Sized> Document for &D {
    fn body(&self) -> ElementId {
        (**self).body()
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        (**self).parent(element)
    }

    fn bounding_box(&self, element: ElementId) -> Rect {
        (**self).bounding_box(element)
    }

    fn computed_style(&self, element: ElementId) -> ComputedStyle {
        (**self).computed_style(element)
    }

    fn scroll_position(&self, element: ElementId) -> ScrollPosition {
        (**self).scroll_position(element)
    }

    fn page_scroll(&self) -> ScrollPosition {
        (**self).page_scroll()
    }

    fn viewport_size(&self) -> Size {
        (**self).viewport_size()
    }

    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        (**self).query_selector(selector)
    }

    fn is_connected(&self, element: ElementId) -> bool {
        (**self).is_connected(element)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        (**self).attribute(element, name)
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<ElementId> {
        (**self).elements_with_attribute(name)
    }
}
