#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are CSS pixels. Positions may be negative (an anchor scrolled
//! above the viewport has a negative viewport box), so everything is `f64`.

/// A rectangle for anchor boxes, overlay boxes, and viewport bounds.
///
/// Origin at top-left; `x` grows rightwards and `y` downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Dimensions of the rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Translate by the given deltas.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow the rectangle by `amount` on every side.
    #[must_use]
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            (self.width + amount * 2.0).max(0.0),
            (self.height + amount * 2.0).max(0.0),
        )
    }

    /// Whether `other` lies fully inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// The empty size. Overlays report this before they are painted.
    pub const ZERO: Size = Size::new(0.0, 0.0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Scroll position of a scroll container or of the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    pub top: f64,
    pub left: f64,
}

impl ScrollPosition {
    /// Create a scroll position.
    #[inline]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// The resolved box of an anchor element.
///
/// `top`/`left` are relative to whichever reference frame produced them
/// (document, positioned scroll container, or fixed viewport). The
/// `absolute_*` fields are always document-relative.
///
/// # Invariants
///
/// 1. `bottom == top + height` and `right == left + width`.
/// 2. `absolute_bottom == absolute_top + height` and
///    `absolute_right == absolute_left + width`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub bottom: f64,
    pub right: f64,
    pub absolute_top: f64,
    pub absolute_left: f64,
    pub absolute_bottom: f64,
    pub absolute_right: f64,
}

impl Offset {
    /// Build an offset from frame-relative and document-relative origins.
    pub fn new(top: f64, left: f64, size: Size, absolute_top: f64, absolute_left: f64) -> Self {
        Self {
            top,
            left,
            width: size.width,
            height: size.height,
            bottom: top + size.height,
            right: left + size.width,
            absolute_top,
            absolute_left,
            absolute_bottom: absolute_top + size.height,
            absolute_right: absolute_left + size.width,
        }
    }

    /// An offset whose frame-relative and absolute origins coincide.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.y, rect.x, rect.size(), rect.y, rect.x)
    }

    /// Anchor dimensions.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Frame-relative box.
    #[inline]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    /// Document-relative box.
    #[inline]
    pub const fn absolute_rect(&self) -> Rect {
        Rect::new(self.absolute_left, self.absolute_top, self.width, self.height)
    }

    /// Document-relative horizontal center.
    #[inline]
    pub fn absolute_center_x(&self) -> f64 {
        self.absolute_left + self.width / 2.0
    }
}
