//! Integer geometric primitives: points, sizes and rectangles.
//!
//! Window, workspace and screen geometry in NovaDE is pixel-aligned, so every
//! type here is integer based: origins are `i32` (windows may sit partially
//! off-screen), sizes are `u32` (negative extents are rejected before they ever
//! reach these types).

use serde::{Deserialize, Serialize};

/// An integer point with `i32` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointInt {
    pub x: i32,
    pub y: i32,
}

impl PointInt {
    /// Creates a new `PointInt`.
    pub const fn new(x: i32, y: i32) -> Self {
        PointInt { x, y }
    }
}

/// An integer size with `u32` dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SizeInt {
    pub width: u32,
    pub height: u32,
}

impl SizeInt {
    /// Creates a new `SizeInt`.
    pub const fn new(width: u32, height: u32) -> Self {
        SizeInt { width, height }
    }

    /// Checks if the area is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Converts signed dimensions, returning `None` if either is negative.
    pub fn from_signed(width: i32, height: i32) -> Option<Self> {
        if width < 0 || height < 0 {
            return None;
        }
        Some(SizeInt::new(width as u32, height as u32))
    }
}

/// An integer rectangle with `i32` origin and `u32` size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RectInt {
    /// The origin point (top-left corner) of the rectangle.
    pub origin: PointInt,
    /// The size (width and height) of the rectangle.
    pub size: SizeInt,
}

impl RectInt {
    /// Creates a new `RectInt` from an origin point and a size.
    pub const fn new(origin: PointInt, size: SizeInt) -> Self {
        RectInt { origin, size }
    }

    /// Creates a new `RectInt` from individual coordinate and dimension values.
    pub const fn from_coords(x: i32, y: i32, width: u32, height: u32) -> Self {
        RectInt {
            origin: PointInt::new(x, y),
            size: SizeInt::new(width, height),
        }
    }

    /// Returns the x-coordinate of the rectangle's origin.
    pub fn x(&self) -> i32 { self.origin.x }
    /// Returns the y-coordinate of the rectangle's origin.
    pub fn y(&self) -> i32 { self.origin.y }
    /// Returns the width of the rectangle.
    pub fn width(&self) -> u32 { self.size.width }
    /// Returns the height of the rectangle.
    pub fn height(&self) -> u32 { self.size.height }

    /// Calculates the x-coordinate of the right edge.
    pub fn right(&self) -> i32 {
        self.origin.x.saturating_add(self.size.width as i32)
    }

    /// Calculates the y-coordinate of the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.origin.y.saturating_add(self.size.height as i32)
    }

    /// Checks if a point is contained within the rectangle.
    /// Edges are inclusive for left/top, exclusive for right/bottom.
    pub fn contains_point(&self, point: PointInt) -> bool {
        point.x >= self.x() && point.x < self.right() &&
        point.y >= self.y() && point.y < self.bottom()
    }

    /// Checks if this rectangle intersects with another `RectInt`.
    pub fn intersects(&self, other: &RectInt) -> bool {
        self.x() < other.right() && self.right() > other.x() &&
        self.y() < other.bottom() && self.bottom() > other.y()
    }

    /// Calculates the intersection of this rectangle with another `RectInt`.
    /// Returns `None` if they do not intersect.
    pub fn intersection(&self, other: &RectInt) -> Option<RectInt> {
        let x1 = self.x().max(other.x());
        let y1 = self.y().max(other.y());
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x1 < x2 && y1 < y2 {
            Some(RectInt::from_coords(x1, y1, (x2 - x1) as u32, (y2 - y1) as u32))
        } else {
            None
        }
    }

    /// Checks if the rectangle has zero width or height.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Returns a copy moved to a new origin, keeping the size.
    pub fn with_origin(&self, x: i32, y: i32) -> Self {
        RectInt::new(PointInt::new(x, y), self.size)
    }

    /// Returns a copy with a new size, keeping the origin.
    pub fn with_size(&self, width: u32, height: u32) -> Self {
        RectInt::new(self.origin, SizeInt::new(width, height))
    }

    /// Translates the rectangle by a given delta (dx, dy).
    /// Uses saturating arithmetic to prevent overflow.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        self.with_origin(self.origin.x.saturating_add(dx), self.origin.y.saturating_add(dy))
    }
}
