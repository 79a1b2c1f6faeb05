//! Geometry primitives for the layout engine.
//!
//! `Size` and `Offset` are passive value types. Every container in the tree
//! consumes them, and the float comparison helpers at the bottom of this
//! module are what the flex math uses instead of raw `==` on `f64`.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::properties::FlexDirection;

/// Marker for an unbounded extent.
pub const INFINITE_SIZE: f64 = f64::INFINITY;

/// Tolerance used by the `near_*` comparison family.
const EPSILON: f64 = 0.001;

/// An offset relative to the parent's content origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        near_zero(self.x) && near_zero(self.y)
    }

    /// Build an offset from main/cross coordinates of `direction`.
    #[inline]
    pub fn from_axes(direction: FlexDirection, main: f64, cross: f64) -> Self {
        if direction.is_row() {
            Self { x: main, y: cross }
        } else {
            Self { x: cross, y: main }
        }
    }
}

impl From<(f64, f64)> for Offset {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Offset {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A 2D size. Negative dimensions mean "unresolved".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const INFINITE: Self = Self {
        width: INFINITE_SIZE,
        height: INFINITE_SIZE,
    };

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are non-negative.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }

    #[inline]
    pub fn is_width_infinite(&self) -> bool {
        self.width.is_infinite()
    }

    #[inline]
    pub fn is_height_infinite(&self) -> bool {
        self.height.is_infinite()
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.is_width_infinite() || self.is_height_infinite()
    }

    /// Extent along the main axis of `direction`.
    #[inline]
    pub fn main(&self, direction: FlexDirection) -> f64 {
        if direction.is_row() { self.width } else { self.height }
    }

    /// Extent along the cross axis of `direction`.
    #[inline]
    pub fn cross(&self, direction: FlexDirection) -> f64 {
        if direction.is_row() { self.height } else { self.width }
    }

    /// Build a size from main/cross extents of `direction`.
    #[inline]
    pub fn from_axes(direction: FlexDirection, main: f64, cross: f64) -> Self {
        if direction.is_row() {
            Self::new(main, cross)
        } else {
            Self::new(cross, main)
        }
    }

    /// Approximate equality within the layout epsilon.
    #[inline]
    pub fn near_eq(&self, other: &Size) -> bool {
        near_equal(self.width, other.width) && near_equal(self.height, other.height)
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, mostly used for dumps and paint clipping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn from_offset_size(offset: Offset, size: Size) -> Self {
        Self {
            x: offset.x,
            y: offset.y,
            width: size.width,
            height: size.height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }
}

// =========================================================================
// Float comparison
// =========================================================================

#[inline]
pub fn near_equal(a: f64, b: f64) -> bool {
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= EPSILON
}

#[inline]
pub fn near_zero(value: f64) -> bool {
    value.abs() <= EPSILON
}

#[inline]
pub fn great_not_equal(a: f64, b: f64) -> bool {
    a > b && !near_equal(a, b)
}

#[inline]
pub fn less_not_equal(a: f64, b: f64) -> bool {
    a < b && !near_equal(a, b)
}

#[inline]
pub fn less_or_equal(a: f64, b: f64) -> bool {
    a < b || near_equal(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_helpers() {
        let size = Size::new(100.0, 50.0);
        assert_eq!(size.main(FlexDirection::Row), 100.0);
        assert_eq!(size.cross(FlexDirection::Row), 50.0);
        assert_eq!(size.main(FlexDirection::Column), 50.0);
        assert_eq!(size.cross(FlexDirection::ColumnReverse), 100.0);
        assert_eq!(Size::from_axes(FlexDirection::Column, 10.0, 20.0), Size::new(20.0, 10.0));
        assert_eq!(Offset::from_axes(FlexDirection::RowReverse, 10.0, 20.0), Offset::new(10.0, 20.0));
    }

    #[test]
    fn test_validity() {
        assert!(Size::ZERO.is_valid());
        assert!(!Size::new(-1.0, 10.0).is_valid());
        assert!(Size::INFINITE.is_infinite());
        assert!(!Size::new(1.0, 1.0).is_infinite());
    }

    #[test]
    fn test_near_comparisons() {
        assert!(near_equal(1.0, 1.0004));
        assert!(!near_equal(1.0, 1.01));
        assert!(near_zero(-0.0005));
        assert!(great_not_equal(2.0, 1.0));
        assert!(!great_not_equal(1.0002, 1.0));
        assert!(less_not_equal(1.0, 2.0));
        assert!(less_or_equal(1.0, 1.0));
        assert!(near_equal(INFINITE_SIZE, INFINITE_SIZE));
    }

    #[test]
    fn test_rect_containment() {
        let outer = Rect::from_offset_size(Offset::ZERO, Size::new(100.0, 100.0));
        let inner = Rect::from_offset_size(Offset::new(10.0, 10.0), Size::new(50.0, 50.0));
        let spill = Rect::from_offset_size(Offset::new(60.0, 0.0), Size::new(50.0, 50.0));
        assert!(outer.contains_rect(&inner));
        assert!(!outer.contains_rect(&spill));
    }
}
