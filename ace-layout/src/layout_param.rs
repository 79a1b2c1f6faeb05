//! Box constraints passed down the render tree.
//!
//! A parent hands each child a `LayoutParam` before the child lays out, and
//! the child answers with a `Size`. Children are expected to stay inside the
//! bounds but the parent does not reject a child that doesn't.

use serde::{Deserialize, Serialize};

use crate::geometry::{INFINITE_SIZE, Size};
use crate::properties::FlexDirection;

/// Min/max size bounds for a single layout call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParam {
    pub min_size: Size,
    pub max_size: Size,
}

impl LayoutParam {
    /// Zero min, infinite max.
    pub const UNBOUNDED: Self = Self {
        min_size: Size::ZERO,
        max_size: Size::INFINITE,
    };

    #[inline]
    pub const fn new(min_size: Size, max_size: Size) -> Self {
        Self { min_size, max_size }
    }

    /// Exact size required.
    #[inline]
    pub fn tight(size: Size) -> Self {
        Self {
            min_size: size,
            max_size: size,
        }
    }

    /// Zero min with the given max.
    #[inline]
    pub fn loose(max_size: Size) -> Self {
        Self {
            min_size: Size::ZERO,
            max_size,
        }
    }

    /// Same max, min dropped to zero.
    #[inline]
    pub fn loosen(&self) -> Self {
        Self::loose(self.max_size)
    }

    /// Clamp a size into these bounds. The min bound wins when min > max.
    #[inline]
    pub fn constrain(&self, size: Size) -> Size {
        debug_assert!(!size.width.is_nan(), "NaN width in layout");
        debug_assert!(!size.height.is_nan(), "NaN height in layout");
        Size {
            width: size.width.min(self.max_size.width).max(self.min_size.width),
            height: size.height.min(self.max_size.height).max(self.min_size.height),
        }
    }

    /// Clamp both bounds into `other`.
    ///
    /// The result never has min > max as long as `self` doesn't, because
    /// `constrain` is monotonic.
    #[inline]
    pub fn enforce(&self, other: &LayoutParam) -> Self {
        Self {
            min_size: other.constrain(self.min_size),
            max_size: other.constrain(self.max_size),
        }
    }

    #[inline]
    pub fn is_tight(&self) -> bool {
        self.min_size == self.max_size
    }

    #[inline]
    pub fn has_bounded_width(&self) -> bool {
        self.max_size.width.is_finite()
    }

    #[inline]
    pub fn has_bounded_height(&self) -> bool {
        self.max_size.height.is_finite()
    }

    #[inline]
    pub fn max_main(&self, direction: FlexDirection) -> f64 {
        self.max_size.main(direction)
    }

    #[inline]
    pub fn max_cross(&self, direction: FlexDirection) -> f64 {
        self.max_size.cross(direction)
    }

    /// Clamp `value` into the min/max range of the cross axis.
    #[inline]
    pub fn clamp_cross(&self, direction: FlexDirection, value: f64) -> f64 {
        value
            .min(self.max_size.cross(direction))
            .max(self.min_size.cross(direction))
    }

    /// Clamp `value` into the min/max range of the main axis.
    #[inline]
    pub fn clamp_main(&self, direction: FlexDirection, value: f64) -> f64 {
        value
            .min(self.max_size.main(direction))
            .max(self.min_size.main(direction))
    }

    /// Biggest finite size satisfying the bounds (infinite axes become 0).
    #[inline]
    pub fn biggest(&self) -> Size {
        Size {
            width: if self.max_size.width < INFINITE_SIZE { self.max_size.width } else { 0.0 },
            height: if self.max_size.height < INFINITE_SIZE { self.max_size.height } else { 0.0 },
        }
    }
}

impl Default for LayoutParam {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
