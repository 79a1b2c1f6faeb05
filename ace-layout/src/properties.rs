//! Declarative layout attributes: directions, alignments and sizing modes.

use serde::{Deserialize, Serialize};

/// Which geometric axis is "main" for a flex container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexDirection {
    /// Children flow left to right.
    #[default]
    Row,
    /// Children flow top to bottom.
    Column,
    /// Children flow right to left.
    RowReverse,
    /// Children flow bottom to top.
    ColumnReverse,
}

impl FlexDirection {
    /// Whether the main axis is horizontal.
    #[inline]
    pub fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    /// Whether the first child sits at the top/left edge of the main axis.
    #[inline]
    pub fn is_start_top_left(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::Column)
    }
}

/// Alignment along either axis of a flex container.
///
/// Main-axis distribution uses `FlexStart` through `SpaceEvenly`; cross-axis
/// alignment uses `FlexStart`, `Center`, `FlexEnd`, `Stretch` and `Baseline`.
/// `Auto` is only meaningful as a FlexItem's align-self, where it defers to
/// the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexAlign {
    Auto,
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    Stretch,
    Baseline,
}

/// How a flex container sizes itself along its main axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainAxisSize {
    /// Shrink-wrap to the children.
    Min,
    /// Fill the incoming max constraint.
    #[default]
    Max,
}

/// How a flex container sizes itself along its cross axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossAxisSize {
    /// Largest child cross extent.
    #[default]
    Min,
    /// Fill the incoming max constraint.
    Max,
}

/// Which text metric a baseline query refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Ideographic,
}

/// Nine-point anchor used to place stack children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackAlignment {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl StackAlignment {
    /// `(x, y)` factors applied to the free space around a child.
    pub fn factors(self) -> (f64, f64) {
        match self {
            StackAlignment::TopLeft => (0.0, 0.0),
            StackAlignment::TopCenter => (0.5, 0.0),
            StackAlignment::TopRight => (1.0, 0.0),
            StackAlignment::CenterLeft => (0.0, 0.5),
            StackAlignment::Center => (0.5, 0.5),
            StackAlignment::CenterRight => (1.0, 0.5),
            StackAlignment::BottomLeft => (0.0, 1.0),
            StackAlignment::BottomCenter => (0.5, 1.0),
            StackAlignment::BottomRight => (1.0, 1.0),
        }
    }
}

/// How a stack derives its own size and the constraint given to children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackFit {
    /// Children are laid out loosely; the stack wraps the largest one.
    #[default]
    Keep,
    /// The stack fills the max constraint and forces every child to it.
    Stretch,
    /// Children receive the stack's own constraint unchanged.
    Inherit,
    /// The first child alone decides the stack size.
    FirstChild,
}

/// Paint-time clipping policy. Has no effect on layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    #[default]
    Clip,
    Observable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_axes() {
        assert!(FlexDirection::Row.is_row());
        assert!(FlexDirection::RowReverse.is_row());
        assert!(!FlexDirection::Column.is_row());
        assert!(FlexDirection::Column.is_start_top_left());
        assert!(!FlexDirection::ColumnReverse.is_start_top_left());
    }

    #[test]
    fn test_stack_alignment_factors() {
        assert_eq!(StackAlignment::TopLeft.factors(), (0.0, 0.0));
        assert_eq!(StackAlignment::Center.factors(), (0.5, 0.5));
        assert_eq!(StackAlignment::BottomRight.factors(), (1.0, 1.0));
        assert_eq!(StackAlignment::CenterRight.factors(), (1.0, 0.5));
        assert_eq!(StackAlignment::BottomCenter.factors(), (0.5, 1.0));
    }

    #[test]
    fn test_serde_names() {
        let align: FlexAlign = serde_json::from_str("\"space_between\"").unwrap();
        assert_eq!(align, FlexAlign::SpaceBetween);
        let fit: StackFit = serde_json::from_str("\"first_child\"").unwrap();
        assert_eq!(fit, StackFit::FirstChild);
    }
}
