//! Axis-agnostic flex distribution math.
//!
//! Nothing in here touches the render tree. The flex pass feeds measured
//! extents and factors in and gets flex deltas and gap sizes back.

use crate::geometry::{great_not_equal, near_zero};
use crate::node::NodeId;
use crate::properties::FlexAlign;

/// Grow/shrink totals collected during the first item-mode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct FlexItemProperties {
    pub total_grow: f64,
    /// Sum of `shrink × first-pass main extent`.
    pub total_shrink: f64,
    pub last_grow_child: Option<NodeId>,
    pub last_shrink_child: Option<NodeId>,
}

impl FlexItemProperties {
    /// Record one flex item measured at `main`.
    pub fn record(&mut self, id: NodeId, grow: f64, shrink: f64, main: f64) {
        if great_not_equal(grow, 0.0) {
            self.last_grow_child = Some(id);
        }
        if great_not_equal(shrink, 0.0) {
            self.last_shrink_child = Some(id);
        }
        self.total_grow += grow;
        self.total_shrink += shrink * main;
    }
}

/// Hands out flex deltas for a fixed remaining space.
///
/// Positive remaining space is shared by grow factor, negative by
/// `shrink × main`. The last growing (or shrinking) child receives whatever
/// the others left over, so deltas always sum to the remaining space.
#[derive(Debug)]
pub(crate) struct SpaceDistributor {
    remain: f64,
    per_flex: f64,
    growing: bool,
    last: Option<NodeId>,
    allocated: f64,
}

impl SpaceDistributor {
    pub fn new(remain: f64, props: &FlexItemProperties) -> Self {
        let growing = great_not_equal(remain, 0.0);
        let (total, last) = if growing {
            (props.total_grow, props.last_grow_child)
        } else {
            (props.total_shrink, props.last_shrink_child)
        };
        let per_flex = if near_zero(total) { 0.0 } else { remain / total };
        Self {
            remain,
            per_flex,
            growing,
            last,
            allocated: 0.0,
        }
    }

    /// Flex delta for `id`, whose current main extent is `main`.
    pub fn share(&mut self, id: NodeId, grow: f64, shrink: f64, main: f64) -> f64 {
        let delta = if self.last == Some(id) {
            self.remain - self.allocated
        } else if self.growing {
            self.per_flex * grow
        } else {
            self.per_flex * shrink * main
        };
        self.allocated += delta;
        delta
    }
}

/// Leading offset and between-gap for `remain` free main-axis space.
///
/// A positive fixed `space` replaces the alignment policy. `count` is the
/// number of children with a valid size.
pub(crate) fn leading_and_between(align: FlexAlign, remain: f64, count: usize, space: f64) -> (f64, f64) {
    if great_not_equal(space, 0.0) {
        return (0.0, space);
    }
    if near_zero(remain) {
        return (0.0, 0.0);
    }
    let n = count as f64;
    match align {
        FlexAlign::FlexEnd => (remain, 0.0),
        FlexAlign::Center => (remain / 2.0, 0.0),
        FlexAlign::SpaceBetween if count > 1 => (0.0, remain / (n - 1.0)),
        FlexAlign::SpaceAround if count > 0 => {
            let between = remain / n;
            (between / 2.0, between)
        }
        FlexAlign::SpaceEvenly => {
            let between = remain / (n + 1.0);
            (between, between)
        }
        _ => (0.0, 0.0),
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_splits_by_factor() {
        let mut props = FlexItemProperties::default();
        props.record(NodeId(1), 2.0, 0.0, 100.0);
        props.record(NodeId(2), 2.0, 0.0, 200.0);

        let mut dist = SpaceDistributor::new(780.0, &props);
        assert_eq!(dist.share(NodeId(1), 2.0, 0.0, 100.0), 390.0);
        assert_eq!(dist.share(NodeId(2), 2.0, 0.0, 200.0), 390.0);
    }

    #[test]
    fn test_shrink_weighted_by_extent() {
        let mut props = FlexItemProperties::default();
        for id in 1..=3 {
            props.record(NodeId(id), 0.0, 2.0, 1000.0);
        }
        assert_eq!(props.total_shrink, 6000.0);

        let mut dist = SpaceDistributor::new(-756.0, &props);
        let a = dist.share(NodeId(1), 0.0, 2.0, 1000.0);
        let b = dist.share(NodeId(2), 0.0, 2.0, 1000.0);
        let c = dist.share(NodeId(3), 0.0, 2.0, 1000.0);
        assert!((a + 252.0).abs() < 1e-9);
        assert!((b + 252.0).abs() < 1e-9);
        assert!((a + b + c + 756.0).abs() < 1e-9);
    }

    #[test]
    fn test_last_child_takes_remainder() {
        let mut props = FlexItemProperties::default();
        props.record(NodeId(1), 1.0, 0.0, 0.0);
        props.record(NodeId(2), 1.0, 0.0, 0.0);
        props.record(NodeId(3), 1.0, 0.0, 0.0);

        let mut dist = SpaceDistributor::new(100.0, &props);
        let a = dist.share(NodeId(1), 1.0, 0.0, 0.0);
        let b = dist.share(NodeId(2), 1.0, 0.0, 0.0);
        let c = dist.share(NodeId(3), 1.0, 0.0, 0.0);
        assert_eq!(a + b + c, 100.0);
    }

    #[test]
    fn test_no_grow_factor_gives_nothing() {
        let props = FlexItemProperties::default();
        let mut dist = SpaceDistributor::new(300.0, &props);
        assert_eq!(dist.share(NodeId(1), 0.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_leading_and_between() {
        assert_eq!(leading_and_between(FlexAlign::FlexStart, 90.0, 3, 0.0), (0.0, 0.0));
        assert_eq!(leading_and_between(FlexAlign::FlexEnd, 90.0, 3, 0.0), (90.0, 0.0));
        assert_eq!(leading_and_between(FlexAlign::Center, 90.0, 3, 0.0), (45.0, 0.0));
        assert_eq!(leading_and_between(FlexAlign::SpaceBetween, 90.0, 3, 0.0), (0.0, 45.0));
        assert_eq!(leading_and_between(FlexAlign::SpaceAround, 90.0, 3, 0.0), (15.0, 30.0));
        assert_eq!(leading_and_between(FlexAlign::SpaceEvenly, 80.0, 3, 0.0), (20.0, 20.0));
    }

    #[test]
    fn test_single_child_space_between_stays_at_start() {
        assert_eq!(leading_and_between(FlexAlign::SpaceBetween, 90.0, 1, 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_fixed_space_overrides_alignment() {
        assert_eq!(leading_and_between(FlexAlign::Center, 90.0, 3, 12.0), (0.0, 12.0));
    }
}
