//! Baseline alignment bookkeeping for a flex pass.

use crate::geometry::Size;
use crate::node::NodeId;
use crate::properties::FlexAlign;

use super::FlexPass;

/// Extremes of the baseline-aligned children seen so far.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct BaselineProperties {
    pub max_baseline_distance: f64,
    pub max_distance_above_baseline: f64,
    pub max_distance_below_baseline: f64,
}

impl BaselineProperties {
    /// Fold in a child whose baseline sits `distance` below its top edge.
    pub fn include(&mut self, distance: f64, cross: f64) {
        self.max_baseline_distance = self.max_baseline_distance.max(distance);
        self.max_distance_above_baseline = self.max_distance_above_baseline.max(distance);
        self.max_distance_below_baseline = self.max_distance_below_baseline.max(cross - distance);
    }

    /// Cross extent needed to fit every aligned child on a shared baseline.
    pub fn cross_extent(&self) -> f64 {
        self.max_distance_above_baseline + self.max_distance_below_baseline
    }
}

impl FlexPass<'_> {
    pub(crate) fn check_baseline_properties(&mut self, child: NodeId, baseline: &mut BaselineProperties) {
        let container_baseline = self.attrs.cross_axis_align == FlexAlign::Baseline;
        let self_baseline = self
            .tree
            .flex_item(child)
            .is_some_and(|item| item.align_self() == FlexAlign::Baseline);
        if !container_baseline && !self_baseline {
            return;
        }

        let distance = self.tree.baseline_distance(child, self.attrs.text_baseline);
        let cross = self.cross_of(child);
        baseline.include(distance, cross);
        if container_baseline {
            self.cross_size = baseline.cross_extent();
        }
    }
}

/// Highest child baseline: the smallest `baseline + y` over `children`.
pub(crate) fn highest_child_baseline(children: impl Iterator<Item = (f64, f64)>) -> f64 {
    children
        .map(|(child_baseline, y)| child_baseline + y)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

/// Baseline of the first child, or the container height when it has none.
pub(crate) fn first_child_baseline(first: Option<(f64, f64)>, own: Size) -> f64 {
    match first {
        Some((child_baseline, y)) => child_baseline + y,
        None => own.height,
    }
}
