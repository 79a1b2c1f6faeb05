//! Weight and display-index layout for flex containers.
//!
//! Both modes work on children grouped by display index (ascending, insertion
//! order inside a group). Children left out of a pass are laid out as
//! invisible zero boxes.

use crate::geometry::{great_not_equal, less_or_equal};
use crate::layout_param::LayoutParam;
use crate::node::NodeId;
use crate::properties::{FlexAlign, MainAxisSize};

use super::{FlexPass, MagicNode};
use super::baseline::BaselineProperties;
use super::distribute::{FlexItemProperties, SpaceDistributor};

impl FlexPass<'_> {
    // =====================================================================
    // Weight mode
    // =====================================================================

    pub(super) fn perform_layout_in_weight_mode(&mut self) {
        let direction = self.attrs.direction;
        let max_main = self.param.max_main(direction);
        let mut baseline = BaselineProperties::default();

        let mut fixed_main = 0.0;
        for child in self.children.clone() {
            if self.weight_of(child) > 0.0 {
                continue;
            }
            self.tree.layout(child, self.param);
            fixed_main += self.main_of(child);
            self.resize_by_item(child);
            self.check_size_validity(child);
            self.check_baseline_properties(child, &mut baseline);
        }

        let gaps = self.attrs.space * self.children.len().saturating_sub(1) as f64;
        let remaining = (max_main - fixed_main - gaps).max(0.0);
        self.compute_weighted_params(remaining);

        let groups: Vec<Vec<NodeId>> = self
            .magic_nodes
            .values()
            .map(|group| group.iter().map(|m| m.node).collect())
            .collect();
        let weighted: Vec<MagicNode> = self
            .magic_nodes
            .values()
            .flatten()
            .copied()
            .filter(|m| self.weight_of(m.node) > 0.0)
            .collect();
        for magic in weighted {
            self.tree.layout(magic.node, magic.inner);
            self.tree.set_visible(magic.node, true);
            self.resize_by_item(magic.node);
            self.check_size_validity(magic.node);
            self.check_baseline_properties(magic.node, &mut baseline);
        }

        if self.attrs.cross_axis_align == FlexAlign::Stretch {
            self.relayout_for_stretch_magic_node(&groups);
        }
        self.layout_hidden_nodes();

        self.allocated -= self.attrs.space;
        let size = self.get_constrained_size(max_main);
        self.set_self_size(size);
        self.determine_items_position(&baseline);
    }

    /// Compute each weighted child's param, dropping the lowest display-index
    /// group while some share is smaller than what a child demands.
    fn compute_weighted_params(&mut self, remaining: f64) {
        loop {
            let per_weight = if great_not_equal(self.total_weight, 0.0) {
                remaining / self.total_weight
            } else {
                0.0
            };

            let mut exceeded = false;
            let indices: Vec<i32> = self.magic_nodes.keys().rev().copied().collect();
            'groups: for index in indices {
                let nodes: Vec<NodeId> = self.magic_nodes[&index].iter().map(|m| m.node).collect();
                for (slot, node) in nodes.into_iter().enumerate() {
                    let weight = self.weight_of(node);
                    if weight <= 0.0 {
                        continue;
                    }
                    let share = per_weight * weight;
                    let inner = self.make_weighted_param(node, share);
                    let inner_main = inner.max_size.main(self.attrs.direction);
                    if let Some(group) = self.magic_nodes.get_mut(&index) {
                        group[slot].inner = inner;
                    }
                    if great_not_equal(inner_main, share) {
                        exceeded = true;
                        break 'groups;
                    }
                }
            }

            if !exceeded || self.magic_nodes.len() <= 1 {
                return;
            }
            if let Some((index, _)) = self.magic_nodes.pop_first() {
                let weight = self.magic_weights.get(&index).copied().unwrap_or(0.0);
                self.total_weight -= weight;
                tracing::debug!(display_index = index, weight, "hiding flex group that does not fit");
            }
        }
    }

    fn make_weighted_param(&self, node: NodeId, share: f64) -> LayoutParam {
        let direction = self.attrs.direction;
        match self.tree.flex_item(node) {
            Some(item) => {
                let param = self.make_constrained_layout_param(share, &item.constraints(), false, true);
                item.apply_aspect_ratio(param, direction, self.param.max_cross(direction))
            }
            None => self.make_layout_param_with_limit(share, share, false),
        }
    }

    fn relayout_for_stretch_magic_node(&mut self, groups: &[Vec<NodeId>]) {
        for child in groups.iter().flatten().copied() {
            let main = self.main_of(child);
            let param = match self.tree.flex_item(child) {
                Some(item) => self.make_constrained_layout_param(main, &item.constraints(), true, false),
                None => self.make_layout_param_with_limit(main, main, true),
            };
            self.tree.layout(child, param);
            self.cross_size = self.cross_size.max(self.cross_of(child));
        }
    }

    fn weight_of(&self, child: NodeId) -> f64 {
        self.tree.flex_item(child).map_or(0.0, |item| item.weight())
    }

    // =====================================================================
    // Display-index mode
    // =====================================================================

    pub(super) fn perform_layout_in_index_mode(&mut self) {
        let direction = self.attrs.direction;
        let max_main = self.param.max_main(direction);
        let loose = self.param.loosen();
        let space = self.attrs.space;
        let mut props = FlexItemProperties::default();

        let groups: Vec<(i32, Vec<NodeId>)> = self
            .magic_nodes
            .iter()
            .rev()
            .map(|(index, group)| (*index, group.iter().map(|m| m.node).collect()))
            .collect();

        for (index, group) in groups {
            for &node in &group {
                self.tree.layout(node, loose);
                self.allocated += self.main_of(node) + space;
            }
            if great_not_equal(self.allocated - space, max_main) {
                for &node in &group {
                    self.allocated -= self.main_of(node) + space;
                }
                tracing::debug!(display_index = index, "display index group does not fit");
                break;
            }
            for &node in &group {
                self.check_size_validity(node);
                self.tree.set_visible(node, true);
                if let Some(item) = self.tree.flex_item(node) {
                    let (grow, shrink) = (item.grow(), item.shrink());
                    let main = self.main_of(node);
                    props.record(node, grow, shrink, main);
                }
                self.cross_size = self.cross_size.max(self.cross_of(node));
            }
            if self.is_full(max_main) {
                break;
            }
        }

        if self.attrs.cross_axis_align == FlexAlign::Stretch || great_not_equal(props.total_grow, 0.0) {
            self.relayout_for_stretch_flex_node(&props, max_main);
        }
        self.layout_hidden_nodes();

        self.allocated -= space;
        let main = if self.attrs.main_axis_size == MainAxisSize::Max && max_main.is_finite() {
            max_main
        } else {
            self.allocated
        };
        let size = self.get_constrained_size(main);
        self.set_self_size(size);
        self.determine_items_position(&BaselineProperties::default());
    }

    /// Grow the admitted children into the leftover space and stretch.
    fn relayout_for_stretch_flex_node(&mut self, props: &FlexItemProperties, max_main: f64) {
        let content = self.allocated - self.attrs.space;
        let remain = if max_main.is_finite() && less_or_equal(content, max_main) {
            max_main - content
        } else {
            0.0
        };
        let stretch = self.attrs.cross_axis_align == FlexAlign::Stretch;
        let mut distributor = SpaceDistributor::new(remain, props);
        let mut baseline = BaselineProperties::default();

        for child in self.children.clone() {
            if !self.display_nodes.contains(&child) {
                continue;
            }
            match self.tree.flex_item(child).cloned() {
                Some(item) if great_not_equal(item.grow(), 0.0) => {
                    let main = self.main_of(child);
                    let flex_size = distributor.share(child, item.grow(), item.shrink(), main);
                    self.relayout_flex_item(child, &item, flex_size, &mut baseline);
                }
                Some(item) if stretch => {
                    let main = self.main_of(child);
                    let param = self.make_constrained_layout_param(main, &item.constraints(), true, false);
                    self.tree.layout(child, param);
                }
                None if stretch => {
                    let param = self.make_stretch_inner_layout_param(child);
                    self.tree.layout(child, param);
                }
                _ => {}
            }
        }
    }
}
