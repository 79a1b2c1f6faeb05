//! RenderFlex: one-dimensional layout along a row or column.
//!
//! A flex pass runs in one of three modes, picked per pass from the
//! children's attributes:
//!
//! - **Item mode**: measure every child, then share the free main-axis space
//!   by grow factor (or take the overflow back by `shrink × extent`).
//! - **Weight mode** (see `magic`): children with a flex weight split the
//!   main axis proportionally; low display-index groups are hidden when a
//!   share cannot satisfy a child's minimum.
//! - **Display-index mode** (see `magic`): groups are admitted from the
//!   highest display index down while they fit.
//!
//! All per-pass bookkeeping lives in `FlexPass`, which is rebuilt on every
//! call, so laying out the same tree twice gives the same geometry.

pub(crate) mod baseline;
pub(crate) mod distribute;
pub mod item;
mod magic;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::component::FlexComponent;
use crate::geometry::{Offset, Size, great_not_equal, less_or_equal, near_zero};
use crate::layout_param::LayoutParam;
use crate::node::NodeId;
use crate::properties::{CrossAxisSize, FlexAlign, MainAxisSize};
use crate::tree::RenderTree;

use self::baseline::BaselineProperties;
use self::distribute::{FlexItemProperties, SpaceDistributor, leading_and_between};
use self::item::FlexItemNode;

/// Which algorithm the last pass used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexLayoutMode {
    #[default]
    Item,
    Weight,
    DisplayIndex,
}

/// Flex container attributes plus the outcome of the last pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexNode {
    pub attrs: FlexComponent,
    layout_mode: FlexLayoutMode,
    child_overflow: bool,
}

impl FlexNode {
    pub fn new(attrs: FlexComponent) -> Self {
        Self {
            attrs,
            layout_mode: FlexLayoutMode::Item,
            child_overflow: false,
        }
    }

    pub(crate) fn update(&mut self, attrs: &FlexComponent) {
        self.attrs = attrs.clone();
    }

    pub fn layout_mode(&self) -> FlexLayoutMode {
        self.layout_mode
    }

    /// Children needed more main-axis space than the container got.
    pub fn is_child_overflow(&self) -> bool {
        self.child_overflow
    }
}

/// A child grouped by display index, with the param computed for it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MagicNode {
    pub node: NodeId,
    pub inner: LayoutParam,
}

pub(crate) fn perform_layout(tree: &mut RenderTree, id: NodeId, param: LayoutParam) -> Size {
    let Some(flex) = tree.flex(id) else {
        return param.constrain(Size::ZERO);
    };
    let attrs = flex.attrs.clone();
    let children = tree.children(id).to_vec();
    if children.is_empty() {
        return param.constrain(Size::ZERO);
    }

    let mut pass = FlexPass::new(tree, attrs, param, children);
    let size = pass.run();
    let (mode, overflow) = (pass.mode, pass.child_overflow);
    tracing::trace!(node = id.raw(), ?mode, overflow, "flex pass");

    if let Some(flex) = tree.flex_mut(id) {
        flex.layout_mode = mode;
        flex.child_overflow = overflow;
    }
    size
}

/// Scratch state for a single flex layout pass.
pub(crate) struct FlexPass<'t> {
    tree: &'t mut RenderTree,
    attrs: FlexComponent,
    param: LayoutParam,
    children: Vec<NodeId>,
    mode: FlexLayoutMode,
    main_size: f64,
    cross_size: f64,
    /// Sum of `main + space` over measured children (trailing space included
    /// until the self size is determined).
    allocated: f64,
    valid_count: usize,
    total_weight: f64,
    max_display_index: i32,
    magic_nodes: BTreeMap<i32, Vec<MagicNode>>,
    magic_weights: BTreeMap<i32, f64>,
    display_nodes: HashSet<NodeId>,
    child_overflow: bool,
}

impl<'t> FlexPass<'t> {
    fn new(tree: &'t mut RenderTree, attrs: FlexComponent, param: LayoutParam, children: Vec<NodeId>) -> Self {
        Self {
            tree,
            attrs,
            param,
            children,
            mode: FlexLayoutMode::Item,
            main_size: 0.0,
            cross_size: 0.0,
            allocated: 0.0,
            valid_count: 0,
            total_weight: 0.0,
            max_display_index: 0,
            magic_nodes: BTreeMap::new(),
            magic_weights: BTreeMap::new(),
            display_nodes: HashSet::new(),
            child_overflow: false,
        }
    }

    fn run(&mut self) -> Size {
        self.travel_children_flex_props();
        let main_infinite = self.param.max_main(self.attrs.direction).is_infinite();

        match self.mode {
            FlexLayoutMode::Weight if main_infinite => {
                tracing::warn!("flex weight needs a bounded main axis, using item layout");
                self.mode = FlexLayoutMode::Item;
                self.perform_layout_in_item_mode();
            }
            FlexLayoutMode::Weight => self.perform_layout_in_weight_mode(),
            FlexLayoutMode::DisplayIndex => self.perform_layout_in_index_mode(),
            FlexLayoutMode::Item => self.perform_layout_in_item_mode(),
        }
        Size::from_axes(self.attrs.direction, self.main_size, self.cross_size)
    }

    /// Reset visibility, group children by display index and pick the mode.
    fn travel_children_flex_props(&mut self) {
        for &child in &self.children {
            self.tree.set_visible(child, true);
            let (weight, index) = match self.tree.flex_item(child) {
                Some(item) => (item.weight(), item.display_index()),
                None => (0.0, 0),
            };
            self.max_display_index = self.max_display_index.max(index);
            self.magic_nodes.entry(index).or_default().push(MagicNode {
                node: child,
                inner: LayoutParam::UNBOUNDED,
            });
            *self.magic_weights.entry(index).or_insert(0.0) += weight;
            self.total_weight += weight;
        }

        self.mode = if great_not_equal(self.total_weight, 0.0) {
            FlexLayoutMode::Weight
        } else if self.max_display_index > 1 {
            FlexLayoutMode::DisplayIndex
        } else {
            FlexLayoutMode::Item
        };
        tracing::debug!(mode = ?self.mode, children = self.children.len(), "flex layout mode");
    }

    // =====================================================================
    // Item mode
    // =====================================================================

    fn perform_layout_in_item_mode(&mut self) {
        let loose = self.param.loosen();
        let mut props = FlexItemProperties::default();
        let mut baseline = BaselineProperties::default();

        for child in self.children.clone() {
            match self.tree.flex_item(child).cloned() {
                Some(item) => self.layout_flex_item(child, &item, &mut props),
                None => {
                    self.tree.layout(child, loose);
                }
            }
            self.resize_by_item(child);
            self.check_size_validity(child);
            self.check_baseline_properties(child, &mut baseline);
        }

        let mut main_axis_size = self.attrs.main_axis_size;
        if self.param.max_main(self.attrs.direction).is_infinite() {
            // Nothing to grow into; only stretch on the cross axis.
            if self.attrs.cross_axis_align == FlexAlign::Stretch {
                for child in self.children.clone() {
                    if self.self_align(child) == FlexAlign::Stretch {
                        let param = self.make_stretch_inner_layout_param(child);
                        self.tree.layout(child, param);
                    }
                }
            }
            main_axis_size = MainAxisSize::Min;
        } else {
            self.resize_items(&props, &mut baseline);
        }

        self.determine_self_size(main_axis_size);
        self.determine_items_position(&baseline);
    }

    fn layout_flex_item(&mut self, child: NodeId, item: &FlexItemNode, props: &mut FlexItemProperties) {
        let direction = self.attrs.direction;
        let inner = if great_not_equal(item.basis(), 0.0) {
            let param = self.make_layout_param_with_limit(item.basis(), item.basis(), false);
            item.apply_aspect_ratio(param, direction, self.param.max_cross(direction))
        } else {
            self.param.loosen()
        };
        self.tree.layout(child, inner);
        props.record(child, item.grow(), item.shrink(), self.main_of(child));
    }

    /// Second item-mode pass: share remaining space and stretch.
    fn resize_items(&mut self, props: &FlexItemProperties, baseline: &mut BaselineProperties) {
        let available = self.param.max_main(self.attrs.direction);
        let content = self.allocated - self.attrs.space;
        let remain = if self.attrs.main_axis_size == MainAxisSize::Min && available >= content {
            0.0
        } else {
            available - content
        };

        let stretch = self.attrs.cross_axis_align == FlexAlign::Stretch;
        let mut distributor = SpaceDistributor::new(remain, props);
        for child in self.children.clone() {
            match self.tree.flex_item(child).cloned() {
                Some(item) => {
                    let main = self.main_of(child);
                    let flex_size = distributor.share(child, item.grow(), item.shrink(), main);
                    self.relayout_flex_item(child, &item, flex_size, baseline);
                }
                None if stretch => {
                    let param = self.make_stretch_inner_layout_param(child);
                    self.tree.layout(child, param);
                }
                None => {}
            }
        }
    }

    /// Lay `child` out again at `main + flex_size`.
    fn relayout_flex_item(
        &mut self,
        child: NodeId,
        item: &FlexItemNode,
        flex_size: f64,
        baseline: &mut BaselineProperties,
    ) {
        let can_stretch = self.self_align(child) == FlexAlign::Stretch;
        if near_zero(flex_size) && !can_stretch {
            return;
        }
        let direction = self.attrs.direction;
        let main = self.main_of(child);
        let extent = (flex_size + main).max(0.0);
        self.allocated -= main + self.attrs.space;

        let param = self.make_constrained_layout_param(extent, &item.constraints(), can_stretch, true);
        let param = item.apply_aspect_ratio(param, direction, self.param.max_cross(direction));
        self.tree.layout(child, param);

        self.resize_by_item(child);
        self.check_baseline_properties(child, baseline);
    }

    // =====================================================================
    // Layout params
    // =====================================================================

    /// Main axis in `[min_main, max_main]`, cross axis free up to the
    /// container max, or pinned to the stretch limit.
    pub(crate) fn make_layout_param_with_limit(&self, min_main: f64, max_main: f64, stretch: bool) -> LayoutParam {
        let direction = self.attrs.direction;
        let (min_cross, max_cross) = if stretch {
            let limit = self.stretch_cross_limit();
            (limit, limit)
        } else {
            (0.0, self.param.max_cross(direction))
        };
        LayoutParam::new(
            Size::from_axes(direction, min_main, min_cross),
            Size::from_axes(direction, max_main, max_cross),
        )
    }

    /// Tight main extent clamped by an item's own bounds. A non-positive
    /// extent yields a loose param unless `support_zero` allows a zero main.
    pub(crate) fn make_constrained_layout_param(
        &self,
        main_extent: f64,
        constraints: &LayoutParam,
        stretch: bool,
        support_zero: bool,
    ) -> LayoutParam {
        let mut param = if great_not_equal(main_extent, 0.0) || (support_zero && near_zero(main_extent)) {
            self.make_layout_param_with_limit(main_extent, main_extent, stretch)
        } else {
            LayoutParam::loose(self.param.max_size)
        };
        param.max_size = constraints.constrain(param.max_size);
        param.min_size = constraints.constrain(param.min_size);
        param
    }

    pub(crate) fn make_stretch_inner_layout_param(&self, child: NodeId) -> LayoutParam {
        let size = Size::from_axes(self.attrs.direction, self.main_of(child), self.stretch_cross_limit());
        LayoutParam::tight(size)
    }

    fn stretch_cross_limit(&self) -> f64 {
        let max_cross = self.param.max_cross(self.attrs.direction);
        if self.attrs.stretch_to_parent && max_cross.is_finite() {
            max_cross
        } else {
            self.cross_size
        }
    }

    // =====================================================================
    // Bookkeeping
    // =====================================================================

    #[inline]
    pub(crate) fn main_of(&self, child: NodeId) -> f64 {
        self.tree.layout_size(child).main(self.attrs.direction)
    }

    #[inline]
    pub(crate) fn cross_of(&self, child: NodeId) -> f64 {
        self.tree.layout_size(child).cross(self.attrs.direction)
    }

    /// Align-self of `child`, with `Auto` resolved to the container's policy.
    pub(crate) fn self_align(&self, child: NodeId) -> FlexAlign {
        match self.tree.flex_item(child).map(FlexItemNode::align_self) {
            Some(align) if align != FlexAlign::Auto => align,
            _ => self.attrs.cross_axis_align,
        }
    }

    pub(crate) fn resize_by_item(&mut self, child: NodeId) {
        let mut main = self.main_of(child);
        if !main.is_finite() {
            main = 0.0;
        }
        self.cross_size = self.cross_size.max(self.cross_of(child));
        self.allocated += main + self.attrs.space;
    }

    pub(crate) fn check_size_validity(&mut self, child: NodeId) {
        if self.tree.layout_size(child).is_valid() {
            self.valid_count += 1;
            self.display_nodes.insert(child);
        }
    }

    /// Lay out every child not admitted in this pass as an invisible zero box.
    pub(crate) fn layout_hidden_nodes(&mut self) {
        for child in self.children.clone() {
            if self.display_nodes.contains(&child) {
                continue;
            }
            self.tree.set_visible(child, false);
            self.tree.layout(child, LayoutParam::tight(Size::ZERO));
            // An item's own min bounds must not resurrect a hidden child.
            self.tree.set_layout_size(child, Size::ZERO);
        }
    }

    // =====================================================================
    // Self size and positioning
    // =====================================================================

    pub(crate) fn determine_self_size(&mut self, main_axis_size: MainAxisSize) {
        self.allocated -= self.attrs.space;
        let mut max_main = self.param.max_main(self.attrs.direction);
        if max_main.is_infinite() {
            max_main = self.allocated;
        }
        let size = match main_axis_size {
            MainAxisSize::Min => self.get_constrained_size(self.allocated),
            MainAxisSize::Max => self.get_constrained_size(max_main),
        };
        self.set_self_size(size);
    }

    pub(crate) fn set_self_size(&mut self, size: Size) {
        let direction = self.attrs.direction;
        self.main_size = size.main(direction);
        self.cross_size = size.cross(direction);
        self.child_overflow = great_not_equal(self.allocated, self.main_size);
    }

    /// Self size for a main extent, cross extent per the cross sizing rules.
    pub(crate) fn get_constrained_size(&self, main: f64) -> Size {
        let direction = self.attrs.direction;
        let fill_cross = self.attrs.cross_axis_size == CrossAxisSize::Max
            || (self.attrs.stretch_to_parent && self.attrs.cross_axis_align == FlexAlign::Stretch);
        let max_cross = self.param.max_cross(direction);
        let cross = if fill_cross && max_cross.is_finite() {
            max_cross
        } else {
            self.cross_size
        };
        self.param.constrain(Size::from_axes(direction, main, cross))
    }

    pub(crate) fn determine_items_position(&mut self, baseline: &BaselineProperties) {
        let remain = (self.main_size - self.allocated).max(0.0);
        let (front, between) =
            leading_and_between(self.attrs.main_axis_align, remain, self.valid_count, self.attrs.space);
        self.place_children(front, between, baseline);
    }

    fn place_children(&mut self, front: f64, between: f64, baseline: &BaselineProperties) {
        let direction = self.attrs.direction;
        let forward = direction.is_start_top_left();
        let mut main_pos = if forward { front } else { self.main_size - front };

        for child in self.children.clone() {
            if !self.tree.is_visible(child) {
                self.tree.set_position(child, Offset::ZERO);
                continue;
            }
            let child_main = self.main_of(child);
            let cross_pos = self.cross_offset(child, baseline);
            if forward {
                self.tree.set_position(child, Offset::from_axes(direction, main_pos, cross_pos));
                main_pos += child_main + between;
            } else {
                self.tree
                    .set_position(child, Offset::from_axes(direction, main_pos - child_main, cross_pos));
                main_pos -= child_main + between;
            }
        }
    }

    fn cross_offset(&self, child: NodeId, baseline: &BaselineProperties) -> f64 {
        let child_cross = self.cross_of(child);
        match self.self_align(child) {
            FlexAlign::FlexEnd => self.cross_size - child_cross,
            FlexAlign::Center => self.cross_size / 2.0 - child_cross / 2.0,
            FlexAlign::Baseline if self.attrs.direction.is_row() => {
                baseline.max_baseline_distance - self.tree.baseline_distance(child, self.attrs.text_baseline)
            }
            _ => 0.0,
        }
    }

    /// Whether the measured content already fills `max_main`.
    #[inline]
    pub(crate) fn is_full(&self, max_main: f64) -> bool {
        less_or_equal(max_main, self.allocated - self.attrs.space)
    }
}
