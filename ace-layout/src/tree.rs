//! The render tree arena.
//!
//! Nodes live in a flat `Vec` and refer to each other by `NodeId`. Layout is
//! a recursive walk: a container calls `RenderTree::layout` on each child with
//! the param it computed, then reads the child's size back and sets the
//! child's position.
//!
//! Handles are only meaningful for the tree that issued them. Getters index
//! the arena directly and panic on a handle from another tree.

use crate::component::{
    BoxComponent, Component, FlexComponent, FlexItemComponent, StackComponent, TextComponent,
};
use crate::error::LayoutError;
use crate::flex::baseline::{first_child_baseline, highest_child_baseline};
use crate::flex::item::FlexItemNode;
use crate::flex::{self, FlexNode};
use crate::geometry::{Offset, Size};
use crate::layout_param::LayoutParam;
use crate::node::{NodeId, NodeKind, RenderNode};
use crate::properties::{Overflow, TextBaseline};
use crate::stack::{self, StackNode};

#[derive(Debug, Default, Clone)]
pub struct RenderTree {
    nodes: Vec<RenderNode>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&RenderNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    fn node(&self, id: NodeId) -> &RenderNode {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut RenderNode {
        &mut self.nodes[id.index()]
    }

    // =====================================================================
    // Construction
    // =====================================================================

    /// Create a detached node for `component`.
    ///
    /// The node starts clean: `need_layout` is only raised by a later
    /// `update` or by attaching it under a parent.
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds `u32::MAX` nodes.
    pub fn create_node(&mut self, component: &Component) -> NodeId {
        let raw = u32::try_from(self.nodes.len()).expect("render tree holds at most u32::MAX nodes");
        let id = NodeId(raw);
        self.nodes.push(RenderNode::new(NodeKind::from_component(component)));
        tracing::trace!(node = id.raw(), kind = component.name(), "create node");
        id
    }

    pub fn add_flex(&mut self, attrs: FlexComponent) -> NodeId {
        self.create_node(&Component::Flex(attrs))
    }

    pub fn add_flex_item(&mut self, attrs: FlexItemComponent) -> NodeId {
        self.create_node(&Component::FlexItem(attrs))
    }

    pub fn add_stack(&mut self, attrs: StackComponent) -> NodeId {
        self.create_node(&Component::Stack(attrs))
    }

    pub fn add_box(&mut self, width: f64, height: f64) -> NodeId {
        self.create_node(&Component::Box(BoxComponent::new(width, height)))
    }

    pub fn add_text(&mut self, attrs: TextComponent) -> NodeId {
        self.create_node(&Component::Text(attrs))
    }

    /// Attach `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        let parent_node = self.get(parent).ok_or(LayoutError::UnknownNode(parent))?;
        let child_node = self.get(child).ok_or(LayoutError::UnknownNode(child))?;
        if child_node.parent.is_some() {
            return Err(LayoutError::AlreadyAttached(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(LayoutError::Cycle { parent, child });
        }
        if let Some(limit) = parent_node.kind.child_limit()
            && parent_node.children.len() >= limit
        {
            return Err(LayoutError::ChildRejected {
                parent,
                kind: parent_node.kind.name(),
            });
        }

        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        self.mark_need_layout(parent);
        Ok(())
    }

    /// Whether `ancestor` is `id` itself or lies on its parent chain.
    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.nodes[node_id.index()].parent;
        }
        false
    }

    /// Copy attributes from `component` into an existing node.
    ///
    /// A component of a different kind is rejected and the node is left
    /// exactly as it was.
    pub fn update(&mut self, id: NodeId, component: &Component) -> Result<(), LayoutError> {
        let node = self.nodes.get_mut(id.index()).ok_or(LayoutError::UnknownNode(id))?;
        if !node.kind.apply(component) {
            return Err(LayoutError::TypeMismatch {
                node: id,
                expected: node.kind.name(),
                found: component.name(),
            });
        }
        self.mark_need_layout(id);
        Ok(())
    }

    /// Flag `id` and all of its ancestors for layout.
    pub fn mark_need_layout(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node_mut(node_id);
            node.need_layout = true;
            current = node.parent;
        }
    }

    // =====================================================================
    // Layout
    // =====================================================================

    /// Lay out the tree under `root` inside a viewport.
    pub fn perform_layout(&mut self, root: NodeId, viewport: Size) -> Size {
        let size = self.layout(root, LayoutParam::loose(viewport));
        self.set_position(root, Offset::ZERO);
        tracing::debug!(
            root = root.raw(),
            width = size.width,
            height = size.height,
            "layout pass complete"
        );
        size
    }

    /// Lay out `id` under `param` and record the resulting size.
    pub fn layout(&mut self, id: NodeId, param: LayoutParam) -> Size {
        self.node_mut(id).layout_param = param;
        let size = match &self.node(id).kind {
            NodeKind::Flex(_) => flex::perform_layout(self, id, param),
            NodeKind::FlexItem(_) => flex::item::perform_layout(self, id, param),
            NodeKind::Stack(_) => stack::perform_layout(self, id, param),
            NodeKind::Leaf(leaf) => leaf.perform_layout(param),
        };
        let node = self.node_mut(id);
        node.layout_size = size;
        node.need_layout = false;
        tracing::trace!(
            node = id.raw(),
            kind = node.kind.name(),
            width = size.width,
            height = size.height,
            "layout"
        );
        size
    }

    /// Provisional layout under the loosened `param`.
    pub fn measure(&mut self, id: NodeId, param: LayoutParam) -> Size {
        self.layout(id, param.loosen())
    }

    pub(crate) fn set_position(&mut self, id: NodeId, position: Offset) {
        self.node_mut(id).position = position;
    }

    pub(crate) fn set_layout_size(&mut self, id: NodeId, size: Size) {
        self.node_mut(id).layout_size = size;
    }

    pub(crate) fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.node_mut(id).visible = visible;
    }

    // =====================================================================
    // Queries
    // =====================================================================

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn layout_size(&self, id: NodeId) -> Size {
        self.node(id).layout_size
    }

    /// Position relative to the parent.
    pub fn position(&self, id: NodeId) -> Offset {
        self.node(id).position
    }

    /// Position relative to the root.
    pub fn global_offset(&self, id: NodeId) -> Offset {
        let mut offset = Offset::ZERO;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            offset = offset + node.position;
            current = node.parent;
        }
        offset
    }

    pub fn need_layout(&self, id: NodeId) -> bool {
        self.node(id).need_layout
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node(id).visible
    }

    /// Clip policy of a stack; `None` for every other kind.
    pub fn overflow(&self, id: NodeId) -> Option<Overflow> {
        self.stack(id).map(StackNode::overflow)
    }

    /// Distance from the top edge of `id` to its baseline.
    pub fn baseline_distance(&self, id: NodeId, baseline: TextBaseline) -> f64 {
        let node = self.node(id);
        let child_baselines = || {
            node.children
                .iter()
                .map(move |&child| (self.baseline_distance(child, baseline), self.position(child).y))
        };
        match &node.kind {
            NodeKind::Leaf(leaf) => leaf.baseline_distance(baseline, node.layout_size),
            NodeKind::FlexItem(_) => highest_child_baseline(child_baselines()),
            NodeKind::Flex(_) | NodeKind::Stack(_) if node.children.is_empty() => node.layout_size.height,
            NodeKind::Flex(flex) if flex.attrs.direction.is_row() => highest_child_baseline(child_baselines()),
            NodeKind::Flex(_) => first_child_baseline(child_baselines().next(), node.layout_size),
            NodeKind::Stack(_) => highest_child_baseline(child_baselines()),
        }
    }

    pub fn flex(&self, id: NodeId) -> Option<&FlexNode> {
        match &self.get(id)?.kind {
            NodeKind::Flex(flex) => Some(flex),
            _ => None,
        }
    }

    pub(crate) fn flex_mut(&mut self, id: NodeId) -> Option<&mut FlexNode> {
        match &mut self.nodes.get_mut(id.index())?.kind {
            NodeKind::Flex(flex) => Some(flex),
            _ => None,
        }
    }

    pub fn flex_item(&self, id: NodeId) -> Option<&FlexItemNode> {
        match &self.get(id)?.kind {
            NodeKind::FlexItem(item) => Some(item),
            _ => None,
        }
    }

    pub fn stack(&self, id: NodeId) -> Option<&StackNode> {
        match &self.get(id)?.kind {
            NodeKind::Stack(stack) => Some(stack),
            _ => None,
        }
    }

    /// Pre-order walk of the subtree under `root`, with depths.
    pub fn descendants(&self, root: NodeId) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            for &child in self.children(id).iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::FlexDirection;

    #[test]
    fn test_new_node_is_clean() {
        let mut tree = RenderTree::new();
        let id = tree.add_box(10.0, 10.0);
        assert!(!tree.need_layout(id));
        assert!(tree.is_visible(id));
        assert_eq!(tree.layout_size(id), Size::ZERO);
    }

    #[test]
    fn test_append_child_rules() {
        let mut tree = RenderTree::new();
        let item = tree.add_flex_item(FlexItemComponent::default());
        let a = tree.add_box(1.0, 1.0);
        let b = tree.add_box(1.0, 1.0);

        tree.append_child(item, a).unwrap();
        assert!(matches!(tree.append_child(item, b), Err(LayoutError::ChildRejected { .. })));
        assert!(matches!(tree.append_child(a, b), Err(LayoutError::ChildRejected { .. })));

        let row = tree.add_flex(FlexComponent::default());
        assert!(matches!(tree.append_child(row, a), Err(LayoutError::AlreadyAttached(_))));
        assert!(matches!(
            tree.append_child(row, NodeId(99)),
            Err(LayoutError::UnknownNode(_))
        ));
        assert_eq!(tree.parent(a), Some(item));
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let mut tree = RenderTree::new();
        let outer = tree.add_flex(FlexComponent::default());
        let middle = tree.add_stack(StackComponent::default());
        let inner = tree.add_flex(FlexComponent::default());
        tree.append_child(outer, middle).unwrap();
        tree.append_child(middle, inner).unwrap();

        assert!(matches!(
            tree.append_child(inner, outer),
            Err(LayoutError::Cycle { parent, child }) if parent == inner && child == outer
        ));
        let lone = tree.add_flex(FlexComponent::default());
        assert!(matches!(tree.append_child(lone, lone), Err(LayoutError::Cycle { .. })));
        assert_eq!(tree.parent(outer), None);
        assert!(tree.children(inner).is_empty());

        tree.perform_layout(outer, Size::new(100.0, 100.0));
        assert!(!tree.need_layout(inner));
    }

    #[test]
    fn test_update_marks_ancestors() {
        let mut tree = RenderTree::new();
        let row = tree.add_flex(FlexComponent::default());
        let leaf = tree.add_box(10.0, 10.0);
        tree.append_child(row, leaf).unwrap();
        tree.perform_layout(row, Size::new(100.0, 100.0));
        assert!(!tree.need_layout(row));

        tree.update(leaf, &Component::Box(BoxComponent::new(20.0, 20.0))).unwrap();
        assert!(tree.need_layout(leaf));
        assert!(tree.need_layout(row));
    }

    #[test]
    fn test_update_type_mismatch_leaves_node_alone() {
        let mut tree = RenderTree::new();
        let stack = tree.add_stack(StackComponent::default());
        let err = tree
            .update(stack, &Component::Flex(FlexComponent::default()))
            .unwrap_err();
        assert!(matches!(err, LayoutError::TypeMismatch { expected: "stack", found: "flex", .. }));
        assert!(!tree.need_layout(stack));
    }

    #[test]
    fn test_global_offset_sums_ancestors() {
        let mut tree = RenderTree::new();
        let column = tree.add_flex(FlexComponent::new(
            FlexDirection::Column,
            crate::properties::FlexAlign::FlexStart,
            crate::properties::FlexAlign::FlexStart,
        ));
        let row = tree.add_flex(FlexComponent::default());
        let top = tree.add_box(50.0, 40.0);
        let left = tree.add_box(30.0, 30.0);
        let right = tree.add_box(30.0, 30.0);
        tree.append_child(column, top).unwrap();
        tree.append_child(column, row).unwrap();
        tree.append_child(row, left).unwrap();
        tree.append_child(row, right).unwrap();

        tree.perform_layout(column, Size::new(200.0, 400.0));
        assert_eq!(tree.global_offset(right), Offset::new(30.0, 40.0));
    }

    #[test]
    fn test_descendants_preorder() {
        let mut tree = RenderTree::new();
        let root = tree.add_stack(StackComponent::default());
        let a = tree.add_box(1.0, 1.0);
        let b = tree.add_box(1.0, 1.0);
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();
        let order: Vec<_> = tree.descendants(root).into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![root, a, b]);
    }
}
