//! Render node kinds - the dispatch switchboard of the layout core.
//!
//! `NodeKind` is a closed sum type over everything that can sit in the render
//! tree. Containers never downcast: they match on the kind and call into the
//! module that owns that kind's algorithm.

use serde::{Deserialize, Serialize};

use crate::component::{BoxComponent, Component, TextComponent};
use crate::flex::FlexNode;
use crate::flex::item::FlexItemNode;
use crate::geometry::{Offset, Size};
use crate::layout_param::LayoutParam;
use crate::properties::TextBaseline;
use crate::stack::StackNode;

/// Stable handle of a node inside a `RenderTree` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// A childless node with a declared size.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafNode {
    Box(BoxComponent),
    Text(TextComponent),
}

impl LeafNode {
    /// Declared size clamped into `param`. An auto axis takes the incoming min.
    pub(crate) fn perform_layout(&self, param: LayoutParam) -> Size {
        let declared = match self {
            LeafNode::Box(b) => Size::new(
                b.width.unwrap_or(param.min_size.width),
                b.height.unwrap_or(param.min_size.height),
            ),
            LeafNode::Text(t) => Size::new(t.width, t.height),
        };
        param.constrain(declared)
    }

    /// Text leaves report their metric; anything else sits on its bottom edge.
    pub(crate) fn baseline_distance(&self, baseline: TextBaseline, layout_size: Size) -> f64 {
        match self {
            LeafNode::Text(t) => match baseline {
                TextBaseline::Alphabetic => t.alphabetic_baseline,
                TextBaseline::Ideographic => t.ideographic_baseline,
            },
            LeafNode::Box(_) => layout_size.height,
        }
    }
}

/// Every kind of node the layout core can lay out.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Flex(FlexNode),
    FlexItem(FlexItemNode),
    Stack(StackNode),
    Leaf(LeafNode),
}

impl NodeKind {
    pub fn from_component(component: &Component) -> Self {
        match component {
            Component::Flex(c) => NodeKind::Flex(FlexNode::new(c.clone())),
            Component::FlexItem(c) => NodeKind::FlexItem(FlexItemNode::new(c.clone())),
            Component::Stack(c) => NodeKind::Stack(StackNode::new(c.clone())),
            Component::Box(c) => NodeKind::Leaf(LeafNode::Box(c.clone())),
            Component::Text(c) => NodeKind::Leaf(LeafNode::Text(c.clone())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Flex(_) => "flex",
            NodeKind::FlexItem(_) => "flex_item",
            NodeKind::Stack(_) => "stack",
            NodeKind::Leaf(LeafNode::Box(_)) => "box",
            NodeKind::Leaf(LeafNode::Text(_)) => "text",
        }
    }

    /// Maximum number of children this kind accepts.
    pub fn child_limit(&self) -> Option<usize> {
        match self {
            NodeKind::Flex(_) | NodeKind::Stack(_) => None,
            NodeKind::FlexItem(_) => Some(1),
            NodeKind::Leaf(_) => Some(0),
        }
    }

    /// Copy attributes from a matching component. Returns false on a kind mismatch.
    pub(crate) fn apply(&mut self, component: &Component) -> bool {
        match (self, component) {
            (NodeKind::Flex(node), Component::Flex(c)) => node.update(c),
            (NodeKind::FlexItem(node), Component::FlexItem(c)) => node.update(c),
            (NodeKind::Stack(node), Component::Stack(c)) => node.update(c),
            (NodeKind::Leaf(LeafNode::Box(b)), Component::Box(c)) => *b = c.clone(),
            (NodeKind::Leaf(LeafNode::Text(t)), Component::Text(c)) => *t = c.clone(),
            _ => return false,
        }
        true
    }
}

/// One node of the render tree plus the geometry of its last layout pass.
#[derive(Debug, Clone)]
pub struct RenderNode {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) layout_param: LayoutParam,
    pub(crate) layout_size: Size,
    pub(crate) position: Offset,
    pub(crate) need_layout: bool,
    pub(crate) visible: bool,
}

impl RenderNode {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            layout_param: LayoutParam::default(),
            layout_size: Size::ZERO,
            position: Offset::ZERO,
            need_layout: false,
            visible: true,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Constraint received in the last layout call.
    pub fn layout_param(&self) -> LayoutParam {
        self.layout_param
    }

    pub fn layout_size(&self) -> Size {
        self.layout_size
    }

    pub fn position(&self) -> Offset {
        self.position
    }

    pub fn need_layout(&self) -> bool {
        self.need_layout
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
