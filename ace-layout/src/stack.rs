//! RenderStack: children overlap in one box and are anchored by alignment.

use crate::component::StackComponent;
use crate::geometry::{Offset, Size};
use crate::layout_param::LayoutParam;
use crate::node::NodeId;
use crate::properties::{Overflow, StackFit};
use crate::tree::RenderTree;

#[derive(Debug, Clone, PartialEq)]
pub struct StackNode {
    pub attrs: StackComponent,
}

impl StackNode {
    pub fn new(attrs: StackComponent) -> Self {
        Self { attrs }
    }

    pub(crate) fn update(&mut self, attrs: &StackComponent) {
        self.attrs = attrs.clone();
    }

    pub fn overflow(&self) -> Overflow {
        self.attrs.overflow
    }
}

pub(crate) fn perform_layout(tree: &mut RenderTree, id: NodeId, param: LayoutParam) -> Size {
    let Some(stack) = tree.stack(id) else {
        return param.constrain(Size::ZERO);
    };
    let attrs = stack.attrs.clone();
    let children = tree.children(id).to_vec();
    if children.is_empty() {
        return param.min_size;
    }

    let child_param = match attrs.fit {
        StackFit::Inherit => param,
        _ => param.loosen(),
    };

    let mut largest = Size::ZERO;
    for &child in &children {
        let size = tree.layout(child, child_param);
        largest.width = largest.width.max(size.width);
        largest.height = largest.height.max(size.height);
    }

    let size = match attrs.fit {
        StackFit::Keep | StackFit::Inherit => param.constrain(largest),
        StackFit::FirstChild => param.constrain(tree.layout_size(children[0])),
        StackFit::Stretch => {
            let mut size = param.constrain(largest);
            if param.has_bounded_width() {
                size.width = param.max_size.width;
            }
            if param.has_bounded_height() {
                size.height = param.max_size.height;
            }
            size
        }
    };

    match attrs.fit {
        StackFit::Stretch => {
            for &child in &children {
                tree.layout(child, LayoutParam::tight(size));
            }
        }
        StackFit::FirstChild => {
            // Later children must fit inside the first one.
            for &child in &children[1..] {
                tree.layout(child, LayoutParam::loose(size));
            }
        }
        _ => {}
    }

    let (x_factor, y_factor) = attrs.alignment.factors();
    for &child in &children {
        let child_size = tree.layout_size(child);
        let offset = Offset::new(
            (size.width - child_size.width) * x_factor,
            (size.height - child_size.height) * y_factor,
        );
        tree.set_position(child, offset);
    }
    tracing::trace!(node = id.raw(), fit = ?attrs.fit, width = size.width, height = size.height, "stack pass");
    size
}
