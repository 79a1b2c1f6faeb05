//! RenderFlexItem: a single-child wrapper carrying flex attributes.
//!
//! The item itself has no layout policy of its own. It forwards the incoming
//! param, narrowed by its declared min/max bounds, to its only child and
//! takes that child's size. The parent flex reads the attributes to decide
//! basis, grow, shrink, weight and visibility.

use crate::component::FlexItemComponent;
use crate::geometry::{Offset, Size};
use crate::layout_param::LayoutParam;
use crate::node::NodeId;
use crate::properties::{FlexAlign, FlexDirection};
use crate::tree::RenderTree;

/// Normalised flex-item attributes.
///
/// Negative factors from the binding layer are treated as "no flex".
#[derive(Debug, Clone, PartialEq)]
pub struct FlexItemNode {
    pub attrs: FlexItemComponent,
    constraints: LayoutParam,
}

impl FlexItemNode {
    pub fn new(attrs: FlexItemComponent) -> Self {
        let mut node = Self {
            attrs: FlexItemComponent::default(),
            constraints: LayoutParam::UNBOUNDED,
        };
        node.update(&attrs);
        node
    }

    pub(crate) fn update(&mut self, attrs: &FlexItemComponent) {
        let mut attrs = attrs.clone();
        attrs.flex_basis = attrs.flex_basis.max(0.0);
        attrs.flex_grow = attrs.flex_grow.max(0.0);
        attrs.flex_shrink = attrs.flex_shrink.max(0.0);
        attrs.flex_weight = attrs.flex_weight.max(0.0);
        attrs.aspect_ratio = attrs.aspect_ratio.max(0.0);
        self.constraints = attrs.constraints();
        self.attrs = attrs;
    }

    #[inline]
    pub fn constraints(&self) -> LayoutParam {
        self.constraints
    }

    #[inline]
    pub fn basis(&self) -> f64 {
        self.attrs.flex_basis
    }

    #[inline]
    pub fn grow(&self) -> f64 {
        self.attrs.flex_grow
    }

    #[inline]
    pub fn shrink(&self) -> f64 {
        self.attrs.flex_shrink
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.attrs.flex_weight
    }

    #[inline]
    pub fn display_index(&self) -> i32 {
        self.attrs.display_index
    }

    #[inline]
    pub fn align_self(&self) -> FlexAlign {
        self.attrs.align_self
    }

    /// Turn a tight-main `param` into a tight box honouring the aspect ratio.
    ///
    /// Returns `param` untouched when no ratio is set or the main extent is not
    /// fixed. The derived cross extent is clamped into the item's own bounds and
    /// `max_cross`.
    pub(crate) fn apply_aspect_ratio(&self, param: LayoutParam, direction: FlexDirection, max_cross: f64) -> LayoutParam {
        let ratio = self.attrs.aspect_ratio;
        if ratio <= 0.0 {
            return param;
        }
        let main = param.max_size.main(direction);
        if !main.is_finite() || param.min_size.main(direction) != main {
            return param;
        }
        let cross = if direction.is_row() { main / ratio } else { main * ratio };
        let cross = self.constraints.clamp_cross(direction, cross).min(max_cross);
        LayoutParam::tight(Size::from_axes(direction, main, cross))
    }
}

pub(crate) fn perform_layout(tree: &mut RenderTree, id: NodeId, param: LayoutParam) -> Size {
    let constraints = match tree.flex_item(id) {
        Some(item) => item.constraints(),
        None => return param.constrain(Size::ZERO),
    };
    let inner = param.enforce(&constraints);
    match tree.children(id).first().copied() {
        Some(child) => {
            let size = tree.layout(child, inner);
            tree.set_position(child, Offset::ZERO);
            size
        }
        None => inner.min_size,
    }
}
