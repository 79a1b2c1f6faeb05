//! Flex and stack layout core.
//!
//! Resolves the size and position of every node in a render tree made of
//! flex containers, flex items, stacks and leaves. Layout is a synchronous
//! top-down pass: a parent hands each child a `LayoutParam`, the child
//! answers with a `Size`, and the parent assigns an `Offset`.
//!
//! ```
//! use ace_layout::{FlexComponent, FlexItemComponent, RenderTree, Size};
//!
//! let mut tree = RenderTree::new();
//! let row = tree.add_flex(FlexComponent::default());
//! let item = tree.add_flex_item(FlexItemComponent::new(0.0, 1.0, 0.0));
//! let leaf = tree.add_box(100.0, 50.0);
//! tree.append_child(row, item).unwrap();
//! tree.append_child(item, leaf).unwrap();
//!
//! tree.perform_layout(row, Size::new(400.0, 300.0));
//! assert_eq!(tree.layout_size(item), Size::new(400.0, 50.0));
//! ```

pub mod component;
pub mod error;
pub mod flex;
pub mod geometry;
pub mod layout_param;
pub mod node;
pub mod properties;
pub mod scene;
pub mod stack;
pub mod tree;

pub use component::{
    BoxComponent, Component, FlexComponent, FlexItemComponent, StackComponent, TextComponent,
};
pub use error::LayoutError;
pub use flex::item::FlexItemNode;
pub use flex::{FlexLayoutMode, FlexNode};
pub use geometry::{INFINITE_SIZE, Offset, Rect, Size};
pub use layout_param::LayoutParam;
pub use node::{LeafNode, NodeId, NodeKind, RenderNode};
pub use properties::{
    CrossAxisSize, FlexAlign, FlexDirection, MainAxisSize, Overflow, StackAlignment, StackFit,
    TextBaseline,
};
pub use scene::{GeometryDump, NodeGeometry, Scene, SceneNode};
pub use stack::StackNode;
pub use tree::RenderTree;
