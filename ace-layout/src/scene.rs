//! Scene files: a viewport plus a component tree, as JSON.
//!
//! ```json
//! {
//!   "viewport": { "width": 1080.0, "height": 2244.0 },
//!   "root": {
//!     "type": "flex", "direction": "row",
//!     "children": [
//!       { "type": "flex_item", "flex_grow": 1.0,
//!         "children": [{ "type": "box", "width": 100.0, "height": 100.0 }] }
//!     ]
//!   }
//! }
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::error::LayoutError;
use crate::geometry::{Offset, Size};
use crate::node::NodeId;
use crate::tree::RenderTree;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub viewport: Size,
    pub root: SceneNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    #[serde(flatten)]
    pub component: Component,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(component: Component) -> Self {
        Self {
            component,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children);
        self
    }
}

impl Scene {
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LayoutError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Build a fresh render tree. Returns the tree and its root handle.
    pub fn build(&self) -> Result<(RenderTree, NodeId), LayoutError> {
        let mut tree = RenderTree::new();
        let root = build_node(&mut tree, &self.root)?;
        Ok((tree, root))
    }

    /// Build and lay out in one go.
    pub fn layout(&self) -> Result<(RenderTree, NodeId), LayoutError> {
        let (mut tree, root) = self.build()?;
        tree.perform_layout(root, self.viewport);
        Ok((tree, root))
    }
}

fn build_node(tree: &mut RenderTree, scene: &SceneNode) -> Result<NodeId, LayoutError> {
    let id = tree.create_node(&scene.component);
    for child in &scene.children {
        let child_id = build_node(tree, child)?;
        tree.append_child(id, child_id).inspect_err(|err| {
            tracing::warn!(parent = id.raw(), child = child_id.raw(), %err, "scene child rejected");
        })?;
    }
    Ok(id)
}

/// Geometry of one node after layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeGeometry {
    pub id: NodeId,
    pub kind: String,
    pub depth: usize,
    pub position: Offset,
    pub global: Offset,
    pub size: Size,
    pub visible: bool,
}

/// Flat pre-order dump of a laid-out subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryDump {
    pub nodes: Vec<NodeGeometry>,
}

impl GeometryDump {
    pub fn get(&self, id: NodeId) -> Option<&NodeGeometry> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

impl RenderTree {
    pub fn dump(&self, root: NodeId) -> GeometryDump {
        let nodes = self
            .descendants(root)
            .into_iter()
            .map(|(id, depth)| NodeGeometry {
                id,
                kind: self.kind(id).name().to_string(),
                depth,
                position: self.position(id),
                global: self.global_offset(id),
                size: self.layout_size(id),
                visible: self.is_visible(id),
            })
            .collect();
        GeometryDump { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW_SCENE: &str = r#"{
        "viewport": { "width": 1080, "height": 2244 },
        "root": {
            "type": "flex",
            "direction": "row",
            "children": [
                { "type": "flex_item", "flex_grow": 2,
                  "children": [{ "type": "box", "width": 100, "height": 100 }] },
                { "type": "flex_item", "flex_grow": 2,
                  "children": [{ "type": "box", "width": 200, "height": 200 }] }
            ]
        }
    }"#;

    #[test]
    fn test_scene_parses_and_lays_out() {
        let scene = Scene::from_json(ROW_SCENE).unwrap();
        assert_eq!(scene.viewport, Size::new(1080.0, 2244.0));
        assert_eq!(scene.root.children.len(), 2);

        let (tree, root) = scene.layout().unwrap();
        let dump = tree.dump(root);
        assert_eq!(dump.nodes.len(), 5);
        assert_eq!(dump.nodes[0].kind, "flex");
        assert_eq!(dump.nodes[1].size, Size::new(490.0, 100.0));
        assert_eq!(dump.nodes[3].position, Offset::new(490.0, 0.0));
        assert_eq!(dump.nodes[4].depth, 2);
        assert_eq!(dump.nodes[4].global, Offset::new(490.0, 0.0));
    }

    #[test]
    fn test_scene_rejects_child_on_leaf() {
        let json = r#"{
            "viewport": { "width": 100, "height": 100 },
            "root": { "type": "box", "width": 10, "height": 10,
                      "children": [{ "type": "box" }] }
        }"#;
        let scene = Scene::from_json(json).unwrap();
        assert!(matches!(scene.build(), Err(LayoutError::ChildRejected { .. })));
    }

    #[test]
    fn test_scene_reports_bad_json() {
        let err = Scene::from_json("{ \"viewport\": 3 }").unwrap_err();
        assert!(matches!(err, LayoutError::Scene(_)));
    }
}
