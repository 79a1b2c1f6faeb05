//! Declarative component descriptions handed over by the binding layer.
//!
//! Components carry resolved attributes only. They are the input of
//! `RenderTree::create_node` and `RenderTree::update`; the tree shape is
//! supplied separately.

use serde::{Deserialize, Serialize};

use crate::geometry::{INFINITE_SIZE, Size};
use crate::layout_param::LayoutParam;
use crate::properties::{
    CrossAxisSize, FlexAlign, FlexDirection, MainAxisSize, Overflow, StackAlignment, StackFit,
    TextBaseline,
};

/// Any component the layout core knows how to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Flex(FlexComponent),
    FlexItem(FlexItemComponent),
    Stack(StackComponent),
    Box(BoxComponent),
    Text(TextComponent),
}

impl Component {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Component::Flex(_) => "flex",
            Component::FlexItem(_) => "flex_item",
            Component::Stack(_) => "stack",
            Component::Box(_) => "box",
            Component::Text(_) => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexComponent {
    pub direction: FlexDirection,
    pub main_axis_align: FlexAlign,
    pub cross_axis_align: FlexAlign,
    pub main_axis_size: MainAxisSize,
    pub cross_axis_size: CrossAxisSize,
    /// Fixed gap between children; a positive value replaces the main-axis policy.
    pub space: f64,
    pub text_baseline: TextBaseline,
    /// Stretched children fill the incoming max cross constraint.
    pub stretch_to_parent: bool,
}

impl FlexComponent {
    pub fn new(direction: FlexDirection, main_axis_align: FlexAlign, cross_axis_align: FlexAlign) -> Self {
        Self {
            direction,
            main_axis_align,
            cross_axis_align,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexItemComponent {
    pub flex_basis: f64,
    pub flex_grow: f64,
    pub flex_shrink: f64,
    pub align_self: FlexAlign,
    pub flex_weight: f64,
    pub aspect_ratio: f64,
    pub display_index: i32,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

impl Default for FlexItemComponent {
    fn default() -> Self {
        Self {
            flex_basis: 0.0,
            flex_grow: 0.0,
            flex_shrink: 0.0,
            align_self: FlexAlign::Auto,
            flex_weight: 0.0,
            aspect_ratio: 0.0,
            display_index: 0,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
        }
    }
}

impl FlexItemComponent {
    pub fn new(flex_basis: f64, flex_grow: f64, flex_shrink: f64) -> Self {
        Self {
            flex_basis,
            flex_grow,
            flex_shrink,
            ..Self::default()
        }
    }

    /// Declared min/max bounds; missing values are unbounded.
    pub fn constraints(&self) -> LayoutParam {
        let min = Size::new(
            self.min_width.unwrap_or(0.0).max(0.0),
            self.min_height.unwrap_or(0.0).max(0.0),
        );
        let max = Size::new(
            self.max_width.unwrap_or(INFINITE_SIZE).max(min.width),
            self.max_height.unwrap_or(INFINITE_SIZE).max(min.height),
        );
        LayoutParam::new(min, max)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StackComponent {
    pub alignment: StackAlignment,
    pub fit: StackFit,
    pub overflow: Overflow,
}

/// A sized box. `None` on an axis means auto.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxComponent {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl BoxComponent {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }
}

/// A text run with pre-measured size and baseline metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextComponent {
    pub width: f64,
    pub height: f64,
    pub alphabetic_baseline: f64,
    pub ideographic_baseline: f64,
}

impl TextComponent {
    pub fn new(width: f64, height: f64, alphabetic_baseline: f64) -> Self {
        Self {
            width,
            height,
            alphabetic_baseline,
            ideographic_baseline: height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flex_item_constraints_default_unbounded() {
        let c = FlexItemComponent::default().constraints();
        assert_eq!(c.min_size, Size::ZERO);
        assert!(c.max_size.is_width_infinite());
        assert!(c.max_size.is_height_infinite());
    }

    #[test]
    fn test_flex_item_constraints_max_never_below_min() {
        let item = FlexItemComponent {
            min_width: Some(300.0),
            max_width: Some(100.0),
            ..FlexItemComponent::default()
        };
        let c = item.constraints();
        assert_eq!(c.min_size.width, 300.0);
        assert_eq!(c.max_size.width, 300.0);
    }

    #[test]
    fn test_component_tagged_json() {
        let json = r#"{ "type": "flex_item", "flex_grow": 2.0, "align_self": "center" }"#;
        let component: Component = serde_json::from_str(json).unwrap();
        match component {
            Component::FlexItem(item) => {
                assert_eq!(item.flex_grow, 2.0);
                assert_eq!(item.align_self, FlexAlign::Center);
                assert_eq!(item.flex_shrink, 0.0);
            }
            other => panic!("unexpected component: {other:?}"),
        }
    }
}
