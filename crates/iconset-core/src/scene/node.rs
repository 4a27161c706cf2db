//! Scene nodes stored in the document arena.

use glam::DVec2;
use smallvec::SmallVec;

use crate::geometry::Bounds;
use crate::layout::AutoLayout;
use crate::scene::NodeKind;
use crate::types::{Constraints, NodeId, Paint, StrokeAlign};

/// Default stroke weight for kinds that expose strokes.
pub const DEFAULT_STROKE_WEIGHT: f64 = 1.0;

/// A node in the document tree.
///
/// Position is relative to the parent node. `parent` and `children` are
/// maintained by the [`Document`](crate::Document); edit them through its
/// structural operations only.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub visible: bool,
    /// Locked nodes reject every edit
    pub locked: bool,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    /// Present only on kinds that expose strokes
    pub stroke_weight: Option<f64>,
    pub stroke_align: StrokeAlign,
    pub dash_pattern: SmallVec<[f64; 4]>,
    /// Present only on kinds that accept constraints
    pub constraints: Option<Constraints>,
    pub auto_layout: Option<AutoLayout>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl SceneNode {
    /// Create a detached node of the given kind with the kind's default attributes.
    ///
    /// The id is assigned when the node is added to a document.
    pub fn new(kind: NodeKind) -> Self {
        let caps = kind.capabilities();
        Self {
            id: NodeId(0),
            kind,
            name: default_name(kind).to_string(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            visible: true,
            locked: false,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: caps.stylable.then_some(DEFAULT_STROKE_WEIGHT),
            stroke_align: StrokeAlign::default(),
            dash_pattern: SmallVec::new(),
            constraints: caps.constrainable.then(Constraints::default),
            auto_layout: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set position and size.
    pub fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    /// Add a stroke paint and set the stroke weight.
    ///
    /// Ignored on kinds that do not expose strokes.
    pub fn with_stroke(mut self, paint: Paint, weight: f64) -> Self {
        if self.kind.capabilities().stylable {
            self.strokes.push(paint);
            self.stroke_weight = Some(weight);
        }
        self
    }

    pub fn with_stroke_align(mut self, align: StrokeAlign) -> Self {
        self.stroke_align = align;
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        if self.kind.capabilities().constrainable {
            self.constraints = Some(constraints);
        }
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Local bounds (relative to the parent).
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Whether at least one visible stroke paint is present.
    pub fn has_visible_stroke(&self) -> bool {
        self.strokes.iter().any(|paint| paint.visible)
    }
}

fn default_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Page => "Page 1",
        NodeKind::Frame => "Frame",
        NodeKind::Group => "Group",
        NodeKind::Component => "Component",
        NodeKind::ComponentSet => "Component Set",
        NodeKind::Vector => "Vector",
        NodeKind::Line => "Line",
        NodeKind::Ellipse => "Ellipse",
        NodeKind::Rectangle => "Rectangle",
        NodeKind::Polygon => "Polygon",
        NodeKind::Star => "Star",
        NodeKind::BooleanOperation => "Union",
        NodeKind::Text => "Text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_kind_defaults() {
        let rect = SceneNode::new(NodeKind::Rectangle);
        assert_eq!(rect.stroke_weight, Some(DEFAULT_STROKE_WEIGHT));
        assert!(rect.strokes.is_empty());
        assert_eq!(rect.constraints, Some(Constraints::default()));

        let group = SceneNode::new(NodeKind::Group);
        assert_eq!(group.stroke_weight, None);
        assert_eq!(group.constraints, None);
    }

    #[test]
    fn test_with_stroke_ignored_on_groups() {
        let group = SceneNode::new(NodeKind::Group).with_stroke(Paint::solid(Color::BLACK), 3.0);
        assert!(group.strokes.is_empty());
        assert_eq!(group.stroke_weight, None);
    }

    #[test]
    fn test_has_visible_stroke() {
        let mut paint = Paint::solid(Color::BLACK);
        paint.visible = false;
        let node = SceneNode::new(NodeKind::Vector).with_stroke(paint, 2.0);
        assert!(!node.has_visible_stroke());
    }
}
