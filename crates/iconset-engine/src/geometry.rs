//! Content geometry of a subtree.

use iconset_core::{ContentBounds, Document, NodeId, SceneNode, SceneResult};
use tracing::debug;

/// Bounds of the visible content under `id`.
///
/// For a container the result is in the container's own coordinate space:
/// the union of its visible children, with nested containers translated by
/// their local position. A child whose bounds cannot be computed is left out
/// of the aggregate. Empty containers yield [`ContentBounds::UNBOUNDED`].
///
/// For a leaf the result is its own rectangle in its parent's space.
pub fn compute_content_bounds(doc: &Document, id: NodeId) -> SceneResult<ContentBounds> {
    let node = doc.node(id)?;
    if !node.kind.is_container() {
        return Ok(leaf_bounds(node));
    }

    let mut bounds = ContentBounds::UNBOUNDED;
    for &child in &node.children {
        let child_bounds = match child_content_bounds(doc, child) {
            Ok(Some(b)) => b,
            Ok(None) => continue,
            Err(err) => {
                debug!(node = %child, error = %err, "skipping child without bounds");
                continue;
            }
        };
        bounds.merge(&child_bounds);
    }
    Ok(bounds)
}

/// Bounds of one child in its parent's space, or `None` when it is hidden.
fn child_content_bounds(doc: &Document, id: NodeId) -> SceneResult<Option<ContentBounds>> {
    let node = doc.node(id)?;
    if !node.visible {
        return Ok(None);
    }
    if node.kind.is_container() {
        let inner = compute_content_bounds(doc, id)?;
        return Ok(Some(inner.translate(finite_position(node))));
    }
    Ok(Some(leaf_bounds(node)))
}

fn leaf_bounds(node: &SceneNode) -> ContentBounds {
    ContentBounds::from_rect(
        finite_or_zero(node.x),
        finite_or_zero(node.y),
        finite_or_zero(node.width),
        finite_or_zero(node.height),
    )
}

fn finite_position(node: &SceneNode) -> glam::DVec2 {
    glam::DVec2::new(finite_or_zero(node.x), finite_or_zero(node.y))
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Overall size of a node: its larger side.
pub fn source_size(node: &SceneNode) -> f64 {
    finite_or_zero(node.width).max(finite_or_zero(node.height))
}

/// Scale that fits the content's larger side to `target`.
///
/// Diagnostic only: resizing always targets the variant size directly.
pub fn content_scale_factor(target: f64, content: &ContentBounds) -> Option<f64> {
    let extent = content.width().max(content.height());
    (extent > 0.0).then(|| target / extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconset_core::NodeKind;

    #[test]
    fn test_leaf_bounds() {
        let mut doc = Document::new();
        let rect = doc
            .add_root(SceneNode::new(NodeKind::Rectangle).with_bounds(5.0, 6.0, 10.0, 20.0))
            .unwrap();
        let bounds = compute_content_bounds(&doc, rect).unwrap();
        assert_eq!(bounds, ContentBounds::from_rect(5.0, 6.0, 10.0, 20.0));
    }

    #[test]
    fn test_empty_container_is_unbounded() {
        let mut doc = Document::new();
        let frame = doc.add_root(SceneNode::new(NodeKind::Frame)).unwrap();
        let bounds = compute_content_bounds(&doc, frame).unwrap();
        assert!(!bounds.is_bounded());
        assert_eq!(bounds, ContentBounds::UNBOUNDED);
    }

    #[test]
    fn test_empty_nested_container_is_excluded() {
        let mut doc = Document::new();
        let frame = doc
            .add_root(SceneNode::new(NodeKind::Frame).with_bounds(0.0, 0.0, 100.0, 100.0))
            .unwrap();
        doc.add_child(frame, SceneNode::new(NodeKind::Group).with_bounds(-500.0, -500.0, 1.0, 1.0))
            .unwrap();
        doc.add_child(frame, SceneNode::new(NodeKind::Ellipse).with_bounds(10.0, 10.0, 20.0, 20.0))
            .unwrap();

        let bounds = compute_content_bounds(&doc, frame).unwrap();
        assert_eq!(bounds, ContentBounds::from_rect(10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn test_nested_bounds_are_translated() {
        let mut doc = Document::new();
        let frame = doc
            .add_root(SceneNode::new(NodeKind::Frame).with_bounds(0.0, 0.0, 100.0, 100.0))
            .unwrap();
        let group = doc
            .add_child(frame, SceneNode::new(NodeKind::Group).with_bounds(40.0, 40.0, 20.0, 20.0))
            .unwrap();
        doc.add_child(group, SceneNode::new(NodeKind::Vector).with_bounds(0.0, 0.0, 20.0, 20.0))
            .unwrap();
        doc.add_child(frame, SceneNode::new(NodeKind::Line).with_bounds(0.0, 10.0, 30.0, 0.0))
            .unwrap();

        let bounds = compute_content_bounds(&doc, frame).unwrap();
        assert_eq!(bounds, ContentBounds::from_rect(0.0, 10.0, 60.0, 50.0));
    }

    #[test]
    fn test_hidden_children_are_ignored() {
        let mut doc = Document::new();
        let frame = doc.add_root(SceneNode::new(NodeKind::Frame)).unwrap();
        doc.add_child(
            frame,
            SceneNode::new(NodeKind::Star).with_bounds(0.0, 0.0, 50.0, 50.0).hidden(),
        )
        .unwrap();
        assert!(!compute_content_bounds(&doc, frame).unwrap().is_bounded());
    }

    #[test]
    fn test_non_finite_geometry_defaults_to_zero() {
        let mut doc = Document::new();
        let rect = doc
            .add_root(
                SceneNode::new(NodeKind::Rectangle)
                    .with_bounds(f64::NAN, 2.0, 4.0, f64::INFINITY),
            )
            .unwrap();
        let bounds = compute_content_bounds(&doc, rect).unwrap();
        assert_eq!(bounds, ContentBounds::from_rect(0.0, 2.0, 4.0, 0.0));
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let doc = Document::new();
        assert!(compute_content_bounds(&doc, NodeId(42)).is_err());
    }

    #[test]
    fn test_source_size_and_scale_factor() {
        let node = SceneNode::new(NodeKind::Frame).with_bounds(0.0, 0.0, 100.0, 80.0);
        assert_eq!(source_size(&node), 100.0);

        let content = ContentBounds::from_rect(10.0, 10.0, 50.0, 40.0);
        assert_eq!(content_scale_factor(25.0, &content), Some(0.5));
        assert_eq!(content_scale_factor(25.0, &ContentBounds::UNBOUNDED), None);
    }
}
