//! Component assembly.

use glam::DVec2;
use iconset_core::{Constraints, Document, NodeId, SceneResult};
use tracing::{debug, warn};

use crate::report::TraversalReport;

/// A freshly built variant component.
#[derive(Debug, Clone)]
pub struct AssembledComponent {
    pub component: NodeId,
    pub report: TraversalReport,
}

/// Name of a variant component: `"{property}={variant}"`.
pub fn component_name(property: &str, variant: &str) -> String {
    format!("{property}={variant}")
}

/// Set scale constraints on `id` and every node below it.
///
/// Kinds without constraints are recorded as skipped and their children are
/// still visited.
pub fn normalize_scale_constraints(doc: &mut Document, id: NodeId, report: &mut TraversalReport) {
    for node in doc.subtree(id) {
        let Some(entry) = doc.get(node) else {
            continue;
        };
        if !entry.kind.capabilities().constrainable {
            report.skipped(node, format!("{:?} nodes have no constraints", entry.kind));
            continue;
        }
        if entry.constraints == Some(Constraints::SCALE) {
            report.applied(node);
            continue;
        }
        match doc.set_constraints(node, Constraints::SCALE) {
            Ok(()) => report.applied(node),
            Err(err) => {
                warn!(node = %node, error = %err, "failed to set scale constraints");
                report.failed(node, err);
            }
        }
    }
}

/// Wrap `clone` in a new `target_size × target_size` component named `name`.
///
/// Frame-like clones hand their children to the component, keeping each
/// child's local position, and are then removed. Any other clone is moved
/// into the component at the origin. All moved content gets scale
/// constraints so later resizes of the component scale it.
pub fn build_component(
    doc: &mut Document,
    clone: NodeId,
    target_size: f64,
    name: &str,
) -> SceneResult<AssembledComponent> {
    let node = doc.node(clone)?;
    let parent = node.parent.unwrap_or(doc.page());
    let position = node.position();
    let frame_like = node.kind.is_frame_like();

    let component = doc.create_component(parent, name, target_size)?;
    doc.set_position(component, position.x, position.y)?;
    let mut report = TraversalReport::new();

    if frame_like {
        let children: Vec<(NodeId, DVec2)> = doc
            .children(clone)
            .iter()
            .filter_map(|&child| doc.get(child).map(|node| (child, node.position())))
            .collect();
        for (child, position) in children {
            match adopt(doc, component, child, position) {
                Ok(()) => normalize_scale_constraints(doc, child, &mut report),
                Err(err) => {
                    warn!(node = %child, error = %err, "failed to move child into component");
                    report.failed(child, err);
                }
            }
        }
        if !doc.children(clone).is_empty() {
            report.skipped(clone, "children left behind");
        } else if let Err(err) = doc.remove(clone) {
            warn!(node = %clone, error = %err, "failed to remove emptied clone");
            report.failed(clone, err);
        }
    } else {
        let moved = doc
            .append_child(component, clone)
            .and_then(|()| doc.set_position(clone, 0.0, 0.0));
        if let Err(err) = moved {
            doc.remove(component)?;
            return Err(err);
        }
        normalize_scale_constraints(doc, clone, &mut report);
    }

    debug!(component = %component, name, size = target_size, "component assembled");
    Ok(AssembledComponent { component, report })
}

/// Re-parent `child` into `component` and restore the local position it had
/// before any sibling moved.
fn adopt(doc: &mut Document, component: NodeId, child: NodeId, position: DVec2) -> SceneResult<()> {
    doc.append_child(component, child)?;
    if doc.node(child)?.position() != position {
        doc.set_position(child, position.x, position.y)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NodeOutcome;
    use iconset_core::{AutoLayout, ConstraintType, NodeKind, SceneNode};

    #[test]
    fn test_component_name() {
        assert_eq!(component_name("Size", "Large"), "Size=Large");
    }

    #[test]
    fn test_frame_children_are_moved() {
        let mut doc = Document::new();
        let frame = doc
            .add_root(SceneNode::new(NodeKind::Frame).with_bounds(0.0, 0.0, 48.0, 48.0))
            .unwrap();
        let a = doc
            .add_child(frame, SceneNode::new(NodeKind::Rectangle).with_bounds(4.0, 8.0, 10.0, 10.0))
            .unwrap();
        let group = doc.add_child(frame, SceneNode::new(NodeKind::Group)).unwrap();
        let b = doc.add_child(group, SceneNode::new(NodeKind::Vector)).unwrap();

        let built = build_component(&mut doc, frame, 48.0, "Size=L").unwrap();

        let component = doc.get(built.component).unwrap();
        assert_eq!(component.kind, NodeKind::Component);
        assert_eq!(component.name, "Size=L");
        assert_eq!(component.size(), DVec2::new(48.0, 48.0));
        assert_eq!(component.children, vec![a, group]);
        assert!(!doc.contains(frame));
        assert_eq!(doc.get(a).unwrap().position(), DVec2::new(4.0, 8.0));
        assert_eq!(doc.get(a).unwrap().constraints, Some(Constraints::SCALE));
        assert_eq!(doc.get(b).unwrap().constraints, Some(Constraints::SCALE));
        assert!(matches!(built.report.outcome(group), Some(NodeOutcome::Skipped(_))));
    }

    #[test]
    fn test_leaf_clone_is_wrapped() {
        let mut doc = Document::new();
        let star = doc
            .add_root(SceneNode::new(NodeKind::Star).with_bounds(30.0, 30.0, 24.0, 24.0))
            .unwrap();

        let built = build_component(&mut doc, star, 24.0, "Size=M").unwrap();

        assert_eq!(doc.parent(star), Some(built.component));
        let star = doc.get(star).unwrap();
        assert_eq!(star.position(), DVec2::ZERO);
        assert_eq!(star.constraints.map(|c| c.horizontal), Some(ConstraintType::Scale));
        assert_eq!(doc.get(built.component).unwrap().position(), DVec2::new(30.0, 30.0));
    }

    #[test]
    fn test_output_size_is_exact() {
        for size in [0.5, 16.0, 24.0, 33.3, 512.0] {
            let mut doc = Document::new();
            let frame = doc
                .add_root(SceneNode::new(NodeKind::Frame).with_bounds(0.0, 0.0, 100.0, 60.0))
                .unwrap();
            doc.add_child(
                frame,
                SceneNode::new(NodeKind::Ellipse).with_bounds(0.0, 0.0, 100.0, 60.0),
            )
            .unwrap();
            let built = build_component(&mut doc, frame, size, "Size=X").unwrap();
            assert_eq!(doc.get(built.component).unwrap().size(), DVec2::new(size, size));
        }
    }

    #[test]
    fn test_locked_child_does_not_stop_others() {
        let mut doc = Document::new();
        let frame = doc.add_root(SceneNode::new(NodeKind::Frame)).unwrap();
        let free = doc.add_child(frame, SceneNode::new(NodeKind::Ellipse)).unwrap();
        let locked = doc.add_child(frame, SceneNode::new(NodeKind::Ellipse)).unwrap();
        let last = doc.add_child(frame, SceneNode::new(NodeKind::Ellipse)).unwrap();
        doc.set_locked(locked, true).unwrap();

        let built = build_component(&mut doc, frame, 16.0, "Size=S").unwrap();

        assert_eq!(doc.children(built.component), &[free, locked, last]);
        // Locked nodes move but keep their constraints.
        assert!(built.report.outcome(locked).is_some_and(NodeOutcome::is_failure));
        assert_eq!(doc.get(free).unwrap().constraints, Some(Constraints::SCALE));
    }

    #[test]
    fn test_failed_move_does_not_stop_others() {
        let mut doc = Document::new();
        let frame = doc.add_root(SceneNode::new(NodeKind::Frame)).unwrap();
        let child = || SceneNode::new(NodeKind::Rectangle).with_bounds(0.0, 0.0, 10.0, 10.0);
        let first = doc.add_child(frame, child()).unwrap();
        let locked = doc.add_child(frame, child()).unwrap();
        let last = doc.add_child(frame, child()).unwrap();
        doc.set_auto_layout(frame, Some(AutoLayout::horizontal())).unwrap();
        doc.set_locked(locked, true).unwrap();

        let built = build_component(&mut doc, frame, 30.0, "Size=M").unwrap();

        // Moving `first` restacks the clone, so `locked` cannot get its place back.
        assert!(matches!(
            built.report.outcome(locked),
            Some(NodeOutcome::Failed(reason)) if reason.contains("locked")
        ));
        assert_eq!(doc.children(built.component), &[first, locked, last]);
        assert_eq!(doc.get(last).unwrap().position(), DVec2::new(20.0, 0.0));
        assert_eq!(doc.get(last).unwrap().constraints, Some(Constraints::SCALE));
        assert!(!doc.contains(frame));
    }

    #[test]
    fn test_clone_with_remaining_children_is_kept() {
        let mut doc = Document::new();
        let frame = doc.add_root(SceneNode::new(NodeKind::Frame)).unwrap();
        let child = doc.add_child(frame, SceneNode::new(NodeKind::Ellipse)).unwrap();
        doc.set_locked(frame, true).unwrap();

        let built = build_component(&mut doc, frame, 16.0, "Size=S").unwrap();

        assert!(built.report.outcome(child).is_some_and(NodeOutcome::is_failure));
        assert!(matches!(built.report.outcome(frame), Some(NodeOutcome::Skipped(_))));
        assert_eq!(doc.parent(child), Some(frame));
        assert!(doc.children(built.component).is_empty());
    }

    #[test]
    fn test_invalid_size_creates_nothing() {
        let mut doc = Document::new();
        let frame = doc.add_root(SceneNode::new(NodeKind::Frame)).unwrap();
        assert!(build_component(&mut doc, frame, 0.0, "Size=S").is_err());
        assert_eq!(doc.children(doc.page()), &[frame]);
    }
}
