//! Outline conversion and flattening.
//!
//! Both passes may replace nodes, including the subtree root. They return the
//! id the root has after the pass together with the per-node report.

use iconset_core::{Document, FlattenMode, NodeId, SceneError};
use tracing::{debug, warn};

use crate::host::Host;
use crate::report::TraversalReport;

/// Pre-order list of vector leaves under `root` with a visible-weight stroke.
pub fn collect_stroked_leaves(doc: &Document, root: NodeId) -> Vec<NodeId> {
    doc.subtree(root)
        .into_iter()
        .filter(|&id| {
            doc.get(id).is_some_and(|node| {
                node.kind.is_vector_capable()
                    && !node.strokes.is_empty()
                    && node.stroke_weight.is_some_and(|w| w > 0.0)
            })
        })
        .collect()
}

/// Replace every stroked leaf under `root` by its outlined geometry.
///
/// The outline takes the source's child index and the source is removed.
pub fn outline_strokes<H: Host>(host: &mut H, root: NodeId) -> (NodeId, TraversalReport) {
    let mut report = TraversalReport::new();
    let mut root = root;

    for id in collect_stroked_leaves(host.document(), root) {
        let Some(node) = host.document().get(id) else {
            continue;
        };
        if !host.can_outline_stroke(node.kind) {
            warn!(node = %id, kind = ?node.kind, "node cannot be outlined");
            report.skipped(id, format!("{:?} nodes cannot be outlined", node.kind));
            continue;
        }
        match outline_one(host, id) {
            Ok(Some(outline)) => {
                debug!(node = %id, outline = %outline, "stroke outlined");
                if id == root {
                    root = outline;
                }
                report.applied(id);
            }
            Ok(None) => report.skipped(id, "detached node kept"),
            Err(err) => {
                warn!(node = %id, error = %err, "failed to outline stroke");
                report.failed(id, err);
            }
        }
    }
    (root, report)
}

fn outline_one<H: Host>(host: &mut H, id: NodeId) -> Result<Option<NodeId>, SceneError> {
    let doc = host.document();
    let parent = doc.parent(id);
    let index = doc.index_in_parent(id);
    let outline = host.outline_stroke(id)?;

    let (Some(parent), Some(index)) = (parent, index) else {
        host.document_mut().remove(outline)?;
        return Ok(None);
    };
    let doc = host.document_mut();
    let placed = doc.insert_child(parent, index, outline).and_then(|()| doc.remove(id));
    if let Err(err) = placed {
        // Keep the source when it cannot be replaced.
        if doc.contains(outline) && doc.contains(id) {
            doc.remove(outline)?;
        }
        return Err(err);
    }
    Ok(Some(outline))
}

/// Collapse the subtree under `root`, children before parents.
///
/// Groups are flattened natively. Frames and components with more than one
/// child merge their children into one shape at index 0. Anything else is
/// left as it is.
pub fn flatten_subtree<H: Host>(host: &mut H, root: NodeId) -> (NodeId, TraversalReport) {
    let mut report = TraversalReport::new();
    let root = flatten_node(host, root, &mut report);
    (root, report)
}

fn flatten_node<H: Host>(host: &mut H, id: NodeId, report: &mut TraversalReport) -> NodeId {
    let children = host.document().children(id).to_vec();
    for child in children {
        if host.document().get(child).is_some_and(|n| n.kind.is_container()) {
            flatten_node(host, child, report);
        }
    }

    let Some(node) = host.document().get(id) else {
        return id;
    };
    match node.kind.capabilities().flatten {
        FlattenMode::Native => match host.flatten_group(id) {
            Ok(merged) => {
                debug!(node = %id, merged = %merged, "group flattened");
                report.applied(id);
                merged
            }
            Err(err) => {
                warn!(node = %id, error = %err, "failed to flatten group");
                report.failed(id, err);
                id
            }
        },
        FlattenMode::MergeChildren => {
            let children = node.children.clone();
            if children.len() > 1 {
                match host.flatten_nodes(&children, id, 0) {
                    Ok(merged) => {
                        debug!(
                            node = %id,
                            merged = %merged,
                            count = children.len(),
                            "children flattened"
                        );
                        report.applied(id);
                    }
                    Err(err) => {
                        warn!(node = %id, error = %err, "failed to flatten children");
                        report.failed(id, err);
                    }
                }
            }
            id
        }
        FlattenMode::None => id,
    }
}
