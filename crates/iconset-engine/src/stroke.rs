//! Stroke weight restyling.

use iconset_core::{Document, NodeId};
use tracing::{debug, warn};

use crate::report::TraversalReport;

/// Set the stroke weight of every stroked vector leaf under `root`.
///
/// Only leaves that already carry strokes and a stroke weight are touched.
/// Stroke lists are never created or changed. A weight that is not finite or
/// not positive leaves the subtree untouched and returns an empty report.
pub fn apply_stroke_weight(doc: &mut Document, root: NodeId, weight: f64) -> TraversalReport {
    let mut report = TraversalReport::new();
    if !weight.is_finite() || weight <= 0.0 {
        return report;
    }

    for id in doc.subtree(root) {
        let Some(node) = doc.get(id) else {
            continue;
        };
        if !node.kind.is_vector_capable() {
            continue;
        }
        if node.strokes.is_empty() || node.stroke_weight.is_none() {
            report.skipped(id, "no stroke");
            continue;
        }
        match doc.set_stroke_weight(id, weight) {
            Ok(()) => {
                debug!(node = %id, weight, "stroke weight applied");
                report.applied(id);
            }
            Err(err) => {
                warn!(node = %id, error = %err, "failed to set stroke weight");
                report.failed(id, err);
            }
        }
    }
    report
}
