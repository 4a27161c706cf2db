//! Per-node outcomes of best-effort traversals.

use iconset_core::NodeId;

/// What happened to one node during a traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutcome {
    Applied,
    Skipped(String),
    Failed(String),
}

impl NodeOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, NodeOutcome::Failed(_))
    }
}

/// Ordered record of per-node outcomes.
///
/// A traversal keeps going after a node fails, so partial success shows up
/// here as a mix of `Applied` and `Failed` entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraversalReport {
    entries: Vec<(NodeId, NodeOutcome)>,
}

impl TraversalReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&mut self, node: NodeId) {
        self.entries.push((node, NodeOutcome::Applied));
    }

    pub fn skipped(&mut self, node: NodeId, reason: impl Into<String>) {
        self.entries.push((node, NodeOutcome::Skipped(reason.into())));
    }

    pub fn failed(&mut self, node: NodeId, reason: impl ToString) {
        self.entries.push((node, NodeOutcome::Failed(reason.to_string())));
    }

    /// Append all entries of another report.
    pub fn merge(&mut self, other: TraversalReport) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[(NodeId, NodeOutcome)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Outcome recorded last for `node`, if any.
    pub fn outcome(&self, node: NodeId) -> Option<&NodeOutcome> {
        self.entries.iter().rev().find(|(id, _)| *id == node).map(|(_, outcome)| outcome)
    }

    pub fn applied_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| *o == NodeOutcome::Applied).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.entries.iter().filter_map(|(id, outcome)| match outcome {
            NodeOutcome::Failed(reason) => Some((*id, reason.as_str())),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|(_, o)| o.is_failure())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = TraversalReport::new();
        report.applied(NodeId(1));
        report.skipped(NodeId(2), "no stroke");
        report.failed(NodeId(3), "node #3 is locked");

        assert_eq!(report.len(), 3);
        assert_eq!(report.applied_count(), 1);
        assert!(report.has_failures());
        assert_eq!(report.failures().collect::<Vec<_>>(), vec![(NodeId(3), "node #3 is locked")]);
        assert_eq!(report.outcome(NodeId(2)), Some(&NodeOutcome::Skipped("no stroke".into())));
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut first = TraversalReport::new();
        first.applied(NodeId(1));
        let mut second = TraversalReport::new();
        second.failed(NodeId(2), "boom");
        first.merge(second);

        let ids: Vec<_> = first.entries().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(2)]);
        assert_eq!(first.outcome(NodeId(7)), None);
    }
}
