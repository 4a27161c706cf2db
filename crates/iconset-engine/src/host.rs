//! The document host seam.
//!
//! The engine edits a [`Document`] through a [`Host`], which also owns the
//! capabilities a real editor provides around the tree: outline conversion,
//! flattening, variant combination, user notices and the viewport. Every
//! capability has a default implementation on top of the document, so a
//! host only overrides what differs.

use std::time::Duration;

use iconset_core::{Document, NodeId, NodeKind, SceneResult};

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub timeout: Option<Duration>,
}

/// Trait for document hosts.
pub trait Host {
    fn document(&self) -> &Document;

    fn document_mut(&mut self) -> &mut Document;

    /// Whether nodes of `kind` can turn their stroke into filled geometry.
    fn can_outline_stroke(&self, kind: NodeKind) -> bool {
        kind.capabilities().outlinable
    }

    /// Create a filled vector from a node's stroke, appended to its parent.
    fn outline_stroke(&mut self, id: NodeId) -> SceneResult<NodeId> {
        self.document_mut().outline_stroke(id)
    }

    /// Replace a group by one merged vector at the same child index.
    fn flatten_group(&mut self, id: NodeId) -> SceneResult<NodeId> {
        self.document_mut().flatten_group(id)
    }

    /// Merge several nodes into one vector inserted into `parent` at `index`.
    fn flatten_nodes(
        &mut self,
        ids: &[NodeId],
        parent: NodeId,
        index: usize,
    ) -> SceneResult<NodeId> {
        self.document_mut().flatten_nodes(ids, parent, index)
    }

    /// Whether the host can combine components into a variant set at all.
    fn can_combine_as_variants(&self) -> bool {
        true
    }

    fn combine_as_variants(
        &mut self,
        components: &[NodeId],
        parent: NodeId,
    ) -> SceneResult<NodeId> {
        self.document_mut().combine_as_variants(components, parent)
    }

    fn set_selection(&mut self, ids: &[NodeId]) {
        self.document_mut().set_selection(ids);
    }

    /// Show a message to the user.
    fn notify(&mut self, message: &str, timeout: Option<Duration>);

    /// Bring nodes into view.
    fn scroll_into_view(&mut self, ids: &[NodeId]);

    /// End the editing session.
    fn close(&mut self);
}

/// In-memory host that records notices and viewport changes.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    document: Document,
    notices: Vec<Notice>,
    viewport: Vec<NodeId>,
    closed: bool,
}

impl Canvas {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ..Default::default()
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take the recorded notices, leaving none behind.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Nodes passed to the last `scroll_into_view` call.
    pub fn viewport(&self) -> &[NodeId] {
        &self.viewport
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl Host for Canvas {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    fn notify(&mut self, message: &str, timeout: Option<Duration>) {
        self.notices.push(Notice {
            message: message.to_string(),
            timeout,
        });
    }

    fn scroll_into_view(&mut self, ids: &[NodeId]) {
        self.viewport = ids.to_vec();
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconset_core::SceneNode;

    #[test]
    fn test_canvas_records_notices_and_viewport() {
        let mut canvas = Canvas::default();
        let frame = canvas.document_mut().add_root(SceneNode::new(NodeKind::Frame)).unwrap();

        canvas.notify("hello", None);
        canvas.set_selection(&[frame]);
        canvas.scroll_into_view(&[frame]);
        canvas.close();

        assert_eq!(canvas.notices()[0].message, "hello");
        assert_eq!(canvas.document().selection(), &[frame]);
        assert_eq!(canvas.viewport(), &[frame]);
        assert!(canvas.is_closed());
        assert_eq!(canvas.drain_notices().len(), 1);
        assert!(canvas.notices().is_empty());
    }

    #[test]
    fn test_default_capabilities_follow_node_kinds() {
        let canvas = Canvas::default();
        assert!(canvas.can_outline_stroke(NodeKind::Ellipse));
        assert!(!canvas.can_outline_stroke(NodeKind::BooleanOperation));
        assert!(canvas.can_combine_as_variants());
    }

    #[test]
    fn test_document_json_round_trip() {
        let mut doc = Document::new();
        let frame = doc.add_root(SceneNode::new(NodeKind::Frame).with_name("icon")).unwrap();
        let star = doc.add_child(frame, SceneNode::new(NodeKind::Star)).unwrap();
        doc.set_selection(&[frame]);

        let json = serde_json::to_string(&doc).unwrap();
        let mut loaded: Document = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.children(frame), &[star]);
        assert_eq!(loaded.selection(), &[frame]);
        let added = loaded.add_root(SceneNode::new(NodeKind::Group)).unwrap();
        assert!(added.0 > star.0);
    }

    #[test]
    fn test_corrupt_document_is_rejected() {
        let mut doc = Document::new();
        doc.add_root(SceneNode::new(NodeKind::Frame)).unwrap();
        let mut value = serde_json::to_value(&doc).unwrap();
        // Drop the page's child list so the frame points at a parent that does not list it.
        value["nodes"][0]["children"] = serde_json::json!([]);

        assert!(serde_json::from_value::<Document>(value).is_err());
    }

    #[test]
    fn test_unreachable_cycle_is_rejected() {
        let mut doc = Document::new();
        let a = doc.add_root(SceneNode::new(NodeKind::Frame)).unwrap();
        let b = doc.add_child(a, SceneNode::new(NodeKind::Frame)).unwrap();
        let mut value = serde_json::to_value(&doc).unwrap();
        // a and b point at each other and the page no longer lists a.
        value["nodes"][0]["children"] = serde_json::json!([]);
        value["nodes"][1]["parent"] = serde_json::to_value(b).unwrap();
        value["nodes"][2]["children"] = serde_json::to_value([a]).unwrap();

        let err = serde_json::from_value::<Document>(value).unwrap_err();
        assert!(err.to_string().contains("not reachable"), "{err}");
    }

    #[test]
    fn test_child_listed_twice_is_rejected() {
        let mut doc = Document::new();
        let frame = doc.add_root(SceneNode::new(NodeKind::Frame)).unwrap();
        let mut value = serde_json::to_value(&doc).unwrap();
        value["nodes"][0]["children"] = serde_json::to_value([frame, frame]).unwrap();

        let err = serde_json::from_value::<Document>(value).unwrap_err();
        assert!(err.to_string().contains("reached twice"), "{err}");
    }
}
