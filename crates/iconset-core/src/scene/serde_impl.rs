//! Serialized form of a [`Document`].
//!
//! Nodes are written as a flat list; loading rebuilds the arena and checks
//! that every parent/child link points both ways and that the page reaches
//! each node exactly once.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::errors::SceneError;
use crate::scene::{Document, NodeKind, SceneNode};
use crate::types::NodeId;

#[derive(serde::Serialize, serde::Deserialize)]
pub(crate) struct DocumentData {
    page: NodeId,
    #[serde(default)]
    selection: Vec<NodeId>,
    nodes: Vec<SceneNode>,
}

impl From<Document> for DocumentData {
    fn from(doc: Document) -> Self {
        Self {
            page: doc.page,
            selection: doc.selection,
            nodes: doc.nodes.into_values().collect(),
        }
    }
}

impl TryFrom<DocumentData> for Document {
    type Error = SceneError;

    fn try_from(data: DocumentData) -> Result<Self, Self::Error> {
        let mut nodes = IndexMap::with_capacity(data.nodes.len());
        for node in data.nodes {
            let id = node.id;
            if nodes.insert(id, node).is_some() {
                return Err(SceneError::Corrupt(format!("duplicate node id {id}")));
            }
        }

        match nodes.get(&data.page) {
            Some(page) if page.kind == NodeKind::Page && page.parent.is_none() => {}
            _ => return Err(SceneError::Corrupt(format!("page {} is missing", data.page))),
        }

        for node in nodes.values() {
            if node.kind == NodeKind::Page && node.id != data.page {
                return Err(SceneError::Corrupt(format!("second page {}", node.id)));
            }
            if !node.children.is_empty() && !node.kind.is_container() {
                return Err(SceneError::Corrupt(format!("leaf {} has children", node.id)));
            }
            for child in &node.children {
                let linked = nodes.get(child).is_some_and(|c| c.parent == Some(node.id));
                if !linked {
                    let message = format!("{} -> {child} is not linked back", node.id);
                    return Err(SceneError::Corrupt(message));
                }
            }
            if let Some(parent) = node.parent {
                let listed = nodes.get(&parent).is_some_and(|p| p.children.contains(&node.id));
                if !listed {
                    let message = format!("{} is missing from {parent}", node.id);
                    return Err(SceneError::Corrupt(message));
                }
            } else if node.id != data.page {
                return Err(SceneError::Corrupt(format!("{} is detached", node.id)));
            }
        }

        let mut reached = HashSet::with_capacity(nodes.len());
        let mut stack = vec![data.page];
        while let Some(id) = stack.pop() {
            if !reached.insert(id) {
                return Err(SceneError::Corrupt(format!("{id} is reached twice")));
            }
            if let Some(node) = nodes.get(&id) {
                stack.extend(node.children.iter().copied());
            }
        }
        if let Some(id) = nodes.keys().find(|id| !reached.contains(*id)) {
            return Err(SceneError::Corrupt(format!("{id} is not reachable from the page")));
        }

        let next_id = nodes.keys().map(|id| id.0).max().unwrap_or(0) + 1;
        let selection = data.selection.into_iter().filter(|id| nodes.contains_key(id)).collect();
        Ok(Document {
            nodes,
            page: data.page,
            selection,
            next_id,
        })
    }
}
