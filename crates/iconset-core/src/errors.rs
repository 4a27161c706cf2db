//! Error types for scene document operations.

use crate::scene::NodeKind;
use crate::types::NodeId;
use thiserror::Error;

/// Result type for document operations.
pub type SceneResult<T> = std::result::Result<T, SceneError>;

/// Errors raised by the document when a structural or style edit is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("node {0} does not exist")]
    NotFound(NodeId),

    #[error("node {0} is locked")]
    Locked(NodeId),

    #[error("node {id} ({kind:?}) cannot have children")]
    NotAContainer { id: NodeId, kind: NodeKind },

    #[error("{kind:?} nodes do not support {operation}")]
    Unsupported { kind: NodeKind, operation: &'static str },

    #[error("invalid size {width}x{height}: both sides must be finite and at least 0.01")]
    InvalidSize { width: f64, height: f64 },

    #[error("moving node {child} under {parent} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },

    #[error("invalid stroke weight {0}: must be finite and non-negative")]
    InvalidStrokeWeight(f64),

    #[error("node {0} has no visible stroke to outline")]
    NothingToOutline(NodeId),

    #[error("operation needs at least one node")]
    EmptySelection,

    #[error("child index {index} is out of range for node {parent} ({len} children)")]
    InvalidIndex { parent: NodeId, index: usize, len: usize },

    #[error("node {0} is not a component")]
    NotAComponent(NodeId),

    #[error("the page root cannot be {0}")]
    PageRoot(&'static str),

    #[error("corrupt document: {0}")]
    Corrupt(String),
}
