//! The scene document: node kinds, nodes and the arena that owns them.

mod document;
mod kind;
mod node;
#[cfg(feature = "serde")]
mod serde_impl;

pub use document::{Document, MIN_SIZE};
pub use kind::{Capabilities, FlattenMode, NodeKind};
pub use node::{SceneNode, DEFAULT_STROKE_WEIGHT};
