//! Core types for icon variant generation.
//!
//! This crate provides the document model the generation engine edits:
//! - Value types (colors, paints, constraints, node ids)
//! - Node kinds with their static capability sets
//! - The arena [`Document`] with its structural operations
//! - Stack auto-layout
//! - Error types

pub mod errors;
pub mod geometry;
pub mod layout;
pub mod scene;
pub mod types;

pub use errors::*;
pub use geometry::{Bounds, ContentBounds};
pub use layout::{AutoLayout, AxisSizing, Direction, Padding};
pub use scene::*;
pub use types::*;
