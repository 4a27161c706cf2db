//! Error types for variant generation.

use iconset_core::SceneError;
use thiserror::Error;

/// Result type for pipeline steps.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// A request that cannot be started. Reported to the user before any edit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please enter a property name")]
    EmptyPropertyName,

    #[error("Please add at least one variant")]
    NoVariants,

    #[error("Variant \"{name}\" has an invalid size: {size}")]
    InvalidVariantSize { name: String, size: f64 },

    #[error("Please select at least one icon")]
    NoSelection,
}

/// Failure while building the variants of one source node.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("source has no visible content")]
    Unbounded,

    #[error("no variant could be created")]
    NoComponents,
}
