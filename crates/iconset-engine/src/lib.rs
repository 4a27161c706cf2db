//! Variant generation engine.
//!
//! Turns selected icons into families of resized, restyled components grouped
//! into variant sets. The pipeline for one source node is:
//!
//! 1. [`compute_content_bounds`] measures the source once
//! 2. each variant clones the source and resizes the clone
//! 3. [`apply_stroke_weight`] restyles existing strokes
//! 4. [`outline_strokes`] and [`flatten_subtree`] collapse the geometry
//! 5. [`build_component`] re-parents the content into a sized component
//! 6. [`assemble_variant_set`] lays the components out and combines them
//!
//! [`Generator`] drives the whole pipeline against a [`Host`].

pub mod assemble;
pub mod errors;
pub mod geometry;
pub mod host;
pub mod options;
pub mod orchestrator;
pub mod outline;
pub mod report;
pub mod request;
pub mod stroke;
pub mod variant_set;

pub use assemble::{
    build_component, component_name, normalize_scale_constraints, AssembledComponent,
};
pub use errors::{GenerateError, ValidationError};
pub use geometry::{compute_content_bounds, content_scale_factor, source_size};
pub use host::{Canvas, Host, Notice};
pub use options::EngineOptions;
pub use orchestrator::{GenerationSummary, Generator, SourceFailure};
pub use outline::{collect_stroked_leaves, flatten_subtree, outline_strokes};
pub use report::{NodeOutcome, TraversalReport};
pub use request::{GenerationRequest, VariantSpec};
pub use stroke::apply_stroke_weight;
pub use variant_set::{assemble_variant_set, CombineFailure, VariantSetOutcome, VariantSetPlan};
