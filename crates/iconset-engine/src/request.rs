//! Generation requests.

use iconset_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Component name used when the request leaves it blank.
pub const DEFAULT_COMPONENT_NAME: &str = "Icon Component";

/// One size variant to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub name: String,
    pub size: f64,
    /// Stroke weight for this variant, applied when stroke styling is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<f64>,
}

impl VariantSpec {
    pub fn new(name: impl Into<String>, size: f64) -> Self {
        Self {
            name: name.into(),
            size,
            stroke: None,
        }
    }

    pub fn with_stroke(mut self, stroke: f64) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Stroke weight to apply, if stroke styling is on and the weight is positive.
    pub fn stroke_weight(&self, stroke_enabled: bool) -> Option<f64> {
        self.stroke.filter(|&w| stroke_enabled && w.is_finite() && w > 0.0)
    }
}

/// Everything needed to generate variant sets for the selected icons.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub source_nodes: Vec<NodeId>,
    pub variants: Vec<VariantSpec>,
    #[serde(default)]
    pub stroke_enabled: bool,
    #[serde(default)]
    pub outline_flatten_enabled: bool,
    #[serde(default)]
    pub component_name: String,
    pub property_name: String,
}

impl GenerationRequest {
    /// Check the request in the order the user should fix it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.property_name().is_empty() {
            return Err(ValidationError::EmptyPropertyName);
        }
        if self.variants.is_empty() {
            return Err(ValidationError::NoVariants);
        }
        if let Some(bad) = self.variants.iter().find(|v| !v.size.is_finite() || v.size <= 0.0) {
            return Err(ValidationError::InvalidVariantSize {
                name: bad.name.clone(),
                size: bad.size,
            });
        }
        if self.source_nodes.is_empty() {
            return Err(ValidationError::NoSelection);
        }
        Ok(())
    }

    /// Trimmed component name, or the default when blank.
    pub fn component_name(&self) -> &str {
        match self.component_name.trim() {
            "" => DEFAULT_COMPONENT_NAME,
            name => name,
        }
    }

    pub fn property_name(&self) -> &str {
        self.property_name.trim()
    }
}
