//! Messages exchanged with the UI.
//!
//! Both directions are JSON objects tagged by a kebab-case `type` field,
//! with camelCase payload fields.

use iconset_core::NodeId;
use iconset_engine::{GenerationRequest, VariantSpec};
use serde::{Deserialize, Serialize};

use crate::config::PluginConfig;

/// Messages sent by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    SaveConfig { config: PluginConfig },
    RequestConfig,
    CreateComponent(CreateComponent),
    Cancel,
}

/// Form values of a generation request. The sources are the host selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComponent {
    pub variants: Vec<VariantSpec>,
    #[serde(default)]
    pub stroke_enabled: bool,
    #[serde(default)]
    pub outline_flatten_enabled: bool,
    #[serde(default)]
    pub component_name: String,
    #[serde(default)]
    pub property_name: String,
}

impl CreateComponent {
    pub fn into_request(self, source_nodes: Vec<NodeId>) -> GenerationRequest {
        GenerationRequest {
            source_nodes,
            variants: self.variants,
            stroke_enabled: self.stroke_enabled,
            outline_flatten_enabled: self.outline_flatten_enabled,
            component_name: self.component_name,
            property_name: self.property_name,
        }
    }
}

/// Messages sent to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PluginMessage {
    LoadConfig {
        config: Option<PluginConfig>,
    },
    #[serde(rename_all = "camelCase")]
    SelectionChanged {
        has_selection: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selection_name: Option<String>,
    },
}
