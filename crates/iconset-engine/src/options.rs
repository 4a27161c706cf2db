//! Layout and styling constants for generated variant sets.

use iconset_core::{AutoLayout, AxisSizing, Color, Paint, StrokeAlign};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// Options for placing and decorating variant sets.
///
/// Every field has a default, so a partial JSON object is enough to
/// override single values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    /// Vertical gap between a source icon and its variant set
    pub set_offset: f64,
    /// Extra vertical offset per processed source
    pub source_spacing: f64,
    /// Horizontal gap between components before they are combined
    pub component_gap: f64,
    /// Gap between variants inside the set
    pub set_spacing: f64,
    pub set_padding: f64,
    /// Whether the set grows along its stacking axis to fit the variants
    pub hug_primary_axis: bool,
    pub border_color: Color,
    pub border_weight: f64,
    pub border_align: StrokeAlign,
    pub border_dash: SmallVec<[f64; 4]>,
    /// How long user notices stay visible, in milliseconds
    pub notice_timeout_ms: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            set_offset: 50.0,
            source_spacing: 200.0,
            component_gap: 16.0,
            set_spacing: 16.0,
            set_padding: 24.0,
            hug_primary_axis: true,
            border_color: Color::rgb(151.0 / 255.0, 71.0 / 255.0, 1.0),
            border_weight: 2.0,
            border_align: StrokeAlign::Inside,
            border_dash: smallvec![8.0, 4.0],
            notice_timeout_ms: None,
        }
    }
}

impl EngineOptions {
    /// Auto-layout applied to a combined variant set.
    pub fn set_layout(&self) -> AutoLayout {
        let primary = if self.hug_primary_axis { AxisSizing::Auto } else { AxisSizing::Fixed };
        AutoLayout::horizontal()
            .with_spacing(self.set_spacing)
            .with_padding(self.set_padding)
            .with_primary_axis_sizing(primary)
            .with_counter_axis_sizing(AxisSizing::Auto)
    }

    pub fn border_paint(&self) -> Paint {
        Paint::solid(self.border_color)
    }

    pub fn notice_timeout(&self) -> Option<std::time::Duration> {
        self.notice_timeout_ms.map(std::time::Duration::from_millis)
    }
}
