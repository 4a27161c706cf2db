//! Core value types for scene documents.

/// Unique identifier for a node in a [`Document`](crate::Document).
///
/// Ids are handed out by the document arena and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A color value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create from hex string (e.g., "#9747FF" or "9747FF").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::from_rgb8(r, g, b))
    }

    /// Convert to 8-bit RGBA tuple.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A solid paint used for fills and strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paint {
    pub color: Color,
    /// Paint opacity (0.0 to 1.0), independent of the color alpha
    #[cfg_attr(feature = "serde", serde(default = "default_opacity"))]
    pub opacity: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_visible"))]
    pub visible: bool,
}

#[cfg(feature = "serde")]
fn default_opacity() -> f32 {
    1.0
}

#[cfg(feature = "serde")]
fn default_visible() -> bool {
    true
}

impl Paint {
    /// A fully opaque, visible solid paint.
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            visible: true,
        }
    }
}

/// Where a stroke sits relative to the shape outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrokeAlign {
    Inside,
    #[default]
    Center,
    Outside,
}

impl StrokeAlign {
    /// How far the painted stroke reaches outside the geometry, for a given weight.
    pub fn outset(self, weight: f64) -> f64 {
        match self {
            StrokeAlign::Inside => 0.0,
            StrokeAlign::Center => weight / 2.0,
            StrokeAlign::Outside => weight,
        }
    }
}

/// Per-axis resizing behavior of a node inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintType {
    /// Pinned to the left/top edge
    #[default]
    Min,
    /// Pinned to the center
    Center,
    /// Pinned to the right/bottom edge
    Max,
    /// Pinned to both edges
    Stretch,
    /// Position and size scale with the parent
    Scale,
}

/// Horizontal and vertical constraints of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    pub horizontal: ConstraintType,
    pub vertical: ConstraintType,
}

impl Constraints {
    /// Scale on both axes.
    pub const SCALE: Self = Self {
        horizontal: ConstraintType::Scale,
        vertical: ConstraintType::Scale,
    };

    pub fn is_scale(&self) -> bool {
        *self == Self::SCALE
    }
}

/// Apply a constraint along one axis when the parent grows from `old_extent` to `new_extent`.
///
/// Returns the new `(offset, length)` of the child on that axis.
pub fn constrain_axis(
    constraint: ConstraintType,
    offset: f64,
    length: f64,
    old_extent: f64,
    new_extent: f64,
) -> (f64, f64) {
    let delta = new_extent - old_extent;
    match constraint {
        ConstraintType::Min => (offset, length),
        ConstraintType::Max => (offset + delta, length),
        ConstraintType::Center => (offset + delta / 2.0, length),
        ConstraintType::Stretch => (offset, (length + delta).max(0.0)),
        ConstraintType::Scale => {
            let ratio = if old_extent > 0.0 { new_extent / old_extent } else { 1.0 };
            (offset * ratio, length * ratio)
        }
    }
}
