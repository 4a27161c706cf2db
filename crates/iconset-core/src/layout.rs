//! Auto-layout for frame-like containers.
//!
//! A stack layout in the spirit of a flexbox row or column: children are
//! placed one after another along the primary axis, separated by
//! `item_spacing` and inset by `padding`. The container can hug its content
//! on either axis.

use crate::geometry::Bounds;

/// Direction for auto-layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Horizontal layout (left to right)
    #[default]
    Horizontal,
    /// Vertical layout (top to bottom)
    Vertical,
}

/// How a container sizes itself along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisSizing {
    /// Keep the current size
    #[default]
    Fixed,
    /// Hug the content plus padding
    Auto,
}

/// Padding on all sides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Create uniform padding.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Total horizontal padding.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical padding.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Auto-layout configuration attached to a container node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoLayout {
    pub direction: Direction,
    /// Gap between items
    pub item_spacing: f64,
    pub padding: Padding,
    pub primary_axis_sizing: AxisSizing,
    pub counter_axis_sizing: AxisSizing,
}

impl AutoLayout {
    /// Create a horizontal stack layout.
    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Default::default()
        }
    }

    /// Create a vertical stack layout.
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Default::default()
        }
    }

    /// Set the gap between items.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.item_spacing = spacing;
        self
    }

    /// Set uniform padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Padding::uniform(padding);
        self
    }

    pub fn with_counter_axis_sizing(mut self, sizing: AxisSizing) -> Self {
        self.counter_axis_sizing = sizing;
        self
    }

    pub fn with_primary_axis_sizing(mut self, sizing: AxisSizing) -> Self {
        self.primary_axis_sizing = sizing;
        self
    }

    /// Stack `children` (their sizes) inside a container of `container_size`.
    ///
    /// Child positions are local to the container. Returns the placed child
    /// bounds and the container size after applying the sizing modes.
    pub fn arrange(
        &self,
        container: (f64, f64),
        children: &[(f64, f64)],
    ) -> (Vec<Bounds>, (f64, f64)) {
        let n = children.len();
        let total_gap = self.item_spacing * n.saturating_sub(1) as f64;

        let (primary_total, cross_max) =
            children.iter().fold((0.0_f64, 0.0_f64), |(sum, max), &(w, h)| match self.direction {
                Direction::Horizontal => (sum + w, max.max(h)),
                Direction::Vertical => (sum + h, max.max(w)),
            });

        let mut cursor = match self.direction {
            Direction::Horizontal => self.padding.left,
            Direction::Vertical => self.padding.top,
        };

        let placed = children
            .iter()
            .map(|&(width, height)| {
                let bounds = match self.direction {
                    Direction::Horizontal => Bounds::new(cursor, self.padding.top, width, height),
                    Direction::Vertical => Bounds::new(self.padding.left, cursor, width, height),
                };
                cursor += match self.direction {
                    Direction::Horizontal => width,
                    Direction::Vertical => height,
                } + self.item_spacing;
                bounds
            })
            .collect();

        let hug_primary = primary_total + total_gap;
        let (mut width, mut height) = container;
        match self.direction {
            Direction::Horizontal => {
                if self.primary_axis_sizing == AxisSizing::Auto {
                    width = hug_primary + self.padding.horizontal();
                }
                if self.counter_axis_sizing == AxisSizing::Auto {
                    height = cross_max + self.padding.vertical();
                }
            }
            Direction::Vertical => {
                if self.primary_axis_sizing == AxisSizing::Auto {
                    height = hug_primary + self.padding.vertical();
                }
                if self.counter_axis_sizing == AxisSizing::Auto {
                    width = cross_max + self.padding.horizontal();
                }
            }
        }

        (placed, (width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_layout() {
        let layout = AutoLayout::horizontal().with_spacing(16.0).with_padding(24.0);
        let (placed, size) = layout.arrange((200.0, 100.0), &[(24.0, 24.0), (48.0, 48.0)]);

        assert_eq!(placed[0], Bounds::new(24.0, 24.0, 24.0, 24.0));
        assert_eq!(placed[1], Bounds::new(64.0, 24.0, 48.0, 48.0));
        assert_eq!(size, (200.0, 100.0));
    }

    #[test]
    fn test_counter_axis_hugs() {
        let layout = AutoLayout::horizontal()
            .with_spacing(16.0)
            .with_padding(24.0)
            .with_counter_axis_sizing(AxisSizing::Auto);
        let (_, size) = layout.arrange((200.0, 10.0), &[(24.0, 24.0), (48.0, 48.0)]);
        assert_eq!(size, (200.0, 96.0));
    }

    #[test]
    fn test_vertical_hugs_both_axes() {
        let layout = AutoLayout::vertical()
            .with_spacing(8.0)
            .with_padding(4.0)
            .with_primary_axis_sizing(AxisSizing::Auto)
            .with_counter_axis_sizing(AxisSizing::Auto);
        let (placed, size) = layout.arrange((0.0, 0.0), &[(10.0, 20.0), (30.0, 5.0)]);

        assert_eq!(placed[1], Bounds::new(4.0, 32.0, 30.0, 5.0));
        assert_eq!(size, (38.0, 41.0));
    }

    #[test]
    fn test_empty_children() {
        let layout = AutoLayout::horizontal()
            .with_padding(24.0)
            .with_primary_axis_sizing(AxisSizing::Auto);
        let (placed, size) = layout.arrange((100.0, 100.0), &[]);
        assert!(placed.is_empty());
        assert_eq!(size, (48.0, 100.0));
    }
}
