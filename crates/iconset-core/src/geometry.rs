//! Rectangles and content bounds.

use glam::DVec2;

/// Axis-aligned rectangle in some coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create bounds from position and size vectors.
    pub fn from_vecs(position: DVec2, size: DVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// X coordinate just past the rectangle.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y coordinate just past the rectangle.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Bounds::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Grow every side outward by `amount`.
    pub fn expand(&self, amount: f64) -> Bounds {
        Bounds::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// Same size, moved by `offset`.
    pub fn translate(&self, offset: DVec2) -> Bounds {
        Bounds::from_vecs(self.position() + offset, self.size())
    }

    /// Union of a sequence of bounds, or `None` if it is empty.
    pub fn union_all<'a>(bounds: impl IntoIterator<Item = &'a Bounds>) -> Option<Bounds> {
        bounds
            .into_iter()
            .fold(None, |acc: Option<Bounds>, b| Some(acc.map_or(*b, |a| a.union(b))))
    }
}

/// Extents of a subtree's visible content as `{min, max}` corners.
///
/// An empty subtree yields [`ContentBounds::UNBOUNDED`], whose corners are
/// inverted infinities. Merging it into another value is a no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ContentBounds {
    pub const UNBOUNDED: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x: x.min(x + width),
            min_y: y.min(y + height),
            max_x: x.max(x + width),
            max_y: y.max(y + height),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Merge another value into this one. Unbounded values are ignored.
    pub fn merge(&mut self, other: &ContentBounds) {
        if !other.is_bounded() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    pub fn translate(&self, offset: DVec2) -> ContentBounds {
        if !self.is_bounded() {
            return *self;
        }
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    pub fn width(&self) -> f64 {
        if self.is_bounded() { self.max_x - self.min_x } else { 0.0 }
    }

    pub fn height(&self) -> f64 {
        if self.is_bounded() { self.max_y - self.min_y } else { 0.0 }
    }

    pub fn to_bounds(&self) -> Option<Bounds> {
        self.is_bounded()
            .then(|| Bounds::new(self.min_x, self.min_y, self.width(), self.height()))
    }
}

impl Default for ContentBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_union() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(20.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), Bounds::new(0.0, 0.0, 30.0, 15.0));
        assert_eq!(Bounds::union_all(&[a, b]), Some(Bounds::new(0.0, 0.0, 30.0, 15.0)));
        assert_eq!(Bounds::union_all(std::iter::empty::<&Bounds>()), None);
    }

    #[test]
    fn test_unbounded_merge_is_ignored() {
        let mut bounds = ContentBounds::from_rect(1.0, 2.0, 3.0, 4.0);
        bounds.merge(&ContentBounds::UNBOUNDED);
        assert_eq!(bounds, ContentBounds::from_rect(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_merge_into_unbounded() {
        let mut bounds = ContentBounds::UNBOUNDED;
        assert!(!bounds.is_bounded());
        bounds.merge(&ContentBounds::from_rect(5.0, 5.0, 10.0, 2.0));
        assert!(bounds.is_bounded());
        assert_eq!(bounds.width(), 10.0);
        assert_eq!(bounds.height(), 2.0);
    }

    #[test]
    fn test_negative_size_is_normalized() {
        let bounds = ContentBounds::from_rect(10.0, 10.0, -4.0, 0.0);
        assert_eq!(bounds.min_x, 6.0);
        assert_eq!(bounds.max_x, 10.0);
        assert!(bounds.is_bounded());
    }
}
