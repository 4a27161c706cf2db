//! Node kinds and the capabilities each one exposes.

/// The closed set of node kinds a document can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum NodeKind {
    Page,
    Frame,
    Group,
    Component,
    ComponentSet,
    Vector,
    Line,
    Ellipse,
    Rectangle,
    Polygon,
    Star,
    BooleanOperation,
    Text,
}

/// How a node collapses into a single shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenMode {
    /// The node flattens itself (groups)
    Native,
    /// The node stays and its children merge into one shape (frames)
    MergeChildren,
    None,
}

/// Static capability set of a [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Owns an ordered child list
    pub container: bool,
    /// Exposes strokes and a stroke weight
    pub stylable: bool,
    /// Can turn its stroke into filled geometry
    pub outlinable: bool,
    pub flatten: FlattenMode,
    /// Can be consumed by a multi-node flatten
    pub mergeable: bool,
    /// Accepts horizontal/vertical constraints
    pub constrainable: bool,
    pub auto_layout: bool,
}

impl NodeKind {
    pub const fn capabilities(self) -> Capabilities {
        use NodeKind::*;
        match self {
            Page => Capabilities {
                container: true,
                stylable: false,
                outlinable: false,
                flatten: FlattenMode::None,
                mergeable: false,
                constrainable: false,
                auto_layout: false,
            },
            Frame | Component => Capabilities {
                container: true,
                stylable: true,
                outlinable: false,
                flatten: FlattenMode::MergeChildren,
                mergeable: matches!(self, Frame),
                constrainable: true,
                auto_layout: true,
            },
            ComponentSet => Capabilities {
                container: true,
                stylable: true,
                outlinable: false,
                flatten: FlattenMode::None,
                mergeable: false,
                constrainable: true,
                auto_layout: true,
            },
            Group => Capabilities {
                container: true,
                stylable: false,
                outlinable: false,
                flatten: FlattenMode::Native,
                mergeable: true,
                constrainable: false,
                auto_layout: false,
            },
            Vector | Line | Ellipse | Rectangle | Polygon | Star => Capabilities {
                container: false,
                stylable: true,
                outlinable: true,
                flatten: FlattenMode::None,
                mergeable: true,
                constrainable: true,
                auto_layout: false,
            },
            BooleanOperation | Text => Capabilities {
                container: false,
                stylable: true,
                outlinable: false,
                flatten: FlattenMode::None,
                mergeable: true,
                constrainable: true,
                auto_layout: false,
            },
        }
    }

    pub const fn is_container(self) -> bool {
        self.capabilities().container
    }

    /// Frame-like containers define their own coordinate box and clip content.
    pub const fn is_frame_like(self) -> bool {
        matches!(self, NodeKind::Frame | NodeKind::Component | NodeKind::ComponentSet)
    }

    pub const fn is_group(self) -> bool {
        matches!(self, NodeKind::Group)
    }

    /// Leaf kinds that carry stroke and fill geometry.
    pub const fn is_vector_capable(self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            Vector | Line | Ellipse | Rectangle | Polygon | Star | BooleanOperation
        )
    }
}
