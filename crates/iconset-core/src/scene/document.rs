//! The document arena.
//!
//! Nodes live in one insertion-ordered map keyed by [`NodeId`]. Parent and
//! child links are plain ids kept consistent in both directions by the
//! structural operations below, so re-parenting and removal never leave a
//! dangling reference behind.

use glam::DVec2;
use indexmap::IndexMap;

use crate::errors::{SceneError, SceneResult};
use crate::geometry::Bounds;
use crate::layout::AutoLayout;
use crate::scene::{FlattenMode, NodeKind, SceneNode};
use crate::types::{constrain_axis, ConstraintType, Constraints, NodeId, Paint, StrokeAlign};

/// Smallest width or height a node can be resized to.
pub const MIN_SIZE: f64 = 0.01;

/// An editable scene document with a single page.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "crate::scene::serde_impl::DocumentData",
        into = "crate::scene::serde_impl::DocumentData"
    )
)]
pub struct Document {
    pub(crate) nodes: IndexMap<NodeId, SceneNode>,
    pub(crate) page: NodeId,
    pub(crate) selection: Vec<NodeId>,
    pub(crate) next_id: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding one empty page.
    pub fn new() -> Self {
        let page = NodeId(0);
        let mut root = SceneNode::new(NodeKind::Page);
        root.id = page;
        let mut nodes = IndexMap::new();
        nodes.insert(page, root);
        Self {
            nodes,
            page,
            selection: Vec::new(),
            next_id: 1,
        }
    }

    /// The page root. Top-level content is a child of this node.
    pub fn page(&self) -> NodeId {
        self.page
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Get a node by ID or fail with [`SceneError::NotFound`].
    pub fn node(&self, id: NodeId) -> SceneResult<&SceneNode> {
        self.nodes.get(&id).ok_or(SceneError::NotFound(id))
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    /// First node with the given name, in insertion order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.values().find(|n| n.name == name).map(|n| n.id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Position of a node within its parent's child list.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Ids of a subtree in pre-order, starting with `id` itself.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                result.push(current);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        result
    }

    /// Position in page coordinates.
    pub fn absolute_position(&self, id: NodeId) -> DVec2 {
        let mut position = DVec2::ZERO;
        let mut current = self.nodes.get(&id);
        while let Some(node) = current {
            if node.kind == NodeKind::Page {
                break;
            }
            position += node.position();
            current = node.parent.and_then(|p| self.nodes.get(&p));
        }
        position
    }

    /// Bounds in page coordinates.
    pub fn absolute_bounds(&self, id: NodeId) -> SceneResult<Bounds> {
        let node = self.node(id)?;
        Ok(Bounds::from_vecs(self.absolute_position(id), node.size()))
    }

    fn entry_mut(&mut self, id: NodeId) -> SceneResult<&mut SceneNode> {
        self.nodes.get_mut(&id).ok_or(SceneError::NotFound(id))
    }

    /// Mutable access that honors the node's lock.
    fn editable(&mut self, id: NodeId) -> SceneResult<&mut SceneNode> {
        let node = self.entry_mut(id)?;
        if node.locked {
            return Err(SceneError::Locked(id));
        }
        Ok(node)
    }

    fn container(&self, id: NodeId) -> SceneResult<&SceneNode> {
        let node = self.node(id)?;
        if !node.kind.is_container() {
            return Err(SceneError::NotAContainer { id, kind: node.kind });
        }
        if node.locked {
            return Err(SceneError::Locked(id));
        }
        Ok(node)
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Add a detached node (and no children) as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, mut node: SceneNode) -> SceneResult<NodeId> {
        self.container(parent)?;
        if node.kind == NodeKind::Page {
            return Err(SceneError::PageRoot("nested"));
        }
        let id = self.next_id();
        node.id = id;
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.insert(id, node);
        self.entry_mut(parent)?.children.push(id);
        self.relayout(parent);
        Ok(id)
    }

    /// Add a node as the last child of the page.
    pub fn add_root(&mut self, node: SceneNode) -> SceneResult<NodeId> {
        self.add_child(self.page, node)
    }

    /// Move `child` under `parent` at `index`, detaching it from its current parent.
    ///
    /// Local coordinates are kept as they are.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> SceneResult<()> {
        self.container(parent)?;
        let child_node = self.node(child)?;
        if child_node.kind == NodeKind::Page {
            return Err(SceneError::PageRoot("moved"));
        }
        if self.is_ancestor(child, parent) {
            return Err(SceneError::CycleDetected { parent, child });
        }
        let old_parent = child_node.parent;
        if let Some(old) = old_parent {
            if old != parent && self.node(old)?.locked {
                return Err(SceneError::Locked(old));
            }
        }

        let mut len = self.children(parent).len();
        if old_parent == Some(parent) {
            len -= 1;
        }
        if index > len {
            return Err(SceneError::InvalidIndex { parent, index, len });
        }

        self.detach(child);
        self.entry_mut(parent)?.children.insert(index, child);
        self.entry_mut(child)?.parent = Some(parent);

        if let Some(old) = old_parent.filter(|&old| old != parent) {
            self.relayout(old);
        }
        self.relayout(parent);
        Ok(())
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        let mut index = self.children(parent).len();
        if self.parent(child) == Some(parent) {
            index = index.saturating_sub(1);
        }
        self.insert_child(parent, index, child)
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.children.retain(|&c| c != id);
            }
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
    }

    /// Remove a node and its whole subtree from the document.
    pub fn remove(&mut self, id: NodeId) -> SceneResult<()> {
        if id == self.page {
            return Err(SceneError::PageRoot("removed"));
        }
        if self.node(id)?.locked {
            return Err(SceneError::Locked(id));
        }
        let parent = self.parent(id);
        self.detach(id);
        for node in self.subtree(id) {
            self.nodes.shift_remove(&node);
        }
        self.selection.retain(|&s| self.nodes.contains_key(&s));
        if let Some(parent) = parent {
            self.relayout(parent);
        }
        Ok(())
    }

    /// Deep-copy a subtree. The copy is appended to the original's parent.
    pub fn clone_subtree(&mut self, id: NodeId) -> SceneResult<NodeId> {
        if id == self.page {
            return Err(SceneError::PageRoot("cloned"));
        }
        let parent = self.parent(id).unwrap_or(self.page);
        let copy = self.copy_detached(id, parent)?;
        self.entry_mut(parent)?.children.push(copy);
        self.relayout(parent);
        Ok(copy)
    }

    /// Create an empty `size × size` component as the last child of `parent`.
    pub fn create_component(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        size: f64,
    ) -> SceneResult<NodeId> {
        if !size.is_finite() || size < MIN_SIZE {
            return Err(SceneError::InvalidSize { width: size, height: size });
        }
        let component = SceneNode::new(NodeKind::Component)
            .with_name(name)
            .with_bounds(0.0, 0.0, size, size);
        self.add_child(parent, component)
    }

    fn copy_detached(&mut self, id: NodeId, parent: NodeId) -> SceneResult<NodeId> {
        let mut node = self.node(id)?.clone();
        let new_id = self.next_id();
        let children = std::mem::take(&mut node.children);
        node.id = new_id;
        node.parent = Some(parent);
        self.nodes.insert(new_id, node);
        for child in children {
            let child_copy = self.copy_detached(child, new_id)?;
            self.entry_mut(new_id)?.children.push(child_copy);
        }
        Ok(new_id)
    }

    // ------------------------------------------------------------------
    // Geometry and attributes
    // ------------------------------------------------------------------

    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) -> SceneResult<()> {
        let node = self.editable(id)?;
        node.x = x;
        node.y = y;
        Ok(())
    }

    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> SceneResult<()> {
        self.editable(id)?.name = name.into();
        Ok(())
    }

    pub fn set_locked(&mut self, id: NodeId, locked: bool) -> SceneResult<()> {
        self.entry_mut(id)?.locked = locked;
        Ok(())
    }

    /// Resize a node, applying each descendant's constraints.
    ///
    /// Children of groups always scale with the group. Stroke weights are
    /// never changed.
    pub fn resize(&mut self, id: NodeId, width: f64, height: f64) -> SceneResult<()> {
        if !(width.is_finite() && height.is_finite()) || width < MIN_SIZE || height < MIN_SIZE {
            return Err(SceneError::InvalidSize { width, height });
        }
        let node = self.editable(id)?;
        if node.kind == NodeKind::Page {
            return Err(SceneError::PageRoot("resized"));
        }
        let old = node.size();
        node.width = width;
        node.height = height;
        self.propagate_resize(id, old, DVec2::new(width, height));

        if let Some(parent) = self.parent(id) {
            self.relayout(parent);
        }
        self.relayout(id);
        Ok(())
    }

    fn propagate_resize(&mut self, id: NodeId, old: DVec2, new: DVec2) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let is_group = node.kind.is_group();
        for child in node.children.clone() {
            let constraints = if is_group {
                Constraints::SCALE
            } else {
                self.resize_constraints(child)
            };
            let Some(child_node) = self.nodes.get_mut(&child) else {
                continue;
            };
            let (x, width) = constrain_axis(
                constraints.horizontal,
                child_node.x,
                child_node.width,
                old.x,
                new.x,
            );
            let (y, height) = constrain_axis(
                constraints.vertical,
                child_node.y,
                child_node.height,
                old.y,
                new.y,
            );
            let child_old = child_node.size();
            child_node.x = x;
            child_node.y = y;
            child_node.width = width;
            child_node.height = height;

            let child_new = DVec2::new(width, height);
            if child_new != child_old {
                self.propagate_resize(child, child_old, child_new);
            }
        }
    }

    /// Constraints a node follows when its parent is resized.
    ///
    /// Groups carry no constraints of their own. An axis of a group scales
    /// when every child scales on that axis, and is pinned otherwise.
    fn resize_constraints(&self, id: NodeId) -> Constraints {
        let Some(node) = self.nodes.get(&id) else {
            return Constraints::default();
        };
        if let Some(constraints) = node.constraints {
            return constraints;
        }
        if !node.kind.is_group() || node.children.is_empty() {
            return Constraints::default();
        }
        let children: Vec<Constraints> =
            node.children.iter().map(|&child| self.resize_constraints(child)).collect();
        let axis = |scales: bool| if scales { ConstraintType::Scale } else { ConstraintType::Min };
        Constraints {
            horizontal: axis(children.iter().all(|c| c.horizontal == ConstraintType::Scale)),
            vertical: axis(children.iter().all(|c| c.vertical == ConstraintType::Scale)),
        }
    }

    pub fn set_constraints(&mut self, id: NodeId, constraints: Constraints) -> SceneResult<()> {
        let node = self.editable(id)?;
        if !node.kind.capabilities().constrainable {
            return Err(SceneError::Unsupported {
                kind: node.kind,
                operation: "constraints",
            });
        }
        node.constraints = Some(constraints);
        Ok(())
    }

    fn stylable(&mut self, id: NodeId, operation: &'static str) -> SceneResult<&mut SceneNode> {
        let node = self.editable(id)?;
        if !node.kind.capabilities().stylable {
            return Err(SceneError::Unsupported {
                kind: node.kind,
                operation,
            });
        }
        Ok(node)
    }

    pub fn set_strokes(&mut self, id: NodeId, strokes: Vec<Paint>) -> SceneResult<()> {
        self.stylable(id, "strokes")?.strokes = strokes;
        Ok(())
    }

    pub fn set_stroke_weight(&mut self, id: NodeId, weight: f64) -> SceneResult<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(SceneError::InvalidStrokeWeight(weight));
        }
        self.stylable(id, "stroke weight")?.stroke_weight = Some(weight);
        Ok(())
    }

    pub fn set_stroke_align(&mut self, id: NodeId, align: StrokeAlign) -> SceneResult<()> {
        self.stylable(id, "stroke alignment")?.stroke_align = align;
        Ok(())
    }

    pub fn set_dash_pattern(&mut self, id: NodeId, pattern: &[f64]) -> SceneResult<()> {
        self.stylable(id, "dash pattern")?.dash_pattern = pattern.iter().copied().collect();
        Ok(())
    }

    /// Attach (or clear) an auto-layout and re-stack the children.
    pub fn set_auto_layout(&mut self, id: NodeId, layout: Option<AutoLayout>) -> SceneResult<()> {
        let node = self.editable(id)?;
        if !node.kind.capabilities().auto_layout {
            return Err(SceneError::Unsupported {
                kind: node.kind,
                operation: "auto layout",
            });
        }
        node.auto_layout = layout;
        self.relayout(id);
        Ok(())
    }

    /// Re-stack the children of an auto-layout container. No-op otherwise.
    fn relayout(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let Some(layout) = node.auto_layout else {
            return;
        };
        let container = (node.width, node.height);
        let children: Vec<NodeId> = node
            .children
            .iter()
            .copied()
            .filter(|c| self.nodes.get(c).is_some_and(|n| n.visible))
            .collect();
        let sizes: Vec<(f64, f64)> = children
            .iter()
            .filter_map(|c| self.nodes.get(c).map(|n| (n.width, n.height)))
            .collect();

        let (placed, (width, height)) = layout.arrange(container, &sizes);
        for (child, bounds) in children.iter().zip(placed) {
            if let Some(child) = self.nodes.get_mut(child) {
                child.x = bounds.x;
                child.y = bounds.y;
            }
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.width = width;
            node.height = height;
        }
    }

    // ------------------------------------------------------------------
    // Structural capabilities
    // ------------------------------------------------------------------

    /// Convert a node's stroke into a filled vector.
    ///
    /// The new node is appended to the source's parent and the source is left
    /// untouched.
    pub fn outline_stroke(&mut self, id: NodeId) -> SceneResult<NodeId> {
        let source = self.node(id)?;
        if !source.kind.capabilities().outlinable {
            return Err(SceneError::Unsupported {
                kind: source.kind,
                operation: "outline stroke",
            });
        }
        let weight = source.stroke_weight.unwrap_or(0.0);
        if !source.has_visible_stroke() || weight <= 0.0 {
            return Err(SceneError::NothingToOutline(id));
        }

        let bounds = source.bounds().expand(source.stroke_align.outset(weight));
        let mut outline = SceneNode::new(NodeKind::Vector)
            .with_name(source.name.clone())
            .with_bounds(bounds.x, bounds.y, bounds.width, bounds.height);
        outline.fills = source.strokes.iter().filter(|p| p.visible).copied().collect();
        outline.constraints = source.constraints.or(outline.constraints);
        outline.visible = source.visible;

        let parent = source.parent.unwrap_or(self.page);
        let new_id = self.next_id();
        outline.id = new_id;
        outline.parent = Some(parent);
        self.nodes.insert(new_id, outline);
        self.entry_mut(parent)?.children.push(new_id);
        self.relayout(parent);
        Ok(new_id)
    }

    /// Collapse a group into one vector at the group's child index.
    pub fn flatten_group(&mut self, id: NodeId) -> SceneResult<NodeId> {
        let group = self.node(id)?;
        if group.kind.capabilities().flatten != FlattenMode::Native {
            return Err(SceneError::Unsupported {
                kind: group.kind,
                operation: "flatten",
            });
        }
        if group.locked {
            return Err(SceneError::Locked(id));
        }
        let parent = group.parent.unwrap_or(self.page);
        let index = self.index_in_parent(id).unwrap_or(self.children(parent).len());
        let bounds = group.bounds();
        let name = group.name.clone();

        let merged = self.merged_vector(&[id], name, bounds);
        self.remove(id)?;
        self.attach_at(parent, index, merged)
    }

    /// Merge several nodes into one vector inserted into `parent` at `index`.
    ///
    /// The index is clamped to the parent's child count after the merged
    /// nodes are removed.
    pub fn flatten_nodes(
        &mut self,
        ids: &[NodeId],
        parent: NodeId,
        index: usize,
    ) -> SceneResult<NodeId> {
        let Some(&first) = ids.first() else {
            return Err(SceneError::EmptySelection);
        };
        self.container(parent)?;
        let mut absolute = Vec::with_capacity(ids.len());
        for &id in ids {
            let node = self.node(id)?;
            if !node.kind.capabilities().mergeable {
                return Err(SceneError::Unsupported {
                    kind: node.kind,
                    operation: "flatten",
                });
            }
            if node.locked {
                return Err(SceneError::Locked(id));
            }
            if self.is_ancestor(id, parent) {
                return Err(SceneError::CycleDetected { parent, child: id });
            }
            absolute.push(self.absolute_bounds(id)?);
        }

        let origin = if parent == self.page { DVec2::ZERO } else { self.absolute_position(parent) };
        let bounds = Bounds::union_all(&absolute)
            .unwrap_or_default()
            .translate(-origin);
        let name = self.node(first)?.name.clone();

        let merged = self.merged_vector(ids, name, bounds);
        for &id in ids {
            // Already gone when an earlier id was its ancestor.
            if self.contains(id) {
                self.remove(id)?;
            }
        }
        let index = index.min(self.children(parent).len());
        self.attach_at(parent, index, merged)
    }

    /// Build the vector that replaces `ids` after a flatten.
    fn merged_vector(&self, ids: &[NodeId], name: String, bounds: Bounds) -> SceneNode {
        let mut merged = SceneNode::new(NodeKind::Vector)
            .with_name(name)
            .with_bounds(bounds.x, bounds.y, bounds.width, bounds.height);

        let mut stroke_source: Option<&SceneNode> = None;
        let covered = ids
            .iter()
            .flat_map(|&id| self.subtree(id))
            .filter_map(|id| self.nodes.get(&id));
        for node in covered {
            if !node.visible {
                continue;
            }
            for fill in node.fills.iter().filter(|p| p.visible) {
                if !merged.fills.contains(fill) {
                    merged.fills.push(*fill);
                }
            }
            if stroke_source.is_none() && node.has_visible_stroke() {
                stroke_source = Some(node);
            }
        }
        if let Some(source) = stroke_source {
            merged.strokes = source.strokes.clone();
            merged.stroke_weight = source.stroke_weight;
            merged.stroke_align = source.stroke_align;
        }
        merged
    }

    fn attach_at(
        &mut self,
        parent: NodeId,
        index: usize,
        mut node: SceneNode,
    ) -> SceneResult<NodeId> {
        let id = self.next_id();
        node.id = id;
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.insert(id, node);
        let children = &mut self.entry_mut(parent)?.children;
        let index = index.min(children.len());
        children.insert(index, id);
        self.relayout(parent);
        Ok(id)
    }

    /// Group components into a component set placed in `parent`.
    ///
    /// The set covers the union of the components' bounds and takes the child
    /// index of the first component that already lives in `parent`.
    pub fn combine_as_variants(
        &mut self,
        components: &[NodeId],
        parent: NodeId,
    ) -> SceneResult<NodeId> {
        if components.is_empty() {
            return Err(SceneError::EmptySelection);
        }
        self.container(parent)?;
        let mut absolute = Vec::with_capacity(components.len());
        for &id in components {
            let node = self.node(id)?;
            if node.kind != NodeKind::Component {
                return Err(SceneError::NotAComponent(id));
            }
            absolute.push(self.absolute_bounds(id)?);
        }

        let origin = if parent == self.page { DVec2::ZERO } else { self.absolute_position(parent) };
        let union = Bounds::union_all(&absolute).unwrap_or_default();
        let local = union.translate(-origin);
        let index = components
            .iter()
            .filter(|&&c| self.parent(c) == Some(parent))
            .filter_map(|&c| self.index_in_parent(c))
            .min()
            .unwrap_or(self.children(parent).len());

        let set = SceneNode::new(NodeKind::ComponentSet)
            .with_bounds(local.x, local.y, local.width, local.height);
        let set_id = self.attach_at(parent, index, set)?;

        for (&component, bounds) in components.iter().zip(&absolute) {
            let position = bounds.position() - union.position();
            self.append_child(set_id, component)?;
            let node = self.entry_mut(component)?;
            node.x = position.x;
            node.y = position.y;
        }
        Ok(set_id)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    /// Replace the selection. Unknown ids are dropped.
    pub fn set_selection(&mut self, ids: &[NodeId]) {
        self.selection = ids.iter().copied().filter(|id| self.nodes.contains_key(id)).collect();
    }
}
