//! Anchor-relative placement of elements.
//!
//! An element's local position is its parent's anchor plus its own relative
//! location, or just the relative location when the parent carries no
//! element. Setters recompute positions eagerly and only one level deep:
//! grandchildren move with their parent through the transform hierarchy.

use glam::Vec3;
use tracing::{debug, trace};

use crate::geometry::Aabb;
use crate::scene::{NodeId, UIScene};

impl UIScene {
    /// Set the anchor of `id` and reposition its direct children.
    pub fn set_anchor(&mut self, id: NodeId, anchor: Vec3) {
        let Some(element) = self.element_mut(id) else {
            trace!("set_anchor on {id} without element");
            return;
        };
        element.layout.anchor = anchor;
        self.update_children(id);
    }

    /// Set the offset of `id` from its parent's anchor and reposition it.
    pub fn set_relative_location(&mut self, id: NodeId, location: Vec3) {
        let Some(element) = self.element_mut(id) else {
            trace!("set_relative_location on {id} without element");
            return;
        };
        element.layout.relative_location = location;
        self.update_local_position(id);
    }

    /// Resize `id` horizontally.
    pub fn set_width(&mut self, id: NodeId, width: f32) {
        let Some(element) = self.element_mut(id) else {
            trace!("set_width on {id} without element");
            return;
        };
        element.layout.width = width;
        element.needs_rebuild = true;
        self.relayout(id);
    }

    /// Resize `id` vertically.
    pub fn set_height(&mut self, id: NodeId, height: f32) {
        let Some(element) = self.element_mut(id) else {
            trace!("set_height on {id} without element");
            return;
        };
        element.layout.height = height;
        element.needs_rebuild = true;
        self.relayout(id);
    }

    /// Move `id` under `parent` (or make it a root) and recompute its
    /// position against the new parent's anchor.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        if self.attach(id, parent) {
            self.update_local_position(id);
        }
    }

    /// Flag the mesh of `id` as stale without rebuilding it yet.
    pub fn mark_dirty(&mut self, id: NodeId) {
        if let Some(element) = self.element_mut(id) {
            element.needs_rebuild = true;
        }
    }

    /// Rebuild every stale element, refreshing anchors, children and colors.
    ///
    /// Returns how many elements were rebuilt.
    pub fn rebuild_dirty(&mut self) -> usize {
        let dirty: Vec<NodeId> = self
            .element_ids()
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(|e| e.needs_rebuild))
            .collect();
        for id in &dirty {
            self.relayout(*id);
            self.reset_color(*id);
        }
        if !dirty.is_empty() {
            debug!(count = dirty.len(), "rebuilt stale elements");
        }
        dirty.len()
    }

    /// Recompute the local position of `id` from its parent's anchor.
    pub fn update_local_position(&mut self, id: NodeId) {
        let Some(relative) = self.element(id).map(|e| e.layout.relative_location) else {
            return;
        };
        let parent_anchor = self
            .parent(id)
            .and_then(|p| self.element(p))
            .map(|e| e.layout.anchor)
            .unwrap_or(Vec3::ZERO);
        self.set_local_position(id, parent_anchor + relative);
    }

    /// Recompute the local position of every direct child element of `id`.
    pub fn update_children(&mut self, id: NodeId) {
        let children = self.children(id).to_vec();
        for child in children {
            self.update_local_position(child);
        }
    }

    /// Regenerate the mesh and collider of `id` from its current layout.
    pub fn rebuild_mesh(&mut self, id: NodeId) {
        self.rebuild_element(id);
    }

    fn relayout(&mut self, id: NodeId) {
        self.rebuild_element(id);
        self.update_children(id);
    }

    pub(crate) fn rebuild_element(&mut self, id: NodeId) {
        let collider_config = self.config.collider;
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let mesh = element.behavior.rebuild_mesh(&element.layout);
        let min_depth = if element.behavior.deep_collider() {
            collider_config.min_depth_deep
        } else {
            collider_config.min_depth_shallow
        };
        element.collider = mesh
            .as_ref()
            .and_then(|m| m.bounds())
            .map(|bounds| collider_from_bounds(bounds, min_depth));
        element.mesh = mesh;
        element.needs_rebuild = false;
        element.layout.anchor = element.behavior.update_anchor(&element.layout);
    }
}

/// Mesh bounds deepened to at least `min_depth`, keeping the front face.
fn collider_from_bounds(bounds: Aabb, min_depth: f32) -> Aabb {
    let depth = bounds.size().z;
    if depth >= min_depth {
        return bounds;
    }
    let mut max = bounds.max;
    max.z = bounds.min.z + min_depth;
    Aabb::new(bounds.min, max)
}
