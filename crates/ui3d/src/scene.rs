//! Node hierarchy hosting spatial elements.
//!
//! `UIScene` is a generational arena: a [`NodeId`] stays valid until its node
//! is despawned, after which every operation taking it quietly does nothing.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::components::{SpatialElement, Transform3D};
use crate::config::Ui3dConfig;

/// Handle to a node in a [`UIScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Slot index, stable for the lifetime of the node.
    pub fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// One entry of the hierarchy.
#[derive(Debug)]
pub struct Node {
    /// Debug name.
    pub name: String,
    /// Pose relative to the parent.
    pub transform: Transform3D,
    /// Hidden nodes hide their whole subtree.
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub(crate) element: Option<SpatialElement>,
}

impl Node {
    /// Parent node, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The spatial element carried by this node.
    pub fn element(&self) -> Option<&SpatialElement> {
        self.element.as_ref()
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena of nodes plus the runtime configuration they are laid out with.
#[derive(Debug, Default)]
pub struct UIScene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    pub(crate) config: Ui3dConfig,
}

impl UIScene {
    /// Empty scene with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty scene using `config`.
    pub fn with_config(config: Ui3dConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &Ui3dConfig {
        &self.config
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Whether the scene has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a root node.
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(Node {
            name: name.into(),
            transform: Transform3D::default(),
            visible: true,
            parent: None,
            children: Vec::new(),
            element: None,
        })
    }

    /// Create a node under `parent`. A stale parent yields a root node.
    pub fn spawn_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = self.spawn(name);
        self.attach(id, Some(parent));
        id
    }

    /// Remove `id` and its whole subtree.
    pub fn despawn(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else {
            trace!("despawn of stale node {id}");
            return;
        };
        let parent = node.parent;
        let mut stack = vec![id];
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index as usize];
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
            }
        }
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Live node ids in slot order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|_| NodeId {
                index: index as u32,
                generation: slot.generation,
            })
        })
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children of `id`, empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Look up a node by name among `id`'s direct children.
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|c| self.node(*c).is_some_and(|n| n.name == name))
    }

    /// Move `id` under `parent` (or to the root) without touching its local
    /// transform. Returns `false` if either node is stale or the move would
    /// create a cycle.
    pub(crate) fn attach(&mut self, id: NodeId, parent: Option<NodeId>) -> bool {
        if !self.contains(id) {
            return false;
        }
        if let Some(p) = parent {
            if !self.contains(p) || self.is_ancestor_or_self(id, p) {
                trace!("rejecting reparent of {id} under {p}");
                return false;
            }
        }
        if let Some(old) = self.parent(id).and_then(|old| self.node_mut(old)) {
            old.children.retain(|c| *c != id);
        }
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.push(id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = parent;
        }
        true
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    /// Local transform of `id`.
    pub fn transform(&self, id: NodeId) -> Option<Transform3D> {
        self.node(id).map(|n| n.transform)
    }

    /// Set the local position.
    pub fn set_local_position(&mut self, id: NodeId, position: Vec3) {
        if let Some(node) = self.node_mut(id) {
            node.transform.position = position;
        }
    }

    /// Set the local rotation.
    pub fn set_local_rotation(&mut self, id: NodeId, rotation: Quat) {
        if let Some(node) = self.node_mut(id) {
            node.transform.rotation = rotation;
        }
    }

    /// Set the local scale.
    pub fn set_local_scale(&mut self, id: NodeId, scale: Vec3) {
        if let Some(node) = self.node_mut(id) {
            node.transform.scale = scale;
        }
    }

    /// Show or hide `id` and its subtree.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.node_mut(id) {
            node.visible = visible;
        }
    }

    /// Own visibility flag of `id`.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.visible)
    }

    /// Whether `id` and all its ancestors are visible.
    pub fn is_visible_in_hierarchy(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.node(node_id) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Local-to-world matrix of `id`, identity for stale ids.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.node(node_id) else {
                break;
            };
            matrix = node.transform.to_mat4() * matrix;
            current = node.parent;
        }
        matrix
    }

    /// World-space origin of `id`.
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// World-space rotation of `id`.
    pub fn world_rotation(&self, id: NodeId) -> Quat {
        let mut rotation = Quat::IDENTITY;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.node(node_id) else {
                break;
            };
            rotation = node.transform.rotation * rotation;
            current = node.parent;
        }
        rotation
    }

    /// Rotate `id` so its world rotation becomes `rotation`.
    pub fn set_world_rotation(&mut self, id: NodeId, rotation: Quat) {
        let parent_rotation = self
            .parent(id)
            .map(|p| self.world_rotation(p))
            .unwrap_or(Quat::IDENTITY);
        self.set_local_rotation(id, (parent_rotation.inverse() * rotation).normalize());
    }

    /// Move `id` by a world-space offset.
    pub fn translate_world(&mut self, id: NodeId, offset: Vec3) {
        let local_offset = match self.parent(id) {
            Some(p) => self.world_matrix(p).inverse().transform_vector3(offset),
            None => offset,
        };
        if let Some(node) = self.node_mut(id) {
            node.transform.position += local_offset;
        }
    }

    fn insert(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }
}
