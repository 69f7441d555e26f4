//! Trigger-volume emulation for hosts without a physics engine.

use glam::Vec3;
use std::collections::BTreeSet;

use super::{AnchorId, AnchorRegistry, GripOracle};
use crate::config::DockingConfig;
use crate::geometry::Aabb;
use crate::scene::UIScene;

/// One anchor's trigger started or stopped overlapping another's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityEvent {
    /// `other` entered the trigger of `this`.
    Enter {
        /// Receiving anchor.
        this: AnchorId,
        /// Incoming anchor.
        other: AnchorId,
    },
    /// `other` left the trigger of `this`.
    Exit {
        /// Receiving anchor.
        this: AnchorId,
        /// Outgoing anchor.
        other: AnchorId,
    },
}

/// Turns anchor world positions into enter/exit events.
///
/// Each anchor carries a cube trigger of `half_extent` around its node.
/// Like physics triggers, an overlap is reported to both anchors. Anchors on
/// hidden nodes have no trigger.
#[derive(Debug, Clone, Default)]
pub struct ProximityTracker {
    half_extent: f32,
    overlapping: BTreeSet<(AnchorId, AnchorId)>,
}

impl ProximityTracker {
    /// Tracker sized from the docking configuration.
    pub fn new(config: &DockingConfig) -> Self {
        Self {
            half_extent: config.trigger_half_extent,
            overlapping: BTreeSet::new(),
        }
    }

    /// Pairs currently overlapping, smaller id first.
    pub fn overlapping(&self) -> impl Iterator<Item = (AnchorId, AnchorId)> + '_ {
        self.overlapping.iter().copied()
    }

    /// Compare current overlaps with the previous poll.
    pub fn poll(&mut self, scene: &UIScene, registry: &AnchorRegistry) -> Vec<ProximityEvent> {
        let size = Vec3::splat(self.half_extent * 2.0);
        let triggers: Vec<(AnchorId, Aabb)> = registry
            .ids()
            .into_iter()
            .filter_map(|id| {
                let desc = registry.get(id)?.desc();
                scene
                    .is_visible_in_hierarchy(desc.node)
                    .then(|| (id, Aabb::from_center_size(scene.world_position(desc.node), size)))
            })
            .collect();

        let mut current = BTreeSet::new();
        for (i, (a, box_a)) in triggers.iter().enumerate() {
            for (b, box_b) in &triggers[i + 1..] {
                if box_a.overlaps(box_b) {
                    current.insert(ordered(*a, *b));
                }
            }
        }

        let mut events = Vec::new();
        for &(a, b) in self.overlapping.difference(&current) {
            events.push(ProximityEvent::Exit { this: a, other: b });
            events.push(ProximityEvent::Exit { this: b, other: a });
        }
        for &(a, b) in current.difference(&self.overlapping) {
            events.push(ProximityEvent::Enter { this: a, other: b });
            events.push(ProximityEvent::Enter { this: b, other: a });
        }
        self.overlapping = current;
        events
    }

    /// Poll and forward every event to `registry`. Returns the event count.
    pub fn dispatch<G: GripOracle + ?Sized>(
        &mut self,
        scene: &mut UIScene,
        registry: &mut AnchorRegistry,
        grip: &G,
    ) -> usize {
        let events = self.poll(scene, registry);
        for event in &events {
            match *event {
                ProximityEvent::Enter { this, other } => {
                    registry.on_proximity_enter(scene, this, other, grip)
                }
                ProximityEvent::Exit { this, other } => {
                    registry.on_proximity_exit(scene, this, other, grip)
                }
            }
        }
        events.len()
    }
}

fn ordered(a: AnchorId, b: AnchorId) -> (AnchorId, AnchorId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
