//! Window docking through paired edge anchors.
//!
//! Every window edge that can dock carries a [`WindowAnchor`]. While the user
//! grips a window, bringing one of its anchors close to a compatible anchor
//! of another window makes it a candidate; releasing the grip commits the
//! dock, and from then on the docked window follows its target every frame
//! until it is gripped again.
//!
//! Only the initiating side of a dock is `attached`; the other side is marked
//! `other_attached` so it will not accept a second dock.

mod proximity;
mod pulse;

pub use proximity::{ProximityEvent, ProximityTracker};
pub use pulse::PulseTask;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

use crate::config::DockingConfig;
use crate::scene::{NodeId, UIScene};

/// Window edge an anchor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorType {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
}

impl AnchorType {
    /// Edge this one docks against.
    pub fn opposite(self) -> Self {
        match self {
            AnchorType::Left => AnchorType::Right,
            AnchorType::Right => AnchorType::Left,
            AnchorType::Top => AnchorType::Bottom,
            AnchorType::Bottom => AnchorType::Top,
        }
    }

    /// Left pairs with right, top with bottom.
    pub fn compatible(self, other: Self) -> bool {
        self.opposite() == other
    }
}

/// Handle to an anchor in an [`AnchorRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnchorId {
    index: u32,
    generation: u32,
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}v{}", self.index, self.generation)
    }
}

/// Scene wiring of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAnchorDesc {
    /// Node whose world position is the docking point.
    pub node: NodeId,
    /// Window moved when this anchor docks.
    pub window: NodeId,
    /// Edge of the window.
    pub anchor_type: AnchorType,
    /// Shown while the anchor is free to dock.
    pub free_hint: Option<NodeId>,
    /// Shown while the anchor is docked or a candidate.
    pub docked_hint: Option<NodeId>,
}

/// Derived docking state of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorState {
    /// No target.
    Free,
    /// Proposed a dock that commits on release.
    Candidate,
    /// Docked; its window follows the target.
    Attached,
    /// Another anchor is docked onto this one.
    PassiveAttached,
}

/// Runtime record of one anchor.
#[derive(Debug, Clone)]
pub struct WindowAnchor {
    desc: WindowAnchorDesc,
    attached: bool,
    other_attached: bool,
    gripped: bool,
    previously_gripped: bool,
    target: Option<AnchorId>,
    pulse: Option<PulseTask>,
}

impl WindowAnchor {
    fn new(desc: WindowAnchorDesc) -> Self {
        Self {
            desc,
            attached: false,
            other_attached: false,
            gripped: false,
            previously_gripped: false,
            target: None,
            pulse: None,
        }
    }

    /// Scene wiring.
    pub fn desc(&self) -> &WindowAnchorDesc {
        &self.desc
    }

    /// Edge of the window.
    pub fn anchor_type(&self) -> AnchorType {
        self.desc.anchor_type
    }

    /// Whether this side initiated a committed dock.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether another anchor is docked onto this one.
    pub fn is_other_attached(&self) -> bool {
        self.other_attached
    }

    /// Grip state seen by the last update.
    pub fn is_gripped(&self) -> bool {
        self.gripped
    }

    /// Current dock target.
    pub fn target(&self) -> Option<AnchorId> {
        self.target
    }

    /// Running candidate pulse.
    pub fn pulse(&self) -> Option<&PulseTask> {
        self.pulse.as_ref()
    }

    /// State derived from the flags: attached wins over passive, which wins
    /// over having a target.
    pub fn state(&self) -> AnchorState {
        if self.attached {
            AnchorState::Attached
        } else if self.other_attached {
            AnchorState::PassiveAttached
        } else if self.target.is_some() {
            AnchorState::Candidate
        } else {
            AnchorState::Free
        }
    }
}

/// Tells the registry which windows are currently held by the user.
pub trait GripOracle {
    /// Whether `window` is gripped.
    fn is_gripped(&self, window: NodeId) -> bool;
}

impl GripOracle for Option<NodeId> {
    fn is_gripped(&self, window: NodeId) -> bool {
        *self == Some(window)
    }
}

impl GripOracle for [NodeId] {
    fn is_gripped(&self, window: NodeId) -> bool {
        self.contains(&window)
    }
}

impl GripOracle for HashSet<NodeId> {
    fn is_gripped(&self, window: NodeId) -> bool {
        self.contains(&window)
    }
}

/// Docking transition recorded by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DockEvent {
    /// An anchor proposed a dock.
    Candidate {
        /// Proposing anchor.
        anchor: AnchorId,
        /// Proposed target.
        target: AnchorId,
    },
    /// A proposal was withdrawn before committing.
    Withdrawn {
        /// Proposing anchor.
        anchor: AnchorId,
        /// Former target.
        target: AnchorId,
    },
    /// A dock was committed.
    Docked {
        /// Initiating anchor.
        anchor: AnchorId,
        /// Passive side.
        target: AnchorId,
    },
    /// A committed dock was broken.
    Undocked {
        /// Initiating anchor.
        anchor: AnchorId,
        /// Former passive side.
        target: AnchorId,
    },
    /// An anchor left the registry.
    Deregistered {
        /// Removed anchor.
        anchor: AnchorId,
    },
}

impl DockEvent {
    /// Snake-case label, matching the serialized `event` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            DockEvent::Candidate { .. } => "candidate",
            DockEvent::Withdrawn { .. } => "withdrawn",
            DockEvent::Docked { .. } => "docked",
            DockEvent::Undocked { .. } => "undocked",
            DockEvent::Deregistered { .. } => "deregistered",
        }
    }

    /// Anchor the event is about.
    pub fn anchor(&self) -> AnchorId {
        match *self {
            DockEvent::Candidate { anchor, .. }
            | DockEvent::Withdrawn { anchor, .. }
            | DockEvent::Docked { anchor, .. }
            | DockEvent::Undocked { anchor, .. }
            | DockEvent::Deregistered { anchor } => anchor,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    anchor: Option<WindowAnchor>,
}

/// Arena of every window anchor, used to coordinate hint visibility across
/// windows and to resolve dock targets.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    config: DockingConfig,
    events: Vec<DockEvent>,
}

impl AnchorRegistry {
    /// Empty registry with default docking settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry using `config`.
    pub fn with_config(config: DockingConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active docking settings.
    pub fn config(&self) -> &DockingConfig {
        &self.config
    }

    /// Number of registered anchors.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.anchor.is_some()).count()
    }

    /// Whether no anchor is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add an anchor in the free state with both hints hidden.
    pub fn register(&mut self, scene: &mut UIScene, desc: WindowAnchorDesc) -> AnchorId {
        if !scene.contains(desc.node) || !scene.contains(desc.window) {
            trace!(node = %desc.node, window = %desc.window, "registering anchor with stale nodes");
        }
        let anchor = WindowAnchor::new(desc);
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.anchor = Some(anchor);
                AnchorId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    anchor: Some(anchor),
                });
                AnchorId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        set_hint(scene, desc.free_hint, false);
        set_hint(scene, desc.docked_hint, false);
        debug!(anchor = %id, kind = ?desc.anchor_type, "registered window anchor");
        id
    }

    /// Remove an anchor, breaking any dock or proposal involving it.
    pub fn deregister(&mut self, scene: &mut UIScene, id: AnchorId) {
        if self.get(id).is_none() {
            trace!("deregister of stale anchor {id}");
            return;
        }
        self.set_target(scene, id, None);
        for other in self.ids() {
            if self.get(other).and_then(|a| a.target) == Some(id) {
                self.set_target(scene, other, None);
            }
        }
        let slot = &mut self.slots[id.index as usize];
        slot.anchor = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.events.push(DockEvent::Deregistered { anchor: id });
    }

    /// Borrow an anchor.
    pub fn get(&self, id: AnchorId) -> Option<&WindowAnchor> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.anchor.as_ref())
    }

    fn get_mut(&mut self, id: AnchorId) -> Option<&mut WindowAnchor> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.anchor.as_mut())
    }

    /// Registered anchor ids in slot order.
    pub fn ids(&self) -> Vec<AnchorId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.anchor.is_some())
            .map(|(index, slot)| AnchorId {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }

    /// Derived state of `id`; stale ids read as free.
    pub fn state(&self, id: AnchorId) -> AnchorState {
        self.get(id).map_or(AnchorState::Free, WindowAnchor::state)
    }

    /// Current target of `id`.
    pub fn target(&self, id: AnchorId) -> Option<AnchorId> {
        self.get(id).and_then(|a| a.target)
    }

    /// Take the transitions recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<DockEvent> {
        std::mem::take(&mut self.events)
    }

    /// `other` came within trigger range of `this`.
    ///
    /// `this` becomes a candidate for `other` only when its window is
    /// gripped, neither side takes part in a dock, both belong to different
    /// windows and their edges pair up. Anything else is ignored.
    pub fn on_proximity_enter<G: GripOracle + ?Sized>(
        &mut self,
        scene: &mut UIScene,
        this: AnchorId,
        other: AnchorId,
        grip: &G,
    ) {
        let (Some(a), Some(b)) = (self.get(this), self.get(other)) else {
            trace!("proximity enter with stale anchor {this} / {other}");
            return;
        };
        if !grip.is_gripped(a.desc.window) || a.attached || a.other_attached {
            trace!(anchor = %this, "proximity enter ignored: not gripped or busy");
            return;
        }
        if a.desc.window == b.desc.window || b.attached || b.other_attached {
            trace!(anchor = %this, target = %other, "proximity enter ignored: target unavailable");
            return;
        }
        if !a.desc.anchor_type.compatible(b.desc.anchor_type) {
            trace!(
                anchor = %this,
                target = %other,
                "proximity enter ignored: {:?} does not pair with {:?}",
                a.desc.anchor_type,
                b.desc.anchor_type
            );
            return;
        }
        if a.target == Some(other) {
            return;
        }
        let (node, target_node) = (a.desc.node, b.desc.node);

        self.set_target(scene, this, Some(other));
        let pulse = PulseTask::start(scene, node, target_node, &self.config);
        if let Some(anchor) = self.get_mut(this) {
            anchor.pulse = Some(pulse);
        }
        self.events.push(DockEvent::Candidate {
            anchor: this,
            target: other,
        });
        debug!(anchor = %this, target = %other, "dock candidate");
    }

    /// `other` left trigger range of `this`.
    ///
    /// Withdraws the proposal when the window is still gripped and `other`
    /// is the current target.
    pub fn on_proximity_exit<G: GripOracle + ?Sized>(
        &mut self,
        scene: &mut UIScene,
        this: AnchorId,
        other: AnchorId,
        grip: &G,
    ) {
        let Some(a) = self.get(this) else {
            return;
        };
        if !grip.is_gripped(a.desc.window) || a.target != Some(other) {
            trace!(anchor = %this, "proximity exit ignored");
            return;
        }
        self.set_target(scene, this, None);
        self.show_all_anchors(scene, true);
    }

    /// Per-frame docking pass over every anchor in slot order.
    pub fn update<G: GripOracle + ?Sized>(&mut self, scene: &mut UIScene, grip: &G) {
        for id in self.ids() {
            self.update_anchor(scene, id, grip);
        }
        self.step_pulses(scene);
    }

    fn update_anchor<G: GripOracle + ?Sized>(
        &mut self,
        scene: &mut UIScene,
        id: AnchorId,
        grip: &G,
    ) {
        let Some(anchor) = self.get_mut(id) else {
            return;
        };
        let window = anchor.desc.window;
        let gripped = grip.is_gripped(window);
        anchor.gripped = gripped;
        let previously_gripped = anchor.previously_gripped;

        let hidden = scene
            .transform(window)
            .map_or(true, |t| t.scale == Vec3::ZERO);
        if hidden {
            if self.target(id).is_some() {
                trace!(anchor = %id, "window hidden, dropping target");
                self.set_target(scene, id, None);
            }
        } else {
            if gripped != previously_gripped {
                self.show_all_anchors(scene, gripped);
            }
            self.try_commit(scene, id, gripped);
            if let Some(anchor) = self.get(id) {
                if anchor.attached {
                    if gripped {
                        self.set_target(scene, id, None);
                    } else {
                        self.snap_to_anchor(scene, id);
                    }
                }
            }
        }

        if let Some(anchor) = self.get_mut(id) {
            anchor.previously_gripped = gripped;
        }
    }

    fn try_commit(&mut self, scene: &mut UIScene, id: AnchorId, gripped: bool) {
        let Some(anchor) = self.get(id) else {
            return;
        };
        let Some(target) = anchor.target else {
            return;
        };
        if gripped || anchor.attached {
            return;
        }
        let docked_hint = anchor.desc.docked_hint;
        let Some(other) = self.get(target) else {
            self.set_target(scene, id, None);
            return;
        };
        if other.attached {
            trace!(anchor = %id, target = %target, "target already docked elsewhere");
            return;
        }
        let counter_proposal = other.target == Some(id);

        if let Some(anchor) = self.get_mut(id) {
            anchor.attached = true;
        }
        if let Some(other) = self.get_mut(target) {
            other.other_attached = true;
        }
        set_hint(scene, docked_hint, true);
        if counter_proposal {
            // Both sides proposed to each other; the side updated first wins.
            self.set_target(scene, target, None);
        }
        self.events.push(DockEvent::Docked { anchor: id, target });
        debug!(anchor = %id, target = %target, "window docked");
    }

    fn snap_to_anchor(&mut self, scene: &mut UIScene, id: AnchorId) {
        let Some(anchor) = self.get(id) else {
            return;
        };
        let Some(target) = anchor.target.and_then(|t| self.get(t)) else {
            return;
        };
        let (window, node) = (anchor.desc.window, anchor.desc.node);
        let rotation = scene.world_rotation(target.desc.window);
        let target_node = target.desc.node;
        scene.set_world_rotation(window, rotation);
        let offset = scene.world_position(target_node) - scene.world_position(node);
        scene.translate_world(window, offset);
    }

    /// Change the target of `id`, resetting `attached` and the hints.
    ///
    /// Leaving a committed dock also clears the passive side's flag.
    fn set_target(&mut self, scene: &mut UIScene, id: AnchorId, target: Option<AnchorId>) {
        let Some(anchor) = self.get_mut(id) else {
            return;
        };
        let previous = anchor.target;
        let was_attached = anchor.attached;
        let desc = anchor.desc;
        anchor.target = target;
        anchor.attached = false;
        let pulse = if target != previous {
            anchor.pulse.take()
        } else {
            None
        };

        if let Some(pulse) = pulse {
            pulse.restore(scene);
        }
        if let Some(previous) = previous {
            if was_attached {
                if let Some(old) = self.get_mut(previous) {
                    old.other_attached = false;
                }
                self.events.push(DockEvent::Undocked {
                    anchor: id,
                    target: previous,
                });
                debug!(anchor = %id, target = %previous, "window undocked");
            } else if target != Some(previous) {
                self.events.push(DockEvent::Withdrawn {
                    anchor: id,
                    target: previous,
                });
            }
        }
        set_hint(scene, desc.free_hint, target.is_none());
        set_hint(scene, desc.docked_hint, target.is_some());
    }

    /// Refresh hint visibility on every anchor.
    ///
    /// With `show` the free hint appears on anchors that can still dock;
    /// the docked hint always mirrors `attached`.
    pub fn show_all_anchors(&self, scene: &mut UIScene, show: bool) {
        for slot in &self.slots {
            let Some(anchor) = &slot.anchor else {
                continue;
            };
            let free = show && !anchor.attached && !anchor.other_attached;
            set_hint(scene, anchor.desc.free_hint, free);
            set_hint(scene, anchor.desc.docked_hint, anchor.attached);
        }
    }

    fn step_pulses(&mut self, scene: &mut UIScene) {
        for slot in &mut self.slots {
            let Some(anchor) = slot.anchor.as_mut() else {
                continue;
            };
            let proposing = anchor.target.is_some() && !anchor.attached;
            match anchor.pulse.take() {
                Some(mut pulse) if proposing => {
                    pulse.step(scene);
                    anchor.pulse = Some(pulse);
                }
                Some(pulse) => pulse.restore(scene),
                None => {}
            }
        }
    }
}

fn set_hint(scene: &mut UIScene, hint: Option<NodeId>, visible: bool) {
    if let Some(hint) = hint {
        scene.set_visible(hint, visible);
    }
}
