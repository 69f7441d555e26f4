//! Scale pulse shown on a candidate anchor pair.

use glam::Vec3;

use crate::config::DockingConfig;
use crate::scene::{NodeId, UIScene};

/// Grows and shrinks two anchor nodes in lockstep until stopped.
///
/// The pulse reverses whenever the first node's X scale has moved
/// `threshold` away from where it started. Stopping puts both nodes back to
/// their starting scales.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseTask {
    nodes: [NodeId; 2],
    initial: [Vec3; 2],
    factor: f32,
    step: f32,
    threshold: f32,
    frames: u32,
}

impl PulseTask {
    /// Capture the current scales of `a` and `b` and start pulsing.
    pub fn start(scene: &UIScene, a: NodeId, b: NodeId, config: &DockingConfig) -> Self {
        let scale_of = |id| scene.transform(id).map_or(Vec3::ONE, |t| t.scale);
        Self {
            nodes: [a, b],
            initial: [scale_of(a), scale_of(b)],
            factor: 1.0,
            step: config.pulse_step,
            threshold: config.pulse_threshold,
            frames: 0,
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, scene: &mut UIScene) {
        let offset = Vec3::splat(self.factor * self.step);
        for id in self.nodes {
            if let Some(t) = scene.transform(id) {
                scene.set_local_scale(id, t.scale + offset);
            }
        }
        let current = scene
            .transform(self.nodes[0])
            .map_or(self.initial[0].x, |t| t.scale.x);
        if (current - self.initial[0].x).abs() >= self.threshold {
            self.factor = -self.factor;
        }
        self.frames += 1;
    }

    /// Put both nodes back to their starting scales.
    pub fn restore(&self, scene: &mut UIScene) {
        for (id, scale) in self.nodes.iter().zip(self.initial) {
            scene.set_local_scale(*id, scale);
        }
    }

    /// The two pulsing nodes.
    pub fn nodes(&self) -> [NodeId; 2] {
        self.nodes
    }

    /// Frames stepped so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }
}
