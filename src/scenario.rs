//! Scripted headless docking run.
//!
//! Window A is gripped, dragged next to window B, and released. Proximity
//! events come from a [`ProximityTracker`]; every frame then runs the
//! registry update and the deferred mesh rebuild pass. At the end a ray is
//! cast at B's button and a full click is dispatched to it.

use anyhow::Result;
use glam::Vec3;
use serde::Serialize;
use tracing::{debug, info};
use vrwidgets_core::{FrameTick, Theme};
use vrwidgets_testkit::{collect_mesh_metrics, EventRecord, JsonlSink, MeshMetric, TwoWindows};
use vrwidgets_ui3d::docking::ProximityTracker;
use vrwidgets_ui3d::{
    AnchorId, AnchorState, AnchorType, InteractionContext, NodeId, Ray, RayDispatch, RayEvent,
};

use crate::config::AppConfig;

#[derive(Debug, Serialize)]
pub struct AnchorReport {
    pub anchor: AnchorId,
    pub window: String,
    pub kind: AnchorType,
    pub state: AnchorState,
    pub target: Option<AnchorId>,
}

#[derive(Debug, Serialize)]
pub struct WindowReport {
    pub name: String,
    pub position: [f32; 3],
}

#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub version: &'static str,
    pub frames: u64,
    pub elements: Vec<MeshMetric>,
    pub anchors: Vec<AnchorReport>,
    pub windows: Vec<WindowReport>,
    pub dock_events: usize,
    pub docked: bool,
    pub button_validated: bool,
}

pub fn run(
    config: &AppConfig,
    theme: Theme,
    mut events: Option<&mut JsonlSink>,
) -> Result<ScenarioReport> {
    let script = config.scenario;
    let mut fixture = TwoWindows::with_config(config.ui, theme);
    let mut tracker = ProximityTracker::new(fixture.registry.config());

    let start = fixture
        .scene
        .transform(fixture.a.window)
        .map_or(Vec3::ZERO, |t| t.position);
    let goal = fixture.a_position_near_b(Vec3::from_array(script.approach_offset));
    let mut dock_events = 0;
    let mut tick = FrameTick::ZERO;

    for frame in 0..script.frames {
        let grip = (frame < script.release_frame).then_some(fixture.a.window);
        if frame < script.approach_frames {
            let alpha = (frame + 1) as f32 / script.approach_frames as f32;
            fixture
                .scene
                .set_local_position(fixture.a.window, start.lerp(goal, alpha));
        }

        let TwoWindows {
            scene, registry, ..
        } = &mut fixture;
        tracker.dispatch(scene, registry, &grip);
        registry.update(scene, &grip);
        scene.rebuild_dirty();

        for event in registry.drain_events() {
            debug!(frame, kind = event.kind(), anchor = %event.anchor(), "dock event");
            dock_events += 1;
            if let Some(sink) = events.as_deref_mut() {
                sink.write(&EventRecord {
                    tick,
                    kind: event.kind(),
                    payload: event,
                })?;
            }
        }
        tick = tick.next();
    }

    let button = fixture.b.button;
    let button_validated = click_button(&mut fixture, button);
    let docked = fixture.registry.state(fixture.a.right_anchor) == AnchorState::Attached;
    info!(frames = script.frames, dock_events, docked, "scenario finished");

    Ok(ScenarioReport {
        version: vrwidgets_ui3d::VERSION,
        frames: script.frames,
        elements: collect_mesh_metrics(&fixture.scene),
        anchors: anchor_reports(&fixture),
        windows: [fixture.a.window, fixture.b.window]
            .into_iter()
            .map(|id| WindowReport {
                name: node_name(&fixture, id),
                position: fixture.scene.world_position(id).to_array(),
            })
            .collect(),
        dock_events,
        docked,
        button_validated,
    })
}

/// Aim a ray at the center of `button` and dispatch a full click to
/// whatever it hits. Returns whether the release validated the button.
fn click_button(fixture: &mut TwoWindows, button: NodeId) -> bool {
    let Some(collider) = fixture.scene.element(button).and_then(|e| e.collider()) else {
        return false;
    };
    let center = fixture
        .scene
        .world_matrix(button)
        .transform_point3(collider.center());
    let ray = Ray::new(center - Vec3::Z, Vec3::Z);
    let Some(hit) = fixture.scene.pick(&ray) else {
        return false;
    };
    if hit.node != button {
        debug!(hit = %hit.node, "ray hit another element first");
        return false;
    }

    let ctx = InteractionContext::new();
    let mut validated = false;
    for event in [
        RayEvent::Enter,
        RayEvent::Hover(ray),
        RayEvent::Click,
        RayEvent::ReleaseInside,
        RayEvent::Exit,
    ] {
        if let RayDispatch::Handled { validated: true } =
            fixture.scene.dispatch_ray(hit.node, event, &ctx)
        {
            validated |= matches!(event, RayEvent::ReleaseInside);
        }
    }
    validated
}

fn anchor_reports(fixture: &TwoWindows) -> Vec<AnchorReport> {
    fixture
        .registry
        .ids()
        .into_iter()
        .filter_map(|id| {
            let anchor = fixture.registry.get(id)?;
            Some(AnchorReport {
                anchor: id,
                window: node_name(fixture, anchor.desc().window),
                kind: anchor.anchor_type(),
                state: anchor.state(),
                target: anchor.target(),
            })
        })
        .collect()
}

fn node_name(fixture: &TwoWindows, id: NodeId) -> String {
    fixture
        .scene
        .node(id)
        .map(|n| n.name.clone())
        .unwrap_or_default()
}
