//! Scene fixtures: two dockable windows side by side, and a frame recorder
//! for scripted runs.

use glam::Vec3;
use serde::Serialize;
use vrwidgets_core::{FrameTick, Theme};
use vrwidgets_ui3d::components::ElementColors;
use vrwidgets_ui3d::docking::{AnchorType, WindowAnchorDesc};
use vrwidgets_ui3d::{AnchorId, AnchorRegistry, ButtonWidget, NodeId, PanelWidget, UIScene, Ui3dConfig};

/// Panel size of the fixture windows.
pub const WINDOW_SIZE: (f32, f32) = (0.4, 0.3);
/// Panel border of the fixture windows.
pub const WINDOW_MARGIN: f32 = 0.02;
/// Gap between the fixture windows along X before docking.
pub const WINDOW_GAP: f32 = 0.6;

/// Node and anchor handles of one fixture window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockWindow {
    /// Window root moved by docking.
    pub window: NodeId,
    /// Background panel element.
    pub panel: NodeId,
    /// Button laid out from the panel anchor.
    pub button: NodeId,
    /// Anchor on the left edge.
    pub left_anchor: AnchorId,
    /// Anchor on the right edge.
    pub right_anchor: AnchorId,
}

/// Two themed windows, `a` at the origin and `b` to its right.
pub struct TwoWindows {
    /// Node hierarchy.
    pub scene: UIScene,
    /// Anchors of both windows.
    pub registry: AnchorRegistry,
    /// Theme the widgets are bound to.
    pub theme: Theme,
    /// Left window.
    pub a: DockWindow,
    /// Right window.
    pub b: DockWindow,
}

impl TwoWindows {
    /// Build with default configuration and the builtin theme.
    pub fn new() -> Self {
        Self::with_config(Ui3dConfig::default(), Theme::builtin())
    }

    /// Build with explicit configuration and theme.
    pub fn with_config(config: Ui3dConfig, theme: Theme) -> Self {
        let mut scene = UIScene::with_config(config);
        let mut registry = AnchorRegistry::with_config(config.docking);
        let a = build_window(&mut scene, &mut registry, &theme, "window a", Vec3::ZERO);
        let b = build_window(
            &mut scene,
            &mut registry,
            &theme,
            "window b",
            Vec3::new(WINDOW_SIZE.0 + WINDOW_GAP, 0.0, 0.0),
        );
        Self {
            scene,
            registry,
            theme,
            a,
            b,
        }
    }

    /// World position of an anchor's node.
    pub fn anchor_position(&self, anchor: AnchorId) -> Option<Vec3> {
        let desc = self.registry.get(anchor)?.desc();
        Some(self.scene.world_position(desc.node))
    }

    /// Root position that puts `a`'s right anchor `offset` away from `b`'s
    /// left anchor.
    pub fn a_position_near_b(&self, offset: Vec3) -> Vec3 {
        let b_left = self.scene.world_position(self.b.window);
        b_left - Vec3::new(WINDOW_SIZE.0, 0.0, 0.0) + offset
    }
}

impl Default for TwoWindows {
    fn default() -> Self {
        Self::new()
    }
}

fn build_window(
    scene: &mut UIScene,
    registry: &mut AnchorRegistry,
    theme: &Theme,
    name: &str,
    position: Vec3,
) -> DockWindow {
    let (width, height) = WINDOW_SIZE;
    let window = scene.spawn(name);
    scene.set_local_position(window, position);

    let geometry = scene.config().geometry;
    let panel = scene.add_element(
        Some(window),
        format!("{name}/panel"),
        PanelWidget::plate(WINDOW_MARGIN, 0.005)
            .with_geometry(geometry)
            .element(width, height)
            .with_colors(ElementColors::from_theme_with_base(
                theme,
                vrwidgets_core::keys::BACKGROUND,
            )),
    );
    let button = scene.add_element(
        Some(panel),
        format!("{name}/button"),
        ButtonWidget::new()
            .with_geometry(geometry)
            .element(0.12, 0.04, theme)
            .with_relative_location(Vec3::new(0.0, -0.02, -0.002)),
    );

    let mut anchor = |kind: AnchorType, x: f32| {
        let node = scene.spawn_child(window, format!("{name}/anchor {kind:?}"));
        scene.set_local_position(node, Vec3::new(x, -height / 2.0, 0.0));
        let free_hint = scene.spawn_child(node, "free");
        let docked_hint = scene.spawn_child(node, "docked");
        registry.register(
            scene,
            WindowAnchorDesc {
                node,
                window,
                anchor_type: kind,
                free_hint: Some(free_hint),
                docked_hint: Some(docked_hint),
            },
        )
    };
    let left_anchor = anchor(AnchorType::Left, 0.0);
    let right_anchor = anchor(AnchorType::Right, width);

    DockWindow {
        window,
        panel,
        button,
        left_anchor,
        right_anchor,
    }
}

/// Snapshot captured at one frame of a scripted run.
#[derive(Debug, Clone, Serialize)]
pub struct RecordedFrame<S> {
    /// Frame number.
    pub tick: FrameTick,
    /// Snapshot payload.
    pub snapshot: S,
}

/// Step `state` for `frames` frames, snapshotting before the first step and
/// after every step (so the result holds `frames + 1` entries).
pub fn record_frames<State, Snapshot, StepFn, SnapFn>(
    frames: u64,
    state: &mut State,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> Vec<RecordedFrame<Snapshot>>
where
    StepFn: FnMut(FrameTick, &mut State),
    SnapFn: FnMut(FrameTick, &State) -> Snapshot,
{
    let mut recorded = Vec::with_capacity(frames as usize + 1);
    let mut tick = FrameTick::ZERO;
    recorded.push(RecordedFrame {
        tick,
        snapshot: snapshot(tick, state),
    });
    for _ in 0..frames {
        step(tick, state);
        tick = tick.next();
        recorded.push(RecordedFrame {
            tick,
            snapshot: snapshot(tick, state),
        });
    }
    recorded
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrwidgets_ui3d::AnchorState;

    #[test]
    fn fixture_windows_start_apart_and_free() {
        let f = TwoWindows::new();
        let a_right = f.anchor_position(f.a.right_anchor).unwrap();
        let b_left = f.anchor_position(f.b.left_anchor).unwrap();
        assert!((b_left.x - a_right.x - WINDOW_GAP).abs() < 1e-5);
        assert_eq!(f.registry.len(), 4);
        for id in f.registry.ids() {
            assert_eq!(f.registry.state(id), AnchorState::Free);
        }
    }

    #[test]
    fn near_position_lines_up_anchors() {
        let mut f = TwoWindows::new();
        let target = f.a_position_near_b(Vec3::ZERO);
        f.scene.set_local_position(f.a.window, target);
        let a_right = f.anchor_position(f.a.right_anchor).unwrap();
        let b_left = f.anchor_position(f.b.left_anchor).unwrap();
        assert!((a_right - b_left).length() < 1e-5);
    }

    #[test]
    fn recorder_captures_every_frame() {
        let mut counter = 0u32;
        let frames = record_frames(3, &mut counter, |_, c| *c += 1, |tick, c| (tick.0, *c));
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[3].snapshot, (3, 3));
        assert_eq!(frames[0].tick, FrameTick::ZERO);
    }
}
