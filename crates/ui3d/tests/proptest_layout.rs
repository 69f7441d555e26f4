//! Property-based tests for anchor-relative layout
//!
//! Validates layout invariants:
//! - A child element always sits at its parent's anchor plus its relative location
//! - Resizing keeps children attached to the moving anchor
//! - Rebuilding with unchanged dimensions reproduces the same mesh
//! - The collider always encloses the mesh with the configured depth

use glam::Vec3;
use proptest::prelude::*;
use vrwidgets_core::Theme;
use vrwidgets_ui3d::{ButtonWidget, NodeId, PanelWidget, RailWidget, UIScene, Ui3dConfig};

const EPS: f32 = 1e-5;

fn vec3() -> impl Strategy<Value = Vec3> {
    (-1.0f32..1.0, -1.0f32..1.0, -0.1f32..0.1).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn child_offset(scene: &UIScene, child: NodeId) -> Vec3 {
    let element = scene.element(child).unwrap();
    let parent_anchor = scene
        .parent(child)
        .and_then(|p| scene.element(p))
        .map_or(Vec3::ZERO, |e| e.anchor());
    scene.transform(child).unwrap().position - (parent_anchor + element.relative_location())
}

#[derive(Debug, Clone)]
enum Edit {
    Width(f32),
    Height(f32),
    Anchor(Vec3),
    Relative(Vec3),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0.05f32..2.0).prop_map(Edit::Width),
        (0.05f32..2.0).prop_map(Edit::Height),
        vec3().prop_map(Edit::Anchor),
        vec3().prop_map(Edit::Relative),
    ]
}

proptest! {
    /// Property: after any sequence of edits on a panel/button pair, the
    /// button stays at the panel anchor plus its relative location
    #[test]
    fn child_tracks_parent_anchor(
        edits in prop::collection::vec((any::<bool>(), edit()), 1..24),
    ) {
        let theme = Theme::builtin();
        let mut scene = UIScene::new();
        let panel = scene.add_element(None, "panel", PanelWidget::plate(0.02, 0.005).element(0.5, 0.4));
        let button = scene.add_element(
            Some(panel),
            "button",
            ButtonWidget::new().element(0.1, 0.04, &theme),
        );

        for (on_panel, edit) in edits {
            let target = if on_panel { panel } else { button };
            match edit {
                Edit::Width(w) => scene.set_width(target, w),
                Edit::Height(h) => scene.set_height(target, h),
                Edit::Anchor(a) => scene.set_anchor(target, a),
                Edit::Relative(r) => scene.set_relative_location(target, r),
            }
            prop_assert!(child_offset(&scene, button).length() < EPS);
            prop_assert!(child_offset(&scene, panel).length() < EPS);
        }
    }

    /// Property: the panel anchor sits at the inset corner, so resizing
    /// never moves the child relative to the panel's top-left border
    #[test]
    fn panel_anchor_is_margin_inset(
        width in 0.1f32..2.0,
        height in 0.1f32..2.0,
        margin in 0.0f32..0.04,
    ) {
        let mut scene = UIScene::new();
        let panel = scene.add_element(None, "panel", PanelWidget::plate(margin, 0.005).element(0.5, 0.5));
        scene.set_width(panel, width);
        scene.set_height(panel, height);
        let anchor = scene.element(panel).unwrap().anchor();
        prop_assert!(anchor.abs_diff_eq(Vec3::new(margin, -margin, 0.0), EPS));
    }

    /// Property: setting the current width again is a no-op on the mesh
    #[test]
    fn same_width_rebuild_is_idempotent(
        width in 0.05f32..2.0,
        height in 0.05f32..2.0,
    ) {
        let mut scene = UIScene::new();
        let panel = scene.add_element(None, "panel", PanelWidget::tube(0.02, 0.004).element(width, height));
        let before = scene.element(panel).unwrap().mesh().unwrap().hash();
        scene.set_width(panel, width);
        let after = scene.element(panel).unwrap().mesh().unwrap().hash();
        prop_assert_eq!(before, after);

        scene.mark_dirty(panel);
        prop_assert_eq!(scene.rebuild_dirty(), 1);
        prop_assert_eq!(scene.element(panel).unwrap().mesh().unwrap().hash(), before);
        prop_assert_eq!(scene.rebuild_dirty(), 0);
    }

    /// Property: colliders contain the mesh and are at least as deep as the
    /// configured minimum
    #[test]
    fn collider_encloses_mesh(
        width in 0.05f32..1.0,
        height in 0.05f32..1.0,
        deep in any::<bool>(),
    ) {
        let config = Ui3dConfig::default();
        let mut scene = UIScene::with_config(config);
        let id = if deep {
            scene.add_element(None, "rail", RailWidget::default().element(width, height))
        } else {
            scene.add_element(None, "panel", PanelWidget::plate(0.01, 0.002).element(width, height))
        };
        let element = scene.element(id).unwrap();
        let collider = element.collider().unwrap();
        let bounds = element.mesh().unwrap().bounds().unwrap();
        prop_assert!(collider.min.abs_diff_eq(bounds.min, EPS));
        prop_assert!(collider.max.x >= bounds.max.x - EPS && collider.max.y >= bounds.max.y - EPS);

        let min_depth = if deep {
            config.collider.min_depth_deep
        } else {
            config.collider.min_depth_shallow
        };
        prop_assert!(collider.size().z >= min_depth - EPS);
        prop_assert!(collider.max.z >= bounds.max.z - EPS);
    }
}

#[test]
fn reparenting_moves_to_new_anchor() {
    let mut scene = UIScene::new();
    let left = scene.add_element(None, "left", PanelWidget::plate(0.01, 0.002).element(0.3, 0.3));
    let right = scene.add_element(None, "right", PanelWidget::plate(0.05, 0.002).element(0.3, 0.3));
    let child = scene.add_element(Some(left), "child", PanelWidget::plate(0.0, 0.001).element(0.1, 0.1));
    scene.set_relative_location(child, Vec3::new(0.02, 0.0, 0.0));
    assert!(child_offset(&scene, child).length() < EPS);

    scene.set_parent(child, Some(right));
    assert_eq!(scene.parent(child), Some(right));
    let local = scene.transform(child).unwrap().position;
    assert!(local.abs_diff_eq(Vec3::new(0.07, -0.05, 0.0), EPS), "{local:?}");
}

#[test]
fn same_inputs_give_same_scene_meshes() {
    let build = || {
        let theme = Theme::builtin();
        let mut scene = UIScene::new();
        let panel = scene.add_element(None, "panel", PanelWidget::plate(0.02, 0.005).element(0.4, 0.3));
        scene.add_element(Some(panel), "button", ButtonWidget::new().element(0.12, 0.04, &theme));
        scene.add_element(Some(panel), "rail", RailWidget::default().element(0.3, 0.02));
        scene
            .element_ids()
            .into_iter()
            .map(|id| scene.element(id).unwrap().mesh().unwrap().hash())
            .collect::<Vec<_>>()
    };
    assert_eq!(build(), build());
}
