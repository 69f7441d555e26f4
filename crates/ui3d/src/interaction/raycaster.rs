//! Ray picking against element colliders.

use glam::Vec3;

use super::Ray;
use crate::scene::{NodeId, UIScene};

/// Nearest element hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Element that was hit.
    pub node: NodeId,
    /// Distance along the ray, in units of the ray direction's length.
    pub distance: f32,
    /// World-space hit position.
    pub point: Vec3,
}

impl UIScene {
    /// Nearest visible element whose collider the ray crosses.
    ///
    /// Colliders are tested in each element's local frame, so rotated and
    /// scaled windows pick correctly.
    pub fn pick(&self, ray: &Ray) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for id in self.element_ids() {
            if !self.is_visible_in_hierarchy(id) {
                continue;
            }
            let Some(collider) = self.element(id).and_then(|e| e.collider()) else {
                continue;
            };
            let world = self.world_matrix(id);
            if world.determinant().abs() <= f32::EPSILON {
                continue;
            }
            let to_local = world.inverse();
            let origin = to_local.transform_point3(ray.origin);
            let direction = to_local.transform_vector3(ray.direction);
            // The parameter is shared by both frames because the map is affine.
            let Some(t) = collider.ray_intersection(origin, direction) else {
                continue;
            };
            if best.map_or(true, |hit| t < hit.distance) {
                best = Some(RayHit {
                    node: id,
                    distance: t,
                    point: ray.at(t),
                });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PanelWidget;
    use glam::Quat;

    #[test]
    fn picks_the_nearest_panel() {
        let mut scene = UIScene::new();
        let back = scene.add_element(None, "back", PanelWidget::plate(0.01, 0.01).element(1.0, 1.0));
        let front = scene.add_element(None, "front", PanelWidget::plate(0.01, 0.01).element(0.2, 0.2));
        scene.set_local_position(back, Vec3::new(-0.5, 0.5, 1.0));
        scene.set_local_position(front, Vec3::new(-0.1, 0.1, 0.5));

        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Z);
        let hit = scene.pick(&ray).unwrap();
        assert_eq!(hit.node, front);
        assert!((hit.distance - 1.5).abs() < 1e-5);

        scene.set_visible(front, false);
        let hit = scene.pick(&ray).unwrap();
        assert_eq!(hit.node, back);
        assert!((hit.point.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn rotated_window_is_picked_in_its_frame() {
        let mut scene = UIScene::new();
        let panel = scene.add_element(None, "panel", PanelWidget::plate(0.01, 0.01).element(1.0, 1.0));
        scene.set_local_rotation(panel, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));

        // Facing +X after the turn; a ray along Z now misses.
        assert!(scene
            .pick(&Ray::new(Vec3::new(0.5, -0.5, -2.0), Vec3::Z))
            .is_none());
        let hit = scene.pick(&Ray::new(Vec3::new(-2.0, -0.5, -0.5), Vec3::X));
        assert_eq!(hit.map(|h| h.node), Some(panel));
    }

    #[test]
    fn empty_scene_has_no_hit() {
        let scene = UIScene::new();
        assert!(scene.pick(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
    }
}
