//! Slider parts: the hollow rail and the knob that rides in it.

use glam::Vec3;

use super::{ElementLayout, SpatialElement, WidgetBehavior};
use crate::geometry::{
    build_hollow_cube_ex, build_slider_knob, Mesh, DEFAULT_HOLLOW_MARGIN, DEFAULT_HOLLOW_THICKNESS,
};

/// Hollow frame the knob slides along.
///
/// Rails are grabbed from the side, so their collider uses the deep depth
/// floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailWidget {
    /// Frame border width.
    pub margin: f32,
    /// Frame depth.
    pub thickness: f32,
}

impl Default for RailWidget {
    fn default() -> Self {
        Self {
            margin: DEFAULT_HOLLOW_MARGIN,
            thickness: DEFAULT_HOLLOW_THICKNESS,
        }
    }
}

impl RailWidget {
    /// Rail with the given border and depth.
    pub fn new(margin: f32, thickness: f32) -> Self {
        Self { margin, thickness }
    }

    /// Wrap into an element of the given size.
    pub fn element(self, width: f32, height: f32) -> SpatialElement {
        SpatialElement::new(width, height, self)
    }
}

impl WidgetBehavior for RailWidget {
    fn kind(&self) -> &'static str {
        "slider_rail"
    }

    fn rebuild_mesh(&mut self, layout: &ElementLayout) -> Option<Mesh> {
        Some(build_hollow_cube_ex(
            layout.width,
            layout.height,
            self.margin,
            self.thickness,
        ))
    }

    fn deep_collider(&self) -> bool {
        true
    }
}

/// Knob of a slider; its width and height come from the element layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobWidget {
    /// Depth of the knob in front of the rail.
    pub depth: f32,
}

impl KnobWidget {
    /// Knob of the given depth.
    pub fn new(depth: f32) -> Self {
        Self { depth }
    }

    /// Wrap into an element of the given size.
    pub fn element(self, width: f32, height: f32) -> SpatialElement {
        SpatialElement::new(width, height, self)
    }
}

impl WidgetBehavior for KnobWidget {
    fn kind(&self) -> &'static str {
        "slider_knob"
    }

    fn rebuild_mesh(&mut self, layout: &ElementLayout) -> Option<Mesh> {
        Some(build_slider_knob(layout.width, layout.height, self.depth))
    }

    fn update_anchor(&self, _layout: &ElementLayout) -> Vec3 {
        Vec3::new(0.0, 0.0, -self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::UIScene;

    #[test]
    fn rail_collider_uses_deep_floor() {
        let mut scene = UIScene::new();
        let id = scene.add_element(None, "rail", RailWidget::default().element(0.3, 0.02));
        let element = scene.element(id).unwrap();
        let bounds = element.mesh().unwrap().bounds().unwrap();
        let collider = element.collider().unwrap();
        assert!((bounds.size().z - DEFAULT_HOLLOW_THICKNESS).abs() < 1e-6);
        assert!((collider.size().z - 0.1).abs() < 1e-6);
        assert_eq!(collider.min, bounds.min);
    }

    #[test]
    fn knob_sits_in_front_of_its_origin() {
        let mut scene = UIScene::new();
        let id = scene.add_element(None, "knob", KnobWidget::new(0.01).element(0.02, 0.03));
        let element = scene.element(id).unwrap();
        let bounds = element.mesh().unwrap().bounds().unwrap();
        assert!(bounds.max.z.abs() < 1e-6);
        assert!(bounds.min.z < 0.0);
        assert_eq!(element.anchor(), Vec3::new(0.0, 0.0, -0.01));
    }
}
