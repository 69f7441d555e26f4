//! Spatial element data and the per-widget behavior seam.
//!
//! Every widget is a [`SpatialElement`] stored on a scene node. What differs
//! between widgets (mesh shape, anchor, color rules, ray reactions) lives in
//! a boxed [`WidgetBehavior`].

pub mod button;
pub mod element;
pub mod panel;
pub mod slider;

pub use button::ButtonWidget;
pub use element::{
    resolve_color, ColorRule, ColorSlot, ElementColors, ElementLayout, InteractionState,
    PlainElement, SpatialElement, BUTTON_COLOR_RULES, DEFAULT_COLOR_RULES,
};
pub use panel::{PanelStyle, PanelWidget};
pub use slider::{KnobWidget, RailWidget};

use glam::{Mat4, Quat, Vec3};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use vrwidgets_core::Color;

use crate::geometry::Mesh;
use crate::interaction::{Ray, RayEvent};

/// Material parameter holding the main surface color.
pub const BASE_COLOR: &str = "_BaseColor";

/// Transform in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    /// Translation.
    pub position: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform3D {
    /// Identity rotation and unit scale at `position`.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder: set the scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set the rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Affine matrix applying scale, then rotation, then translation.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Named color parameters of a surface, shared between the widgets that use
/// the same material instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    colors: BTreeMap<String, Color>,
}

impl Material {
    /// Material with no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Material whose [`BASE_COLOR`] is `color`.
    pub fn with_base_color(color: Color) -> Self {
        let mut material = Self::new();
        material.set_color(BASE_COLOR, color);
        material
    }

    /// Set a named color parameter.
    pub fn set_color(&mut self, name: &str, color: Color) {
        self.colors.insert(name.to_string(), color);
    }

    /// Read a named color parameter.
    pub fn color(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }
}

/// Shared handle to a [`Material`].
pub type SharedMaterial = Rc<RefCell<Material>>;

/// Wrap a material in a shared handle.
pub fn shared_material(material: Material) -> SharedMaterial {
    Rc::new(RefCell::new(material))
}

/// Widget-specific hooks invoked by the scene.
///
/// Every method has a default matching a plain element: no mesh, a zero
/// anchor, the default color priority, colors written to the shared
/// material's [`BASE_COLOR`], and no reaction to rays.
pub trait WidgetBehavior: fmt::Debug {
    /// Short name used in logs and reports.
    fn kind(&self) -> &'static str {
        "element"
    }

    /// Produce a fresh mesh for the current layout.
    fn rebuild_mesh(&mut self, _layout: &ElementLayout) -> Option<Mesh> {
        None
    }

    /// Anchor offset exposed to children for the current layout.
    fn update_anchor(&self, _layout: &ElementLayout) -> Vec3 {
        Vec3::ZERO
    }

    /// Ordered (state, color) rules; the first rule whose state is set wins.
    fn color_rules(&self) -> &'static [ColorRule] {
        DEFAULT_COLOR_RULES
    }

    /// Whether the widget wants the deep collider depth floor.
    fn deep_collider(&self) -> bool {
        false
    }

    /// Apply the resolved surface color.
    fn set_color(&mut self, material: Option<&SharedMaterial>, color: Color) {
        if let Some(material) = material {
            material.borrow_mut().set_color(BASE_COLOR, color);
        }
    }

    /// Currently displayed surface color.
    fn get_color(&self, material: Option<&SharedMaterial>) -> Option<Color> {
        material.and_then(|m| m.borrow().color(BASE_COLOR))
    }

    /// Apply the resolved text/icon color.
    fn set_foreground_color(&mut self, _color: Color) {}

    /// Extra reasons to ignore rays beyond the global and disabled gates.
    fn ignores_ray_interaction(&self, _state: InteractionState) -> bool {
        false
    }

    /// React to a ray event. The scene recomputes colors afterwards.
    ///
    /// The return value only matters for releases: `true` means the release
    /// validates the widget.
    fn on_ray(&mut self, _event: RayEvent, _state: &mut InteractionState) -> bool {
        false
    }

    /// Whether the widget replaces the cursor while hovered.
    fn handles_cursor_behavior(&self) -> bool {
        false
    }

    /// Reposition the cursor while hovered.
    fn handle_cursor_behavior(&mut self, _world_cursor_center: Vec3, _cursor: &mut Transform3D) {}

    /// Whether the widget moves the visible end of the ray.
    fn overrides_ray_end_point(&self) -> bool {
        false
    }

    /// Move the visible end of the ray.
    fn override_ray_end_point(&self, _ray: &Ray, _end_point: &mut Vec3) {}
}
