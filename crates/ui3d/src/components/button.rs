//! Push and toggle buttons.

use glam::Vec3;
use vrwidgets_core::Theme;

use super::{
    ColorRule, ElementColors, ElementLayout, InteractionState, SpatialElement, WidgetBehavior,
    BUTTON_COLOR_RULES,
};
use crate::config::GeometryConfig;
use crate::geometry::{build_rounded_box_ex, corner_segments_for, Mesh};
use crate::interaction::{RayEvent, StandardFeedback};

/// Default corner radius of a button.
pub const DEFAULT_BUTTON_MARGIN: f32 = 0.005;
/// Default depth of a button.
pub const DEFAULT_BUTTON_THICKNESS: f32 = 0.001;

/// Rounded button following the standard hover/push feedback.
///
/// A checkable button flips its checked flag on every validated release and
/// shows the checked color ahead of selected and hovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonWidget {
    /// Corner radius.
    pub margin: f32,
    /// Depth along +Z.
    pub thickness: f32,
    /// Toggle on release.
    pub checkable: bool,
    /// Corner subdivision.
    pub geometry: GeometryConfig,
    clicks: u32,
}

impl Default for ButtonWidget {
    fn default() -> Self {
        Self {
            margin: DEFAULT_BUTTON_MARGIN,
            thickness: DEFAULT_BUTTON_THICKNESS,
            checkable: false,
            geometry: GeometryConfig::default(),
            clicks: 0,
        }
    }
}

impl ButtonWidget {
    /// Plain push button.
    pub fn new() -> Self {
        Self::default()
    }

    /// Button that toggles its checked state.
    pub fn checkable() -> Self {
        Self {
            checkable: true,
            ..Self::default()
        }
    }

    /// Builder: corner radius and depth.
    pub fn with_shape(mut self, margin: f32, thickness: f32) -> Self {
        self.margin = margin;
        self.thickness = thickness;
        self
    }

    /// Builder: corner subdivision.
    pub fn with_geometry(mut self, geometry: GeometryConfig) -> Self {
        self.geometry = geometry;
        self
    }

    /// Wrap into an element themed with `theme`.
    pub fn element(self, width: f32, height: f32, theme: &Theme) -> SpatialElement {
        SpatialElement::new(width, height, self).with_colors(ElementColors::from_theme(theme))
    }
}

impl WidgetBehavior for ButtonWidget {
    fn kind(&self) -> &'static str {
        if self.checkable {
            "checkbox"
        } else {
            "button"
        }
    }

    fn rebuild_mesh(&mut self, layout: &ElementLayout) -> Option<Mesh> {
        let segments = corner_segments_for(
            self.margin,
            self.geometry.corner_segments_fixed,
            self.geometry.corner_segments_per_unit,
        );
        Some(build_rounded_box_ex(
            layout.width,
            layout.height,
            self.margin,
            self.thickness,
            segments,
        ))
    }

    fn update_anchor(&self, layout: &ElementLayout) -> Vec3 {
        Vec3::new(0.0, -layout.height / 2.0, 0.0)
    }

    fn color_rules(&self) -> &'static [ColorRule] {
        BUTTON_COLOR_RULES
    }

    fn on_ray(&mut self, event: RayEvent, state: &mut InteractionState) -> bool {
        let validated = StandardFeedback::apply(event, state);
        if matches!(event, RayEvent::ReleaseInside) {
            self.clicks += 1;
            if self.checkable {
                state.toggle(InteractionState::CHECKED);
            }
        }
        validated
    }
}
