//! Window background panels.

use glam::Vec3;

use super::{SpatialElement, WidgetBehavior};
use crate::components::ElementLayout;
use crate::config::GeometryConfig;
use crate::geometry::{
    build_rounded_box_ex, build_rounded_rect_tube_ex, corner_segments_for, Mesh, TubeParams,
};

/// Surface shape of a [`PanelWidget`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelStyle {
    /// Solid rounded plate whose corner radius is the panel margin.
    Plate {
        /// Plate depth along +Z.
        thickness: f32,
    },
    /// Circular tube running along the rounded outline.
    Tube {
        /// Tube cross-section radius.
        radius: f32,
    },
}

/// Background of a window.
///
/// Children are laid out from an anchor inset by `margin` from the top-left
/// corner, so content never overlaps the rounded border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelWidget {
    /// Border inset, also the corner radius.
    pub margin: f32,
    /// Surface shape.
    pub style: PanelStyle,
    /// Corner subdivision.
    pub geometry: GeometryConfig,
}

impl PanelWidget {
    /// Rounded plate panel.
    pub fn plate(margin: f32, thickness: f32) -> Self {
        Self {
            margin,
            style: PanelStyle::Plate { thickness },
            geometry: GeometryConfig::default(),
        }
    }

    /// Rounded tube outline panel.
    pub fn tube(margin: f32, radius: f32) -> Self {
        Self {
            margin,
            style: PanelStyle::Tube { radius },
            geometry: GeometryConfig::default(),
        }
    }

    /// Builder: corner subdivision.
    pub fn with_geometry(mut self, geometry: GeometryConfig) -> Self {
        self.geometry = geometry;
        self
    }

    /// Wrap into an element of the given size.
    pub fn element(self, width: f32, height: f32) -> SpatialElement {
        SpatialElement::new(width, height, self)
    }
}

impl WidgetBehavior for PanelWidget {
    fn kind(&self) -> &'static str {
        "panel"
    }

    fn rebuild_mesh(&mut self, layout: &ElementLayout) -> Option<Mesh> {
        let mesh = match self.style {
            PanelStyle::Plate { thickness } => {
                let segments = corner_segments_for(
                    self.margin,
                    self.geometry.corner_segments_fixed,
                    self.geometry.corner_segments_per_unit,
                );
                build_rounded_box_ex(layout.width, layout.height, self.margin, thickness, segments)
            }
            PanelStyle::Tube { radius } => {
                let params = TubeParams {
                    corner_fixed: self.geometry.corner_segments_fixed,
                    corner_per_unit: self.geometry.corner_segments_per_unit,
                    ..TubeParams::default()
                };
                build_rounded_rect_tube_ex(layout.width, layout.height, self.margin, radius, params)
            }
        };
        Some(mesh)
    }

    fn update_anchor(&self, layout: &ElementLayout) -> Vec3 {
        let inset = self
            .margin
            .clamp(0.0, layout.width.min(layout.height).max(0.0) / 2.0);
        Vec3::new(inset, -inset, 0.0)
    }
}
