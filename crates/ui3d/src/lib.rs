#![warn(missing_docs)]
//! Diegetic 3D widget core.
//!
//! Widgets are spatial objects living in a [`UIScene`]: each one carries a
//! procedurally generated mesh, a collider derived from it, and a color that
//! follows its interaction state. Windows built from these widgets can dock
//! to each other edge to edge through the [`docking`] module.
//!
//! # Features
//!
//! - **Geometry**: box, rounded box, rounded tube, hollow frame and slider
//!   knob builders with deterministic output
//! - **Spatial elements**: anchor-relative layout propagated through a node
//!   hierarchy, themed colors with ordered state priority
//! - **Interaction**: ray events gated by a global switch and cursor locks,
//!   collider picking
//! - **Docking**: proximity-driven window anchors with a shared registry
//!
//! # Example
//!
//! ```rust
//! use vrwidgets_core::Theme;
//! use vrwidgets_ui3d::{ButtonWidget, PanelWidget, UIScene};
//! use glam::Vec3;
//!
//! let theme = Theme::builtin();
//! let mut scene = UIScene::new();
//!
//! let panel = scene.add_element(None, "panel", PanelWidget::plate(0.02, 0.005).element(0.4, 0.3));
//! let ok = scene.add_element(
//!     Some(panel),
//!     "ok",
//!     ButtonWidget::new()
//!         .element(0.1, 0.04, &theme)
//!         .with_relative_location(Vec3::new(0.0, -0.05, -0.005)),
//! );
//!
//! scene.set_width(panel, 0.6);
//! assert!(scene.element(ok).is_some());
//! ```

pub mod components;
pub mod config;
pub mod docking;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod scene;

// Re-export commonly used types
pub use components::{
    ButtonWidget, ElementColors, InteractionState, KnobWidget, Material, PanelStyle, PanelWidget,
    RailWidget, SpatialElement, Transform3D, WidgetBehavior,
};
pub use config::{ConfigError, Ui3dConfig};
pub use docking::{AnchorId, AnchorRegistry, AnchorState, AnchorType, DockEvent, GripOracle};
pub use geometry::{Aabb, Mesh, MeshHash};
pub use interaction::{InteractionContext, Ray, RayDispatch, RayEvent, RayHit};
pub use scene::{NodeId, UIScene};

use anyhow::Result;

/// Version of the widget crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the crate version; call once at startup.
pub fn init() -> Result<()> {
    tracing::info!("Initializing vrwidgets-ui3d v{}", VERSION);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert!(init().is_ok());
    }
}
