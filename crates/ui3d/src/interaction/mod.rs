//! Ray interaction with spatial elements.
//!
//! Hosts cast their own rays (see [`UIScene::pick`]) and feed the resulting
//! [`RayEvent`]s back through [`UIScene::dispatch_ray`]. Dispatch is gated by
//! the shared [`InteractionContext`]: a global "UI enabled" switch and an
//! optional widget that has locked the cursor.

mod raycaster;

pub use raycaster::RayHit;

use glam::Vec3;
use tracing::trace;
use vrwidgets_core::OrderedGuard;

use crate::components::{InteractionState, Transform3D};
use crate::scene::{NodeId, UIScene};

/// Half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Direction; not required to be normalized.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` along `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Something the ray did relative to an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayEvent {
    /// Ray started pointing at the element.
    Enter,
    /// Ray started pointing at the element with the trigger held.
    EnterClicked,
    /// Ray keeps pointing at the element.
    Hover(Ray),
    /// Ray keeps pointing at the element with the trigger held.
    HoverClicked(Ray),
    /// Ray left the element.
    Exit,
    /// Ray left the element with the trigger held.
    ExitClicked,
    /// Trigger pressed on the element.
    Click,
    /// Trigger released while still on the element.
    ReleaseInside,
    /// Trigger released after leaving the element.
    ReleaseOutside,
}

/// Coarse grouping of [`RayEvent`]s used by the ignore gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayPhase {
    /// Entering the element.
    Enter,
    /// Staying on the element.
    Stay,
    /// Leaving or releasing.
    Exit,
}

impl RayEvent {
    /// Phase of this event.
    pub fn phase(&self) -> RayPhase {
        match self {
            RayEvent::Enter | RayEvent::EnterClicked => RayPhase::Enter,
            RayEvent::Hover(_) | RayEvent::HoverClicked(_) | RayEvent::Click => RayPhase::Stay,
            RayEvent::Exit
            | RayEvent::ExitClicked
            | RayEvent::ReleaseInside
            | RayEvent::ReleaseOutside => RayPhase::Exit,
        }
    }
}

/// Shared gate for ray dispatch.
#[derive(Debug, Clone)]
pub struct InteractionContext {
    /// Global interaction switch; hold a [`vrwidgets_core::GuardHolder`] to
    /// disable the UI for a while.
    pub ui_enabled: OrderedGuard<bool>,
    /// Widget currently owning the cursor, if any.
    pub locked: Option<NodeId>,
}

impl Default for InteractionContext {
    fn default() -> Self {
        Self {
            ui_enabled: OrderedGuard::new(true),
            locked: None,
        }
    }
}

impl InteractionContext {
    /// Enabled context with no cursor lock.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Outcome of [`UIScene::dispatch_ray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayDispatch {
    /// The gate dropped the event, or the node carries no element.
    Ignored,
    /// The behavior saw the event.
    Handled {
        /// For releases, whether the widget was validated.
        validated: bool,
    },
}

/// The common hover and push reaction shared by most widgets.
///
/// Widgets call [`StandardFeedback::apply`] from their
/// [`crate::components::WidgetBehavior::on_ray`] to opt in.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFeedback;

impl StandardFeedback {
    /// Update hovered/pushed for `event`. Returns `true` for a release that
    /// happened on the element.
    pub fn apply(event: RayEvent, state: &mut InteractionState) -> bool {
        let (hovered, pushed) = match event {
            RayEvent::Enter | RayEvent::Hover(_) => (true, false),
            RayEvent::EnterClicked | RayEvent::HoverClicked(_) | RayEvent::Click => (true, true),
            RayEvent::Exit | RayEvent::ReleaseOutside => (false, false),
            RayEvent::ExitClicked | RayEvent::ReleaseInside => (true, false),
        };
        state.set(InteractionState::HOVERED, hovered);
        state.set(InteractionState::PUSHED, pushed);
        !matches!(event, RayEvent::ReleaseOutside)
    }
}

impl UIScene {
    /// Whether an event of `phase` aimed at `id` must be dropped.
    ///
    /// Any phase is dropped while another widget holds the cursor. Enter and
    /// stay events are also dropped when the UI is globally disabled, the
    /// element is disabled, or its behavior asks to ignore rays. Exit events
    /// still go through in those cases so hover and push state can clear.
    pub fn needs_to_ignore(&self, id: NodeId, phase: RayPhase, ctx: &InteractionContext) -> bool {
        if ctx.locked.is_some_and(|locked| locked != id) {
            return true;
        }
        if phase == RayPhase::Exit {
            return false;
        }
        let Some(element) = self.element(id) else {
            return true;
        };
        !ctx.ui_enabled.value()
            || element.is_disabled()
            || element.behavior.ignores_ray_interaction(element.state)
    }

    /// Route `event` to the behavior of `id`, then refresh its colors.
    pub fn dispatch_ray(
        &mut self,
        id: NodeId,
        event: RayEvent,
        ctx: &InteractionContext,
    ) -> RayDispatch {
        if self.needs_to_ignore(id, event.phase(), ctx) {
            trace!(node = %id, ?event, "ray event ignored");
            return RayDispatch::Ignored;
        }
        let Some(element) = self.element_mut(id) else {
            trace!("ray event on {id} without element");
            return RayDispatch::Ignored;
        };
        let mut state = element.state;
        let validated = element.behavior.on_ray(event, &mut state);
        element.state = state;
        element.reset_color();
        RayDispatch::Handled { validated }
    }

    /// Whether `id` repositions the cursor while hovered.
    pub fn handles_cursor_behavior(&self, id: NodeId) -> bool {
        self.element(id)
            .is_some_and(|e| e.behavior.handles_cursor_behavior())
    }

    /// Let `id` reposition the cursor. No-op unless it handles the cursor.
    pub fn handle_cursor_behavior(
        &mut self,
        id: NodeId,
        world_cursor_center: Vec3,
        cursor: &mut Transform3D,
    ) {
        if let Some(element) = self.element_mut(id) {
            if element.behavior.handles_cursor_behavior() {
                element
                    .behavior
                    .handle_cursor_behavior(world_cursor_center, cursor);
            }
        }
    }

    /// Whether `id` moves the visible end of the ray.
    pub fn overrides_ray_end_point(&self, id: NodeId) -> bool {
        self.element(id)
            .is_some_and(|e| e.behavior.overrides_ray_end_point())
    }

    /// Let `id` move the visible end of `ray`. No-op unless it overrides it.
    pub fn override_ray_end_point(&self, id: NodeId, ray: &Ray, end_point: &mut Vec3) {
        if let Some(element) = self.element(id) {
            if element.behavior.overrides_ray_end_point() {
                element.behavior.override_ray_end_point(ray, end_point);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ButtonWidget, PlainElement, SpatialElement, WidgetBehavior};
    use vrwidgets_core::Theme;

    fn button_scene() -> (UIScene, NodeId) {
        let theme = Theme::builtin();
        let mut scene = UIScene::new();
        let id = scene.add_element(None, "ok", ButtonWidget::new().element(0.1, 0.04, &theme));
        (scene, id)
    }

    #[test]
    fn feedback_table() {
        let cases = [
            (RayEvent::Enter, true, false, true),
            (RayEvent::EnterClicked, true, true, true),
            (RayEvent::Hover(Ray::new(Vec3::ZERO, Vec3::Z)), true, false, true),
            (RayEvent::HoverClicked(Ray::new(Vec3::ZERO, Vec3::Z)), true, true, true),
            (RayEvent::Exit, false, false, true),
            (RayEvent::ExitClicked, true, false, true),
            (RayEvent::Click, true, true, true),
            (RayEvent::ReleaseInside, true, false, true),
            (RayEvent::ReleaseOutside, false, false, false),
        ];
        for (event, hovered, pushed, result) in cases {
            let mut state = InteractionState::PUSHED | InteractionState::SELECTED;
            assert_eq!(StandardFeedback::apply(event, &mut state), result, "{event:?}");
            assert_eq!(state.contains(InteractionState::HOVERED), hovered, "{event:?}");
            assert_eq!(state.contains(InteractionState::PUSHED), pushed, "{event:?}");
            assert!(state.contains(InteractionState::SELECTED));
        }
    }

    #[test]
    fn plain_elements_ignore_rays_by_default() {
        let mut scene = UIScene::new();
        let id = scene.add_element(None, "plain", SpatialElement::new(0.1, 0.1, PlainElement));
        let ctx = InteractionContext::new();
        assert_eq!(
            scene.dispatch_ray(id, RayEvent::Enter, &ctx),
            RayDispatch::Handled { validated: false }
        );
        assert!(!scene.element(id).unwrap().is_hovered());
    }

    #[test]
    fn disabled_ui_blocks_enter_but_not_exit() {
        let (mut scene, id) = button_scene();
        let ctx = InteractionContext::new();
        scene.dispatch_ray(id, RayEvent::Enter, &ctx);
        assert!(scene.element(id).unwrap().is_hovered());

        let holder = ctx.ui_enabled.set_value(false);
        assert_eq!(scene.dispatch_ray(id, RayEvent::Click, &ctx), RayDispatch::Ignored);
        assert!(!scene.element(id).unwrap().is_pushed());
        scene.dispatch_ray(id, RayEvent::Exit, &ctx);
        assert!(!scene.element(id).unwrap().is_hovered());
        drop(holder);

        assert!(matches!(
            scene.dispatch_ray(id, RayEvent::Enter, &ctx),
            RayDispatch::Handled { .. }
        ));
    }

    #[test]
    fn disabled_element_ignores_entry() {
        let (mut scene, id) = button_scene();
        scene.set_disabled(id, true);
        let ctx = InteractionContext::new();
        assert_eq!(scene.dispatch_ray(id, RayEvent::Enter, &ctx), RayDispatch::Ignored);
        assert!(!scene.element(id).unwrap().is_hovered());
    }

    #[test]
    fn cursor_lock_blocks_every_phase_for_others() {
        let (mut scene, id) = button_scene();
        let theme = Theme::builtin();
        let other = scene.add_element(None, "other", ButtonWidget::new().element(0.1, 0.04, &theme));
        let ctx = InteractionContext {
            locked: Some(other),
            ..InteractionContext::new()
        };
        assert!(scene.needs_to_ignore(id, RayPhase::Exit, &ctx));
        assert!(!scene.needs_to_ignore(other, RayPhase::Enter, &ctx));
    }

    #[test]
    fn release_reports_validation() {
        let (mut scene, id) = button_scene();
        let ctx = InteractionContext::new();
        scene.dispatch_ray(id, RayEvent::Click, &ctx);
        assert_eq!(
            scene.dispatch_ray(id, RayEvent::ReleaseInside, &ctx),
            RayDispatch::Handled { validated: true }
        );
        scene.dispatch_ray(id, RayEvent::Click, &ctx);
        assert_eq!(
            scene.dispatch_ray(id, RayEvent::ReleaseOutside, &ctx),
            RayDispatch::Handled { validated: false }
        );
    }

    #[derive(Debug)]
    struct Magnet;

    impl WidgetBehavior for Magnet {
        fn handles_cursor_behavior(&self) -> bool {
            true
        }

        fn handle_cursor_behavior(&mut self, world_cursor_center: Vec3, cursor: &mut Transform3D) {
            cursor.position = world_cursor_center.round();
        }

        fn overrides_ray_end_point(&self) -> bool {
            true
        }

        fn override_ray_end_point(&self, ray: &Ray, end_point: &mut Vec3) {
            *end_point = ray.at(1.0);
        }
    }

    #[test]
    fn cursor_and_ray_end_hooks() {
        let mut scene = UIScene::new();
        let plain = scene.add_element(None, "plain", SpatialElement::new(0.1, 0.1, PlainElement));
        let magnet = scene.add_element(None, "magnet", SpatialElement::new(0.1, 0.1, Magnet));

        let mut cursor = Transform3D::default();
        scene.handle_cursor_behavior(plain, Vec3::splat(0.9), &mut cursor);
        assert_eq!(cursor.position, Vec3::ZERO);
        assert!(scene.handles_cursor_behavior(magnet));
        scene.handle_cursor_behavior(magnet, Vec3::splat(0.9), &mut cursor);
        assert_eq!(cursor.position, Vec3::ONE);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut end = Vec3::splat(5.0);
        scene.override_ray_end_point(plain, &ray, &mut end);
        assert_eq!(end, Vec3::splat(5.0));
        scene.override_ray_end_point(magnet, &ray, &mut end);
        assert_eq!(end, Vec3::Z);
        assert!(!scene.overrides_ray_end_point(plain));
    }
}
