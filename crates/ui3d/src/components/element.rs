//! The spatial element record and its color state machine.

use bitflags::bitflags;
use glam::Vec3;
use tracing::trace;
use vrwidgets_core::{keys, Color, ColorReference, Theme};

use super::{SharedMaterial, WidgetBehavior};
use crate::geometry::{Aabb, Mesh};
use crate::scene::{NodeId, UIScene};

bitflags! {
    /// Interaction flags of an element.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InteractionState: u8 {
        /// Not interactive; rays are ignored.
        const DISABLED = 1 << 0;
        /// Part of the current selection.
        const SELECTED = 1 << 1;
        /// Held down by the ray or cursor.
        const PUSHED = 1 << 2;
        /// Under the ray or cursor.
        const HOVERED = 1 << 3;
        /// Toggled on (checkable buttons).
        const CHECKED = 1 << 4;
    }
}

/// Names one of the [`ElementColors`] slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    /// Idle surface color.
    Base,
    /// Foreground color.
    Text,
    /// Foreground color while disabled.
    DisabledText,
    /// Surface color while disabled.
    Disabled,
    /// Surface color while pushed.
    Pushed,
    /// Surface color while selected.
    Selected,
    /// Surface color while hovered.
    Hovered,
    /// Surface color while checked.
    Checked,
}

/// One entry of a widget's color priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRule {
    /// Flag that activates the rule.
    pub when: InteractionState,
    /// Color shown when it does.
    pub slot: ColorSlot,
}

impl ColorRule {
    /// Rule showing `slot` while `when` is set.
    pub const fn new(when: InteractionState, slot: ColorSlot) -> Self {
        Self { when, slot }
    }
}

/// disabled > pushed > selected > hovered, then base.
pub const DEFAULT_COLOR_RULES: &[ColorRule] = &[
    ColorRule::new(InteractionState::DISABLED, ColorSlot::Disabled),
    ColorRule::new(InteractionState::PUSHED, ColorSlot::Pushed),
    ColorRule::new(InteractionState::SELECTED, ColorSlot::Selected),
    ColorRule::new(InteractionState::HOVERED, ColorSlot::Hovered),
];

/// disabled > pushed > checked > selected > hovered, then base.
pub const BUTTON_COLOR_RULES: &[ColorRule] = &[
    ColorRule::new(InteractionState::DISABLED, ColorSlot::Disabled),
    ColorRule::new(InteractionState::PUSHED, ColorSlot::Pushed),
    ColorRule::new(InteractionState::CHECKED, ColorSlot::Checked),
    ColorRule::new(InteractionState::SELECTED, ColorSlot::Selected),
    ColorRule::new(InteractionState::HOVERED, ColorSlot::Hovered),
];

/// Color slots of an element.
#[derive(Debug, Clone, Default)]
pub struct ElementColors {
    /// Idle surface.
    pub base: ColorReference,
    /// Foreground.
    pub text: ColorReference,
    /// Foreground while disabled.
    pub disabled_text: ColorReference,
    /// Surface while disabled.
    pub disabled: ColorReference,
    /// Surface while pushed.
    pub pushed: ColorReference,
    /// Surface while selected.
    pub selected: ColorReference,
    /// Surface while hovered.
    pub hovered: ColorReference,
    /// Surface while checked.
    pub checked: ColorReference,
}

impl ElementColors {
    /// Slots bound to the theme's widget variables.
    pub fn from_theme(theme: &Theme) -> Self {
        Self::from_theme_with_base(theme, keys::BASE)
    }

    /// Like [`ElementColors::from_theme`] with a different base variable,
    /// e.g. [`keys::BACKGROUND`] for window panels.
    pub fn from_theme_with_base(theme: &Theme, base: &str) -> Self {
        Self {
            base: theme.reference(base),
            text: theme.reference(keys::TEXT),
            disabled_text: theme.reference(keys::DISABLED_TEXT),
            disabled: theme.reference(keys::DISABLED),
            pushed: theme.reference(keys::PUSHED),
            selected: theme.reference(keys::SELECTED),
            hovered: theme.reference(keys::HOVERED),
            checked: theme.reference(keys::CHECKED),
        }
    }

    /// The reference behind `slot`.
    pub fn get(&self, slot: ColorSlot) -> &ColorReference {
        match slot {
            ColorSlot::Base => &self.base,
            ColorSlot::Text => &self.text,
            ColorSlot::DisabledText => &self.disabled_text,
            ColorSlot::Disabled => &self.disabled,
            ColorSlot::Pushed => &self.pushed,
            ColorSlot::Selected => &self.selected,
            ColorSlot::Hovered => &self.hovered,
            ColorSlot::Checked => &self.checked,
        }
    }

    /// Mutable access to the reference behind `slot`.
    pub fn get_mut(&mut self, slot: ColorSlot) -> &mut ColorReference {
        match slot {
            ColorSlot::Base => &mut self.base,
            ColorSlot::Text => &mut self.text,
            ColorSlot::DisabledText => &mut self.disabled_text,
            ColorSlot::Disabled => &mut self.disabled,
            ColorSlot::Pushed => &mut self.pushed,
            ColorSlot::Selected => &mut self.selected,
            ColorSlot::Hovered => &mut self.hovered,
            ColorSlot::Checked => &mut self.checked,
        }
    }
}

/// Surface color for `state`: the first matching rule's slot, else base.
pub fn resolve_color(
    rules: &[ColorRule],
    state: InteractionState,
    colors: &ElementColors,
) -> Color {
    rules
        .iter()
        .find(|rule| state.contains(rule.when))
        .map(|rule| colors.get(rule.slot).value())
        .unwrap_or_else(|| colors.base.value())
}

/// Size and placement parameters of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementLayout {
    /// Extent along +X.
    pub width: f32,
    /// Extent along -Y.
    pub height: f32,
    /// Offset from the parent's anchor.
    pub relative_location: Vec3,
    /// Offset at which children's relative locations are measured.
    pub anchor: Vec3,
}

impl Default for ElementLayout {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            relative_location: Vec3::ZERO,
            anchor: Vec3::ZERO,
        }
    }
}

/// Behavior of an element with no widget-specific logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainElement;

impl WidgetBehavior for PlainElement {}

/// Layout, colors, interaction state and generated mesh of one widget.
#[derive(Debug)]
pub struct SpatialElement {
    pub(crate) layout: ElementLayout,
    /// Color slots; call [`UIScene::reset_color`] after editing them.
    pub colors: ElementColors,
    pub(crate) state: InteractionState,
    pub(crate) needs_rebuild: bool,
    pub(crate) mesh: Option<Mesh>,
    pub(crate) collider: Option<Aabb>,
    pub(crate) material: Option<SharedMaterial>,
    pub(crate) foreground: Color,
    pub(crate) behavior: Box<dyn WidgetBehavior>,
}

impl SpatialElement {
    /// Element of the given size driven by `behavior`.
    pub fn new(width: f32, height: f32, behavior: impl WidgetBehavior + 'static) -> Self {
        Self {
            layout: ElementLayout {
                width,
                height,
                ..ElementLayout::default()
            },
            colors: ElementColors::default(),
            state: InteractionState::empty(),
            needs_rebuild: true,
            mesh: None,
            collider: None,
            material: None,
            foreground: Color::default(),
            behavior: Box::new(behavior),
        }
    }

    /// Builder: offset from the parent's anchor.
    pub fn with_relative_location(mut self, location: Vec3) -> Self {
        self.layout.relative_location = location;
        self
    }

    /// Builder: color slots.
    pub fn with_colors(mut self, colors: ElementColors) -> Self {
        self.colors = colors;
        self
    }

    /// Builder: shared material receiving the surface color.
    pub fn with_material(mut self, material: SharedMaterial) -> Self {
        self.material = Some(material);
        self
    }

    /// Builder: initial interaction flags.
    pub fn with_state(mut self, state: InteractionState) -> Self {
        self.state = state;
        self
    }

    /// Current layout.
    pub fn layout(&self) -> &ElementLayout {
        &self.layout
    }

    /// Width.
    pub fn width(&self) -> f32 {
        self.layout.width
    }

    /// Height.
    pub fn height(&self) -> f32 {
        self.layout.height
    }

    /// Offset from the parent's anchor.
    pub fn relative_location(&self) -> Vec3 {
        self.layout.relative_location
    }

    /// Anchor exposed to children.
    pub fn anchor(&self) -> Vec3 {
        self.layout.anchor
    }

    /// Interaction flags.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Whether the element is disabled.
    pub fn is_disabled(&self) -> bool {
        self.state.contains(InteractionState::DISABLED)
    }

    /// Whether the element is selected.
    pub fn is_selected(&self) -> bool {
        self.state.contains(InteractionState::SELECTED)
    }

    /// Whether the element is pushed.
    pub fn is_pushed(&self) -> bool {
        self.state.contains(InteractionState::PUSHED)
    }

    /// Whether the element is hovered.
    pub fn is_hovered(&self) -> bool {
        self.state.contains(InteractionState::HOVERED)
    }

    /// Whether the element is checked.
    pub fn is_checked(&self) -> bool {
        self.state.contains(InteractionState::CHECKED)
    }

    /// Whether the mesh is stale.
    pub fn needs_rebuild(&self) -> bool {
        self.needs_rebuild
    }

    /// Last generated mesh.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Local-space collider derived from the mesh.
    pub fn collider(&self) -> Option<Aabb> {
        self.collider
    }

    /// Shared material, if any.
    pub fn material(&self) -> Option<&SharedMaterial> {
        self.material.as_ref()
    }

    /// Last resolved foreground color.
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Widget kind reported by the behavior.
    pub fn kind(&self) -> &'static str {
        self.behavior.kind()
    }

    /// Resolve and apply surface and foreground colors.
    pub(crate) fn reset_color(&mut self) {
        let color = resolve_color(self.behavior.color_rules(), self.state, &self.colors);
        self.behavior.set_color(self.material.as_ref(), color);
        let foreground = if self.is_disabled() {
            self.colors.disabled_text.value()
        } else {
            self.colors.text.value()
        };
        self.foreground = foreground;
        self.behavior.set_foreground_color(foreground);
    }

    fn set_flag(&mut self, flag: InteractionState, value: bool) {
        self.state.set(flag, value);
        self.reset_color();
    }
}

impl UIScene {
    /// Spawn a node carrying `element` under `parent`.
    ///
    /// The element's mesh, anchor, local position and colors are all brought
    /// up to date before this returns.
    pub fn add_element(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        element: SpatialElement,
    ) -> NodeId {
        let id = self.spawn(name);
        if let Some(parent) = parent {
            self.attach(id, Some(parent));
        }
        if let Some(node) = self.node_mut(id) {
            node.element = Some(element);
        }
        self.rebuild_element(id);
        self.update_local_position(id);
        self.reset_color(id);
        id
    }

    /// The element carried by `id`.
    pub fn element(&self, id: NodeId) -> Option<&SpatialElement> {
        self.node(id).and_then(|n| n.element.as_ref())
    }

    /// Mutable access to the element carried by `id`.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut SpatialElement> {
        self.node_mut(id).and_then(|n| n.element.as_mut())
    }

    /// Ids of every node carrying an element, in slot order.
    pub fn element_ids(&self) -> Vec<NodeId> {
        self.ids().filter(|id| self.element(*id).is_some()).collect()
    }

    /// Set or clear the disabled flag and refresh colors.
    pub fn set_disabled(&mut self, id: NodeId, value: bool) {
        self.set_state_flag(id, InteractionState::DISABLED, value);
    }

    /// Set or clear the selected flag and refresh colors.
    pub fn set_selected(&mut self, id: NodeId, value: bool) {
        self.set_state_flag(id, InteractionState::SELECTED, value);
    }

    /// Set or clear the pushed flag and refresh colors.
    pub fn set_pushed(&mut self, id: NodeId, value: bool) {
        self.set_state_flag(id, InteractionState::PUSHED, value);
    }

    /// Set or clear the hovered flag and refresh colors.
    pub fn set_hovered(&mut self, id: NodeId, value: bool) {
        self.set_state_flag(id, InteractionState::HOVERED, value);
    }

    /// Set or clear the checked flag and refresh colors.
    pub fn set_checked(&mut self, id: NodeId, value: bool) {
        self.set_state_flag(id, InteractionState::CHECKED, value);
    }

    fn set_state_flag(&mut self, id: NodeId, flag: InteractionState, value: bool) {
        match self.element_mut(id) {
            Some(element) => element.set_flag(flag, value),
            None => trace!("state change on {id} without element"),
        }
    }

    /// Recompute and apply the displayed colors of `id`.
    pub fn reset_color(&mut self, id: NodeId) {
        if let Some(element) = self.element_mut(id) {
            element.reset_color();
        }
    }

    /// Displayed surface color of `id`, if its behavior can report one.
    pub fn color(&self, id: NodeId) -> Option<Color> {
        let element = self.element(id)?;
        element.behavior.get_color(element.material.as_ref())
    }
}
