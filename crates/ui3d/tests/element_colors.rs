//! Color priority and theme binding across every interaction state.

use vrwidgets_core::{keys, Color, Theme};
use vrwidgets_ui3d::components::{shared_material, Material};
use vrwidgets_ui3d::{ButtonWidget, InteractionState, NodeId, PanelWidget, UIScene};

fn apply(scene: &mut UIScene, id: NodeId, state: InteractionState) {
    scene.set_disabled(id, state.contains(InteractionState::DISABLED));
    scene.set_selected(id, state.contains(InteractionState::SELECTED));
    scene.set_pushed(id, state.contains(InteractionState::PUSHED));
    scene.set_hovered(id, state.contains(InteractionState::HOVERED));
    scene.set_checked(id, state.contains(InteractionState::CHECKED));
}

fn expected(theme: &Theme, state: InteractionState, order: &[(InteractionState, &str)], base: &str) -> Color {
    let key = order
        .iter()
        .find(|(flag, _)| state.contains(*flag))
        .map_or(base, |(_, key)| *key);
    theme.get(key).unwrap().get()
}

fn all_states() -> impl Iterator<Item = InteractionState> {
    (0u8..32).map(InteractionState::from_bits_truncate)
}

#[test]
fn button_priority_over_all_states() {
    let theme = Theme::builtin();
    let mut scene = UIScene::new();
    let button = scene.add_element(
        None,
        "button",
        ButtonWidget::new()
            .element(0.1, 0.04, &theme)
            .with_material(shared_material(Material::new())),
    );
    let order = [
        (InteractionState::DISABLED, keys::DISABLED),
        (InteractionState::PUSHED, keys::PUSHED),
        (InteractionState::CHECKED, keys::CHECKED),
        (InteractionState::SELECTED, keys::SELECTED),
        (InteractionState::HOVERED, keys::HOVERED),
    ];

    for state in all_states() {
        apply(&mut scene, button, state);
        assert_eq!(scene.element(button).unwrap().state(), state);
        assert_eq!(
            scene.color(button),
            Some(expected(&theme, state, &order, keys::BASE)),
            "state {state:?}"
        );
        let foreground = if state.contains(InteractionState::DISABLED) {
            keys::DISABLED_TEXT
        } else {
            keys::TEXT
        };
        assert_eq!(
            scene.element(button).unwrap().foreground(),
            theme.get(foreground).unwrap().get()
        );
    }
}

#[test]
fn panel_ignores_checked() {
    let theme = Theme::builtin();
    let mut scene = UIScene::new();
    let panel = scene.add_element(
        None,
        "panel",
        PanelWidget::plate(0.01, 0.002)
            .element(0.3, 0.2)
            .with_colors(vrwidgets_ui3d::ElementColors::from_theme_with_base(
                &theme,
                keys::BACKGROUND,
            ))
            .with_material(shared_material(Material::new())),
    );
    let order = [
        (InteractionState::DISABLED, keys::DISABLED),
        (InteractionState::PUSHED, keys::PUSHED),
        (InteractionState::SELECTED, keys::SELECTED),
        (InteractionState::HOVERED, keys::HOVERED),
    ];

    for state in all_states() {
        apply(&mut scene, panel, state);
        assert_eq!(
            scene.color(panel),
            Some(expected(&theme, state, &order, keys::BACKGROUND)),
            "state {state:?}"
        );
    }
}

#[test]
fn theme_edits_reach_bound_widgets() {
    let mut theme = Theme::builtin();
    let material = shared_material(Material::new());
    let mut scene = UIScene::new();
    let button = scene.add_element(
        None,
        "button",
        ButtonWidget::new()
            .element(0.1, 0.04, &theme)
            .with_material(material.clone()),
    );
    scene.set_hovered(button, true);

    let accent = Color::rgb(0.9, 0.1, 0.1);
    theme.set(keys::HOVERED, accent).unwrap();
    // Bound references read through immediately; the material updates on
    // the next color refresh.
    scene.reset_color(button);
    assert_eq!(scene.color(button), Some(accent));

    let redefined = Color::rgb(0.1, 0.9, 0.1);
    theme.define(keys::HOVERED, redefined).unwrap();
    scene.reset_color(button);
    assert_eq!(scene.color(button), Some(redefined));
    assert!(theme.set("ui:missing", accent).is_err());
}

#[test]
fn unbound_slot_keeps_its_constant() {
    let theme = Theme::builtin();
    let mut scene = UIScene::new();
    let button = scene.add_element(
        None,
        "button",
        ButtonWidget::new()
            .element(0.1, 0.04, &theme)
            .with_material(shared_material(Material::new())),
    );
    let constant = Color::rgb(0.2, 0.3, 0.4);
    if let Some(element) = scene.element_mut(button) {
        element.colors.base.unbind();
        element.colors.base.set_value(constant);
    }
    scene.reset_color(button);
    assert_eq!(scene.color(button), Some(constant));

    theme.set(keys::BASE, Color::WHITE).unwrap();
    scene.reset_color(button);
    assert_eq!(scene.color(button), Some(constant));
}
