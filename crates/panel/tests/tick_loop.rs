//! Tick loop against a mock display and scripted devices.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use panel::{App, Hal, PanelConfig, RowVariant};
use platform::mocks::{MockSurface, ScriptedInput};
use platform::{Indev, InputEvent, InputKind, Key};
use touch_system::prelude::*;

fn click(x: i32, y: i32) -> [InputEvent; 2] {
    let position = Point::new(x, y);
    [
        InputEvent::Pointer { position, pressed: true },
        InputEvent::Pointer {
            position,
            pressed: false,
        },
    ]
}

fn hal(pointer: &[InputEvent], wheel: &[InputEvent], keys: &[Key]) -> Hal<MockSurface> {
    Hal::new(
        MockSurface::new(480, 480),
        ScriptedInput::with_events(InputKind::Pointer, pointer.iter().copied()),
        ScriptedInput::with_events(InputKind::Wheel, wheel.iter().copied()),
        ScriptedInput::with_events(
            InputKind::Keyboard,
            keys.iter().map(|&key| InputEvent::Key { key, pressed: true }),
        ),
    )
}

#[test]
fn click_on_first_row_activates_it() {
    let mut app = App::new(hal(&click(240, 142), &[], &[]), &PanelConfig::default(), NoAssets).unwrap();
    let activations = app.tick().unwrap();

    assert_eq!(activations.len(), 1);
    assert_eq!(activations[0].index, 0);
    assert_eq!(activations[0].title, "WLAN");
}

#[test]
fn click_on_header_does_nothing() {
    let mut app = App::new(hal(&click(240, 40), &[], &[]), &PanelConfig::default(), NoAssets).unwrap();
    assert!(app.tick().unwrap().is_empty());
    assert_eq!(app.navigator().focused_index(), Some(0));
}

#[test]
fn wheel_scrolls_the_page() {
    let mut app = App::new(
        hal(&[], &[InputEvent::Wheel(3)], &[]),
        &PanelConfig::default(),
        NoAssets,
    )
    .unwrap();
    app.tick().unwrap();

    let screen = app.screen();
    assert_eq!(app.tree().scroll_y(screen.root), 120);
    let first = app.layout().rect(screen.rows[0].container).unwrap();
    assert_eq!(first.top_left.y, 94 - 120);
}

#[test]
fn keys_from_ungrouped_keyboard_are_dropped() {
    let keys = ScriptedInput::with_events(
        InputKind::Keyboard,
        [InputEvent::Key {
            key: Key::Down,
            pressed: true,
        }],
    );
    let indevs = vec![Indev::new(keys).bind_display()];
    let hal = Hal::with_indevs(MockSurface::new(480, 480), indevs);
    let mut app = App::new(hal, &PanelConfig::default(), NoAssets).unwrap();

    app.tick().unwrap();
    assert_eq!(app.navigator().focused_index(), Some(0));
}

#[test]
fn presented_frame_shows_rows() {
    let mut app = App::new(hal(&[], &[], &[]), &PanelConfig::default(), NoAssets).unwrap();
    app.tick().unwrap();

    let frame = app.surface().last_frame().unwrap();
    assert_eq!(frame.pixel(Point::new(240, 100)), Some(Rgb888::new(0x66, 0x66, 0x66)));
    assert_eq!(frame.pixel(Point::new(10, 142)), Some(Rgb888::BLACK));
}

#[test]
fn configured_items_and_variant_are_used() {
    let config = PanelConfig::from_json(
        r#"{ "caption": "Audio", "row_variant": "plain", "items": [{ "title": "Volume" }, { "title": "EQ" }] }"#,
    )
    .unwrap();
    assert_eq!(config.row_variant, RowVariant::Plain);

    let mut app = App::new(hal(&[], &[], &[Key::Down, Key::Enter]), &config, NoAssets).unwrap();
    let activations = app.tick().unwrap();

    assert_eq!(app.screen().len(), 2);
    assert_eq!(app.tree().text(app.screen().rows[1].label), Some("EQ"));
    assert_eq!(activations[0].title, "EQ");
    assert_eq!(app.layout().rect(app.screen().rows[0].container).unwrap().size, Size::new(384, 64));
}
