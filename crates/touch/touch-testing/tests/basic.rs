//! Harness behaviour over small rendered trees.

#![allow(clippy::unwrap_used)]

use embedded_graphics::primitives::Rectangle;
use touch_system::prelude::*;
use touch_testing::TestPanel;

const GRAY: Rgb888 = Rgb888::new(0x66, 0x66, 0x66);

fn panel_with_tile() -> (TestPanel, NodeId) {
    let mut t = TestPanel::new(64, 48);
    let root = t.tree().root();
    let tile = t
        .tree_mut()
        .create(
            root,
            NodeKind::Container,
            Style::new()
                .size(Dimension::Px(32), Dimension::Px(16))
                .margin(Edges::all(4))
                .background(GRAY),
        )
        .unwrap();
    t.render();
    (t, tile)
}

#[test]
fn region_assertions_follow_layout() {
    let (t, tile) = panel_with_tile();
    let rect = t.rect(tile).unwrap();
    assert_eq!(rect, Rectangle::new(Point::new(4, 4), Size::new(32, 16)));

    t.assert_region_uniform(rect, GRAY).unwrap();
    t.assert_region_contains(Rectangle::new(Point::zero(), Size::new(64, 48)), GRAY)
        .unwrap();
    assert!(t
        .assert_region_uniform(Rectangle::new(Point::zero(), Size::new(10, 10)), GRAY)
        .is_err());
    assert_eq!(t.pixel_count_of_color(rect, GRAY), 32 * 16);
}

#[test]
fn hit_test_finds_tile() {
    let (t, tile) = panel_with_tile();
    assert_eq!(t.hit_test(Point::new(10, 10)), Some(tile));
    assert_eq!(t.hit_test(Point::new(50, 40)), Some(t.tree().root()));
}

#[test]
fn golden_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tile.png");

    let (t, _) = panel_with_tile();
    t.screenshot(&path).unwrap();
    t.assert_matches_golden(&path, 0).unwrap();

    let other = TestPanel::new(64, 48);
    let err = other.assert_matches_golden(&path, 0).unwrap_err();
    assert!(err.contains("512 pixels differ"), "{err}");
}
