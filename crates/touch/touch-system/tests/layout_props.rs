//! Property tests for the layout pass over whole trees.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use proptest::prelude::*;
use touch_system::prelude::*;

fn column_screen(tree: &mut NodeTree) -> NodeId {
    let style = Style::new()
        .size(Dimension::Percent(100.0), Dimension::Percent(100.0))
        .flex_direction(FlexDirection::Column)
        .align_items(Align::Center);
    tree.create(tree.root(), NodeKind::Container, style).unwrap()
}

proptest! {
    #[test]
    fn column_children_never_overlap(heights in prop::collection::vec(1u32..120, 0..30), margin in 0u32..20) {
        let mut tree = NodeTree::new();
        let screen = column_screen(&mut tree);
        let ids: Vec<NodeId> = heights
            .iter()
            .map(|h| {
                let style = Style::new()
                    .size(Dimension::Px(50), Dimension::Px(*h))
                    .margin(Edges::vertical_only(margin))
                    .flex_shrink(0.0);
                tree.create(screen, NodeKind::Container, style).unwrap()
            })
            .collect();

        let layout = compute_layout(&tree, Size::new(480, 480));

        let mut expected_y = 0i32;
        for (id, h) in ids.iter().zip(&heights) {
            let rect = layout.rect(*id).unwrap();
            expected_y += i32::try_from(margin).unwrap();
            prop_assert_eq!(rect.top_left.y, expected_y);
            prop_assert_eq!(rect.size.height, *h);
            prop_assert_eq!(rect.top_left.x, 215);
            expected_y += i32::try_from(*h + margin).unwrap();
        }

        let extent = layout.content_extent(screen).unwrap();
        let total: u32 = heights.iter().map(|h| h + 2 * margin).sum();
        prop_assert_eq!(extent.height, total);
    }

    #[test]
    fn percent_width_is_independent_of_label_length(title in ".{0,60}", pct in 10.0f32..100.0) {
        let mut tree = NodeTree::new();
        let screen = column_screen(&mut tree);
        let row = tree
            .create(screen, NodeKind::Container, Style::new().width(Dimension::Percent(pct)))
            .unwrap();
        tree.create(row, NodeKind::label(title), Style::new().flex_grow(1.0)).unwrap();

        let layout = compute_layout(&tree, Size::new(480, 480));
        prop_assert_eq!(layout.rect(row).unwrap().size.width, Dimension::Percent(pct).resolve(480));
    }

    #[test]
    fn removal_drops_every_descendant(depth in 1usize..8, fanout in 1usize..4) {
        let mut tree = NodeTree::new();
        let top = tree.create(tree.root(), NodeKind::Container, Style::new()).unwrap();
        let mut frontier = vec![top];
        for _ in 1..depth {
            let mut next = Vec::new();
            for parent in &frontier {
                for _ in 0..fanout {
                    next.push(tree.create(*parent, NodeKind::Container, Style::new()).unwrap());
                }
            }
            frontier = next;
        }

        let before = tree.len();
        let removed = tree.remove(top).unwrap();
        prop_assert_eq!(before - removed, 1);
        prop_assert_eq!(tree.len(), 1);
        prop_assert!(tree.children(tree.root()).is_empty());
    }
}

#[test]
fn render_after_scroll_hides_rows_above_viewport() {
    let mut tree = NodeTree::new();
    let screen = column_screen(&mut tree);
    let gray = Rgb888::new(0x66, 0x66, 0x66);
    for _ in 0..10 {
        let style = Style::new()
            .size(Dimension::Px(100), Dimension::Px(100))
            .background(gray)
            .flex_shrink(0.0);
        tree.create(screen, NodeKind::Container, style).unwrap();
    }
    tree.set_scroll_y(screen, 540).unwrap();

    let layout = compute_layout(&tree, Size::new(480, 480));
    let mut frame = Framebuffer::new(480, 480);
    let stats = Renderer::new().render(&tree, &layout, &mut frame, &mut NoAssets);

    // Rows 5..=9 are visible: row 5 starts at y = -40, row 9 ends at y = 460.
    assert_eq!(stats.nodes_drawn, 2 + 5);
    assert_eq!(frame.pixel(Point::new(240, 0)), Some(gray));
    assert_eq!(frame.pixel(Point::new(240, 479)), Some(Rgb888::BLACK));
}
