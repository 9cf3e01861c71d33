//! Row navigation over a built screen.
//!
//! Rows are registered in the focus group in list order. Keys move the focus
//! (wrapping), the wheel scrolls the page, and a click or Enter activates a
//! row. Focus is shown by restyling the row's border; rows are never rebuilt.
//! Nothing is highlighted until the first key press or click.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::Point;
use platform::{InputEvent, InputGroup, Key};
use touch_system::layout::LayoutMap;
use touch_system::style::{Border, BorderOrder, Opacity, Style};
use touch_system::tree::{NodeId, NodeTree, TreeError};

use crate::screen::Screen;

/// Pixels scrolled per wheel step.
pub const WHEEL_STEP: u32 = 40;

/// Border of the focused row.
pub const FOCUS_BORDER: Border = Border {
    width: 3,
    color: Rgb888::WHITE,
    opacity: Opacity::COVER,
    order: BorderOrder::AfterContent,
};

/// A row was clicked or confirmed with Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Row position in the list.
    pub index: usize,
    /// Row title.
    pub title: String,
}

#[derive(Debug, Clone, Copy)]
struct RowEntry {
    container: NodeId,
    label: NodeId,
    base: Style,
}

/// Focus, scroll and activation state for one settings screen.
#[derive(Debug)]
pub struct Navigator {
    page: NodeId,
    rows: Vec<RowEntry>,
    group: InputGroup<NodeId>,
    pointer_down: bool,
    pressed_row: Option<NodeId>,
    highlighted: bool,
}

impl Navigator {
    /// Registers every row of `screen` in `group`; the first row takes the
    /// focus without being highlighted.
    ///
    /// Items already in the group are dropped; the group belongs to this
    /// screen from now on.
    pub fn new(tree: &mut NodeTree, screen: &Screen, mut group: InputGroup<NodeId>) -> Result<Self, TreeError> {
        group.clear();
        let mut rows = Vec::with_capacity(screen.rows.len());
        for row in &screen.rows {
            let base = *tree.style(row.container).ok_or(TreeError::UnknownNode(row.container))?;
            rows.push(RowEntry {
                container: row.container,
                label: row.label,
                base,
            });
            group.add(row.container);
        }

        let navigator = Self {
            page: screen.root,
            rows,
            group,
            pointer_down: false,
            pressed_row: None,
            highlighted: false,
        };
        tracing::debug!(rows = navigator.rows.len(), "navigation attached");
        Ok(navigator)
    }

    /// The focus group.
    pub fn group(&self) -> &InputGroup<NodeId> {
        &self.group
    }

    /// Index of the focused row.
    pub fn focused_index(&self) -> Option<usize> {
        self.group.focused_index()
    }

    /// Applies one input event.
    ///
    /// `layout` is the layout the user is looking at. Key events should only
    /// be passed from devices bound to the focus group.
    pub fn handle_event(
        &mut self,
        tree: &mut NodeTree,
        layout: &LayoutMap,
        event: InputEvent,
    ) -> Result<Option<Activation>, TreeError> {
        match event {
            InputEvent::Key { pressed: false, .. } => Ok(None),
            InputEvent::Key { key, pressed: true } => self.handle_key(tree, layout, key),
            InputEvent::Wheel(steps) => {
                let delta = i64::from(steps) * i64::from(WHEEL_STEP);
                self.scroll_by(tree, layout, delta)?;
                Ok(None)
            }
            InputEvent::Pointer { position, pressed } => self.handle_pointer(tree, layout, position, pressed),
        }
    }

    fn handle_key(&mut self, tree: &mut NodeTree, layout: &LayoutMap, key: Key) -> Result<Option<Activation>, TreeError> {
        let previous = self.group.focused();
        let next = match key {
            Key::Down | Key::Next => self.group.focus_next(),
            Key::Up | Key::Prev => self.group.focus_prev(),
            Key::Enter => return Ok(previous.and_then(|row| self.activation(tree, row))),
            Key::Left | Key::Right | Key::Escape => return Ok(None),
        };
        self.move_focus(tree, layout, previous, next)?;
        Ok(None)
    }

    fn handle_pointer(
        &mut self,
        tree: &mut NodeTree,
        layout: &LayoutMap,
        position: Point,
        pressed: bool,
    ) -> Result<Option<Activation>, TreeError> {
        match (self.pointer_down, pressed) {
            (false, true) => {
                self.pointer_down = true;
                self.pressed_row = self.row_at(tree, layout, position);
                Ok(None)
            }
            (true, false) => {
                self.pointer_down = false;
                let pressed_row = self.pressed_row.take();
                let released_row = self.row_at(tree, layout, position);
                match pressed_row {
                    Some(row) if released_row == Some(row) => {
                        let previous = self.group.focused();
                        self.group.focus(row);
                        self.move_focus(tree, layout, previous, Some(row))?;
                        Ok(self.activation(tree, row))
                    }
                    _ => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }

    /// Row container under `point`, if any.
    fn row_at(&self, tree: &NodeTree, layout: &LayoutMap, point: Point) -> Option<NodeId> {
        let mut node = layout.hit_test(tree, point);
        while let Some(id) = node {
            if self.entry(id).is_some() {
                return Some(id);
            }
            node = tree.parent(id);
        }
        None
    }

    fn entry(&self, container: NodeId) -> Option<&RowEntry> {
        self.rows.iter().find(|entry| entry.container == container)
    }

    fn activation(&self, tree: &NodeTree, row: NodeId) -> Option<Activation> {
        let index = self.rows.iter().position(|entry| entry.container == row)?;
        let label = self.rows.get(index)?.label;
        let title = tree.text(label).unwrap_or_default().to_owned();
        tracing::debug!(index, title = %title, "row activated");
        Some(Activation { index, title })
    }

    fn move_focus(
        &mut self,
        tree: &mut NodeTree,
        layout: &LayoutMap,
        previous: Option<NodeId>,
        next: Option<NodeId>,
    ) -> Result<(), TreeError> {
        if previous == next && self.highlighted {
            return Ok(());
        }
        self.highlighted = true;
        if let Some(row) = previous {
            self.restyle(tree, row, false)?;
        }
        if let Some(row) = next {
            self.restyle(tree, row, true)?;
            self.scroll_into_view(tree, layout, row)?;
        }
        Ok(())
    }

    fn restyle(&self, tree: &mut NodeTree, row: NodeId, focused: bool) -> Result<(), TreeError> {
        let Some(entry) = self.entry(row) else {
            return Ok(());
        };
        let style = if focused {
            entry.base.border(FOCUS_BORDER)
        } else {
            entry.base
        };
        tree.set_style(row, style)
    }

    /// Scrolls the page the least amount that shows `row` with its margins.
    /// The first row brings the page back to the top, header included.
    fn scroll_into_view(&self, tree: &mut NodeTree, layout: &LayoutMap, row: NodeId) -> Result<(), TreeError> {
        if self.rows.first().map(|entry| entry.container) == Some(row) {
            return self.scroll_by(tree, layout, -i64::from(tree.scroll_y(self.page)));
        }
        let (Some(rect), Some(page), Some(entry)) = (layout.rect(row), layout.rect(self.page), self.entry(row)) else {
            return Ok(());
        };
        let top = i64::from(rect.top_left.y) - i64::from(page.top_left.y) - i64::from(entry.base.margin.top);
        let bottom = top
            + i64::from(entry.base.margin.top)
            + i64::from(rect.size.height)
            + i64::from(entry.base.margin.bottom);
        let viewport = i64::from(page.size.height);

        let delta = if top < 0 {
            top
        } else if bottom > viewport {
            bottom - viewport
        } else {
            0
        };
        if delta != 0 {
            self.scroll_by(tree, layout, delta)?;
        }
        Ok(())
    }

    /// Scrolls the page by `delta` pixels, clamped to the scrollable range.
    fn scroll_by(&self, tree: &mut NodeTree, layout: &LayoutMap, delta: i64) -> Result<(), TreeError> {
        let max = i64::from(self.max_scroll(layout));
        let current = i64::from(tree.scroll_y(self.page));
        let target = (current + delta).clamp(0, max);
        if target != current {
            let offset = u32::try_from(target).unwrap_or(0);
            tracing::trace!(offset, "page scrolled");
            tree.set_scroll_y(self.page, offset)?;
        }
        Ok(())
    }

    /// Largest scroll offset for the page: content height minus viewport height.
    pub fn max_scroll(&self, layout: &LayoutMap) -> u32 {
        match (layout.content_extent(self.page), layout.rect(self.page)) {
            (Some(content), Some(page)) => content.height.saturating_sub(page.size.height),
            _ => 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::descriptor::reference_items;
    use crate::screen::build_screen;
    use embedded_graphics::prelude::Size;
    use touch_system::layout::compute_layout;

    const VIEW: Size = Size::new(480, 480);

    struct Fixture {
        tree: NodeTree,
        screen: Screen,
        nav: Navigator,
        layout: LayoutMap,
    }

    impl Fixture {
        fn new() -> Self {
            let mut tree = NodeTree::new();
            let screen = build_screen(&mut tree, &reference_items()).unwrap();
            let nav = Navigator::new(&mut tree, &screen, InputGroup::new()).unwrap();
            let layout = compute_layout(&tree, VIEW);
            Self {
                tree,
                screen,
                nav,
                layout,
            }
        }

        fn send(&mut self, event: InputEvent) -> Option<Activation> {
            let activation = self.nav.handle_event(&mut self.tree, &self.layout, event).unwrap();
            self.layout = compute_layout(&self.tree, VIEW);
            activation
        }

        fn press(&mut self, key: Key) -> Option<Activation> {
            self.send(InputEvent::Key { key, pressed: true })
        }

        fn click(&mut self, down: Point, up: Point) -> Option<Activation> {
            self.send(InputEvent::Pointer {
                position: down,
                pressed: true,
            });
            self.send(InputEvent::Pointer {
                position: up,
                pressed: false,
            })
        }

        fn scroll(&self) -> u32 {
            self.tree.scroll_y(self.screen.root)
        }

        fn border(&self, index: usize) -> Border {
            self.tree.style(self.screen.rows[index].container).unwrap().border
        }
    }

    #[test]
    fn test_first_row_focused_without_highlight() {
        let f = Fixture::new();
        assert_eq!(f.nav.group().len(), 16);
        assert_eq!(f.nav.focused_index(), Some(0));
        assert_eq!(f.border(0), Border::NONE);
        assert_eq!(f.border(1), Border::NONE);
    }

    #[test]
    fn test_click_on_focused_row_shows_highlight() {
        let mut f = Fixture::new();
        // Row 0 spans y 94..190.
        let point = Point::new(240, 142);
        assert_eq!(f.click(point, point).map(|a| a.index), Some(0));
        assert_eq!(f.border(0), FOCUS_BORDER);
    }

    #[test]
    fn test_down_moves_highlight() {
        let mut f = Fixture::new();
        assert_eq!(f.press(Key::Down), None);
        assert_eq!(f.nav.focused_index(), Some(1));
        assert_eq!(f.border(0), Border::NONE);
        assert_eq!(f.border(1), FOCUS_BORDER);
        assert_eq!(f.scroll(), 0);
    }

    #[test]
    fn test_focus_scrolls_row_into_view() {
        let mut f = Fixture::new();
        f.press(Key::Next);
        f.press(Key::Next);
        f.press(Key::Next);
        // Row 3 spans 442..538 plus a 10 px margin.
        assert_eq!(f.nav.focused_index(), Some(3));
        assert_eq!(f.scroll(), 68);
    }

    #[test]
    fn test_up_from_first_wraps_to_last() {
        let mut f = Fixture::new();
        f.press(Key::Up);
        assert_eq!(f.nav.focused_index(), Some(15));
        assert_eq!(f.scroll(), f.nav.max_scroll(&f.layout));
        assert_eq!(f.scroll(), 1460);

        f.press(Key::Down);
        assert_eq!(f.nav.focused_index(), Some(0));
        assert_eq!(f.scroll(), 0);
    }

    #[test]
    fn test_wrap_to_first_row_shows_header() {
        let mut f = Fixture::new();
        for _ in 0..16 {
            f.press(Key::Down);
        }
        assert_eq!(f.nav.focused_index(), Some(0));
        assert_eq!(f.scroll(), 0);
        assert_eq!(f.layout.rect(f.screen.header).unwrap().top_left, Point::new(0, 22));
        assert_eq!(f.border(0), FOCUS_BORDER);
        assert_eq!(f.border(15), Border::NONE);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut f = Fixture::new();
        f.send(InputEvent::Key {
            key: Key::Down,
            pressed: false,
        });
        assert_eq!(f.nav.focused_index(), Some(0));
    }

    #[test]
    fn test_wheel_scroll_is_clamped() {
        let mut f = Fixture::new();
        f.send(InputEvent::Wheel(5));
        assert_eq!(f.scroll(), 200);
        f.send(InputEvent::Wheel(-10));
        assert_eq!(f.scroll(), 0);
        f.send(InputEvent::Wheel(100));
        assert_eq!(f.scroll(), 1460);
    }

    #[test]
    fn test_enter_activates_focused_row() {
        let mut f = Fixture::new();
        f.press(Key::Down);
        assert_eq!(
            f.press(Key::Enter),
            Some(Activation {
                index: 1,
                title: "Bluetooth".to_owned()
            })
        );
    }

    #[test]
    fn test_click_focuses_and_activates() {
        let mut f = Fixture::new();
        // Row 2 spans y 326..422.
        let point = Point::new(240, 370);
        assert_eq!(
            f.click(point, point),
            Some(Activation {
                index: 2,
                title: "PersonalHotspot".to_owned()
            })
        );
        assert_eq!(f.nav.focused_index(), Some(2));
        assert_eq!(f.border(2), FOCUS_BORDER);
        assert_eq!(f.border(0), Border::NONE);
    }

    #[test]
    fn test_click_on_icon_resolves_to_row() {
        let mut f = Fixture::new();
        let icon = f.layout.rect(f.screen.rows[1].icon).unwrap().center();
        let activation = f.click(icon, icon).unwrap();
        assert_eq!(activation.index, 1);
    }

    #[test]
    fn test_drag_between_rows_does_not_activate() {
        let mut f = Fixture::new();
        assert_eq!(f.click(Point::new(240, 258), Point::new(240, 370)), None);
        assert_eq!(f.nav.focused_index(), Some(0));
    }

    #[test]
    fn test_click_on_header_does_nothing() {
        let mut f = Fixture::new();
        assert_eq!(f.click(Point::new(240, 40), Point::new(240, 40)), None);
        assert_eq!(f.click(Point::new(10, 142), Point::new(10, 142)), None);
    }

    #[test]
    fn test_empty_screen_has_no_focus() {
        let mut tree = NodeTree::new();
        let screen = build_screen(&mut tree, &[]).unwrap();
        let mut nav = Navigator::new(&mut tree, &screen, InputGroup::new()).unwrap();
        let layout = compute_layout(&tree, VIEW);

        assert_eq!(nav.focused_index(), None);
        let enter = InputEvent::Key {
            key: Key::Enter,
            pressed: true,
        };
        assert_eq!(nav.handle_event(&mut tree, &layout, enter).unwrap(), None);
        nav.handle_event(&mut tree, &layout, InputEvent::Wheel(3)).unwrap();
        assert_eq!(tree.scroll_y(screen.root), 0);
    }
}
