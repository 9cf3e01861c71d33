//! Input focus groups.
//!
//! A group is an ordered ring of focusable objects. Keyboard-like devices
//! bound to the group move the focus through it; pointer devices may focus an
//! object directly. The first object added receives the focus.

/// Ordered, wrapping focus ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputGroup<T> {
    items: Vec<T>,
    focused: Option<usize>,
}

impl<T> Default for InputGroup<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            focused: None,
        }
    }
}

impl<T: Copy + PartialEq> InputGroup<T> {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item`; the first item gets the focus. Duplicates are ignored.
    pub fn add(&mut self, item: T) {
        if self.items.contains(&item) {
            return;
        }
        self.items.push(item);
        if self.focused.is_none() {
            self.focused = Some(0);
        }
    }

    /// Removes `item`, moving the focus to its successor when it had it.
    pub fn remove(&mut self, item: T) -> bool {
        let Some(index) = self.position(item) else {
            return false;
        };
        self.items.remove(index);
        self.focused = match self.focused {
            _ if self.items.is_empty() => None,
            Some(f) if f > index => Some(f - 1),
            Some(f) if f == index => Some(index % self.items.len()),
            other => other,
        };
        true
    }

    /// Drops every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.focused = None;
    }

    /// Items in focus order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the group has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currently focused item.
    pub fn focused(&self) -> Option<T> {
        self.focused.and_then(|index| self.items.get(index).copied())
    }

    /// Index of the focused item.
    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    /// Moves focus to the next item, wrapping at the end.
    pub fn focus_next(&mut self) -> Option<T> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        self.focused = Some(self.focused.map_or(0, |f| (f + 1) % len));
        self.focused()
    }

    /// Moves focus to the previous item, wrapping at the start.
    pub fn focus_prev(&mut self) -> Option<T> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        self.focused = Some(self.focused.map_or(len - 1, |f| (f + len - 1) % len));
        self.focused()
    }

    /// Focuses `item` if it belongs to the group.
    pub fn focus(&mut self, item: T) -> bool {
        match self.position(item) {
            Some(index) => {
                self.focused = Some(index);
                true
            }
            None => false,
        }
    }

    fn position(&self, item: T) -> Option<usize> {
        self.items.iter().position(|candidate| *candidate == item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_group_has_no_focus() {
        let mut group: InputGroup<u32> = InputGroup::new();
        assert_eq!(group.focused(), None);
        assert_eq!(group.focus_next(), None);
        assert_eq!(group.focus_prev(), None);
    }

    #[test]
    fn test_first_item_gets_focus() {
        let mut group = InputGroup::new();
        group.add(7);
        group.add(8);
        assert_eq!(group.focused(), Some(7));
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut group = InputGroup::new();
        for item in [1, 2, 3] {
            group.add(item);
        }
        assert_eq!(group.focus_prev(), Some(3));
        assert_eq!(group.focus_next(), Some(1));
        assert_eq!(group.focus_next(), Some(2));
    }

    #[test]
    fn test_focus_unknown_item_is_rejected() {
        let mut group = InputGroup::new();
        group.add(1);
        assert!(!group.focus(9));
        assert!(group.focus(1));
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let mut group = InputGroup::new();
        group.add(1);
        group.add(1);
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_remove_focused_moves_to_successor() {
        let mut group = InputGroup::new();
        for item in [1, 2, 3] {
            group.add(item);
        }
        group.focus(2);
        assert!(group.remove(2));
        assert_eq!(group.focused(), Some(3));

        group.focus(3);
        assert!(group.remove(3));
        assert_eq!(group.focused(), Some(1));

        assert!(group.remove(1));
        assert_eq!(group.focused(), None);
        assert!(!group.remove(1));
    }

    #[test]
    fn test_remove_before_focus_keeps_focused_item() {
        let mut group = InputGroup::new();
        for item in [1, 2, 3] {
            group.add(item);
        }
        group.focus(3);
        group.remove(1);
        assert_eq!(group.focused(), Some(3));
    }

    proptest! {
        #[test]
        fn next_n_times_returns_to_start(len in 1usize..50) {
            let mut group = InputGroup::new();
            for item in 0..len {
                group.add(item);
            }
            for _ in 0..len {
                group.focus_next();
            }
            prop_assert_eq!(group.focused(), Some(0));
        }

        #[test]
        fn prev_undoes_next(len in 1usize..50, steps in 0usize..100) {
            let mut group = InputGroup::new();
            for item in 0..len {
                group.add(item);
            }
            for _ in 0..steps {
                group.focus_next();
            }
            for _ in 0..steps {
                group.focus_prev();
            }
            prop_assert_eq!(group.focused(), Some(0));
        }
    }
}
