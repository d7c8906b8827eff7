use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Policy governing how many items may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Selection is disabled; the listing only tracks focus.
    None,
    /// At most one item selected.
    Single,
    /// Any number of items selected; ctrl adds, shift extends a range.
    Multiple,
}

/// Stable identity for listing items.
///
/// Keys must be unique within one listing's items. The key survives item
/// refreshes, which is what lets callers address an item without holding an
/// index into a sequence that may have changed underneath them.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Modifier keys active during a selection gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: true,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
        shift: false,
    };

    /// Ctrl and meta are interchangeable for selection purposes.
    pub(crate) fn accel(self) -> bool {
        self.ctrl || self.meta
    }

    pub(crate) fn any(self) -> bool {
        self.ctrl || self.meta || self.shift
    }
}

/// Direction of a keyboard focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    Up,
    Down,
}

impl FocusMove {
    fn delta(self) -> isize {
        match self {
            FocusMove::Up => -1,
            FocusMove::Down => 1,
        }
    }
}

/// Focus and selection state over an ordered sequence of keyed items.
///
/// All transitions are total: operations on an empty listing or with an
/// unknown key degrade to no-ops or focus fallbacks rather than erroring.
#[derive(Debug)]
pub struct Listing<T> {
    items: Vec<T>,
    mode: SelectionMode,
    /// Item currently addressable by keyboard; `None` until first navigation.
    focus: Option<usize>,
    selected: BTreeSet<usize>,
    /// Range anchor for shift-selection; tracks the last selection target.
    anchor: Option<usize>,
}

impl<T: Keyed> Listing<T> {
    pub fn new(items: Vec<T>, mode: SelectionMode) -> Self {
        Self {
            items,
            mode,
            focus: None,
            selected: BTreeSet::new(),
            anchor: None,
        }
    }

    /// Replace the item sequence, as on a listing remount.
    ///
    /// Focus survives when its index is still within the new sequence;
    /// selection and the range anchor never survive an item refresh.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.focus = self.focus.filter(|&i| i < items.len());
        self.items = items;
        self.selected.clear();
        self.anchor = None;
    }

    /// Replace both items and selection mode, as on a listing remount.
    pub fn remount(&mut self, items: Vec<T>, mode: SelectionMode) {
        self.mode = mode;
        self.set_items(items);
        if self.mode == SelectionMode::None {
            self.selected.clear();
        }
    }

    /// Move keyboard focus one step, wrapping circularly.
    ///
    /// With no current focus the first item is focused regardless of
    /// direction. A no-op on an empty listing.
    pub fn focus_move(&mut self, dir: FocusMove) {
        if self.items.is_empty() {
            return;
        }
        let n = self.items.len() as isize;
        self.focus = Some(match self.focus {
            None => 0,
            Some(i) => ((i as isize + n + dir.delta()) % n) as usize,
        });
    }

    /// Apply a selection gesture to the item with the given key, or to the
    /// focused item when no key is supplied (or the key is unknown).
    ///
    /// The update rule, in precedence order:
    /// 1. mode `None`: the selected set never changes;
    /// 2. target already selected, ctrl/meta held: deselect it;
    /// 3. target already selected, no modifier: clear the whole selection;
    /// 4. mode `Multiple`, ctrl/meta held: add the target;
    /// 5. mode `Multiple`, shift held: replace with the inclusive range
    ///    between the anchor (or the target itself) and the target;
    /// 6. otherwise: replace with exactly the target.
    ///
    /// Focus and the range anchor both move to the target afterwards.
    pub fn toggle_selection(&mut self, key: Option<&str>, mods: Modifiers) {
        let target = match key {
            Some(k) => self
                .items
                .iter()
                .position(|item| item.key() == k)
                .or(self.focus),
            None => self.focus,
        };
        let Some(target) = target else {
            tracing::debug!("toggle_selection with no resolvable target, ignoring");
            return;
        };

        if self.mode != SelectionMode::None {
            let already = self.selected.contains(&target);
            if already && mods.accel() {
                self.selected.remove(&target);
            } else if already && !mods.any() {
                self.selected.clear();
            } else if self.mode == SelectionMode::Multiple && mods.accel() {
                self.selected.insert(target);
            } else if self.mode == SelectionMode::Multiple && mods.shift {
                let anchor = self.anchor.unwrap_or(target);
                let (lo, hi) = (anchor.min(target), anchor.max(target));
                self.selected = (lo..=hi).collect();
            } else {
                self.selected.clear();
                self.selected.insert(target);
            }
        }

        self.focus = Some(target);
        self.anchor = Some(target);
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn focus_index(&self) -> Option<usize> {
        self.focus
    }

    pub fn focused_item(&self) -> Option<&T> {
        self.focus.and_then(|i| self.items.get(i))
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn selected_indexes(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn selected_items(&self) -> Vec<&T> {
        self.selected
            .iter()
            .filter_map(|&i| self.items.get(i))
            .collect()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str);

    impl Keyed for Item {
        fn key(&self) -> &str {
            self.0
        }
    }

    fn listing(keys: &[&'static str], mode: SelectionMode) -> Listing<Item> {
        Listing::new(keys.iter().map(|k| Item(k)).collect(), mode)
    }

    #[test]
    fn focus_starts_at_first_item() {
        let mut l = listing(&["a", "b", "c"], SelectionMode::None);
        assert_eq!(l.focus_index(), None);
        l.focus_move(FocusMove::Down);
        assert_eq!(l.focus_index(), Some(0));

        let mut l = listing(&["a", "b", "c"], SelectionMode::None);
        l.focus_move(FocusMove::Up);
        assert_eq!(l.focus_index(), Some(0));
    }

    #[test]
    fn focus_wraps_both_directions() {
        let mut l = listing(&["a", "b", "c"], SelectionMode::None);
        l.focus_move(FocusMove::Down);
        l.focus_move(FocusMove::Up);
        assert_eq!(l.focus_index(), Some(2));
        l.focus_move(FocusMove::Down);
        assert_eq!(l.focus_index(), Some(0));
    }

    #[test]
    fn focus_move_on_empty_listing_is_noop() {
        let mut l = listing(&[], SelectionMode::Multiple);
        l.focus_move(FocusMove::Down);
        assert_eq!(l.focus_index(), None);
        l.toggle_selection(None, Modifiers::NONE);
        assert!(l.selected_indexes().is_empty());
    }

    #[test]
    fn single_mode_replaces_selection() {
        let mut l = listing(&["a", "b", "c"], SelectionMode::Single);
        l.toggle_selection(Some("a"), Modifiers::NONE);
        l.toggle_selection(Some("c"), Modifiers::NONE);
        assert_eq!(l.selected_indexes().iter().copied().collect::<Vec<_>>(), [2]);
        assert_eq!(l.focus_index(), Some(2));
    }

    #[test]
    fn reclick_clears_selection() {
        let mut l = listing(&["a", "b", "c"], SelectionMode::Multiple);
        l.toggle_selection(Some("b"), Modifiers::NONE);
        assert!(l.is_selected(1));
        l.toggle_selection(Some("b"), Modifiers::NONE);
        assert!(l.selected_indexes().is_empty());
    }

    #[test]
    fn ctrl_click_deselects_one_item() {
        let mut l = listing(&["a", "b", "c", "d"], SelectionMode::Multiple);
        l.toggle_selection(Some("a"), Modifiers::NONE);
        l.toggle_selection(Some("c"), Modifiers::CTRL);
        assert_eq!(
            l.selected_indexes().iter().copied().collect::<Vec<_>>(),
            [0, 2]
        );
        l.toggle_selection(Some("a"), Modifiers::CTRL);
        assert_eq!(l.selected_indexes().iter().copied().collect::<Vec<_>>(), [2]);
    }

    #[test]
    fn shift_click_selects_range_in_either_direction() {
        let mut l = listing(&["a", "b", "c", "d", "e", "f"], SelectionMode::Multiple);
        l.toggle_selection(Some("c"), Modifiers::NONE);
        l.toggle_selection(Some("f"), Modifiers::SHIFT);
        assert_eq!(
            l.selected_indexes().iter().copied().collect::<Vec<_>>(),
            [2, 3, 4, 5]
        );
        // Anchor moved to f; extending backwards covers the whole prefix.
        l.toggle_selection(Some("a"), Modifiers::SHIFT);
        assert_eq!(
            l.selected_indexes().iter().copied().collect::<Vec<_>>(),
            [0, 1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn shift_click_without_anchor_selects_target_only() {
        let mut l = listing(&["a", "b", "c"], SelectionMode::Multiple);
        l.toggle_selection(Some("b"), Modifiers::SHIFT);
        assert_eq!(l.selected_indexes().iter().copied().collect::<Vec<_>>(), [1]);
    }

    #[test]
    fn none_mode_never_selects() {
        let mut l = listing(&["a", "b"], SelectionMode::None);
        l.toggle_selection(Some("a"), Modifiers::NONE);
        assert!(l.selected_indexes().is_empty());
        // Focus still follows the gesture target.
        assert_eq!(l.focus_index(), Some(0));
    }

    #[test]
    fn single_mode_holds_at_most_one() {
        let mut l = listing(&["a", "b", "c"], SelectionMode::Single);
        l.toggle_selection(Some("a"), Modifiers::NONE);
        l.toggle_selection(Some("b"), Modifiers::SHIFT);
        l.toggle_selection(Some("c"), Modifiers::CTRL);
        assert!(l.selected_indexes().len() <= 1);
    }

    #[test]
    fn unknown_key_falls_back_to_focus() {
        let mut l = listing(&["a", "b", "c"], SelectionMode::Multiple);
        l.focus_move(FocusMove::Down);
        l.focus_move(FocusMove::Down);
        l.toggle_selection(Some("zzz"), Modifiers::NONE);
        assert_eq!(l.selected_indexes().iter().copied().collect::<Vec<_>>(), [1]);
    }

    #[test]
    fn set_items_rescues_focus_in_range() {
        let mut l = listing(&["a", "b", "c"], SelectionMode::Multiple);
        l.focus_move(FocusMove::Down);
        l.focus_move(FocusMove::Down);
        l.toggle_selection(None, Modifiers::NONE);
        assert_eq!(l.focus_index(), Some(1));

        l.set_items(vec![Item("x"), Item("y")]);
        assert_eq!(l.focus_index(), Some(1));
        assert_eq!(l.focused_item(), Some(&Item("y")));
        assert!(l.selected_indexes().is_empty());
    }

    #[test]
    fn set_items_resets_focus_out_of_range() {
        let mut l = listing(&["a", "b", "c"], SelectionMode::Multiple);
        for _ in 0..3 {
            l.focus_move(FocusMove::Down);
        }
        assert_eq!(l.focus_index(), Some(2));
        l.set_items(vec![Item("x")]);
        assert_eq!(l.focus_index(), None);
    }

    #[test]
    fn end_to_end_focus_and_shift_sequence() {
        // items [A,B,C,D], MULTIPLE, starting focus unset.
        let mut l = listing(&["a", "b", "c", "d"], SelectionMode::Multiple);
        l.focus_move(FocusMove::Down);
        assert_eq!(l.focus_index(), Some(0));

        l.toggle_selection(Some("c"), Modifiers::NONE);
        assert_eq!(l.selected_indexes().iter().copied().collect::<Vec<_>>(), [2]);
        assert_eq!(l.focus_index(), Some(2));

        // Shift-toggle on the focused item: a range of one, nothing changes.
        l.toggle_selection(None, Modifiers::SHIFT);
        assert_eq!(l.selected_indexes().iter().copied().collect::<Vec<_>>(), [2]);

        l.focus_move(FocusMove::Down);
        assert_eq!(l.focus_index(), Some(3));
        l.toggle_selection(None, Modifiers::SHIFT);
        assert_eq!(
            l.selected_indexes().iter().copied().collect::<Vec<_>>(),
            [2, 3]
        );
    }

    proptest! {
        #[test]
        fn focus_returns_after_full_cycle(len in 1usize..20, start in 0usize..20, down in proptest::bool::ANY) {
            let start = start % len;
            let items: Vec<Item> = (0..len).map(|_| Item("x")).collect();
            let mut l = Listing::new(items, SelectionMode::None);
            l.focus = Some(start);
            let dir = if down { FocusMove::Down } else { FocusMove::Up };
            for _ in 0..len {
                l.focus_move(dir);
            }
            prop_assert_eq!(l.focus_index(), Some(start));
        }

        #[test]
        fn focus_down_then_up_is_identity(len in 1usize..20, start in 0usize..20) {
            let start = start % len;
            let items: Vec<Item> = (0..len).map(|_| Item("x")).collect();
            let mut l = Listing::new(items, SelectionMode::None);
            l.focus = Some(start);
            l.focus_move(FocusMove::Down);
            l.focus_move(FocusMove::Up);
            prop_assert_eq!(l.focus_index(), Some(start));
        }
    }
}
