//! Per-id listing states.
//!
//! Hosting screens address listings by an opaque id. The registry is an
//! explicit value owned by the host, not a module-level singleton; create
//! one, pass it around, drop it when the screen goes away.

use std::collections::HashMap;

use super::state::{Keyed, Listing, SelectionMode};

#[derive(Debug)]
pub struct ListingRegistry<T> {
    listings: HashMap<String, Listing<T>>,
}

impl<T: Keyed> ListingRegistry<T> {
    pub fn new() -> Self {
        Self {
            listings: HashMap::new(),
        }
    }

    /// (Re)initialize the listing for `id`.
    ///
    /// A remount keeps the previous focus index when it is still within the
    /// new item count; selection never survives a remount.
    pub fn mount(&mut self, id: &str, items: Vec<T>, mode: SelectionMode) -> &mut Listing<T> {
        match self.listings.entry(id.to_string()) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                let listing = entry.into_mut();
                listing.remount(items, mode);
                listing
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(Listing::new(items, mode))
            }
        }
    }

    pub fn unmount(&mut self, id: &str) -> Option<Listing<T>> {
        self.listings.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Listing<T>> {
        self.listings.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Listing<T>> {
        self.listings.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl<T: Keyed> Default for ListingRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::state::{FocusMove, Modifiers};

    #[derive(Debug)]
    struct Item(&'static str);

    impl Keyed for Item {
        fn key(&self) -> &str {
            self.0
        }
    }

    fn items(keys: &[&'static str]) -> Vec<Item> {
        keys.iter().map(|k| Item(k)).collect()
    }

    #[test]
    fn mount_creates_independent_listings_per_id() {
        let mut reg = ListingRegistry::new();
        reg.mount("left", items(&["a", "b"]), SelectionMode::Single);
        reg.mount("right", items(&["x", "y", "z"]), SelectionMode::Multiple);

        reg.get_mut("left").unwrap().focus_move(FocusMove::Down);
        assert_eq!(reg.get("left").unwrap().focus_index(), Some(0));
        assert_eq!(reg.get("right").unwrap().focus_index(), None);
    }

    #[test]
    fn remount_preserves_focus_and_drops_selection() {
        let mut reg = ListingRegistry::new();
        let listing = reg.mount("l", items(&["a", "b", "c"]), SelectionMode::Multiple);
        listing.focus_move(FocusMove::Down);
        listing.focus_move(FocusMove::Down);
        listing.toggle_selection(None, Modifiers::NONE);

        let listing = reg.mount("l", items(&["a", "b"]), SelectionMode::Multiple);
        assert_eq!(listing.focus_index(), Some(1));
        assert!(listing.selected_indexes().is_empty());
    }

    #[test]
    fn remount_resets_out_of_range_focus() {
        let mut reg = ListingRegistry::new();
        let listing = reg.mount("l", items(&["a", "b", "c"]), SelectionMode::Single);
        for _ in 0..3 {
            listing.focus_move(FocusMove::Down);
        }
        assert_eq!(listing.focus_index(), Some(2));

        let listing = reg.mount("l", items(&["a"]), SelectionMode::Single);
        assert_eq!(listing.focus_index(), None);
    }

    #[test]
    fn unmount_destroys_state() {
        let mut reg = ListingRegistry::new();
        reg.mount("l", items(&["a"]), SelectionMode::None);
        assert!(reg.unmount("l").is_some());
        assert!(reg.get("l").is_none());
        assert!(reg.is_empty());
    }
}
