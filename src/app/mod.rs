//! Demo browser wiring: one explorer view over a document tree on the
//! left, the current folder's contents as a selectable listing on the
//! right. This module plays the "hosting screen" role: it owns the ids,
//! feeds key events into the interaction state, and exposes derived rows
//! for rendering.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Config;
use crate::explorer::node::FOLDER_TYPE;
use crate::explorer::{tree, DocNode, DocRef, ExplorerStore, OpenState};
use crate::listing::{KeyAction, Listing, ListingRegistry, SelectionMode};

pub const EXPLORER_ID: &str = "browser";
pub const LISTING_ID: &str = "folder-contents";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Tree,
    Listing,
}

/// One visible row of the tree pane, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub uuid: String,
    pub name: String,
    pub doc_type: String,
    pub depth: usize,
    pub is_folder: bool,
    pub open: OpenState,
}

#[derive(Debug)]
pub struct App {
    store: ExplorerStore,
    listings: ListingRegistry<DocRef>,
    selection_mode: SelectionMode,
    pane: Pane,
    /// Flattened, filtered tree rows as currently displayed.
    rows: Vec<TreeRow>,
    cursor: usize,
    /// When true, printable keys edit the search term.
    searching: bool,
    /// Folder whose children feed the listing pane.
    listing_folder: String,
    quit: bool,
}

impl App {
    pub fn new(document_tree: DocNode, config: &Config) -> Self {
        let root_uuid = document_tree.uuid.clone();
        let mut store = ExplorerStore::new(document_tree);
        store.open_explorer(EXPLORER_ID, config.explorer.options());
        // Start with the root folder expanded, as a user open so no search
        // transition ever closes it behind the user's back.
        store.toggle_folder_open(EXPLORER_ID, &root_uuid);

        let mut app = Self {
            store,
            listings: ListingRegistry::new(),
            selection_mode: config.selection_mode,
            pane: Pane::Tree,
            rows: Vec::new(),
            cursor: 0,
            searching: false,
            listing_folder: root_uuid,
            quit: false,
        };
        app.rebuild_rows();
        app.sync_listing();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn search_term(&self) -> &str {
        self.store
            .view(EXPLORER_ID)
            .map(|view| view.search_term())
            .unwrap_or("")
    }

    pub fn listing(&self) -> Option<&Listing<DocRef>> {
        self.listings.get(LISTING_ID)
    }

    pub fn listing_folder_name(&self) -> &str {
        tree::find(self.store.tree(), &self.listing_folder)
            .map(|node| node.name.as_str())
            .unwrap_or("")
    }

    pub fn store(&self) -> &ExplorerStore {
        &self.store
    }

    pub fn handle_key(&mut self, event: &KeyEvent) {
        if event.kind == KeyEventKind::Release {
            return;
        }
        if self.searching {
            self.handle_search_key(event);
            return;
        }
        match event.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Esc => {
                self.store.set_search_term(EXPLORER_ID, "");
                self.rebuild_rows();
            }
            KeyCode::Tab => {
                self.pane = match self.pane {
                    Pane::Tree => Pane::Listing,
                    Pane::Listing => Pane::Tree,
                };
            }
            _ => match self.pane {
                Pane::Tree => self.handle_tree_key(event),
                Pane::Listing => self.handle_listing_key(event),
            },
        }
    }

    fn handle_search_key(&mut self, event: &KeyEvent) {
        match event.code {
            KeyCode::Esc | KeyCode::Enter => self.searching = false,
            KeyCode::Backspace => {
                let mut term = self.search_term().to_string();
                term.pop();
                self.store.set_search_term(EXPLORER_ID, term);
                self.rebuild_rows();
            }
            KeyCode::Char(c) if !event.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut term = self.search_term().to_string();
                term.push(c);
                self.store.set_search_term(EXPLORER_ID, term);
                self.rebuild_rows();
            }
            _ => {}
        }
    }

    fn handle_tree_key(&mut self, event: &KeyEvent) {
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.rows.is_empty() {
                    self.cursor = (self.cursor + 1).min(self.rows.len() - 1);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('l') => {
                let Some(row) = self.rows.get(self.cursor) else {
                    return;
                };
                if row.is_folder {
                    let uuid = row.uuid.clone();
                    self.store.toggle_folder_open(EXPLORER_ID, &uuid);
                    self.listing_folder = uuid;
                    self.rebuild_rows();
                    self.sync_listing();
                }
            }
            KeyCode::Char('d') => {
                let Some(row) = self.rows.get(self.cursor) else {
                    return;
                };
                let uuid = row.uuid.clone();
                if self.store.delete_item(&uuid).is_some() {
                    if self.listing_folder == uuid {
                        self.listing_folder = self.store.tree().uuid.clone();
                    }
                    self.rebuild_rows();
                    self.sync_listing();
                }
            }
            _ => {}
        }
    }

    fn handle_listing_key(&mut self, event: &KeyEvent) {
        let Some(listing) = self.listings.get_mut(LISTING_ID) else {
            return;
        };
        match listing.handle_key(event) {
            KeyAction::Handled => {}
            KeyAction::Open | KeyAction::Enter => {
                // Descending is the only "open" this demo has, so Enter and
                // Right behave alike, and only folders respond.
                let Some(item) = listing.focused_item() else {
                    return;
                };
                if item.doc_type == FOLDER_TYPE {
                    self.listing_folder = item.uuid.clone();
                    self.sync_listing();
                }
            }
            KeyAction::Back => {
                if let Some(parent) = tree::parent_of(self.store.tree(), &self.listing_folder) {
                    self.listing_folder = parent.uuid.clone();
                    self.sync_listing();
                }
            }
            KeyAction::Ignored => {
                if event.code == KeyCode::Char('d') {
                    self.delete_listing_selection();
                }
            }
        }
    }

    /// Delete the selected items, or the focused one when nothing is
    /// selected.
    fn delete_listing_selection(&mut self) {
        let Some(listing) = self.listings.get(LISTING_ID) else {
            return;
        };
        let mut uuids: Vec<String> = listing
            .selected_items()
            .iter()
            .map(|item| item.uuid.clone())
            .collect();
        if uuids.is_empty() {
            uuids.extend(listing.focused_item().map(|item| item.uuid.clone()));
        }
        if uuids.is_empty() {
            return;
        }
        for uuid in uuids {
            self.store.delete_item(&uuid);
        }
        self.rebuild_rows();
        self.sync_listing();
    }

    fn sync_listing(&mut self) {
        let items = self.store.children_of(&self.listing_folder);
        self.listings.mount(LISTING_ID, items, self.selection_mode);
    }

    fn rebuild_rows(&mut self) {
        let Some(view) = self.store.view(EXPLORER_ID) else {
            return;
        };
        let mut rows = Vec::new();
        flatten_visible(self.store.tree(), 0, view, &mut rows);
        self.rows = rows;
        self.cursor = match self.rows.len() {
            0 => 0,
            len => self.cursor.min(len - 1),
        };
    }
}

fn flatten_visible(
    node: &DocNode,
    depth: usize,
    view: &crate::explorer::ExplorerView,
    rows: &mut Vec<TreeRow>,
) {
    if !view.is_visible(&node.uuid) {
        return;
    }
    rows.push(TreeRow {
        uuid: node.uuid.clone(),
        name: node.name.clone(),
        doc_type: node.doc_type.clone(),
        depth,
        is_folder: node.is_folder(),
        open: view.open_state(&node.uuid),
    });
    if node.is_folder() && view.is_folder_open(&node.uuid) {
        for child in node.children() {
            flatten_visible(child, depth + 1, view, rows);
        }
    }
}

/// Built-in document tree used when no snapshot file is given.
pub fn sample_tree() -> DocNode {
    DocNode::folder("system", "System").with_children(vec![
        DocNode::folder("pipelines", "Pipelines").with_children(vec![
            DocNode::leaf("pipe-events", "Event Processing", "Pipeline"),
            DocNode::leaf("pipe-reference", "Reference Loader", "Pipeline"),
            DocNode::leaf("xslt-events", "Event Translation", "XSLT"),
        ]),
        DocNode::folder("dictionaries", "Dictionaries").with_children(vec![
            DocNode::leaf("dict-hosts", "Known Hosts", "Dictionary"),
            DocNode::leaf("dict-users", "Service Accounts", "Dictionary"),
        ]),
        DocNode::folder("indexes", "Indexes").with_children(vec![
            DocNode::leaf("idx-shard", "Shard Index", "Index"),
            DocNode::folder("volumes", "Volumes")
                .with_children(vec![DocNode::leaf("vol-default", "Default Volume", "Index")]),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Keyed;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(sample_tree(), &Config::default())
    }

    #[test]
    fn starts_with_root_expanded_and_children_listed() {
        let app = app();
        let uuids: Vec<&str> = app.rows().iter().map(|r| r.uuid.as_str()).collect();
        assert_eq!(uuids, ["system", "pipelines", "dictionaries", "indexes"]);
        assert_eq!(app.listing().unwrap().len(), 3);
        assert_eq!(app.listing_folder_name(), "System");
    }

    #[test]
    fn enter_expands_a_folder_and_feeds_the_listing() {
        let mut app = app();
        app.handle_key(&key(KeyCode::Down));
        assert_eq!(app.rows()[app.cursor()].uuid, "pipelines");
        app.handle_key(&key(KeyCode::Enter));

        let uuids: Vec<&str> = app.rows().iter().map(|r| r.uuid.as_str()).collect();
        assert!(uuids.contains(&"pipe-events"));
        assert_eq!(app.listing_folder_name(), "Pipelines");
        let keys: Vec<&str> = app
            .listing()
            .unwrap()
            .items()
            .iter()
            .map(|i| i.key())
            .collect();
        assert_eq!(keys, ["pipe-events", "pipe-reference", "xslt-events"]);
    }

    #[test]
    fn search_narrows_rows_and_escape_restores_them() {
        let mut app = app();
        app.handle_key(&key(KeyCode::Char('/')));
        assert!(app.is_searching());
        for c in "hosts".chars() {
            app.handle_key(&key(KeyCode::Char(c)));
        }
        app.handle_key(&key(KeyCode::Enter));
        assert!(!app.is_searching());
        assert_eq!(app.search_term(), "hosts");

        let uuids: Vec<&str> = app.rows().iter().map(|r| r.uuid.as_str()).collect();
        assert_eq!(uuids, ["system", "dictionaries", "dict-hosts"]);

        app.handle_key(&key(KeyCode::Esc));
        assert_eq!(app.search_term(), "");
        assert_eq!(app.rows().len(), 4);
    }

    #[test]
    fn listing_pane_navigates_and_descends() {
        let mut app = app();
        app.handle_key(&key(KeyCode::Tab));
        assert_eq!(app.pane(), Pane::Listing);

        // First Down focuses the first child, the Pipelines folder.
        app.handle_key(&key(KeyCode::Down));
        assert_eq!(app.listing().unwrap().focused_item().unwrap().uuid, "pipelines");
        app.handle_key(&key(KeyCode::Enter));
        assert_eq!(app.listing_folder_name(), "Pipelines");

        app.handle_key(&key(KeyCode::Left));
        assert_eq!(app.listing_folder_name(), "System");
    }

    #[test]
    fn deleting_selected_items_updates_tree_and_listing() {
        let mut app = app();
        app.handle_key(&key(KeyCode::Tab));
        app.handle_key(&key(KeyCode::Down));
        app.handle_key(&key(KeyCode::Char(' ')));
        assert_eq!(app.listing().unwrap().selected_items().len(), 1);

        app.handle_key(&key(KeyCode::Char('d')));
        assert_eq!(app.listing().unwrap().len(), 2);
        assert!(tree::find(app.store().tree(), "pipelines").is_none());
        let uuids: Vec<&str> = app.rows().iter().map(|r| r.uuid.as_str()).collect();
        assert_eq!(uuids, ["system", "dictionaries", "indexes"]);
    }

    #[test]
    fn quit_key() {
        let mut app = app();
        assert!(!app.should_quit());
        app.handle_key(&key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }
}
