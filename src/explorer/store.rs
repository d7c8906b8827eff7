//! The shared document tree plus every explorer view projected over it.

use std::collections::HashMap;

use super::node::{DocNode, DocRef};
use super::tree;
use super::view::{ExplorerOptions, ExplorerView};

/// Owns one document tree snapshot and the per-id explorer views over it.
///
/// Views are independent: each keeps its own search term, filters, and
/// folder-open map. Tree mutations fan out a recompute to every mounted
/// view; search edits recompute only the view they belong to.
#[derive(Debug)]
pub struct ExplorerStore {
    document_tree: DocNode,
    views: HashMap<String, ExplorerView>,
}

impl ExplorerStore {
    pub fn new(document_tree: DocNode) -> Self {
        Self {
            document_tree,
            views: HashMap::new(),
        }
    }

    pub fn tree(&self) -> &DocNode {
        &self.document_tree
    }

    pub fn view(&self, explorer_id: &str) -> Option<&ExplorerView> {
        self.views.get(explorer_id)
    }

    /// Replace the stored tree (a fresh snapshot arrived) and recompute
    /// every view against it, preserving each view's search and filters.
    pub fn set_tree(&mut self, document_tree: DocNode) {
        self.document_tree = document_tree;
        self.recompute_all();
    }

    /// Mount a fresh view with an empty search term.
    pub fn open_explorer(&mut self, explorer_id: &str, options: ExplorerOptions) {
        tracing::debug!(explorer_id, "opening explorer view");
        let view = ExplorerView::new(options, &self.document_tree);
        self.views.insert(explorer_id.to_string(), view);
    }

    pub fn close_explorer(&mut self, explorer_id: &str) -> bool {
        self.views.remove(explorer_id).is_some()
    }

    /// Update one view's search term; other views are untouched.
    pub fn set_search_term(&mut self, explorer_id: &str, term: impl Into<String>) {
        let Some(view) = self.views.get_mut(explorer_id) else {
            tracing::warn!(explorer_id, "search term for unknown explorer view");
            return;
        };
        view.set_search_term(term, &self.document_tree);
    }

    pub fn toggle_folder_open(&mut self, explorer_id: &str, uuid: &str) {
        let Some(view) = self.views.get_mut(explorer_id) else {
            tracing::warn!(explorer_id, "folder toggle for unknown explorer view");
            return;
        };
        view.toggle_folder_open(uuid);
    }

    /// Relocate a node under a destination folder and recompute all views.
    /// Returns false (tree untouched) for invalid moves.
    pub fn move_item(&mut self, uuid: &str, dest_uuid: &str) -> bool {
        if tree::move_item(&mut self.document_tree, uuid, dest_uuid) {
            self.recompute_all();
            true
        } else {
            false
        }
    }

    /// Remove a node (and its subtree) and recompute all views. Returns the
    /// detached subtree, or `None` for the root or an unknown uuid.
    pub fn delete_item(&mut self, uuid: &str) -> Option<DocNode> {
        let removed = tree::remove_item(&mut self.document_tree, uuid)?;
        self.recompute_all();
        Some(removed)
    }

    /// Child summaries of a folder, in tree order; feeds listings.
    pub fn children_of(&self, uuid: &str) -> Vec<DocRef> {
        tree::find(&self.document_tree, uuid)
            .map(|node| node.children().iter().map(DocNode::doc_ref).collect())
            .unwrap_or_default()
    }

    fn recompute_all(&mut self) {
        let document_tree = &self.document_tree;
        for view in self.views.values_mut() {
            view.recompute(document_tree);
        }
    }
}
