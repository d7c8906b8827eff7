//! Per-view derived state: which nodes are visible and which folders are
//! open, given a search term and an optional type filter.

use std::collections::{HashMap, HashSet};

use regex::RegexBuilder;

use super::node::{DocNode, OpenState};
use super::tree;

/// Settings fixed when an explorer view is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerOptions {
    pub allow_multi_select: bool,
    pub allow_drag_and_drop: bool,
    /// Restrict visible nodes to one document type.
    pub type_filter: Option<String>,
}

impl Default for ExplorerOptions {
    fn default() -> Self {
        Self {
            allow_multi_select: true,
            allow_drag_and_drop: true,
            type_filter: None,
        }
    }
}

/// Case-insensitive name matcher for a search term.
///
/// The term is compiled as a regex; an invalid pattern (say, a half-typed
/// `(`) degrades to a plain substring match instead of matching nothing.
#[derive(Debug)]
enum SearchMatcher {
    Regex(regex::Regex),
    Substring(String),
}

impl SearchMatcher {
    fn new(term: &str) -> Option<Self> {
        if term.is_empty() {
            return None;
        }
        match RegexBuilder::new(term).case_insensitive(true).build() {
            Ok(re) => Some(SearchMatcher::Regex(re)),
            Err(_) => {
                tracing::debug!(term, "search term is not a valid regex, using substring match");
                Some(SearchMatcher::Substring(term.to_lowercase()))
            }
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            SearchMatcher::Regex(re) => re.is_match(name),
            SearchMatcher::Substring(term) => name.to_lowercase().contains(term),
        }
    }
}

/// One explorer view's search/filter state and what it derives from the
/// shared tree. The view never stores the tree itself; `recompute` must be
/// called with the current snapshot after any input changes.
#[derive(Debug)]
pub struct ExplorerView {
    options: ExplorerOptions,
    search_term: String,
    /// Open state per folder uuid; closed folders carry no entry.
    folder_open: HashMap<String, OpenState>,
    /// Uuids passing the active search and type filter.
    visible: HashSet<String>,
    /// Uuids matching the active search, or with a matching descendant.
    in_search: HashSet<String>,
}

impl ExplorerView {
    pub fn new(options: ExplorerOptions, document_tree: &DocNode) -> Self {
        let mut view = Self {
            options,
            search_term: String::new(),
            folder_open: HashMap::new(),
            visible: HashSet::new(),
            in_search: HashSet::new(),
        };
        view.recompute(document_tree);
        view
    }

    pub fn options(&self) -> &ExplorerOptions {
        &self.options
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>, document_tree: &DocNode) {
        self.search_term = term.into();
        self.recompute(document_tree);
    }

    pub fn is_visible(&self, uuid: &str) -> bool {
        self.visible.contains(uuid)
    }

    pub fn is_in_search(&self, uuid: &str) -> bool {
        self.in_search.contains(uuid)
    }

    pub fn open_state(&self, uuid: &str) -> OpenState {
        self.folder_open.get(uuid).copied().unwrap_or_default()
    }

    pub fn is_folder_open(&self, uuid: &str) -> bool {
        self.open_state(uuid).is_open()
    }

    /// Manual open toggle: closed folders open as `OpenedByUser`, any open
    /// folder (search-opened included) closes outright. Search forcing only
    /// runs on `recompute`, so a manual close sticks until the term or the
    /// tree next changes.
    pub fn toggle_folder_open(&mut self, uuid: &str) {
        if self.open_state(uuid).is_open() {
            self.folder_open.remove(uuid);
        } else {
            self.folder_open
                .insert(uuid.to_string(), OpenState::OpenedByUser);
        }
    }

    /// Rebuild every derived map against a tree snapshot.
    ///
    /// While searching, `in_search` holds the nodes whose name matches the
    /// term plus all of their ancestors (so a match stays reachable), and
    /// visibility is the search result intersected with the type filter.
    /// While not searching, visibility is the type filter alone and any
    /// folder still open only because of a search reverts to closed.
    pub fn recompute(&mut self, document_tree: &DocNode) {
        let matcher = SearchMatcher::new(&self.search_term);
        let searching = matcher.is_some();

        let mut in_search = HashSet::new();
        if let Some(matcher) = &matcher {
            collect_search_hits(document_tree, matcher, &mut in_search);
        }

        let mut visible = HashSet::new();
        tree::visit(document_tree, &mut |node, _| {
            let type_ok = self
                .options
                .type_filter
                .as_ref()
                .map_or(true, |filter| node.doc_type == *filter);
            let search_ok = !searching || in_search.contains(&node.uuid);
            if type_ok && search_ok {
                visible.insert(node.uuid.clone());
            }
        });

        let mut folder_open = HashMap::new();
        tree::visit(document_tree, &mut |node, _| {
            if !node.is_folder() {
                return;
            }
            let prev = self.open_state(&node.uuid);
            let next = if searching {
                if in_search.contains(&node.uuid) && !prev.is_open() {
                    OpenState::OpenedBySearch
                } else if prev == OpenState::OpenedBySearch && !in_search.contains(&node.uuid) {
                    OpenState::Closed
                } else {
                    prev
                }
            } else if prev == OpenState::OpenedBySearch {
                OpenState::Closed
            } else {
                prev
            };
            if next.is_open() {
                folder_open.insert(node.uuid.clone(), next);
            }
        });

        self.in_search = in_search;
        self.visible = visible;
        // Rebuilding from the tree also drops entries for deleted nodes.
        self.folder_open = folder_open;
    }
}

/// Mark every node whose name matches, plus all its ancestors. Returns
/// whether this subtree contains a match.
fn collect_search_hits(
    node: &DocNode,
    matcher: &SearchMatcher,
    in_search: &mut HashSet<String>,
) -> bool {
    let mut hit = matcher.matches(&node.name);
    for child in node.children() {
        // No short-circuit: every matching descendant must be marked.
        hit |= collect_search_hits(child, matcher, in_search);
    }
    if hit {
        in_search.insert(node.uuid.clone());
    }
    hit
}
