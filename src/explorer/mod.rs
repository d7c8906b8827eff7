//! Document explorer state: per-view search, type filtering, and
//! folder-open tracking over a shared document tree.
//!
//! The tree itself is a plain data snapshot supplied by the hosting layer.
//! Each explorer view keeps its own search term and filters and derives,
//! per node, whether it is visible and whether its folder is open; all of
//! that is recomputed synchronously whenever the tree or a view's inputs
//! change.

pub mod node;
pub mod store;
pub mod tree;
pub mod view;

pub use node::{DocNode, DocRef, OpenState};
pub use store::ExplorerStore;
pub use view::{ExplorerOptions, ExplorerView};
