//! Pure helpers over [`DocNode`] trees: iteration, lookup, and structural
//! edits. All functions are synchronous and total; structural edits report
//! rejected requests through their return value and a `warn` log line.

use super::node::DocNode;

/// Visit every node in pre-order, with its depth (root is 0).
pub fn visit(node: &DocNode, f: &mut dyn FnMut(&DocNode, usize)) {
    visit_at(node, 0, f);
}

fn visit_at(node: &DocNode, depth: usize, f: &mut dyn FnMut(&DocNode, usize)) {
    f(node, depth);
    for child in node.children() {
        visit_at(child, depth + 1, f);
    }
}

/// Find a node by uuid anywhere in the tree.
pub fn find<'a>(node: &'a DocNode, uuid: &str) -> Option<&'a DocNode> {
    if node.uuid == uuid {
        return Some(node);
    }
    node.children().iter().find_map(|child| find(child, uuid))
}

fn find_mut<'a>(node: &'a mut DocNode, uuid: &str) -> Option<&'a mut DocNode> {
    if node.uuid == uuid {
        return Some(node);
    }
    node.children
        .as_mut()?
        .iter_mut()
        .find_map(|child| find_mut(child, uuid))
}

pub fn contains(node: &DocNode, uuid: &str) -> bool {
    find(node, uuid).is_some()
}

/// Find the parent of a node.
pub fn parent_of<'a>(root: &'a DocNode, uuid: &str) -> Option<&'a DocNode> {
    if root.children().iter().any(|child| child.uuid == uuid) {
        return Some(root);
    }
    root.children()
        .iter()
        .find_map(|child| parent_of(child, uuid))
}

/// Detach a node (and its subtree) from the tree and return it.
///
/// The root cannot be removed. Returns `None` when the uuid is unknown.
pub fn remove_item(root: &mut DocNode, uuid: &str) -> Option<DocNode> {
    if root.uuid == uuid {
        tracing::warn!(uuid, "refusing to remove the tree root");
        return None;
    }
    remove_below(root, uuid)
}

fn remove_below(node: &mut DocNode, uuid: &str) -> Option<DocNode> {
    let children = node.children.as_mut()?;
    if let Some(pos) = children.iter().position(|child| child.uuid == uuid) {
        return Some(children.remove(pos));
    }
    children
        .iter_mut()
        .find_map(|child| remove_below(child, uuid))
}

/// Relocate a node under a destination folder (appended as the last child).
///
/// The move is rejected, leaving the tree untouched, when either uuid is
/// unknown, the destination is not a folder, the node is the root, or the
/// destination lies inside the moved subtree (which also covers moving a
/// node into itself).
pub fn move_item(root: &mut DocNode, uuid: &str, dest_uuid: &str) -> bool {
    if root.uuid == uuid {
        tracing::warn!(uuid, "refusing to move the tree root");
        return false;
    }
    let Some(moved) = find(root, uuid) else {
        tracing::warn!(uuid, "move source not found in tree");
        return false;
    };
    if contains(moved, dest_uuid) {
        tracing::warn!(uuid, dest_uuid, "move destination is inside the moved subtree");
        return false;
    }
    match find(root, dest_uuid) {
        Some(dest) if dest.is_folder() => {}
        Some(_) => {
            tracing::warn!(dest_uuid, "move destination is not a folder");
            return false;
        }
        None => {
            tracing::warn!(dest_uuid, "move destination not found in tree");
            return false;
        }
    }

    let Some(node) = remove_item(root, uuid) else {
        return false;
    };
    match find_mut(root, dest_uuid) {
        Some(dest) => {
            dest.children.get_or_insert_with(Vec::new).push(node);
            true
        }
        // Validated above; only reachable if the destination was inside
        // the subtree we just detached, which contains() already rejects.
        None => false,
    }
}
