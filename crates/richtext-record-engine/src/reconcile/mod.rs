//! Tree reconciliation.
//!
//! [`apply`] renders a record and patches a live host root to match,
//! child by child. Only text nodes with identical content are kept;
//! every other live child is replaced wholesale and surplus children are
//! dropped from the end. Keeping identical text nodes is what preserves
//! host-side text state (composition, spellcheck marks) across rerenders;
//! elements are cheap to rebuild and carry no such state.
//!
//! After patching, the record's selection is translated to tree
//! boundaries and installed through the host's native selection API.

use log::debug;

use crate::model::RecordWithSelection;
use crate::render::{to_tree, FragmentNode};
use crate::tree::{Boundary, NodeKind, ViewTree};

/// Zero-width character inserted so a collapsed caret at the very start
/// of a text node survives installation in hosts that normalize such
/// boundaries away.
const CARET_PLACEHOLDER: &str = "\u{FEFF}";

/// Renders `value` and patches the children of `root` in place, then
/// installs the selection (when both boundaries resolve).
///
/// Multiline content wraps each line in a `multiline_tag` element.
pub fn apply<T: ViewTree>(
    tree: &mut T,
    value: &RecordWithSelection,
    root: &T::Node,
    multiline_tag: Option<&str>,
) {
    let rendered = to_tree(value, multiline_tag, None);

    let mut kept = 0usize;
    let mut replaced = 0usize;
    let mut appended = 0usize;

    for (index, target) in rendered.children.iter().enumerate() {
        let live = tree.children_of(root);
        match live.get(index) {
            None => {
                let node = materialize(tree, target);
                tree.append_child(root, &node);
                appended += 1;
            }
            Some(existing) => {
                if matches(tree, existing, target) {
                    kept += 1;
                } else {
                    let node = materialize(tree, target);
                    tree.replace_child(root, index, &node);
                    replaced += 1;
                }
            }
        }
    }

    let mut removed = 0usize;
    while tree.children_of(root).len() > rendered.children.len() {
        tree.remove_child(root, rendered.children.len());
        removed += 1;
    }

    debug!(
        "reconciled root: {kept} kept, {replaced} replaced, {appended} appended, {removed} removed"
    );

    let (Some(start_path), Some(end_path)) =
        (&rendered.selection.start, &rendered.selection.end)
    else {
        return;
    };
    let (Some(mut start), Some(mut end)) = (
        boundary_at(tree, root, start_path),
        boundary_at(tree, root, end_path),
    ) else {
        return;
    };

    // A collapsed caret at offset 0 of a text node gets a zero-width
    // placeholder in front of it, and sits after the placeholder.
    if start == end
        && start.offset == 0
        && tree.node_kind(&start.node) == NodeKind::Text
    {
        tree.insert_text(&start.node, 0, CARET_PLACEHOLDER);
        start.offset = 1;
        end.offset = 1;
    }

    tree.set_selection_boundaries(start, end);
}

/// True when the live node can stand in for the target: both text nodes
/// with identical content. Elements never match; they are rebuilt.
fn matches<T: ViewTree>(tree: &T, live: &T::Node, target: &FragmentNode) -> bool {
    match target {
        FragmentNode::Text(text) => {
            tree.node_kind(live) == NodeKind::Text && tree.text_of(live) == *text
        }
        FragmentNode::Element { .. } => false,
    }
}

/// Builds a detached fragment node (and its subtree) in the host tree.
fn materialize<T: ViewTree>(tree: &mut T, node: &FragmentNode) -> T::Node {
    match node {
        FragmentNode::Text(text) => tree.create_text(text),
        FragmentNode::Element {
            tag,
            attributes,
            children,
        } => {
            let element = tree.create_element(tag, attributes);
            for child in children {
                let child = materialize(tree, child);
                tree.append_child(&element, &child);
            }
            element
        }
    }
}

/// Resolves a structural path against the live tree: every step but the
/// last descends into a child, the last is the boundary offset.
fn boundary_at<T: ViewTree>(
    tree: &T,
    root: &T::Node,
    path: &[usize],
) -> Option<Boundary<T::Node>> {
    let mut node = root.clone();
    let mut path = path;
    while path.len() > 1 {
        node = tree.children_of(&node).into_iter().nth(path[0])?;
        path = &path[1..];
    }
    Some(Boundary {
        node: node.clone(),
        offset: *path.first()?,
    })
}
