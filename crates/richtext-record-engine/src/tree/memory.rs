//! Arena-backed in-memory view tree.
//!
//! `MemTree` implements the full [`ViewTree`] capability interface so the
//! converter, renderer round-trips, and reconciler can be exercised without
//! a concrete host. Nodes live in a `Vec` and handles are indices, so a
//! node keeps its identity across mutations, which is what the
//! reconciliation-minimality tests assert on.

use super::{Boundary, NodeKind, TreeRange, ViewTree};

/// Handle into a [`MemTree`] arena. Identity is the arena index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum MemNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<NodeId>,
    },
    Text(String),
}

/// In-memory view tree with a native-style selection slot.
#[derive(Debug, Default)]
pub struct MemTree {
    nodes: Vec<MemNode>,
    selection: Option<TreeRange<NodeId>>,
}

impl MemTree {
    pub fn new() -> Self {
        MemTree::default()
    }

    fn push(&mut self, node: MemNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> &MemNode {
        &self.nodes[id.0]
    }

    /// Serializes a subtree to markup for assertions and debugging.
    /// Not escaped; use the `html` module for real output.
    pub fn markup(&self, id: NodeId) -> String {
        match self.node(id) {
            MemNode::Text(s) => s.clone(),
            MemNode::Element {
                tag,
                attributes,
                children,
            } => {
                let mut out = String::new();
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {name}=\"{value}\""));
                }
                out.push('>');
                for child in children {
                    out.push_str(&self.markup(*child));
                }
                out.push_str(&format!("</{tag}>"));
                out
            }
        }
    }

    /// Sets the selection range directly (a host feeding a range into the
    /// converter would do this).
    pub fn select(&mut self, start: Boundary<NodeId>, end: Boundary<NodeId>) {
        self.set_selection_boundaries(start, end);
    }

    fn assert_valid_boundary(&self, boundary: &Boundary<NodeId>) {
        match self.node(boundary.node) {
            MemNode::Text(s) => {
                let len = s.chars().count();
                assert!(
                    boundary.offset <= len,
                    "selection offset {} out of range for text node of length {len}",
                    boundary.offset
                );
            }
            MemNode::Element { children, .. } => {
                assert!(
                    boundary.offset <= children.len(),
                    "selection offset {} out of range for element with {} children",
                    boundary.offset,
                    children.len()
                );
            }
        }
    }
}

impl ViewTree for MemTree {
    type Node = NodeId;

    fn node_kind(&self, node: &NodeId) -> NodeKind {
        match self.node(*node) {
            MemNode::Element { tag, .. } => NodeKind::Element { tag: tag.clone() },
            MemNode::Text(_) => NodeKind::Text,
        }
    }

    fn children_of(&self, node: &NodeId) -> Vec<NodeId> {
        match self.node(*node) {
            MemNode::Element { children, .. } => children.clone(),
            MemNode::Text(_) => Vec::new(),
        }
    }

    fn text_of(&self, node: &NodeId) -> String {
        match self.node(*node) {
            MemNode::Text(s) => s.clone(),
            MemNode::Element { .. } => String::new(),
        }
    }

    fn attributes_of(&self, node: &NodeId) -> Vec<(String, String)> {
        match self.node(*node) {
            MemNode::Element { attributes, .. } => attributes.clone(),
            MemNode::Text(_) => Vec::new(),
        }
    }

    fn create_element(&mut self, tag: &str, attributes: &[(String, String)]) -> NodeId {
        self.push(MemNode::Element {
            tag: tag.to_string(),
            attributes: attributes.to_vec(),
            children: Vec::new(),
        })
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.push(MemNode::Text(text.to_string()))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        match &mut self.nodes[parent.0] {
            MemNode::Element { children, .. } => children.push(*child),
            MemNode::Text(_) => panic!("cannot append a child to a text node"),
        }
    }

    fn replace_child(&mut self, parent: &NodeId, index: usize, replacement: &NodeId) {
        match &mut self.nodes[parent.0] {
            MemNode::Element { children, .. } => children[index] = *replacement,
            MemNode::Text(_) => panic!("cannot replace a child of a text node"),
        }
    }

    fn remove_child(&mut self, parent: &NodeId, index: usize) {
        match &mut self.nodes[parent.0] {
            MemNode::Element { children, .. } => {
                children.remove(index);
            }
            MemNode::Text(_) => panic!("cannot remove a child of a text node"),
        }
    }

    fn insert_text(&mut self, node: &NodeId, offset: usize, text: &str) {
        match &mut self.nodes[node.0] {
            MemNode::Text(s) => {
                let byte = s
                    .char_indices()
                    .nth(offset)
                    .map(|(b, _)| b)
                    .unwrap_or(s.len());
                s.insert_str(byte, text);
            }
            MemNode::Element { .. } => panic!("cannot insert text into an element"),
        }
    }

    fn selection_boundaries(&self) -> Option<TreeRange<NodeId>> {
        self.selection.clone()
    }

    fn set_selection_boundaries(&mut self, start: Boundary<NodeId>, end: Boundary<NodeId>) {
        // Out-of-range boundaries are a precondition violation by the
        // producing code path, not a recoverable condition.
        self.assert_valid_boundary(&start);
        self.assert_valid_boundary(&end);
        self.selection = Some(TreeRange { start, end });
    }
}
