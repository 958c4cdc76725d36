//! Host view-tree capability interface.
//!
//! The converter reads a snapshot of a host-owned tree and the reconciler
//! writes into a live one, but this crate never depends on a concrete host
//! tree type. Everything goes through [`ViewTree`], a minimal capability
//! trait a host (or the in-memory [`memory::MemTree`]) implements. Void
//! nodes such as line breaks are modeled as childless elements.

pub mod memory;

/// Node classification as seen through the capability interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Element with a (lowercase) tag.
    Element { tag: String },
    /// Text run.
    Text,
}

/// One selection boundary in a host tree: a container node and an offset.
///
/// For a text node the offset counts characters; for an element it counts
/// children.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary<N> {
    pub node: N,
    pub offset: usize,
}

/// A pair of boundaries delimiting a host selection range.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRange<N> {
    pub start: Boundary<N>,
    pub end: Boundary<N>,
}

/// Capability interface over a host-owned view tree and its native
/// selection API.
///
/// Reading methods treat the tree as a snapshot; mutating methods are only
/// used by the reconciler, which runs to completion as sole owner of the
/// subtree it patches. Selection boundaries are installed exclusively via
/// [`ViewTree::set_selection_boundaries`], never by direct offset
/// assignment, so the host can keep its own invariants.
pub trait ViewTree {
    /// Node handle. Cheap to clone; equality is node identity.
    type Node: Clone + PartialEq;

    fn node_kind(&self, node: &Self::Node) -> NodeKind;
    fn children_of(&self, node: &Self::Node) -> Vec<Self::Node>;
    /// Content of a text node; empty for elements.
    fn text_of(&self, node: &Self::Node) -> String;
    /// Attribute pairs of an element in document order; empty for text.
    fn attributes_of(&self, node: &Self::Node) -> Vec<(String, String)>;

    fn create_element(&mut self, tag: &str, attributes: &[(String, String)]) -> Self::Node;
    fn create_text(&mut self, text: &str) -> Self::Node;
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);
    /// Replaces the child at `index` with `replacement`.
    fn replace_child(&mut self, parent: &Self::Node, index: usize, replacement: &Self::Node);
    fn remove_child(&mut self, parent: &Self::Node, index: usize);
    /// Inserts `text` into a text node at a character offset.
    fn insert_text(&mut self, node: &Self::Node, offset: usize, text: &str);

    fn selection_boundaries(&self) -> Option<TreeRange<Self::Node>>;
    fn set_selection_boundaries(
        &mut self,
        start: Boundary<Self::Node>,
        end: Boundary<Self::Node>,
    );
}
