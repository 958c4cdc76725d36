//! Rich-text record engine.
//!
//! Rich text lives in two shapes. Hosts hold a nested view tree (elements
//! wrapping elements wrapping text) whose selection is a node/offset pair.
//! Editing wants the flat [`model::Record`]: one string plus one format
//! stack per character, where selections are plain character offsets and
//! every edit is a pure function over values.
//!
//! This crate converts between the two and keeps them in sync:
//!
//! - [`model`]: records, format stacks, selections, multiline content
//! - [`tree`]: the [`tree::ViewTree`] capability trait a host implements,
//!   plus an arena-backed in-memory tree for tests and headless use
//! - [`convert`]: tree snapshot to record (with selection mapping)
//! - [`editing`]: pure copy-on-write operations (splice, format
//!   application and removal, split, concat)
//! - [`render`]: record to detached fragment with structural selection
//!   paths
//! - [`reconcile`]: patching a live tree to match a record while keeping
//!   identical text nodes alive
//! - [`html`]: HTML serialization of records
//!
//! The crate never touches a real UI tree itself; everything mutating goes
//! through [`tree::ViewTree`].

pub mod convert;
pub mod editing;
pub mod html;
pub mod model;
pub mod reconcile;
pub mod render;
pub mod tree;

pub use convert::{create, create_record, create_with_selection, Settings};
pub use editing::SpliceFormats;
pub use html::to_html;
pub use model::{
    Content, Format, FormatStack, Record, RecordWithSelection, Selection, SelectionPoint,
};
pub use reconcile::apply;
pub use render::{to_tree, FragmentNode, Rendered, SelectionPaths};
pub use tree::{memory::MemTree, Boundary, NodeKind, TreeRange, ViewTree};
