//! Pure editing operations over records.
//!
//! Every operation is a total, copy-on-write transform: inputs are
//! borrowed, never mutated, and each call returns a newly owned value to
//! be substituted for the old one. Operations exist both on bare
//! [`Record`](crate::model::Record)s and on
//! [`RecordWithSelection`](crate::model::RecordWithSelection) wrappers,
//! where they additionally maintain or consume the selection and
//! pattern-match single-line vs. multiline content.
//!
//! - `splice`: remove/insert characters and their format slots
//! - `apply_format` / `remove_format` / `active_format`: stack edits and
//!   queries over character ranges
//! - `concat` / `split` / `is_empty` / `text_content`: structural
//!   operations

pub mod format;
pub mod splice;
pub mod structure;

pub use splice::SpliceFormats;
