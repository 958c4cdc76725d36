//! Value types of the rich-text record model.
//!
//! A [`Record`] pairs a flat text string with a per-character sequence of
//! [`FormatStack`]s; [`Content`] tags single-line vs. multiline values and
//! [`RecordWithSelection`] couples content with its [`Selection`]. All
//! types are plain owned values with no identity across operations.

pub mod format;
pub mod record;
pub mod selection;

pub use format::{Format, FormatStack};
pub use record::{Content, Record, RecordWithSelection};
pub use selection::{Selection, SelectionPoint};
