use serde::{Deserialize, Serialize};

/// One selection boundary.
///
/// `Offset` addresses a character position within a single line, in
/// `[0, char_len]`. `Path` is the multiline structural form
/// `[line_index, ...inner]`, where the remainder addresses the selection of
/// that line's record; a path of just `[line_index]` marks a boundary at
/// the line element's own edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPoint {
    Offset(usize),
    Path(Vec<usize>),
}

impl SelectionPoint {
    /// The character offset, if this is a single-line point.
    pub fn offset(&self) -> Option<usize> {
        match self {
            SelectionPoint::Offset(o) => Some(*o),
            SelectionPoint::Path(_) => None,
        }
    }

    /// The structural path, if this is a multiline point.
    pub fn path(&self) -> Option<&[usize]> {
        match self {
            SelectionPoint::Offset(_) => None,
            SelectionPoint::Path(p) => Some(p),
        }
    }
}

/// Selection state for a record: optional start and end boundaries, with
/// `start <= end` in document order when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<SelectionPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<SelectionPoint>,
}

impl Selection {
    /// No boundaries known.
    pub fn none() -> Self {
        Selection::default()
    }

    /// A collapsed caret at a character offset.
    pub fn collapsed(offset: usize) -> Self {
        Selection {
            start: Some(SelectionPoint::Offset(offset)),
            end: Some(SelectionPoint::Offset(offset)),
        }
    }

    /// A character-offset range.
    pub fn range(start: usize, end: usize) -> Self {
        Selection {
            start: Some(SelectionPoint::Offset(start)),
            end: Some(SelectionPoint::Offset(end)),
        }
    }

    /// True iff neither boundary is present.
    pub fn is_none(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Start offset, if present as a single-line point.
    pub fn start_offset(&self) -> Option<usize> {
        self.start.as_ref().and_then(SelectionPoint::offset)
    }

    /// End offset, if present as a single-line point.
    pub fn end_offset(&self) -> Option<usize> {
        self.end.as_ref().and_then(SelectionPoint::offset)
    }
}
