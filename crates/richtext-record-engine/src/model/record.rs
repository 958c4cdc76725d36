use serde::{Deserialize, Serialize};

use super::format::FormatStack;
use super::selection::Selection;

/// One line of rich text: a flat string plus a parallel per-character
/// sequence of format stacks.
///
/// `formats` holds exactly one slot per character of `text` (characters are
/// Unicode scalar values; every offset in this crate counts characters, not
/// bytes). `None` and an empty stack are the same "no formatting here"
/// state; operations normalize emptied stacks to `None`.
///
/// `trailing` is the extra slot at index `text` length reserved for a
/// zero-width or open format boundary: an empty styled region at the caret,
/// or an embedded object after the last character. A trailing stack renders
/// as childless elements, which the converter reads back as `object=true`
/// formats; a round trip through a tree therefore normalizes trailing
/// formats to objects.
///
/// Records are plain values. Editing operations never mutate their input;
/// each transform returns a newly owned record to be substituted for the
/// old one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<Option<FormatStack>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing: Option<FormatStack>,
}

impl Record {
    /// The empty record: no text, no format slots.
    pub fn new() -> Self {
        Record::default()
    }

    /// Builds a record of unformatted text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Record {
            text,
            formats: vec![None; len],
            trailing: None,
        }
    }

    /// Number of characters (and of per-character format slots).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The stack at character slot `offset`, where `offset == char_len()`
    /// addresses the trailing slot. Out-of-range offsets and empty slots
    /// both read as `None`.
    pub fn stack_at(&self, offset: usize) -> Option<&FormatStack> {
        if offset == self.char_len() {
            self.trailing.as_ref()
        } else {
            self.formats.get(offset).and_then(|s| s.as_ref())
        }
    }

    /// True iff the record holds no text and no format slots, including the
    /// trailing one.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.trailing.is_none()
    }

    /// Byte index of character offset `at`, clamped to the text end.
    pub(crate) fn byte_at(&self, at: usize) -> usize {
        self.text
            .char_indices()
            .nth(at)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }
}

/// Document content: a single line, or an ordered sequence of lines.
///
/// The sequence order of `Multiline` is document order and semantically
/// significant. Operations pattern-match this tag rather than probing the
/// value's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Content {
    Line(Record),
    Multiline(Vec<Record>),
}

impl Content {
    /// The single line, if this is single-line content.
    pub fn as_line(&self) -> Option<&Record> {
        match self {
            Content::Line(r) => Some(r),
            Content::Multiline(_) => None,
        }
    }

    /// The line sequence, if this is multiline content.
    pub fn as_lines(&self) -> Option<&[Record]> {
        match self {
            Content::Line(_) => None,
            Content::Multiline(lines) => Some(lines),
        }
    }
}

/// Content paired with its selection state, the unit most public
/// operations accept and return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordWithSelection {
    pub value: Content,
    pub selection: Selection,
}

impl RecordWithSelection {
    /// Pairs content with a selection.
    pub fn new(value: Content, selection: Selection) -> Self {
        RecordWithSelection { value, selection }
    }

    /// Wraps a single line with a selection.
    pub fn line(record: Record, selection: Selection) -> Self {
        RecordWithSelection {
            value: Content::Line(record),
            selection,
        }
    }

    /// Wraps a line sequence with a selection.
    pub fn multiline(lines: Vec<Record>, selection: Selection) -> Self {
        RecordWithSelection {
            value: Content::Multiline(lines),
            selection,
        }
    }
}
