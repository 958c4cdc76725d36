use std::borrow::Cow;

use crate::model::{Content, Record, RecordWithSelection, Selection};

impl Record {
    /// Concatenates records: texts in argument order, per-character slots
    /// appended positionally. Only the last argument's trailing slot
    /// survives; an intermediate zero-width boundary has no character to
    /// attach to once more text follows.
    pub fn concat(&self, others: &[Record]) -> Record {
        let mut out = self.clone();
        for other in others {
            out.text.push_str(&other.text);
            out.formats.extend(other.formats.iter().cloned());
            out.trailing = other.trailing.clone();
        }
        out
    }

    /// Two records, `[0, start)` and `[end, len)`; the span in between is
    /// discarded. The second half inherits the trailing slot.
    pub fn split(&self, start: usize, end: usize) -> (Record, Record) {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.clamp(start, len);

        let first = Record {
            text: self.text[..self.byte_at(start)].to_string(),
            formats: self.formats[..start].to_vec(),
            trailing: None,
        };
        let second = Record {
            text: self.text[self.byte_at(end)..].to_string(),
            formats: self.formats[end..].to_vec(),
            trailing: self.trailing.clone(),
        };
        (first, second)
    }
}

impl Content {
    /// True iff there is no content: an empty line, zero lines, or exactly
    /// one line which is itself empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Content::Line(record) => record.is_empty(),
            Content::Multiline(lines) => {
                lines.is_empty() || (lines.len() == 1 && lines[0].is_empty())
            }
        }
    }

    /// The flat text. Multiline content reads as its lines joined with
    /// `'\n'`.
    pub fn text_content(&self) -> Cow<'_, str> {
        match self {
            Content::Line(record) => Cow::Borrowed(record.text.as_str()),
            Content::Multiline(lines) => Cow::Owned(
                lines
                    .iter()
                    .map(|line| line.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        }
    }

    /// Concatenates content values. Line values concatenate their records;
    /// multiline values concatenate line sequences. Mixed arguments
    /// promote lines into the multiline sequence.
    pub fn concat(&self, others: &[Content]) -> Content {
        let any_multiline = std::iter::once(self)
            .chain(others.iter())
            .any(|c| matches!(c, Content::Multiline(_)));

        if !any_multiline {
            let Content::Line(first) = self else { unreachable!() };
            let rest: Vec<Record> = others
                .iter()
                .filter_map(|c| c.as_line().cloned())
                .collect();
            return Content::Line(first.concat(&rest));
        }

        let mut lines = Vec::new();
        for content in std::iter::once(self).chain(others.iter()) {
            match content {
                Content::Line(record) => lines.push(record.clone()),
                Content::Multiline(more) => lines.extend(more.iter().cloned()),
            }
        }
        Content::Multiline(lines)
    }
}

impl RecordWithSelection {
    /// True iff the wrapped content is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The wrapped content's flat text.
    pub fn text_content(&self) -> Cow<'_, str> {
        self.value.text_content()
    }

    /// Splits the wrapped line at `[start, end)` (defaulting to the
    /// selection offsets), discarding the span in between. The first half
    /// carries no selection; the second a collapsed selection at 0.
    /// Returns `None` for multiline content or without usable offsets.
    pub fn split(
        &self,
        start: Option<usize>,
        end: Option<usize>,
    ) -> Option<(RecordWithSelection, RecordWithSelection)> {
        let Content::Line(record) = &self.value else {
            return None;
        };
        let start = start.or(self.selection.start_offset())?;
        let end = end.or(self.selection.end_offset())?;
        let (first, second) = record.split(start, end);
        Some((
            RecordWithSelection::line(first, Selection::none()),
            RecordWithSelection::line(second, Selection::collapsed(0)),
        ))
    }
}
