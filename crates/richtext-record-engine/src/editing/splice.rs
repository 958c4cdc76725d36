use crate::model::selection::SelectionPoint;
use crate::model::{Content, Format, FormatStack, Record, RecordWithSelection, Selection};

/// Format slots accompanying spliced-in text.
#[derive(Debug, Clone, Copy, Default)]
pub enum SpliceFormats<'a> {
    /// Every inserted character gets an absent slot.
    #[default]
    None,
    /// One format broadcast to every inserted character.
    Uniform(&'a Format),
    /// One slot per inserted character; shorter input is padded with
    /// absent slots, longer input truncated.
    PerChar(&'a [Option<FormatStack>]),
}

impl Record {
    /// Removes `delete_count` characters (and their slots) at `start`,
    /// then inserts `text` with one slot per inserted character. Offsets
    /// beyond the text clamp; the trailing slot is untouched.
    pub fn splice(
        &self,
        start: usize,
        delete_count: usize,
        text: &str,
        formats: SpliceFormats<'_>,
    ) -> Record {
        let len = self.char_len();
        let start = start.min(len);
        let delete_count = delete_count.min(len - start);
        let insert_len = text.chars().count();

        let inserted: Vec<Option<FormatStack>> = match formats {
            SpliceFormats::None => vec![None; insert_len],
            SpliceFormats::Uniform(format) => {
                vec![Some(vec![format.clone()]); insert_len]
            }
            SpliceFormats::PerChar(slots) => {
                let mut out: Vec<Option<FormatStack>> =
                    slots.iter().take(insert_len).cloned().collect();
                out.resize(insert_len, None);
                out
            }
        };

        let mut new_formats = Vec::with_capacity(len - delete_count + insert_len);
        new_formats.extend_from_slice(&self.formats[..start]);
        new_formats.extend(inserted);
        new_formats.extend_from_slice(&self.formats[start + delete_count..]);

        let start_byte = self.byte_at(start);
        let end_byte = self.byte_at(start + delete_count);
        let mut new_text =
            String::with_capacity(self.text.len() - (end_byte - start_byte) + text.len());
        new_text.push_str(&self.text[..start_byte]);
        new_text.push_str(text);
        new_text.push_str(&self.text[end_byte..]);

        Record {
            text: new_text,
            formats: new_formats,
            trailing: self.trailing.clone(),
        }
    }
}

impl RecordWithSelection {
    /// Splices the wrapped line and shifts selection offsets by the length
    /// delta. A boundary sitting exactly at the splice point does not
    /// move; one strictly past it does (strictly past `start` for the
    /// selection start, strictly past `start + delta` for the end).
    /// Multiline values pass through unchanged: flat offsets do not
    /// address a line sequence.
    pub fn splice(
        &self,
        start: usize,
        delete_count: usize,
        text: &str,
        formats: SpliceFormats<'_>,
    ) -> RecordWithSelection {
        let Content::Line(record) = &self.value else {
            return self.clone();
        };

        let spliced = record.splice(start, delete_count, text, formats);
        let delete_count = delete_count.min(record.char_len().saturating_sub(start));
        let delta = text.chars().count() as isize - delete_count as isize;

        let shift = |point: &Option<SelectionPoint>, threshold: isize| -> Option<SelectionPoint> {
            match point {
                Some(SelectionPoint::Offset(offset)) => {
                    let offset = *offset as isize;
                    let moved = if offset > threshold { offset + delta } else { offset };
                    Some(SelectionPoint::Offset(moved.max(0) as usize))
                }
                other => other.clone(),
            }
        };

        let selection = Selection {
            start: shift(&self.selection.start, start as isize),
            end: shift(&self.selection.end, start as isize + delta),
        };

        RecordWithSelection::line(spliced, selection)
    }
}
