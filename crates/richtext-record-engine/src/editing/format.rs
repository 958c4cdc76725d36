use crate::model::selection::SelectionPoint;
use crate::model::{Content, Format, Record, RecordWithSelection};

impl Record {
    /// Applies `format` to every character in `[start, end)`: any existing
    /// entry of the same kind is removed and the format is pushed as the
    /// new innermost entry. Out-of-range bounds clamp to the character
    /// count, so the trailing slot is never written here; it stays
    /// readable through [`Record::stack_at`] and `active_format`.
    pub fn apply_format(&self, format: &Format, start: usize, end: usize) -> Record {
        let mut out = self.clone();
        let end = end.min(out.char_len());
        for slot in out.formats.iter_mut().take(end).skip(start) {
            let stack = slot.get_or_insert_with(Vec::new);
            stack.retain(|f| f.kind != format.kind);
            stack.push(format.clone());
        }
        out
    }

    /// Removes every entry of `kind` from the stacks in `[start, end)`.
    /// A stack emptied by the removal becomes the absent state. Like
    /// `apply_format`, this clamps to the character count and leaves the
    /// trailing slot alone.
    pub fn remove_format(&self, kind: &str, start: usize, end: usize) -> Record {
        let mut out = self.clone();
        let end = end.min(out.char_len());
        for slot in out.formats.iter_mut().take(end).skip(start) {
            if let Some(stack) = slot {
                stack.retain(|f| f.kind != kind);
                if stack.is_empty() {
                    *slot = None;
                }
            }
        }
        out
    }
}

impl RecordWithSelection {
    /// Applies `format` over `[start, end)`, defaulting omitted bounds to
    /// the current selection offsets. Without usable bounds (or for
    /// multiline content, which flat offsets cannot address) the value
    /// passes through unchanged.
    pub fn apply_format(
        &self,
        format: &Format,
        start: Option<usize>,
        end: Option<usize>,
    ) -> RecordWithSelection {
        let Content::Line(record) = &self.value else {
            return self.clone();
        };
        let (Some(start), Some(end)) = (
            start.or(self.selection.start_offset()),
            end.or(self.selection.end_offset()),
        ) else {
            return self.clone();
        };
        RecordWithSelection::line(
            record.apply_format(format, start, end),
            self.selection.clone(),
        )
    }

    /// Removes `kind` over `[start, end)`, defaulting omitted bounds to
    /// the current selection offsets.
    pub fn remove_format(
        &self,
        kind: &str,
        start: Option<usize>,
        end: Option<usize>,
    ) -> RecordWithSelection {
        let Content::Line(record) = &self.value else {
            return self.clone();
        };
        let (Some(start), Some(end)) = (
            start.or(self.selection.start_offset()),
            end.or(self.selection.end_offset()),
        ) else {
            return self.clone();
        };
        RecordWithSelection::line(
            record.remove_format(kind, start, end),
            self.selection.clone(),
        )
    }

    /// The format of `kind` active at the selection start, if any. For
    /// multiline content the path's first step selects the line and the
    /// second the character offset. Offset == text length addresses the
    /// trailing slot.
    pub fn active_format(&self, kind: &str) -> Option<&Format> {
        let start = self.selection.start.as_ref()?;
        match (&self.value, start) {
            (Content::Line(record), SelectionPoint::Offset(offset)) => {
                find_in_stack(record, *offset, kind)
            }
            (Content::Multiline(lines), SelectionPoint::Path(path)) => {
                let line = lines.get(*path.first()?)?;
                find_in_stack(line, *path.get(1)?, kind)
            }
            _ => None,
        }
    }
}

fn find_in_stack<'a>(record: &'a Record, offset: usize, kind: &str) -> Option<&'a Format> {
    record
        .stack_at(offset)?
        .iter()
        .find(|f| f.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Selection;
    use pretty_assertions::assert_eq;

    #[test]
    fn apply_format_covers_the_half_open_range() {
        let record = Record::from_text("ab");
        let out = record.apply_format(&Format::new("strong"), 0, 1);
        assert_eq!(out.formats[0], Some(vec![Format::new("strong")]));
        assert_eq!(out.formats[1], None);
    }

    #[test]
    fn apply_format_is_idempotent() {
        let record = Record::from_text("abc");
        let strong = Format::new("strong");
        let once = record.apply_format(&strong, 0, 3);
        let twice = once.apply_format(&strong, 0, 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn applying_an_existing_kind_replaces_it_as_innermost() {
        let mut record = Record::from_text("a");
        record.formats[0] = Some(vec![
            Format::with_attributes("a", vec![("href".to_string(), "/old".to_string())]),
            Format::new("em"),
        ]);
        let new_link =
            Format::with_attributes("a", vec![("href".to_string(), "/new".to_string())]);
        let out = record.apply_format(&new_link, 0, 1);
        let stack = out.formats[0].as_ref().unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack[0].kind, "em");
        assert_eq!(stack[1].attribute("href"), Some("/new"));
    }

    #[test]
    fn remove_format_empties_to_absent() {
        let record = Record::from_text("ab").apply_format(&Format::new("em"), 0, 2);
        let out = record.remove_format("em", 0, 1);
        assert_eq!(out.formats[0], None);
        assert_eq!(out.formats[1], Some(vec![Format::new("em")]));
    }

    #[test]
    fn apply_then_remove_leaves_no_entry_of_the_kind() {
        let record = Record::from_text("abcd");
        let em = Format::new("em");
        let applied = record.apply_format(&em, 1, 3);
        let removed = applied.remove_format("em", 1, 3);
        for i in 1..3 {
            assert!(removed.stack_at(i).is_none());
        }
    }

    #[test]
    fn range_ops_leave_the_trailing_slot_alone() {
        let mut record = Record::from_text("ab");
        record.trailing = Some(vec![Format::new("em")]);
        let applied = record.apply_format(&Format::new("strong"), 0, 3);
        assert_eq!(applied.trailing, record.trailing);
        assert_eq!(applied.formats[1], Some(vec![Format::new("strong")]));
        let removed = record.remove_format("em", 0, 3);
        assert_eq!(removed.trailing, record.trailing);
    }

    #[test]
    fn wrapper_defaults_bounds_to_selection() {
        let value = RecordWithSelection::line(
            Record::from_text("abcd"),
            Selection::range(1, 3),
        );
        let out = value.apply_format(&Format::new("em"), None, None);
        let record = out.value.as_line().unwrap();
        assert_eq!(record.formats[0], None);
        assert_eq!(record.formats[1], Some(vec![Format::new("em")]));
        assert_eq!(record.formats[2], Some(vec![Format::new("em")]));
        assert_eq!(record.formats[3], None);
    }

    #[test]
    fn wrapper_without_selection_passes_through() {
        let value =
            RecordWithSelection::line(Record::from_text("ab"), Selection::none());
        let out = value.apply_format(&Format::new("em"), None, None);
        assert_eq!(out, value);
    }

    #[test]
    fn active_format_reads_the_selection_start() {
        let record = Record::from_text("ab").apply_format(&Format::new("em"), 0, 1);
        let value = RecordWithSelection::line(record, Selection::collapsed(0));
        assert_eq!(value.active_format("em").unwrap().kind, "em");
        assert!(value.active_format("strong").is_none());
    }

    #[test]
    fn active_format_is_none_without_a_selection() {
        let record = Record::from_text("ab").apply_format(&Format::new("em"), 0, 2);
        let value = RecordWithSelection::line(record, Selection::none());
        assert!(value.active_format("em").is_none());
    }

    #[test]
    fn active_format_is_none_after_removal() {
        let value = RecordWithSelection::line(
            Record::from_text("ab").apply_format(&Format::new("em"), 0, 2),
            Selection::collapsed(0),
        );
        let removed = value.remove_format("em", Some(0), Some(2));
        assert!(removed.active_format("em").is_none());
    }

    #[test]
    fn active_format_resolves_multiline_paths() {
        let line0 = Record::from_text("ab");
        let line1 = Record::from_text("cd").apply_format(&Format::new("strong"), 0, 2);
        let value = RecordWithSelection::multiline(
            vec![line0, line1],
            Selection {
                start: Some(SelectionPoint::Path(vec![1, 1])),
                end: Some(SelectionPoint::Path(vec![1, 1])),
            },
        );
        assert_eq!(value.active_format("strong").unwrap().kind, "strong");
        assert!(value.active_format("em").is_none());
    }

    #[test]
    fn active_format_sees_the_trailing_slot() {
        let mut record = Record::from_text("ab");
        record.trailing = Some(vec![Format::new("em")]);
        let value = RecordWithSelection::line(record, Selection::collapsed(2));
        assert_eq!(value.active_format("em").unwrap().kind, "em");
    }
}
