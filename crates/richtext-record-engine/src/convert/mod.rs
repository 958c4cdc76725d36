//! Tree-to-record conversion.
//!
//! Builds a [`Record`] (or multiline sequence) plus selection offsets from
//! a snapshot of a host view tree. Element tags become [`Format`] kinds
//! wrapping every character their subtree produces; elements without
//! text-producing descendants become zero-width `object` formats; `br`
//! elements become literal `'\n'` characters with no format of their own.
//! Host selection boundaries are converted to character offsets as the
//! text accumulates.

use crate::model::{Content, Format, FormatStack, Record, RecordWithSelection, Selection};
use crate::model::selection::SelectionPoint;
use crate::tree::{NodeKind, TreeRange, ViewTree};

/// Tag treated as a forced line break inside one logical line.
const LINE_BREAK_TAG: &str = "br";

/// Conversion options. All callbacks are optional and default to
/// no-op/identity.
pub struct Settings<'a, T: ViewTree + ?Sized> {
    /// Skip a subtree entirely.
    pub remove_node: Option<&'a dyn Fn(&T, &T::Node) -> bool>,
    /// Descend into a node's children without contributing a wrapping
    /// format.
    pub unwrap_node: Option<&'a dyn Fn(&T, &T::Node) -> bool>,
    /// Drop named attributes when building a format's attribute list.
    pub remove_attribute: Option<&'a dyn Fn(&str) -> bool>,
    /// Transform raw text-node content (e.g. whitespace collapsing). The
    /// selection accumulator is passed when filtering a full node so a
    /// collapsing filter can adjust already-recorded offsets.
    pub filter_string: Option<&'a dyn Fn(&str, Option<&mut Selection>) -> String>,
}

impl<T: ViewTree + ?Sized> Default for Settings<'_, T> {
    fn default() -> Self {
        Settings {
            remove_node: None,
            unwrap_node: None,
            remove_attribute: None,
            filter_string: None,
        }
    }
}

impl<T: ViewTree + ?Sized> Settings<'_, T> {
    fn removes(&self, tree: &T, node: &T::Node) -> bool {
        self.remove_node.is_some_and(|f| f(tree, node))
    }

    fn unwraps(&self, tree: &T, node: &T::Node) -> bool {
        self.unwrap_node.is_some_and(|f| f(tree, node))
    }

    fn filter(&self, raw: &str, selection: Option<&mut Selection>) -> String {
        match self.filter_string {
            Some(f) => f(raw, selection),
            None => raw.to_string(),
        }
    }

    fn filtered_attributes(&self, tree: &T, node: &T::Node) -> Vec<(String, String)> {
        let mut attributes = tree.attributes_of(node);
        if let Some(f) = self.remove_attribute {
            attributes.retain(|(name, _)| !f(name));
        }
        attributes
    }
}

/// Converts a single-line subtree, with selection offsets when `range` is
/// given. A missing node yields the empty record.
pub fn create_record<T: ViewTree>(
    tree: &T,
    node: Option<&T::Node>,
    range: Option<&TreeRange<T::Node>>,
    settings: &Settings<'_, T>,
) -> RecordWithSelection {
    match node {
        Some(node) => {
            let (record, selection) = convert_element(tree, node, range, settings);
            RecordWithSelection::line(record, selection)
        }
        None => RecordWithSelection::line(Record::new(), Selection::none()),
    }
}

/// Converts a subtree, dispatching to multiline mode when `multiline_tag`
/// is given: each immediate child element with that tag becomes one line,
/// and selection boundaries become structural `[line, ...]` paths.
pub fn create_with_selection<T: ViewTree>(
    tree: &T,
    node: Option<&T::Node>,
    range: Option<&TreeRange<T::Node>>,
    multiline_tag: Option<&str>,
    settings: &Settings<'_, T>,
) -> RecordWithSelection {
    let Some(tag) = multiline_tag else {
        return create_record(tree, node, range, settings);
    };

    let Some(node) = node else {
        return RecordWithSelection::multiline(Vec::new(), Selection::none());
    };

    let mut lines = Vec::new();
    let mut selection = Selection::none();

    for child in tree.children_of(node) {
        let NodeKind::Element { tag: child_tag } = tree.node_kind(&child) else {
            continue;
        };
        if child_tag != tag {
            continue;
        }

        let index = lines.len();
        let (record, inner) = convert_element(tree, &child, range, settings);

        if let Some(range) = range {
            if let Some(offset) = inner.start_offset() {
                selection.start = Some(SelectionPoint::Path(vec![index, offset]));
            } else if range.start.node == child {
                selection.start = Some(SelectionPoint::Path(vec![index]));
            }

            if let Some(offset) = inner.end_offset() {
                selection.end = Some(SelectionPoint::Path(vec![index, offset]));
            } else if range.end.node == child {
                selection.end = Some(SelectionPoint::Path(vec![index]));
            }
        }

        lines.push(record);
    }

    RecordWithSelection::multiline(lines, selection)
}

/// Converts a subtree and drops the selection.
pub fn create<T: ViewTree>(
    tree: &T,
    node: Option<&T::Node>,
    multiline_tag: Option<&str>,
    settings: &Settings<'_, T>,
) -> Content {
    create_with_selection(tree, node, None, multiline_tag, settings).value
}

/// Accumulates text, per-character format slots, and selection offsets
/// while walking one element's children.
///
/// Slots are kept as a dense `Vec<Option<_>>` one longer than the text at
/// most; a stack recorded at the current length (a zero-width object)
/// becomes an ordinary character slot if more text arrives, or the
/// record's trailing slot otherwise.
struct RecordBuilder {
    text: String,
    chars: usize,
    slots: Vec<Option<FormatStack>>,
    selection: Selection,
}

impl RecordBuilder {
    fn new() -> Self {
        RecordBuilder {
            text: String::new(),
            chars: 0,
            slots: Vec::new(),
            selection: Selection::none(),
        }
    }

    fn ensure_slot(&mut self, index: usize) {
        while self.slots.len() <= index {
            self.slots.push(None);
        }
    }

    /// Pushes a format innermost at a slot.
    fn push_at(&mut self, index: usize, format: Format) {
        self.ensure_slot(index);
        self.slots[index].get_or_insert_with(Vec::new).push(format);
    }

    /// Inserts a format outermost at a slot (objects stack in front of
    /// whatever was already recorded there).
    fn prepend_at(&mut self, index: usize, format: Format) {
        self.ensure_slot(index);
        self.slots[index]
            .get_or_insert_with(Vec::new)
            .insert(0, format);
    }

    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
        self.chars += text.chars().count();
        while self.slots.len() < self.chars {
            self.slots.push(None);
        }
    }

    fn finish(mut self) -> (Record, Selection) {
        let trailing = if self.slots.len() > self.chars {
            self.slots.pop().flatten()
        } else {
            None
        };
        (
            Record {
                text: self.text,
                formats: self.slots,
                trailing,
            },
            self.selection,
        )
    }
}

fn convert_element<T: ViewTree>(
    tree: &T,
    element: &T::Node,
    range: Option<&TreeRange<T::Node>>,
    settings: &Settings<'_, T>,
) -> (Record, Selection) {
    let NodeKind::Element { tag } = tree.node_kind(element) else {
        return (Record::new(), Selection::none());
    };

    if tag == LINE_BREAK_TAG
        && !settings.removes(tree, element)
        && !settings.unwraps(tree, element)
    {
        return (
            Record {
                text: "\n".to_string(),
                formats: vec![None],
                trailing: None,
            },
            Selection::none(),
        );
    }

    let children = tree.children_of(element);
    let mut builder = RecordBuilder::new();

    for (index, child) in children.iter().enumerate() {
        match tree.node_kind(child) {
            NodeKind::Text => {
                let raw = tree.text_of(child);
                if let Some(range) = range {
                    if range.start.node == *child {
                        let prefix: String = raw.chars().take(range.start.offset).collect();
                        let offset =
                            builder.chars + settings.filter(&prefix, None).chars().count();
                        builder.selection.start = Some(SelectionPoint::Offset(offset));
                    }
                    if range.end.node == *child {
                        let prefix: String = raw.chars().take(range.end.offset).collect();
                        let offset =
                            builder.chars + settings.filter(&prefix, None).chars().count();
                        builder.selection.end = Some(SelectionPoint::Offset(offset));
                    }
                }
                let filtered = settings.filter(&raw, Some(&mut builder.selection));
                builder.push_text(&filtered);
            }
            NodeKind::Element { tag: child_tag } => {
                if settings.removes(tree, child) {
                    continue;
                }

                // A boundary landing on this element's child-list position
                // maps to the text length accumulated so far.
                if let Some(range) = range {
                    if range.start.node == *element && range.start.offset == index {
                        builder.selection.start = Some(SelectionPoint::Offset(builder.chars));
                    }
                    if range.end.node == *element && range.end.offset == index {
                        builder.selection.end = Some(SelectionPoint::Offset(builder.chars));
                    }
                }

                let unwrap = settings.unwraps(tree, child);

                if child_tag == LINE_BREAK_TAG && !unwrap {
                    builder.push_text("\n");
                    continue;
                }

                let format = (!unwrap).then(|| Format {
                    kind: child_tag.clone(),
                    attributes: settings.filtered_attributes(tree, child),
                    object: false,
                });

                let (sub, sub_selection) = convert_element(tree, child, range, settings);
                let start = builder.chars;

                match (format, sub.char_len()) {
                    (Some(mut format), 0) => {
                        // No text below: record a zero-width object at the
                        // current position, outermost in any stack already
                        // there. The empty subtree's own formats are
                        // discarded.
                        format.object = true;
                        builder.prepend_at(start, format);
                    }
                    (format, sub_chars) => {
                        builder.push_text(&sub.text);
                        let slot_count = sub_chars + usize::from(sub.trailing.is_some());
                        for i in 0..slot_count {
                            let slot = start + i;
                            if let Some(format) = &format {
                                builder.push_at(slot, format.clone());
                            }
                            let stack = if i < sub_chars {
                                sub.formats[i].as_ref()
                            } else {
                                sub.trailing.as_ref()
                            };
                            if let Some(stack) = stack {
                                for inner in stack {
                                    builder.push_at(slot, inner.clone());
                                }
                            }
                        }
                    }
                }

                if let Some(offset) = sub_selection.start_offset() {
                    builder.selection.start = Some(SelectionPoint::Offset(start + offset));
                }
                if let Some(offset) = sub_selection.end_offset() {
                    builder.selection.end = Some(SelectionPoint::Offset(start + offset));
                }
            }
        }
    }

    // Boundary sitting past the last child.
    if let Some(range) = range {
        if range.start.node == *element && range.start.offset == children.len() {
            builder.selection.start = Some(SelectionPoint::Offset(builder.chars));
        }
        if range.end.node == *element && range.end.offset == children.len() {
            builder.selection.end = Some(SelectionPoint::Offset(builder.chars));
        }
    }

    builder.finish()
}
