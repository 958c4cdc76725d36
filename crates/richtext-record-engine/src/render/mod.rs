//! Record-to-tree rendering.
//!
//! Walks a record's characters and realizes format stacks as a detached
//! fragment of owned [`FragmentNode`]s, reusing open elements while
//! consecutive characters share a stack prefix so identical adjacent runs
//! never fragment into separate elements. Selection character offsets are
//! converted to structural paths at the moment each offset's character is
//! emitted; paths survive reattachment into a different physical tree,
//! character offsets do not.

use crate::model::record::{Content, Record, RecordWithSelection};
use crate::model::selection::SelectionPoint;
use crate::model::FormatStack;

/// Wrapper used when multiline content is rendered without an explicit
/// line tag.
const DEFAULT_LINE_TAG: &str = "div";

/// Tag emitted for a literal `'\n'` character.
const LINE_BREAK_TAG: &str = "br";

/// One node of a detached rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<FragmentNode>,
    },
    Text(String),
}

impl FragmentNode {
    fn element(tag: &str, attributes: Vec<(String, String)>) -> Self {
        FragmentNode::Element {
            tag: tag.to_string(),
            attributes,
            children: Vec::new(),
        }
    }
}

/// Structural selection paths into a rendered fragment: child offsets from
/// the fragment root, ending in a character offset within a text node (or
/// a child offset where the boundary falls on an element).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPaths {
    pub start: Option<Vec<usize>>,
    pub end: Option<Vec<usize>>,
}

/// A detached fragment (the root's children) plus selection paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub children: Vec<FragmentNode>,
    pub selection: SelectionPaths,
}

/// Renders a record (or line sequence) to a detached fragment.
///
/// Multiline content emits one `multiline_tag` element per line as root
/// children, with line paths prefixed by the line index. `wrap_tag` wraps
/// single-line output in one element (paths prefixed accordingly).
pub fn to_tree(
    value: &RecordWithSelection,
    multiline_tag: Option<&str>,
    wrap_tag: Option<&str>,
) -> Rendered {
    match &value.value {
        Content::Line(record) => {
            let (children, mut selection) = render_line(
                record,
                value.selection.start_offset(),
                value.selection.end_offset(),
            );
            match wrap_tag {
                Some(tag) => {
                    prefix(&mut selection, 0);
                    Rendered {
                        children: vec![FragmentNode::Element {
                            tag: tag.to_string(),
                            attributes: Vec::new(),
                            children,
                        }],
                        selection,
                    }
                }
                None => Rendered {
                    children,
                    selection,
                },
            }
        }
        Content::Multiline(lines) => {
            let tag = multiline_tag.unwrap_or(DEFAULT_LINE_TAG);
            let mut children = Vec::with_capacity(lines.len());
            let mut selection = SelectionPaths::default();

            for (index, line) in lines.iter().enumerate() {
                let start = line_boundary(&value.selection.start, index);
                let end = line_boundary(&value.selection.end, index);
                let (line_children, mut line_paths) =
                    render_line(line, start.offset, end.offset);

                prefix(&mut line_paths, index);
                if start.edge {
                    line_paths.start = Some(vec![index]);
                }
                if end.edge {
                    line_paths.end = Some(vec![index]);
                }
                if line_paths.start.is_some() {
                    selection.start = line_paths.start;
                }
                if line_paths.end.is_some() {
                    selection.end = line_paths.end;
                }

                children.push(FragmentNode::Element {
                    tag: tag.to_string(),
                    attributes: Vec::new(),
                    children: line_children,
                });
            }

            Rendered {
                children,
                selection,
            }
        }
    }
}

struct LineBoundary {
    offset: Option<usize>,
    edge: bool,
}

/// Resolves a structural selection point against line `index`: either an
/// inner character offset, or a boundary at the line element's own edge.
fn line_boundary(point: &Option<SelectionPoint>, index: usize) -> LineBoundary {
    match point {
        Some(SelectionPoint::Path(path)) if path.first() == Some(&index) => LineBoundary {
            offset: path.get(1).copied(),
            edge: path.len() == 1,
        },
        _ => LineBoundary {
            offset: None,
            edge: false,
        },
    }
}

fn prefix(paths: &mut SelectionPaths, index: usize) {
    for path in [&mut paths.start, &mut paths.end].into_iter().flatten() {
        path.insert(0, index);
    }
}

/// An element opened at the rightmost edge of the fragment under
/// construction. Its position in the parent is fixed at open time; it is
/// materialized into the parent when closed.
struct OpenElement {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<FragmentNode>,
    index_in_parent: usize,
}

struct LineWriter {
    roots: Vec<FragmentNode>,
    open: Vec<OpenElement>,
    /// Path and length of the most recently written text node, for
    /// resolving a caret at the end of the text.
    last_text: Option<(Vec<usize>, usize)>,
}

impl LineWriter {
    fn new() -> Self {
        LineWriter {
            roots: Vec::new(),
            open: Vec::new(),
            last_text: None,
        }
    }

    fn container(&mut self) -> &mut Vec<FragmentNode> {
        match self.open.last_mut() {
            Some(element) => &mut element.children,
            None => &mut self.roots,
        }
    }

    fn container_path(&self) -> Vec<usize> {
        self.open.iter().map(|e| e.index_in_parent).collect()
    }

    fn open_element(&mut self, tag: String, attributes: Vec<(String, String)>) {
        let index_in_parent = self.container().len();
        self.open.push(OpenElement {
            tag,
            attributes,
            children: Vec::new(),
            index_in_parent,
        });
    }

    /// Closes open elements down to `depth`, materializing each into its
    /// parent at the position recorded when it was opened.
    fn close_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            let Some(element) = self.open.pop() else {
                break;
            };
            self.container().push(FragmentNode::Element {
                tag: element.tag,
                attributes: element.attributes,
                children: element.children,
            });
        }
    }

    /// Writes one character into the innermost container, merging into an
    /// adjacent text node when possible. Returns the boundary path for a
    /// selection offset sitting just before this character.
    fn write_char(&mut self, c: char) -> Vec<usize> {
        let container_path = self.container_path();
        if c == '\n' {
            let index = self.container().len();
            self.container()
                .push(FragmentNode::element(LINE_BREAK_TAG, Vec::new()));
            self.last_text = None;
            let mut path = container_path;
            path.push(index);
            return path;
        }

        let children = self.container();
        let (index, offset) = match children.last_mut() {
            Some(FragmentNode::Text(text)) => {
                let offset = text.chars().count();
                text.push(c);
                (children.len() - 1, offset)
            }
            _ => {
                children.push(FragmentNode::Text(c.to_string()));
                (children.len() - 1, 0)
            }
        };

        let mut text_path = container_path;
        text_path.push(index);
        let mut boundary = text_path.clone();
        boundary.push(offset);
        self.last_text = Some((text_path, offset + 1));
        boundary
    }
}

/// Renders one line, producing the fragment children and selection paths
/// for the given character offsets.
fn render_line(
    record: &Record,
    start: Option<usize>,
    end: Option<usize>,
) -> (Vec<FragmentNode>, SelectionPaths) {
    let mut writer = LineWriter::new();
    let mut paths = SelectionPaths::default();
    let empty: FormatStack = Vec::new();

    for (i, c) in record.text.chars().enumerate() {
        let desired = record
            .formats
            .get(i)
            .and_then(|slot| slot.as_ref())
            .unwrap_or(&empty);

        // Reuse the open chain while the stack prefix matches (by kind;
        // the object flag is ignored here, as it is when matching against
        // a live last-child chain).
        let mut keep = 0;
        while keep < writer.open.len()
            && keep < desired.len()
            && writer.open[keep].tag == desired[keep].kind
        {
            keep += 1;
        }
        writer.close_to(keep);

        for format in &desired[keep..] {
            if format.object {
                let node =
                    FragmentNode::element(&format.kind, format.attributes.clone());
                writer.container().push(node);
            } else {
                writer.open_element(format.kind.clone(), format.attributes.clone());
            }
        }

        let boundary = writer.write_char(c);
        if start == Some(i) {
            paths.start = Some(boundary.clone());
        }
        if end == Some(i) {
            paths.end = Some(boundary);
        }
    }

    writer.close_to(0);

    // The trailing slot becomes a chain of fresh empty elements after the
    // last character.
    let mut trailing_innermost: Option<Vec<usize>> = None;
    if let Some(stack) = &record.trailing {
        if !stack.is_empty() {
            let mut node: Option<FragmentNode> = None;
            for format in stack.iter().rev() {
                let mut element =
                    FragmentNode::element(&format.kind, format.attributes.clone());
                if let (FragmentNode::Element { children, .. }, Some(inner)) =
                    (&mut element, node.take())
                {
                    children.push(inner);
                }
                node = Some(element);
            }
            let mut innermost = vec![writer.roots.len()];
            innermost.extend(std::iter::repeat_n(0, stack.len() - 1));
            trailing_innermost = Some(innermost);
            if let Some(node) = node {
                writer.roots.push(node);
            }
        }
    }

    // A caret at offset == text length was never crossed by the loop.
    let len = record.char_len();
    let end_of_text = || -> Vec<usize> {
        if let Some(innermost) = &trailing_innermost {
            let mut path = innermost.clone();
            path.push(0);
            path
        } else if let Some((text_path, text_len)) = &writer.last_text {
            let mut path = text_path.clone();
            path.push(*text_len);
            path
        } else {
            vec![writer.roots.len()]
        }
    };
    if start == Some(len) {
        paths.start = Some(end_of_text());
    }
    if end == Some(len) {
        paths.end = Some(end_of_text());
    }

    (writer.roots, paths)
}
