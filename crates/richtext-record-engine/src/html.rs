//! HTML serialization of records.
//!
//! Goes through the renderer so the markup is exactly what the
//! reconciler would build in a live tree, then writes it out with
//! escaped text and attribute values.

use crate::model::{Content, RecordWithSelection, Selection};
use crate::render::{to_tree, FragmentNode};

/// Tags serialized without a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Serializes content to an HTML string. Multiline content wraps each
/// line in `multiline_tag`.
pub fn to_html(value: &Content, multiline_tag: Option<&str>) -> String {
    let rendered = to_tree(
        &RecordWithSelection::new(value.clone(), Selection::none()),
        multiline_tag,
        None,
    );
    let mut out = String::new();
    for node in &rendered.children {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &FragmentNode) {
    match node {
        FragmentNode::Text(text) => {
            out.push_str(&html_escape::encode_text(text));
        }
        FragmentNode::Element {
            tag,
            attributes,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(value));
                out.push('"');
            }
            out.push('>');
            if VOID_TAGS.contains(&tag.as_str()) {
                return;
            }
            for child in children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}
