//! End-to-end round trips: records rendered into a live tree and read
//! back through the converter, selection mapping across both directions,
//! and serde stability of the model types.

use pretty_assertions::assert_eq;
use rstest::rstest;

use richtext_record_engine::tree::memory::{MemTree, NodeId};
use richtext_record_engine::{
    apply, create_record, create_with_selection, to_html, Format, Record,
    RecordWithSelection, Selection, SelectionPoint, Settings, ViewTree,
};

fn root(tree: &mut MemTree) -> NodeId {
    tree.create_element("p", &[])
}

fn object_format(kind: &str, attributes: Vec<(String, String)>) -> Format {
    let mut format = Format::with_attributes(kind, attributes);
    format.object = true;
    format
}

#[rstest]
#[case::plain(Record::from_text("hello"))]
#[case::multibyte(Record::from_text("héllo").apply_format(&Format::new("em"), 1, 2))]
#[case::nested(
    Record::from_text("abc")
        .apply_format(&Format::new("em"), 1, 3)
        .apply_format(&Format::new("strong"), 2, 3)
)]
#[case::line_break(Record::from_text("a\nb"))]
#[case::attributes(Record::from_text("x").apply_format(
    &Format::with_attributes("a", vec![("href".to_string(), "/y".to_string())]),
    0,
    1,
))]
#[case::object({
    let mut record = Record::from_text("ab");
    record.formats[1] = Some(vec![object_format(
        "img",
        vec![("src".to_string(), "i.png".to_string())],
    )]);
    record
})]
fn rendered_records_convert_back_unchanged(#[case] record: Record) {
    let mut tree = MemTree::new();
    let p = root(&mut tree);
    let value = RecordWithSelection::line(record.clone(), Selection::none());
    apply(&mut tree, &value, &p, None);

    let back = create_record(&tree, Some(&p), None, &Settings::default());
    assert_eq!(back.value.as_line().unwrap(), &record);
}

#[test]
fn object_trailing_stacks_round_trip_unchanged() {
    let mut tree = MemTree::new();
    let p = root(&mut tree);
    let mut record = Record::from_text("a");
    record.trailing = Some(vec![object_format("em", Vec::new())]);
    apply(
        &mut tree,
        &RecordWithSelection::line(record.clone(), Selection::none()),
        &p,
        None,
    );

    let back = create_record(&tree, Some(&p), None, &Settings::default());
    assert_eq!(back.value.as_line().unwrap(), &record);
}

// A trailing stack renders as childless elements, and childless elements
// convert back as objects. The flag is normalized, everything else
// survives.
#[test]
fn trailing_formats_read_back_as_objects() {
    let mut tree = MemTree::new();
    let p = root(&mut tree);
    let mut record = Record::from_text("a");
    record.trailing = Some(vec![Format::new("em")]);
    apply(
        &mut tree,
        &RecordWithSelection::line(record, Selection::none()),
        &p,
        None,
    );

    let back = create_record(&tree, Some(&p), None, &Settings::default());
    let back = back.value.as_line().unwrap();
    assert_eq!(back.text, "a");
    let trailing = back.trailing.as_ref().unwrap();
    assert_eq!(trailing.len(), 1);
    assert_eq!(trailing[0].kind, "em");
    assert!(trailing[0].object);
}

#[test]
fn selection_offsets_survive_the_tree() {
    let mut tree = MemTree::new();
    let p = root(&mut tree);
    let record = Record::from_text("hello").apply_format(&Format::new("em"), 2, 5);
    apply(
        &mut tree,
        &RecordWithSelection::line(record, Selection::range(1, 4)),
        &p,
        None,
    );

    let range = tree.selection_boundaries().unwrap();
    let back = create_record(&tree, Some(&p), Some(&range), &Settings::default());
    assert_eq!(back.selection, Selection::range(1, 4));
}

#[test]
fn caret_at_text_end_survives_the_tree() {
    let mut tree = MemTree::new();
    let p = root(&mut tree);
    apply(
        &mut tree,
        &RecordWithSelection::line(Record::from_text("hello"), Selection::collapsed(5)),
        &p,
        None,
    );

    let range = tree.selection_boundaries().unwrap();
    let back = create_record(&tree, Some(&p), Some(&range), &Settings::default());
    assert_eq!(back.selection, Selection::collapsed(5));
}

#[test]
fn caret_placeholder_is_filtered_back_out() {
    let mut tree = MemTree::new();
    let p = root(&mut tree);
    apply(
        &mut tree,
        &RecordWithSelection::line(Record::from_text("hello"), Selection::collapsed(0)),
        &p,
        None,
    );

    let strip = |raw: &str, _: Option<&mut Selection>| raw.replace('\u{FEFF}', "");
    let settings = Settings {
        filter_string: Some(&strip),
        ..Settings::default()
    };
    let range = tree.selection_boundaries().unwrap();
    let back = create_record(&tree, Some(&p), Some(&range), &settings);
    assert_eq!(back.value.as_line().unwrap().text, "hello");
    assert_eq!(back.selection, Selection::collapsed(0));
}

#[test]
fn multiline_values_round_trip_with_line_paths() {
    let mut tree = MemTree::new();
    let ul = tree.create_element("ul", &[]);
    let lines = vec![
        Record::from_text("one"),
        Record::from_text("two").apply_format(&Format::new("em"), 0, 3),
    ];
    let selection = Selection {
        start: Some(SelectionPoint::Path(vec![1, 1])),
        end: Some(SelectionPoint::Path(vec![1, 2])),
    };
    apply(
        &mut tree,
        &RecordWithSelection::multiline(lines.clone(), selection.clone()),
        &ul,
        Some("li"),
    );

    let range = tree.selection_boundaries().unwrap();
    let back = create_with_selection(
        &tree,
        Some(&ul),
        Some(&range),
        Some("li"),
        &Settings::default(),
    );
    assert_eq!(back.value.as_lines().unwrap(), lines.as_slice());
    assert_eq!(back.selection, selection);
}

#[test]
fn unchanged_leading_text_keeps_its_node_across_applies() {
    let mut tree = MemTree::new();
    let p = root(&mut tree);
    let before = Record::from_text("abcd").apply_format(&Format::new("em"), 2, 4);
    let after = Record::from_text("abcd").apply_format(&Format::new("em"), 2, 3);

    apply(
        &mut tree,
        &RecordWithSelection::line(before, Selection::none()),
        &p,
        None,
    );
    let first = tree.children_of(&p)[0];

    apply(
        &mut tree,
        &RecordWithSelection::line(after, Selection::none()),
        &p,
        None,
    );
    assert_eq!(tree.children_of(&p)[0], first);
    assert_eq!(tree.markup(p), "<p>ab<em>c</em>d</p>");
}

#[test]
fn converted_markup_serializes_back_to_itself() {
    let mut tree = MemTree::new();
    let p = root(&mut tree);
    let em = tree.create_element("em", &[]);
    let a = tree.create_text("a");
    let b = tree.create_text("b");
    tree.append_child(&p, &em);
    tree.append_child(&em, &a);
    tree.append_child(&p, &b);

    let content = richtext_record_engine::create(
        &tree,
        Some(&p),
        None,
        &Settings::default(),
    );
    assert_eq!(to_html(&content, None), "<em>a</em>b");
}

#[test]
fn values_round_trip_through_json() {
    let mut record = Record::from_text("ab").apply_format(&Format::new("em"), 0, 1);
    record.trailing = Some(vec![Format::new("strong")]);
    let value = RecordWithSelection::line(record, Selection::range(0, 2));

    let json = serde_json::to_string(&value).unwrap();
    let back: RecordWithSelection = serde_json::from_str(&json).unwrap();
    assert_eq!(back, value);
}

#[test]
fn empty_format_fields_are_omitted_from_json() {
    let json = serde_json::to_string(&Format::new("em")).unwrap();
    assert_eq!(json, r#"{"kind":"em"}"#);
}
