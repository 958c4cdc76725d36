use serde::{Deserialize, Serialize};

/// A named inline annotation covering a character range, or a zero-width
/// embedded object marker.
///
/// A `Format` corresponds to one element in the view tree: `kind` is the
/// element tag and `attributes` its attribute list in document order.
/// `object=true` marks a zero-width embedded atomic element (e.g. an inline
/// image) occupying a slot position rather than wrapping characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    /// Format identifier; equals the wrapping element's tag.
    pub kind: String,
    /// Attribute name/value pairs, order preserved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,
    /// True for a zero-width embedded element instead of a wrapped range.
    #[serde(default, skip_serializing_if = "is_false")]
    pub object: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Format {
    /// Creates a plain format with no attributes.
    pub fn new(kind: impl Into<String>) -> Self {
        Format {
            kind: kind.into(),
            attributes: Vec::new(),
            object: false,
        }
    }

    /// Creates a format carrying attributes in document order.
    pub fn with_attributes(
        kind: impl Into<String>,
        attributes: Vec<(String, String)>,
    ) -> Self {
        Format {
            kind: kind.into(),
            attributes,
            object: false,
        }
    }

    /// Looks up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Ordered list of formats enclosing one character, outermost first.
///
/// At most one format of a given `kind` may appear in a stack; applying a
/// format of an existing kind replaces it as the innermost entry.
pub type FormatStack = Vec<Format>;
