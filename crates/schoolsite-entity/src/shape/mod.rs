//! Shape descriptors for entity-specific fields.
//!
//! A [`Shape`] names the fields an ordered item or a section payload is
//! expected to carry and how each one is normalized before it is written.

pub mod normalize;

use serde::Serialize;

pub use normalize::coerce_number;

/// What a single field holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "shape", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text.
    Text,
    /// A floating point number. Unparseable input is stored as `0`.
    Number,
    /// A boolean switch.
    Flag,
    /// A list of strings (e.g. names of board members).
    TextList,
    /// A nested record.
    Record(Shape),
    /// A list of records with the same shape (e.g. tuition rows).
    Table(Shape),
}

/// One named field of a shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    /// JSON key.
    pub name: String,
    /// Value kind.
    pub kind: FieldKind,
    /// Whether an empty value is rejected.
    pub required: bool,
}

impl FieldSpec {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: false,
        }
    }

    /// A free text field.
    pub fn text(name: &str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// A numeric field.
    pub fn number(name: &str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// A boolean field.
    pub fn flag(name: &str) -> Self {
        Self::new(name, FieldKind::Flag)
    }

    /// A list-of-strings field.
    pub fn text_list(name: &str) -> Self {
        Self::new(name, FieldKind::TextList)
    }

    /// A nested record field.
    pub fn record(name: &str, shape: Shape) -> Self {
        Self::new(name, FieldKind::Record(shape))
    }

    /// A list-of-records field.
    pub fn table(name: &str, shape: Shape) -> Self {
        Self::new(name, FieldKind::Table(shape))
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// The ordered set of fields an entity carries.
///
/// Keys that the shape does not name are kept as they are.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Shape {
    /// Field descriptors.
    pub fields: Vec<FieldSpec>,
}

impl Shape {
    /// Create a shape from field descriptors.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }
}
