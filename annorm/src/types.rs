use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

/// Table name to alias substitution applied when rendering fragments.
pub type AliasMap = HashMap<String, String>;

/// Structural description of a record type: its name, its own metadata text
/// and the metadata text of every declared field.
///
/// Emitted by `#[derive(Entity)]`, or assembled by hand for types that cannot
/// use the derive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub type_name: String,
    pub metadata: Option<String>,
    pub fields: Vec<FieldDeclaration>,
}

impl TypeDescriptor {
    pub fn new(type_name: impl Into<String>, metadata: Option<&str>) -> Self {
        Self {
            type_name: type_name.into(),
            metadata: metadata.map(str::to_string),
            fields: Vec::new(),
        }
    }

    /// Append an instance field.
    pub fn field(mut self, name: impl Into<String>, metadata: Option<&str>) -> Self {
        self.fields.push(FieldDeclaration::new(name, metadata, false));
        self
    }

    /// Append an instance field whose serialized key differs from its name,
    /// as with `#[serde(rename = "...")]`.
    pub fn renamed_field(mut self, name: impl Into<String>, key: impl Into<String>, metadata: Option<&str>) -> Self {
        self.fields.push(FieldDeclaration::new(name, metadata, false).with_key(key));
        self
    }

    /// Append a static field. Static fields are never mapped.
    pub fn static_field(mut self, name: impl Into<String>, metadata: Option<&str>) -> Self {
        self.fields.push(FieldDeclaration::new(name, metadata, true));
        self
    }
}

/// A single field declaration as seen by the mapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: String,
    /// Key the field serializes under; the name unless serde renames it.
    pub key: String,
    pub metadata: Option<String>,
    pub is_static: bool,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, metadata: Option<&str>, is_static: bool) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            metadata: metadata.map(str::to_string),
            is_static,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

/// Trait for record types that can be mapped to SQL assignments.
///
/// This trait is automatically implemented by `#[derive(Entity)]`, which
/// reads the struct's and fields' doc comments as metadata.
pub trait Entity: Serialize {
    fn type_descriptor() -> TypeDescriptor;
}

/// Built-in scalar type tags accepted by the `@type` annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Integer,
    String,
}

impl TypeTag {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "integer" => Some(TypeTag::Integer),
            "string" => Some(TypeTag::String),
            _ => None,
        }
    }

    /// Registry name of the serializer implementing this tag.
    pub fn serializer_name(self) -> &'static str {
        match self {
            TypeTag::Integer => "integer",
            TypeTag::String => "string",
        }
    }
}

/// Resolved mapping of one field to its column, table, serializer and key status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub field: String,
    pub table: Option<String>,
    pub column: String,
    pub serializer: String,
    pub primary_key: bool,
}

/// Which mapped fields take part in an assignment fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldSelector {
    AllFields,
    PrimaryKeyOnly,
    #[default]
    AllExceptPrimaryKey,
    /// Fields whose column name or field identifier is listed, regardless of
    /// primary-key status.
    Explicit(BTreeSet<String>),
}

impl FieldSelector {
    pub fn explicit<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldSelector::Explicit(names.into_iter().map(Into::into).collect())
    }

    pub fn includes(&self, field: &str, column: &str, primary_key: bool) -> bool {
        match self {
            FieldSelector::AllFields => true,
            FieldSelector::PrimaryKeyOnly => primary_key,
            FieldSelector::AllExceptPrimaryKey => !primary_key,
            FieldSelector::Explicit(names) => names.contains(column) || names.contains(field),
        }
    }
}
