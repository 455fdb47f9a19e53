//! Field type enumeration for metadata system

/// Category of field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Primitive,    // String, i64, Decimal, bool, NaiveDate
    AggregateRef, // Record from another entity set, edited through a picker
    NestedStruct, // Related record of the application's own family, read-only
}

/// Declared value type of a field, drives text conversion on edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    #[default]
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    Record,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Record => "record",
        }
    }
}
