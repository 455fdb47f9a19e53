//! Core metadata types for bindable records
//!
//! All types use 'static lifetimes for zero-cost compile-time constants.

use super::field_type::{FieldType, ValueKind};
use super::validation::ValidationRules;

/// Metadata for a single field
/// Copy trait enabled for efficient passing by value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMetadata {
    pub name: &'static str,
    pub value_kind: ValueKind,
    pub field_type: FieldType,
    /// Presentation metadata. Fields without it are never bound to a column.
    pub ui: Option<FieldUiMetadata>,
    pub validation: ValidationRules,

    /// Search service key for `AggregateRef` fields
    pub ref_aggregate: Option<&'static str>,
    /// No-argument accessor used to display a related record
    pub display_accessor: Option<&'static str>,
}

impl FieldMetadata {
    /// Plain primitive field without presentation metadata
    pub const fn new(name: &'static str, value_kind: ValueKind) -> Self {
        Self {
            name,
            value_kind,
            field_type: FieldType::Primitive,
            ui: None,
            validation: ValidationRules::none(),
            ref_aggregate: None,
            display_accessor: None,
        }
    }

    /// Field carries presentation metadata
    pub fn is_presented(&self) -> bool {
        self.ui.is_some()
    }

    pub fn is_reference_picker(&self) -> bool {
        self.field_type == FieldType::AggregateRef
    }
}

/// UI metadata for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldUiMetadata {
    pub label: &'static str,
    /// Columns are laid out by ascending order
    pub order: i32,
    pub editable: bool,
    /// Minimum column width in pixels
    pub column_width: Option<u32>,
}

impl FieldUiMetadata {
    pub const DEFAULT: Self = Self {
        label: "",
        order: 0,
        editable: false,
        column_width: None,
    };
}

impl Default for FieldUiMetadata {
    fn default() -> Self {
        Self::DEFAULT
    }
}
