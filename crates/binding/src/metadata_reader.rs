//! Field metadata reader
//!
//! Turns the static field table of a record type into an ordered list of
//! descriptors. Descriptors are derived on every call and never cached.

use contracts::shared::metadata::{FieldMetadata, FieldType, ValueKind};

use crate::record::{BindableRecord, FieldBinding};

/// How one field is rendered and edited
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub display_label: &'static str,
    pub order: i32,
    pub editable: bool,
    pub width: Option<u32>,
    pub is_reference_picker: bool,
    pub reference_service_key: Option<&'static str>,
    pub nested_display_accessor: Option<&'static str>,
    pub required: bool,
    pub value_kind: ValueKind,
    pub field_type: FieldType,
}

impl FieldDescriptor {
    /// `None` for fields without presentation metadata
    pub fn from_metadata(meta: &FieldMetadata) -> Option<Self> {
        let ui = meta.ui?;
        let display_label = if ui.label.is_empty() { meta.name } else { ui.label };

        Some(Self {
            name: meta.name,
            display_label,
            order: ui.order,
            editable: ui.editable,
            width: ui.column_width,
            is_reference_picker: meta.is_reference_picker(),
            reference_service_key: meta.ref_aggregate,
            nested_display_accessor: meta.display_accessor,
            required: meta.validation.required,
            value_kind: meta.value_kind,
            field_type: meta.field_type,
        })
    }

    /// Field value is a record of the application's own family
    pub fn is_related_record(&self) -> bool {
        !self.is_reference_picker
            && (self.field_type == FieldType::NestedStruct || self.value_kind == ValueKind::Record)
    }
}

/// Ordered descriptors of a record type
pub fn describe<R: BindableRecord>() -> Vec<FieldDescriptor> {
    describe_fields(R::bindings().iter().map(|b| &b.meta))
}

/// Ordered descriptors read off a concrete instance
pub fn describe_instance<R: BindableRecord>(record: &R) -> Vec<FieldDescriptor> {
    describe_fields(record.instance_bindings().iter().map(|b| &b.meta))
}

/// Descriptors sorted by ascending order; ties keep declaration order
pub fn describe_fields<'a>(
    fields: impl IntoIterator<Item = &'a FieldMetadata>,
) -> Vec<FieldDescriptor> {
    let mut descriptors: Vec<FieldDescriptor> = fields
        .into_iter()
        .filter_map(FieldDescriptor::from_metadata)
        .collect();
    descriptors.sort_by_key(|d| d.order);
    descriptors
}

/// Descriptors paired with their bindings, in column order
pub(crate) fn describe_bindings<R>(
    bindings: &'static [FieldBinding<R>],
) -> Vec<(FieldDescriptor, &'static FieldBinding<R>)> {
    let mut pairs: Vec<(FieldDescriptor, &'static FieldBinding<R>)> = bindings
        .iter()
        .filter_map(|b| FieldDescriptor::from_metadata(&b.meta).map(|d| (d, b)))
        .collect();
    pairs.sort_by_key(|(d, _)| d.order);
    pairs
}
