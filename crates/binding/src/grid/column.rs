use std::fmt;
use std::rc::Rc;

use crate::metadata_reader::FieldDescriptor;
use crate::picker_aggregate::{ReferencePicker, ReferenceSearchService};
use crate::record::{FieldBinding, FieldValue};

/// How a column renders and edits its cells
#[derive(Clone)]
pub enum CellKind {
    /// Text cell; editable cells go through the commit pipeline
    Plain { editable: bool },
    /// Related record shown through its display accessor
    Related { accessor: Option<&'static str> },
    /// Searchable picker bound to a reference search service
    Picker {
        service_key: &'static str,
        service: Rc<dyn ReferenceSearchService>,
        min_search_length: usize,
        editable: bool,
    },
    /// Picker whose service could not be resolved
    ReadOnly,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain { .. } => "plain",
            Self::Related { .. } => "related",
            Self::Picker { .. } => "picker",
            Self::ReadOnly => "read_only",
        }
    }
}

impl fmt::Debug for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain { editable } => f
                .debug_struct("Plain")
                .field("editable", editable)
                .finish(),
            Self::Related { accessor } => f
                .debug_struct("Related")
                .field("accessor", accessor)
                .finish(),
            Self::Picker {
                service_key,
                min_search_length,
                editable,
                ..
            } => f
                .debug_struct("Picker")
                .field("service_key", service_key)
                .field("min_search_length", min_search_length)
                .field("editable", editable)
                .finish(),
            Self::ReadOnly => f.write_str("ReadOnly"),
        }
    }
}

/// Renderable column of a grid
pub struct ColumnDef<R: 'static> {
    pub descriptor: FieldDescriptor,
    pub kind: CellKind,
    /// Minimum width; content may widen the column
    pub min_width: u32,
    pub(crate) binding: &'static FieldBinding<R>,
}

impl<R: 'static> ColumnDef<R> {
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn header(&self) -> &'static str {
        self.descriptor.display_label
    }

    pub fn is_text_editable(&self) -> bool {
        matches!(self.kind, CellKind::Plain { editable: true })
    }

    pub fn is_picker_editable(&self) -> bool {
        matches!(self.kind, CellKind::Picker { editable: true, .. })
    }

    pub fn value(&self, row: &R) -> FieldValue {
        (self.binding.get)(row)
    }

    /// Text shown in the cell
    pub fn cell_text(&self, row: &R) -> String {
        let value = self.value(row);
        match (&self.kind, &value) {
            (CellKind::Related { accessor: Some(name) }, FieldValue::Record(record)) => {
                record.accessor(name).unwrap_or_default()
            }
            _ => value.display_string(),
        }
    }

    /// Picker adapter seeded with the cell's current value
    pub fn open_picker(&self, row: &R) -> Option<ReferencePicker> {
        let CellKind::Picker {
            service_key,
            service,
            min_search_length,
            ..
        } = &self.kind
        else {
            return None;
        };

        let mut picker = ReferencePicker::new(*service_key, Rc::clone(service), *min_search_length);
        picker.set_value(self.value(row).into_record());
        Some(picker)
    }
}

impl<R: 'static> fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("name", &self.descriptor.name)
            .field("kind", &self.kind)
            .field("min_width", &self.min_width)
            .finish()
    }
}
