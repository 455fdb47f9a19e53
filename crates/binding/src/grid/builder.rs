use tracing::{debug, warn};

use super::column::{CellKind, ColumnDef};
use super::Grid;
use crate::config::EngineConfig;
use crate::error::GridBuildError;
use crate::metadata_reader::{describe_bindings, FieldDescriptor};
use crate::picker_aggregate::SearchServiceRegistry;
use crate::record::{BindableRecord, FieldBinding};

/// Builds grids from record field tables
pub struct GridBuilder<'a> {
    services: &'a SearchServiceRegistry,
    config: &'a EngineConfig,
}

impl<'a> GridBuilder<'a> {
    pub fn new(services: &'a SearchServiceRegistry, config: &'a EngineConfig) -> Self {
        Self { services, config }
    }

    /// Build a grid over `rows`
    ///
    /// With no rows a placeholder instance is constructed only to read the
    /// column set; it never becomes a grid row.
    pub fn build<R: BindableRecord>(&self, rows: Vec<R>) -> Result<Grid<R>, GridBuildError> {
        let bindings = match rows.first() {
            Some(first) => first.instance_bindings(),
            None => {
                let placeholder = R::instantiate().ok_or(GridBuildError::NotInstantiable {
                    type_name: R::type_name(),
                })?;
                placeholder.instance_bindings()
            }
        };

        let columns: Vec<ColumnDef<R>> = describe_bindings(bindings)
            .into_iter()
            .map(|(descriptor, binding)| self.build_column(descriptor, binding))
            .collect();

        debug!(
            record = R::type_name(),
            columns = columns.len(),
            rows = rows.len(),
            "grid built"
        );

        Ok(Grid::new(columns, rows, self.config))
    }

    fn build_column<R: BindableRecord>(
        &self,
        descriptor: FieldDescriptor,
        binding: &'static FieldBinding<R>,
    ) -> ColumnDef<R> {
        let editable = descriptor.editable && binding.is_writable();
        if descriptor.editable && !binding.is_writable() {
            warn!(
                field = descriptor.name,
                "field marked editable has no setter, column is read-only"
            );
        }

        let kind = if descriptor.is_reference_picker {
            self.picker_kind(&descriptor, editable)
        } else if descriptor.is_related_record() {
            CellKind::Related {
                accessor: descriptor.nested_display_accessor,
            }
        } else {
            CellKind::Plain { editable }
        };

        debug!(field = descriptor.name, kind = kind.as_str(), "column built");

        ColumnDef {
            min_width: descriptor.width.unwrap_or(self.config.grid.default_min_width),
            descriptor,
            kind,
            binding,
        }
    }

    fn picker_kind(&self, descriptor: &FieldDescriptor, editable: bool) -> CellKind {
        let resolved = descriptor
            .reference_service_key
            .and_then(|key| self.services.resolve(key).map(|service| (key, service)));

        match resolved {
            Some((service_key, service)) => CellKind::Picker {
                service_key,
                min_search_length: service
                    .min_search_length()
                    .unwrap_or(self.config.picker.default_min_search_length),
                service,
                editable,
            },
            None => {
                warn!(
                    field = descriptor.name,
                    service = ?descriptor.reference_service_key,
                    "reference search service is not registered, column degrades to read-only"
                );
                CellKind::ReadOnly
            }
        }
    }
}
