//! Metadata-driven grid binding and validation rule engine
//!
//! Record types declare a static field table ([`record::BindableRecord`]).
//! From it the engine derives field descriptors, builds grids with typed
//! editable columns, commits inline edits, dispatches row actions and wires
//! context-dependent validation rules onto form targets.

pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod metadata_reader;
pub mod picker_aggregate;
pub mod record;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::EngineConfig;
pub use error::{
    ConversionError, GridBuildError, GridError, RuleEngineError, ValidationWiringError,
};
pub use grid::{
    CellKind, CellState, ColumnDef, CommitOutcome, Grid, GridBuilder, RowActionDispatcher, RowList,
};
pub use metadata_reader::{describe, FieldDescriptor};
pub use picker_aggregate::{ReferencePicker, ReferenceSearchService, SearchServiceRegistry};
pub use record::{BindableRecord, FieldBinding, FieldValue, RecordRef, RelatedRecord};
pub use validation::{
    attach_metadata_rules, targets_for_record, FormTargets, OwnerChain, RuleRepository,
    TargetHandle, Validatable, ValidationRuleEngine,
};
