use contracts::shared::metadata::ValueKind;
use contracts::shared::validation_rules::ContextKey;
use thiserror::Error;

/// Text typed into a cell does not convert to the field's value type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {input:?} to {}: {reason}", .kind.as_str())]
pub struct ConversionError {
    pub kind: ValueKind,
    pub input: String,
    pub reason: String,
}

/// Grid could not derive its column set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridBuildError {
    #[error("type `{type_name}` is not instantiable for empty-state column derivation")]
    NotInstantiable { type_name: &'static str },
}

/// A rule names a target that no owner in the chain exposes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation rule {rule_id} targets `{target_name}`, which no owner in the chain exposes")]
pub struct ValidationWiringError {
    pub target_name: String,
    pub rule_id: i64,
}

/// Ошибки применения правил валидации
#[derive(Debug, Error)]
pub enum RuleEngineError {
    #[error(transparent)]
    Wiring(#[from] ValidationWiringError),

    #[error("rule repository failed for context {context_key}: {source}")]
    Repository {
        context_key: ContextKey,
        #[source]
        source: anyhow::Error,
    },
}

/// Ошибки операций над гридом
#[derive(Debug, Error)]
pub enum GridError {
    #[error("row {index} is out of range (rows: {len})")]
    RowOutOfRange { index: usize, len: usize },

    #[error("grid has no column `{0}`")]
    UnknownColumn(String),

    #[error("column `{0}` is not editable")]
    NotEditable(String),

    #[error("row `{0}` is no longer in the grid")]
    RowNotFound(String),

    /// Persistence callback failure, carried unchanged
    #[error(transparent)]
    Persistence(#[from] anyhow::Error),
}
