//! Metadata types for describing bindable record types
//!
//! Every record type that can be shown in a grid or form declares a static
//! slice of [`FieldMetadata`]. The binding engine reads it to build columns,
//! controls and baseline validators.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::metadata::{FieldMetadata, FieldUiMetadata, ValueKind};
//!
//! static AMOUNT: FieldMetadata = FieldMetadata {
//!     ui: Some(FieldUiMetadata {
//!         label: "Сумма",
//!         order: 3,
//!         editable: true,
//!         ..FieldUiMetadata::DEFAULT
//!     }),
//!     ..FieldMetadata::new("amount", ValueKind::Decimal)
//! };
//! ```

mod field_type;
mod types;
mod validation;

pub use field_type::{FieldType, ValueKind};
pub use types::{FieldMetadata, FieldUiMetadata};
pub use validation::ValidationRules;
