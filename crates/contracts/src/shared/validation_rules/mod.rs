//! Context-dependent validation rules served by the rule repository
//!
//! A rule names a control by `targetName` and applies only while its
//! context (document subtype) is selected. The optional custom validation
//! grammar is parsed once into [`RuleKind`] when the rule is fetched.

mod kind;
mod rule;

pub use kind::{RuleKind, DEFAULT_DECIMAL_MIN, DEFAULT_DECIMAL_SCALE};
pub use rule::{ContextKey, ValidationRule};
