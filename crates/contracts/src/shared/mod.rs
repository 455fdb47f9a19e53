pub mod metadata;
pub mod validation_rules;
