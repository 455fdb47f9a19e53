use serde::{Deserialize, Serialize};
use std::fmt;

use super::kind::RuleKind;

/// Document subtype identifier selecting the applicable rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextKey(pub i64);

impl ContextKey {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation rule as stored in the rule repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    pub id: i64,
    pub context_key: ContextKey,
    /// Name of the field/control the rule governs
    pub target_name: String,
    #[serde(default)]
    pub required: bool,
    /// Embedded JSON grammar, e.g. `{"type":"decimal_precision","min":0,"scale":2}`
    #[serde(default)]
    pub custom_validation_spec: Option<String>,
    #[serde(default)]
    pub error_message: String,
    #[serde(default = "default_show_in_form")]
    pub show_in_form: bool,
    #[serde(default)]
    pub default_disabled: bool,
}

fn default_show_in_form() -> bool {
    true
}

impl ValidationRule {
    /// Visible, enabled rule without predicate
    pub fn new(id: i64, context_key: ContextKey, target_name: impl Into<String>) -> Self {
        Self {
            id,
            context_key,
            target_name: target_name.into(),
            required: false,
            custom_validation_spec: None,
            error_message: String::new(),
            show_in_form: true,
            default_disabled: false,
        }
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.error_message = message.into();
        self
    }

    pub fn with_custom_spec(mut self, spec: impl Into<String>, message: impl Into<String>) -> Self {
        self.custom_validation_spec = Some(spec.into());
        self.error_message = message.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.show_in_form = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.default_disabled = true;
        self
    }

    /// Parse the rule into its predicate variant
    pub fn kind(&self) -> RuleKind {
        RuleKind::compile(self.required, self.custom_validation_spec.as_deref())
    }
}
