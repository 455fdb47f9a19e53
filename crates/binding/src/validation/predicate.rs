use contracts::shared::metadata::ValidationRules;
use contracts::shared::validation_rules::RuleKind;
use rust_decimal::Decimal;

use crate::record::FieldValue;

/// Compiled check evaluated against a target's current value
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Non-null; text must be non-blank after trimming
    Required,
    /// Decimal `>= min` with at most `scale` digits after the point
    DecimalPrecision { min: Decimal, scale: u32 },
    /// Static field rules from metadata
    Metadata {
        rules: ValidationRules,
        label: &'static str,
    },
    AlwaysValid,
}

impl Predicate {
    /// `None` for rules that attach no predicate
    pub fn from_rule_kind(kind: &RuleKind) -> Option<Self> {
        match kind {
            RuleKind::None => None,
            RuleKind::Required => Some(Self::Required),
            RuleKind::DecimalPrecision { min, scale } => Some(Self::DecimalPrecision {
                min: *min,
                scale: *scale,
            }),
            RuleKind::Unknown { .. } => Some(Self::AlwaysValid),
        }
    }

    pub fn test(&self, value: &FieldValue) -> bool {
        self.check(value).is_ok()
    }

    /// `Err(Some(message))` carries a message computed by the check itself,
    /// `Err(None)` defers to the condition's message.
    pub fn check(&self, value: &FieldValue) -> Result<(), Option<String>> {
        match self {
            Self::Required => {
                if value.is_blank() {
                    Err(None)
                } else {
                    Ok(())
                }
            }
            Self::DecimalPrecision { min, scale } => match value.to_decimal() {
                Some(number) if number >= *min && number.scale() <= *scale => Ok(()),
                _ => Err(None),
            },
            Self::Metadata { rules, label } => check_metadata(rules, label, value),
            Self::AlwaysValid => Ok(()),
        }
    }
}

fn check_metadata(
    rules: &ValidationRules,
    label: &str,
    value: &FieldValue,
) -> Result<(), Option<String>> {
    if value.is_blank() {
        return if rules.required { Err(None) } else { Ok(()) };
    }

    if let FieldValue::Text(text) = value {
        rules.validate_string(text, label).map_err(Some)?;
    }

    if rules.min.is_some() || rules.max.is_some() {
        let number = value.to_f64().ok_or(None)?;
        rules.validate_number(number, label).map_err(Some)?;
    }

    Ok(())
}
