use rust_decimal::Decimal;
use serde::Deserialize;

/// Lower bound used when a decimal precision spec omits `min`
pub const DEFAULT_DECIMAL_MIN: Decimal = Decimal::ZERO;
/// Scale used when a decimal precision spec omits `scale`
pub const DEFAULT_DECIMAL_SCALE: u32 = 2;

/// Predicate variant a rule compiles to
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Rule only drives visibility/enabled state
    None,
    /// Value must be present and, for text, non-blank
    Required,
    /// Value must parse as a decimal `>= min` with at most `scale` fraction digits
    DecimalPrecision { min: Decimal, scale: u32 },
    /// Custom spec of an unrecognized shape, never fails
    Unknown { spec: String },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum CustomSpec {
    DecimalPrecision {
        #[serde(default)]
        min: Option<Decimal>,
        #[serde(default)]
        scale: Option<u32>,
    },
}

impl RuleKind {
    /// A present custom spec takes precedence over the `required` flag.
    pub fn compile(required: bool, custom_spec: Option<&str>) -> Self {
        match custom_spec.map(str::trim).filter(|s| !s.is_empty()) {
            Some(spec) => Self::parse_custom(spec),
            None if required => Self::Required,
            None => Self::None,
        }
    }

    pub fn parse_custom(spec: &str) -> Self {
        match serde_json::from_str::<CustomSpec>(spec) {
            Ok(CustomSpec::DecimalPrecision { min, scale }) => Self::DecimalPrecision {
                min: min.unwrap_or(DEFAULT_DECIMAL_MIN),
                scale: scale.unwrap_or(DEFAULT_DECIMAL_SCALE),
            },
            Err(_) => Self::Unknown {
                spec: spec.to_string(),
            },
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Required => "required",
            Self::DecimalPrecision { .. } => "decimal_precision",
            Self::Unknown { .. } => "unknown",
        }
    }
}
