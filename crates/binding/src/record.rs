//! Record type contract
//!
//! A bindable record exposes a statically declared field table: the field
//! metadata plus a typed getter and an optional direct setter per field.
//! Everything the engine does by field name goes through this table.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use chrono::NaiveDate;
use contracts::shared::metadata::{FieldMetadata, ValueKind};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::ConversionError;
use crate::picker_aggregate::AggregatePickerResult;

/// Record of another entity set referenced from a field
pub trait RelatedRecord: AggregatePickerResult + fmt::Debug {
    /// Invoke a named no-argument display accessor
    fn accessor(&self, name: &str) -> Option<String>;
}

pub type RecordRef = Rc<dyn RelatedRecord>;

/// Dynamically typed value of a single field
#[derive(Clone, Debug, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
    Record(RecordRef),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Null, or text that is empty after trimming
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Text(_) => Some(ValueKind::Text),
            Self::Integer(_) => Some(ValueKind::Integer),
            Self::Decimal(_) => Some(ValueKind::Decimal),
            Self::Boolean(_) => Some(ValueKind::Boolean),
            Self::Date(_) => Some(ValueKind::Date),
            Self::Record(_) => Some(ValueKind::Record),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordRef> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<RecordRef> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Numeric reading of the value; text is parsed after trimming
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Integer(v) => Some(Decimal::from(*v)),
            Self::Decimal(v) => Some(*v),
            Self::Text(s) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        }
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.to_decimal().and_then(|d| d.to_f64())
    }

    /// Text shown in a cell; null renders as the empty string
    pub fn display_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(s) => s.clone(),
            Self::Integer(v) => v.to_string(),
            Self::Decimal(v) => v.to_string(),
            Self::Boolean(v) => v.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Record(r) => r.display_name(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Boolean(_) => 1,
            Self::Integer(_) | Self::Decimal(_) => 2,
            Self::Date(_) => 3,
            Self::Text(_) => 4,
            Self::Record(_) => 5,
        }
    }

    /// Total ordering used for column sorting. Nulls sort first.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Record(a), Self::Record(b)) => a
                .display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase()),
            (a, b) if a.rank() == 2 && b.rank() == 2 => a.to_decimal().cmp(&b.to_decimal()),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a.id() == b.id(),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<RecordRef> for FieldValue {
    fn from(v: RecordRef) -> Self {
        Self::Record(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Convert typed text into a value of the given kind
///
/// Blank input converts to `Null` for every kind. Records never convert
/// from text, they are chosen through a reference picker.
pub fn parse_value(kind: ValueKind, raw: &str) -> Result<FieldValue, ConversionError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(FieldValue::Null);
    }

    let fail = |reason: String| ConversionError {
        kind,
        input: raw.to_string(),
        reason,
    };

    match kind {
        ValueKind::Text => Ok(FieldValue::Text(raw.to_string())),
        ValueKind::Integer => text
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|e| fail(e.to_string())),
        ValueKind::Decimal => Decimal::from_str(text)
            .map(FieldValue::Decimal)
            .map_err(|e| fail(e.to_string())),
        ValueKind::Boolean => match text.to_lowercase().as_str() {
            "true" | "1" | "да" => Ok(FieldValue::Boolean(true)),
            "false" | "0" | "нет" => Ok(FieldValue::Boolean(false)),
            _ => Err(fail("expected true/false".to_string())),
        },
        ValueKind::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(text, "%d.%m.%Y"))
            .map(FieldValue::Date)
            .map_err(|e| fail(e.to_string())),
        ValueKind::Record => Err(fail("records are selected through a picker".to_string())),
    }
}

/// Static binding of one record field: metadata plus typed access
pub struct FieldBinding<R> {
    pub meta: FieldMetadata,
    pub get: fn(&R) -> FieldValue,
    /// Direct assignment; `None` for computed fields
    pub set: Option<fn(&mut R, FieldValue)>,
}

impl<R> FieldBinding<R> {
    pub fn name(&self) -> &'static str {
        self.meta.name
    }

    pub fn is_writable(&self) -> bool {
        self.set.is_some()
    }
}

impl<R> fmt::Debug for FieldBinding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("meta", &self.meta)
            .field("writable", &self.set.is_some())
            .finish()
    }
}

/// Record type that can be bound to grids and forms
pub trait BindableRecord: Clone + 'static {
    /// Statically declared field table
    fn bindings() -> &'static [FieldBinding<Self>];

    /// Stable identity of a row
    fn row_id(&self) -> String;

    /// Zero-argument constructor; `None` when the type has none
    fn instantiate() -> Option<Self> {
        None
    }

    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Field table as seen from a concrete instance
    fn instance_bindings(&self) -> &'static [FieldBinding<Self>] {
        Self::bindings()
    }

    fn binding(name: &str) -> Option<&'static FieldBinding<Self>> {
        Self::bindings().iter().find(|b| b.meta.name == name)
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        Self::binding(name).map(|b| (b.get)(self))
    }
}
