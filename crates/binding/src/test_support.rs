//! Shared fixtures for unit tests

use std::cell::Cell;
use std::rc::Rc;

use anyhow::anyhow;
use chrono::NaiveDate;
use contracts::shared::metadata::{
    FieldMetadata, FieldType, FieldUiMetadata, ValidationRules, ValueKind,
};
use contracts::shared::validation_rules::{ContextKey, ValidationRule};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::{default_config, EngineConfig};
use crate::grid::{Grid, GridBuilder};
use crate::picker_aggregate::{
    AggregatePickerResult, ReferenceSearchService, SearchServiceRegistry,
};
use crate::record::{BindableRecord, FieldBinding, FieldValue, RecordRef, RelatedRecord};
use crate::validation::RuleRepository;

pub fn init() {
    crate::logging::init_logging("info");
}

pub fn config() -> EngineConfig {
    default_config().clone()
}

pub fn registry() -> SearchServiceRegistry {
    SearchServiceRegistry::new().with("customers", Rc::new(CustomerSearch::sample()))
}

// ---------------------------------------------------------------------------
// Related records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub inn: String,
}

impl Customer {
    pub fn new(id: &str, name: &str, inn: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            full_name: name.to_string(),
            inn: inn.to_string(),
        }
    }

    pub fn with_full_name(mut self, full_name: &str) -> Self {
        self.full_name = full_name.to_string();
        self
    }
}

impl AggregatePickerResult for Customer {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl RelatedRecord for Customer {
    fn accessor(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "full_name" => Some(self.full_name.clone()),
            "inn" => Some(self.inn.clone()),
            _ => None,
        }
    }
}

pub fn customer() -> RecordRef {
    Rc::new(Customer::new("c-1", "Рога и копыта", "7701234567"))
}

#[derive(Debug, Clone)]
pub struct Bank {
    pub id: String,
    pub name: String,
    pub bic: Option<String>,
}

impl Bank {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            bic: Some("044525225".to_string()),
        }
    }

    pub fn without_bic(mut self) -> Self {
        self.bic = None;
        self
    }
}

impl AggregatePickerResult for Bank {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl RelatedRecord for Bank {
    fn accessor(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "bic" => self.bic.clone(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Search services
// ---------------------------------------------------------------------------

pub struct CustomerSearch {
    customers: Vec<Customer>,
    min_length: Option<usize>,
    calls: Cell<usize>,
}

impl CustomerSearch {
    pub fn sample() -> Self {
        Self {
            customers: vec![
                Customer::new("c-1", "Рога и копыта", "7701234567")
                    .with_full_name("ООО «Рога и копыта»"),
                Customer::new("c-2", "Вектор", "7702345678").with_full_name("ООО «Вектор»"),
                Customer::new("c-3", "Иванов И.И.", "771234567890")
                    .with_full_name("ИП Иванов Иван Иванович"),
            ],
            min_length: None,
            calls: Cell::new(0),
        }
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ReferenceSearchService for CustomerSearch {
    fn search(&self, partial_text: &str) -> anyhow::Result<Vec<RecordRef>> {
        self.calls.set(self.calls.get() + 1);
        let needle = partial_text.to_lowercase();
        Ok(self
            .customers
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.full_name.to_lowercase().contains(&needle)
            })
            .map(|c| Rc::new(c.clone()) as RecordRef)
            .collect())
    }

    fn min_search_length(&self) -> Option<usize> {
        self.min_length
    }
}

pub struct FailingSearch;

impl ReferenceSearchService for FailingSearch {
    fn search(&self, _partial_text: &str) -> anyhow::Result<Vec<RecordRef>> {
        Err(anyhow!("справочник банков недоступен"))
    }
}

/// Fails the first `failures` searches, then answers like [`CustomerSearch`]
pub struct FlakySearch {
    inner: CustomerSearch,
    failures: usize,
}

impl FlakySearch {
    pub fn new(failures: usize) -> Self {
        Self {
            inner: CustomerSearch::sample(),
            failures,
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }
}

impl ReferenceSearchService for FlakySearch {
    fn search(&self, partial_text: &str) -> anyhow::Result<Vec<RecordRef>> {
        if self.inner.calls() < self.failures {
            self.inner.calls.set(self.inner.calls() + 1);
            return Err(anyhow!("timeout"));
        }
        self.inner.search(partial_text)
    }
}

// ---------------------------------------------------------------------------
// Rule repository
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryRules {
    rules: Vec<ValidationRule>,
    fail: bool,
    calls: Cell<usize>,
}

impl InMemoryRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl RuleRepository for InMemoryRules {
    fn rules_for_context(&self, context_key: ContextKey) -> anyhow::Result<Vec<ValidationRule>> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(anyhow!("rule storage is offline"));
        }
        Ok(self
            .rules
            .iter()
            .filter(|r| r.context_key == context_key)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Bindable records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InvoiceLine {
    pub id: String,
    pub description: String,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
    pub customer: Option<RecordRef>,
    pub bank: Option<Bank>,
    pub note: String,
    pub issued_on: Option<NaiveDate>,
    pub comment: String,
}

impl InvoiceLine {
    pub fn amount(&self) -> Option<Decimal> {
        Some(self.price? * Decimal::from(self.quantity?))
    }
}

const fn ui(label: &'static str, order: i32, editable: bool) -> Option<FieldUiMetadata> {
    Some(FieldUiMetadata {
        label,
        order,
        editable,
        ..FieldUiMetadata::DEFAULT
    })
}

static INVOICE_LINE_FIELDS: [FieldBinding<InvoiceLine>; 10] = [
    FieldBinding {
        meta: FieldMetadata::new("id", ValueKind::Text),
        get: |r: &InvoiceLine| FieldValue::from(r.id.clone()),
        set: None,
    },
    FieldBinding {
        meta: FieldMetadata {
            ui: ui("Наименование", 1, true),
            validation: ValidationRules::required(),
            ..FieldMetadata::new("description", ValueKind::Text)
        },
        get: |r: &InvoiceLine| FieldValue::from(r.description.clone()),
        set: Some(|r: &mut InvoiceLine, v: FieldValue| {
            r.description = v.into_text().unwrap_or_default()
        }),
    },
    FieldBinding {
        meta: FieldMetadata {
            ui: ui("Количество", 2, true),
            validation: ValidationRules {
                min: Some(1.0),
                ..ValidationRules::none()
            },
            ..FieldMetadata::new("quantity", ValueKind::Integer)
        },
        get: |r: &InvoiceLine| FieldValue::from(r.quantity),
        set: Some(|r: &mut InvoiceLine, v: FieldValue| r.quantity = v.as_integer()),
    },
    FieldBinding {
        meta: FieldMetadata {
            ui: Some(FieldUiMetadata {
                label: "Цена",
                order: 3,
                editable: true,
                column_width: Some(120),
                ..FieldUiMetadata::DEFAULT
            }),
            ..FieldMetadata::new("price", ValueKind::Decimal)
        },
        get: |r: &InvoiceLine| FieldValue::from(r.price),
        set: Some(|r: &mut InvoiceLine, v: FieldValue| r.price = v.as_decimal()),
    },
    FieldBinding {
        meta: FieldMetadata {
            field_type: FieldType::AggregateRef,
            ui: ui("Контрагент", 4, true),
            validation: ValidationRules::required(),
            ref_aggregate: Some("customers"),
            ..FieldMetadata::new("customer", ValueKind::Record)
        },
        get: |r: &InvoiceLine| FieldValue::from(r.customer.clone()),
        set: Some(|r: &mut InvoiceLine, v: FieldValue| r.customer = v.into_record()),
    },
    FieldBinding {
        meta: FieldMetadata {
            field_type: FieldType::NestedStruct,
            ui: ui("Банк", 5, false),
            display_accessor: Some("bic"),
            ..FieldMetadata::new("bank", ValueKind::Record)
        },
        get: |r: &InvoiceLine| match &r.bank {
            Some(bank) => FieldValue::Record(Rc::new(bank.clone())),
            None => FieldValue::Null,
        },
        set: None,
    },
    FieldBinding {
        meta: FieldMetadata {
            ui: ui("", 6, true),
            ..FieldMetadata::new("note", ValueKind::Text)
        },
        get: |r: &InvoiceLine| FieldValue::from(r.note.clone()),
        set: Some(|r: &mut InvoiceLine, v: FieldValue| {
            r.note = v.into_text().unwrap_or_default()
        }),
    },
    FieldBinding {
        meta: FieldMetadata {
            ui: ui("Дата", 7, true),
            ..FieldMetadata::new("issued_on", ValueKind::Date)
        },
        get: |r: &InvoiceLine| FieldValue::from(r.issued_on),
        set: Some(|r: &mut InvoiceLine, v: FieldValue| r.issued_on = v.as_date()),
    },
    FieldBinding {
        meta: FieldMetadata {
            ui: ui("Сумма", 8, false),
            ..FieldMetadata::new("amount", ValueKind::Decimal)
        },
        get: |r: &InvoiceLine| FieldValue::from(r.amount()),
        set: None,
    },
    FieldBinding {
        meta: FieldMetadata::new("comment", ValueKind::Text),
        get: |r: &InvoiceLine| FieldValue::from(r.comment.clone()),
        set: Some(|r: &mut InvoiceLine, v: FieldValue| {
            r.comment = v.into_text().unwrap_or_default()
        }),
    },
];

impl BindableRecord for InvoiceLine {
    fn bindings() -> &'static [FieldBinding<Self>] {
        &INVOICE_LINE_FIELDS
    }

    fn row_id(&self) -> String {
        self.id.clone()
    }

    fn instantiate() -> Option<Self> {
        Some(Self {
            id: Uuid::new_v4().to_string(),
            ..Self::default()
        })
    }
}

pub fn line(id: &str, description: &str, quantity: i64) -> InvoiceLine {
    InvoiceLine {
        id: id.to_string(),
        description: description.to_string(),
        quantity: Some(quantity),
        ..InvoiceLine::default()
    }
}

pub fn grid_of(rows: Vec<InvoiceLine>) -> Grid<InvoiceLine> {
    let services = registry();
    let config = config();
    GridBuilder::new(&services, &config)
        .build(rows)
        .expect("invoice lines are instantiable")
}

/// Record without presentation metadata
#[derive(Debug, Clone, Default)]
pub struct Unannotated {
    pub code: String,
}

static UNANNOTATED_FIELDS: [FieldBinding<Unannotated>; 1] = [FieldBinding {
    meta: FieldMetadata::new("code", ValueKind::Text),
    get: |r: &Unannotated| FieldValue::from(r.code.clone()),
    set: Some(|r: &mut Unannotated, v: FieldValue| {
        r.code = v.into_text().unwrap_or_default()
    }),
}];

impl BindableRecord for Unannotated {
    fn bindings() -> &'static [FieldBinding<Self>] {
        &UNANNOTATED_FIELDS
    }

    fn row_id(&self) -> String {
        self.code.clone()
    }

    fn instantiate() -> Option<Self> {
        Some(Self::default())
    }
}

/// Record type without a zero-argument constructor
#[derive(Debug, Clone)]
pub struct NoDefault {
    pub id: String,
    pub number: String,
}

impl NoDefault {
    pub fn new(id: &str, number: &str) -> Self {
        Self {
            id: id.to_string(),
            number: number.to_string(),
        }
    }
}

static NO_DEFAULT_FIELDS: [FieldBinding<NoDefault>; 2] = [
    FieldBinding {
        meta: FieldMetadata::new("id", ValueKind::Text),
        get: |r: &NoDefault| FieldValue::from(r.id.clone()),
        set: None,
    },
    FieldBinding {
        meta: FieldMetadata {
            ui: ui("Номер счёта", 1, true),
            ..FieldMetadata::new("number", ValueKind::Text)
        },
        get: |r: &NoDefault| FieldValue::from(r.number.clone()),
        set: Some(|r: &mut NoDefault, v: FieldValue| {
        r.number = v.into_text().unwrap_or_default()
    }),
    },
];

impl BindableRecord for NoDefault {
    fn bindings() -> &'static [FieldBinding<Self>] {
        &NO_DEFAULT_FIELDS
    }

    fn row_id(&self) -> String {
        self.id.clone()
    }
}
