use std::cell::RefCell;
use std::rc::Rc;

use crate::record::FieldValue;

use super::predicate::Predicate;

/// Shared handle to a validation target
pub type TargetHandle = Rc<RefCell<Validatable>>;

/// Visibility and enabled state of a visual control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub visible: bool,
    pub disabled: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            visible: true,
            disabled: false,
        }
    }
}

/// Where an attached condition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOrigin {
    /// Static field metadata, survives context switches
    Metadata,
    /// Context rule with the given id
    Rule(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub predicate: Predicate,
    pub message: String,
    pub origin: ConditionOrigin,
}

/// Value object holding one field's value and validation state
///
/// `is_valid` is the conjunction of all attached predicates against the
/// current value; the first failing condition in insertion order provides
/// the error message.
#[derive(Debug, Clone)]
pub struct Validatable {
    name: String,
    value: FieldValue,
    conditions: Vec<Condition>,
    valid: bool,
    error_message: String,
    control: Option<ControlState>,
}

impl Validatable {
    /// Pure value holder without visual state
    pub fn value_holder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Null,
            conditions: Vec::new(),
            valid: true,
            error_message: String::new(),
            control: None,
        }
    }

    /// Visual control: additionally carries visibility and enabled state
    pub fn control(name: impl Into<String>) -> Self {
        Self {
            control: Some(ControlState::default()),
            ..Self::value_holder(name)
        }
    }

    pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = value.into();
        self
    }

    pub fn into_handle(self) -> TargetHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Store a new value and re-evaluate
    pub fn set_value(&mut self, value: impl Into<FieldValue>) -> bool {
        self.value = value.into();
        self.validate()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn add_condition(
        &mut self,
        predicate: Predicate,
        message: impl Into<String>,
        origin: ConditionOrigin,
    ) {
        self.conditions.push(Condition {
            predicate,
            message: message.into(),
            origin,
        });
    }

    pub fn has_rule_condition(&self, rule_id: i64) -> bool {
        self.conditions
            .iter()
            .any(|c| c.origin == ConditionOrigin::Rule(rule_id))
    }

    /// Drop every condition attached by context rules; metadata conditions stay
    pub fn clear_rule_conditions(&mut self) {
        self.conditions
            .retain(|c| c.origin == ConditionOrigin::Metadata);
    }

    /// Evaluate all conditions, short-circuiting on the first failure
    pub fn validate(&mut self) -> bool {
        for condition in &self.conditions {
            if let Err(computed) = condition.predicate.check(&self.value) {
                self.valid = false;
                self.error_message = computed.unwrap_or_else(|| condition.message.clone());
                return false;
            }
        }

        self.valid = true;
        self.error_message.clear();
        true
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Empty while valid
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn is_control(&self) -> bool {
        self.control.is_some()
    }

    pub fn control_state(&self) -> Option<ControlState> {
        self.control
    }

    /// Returns `false` for pure value holders, which have no visual state
    pub fn apply_control(&mut self, visible: bool, disabled: bool) -> bool {
        match self.control.as_mut() {
            Some(state) => {
                state.visible = visible;
                state.disabled = disabled;
                true
            }
            None => false,
        }
    }

    pub fn reset_control(&mut self) {
        if let Some(state) = self.control.as_mut() {
            *state = ControlState::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failing_condition_wins() {
        let mut target = Validatable::value_holder("amount");
        target.add_condition(Predicate::Required, "Сумма обязательна", ConditionOrigin::Rule(1));
        target.add_condition(
            Predicate::DecimalPrecision {
                min: rust_decimal::Decimal::ZERO,
                scale: 2,
            },
            "Не более двух знаков",
            ConditionOrigin::Rule(2),
        );

        assert!(!target.validate());
        assert_eq!(target.error_message(), "Сумма обязательна");

        assert!(!target.set_value("1.234"));
        assert_eq!(target.error_message(), "Не более двух знаков");

        assert!(target.set_value("1.23"));
        assert!(target.is_valid());
        assert_eq!(target.error_message(), "");
    }

    #[test]
    fn test_clear_keeps_metadata_conditions() {
        let mut target = Validatable::value_holder("number");
        target.add_condition(Predicate::Required, "meta", ConditionOrigin::Metadata);
        target.add_condition(Predicate::Required, "rule", ConditionOrigin::Rule(7));
        assert!(target.has_rule_condition(7));

        target.clear_rule_conditions();
        assert_eq!(target.conditions().len(), 1);
        assert!(!target.has_rule_condition(7));
        assert!(!target.validate());
        assert_eq!(target.error_message(), "meta");
    }

    #[test]
    fn test_no_conditions_is_valid() {
        let mut target = Validatable::value_holder("x");
        assert!(target.is_valid());
        assert!(target.validate());
    }

    #[test]
    fn test_control_state() {
        let mut holder = Validatable::value_holder("a");
        assert!(!holder.apply_control(false, true));
        assert_eq!(holder.control_state(), None);

        let mut control = Validatable::control("b");
        assert_eq!(control.control_state(), Some(ControlState::default()));
        assert!(control.apply_control(false, true));
        assert_eq!(
            control.control_state(),
            Some(ControlState {
                visible: false,
                disabled: true
            })
        );
        control.reset_control();
        assert_eq!(control.control_state(), Some(ControlState::default()));
    }
}
