use std::rc::Rc;

use contracts::shared::validation_rules::{ContextKey, RuleKind, ValidationRule};
use tracing::{debug, info, warn};

use crate::error::{RuleEngineError, ValidationWiringError};

use super::owner_chain::OwnerChain;
use super::predicate::Predicate;
use super::validatable::{ConditionOrigin, TargetHandle};

/// Source of validation rules keyed by context
pub trait RuleRepository {
    /// Side-effect free; may be called repeatedly for the same key
    fn rules_for_context(&self, context_key: ContextKey) -> anyhow::Result<Vec<ValidationRule>>;
}

impl<T: RuleRepository + ?Sized> RuleRepository for Rc<T> {
    fn rules_for_context(&self, context_key: ContextKey) -> anyhow::Result<Vec<ValidationRule>> {
        (**self).rules_for_context(context_key)
    }
}

/// Summary of one resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRules {
    pub context_key: ContextKey,
    pub rules: usize,
    pub targets: usize,
    pub invalid: usize,
}

struct Wiring {
    rule: ValidationRule,
    predicate: Option<Predicate>,
    target: TargetHandle,
}

/// Attaches the rules of the selected context to form targets
///
/// Tracks the targets touched by the previous resolution so that switching
/// context clears exactly those before the new rules are attached.
pub struct ValidationRuleEngine<Repo> {
    repository: Repo,
    touched: Vec<TargetHandle>,
    current_context: Option<ContextKey>,
}

impl<Repo: RuleRepository> ValidationRuleEngine<Repo> {
    pub fn new(repository: Repo) -> Self {
        Self {
            repository,
            touched: Vec::new(),
            current_context: None,
        }
    }

    pub fn repository(&self) -> &Repo {
        &self.repository
    }

    pub fn current_context(&self) -> Option<ContextKey> {
        self.current_context
    }

    pub fn touched_count(&self) -> usize {
        self.touched.len()
    }

    /// Resolve the rules of `context_key` onto the owner chain.
    ///
    /// `None` is the "nothing selected" case: no repository call, no changes.
    /// All targets are resolved before any target is mutated, so a wiring
    /// error leaves the previous state intact.
    pub fn apply_rules_for_context(
        &mut self,
        context_key: Option<ContextKey>,
        owners: &OwnerChain,
    ) -> Result<Option<AppliedRules>, RuleEngineError> {
        let Some(context_key) = context_key else {
            debug!("No context selected, validation rules untouched");
            return Ok(None);
        };

        let rules = self
            .repository
            .rules_for_context(context_key)
            .map_err(|source| RuleEngineError::Repository {
                context_key,
                source,
            })?;

        let mut wirings = Vec::with_capacity(rules.len());
        for rule in rules {
            let target = owners
                .resolve(&rule.target_name)
                .ok_or_else(|| ValidationWiringError {
                    target_name: rule.target_name.clone(),
                    rule_id: rule.id,
                })?;

            let kind = rule.kind();
            debug!(
                rule = rule.id,
                target = %rule.target_name,
                kind = kind.as_str(),
                "rule compiled"
            );
            if let RuleKind::Unknown { spec } = &kind {
                warn!(
                    "Validation rule {} for `{}` has unrecognized custom spec {:?}, ignored",
                    rule.id, rule.target_name, spec
                );
            }

            wirings.push(Wiring {
                predicate: Predicate::from_rule_kind(&kind),
                rule,
                target,
            });
        }

        let previous = std::mem::take(&mut self.touched);
        for target in &previous {
            let mut state = target.borrow_mut();
            state.clear_rule_conditions();
            state.reset_control();
        }

        let mut touched: Vec<TargetHandle> = Vec::new();
        for wiring in &wirings {
            let mut state = wiring.target.borrow_mut();
            if let Some(predicate) = &wiring.predicate {
                state.add_condition(
                    predicate.clone(),
                    wiring.rule.error_message.clone(),
                    ConditionOrigin::Rule(wiring.rule.id),
                );
            }
            state.apply_control(wiring.rule.show_in_form, wiring.rule.default_disabled);
            drop(state);

            if !touched.iter().any(|t| Rc::ptr_eq(t, &wiring.target)) {
                touched.push(Rc::clone(&wiring.target));
            }
        }

        let mut evaluated: Vec<&TargetHandle> = Vec::new();
        let mut invalid = 0;
        for target in previous.iter().chain(touched.iter()) {
            if evaluated.iter().any(|t| Rc::ptr_eq(t, target)) {
                continue;
            }
            if !target.borrow_mut().validate() {
                invalid += 1;
            }
            evaluated.push(target);
        }

        let applied = AppliedRules {
            context_key,
            rules: wirings.len(),
            targets: touched.len(),
            invalid,
        };
        info!(
            "Applied {} validation rules for context {} to {} targets ({} invalid)",
            applied.rules, context_key, applied.targets, applied.invalid
        );

        self.touched = touched;
        self.current_context = Some(context_key);
        Ok(Some(applied))
    }

    /// Remove every rule condition attached by the last resolution
    pub fn clear(&mut self) {
        for target in std::mem::take(&mut self.touched) {
            let mut state = target.borrow_mut();
            state.clear_rule_conditions();
            state.reset_control();
            state.validate();
        }
        self.current_context = None;
    }
}
