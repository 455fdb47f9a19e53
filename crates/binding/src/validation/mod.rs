//! Validation targets and context-dependent rule wiring
//!
//! Each form field is a [`Validatable`] value object shared through a
//! [`TargetHandle`]. Owners (main form, secondary form, nested sub-form)
//! expose targets by name; an [`OwnerChain`] resolves a name by asking the
//! owners in order. [`ValidationRuleEngine`] fetches the rules of the
//! selected context and attaches their predicates to the resolved targets.

mod engine;
mod metadata_rules;
mod owner_chain;
mod predicate;
mod validatable;

pub use engine::{AppliedRules, RuleRepository, ValidationRuleEngine};
pub use metadata_rules::{attach_metadata_rules, targets_for_record};
pub use owner_chain::{FormTargets, OwnerChain, TargetOwner};
pub use predicate::Predicate;
pub use validatable::{Condition, ConditionOrigin, ControlState, TargetHandle, Validatable};
