use contracts::shared::metadata::FieldMetadata;
use tracing::debug;

use crate::config::MessagesConfig;
use crate::record::BindableRecord;

use super::owner_chain::FormTargets;
use super::predicate::Predicate;
use super::validatable::{ConditionOrigin, Validatable};

/// Form targets for every presented field of `record`, holding its values
pub fn targets_for_record<R: BindableRecord>(
    owner_name: impl Into<String>,
    record: &R,
) -> FormTargets {
    let mut form = FormTargets::new(owner_name);
    let presented = record
        .instance_bindings()
        .iter()
        .filter(|b| b.meta.is_presented());
    for binding in presented {
        let value = (binding.get)(record);
        let target = Validatable::control(binding.name()).with_value(value);
        form.register(target.into_handle());
    }
    form
}

/// Attach the static metadata rules of `R` to the matching targets of `form`
///
/// Fields without a target in the form are skipped. Returns the number of
/// conditions attached. Targets are re-evaluated right away.
pub fn attach_metadata_rules<R: BindableRecord>(
    form: &FormTargets,
    messages: &MessagesConfig,
) -> usize {
    let mut attached = 0;

    for binding in R::bindings() {
        let meta = &binding.meta;
        if !meta.validation.is_required() && !meta.validation.has_constraints() {
            continue;
        }
        let Some(target) = form.get(meta.name) else {
            debug!("No target for `{}` in {:?}, metadata rules skipped", meta.name, form);
            continue;
        };

        let message = meta
            .validation
            .custom_error
            .map(str::to_string)
            .unwrap_or_else(|| messages.required_error.clone());

        let mut state = target.borrow_mut();
        state.add_condition(
            Predicate::Metadata {
                rules: meta.validation,
                label: label_of(meta),
            },
            message,
            ConditionOrigin::Metadata,
        );
        state.validate();
        attached += 1;
    }

    attached
}

fn label_of(meta: &FieldMetadata) -> &'static str {
    meta.ui
        .map(|ui| ui.label)
        .filter(|label| !label.is_empty())
        .unwrap_or(meta.name)
}
