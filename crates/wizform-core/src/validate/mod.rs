#[cfg(test)]
mod tests;

use crate::{naming, traits::Entity, visitor::IssueList};
use tracing::trace;

///
/// FieldValidation
/// Outcome of checking a set of fields on one entity instance.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldValidation {
    pub valid: bool,
    pub messages: Vec<String>,
}

impl FieldValidation {
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            valid: true,
            messages: Vec::new(),
        }
    }
}

///
/// validate_fields
///
/// Run only the rules registered against `fields` (inherited rules
/// included) on `instance`, returning full messages such as
/// `"Kind can't be blank"`. Fields with no rules, and names the entity
/// does not declare, pass. Duplicate messages are reported once.
///

pub fn validate_fields(instance: &dyn Entity, fields: &[&str]) -> FieldValidation {
    run(instance, fields, None)
}

///
/// valid_fields
///
/// Boolean form of `validate_fields`, optionally restricted to rules whose
/// kind is listed in `kinds`.
///

#[must_use]
pub fn valid_fields(instance: &dyn Entity, fields: &[&str], kinds: Option<&[&str]>) -> bool {
    run(instance, fields, kinds).valid
}

fn run(instance: &dyn Entity, fields: &[&str], kinds: Option<&[&str]>) -> FieldValidation {
    let model = instance.model();
    let mut issues = IssueList::new();
    let mut messages: Vec<String> = Vec::new();

    for field in fields {
        let rules = model
            .rules_on(field)
            .filter(|rule| kinds.is_none_or(|kinds| kinds.contains(&rule.kind())));

        for rule in rules {
            rule.validator.validate_record(field, instance, &mut issues);

            trace!(
                entity = model.path,
                field = *field,
                kind = rule.kind(),
                issues = issues.len(),
                "rule checked"
            );

            for issue in issues.take() {
                let message = full_message(field, &issue.message);
                if !messages.contains(&message) {
                    messages.push(message);
                }
            }
        }
    }

    FieldValidation {
        valid: messages.is_empty(),
        messages,
    }
}

/// `kind` + `can't be blank` → `Kind can't be blank`.
#[must_use]
pub fn full_message(attribute: &str, message: &str) -> String {
    format!("{} {message}", naming::humanize(attribute))
}
