//! Per-field resolution: gating, callback defaults, answer retrieval, coercion.
use super::gate::DependencyGate;
use super::prompt::Question;
use super::source::AnswerSource;
use crate::callbacks::CallbackRegistry;
use crate::document::Entry;
use crate::error::{ConfigGenError, GenResult};
use crate::template::{FieldDescriptor, Optionality};
use crate::value::{coerce_answer, is_empty_answer};

/// Shared inputs for resolving the fields of one section.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub section: &'a str,
    pub callbacks: &'a CallbackRegistry,
    pub max_attempts: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Entry(Entry),
    Skipped,
}

/// Resolve one field against the gate left by the previous field.
///
/// Returns the resolution together with the gate the next field must see.
pub fn resolve_field(
    field: &FieldDescriptor,
    gate: DependencyGate,
    ctx: FieldContext<'_>,
    source: &mut dyn AnswerSource,
) -> GenResult<(Resolution, DependencyGate)> {
    let staged = field.requires.as_ref();

    if matches!(field.optional, Optionality::DependsOn(_)) && !gate.unlocks(&field.name) {
        tracing::debug!(section = ctx.section, field = %field.name, id = %field.id, "skipped, dependency not unlocked");
        return Ok((Resolution::Skipped, gate));
    }

    let mut text = field.help.clone();
    let mut default = field.default.clone();
    if let Some(name) = field.callback.as_deref() {
        let output = ctx.callbacks.invoke(name)?;
        if let Some(extra) = output.extra_help {
            text.push_str(&extra);
        }
        if output.default.is_some() {
            default = output.default;
        }
    }
    let question = Question {
        field: &field.name,
        text,
        default: default.as_ref(),
        choices: field.options.as_deref(),
    };

    let mut attempts = 0;
    loop {
        attempts += 1;
        let raw = source.answer(ctx.section, &question)?;
        let settled = gate.clone().settle(staged, raw.as_ref());
        if let Some(value) = raw.filter(|value| !is_empty_answer(Some(value))) {
            let entry = Entry::new(field.name.clone(), coerce_answer(value));
            return Ok((Resolution::Entry(entry), settled));
        }

        let required = field.optional == Optionality::Required || settled.unlocks(&field.name);
        if !required || !source.reprompts_empty() {
            tracing::debug!(section = ctx.section, field = %field.name, id = %field.id, "skipped, no answer");
            return Ok((Resolution::Skipped, settled));
        }
        if attempts >= ctx.max_attempts {
            return Err(ConfigGenError::RequiredFieldUnanswered {
                field: field.name.clone(),
                attempts,
            });
        }
        tracing::debug!(section = ctx.section, field = %field.name, attempts, "required field left empty, asking again");
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
