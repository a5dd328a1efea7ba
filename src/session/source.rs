//! Where answers come from: a person at a prompt, or an inventory record.
use super::prompt::{Prompt, Question};
use crate::error::GenResult;
use crate::inventory::DeviceRecord;
use crate::template::Section;
use serde_yaml::Value;

/// Supplies section opt-in decisions and raw answers to the generator.
pub trait AnswerSource {
    /// Whether an optional section should be generated.
    fn include_section(&mut self, section: &Section) -> GenResult<bool>;

    /// Raw answer for one field; `None` means nothing was supplied.
    fn answer(&mut self, section: &str, question: &Question<'_>) -> GenResult<Option<Value>>;

    /// Whether an empty answer to a required field should be requested again.
    fn reprompts_empty(&self) -> bool;
}

/// Answers typed by a user.
pub struct PromptAnswers<P> {
    prompt: P,
}

impl<P: Prompt> PromptAnswers<P> {
    pub fn new(prompt: P) -> Self {
        Self { prompt }
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }
}

impl<P: Prompt> AnswerSource for PromptAnswers<P> {
    fn include_section(&mut self, section: &Section) -> GenResult<bool> {
        self.prompt.confirm_section(section.name())
    }

    fn answer(&mut self, _section: &str, question: &Question<'_>) -> GenResult<Option<Value>> {
        self.prompt.ask(question)
    }

    fn reprompts_empty(&self) -> bool {
        true
    }
}

/// Answers looked up in an inventory record; absent fields are skipped.
pub struct RecordAnswers<'a> {
    record: &'a DeviceRecord,
}

impl<'a> RecordAnswers<'a> {
    pub fn new(record: &'a DeviceRecord) -> Self {
        Self { record }
    }
}

impl AnswerSource for RecordAnswers<'_> {
    fn include_section(&mut self, section: &Section) -> GenResult<bool> {
        Ok(section
            .fields()
            .iter()
            .any(|field| self.record.lookup(section.name(), &field.name).is_some()))
    }

    fn answer(&mut self, section: &str, question: &Question<'_>) -> GenResult<Option<Value>> {
        Ok(self.record.lookup(section, question.field).cloned())
    }

    fn reprompts_empty(&self) -> bool {
        false
    }
}
