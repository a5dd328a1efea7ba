//! Template-driven generation of a device document.
//!
//! Sections are visited in template order. Each opted-in section gets a fresh
//! dependency gate that is threaded through its fields one resolution at a
//! time; the assembler only ever sees entries that were actually produced.
mod assemble;
mod gate;
mod prompt;
mod resolve;
#[cfg(test)]
mod scripted;
mod source;

pub use assemble::DocumentAssembler;
pub use gate::DependencyGate;
pub use prompt::{Prompt, TerminalPrompt};
pub use resolve::{resolve_field, FieldContext, Resolution};
pub use source::{AnswerSource, PromptAnswers, RecordAnswers};

use crate::callbacks::CallbackRegistry;
use crate::document::DeviceConfig;
use crate::error::GenResult;
use crate::template::{Section, Template};

/// Drives one generation run over a validated template.
#[derive(Debug)]
pub struct Generator<'a> {
    template: &'a Template,
    callbacks: &'a CallbackRegistry,
    required_sections: &'a [String],
    max_attempts: u32,
}

impl<'a> Generator<'a> {
    pub fn new(
        template: &'a Template,
        callbacks: &'a CallbackRegistry,
        required_sections: &'a [String],
        max_attempts: u32,
    ) -> Self {
        Self {
            template,
            callbacks,
            required_sections,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Resolve every section and return the assembled device document.
    ///
    /// Any error aborts the whole run; nothing partial is returned.
    pub fn generate(&self, source: &mut dyn AnswerSource) -> GenResult<DeviceConfig> {
        let mut assembler = DocumentAssembler::default();
        for section in self.template.sections() {
            let required = self
                .required_sections
                .iter()
                .any(|name| name == section.name());
            if !required && !source.include_section(section)? {
                tracing::debug!(section = section.name(), "section not selected");
                continue;
            }
            assembler.open_section(section.name());
            self.resolve_section(section, &mut assembler, source)?;
            assembler.close_section();
        }
        Ok(assembler.finish())
    }

    fn resolve_section(
        &self,
        section: &Section,
        assembler: &mut DocumentAssembler,
        source: &mut dyn AnswerSource,
    ) -> GenResult<()> {
        let ctx = FieldContext {
            section: section.name(),
            callbacks: self.callbacks,
            max_attempts: self.max_attempts,
        };
        let mut gate = DependencyGate::default();
        let mut produced = 0usize;
        for field in section.fields() {
            let (resolution, next) = resolve_field(field, gate, ctx, source)?;
            gate = next;
            if let Resolution::Entry(entry) = resolution {
                assembler.push(entry);
                produced += 1;
            }
        }
        tracing::info!(section = section.name(), entries = produced, "resolved section");
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
