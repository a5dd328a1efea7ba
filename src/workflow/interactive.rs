//! Interactive generation on stdin/stdout.
use super::prepare_template;
use crate::cli::InteractiveArgs;
use crate::document::{write_document, Document};
use crate::session::{Generator, Prompt, PromptAnswers, TerminalPrompt};
use crate::settings::Settings;
use anyhow::{Context, Result};

const BANNER: &[&str] = &[
    "YAML Config Interactive Generation",
    "###################",
    "Questions are arranged:",
    "  Question (Options) [Default]",
    "###################",
];

/// Ask the template's questions, then write the document in one step.
pub fn run_interactive(args: &InteractiveArgs, settings: &Settings) -> Result<()> {
    let (template, callbacks) = prepare_template(args.template.as_deref(), settings)?;
    let mut answers = PromptAnswers::new(TerminalPrompt::stdio());
    for line in BANNER {
        answers.prompt_mut().notice(line)?;
    }

    let generator = Generator::new(
        &template,
        &callbacks,
        &settings.required_sections,
        settings.max_prompt_attempts,
    );
    let device = generator
        .generate(&mut answers)
        .context("interactive generation")?;

    let out = match &args.out {
        Some(path) => path.clone(),
        None => answers.prompt_mut().ask_path(
            "Output config file (this not just a folder)",
            &settings.default_output(),
        )?,
    };
    write_document(&out, &Document::Single(device))?;
    println!("wrote {}", out.display());
    Ok(())
}
