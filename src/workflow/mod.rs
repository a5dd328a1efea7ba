//! Command runners wiring CLI inputs to the generator and document editor.
//!
//! Each runner loads what it needs, performs one operation, and only touches
//! the filesystem once the whole result is known.
mod boards;
mod field;
mod generate;
mod interactive;

pub use boards::run_boards;
pub use field::run_field;
pub use generate::run_generate;
pub use interactive::run_interactive;

use crate::callbacks::CallbackRegistry;
use crate::settings::Settings;
use crate::template::{load_template, Template, TemplateSource};
use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// Load the template and make sure every callback it names is registered.
fn prepare_template(
    cli_template: Option<&Path>,
    settings: &Settings,
) -> Result<(Template, CallbackRegistry)> {
    let source = TemplateSource::select(cli_template, settings.template.as_deref());
    let template = load_template(&source).context("load template")?;
    let callbacks = CallbackRegistry::with_builtins(settings);
    template
        .check_callbacks(&callbacks)
        .context("check template callbacks")?;
    check_required_sections(&template, &settings.required_sections)?;
    Ok((template, callbacks))
}

/// Every section settings mark as required must exist in the template.
fn check_required_sections(template: &Template, required: &[String]) -> Result<()> {
    if let Some(name) = required
        .iter()
        .find(|name| template.section(name).is_none())
    {
        return Err(anyhow!("required section {name:?} is not in the template"));
    }
    Ok(())
}
