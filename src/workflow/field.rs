//! Single-field lookup and update on an existing document.
use crate::cli::FieldArgs;
use crate::devices::{DevicePathTranslator, LinkTranslator};
use crate::document::{
    narrow, narrow_mut, read_document, read_field, write_document, write_field, AmbiguityMode,
    FieldUpdate, Narrowed, BOARD_CONFIG_SECTION, BOARD_NAME_FIELD,
};
use crate::value::{coerce_answer, display_value};
use anyhow::{Context, Result};
use serde_yaml::Value;
use std::path::Path;

/// One `field` invocation, independent of the CLI.
#[derive(Debug, Clone, Copy)]
pub struct FieldRequest<'a> {
    pub section: &'a str,
    pub field: &'a str,
    pub value: Option<&'a str>,
    pub board_name: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    Value(Value),
    BoardNames(Vec<String>),
    Updated(FieldUpdate),
}

impl FieldOutcome {
    pub fn message(&self) -> String {
        match self {
            FieldOutcome::Value(value) => display_value(value),
            FieldOutcome::BoardNames(names) => names.join(", "),
            FieldOutcome::Updated(update) => format!(
                "Field {} in {} updated from {} to {}",
                update.field,
                update.section,
                display_value(&update.previous),
                display_value(&update.current)
            ),
        }
    }
}

pub fn run_field(args: &FieldArgs) -> Result<()> {
    let request = FieldRequest {
        section: &args.section,
        field: &args.field,
        value: args.value.as_deref(),
        board_name: args.board_name.as_deref(),
    };
    let outcome = apply_field_request(&args.config, &request, &LinkTranslator)?;
    println!("{}", outcome.message());
    Ok(())
}

/// Read or update one field; the file is rewritten only after a successful update.
pub fn apply_field_request(
    path: &Path,
    request: &FieldRequest<'_>,
    translator: &dyn DevicePathTranslator,
) -> Result<FieldOutcome> {
    let mut document = read_document(path)?;

    let Some(raw) = request.value else {
        let lists_boards = request.section == BOARD_CONFIG_SECTION
            && request.field == BOARD_NAME_FIELD
            && request.board_name.is_none();
        let mode = if lists_boards {
            AmbiguityMode::ListBoardNames
        } else {
            AmbiguityMode::Fail
        };
        return match narrow(&document, request.board_name, mode)? {
            Narrowed::BoardNames(names) => Ok(FieldOutcome::BoardNames(names)),
            Narrowed::Device(device) => {
                let value = read_field(device, request.section, request.field, translator)
                    .with_context(|| format!("read {}/{}", request.section, request.field))?;
                Ok(FieldOutcome::Value(value))
            }
        };
    };

    let device = narrow_mut(&mut document, request.board_name)?;
    let update = write_field(
        device,
        request.section,
        request.field,
        coerce_answer(Value::String(raw.to_string())),
    )
    .with_context(|| format!("update {}/{}", request.section, request.field))?;
    write_document(path, &document)?;
    Ok(FieldOutcome::Updated(update))
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
