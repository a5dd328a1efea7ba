//! Generation from inventory records.
use super::prepare_template;
use crate::cli::GenerateArgs;
use crate::document::{write_document, Document};
use crate::inventory::{filter_records, load_records, select_record, RecordOrigin, RecordSet};
use crate::session::{Generator, RecordAnswers};
use crate::settings::Settings;
use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;

pub fn run_generate(args: &GenerateArgs, settings: &Settings) -> Result<()> {
    let origin = match (&args.records, &args.records_url) {
        (Some(path), _) => RecordOrigin::File(path.clone()),
        (None, Some(url)) => RecordOrigin::Url {
            url: url.clone(),
            token: args.token.clone(),
        },
        (None, None) => return Err(anyhow!("provide --records or --records-url")),
    };
    let (template, callbacks) = prepare_template(args.template.as_deref(), settings)?;
    let records = filter_records(load_records(&origin)?, &args.filters);
    let generator = Generator::new(
        &template,
        &callbacks,
        &settings.required_sections,
        settings.max_prompt_attempts,
    );
    let document = generate_document(&generator, &records, args.device.as_deref())?;
    write_document(&args.out, &document)?;
    println!("wrote {}", args.out.display());
    Ok(())
}

/// One named device yields a single-device document; otherwise every record
/// becomes a device block keyed by its id.
pub fn generate_document(
    generator: &Generator<'_>,
    records: &RecordSet,
    device: Option<&str>,
) -> Result<Document> {
    if let Some(name) = device {
        let (id, record) = select_record(records, name)?;
        let config = generator
            .generate(&mut RecordAnswers::new(record))
            .with_context(|| format!("generate device {id}"))?;
        return Ok(Document::Single(config));
    }
    if records.is_empty() {
        return Err(anyhow!("no inventory records to generate from"));
    }
    let mut devices = IndexMap::with_capacity(records.len());
    for (id, record) in records {
        let config = generator
            .generate(&mut RecordAnswers::new(record))
            .with_context(|| format!("generate device {id}"))?;
        tracing::info!(device = %id, sections = config.sections().len(), "generated device");
        devices.insert(id.clone(), config);
    }
    Ok(Document::Multi(devices))
}
