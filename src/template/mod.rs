//! Template schema: sections of field descriptors loaded from YAML.
//!
//! Templates are validated once at load time so the generator never meets a
//! malformed dependency expression, duplicate field, or inconsistent option set
//! while prompting.
mod field;

pub use field::{FieldDescriptor, Optionality, Requires};

use crate::callbacks::CallbackRegistry;
use crate::error::{ConfigGenError, GenResult};
use crate::resources;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the template text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    File(PathBuf),
}

impl TemplateSource {
    /// Prefer an explicit path, then a settings path, then the embedded template.
    pub fn select(cli: Option<&Path>, settings: Option<&Path>) -> Self {
        match cli.or(settings) {
            Some(path) => Self::File(path.to_path_buf()),
            None => Self::Embedded,
        }
    }
}

/// Ordered group of fields, opted into as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl Section {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Schema root: sections in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    name: String,
    #[serde(default)]
    help: String,
    #[serde(default)]
    optional: RawOptional,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    requires: Option<String>,
    #[serde(default)]
    options: Option<Vec<Value>>,
    #[serde(default)]
    callback: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOptional {
    Flag(bool),
    DependsOn(String),
}

impl Default for RawOptional {
    fn default() -> Self {
        Self::Flag(false)
    }
}

type RawTemplate = IndexMap<String, IndexMap<String, RawField>>;

/// Load and validate the template from its source.
pub fn load_template(source: &TemplateSource) -> GenResult<Template> {
    let template = match source {
        TemplateSource::Embedded => Template::from_yaml_str(resources::TEMPLATE_GEN_YAML)?,
        TemplateSource::File(path) => {
            let text = fs::read_to_string(path).map_err(|err| {
                ConfigGenError::Schema(format!("read template {}: {err}", path.display()))
            })?;
            Template::from_yaml_str(&text)?
        }
    };
    tracing::debug!(
        source = ?source,
        sections = template.sections.len(),
        "loaded template"
    );
    Ok(template)
}

impl Template {
    /// Parse and validate template YAML.
    pub fn from_yaml_str(text: &str) -> GenResult<Self> {
        let raw: RawTemplate = serde_yaml::from_str(text)
            .map_err(|err| ConfigGenError::Schema(format!("parse template: {err}")))?;
        let mut sections = Vec::with_capacity(raw.len());
        for (section_name, raw_fields) in raw {
            sections.push(build_section(section_name, raw_fields)?);
        }
        Ok(Self { sections })
    }

    /// Sections in declaration order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Reject templates that reference callbacks the registry does not know.
    pub fn check_callbacks(&self, registry: &CallbackRegistry) -> GenResult<()> {
        for section in &self.sections {
            for field in &section.fields {
                if let Some(name) = field.callback.as_deref() {
                    if !registry.contains(name) {
                        return Err(ConfigGenError::Callback {
                            name: name.to_string(),
                            reason: format!(
                                "unknown callback on {}/{}",
                                section.name, field.name
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn build_section(name: String, raw_fields: IndexMap<String, RawField>) -> GenResult<Section> {
    if name.trim().is_empty() {
        return Err(ConfigGenError::Schema("section names must be non-empty".to_string()));
    }
    let mut fields = Vec::with_capacity(raw_fields.len());
    let mut seen = HashSet::new();
    for (id, raw) in raw_fields {
        let field = build_field(&name, id, raw)?;
        if !seen.insert(field.name.clone()) {
            return Err(ConfigGenError::Schema(format!(
                "duplicate field {:?} in section {name}",
                field.name
            )));
        }
        fields.push(field);
    }
    let section = Section { name, fields };
    validate_dependencies(&section)?;
    Ok(section)
}

fn build_field(section: &str, id: String, raw: RawField) -> GenResult<FieldDescriptor> {
    let location = format!("{section}/{id}");
    field::validate_field_name(&raw.name)
        .map_err(|reason| ConfigGenError::Schema(format!("{location}: {reason}")))?;
    let requires = raw
        .requires
        .as_deref()
        .map(str::parse::<Requires>)
        .transpose()
        .map_err(|reason| ConfigGenError::Schema(format!("{location}: {reason}")))?;
    let optional = match raw.optional {
        RawOptional::Flag(true) => Optionality::Optional,
        RawOptional::Flag(false) => Optionality::Required,
        RawOptional::DependsOn(target) => Optionality::DependsOn(target),
    };
    let options = raw
        .options
        .map(|values| field::option_labels(&values))
        .transpose()
        .map_err(|reason| ConfigGenError::Schema(format!("{location}: {reason}")))?;
    let default = raw.default.filter(|value| !value.is_null());
    if let (Some(options), Some(default)) = (options.as_deref(), default.as_ref()) {
        field::check_default_in_options(options, default)
            .map_err(|reason| ConfigGenError::Schema(format!("{location}: {reason}")))?;
    }
    Ok(FieldDescriptor {
        id,
        name: raw.name,
        help: raw.help,
        optional,
        default,
        requires,
        options,
        callback: raw.callback.filter(|name| !name.trim().is_empty()),
    })
}

/// Dependents must live in the same section, and string optionality must point
/// at a field that takes part in some dependency.
fn validate_dependencies(section: &Section) -> GenResult<()> {
    let mut dependents = HashSet::new();
    let mut controllers = HashSet::new();
    for field in &section.fields {
        if let Some(requires) = &field.requires {
            controllers.insert(field.name.as_str());
            for dependent in requires.dependents() {
                if section.field(dependent).is_none() {
                    return Err(ConfigGenError::Schema(format!(
                        "{}/{}: requires unknown field {dependent:?}",
                        section.name, field.name
                    )));
                }
                dependents.insert(dependent.as_str());
            }
        }
    }
    for field in &section.fields {
        if let Optionality::DependsOn(target) = &field.optional {
            let target = target.as_str();
            if !dependents.contains(target) && !controllers.contains(target) {
                return Err(ConfigGenError::Schema(format!(
                    "{}/{}: optional references {target:?}, which no requires expression names",
                    section.name, field.name
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
