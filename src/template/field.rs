//! Field descriptors and their dependency expressions.
use crate::value::scalar_text;
use regex::Regex;
use serde_yaml::Value;
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::OnceLock;

/// How a field's optionality is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Optionality {
    Required,
    Optional,
    /// Only asked when an earlier `requires` expression in the section named
    /// this field; the string is the field it depends on.
    DependsOn(String),
}

/// Parsed `<answer>:<field>,<field>` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requires {
    answer: String,
    dependents: Vec<String>,
}

impl Requires {
    /// Answer that unlocks the dependents.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn dependents(&self) -> &[String] {
        &self.dependents
    }
}

impl FromStr for Requires {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (answer, names) = raw
            .split_once(':')
            .ok_or_else(|| format!("requires must look like <answer>:<fields> (got {raw:?})"))?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(format!("requires has an empty answer (got {raw:?})"));
        }
        let mut dependents = Vec::new();
        for name in names.split(',').map(str::trim) {
            if name.is_empty() {
                return Err(format!("requires lists an empty field name (got {raw:?})"));
            }
            validate_field_name(name)?;
            if !dependents.iter().any(|existing| existing == name) {
                dependents.push(name.to_string());
            }
        }
        Ok(Self {
            answer: answer.to_string(),
            dependents,
        })
    }
}

/// Schema for one configurable value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Key of the field inside the template section.
    pub id: String,
    /// Name written to the output document.
    pub name: String,
    pub help: String,
    pub optional: Optionality,
    pub default: Option<Value>,
    pub requires: Option<Requires>,
    /// Permitted answers, rendered as text.
    pub options: Option<Vec<String>>,
    pub callback: Option<String>,
}

fn field_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.\-]*$").expect("compile field name pattern")
    })
}

pub(super) fn validate_field_name(name: &str) -> Result<(), String> {
    if field_name_pattern().is_match(name) {
        Ok(())
    } else {
        Err(format!(
            "field names may only contain letters, digits, '_', '-', '.' (got {name:?})"
        ))
    }
}

pub(super) fn option_labels(values: &[Value]) -> Result<Vec<String>, String> {
    if values.is_empty() {
        return Err("options must list at least one choice".to_string());
    }
    let mut seen = HashSet::new();
    let mut labels = Vec::with_capacity(values.len());
    for value in values {
        let label = scalar_text(value)
            .ok_or_else(|| format!("options must be scalars (got {value:?})"))?;
        if !seen.insert(label.clone()) {
            return Err(format!("duplicate option {label:?}"));
        }
        labels.push(label);
    }
    Ok(labels)
}

pub(super) fn check_default_in_options(options: &[String], default: &Value) -> Result<(), String> {
    let Some(text) = scalar_text(default) else {
        return Err(format!("default must be a scalar when options are set (got {default:?})"));
    };
    let matches = options.iter().any(|option| {
        option == &text || (default.is_bool() && option.eq_ignore_ascii_case(&text))
    });
    if matches {
        Ok(())
    } else {
        Err(format!(
            "default {text:?} is not one of the options [{}]",
            options.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_splits_answer_and_dependents() {
        let requires: Requires = "True: jtag-cable-id , vivado-version".parse().expect("parse");
        assert_eq!(requires.answer(), "True");
        assert_eq!(requires.dependents(), ["jtag-cable-id", "vivado-version"]);
    }

    #[test]
    fn requires_rejects_missing_separator_and_empty_names() {
        assert!("True".parse::<Requires>().is_err());
        assert!(":a".parse::<Requires>().is_err());
        assert!("True:a,,b".parse::<Requires>().is_err());
    }

    #[test]
    fn boolean_default_matches_capitalized_option() {
        let options = vec!["True".to_string(), "False".to_string()];
        assert!(check_default_in_options(&options, &Value::Bool(false)).is_ok());
        assert!(check_default_in_options(&options, &Value::from("maybe")).is_err());
    }
}
