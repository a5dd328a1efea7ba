//! Inventory records used to populate documents without prompting.
//!
//! A record set maps device ids to records. A record holds field values either
//! flat (`dutip: ...`) or nested per section (`network-config: {dutip: ...}`);
//! nested values win.
use crate::document::{BOARD_CONFIG_SECTION, BOARD_NAME_FIELD};
use crate::error::{ConfigGenError, GenResult};
use crate::value::scalar_text;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Field values for one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceRecord {
    values: IndexMap<String, Value>,
}

pub type RecordSet = IndexMap<String, DeviceRecord>;

impl DeviceRecord {
    #[cfg(test)]
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(key, value)| (key.into(), value)).collect(),
        }
    }

    /// Value for `field` in `section`, preferring the nested form.
    pub fn lookup(&self, section: &str, field: &str) -> Option<&Value> {
        if let Some(Value::Mapping(nested)) = self.values.get(section) {
            if let Some(value) = nested.get(field) {
                return Some(value);
            }
        }
        self.values.get(field).filter(|value| !value.is_mapping())
    }

    pub fn board_name(&self) -> Option<String> {
        self.lookup(BOARD_CONFIG_SECTION, BOARD_NAME_FIELD)
            .and_then(scalar_text)
    }
}

/// Where to read a record set from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOrigin {
    File(PathBuf),
    Url { url: String, token: Option<String> },
}

pub fn load_records(origin: &RecordOrigin) -> Result<RecordSet> {
    let records = match origin {
        RecordOrigin::File(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read records {}", path.display()))?;
            serde_yaml::from_str(&text)
                .with_context(|| format!("parse records {}", path.display()))?
        }
        RecordOrigin::Url { url, token } => fetch_records(url, token.as_deref())?,
    };
    tracing::info!(origin = ?origin, devices = records.len(), "loaded inventory records");
    Ok(records)
}

fn fetch_records(url: &str, token: Option<&str>) -> Result<RecordSet> {
    let mut request = ureq::get(url).header("Accept", "application/json");
    if let Some(token) = token {
        request = request.header("Authorization", &format!("Token {token}"));
    }
    let mut response = request
        .call()
        .with_context(|| format!("fetch records from {url}"))?;
    let records: RecordSet = response
        .body_mut()
        .read_json()
        .context("parse inventory response JSON")?;
    Ok(records)
}

/// `key=value` condition on record fields.
///
/// A bare key matches a flat value or the same field in any section;
/// `section.field=value` looks only inside that section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    section: Option<String>,
    field: String,
    value: String,
}

impl FromStr for RecordFilter {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("filter {raw:?} must look like key=value"))?;
        let key = key.trim();
        let (section, field) = match key.split_once('.') {
            Some((section, field)) => (Some(section.trim().to_string()), field.trim()),
            None => (None, key),
        };
        if field.is_empty() || section.as_deref().is_some_and(str::is_empty) {
            return Err(format!("filter {raw:?} has an empty key"));
        }
        Ok(Self {
            section,
            field: field.to_string(),
            value: value.trim().to_string(),
        })
    }
}

impl RecordFilter {
    /// Whether the record holds the expected value; booleans compare
    /// case-insensitively.
    pub fn matches(&self, record: &DeviceRecord) -> bool {
        let found = match &self.section {
            Some(section) => match record.values.get(section) {
                Some(Value::Mapping(nested)) => nested.get(self.field.as_str()),
                _ => None,
            },
            None => record.values.get(&self.field).or_else(|| {
                record.values.values().find_map(|value| match value {
                    Value::Mapping(nested) => nested.get(self.field.as_str()),
                    _ => None,
                })
            }),
        };
        match found {
            Some(Value::Bool(flag)) => self.value.eq_ignore_ascii_case(&flag.to_string()),
            Some(value) => scalar_text(value).as_deref() == Some(self.value.as_str()),
            None => false,
        }
    }
}

/// Keep the records that satisfy every filter.
pub fn filter_records(records: RecordSet, filters: &[RecordFilter]) -> RecordSet {
    if filters.is_empty() {
        return records;
    }
    let total = records.len();
    let kept: RecordSet = records
        .into_iter()
        .filter(|(_, record)| filters.iter().all(|filter| filter.matches(record)))
        .collect();
    tracing::info!(total, kept = kept.len(), "filtered inventory records");
    kept
}

/// Pick one record by device id, or by its `board-name` value.
pub fn select_record<'a>(records: &'a RecordSet, name: &str) -> GenResult<(&'a str, &'a DeviceRecord)> {
    if let Some((id, record)) = records.get_key_value(name) {
        return Ok((id.as_str(), record));
    }
    records
        .iter()
        .find(|(_, record)| record.board_name().as_deref() == Some(name))
        .map(|(id, record)| (id.as_str(), record))
        .ok_or_else(|| ConfigGenError::DeviceNotFound {
            name: name.to_string(),
        })
}
