//! Generated configuration documents.
//!
//! A document is either one device's sections or a mapping of device ids to
//! device sections. Each section is an ordered list of one-field entries, which
//! serialize as `- name: value`.
mod io;
mod locate;
mod resolver;

pub use io::{read_document, write_document};
pub use locate::{read_field, write_field, FieldUpdate};
pub use resolver::{narrow, narrow_mut, AmbiguityMode, Narrowed};

use crate::error::{ConfigGenError, GenResult};
use crate::value::scalar_text;
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::{Mapping, Value};

pub const BOARD_CONFIG_SECTION: &str = "board-config";
pub const BOARD_NAME_FIELD: &str = "board-name";
pub const UART_CONFIG_SECTION: &str = "uart-config";
pub const UART_ADDRESS_FIELD: &str = "address";

/// One resolved `(field, value)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub field: String,
    pub value: Value,
}

impl Entry {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = IndexMap::<String, Value>::deserialize(deserializer)?;
        let count = map.len();
        let mut pairs = map.into_iter();
        match (pairs.next(), pairs.next()) {
            (Some((field, value)), None) => Ok(Self { field, value }),
            _ => Err(D::Error::custom(format!(
                "section entries must hold exactly one field (got {count})"
            ))),
        }
    }
}

/// Sections of a single device, in output order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DeviceConfig {
    sections: IndexMap<String, Vec<Entry>>,
}

impl DeviceConfig {
    pub fn sections(&self) -> &IndexMap<String, Vec<Entry>> {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&[Entry]> {
        self.sections.get(name).map(Vec::as_slice)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Vec<Entry>> {
        self.sections.get_mut(name)
    }

    pub fn insert_section(&mut self, name: impl Into<String>, entries: Vec<Entry>) {
        self.sections.insert(name.into(), entries);
    }

    /// First `board-name` entry of the `board-config` section, as text.
    pub fn board_name(&self) -> Option<String> {
        self.section(BOARD_CONFIG_SECTION)?
            .iter()
            .find(|entry| entry.field == BOARD_NAME_FIELD)
            .and_then(|entry| scalar_text(&entry.value))
    }

    fn from_mapping(mapping: Mapping) -> GenResult<Self> {
        let mut device = Self::default();
        for (key, value) in mapping {
            let name = key_text(&key)?;
            let entries = match value {
                Value::Null => Vec::new(),
                Value::Sequence(_) => serde_yaml::from_value(value).map_err(|err| {
                    ConfigGenError::Document(format!("section {name:?}: {err}"))
                })?,
                other => {
                    return Err(ConfigGenError::Document(format!(
                        "section {name:?} must be a list of entries (got {})",
                        kind_of(&other)
                    )))
                }
            };
            device.sections.insert(name, entries);
        }
        Ok(device)
    }
}

/// A configuration document in one of its two shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Single(DeviceConfig),
    Multi(IndexMap<String, DeviceConfig>),
}

impl Document {
    /// Detect the document shape from parsed YAML.
    ///
    /// Top-level lists (or empty sections) mean a single device; top-level
    /// mappings mean device blocks. Mixing the two is rejected.
    pub fn from_value(value: Value) -> GenResult<Self> {
        let top = match value {
            Value::Null => return Ok(Self::Single(DeviceConfig::default())),
            Value::Mapping(top) => top,
            other => {
                return Err(ConfigGenError::Document(format!(
                    "top level must be a mapping (got {})",
                    kind_of(&other)
                )))
            }
        };
        let device_blocks = top.values().filter(|value| value.is_mapping()).count();
        if device_blocks == 0 {
            return DeviceConfig::from_mapping(top).map(Self::Single);
        }
        if device_blocks != top.len() {
            return Err(ConfigGenError::Document(
                "top level mixes device blocks and sections".to_string(),
            ));
        }
        let mut devices = IndexMap::with_capacity(top.len());
        for (key, value) in top {
            let id = key_text(&key)?;
            let Value::Mapping(sections) = value else {
                continue;
            };
            devices.insert(id, DeviceConfig::from_mapping(sections)?);
        }
        Ok(Self::Multi(devices))
    }
}

fn key_text(key: &Value) -> GenResult<String> {
    scalar_text(key).ok_or_else(|| {
        ConfigGenError::Document(format!("keys must be scalars (got {})", kind_of(key)))
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
