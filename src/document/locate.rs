//! Read or overwrite one field of a narrowed document.
use super::{DeviceConfig, Entry, UART_ADDRESS_FIELD, UART_CONFIG_SECTION};
use crate::devices::DevicePathTranslator;
use crate::error::{ConfigGenError, GenResult};
use crate::value::{display_value, scalar_text};
use serde_yaml::Value;

/// Before/after values of a field update.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub section: String,
    pub field: String,
    pub previous: Value,
    pub current: Value,
}

/// Return a field's value, translating the UART address to its live node.
pub fn read_field(
    device: &DeviceConfig,
    section: &str,
    field: &str,
    translator: &dyn DevicePathTranslator,
) -> GenResult<Value> {
    let entry = find_entry(device.section(section), section, field)?;
    if section == UART_CONFIG_SECTION && field == UART_ADDRESS_FIELD {
        let stable = scalar_text(&entry.value).ok_or_else(|| ConfigGenError::DeviceTranslation {
            path: display_value(&entry.value),
        })?;
        let live = translator.resolve(&stable)?;
        return Ok(Value::from(live));
    }
    tracing::info!(section, field, value = %display_value(&entry.value), "read field");
    Ok(entry.value.clone())
}

/// Replace the first matching entry's value.
pub fn write_field(
    device: &mut DeviceConfig,
    section: &str,
    field: &str,
    value: Value,
) -> GenResult<FieldUpdate> {
    let not_found = || ConfigGenError::FieldNotFound {
        section: section.to_string(),
        field: field.to_string(),
    };
    let entry = device
        .section_mut(section)
        .ok_or_else(not_found)?
        .iter_mut()
        .find(|entry| entry.field == field)
        .ok_or_else(not_found)?;
    let previous = std::mem::replace(&mut entry.value, value);
    let update = FieldUpdate {
        section: section.to_string(),
        field: field.to_string(),
        previous,
        current: entry.value.clone(),
    };
    tracing::info!(
        section,
        field,
        previous = %display_value(&update.previous),
        current = %display_value(&update.current),
        "updated field"
    );
    Ok(update)
}

fn find_entry<'a>(entries: Option<&'a [Entry]>, section: &str, field: &str) -> GenResult<&'a Entry> {
    entries
        .and_then(|entries| entries.iter().find(|entry| entry.field == field))
        .ok_or_else(|| ConfigGenError::FieldNotFound {
            section: section.to_string(),
            field: field.to_string(),
        })
}
