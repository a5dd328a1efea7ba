//! Catalogue of supported hardware profiles shipped with the binary.
use crate::resources::BOARD_TABLE_YAML;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_yaml::Value;

/// Board names from the embedded table, keeping those containing `filter`.
pub fn supported_boards(filter: Option<&str>) -> Result<Vec<String>> {
    let table: IndexMap<String, Value> =
        serde_yaml::from_str(BOARD_TABLE_YAML).context("parse embedded board table")?;
    let filter = filter.map(str::trim).filter(|text| !text.is_empty());
    Ok(table
        .into_keys()
        .filter(|name| filter.is_none_or(|text| name.contains(text)))
        .collect())
}
