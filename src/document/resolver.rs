//! Narrow a document to a single device block.
use super::{DeviceConfig, Document};
use crate::error::{ConfigGenError, GenResult};
use indexmap::IndexMap;

/// What to do when a multi-device document is narrowed without a board name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityMode {
    /// Fail with the candidate names attached.
    Fail,
    /// The caller is asking which boards exist; hand back the names instead.
    ///
    /// Only the `board-config/board-name` lookup uses this mode.
    ListBoardNames,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Narrowed<'a> {
    Device(&'a DeviceConfig),
    BoardNames(Vec<String>),
}

/// Board names of every device block, in document order.
pub fn board_names(document: &Document) -> Vec<String> {
    match document {
        Document::Single(device) => device.board_name().into_iter().collect(),
        Document::Multi(devices) => devices.values().filter_map(DeviceConfig::board_name).collect(),
    }
}

/// Select the device block a lookup applies to.
///
/// Single-device documents are returned as-is whatever name is requested.
pub fn narrow<'a>(
    document: &'a Document,
    board_name: Option<&str>,
    mode: AmbiguityMode,
) -> GenResult<Narrowed<'a>> {
    let devices = match document {
        Document::Single(device) => return Ok(Narrowed::Device(device)),
        Document::Multi(devices) => devices,
    };
    match device_position(devices, board_name) {
        Ok(index) => Ok(Narrowed::Device(&devices[index])),
        Err(ConfigGenError::AmbiguousDevice { .. }) if mode == AmbiguityMode::ListBoardNames => {
            Ok(Narrowed::BoardNames(board_names(document)))
        }
        Err(err) => Err(err),
    }
}

/// Mutable narrowing for updates; ambiguity is always an error here.
pub fn narrow_mut<'a>(
    document: &'a mut Document,
    board_name: Option<&str>,
) -> GenResult<&'a mut DeviceConfig> {
    match document {
        Document::Single(device) => Ok(device),
        Document::Multi(devices) => {
            let index = device_position(devices, board_name)?;
            Ok(&mut devices[index])
        }
    }
}

fn device_position(
    devices: &IndexMap<String, DeviceConfig>,
    board_name: Option<&str>,
) -> GenResult<usize> {
    if let Some(name) = board_name {
        let position = devices
            .values()
            .position(|device| device.board_name().as_deref() == Some(name));
        tracing::debug!(board_name = name, found = position.is_some(), "narrowed document");
        return position.ok_or_else(|| ConfigGenError::DeviceNotFound {
            name: name.to_string(),
        });
    }
    match devices.len() {
        0 => Err(ConfigGenError::Document(
            "document holds no device blocks".to_string(),
        )),
        1 => Ok(0),
        _ => Err(ConfigGenError::AmbiguousDevice {
            names: devices.values().filter_map(DeviceConfig::board_name).collect(),
        }),
    }
}
