//! Accumulates resolved entries into a device document.
use crate::document::{DeviceConfig, Entry};

/// Collects entries section by section in template order.
///
/// Only opened sections appear in the result; an opened section with no
/// answers is kept as an empty list.
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    device: DeviceConfig,
    open: Option<(String, Vec<Entry>)>,
}

impl DocumentAssembler {
    pub fn open_section(&mut self, name: &str) {
        self.close_section();
        self.open = Some((name.to_string(), Vec::new()));
    }

    pub fn push(&mut self, entry: Entry) {
        if let Some((_, entries)) = self.open.as_mut() {
            entries.push(entry);
        }
    }

    pub fn close_section(&mut self) {
        if let Some((name, entries)) = self.open.take() {
            self.device.insert_section(name, entries);
        }
    }

    pub fn finish(mut self) -> DeviceConfig {
        self.close_section();
        self.device
    }
}
