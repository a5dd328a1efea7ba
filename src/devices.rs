//! Translation from stable device links to live device nodes.
use crate::error::{ConfigGenError, GenResult};
use std::fs;
use std::path::Path;

/// Resolves a stable device path (such as `/dev/serial/by-id/...`) to the
/// node currently assigned to it.
pub trait DevicePathTranslator {
    fn resolve(&self, stable_path: &str) -> GenResult<String>;
}

/// Follows the udev-maintained symlink to its target node.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkTranslator;

impl DevicePathTranslator for LinkTranslator {
    fn resolve(&self, stable_path: &str) -> GenResult<String> {
        let live = fs::canonicalize(Path::new(stable_path)).map_err(|err| {
            tracing::debug!(path = stable_path, error = %err, "device link did not resolve");
            ConfigGenError::DeviceTranslation {
                path: stable_path.to_string(),
            }
        })?;
        Ok(live.display().to_string())
    }
}
