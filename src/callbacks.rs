//! Named value-producing callbacks referenced from templates.
//!
//! Templates name a callback by string; the registry maps each name to a typed
//! function at startup so unknown names fail before any prompting starts.
use crate::error::{ConfigGenError, GenResult};
use crate::settings::Settings;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extra help text and dynamic default produced by a callback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackOutput {
    pub extra_help: Option<String>,
    pub default: Option<Value>,
}

type CallbackFn = Box<dyn Fn() -> Result<CallbackOutput, String>>;

/// Name-to-function table for template callbacks.
#[derive(Default)]
pub struct CallbackRegistry {
    entries: BTreeMap<String, CallbackFn>,
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CallbackRegistry {
    /// Registry with `get_uarts` and `get_nics` scanning the configured host paths.
    pub fn with_builtins(settings: &Settings) -> Self {
        let mut registry = Self::default();
        let uart_dir = settings.uart_scan_dir.clone();
        registry.register("get_uarts", move || scan_uarts(&uart_dir));
        let net_dir = settings.net_class_dir.clone();
        let nic_filter = settings.nic_filter.clone();
        registry.register("get_nics", move || scan_nics(&net_dir, &nic_filter));
        registry
    }

    pub fn register<F>(&mut self, name: &str, callback: F)
    where
        F: Fn() -> Result<CallbackOutput, String> + 'static,
    {
        self.entries.insert(name.to_string(), Box::new(callback));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Run a callback by name; unknown names and callback failures are fatal.
    pub fn invoke(&self, name: &str) -> GenResult<CallbackOutput> {
        let callback = self.entries.get(name).ok_or_else(|| ConfigGenError::Callback {
            name: name.to_string(),
            reason: "unknown callback".to_string(),
        })?;
        let output = callback().map_err(|reason| ConfigGenError::Callback {
            name: name.to_string(),
            reason,
        })?;
        tracing::debug!(
            callback = name,
            has_default = output.default.is_some(),
            "invoked callback"
        );
        Ok(output)
    }
}

/// Sorted entry paths of `dir`; a missing directory yields nothing.
fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(format!("read {}: {err}", dir.display())),
    };
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| format!("read {}: {err}", dir.display()))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn scan_uarts(dir: &Path) -> Result<CallbackOutput, String> {
    let links: Vec<String> = list_dir(dir)?
        .into_iter()
        .map(|path| path.display().to_string())
        .collect();
    let Some(last) = links.last() else {
        return Ok(CallbackOutput::default());
    };
    Ok(CallbackOutput {
        extra_help: Some(format!("\n(Found: {}) ", links.join("\n"))),
        default: Some(Value::from(last.as_str())),
    })
}

fn scan_nics(dir: &Path, filter: &[String]) -> Result<CallbackOutput, String> {
    let nics: Vec<String> = list_dir(dir)?
        .into_iter()
        .filter_map(|path| path.file_name().map(|name| name.to_string_lossy().to_string()))
        .filter(|name| !filter.contains(name))
        .collect();
    let Some(last) = nics.last() else {
        return Ok(CallbackOutput::default());
    };
    Ok(CallbackOutput {
        extra_help: Some(format!("\n(Found: {}) ", nics.join(", "))),
        default: Some(Value::from(last.as_str())),
    })
}
