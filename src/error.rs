//! Error taxonomy for template interpretation and document editing.
//!
//! Command runners wrap these in `anyhow` with context; the variants stay typed
//! so tests and callers can match on the failure category.
use thiserror::Error;

/// Failures raised by the template engine, document resolver, and field editor.
#[derive(Debug, Error)]
pub enum ConfigGenError {
    /// Template missing or malformed.
    #[error("template error: {0}")]
    Schema(String),

    /// A declared callback is unknown or failed while producing a default.
    #[error("callback {name:?} failed: {reason}")]
    Callback { name: String, reason: String },

    /// Multi-device document with no board name requested.
    #[error("multiple devices found, a board name is required (found: {})", names.join(", "))]
    AmbiguousDevice { names: Vec<String> },

    /// Requested board name not present in a multi-device document.
    #[error("no such device {name:?}")]
    DeviceNotFound { name: String },

    /// Section or field absent from the narrowed document.
    #[error("field or section does not exist: {section}/{field}")]
    FieldNotFound { section: String, field: String },

    /// Stable device path does not resolve to a live device node.
    #[error("device {path:?} is not currently present")]
    DeviceTranslation { path: String },

    /// Existing document does not have a recognizable shape.
    #[error("malformed document: {0}")]
    Document(String),

    /// The bounded re-prompt loop for a required field ran out of attempts.
    #[error("required field {field:?} left empty after {attempts} attempts")]
    RequiredFieldUnanswered { field: String, attempts: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type GenResult<T> = std::result::Result<T, ConfigGenError>;
