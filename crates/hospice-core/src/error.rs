//! Error types for Hospice operations.
//!
//! Only configuration and input problems reach the caller of an optimization
//! run. Store failures inside a run are downgraded to degraded persistence;
//! an empty candidate set at admission time is `Ok(None)`, not an error.

use thiserror::Error;

/// Result type for Hospice operations.
pub type Result<T> = std::result::Result<T, HospiceError>;

/// Result type for pheromone store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during Hospice operations.
#[derive(Error, Debug, Clone)]
pub enum HospiceError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The external bed provider failed.
    #[error("Bed provider error: {0}")]
    Provider(String),
}

/// Configuration errors, raised before any simulation starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Problems with the bed working set that cannot be resolved by fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Bed at index {0} has an empty id")]
    EmptyId(usize),

    #[error("Duplicate bed id: {0}")]
    DuplicateId(String),
}

/// Pheromone persistence failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl HospiceError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        HospiceError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        })
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        HospiceError::Provider(msg.into())
    }
}
