//! Error types for the query-service framework.

use thiserror::Error;

/// Service and framework errors.
///
/// Configuration defaulting is silent and per-layer query failures surface
/// only through `failed` flags on the completed record, so this taxonomy
/// covers the registry, dispatch, and ambient configuration paths.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Service already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Query dispatch failed for '{service}': {reason}")]
    DispatchFailed { service: String, reason: String },

    #[error("Invalid service definition for '{service}': {reason}")]
    InvalidDefinition { service: String, reason: String },

    #[error("Completion channel closed")]
    CompletionChannelClosed,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ServiceError {
    fn from(err: config::ConfigError) -> Self {
        ServiceError::ConfigError(err.to_string())
    }
}
