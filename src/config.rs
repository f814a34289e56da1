//! Configuration System
//!
//! Layered configuration for hosts and services: global file, workspace
//! files, environment-specific overrides. Validation runs before anything is
//! constructed from the result.

use crate::logging::LoggingConfig;
use crate::query::record::Feature;
use crate::service::ServiceConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapQueryConfig {
    /// Workspace root path (defaults to current directory)
    pub workspace_root: Option<PathBuf>,

    /// Query service definitions, keyed by registered name
    #[serde(default)]
    pub services: HashMap<String, ServiceConfig>,

    /// Layers the in-memory host serves
    #[serde(default)]
    pub layers: Vec<LayerConfig>,

    /// Named feature templates, keyed by template name
    #[serde(default)]
    pub templates: HashMap<String, String>,

    /// System-wide settings
    #[serde(default)]
    pub system: SystemConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// One layer entry for the in-memory host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Layer path, `mapsource/layer`
    pub path: String,

    /// Whether the layer participates in select-style queries
    #[serde(default = "default_queryable")]
    pub queryable: bool,

    /// Features served for this layer
    #[serde(default)]
    pub features: Vec<Feature>,
}

fn default_queryable() -> bool {
    true
}

/// System-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Default workspace root (if not specified)
    #[serde(default = "default_workspace_root")]
    pub default_workspace_root: PathBuf,
}

fn default_workspace_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            default_workspace_root: default_workspace_root(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Service(String, String),
    Layer(String, String),
    System(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Service(name, msg) => {
                write!(f, "Service '{}': {}", name, msg)
            }
            ValidationError::Layer(path, msg) => {
                write!(f, "Layer '{}': {}", path, msg)
            }
            ValidationError::System(msg) => {
                write!(f, "System: {}", msg)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl SystemConfig {
    /// Validate system configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_workspace_root.as_os_str().is_empty() {
            return Err("Default workspace root cannot be empty".to_string());
        }
        Ok(())
    }
}

impl MapQueryConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Validate service tool sets
        for (name, service) in &self.services {
            if let Some(tools) = &service.options.tools {
                if let Err(e) = tools.validate() {
                    errors.push(ValidationError::Service(name.clone(), e));
                }
            }
        }

        // Validate layers
        let mut seen = HashMap::new();
        for (index, layer) in self.layers.iter().enumerate() {
            if layer.path.is_empty() {
                errors.push(ValidationError::Layer(
                    format!("#{}", index),
                    "Layer path cannot be empty".to_string(),
                ));
                continue;
            }
            if let Some(existing) = seen.insert(&layer.path, index) {
                errors.push(ValidationError::Layer(
                    layer.path.clone(),
                    format!("Duplicate layer path (also defined at #{})", existing),
                ));
            }
        }

        // Validate system config
        if let Err(e) = self.system.validate() {
            errors.push(ValidationError::System(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
