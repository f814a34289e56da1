//! Resolved service definitions and the options that configure them.

use crate::field::FieldSpec;
use crate::tools::ToolCapabilitySet;
use serde::{Deserialize, Serialize};

/// The immutable record a service resolves at construction time.
///
/// The registered name is deliberately absent: a definition describes
/// behavior, and the registry binds it to a name exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub title: String,
    pub results_title: String,
    pub template: String,
    pub tools: ToolCapabilitySet,
    pub auto_go: bool,
    pub keep_alive: bool,
    pub fields: Vec<FieldSpec>,
}

/// Caller-supplied overrides applied on top of a service's defaults.
///
/// Absent or empty values fall back to the defaults of the service kind
/// being constructed; no error is raised for an empty override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceOptions {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub results_title: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldSpec>>,
    #[serde(default)]
    pub tools: Option<ToolCapabilitySet>,
    #[serde(default)]
    pub auto_go: Option<bool>,
    #[serde(default)]
    pub keep_alive: Option<bool>,
}

impl ServiceOptions {
    /// Resolve these options against a default definition.
    ///
    /// Empty strings and empty lists count as absent, matching how hosts
    /// hand over partially filled configuration records.
    pub fn resolve(&self, defaults: ServiceDefinition) -> ServiceDefinition {
        ServiceDefinition {
            title: pick_string(&self.title, defaults.title),
            results_title: pick_string(&self.results_title, defaults.results_title),
            template: pick_string(&self.template, defaults.template),
            tools: match &self.tools {
                Some(tools) if !tools.is_empty() => tools.clone(),
                _ => defaults.tools,
            },
            auto_go: self.auto_go.unwrap_or(defaults.auto_go),
            keep_alive: self.keep_alive.unwrap_or(defaults.keep_alive),
            fields: match &self.fields {
                Some(fields) if !fields.is_empty() => fields.clone(),
                _ => defaults.fields,
            },
        }
    }
}

fn pick_string(option: &Option<String>, default: String) -> String {
    match option {
        Some(value) if !value.is_empty() => value.clone(),
        _ => default,
    }
}
