//! Tool capability sets for service definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Map of drawing-tool name to enabled flag, with a reserved slot naming the
/// tool the host should activate by default.
///
/// Invariant: `default`, if present, must name a tool that is present and
/// enabled. `validate()` reports a violation; construction never panics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolCapabilitySet {
    #[serde(default)]
    pub enabled: BTreeMap<String, bool>,
    #[serde(default)]
    pub default: Option<String>,
}

impl ToolCapabilitySet {
    /// No drawing tools at all (attribute-only services).
    pub fn none() -> Self {
        Self::default()
    }

    /// The stock spatial tool set: Point, Line, Polygon plus buffer support,
    /// defaulting to Polygon.
    pub fn spatial() -> Self {
        let mut enabled = BTreeMap::new();
        enabled.insert("Point".to_string(), true);
        enabled.insert("Line".to_string(), true);
        enabled.insert("Polygon".to_string(), true);
        enabled.insert("buffer".to_string(), true);
        Self {
            enabled,
            default: Some("Polygon".to_string()),
        }
    }

    pub fn with_tool(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.enabled.insert(name.into(), enabled);
        self
    }

    pub fn with_default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.get(name).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty() && self.default.is_none()
    }

    /// Check the default-tool invariant.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref default) = self.default {
            match self.enabled.get(default) {
                Some(true) => {}
                Some(false) => {
                    return Err(format!("Default tool '{}' is not enabled", default));
                }
                None => {
                    return Err(format!("Default tool '{}' is not in the tool set", default));
                }
            }
        }
        Ok(())
    }
}
