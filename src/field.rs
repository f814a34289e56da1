//! Declarative input controls and submitted values.
//!
//! A service definition carries a list of `FieldSpec`s describing the inputs
//! its tool should render. At query time the host submits one `FieldValue`
//! per rendered control, positionally aligned with the specs.

use serde::{Deserialize, Serialize};

/// Kind of input control a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Select,
    Text,
}

/// One choice in a `select` field. Options order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declarative description of one input control. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

impl FieldSpec {
    /// A free-form text field.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Text,
            name: name.into(),
            label: label.into(),
            options: Vec::new(),
        }
    }

    /// A dropdown field with the given options.
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FieldOption>,
    ) -> Self {
        Self {
            kind: FieldKind::Select,
            name: name.into(),
            label: label.into(),
            options,
        }
    }
}

/// One submitted input value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: String,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
