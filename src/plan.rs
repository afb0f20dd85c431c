//! Input data model — the Terraform plan JSON shape the engine consumes.
//!
//! Deserialization is deliberately tolerant: every field defaults when
//! absent, and unknown fields are ignored. A resource change missing its
//! `type` or `address` deserializes with empty strings and is filtered out
//! downstream instead of failing the whole plan.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::PlanError;

/// Attribute keys that indicate credential material in a post-change map.
const SENSITIVE_KEYS: [&str; 4] = ["password", "secret", "key", "token"];

/// Sentinel value Terraform substitutes for redacted attribute values.
const SENSITIVE_MARKER: &str = "(sensitive)";

/// A Terraform plan, reduced to the fields the risk engine reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Plan {
    /// Proposed resource transitions, one per resource instance.
    #[serde(default)]
    pub resource_changes: Vec<ResourceChange>,
    /// The `configuration` block, read for provider declarations.
    #[serde(default)]
    pub configuration: Configuration,
}

impl Plan {
    /// Deserialize a plan from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, PlanError> {
        if !value.is_object() {
            return Err(PlanError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Deserialize a plan from raw JSON text.
    pub fn from_json(text: &str) -> Result<Self, PlanError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Changes that carry at least one action other than `no-op`.
    pub fn actionable_changes(&self) -> impl Iterator<Item = &ResourceChange> {
        self.resource_changes.iter().filter(|c| c.is_actionable())
    }
}

/// The `configuration` block of a plan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Configuration {
    /// Provider blocks keyed by their (possibly registry-qualified) name.
    #[serde(default)]
    pub provider_config: BTreeMap<String, Value>,
}

/// One resource instance's proposed transition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceChange {
    /// Resource type identifier, e.g. `aws_s3_bucket`.
    #[serde(rename = "type", default)]
    pub resource_type: String,
    /// Full resource address, e.g. `module.net.aws_vpc.main`.
    #[serde(default)]
    pub address: String,
    /// The proposed change itself.
    #[serde(default)]
    pub change: ChangeDetail,
}

impl ResourceChange {
    /// A change counts toward the assessment when it names a resource type
    /// and its action set is neither empty nor pure no-op.
    pub fn is_actionable(&self) -> bool {
        !self.resource_type.is_empty()
            && self
                .change
                .actions
                .iter()
                .any(|a| Action::parse(a) != Action::NoOp)
    }

    /// Parsed view of the raw action strings.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.change.actions.iter().map(|a| Action::parse(a))
    }

    /// True when the post-change attribute map carries the `(sensitive)`
    /// marker or an attribute key that names a credential.
    pub fn has_sensitive_values(&self) -> bool {
        let Some(Value::Object(after)) = &self.change.after else {
            return false;
        };
        after.iter().any(|(key, value)| {
            value.as_str() == Some(SENSITIVE_MARKER)
                || SENSITIVE_KEYS.contains(&key.to_lowercase().as_str())
        })
    }
}

/// The `change` object inside a resource change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeDetail {
    /// Raw action strings as emitted by Terraform.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Post-change attribute values; `null` for deletions.
    #[serde(default)]
    pub after: Option<Value>,
}

/// A plan action. Unrecognized action strings parse to [`Action::Other`]
/// and carry no extra risk weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Update,
    Delete,
    Replace,
    NoOp,
    Other,
}

impl Action {
    /// Parse one action string. Never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "create" => Action::Create,
            "update" => Action::Update,
            "delete" => Action::Delete,
            "replace" => Action::Replace,
            "no-op" => Action::NoOp,
            _ => Action::Other,
        }
    }
}
