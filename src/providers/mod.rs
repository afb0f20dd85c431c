//! Per-provider static knowledge — categorization, risk weights, critical
//! patterns, action multipliers, deployment speed.
//!
//! Each supported provider is one [`ProviderModel`] value: a plain data
//! record plus a recommendation generator function, no runtime subclassing.
//! Models are immutable after construction and contain no per-plan state,
//! so a single instance can be shared across assessments.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::plan::Action;

mod aws;
mod azure;
mod gcp;

/// Provider id used for resources no active provider claims.
pub const UNKNOWN_PROVIDER: &str = "unknown";

/// Flat base score applied to resources of unknown providers.
pub const UNKNOWN_BASE_SCORE: f64 = 4.0;

/// Action multipliers applied when no provider claims a resource. There is
/// no replace entry; replace falls back to 1.0 like any absent action.
pub const DEFAULT_ACTION_MULTIPLIERS: ActionMultipliers = ActionMultipliers {
    create: 1.0,
    update: 1.5,
    delete: 2.5,
    replace: None,
};

/// Unified resource categories across all cloud providers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Compute,
    Networking,
    Storage,
    Database,
    Security,
    Identity,
    Monitoring,
    Serverless,
    Container,
    Analytics,
    Unknown,
}

impl ResourceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Compute => "compute",
            ResourceCategory::Networking => "networking",
            ResourceCategory::Storage => "storage",
            ResourceCategory::Database => "database",
            ResourceCategory::Security => "security",
            ResourceCategory::Identity => "identity",
            ResourceCategory::Monitoring => "monitoring",
            ResourceCategory::Serverless => "serverless",
            ResourceCategory::Container => "container",
            ResourceCategory::Analytics => "analytics",
            ResourceCategory::Unknown => "unknown",
        }
    }

    /// Default risk weight for resource types with no direct table entry.
    pub fn default_weight(&self) -> f64 {
        match self {
            ResourceCategory::Security
            | ResourceCategory::Database
            | ResourceCategory::Identity => 8.0,
            ResourceCategory::Networking => 7.0,
            ResourceCategory::Storage => 6.0,
            ResourceCategory::Compute
            | ResourceCategory::Serverless
            | ResourceCategory::Container => 5.0,
            ResourceCategory::Analytics => 4.0,
            ResourceCategory::Monitoring => 3.0,
            ResourceCategory::Unknown => 4.0,
        }
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered keyword groups for categorizing resource types with no direct
/// map entry. First matching group wins.
const CATEGORY_KEYWORDS: &[(ResourceCategory, &[&str])] = &[
    (ResourceCategory::Compute, &["vm", "instance", "compute", "server"]),
    (
        ResourceCategory::Networking,
        &["network", "vpc", "subnet", "gateway", "lb", "firewall"],
    ),
    (
        ResourceCategory::Storage,
        &["storage", "disk", "volume", "bucket", "blob"],
    ),
    (
        ResourceCategory::Database,
        &["database", "db", "sql", "nosql", "redis", "mongo"],
    ),
    (
        ResourceCategory::Security,
        &["security", "firewall", "policy", "role", "iam"],
    ),
];

/// Per-action risk multipliers for one provider.
#[derive(Debug, Clone, Copy)]
pub struct ActionMultipliers {
    pub create: f64,
    pub update: f64,
    pub delete: f64,
    /// Providers without a replace entry fall back to 1.0.
    pub replace: Option<f64>,
}

impl ActionMultipliers {
    /// Multiplier for one action. Actions outside the table contribute 1.0.
    pub fn for_action(&self, action: Action) -> f64 {
        match action {
            Action::Create => self.create,
            Action::Update => self.update,
            Action::Delete => self.delete,
            Action::Replace => self.replace.unwrap_or(1.0),
            Action::NoOp | Action::Other => 1.0,
        }
    }
}

/// Borrowed view of one assessed change, handed to a provider's
/// recommendation generator.
#[derive(Debug, Clone, Copy)]
pub struct ChangeView<'a> {
    pub resource_type: &'a str,
    pub address: &'a str,
    pub actions: &'a [String],
}

impl ChangeView<'_> {
    pub fn has_action(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }
}

/// Signature of a provider's recommendation generator.
pub type RecommendFn = fn(&[ChangeView<'_>]) -> Vec<String>;

/// Static per-provider knowledge. One instance per provider identifier.
#[derive(Debug, Clone)]
pub struct ProviderModel {
    id: &'static str,
    categories: HashMap<&'static str, ResourceCategory>,
    risk_weights: HashMap<&'static str, f64>,
    critical_patterns: &'static [&'static str],
    action_multipliers: ActionMultipliers,
    deployment_multiplier: f64,
    recommend: RecommendFn,
}

impl ProviderModel {
    /// Canonical provider identifier, e.g. `aws`.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Categorize a resource type. Falls back to keyword matching against
    /// the ordered category groups, else [`ResourceCategory::Unknown`].
    pub fn category_of(&self, resource_type: &str) -> ResourceCategory {
        if let Some(category) = self.categories.get(resource_type) {
            return *category;
        }
        let lower = resource_type.to_lowercase();
        for (category, keywords) in CATEGORY_KEYWORDS {
            if keywords.iter().any(|k| lower.contains(k)) {
                return *category;
            }
        }
        ResourceCategory::Unknown
    }

    /// Risk weight for a resource type, in [0, 10]. Types outside the
    /// direct table fall back to their category's default weight.
    pub fn risk_weight_of(&self, resource_type: &str) -> f64 {
        match self.risk_weights.get(resource_type) {
            Some(weight) => *weight,
            None => self.category_of(resource_type).default_weight(),
        }
    }

    /// True when any critical pattern occurs in the lowercased type.
    pub fn is_critical(&self, resource_type: &str) -> bool {
        let lower = resource_type.to_lowercase();
        self.critical_patterns.iter().any(|p| lower.contains(p))
    }

    /// Multiplier for one action.
    pub fn action_multiplier(&self, action: Action) -> f64 {
        self.action_multipliers.for_action(action)
    }

    /// Maximum multiplier across an action set. A replace-triggering
    /// delete+create pair takes the higher of the two.
    pub fn max_action_multiplier(&self, actions: impl Iterator<Item = Action>) -> f64 {
        actions
            .map(|a| self.action_multiplier(a))
            .fold(1.0_f64, f64::max)
    }

    /// Relative speed of this provider's change-application API.
    pub fn deployment_multiplier(&self) -> f64 {
        self.deployment_multiplier
    }

    /// True when this provider claims the resource type: either its own
    /// `<id>_` namespace prefix or a direct category-map entry.
    pub fn supports(&self, resource_type: &str) -> bool {
        let mut namespace = String::with_capacity(self.id.len() + 1);
        namespace.push_str(self.id);
        namespace.push('_');
        resource_type.starts_with(&namespace) || self.categories.contains_key(resource_type)
    }

    /// Provider-specific recommendations for this provider's share of the
    /// plan. Lines come back unprefixed; the engine adds `[PROVIDER] `.
    pub fn recommendations(&self, changes: &[ChangeView<'_>]) -> Vec<String> {
        (self.recommend)(changes)
    }
}

/// Built-in model for a canonical hyperscaler id, if one exists.
pub fn builtin(id: &str) -> Option<ProviderModel> {
    match id {
        "aws" => Some(aws::model()),
        "azure" => Some(azure::model()),
        "google" => Some(gcp::model()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids() {
        for id in ["aws", "azure", "google"] {
            let model = builtin(id).unwrap();
            assert_eq!(model.id(), id);
        }
        assert!(builtin("kubernetes").is_none());
        assert!(builtin("unknown").is_none());
    }

    #[test]
    fn test_category_keyword_fallback_order() {
        let model = builtin("aws").unwrap();
        // "firewall" appears in both networking and security groups;
        // networking comes first.
        assert_eq!(
            model.category_of("mycorp_firewall_rule"),
            ResourceCategory::Networking
        );
        assert_eq!(
            model.category_of("mycorp_server_fleet"),
            ResourceCategory::Compute
        );
        assert_eq!(model.category_of("mycorp_widget"), ResourceCategory::Unknown);
    }

    #[test]
    fn test_weight_fallback_uses_category_defaults() {
        let model = builtin("aws").unwrap();
        // Not in the direct weight table; categorizes as database.
        assert_eq!(model.risk_weight_of("aws_docdb_cluster"), 8.0);
        // Completely unknown type.
        assert_eq!(model.risk_weight_of("mycorp_widget"), 4.0);
    }

    #[test]
    fn test_default_action_multipliers_replace_falls_back() {
        assert_eq!(DEFAULT_ACTION_MULTIPLIERS.for_action(Action::Replace), 1.0);
        assert_eq!(DEFAULT_ACTION_MULTIPLIERS.for_action(Action::Delete), 2.5);
    }

    #[test]
    fn test_all_tabled_weights_in_range() {
        for id in ["aws", "azure", "google"] {
            let model = builtin(id).unwrap();
            for (resource_type, weight) in &model.risk_weights {
                assert!(
                    (0.0..=10.0).contains(weight),
                    "{id}: {resource_type} weight {weight} out of range"
                );
            }
        }
    }

    #[test]
    fn test_supports_namespace_and_map_entries() {
        let aws = builtin("aws").unwrap();
        assert!(aws.supports("aws_s3_bucket"));
        assert!(aws.supports("aws_not_in_any_table"));
        assert!(!aws.supports("azurerm_subnet"));

        // Azure resource types do not start with "azure_", so support comes
        // from the category map.
        let azure = builtin("azure").unwrap();
        assert!(azure.supports("azurerm_virtual_network"));
        assert!(!azure.supports("azurerm_not_in_any_table"));
    }
}
