//! Cloud-provider detection from Terraform plan data.
//!
//! Classification runs over explicit ordered rule tables: a prefix tier,
//! then a regex tier for qualified data sources. Within each tier,
//! providers are tried in a fixed priority order and the first match wins.
//! Types no rule matches are attributed to no provider.

use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::plan::Plan;

/// The three hyperscaler identifiers that count toward the multi-cloud flag.
/// Auxiliary providers (orchestration, infra utilities) do not.
pub const CLOUD_PROVIDER_IDS: [&str; 3] = ["aws", "azure", "google"];

/// Weight of the resource-distribution term in the confidence score.
const RESOURCE_CONFIDENCE_WEIGHT: f64 = 0.8;

/// Weight of the configuration-block term in the confidence score.
const CONFIG_CONFIDENCE_WEIGHT: f64 = 0.2;

/// Confidence below which a detection is flagged as low confidence.
const LOW_CONFIDENCE_THRESHOLD: f64 = 0.1;

/// One provider's detection rule set.
#[derive(Debug)]
struct ProviderRule {
    id: &'static str,
    prefixes: &'static [&'static str],
    /// Anchored patterns derived from the prefixes, matching both the bare
    /// form and the `data.<prefix>` qualified form for data sources.
    patterns: Vec<Regex>,
}

impl ProviderRule {
    fn new(id: &'static str, prefixes: &'static [&'static str]) -> Self {
        let patterns = prefixes
            .iter()
            .flat_map(|p| {
                let escaped = regex::escape(p);
                [
                    Regex::new(&format!("^{escaped}.*")).unwrap(),
                    Regex::new(&format!(r"^data\.{escaped}.*")).unwrap(),
                ]
            })
            .collect();
        Self {
            id,
            prefixes,
            patterns,
        }
    }
}

/// Classifies resource types and configuration blocks into provider
/// identifiers, and scores per-provider confidence across a whole plan.
#[derive(Debug)]
pub struct ProviderDetector {
    rules: Vec<ProviderRule>,
}

impl Default for ProviderDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderDetector {
    pub fn new() -> Self {
        Self {
            rules: vec![
                ProviderRule::new("aws", &["aws_"]),
                ProviderRule::new("azure", &["azurerm_", "azuread_", "azurestack_"]),
                ProviderRule::new("google", &["google_", "google-beta_"]),
                ProviderRule::new("kubernetes", &["kubernetes_", "helm_"]),
                ProviderRule::new(
                    "terraform",
                    &["terraform_", "tfe_", "tls_", "random_", "local_", "null_"],
                ),
            ],
        }
    }

    /// Classify a single resource type string. Types no rule matches
    /// contribute to no provider.
    pub fn classify(&self, resource_type: &str) -> Option<&'static str> {
        if resource_type.is_empty() {
            return None;
        }
        // Prefix tier.
        for rule in &self.rules {
            if rule.prefixes.iter().any(|p| resource_type.starts_with(p)) {
                return Some(rule.id);
            }
        }
        // Regex tier: catches `data.<prefix>` qualified data sources.
        for rule in &self.rules {
            if rule.patterns.iter().any(|p| p.is_match(resource_type)) {
                return Some(rule.id);
            }
        }
        None
    }

    /// Detect providers across an entire plan: resource distribution,
    /// per-provider confidence, primary provider, multi-cloud flag, and
    /// detection-level recommendations.
    pub fn detect(&self, plan: &Plan) -> DetectionResult {
        let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_actionable = 0usize;
        for change in plan.actionable_changes() {
            total_actionable += 1;
            if let Some(id) = self.classify(&change.resource_type) {
                *distribution.entry(id.to_string()).or_default() += 1;
            }
        }

        let config_providers = detect_config_providers(plan);

        let mut all_providers: BTreeSet<String> = distribution.keys().cloned().collect();
        all_providers.extend(config_providers.iter().cloned());

        let mut provider_confidence = BTreeMap::new();
        for provider in &all_providers {
            let resource_count = distribution.get(provider).copied().unwrap_or(0);
            let config_detected = config_providers.contains(provider);
            let resource_term = if total_actionable > 0 {
                resource_count as f64 / total_actionable as f64
            } else {
                0.0
            };
            let config_term = if config_detected { 1.0 } else { 0.0 };
            let score = RESOURCE_CONFIDENCE_WEIGHT * resource_term
                + CONFIG_CONFIDENCE_WEIGHT * config_term;
            let percentage = resource_term * 100.0;
            provider_confidence.insert(
                provider.clone(),
                ProviderConfidence {
                    score,
                    resource_count,
                    config_detected,
                    percentage,
                },
            );
        }

        // Highest confidence wins; exact ties go to the lexicographically
        // smallest id because iteration is ordered and the comparison is
        // strict.
        let mut primary_provider: Option<String> = None;
        let mut best = f64::NEG_INFINITY;
        for (provider, confidence) in &provider_confidence {
            if confidence.score > best {
                best = confidence.score;
                primary_provider = Some(provider.clone());
            }
        }

        let cloud_providers: Vec<&String> = all_providers
            .iter()
            .filter(|p| CLOUD_PROVIDER_IDS.contains(&p.as_str()))
            .collect();
        let multi_cloud = cloud_providers.len() > 1;

        let recommendations =
            detection_recommendations(&provider_confidence, multi_cloud, &cloud_providers);

        tracing::debug!(
            providers = all_providers.len(),
            multi_cloud,
            primary = primary_provider.as_deref().unwrap_or("none"),
            "provider detection complete"
        );

        DetectionResult {
            primary_provider,
            all_providers,
            resource_distribution: distribution,
            multi_cloud,
            provider_confidence,
            recommendations,
        }
    }
}

/// Providers declared in the plan's `configuration.provider_config` block,
/// canonicalized.
fn detect_config_providers(plan: &Plan) -> BTreeSet<String> {
    plan.configuration
        .provider_config
        .keys()
        .map(|name| canonical_config_provider(name))
        .collect()
}

/// Canonicalize a provider block name: strip any
/// `registry.<host>/<namespace>/` qualification and fold aliases onto one
/// identifier.
fn canonical_config_provider(name: &str) -> String {
    let name = if name.starts_with("registry.") {
        name.rsplit('/').next().unwrap_or(name)
    } else {
        name
    };
    match name {
        "azurerm" | "azuread" => "azure".to_string(),
        "google-beta" => "google".to_string(),
        other => other.to_string(),
    }
}

fn detection_recommendations(
    provider_confidence: &BTreeMap<String, ProviderConfidence>,
    multi_cloud: bool,
    cloud_providers: &[&String],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if multi_cloud {
        let names: Vec<&str> = cloud_providers.iter().map(|p| p.as_str()).collect();
        recommendations.push(format!(
            "Multi-cloud deployment detected with {} providers: {}",
            cloud_providers.len(),
            names.join(", ")
        ));
        recommendations
            .push("Consider reviewing cross-cloud networking and security configurations".into());
        recommendations.push("Multi-cloud setups may have additional data transfer costs".into());
    }

    let low_confidence: Vec<&str> = provider_confidence
        .iter()
        .filter(|(_, c)| c.score < LOW_CONFIDENCE_THRESHOLD && c.resource_count > 0)
        .map(|(p, _)| p.as_str())
        .collect();
    if !low_confidence.is_empty() {
        recommendations.push(format!(
            "Low confidence detection for: {}",
            low_confidence.join(", ")
        ));
    }

    let utilities: Vec<&str> = provider_confidence
        .keys()
        .filter(|p| matches!(p.as_str(), "terraform" | "kubernetes"))
        .map(|p| p.as_str())
        .collect();
    if !utilities.is_empty() {
        recommendations.push(format!(
            "Infrastructure utilities detected: {}",
            utilities.join(", ")
        ));
    }

    recommendations
}

/// Per-provider confidence that the provider is present in a plan.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderConfidence {
    /// Combined confidence in [0, 1].
    pub score: f64,
    /// Actionable resources attributed to this provider.
    pub resource_count: usize,
    /// Whether a configuration block declared this provider.
    pub config_detected: bool,
    /// Share of actionable resources, in percent.
    pub percentage: f64,
}

/// Outcome of provider detection over one plan. Derived fresh per plan and
/// never mutated afterward.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    pub primary_provider: Option<String>,
    pub all_providers: BTreeSet<String>,
    pub resource_distribution: BTreeMap<String, usize>,
    pub multi_cloud: bool,
    pub provider_confidence: BTreeMap<String, ProviderConfidence>,
    pub recommendations: Vec<String>,
}

impl DetectionResult {
    /// One-line human-readable description of the detection outcome.
    pub fn summary(&self) -> String {
        if self.all_providers.is_empty() {
            return "No cloud providers detected".to_string();
        }
        let primary = self.primary_provider.as_deref().unwrap_or("unknown");
        let total = self.all_providers.len();
        if self.multi_cloud {
            let clouds: Vec<&str> = self
                .all_providers
                .iter()
                .filter(|p| CLOUD_PROVIDER_IDS.contains(&p.as_str()))
                .map(|p| p.as_str())
                .collect();
            format!(
                "Multi-cloud setup: Primary {}, {} total providers ({})",
                primary.to_uppercase(),
                total,
                clouds.join(", ")
            )
        } else if CLOUD_PROVIDER_IDS.contains(&primary) {
            format!("Single cloud provider: {}", primary.to_uppercase())
        } else {
            format!("Primary provider: {primary}, {total} total providers")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Plan;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn plan(value: serde_json::Value) -> Plan {
        Plan::from_value(value).unwrap()
    }

    #[test]
    fn test_classify_prefixes() {
        let detector = ProviderDetector::new();
        assert_eq!(detector.classify("aws_s3_bucket"), Some("aws"));
        assert_eq!(detector.classify("azurerm_subnet"), Some("azure"));
        assert_eq!(detector.classify("azuread_group"), Some("azure"));
        assert_eq!(detector.classify("google_compute_instance"), Some("google"));
        assert_eq!(detector.classify("helm_release"), Some("kubernetes"));
        assert_eq!(detector.classify("tls_private_key"), Some("terraform"));
        assert_eq!(detector.classify("mycorp_widget"), None);
        assert_eq!(detector.classify(""), None);
    }

    #[test]
    fn test_classify_ignores_embedded_provider_words() {
        let detector = ProviderDetector::new();
        // Foreign namespaces stay unattributed even when the type embeds
        // another provider's vocabulary.
        assert_eq!(detector.classify("ibm_compute_instance"), None);
        assert_eq!(detector.classify("oci_ec2_like_s3_gateway"), None);
        assert_eq!(detector.classify("vault_provider_config"), None);
    }

    #[test]
    fn test_foreign_namespace_does_not_flip_multi_cloud() {
        let detector = ProviderDetector::new();
        let result = detector.detect(&plan(json!({
            "resource_changes": [
                {"type": "aws_instance", "address": "a", "change": {"actions": ["create"]}},
                {"type": "ibm_compute_instance", "address": "i", "change": {"actions": ["create"]}}
            ]
        })));
        assert!(!result.multi_cloud);
        assert_eq!(result.all_providers.len(), 1);
        assert_eq!(result.resource_distribution.get("google"), None);
        // The unmatched resource still dilutes confidence via the
        // denominator.
        assert_eq!(result.provider_confidence["aws"].percentage, 50.0);
    }

    #[test]
    fn test_classify_data_sources() {
        let detector = ProviderDetector::new();
        assert_eq!(detector.classify("data.aws_ami"), Some("aws"));
        assert_eq!(detector.classify("data.azurerm_subscription"), Some("azure"));
        assert_eq!(detector.classify("data.google_project"), Some("google"));
    }

    #[test]
    fn test_confidence_and_percentage() {
        let detector = ProviderDetector::new();
        let result = detector.detect(&plan(json!({
            "resource_changes": [
                {"type": "aws_instance", "address": "a", "change": {"actions": ["create"]}},
                {"type": "aws_s3_bucket", "address": "b", "change": {"actions": ["create"]}},
                {"type": "azurerm_subnet", "address": "c", "change": {"actions": ["create"]}},
                {"type": "mycorp_widget", "address": "d", "change": {"actions": ["create"]}}
            ]
        })));

        let aws = &result.provider_confidence["aws"];
        assert_eq!(aws.resource_count, 2);
        assert_eq!(aws.percentage, 50.0);
        assert!(!aws.config_detected);
        assert!((aws.score - 0.4).abs() < 1e-9);

        // Unmatched types appear nowhere in the distribution.
        assert!(!result.resource_distribution.contains_key("mycorp_widget"));
        assert_eq!(result.primary_provider.as_deref(), Some("aws"));
    }

    #[test]
    fn test_config_block_detection_and_canonicalization() {
        let detector = ProviderDetector::new();
        let result = detector.detect(&plan(json!({
            "resource_changes": [],
            "configuration": {
                "provider_config": {
                    "registry.terraform.io/hashicorp/aws": {},
                    "azuread": {},
                    "google-beta": {},
                    "datadog": {}
                }
            }
        })));

        assert!(result.all_providers.contains("aws"));
        assert!(result.all_providers.contains("azure"));
        assert!(result.all_providers.contains("google"));
        assert!(result.all_providers.contains("datadog"));

        // No actionable resources: confidence is driven by config presence.
        let aws = &result.provider_confidence["aws"];
        assert_eq!(aws.resource_count, 0);
        assert_eq!(aws.percentage, 0.0);
        assert!(aws.config_detected);
        assert!((aws.score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_primary_tie_breaks_lexicographically() {
        let detector = ProviderDetector::new();
        let result = detector.detect(&plan(json!({
            "resource_changes": [
                {"type": "google_compute_instance", "address": "g", "change": {"actions": ["create"]}},
                {"type": "aws_instance", "address": "a", "change": {"actions": ["create"]}}
            ]
        })));
        // Both providers score 0.4; "aws" < "google".
        assert_eq!(result.primary_provider.as_deref(), Some("aws"));
    }

    #[test]
    fn test_multi_cloud_requires_two_hyperscalers() {
        let detector = ProviderDetector::new();

        let single = detector.detect(&plan(json!({
            "resource_changes": [
                {"type": "aws_instance", "address": "a", "change": {"actions": ["create"]}},
                {"type": "kubernetes_deployment", "address": "k", "change": {"actions": ["create"]}},
                {"type": "random_id", "address": "r", "change": {"actions": ["create"]}}
            ]
        })));
        assert!(!single.multi_cloud);

        let multi = detector.detect(&plan(json!({
            "resource_changes": [
                {"type": "aws_instance", "address": "a", "change": {"actions": ["create"]}},
                {"type": "azurerm_subnet", "address": "z", "change": {"actions": ["create"]}}
            ]
        })));
        assert!(multi.multi_cloud);
        assert!(
            multi
                .recommendations
                .iter()
                .any(|r| r.starts_with("Multi-cloud deployment detected with 2 providers"))
        );
    }

    #[test]
    fn test_utility_provider_recommendation() {
        let detector = ProviderDetector::new();
        let result = detector.detect(&plan(json!({
            "resource_changes": [
                {"type": "tfe_workspace", "address": "w", "change": {"actions": ["create"]}}
            ]
        })));
        assert!(
            result
                .recommendations
                .iter()
                .any(|r| r.contains("Infrastructure utilities detected: terraform"))
        );
    }

    #[test]
    fn test_empty_plan_detection() {
        let detector = ProviderDetector::new();
        let result = detector.detect(&Plan::default());
        assert!(result.all_providers.is_empty());
        assert!(result.primary_provider.is_none());
        assert!(!result.multi_cloud);
        assert_eq!(result.summary(), "No cloud providers detected");
    }

    #[test]
    fn test_summary_lines() {
        let detector = ProviderDetector::new();

        let single = detector.detect(&plan(json!({
            "resource_changes": [
                {"type": "aws_instance", "address": "a", "change": {"actions": ["create"]}}
            ]
        })));
        assert_eq!(single.summary(), "Single cloud provider: AWS");

        let multi = detector.detect(&plan(json!({
            "resource_changes": [
                {"type": "aws_instance", "address": "a", "change": {"actions": ["create"]}},
                {"type": "aws_vpc", "address": "v", "change": {"actions": ["create"]}},
                {"type": "azurerm_subnet", "address": "z", "change": {"actions": ["create"]}}
            ]
        })));
        assert_eq!(
            multi.summary(),
            "Multi-cloud setup: Primary AWS, 2 total providers (aws, azure)"
        );
    }
}
