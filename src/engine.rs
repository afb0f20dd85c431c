//! Risk engine — scores each actionable change and aggregates the results
//! into a plan-level verdict with recommendations and a deployment time
//! estimate.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::assessment::{
    OverallRisk, PlanRiskAssessment, ProviderRiskSummary, ResourceRiskAssessment, RiskLevel,
};
use crate::config::EngineConfig;
use crate::detector::CLOUD_PROVIDER_IDS;
use crate::error::PlanError;
use crate::plan::{Action, Plan, ResourceChange};
use crate::providers::{
    ChangeView, DEFAULT_ACTION_MULTIPLIERS, ProviderModel, ResourceCategory, UNKNOWN_BASE_SCORE,
    UNKNOWN_PROVIDER,
};
use crate::registry::{ProviderRegistry, ResolvedProviders};

/// Multi-cloud risk assessment engine. Stateless between plans apart from
/// the registry's model cache, so one instance serves many assessments.
#[derive(Debug, Default)]
pub struct RiskEngine {
    registry: ProviderRegistry,
    config: EngineConfig,
}

impl RiskEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            registry: ProviderRegistry::new(),
            config,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Parse raw JSON text and assess the resulting plan.
    pub fn assess_json(&self, text: &str) -> Result<PlanRiskAssessment, PlanError> {
        Ok(self.assess(&Plan::from_json(text)?))
    }

    /// Assess an already-parsed JSON value.
    pub fn assess_value(&self, value: Value) -> Result<PlanRiskAssessment, PlanError> {
        Ok(self.assess(&Plan::from_value(value)?))
    }

    /// Assess a plan: detect providers, score every actionable change, and
    /// roll the scores up into the overall verdict.
    pub fn assess(&self, plan: &Plan) -> PlanRiskAssessment {
        let resolved = self.registry.resolve(plan);
        let changes: Vec<&ResourceChange> = plan.actionable_changes().collect();

        let assessments: Vec<ResourceRiskAssessment> = changes
            .iter()
            .map(|change| {
                match self
                    .registry
                    .provider_for(&change.resource_type, &resolved.active)
                {
                    Some(model) => assess_with_model(change, &model),
                    None => assess_unknown(change),
                }
            })
            .collect();

        let mut provider_risk_summary: BTreeMap<String, ProviderRiskSummary> = BTreeMap::new();
        for assessment in &assessments {
            if assessment.provider == UNKNOWN_PROVIDER {
                continue;
            }
            let entry = provider_risk_summary
                .entry(assessment.provider.clone())
                .or_default();
            entry.total_resources += 1;
            entry.total_risk_score += assessment.score;
            match assessment.level {
                RiskLevel::High => entry.high_risk_count += 1,
                RiskLevel::Medium => entry.medium_risk_count += 1,
                RiskLevel::Low => entry.low_risk_count += 1,
            }
        }

        if assessments.is_empty() {
            return PlanRiskAssessment {
                overall_risk: OverallRisk {
                    level: RiskLevel::Low,
                    score: 0,
                    total_resources: 0,
                    high_risk_count: 0,
                    medium_risk_count: 0,
                    low_risk_count: 0,
                    estimated_time: "< 5 minutes".to_string(),
                    average_risk_score: 0.0,
                },
                is_multi_cloud: resolved.detection.multi_cloud,
                primary_provider: resolved.detection.primary_provider.clone(),
                provider_detection: resolved.detection,
                provider_risk_summary,
                resource_assessments: assessments,
                recommendations: vec!["No changes detected in this plan".to_string()],
            };
        }

        let total = assessments.len();
        let sum: f64 = assessments.iter().map(|a| a.score).sum();
        let high = count_level(&assessments, RiskLevel::High);
        let medium = count_level(&assessments, RiskLevel::Medium);
        let low = count_level(&assessments, RiskLevel::Low);
        let multi_cloud = resolved.detection.multi_cloud;

        let mut score = sum / (total as f64 * 10.0) * 100.0;
        if multi_cloud {
            score *= self.config.multi_cloud_score_factor;
        }
        if high as f64 / total as f64 > self.config.high_risk_concentration_threshold {
            score *= self.config.high_risk_concentration_factor;
        }
        let score = score.clamp(0.0, 100.0);

        // Level thresholds apply before rounding so a 69.9 plan with a
        // high-risk resource still reads High, not rounded-up Medium.
        let level = if score >= 70.0 || high > 0 {
            RiskLevel::High
        } else if score >= 40.0 || medium > 2 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let mut seconds: f64 = assessments
            .iter()
            .map(|a| {
                self.config.base_seconds_per_resource
                    * a.level.time_multiplier()
                    * a.deployment_multiplier
            })
            .sum();
        if multi_cloud {
            seconds *= self.config.multi_cloud_time_factor;
        }

        let recommendations = self.recommendations(
            &resolved,
            &changes,
            &assessments,
            &provider_risk_summary,
            high,
        );

        debug!(
            total_resources = total,
            score = score.round() as u32,
            level = %level,
            "assessed plan"
        );

        PlanRiskAssessment {
            overall_risk: OverallRisk {
                level,
                score: score.round() as u32,
                total_resources: total,
                high_risk_count: high,
                medium_risk_count: medium,
                low_risk_count: low,
                estimated_time: time_band(seconds),
                average_risk_score: round1(sum / total as f64),
            },
            is_multi_cloud: multi_cloud,
            primary_provider: resolved.detection.primary_provider.clone(),
            provider_detection: resolved.detection,
            provider_risk_summary,
            resource_assessments: assessments,
            recommendations,
        }
    }

    /// Assess a single resource change in isolation.
    pub fn assess_change(&self, change: &ResourceChange) -> ResourceRiskAssessment {
        let plan = Plan {
            resource_changes: vec![change.clone()],
            configuration: Default::default(),
        };
        let resolved = self.registry.resolve(&plan);
        match self
            .registry
            .provider_for(&change.resource_type, &resolved.active)
        {
            Some(model) => assess_with_model(change, &model),
            None => assess_unknown(change),
        }
    }

    fn recommendations(
        &self,
        resolved: &ResolvedProviders,
        changes: &[&ResourceChange],
        assessments: &[ResourceRiskAssessment],
        provider_risk_summary: &BTreeMap<String, ProviderRiskSummary>,
        high: usize,
    ) -> Vec<String> {
        let mut recs = Vec::new();

        if resolved.detection.multi_cloud {
            let clouds: Vec<String> = CLOUD_PROVIDER_IDS
                .iter()
                .filter(|id| resolved.detection.all_providers.contains(**id))
                .map(|id| id.to_uppercase())
                .collect();
            recs.push(format!(
                "Multi-cloud deployment with {} providers: {}",
                clouds.len(),
                clouds.join(", ")
            ));
            recs.push("Verify cross-cloud networking and data transfer configurations".to_string());
            recs.push("Consider data egress costs between cloud providers".to_string());
            recs.push("Ensure consistent security policies across all providers".to_string());
        }

        let mut views: BTreeMap<&str, Vec<ChangeView<'_>>> = BTreeMap::new();
        for (change, assessment) in changes.iter().zip(assessments) {
            if assessment.provider != UNKNOWN_PROVIDER {
                views
                    .entry(assessment.provider.as_str())
                    .or_default()
                    .push(ChangeView {
                        resource_type: &change.resource_type,
                        address: &change.address,
                        actions: &change.change.actions,
                    });
            }
        }
        for (id, model) in &resolved.active {
            let Some(group) = views.get(id.as_str()) else {
                continue;
            };
            let tag = id.to_uppercase();
            for line in model.recommendations(group) {
                recs.push(format!("[{tag}] {line}"));
            }
        }

        if high > 0 {
            recs.push(format!("{high} high-risk resources require careful review"));
        }
        if high > self.config.staged_deployment_threshold {
            recs.push("Consider staging deployment across multiple phases".to_string());
        }
        if provider_risk_summary.len() > 1 {
            if let Some(id) = riskiest_provider(provider_risk_summary) {
                recs.push(format!("Highest risk concentration in {}", id.to_uppercase()));
            }
        }

        recs
    }
}

/// Score one change against its provider's model.
fn assess_with_model(change: &ResourceChange, model: &ProviderModel) -> ResourceRiskAssessment {
    let base_score = model.risk_weight_of(&change.resource_type);
    let action_multiplier = model.max_action_multiplier(change.actions());
    let raw = (base_score * action_multiplier).min(10.0);

    let mut risk_factors = Vec::new();
    if change.actions().any(|a| a == Action::Delete) {
        risk_factors.push("Resource deletion".to_string());
    }
    if change.actions().any(|a| a == Action::Update) {
        risk_factors.push("Configuration changes".to_string());
    }
    if model.is_critical(&change.resource_type) {
        risk_factors.push("Critical infrastructure resource".to_string());
    }
    if change.has_sensitive_values() {
        risk_factors.push("Sensitive data involved".to_string());
    }

    ResourceRiskAssessment {
        address: change.address.clone(),
        resource_type: change.resource_type.clone(),
        actions: change.change.actions.clone(),
        score: round1(raw),
        level: RiskLevel::from_score(raw),
        base_score,
        action_multiplier,
        deployment_multiplier: model.deployment_multiplier(),
        risk_factors,
        category: model.category_of(&change.resource_type),
        provider: model.id().to_string(),
    }
}

/// Score a change no active provider claims: flat base, default action
/// multipliers, neutral deployment speed.
fn assess_unknown(change: &ResourceChange) -> ResourceRiskAssessment {
    let action_multiplier = change
        .actions()
        .map(|a| DEFAULT_ACTION_MULTIPLIERS.for_action(a))
        .fold(1.0_f64, f64::max);
    let raw = (UNKNOWN_BASE_SCORE * action_multiplier).min(10.0);

    ResourceRiskAssessment {
        address: change.address.clone(),
        resource_type: change.resource_type.clone(),
        actions: change.change.actions.clone(),
        score: round1(raw),
        level: RiskLevel::from_score(raw),
        base_score: UNKNOWN_BASE_SCORE,
        action_multiplier,
        deployment_multiplier: 1.0,
        risk_factors: vec!["Unknown provider".to_string()],
        category: ResourceCategory::Unknown,
        provider: UNKNOWN_PROVIDER.to_string(),
    }
}

fn count_level(assessments: &[ResourceRiskAssessment], level: RiskLevel) -> usize {
    assessments.iter().filter(|a| a.level == level).count()
}

/// The provider with the most high-risk resources, if any has one.
/// Ties resolve to the alphabetically first id.
fn riskiest_provider(summary: &BTreeMap<String, ProviderRiskSummary>) -> Option<&String> {
    let mut riskiest: Option<(&String, usize)> = None;
    for (id, stats) in summary {
        if stats.high_risk_count > riskiest.map_or(0, |(_, count)| count) {
            riskiest = Some((id, stats.high_risk_count));
        }
    }
    riskiest.map(|(id, _)| id)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Bucket a raw seconds estimate into the display band.
fn time_band(seconds: f64) -> String {
    if seconds < 300.0 {
        "< 5 minutes".to_string()
    } else if seconds < 900.0 {
        "5-15 minutes".to_string()
    } else if seconds < 1800.0 {
        "15-30 minutes".to_string()
    } else if seconds < 3600.0 {
        "30-60 minutes".to_string()
    } else {
        format!("{}+ hours", (seconds / 3600.0).floor() as u64)
    }
}
