//! Output data model — the assessment records consumers render.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::detector::DetectionResult;
use crate::providers::ResourceCategory;

/// Risk level for a single resource or a whole plan.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a per-resource score in [0, 10].
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            RiskLevel::High
        } else if score >= 4.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Deployment-time multiplier for resources at this level.
    pub fn time_multiplier(&self) -> f64 {
        match self {
            RiskLevel::Low => 1.0,
            RiskLevel::Medium => 1.5,
            RiskLevel::High => 2.0,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk assessment for one actionable resource change. Created once,
/// read-only afterward.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRiskAssessment {
    pub address: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Raw action strings, echoed from the plan.
    pub actions: Vec<String>,
    /// Final score in [0, 10], rounded to one decimal.
    pub score: f64,
    pub level: RiskLevel,
    pub base_score: f64,
    pub action_multiplier: f64,
    pub deployment_multiplier: f64,
    pub risk_factors: Vec<String>,
    pub category: ResourceCategory,
    pub provider: String,
}

/// Plan-level aggregate risk.
#[derive(Debug, Clone, Serialize)]
pub struct OverallRisk {
    pub level: RiskLevel,
    /// Aggregate score in [0, 100].
    pub score: u32,
    pub total_resources: usize,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    /// Human-readable deployment time band, e.g. `5-15 minutes`.
    pub estimated_time: String,
    pub average_risk_score: f64,
}

/// Per-provider risk tallies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProviderRiskSummary {
    pub total_resources: usize,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    pub total_risk_score: f64,
}

/// The root aggregate: everything a report or dashboard renderer needs.
#[derive(Debug, Clone, Serialize)]
pub struct PlanRiskAssessment {
    pub overall_risk: OverallRisk,
    pub provider_detection: DetectionResult,
    pub provider_risk_summary: BTreeMap<String, ProviderRiskSummary>,
    pub resource_assessments: Vec<ResourceRiskAssessment>,
    pub recommendations: Vec<String>,
    pub is_multi_cloud: bool,
    pub primary_provider: Option<String>,
}

impl PlanRiskAssessment {
    /// Flat view matching the field layout legacy renderers consume, with
    /// the per-resource records under `detailed_assessments`.
    pub fn legacy_view(&self) -> LegacyRiskSummary {
        LegacyRiskSummary {
            level: self.overall_risk.level,
            score: self.overall_risk.score,
            high_risk_count: self.overall_risk.high_risk_count,
            medium_risk_count: self.overall_risk.medium_risk_count,
            low_risk_count: self.overall_risk.low_risk_count,
            estimated_time: self.overall_risk.estimated_time.clone(),
            average_risk_score: self.overall_risk.average_risk_score,
            provider_detection: self.provider_detection.clone(),
            provider_risk_summary: self.provider_risk_summary.clone(),
            is_multi_cloud: self.is_multi_cloud,
            primary_provider: self.primary_provider.clone(),
            detailed_assessments: self.resource_assessments.clone(),
        }
    }
}

/// Flattened assessment record for legacy consumers.
#[derive(Debug, Clone, Serialize)]
pub struct LegacyRiskSummary {
    pub level: RiskLevel,
    pub score: u32,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    pub estimated_time: String,
    pub average_risk_score: f64,
    pub provider_detection: DetectionResult,
    pub provider_risk_summary: BTreeMap<String, ProviderRiskSummary>,
    pub is_multi_cloud: bool,
    pub primary_provider: Option<String>,
    pub detailed_assessments: Vec<ResourceRiskAssessment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_thresholds() {
        assert_eq!(RiskLevel::from_score(10.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(7.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(6.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(4.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(3.9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    }

    #[test]
    fn test_level_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::High).unwrap(),
            "\"High\""
        );
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
    }

    #[test]
    fn test_level_ordering() {
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
    }
}
