//! Derived views over a finished assessment — breakdowns a report renderer
//! slices without re-running the engine.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::assessment::{PlanRiskAssessment, RiskLevel};
use crate::providers::ResourceCategory;

/// Per-level resource counts.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct LevelCounts {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl LevelCounts {
    fn record(&mut self, level: RiskLevel) {
        self.total += 1;
        match level {
            RiskLevel::High => self.high += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::Low => self.low += 1,
        }
    }
}

/// One high-risk resource, flattened for display.
#[derive(Debug, Clone, Serialize)]
pub struct HighRiskResource {
    pub address: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub score: f64,
    pub provider: String,
    pub action: String,
    pub category: ResourceCategory,
    pub risk_factors: Vec<String>,
}

/// Aggregate statistics for one resource category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryStats {
    pub count: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    pub avg_risk_score: f64,
    pub resources: Vec<String>,
}

impl PlanRiskAssessment {
    /// Level counts keyed by resource type.
    pub fn risk_by_resource_type(&self) -> BTreeMap<String, LevelCounts> {
        let mut by_type: BTreeMap<String, LevelCounts> = BTreeMap::new();
        for assessment in &self.resource_assessments {
            by_type
                .entry(assessment.resource_type.clone())
                .or_default()
                .record(assessment.level);
        }
        by_type
    }

    /// High-risk resources sorted by score, highest first.
    pub fn high_risk_resources(&self) -> Vec<HighRiskResource> {
        let mut resources: Vec<HighRiskResource> = self
            .resource_assessments
            .iter()
            .filter(|a| a.level == RiskLevel::High)
            .map(|a| HighRiskResource {
                address: a.address.clone(),
                resource_type: a.resource_type.clone(),
                score: a.score,
                provider: a.provider.clone(),
                action: a
                    .actions
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "update".to_string()),
                category: a.category,
                risk_factors: a.risk_factors.clone(),
            })
            .collect();
        resources.sort_by(|a, b| b.score.total_cmp(&a.score));
        resources
    }

    /// Per-category statistics across all assessed resources.
    pub fn category_breakdown(&self) -> BTreeMap<ResourceCategory, CategoryStats> {
        let mut breakdown: BTreeMap<ResourceCategory, (CategoryStats, f64)> = BTreeMap::new();
        for assessment in &self.resource_assessments {
            let (stats, score_sum) = breakdown.entry(assessment.category).or_default();
            stats.count += 1;
            *score_sum += assessment.score;
            match assessment.level {
                RiskLevel::High => stats.high_risk += 1,
                RiskLevel::Medium => stats.medium_risk += 1,
                RiskLevel::Low => stats.low_risk += 1,
            }
            stats.resources.push(assessment.address.clone());
        }
        breakdown
            .into_iter()
            .map(|(category, (mut stats, score_sum))| {
                stats.avg_risk_score = ((score_sum / stats.count as f64) * 10.0).round() / 10.0;
                (category, stats)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RiskEngine;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn assess(value: serde_json::Value) -> PlanRiskAssessment {
        let engine = RiskEngine::new();
        engine.assess_value(value).unwrap()
    }

    fn mixed_plan() -> PlanRiskAssessment {
        assess(json!({
            "resource_changes": [
                {"type": "aws_security_group", "address": "aws_security_group.web",
                 "change": {"actions": ["delete"]}},
                {"type": "aws_s3_bucket", "address": "aws_s3_bucket.logs",
                 "change": {"actions": ["create"]}},
                {"type": "aws_s3_bucket", "address": "aws_s3_bucket.assets",
                 "change": {"actions": ["update"]}},
                {"type": "aws_cloudwatch_metric_alarm", "address": "aws_cloudwatch_metric_alarm.cpu",
                 "change": {"actions": ["create"]}}
            ]
        }))
    }

    #[test]
    fn test_risk_by_resource_type() {
        let by_type = mixed_plan().risk_by_resource_type();
        assert_eq!(by_type["aws_s3_bucket"].total, 2);
        // Create scores 7.0 and update caps at 10.0, both High.
        assert_eq!(by_type["aws_s3_bucket"].high, 2);
        assert_eq!(by_type["aws_security_group"].high, 1);
        assert_eq!(by_type["aws_cloudwatch_metric_alarm"].medium, 1);
    }

    #[test]
    fn test_high_risk_resources_sorted_descending() {
        let high = mixed_plan().high_risk_resources();
        assert!(!high.is_empty());
        assert!(
            high.windows(2).all(|w| w[0].score >= w[1].score),
            "not sorted by score"
        );
        assert_eq!(high[0].address, "aws_security_group.web");
        assert_eq!(high[0].action, "delete");
        assert_eq!(high[0].category, ResourceCategory::Networking);
        assert_eq!(
            high[0].risk_factors,
            vec![
                "Resource deletion".to_string(),
                "Critical infrastructure resource".to_string(),
            ]
        );
    }

    #[test]
    fn test_category_breakdown() {
        let breakdown = mixed_plan().category_breakdown();
        let storage = &breakdown[&ResourceCategory::Storage];
        assert_eq!(storage.count, 2);
        assert_eq!(
            storage.resources,
            vec!["aws_s3_bucket.logs".to_string(), "aws_s3_bucket.assets".to_string()]
        );
        assert_eq!(breakdown[&ResourceCategory::Networking].high_risk, 1);
        assert_eq!(breakdown[&ResourceCategory::Monitoring].count, 1);
    }
}
