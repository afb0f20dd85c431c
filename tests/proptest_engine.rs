//! Property-based tests for the assessment invariants.

use proptest::prelude::*;
use serde_json::json;
use terrarisk::{RiskEngine, RiskLevel};

fn action_set() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(
        prop_oneof![
            Just("create".to_string()),
            Just("update".to_string()),
            Just("delete".to_string()),
            Just("replace".to_string()),
            Just("no-op".to_string()),
        ],
        1..3,
    )
}

fn resource_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("aws_s3_bucket".to_string()),
        Just("aws_security_group".to_string()),
        Just("aws_iam_policy".to_string()),
        Just("azurerm_virtual_network".to_string()),
        Just("azurerm_key_vault".to_string()),
        Just("google_compute_firewall".to_string()),
        Just("google_sql_database_instance".to_string()),
        Just("kubernetes_deployment".to_string()),
        // Types no provider claims.
        "[a-z]{3,8}_[a-z]{3,10}",
    ]
}

fn plan_changes() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    proptest::collection::vec((resource_type(), action_set()), 0..8)
}

fn to_plan(changes: &[(String, Vec<String>)]) -> serde_json::Value {
    let resource_changes: Vec<_> = changes
        .iter()
        .enumerate()
        .map(|(i, (resource_type, actions))| {
            json!({
                "type": resource_type,
                "address": format!("{resource_type}.r{i}"),
                "change": {"actions": actions}
            })
        })
        .collect();
    json!({"resource_changes": resource_changes})
}

proptest! {
    #[test]
    fn resource_scores_stay_in_range(changes in plan_changes()) {
        let engine = RiskEngine::new();
        let assessment = engine.assess_value(to_plan(&changes)).unwrap();
        for resource in &assessment.resource_assessments {
            prop_assert!(
                (0.0..=10.0).contains(&resource.score),
                "score {} out of range for {}",
                resource.score,
                resource.resource_type
            );
        }
        prop_assert!(assessment.overall_risk.score <= 100);
    }

    #[test]
    fn level_counts_partition_the_resources(changes in plan_changes()) {
        let engine = RiskEngine::new();
        let assessment = engine.assess_value(to_plan(&changes)).unwrap();
        let overall = &assessment.overall_risk;
        prop_assert_eq!(
            overall.high_risk_count + overall.medium_risk_count + overall.low_risk_count,
            overall.total_resources
        );
        prop_assert_eq!(overall.total_resources, assessment.resource_assessments.len());
    }

    #[test]
    fn any_high_resource_forces_high_overall(changes in plan_changes()) {
        let engine = RiskEngine::new();
        let assessment = engine.assess_value(to_plan(&changes)).unwrap();
        if assessment.overall_risk.high_risk_count > 0 {
            prop_assert_eq!(assessment.overall_risk.level, RiskLevel::High);
        }
    }

    #[test]
    fn provider_summary_totals_match_assessments(changes in plan_changes()) {
        let engine = RiskEngine::new();
        let assessment = engine.assess_value(to_plan(&changes)).unwrap();
        let summarized: usize = assessment
            .provider_risk_summary
            .values()
            .map(|s| s.total_resources)
            .sum();
        let attributed = assessment
            .resource_assessments
            .iter()
            .filter(|a| a.provider != "unknown")
            .count();
        prop_assert_eq!(summarized, attributed);
    }
}
