//! Engine tuning knobs.

use serde::{Deserialize, Serialize};

/// Aggregation parameters for the risk engine. The defaults match the
/// calibrated production values; deserializing a partial document fills
/// in the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Baseline seconds of deployment time per resource, before
    /// level and provider multipliers.
    pub base_seconds_per_resource: f64,
    /// Plan-score amplification applied to multi-cloud deployments.
    pub multi_cloud_score_factor: f64,
    /// Plan-score amplification when high-risk resources exceed the
    /// concentration threshold.
    pub high_risk_concentration_factor: f64,
    /// Fraction of high-risk resources above which concentration
    /// amplification kicks in.
    pub high_risk_concentration_threshold: f64,
    /// Deployment-time amplification for multi-cloud plans.
    pub multi_cloud_time_factor: f64,
    /// High-risk resource count above which staged deployment is
    /// recommended.
    pub staged_deployment_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_seconds_per_resource: 30.0,
            multi_cloud_score_factor: 1.15,
            high_risk_concentration_factor: 1.2,
            high_risk_concentration_threshold: 0.3,
            multi_cloud_time_factor: 1.3,
            staged_deployment_threshold: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.base_seconds_per_resource, 30.0);
        assert_eq!(config.multi_cloud_score_factor, 1.15);
        assert_eq!(config.staged_deployment_threshold, 5);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"base_seconds_per_resource": 45.0}"#).unwrap();
        assert_eq!(config.base_seconds_per_resource, 45.0);
        assert_eq!(config.multi_cloud_time_factor, 1.3);
    }
}
