//! Terrarisk — multi-cloud risk assessment for Terraform plans.
//!
//! Feed the engine a Terraform plan in JSON form and it produces a
//! structured risk assessment:
//!
//! - **Detection:** which cloud providers the plan touches, with per-provider
//!   confidence scores and a multi-cloud flag
//! - **Scoring:** a 0-10 risk score per actionable resource change, from
//!   provider-specific resource weights and action multipliers
//! - **Aggregation:** a 0-100 plan score, risk level, per-provider tallies,
//!   and a deployment time estimate
//! - **Recommendations:** provider-specific review guidance for the riskiest
//!   parts of the plan
//!
//! ```no_run
//! use terrarisk::engine::RiskEngine;
//!
//! let text = std::fs::read_to_string("plan.json")?;
//! let engine = RiskEngine::new();
//! let assessment = engine.assess_json(&text)?;
//! println!("{} ({}/100)", assessment.overall_risk.level, assessment.overall_risk.score);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod assessment;
pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod plan;
pub mod providers;
pub mod registry;

// Re-exports for convenience
pub use assessment::{
    LegacyRiskSummary, OverallRisk, PlanRiskAssessment, ProviderRiskSummary,
    ResourceRiskAssessment, RiskLevel,
};
pub use config::EngineConfig;
pub use detector::{DetectionResult, ProviderConfidence, ProviderDetector};
pub use engine::RiskEngine;
pub use error::PlanError;
pub use plan::{Action, Plan, ResourceChange};
pub use providers::{ProviderModel, ResourceCategory};
pub use registry::ProviderRegistry;
