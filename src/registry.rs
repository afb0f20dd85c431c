//! Provider registry — resolves detected providers to their models.
//!
//! Models are instantiated lazily and cached for the lifetime of the
//! registry. The cache is append-only and holds immutable values, so
//! concurrent invocations sharing one registry stay correct.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::detector::{DetectionResult, ProviderDetector};
use crate::plan::Plan;
use crate::providers::{self, ProviderModel};

/// Detection outcome plus the instantiated models for the detected
/// hyperscalers.
#[derive(Debug, Clone)]
pub struct ResolvedProviders {
    /// Active provider models, keyed by canonical id.
    pub active: BTreeMap<String, Arc<ProviderModel>>,
    /// The detection result the models were resolved from.
    pub detection: DetectionResult,
}

/// Factory that runs detection and hands out provider models.
#[derive(Debug)]
pub struct ProviderRegistry {
    detector: ProviderDetector,
    cache: Mutex<BTreeMap<String, Arc<ProviderModel>>>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            detector: ProviderDetector::new(),
            cache: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn detector(&self) -> &ProviderDetector {
        &self.detector
    }

    /// Run detection over a plan and instantiate a model for every detected
    /// provider that has one. Auxiliary providers (kubernetes, terraform,
    /// anything declared only in configuration) carry no model.
    pub fn resolve(&self, plan: &Plan) -> ResolvedProviders {
        let detection = self.detector.detect(plan);
        let mut active = BTreeMap::new();
        for id in &detection.all_providers {
            if let Some(model) = self.model_for(id) {
                active.insert(id.clone(), model);
            }
        }
        ResolvedProviders { active, detection }
    }

    /// The first active provider that claims the resource type, falling
    /// back to canonical-prefix extraction when none does directly.
    pub fn provider_for(
        &self,
        resource_type: &str,
        active: &BTreeMap<String, Arc<ProviderModel>>,
    ) -> Option<Arc<ProviderModel>> {
        for model in active.values() {
            if model.supports(resource_type) {
                return Some(Arc::clone(model));
            }
        }
        let id = canonical_prefix(resource_type)?;
        active.get(id).map(Arc::clone)
    }

    fn model_for(&self, id: &str) -> Option<Arc<ProviderModel>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(model) = cache.get(id) {
            return Some(Arc::clone(model));
        }
        let model = Arc::new(providers::builtin(id)?);
        cache.insert(id.to_string(), Arc::clone(&model));
        tracing::debug!(provider = id, "instantiated provider model");
        Some(model)
    }
}

/// Extract the canonical provider id from a resource type's namespace
/// prefix.
fn canonical_prefix(resource_type: &str) -> Option<&'static str> {
    if resource_type.starts_with("aws_") {
        Some("aws")
    } else if resource_type.starts_with("azurerm_") || resource_type.starts_with("azuread_") {
        Some("azure")
    } else if resource_type.starts_with("google_") {
        Some("google")
    } else {
        None
    }
}
