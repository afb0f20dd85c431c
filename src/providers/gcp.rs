//! Google Cloud provider model — category map, risk weights, critical patterns.

use std::collections::HashMap;

use super::{ActionMultipliers, ChangeView, ProviderModel, ResourceCategory};

pub(super) fn model() -> ProviderModel {
    ProviderModel {
        id: "google",
        categories: categories(),
        risk_weights: risk_weights(),
        critical_patterns: CRITICAL_PATTERNS,
        // GCP updates are often less disruptive and replacements can be
        // more efficient.
        action_multipliers: ActionMultipliers {
            create: 1.0,
            update: 1.3,
            delete: 2.5,
            replace: Some(1.8),
        },
        // GCP change application is generally fast.
        deployment_multiplier: 0.9,
        recommend: recommendations,
    }
}

const CRITICAL_PATTERNS: &[&str] = &[
    "compute_firewall",
    "iam_",
    "kms_",
    "sql_",
    "spanner_",
    "compute_network",
    "container_cluster",
    "service_account",
];

fn categories() -> HashMap<&'static str, ResourceCategory> {
    use ResourceCategory::*;
    HashMap::from([
        // Compute
        ("google_compute_instance", Compute),
        ("google_compute_instance_template", Compute),
        ("google_compute_instance_group", Compute),
        ("google_compute_instance_group_manager", Compute),
        ("google_compute_autoscaler", Compute),
        // Networking
        ("google_compute_network", Networking),
        ("google_compute_subnetwork", Networking),
        ("google_compute_firewall", Networking),
        ("google_compute_route", Networking),
        ("google_compute_router", Networking),
        ("google_compute_vpn_gateway", Networking),
        ("google_compute_forwarding_rule", Networking),
        ("google_compute_global_forwarding_rule", Networking),
        ("google_compute_backend_service", Networking),
        ("google_compute_url_map", Networking),
        ("google_compute_target_http_proxy", Networking),
        ("google_compute_target_https_proxy", Networking),
        ("google_compute_ssl_certificate", Security),
        // Storage
        ("google_storage_bucket", Storage),
        ("google_storage_bucket_object", Storage),
        ("google_compute_disk", Storage),
        ("google_filestore_instance", Storage),
        // Database
        ("google_sql_database_instance", Database),
        ("google_sql_database", Database),
        ("google_sql_user", Database),
        ("google_bigtable_instance", Database),
        ("google_firestore_database", Database),
        ("google_spanner_instance", Database),
        ("google_spanner_database", Database),
        ("google_redis_instance", Database),
        // Security & Identity
        ("google_project_iam_member", Identity),
        ("google_project_iam_binding", Identity),
        ("google_project_iam_policy", Identity),
        ("google_service_account", Identity),
        ("google_service_account_key", Security),
        ("google_kms_key_ring", Security),
        ("google_kms_crypto_key", Security),
        ("google_secret_manager_secret", Security),
        // Serverless
        ("google_cloudfunctions_function", Serverless),
        ("google_cloud_run_service", Serverless),
        ("google_app_engine_application", Serverless),
        ("google_app_engine_version", Serverless),
        // Container
        ("google_container_cluster", Container),
        ("google_container_node_pool", Container),
        ("google_artifact_registry_repository", Container),
        ("google_container_registry", Container),
        // Monitoring
        ("google_monitoring_alert_policy", Monitoring),
        ("google_monitoring_notification_channel", Monitoring),
        ("google_logging_metric", Monitoring),
        ("google_logging_sink", Monitoring),
        // Analytics
        ("google_bigquery_dataset", Analytics),
        ("google_bigquery_table", Analytics),
        ("google_dataflow_job", Analytics),
        ("google_pubsub_topic", Analytics),
        ("google_pubsub_subscription", Analytics),
        ("google_dataproc_cluster", Analytics),
    ])
}

fn risk_weights() -> HashMap<&'static str, f64> {
    HashMap::from([
        // Networking (infrastructure critical)
        ("google_compute_network", 9.0),
        ("google_compute_subnetwork", 7.0),
        ("google_compute_firewall", 8.0),
        ("google_compute_route", 7.0),
        ("google_compute_router", 7.0),
        ("google_compute_vpn_gateway", 8.0),
        // Database (data critical)
        ("google_sql_database_instance", 9.0),
        ("google_sql_database", 8.0),
        ("google_bigtable_instance", 8.0),
        ("google_firestore_database", 8.0),
        ("google_spanner_instance", 9.0),
        ("google_spanner_database", 9.0),
        ("google_redis_instance", 7.0),
        // Identity and security (critical)
        ("google_project_iam_member", 8.0),
        ("google_project_iam_binding", 8.0),
        ("google_project_iam_policy", 9.0),
        ("google_service_account", 7.0),
        ("google_service_account_key", 8.0),
        ("google_kms_key_ring", 9.0),
        ("google_kms_crypto_key", 9.0),
        ("google_secret_manager_secret", 8.0),
        // Storage (data critical)
        ("google_storage_bucket", 7.0),
        ("google_compute_disk", 6.0),
        ("google_filestore_instance", 7.0),
        // Compute
        ("google_compute_instance", 5.0),
        ("google_compute_instance_template", 6.0),
        ("google_compute_instance_group", 6.0),
        ("google_compute_instance_group_manager", 6.0),
        ("google_compute_autoscaler", 6.0),
        // Load balancing
        ("google_compute_backend_service", 6.0),
        ("google_compute_url_map", 6.0),
        ("google_compute_forwarding_rule", 6.0),
        ("google_compute_global_forwarding_rule", 7.0),
        // Container services
        ("google_container_cluster", 8.0),
        ("google_container_node_pool", 6.0),
        ("google_artifact_registry_repository", 5.0),
        // Serverless
        ("google_cloudfunctions_function", 5.0),
        ("google_cloud_run_service", 5.0),
        ("google_app_engine_application", 6.0),
        ("google_app_engine_version", 5.0),
        // Monitoring
        ("google_monitoring_alert_policy", 4.0),
        ("google_logging_metric", 4.0),
        ("google_logging_sink", 5.0),
        // Analytics
        ("google_bigquery_dataset", 6.0),
        ("google_bigquery_table", 5.0),
        ("google_dataflow_job", 5.0),
        ("google_pubsub_topic", 5.0),
        ("google_dataproc_cluster", 6.0),
        // Low risk
        ("google_storage_bucket_object", 2.0),
        ("google_monitoring_notification_channel", 3.0),
        ("google_pubsub_subscription", 3.0),
    ])
}

fn recommendations(changes: &[ChangeView<'_>]) -> Vec<String> {
    let mut recs = Vec::new();

    if changes
        .iter()
        .any(|c| c.resource_type.contains("compute_firewall"))
    {
        recs.push("Compute Firewall changes detected - review ingress/egress rules".into());
        recs.push("Consider using VPC Flow Logs to analyze traffic patterns".into());
    }

    if changes.iter().any(|c| c.resource_type.contains("iam_")) {
        recs.push("IAM changes detected - verify role bindings and permissions".into());
        recs.push("Use Cloud Asset Inventory to track permission changes".into());
        recs.push("Consider using IAM Conditions for fine-grained access control".into());
    }

    if changes.iter().any(|c| {
        matches!(
            c.resource_type,
            "google_compute_network" | "google_compute_subnetwork"
        )
    }) {
        recs.push("VPC Network changes detected - may affect connectivity".into());
        recs.push("Check for VPC peering and shared VPC configurations".into());
    }

    if changes.iter().any(|c| c.resource_type.contains("sql_")) {
        recs.push("Cloud SQL changes detected - ensure automated backups are enabled".into());
        recs.push("Verify SSL/TLS encryption settings for database connections".into());
    }

    if changes.iter().any(|c| c.resource_type.contains("kms_")) {
        recs.push("Cloud KMS changes detected - critical for data encryption".into());
        recs.push("Ensure proper key rotation policies are in place".into());
    }

    if changes
        .iter()
        .any(|c| c.resource_type.contains("container_cluster"))
    {
        recs.push("GKE changes detected - may affect running workloads".into());
        recs.push("Consider using GKE maintenance windows for updates".into());
        recs.push("Verify Workload Identity is properly configured".into());
    }

    if changes.iter().any(|c| c.resource_type.contains("bigquery_")) {
        recs.push("BigQuery changes detected - verify data governance policies".into());
        recs.push("Check for cost implications of schema or partition changes".into());
    }

    if changes
        .iter()
        .any(|c| c.resource_type.contains("service_account"))
    {
        recs.push("Service Account changes detected - review application authentication".into());
        recs.push(
            "Avoid using service account keys when possible - prefer Workload Identity".into(),
        );
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Action;

    #[test]
    fn test_tabled_weights_exact() {
        let model = model();
        let expected = risk_weights();
        for (resource_type, weight) in &expected {
            assert_eq!(
                model.risk_weight_of(resource_type),
                *weight,
                "weight mismatch for {resource_type}"
            );
        }
    }

    #[test]
    fn test_action_multipliers() {
        let model = model();
        assert_eq!(model.action_multiplier(Action::Update), 1.3);
        assert_eq!(model.action_multiplier(Action::Replace), 1.8);
    }

    #[test]
    fn test_deployment_multiplier() {
        assert_eq!(model().deployment_multiplier(), 0.9);
    }

    #[test]
    fn test_critical_patterns() {
        let model = model();
        assert!(model.is_critical("google_compute_firewall"));
        assert!(model.is_critical("google_service_account_key"));
        assert!(!model.is_critical("google_storage_bucket"));
    }
}
