//! Azure provider model — category map, risk weights, critical patterns.

use std::collections::HashMap;

use super::{ActionMultipliers, ChangeView, ProviderModel, ResourceCategory};

pub(super) fn model() -> ProviderModel {
    ProviderModel {
        id: "azure",
        categories: categories(),
        risk_weights: risk_weights(),
        critical_patterns: CRITICAL_PATTERNS,
        // Azure updates often require fewer restarts; replacements are
        // sometimes less disruptive than on AWS.
        action_multipliers: ActionMultipliers {
            create: 1.0,
            update: 1.4,
            delete: 2.5,
            replace: Some(2.2),
        },
        // Azure deployments run slower than AWS on average.
        deployment_multiplier: 1.2,
        recommend: recommendations,
    }
}

const CRITICAL_PATTERNS: &[&str] = &[
    "network_security",
    "role_",
    "key_vault",
    "sql_",
    "cosmosdb",
    "virtual_network",
    "firewall",
    "kubernetes_cluster",
];

fn categories() -> HashMap<&'static str, ResourceCategory> {
    use ResourceCategory::*;
    HashMap::from([
        // Compute
        ("azurerm_virtual_machine", Compute),
        ("azurerm_linux_virtual_machine", Compute),
        ("azurerm_windows_virtual_machine", Compute),
        ("azurerm_virtual_machine_scale_set", Compute),
        ("azurerm_availability_set", Compute),
        // Networking
        ("azurerm_virtual_network", Networking),
        ("azurerm_subnet", Networking),
        ("azurerm_network_security_group", Networking),
        ("azurerm_network_security_rule", Networking),
        ("azurerm_route_table", Networking),
        ("azurerm_route", Networking),
        ("azurerm_virtual_network_gateway", Networking),
        ("azurerm_network_interface", Networking),
        ("azurerm_public_ip", Networking),
        ("azurerm_load_balancer", Networking),
        ("azurerm_application_gateway", Networking),
        ("azurerm_firewall", Networking),
        // Storage
        ("azurerm_storage_account", Storage),
        ("azurerm_storage_container", Storage),
        ("azurerm_storage_blob", Storage),
        ("azurerm_managed_disk", Storage),
        // Database
        ("azurerm_sql_server", Database),
        ("azurerm_sql_database", Database),
        ("azurerm_mysql_server", Database),
        ("azurerm_postgresql_server", Database),
        ("azurerm_cosmosdb_account", Database),
        ("azurerm_redis_cache", Database),
        // Security & Identity
        ("azurerm_role_assignment", Identity),
        ("azurerm_role_definition", Identity),
        ("azurerm_user_assigned_identity", Identity),
        ("azurerm_key_vault", Security),
        ("azurerm_key_vault_key", Security),
        ("azurerm_key_vault_secret", Security),
        // Serverless
        ("azurerm_function_app", Serverless),
        ("azurerm_app_service", Serverless),
        ("azurerm_app_service_plan", Serverless),
        ("azurerm_logic_app_workflow", Serverless),
        // Container
        ("azurerm_kubernetes_cluster", Container),
        ("azurerm_kubernetes_cluster_node_pool", Container),
        ("azurerm_container_group", Container),
        ("azurerm_container_registry", Container),
        // Monitoring
        ("azurerm_monitor_metric_alert", Monitoring),
        ("azurerm_log_analytics_workspace", Monitoring),
        ("azurerm_application_insights", Monitoring),
        ("azurerm_monitor_action_group", Monitoring),
        // Analytics
        ("azurerm_data_factory", Analytics),
        ("azurerm_synapse_workspace", Analytics),
        ("azurerm_stream_analytics_job", Analytics),
        ("azurerm_eventhub", Analytics),
    ])
}

fn risk_weights() -> HashMap<&'static str, f64> {
    HashMap::from([
        // Networking (infrastructure critical)
        ("azurerm_virtual_network", 9.0),
        ("azurerm_subnet", 7.0),
        ("azurerm_network_security_group", 8.0),
        ("azurerm_network_security_rule", 8.0),
        ("azurerm_route_table", 7.0),
        ("azurerm_firewall", 9.0),
        ("azurerm_virtual_network_gateway", 8.0),
        // Database (data critical)
        ("azurerm_sql_server", 9.0),
        ("azurerm_sql_database", 8.0),
        ("azurerm_mysql_server", 8.0),
        ("azurerm_postgresql_server", 8.0),
        ("azurerm_cosmosdb_account", 9.0),
        ("azurerm_redis_cache", 7.0),
        // Identity and security (critical)
        ("azurerm_role_assignment", 8.0),
        ("azurerm_role_definition", 9.0),
        ("azurerm_key_vault", 9.0),
        ("azurerm_key_vault_key", 8.0),
        ("azurerm_key_vault_secret", 8.0),
        ("azurerm_user_assigned_identity", 7.0),
        // Storage (data critical)
        ("azurerm_storage_account", 7.0),
        ("azurerm_storage_container", 6.0),
        ("azurerm_managed_disk", 6.0),
        // Compute
        ("azurerm_virtual_machine", 5.0),
        ("azurerm_linux_virtual_machine", 5.0),
        ("azurerm_windows_virtual_machine", 5.0),
        ("azurerm_virtual_machine_scale_set", 6.0),
        ("azurerm_availability_set", 5.0),
        // Load balancing
        ("azurerm_load_balancer", 6.0),
        ("azurerm_application_gateway", 7.0),
        // Container services
        ("azurerm_kubernetes_cluster", 8.0),
        ("azurerm_kubernetes_cluster_node_pool", 6.0),
        ("azurerm_container_registry", 6.0),
        ("azurerm_container_group", 5.0),
        // Serverless
        ("azurerm_function_app", 5.0),
        ("azurerm_app_service", 5.0),
        ("azurerm_app_service_plan", 6.0),
        ("azurerm_logic_app_workflow", 5.0),
        // Monitoring
        ("azurerm_monitor_metric_alert", 4.0),
        ("azurerm_log_analytics_workspace", 5.0),
        ("azurerm_application_insights", 4.0),
        ("azurerm_monitor_action_group", 4.0),
        // Analytics
        ("azurerm_data_factory", 6.0),
        ("azurerm_synapse_workspace", 7.0),
        ("azurerm_stream_analytics_job", 5.0),
        // Low risk
        ("azurerm_storage_blob", 2.0),
        ("azurerm_public_ip", 3.0),
        ("azurerm_network_interface", 3.0),
    ])
}

fn recommendations(changes: &[ChangeView<'_>]) -> Vec<String> {
    let mut recs = Vec::new();

    if changes
        .iter()
        .any(|c| c.resource_type.contains("network_security"))
    {
        recs.push("Network Security Group changes detected - review security rules".into());
        recs.push("Consider using Azure Security Center recommendations".into());
    }

    if changes.iter().any(|c| c.resource_type.contains("role_")) {
        recs.push("RBAC changes detected - verify role assignments and permissions".into());
        recs.push("Use Azure AD Privileged Identity Management for sensitive roles".into());
    }

    if changes
        .iter()
        .any(|c| matches!(c.resource_type, "azurerm_virtual_network" | "azurerm_subnet"))
    {
        recs.push("Virtual Network changes detected - may affect connectivity".into());
        recs.push("Check for peering relationships and dependent resources".into());
    }

    if changes.iter().any(|c| c.resource_type.contains("sql_")) {
        recs.push("Azure SQL changes detected - ensure backups are configured".into());
        recs.push("Verify Transparent Data Encryption (TDE) settings".into());
    }

    if changes.iter().any(|c| c.resource_type.contains("key_vault")) {
        recs.push("Key Vault changes detected - critical for application security".into());
        recs.push("Ensure proper access policies and audit logging".into());
    }

    if changes
        .iter()
        .any(|c| c.resource_type.contains("kubernetes_cluster"))
    {
        recs.push("AKS changes detected - may affect running workloads".into());
        recs.push("Consider using Blue-Green deployment strategies".into());
    }

    if changes
        .iter()
        .any(|c| c.resource_type.contains("storage_account"))
    {
        recs.push("Storage Account changes detected - verify data replication settings".into());
    }

    recs
}
