//! AWS provider model — category map, risk weights, critical patterns.

use std::collections::HashMap;

use super::{ActionMultipliers, ChangeView, ProviderModel, ResourceCategory};

pub(super) fn model() -> ProviderModel {
    ProviderModel {
        id: "aws",
        categories: categories(),
        risk_weights: risk_weights(),
        critical_patterns: CRITICAL_PATTERNS,
        action_multipliers: ActionMultipliers {
            create: 1.0,
            update: 1.5,
            delete: 2.5,
            replace: Some(2.0),
        },
        deployment_multiplier: 1.0,
        recommend: recommendations,
    }
}

const CRITICAL_PATTERNS: &[&str] = &[
    "security_group",
    "iam_",
    "rds_",
    "vpc",
    "subnet",
    "kms_",
    "eks_cluster",
];

fn categories() -> HashMap<&'static str, ResourceCategory> {
    use ResourceCategory::*;
    HashMap::from([
        // Compute
        ("aws_instance", Compute),
        ("aws_launch_template", Compute),
        ("aws_autoscaling_group", Compute),
        ("aws_launch_configuration", Compute),
        // Networking
        ("aws_vpc", Networking),
        ("aws_subnet", Networking),
        ("aws_security_group", Networking),
        ("aws_route_table", Networking),
        ("aws_internet_gateway", Networking),
        ("aws_nat_gateway", Networking),
        ("aws_network_acl", Networking),
        ("aws_load_balancer", Networking),
        ("aws_lb", Networking),
        ("aws_lb_target_group", Networking),
        ("aws_cloudfront_distribution", Networking),
        // Storage
        ("aws_s3_bucket", Storage),
        ("aws_s3_bucket_policy", Storage),
        ("aws_ebs_volume", Storage),
        ("aws_efs_file_system", Storage),
        ("aws_fsx_file_system", Storage),
        // Database
        ("aws_rds_instance", Database),
        ("aws_rds_cluster", Database),
        ("aws_dynamodb_table", Database),
        ("aws_elasticache_cluster", Database),
        ("aws_elasticsearch_domain", Database),
        ("aws_opensearch_domain", Database),
        // Security & Identity
        ("aws_iam_role", Identity),
        ("aws_iam_policy", Identity),
        ("aws_iam_user", Identity),
        ("aws_iam_group", Identity),
        ("aws_iam_role_policy_attachment", Identity),
        ("aws_kms_key", Security),
        ("aws_secrets_manager_secret", Security),
        // Serverless
        ("aws_lambda_function", Serverless),
        ("aws_api_gateway_rest_api", Serverless),
        ("aws_api_gateway_deployment", Serverless),
        ("aws_api_gateway_v2_api", Serverless),
        // Container
        ("aws_ecs_cluster", Container),
        ("aws_ecs_service", Container),
        ("aws_eks_cluster", Container),
        ("aws_eks_node_group", Container),
        // Monitoring
        ("aws_cloudwatch_metric_alarm", Monitoring),
        ("aws_cloudwatch_log_group", Monitoring),
        ("aws_cloudwatch_dashboard", Monitoring),
        ("aws_sns_topic", Monitoring),
        ("aws_sqs_queue", Monitoring),
        // Analytics
        ("aws_kinesis_stream", Analytics),
        ("aws_kinesis_firehose_delivery_stream", Analytics),
        ("aws_glue_job", Analytics),
        ("aws_redshift_cluster", Analytics),
    ])
}

fn risk_weights() -> HashMap<&'static str, f64> {
    HashMap::from([
        // Networking (infrastructure critical)
        ("aws_security_group", 8.0),
        ("aws_vpc", 9.0),
        ("aws_subnet", 7.0),
        ("aws_route_table", 7.0),
        ("aws_internet_gateway", 8.0),
        ("aws_nat_gateway", 7.0),
        ("aws_network_acl", 8.0),
        // Database (data critical)
        ("aws_rds_instance", 9.0),
        ("aws_rds_cluster", 9.0),
        ("aws_dynamodb_table", 8.0),
        ("aws_elasticsearch_domain", 8.0),
        ("aws_opensearch_domain", 8.0),
        ("aws_elasticache_cluster", 7.0),
        // Identity and access management (security critical)
        ("aws_iam_role", 8.0),
        ("aws_iam_policy", 8.0),
        ("aws_iam_user", 7.0),
        ("aws_iam_group", 6.0),
        ("aws_iam_role_policy_attachment", 7.0),
        ("aws_kms_key", 9.0),
        // Storage (data critical)
        ("aws_s3_bucket", 7.0),
        ("aws_s3_bucket_policy", 8.0),
        ("aws_ebs_volume", 6.0),
        ("aws_efs_file_system", 7.0),
        // Compute
        ("aws_instance", 5.0),
        ("aws_launch_template", 6.0),
        ("aws_autoscaling_group", 6.0),
        ("aws_load_balancer", 6.0),
        ("aws_lb_target_group", 5.0),
        // DNS and CDN
        ("aws_route53_record", 6.0),
        ("aws_route53_zone", 7.0),
        ("aws_cloudfront_distribution", 6.0),
        // Monitoring and logging
        ("aws_cloudwatch_metric_alarm", 4.0),
        ("aws_cloudwatch_log_group", 3.0),
        ("aws_sns_topic", 4.0),
        ("aws_sqs_queue", 4.0),
        // Serverless
        ("aws_lambda_function", 5.0),
        ("aws_api_gateway_rest_api", 6.0),
        ("aws_api_gateway_deployment", 5.0),
        // Container services
        ("aws_ecs_cluster", 6.0),
        ("aws_ecs_service", 5.0),
        ("aws_eks_cluster", 8.0),
        ("aws_eks_node_group", 6.0),
        // Low risk
        ("aws_s3_bucket_object", 2.0),
        ("aws_cloudwatch_dashboard", 2.0),
    ])
}

fn recommendations(changes: &[ChangeView<'_>]) -> Vec<String> {
    let mut recs = Vec::new();

    let security_groups: Vec<_> = changes
        .iter()
        .filter(|c| c.resource_type.contains("security_group"))
        .collect();
    if !security_groups.is_empty() {
        recs.push("AWS Security Groups detected - review ingress/egress rules carefully".into());
        if security_groups.iter().any(|c| c.has_action("delete")) {
            recs.push("Deleting Security Groups may break EC2 instance connectivity".into());
        }
    }

    if changes.iter().any(|c| c.resource_type.contains("iam_")) {
        recs.push("IAM changes detected - verify permissions and access policies".into());
        recs.push("Consider using AWS IAM Access Analyzer to validate policies".into());
    }

    if changes
        .iter()
        .any(|c| matches!(c.resource_type, "aws_vpc" | "aws_subnet"))
    {
        recs.push("VPC/Subnet changes detected - may affect network routing".into());
        recs.push("Check for dependent resources (EC2, RDS, Lambda) in affected subnets".into());
    }

    let rds: Vec<_> = changes
        .iter()
        .filter(|c| c.resource_type.contains("rds_"))
        .collect();
    if !rds.is_empty() {
        recs.push("RDS changes detected - ensure database backups are current".into());
        if rds.iter().any(|c| c.has_action("delete")) {
            recs.push("RDS deletion detected - verify final snapshot configuration".into());
        }
    }

    if changes.iter().any(|c| c.resource_type.contains("eks_")) {
        recs.push("EKS changes detected - may affect running workloads".into());
        recs.push("Consider draining nodes before making changes".into());
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
        assert_eq!(model.action_multiplier(Action::Create), 1.0);
        assert_eq!(model.action_multiplier(Action::Update), 1.5);
        assert_eq!(model.action_multiplier(Action::Delete), 2.5);
        assert_eq!(model.action_multiplier(Action::Replace), 2.0);
    }

    #[test]
    fn test_critical_patterns() {
        let model = model();
        assert!(model.is_critical("aws_security_group"));
        assert!(model.is_critical("aws_iam_role"));
        assert!(model.is_critical("AWS_VPC"));
        assert!(!model.is_critical("aws_s3_bucket"));
    }

    #[test]
    fn test_recommendations_mention_deletion_hazards() {
        let actions = vec!["delete".to_string()];
        let changes = [ChangeView {
            resource_type: "aws_security_group",
            address: "aws_security_group.web",
            actions: &actions,
        }];
        let recs = recommendations(&changes);
        assert!(recs.iter().any(|r| r.contains("ingress/egress")));
        assert!(recs.iter().any(|r| r.contains("break EC2 instance connectivity")));
    }
}
