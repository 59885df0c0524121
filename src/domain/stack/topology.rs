// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resource topology of the search cluster stack

use super::validator::StackValidator;
use crate::domain::config::{DeploymentProfile, DeploymentSettings, EnvironmentName};
use crate::infrastructure::cloudformation::intrinsics::{get_att, reference};
use crate::infrastructure::cloudformation::resources::security_group::group_id;
use crate::infrastructure::cloudformation::resources::{
    EbsOptions, Effect, LogGroupsBuilder, LoggingOptions, PolicyDocument, PolicyStatement,
    Port, Principal, ResourceBuilder, SearchDomainBuilder, SearchDomainConfig,
    SecurityGroupBuilder, SubnetType, VpcBuilder,
};
use crate::infrastructure::cloudformation::{Ipv4Cidr, RemovalPolicy, StackTags, Template};
use crate::infrastructure::constants::*;
use crate::shared::error::Result;
use std::collections::BTreeMap;
use tracing::info;

/// The search cluster stack of one deployment environment.
#[derive(Debug, Clone)]
pub struct SearchStack {
    environment: EnvironmentName,
    settings: DeploymentSettings,
    profile: DeploymentProfile,
    extra_tags: BTreeMap<String, String>,
}

impl SearchStack {
    pub fn new(environment: EnvironmentName, settings: DeploymentSettings) -> Self {
        let profile = settings.profile();
        Self {
            environment,
            settings,
            profile,
            extra_tags: BTreeMap::new(),
        }
    }

    pub fn with_tags(mut self, extra_tags: BTreeMap<String, String>) -> Self {
        self.extra_tags.extend(extra_tags);
        self
    }

    pub fn stack_name(&self) -> String {
        format!("{}{}", self.settings.es_domain_name, STACK_SUFFIX)
    }

    pub fn environment(&self) -> &EnvironmentName {
        &self.environment
    }

    pub fn settings(&self) -> &DeploymentSettings {
        &self.settings
    }

    pub fn profile(&self) -> &DeploymentProfile {
        &self.profile
    }

    pub fn tags(&self) -> StackTags {
        let mut tags = StackTags::for_environment(self.environment.as_str());
        tags.extend(self.extra_tags.clone());
        tags
    }

    /// Declares every resource of the stack into a new template.
    pub fn synthesize(&self) -> Result<Template> {
        StackValidator::validate(&self.settings, &self.profile)?;

        let domain_name = &self.settings.es_domain_name;
        let tags = self.tags();
        let mut template = Template::new(format!(
            "Search cluster {} ({} deployment, environment {})",
            domain_name, self.settings.deployment_type, self.environment
        ));

        info!(
            stack = %self.stack_name(),
            deployment_type = %self.settings.deployment_type,
            "Synthesizing stack"
        );

        let network = VpcBuilder::new(
            format!("{}{}", domain_name, VPC_SUFFIX),
            self.settings.vpc_cidr.parse()?,
            self.profile.num_azs,
            tags.clone(),
        )
        .with_subnet(
            SUBNET_GROUP_ISOLATED,
            SubnetType::PrivateIsolated,
            SUBNET_CIDR_MASK,
        )
        .with_subnet(SUBNET_GROUP_PUBLIC, SubnetType::Public, SUBNET_CIDR_MASK)
        .declare(&mut template)?;

        let internal_peer: Ipv4Cidr = INTERNAL_PEER_CIDR.parse()?;
        let security_group = SecurityGroupBuilder::new(
            format!("{}{}", domain_name, SECURITY_GROUP_SUFFIX),
            format!("{} security group", domain_name),
            network.vpc_ref(),
            tags.clone(),
        )
        .add_ingress_rule(internal_peer, Port::all_tcp(), INTERNAL_INGRESS_DESCRIPTION)
        .declare(&mut template)?;

        let logs = LogGroupsBuilder::new(
            LOGICAL_ID_DOMAIN,
            domain_name,
            LoggingOptions::all(),
            tags.clone(),
        )
        .declare(&mut template)?;

        let domain_config = SearchDomainConfig {
            domain_name: domain_name.clone(),
            engine_version: ENGINE_VERSION.to_string(),
            capacity: self.profile.capacity.clone(),
            ebs: EbsOptions {
                volume_size: EBS_VOLUME_SIZE,
                volume_type: EBS_VOLUME_TYPE.to_string(),
            },
            automated_snapshot_start_hour: SNAPSHOT_START_HOUR,
            enable_version_upgrade: true,
            removal_policy: RemovalPolicy::Retain,
            availability_zone_count: self.profile.num_azs,
            subnet_ids: network.subnet_refs(SubnetType::PrivateIsolated),
            security_group_ids: vec![group_id(&security_group)],
            advanced_options: ADVANCED_OPTIONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            access_policies: PolicyDocument::new(vec![Self::access_policy()]),
        };
        let domain = SearchDomainBuilder::new(domain_config, logs, tags).declare(&mut template)?;

        template.add_output(
            "DomainEndpoint",
            get_att(&domain, "DomainEndpoint"),
            "Endpoint of the search domain",
        );
        template.add_output("DomainArn", get_att(&domain, "Arn"), "ARN of the search domain");
        template.add_output("VpcId", reference(&network.vpc_logical_id), "VPC of the search domain");

        info!(
            stack = %self.stack_name(),
            resources = template.resources.len(),
            "Stack synthesized"
        );
        Ok(template)
    }

    /// Search actions for any principal; the domain is reachable only from
    /// inside the VPC and its peers.
    // TODO: narrow the principal once the peered consumers are known
    fn access_policy() -> PolicyStatement {
        PolicyStatement::new(Effect::Allow)
            .principal(Principal::Any)
            .action(SEARCH_ACTIONS)
            .resource("*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::DeploymentType;
    use serde_json::json;

    fn stack(deployment_type: DeploymentType) -> SearchStack {
        SearchStack::new(
            EnvironmentName::new("dev").unwrap(),
            DeploymentSettings {
                es_domain_name: "oc-search".to_string(),
                notification_email: None,
                notification_slack_url: None,
                deployment_type,
                vpc_cidr: "10.1.0.0/24".to_string(),
            },
        )
    }

    #[test]
    fn test_stack_name() {
        assert_eq!(stack(DeploymentType::Dev).stack_name(), "oc-search-stack");
    }

    #[test]
    fn test_resource_inventory() {
        let template = stack(DeploymentType::Dev).synthesize().unwrap();
        let count = |ty: &str| template.resources_of_type(ty).count();

        assert_eq!(count("AWS::EC2::VPC"), 1);
        assert_eq!(count("AWS::EC2::Subnet"), 6);
        assert_eq!(count("AWS::EC2::SecurityGroup"), 1);
        assert_eq!(count("AWS::OpenSearchService::Domain"), 1);
        assert_eq!(count("AWS::Logs::LogGroup"), 3);
        assert_eq!(count("AWS::EC2::InternetGateway"), 1);
    }

    #[test]
    fn test_domain_uses_profile_capacity() {
        let template = stack(DeploymentType::Prod).synthesize().unwrap();
        let domain = template.resource(LOGICAL_ID_DOMAIN).unwrap();
        let cluster = &domain.properties["ClusterConfig"];

        assert_eq!(cluster["InstanceCount"], 3);
        assert_eq!(cluster["InstanceType"], "r6g.large.search");
        assert_eq!(cluster["DedicatedMasterCount"], 3);
        assert_eq!(cluster["DedicatedMasterType"], "c6g.large.search");
        assert_eq!(cluster["ZoneAwarenessConfig"]["AvailabilityZoneCount"], 3);
        assert_eq!(domain.properties["EngineVersion"], "Elasticsearch_7.10");
        assert_eq!(
            domain.properties["AccessPolicies"]["Statement"],
            json!([{"Effect": "Allow", "Principal": {"AWS": "*"}, "Action": "es:*", "Resource": "*"}])
        );
    }

    #[test]
    fn test_extra_tags() {
        let stack = stack(DeploymentType::Dev)
            .with_tags(BTreeMap::from([("owner".to_string(), "search".to_string())]));
        let tags = stack.tags();
        assert_eq!(tags.get("owner"), Some("search"));
        assert_eq!(tags.get("deploy_environment"), Some("dev"));
    }

    #[test]
    fn test_extra_tags_keep_fixed_tags() {
        let stack = stack(DeploymentType::Dev).with_tags(BTreeMap::from([
            ("deploy_environment".to_string(), "prod".to_string()),
            ("project".to_string(), "X".to_string()),
        ]));
        let tags = stack.tags();
        assert_eq!(tags.get("deploy_environment"), Some("dev"));
        assert_eq!(tags.get("project"), Some("MH"));
    }

    #[test]
    fn test_invalid_settings_fail_before_declaring() {
        let mut stack = stack(DeploymentType::Dev);
        stack.settings.vpc_cidr = "10.1.0.0/27".to_string();
        assert!(stack.synthesize().is_err());
    }
}
