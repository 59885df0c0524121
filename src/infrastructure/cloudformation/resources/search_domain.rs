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

use super::access_policy::PolicyDocument;
use super::log_groups::DomainLogs;
use super::traits::{ResourceBuilder, TaggedResourceBuilder};
use crate::domain::config::CapacityConfig;
use crate::infrastructure::cloudformation::tags::StackTags;
use crate::infrastructure::cloudformation::template::{RemovalPolicy, Resource, Template};
use crate::infrastructure::constants::LOGICAL_ID_DOMAIN;
use crate::shared::error::{Result, StackError};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbsOptions {
    pub volume_size: u32,
    pub volume_type: String,
}

/// Everything needed to declare an `AWS::OpenSearchService::Domain`.
#[derive(Debug, Clone)]
pub struct SearchDomainConfig {
    pub domain_name: String,
    pub engine_version: String,
    pub capacity: CapacityConfig,
    pub ebs: EbsOptions,
    pub automated_snapshot_start_hour: u8,
    pub enable_version_upgrade: bool,
    pub removal_policy: RemovalPolicy,
    pub availability_zone_count: u8,
    pub subnet_ids: Vec<Value>,
    pub security_group_ids: Vec<Value>,
    pub advanced_options: BTreeMap<String, String>,
    pub access_policies: PolicyDocument,
}

pub struct SearchDomainBuilder {
    logical_id: String,
    config: SearchDomainConfig,
    logs: DomainLogs,
    tags: StackTags,
}

impl SearchDomainBuilder {
    pub fn new(config: SearchDomainConfig, logs: DomainLogs, tags: StackTags) -> Self {
        Self {
            logical_id: LOGICAL_ID_DOMAIN.to_string(),
            config,
            logs,
            tags,
        }
    }

    fn cluster_config(&self) -> Value {
        let capacity = &self.config.capacity;
        let mut cluster = json!({
            "InstanceCount": capacity.data_nodes,
            "InstanceType": capacity.data_node_instance_type,
            "DedicatedMasterEnabled": capacity.master_nodes > 0,
            "ZoneAwarenessEnabled": self.config.availability_zone_count > 1,
        });
        if capacity.master_nodes > 0 {
            cluster["DedicatedMasterCount"] = json!(capacity.master_nodes);
            cluster["DedicatedMasterType"] = json!(capacity.master_node_instance_type);
        }
        if self.config.availability_zone_count > 1 {
            cluster["ZoneAwarenessConfig"] = json!({
                "AvailabilityZoneCount": self.config.availability_zone_count,
            });
        }
        cluster
    }

    fn properties(&self) -> Value {
        let config = &self.config;
        let advanced_options: Map<String, Value> = config
            .advanced_options
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        let mut properties = json!({
            "DomainName": config.domain_name,
            "EngineVersion": config.engine_version,
            "ClusterConfig": self.cluster_config(),
            "EBSOptions": {
                "EBSEnabled": true,
                "VolumeSize": config.ebs.volume_size,
                "VolumeType": config.ebs.volume_type,
            },
            "SnapshotOptions": {
                "AutomatedSnapshotStartHour": config.automated_snapshot_start_hour,
            },
            "VPCOptions": {
                "SubnetIds": config.subnet_ids,
                "SecurityGroupIds": config.security_group_ids,
            },
            "AdvancedOptions": advanced_options,
            "AccessPolicies": config.access_policies.to_json(),
            "Tags": self.cfn_tags(),
        });

        let publishing = self.logs.publishing_options();
        if publishing.as_object().is_some_and(|o| !o.is_empty()) {
            properties["LogPublishingOptions"] = publishing;
        }
        properties
    }
}

impl TaggedResourceBuilder for SearchDomainBuilder {
    fn stack_tags(&self) -> &StackTags {
        &self.tags
    }
}

impl ResourceBuilder for SearchDomainBuilder {
    /// Logical id of the domain
    type Output = String;

    fn declare(&self, template: &mut Template) -> Result<String> {
        let config = &self.config;
        if config.subnet_ids.is_empty() {
            return Err(StackError::validation(format!(
                "Search domain '{}' has no subnets to deploy into",
                config.domain_name
            )));
        }
        if config.automated_snapshot_start_hour > 23 {
            return Err(StackError::validation(format!(
                "Snapshot start hour must be 0-23, got {}",
                config.automated_snapshot_start_hour
            )));
        }

        for statement in &config.access_policies.statements {
            if statement.is_unrestricted() {
                warn!(
                    domain = %config.domain_name,
                    "Access policy allows any principal on any resource; \
                     the domain relies on network isolation only"
                );
            }
        }

        let mut resource = Resource::new("AWS::OpenSearchService::Domain", self.properties())
            .removal_policy(config.removal_policy);
        if config.enable_version_upgrade {
            resource = resource.update_policy(json!({ "EnableVersionUpgrade": true }));
        }
        if let Some(policy_id) = &self.logs.resource_policy_id {
            resource = resource.depends_on(policy_id.clone());
        }

        template.add_resource(self.logical_id.clone(), resource)?;
        Ok(self.logical_id.clone())
    }
}
