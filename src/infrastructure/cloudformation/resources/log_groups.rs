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

use super::access_policy::{Effect, PolicyDocument, PolicyStatement, Principal};
use super::traits::{ResourceBuilder, TaggedResourceBuilder};
use crate::infrastructure::cloudformation::intrinsics::{get_att, sub};
use crate::infrastructure::cloudformation::tags::StackTags;
use crate::infrastructure::cloudformation::template::{Resource, Template};
use crate::infrastructure::constants::{LOG_RETENTION_DAYS, SEARCH_SERVICE_PRINCIPAL};
use crate::shared::error::Result;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    SlowSearch,
    Application,
    SlowIndex,
}

impl LogType {
    /// Key under `LogPublishingOptions`.
    pub fn publishing_key(&self) -> &'static str {
        match self {
            LogType::SlowSearch => "SEARCH_SLOW_LOGS",
            LogType::Application => "ES_APPLICATION_LOGS",
            LogType::SlowIndex => "INDEX_SLOW_LOGS",
        }
    }

    fn logical_suffix(&self) -> &'static str {
        match self {
            LogType::SlowSearch => "SlowSearchLogs",
            LogType::Application => "AppLogs",
            LogType::SlowIndex => "SlowIndexLogs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoggingOptions {
    pub slow_search_log_enabled: bool,
    pub app_log_enabled: bool,
    pub slow_index_log_enabled: bool,
}

impl LoggingOptions {
    pub fn all() -> Self {
        Self {
            slow_search_log_enabled: true,
            app_log_enabled: true,
            slow_index_log_enabled: true,
        }
    }

    pub fn enabled(&self) -> Vec<LogType> {
        [
            (self.slow_search_log_enabled, LogType::SlowSearch),
            (self.app_log_enabled, LogType::Application),
            (self.slow_index_log_enabled, LogType::SlowIndex),
        ]
        .into_iter()
        .filter_map(|(enabled, log_type)| enabled.then_some(log_type))
        .collect()
    }
}

/// Handles to the declared log groups.
#[derive(Debug, Clone, Default)]
pub struct DomainLogs {
    pub log_groups: Vec<(LogType, String)>,
    pub resource_policy_id: Option<String>,
}

impl DomainLogs {
    /// `LogPublishingOptions` of the search domain.
    pub fn publishing_options(&self) -> Value {
        let mut options = Map::new();
        for (log_type, logical_id) in &self.log_groups {
            options.insert(
                log_type.publishing_key().to_string(),
                json!({
                    "CloudWatchLogsLogGroupArn": get_att(logical_id, "Arn"),
                    "Enabled": true,
                }),
            );
        }
        Value::Object(options)
    }
}

/// Log groups receiving the search domain's logs, and the resource policy
/// that lets the search service write to them.
pub struct LogGroupsBuilder {
    logical_prefix: String,
    domain_name: String,
    logging: LoggingOptions,
    retention_days: u32,
    tags: StackTags,
}

impl LogGroupsBuilder {
    pub fn new(
        logical_prefix: &str,
        domain_name: &str,
        logging: LoggingOptions,
        tags: StackTags,
    ) -> Self {
        Self {
            logical_prefix: logical_prefix.to_string(),
            domain_name: domain_name.to_string(),
            logging,
            retention_days: LOG_RETENTION_DAYS,
            tags,
        }
    }

    fn resource_policy(&self, log_groups: &[(LogType, String)]) -> Result<Value> {
        let statement = log_groups.iter().fold(
            PolicyStatement::new(Effect::Allow)
                .principal(Principal::Service(SEARCH_SERVICE_PRINCIPAL.to_string()))
                .action("logs:PutLogEvents")
                .action("logs:CreateLogStream"),
            |statement, (_, logical_id)| statement.resource(format!("${{{}.Arn}}", logical_id)),
        );
        let document = serde_json::to_string(&PolicyDocument::new(vec![statement]).to_json())?;

        Ok(json!({
            "PolicyName": format!("{}-search-logs", self.domain_name),
            "PolicyDocument": sub(document),
        }))
    }
}

impl TaggedResourceBuilder for LogGroupsBuilder {
    fn stack_tags(&self) -> &StackTags {
        &self.tags
    }
}

impl ResourceBuilder for LogGroupsBuilder {
    type Output = DomainLogs;

    fn declare(&self, template: &mut Template) -> Result<DomainLogs> {
        let mut log_groups = Vec::new();
        for log_type in self.logging.enabled() {
            let logical_id = format!("{}{}", self.logical_prefix, log_type.logical_suffix());
            template.add_resource(
                logical_id.clone(),
                Resource::new(
                    "AWS::Logs::LogGroup",
                    json!({
                        "RetentionInDays": self.retention_days,
                        "Tags": self.cfn_tags(),
                    }),
                ),
            )?;
            log_groups.push((log_type, logical_id));
        }

        if log_groups.is_empty() {
            return Ok(DomainLogs::default());
        }

        let policy_id = format!("{}LogResourcePolicy", self.logical_prefix);
        template.add_resource(
            policy_id.clone(),
            Resource::new("AWS::Logs::ResourcePolicy", self.resource_policy(&log_groups)?),
        )?;

        Ok(DomainLogs {
            log_groups,
            resource_policy_id: Some(policy_id),
        })
    }
}
