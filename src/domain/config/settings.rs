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

//! Deployment settings stored in the parameter store

use super::profile::{DeploymentProfile, DeploymentType};
use crate::shared::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

/// Settings of one deployment environment.
///
/// The JSON keys match the payload stored under
/// `/oc-elasticsearch-cdk/config/<environment>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSettings {
    pub es_domain_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_slack_url: Option<String>,
    pub deployment_type: DeploymentType,
    pub vpc_cidr: String,
}

impl DeploymentSettings {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Load settings from a local JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn profile(&self) -> DeploymentProfile {
        self.deployment_type.profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PAYLOAD: &str = r#"{
        "esDomainName": "oc-search-dev",
        "notificationEmail": "ops@example.org",
        "notificationSlackUrl": "https://hooks.slack.com/services/T000/B000/XXX",
        "deploymentType": "dev",
        "vpcCidr": "10.1.0.0/24"
    }"#;

    #[test]
    fn test_parse_all_fields() {
        let settings = DeploymentSettings::from_json(PAYLOAD).unwrap();
        assert_eq!(settings.es_domain_name, "oc-search-dev");
        assert_eq!(settings.notification_email.as_deref(), Some("ops@example.org"));
        assert_eq!(
            settings.notification_slack_url.as_deref(),
            Some("https://hooks.slack.com/services/T000/B000/XXX")
        );
        assert_eq!(settings.deployment_type, DeploymentType::Dev);
        assert_eq!(settings.vpc_cidr, "10.1.0.0/24");
    }

    #[test]
    fn test_json_round_trip_keeps_fields() {
        let settings = DeploymentSettings::from_json(PAYLOAD).unwrap();
        let reparsed = DeploymentSettings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(settings, reparsed);

        let original: serde_json::Value = serde_json::from_str(PAYLOAD).unwrap();
        let rendered: serde_json::Value =
            serde_json::from_str(&settings.to_json().unwrap()).unwrap();
        assert_eq!(original, rendered);
    }

    #[test]
    fn test_notification_fields_are_optional() {
        let settings = DeploymentSettings::from_json(
            r#"{"esDomainName":"search","deploymentType":"prod","vpcCidr":"10.2.0.0/24"}"#,
        )
        .unwrap();
        assert!(settings.notification_email.is_none());
        assert!(settings.notification_slack_url.is_none());
        assert_eq!(settings.profile(), DeploymentType::Prod.profile());
    }

    #[test]
    fn test_unknown_deployment_type_is_rejected() {
        let err = DeploymentSettings::from_json(
            r#"{"esDomainName":"search","deploymentType":"qa","vpcCidr":"10.2.0.0/24"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Unknown deployment type 'qa'"));
    }

    #[test]
    fn test_missing_required_field() {
        let result = DeploymentSettings::from_json(r#"{"esDomainName":"search"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAYLOAD.as_bytes()).unwrap();
        let settings = DeploymentSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.es_domain_name, "oc-search-dev");
    }
}
