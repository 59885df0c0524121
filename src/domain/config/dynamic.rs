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

use super::settings::DeploymentSettings;
use crate::infrastructure::constants::RESERVED_TAG_KEYS;
use crate::shared::error::{Result, StackError};
use std::collections::BTreeMap;
use tracing::warn;

const TAG_PREFIX: &str = "stack.tag.";

/// Parse dynamic configuration properties from -D key=value format
pub fn parse_dynamic_configs(configs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();

    for config in configs {
        let (key, value) = config.split_once('=').ok_or_else(|| {
            StackError::config_error(format!(
                "Invalid config format: '{}'. Expected 'key=value'",
                config
            ))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(StackError::config_error(format!(
                "Empty key in config: '{}'",
                config
            )));
        }

        map.insert(key.to_string(), value.trim().to_string());
    }

    Ok(map)
}

/// Applies overrides to `settings` and returns the extra stack tags
/// given as `stack.tag.<key>=<value>`.
pub fn apply_to_settings(
    configs: &BTreeMap<String, String>,
    settings: &mut DeploymentSettings,
) -> Result<BTreeMap<String, String>> {
    let mut tags = BTreeMap::new();

    for (key, value) in configs {
        match key.as_str() {
            "stack.domain-name" => settings.es_domain_name = value.clone(),
            "stack.deployment-type" => settings.deployment_type = value.parse()?,
            "stack.vpc-cidr" => settings.vpc_cidr = value.clone(),
            "stack.notification-email" => {
                settings.notification_email = non_empty(value);
            }
            "stack.notification-slack-url" => {
                settings.notification_slack_url = non_empty(value);
            }
            _ => {
                if let Some(tag) = key.strip_prefix(TAG_PREFIX) {
                    if tag.is_empty() {
                        return Err(StackError::config_error(format!(
                            "Empty tag key in config: '{}'",
                            key
                        )));
                    }
                    if RESERVED_TAG_KEYS.contains(&tag) {
                        return Err(StackError::config_error(format!(
                            "Tag '{}' is set by the stack and cannot be overridden",
                            tag
                        )));
                    }
                    tags.insert(tag.to_string(), value.clone());
                } else {
                    warn!(key = %key, "Ignoring unknown dynamic config");
                }
            }
        }
    }

    Ok(tags)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
