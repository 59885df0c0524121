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

use crate::infrastructure::constants::{
    TAG_DEPARTMENT, TAG_DEPLOY_ENVIRONMENT, TAG_NAME, TAG_PRODUCT, TAG_PROJECT,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Tags applied to every taggable resource of the stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTags {
    tags: BTreeMap<String, String>,
}

impl StackTags {
    /// Project, department and product tags plus the deployment environment.
    pub fn for_environment(environment: &str) -> Self {
        let mut tags = Self::default();
        for (key, value) in [TAG_PROJECT, TAG_DEPARTMENT, TAG_PRODUCT] {
            tags.insert(key, value);
        }
        tags.insert(TAG_DEPLOY_ENVIRONMENT, environment);
        tags
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Adds `extra` tags; keys already present keep their value.
    pub fn extend(&mut self, extra: BTreeMap<String, String>) {
        for (key, value) in extra {
            self.tags.entry(key).or_insert(value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.tags.iter()
    }

    /// CloudFormation `Tags` list, with an optional `Name` tag.
    pub fn to_cfn(&self, name: Option<&str>) -> Value {
        let mut tags = self.tags.clone();
        if let Some(name) = name {
            tags.insert(TAG_NAME.to_string(), name.to_string());
        }
        Value::Array(
            tags.iter()
                .map(|(k, v)| json!({ "Key": k, "Value": v }))
                .collect(),
        )
    }
}
