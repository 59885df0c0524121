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

use crate::infrastructure::constants::ENVIRONMENT_VARIABLE;
use crate::shared::error::{Result, StackError};
use regex::Regex;

/// Name of the deployment environment, e.g. `dev` or `prod-eu`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvironmentName(String);

impl EnvironmentName {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(StackError::MissingEnvironment {
                variable: ENVIRONMENT_VARIABLE.to_string(),
            });
        }
        let re = Regex::new(r"^[A-Za-z0-9_.\-]+$")
            .map_err(|e| StackError::config_error(e.to_string()))?;
        if !re.is_match(trimmed) {
            return Err(StackError::InvalidEnvironment(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Unset and empty values are both reported as a missing environment.
    pub fn from_optional(value: Option<&str>) -> Result<Self> {
        Self::new(value.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
