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

//! Deployment profiles keyed by deployment type

use crate::shared::error::StackError;
use serde::{Deserialize, Serialize};

/// Deployment type selecting a capacity profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeploymentType {
    Dev,
    Prod,
}

impl DeploymentType {
    pub const ALL: [DeploymentType; 2] = [DeploymentType::Dev, DeploymentType::Prod];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentType::Dev => "dev",
            DeploymentType::Prod => "prod",
        }
    }

    pub fn profile(&self) -> DeploymentProfile {
        match self {
            DeploymentType::Dev => DeploymentProfile {
                num_azs: 3,
                capacity: CapacityConfig {
                    data_nodes: 3,
                    data_node_instance_type: "t3.medium.search".to_string(),
                    master_nodes: 3,
                    master_node_instance_type: "t3.medium.search".to_string(),
                },
            },
            DeploymentType::Prod => DeploymentProfile {
                num_azs: 3,
                capacity: CapacityConfig {
                    data_nodes: 3,
                    data_node_instance_type: "r6g.large.search".to_string(),
                    master_nodes: 3,
                    master_node_instance_type: "c6g.large.search".to_string(),
                },
            },
        }
    }
}

impl std::fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeploymentType {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(DeploymentType::Dev),
            "prod" => Ok(DeploymentType::Prod),
            _ => Err(StackError::UnknownDeploymentType(s.to_string())),
        }
    }
}

impl TryFrom<String> for DeploymentType {
    type Error = StackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeploymentType> for String {
    fn from(value: DeploymentType) -> Self {
        value.as_str().to_string()
    }
}

/// Node counts and instance sizes of a search domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityConfig {
    pub data_nodes: u32,
    pub data_node_instance_type: String,
    pub master_nodes: u32,
    pub master_node_instance_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentProfile {
    pub num_azs: u8,
    pub capacity: CapacityConfig,
}
