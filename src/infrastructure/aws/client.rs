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

use crate::shared::error::{Result, StackError};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::operation::get_parameter::GetParameterError;
use aws_sdk_ssm::Client;

/// Remote key-value store holding deployment configuration.
///
/// `Ok(None)` means the parameter exists but carries no value.
#[async_trait::async_trait]
pub trait ParameterStore: Send + Sync {
    async fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<Option<String>>;
}

pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    /// Creates a store using the default AWS credential and region chain.
    pub async fn new(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let shared_config = loader.load().await;

        Self {
            client: Client::new(&shared_config),
        }
    }
}

#[async_trait::async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<Option<String>> {
        let resp = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(with_decryption)
            .send()
            .await;

        match resp {
            Ok(output) => Ok(output
                .parameter()
                .and_then(|p| p.value())
                .map(|v| v.to_string())),
            Err(err) => match err.as_service_error() {
                Some(GetParameterError::ParameterNotFound(_)) => Err(StackError::not_found(name)),
                _ => Err(StackError::ParameterStore {
                    name: name.to_string(),
                    message: DisplayErrorContext(&err).to_string(),
                }),
            },
        }
    }
}
