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

use super::topology::SearchStack;
use crate::domain::config::{
    apply_to_settings, ConfigResolver, DeploymentSettings, EnvironmentName,
};
use crate::infrastructure::aws::{ParameterStore, SsmParameterStore};
use crate::infrastructure::cloudformation::Template;
use crate::shared::error::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// Where deployment settings come from.
pub enum SettingsSource {
    ParameterStore(Box<dyn ParameterStore>),
    File(PathBuf),
}

pub struct StackDescriptor {
    source: SettingsSource,
}

impl StackDescriptor {
    /// Descriptor backed by SSM Parameter Store.
    pub async fn new(region: Option<String>) -> Self {
        let store = SsmParameterStore::new(region).await;
        Self::with_store(Box::new(store))
    }

    pub fn with_store(store: Box<dyn ParameterStore>) -> Self {
        Self {
            source: SettingsSource::ParameterStore(store),
        }
    }

    pub fn with_settings_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SettingsSource::File(path.into()),
        }
    }

    pub async fn resolve_settings(&self, environment: &EnvironmentName) -> Result<DeploymentSettings> {
        match &self.source {
            SettingsSource::ParameterStore(store) => {
                ConfigResolver::new(store.as_ref()).resolve(environment).await
            }
            SettingsSource::File(path) => {
                info!(path = %path.display(), "Loading deployment configuration from file");
                DeploymentSettings::from_file(path)
            }
        }
    }

    /// Resolves the settings of `environment` and applies `overrides`.
    ///
    /// A missing environment fails before any settings lookup.
    pub async fn load_stack(
        &self,
        environment: Option<&str>,
        overrides: &BTreeMap<String, String>,
    ) -> Result<SearchStack> {
        let environment = EnvironmentName::from_optional(environment)?;
        let mut settings = self.resolve_settings(&environment).await?;
        let extra_tags = apply_to_settings(overrides, &mut settings)?;

        info!(
            environment = %environment,
            domain = %settings.es_domain_name,
            deployment_type = %settings.deployment_type,
            "Resolved deployment configuration"
        );

        Ok(SearchStack::new(environment, settings).with_tags(extra_tags))
    }

    pub async fn synthesize(
        &self,
        environment: Option<&str>,
        overrides: &BTreeMap<String, String>,
    ) -> Result<(SearchStack, Template)> {
        let stack = self.load_stack(environment, overrides).await?;
        let template = stack.synthesize()?;
        Ok((stack, template))
    }
}
