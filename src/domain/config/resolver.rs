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

use super::environment::EnvironmentName;
use super::settings::DeploymentSettings;
use crate::infrastructure::aws::ParameterStore;
use crate::infrastructure::constants::CONFIG_PARAMETER_PREFIX;
use crate::shared::error::{Result, StackError};
use tracing::{error, info};

/// Resolves the deployment settings of an environment from a parameter store.
pub struct ConfigResolver<'a> {
    store: &'a dyn ParameterStore,
    prefix: String,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(store: &'a dyn ParameterStore) -> Self {
        Self::with_prefix(store, CONFIG_PARAMETER_PREFIX)
    }

    pub fn with_prefix(store: &'a dyn ParameterStore, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn parameter_name(&self, environment: &EnvironmentName) -> String {
        format!("{}/{}", self.prefix, environment)
    }

    pub async fn resolve(&self, environment: &EnvironmentName) -> Result<DeploymentSettings> {
        let name = self.parameter_name(environment);
        info!(parameter = %name, "Fetching deployment configuration");

        let value = match self.store.get_parameter(&name, true).await {
            Ok(Some(value)) => value,
            Ok(None) => return Err(StackError::EmptyParameter { name }),
            Err(err @ StackError::ParameterStore { .. }) => {
                error!(parameter = %name, error = %err, "Parameter store request failed");
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        DeploymentSettings::from_json(&value).map_err(|e| StackError::InvalidParameter {
            name,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::DeploymentType;
    use std::collections::HashMap;
    use std::sync::Mutex;

    enum Reply {
        Value(Option<String>),
        Failure(String),
    }

    #[derive(Default)]
    struct FakeStore {
        replies: HashMap<String, Reply>,
        requests: Mutex<Vec<(String, bool)>>,
    }

    impl FakeStore {
        fn with(mut self, name: &str, reply: Reply) -> Self {
            self.replies.insert(name.to_string(), reply);
            self
        }
    }

    #[async_trait::async_trait]
    impl ParameterStore for FakeStore {
        async fn get_parameter(&self, name: &str, with_decryption: bool) -> Result<Option<String>> {
            self.requests
                .lock()
                .unwrap()
                .push((name.to_string(), with_decryption));
            match self.replies.get(name) {
                Some(Reply::Value(value)) => Ok(value.clone()),
                Some(Reply::Failure(message)) => Err(StackError::ParameterStore {
                    name: name.to_string(),
                    message: message.clone(),
                }),
                None => Err(StackError::not_found(name)),
            }
        }
    }

    const PAYLOAD: &str = r#"{"esDomainName":"search-dev","deploymentType":"dev","vpcCidr":"10.1.0.0/24"}"#;

    fn env(name: &str) -> EnvironmentName {
        EnvironmentName::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_requests_decrypted_parameter() {
        let store = FakeStore::default().with(
            "/oc-elasticsearch-cdk/config/dev",
            Reply::Value(Some(PAYLOAD.to_string())),
        );
        let resolver = ConfigResolver::new(&store);

        let settings = resolver.resolve(&env("dev")).await.unwrap();

        assert_eq!(settings.es_domain_name, "search-dev");
        assert_eq!(settings.deployment_type, DeploymentType::Dev);
        assert_eq!(
            *store.requests.lock().unwrap(),
            vec![("/oc-elasticsearch-cdk/config/dev".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn test_not_found_names_exact_key() {
        let store = FakeStore::default();
        let resolver = ConfigResolver::new(&store);

        let err = resolver.resolve(&env("staging")).await.unwrap_err();

        match err {
            StackError::ParameterNotFound { name } => {
                assert_eq!(name, "/oc-elasticsearch-cdk/config/staging")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_distinct_from_not_found() {
        let store = FakeStore::default().with(
            "/oc-elasticsearch-cdk/config/dev",
            Reply::Failure("throttled".to_string()),
        );
        let resolver = ConfigResolver::new(&store);

        let err = resolver.resolve(&env("dev")).await.unwrap_err();

        assert!(matches!(err, StackError::ParameterStore { ref message, .. } if message == "throttled"));
    }

    #[tokio::test]
    async fn test_parameter_without_value() {
        let store =
            FakeStore::default().with("/oc-elasticsearch-cdk/config/dev", Reply::Value(None));
        let resolver = ConfigResolver::new(&store);

        let err = resolver.resolve(&env("dev")).await.unwrap_err();

        assert!(matches!(err, StackError::EmptyParameter { .. }));
        assert!(err.to_string().starts_with("Failed fetching config"));
    }

    #[tokio::test]
    async fn test_unparseable_payload() {
        let store = FakeStore::default().with(
            "/oc-elasticsearch-cdk/config/dev",
            Reply::Value(Some("not json".to_string())),
        );
        let resolver = ConfigResolver::new(&store);

        let err = resolver.resolve(&env("dev")).await.unwrap_err();

        assert!(matches!(err, StackError::InvalidParameter { ref name, .. } if name == "/oc-elasticsearch-cdk/config/dev"));
    }

    #[test]
    fn test_custom_prefix_trailing_slash() {
        let store = FakeStore::default();
        let resolver = ConfigResolver::with_prefix(&store, "/custom/config/");
        assert_eq!(resolver.parameter_name(&env("prod")), "/custom/config/prod");
    }
}
