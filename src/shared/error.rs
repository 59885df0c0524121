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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, StackError>;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("You must set {variable}!")]
    MissingEnvironment { variable: String },

    #[error("Invalid environment name '{0}': only letters, digits, '_', '.' and '-' are allowed")]
    InvalidEnvironment(String),

    #[error("Parameter {name} not found!")]
    ParameterNotFound { name: String },

    #[error("Failed fetching config: parameter {name} has no value")]
    EmptyParameter { name: String },

    #[error("Failed fetching config: parameter store error for {name}: {message}")]
    ParameterStore { name: String, message: String },

    #[error("Invalid configuration in parameter {name}: {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Unknown deployment type '{0}' (expected one of: dev, prod)")]
    UnknownDeploymentType(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource already declared: {resource_type} '{logical_id}'")]
    DuplicateResource {
        resource_type: String,
        logical_id: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl StackError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn validation(context: impl Into<String>) -> Self {
        Self::ValidationError(context.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ParameterNotFound { name: name.into() }
    }

    pub fn duplicate(resource_type: impl Into<String>, logical_id: impl Into<String>) -> Self {
        Self::DuplicateResource {
            resource_type: resource_type.into(),
            logical_id: logical_id.into(),
        }
    }
}
