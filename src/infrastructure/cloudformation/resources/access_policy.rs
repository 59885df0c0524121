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

//! IAM-style policy documents for resource policies

use crate::infrastructure::constants::POLICY_VERSION;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::Allow => "Allow",
            Effect::Deny => "Deny",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Any AWS principal (`"AWS": "*"`)
    Any,
    Service(String),
}

impl Principal {
    fn key(&self) -> &'static str {
        match self {
            Principal::Any => "AWS",
            Principal::Service(_) => "Service",
        }
    }

    fn value(&self) -> &str {
        match self {
            Principal::Any => "*",
            Principal::Service(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyStatement {
    pub effect: Effect,
    pub principals: Vec<Principal>,
    pub actions: Vec<String>,
    pub resources: Vec<String>,
}

impl PolicyStatement {
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            principals: Vec::new(),
            actions: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn principal(mut self, principal: Principal) -> Self {
        self.principals.push(principal);
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resources.push(resource.into());
        self
    }

    /// Allows any principal on any resource.
    pub fn is_unrestricted(&self) -> bool {
        self.effect == Effect::Allow
            && self.principals.contains(&Principal::Any)
            && self.resources.iter().any(|r| r == "*")
    }

    pub fn to_json(&self) -> Value {
        let mut principal = Map::new();
        for p in &self.principals {
            let values = principal
                .entry(p.key())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(list) = values {
                list.push(Value::String(p.value().to_string()));
            }
        }
        for value in principal.values_mut() {
            *value = collapse(std::mem::take(value));
        }

        let mut statement = json!({
            "Effect": self.effect.as_str(),
            "Action": collapse(json!(self.actions)),
            "Resource": collapse(json!(self.resources)),
        });
        if !principal.is_empty() {
            statement["Principal"] = Value::Object(principal);
        }
        statement
    }
}

/// Single-element lists are written as scalars.
fn collapse(value: Value) -> Value {
    match value {
        Value::Array(mut list) if list.len() == 1 => list.remove(0),
        other => other,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyDocument {
    pub statements: Vec<PolicyStatement>,
}

impl PolicyDocument {
    pub fn new(statements: Vec<PolicyStatement>) -> Self {
        Self { statements }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "Version": POLICY_VERSION,
            "Statement": self
                .statements
                .iter()
                .map(PolicyStatement::to_json)
                .collect::<Vec<_>>(),
        })
    }
}
