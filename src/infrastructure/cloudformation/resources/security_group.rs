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

use super::traits::{ResourceBuilder, TaggedResourceBuilder};
use crate::infrastructure::cloudformation::cidr::Ipv4Cidr;
use crate::infrastructure::cloudformation::intrinsics::get_att;
use crate::infrastructure::cloudformation::tags::StackTags;
use crate::infrastructure::cloudformation::template::{Resource, Template};
use crate::infrastructure::constants::{ANY_IPV4, LOGICAL_ID_SECURITY_GROUP};
use crate::shared::error::Result;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    All,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::All => "-1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port {
    pub protocol: Protocol,
    pub from_port: u16,
    pub to_port: u16,
}

impl Port {
    pub fn all_tcp() -> Self {
        Self {
            protocol: Protocol::Tcp,
            from_port: 0,
            to_port: u16::MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngressRule {
    pub peer: Ipv4Cidr,
    pub port: Port,
    pub description: String,
}

impl IngressRule {
    fn to_cfn(&self) -> Value {
        json!({
            "CidrIp": self.peer.to_string(),
            "IpProtocol": self.port.protocol.as_str(),
            "FromPort": self.port.from_port,
            "ToPort": self.port.to_port,
            "Description": self.description,
        })
    }
}

pub struct SecurityGroupBuilder {
    logical_id: String,
    group_name: String,
    description: String,
    vpc_ref: Value,
    ingress_rules: Vec<IngressRule>,
    tags: StackTags,
}

impl SecurityGroupBuilder {
    pub fn new(group_name: String, description: String, vpc_ref: Value, tags: StackTags) -> Self {
        Self {
            logical_id: LOGICAL_ID_SECURITY_GROUP.to_string(),
            group_name,
            description,
            vpc_ref,
            ingress_rules: Vec::new(),
            tags,
        }
    }

    pub fn add_ingress_rule(mut self, peer: Ipv4Cidr, port: Port, description: &str) -> Self {
        self.ingress_rules.push(IngressRule {
            peer,
            port,
            description: description.to_string(),
        });
        self
    }
}

impl TaggedResourceBuilder for SecurityGroupBuilder {
    fn stack_tags(&self) -> &StackTags {
        &self.tags
    }

    fn name_tag(&self) -> Option<&str> {
        Some(&self.group_name)
    }
}

impl ResourceBuilder for SecurityGroupBuilder {
    /// Logical id of the security group
    type Output = String;

    fn declare(&self, template: &mut Template) -> Result<String> {
        let properties = json!({
            "GroupName": self.group_name,
            "GroupDescription": self.description,
            "VpcId": self.vpc_ref,
            "SecurityGroupIngress": self
                .ingress_rules
                .iter()
                .map(IngressRule::to_cfn)
                .collect::<Vec<_>>(),
            "SecurityGroupEgress": [{
                "CidrIp": ANY_IPV4,
                "IpProtocol": Protocol::All.as_str(),
                "Description": "Allow all outbound traffic by default",
            }],
            "Tags": self.cfn_tags(),
        });

        template.add_resource(
            self.logical_id.clone(),
            Resource::new("AWS::EC2::SecurityGroup", properties),
        )?;
        Ok(self.logical_id.clone())
    }
}

/// `GroupId` of a declared security group.
pub fn group_id(logical_id: &str) -> Value {
    get_att(logical_id, "GroupId")
}
