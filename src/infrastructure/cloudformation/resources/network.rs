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
use crate::infrastructure::cloudformation::cidr::{Ipv4Cidr, SubnetAllocator};
use crate::infrastructure::cloudformation::intrinsics::{availability_zone, reference};
use crate::infrastructure::cloudformation::tags::StackTags;
use crate::infrastructure::cloudformation::template::{Resource, Template};
use crate::infrastructure::constants::{ANY_IPV4, LOGICAL_ID_VPC};
use crate::shared::error::{Result, StackError};
use serde_json::{json, Value};

const GATEWAY_SUFFIX: &str = "IGW";
const GATEWAY_ATTACHMENT_SUFFIX: &str = "VPCGW";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubnetType {
    /// No route to or from the internet.
    PrivateIsolated,
    /// Default route through the internet gateway.
    Public,
}

#[derive(Debug, Clone)]
pub struct SubnetConfiguration {
    pub name: String,
    pub subnet_type: SubnetType,
    pub cidr_mask: u8,
}

#[derive(Debug, Clone)]
pub struct DeclaredSubnet {
    pub logical_id: String,
    pub subnet_type: SubnetType,
    pub cidr: Ipv4Cidr,
}

/// Handles to a declared VPC and its subnets.
#[derive(Debug, Clone)]
pub struct Network {
    pub vpc_logical_id: String,
    pub subnets: Vec<DeclaredSubnet>,
}

impl Network {
    pub fn vpc_ref(&self) -> Value {
        reference(&self.vpc_logical_id)
    }

    pub fn select_subnets(&self, subnet_type: SubnetType) -> Vec<&DeclaredSubnet> {
        self.subnets
            .iter()
            .filter(|s| s.subnet_type == subnet_type)
            .collect()
    }

    pub fn subnet_refs(&self, subnet_type: SubnetType) -> Vec<Value> {
        self.select_subnets(subnet_type)
            .iter()
            .map(|s| reference(&s.logical_id))
            .collect()
    }
}

pub struct VpcBuilder {
    logical_id: String,
    vpc_name: String,
    cidr: Ipv4Cidr,
    max_azs: u8,
    subnet_configuration: Vec<SubnetConfiguration>,
    tags: StackTags,
}

impl VpcBuilder {
    pub fn new(vpc_name: String, cidr: Ipv4Cidr, max_azs: u8, tags: StackTags) -> Self {
        Self {
            logical_id: LOGICAL_ID_VPC.to_string(),
            vpc_name,
            cidr,
            max_azs,
            subnet_configuration: Vec::new(),
            tags,
        }
    }

    pub fn with_subnet(mut self, name: &str, subnet_type: SubnetType, cidr_mask: u8) -> Self {
        self.subnet_configuration.push(SubnetConfiguration {
            name: name.to_string(),
            subnet_type,
            cidr_mask,
        });
        self
    }

    fn has_public_subnets(&self) -> bool {
        self.subnet_configuration
            .iter()
            .any(|c| c.subnet_type == SubnetType::Public)
    }

    fn gateway_id(&self) -> String {
        format!("{}{}", self.logical_id, GATEWAY_SUFFIX)
    }

    fn gateway_attachment_id(&self) -> String {
        format!("{}{}", self.logical_id, GATEWAY_ATTACHMENT_SUFFIX)
    }

    fn declare_vpc(&self, template: &mut Template) -> Result<()> {
        template.add_resource(
            self.logical_id.clone(),
            Resource::new(
                "AWS::EC2::VPC",
                json!({
                    "CidrBlock": self.cidr.to_string(),
                    "EnableDnsHostnames": true,
                    "EnableDnsSupport": true,
                    "InstanceTenancy": "default",
                    "Tags": self.cfn_tags(),
                }),
            ),
        )
    }

    fn declare_gateway(&self, template: &mut Template) -> Result<()> {
        template.add_resource(
            self.gateway_id(),
            Resource::new(
                "AWS::EC2::InternetGateway",
                json!({ "Tags": self.cfn_tags() }),
            ),
        )?;
        template.add_resource(
            self.gateway_attachment_id(),
            Resource::new(
                "AWS::EC2::VPCGatewayAttachment",
                json!({
                    "VpcId": reference(&self.logical_id),
                    "InternetGatewayId": reference(&self.gateway_id()),
                }),
            ),
        )
    }

    fn declare_subnet(
        &self,
        template: &mut Template,
        config: &SubnetConfiguration,
        az_index: usize,
        cidr: Ipv4Cidr,
    ) -> Result<DeclaredSubnet> {
        let base_id = format!(
            "{}{}Subnet{}",
            self.logical_id,
            pascal_case(&config.name),
            az_index + 1
        );
        let subnet_id = format!("{}Subnet", base_id);
        let route_table_id = format!("{}RouteTable", base_id);
        let subnet_name = format!("{}-{}-{}", self.vpc_name, config.name, az_index + 1);
        let tags = self.tags.to_cfn(Some(&subnet_name));

        template.add_resource(
            subnet_id.clone(),
            Resource::new(
                "AWS::EC2::Subnet",
                json!({
                    "VpcId": reference(&self.logical_id),
                    "AvailabilityZone": availability_zone(az_index),
                    "CidrBlock": cidr.to_string(),
                    "MapPublicIpOnLaunch": config.subnet_type == SubnetType::Public,
                    "Tags": tags,
                }),
            ),
        )?;

        template.add_resource(
            route_table_id.clone(),
            Resource::new(
                "AWS::EC2::RouteTable",
                json!({
                    "VpcId": reference(&self.logical_id),
                    "Tags": tags,
                }),
            ),
        )?;

        template.add_resource(
            format!("{}RouteTableAssociation", base_id),
            Resource::new(
                "AWS::EC2::SubnetRouteTableAssociation",
                json!({
                    "RouteTableId": reference(&route_table_id),
                    "SubnetId": reference(&subnet_id),
                }),
            ),
        )?;

        if config.subnet_type == SubnetType::Public {
            template.add_resource(
                format!("{}DefaultRoute", base_id),
                Resource::new(
                    "AWS::EC2::Route",
                    json!({
                        "RouteTableId": reference(&route_table_id),
                        "DestinationCidrBlock": ANY_IPV4,
                        "GatewayId": reference(&self.gateway_id()),
                    }),
                )
                .depends_on(self.gateway_attachment_id()),
            )?;
        }

        Ok(DeclaredSubnet {
            logical_id: subnet_id,
            subnet_type: config.subnet_type,
            cidr,
        })
    }
}

impl TaggedResourceBuilder for VpcBuilder {
    fn stack_tags(&self) -> &StackTags {
        &self.tags
    }

    fn name_tag(&self) -> Option<&str> {
        Some(&self.vpc_name)
    }
}

impl ResourceBuilder for VpcBuilder {
    type Output = Network;

    fn declare(&self, template: &mut Template) -> Result<Network> {
        if self.max_azs == 0 {
            return Err(StackError::validation("VPC needs at least one availability zone"));
        }

        self.declare_vpc(template)?;
        if self.has_public_subnets() {
            self.declare_gateway(template)?;
        }

        let mut allocator = SubnetAllocator::new(self.cidr);
        let mut subnets = Vec::new();
        for config in &self.subnet_configuration {
            for az_index in 0..self.max_azs as usize {
                let cidr = allocator.allocate(config.cidr_mask)?;
                subnets.push(self.declare_subnet(template, config, az_index, cidr)?);
            }
        }

        Ok(Network {
            vpc_logical_id: self.logical_id.clone(),
            subnets,
        })
    }
}

/// `private-isolated` -> `PrivateIsolated`
fn pascal_case(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(template: &mut Template, max_azs: u8) -> Network {
        VpcBuilder::new(
            "search-vpc".to_string(),
            "10.1.0.0/24".parse().unwrap(),
            max_azs,
            StackTags::for_environment("dev"),
        )
        .with_subnet("private-isolated", SubnetType::PrivateIsolated, 28)
        .with_subnet("public", SubnetType::Public, 28)
        .declare(template)
        .unwrap()
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("private-isolated"), "PrivateIsolated");
        assert_eq!(pascal_case("public"), "Public");
    }

    #[test]
    fn test_vpc_properties() {
        let mut template = Template::new("test");
        network(&mut template, 3);

        let vpc = template.resource("Vpc").unwrap();
        assert_eq!(vpc.resource_type, "AWS::EC2::VPC");
        assert_eq!(vpc.properties["CidrBlock"], "10.1.0.0/24");
        assert_eq!(vpc.properties["EnableDnsSupport"], true);
        let name_tag = vpc.properties["Tags"]
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["Key"] == "Name")
            .unwrap();
        assert_eq!(name_tag["Value"], "search-vpc");
    }

    #[test]
    fn test_subnets_per_group_and_az() {
        let mut template = Template::new("test");
        let network = network(&mut template, 3);

        assert_eq!(network.subnets.len(), 6);
        assert_eq!(network.select_subnets(SubnetType::PrivateIsolated).len(), 3);
        assert_eq!(network.select_subnets(SubnetType::Public).len(), 3);
        assert_eq!(template.resources_of_type("AWS::EC2::Subnet").count(), 6);

        let isolated: Vec<String> = network
            .select_subnets(SubnetType::PrivateIsolated)
            .iter()
            .map(|s| s.cidr.to_string())
            .collect();
        assert_eq!(isolated, vec!["10.1.0.0/28", "10.1.0.16/28", "10.1.0.32/28"]);

        let subnet = template
            .resource("VpcPrivateIsolatedSubnet2Subnet")
            .unwrap();
        assert_eq!(subnet.properties["MapPublicIpOnLaunch"], false);
        assert_eq!(subnet.properties["AvailabilityZone"], availability_zone(1));
    }

    #[test]
    fn test_only_public_subnets_route_to_gateway() {
        let mut template = Template::new("test");
        network(&mut template, 2);

        let routes: Vec<&String> = template
            .resources_of_type("AWS::EC2::Route")
            .map(|(id, _)| id)
            .collect();
        assert_eq!(
            routes,
            vec!["VpcPublicSubnet1DefaultRoute", "VpcPublicSubnet2DefaultRoute"]
        );
        let route = template.resource("VpcPublicSubnet1DefaultRoute").unwrap();
        assert_eq!(route.properties["GatewayId"], reference("VpcIGW"));
        assert_eq!(route.depends_on, vec!["VpcVPCGW".to_string()]);
    }

    #[test]
    fn test_isolated_only_has_no_gateway() {
        let mut template = Template::new("test");
        VpcBuilder::new(
            "search-vpc".to_string(),
            "10.1.0.0/24".parse().unwrap(),
            1,
            StackTags::for_environment("dev"),
        )
        .with_subnet("private-isolated", SubnetType::PrivateIsolated, 28)
        .declare(&mut template)
        .unwrap();

        assert!(template.resource("VpcIGW").is_none());
        assert_eq!(template.resources_of_type("AWS::EC2::Route").count(), 0);
    }

    #[test]
    fn test_cidr_too_small() {
        let mut template = Template::new("test");
        let result = VpcBuilder::new(
            "search-vpc".to_string(),
            "10.1.0.0/27".parse().unwrap(),
            3,
            StackTags::for_environment("dev"),
        )
        .with_subnet("private-isolated", SubnetType::PrivateIsolated, 28)
        .declare(&mut template);
        assert!(result.is_err());
    }
}
