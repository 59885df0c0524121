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

#[cfg(test)]
mod tests {
    use oc_elasticsearch::infrastructure::cloudformation::RemovalPolicy;
    use oc_elasticsearch::*;
    use serde_json::{json, Value};

    fn stack(deployment_type: DeploymentType) -> SearchStack {
        SearchStack::new(
            EnvironmentName::new("staging").unwrap(),
            DeploymentSettings {
                es_domain_name: "oc-search".to_string(),
                notification_email: None,
                notification_slack_url: None,
                deployment_type,
                vpc_cidr: "10.20.0.0/24".to_string(),
            },
        )
    }

    fn domain(template: &Template) -> &Value {
        &template.resource("EsDomain").unwrap().properties
    }

    #[test]
    fn test_security_group_has_single_internal_ingress_rule() {
        let template = stack(DeploymentType::Dev).synthesize().unwrap();
        let groups: Vec<_> = template
            .resources_of_type("AWS::EC2::SecurityGroup")
            .collect();
        assert_eq!(groups.len(), 1);

        let (_, group) = groups[0];
        assert_eq!(group.properties["GroupName"], "oc-search-sg");
        assert_eq!(group.properties["GroupDescription"], "oc-search security group");

        let ingress = group.properties["SecurityGroupIngress"].as_array().unwrap();
        assert_eq!(ingress.len(), 1);
        assert_eq!(ingress[0]["IpProtocol"], "tcp");
        assert_eq!(ingress[0]["FromPort"], 0);
        assert_eq!(ingress[0]["ToPort"], 65535);
        assert_eq!(ingress[0]["CidrIp"], "10.0.0.0/8");
        assert_eq!(
            ingress[0]["Description"],
            "Allow all from internal & any other peer vpcs"
        );
    }

    #[test]
    fn test_domain_uses_only_isolated_subnets() {
        let template = stack(DeploymentType::Dev).synthesize().unwrap();
        let subnet_ids = domain(&template)["VPCOptions"]["SubnetIds"]
            .as_array()
            .unwrap()
            .clone();

        assert_eq!(
            subnet_ids,
            vec![
                json!({"Ref": "VpcPrivateIsolatedSubnet1Subnet"}),
                json!({"Ref": "VpcPrivateIsolatedSubnet2Subnet"}),
                json!({"Ref": "VpcPrivateIsolatedSubnet3Subnet"}),
            ]
        );
        assert_eq!(
            domain(&template)["VPCOptions"]["SecurityGroupIds"],
            json!([{"Fn::GetAtt": ["DomainSecurityGroup", "GroupId"]}])
        );
        for id in subnet_ids {
            let logical_id = id["Ref"].as_str().unwrap();
            let subnet = template.resource(logical_id).unwrap();
            assert_eq!(subnet.properties["MapPublicIpOnLaunch"], false);
        }
    }

    #[test]
    fn test_capacity_follows_deployment_type() {
        let dev = stack(DeploymentType::Dev).synthesize().unwrap();
        let cluster = &domain(&dev)["ClusterConfig"];
        assert_eq!(cluster["InstanceType"], "t3.medium.search");
        assert_eq!(cluster["InstanceCount"], 3);
        assert_eq!(cluster["DedicatedMasterType"], "t3.medium.search");
        assert_eq!(cluster["DedicatedMasterCount"], 3);
        assert_eq!(cluster["ZoneAwarenessEnabled"], true);
        assert_eq!(cluster["ZoneAwarenessConfig"]["AvailabilityZoneCount"], 3);

        let prod = stack(DeploymentType::Prod).synthesize().unwrap();
        let cluster = &domain(&prod)["ClusterConfig"];
        assert_eq!(cluster["InstanceType"], "r6g.large.search");
        assert_eq!(cluster["DedicatedMasterType"], "c6g.large.search");
        assert_eq!(cluster["DedicatedMasterCount"], 3);
    }

    #[test]
    fn test_domain_settings() {
        let template = stack(DeploymentType::Dev).synthesize().unwrap();
        let resource = template.resource("EsDomain").unwrap();
        let properties = &resource.properties;

        assert_eq!(resource.resource_type, "AWS::OpenSearchService::Domain");
        assert_eq!(properties["DomainName"], "oc-search");
        assert_eq!(properties["EngineVersion"], "Elasticsearch_7.10");
        assert_eq!(properties["EBSOptions"]["VolumeSize"], 100);
        assert_eq!(properties["EBSOptions"]["VolumeType"], "gp3");
        assert_eq!(properties["SnapshotOptions"]["AutomatedSnapshotStartHour"], 6);
        assert_eq!(
            properties["AdvancedOptions"],
            json!({
                "indices.fielddata.cache.size": "40",
                "rest.action.multi.allow_explicit_index": "true",
            })
        );
        assert_eq!(
            properties["AccessPolicies"]["Statement"],
            json!([{
                "Effect": "Allow",
                "Principal": {"AWS": "*"},
                "Action": "es:*",
                "Resource": "*",
            }])
        );
        assert_eq!(resource.deletion_policy, Some(RemovalPolicy::Retain));
    }

    #[test]
    fn test_every_taggable_resource_carries_stack_tags() {
        const TAGGABLE: [&str; 7] = [
            "AWS::EC2::VPC",
            "AWS::EC2::Subnet",
            "AWS::EC2::RouteTable",
            "AWS::EC2::InternetGateway",
            "AWS::EC2::SecurityGroup",
            "AWS::Logs::LogGroup",
            "AWS::OpenSearchService::Domain",
        ];

        let template = stack(DeploymentType::Dev).synthesize().unwrap();
        let mut checked = 0;
        for resource_type in TAGGABLE {
            for (logical_id, resource) in template.resources_of_type(resource_type) {
                let tags = resource.properties["Tags"]
                    .as_array()
                    .unwrap_or_else(|| panic!("{} has no Tags", logical_id));
                let has = |key: &str, value: &str| {
                    tags.iter().any(|t| t["Key"] == key && t["Value"] == value)
                };
                for (key, value) in [
                    ("project", "MH"),
                    ("department", "DE"),
                    ("product", "opencast-elasticsearch"),
                    ("deploy_environment", "staging"),
                ] {
                    assert!(has(key, value), "{} is missing tag {}={}", logical_id, key, value);
                }
                checked += 1;
            }
        }
        // VPC, IGW, 6 subnets, 6 route tables, SG, 3 log groups, domain
        assert_eq!(checked, 19);
    }

    #[test]
    fn test_invalid_vpc_cidr_fails_validation() {
        let mut settings = stack(DeploymentType::Dev).settings().clone();
        settings.vpc_cidr = "10.20.0.0/27".to_string();
        let err = SearchStack::new(EnvironmentName::new("staging").unwrap(), settings)
            .synthesize()
            .unwrap_err();
        assert!(matches!(err, StackError::ValidationError(_)));
    }

    #[test]
    fn test_render_to_file() {
        let template = stack(DeploymentType::Prod).synthesize().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("stack.json");
        std::fs::write(&json_path, template.render(OutputFormat::Json).unwrap()).unwrap();
        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed["AWSTemplateFormatVersion"], "2010-09-09");
        assert_eq!(parsed["Resources"]["EsDomain"]["DeletionPolicy"], "Retain");
        assert!(parsed["Outputs"]["DomainEndpoint"].is_object());

        let yaml = template.render(OutputFormat::Yaml).unwrap();
        let reparsed: Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(reparsed, parsed);
    }
}
