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

/// Environment
pub const ENVIRONMENT_VARIABLE: &str = "OC_ELASTICSEARCH_ENVIRONMENT";

/// Parameter store
pub const CONFIG_PARAMETER_PREFIX: &str = "/oc-elasticsearch-cdk/config";

/// Stack tags
pub const TAG_PROJECT: (&str, &str) = ("project", "MH");
pub const TAG_DEPARTMENT: (&str, &str) = ("department", "DE");
pub const TAG_PRODUCT: (&str, &str) = ("product", "opencast-elasticsearch");
pub const TAG_DEPLOY_ENVIRONMENT: &str = "deploy_environment";
pub const TAG_NAME: &str = "Name";

/// Tag keys owned by the stack; overrides may not set them.
pub const RESERVED_TAG_KEYS: [&str; 5] = [
    TAG_PROJECT.0,
    TAG_DEPARTMENT.0,
    TAG_PRODUCT.0,
    TAG_DEPLOY_ENVIRONMENT,
    TAG_NAME,
];

/// Resource name suffixes
pub const STACK_SUFFIX: &str = "-stack";
pub const VPC_SUFFIX: &str = "-vpc";
pub const SECURITY_GROUP_SUFFIX: &str = "-sg";

/// Template
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";
pub const POLICY_VERSION: &str = "2012-10-17";

/// Network
pub const SUBNET_CIDR_MASK: u8 = 28;
pub const SUBNET_GROUP_ISOLATED: &str = "private-isolated";
pub const SUBNET_GROUP_PUBLIC: &str = "public";
pub const MIN_VPC_PREFIX: u8 = 16;
pub const MAX_VPC_PREFIX: u8 = 28;
pub const INTERNAL_PEER_CIDR: &str = "10.0.0.0/8";
pub const INTERNAL_INGRESS_DESCRIPTION: &str = "Allow all from internal & any other peer vpcs";
pub const ANY_IPV4: &str = "0.0.0.0/0";

/// Search domain
pub const ENGINE_VERSION: &str = "Elasticsearch_7.10";
pub const EBS_VOLUME_SIZE: u32 = 100;
pub const EBS_VOLUME_TYPE: &str = "gp3";
pub const SNAPSHOT_START_HOUR: u8 = 6;
pub const LOG_RETENTION_DAYS: u32 = 30;
pub const SEARCH_SERVICE_PRINCIPAL: &str = "es.amazonaws.com";
pub const SEARCH_ACTIONS: &str = "es:*";

/// Advanced options
pub const ADVANCED_OPTIONS: &[(&str, &str)] = &[
    ("rest.action.multi.allow_explicit_index", "true"),
    ("indices.fielddata.cache.size", "40"),
];

/// Logical ids
pub const LOGICAL_ID_VPC: &str = "Vpc";
pub const LOGICAL_ID_SECURITY_GROUP: &str = "DomainSecurityGroup";
pub const LOGICAL_ID_DOMAIN: &str = "EsDomain";
