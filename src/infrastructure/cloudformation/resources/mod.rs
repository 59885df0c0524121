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

pub mod access_policy;
pub mod log_groups;
pub mod network;
pub mod search_domain;
pub mod security_group;
pub mod traits;

pub use access_policy::{Effect, PolicyDocument, PolicyStatement, Principal};
pub use log_groups::{DomainLogs, LogGroupsBuilder, LogType, LoggingOptions};
pub use network::{DeclaredSubnet, Network, SubnetType, VpcBuilder};
pub use search_domain::{EbsOptions, SearchDomainBuilder, SearchDomainConfig};
pub use security_group::{IngressRule, Port, Protocol, SecurityGroupBuilder};
pub use traits::{ResourceBuilder, TaggedResourceBuilder};
