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

use crate::domain::config::{DeploymentProfile, DeploymentSettings};
use crate::infrastructure::cloudformation::cidr::Ipv4Cidr;
use crate::infrastructure::constants::{
    INTERNAL_PEER_CIDR, MAX_VPC_PREFIX, MIN_VPC_PREFIX, SUBNET_CIDR_MASK,
};
use crate::shared::error::{Result, StackError};
use regex::Regex;
use tracing::warn;

/// Subnet groups declared per availability zone.
const SUBNET_GROUPS: u64 = 2;

pub struct StackValidator;

impl StackValidator {
    pub fn validate(settings: &DeploymentSettings, profile: &DeploymentProfile) -> Result<()> {
        Self::validate_domain_name(&settings.es_domain_name)?;
        Self::validate_vpc_cidr(&settings.vpc_cidr, profile)?;
        Self::validate_zone_awareness(profile)?;
        Self::check_notifications(settings);
        Ok(())
    }

    fn validate_domain_name(name: &str) -> Result<()> {
        let re = Regex::new(r"^[a-z][a-z0-9\-]{2,27}$")
            .map_err(|e| StackError::config_error(e.to_string()))?;
        if !re.is_match(name) {
            return Err(StackError::validation(format!(
                "Invalid search domain name '{}'. \
                It must be 3-28 characters long, start with a lowercase letter \
                and contain only lowercase letters, digits and hyphens",
                name
            )));
        }
        Ok(())
    }

    fn validate_vpc_cidr(vpc_cidr: &str, profile: &DeploymentProfile) -> Result<()> {
        let cidr: Ipv4Cidr = vpc_cidr.parse()?;

        if cidr.prefix() < MIN_VPC_PREFIX || cidr.prefix() > MAX_VPC_PREFIX {
            return Err(StackError::validation(format!(
                "VPC CIDR {} must have a prefix length between /{} and /{}",
                cidr, MIN_VPC_PREFIX, MAX_VPC_PREFIX
            )));
        }

        let required = SUBNET_GROUPS * u64::from(profile.num_azs);
        let available = cidr.capacity(SUBNET_CIDR_MASK);
        if available < required {
            return Err(StackError::validation(format!(
                "VPC CIDR {} is too small: {} /{} subnets are needed for {} availability zones, \
                only {} fit",
                cidr, required, SUBNET_CIDR_MASK, profile.num_azs, available
            )));
        }

        let internal: Ipv4Cidr = INTERNAL_PEER_CIDR.parse()?;
        if !internal.contains(&cidr) {
            warn!(
                vpc_cidr = %cidr,
                "VPC CIDR is outside {}, the security group will not admit traffic from inside the VPC",
                INTERNAL_PEER_CIDR
            );
        }

        Ok(())
    }

    fn validate_zone_awareness(profile: &DeploymentProfile) -> Result<()> {
        match profile.num_azs {
            1..=3 => Ok(()),
            n => Err(StackError::validation(format!(
                "Availability zone count must be 1, 2 or 3, got {}",
                n
            ))),
        }
    }

    /// Notification targets are carried but not wired to any resource.
    fn check_notifications(settings: &DeploymentSettings) {
        if let Some(email) = &settings.notification_email {
            if !email.contains('@') {
                warn!(email = %email, "Notification email does not look like an address");
            }
        }
        if let Some(url) = &settings.notification_slack_url {
            if !url.starts_with("https://") {
                warn!(url = %url, "Notification webhook URL is not an https URL");
            }
        }
    }
}
