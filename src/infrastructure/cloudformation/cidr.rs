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

//! IPv4 CIDR blocks and sequential subnet allocation

use crate::shared::error::{Result, StackError};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Cidr {
    network: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Cidr {
    pub fn new(network: Ipv4Addr, prefix: u8) -> Result<Self> {
        if prefix > 32 {
            return Err(StackError::validation(format!(
                "Invalid CIDR prefix length: /{}",
                prefix
            )));
        }
        let cidr = Self { network, prefix };
        if u32::from(network) & !cidr.mask() != 0 {
            return Err(StackError::validation(format!(
                "CIDR {}/{} has host bits set (network address is {})",
                network,
                prefix,
                Ipv4Addr::from(u32::from(network) & cidr.mask())
            )));
        }
        Ok(cidr)
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    fn mask(&self) -> u32 {
        if self.prefix == 0 {
            0
        } else {
            u32::MAX << (32 - self.prefix)
        }
    }

    /// Number of addresses in the block.
    pub fn size(&self) -> u64 {
        1u64 << (32 - self.prefix)
    }

    /// Number of `/new_prefix` blocks that fit into this block.
    pub fn capacity(&self, new_prefix: u8) -> u64 {
        if new_prefix < self.prefix || new_prefix > 32 {
            0
        } else {
            1u64 << (new_prefix - self.prefix)
        }
    }

    pub fn contains(&self, other: &Ipv4Cidr) -> bool {
        other.prefix >= self.prefix
            && u32::from(other.network) & self.mask() == u32::from(self.network)
    }
}

/// Hands out consecutive, aligned blocks from a parent block.
#[derive(Debug, Clone)]
pub struct SubnetAllocator {
    block: Ipv4Cidr,
    next: u64,
}

impl SubnetAllocator {
    pub fn new(block: Ipv4Cidr) -> Self {
        Self { block, next: 0 }
    }

    pub fn allocate(&mut self, new_prefix: u8) -> Result<Ipv4Cidr> {
        if new_prefix < self.block.prefix || new_prefix > 32 {
            return Err(StackError::validation(format!(
                "Cannot carve a /{} subnet from {}",
                new_prefix, self.block
            )));
        }

        let step = 1u64 << (32 - new_prefix);
        let offset = self.next.div_ceil(step) * step;
        if offset + step > self.block.size() {
            return Err(StackError::validation(format!(
                "CIDR {} has no room left for another /{} subnet",
                self.block, new_prefix
            )));
        }
        self.next = offset + step;

        let addr = u64::from(u32::from(self.block.network)) + offset;
        Ipv4Cidr::new(Ipv4Addr::from(addr as u32), new_prefix)
    }
}

impl std::fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl std::str::FromStr for Ipv4Cidr {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self> {
        let (addr, prefix) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| StackError::validation(format!("Invalid CIDR block: '{}'", s)))?;
        let network = addr
            .parse::<Ipv4Addr>()
            .map_err(|e| StackError::validation(format!("Invalid CIDR block '{}': {}", s, e)))?;
        let prefix = prefix
            .parse::<u8>()
            .map_err(|e| StackError::validation(format!("Invalid CIDR block '{}': {}", s, e)))?;
        Ipv4Cidr::new(network, prefix)
    }
}
