//! Subnet records produced by the dividers.

use super::ipv4::{block_size, prefix_to_mask, step_octet, Network};
use crate::error::PlanError;
use serde::Serialize;
use std::net::Ipv4Addr;

/// Block increment expressed in the octet it falls in.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Step {
    /// `256 - mask[octet]`.
    pub size: u16,
    /// Octet position, 1-4.
    pub octet: u8,
}

impl Step {
    pub fn for_prefix(prefix: u8) -> Result<Step, PlanError> {
        let octet = step_octet(prefix);
        let mask = prefix_to_mask(prefix)?.octets();
        Ok(Step {
            size: 256 - u16::from(mask[usize::from(octet) - 1]),
            octet,
        })
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let suffix = match self.octet {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        };
        write!(f, "{} in the {}{} octet", self.size, self.octet, suffix)
    }
}

/// A block of addresses: network, prefix, mask and broadcast.
///
/// The broadcast is `network + 2^(32-prefix) - 1`, so a network that is not
/// aligned to its own prefix keeps the range it was allocated.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Subnet {
    pub network: Ipv4Addr,
    pub prefix: u8,
    pub mask: Ipv4Addr,
    pub broadcast: Ipv4Addr,
}

impl Subnet {
    /// Build a subnet starting at `network`.
    ///
    /// Fails when the block would run past `255.255.255.255`.
    pub fn new(network: u32, prefix: u8) -> Result<Subnet, PlanError> {
        let mask = prefix_to_mask(prefix)?;
        let last = u64::from(network) + block_size(prefix) - 1;
        let broadcast = u32::try_from(last).map_err(|_| {
            PlanError::HostAllocationFailure(format!(
                "block {}/{prefix} runs past 255.255.255.255",
                Ipv4Addr::from(network)
            ))
        })?;
        Ok(Subnet {
            network: Ipv4Addr::from(network),
            prefix,
            mask,
            broadcast: Ipv4Addr::from(broadcast),
        })
    }

    pub fn block_size(&self) -> u64 {
        block_size(self.prefix)
    }

    pub fn cidr(&self) -> Network {
        Network {
            addr: self.network,
            prefix: self.prefix,
        }
    }

    pub fn step(&self) -> Result<Step, PlanError> {
        Step::for_prefix(self.prefix)
    }

    /// Address `offset` positions after the network address.
    ///
    /// Callers stay inside the block, which always fits in 32 bits.
    pub fn nth(&self, offset: u32) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network).saturating_add(offset))
    }

    /// Address immediately after the broadcast, if there is one.
    pub fn next_address(&self) -> Option<u32> {
        u32::from(self.broadcast).checked_add(1)
    }

    pub fn overlaps(&self, other: &Subnet) -> bool {
        self.network <= other.broadcast && other.network <= self.broadcast
    }
}

/// A LAN subnet sized for a required number of hosts.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct HostSubnet {
    #[serde(flatten)]
    pub subnet: Subnet,
    /// Router LAN interface address, network + 1.
    pub gateway: Ipv4Addr,
    /// First end-device address, network + 2.
    pub first_host: Ipv4Addr,
    pub required_hosts: u32,
    pub block_size: u64,
}

impl HostSubnet {
    /// Usable addresses left for end devices: first host to broadcast - 1.
    pub fn valid_range(&self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        let last = u32::from(self.subnet.broadcast).checked_sub(1)?;
        if u32::from(self.first_host) <= last {
            Some((self.first_host, Ipv4Addr::from(last)))
        } else {
            None
        }
    }
}

/// A /30 point-to-point link between two neighbouring routers.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct SerialLink {
    #[serde(flatten)]
    pub subnet: Subnet,
    /// Network + 1, held by the lower-index router which supplies the clock.
    pub dce: Ipv4Addr,
    /// Network + 2, held by the higher-index router.
    pub dte: Ipv4Addr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_new() {
        let s = Subnet::new(0x0A000040, 26).unwrap();
        assert_eq!(s.network, Ipv4Addr::new(10, 0, 0, 64));
        assert_eq!(s.mask, Ipv4Addr::new(255, 255, 255, 192));
        assert_eq!(s.broadcast, Ipv4Addr::new(10, 0, 0, 127));
        assert_eq!(s.block_size(), 64);
        assert_eq!(s.next_address(), Some(0x0A000080));
        assert_eq!(s.cidr().to_string(), "10.0.0.64/26");
    }

    #[test]
    fn test_subnet_new_overflow() {
        assert!(Subnet::new(0xFFFFFFFC, 30).is_ok());
        assert!(matches!(
            Subnet::new(0xFFFFFFFC, 29),
            Err(PlanError::HostAllocationFailure(_))
        ));
        assert_eq!(Subnet::new(0xFFFFFFFC, 30).unwrap().next_address(), None);
    }

    #[test]
    fn test_subnet_overlaps() {
        let a = Subnet::new(0x0A000000, 24).unwrap();
        let b = Subnet::new(0x0A000080, 25).unwrap();
        let c = Subnet::new(0x0A000100, 24).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_step() {
        assert_eq!(Step::for_prefix(26).unwrap(), Step { size: 64, octet: 4 });
        assert_eq!(Step::for_prefix(24).unwrap(), Step { size: 1, octet: 3 });
        assert_eq!(Step::for_prefix(20).unwrap(), Step { size: 16, octet: 3 });
        assert_eq!(Step::for_prefix(0).unwrap(), Step { size: 256, octet: 1 });
        assert_eq!(Step::for_prefix(26).unwrap().to_string(), "64 in the 4th octet");
        assert_eq!(Step::for_prefix(10).unwrap().to_string(), "64 in the 2nd octet");
        assert_eq!(Step::for_prefix(3).unwrap().to_string(), "32 in the 1st octet");
        assert_eq!(Step::for_prefix(18).unwrap().to_string(), "64 in the 3rd octet");
    }

    #[test]
    fn test_valid_range() {
        let subnet = Subnet::new(0x0A000100, 26).unwrap();
        let lan = HostSubnet {
            subnet,
            gateway: subnet.nth(1),
            first_host: subnet.nth(2),
            required_hosts: 50,
            block_size: 64,
        };
        assert_eq!(
            lan.valid_range(),
            Some((Ipv4Addr::new(10, 0, 1, 2), Ipv4Addr::new(10, 0, 1, 62)))
        );

        let tiny = Subnet::new(0x0A000100, 31).unwrap();
        let lan = HostSubnet {
            subnet: tiny,
            gateway: tiny.nth(1),
            first_host: tiny.nth(2),
            required_hosts: 0,
            block_size: 2,
        };
        assert_eq!(lan.valid_range(), None);
    }
}
