//! VLSM host subnet allocation.
//!
//! Subnets are carved in the order the host counts are given, not sorted by
//! size, so a small subnet listed first can leave a larger one unaligned.

use super::divider::bits_for;
use crate::error::PlanError;
use crate::models::{lo_mask, HostSubnet, Subnet, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Carve one subnet per host count, contiguously from `start`.
///
/// Each block is the smallest power of two holding `hosts + 2` addresses
/// (network and broadcast).
///
/// # Returns
/// * `Ok(Vec<HostSubnet>)` - one entry per host count, in input order
/// * `Err(PlanError::HostAllocationFailure)` - a host count of 0, or the
///   blocks would run past `255.255.255.255`
pub fn divide_hosts(start: u32, hosts: &[u32]) -> Result<Vec<HostSubnet>, PlanError> {
    log::info!(
        "carving {} host subnets from {}",
        hosts.len(),
        Ipv4Addr::from(start)
    );
    let mut subnets = Vec::with_capacity(hosts.len());
    let mut current = Some(start);

    for (i, &required_hosts) in hosts.iter().enumerate() {
        if required_hosts == 0 {
            return Err(PlanError::HostAllocationFailure(format!(
                "LAN {} asks for 0 hosts",
                i + 1
            )));
        }
        let network = current.ok_or_else(|| {
            PlanError::HostAllocationFailure(format!(
                "address space exhausted before LAN {}",
                i + 1
            ))
        })?;

        let bits = bits_for(u64::from(required_hosts) + 2);
        if bits > u32::from(MAX_LENGTH) {
            return Err(PlanError::HostAllocationFailure(format!(
                "LAN {} needs {} hosts, more than an IPv4 network holds",
                i + 1,
                required_hosts
            )));
        }
        let prefix = MAX_LENGTH - bits as u8;
        let subnet = Subnet::new(network, prefix)?;

        if lo_mask(subnet.network) > prefix {
            log::warn!(
                "LAN {} {}/{} is not aligned to its prefix",
                i + 1,
                subnet.network,
                prefix
            );
        }
        log::debug!(
            "LAN {} hosts={} block={} -> {}/{} broadcast {}",
            i + 1,
            required_hosts,
            subnet.block_size(),
            subnet.network,
            prefix,
            subnet.broadcast
        );

        subnets.push(HostSubnet {
            subnet,
            gateway: subnet.nth(1),
            first_host: subnet.nth(2),
            required_hosts,
            block_size: subnet.block_size(),
        });
        current = subnet.next_address();
    }

    Ok(subnets)
}
