//! Serial links of the linear router chain.
//!
//! Router `i` owns LAN `i` and sits between links `i - 1` and `i`; with `n`
//! LANs there are `n + 1` routers and `n` links.

use crate::config::SERIAL_LINK_PREFIX;
use crate::error::PlanError;
use crate::models::{block_size, SerialLink, Subnet};
use std::net::Ipv4Addr;

/// Number of routers needed for `lan_count` LANs.
pub fn router_count(lan_count: usize) -> usize {
    lan_count + 1
}

/// Allocate `count` sequential /30 links starting at `pool`.
///
/// Link `k` joins router `k` (DCE side) to router `k + 1` (DTE side).
pub fn build_links(count: usize, pool: Ipv4Addr) -> Result<Vec<SerialLink>, PlanError> {
    let step = block_size(SERIAL_LINK_PREFIX);
    let start = u64::from(u32::from(pool));

    (0..count as u64)
        .map(|k| {
            let addr = u32::try_from(start + k * step).map_err(|_| {
                PlanError::HostAllocationFailure(format!(
                    "serial link pool {pool} cannot hold {count} links"
                ))
            })?;
            let subnet = Subnet::new(addr, SERIAL_LINK_PREFIX)?;
            log::debug!("serial link {k}: {}", subnet.cidr());
            Ok(SerialLink {
                subnet,
                dce: subnet.nth(1),
                dte: subnet.nth(2),
            })
        })
        .collect()
}
