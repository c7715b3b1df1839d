//! Equal-size division of a base network.

use crate::config::MAX_SUBNET_PREFIX;
use crate::error::PlanError;
use crate::models::{block_size, cut_addr, prefix_to_mask, step_octet, Network, Subnet};
use serde::Serialize;
use std::net::Ipv4Addr;

/// Result of cutting a base network into equal blocks.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EqualSplit {
    pub subnets: Vec<Subnet>,
    pub prefix: u8,
    pub mask: Ipv4Addr,
    /// Addresses per subnet.
    pub block_size: u64,
    /// Octet the block increment falls in.
    pub octet: u8,
}

impl EqualSplit {
    /// First address after the last subnet.
    pub fn next_address(&self) -> Option<u32> {
        self.subnets.last().and_then(Subnet::next_address)
    }
}

/// Smallest number of bits `b` with `2^b >= count`.
pub fn bits_for(count: u64) -> u32 {
    let mut bits = 0;
    while (1u64 << bits) < count {
        bits += 1;
    }
    bits
}

/// Split `base` into `count` contiguous subnets of equal size.
///
/// # Arguments
/// * `base` - The base network; host bits are cleared first
/// * `count` - Number of subnets wanted, at least 1
///
/// # Returns
/// * `Ok(EqualSplit)` - `count` subnets in address order
/// * `Err(PlanError::InvalidBaseNetwork)` - the new prefix would exceed /30
pub fn divide_equal(base: Network, count: u32) -> Result<EqualSplit, PlanError> {
    if count == 0 {
        return Err(PlanError::InputIncomplete(
            "subnet count must be at least 1".to_string(),
        ));
    }

    let network = cut_addr(base.addr, base.prefix)?;
    if network != base.addr {
        log::warn!(
            "base network {base} has host bits set, using {network}/{}",
            base.prefix
        );
    }

    let bits = bits_for(u64::from(count));
    let new_prefix = u32::from(base.prefix) + bits;
    if new_prefix > u32::from(MAX_SUBNET_PREFIX) {
        return Err(PlanError::InvalidBaseNetwork {
            network: base.to_string(),
            count,
            prefix: new_prefix,
            max: MAX_SUBNET_PREFIX,
        });
    }
    let new_prefix = new_prefix as u8;
    let step = block_size(new_prefix);
    log::info!(
        "dividing {network}/{} into {count} subnets of /{new_prefix} ({step} addresses)",
        base.prefix
    );

    let start = u64::from(u32::from(network));
    let subnets = (0..u64::from(count))
        .map(|i| {
            let addr = u32::try_from(start + i * step).map_err(|_| {
                PlanError::InvalidBaseNetwork {
                    network: base.to_string(),
                    count,
                    prefix: u32::from(new_prefix),
                    max: MAX_SUBNET_PREFIX,
                }
            })?;
            Subnet::new(addr, new_prefix)
        })
        .collect::<Result<Vec<Subnet>, PlanError>>()?;

    Ok(EqualSplit {
        subnets,
        prefix: new_prefix,
        mask: prefix_to_mask(new_prefix)?,
        block_size: step,
        octet: step_octet(new_prefix),
    })
}
