//! IPv4 address and CIDR notation utilities.
//!
//! Provides the [`Network`] struct for `a.b.c.d/prefix` values, the strict
//! dotted-quad conversions and the mask helpers the dividers are built on.

use crate::error::PlanError;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

static DOTTED_REGEX: OnceLock<Regex> = OnceLock::new();
static CIDR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_dotted_regex() -> &'static Regex {
    DOTTED_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$").expect("Invalid Regex")
    })
}

fn get_cidr_regex() -> &'static Regex {
    CIDR_REGEX.get_or_init(|| Regex::new(r"^([^/\s]+)\s*/\s*([0-9]{1,2})$").expect("Invalid Regex"))
}

/// Parse four dot-separated decimal octets into a big-endian `u32`.
///
/// Wrong octet count, non-numeric text and octets above 255 are all rejected.
///
/// # Examples
/// ```
/// use subnet_router_planner::models::address_to_integer;
/// assert_eq!(address_to_integer("10.0.1.0").unwrap(), 0x0A000100);
/// ```
pub fn address_to_integer(dotted: &str) -> Result<u32, PlanError> {
    let dotted = dotted.trim();
    let caps = get_dotted_regex()
        .captures(dotted)
        .ok_or_else(|| PlanError::Format(format!("'{dotted}' is not a dotted-quad address")))?;

    let mut value: u32 = 0;
    for i in 1..=4 {
        let octet: u8 = caps[i]
            .parse()
            .map_err(|_| PlanError::Format(format!("octet '{}' of '{dotted}' is above 255", &caps[i])))?;
        value = (value << 8) | u32::from(octet);
    }
    Ok(value)
}

/// Render a `u32` as four dot-separated octets.
pub fn integer_to_address(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

/// Mask bits for a prefix, clamped to 32.
fn mask_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len.min(MAX_LENGTH);
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_router_planner::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, PlanError> {
    if len > MAX_LENGTH {
        Err(PlanError::Format(format!("prefix /{len} is longer than /32")))
    } else {
        Ok(mask_bits(len))
    }
}

/// Dotted netmask with exactly `prefix` leading one-bits.
pub fn prefix_to_mask(prefix: u8) -> Result<Ipv4Addr, PlanError> {
    get_cidr_mask(prefix).map(Ipv4Addr::from)
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, PlanError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Number of addresses in a block of the given prefix.
pub fn block_size(prefix: u8) -> u64 {
    1u64 << (MAX_LENGTH - prefix.min(MAX_LENGTH))
}

/// Longest prefix the address is aligned to, based on trailing zeros.
pub fn lo_mask(ip: Ipv4Addr) -> u8 {
    let trailing_zeros = u32::from(ip).trailing_zeros().min(32) as u8;
    MAX_LENGTH - trailing_zeros
}

/// Octet (1-4) in which a prefix's block increment is counted.
pub fn step_octet(prefix: u8) -> u8 {
    match prefix {
        0..=8 => 1,
        9..=16 => 2,
        17..=24 => 3,
        _ => 4,
    }
}

/// IPv4 network in CIDR notation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Network {
    /// The network (or host) address as written.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub prefix: u8,
}

impl Network {
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Network, PlanError> {
        if prefix > MAX_LENGTH {
            return Err(PlanError::Format(format!("prefix /{prefix} is longer than /32")));
        }
        Ok(Network { addr, prefix })
    }

    /// Lowest (network) address of the block.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & mask_bits(self.prefix))
    }

    /// Highest (broadcast) address of the block.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !mask_bits(self.prefix))
    }

    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(mask_bits(self.prefix))
    }

    pub fn size(&self) -> u64 {
        block_size(self.prefix)
    }

    /// True when no host bits are set.
    pub fn is_aligned(&self) -> bool {
        self.lo() == self.addr
    }
}

impl FromStr for Network {
    type Err = PlanError;

    /// Parse `a.b.c.d/prefix`, whitespace around the slash allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let caps = get_cidr_regex()
            .captures(s)
            .ok_or_else(|| PlanError::Format(format!("'{s}' is not in a.b.c.d/prefix form")))?;
        let addr = Ipv4Addr::from(address_to_integer(&caps[1])?);
        let prefix: u8 = caps[2]
            .parse()
            .map_err(|_| PlanError::Format(format!("invalid prefix '{}'", &caps[2])))?;
        Network::new(addr, prefix)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
