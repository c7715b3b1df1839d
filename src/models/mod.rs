//! Domain models for the subnet planner.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Network`] - IPv4 network in CIDR notation, plus address arithmetic
//! - [`Subnet`], [`HostSubnet`], [`SerialLink`] - allocated blocks
//! - [`PlanRequest`] - the user's input record

mod ipv4;
mod request;
mod subnet;

// Re-export public types
pub use ipv4::{
    address_to_integer, block_size, cut_addr, get_cidr_mask, integer_to_address, lo_mask,
    prefix_to_mask, step_octet, Network, MAX_LENGTH,
};
pub use request::{parse_host_list, PlanRequest, RoutingMode};
pub use subnet::{HostSubnet, SerialLink, Step, Subnet};
