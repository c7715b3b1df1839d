//! Subnet planning logic.
//!
//! This module contains the planning pipeline, leaf-first:
//! - [`divider`] - Equal-size division of the base network
//! - [`vlsm`] - Host-count driven subnet allocation
//! - [`topology`] - Serial links of the router chain
//! - [`commands`] - Router configs and command text
//! - [`overlap`] - Sanity check across every allocated block

pub mod commands;
pub mod divider;
pub mod overlap;
pub mod topology;
pub mod vlsm;

// Re-export public functions
pub use commands::{build_routers, render_commands, RouterConfig, Routing, StaticRoute};
pub use divider::{divide_equal, EqualSplit};
pub use overlap::{find_overlaps, log_overlaps, LabeledBlock, OverlapConflict};
pub use topology::{build_links, router_count};
pub use vlsm::divide_hosts;
