//! Errors raised while building a subnet plan.

use thiserror::Error;

/// Everything that can stop a plan from being produced.
///
/// All variants are detected before any output is rendered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Malformed dotted-quad address or CIDR text.
    #[error("invalid address format: {0}")]
    Format(String),

    /// A required input field is missing or cannot be parsed.
    #[error("input incomplete: {0}")]
    InputIncomplete(String),

    /// Splitting the base network would need a prefix longer than the maximum.
    #[error("invalid base network {network}: {count} subnets need /{prefix}, longest allowed is /{max}")]
    InvalidBaseNetwork {
        network: String,
        count: u32,
        prefix: u32,
        max: u8,
    },

    /// Host subnets cannot be carved from the remaining address space.
    #[error("host allocation failed: {0}")]
    HostAllocationFailure(String),

    /// Two allocated blocks share addresses.
    #[error("{first} overlaps {second}")]
    Overlap { first: String, second: String },
}
