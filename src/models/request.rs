//! Planner input record.

use crate::error::PlanError;
use serde::{Deserialize, Serialize};

/// How routers learn the networks that are not directly connected.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    #[default]
    Rip,
    Static,
}

impl std::fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RoutingMode::Rip => write!(f, "rip"),
            RoutingMode::Static => write!(f, "static"),
        }
    }
}

/// One planning request, as typed by the user.
///
/// Fields are kept as text where the user types text so that validation and
/// its error messages live in one place.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    /// Base network, `a.b.c.d/prefix`.
    pub base_network: String,
    /// Number of equal-size subnets to cut from the base network.
    pub subnet_count: u32,
    /// Comma separated host counts, one LAN per entry, in router order.
    pub hosts: String,
    #[serde(default)]
    pub routing: RoutingMode,
}

/// Parse a comma separated list of host counts.
///
/// Blank entries (such as a trailing comma) are skipped; anything else that
/// is not a non-negative integer rejects the whole list.
pub fn parse_host_list(hosts: &str) -> Result<Vec<u32>, PlanError> {
    let counts = hosts
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<u32>()
                .map_err(|_| PlanError::InputIncomplete(format!("host count '{entry}' is not a number")))
        })
        .collect::<Result<Vec<u32>, PlanError>>()?;

    if counts.is_empty() {
        return Err(PlanError::InputIncomplete("host list is empty".to_string()));
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_list() {
        assert_eq!(parse_host_list("50,10,2").unwrap(), vec![50, 10, 2]);
        assert_eq!(parse_host_list(" 50 , 10 ,2, ").unwrap(), vec![50, 10, 2]);
        assert_eq!(parse_host_list("7").unwrap(), vec![7]);
    }

    #[test]
    fn test_parse_host_list_errors() {
        assert_eq!(
            parse_host_list(""),
            Err(PlanError::InputIncomplete("host list is empty".to_string()))
        );
        assert!(parse_host_list(" , ,").is_err());
        assert_eq!(
            parse_host_list("50,ten"),
            Err(PlanError::InputIncomplete("host count 'ten' is not a number".to_string()))
        );
        assert!(parse_host_list("-5").is_err());
    }

    #[test]
    fn test_request_deserialize() {
        let json = r#"{"base_network":"10.0.0.0/24","subnet_count":4,"hosts":"50,10,2","routing":"static"}"#;
        let request: PlanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.routing, RoutingMode::Static);
        assert_eq!(request.subnet_count, 4);

        let json = r#"{"base_network":"10.0.0.0/24","subnet_count":4,"hosts":"50"}"#;
        let request: PlanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.routing, RoutingMode::Rip, "routing defaults to rip");
    }
}
