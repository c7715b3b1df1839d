// cargo watch -x 'fmt' -x 'test'

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use config::Settings;
use error::PlanError;
use models::{
    parse_host_list, HostSubnet, Network, PlanRequest, RoutingMode, SerialLink, Subnet,
};
use processing::{
    build_links, build_routers, divide_equal, divide_hosts, find_overlaps, log_overlaps,
    render_commands, EqualSplit, LabeledBlock, RouterConfig,
};
use serde::Serialize;
use std::error::Error;
use std::path::Path;

/// Everything computed for one request.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetPlan {
    /// Base network with host bits cleared.
    pub base: Network,
    pub routing: RoutingMode,
    pub split: EqualSplit,
    pub host_subnets: Vec<HostSubnet>,
    pub links: Vec<SerialLink>,
    pub routers: Vec<RouterConfig>,
    /// Newline-joined router commands.
    pub commands: String,
}

/// Compute subnets, host subnets and router commands for a request.
///
/// Pure: the same request and settings always give the same plan, and
/// nothing is rendered when an error is returned.
pub fn plan(request: &PlanRequest, settings: &Settings) -> Result<SubnetPlan, PlanError> {
    log::info!(
        "#Start plan() base={} subnets={} hosts='{}' routing={}",
        request.base_network,
        request.subnet_count,
        request.hosts,
        request.routing
    );

    let base_text = request.base_network.trim();
    if base_text.is_empty() {
        return Err(PlanError::InputIncomplete(
            "base network is missing".to_string(),
        ));
    }
    let base: Network = base_text
        .parse()
        .map_err(|e| PlanError::InputIncomplete(format!("base network: {e}")))?;
    if request.subnet_count == 0 {
        return Err(PlanError::InputIncomplete(
            "subnet count must be at least 1".to_string(),
        ));
    }
    if request.subnet_count > settings.max_subnet_count {
        return Err(PlanError::InputIncomplete(format!(
            "subnet count {} is above the limit of {}",
            request.subnet_count, settings.max_subnet_count
        )));
    }
    let hosts = parse_host_list(&request.hosts)?;

    let split = divide_equal(base, request.subnet_count)?;
    let start = split.next_address().ok_or_else(|| {
        PlanError::HostAllocationFailure(
            "no addresses left after the last equal-size subnet".to_string(),
        )
    })?;
    let host_subnets = divide_hosts(start, &hosts)?;
    let links = build_links(host_subnets.len(), settings.serial_pool)?;
    check_for_overlaps(&split.subnets, &host_subnets, &links)?;

    let base = Network {
        addr: base.lo(),
        prefix: base.prefix,
    };

    let routers = build_routers(&host_subnets, &links, request.routing);
    let commands = render_commands(&routers, settings);
    log::info!(
        "plan done: {} subnets, {} LANs, {} routers",
        split.subnets.len(),
        host_subnets.len(),
        routers.len()
    );

    Ok(SubnetPlan {
        base,
        routing: request.routing,
        split,
        host_subnets,
        links,
        routers,
        commands,
    })
}

/// Return an error if any two allocated blocks share addresses.
pub fn check_for_overlaps(
    subnets: &[Subnet],
    lans: &[HostSubnet],
    links: &[SerialLink],
) -> Result<(), PlanError> {
    let blocks: Vec<LabeledBlock> = subnets
        .iter()
        .enumerate()
        .map(|(i, s)| LabeledBlock::new(format!("subnet {}", i + 1), *s))
        .chain(
            lans.iter()
                .enumerate()
                .map(|(i, l)| LabeledBlock::new(format!("LAN {}", i + 1), l.subnet)),
        )
        .chain(
            links
                .iter()
                .enumerate()
                .map(|(k, l)| LabeledBlock::new(format!("serial link {k}"), l.subnet)),
        )
        .collect();

    let conflicts = find_overlaps(&blocks);
    log_overlaps(&conflicts);
    match conflicts.first() {
        Some(c) => Err(PlanError::Overlap {
            first: c.first.to_string(),
            second: c.second.to_string(),
        }),
        None => Ok(()),
    }
}

/// Read a [`PlanRequest`] from a JSON file.
///
/// # Returns
/// * `Err` - If the file does not exist or a field does not parse; the
///   message carries the JSON path of the failing field
pub fn load_request(request_file: &str) -> Result<PlanRequest, Box<dyn Error>> {
    if !Path::new(request_file).exists() {
        return Err(format!("Request file does not exist: {request_file}").into());
    }
    log::info!("Reading request file: {request_file}");
    let json = std::fs::read_to_string(request_file)
        .map_err(|e| format!("Error reading request file {request_file}: {e}"))?;

    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let request: PlanRequest = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        format!(
            "Error parsing request file {request_file}: path={} error={}",
            e.path(),
            e
        )
    })?;
    Ok(request)
}
