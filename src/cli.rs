//! Command line interface.

use crate::config::Settings;
use crate::models::{PlanRequest, RoutingMode};
use crate::output::{print_plan, render_page, save_plan, PlanReport};
use crate::{load_request, plan, SubnetPlan};
use clap::{Parser, ValueEnum};
use std::error::Error;
use std::path::PathBuf;

/// How the finished plan is written to stdout.
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned tables followed by the router commands
    #[default]
    Text,
    /// Table markup and the commands in a <pre> block
    Html,
    /// The whole plan as JSON
    Json,
}

/// Routing choice on the command line.
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoutingArg {
    Rip,
    Static,
}

impl From<RoutingArg> for RoutingMode {
    fn from(arg: RoutingArg) -> Self {
        match arg {
            RoutingArg::Rip => RoutingMode::Rip,
            RoutingArg::Static => RoutingMode::Static,
        }
    }
}

/// IPv4 VLSM subnet planner with RIP or static router configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON request file with base_network, subnet_count, hosts and routing
    #[arg(short, long, conflicts_with_all = ["network", "subnets", "hosts"])]
    pub request: Option<PathBuf>,

    /// Base network in CIDR notation, e.g. 10.0.0.0/24
    #[arg(short, long)]
    pub network: Option<String>,

    /// Number of equal-size subnets
    #[arg(short, long)]
    pub subnets: Option<u32>,

    /// Comma separated host counts, one LAN per router
    #[arg(long)]
    pub hosts: Option<String>,

    /// Routing for networks that are not directly connected [default: rip]
    #[arg(long, value_enum)]
    pub routing: Option<RoutingArg>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Directory to save a dated JSON report into
    #[arg(long)]
    pub save: Option<PathBuf>,
}

impl Args {
    /// Build the request from a request file or from the individual flags.
    ///
    /// Missing flags are left empty so the planner reports them as
    /// incomplete input.
    pub fn to_request(&self) -> Result<PlanRequest, Box<dyn Error>> {
        let mut request = match &self.request {
            Some(path) => load_request(&path.to_string_lossy())?,
            None => PlanRequest {
                base_network: self.network.clone().unwrap_or_default(),
                subnet_count: self.subnets.unwrap_or(0),
                hosts: self.hosts.clone().unwrap_or_default(),
                routing: RoutingMode::default(),
            },
        };
        if let Some(routing) = self.routing {
            request.routing = routing.into();
        }
        Ok(request)
    }
}

/// Render a plan in a non-terminal format.
pub fn render(plan: &SubnetPlan, format: OutputFormat) -> Result<Option<String>, Box<dyn Error>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Html => Ok(Some(render_page(plan))),
        OutputFormat::Json => Ok(Some(
            serde_json::to_string_pretty(plan).map_err(|e| format!("Error serializing JSON: {e}"))?,
        )),
    }
}

/// Plan the request described by `args` and write the result.
pub fn run(args: &Args, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let request = args.to_request()?;
    let plan = plan(&request, settings).map_err(|e| {
        log::error!("plan failed: {e}");
        e
    })?;

    match render(&plan, args.format)? {
        Some(text) => println!("{text}"),
        None => print_plan(&plan),
    }

    if let Some(dir) = &args.save {
        let report = PlanReport::new(&request, &plan, settings.timezone);
        let path = save_plan(&report, dir, settings.timezone)?;
        eprintln!("Report saved to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_from_flags() {
        let args = Args::try_parse_from([
            "subnet-router-planner",
            "--network",
            "10.0.0.0/24",
            "--subnets",
            "4",
            "--hosts",
            "50,10,2",
            "--routing",
            "static",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.routing, Some(RoutingArg::Static));
        let request = args.to_request().unwrap();
        assert_eq!(request.base_network, "10.0.0.0/24");
        assert_eq!(request.subnet_count, 4);
        assert_eq!(request.hosts, "50,10,2");
        assert_eq!(request.routing, RoutingMode::Static);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["subnet-router-planner", "-n", "10.0.0.0/8"]).unwrap();
        assert_eq!(args.format, OutputFormat::Text);
        let request = args.to_request().unwrap();
        assert_eq!(request.routing, RoutingMode::Rip);
        assert_eq!(request.subnet_count, 0, "left for the planner to reject");
    }

    #[test]
    fn test_args_unknown_routing() {
        assert!(Args::try_parse_from(["subnet-router-planner", "--routing", "ospf"]).is_err());
        assert_eq!(RoutingMode::from(RoutingArg::Rip), RoutingMode::Rip);
    }

    #[test]
    fn test_args_request_conflicts_with_flags() {
        assert!(Args::try_parse_from([
            "subnet-router-planner",
            "--request",
            "r.json",
            "--network",
            "10.0.0.0/24"
        ])
        .is_err());
    }

    #[test]
    fn test_args_request_file_with_routing_override() {
        let args = Args::try_parse_from([
            "subnet-router-planner",
            "--request",
            "src/tests/test_data/request_rip_three_lans.json",
            "--routing",
            "static",
        ])
        .unwrap();
        let request = args.to_request().unwrap();
        assert_eq!(request.base_network, "10.0.0.0/24");
        assert_eq!(request.routing, RoutingMode::Static);
    }

    #[test]
    fn test_render_json() {
        let request = PlanRequest {
            base_network: "10.0.0.0/24".to_string(),
            subnet_count: 4,
            hosts: "50,10,2".to_string(),
            routing: RoutingMode::Rip,
        };
        let plan = crate::plan(&request, &Settings::default()).unwrap();
        let json = render(&plan, OutputFormat::Json).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["split"]["prefix"], 26);
        assert_eq!(value["links"].as_array().unwrap().len(), 3);
        assert!(render(&plan, OutputFormat::Text).unwrap().is_none());
        assert!(render(&plan, OutputFormat::Html)
            .unwrap()
            .unwrap()
            .starts_with("<h3>Subnets</h3>"));
    }
}
