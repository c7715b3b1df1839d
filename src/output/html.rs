//! HTML table markup for a plan.

use crate::models::{HostSubnet, Subnet};
use crate::SubnetPlan;
use itertools::Itertools;

const SUBNET_HEADERS: [&str; 6] = ["#", "Network", "CIDR", "Mask", "Broadcast", "Step"];
const HOST_HEADERS: [&str; 8] = [
    "#",
    "Network address",
    "Mask",
    "Hosts",
    "Step",
    "Valid addresses",
    "Gateway",
    "Broadcast",
];

fn header_row(headers: &[&str]) -> String {
    format!(
        "<tr>{}</tr>",
        headers.iter().map(|h| format!("<th>{h}</th>")).join("")
    )
}

fn data_row(cells: &[String]) -> String {
    format!(
        "<tr>{}</tr>",
        cells.iter().map(|c| format!("<td>{c}</td>")).join("")
    )
}

fn step_cell(subnet: &Subnet) -> String {
    subnet
        .step()
        .map(|s| s.to_string())
        .unwrap_or_else(|_| "-".to_string())
}

/// Cells of one row of the "Subnets" table.
pub fn subnet_cells(i: usize, s: &Subnet) -> Vec<String> {
    vec![
        (i + 1).to_string(),
        s.network.to_string(),
        format!("/{}", s.prefix),
        s.mask.to_string(),
        s.broadcast.to_string(),
        step_cell(s),
    ]
}

/// Cells of one row of the "Host subnets" table.
pub fn host_cells(i: usize, h: &HostSubnet) -> Vec<String> {
    let valid = match h.valid_range() {
        Some((first, last)) => format!("{first} – {last}"),
        None => "-".to_string(),
    };
    vec![
        (i + 1).to_string(),
        h.subnet.cidr().to_string(),
        h.subnet.mask.to_string(),
        h.required_hosts.to_string(),
        step_cell(&h.subnet),
        valid,
        h.gateway.to_string(),
        h.subnet.broadcast.to_string(),
    ]
}

/// Render the subnet and host subnet tables.
pub fn render_tables(plan: &SubnetPlan) -> String {
    let mut html = String::from("<h3>Subnets</h3>\n<table>\n");
    html.push_str(&header_row(&SUBNET_HEADERS));
    html.push('\n');
    for (i, s) in plan.split.subnets.iter().enumerate() {
        html.push_str(&data_row(&subnet_cells(i, s)));
        html.push('\n');
    }
    html.push_str("</table>\n<h3>Host subnets</h3>\n<table>\n");
    html.push_str(&header_row(&HOST_HEADERS));
    html.push('\n');
    for (i, h) in plan.host_subnets.iter().enumerate() {
        html.push_str(&data_row(&host_cells(i, h)));
        html.push('\n');
    }
    html.push_str("</table>\n");
    html
}

/// Tables followed by the command text in a `<pre>` block.
pub fn render_page(plan: &SubnetPlan) -> String {
    format!(
        "{}<h3>Commands</h3>\n<pre>\n{}\n</pre>\n",
        render_tables(plan),
        escape(&plan.commands)
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
