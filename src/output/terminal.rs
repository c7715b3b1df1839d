//! Terminal output.
//!
//! Tables are printed as quoted, right-aligned, comma separated fields so the
//! output pastes straight into a spreadsheet.

use super::html::{host_cells, subnet_cells};
use crate::SubnetPlan;
use colored::Colorize;
use itertools::Itertools;

const SUBNET_WIDTHS: [usize; 6] = [5, 17, 6, 17, 17, 24];
const HOST_WIDTHS: [usize; 8] = [5, 20, 17, 8, 24, 35, 17, 17];

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.chars().count();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

fn format_row<T: ToString>(cells: &[T], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(c, w)| format_field(c.to_string(), *w))
        .join(",")
}

/// Both tables as plain text lines.
pub fn format_tables(plan: &SubnetPlan) -> Vec<String> {
    let mut lines = vec![format!(
        "# Subnets of {} (/{} , {} addresses each)",
        plan.base, plan.split.prefix, plan.split.block_size
    )];
    lines.push(format_row(
        &["cnt", "network", "cidr", "mask", "broadcast", "step"],
        &SUBNET_WIDTHS,
    ));
    lines.extend(
        plan.split
            .subnets
            .iter()
            .enumerate()
            .map(|(i, s)| format_row(&subnet_cells(i, s), &SUBNET_WIDTHS)),
    );

    lines.push(format!("# Host subnets ({} LANs)", plan.host_subnets.len()));
    lines.push(format_row(
        &["cnt", "network", "mask", "hosts", "step", "valid", "gateway", "broadcast"],
        &HOST_WIDTHS,
    ));
    lines.extend(
        plan.host_subnets
            .iter()
            .enumerate()
            .map(|(i, h)| format_row(&host_cells(i, h), &HOST_WIDTHS)),
    );
    lines
}

/// Print tables and router commands to stdout.
pub fn print_plan(plan: &SubnetPlan) {
    for line in format_tables(plan) {
        if line.starts_with('#') {
            println!("{}", line.bold().green());
        } else {
            println!("{line}");
        }
    }
    println!();
    println!(
        "{}",
        format!("# Router commands ({} routing)", plan.routing)
            .bold()
            .green()
    );
    println!("{}", plan.commands);
}
