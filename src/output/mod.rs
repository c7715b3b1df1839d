//! Output formatting for subnet plans.
//!
//! This module handles rendering a finished plan:
//! - [`html`] - Table markup
//! - [`terminal`] - Terminal output with colors
//! - [`report`] - JSON report files

pub mod html;
pub mod report;
pub mod terminal;

pub use html::{render_page, render_tables};
pub use report::{save_plan, PlanReport};
pub use terminal::{format_field, print_plan};
