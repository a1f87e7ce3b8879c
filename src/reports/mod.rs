//! Report generation for computed dashboard metrics
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **Console**: Terminal output with optional ANSI colors, one section per metric
//! - **JSON**: Machine-readable structured data
//!
//! Both operate on a [`Dashboard`], which holds whichever metrics were computed.
//! Sections for metrics that were not computed are left out.
//!
//! Common formatting lives in the `common` module: percentages and durations with one
//! decimal place, `n/a` where there is no data, and a `~` prefix on extrapolated counts.

mod common;
mod console;
mod dashboard;
mod json;

pub use console::generate as generate_console;
pub use dashboard::Dashboard;
pub use json::generate as generate_json;
