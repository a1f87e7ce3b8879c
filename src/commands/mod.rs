//! Command-line interface for aspm-metrics
//!
//! This module implements the CLI commands and wires saved SSC responses through
//! the metrics engine into reports. It handles argument parsing, configuration
//! management, and output.
//!
//! # Commands
//!
//! - **dashboard**: Load the supplied responses, compute every metric whose input
//!   was given, and render a console and/or JSON report
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. All output goes through the [`Host`] trait so that
//! commands can be exercised in tests without touching the real terminal.

mod common;
mod dashboard;
mod host;
mod init;
mod run;
mod validate;

pub use dashboard::{DashboardArgs, process_dashboard};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
