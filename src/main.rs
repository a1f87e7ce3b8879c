//! A tool to derive application security dashboard metrics from Fortify SSC records.
//!
//! # Overview
//!
//! `aspm-metrics` reads responses saved from the Fortify Software Security Center REST
//! API and turns them into the summary figures an application security dashboard shows:
//! compliance of project versions, severity distribution of open issues, scan-type
//! coverage, mean time to remediate, the most frequent vulnerability categories, a star
//! rating, review progress and possible recurrences.
//!
//! It never talks to the SSC server itself. Fetch the responses with whatever client you
//! already use and point the tool at the files.
//!
//! # Quick Start
//!
//! ```bash
//! aspm-metrics dashboard --issues issues.json
//! ```
//!
//! # Inputs
//!
//! Each input is a JSON document shaped like an SSC list response:
//!
//! ```json
//! { "data": [ { "issueName": "SQL Injection", "severity": 1.0 } ], "count": 1, "totalCount": 40 }
//! ```
//!
//! | Option          | Response                            | Metrics                                                    |
//! |-----------------|-------------------------------------|------------------------------------------------------------|
//! | `--versions`    | project versions                    | compliance                                                 |
//! | `--issues`      | open issues                         | severity distribution, top categories, star rating, review |
//! | `--remediated`  | removed issues                      | mean time to remediate                                     |
//! | `--history`     | issues including removed ones       | recurrence candidates                                      |
//! | `--artifacts`   | artifacts of one version (repeat)   | scan coverage                                              |
//!
//! When `totalCount` is larger than the number of records in `data`, the issue counts of
//! the severity distribution are extrapolated to the full population and marked with `~`.
//!
//! # Output
//!
//! By default the dashboard is printed to the console. Use `--json PATH` to write a JSON
//! report instead, and add `--console` to get both.
//!
//! # Configuration
//!
//! ```bash
//! aspm-metrics init
//! aspm-metrics validate
//! ```
//!
//! `init` writes `aspm.toml` with the default settings: the size of the top-categories
//! ranking, the performance indicator carrying the security rating, the status marking
//! unreviewed issues, and the fields bracketing the remediation interval.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use aspm_metrics::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that writes to the real terminal.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args())
}
