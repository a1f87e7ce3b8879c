use super::Host;
use super::common::{ColorMode, LogLevel, init_logging};
use crate::Result;
use crate::config::Config;
use crate::metrics::{
    compute_compliance, compute_remediation_times, compute_review_rates, compute_scan_coverage, compute_severity_distribution,
    derive_star_rating, find_recurrence_candidates, rank_categories,
};
use crate::records::load_batch;
use crate::reports::{Dashboard, generate_console, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = " dashboard";

#[derive(Parser, Debug, Default)]
pub struct DashboardArgs {
    /// Project versions response, used for compliance
    #[arg(long, value_name = "PATH", help_heading = "Inputs")]
    pub versions: Option<Utf8PathBuf>,

    /// Issues response, used for severity distribution, top categories, star rating and review rate
    #[arg(long, value_name = "PATH", help_heading = "Inputs")]
    pub issues: Option<Utf8PathBuf>,

    /// Removed issues response, used for mean time to remediate
    #[arg(long, value_name = "PATH", help_heading = "Inputs")]
    pub remediated: Option<Utf8PathBuf>,

    /// Issues response including removed issues, used for recurrence candidates
    #[arg(long, value_name = "PATH", help_heading = "Inputs")]
    pub history: Option<Utf8PathBuf>,

    /// Artifacts response of one project version, used for scan coverage. Repeat once per version.
    #[arg(long, value_name = "PATH", help_heading = "Inputs")]
    pub artifacts: Vec<Utf8PathBuf>,

    /// Number of categories in the top-categories ranking (overrides the configuration)
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Path to configuration file (default is `aspm.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Output the dashboard to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output the dashboard to the console.
    /// If omitted, console output is shown only when no JSON report is written.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

impl DashboardArgs {
    fn has_inputs(&self) -> bool {
        self.versions.is_some() || self.issues.is_some() || self.remediated.is_some() || self.history.is_some() || !self.artifacts.is_empty()
    }
}

pub fn process_dashboard<H: Host>(host: &mut H, args: &DashboardArgs) -> Result<()> {
    init_logging(args.log_level);

    if !args.has_inputs() {
        bail!("no input files given, use at least one of --versions, --issues, --remediated, --history or --artifacts");
    }

    let config = Config::load(Utf8Path::new("."), args.config.as_deref())?;
    let dashboard = build_dashboard(args, &config)?;

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(&dashboard, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
        log::info!(target: LOG_TARGET, "Wrote JSON report to '{filename}'");
    }

    if args.console || args.json.is_none() {
        let mut console_output = String::new();
        generate_console(&dashboard, args.color.use_colors(), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    Ok(())
}

/// Loads every supplied input and computes the metrics that depend on it.
///
/// # Errors
///
/// Returns an error if an input file cannot be read or is not a usable SSC response
pub fn build_dashboard(args: &DashboardArgs, config: &Config) -> Result<Dashboard> {
    let top = args.top.unwrap_or(config.top_categories);
    if top == 0 {
        bail!("--top must be at least 1");
    }

    let mut dashboard = Dashboard::default();

    if let Some(path) = &args.versions {
        let versions = load_batch(path)?;
        log::info!(target: LOG_TARGET, "Classifying compliance of {} version(s)", versions.sample_size());
        dashboard.compliance = Some(compute_compliance(&versions, &config.rating_indicator));
    }

    if let Some(path) = &args.issues {
        let issues = load_batch(path)?;
        log::info!(target: LOG_TARGET, "Aggregating {} issue(s)", issues.sample_size());
        dashboard.severity_distribution = Some(compute_severity_distribution(&issues));
        dashboard.top_categories = Some(rank_categories(&issues, top));
        dashboard.star_rating = Some(derive_star_rating(&issues));
        dashboard.review_rates = Some(compute_review_rates(&issues, &config.unreviewed_status));
    }

    if let Some(path) = &args.remediated {
        let remediated = load_batch(path)?;
        log::info!(target: LOG_TARGET, "Measuring remediation times of {} issue(s)", remediated.sample_size());
        dashboard.remediation_times = Some(compute_remediation_times(
            &remediated,
            &config.remediation_start_field,
            &config.remediation_end_field,
        ));
    }

    if let Some(path) = &args.history {
        let history = load_batch(path)?;
        log::info!(target: LOG_TARGET, "Looking for recurrence among {} issue(s)", history.sample_size());
        dashboard.recurrence_candidates = Some(find_recurrence_candidates(&history));
    }

    if !args.artifacts.is_empty() {
        let per_version = args.artifacts.iter().map(|path| load_batch(path)).collect::<Result<Vec<_>>>()?;
        log::info!(target: LOG_TARGET, "Computing scan coverage over {} version(s)", per_version.len());
        dashboard.scan_coverage = Some(compute_scan_coverage(&per_version));
    }

    Ok(dashboard)
}
