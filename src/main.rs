//! CLI entry point for the linkprobe tool.

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use linkprobe_core::{HttpTransport, ProbeOptions, build_checker_registry, check_all};
use tracing::{debug, info};

mod app_config;
mod cli;
mod output;

use app_config::OutputSetting;
use cli::Args;

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Every link is online, or there was nothing to check.
    Success,
    /// At least one link is offline or invalid.
    Partial,
    /// At least one probe failed, or the run aborted.
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        match exit {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Partial => ExitCode::from(1),
            ProcessExit::Failure => ExitCode::from(2),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    init_tracing(&args);

    match run(args).await {
        Ok(exit) => exit.into(),
        Err(error) => {
            eprintln!("Error: {error:#}");
            ProcessExit::Failure.into()
        }
    }
}

/// Installs the stderr subscriber.
///
/// Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
fn init_tracing(args: &Args) {
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(args: Args) -> Result<ProcessExit> {
    debug!(?args, "CLI arguments parsed");

    let loaded = app_config::load_config(args.config.as_deref())?;
    if loaded.loaded_from_file {
        debug!(path = ?loaded.path, "Loaded config file");
    }
    let config = loaded.config;

    let links = if !args.links.is_empty() {
        args.links.clone()
    } else if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read links from stdin")?;
        parse_link_lines(&buffer)
    } else {
        Vec::new()
    };

    if links.is_empty() {
        output::print_quick_start_guidance();
        return Ok(ProcessExit::Success);
    }

    let transport = HttpTransport::with_config(config.transport_config())
        .context("Failed to build HTTP client")?;
    let registry = build_checker_registry(Arc::new(transport), &config.endpoints());
    debug!(?registry, "Checker registry ready");

    let options = ProbeOptions {
        verify_certificate: !args.insecure && config.verify_certificate.unwrap_or(true),
        verbose: args.verbose_http,
    };

    info!(links = links.len(), "Checking links");
    let report = check_all(&registry, &links, &options).await;

    let format = if args.json {
        OutputSetting::Json
    } else {
        config.output.unwrap_or_default()
    };
    debug!(format = format.as_str(), "Rendering report");
    match format {
        OutputSetting::Json => println!("{}", output::render_json(&report)?),
        OutputSetting::Table => {
            for line in output::render_table(&report, output::terminal_width()) {
                println!("{line}");
            }
        }
    }

    Ok(output::determine_exit_outcome(&report.summary()))
}

/// One link per line; blank lines and `#` comments are skipped.
fn parse_link_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
