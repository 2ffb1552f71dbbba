//! # grove-cli
//!
//! Command-line front end for Grove package manifests.
//!
//! This is the main entry point for the `grove` tool. It handles command parsing,
//! sets up logging and error reporting, and dispatches to the command handlers.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use grove_config::{ConfigError, LoaderSettings};
use grove_core::utils::ColorSupport;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Decode and inspect Grove package manifests
#[derive(Parser)]
#[command(name = "grove", version, about = "Decode and inspect package manifests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Manifest to load instead of searching for grove.dhall / grove.json
    #[arg(long, global = true, env = "GROVE_MANIFEST", value_name = "PATH")]
    pub manifest: Option<Utf8PathBuf>,

    /// dhall interpreter name or path
    #[arg(long, global = true, env = "GROVE_DHALL", value_name = "PROGRAM")]
    pub dhall: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the manifest decodes
    Check,
    /// Print the decoded manifest as JSON
    Json {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<Utf8PathBuf>,
    },
    /// List the project's direct dependencies
    Deps,
    /// List every package in the package set
    Packages,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting grove v{}", env!("CARGO_PKG_VERSION"));

    let colors = if cli.no_color {
        ColorSupport::disabled()
    } else {
        ColorSupport::detect()
    };

    match run_cli(cli, colors) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let formatter = ErrorFormatter::new(colors);
            match err.downcast_ref::<ConfigError>() {
                Some(config_err) => eprint!("{}", formatter.format_config_error(config_err)),
                None => eprint!("{}", formatter.format_anyhow(&err)),
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli, colors: ColorSupport) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    let settings = LoaderSettings {
        manifest: cli.manifest,
        dhall: cli.dhall,
    };

    rt.block_on(async {
        let ctx = CommandContext::new(settings, colors)?;
        commands::dispatch_command(cli.command, &ctx).await?;
        Ok::<(), anyhow::Error>(())
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "grove_cli={level},grove_config={level},grove_core={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("grove encountered an unexpected error: {}", panic_info);
        eprintln!("grove crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/grove-pm/grove/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
