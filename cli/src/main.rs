// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Admission CLI
//!
//! The `admission` binary inspects an admission backend without running it.
//!
//! ## Commands
//!
//! - `admission config show|validate|generate` - Configuration management
//! - `admission catalog show [--context]` - Checklist configurations per context
//! - `admission titres-acces <training-type> [--flag ...]` - Access-title matrix evaluation
//!
//! A `.env` file in the working directory is loaded before arguments are
//! parsed, so every `ADMISSION_*` variable may come from it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use admission_cli::commands::{self, CatalogCommand, ConfigCommand, TitresAccesArgs};
use admission_core::domain::admission_config::AdmissionConfigManifest;

/// Admission engine tooling
#[derive(Parser)]
#[command(name = "admission")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "ADMISSION_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); defaults to the configured level
    #[arg(long, global = true, env = "ADMISSION_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Checklist catalogs
    #[command(name = "catalog")]
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },

    /// Evaluate the access-title matrix for a training type
    #[command(name = "titres-acces")]
    TitresAcces(TitresAccesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Logging settings come from the manifest when it parses; a broken file is
    // reported by the command itself.
    let logging = AdmissionConfigManifest::load_or_default(cli.config.clone())
        .ok()
        .and_then(|manifest| manifest.logging().cloned())
        .unwrap_or_default();
    let level = cli.log_level.clone().unwrap_or(logging.level);
    init_logging(&level, &logging.format)?;

    match cli.command {
        Some(
            Commands::Config { command },
        ) => commands::config::handle_command(command, cli.config).await,
        Some(Commands::Catalog { command }) => commands::catalog::handle_command(command),
        Some(Commands::TitresAcces(args)) => commands::titres_acces::handle_command(args),
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, format: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if format == "json" {
        builder.json().init();
    } else {
        builder.compact().init();
    }

    Ok(())
}
