// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info};

use admission_core::application::AdmissionContainer;
use admission_core::domain::admission_config::AdmissionConfigManifest;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,

        /// Print the resolved manifest as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Also open the configured storage and create the schema
        #[arg(long)]
        connect: bool,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./admission-config.yaml)
        #[arg(short, long, default_value = "./admission-config.yaml")]
        output: PathBuf,

        /// Include the PostgreSQL and observability sections
        #[arg(long)]
        examples: bool,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths, yaml } => show(config_override, paths, yaml),
        ConfigCommand::Validate { file, connect } => validate(
            file.or(config_override),
            connect,
        )
        .await,
        ConfigCommand::Generate { output, examples } => generate(output, examples),
    }
}

fn show(config_override: Option<PathBuf>, show_paths: bool, as_yaml: bool) -> Result<()> {
    let config = AdmissionConfigManifest::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;
    debug!(name = %config.metadata.name, "Loaded configuration");

    if as_yaml {
        print!("{}", serde_yaml::to_string(&config).context("Failed to serialize configuration")?);
        return Ok(());
    }

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. ADMISSION_CONFIG_PATH: {}",
            std::env::var("ADMISSION_CONFIG_PATH")
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./admission-config.yaml");
        println!("  4. ~/.admission/config.yaml");
        println!("  5. /etc/admission/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "Instance:".bold());
    println!("  Name: {}", config.metadata.name);
    if let Some(version) = &config.metadata.version {
        println!("  Version: {}", version);
    }
    println!();

    let storage = &config.spec.storage;
    println!("{}", "Storage:".bold());
    println!("  Backend: {:?}", storage.backend);
    println!(
        "  Database URL: {}",
        if storage.database_url.is_some() {
            "(set)".to_string()
        } else {
            "(not set)".dimmed().to_string()
        }
    );
    println!("  Max connections: {}", storage.max_connections);
    println!();

    println!("{}", "Propositions:".bold());
    println!("  Max in progress per candidate: {}", config.spec.propositions.max_en_cours);
    println!();

    println!("{}", "Event bus:".bold());
    println!("  Capacity: {}", config.spec.event_bus.capacity);
    println!();

    if let Some(logging) = config.logging() {
        println!("{}", "Logging:".bold());
        println!("  Level: {}", logging.level);
        println!("  Format: {}", logging.format);
        println!();
    }

    Ok(())
}

async fn validate(config_path: Option<PathBuf>, connect: bool) -> Result<()> {
    println!("Validating configuration...");

    let config = AdmissionConfigManifest::load_or_default(config_path).context(
        "Failed to load configuration",
    )?;

    config.validate().context("Configuration validation failed")?;
    info!(name = %config.metadata.name, "Configuration validated");
    println!("{}", "✓ Configuration is valid".green());

    if connect {
        let container = AdmissionContainer::from_config(&config)
            .await
            .context("Failed to open the configured storage")?;
        let backend = if container.is_in_memory() { "in-memory" } else { "PostgreSQL" };
        println!(
            "{}",
            format!(
                "✓ Storage ready ({}, {} handlers registered)",
                backend,
                container.bus.handler_count()
            )
            .green()
        );
    }

    Ok(())
}

fn generate(output: PathBuf, with_examples: bool) -> Result<()> {
    let sample = if with_examples {
        include_str!("../../templates/config-with-examples.yaml")
    } else {
        include_str!("../../templates/config-minimal.yaml")
    };

    std::fs::write(&output, sample).with_context(
        || format!("Failed to write config to {:?}", output),
    )?;

    println!("{}", format!("✓ Configuration generated: {}", output.display()).green());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_templates_are_valid_manifests() {
        let dir = tempfile::tempdir().unwrap();
        for examples in [false, true] {
            let path = dir.path().join(format!("config-{}.yaml", examples));
            generate(path.clone(), examples).unwrap();

            let manifest = AdmissionConfigManifest::from_yaml_file(&path).unwrap();
            manifest.validate().unwrap();
        }
    }

    #[tokio::test]
    async fn test_validate_with_connect_on_memory_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admission-config.yaml");
        generate(path.clone(), false).unwrap();

        validate(Some(path), true).await.unwrap();
    }

    #[test]
    fn test_show_yaml_on_generated_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admission-config.yaml");
        generate(path.clone(), true).unwrap();

        show(Some(path), false, true).unwrap();
    }
}
