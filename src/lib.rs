pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use crate::core::{Converter, Strategy};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Commands that operate on a loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Convert { amount: f64, from: String, to: String },
    Table { amount: f64 },
    Verify,
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    match config_path {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    }
}

/// Builds the routing table for `config`, optionally overriding its strategy.
pub fn build_converter(config: &AppConfig, strategy: Option<Strategy>) -> Result<Converter> {
    let strategy = strategy.unwrap_or(config.strategy);
    let edges = config.rate_edges()?;
    info!(%strategy, rates = edges.len(), "Building routing table");
    Converter::with_edges(strategy, config.universe(), edges)
        .context("Failed to build routing table")
}

/// Runs `command` and returns the text to print.
pub fn execute(
    command: AppCommand,
    config_path: Option<&str>,
    strategy: Option<Strategy>,
) -> Result<String> {
    let config = load_config(config_path)?;
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Convert { amount, from, to } => {
            let converter = build_converter(&config, strategy)?;
            cli::convert::run(&config, &converter, amount, &from, &to)
        }
        AppCommand::Table { amount } => {
            let converter = build_converter(&config, strategy)?;
            cli::table::run(&config, &converter, amount)
        }
        AppCommand::Verify => cli::verify::run(&config),
    }
}

pub fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    strategy: Option<Strategy>,
) -> Result<()> {
    let output = execute(command, config_path, strategy)?;
    println!("{output}");
    Ok(())
}
