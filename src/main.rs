//! Lorekeep - publish an Obsidian campaign vault as player and dm views.

mod build;
mod bundle;
mod check;
mod cli;
mod config;
mod manifest;
mod utils;
mod vault;

use anyhow::Result;
use build::build_vault;
use bundle::bundle_vault;
use check::check_vault;
use clap::Parser;
use cli::{Cli, Commands};
use config::LoreConfig;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build => build_vault(&config).map(|_| ()),
        Commands::Check { strict } => check_vault(&config, *strict),
        Commands::Bundle { .. } => {
            build_vault(&config)?;
            bundle_vault(&config)
        }
    }
}

/// Load configuration, apply CLI overrides and validate for the command.
///
/// A missing config file is not an error; the vault can come from `--vault`.
fn load_config(cli: &Cli) -> Result<LoreConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        LoreConfig::from_path(&config_path)?
    } else {
        LoreConfig::default()
    };
    config.update_with_cli(cli);
    config.validate(&cli.command)?;
    config.log_source();

    Ok(config)
}
