//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Publish an Obsidian campaign vault as player and dm views
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root; relative paths in the config resolve against it
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: lorekeep.toml)
    #[arg(short = 'C', long, default_value = "lorekeep.toml")]
    pub config: PathBuf,

    /// Vault directory (overrides `[vault].root`)
    #[arg(short, long)]
    pub vault: Option<PathBuf>,

    /// Output content root (overrides `[build].output`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Top-level folder holding player-visible pages
    #[arg(long)]
    pub player_folder: Option<String>,

    /// Top-level folder holding dm-only pages
    #[arg(long)]
    pub dm_folder: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Mirror the vault and write the player and dm manifests
    Build,

    /// Resolve the reference graph and report problems without writing anything
    Check {
        /// Exit with an error when any reference is unresolved, ambiguous or colliding
        #[arg(long)]
        strict: bool,
    },

    /// Build, then assemble one publishable directory per view
    Bundle {
        /// Bundle directory (overrides `[bundle].output`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build)
    }
    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Check { .. })
    }
    pub const fn is_bundle(&self) -> bool {
        matches!(self.command, Commands::Bundle { .. })
    }
}
