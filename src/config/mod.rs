//! Project configuration management for `lorekeep.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[vault]`   | Vault location, player/dm folders, metadata dir  |
//! | `[build]`   | Output content root and manifest file names      |
//! | `[bundle]`  | Per-view publishable directories                 |
//!
//! # Example
//!
//! ```toml
//! [vault]
//! root = "~/Documents/Campaign"
//! player_folder = "Player Section"
//! dm_folder = "DM Section"
//!
//! [build]
//! output = "public/content"
//!
//! [bundle]
//! output = "bundles"
//! ```

mod build;
mod bundle;
pub mod defaults;
mod error;
mod vault;

use build::BuildConfig;
use bundle::BundleConfig;
pub use error::ConfigError;
use vault::VaultConfig;

use crate::cli::{Cli, Commands};
use crate::log;
use crate::manifest::Mode;
use crate::vault::ScopeFolders;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing lorekeep.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct LoreConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub vault: VaultConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub bundle: BundleConfig,
}

impl LoreConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: LoreConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the project root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Report which config file is in effect.
    pub fn log_source(&self) {
        if self.config_path.is_file() {
            log!("config"; "{}", self.config_path.display());
        } else {
            log!("config"; "{} not found, using defaults", self.config_path.display());
        }
    }

    /// Vault root, or `ConfigError::MissingVaultRoot` when unset.
    pub fn vault_root(&self) -> Result<&Path, ConfigError> {
        self.vault
            .root
            .as_deref()
            .ok_or(ConfigError::MissingVaultRoot)
    }

    /// Folder names used for scope classification.
    pub fn scope_folders(&self) -> ScopeFolders {
        ScopeFolders::new(&self.vault.player_folder, &self.vault.dm_folder)
    }

    /// Absolute path of the manifest for `mode`.
    pub fn manifest_path(&self, mode: Mode) -> PathBuf {
        let name = match mode {
            Mode::Player => &self.build.player_manifest,
            Mode::Dm => &self.build.dm_manifest,
        };
        self.build.output.join(name)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.vault.root, cli.vault.clone().map(Some).as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(&mut self.vault.player_folder, cli.player_folder.as_ref());
        Self::update_option(&mut self.vault.dm_folder, cli.dm_folder.as_ref());

        if let Commands::Bundle { output } = &cli.command {
            Self::update_option(&mut self.bundle.output, output.as_ref());
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every path against the project root and make it absolute
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.bundle.output = Self::normalize_path(&root.join(&self.bundle.output));

        if let Some(vault) = &self.vault.root {
            let expanded = match vault.to_str() {
                Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
                None => vault.clone(),
            };
            self.vault.root = Some(Self::normalize_path(&root.join(expanded)));
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the given command
    pub fn validate(&self, command: &Commands) -> Result<()> {
        let vault = self.vault_root()?;
        if !vault.is_dir() {
            bail!(ConfigError::VaultNotFound(vault.to_path_buf()));
        }

        Self::check_folder_name("[vault.player_folder]", &self.vault.player_folder)?;
        Self::check_folder_name("[vault.dm_folder]", &self.vault.dm_folder)?;
        if self.vault.player_folder == self.vault.dm_folder {
            bail!(ConfigError::Validation(
                "[vault.player_folder] and [vault.dm_folder] must differ".into()
            ));
        }
        Self::check_folder_name("[vault.metadata_dir]", &self.vault.metadata_dir)?;

        Self::check_file_name("[build.player_manifest]", &self.build.player_manifest)?;
        Self::check_file_name("[build.dm_manifest]", &self.build.dm_manifest)?;
        if self.build.player_manifest == self.build.dm_manifest {
            bail!(ConfigError::Validation(
                "[build.player_manifest] and [build.dm_manifest] must differ".into()
            ));
        }

        // The output root is wiped on every build
        if overlaps(&self.build.output, vault) {
            bail!(ConfigError::Validation(
                "[build.output] must not overlap the vault root".into()
            ));
        }

        if let Commands::Bundle { .. } = command {
            Self::check_file_name("[bundle.player_name]", &self.bundle.player_name)?;
            Self::check_file_name("[bundle.dm_name]", &self.bundle.dm_name)?;
            Self::check_file_name("[bundle.mode_file]", &self.bundle.mode_file)?;
            if self.bundle.player_name == self.bundle.dm_name {
                bail!(ConfigError::Validation(
                    "[bundle.player_name] and [bundle.dm_name] must differ".into()
                ));
            }
            if overlaps(&self.bundle.output, vault) || overlaps(&self.bundle.output, &self.build.output)
            {
                bail!(ConfigError::Validation(
                    "[bundle.output] must not overlap the vault root or [build.output]".into()
                ));
            }
        }

        Ok(())
    }

    fn check_folder_name(field: &str, name: &str) -> Result<()> {
        if name.trim().is_empty() || name.contains('/') || name.contains('\\') {
            bail!(ConfigError::Validation(format!(
                "{field} must be a single non-empty folder name"
            )));
        }
        Ok(())
    }

    fn check_file_name(field: &str, name: &str) -> Result<()> {
        if name.trim().is_empty() || name.contains('/') || name.contains('\\') || name == ".." {
            bail!(ConfigError::Validation(format!(
                "{field} must be a plain file name"
            )));
        }
        Ok(())
    }
}

/// Either path equals or contains the other.
fn overlaps(a: &Path, b: &Path) -> bool {
    a.starts_with(b) || b.starts_with(a)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("lorekeep").chain(args.iter().copied()))
    }

    fn configured(args: &[&str]) -> LoreConfig {
        let mut config = LoreConfig::default();
        config.update_with_cli(&cli(args));
        config
    }

    #[test]
    fn test_from_str() {
        let config = LoreConfig::from_str(
            r#"
            [vault]
            root = "vault"

            [build]
            output = "out"
        "#,
        )
        .unwrap();

        assert_eq!(config.vault.root, Some(PathBuf::from("vault")));
        assert_eq!(config.build.output, PathBuf::from("out"));
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = LoreConfig::from_str("[vault\nroot = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let result = LoreConfig::from_str("[serve]\nport = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = LoreConfig::from_path(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(..))
        ));
    }

    #[test]
    fn test_default_has_no_vault_root() {
        let config = LoreConfig::default();
        assert!(matches!(
            config.vault_root(),
            Err(ConfigError::MissingVaultRoot)
        ));
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_cli_overrides_and_paths_are_absolute() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let config = configured(&[
            "--root",
            root,
            "--vault",
            "vault",
            "--dm-folder",
            "Secrets",
            "build",
        ]);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.vault.root, Some(root.join("vault")));
        assert_eq!(config.build.output, root.join("public/content"));
        assert_eq!(config.vault.dm_folder, "Secrets");
        assert_eq!(config.config_path, root.join("lorekeep.toml"));
        assert_eq!(
            config.manifest_path(Mode::Player),
            root.join("public/content/player-manifest.json")
        );
    }

    #[test]
    fn test_config_path_points_at_config_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let config = configured(&["--root", root, "-C", "campaign.toml", "build"]);

        assert!(!config.config_path.is_file());
        config.log_source();

        fs::write(dir.path().join("campaign.toml"), "").unwrap();
        assert!(config.config_path.is_file());
        config.log_source();
    }

    #[test]
    fn test_bundle_output_override() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let config = configured(&["--root", root, "bundle", "--output", "dist"]);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.bundle.output, root.join("dist"));
    }

    #[test]
    fn test_validate_missing_vault_root() {
        let config = configured(&["build"]);
        let err = config.validate(&Commands::Build).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingVaultRoot)
        ));
    }

    #[test]
    fn test_validate_vault_not_found() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let config = configured(&["--root", root, "--vault", "absent", "build"]);

        let err = config.validate(&Commands::Build).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::VaultNotFound(_))
        ));
    }

    #[test]
    fn test_validate_ok() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("vault")).unwrap();
        let root = dir.path().to_str().unwrap();
        let config = configured(&["--root", root, "--vault", "vault", "build"]);

        assert!(config.validate(&Commands::Build).is_ok());
    }

    #[test]
    fn test_validate_output_inside_vault() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("vault")).unwrap();
        let root = dir.path().to_str().unwrap();
        let config = configured(&[
            "--root", root, "--vault", "vault", "--output", "vault/out", "build",
        ]);

        let err = config.validate(&Commands::Build).unwrap_err();
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn test_validate_same_folders() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("vault")).unwrap();
        let root = dir.path().to_str().unwrap();
        let config = configured(&[
            "--root",
            root,
            "--vault",
            "vault",
            "--player-folder",
            "Shared",
            "--dm-folder",
            "Shared",
            "build",
        ]);

        assert!(config.validate(&Commands::Build).is_err());
    }

    #[test]
    fn test_validate_nested_folder_name() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("vault")).unwrap();
        let root = dir.path().to_str().unwrap();
        let config = configured(&[
            "--root",
            root,
            "--vault",
            "vault",
            "--player-folder",
            "A/B",
            "build",
        ]);

        assert!(config.validate(&Commands::Build).is_err());
    }

    #[test]
    fn test_validate_bundle_inside_output() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("vault")).unwrap();
        let root = dir.path().to_str().unwrap();
        let config = configured(&[
            "--root",
            root,
            "--vault",
            "vault",
            "bundle",
            "--output",
            "public/content/bundles",
        ]);
        let command = Commands::Bundle { output: None };

        assert!(config.validate(&command).is_err());
        // The same layout is fine for a plain build
        assert!(config.validate(&Commands::Build).is_ok());
    }
}
