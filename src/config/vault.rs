//! `[vault]` section configuration.
//!
//! Where the vault lives and which top-level folders decide page visibility.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[vault]` section in lorekeep.toml.
///
/// # Example
/// ```toml
/// [vault]
/// root = "~/Documents/Campaign"
/// player_folder = "Player Section"
/// dm_folder = "DM Section"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Vault directory. Required; `~` is expanded.
    #[serde(default = "defaults::vault::root")]
    #[educe(Default = defaults::vault::root())]
    pub root: Option<PathBuf>,

    /// Top-level folder whose pages are visible to players.
    #[serde(default = "defaults::vault::player_folder")]
    #[educe(Default = defaults::vault::player_folder())]
    pub player_folder: String,

    /// Top-level folder whose pages are visible to the dm only.
    #[serde(default = "defaults::vault::dm_folder")]
    #[educe(Default = defaults::vault::dm_folder())]
    pub dm_folder: String,

    /// Authoring-tool metadata directory, skipped at any depth.
    #[serde(default = "defaults::vault::metadata_dir")]
    #[educe(Default = defaults::vault::metadata_dir())]
    pub metadata_dir: String,
}
