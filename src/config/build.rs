//! `[build]` section configuration.
//!
//! Output locations for the mirrored vault and the two view manifests.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in lorekeep.toml.
///
/// # Example
/// ```toml
/// [build]
/// output = "public/content"
/// player_manifest = "player-manifest.json"
/// dm_manifest = "dm-manifest.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Output content root. Wiped and rebuilt on every run.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Player manifest file name, written inside `output`.
    #[serde(default = "defaults::build::player_manifest")]
    #[educe(Default = defaults::build::player_manifest())]
    pub player_manifest: String,

    /// Dm manifest file name, written inside `output`.
    #[serde(default = "defaults::build::dm_manifest")]
    #[educe(Default = defaults::build::dm_manifest())]
    pub dm_manifest: String,
}
