//! `[bundle]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[bundle]` section in lorekeep.toml - per-view publishable directories.
///
/// # Example
/// ```toml
/// [bundle]
/// output = "bundles"
/// player_name = "PlayerBundle"
/// dm_name = "DMBundle"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BundleConfig {
    /// Directory receiving one subdirectory per view.
    #[serde(default = "defaults::bundle::output")]
    #[educe(Default = defaults::bundle::output())]
    pub output: PathBuf,

    #[serde(default = "defaults::bundle::player_name")]
    #[educe(Default = defaults::bundle::player_name())]
    pub player_name: String,

    #[serde(default = "defaults::bundle::dm_name")]
    #[educe(Default = defaults::bundle::dm_name())]
    pub dm_name: String,

    /// Marker file telling the viewer which mode it runs in.
    #[serde(default = "defaults::bundle::mode_file")]
    #[educe(Default = defaults::bundle::mode_file())]
    pub mode_file: String,
}

#[cfg(test)]
mod tests {
    use super::super::LoreConfig;
    use std::path::PathBuf;

    #[test]
    fn test_bundle_config() {
        let config = r#"
            [bundle]
            output = "dist"
            player_name = "Players"
        "#;
        let config: LoreConfig = toml::from_str(config).unwrap();

        assert_eq!(config.bundle.output, PathBuf::from("dist"));
        assert_eq!(config.bundle.player_name, "Players");
        assert_eq!(config.bundle.dm_name, "DMBundle");
        assert_eq!(config.bundle.mode_file, "viewer-mode.json");
    }
}
