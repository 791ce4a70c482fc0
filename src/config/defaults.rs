//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [vault] Section Defaults
// ============================================================================

pub mod vault {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn player_folder() -> String {
        "Player Section".into()
    }

    pub fn dm_folder() -> String {
        "DM Section".into()
    }

    pub fn metadata_dir() -> String {
        ".obsidian".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "public/content".into()
    }

    pub fn player_manifest() -> String {
        "player-manifest.json".into()
    }

    pub fn dm_manifest() -> String {
        "dm-manifest.json".into()
    }
}

// ============================================================================
// [bundle] Section Defaults
// ============================================================================

pub mod bundle {
    use std::path::PathBuf;

    pub fn output() -> PathBuf {
        "bundles".into()
    }

    pub fn player_name() -> String {
        "PlayerBundle".into()
    }

    pub fn dm_name() -> String {
        "DMBundle".into()
    }

    pub fn mode_file() -> String {
        "viewer-mode.json".into()
    }
}
