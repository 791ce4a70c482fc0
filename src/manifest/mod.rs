//! Reference graph and view manifests.
//!
//! - **graph**: per-view slug maps, image sets and unresolved references
//! - **emit**: the persisted `{mode, slugMap, images, missing, ...}` artifact
//!
//! # Flow
//!
//! ```text
//! PageRecord[] ──► ReferenceGraph::build() ──► ViewManifest::from_graph() ──► *-manifest.json
//!                     ├── player view (player scope only)
//!                     └── dm view     (player + dm + global)
//! ```

mod emit;
mod graph;

pub use emit::ViewManifest;
pub use graph::{ReferenceGraph, UnresolvedImage, ViewGraph};

use crate::vault::Scope;
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf};
use thiserror::Error;

/// A published view of the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Player,
    Dm,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Player, Mode::Dm];

    /// Whether pages of `scope` belong to this view.
    pub const fn admits(self, scope: Scope) -> bool {
        match self {
            Self::Player => matches!(scope, Scope::Player),
            Self::Dm => true,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Player => "player",
            Self::Dm => "dm",
        })
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to serialize {0} manifest")]
    Serialize(Mode, #[source] serde_json::Error),

    #[error("failed to parse manifest `{path}`")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write manifest `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read manifest `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
