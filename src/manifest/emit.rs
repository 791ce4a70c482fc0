//! Manifest serialization.
//!
//! One JSON file per view, fully rewritten on every run. Every collection is
//! ordered, so an unchanged vault produces byte-identical output.

use super::{ManifestError, Mode, UnresolvedImage, ViewGraph};
use crate::vault::ScopeFolders;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

/// The persisted artifact for one view.
///
/// `missing` holds the unresolved page links; `unresolved_images` the image
/// references that matched nothing. The presentation layer renders anything
/// not in `slug_map` as a dangling reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewManifest {
    pub mode: Mode,
    pub player_folder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dm_folder: Option<String>,
    pub slug_map: BTreeMap<String, String>,
    pub images: Vec<String>,
    pub missing: Vec<String>,
    #[serde(default)]
    pub unresolved_images: Vec<UnresolvedImage>,
    #[serde(default)]
    pub duplicate_slugs: BTreeMap<String, Vec<String>>,
}

impl ViewManifest {
    pub fn from_graph(view: &ViewGraph, folders: &ScopeFolders) -> Self {
        Self {
            mode: view.mode,
            player_folder: folders.player().to_owned(),
            dm_folder: match view.mode {
                Mode::Player => None,
                Mode::Dm => Some(folders.dm().to_owned()),
            },
            slug_map: view.slug_map.clone(),
            images: view.images.iter().cloned().collect(),
            missing: view.unresolved_links.iter().cloned().collect(),
            unresolved_images: view.unresolved_images.iter().cloned().collect(),
            duplicate_slugs: view.duplicate_slugs.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, ManifestError> {
        serde_json::to_string_pretty(self).map_err(|err| ManifestError::Serialize(self.mode, err))
    }

    /// Write to `path`, replacing whatever was there.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
