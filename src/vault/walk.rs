//! Vault scan and mirror copy.
//!
//! # Phases
//!
//! ```text
//! scan()  ──► entries (walk order) ──► mirror()  ──► output content root
//!   │
//!   ├──► FilenameIndex   (every non-Markdown file, by basename)
//!   └──► markdown list   (deferred for extraction)
//! ```
//!
//! The index is complete when `scan` returns, so image resolution never
//! depends on the order files were visited in.

use super::{FilenameIndex, VaultError};
use crate::utils::path::to_posix;
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::{DirEntry, WalkDir};

/// A single file or directory under the vault root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFile {
    /// Posix path relative to the vault root.
    pub relative: String,
    /// Absolute source path.
    pub source: PathBuf,
    pub is_dir: bool,
}

impl VaultFile {
    /// `.md` extension, compared case-insensitively.
    pub fn is_markdown(&self) -> bool {
        !self.is_dir
            && self
                .source
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
    }
}

/// Result of walking the vault once.
#[derive(Debug)]
pub struct VaultScan {
    /// Every directory and file except the metadata directory, in walk order.
    pub entries: Vec<VaultFile>,
    /// Non-Markdown files by basename.
    pub index: FilenameIndex,
    /// Markdown files in walk order, for the extraction pass.
    pub markdown: Vec<VaultFile>,
}

impl VaultScan {
    /// Number of regular files (what `mirror` copies).
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.is_dir).count()
    }

    /// Copy every scanned file byte-for-byte below `output`.
    ///
    /// Directories are created in walk order first; files are then copied in
    /// parallel. `on_copied` runs once per file. Any failure aborts the copy.
    pub fn mirror(&self, output: &Path, on_copied: impl Fn() + Sync) -> Result<(), VaultError> {
        create_dir(output)?;
        for dir in self.entries.iter().filter(|entry| entry.is_dir) {
            create_dir(&output.join(&dir.relative))?;
        }

        self.entries
            .par_iter()
            .filter(|entry| !entry.is_dir)
            .try_for_each(|file| {
                let dest = output.join(&file.relative);
                fs::copy(&file.source, &dest).map_err(|source| VaultError::Copy {
                    from: file.source.clone(),
                    to: dest,
                    source,
                })?;
                on_copied();
                Ok(())
            })
    }
}

/// Walk `root` depth-first in file-name order, skipping every directory
/// named `metadata_dir`.
pub fn scan(root: &Path, metadata_dir: &str) -> Result<VaultScan, VaultError> {
    let mut entries = Vec::new();
    let mut index = FilenameIndex::new();
    let mut markdown = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_metadata_dir(entry, metadata_dir));

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(root)
            .ok()
            .and_then(to_posix)
            .ok_or_else(|| VaultError::NonUtf8Path(entry.path().to_path_buf()))?;

        let file = VaultFile {
            relative,
            source: entry.path().to_path_buf(),
            is_dir: entry.file_type().is_dir(),
        };

        if file.is_markdown() {
            markdown.push(file.clone());
        } else if !file.is_dir {
            index.insert(&file.relative);
        }
        entries.push(file);
    }

    Ok(VaultScan {
        entries,
        index,
        markdown,
    })
}

fn is_metadata_dir(entry: &DirEntry, metadata_dir: &str) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_str() == Some(metadata_dir)
}

fn create_dir(path: &Path) -> Result<(), VaultError> {
    fs::create_dir_all(path).map_err(|source| VaultError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
