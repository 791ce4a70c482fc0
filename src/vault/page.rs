//! Per-page records: slug, scope, links and resolved images.

use super::{
    FilenameIndex, ImageResolution, Scope, ScopeFolders, VaultError, VaultFile, VaultScan,
    extract_links_and_images, resolve_image,
};
use crate::utils::path::{file_name, parent_dir};
use rayon::prelude::*;
use std::{collections::BTreeSet, fs};

/// A bare-filename image that matched several vault files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousImage {
    pub target: String,
    pub chosen: String,
    pub candidates: Vec<String>,
}

/// One Markdown file after extraction and image resolution.
///
/// The page text itself is not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Posix path relative to the vault root.
    pub relative: String,
    pub slug: String,
    pub scope: Scope,
    /// Wiki-link targets in document order, duplicates kept.
    pub links: Vec<String>,
    /// Resolved image paths.
    pub images: BTreeSet<String>,
    /// Bare filenames with no index entry.
    pub unresolved_images: BTreeSet<String>,
    pub ambiguous_images: Vec<AmbiguousImage>,
}

impl PageRecord {
    /// Build a record from the page text.
    pub fn from_text(
        relative: &str,
        text: &str,
        folders: &ScopeFolders,
        index: &FilenameIndex,
    ) -> Self {
        let extracted = extract_links_and_images(text);
        let page_dir = parent_dir(relative);

        let mut images = BTreeSet::new();
        let mut unresolved_images = BTreeSet::new();
        let mut ambiguous_images: Vec<AmbiguousImage> = Vec::new();

        for target in extracted.images {
            let resolution = resolve_image(&target, page_dir, index);
            if let Some(path) = resolution.path() {
                images.insert(path.to_owned());
            }

            match resolution {
                ImageResolution::Unresolved => {
                    unresolved_images.insert(target);
                }
                ImageResolution::Ambiguous { chosen, candidates }
                    if !ambiguous_images.iter().any(|seen| seen.target == target) =>
                {
                    ambiguous_images.push(AmbiguousImage {
                        target,
                        chosen,
                        candidates,
                    });
                }
                _ => {}
            }
        }

        Self {
            relative: relative.to_owned(),
            slug: slugify(file_name(relative)),
            scope: folders.classify(relative),
            links: extracted.links,
            images,
            unresolved_images,
            ambiguous_images,
        }
    }

    /// Read `file` from disk and build its record.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; an unreadable file is fatal.
    pub fn load(
        file: &VaultFile,
        folders: &ScopeFolders,
        index: &FilenameIndex,
    ) -> Result<Self, VaultError> {
        let bytes = fs::read(&file.source).map_err(|source| VaultError::Read {
            path: file.source.clone(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(Self::from_text(&file.relative, &text, folders, index))
    }
}

/// Build records for every Markdown file of `scan`, keeping walk order.
pub fn load_pages(
    scan: &VaultScan,
    folders: &ScopeFolders,
    on_loaded: impl Fn() + Sync,
) -> Result<Vec<PageRecord>, VaultError> {
    scan.markdown
        .par_iter()
        .map(|file| {
            let page = PageRecord::load(file, folders, &scan.index)?;
            on_loaded();
            Ok(page)
        })
        .collect()
}

/// Page slug from a filename: drop `.md` (any case), `_` → space, trim.
///
/// `"01_Regions.md"` → `"01 Regions"`
pub fn slugify(filename: &str) -> String {
    let stem = match filename.len().checked_sub(3) {
        Some(cut)
            if filename.is_char_boundary(cut) && filename[cut..].eq_ignore_ascii_case(".md") =>
        {
            &filename[..cut]
        }
        _ => filename,
    };
    stem.replace('_', " ").trim().to_owned()
}
