//! Vault ingestion: everything between the vault directory and the per-page
//! records the reference graph is built from.
//!
//! - **walk**: scan the vault, mirror it, build the filename index
//! - **index**: bare filename → vault paths
//! - **extract**: wiki-links and raw image references from Markdown text
//! - **resolve**: raw image reference → vault path
//! - **scope**: player / dm / global classification
//! - **page**: one resolved record per Markdown file

mod extract;
mod index;
mod page;
mod resolve;
mod scope;
mod walk;

pub use extract::{Extracted, extract_links_and_images};
pub use index::FilenameIndex;
pub use page::{AmbiguousImage, PageRecord, load_pages, slugify};
pub use resolve::{ImageResolution, resolve_image};
pub use scope::{Scope, ScopeFolders};
pub use walk::{VaultFile, VaultScan, scan};

use std::path::PathBuf;
use thiserror::Error;

/// Fatal I/O failures while reading or mirroring the vault.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("failed to walk vault")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy `{from}` to `{to}`")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory `{path}`")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path is not valid UTF-8: `{0}`")]
    NonUtf8Path(PathBuf),
}
