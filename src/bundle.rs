//! Per-view publishable directories.
//!
//! ```text
//! <bundle.output>/
//! ├── PlayerBundle/
//! │   ├── viewer-mode.json     {"mode": "player"}
//! │   └── content/             mirror pruned to the player manifest
//! └── DMBundle/
//!     ├── viewer-mode.json     {"mode": "dm"}
//!     └── content/             full mirror
//! ```

use crate::{
    check::mode_module,
    config::LoreConfig,
    log,
    manifest::{Mode, ViewManifest},
    utils::{log::ProgressBars, path::to_posix},
    vault::scan,
};
use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Contents of the mode file the viewer reads at startup.
#[derive(Debug, Serialize)]
struct ModeFile {
    mode: Mode,
}

/// Assemble one bundle per view from an already built output content root.
pub fn bundle_vault(config: &LoreConfig) -> Result<()> {
    let content = &config.build.output;
    let files = scan(content, &config.vault.metadata_dir)
        .with_context(|| format!("Failed to scan build output: {}", content.display()))?;

    let bars: Vec<_> = Mode::ALL
        .iter()
        .map(|mode| (mode_module(*mode), files.file_count()))
        .collect();
    let progress = ProgressBars::new(&bars);

    for mode in Mode::ALL {
        let bundle = bundle_dir(config, mode);
        if bundle.exists() {
            fs::remove_dir_all(&bundle)
                .with_context(|| format!("Failed to remove old bundle: {}", bundle.display()))?;
        }

        let dest = bundle.join("content");
        files
            .mirror(&dest, || progress.inc_by_name(mode_module(mode)))
            .with_context(|| format!("Failed to copy content into {}", dest.display()))?;
        write_mode_file(&bundle.join(&config.bundle.mode_file), mode)?;
    }
    progress.finish();

    let player = ViewManifest::read(&config.manifest_path(Mode::Player))?;
    let removed = prune_to_manifest(
        &bundle_dir(config, Mode::Player).join("content"),
        &player,
        &config.build.player_manifest,
    )?;
    log!("player"; "pruned {removed} files not visible to players");

    for mode in Mode::ALL {
        log!("bundle"; "{}", bundle_dir(config, mode).display());
    }
    Ok(())
}

fn bundle_dir(config: &LoreConfig, mode: Mode) -> PathBuf {
    let name = match mode {
        Mode::Player => &config.bundle.player_name,
        Mode::Dm => &config.bundle.dm_name,
    };
    config.bundle.output.join(name)
}

fn write_mode_file(path: &Path, mode: Mode) -> Result<()> {
    let json = serde_json::to_string_pretty(&ModeFile { mode })?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Delete every file under `content` the manifest does not reference, then
/// every directory left empty. Returns the number of files removed.
///
/// Markdown survives iff it is a `slugMap` value; other files iff they are
/// listed in `images`. `manifest_name` at the content root always survives.
fn prune_to_manifest(content: &Path, manifest: &ViewManifest, manifest_name: &str) -> Result<usize> {
    let pages: FxHashSet<&str> = manifest.slug_map.values().map(String::as_str).collect();
    let images: FxHashSet<&str> = manifest.images.iter().map(String::as_str).collect();

    let mut removed = 0;
    for entry in WalkDir::new(content).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let relative = path
            .strip_prefix(content)
            .ok()
            .and_then(to_posix)
            .with_context(|| format!("Invalid bundle path: {}", path.display()))?;

        let keep = if relative == manifest_name {
            true
        } else if is_markdown(path) {
            pages.contains(relative.as_str())
        } else {
            images.contains(relative.as_str())
        };

        if !keep {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            removed += 1;
        }
    }

    remove_empty_dirs(content)?;
    Ok(removed)
}

/// Remove empty directories below `root`, children before parents.
fn remove_empty_dirs(root: &Path) -> Result<()> {
    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        if fs::read_dir(path)?.next().is_none() {
            fs::remove_dir(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}
