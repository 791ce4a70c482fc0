//! Vault publishing orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_vault()
//!     │
//!     ├── scan()                ──► entries + FilenameIndex + markdown list
//!     │                             (index complete before any resolution)
//!     │
//!     ├── rayon::join
//!     │       ├── mirror()      ──► output content root
//!     │       └── load_pages()  ──► PageRecord[] (links, resolved images)
//!     │
//!     ├── ReferenceGraph::build()
//!     │
//!     └── ViewManifest::write() ──► player-manifest.json, dm-manifest.json
//! ```
//!
//! Any I/O failure aborts the run; a half-written output is never reported
//! as a successful build.

use crate::{
    check::{Findings, mode_module},
    config::LoreConfig,
    log,
    manifest::{Mode, ReferenceGraph, ViewManifest},
    utils::log::ProgressBars,
    vault::{load_pages, scan},
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Mirror the vault into the output content root and write both manifests.
///
/// Returns the reference graph the manifests were written from.
pub fn build_vault(config: &LoreConfig) -> Result<ReferenceGraph> {
    let vault = config.vault_root()?;
    let output = &config.build.output;
    let folders = config.scope_folders();

    log!("scan"; "{}", vault.display());
    let scan = scan(vault, &config.vault.metadata_dir)
        .with_context(|| format!("Failed to scan vault: {}", vault.display()))?;
    log!(
        "scan";
        "{} files, {} pages, {} asset names",
        scan.file_count(),
        scan.markdown.len(),
        scan.index.len()
    );

    clear_output(output)?;

    let progress = ProgressBars::new(&[
        ("mirror", scan.file_count()),
        ("pages", scan.markdown.len()),
    ]);
    let (mirror_result, pages_result) = rayon::join(
        || scan.mirror(output, || progress.inc_by_name("mirror")),
        || load_pages(&scan, &folders, || progress.inc_by_name("pages")),
    );
    progress.finish();

    mirror_result.with_context(|| format!("Failed to mirror vault into {}", output.display()))?;
    let pages = pages_result.context("Failed to read vault pages")?;

    let graph = ReferenceGraph::build(&pages);
    Findings::collect(&pages, &graph).log_warnings();

    for mode in Mode::ALL {
        let view = graph.view(mode);
        let path = config.manifest_path(mode);
        ViewManifest::from_graph(view, &folders).write(&path)?;
        log!(
            mode_module(mode);
            "{} pages, {} images, {} missing",
            view.slug_map.len(),
            view.images.len(),
            view.unresolved_links.len()
        );
    }

    log!("build"; "done");
    Ok(graph)
}

/// Remove the previous output so deleted vault files do not linger.
fn clear_output(output: &Path) -> Result<()> {
    if output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        config: LoreConfig,
    }

    impl Fixture {
        fn new(files: &[(&str, &str)]) -> Self {
            let dir = TempDir::new().unwrap();
            let vault = dir.path().join("vault");
            for (relative, content) in files {
                let path = vault.join(relative);
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(path, content).unwrap();
            }
            fs::create_dir_all(&vault).unwrap();

            let mut config = LoreConfig::default();
            config.vault.root = Some(vault);
            config.build.output = dir.path().join("public/content");
            Self { _dir: dir, config }
        }

        fn manifest(&self, mode: Mode) -> ViewManifest {
            ViewManifest::read(&self.config.manifest_path(mode)).unwrap()
        }

        fn output(&self) -> &Path {
            &self.config.build.output
        }
    }

    // ------------------------------------------------------------------------
    // Scenarios
    // ------------------------------------------------------------------------

    #[test]
    fn test_player_link_to_dm_page() {
        let fixture = Fixture::new(&[
            ("Player Section/Intro.md", "Head to [[Town Square]]."),
            ("DM Section/Town Square.md", "Ambush!"),
        ]);
        build_vault(&fixture.config).unwrap();

        let player = fixture.manifest(Mode::Player);
        let dm = fixture.manifest(Mode::Dm);
        assert!(player.missing.contains(&"Town Square".to_string()));
        assert_eq!(dm.slug_map["Town Square"], "DM Section/Town Square.md");
        assert!(!dm.missing.contains(&"Town Square".to_string()));
    }

    #[test]
    fn test_unique_bare_image_resolves_anywhere() {
        let fixture = Fixture::new(&[
            ("Player Section/Intro.md", "![[sigil.png]]"),
            ("Assets/sigil.png", "png"),
        ]);
        build_vault(&fixture.config).unwrap();

        assert_eq!(fixture.manifest(Mode::Player).images, ["Assets/sigil.png"]);
    }

    #[test]
    fn test_ambiguous_bare_image_prefers_same_subtree() {
        let fixture = Fixture::new(&[
            ("Player Section/Art/sigil.png", "player"),
            ("DM Section/Art/sigil.png", "dm"),
            ("Player Section/Notes/page.md", "![[sigil.png]]"),
        ]);
        let graph = build_vault(&fixture.config).unwrap();

        assert_eq!(
            graph.player.images.iter().collect::<Vec<_>>(),
            ["Player Section/Art/sigil.png"]
        );
    }

    #[test]
    fn test_global_page_only_in_dm() {
        let fixture = Fixture::new(&[("Global/Lore.md", "Old gods.")]);
        build_vault(&fixture.config).unwrap();

        assert!(fixture.manifest(Mode::Dm).slug_map.contains_key("Lore"));
        assert!(!fixture.manifest(Mode::Player).slug_map.contains_key("Lore"));
    }

    // ------------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------------

    #[test]
    fn test_build_is_idempotent() {
        let fixture = Fixture::new(&[
            ("Player Section/Intro.md", "[[Shop]] [[Town Square]] ![[sigil.png]]"),
            ("Player Section/Shop.md", "[[Intro]] ![map](../Assets/map.png)"),
            ("DM Section/Town Square.md", "[[Villain]]"),
            ("Assets/sigil.png", "a"),
            ("Assets/map.png", "b"),
        ]);

        build_vault(&fixture.config).unwrap();
        let first: Vec<_> = Mode::ALL
            .iter()
            .map(|mode| fs::read(fixture.config.manifest_path(*mode)).unwrap())
            .collect();

        build_vault(&fixture.config).unwrap();
        let second: Vec<_> = Mode::ALL
            .iter()
            .map(|mode| fs::read(fixture.config.manifest_path(*mode)).unwrap())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_mirror_excludes_metadata_and_stale_files() {
        let fixture = Fixture::new(&[
            ("Player Section/Intro.md", "hi"),
            (".obsidian/app.json", "{}"),
        ]);
        fs::create_dir_all(fixture.output()).unwrap();
        fs::write(fixture.output().join("stale.md"), "old").unwrap();

        build_vault(&fixture.config).unwrap();

        assert_eq!(
            fs::read_to_string(fixture.output().join("Player Section/Intro.md")).unwrap(),
            "hi"
        );
        assert!(!fixture.output().join(".obsidian").exists());
        assert!(!fixture.output().join("stale.md").exists());
        assert!(fixture.output().join("player-manifest.json").is_file());
        assert!(fixture.output().join("dm-manifest.json").is_file());
    }

    #[test]
    fn test_missing_vault_root_is_configuration_error() {
        let config = LoreConfig::default();
        let err = build_vault(&config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingVaultRoot)
        ));
    }

    #[test]
    fn test_absent_vault_fails_without_output() {
        let fixture = Fixture::new(&[]);
        let mut config = fixture.config.clone();
        config.vault.root = Some(fixture.output().join("../absent"));

        assert!(build_vault(&config).is_err());
        assert!(!config.manifest_path(Mode::Dm).exists());
    }
}
