//! Reference problems a vault author can fix.
//!
//! `build` logs these as warnings; `check` prints them without writing
//! anything and can fail on them with `--strict`.

use crate::{
    config::LoreConfig,
    log,
    manifest::{Mode, ReferenceGraph, UnresolvedImage},
    vault::{AmbiguousImage, PageRecord, load_pages, scan},
};
use anyhow::{Context, Result, bail};

/// Everything unresolved, ambiguous or colliding after one pipeline run.
#[derive(Debug, Default)]
pub struct Findings<'a> {
    pub missing: Vec<(Mode, &'a str)>,
    pub unresolved_images: Vec<&'a UnresolvedImage>,
    pub ambiguous_images: Vec<(&'a str, &'a AmbiguousImage)>,
    pub duplicate_slugs: Vec<(&'a str, &'a [String])>,
}

impl<'a> Findings<'a> {
    /// Collect findings. The dm view admits every page, so image and slug
    /// problems are read from it; missing links are per view.
    pub fn collect(pages: &'a [PageRecord], graph: &'a ReferenceGraph) -> Self {
        let missing = Mode::ALL
            .into_iter()
            .flat_map(|mode| {
                graph
                    .view(mode)
                    .unresolved_links
                    .iter()
                    .map(move |target| (mode, target.as_str()))
            })
            .collect();

        let ambiguous_images = pages
            .iter()
            .flat_map(|page| {
                page.ambiguous_images
                    .iter()
                    .map(|image| (page.relative.as_str(), image))
            })
            .collect();

        Self {
            missing,
            unresolved_images: graph.dm.unresolved_images.iter().collect(),
            ambiguous_images,
            duplicate_slugs: graph
                .dm
                .duplicate_slugs
                .iter()
                .map(|(slug, paths)| (slug.as_str(), paths.as_slice()))
                .collect(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
            && self.unresolved_images.is_empty()
            && self.ambiguous_images.is_empty()
            && self.duplicate_slugs.is_empty()
    }

    /// Log image and slug problems as warnings.
    ///
    /// Missing links are expected in a partially written vault and are only
    /// counted; `check` lists them.
    pub fn log_warnings(&self) {
        for (page, image) in &self.ambiguous_images {
            log!(
                "warn";
                "{page}: `{}` matches {} files, using `{}`",
                image.target,
                image.candidates.len(),
                image.chosen
            );
        }
        for image in &self.unresolved_images {
            log!("warn"; "{}: image `{}` not found", image.page, image.target);
        }
        for (slug, paths) in &self.duplicate_slugs {
            log!(
                "warn";
                "slug `{slug}` claimed by {} pages, `{}` wins",
                paths.len(),
                paths.last().map(String::as_str).unwrap_or_default()
            );
        }
    }

    fn log_missing(&self) {
        for (mode, target) in &self.missing {
            log!(mode_module(*mode); "missing page `{target}`");
        }
    }
}

/// Log prefix for a view.
pub fn mode_module(mode: Mode) -> &'static str {
    match mode {
        Mode::Player => "player",
        Mode::Dm => "dm",
    }
}

/// Run scan, extraction and graph building without touching the output.
pub fn check_vault(config: &LoreConfig, strict: bool) -> Result<()> {
    let vault = config.vault_root()?;
    let folders = config.scope_folders();

    let scan = scan(vault, &config.vault.metadata_dir)
        .with_context(|| format!("Failed to scan vault: {}", vault.display()))?;
    let pages = load_pages(&scan, &folders, || {})?;
    let graph = ReferenceGraph::build(&pages);

    for mode in Mode::ALL {
        let view = graph.view(mode);
        log!(
            mode_module(mode);
            "{} pages, {} images, {} missing",
            view.slug_map.len(),
            view.images.len(),
            view.unresolved_links.len()
        );
    }

    let findings = Findings::collect(&pages, &graph);
    findings.log_missing();
    findings.log_warnings();

    if findings.is_clean() {
        log!("check"; "no problems found");
    } else if strict {
        bail!(
            "{} missing links, {} unresolved images, {} ambiguous images, {} duplicate slugs",
            findings.missing.len(),
            findings.unresolved_images.len(),
            findings.ambiguous_images.len(),
            findings.duplicate_slugs.len()
        );
    }

    Ok(())
}
