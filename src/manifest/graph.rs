//! Per-view reference graph.
//!
//! A view admits pages by scope (`Mode::admits`). Within a view:
//!
//! - `slug_map`: slug → path, last page in walk order wins on collision
//! - `images`: union of resolved images of the pages left in `slug_map`
//! - `unresolved_links`: link targets of admitted pages with no slug
//! - `unresolved_images`: bare filenames no index entry matched
//! - `duplicate_slugs`: every slug claimed by more than one admitted page

use super::Mode;
use crate::vault::PageRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// An image reference that did not resolve, with the page it came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnresolvedImage {
    pub page: String,
    pub target: String,
}

/// Everything one view can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewGraph {
    pub mode: Mode,
    pub slug_map: BTreeMap<String, String>,
    pub images: BTreeSet<String>,
    pub unresolved_links: BTreeSet<String>,
    pub unresolved_images: BTreeSet<UnresolvedImage>,
    /// Slug → every claiming path in walk order; the last one won.
    pub duplicate_slugs: BTreeMap<String, Vec<String>>,
}

impl ViewGraph {
    pub fn build(mode: Mode, pages: &[PageRecord]) -> Self {
        let mut slug_map = BTreeMap::new();
        let mut claims: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        let mut demand: BTreeSet<&str> = BTreeSet::new();

        let admitted: Vec<&PageRecord> = pages.iter().filter(|p| mode.admits(p.scope)).collect();

        for page in admitted.iter().copied() {
            slug_map.insert(page.slug.clone(), page.relative.clone());
            claims
                .entry(page.slug.as_str())
                .or_default()
                .push(page.relative.as_str());
            demand.extend(page.links.iter().map(String::as_str));
        }

        // Pages that lost a slug collision are not part of the view
        let live: BTreeSet<&str> = slug_map.values().map(String::as_str).collect();
        let live_pages = admitted
            .iter()
            .copied()
            .filter(|page| live.contains(page.relative.as_str()));

        let mut images = BTreeSet::new();
        let mut unresolved_images = BTreeSet::new();
        for page in live_pages {
            images.extend(page.images.iter().cloned());
            unresolved_images.extend(page.unresolved_images.iter().map(|target| UnresolvedImage {
                page: page.relative.clone(),
                target: target.clone(),
            }));
        }

        let unresolved_links = demand
            .into_iter()
            .filter(|target| !slug_map.contains_key(*target))
            .map(str::to_owned)
            .collect();

        let duplicate_slugs = claims
            .into_iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(slug, paths)| {
                (
                    slug.to_owned(),
                    paths.into_iter().map(str::to_owned).collect(),
                )
            })
            .collect();

        Self {
            mode,
            slug_map,
            images,
            unresolved_links,
            unresolved_images,
            duplicate_slugs,
        }
    }
}

/// Both views, built from the same page records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceGraph {
    pub player: ViewGraph,
    pub dm: ViewGraph,
}

impl ReferenceGraph {
    pub fn build(pages: &[PageRecord]) -> Self {
        Self {
            player: ViewGraph::build(Mode::Player, pages),
            dm: ViewGraph::build(Mode::Dm, pages),
        }
    }

    pub fn view(&self, mode: Mode) -> &ViewGraph {
        match mode {
            Mode::Player => &self.player,
            Mode::Dm => &self.dm,
        }
    }
}
