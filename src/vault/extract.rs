//! Wiki-link and image-reference extraction for the vault's Markdown dialect.
//!
//! | Syntax                     | Produces                  |
//! |----------------------------|---------------------------|
//! | `[[Page]]`                 | link `Page`               |
//! | `[[Page#Section\|Alias]]`  | link `Page`               |
//! | `![[map.png\|300]]`        | link and image `map.png`  |
//! | `![alt](Art/map.png)`      | image `Art/map.png`       |
//!
//! Matching is regex based. Callers only see `extract_links_and_images`.

use regex::Regex;
use std::sync::LazyLock;

/// `[[inner]]`, embeds included. The inner text runs to the first `]`.
static RE_WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

/// Wiki embeds and Markdown images in a single pass, so the result keeps
/// document order across both syntaxes.
static RE_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[\[(?P<embed>[^\]]+)\]\]|!\[[^\]]*\]\((?P<markdown>[^)]+)\)").unwrap()
});

/// Raw references found in one Markdown document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Page targets with alias and section removed, in document order.
    pub links: Vec<String>,
    /// Unresolved image targets, in document order, duplicates kept.
    pub images: Vec<String>,
}

/// Extract wiki-link targets and raw image references from `text`.
///
/// Every `[[...]]` pair is a link, so an embed (`![[...]]`) is both a link
/// and an image reference. A link that is empty once alias and section are
/// removed (`[[#Heading]]`) points into the same page and is dropped.
pub fn extract_links_and_images(text: &str) -> Extracted {
    let links = RE_WIKI_LINK
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|inner| wiki_target(inner.as_str())))
        .filter(|target| !target.is_empty())
        .map(str::to_owned)
        .collect();

    let images = RE_IMAGE
        .captures_iter(text)
        .filter_map(|caps| {
            if let Some(embed) = caps.name("embed") {
                Some(embed_target(embed.as_str()))
            } else {
                caps.name("markdown").map(|m| m.as_str().trim())
            }
        })
        .filter(|target| !target.is_empty())
        .map(str::to_owned)
        .collect();

    Extracted { links, images }
}

/// `Page#Section|Alias` → `Page`
fn wiki_target(inner: &str) -> &str {
    let before_alias = inner.split_once('|').map_or(inner, |(target, _)| target);
    let before_section = before_alias
        .split_once('#')
        .map_or(before_alias, |(target, _)| target);
    before_section.trim()
}

/// `map.png|300` → `map.png`
fn embed_target(inner: &str) -> &str {
    inner
        .split_once('|')
        .map_or(inner, |(target, _)| target)
        .trim()
}
