//! Image reference resolution against the vault layout.

use super::FilenameIndex;
use crate::utils::path::{join_normalized, parent_dir, shared_depth};

/// Outcome of resolving one raw image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageResolution {
    /// `http://` or `https://`: not part of the local graph.
    External,
    /// Target contained a `/` and was joined onto the page directory.
    /// The file is not checked for existence.
    Path(String),
    /// Bare filename with exactly one index entry.
    Indexed(String),
    /// Bare filename with several index entries; `chosen` is the heuristic pick.
    Ambiguous {
        chosen: String,
        candidates: Vec<String>,
    },
    /// Bare filename with no index entry.
    Unresolved,
}

impl ImageResolution {
    /// The resolved vault path, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Path(path) | Self::Indexed(path) => Some(path),
            Self::Ambiguous { chosen, .. } => Some(chosen),
            Self::External | Self::Unresolved => None,
        }
    }
}

/// Resolve `target` as referenced from a page living in `page_dir`.
///
/// Bare filenames go through the index. Among several candidates the one
/// sharing the most leading directories with `page_dir` wins, first in walk
/// order on a tie. This is a heuristic: identical names in unrelated
/// subtrees can still pick the wrong file.
pub fn resolve_image(target: &str, page_dir: &str, index: &FilenameIndex) -> ImageResolution {
    if target.starts_with("http://") || target.starts_with("https://") {
        return ImageResolution::External;
    }

    let cleaned = target.strip_prefix("./").unwrap_or(target);
    let cleaned = cleaned.trim_start_matches('/');
    if cleaned.is_empty() {
        return ImageResolution::Unresolved;
    }

    if cleaned.contains('/') {
        return ImageResolution::Path(join_normalized(page_dir, cleaned));
    }

    match index.candidates(cleaned) {
        [] => ImageResolution::Unresolved,
        [only] => ImageResolution::Indexed(only.clone()),
        candidates => ImageResolution::Ambiguous {
            chosen: closest_candidate(candidates, page_dir).to_owned(),
            candidates: candidates.to_vec(),
        },
    }
}

/// Candidate whose directory shares the longest prefix with `page_dir`.
fn closest_candidate<'a>(candidates: &'a [String], page_dir: &str) -> &'a str {
    let mut best = &candidates[0];
    let mut best_depth = shared_depth(parent_dir(best), page_dir);
    for candidate in &candidates[1..] {
        let depth = shared_depth(parent_dir(candidate), page_dir);
        if depth > best_depth {
            best = candidate;
            best_depth = depth;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(paths: &[&str]) -> FilenameIndex {
        paths.iter().copied().collect()
    }

    #[test]
    fn test_external_targets_skipped() {
        let index = index(&[]);
        assert_eq!(
            resolve_image("https://example.com/a.png", "Notes", &index),
            ImageResolution::External
        );
        assert_eq!(
            resolve_image("http://example.com/a.png", "Notes", &index),
            ImageResolution::External
        );
    }

    #[test]
    fn test_path_target_joined_to_page_dir() {
        let index = index(&[]);
        assert_eq!(
            resolve_image("Art/map.png", "Player Section/Notes", &index),
            ImageResolution::Path("Player Section/Notes/Art/map.png".into())
        );
        assert_eq!(
            resolve_image("../Art/map.png", "Player Section/Notes", &index),
            ImageResolution::Path("Player Section/Art/map.png".into())
        );
        assert_eq!(
            resolve_image("./img/a.png", "", &index),
            ImageResolution::Path("img/a.png".into())
        );
    }

    #[test]
    fn test_leading_slash_stripped_then_joined() {
        let index = index(&[]);
        assert_eq!(
            resolve_image("/Art/map.png", "Notes", &index),
            ImageResolution::Path("Notes/Art/map.png".into())
        );
    }

    #[test]
    fn test_path_target_does_not_consult_index() {
        let index = index(&["Elsewhere/Art/map.png"]);
        assert_eq!(
            resolve_image("Art/map.png", "Notes", &index).path(),
            Some("Notes/Art/map.png")
        );
    }

    #[test]
    fn test_bare_filename_single_candidate() {
        let index = index(&["Assets/sigil.png"]);
        assert_eq!(
            resolve_image("sigil.png", "Player Section", &index),
            ImageResolution::Indexed("Assets/sigil.png".into())
        );
        assert_eq!(
            resolve_image("./sigil.png", "Player Section", &index).path(),
            Some("Assets/sigil.png")
        );
    }

    #[test]
    fn test_bare_filename_unresolved() {
        let index = index(&["Assets/sigil.png"]);
        assert_eq!(
            resolve_image("ghost.png", "Notes", &index),
            ImageResolution::Unresolved
        );
        assert_eq!(resolve_image("./", "Notes", &index), ImageResolution::Unresolved);
    }

    #[test]
    fn test_ambiguous_prefers_same_subtree() {
        // Walk order puts the DM copy first
        let index = index(&["DM Section/Art/sigil.png", "Player Section/Art/sigil.png"]);
        let resolution = resolve_image("sigil.png", "Player Section/Notes", &index);

        assert_eq!(resolution.path(), Some("Player Section/Art/sigil.png"));
        match resolution {
            ImageResolution::Ambiguous { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_ambiguous_prefers_page_directory() {
        let index = index(&["Lore/sigil.png", "Lore/Gods/sigil.png"]);
        assert_eq!(
            resolve_image("sigil.png", "Lore/Gods", &index).path(),
            Some("Lore/Gods/sigil.png")
        );
    }

    #[test]
    fn test_ambiguous_tie_takes_first_in_index_order() {
        let index = index(&["A/sigil.png", "B/sigil.png"]);
        assert_eq!(
            resolve_image("sigil.png", "C", &index).path(),
            Some("A/sigil.png")
        );
        assert_eq!(resolve_image("sigil.png", "", &index).path(), Some("A/sigil.png"));
    }
}
