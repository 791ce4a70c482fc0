//! Posix-style relative path helpers.
//!
//! Every path that ends up in a manifest is a vault-relative string with
//! forward slashes, independent of the host platform.

use std::path::{Component, Path};

/// Convert a relative filesystem path into a forward-slash string.
///
/// Returns `None` when a component is not valid UTF-8.
pub fn to_posix(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => parts.push(component.as_os_str().to_str()?),
        }
    }
    Some(parts.join("/"))
}

/// Directory part of a posix relative path (`""` for top-level files).
///
/// `"Player Section/Notes/page.md"` → `"Player Section/Notes"`
pub fn parent_dir(relative: &str) -> &str {
    relative.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Final segment of a posix relative path.
pub fn file_name(relative: &str) -> &str {
    relative.rsplit_once('/').map_or(relative, |(_, name)| name)
}

/// Join `target` onto `dir` and collapse `.` and `..` segments.
///
/// `..` at the vault root is dropped rather than escaping it.
///
/// `join_normalized("Notes/Deep", "../img/a.png")` → `"Notes/img/a.png"`
pub fn join_normalized(dir: &str, target: &str) -> String {
    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();

    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(part),
        }
    }

    segments.join("/")
}

/// Number of leading directory segments two directories share.
pub fn shared_depth(a: &str, b: &str) -> usize {
    a.split('/')
        .filter(|s| !s.is_empty())
        .zip(b.split('/').filter(|s| !s.is_empty()))
        .take_while(|(x, y)| x == y)
        .count()
}
