//! Bare filename → vault paths lookup.

use crate::utils::path::file_name;
use rustc_hash::FxHashMap;

/// Every non-Markdown file in the vault, grouped by bare filename.
///
/// Paths keep walk order inside each group. The index is filled while the
/// vault is scanned and only read afterwards.
#[derive(Debug, Default, Clone)]
pub struct FilenameIndex {
    entries: FxHashMap<String, Vec<String>>,
}

impl FilenameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a posix vault-relative path under its basename.
    pub fn insert(&mut self, relative: &str) {
        self.entries
            .entry(file_name(relative).to_owned())
            .or_default()
            .push(relative.to_owned());
    }

    /// All paths sharing `name`, in walk order. Empty when unknown.
    pub fn candidates(&self, name: &str) -> &[String] {
        self.entries.get(name).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct filenames.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(unused)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for FilenameIndex {
    fn from_iter<I: IntoIterator<Item = &'a str>>(paths: I) -> Self {
        let mut index = Self::new();
        for path in paths {
            index.insert(path);
        }
        index
    }
}
