use std::collections::BTreeMap;

use relative_path::{RelativePath, RelativePathBuf};

/// A stored article record discovered in the articles directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleEntry {
    pub relative_path: RelativePathBuf,
    pub display_name: String,
}

/// Sorted listing of stored article records.
///
/// Uses BTreeMap for automatic sorted ordering by path.
#[derive(Debug, Default)]
pub struct ArticleIndex {
    entries: BTreeMap<RelativePathBuf, ArticleEntry>,
}

impl ArticleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single record; display name is the file stem
    pub fn add_entry(&mut self, relative_path: RelativePathBuf) {
        let display_name = relative_path
            .file_stem()
            .unwrap_or(relative_path.as_str())
            .to_string();
        self.entries.insert(
            relative_path.clone(),
            ArticleEntry {
                relative_path,
                display_name,
            },
        );
    }

    /// All entries, sorted by path
    pub fn entries(&self) -> impl Iterator<Item = &ArticleEntry> {
        self.entries.values()
    }

    pub fn get(&self, index: usize) -> Option<&ArticleEntry> {
        self.entries.values().nth(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the removed entry if it existed
    pub fn remove_entry(&mut self, relative_path: &RelativePath) -> Option<ArticleEntry> {
        self.entries.remove(relative_path)
    }
}
