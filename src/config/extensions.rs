//! The allow-list of auxiliary file extensions copied alongside a binary.

use std::{collections::BTreeSet, path::Path};

/// Extensions copied by default: program images, `meta.xml`, audio, images and fonts.
pub const DEFAULT_EXTENSIONS: &[&str] = &["dol", "xml", "mp3", "png", "jpg", "jpeg", "ttf"];

/// An immutable, case-insensitive set of file extensions.
///
/// Entries are stored lowercase and without a leading dot, so `".PNG"`,
/// `"png"` and `"Png"` all describe the same extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyExtensionSet(BTreeSet<String>);

impl CopyExtensionSet {
    /// Build a set from arbitrary extension spellings. Empty entries are dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            extensions
                .into_iter()
                .map(|ext| normalize(ext.as_ref()))
                .filter(|ext| !ext.is_empty())
                .collect(),
        )
    }

    /// Whether `extension` (with or without a leading dot) is in the set.
    #[must_use]
    pub fn contains(&self, extension: &str) -> bool {
        self.0.contains(&normalize(extension))
    }

    /// Whether the file at `path` has an extension in the set.
    ///
    /// Files without an extension, or with a non UTF-8 one, never match.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.contains(ext))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CopyExtensionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

fn normalize(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}
