//! Core types shared by the extractor and the sheet writer.

use std::collections::HashMap;

/// The source-of-truth locale whose dictionary block is extracted.
pub const DEFAULT_LOCALE: &str = "pt_BR";

/// Every locale column of the sheet, in output order. The default locale comes first.
pub const LOCALES: [&str; 14] = [
    "pt_BR", "pt_PT", "en", "es", "de", "it", "fr", "ja", "zh", "hi", "ar", "id", "ru", "bn",
];

/// Section label given to every entry.
pub const DEFAULT_SECTION: &str = "General";

/// A single extracted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Default-locale text with escape sequences already resolved.
    pub default_value: String,

    /// Grouping label shown in the `section` column.
    pub section: String,
}

impl TranslationEntry {
    pub fn new(default_value: impl Into<String>) -> Self {
        Self {
            default_value: default_value.into(),
            section: DEFAULT_SECTION.to_string(),
        }
    }
}

/// All entries extracted in one run, keyed by the raw translation key.
///
/// Inserting a key that is already present replaces its entry. Iteration order is
/// unspecified; use [`Catalog::sorted`] when order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, TranslationEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the one it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        entry: TranslationEntry,
    ) -> Option<TranslationEntry> {
        self.entries.insert(key.into(), entry)
    }

    pub fn get(&self, key: &str) -> Option<&TranslationEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered ascending by key.
    pub fn sorted(&self) -> Vec<(&String, &TranslationEntry)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}

impl<K: Into<String>> FromIterator<(K, TranslationEntry)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, TranslationEntry)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for (key, entry) in iter {
            catalog.insert(key, entry);
        }
        catalog
    }
}
