//! Precomputed store-name index.
//!
//! Every query is compared against several normalized forms of each store
//! name. Computing those forms is far more expensive than comparing them, so
//! a [`NameIndex`] computes them once per dataset load and the matcher reuses
//! them for every keystroke.

use std::collections::HashMap;

use crate::kana::{fold, reading, romanize, to_katakana};

/// The normalized forms of one distinct store name.
///
/// | Form       | Example (`マクドナルド`) | Example (`吉野家`, reading supplied) |
/// |------------|--------------------------|--------------------------------------|
/// | `folded`   | `マクドナルド`           | `吉野家`                             |
/// | `katakana` | `マクドナルド`           | `ヨシノヤ`                           |
/// | `reading`  | `まくどなるど`           | `よしのや`                           |
/// | `romaji`   | `makudonarudo`           | `yoshinoya`                          |
#[derive(Debug, Clone, PartialEq)]
pub struct NameEntry {
    name: String,
    folded: String,
    katakana: String,
    reading: String,
    romaji: String,
}

impl NameEntry {
    /// Build an entry whose reading is derived mechanically from the name.
    ///
    /// Kanji in the name survive unchanged in every form.
    ///
    /// # Examples
    ///
    /// ```
    /// use menufinder::NameEntry;
    ///
    /// let entry = NameEntry::new("マクドナルド");
    /// assert_eq!(entry.reading(), "まくどなるど");
    /// assert_eq!(entry.romaji(), "makudonarudo");
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let folded = fold(&name).into_owned();
        Self {
            katakana: to_katakana(&folded),
            reading: reading(&folded),
            romaji: romanize(&folded),
            folded,
            name,
        }
    }

    /// Build an entry with an explicitly supplied reading.
    ///
    /// The reading may be written in hiragana, katakana or half-width
    /// katakana; it drives the `katakana`, `reading` and `romaji` forms while
    /// `folded` still comes from the name itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use menufinder::NameEntry;
    ///
    /// let entry = NameEntry::with_reading("吉野家", "よしのや");
    /// assert_eq!(entry.katakana(), "ヨシノヤ");
    /// assert_eq!(entry.romaji(), "yoshinoya");
    /// ```
    pub fn with_reading(name: impl Into<String>, supplied: &str) -> Self {
        let name = name.into();
        let reading = reading(supplied);
        Self {
            folded: fold(&name).into_owned(),
            katakana: to_katakana(&reading),
            romaji: romanize(&reading),
            reading,
            name,
        }
    }

    /// The store name as it appears in the dataset.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The NFKC-normalized, lowercased name.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// The katakana form of the reading.
    pub fn katakana(&self) -> &str {
        &self.katakana
    }

    /// The hiragana reading.
    pub fn reading(&self) -> &str {
        &self.reading
    }

    /// The lowercase romanization of the reading.
    pub fn romaji(&self) -> &str {
        &self.romaji
    }

    /// All searchable forms, in the order the matcher scans them.
    pub(crate) fn forms(&self) -> [&str; 4] {
        [&self.folded, &self.katakana, &self.reading, &self.romaji]
    }
}

/// A deduplicated, insertion-ordered set of [`NameEntry`] values.
///
/// Names that are empty after trimming are ignored. Inserting a name that is
/// already present is a no-op, unless a reading is supplied, in which case
/// the entry's forms are rebuilt from that reading.
///
/// # Examples
///
/// ```
/// use menufinder::NameIndex;
///
/// let index = NameIndex::from_names(["マクドナルド", "すき家", "マクドナルド"]);
/// assert_eq!(index.len(), 2);
/// assert!(index.get("すき家").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    entries: Vec<NameEntry>,
    positions: HashMap<String, usize>,
}

impl NameIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a sequence of store names, keeping the first
    /// occurrence of each.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for name in names {
            index.insert(name.as_ref());
        }
        tracing::debug!(entries = index.len(), "built store name index");
        index
    }

    /// Add a name with a mechanically derived reading.
    ///
    /// Returns `true` if the name was not already indexed.
    pub fn insert(&mut self, name: &str) -> bool {
        if name.trim().is_empty() || self.positions.contains_key(name) {
            return false;
        }
        self.push(NameEntry::new(name));
        true
    }

    /// Add a name with an explicit reading, replacing the forms of an
    /// existing entry of the same name.
    ///
    /// Returns `true` if the name was not already indexed.
    pub fn insert_with_reading(&mut self, name: &str, supplied: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        let entry = NameEntry::with_reading(name, supplied);
        match self.positions.get(name) {
            Some(&pos) => {
                self.entries[pos] = entry;
                false
            }
            None => {
                self.push(entry);
                true
            }
        }
    }

    fn push(&mut self, entry: NameEntry) {
        self.positions
            .insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// Look up the entry for an exact store name.
    pub fn get(&self, name: &str) -> Option<&NameEntry> {
        self.positions.get(name).map(|&pos| &self.entries[pos])
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no names.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for NameIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_forms_for_katakana_name() {
        let entry = NameEntry::new("マクドナルド");
        assert_eq!(entry.name(), "マクドナルド");
        assert_eq!(entry.folded(), "マクドナルド");
        assert_eq!(entry.katakana(), "マクドナルド");
        assert_eq!(entry.reading(), "まくどなるど");
        assert_eq!(entry.romaji(), "makudonarudo");
    }

    #[test]
    fn entry_forms_for_half_width_name() {
        let entry = NameEntry::new("ﾓｽﾊﾞｰｶﾞｰ");
        assert_eq!(entry.name(), "ﾓｽﾊﾞｰｶﾞｰ");
        assert_eq!(entry.folded(), "モスバーガー");
        assert_eq!(entry.reading(), "もすばーがー");
        assert_eq!(entry.romaji(), "mosubaagaa");
    }

    #[test]
    fn entry_forms_for_latin_name() {
        let entry = NameEntry::new("KFC");
        assert_eq!(entry.folded(), "kfc");
        assert_eq!(entry.katakana(), "kfc");
        assert_eq!(entry.romaji(), "kfc");
    }

    #[test]
    fn entry_with_supplied_katakana_reading() {
        let entry = NameEntry::with_reading("松屋", "マツヤ");
        assert_eq!(entry.folded(), "松屋");
        assert_eq!(entry.reading(), "まつや");
        assert_eq!(entry.katakana(), "マツヤ");
        assert_eq!(entry.romaji(), "matsuya");
    }

    #[test]
    fn forms_order() {
        let entry = NameEntry::with_reading("吉野家", "よしのや");
        assert_eq!(entry.forms(), ["吉野家", "ヨシノヤ", "よしのや", "yoshinoya"]);
    }

    #[test]
    fn index_deduplicates_preserving_first_order() {
        let index = NameIndex::from_names(["b", "a", "b", "c", "a"]);
        let names: Vec<&str> = index.entries().iter().map(NameEntry::name).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn index_skips_blank_names() {
        let index = NameIndex::from_names(["", "  ", "松屋"]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn insert_reports_novelty() {
        let mut index = NameIndex::new();
        assert!(index.insert("すき家"));
        assert!(!index.insert("すき家"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn insert_with_reading_replaces_existing_forms() {
        let mut index = NameIndex::from_names(["吉野家"]);
        assert_eq!(index.get("吉野家").map(NameEntry::romaji), Some("吉野家"));

        assert!(!index.insert_with_reading("吉野家", "よしのや"));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("吉野家").map(NameEntry::romaji), Some("yoshinoya"));
    }

    #[test]
    fn insert_with_reading_adds_new_name() {
        let mut index = NameIndex::new();
        assert!(index.insert_with_reading("大戸屋", "おおとや"));
        assert_eq!(index.get("大戸屋").map(NameEntry::reading), Some("おおとや"));
    }

    #[test]
    fn collect_from_iterator() {
        let index: NameIndex = vec!["松屋".to_owned(), "すき家".to_owned()].into_iter().collect();
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
    }

    #[test]
    fn get_missing_name() {
        let index = NameIndex::from_names(["松屋"]);
        assert!(index.get("すき家").is_none());
    }
}
