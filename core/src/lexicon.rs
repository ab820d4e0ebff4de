//! The lexicon: dictionary buckets indexed by acronym, plus the syllable set.
//!
//! Two tries live here. The acronym trie maps the first-letter string of an
//! entry's syllables to the [`Dict`] bucket holding every entry with that
//! shape. The syllable trie is the segmenter's vocabulary; it is owned by
//! the lexicon rather than being process-wide state so that a lexicon and
//! the buffers segmenting against it always agree.
//!
//! Persistence is a flat record snapshot: entries out in traversal order,
//! rebuilt through the normal insertion path on load.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dict::Dict;
use crate::entry::DictEntry;
use crate::error::Error;
use crate::trie::{MatchKind, Trie};

/// One persisted entry; the on-disk shape of [`DictEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRecord {
    pub chinese: String,
    pub pinyin: String,
    pub freq: u32,
}

/// Acronym-indexed dictionary plus the syllable vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    dicts: Trie<Dict>,
    syllables: Trie<()>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- syllable set ----

    /// Register a syllable. Returns `true` if it was not known before.
    pub fn add_syllable(&mut self, syllable: &str) -> Result<bool, Error> {
        if self.syllables.contains(syllable) {
            return Ok(false);
        }
        self.syllables.insert(syllable, ())?;
        Ok(true)
    }

    /// Remove a syllable; unknown syllables are a no-op.
    pub fn remove_syllable(&mut self, syllable: &str) {
        self.syllables.remove(syllable);
    }

    /// Classify `text` against the syllable set.
    ///
    /// Anything containing a byte outside `a-z` is a [`MatchKind::Miss`];
    /// the segmenter probes raw buffer slices and must not have a stray
    /// delimiter or digit alias into a letter slot.
    pub fn syllable_match(&self, text: &str) -> MatchKind {
        if !text.bytes().all(|b| b.is_ascii_lowercase()) {
            return MatchKind::Miss;
        }
        self.syllables.match_key(text)
    }

    pub fn is_syllable(&self, text: &str) -> bool {
        matches!(
            self.syllable_match(text),
            MatchKind::Extendible | MatchKind::Complete
        )
    }

    // ---- buckets ----

    /// Borrow the bucket for `acronym`, creating it empty if absent.
    pub fn get_or_create(&mut self, acronym: &str) -> Result<&mut Dict, Error> {
        self.dicts.insert_if_absent(acronym, Dict::new)
    }

    pub fn dict(&self, acronym: &str) -> Option<&Dict> {
        self.dicts.get(acronym).ok()
    }

    pub fn dict_mut(&mut self, acronym: &str) -> Option<&mut Dict> {
        self.dicts.get_mut(acronym).ok()
    }

    pub fn contains_acronym(&self, acronym: &str) -> bool {
        self.dicts.contains(acronym)
    }

    /// Number of buckets.
    pub fn dict_count(&self) -> usize {
        self.dicts.iter().count()
    }

    /// Total number of entries across all buckets.
    pub fn entry_count(&self) -> usize {
        self.dicts.iter().map(|(_, d)| d.len()).sum()
    }

    // ---- entries ----

    /// Ingest one entry: register its syllables, then insert it into the
    /// bucket for its acronym.
    ///
    /// Returns `false` for a duplicate (same chinese and pinyin), which is
    /// ignored. If the bucket insertion fails, syllables registered by this
    /// call are rolled back so a failed ingest leaves the lexicon unchanged.
    pub fn add_entry<C, P>(&mut self, chinese: C, pinyin: P, freq: u32) -> Result<bool, Error>
    where
        C: Into<String>,
        P: Into<String>,
    {
        let entry = DictEntry::new(chinese, pinyin, freq);
        if entry.syllable_count() == 0 {
            return Err(Error::EmptyKey);
        }
        let mut registered = Vec::new();
        for syllable in entry.syllables() {
            if self.add_syllable(syllable)? {
                registered.push(syllable.clone());
            }
        }
        let acronym = entry.acronym();
        let result = self
            .get_or_create(&acronym)
            .and_then(|dict| dict.add(entry));
        if result.is_err() {
            for syllable in &registered {
                self.syllables.remove(syllable);
            }
        }
        result
    }

    /// Every entry, in acronym order and bucket order within each acronym.
    pub fn iter_entries(&self) -> impl Iterator<Item = &DictEntry> + '_ {
        self.dicts.iter().flat_map(|(_, dict)| dict.iter())
    }

    // ---- persistence ----

    /// All entries as flat records, in traversal order.
    pub fn to_records(&self) -> Vec<EntryRecord> {
        self.iter_entries()
            .map(|e| EntryRecord {
                chinese: e.chinese().to_string(),
                pinyin: e.pinyin().to_string(),
                freq: e.freq(),
            })
            .collect()
    }

    /// Rebuild a lexicon from flat records through the normal ingest path.
    pub fn from_records(records: &[EntryRecord]) -> Self {
        let mut lexicon = Self::new();
        for record in records {
            let _ = lexicon.add_entry(record.chinese.as_str(), record.pinyin.as_str(), record.freq);
        }
        lexicon
    }

    /// Save a bincode snapshot of all entries.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, &self.to_records())?;
        Ok(())
    }

    /// Load a lexicon from a snapshot produced by `save_bincode`.
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let records: Vec<EntryRecord> = bincode::deserialize_from(reader)?;
        Ok(Self::from_records(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_entry_registers_syllables() {
        let mut lexicon = Lexicon::new();
        assert!(lexicon.add_entry("输入", "shu'ru", 10).unwrap());
        assert!(lexicon.is_syllable("shu"));
        assert!(lexicon.is_syllable("ru"));
        assert!(lexicon.contains_acronym("sr"));
        assert_eq!(lexicon.dict("sr").unwrap().len(), 1);
    }

    #[test]
    fn duplicate_entry_is_ignored() {
        let mut lexicon = Lexicon::new();
        assert!(lexicon.add_entry("输入", "shu'ru", 10).unwrap());
        assert!(!lexicon.add_entry("输入", "shu'ru", 3).unwrap());
        assert_eq!(lexicon.entry_count(), 1);
    }

    #[test]
    fn entries_iterate_in_acronym_order() {
        let mut lexicon = Lexicon::new();
        lexicon.add_entry("输入法", "shu'ru'fa", 5).unwrap();
        lexicon.add_entry("法", "fa", 3).unwrap();
        lexicon.add_entry("输入", "shu'ru", 10).unwrap();
        let pinyins: Vec<&str> = lexicon.iter_entries().map(|e| e.pinyin()).collect();
        // "f" < "sr" < "srf"
        assert_eq!(pinyins, ["fa", "shu'ru", "shu'ru'fa"]);
        assert_eq!(lexicon.dict_count(), 3);
        assert_eq!(lexicon.entry_count(), 3);
    }

    #[test]
    fn empty_pinyin_is_rejected() {
        let mut lexicon = Lexicon::new();
        assert_eq!(lexicon.add_entry("无", "'", 1), Err(Error::EmptyKey));
        assert_eq!(lexicon.entry_count(), 0);
    }

    #[test]
    fn syllable_match_rejects_non_letters() {
        let mut lexicon = Lexicon::new();
        lexicon.add_syllable("xi").unwrap();
        assert_eq!(lexicon.syllable_match("xi"), MatchKind::Complete);
        assert_eq!(lexicon.syllable_match("xi'"), MatchKind::Miss);
        assert_eq!(lexicon.syllable_match("x1"), MatchKind::Miss);
        assert_eq!(lexicon.syllable_match(""), MatchKind::Miss);
    }

    #[test]
    fn removed_syllable_stops_matching() {
        let mut lexicon = Lexicon::new();
        lexicon.add_syllable("xian").unwrap();
        lexicon.add_syllable("xi").unwrap();
        lexicon.remove_syllable("xian");
        assert_eq!(lexicon.syllable_match("xi"), MatchKind::Complete);
        assert_eq!(lexicon.syllable_match("xian"), MatchKind::Miss);
    }

    #[test]
    fn snapshot_roundtrip() {
        let tmp = std::env::temp_dir().join(format!(
            "pinyin_ime_lexicon_test_{}.bin",
            std::process::id()
        ));
        let mut lexicon = Lexicon::new();
        lexicon.add_entry("输入", "shu'ru", 10).unwrap();
        lexicon.add_entry("法", "fa", 3).unwrap();
        lexicon.save_bincode(&tmp).unwrap();
        let loaded = Lexicon::load_bincode(&tmp).unwrap();
        assert_eq!(loaded.entry_count(), 2);
        assert!(loaded.is_syllable("shu"));
        assert_eq!(loaded.dict("sr").unwrap().get(0).unwrap().freq(), 10);
        let _ = std::fs::remove_file(tmp);
    }
}
