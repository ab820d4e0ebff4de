//! Per-acronym dictionary buckets.
//!
//! A `Dict` holds every entry whose syllable acronym equals the bucket's
//! acronym, kept sorted by the priority order below. Buckets are created
//! empty by the lexicon and adopt their acronym from the first entry added.
//!
//! Priority order (earlier = higher priority):
//! 1. fewer syllables;
//! 2. first differing syllable: shorter string, then lexicographically
//!    smaller;
//! 3. higher frequency; exact ties compare equal and keep insertion order.

use std::cmp::Ordering;

use crate::entry::DictEntry;
use crate::error::Error;
use crate::token::{Token, TokenKind};

fn entry_cmp(a: &DictEntry, b: &DictEntry) -> Ordering {
    match a.syllable_count().cmp(&b.syllable_count()) {
        Ordering::Equal => {}
        ord => return ord,
    }
    for (x, y) in a.syllables().iter().zip(b.syllables()) {
        if x == y {
            continue;
        }
        return match x.len().cmp(&y.len()) {
            Ordering::Equal => x.cmp(y),
            ord => ord,
        };
    }
    b.freq().cmp(&a.freq())
}

enum TokenMatch {
    Fail,
    Partial,
    Full,
}

/// Ordered collection of entries sharing one acronym.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    acronym: String,
    entries: Vec<DictEntry>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// The acronym all entries share; empty until the first `add`.
    pub fn acronym(&self) -> &str {
        &self.acronym
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DictEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DictEntry> {
        self.entries.iter()
    }

    /// Insert an entry at its sorted position.
    ///
    /// An empty bucket adopts the entry's acronym; afterwards entries with a
    /// different acronym fail with [`Error::AcronymMismatch`]. An entry with
    /// identical chinese and pinyin to an existing one is ignored and `false`
    /// is returned.
    pub fn add(&mut self, entry: DictEntry) -> Result<bool, Error> {
        if self.entries.is_empty() {
            self.acronym = entry.acronym();
            self.entries.push(entry);
            return Ok(true);
        }
        if entry.acronym() != self.acronym {
            return Err(Error::AcronymMismatch);
        }
        if self
            .entries
            .iter()
            .any(|e| e.chinese() == entry.chinese() && e.pinyin() == entry.pinyin())
        {
            return Ok(false);
        }
        let pos = self
            .entries
            .partition_point(|e| entry_cmp(e, &entry) != Ordering::Greater);
        self.entries.insert(pos, entry);
        Ok(true)
    }

    fn match_entry(entry: &DictEntry, tokens: &[Token]) -> TokenMatch {
        if entry.syllable_count() != tokens.len() {
            return TokenMatch::Fail;
        }
        let mut used_prefix = false;
        for (syllable, token) in entry.syllables().iter().zip(tokens) {
            match token.kind {
                TokenKind::Initial | TokenKind::Extendible => {
                    if !syllable.starts_with(&token.text) {
                        return TokenMatch::Fail;
                    }
                    if syllable.len() != token.text.len() {
                        used_prefix = true;
                    }
                }
                TokenKind::Complete | TokenKind::Invalid => {
                    if syllable != &token.text {
                        return TokenMatch::Fail;
                    }
                }
            }
        }
        if used_prefix {
            TokenMatch::Partial
        } else {
            TokenMatch::Full
        }
    }

    /// Match a token span against the bucket, index by index.
    ///
    /// `Initial`/`Extendible` tokens accept any syllable they prefix;
    /// `Complete`/`Invalid` tokens require exact equality. Entries where
    /// every position matched exactly form the full set; entries where at
    /// least one position matched by strict prefix form the partial set.
    /// Returns the indices of the full set when non-empty, else the partial
    /// set.
    pub fn search_tokens(&self, tokens: &[Token]) -> Vec<usize> {
        let mut full = Vec::new();
        let mut partial = Vec::new();
        if tokens.is_empty() {
            return full;
        }
        for (index, entry) in self.entries.iter().enumerate() {
            match Self::match_entry(entry, tokens) {
                TokenMatch::Full => full.push(index),
                TokenMatch::Partial => partial.push(index),
                TokenMatch::Fail => {}
            }
        }
        if full.is_empty() {
            partial
        } else {
            full
        }
    }

    /// Indices of entries whose pinyin equals `pinyin` exactly.
    pub fn search_pinyin(&self, pinyin: &str) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.pinyin() == pinyin)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of entries whose whole pinyin matches `pattern`.
    pub fn search_regex(&self, pattern: &regex::Regex) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                pattern
                    .find(e.pinyin())
                    .is_some_and(|m| m.start() == 0 && m.end() == e.pinyin().len())
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Add `delta` to the frequency of each indexed entry, then re-sort.
    ///
    /// Out-of-range indices are silently ignored. Indices obtained before
    /// this call are invalid afterwards.
    pub fn promote(&mut self, indices: &[usize], delta: u32) {
        for &index in indices {
            if let Some(entry) = self.entries.get_mut(index) {
                entry.bump_freq(delta);
            }
        }
        self.entries.sort_by(entry_cmp);
    }

    /// Position of the entry with this chinese/pinyin pair, if it belongs
    /// to the bucket.
    pub fn index_of(&self, chinese: &str, pinyin: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.chinese() == chinese && e.pinyin() == pinyin)
    }
}
