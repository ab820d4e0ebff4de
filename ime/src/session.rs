//! The IME session: edits, searches, selections and end-of-session learning.
//!
//! `Ime` owns the lexicon, the pinyin buffer, the current candidate list and
//! the choices committed so far. Every state-changing call rebuilds the
//! candidate list, so anything previously handed out describes a state that
//! no longer exists.
//!
//! A session runs: edit → search over all unfixed-token prefixes → user
//! chooses a candidate → its tokens are fixed and the search reruns over the
//! remainder → `finish_search` applies learning (frequency promotion and,
//! for multi-entry sessions, a synthesized phrase entry) and resets.

use std::collections::HashMap;

use tracing::debug;

use pinyin_ime_core::{span_acronym, Config, DictEntry, Error, Lexicon, Token};

use crate::candidates::Candidates;
use crate::query::Query;
use crate::segmenter::PinyinBuffer;

/// One committed selection: the span it covered and the entry it picked.
#[derive(Debug, Clone)]
pub struct Choice {
    tokens: Vec<Token>,
    acronym: String,
    entry_index: usize,
}

impl Choice {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn acronym(&self) -> &str {
        &self.acronym
    }

    pub fn entry_index(&self) -> usize {
        self.entry_index
    }
}

/// A pinyin input session over an owned lexicon.
#[derive(Debug)]
pub struct Ime {
    config: Config,
    lexicon: Lexicon,
    buffer: PinyinBuffer,
    candidates: Candidates,
    choices: Vec<Choice>,
}

impl Default for Ime {
    fn default() -> Self {
        Self::new()
    }
}

impl Ime {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let buffer = PinyinBuffer::from_config(&config);
        Self {
            config,
            lexicon: Lexicon::new(),
            buffer,
            candidates: Candidates::new(),
            choices: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Mutable lexicon access for setup (syllable registration, bulk load).
    /// Mutating the lexicon invalidates the current candidate list; run a
    /// fresh search afterwards.
    pub fn lexicon_mut(&mut self) -> &mut Lexicon {
        &mut self.lexicon
    }

    // ---- entry ingestion and emission ----

    /// Register an entry's syllables and insert it into its bucket.
    /// Resets the running search first; duplicates are ignored (`false`).
    pub fn add_entry<C, P>(&mut self, chinese: C, pinyin: P, freq: u32) -> Result<bool, Error>
    where
        C: Into<String>,
        P: Into<String>,
    {
        self.reset_search();
        self.lexicon.add_entry(chinese, pinyin, freq)
    }

    /// Every entry as `(chinese, pinyin, freq)`, in acronym-trie traversal
    /// order and bucket order; the input for an external serializer.
    pub fn iter_entries(&self) -> impl Iterator<Item = (&str, &str, u32)> + '_ {
        self.lexicon
            .iter_entries()
            .map(|e| (e.chinese(), e.pinyin(), e.freq()))
    }

    // ---- buffer views ----

    pub fn letters(&self) -> &str {
        self.buffer.letters()
    }

    pub fn tokens(&self) -> &[Token] {
        self.buffer.tokens()
    }

    pub fn unfixed_tokens(&self) -> &[Token] {
        self.buffer.unfixed_tokens()
    }

    pub fn fixed_token_count(&self) -> usize {
        self.buffer.fixed_token_count()
    }

    pub fn fixed_letters(&self) -> usize {
        self.buffer.fixed_letters()
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn candidates(&self) -> &Candidates {
        &self.candidates
    }

    /// Resolve a flat candidate index to its entry.
    pub fn candidate(&self, index: usize) -> Option<&DictEntry> {
        self.candidates.entry(&self.lexicon, index)
    }

    // ---- searching ----

    /// Reconcile free-form input with the current buffer: extend when the
    /// buffer is a prefix of `pinyin`, backspace when `pinyin` is a prefix
    /// of the buffer and the difference is still editable, otherwise start
    /// over.
    pub fn search(&mut self, pinyin: &str) -> &Candidates {
        let pinyin = pinyin.to_ascii_lowercase();
        let current = self.buffer.letters().to_string();
        if let Some(suffix) = pinyin.strip_prefix(current.as_str()) {
            if suffix.is_empty() {
                return &self.candidates;
            }
            let suffix = suffix.to_string();
            return self.push_str(&suffix);
        }
        if current.starts_with(&pinyin) {
            let delta = current.len() - pinyin.len();
            if delta <= self.buffer.unfixed_letters() {
                return self.backspace(delta);
            }
        }
        self.reset_search();
        self.push_str(&pinyin)
    }

    /// Append letters and re-run the search.
    pub fn push_str(&mut self, text: &str) -> &Candidates {
        let text = text.to_ascii_lowercase();
        self.buffer.push_str(&self.lexicon, &text);
        self.run_search()
    }

    /// Remove up to `count` unfixed trailing letters and re-run the search.
    pub fn backspace(&mut self, count: usize) -> &Candidates {
        self.buffer.backspace(&self.lexicon, count);
        self.run_search()
    }

    /// Search every non-empty prefix of the unfixed tokens whose acronym is
    /// in the lexicon. Spans go through a stack so the longest prefix lands
    /// first in the flat candidate list.
    fn run_search(&mut self) -> &Candidates {
        let unfixed = self.buffer.unfixed_tokens();
        let mut spans: Vec<&[Token]> = Vec::new();
        for len in 1..=unfixed.len() {
            let span = &unfixed[..len];
            if self.lexicon.contains_acronym(&span_acronym(span)) {
                spans.push(span);
            }
        }
        let mut candidates = Candidates::new();
        for span in spans.into_iter().rev() {
            candidates.push(Query::new(&self.lexicon, span));
        }
        self.candidates = candidates;
        &self.candidates
    }

    // ---- selection ----

    /// Commit the candidate at `index`: fix its tokens, record the choice,
    /// and re-run the search over the remaining unfixed tokens. Fails with
    /// [`Error::InvalidChoice`] (leaving the session untouched) when the
    /// index does not resolve or its span is no longer committable.
    pub fn choose(&mut self, index: usize) -> Result<&Candidates, Error> {
        let (query, offset) = self
            .candidates
            .locate(index)
            .ok_or(Error::InvalidChoice)?;
        let entry_index = query.entry_index(offset).ok_or(Error::InvalidChoice)?;
        let count = self.buffer.fix_count_for(query.tokens());
        if count == 0 {
            return Err(Error::InvalidChoice);
        }
        let choice = Choice {
            tokens: query.tokens().to_vec(),
            acronym: query.acronym().to_string(),
            entry_index,
        };
        self.buffer.fix_front_tokens(count)?;
        self.choices.push(choice);
        Ok(self.run_search())
    }

    // ---- session end ----

    /// Apply end-of-session learning, then reset unconditionally.
    ///
    /// With `inc_freq`, every chosen entry's frequency is bumped by the
    /// configured promotion delta, grouped per bucket so each bucket
    /// re-sorts once. With `add_new_sentence` and two or more choices, a
    /// new entry is synthesized from the concatenated selections with
    /// frequency 1 (an identical existing entry is left alone).
    pub fn finish_search(&mut self, inc_freq: bool, add_new_sentence: bool) -> Result<(), Error> {
        let result = self.finish_inner(inc_freq, add_new_sentence);
        self.reset_search();
        result
    }

    fn finish_inner(&mut self, inc_freq: bool, add_new_sentence: bool) -> Result<(), Error> {
        if self.choices.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::with_capacity(self.choices.len());
        for choice in &self.choices {
            let entry = self
                .lexicon
                .dict(&choice.acronym)
                .and_then(|d| d.get(choice.entry_index))
                .ok_or(Error::InvalidChoice)?;
            parts.push((entry.chinese().to_string(), entry.pinyin().to_string()));
        }
        if inc_freq {
            let delta = self.config.promote_delta;
            let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
            for choice in &self.choices {
                groups
                    .entry(choice.acronym.as_str())
                    .or_default()
                    .push(choice.entry_index);
            }
            for (acronym, indices) in &groups {
                if let Some(dict) = self.lexicon.dict_mut(acronym) {
                    dict.promote(indices, delta);
                }
            }
        }
        if add_new_sentence && parts.len() >= 2 {
            let chinese: String = parts.iter().map(|(c, _)| c.as_str()).collect();
            let pinyin = parts
                .iter()
                .map(|(_, p)| p.as_str())
                .collect::<Vec<_>>()
                .join("'");
            if self.lexicon.add_entry(chinese.as_str(), pinyin.as_str(), 1)? {
                debug!(%chinese, %pinyin, "learned new phrase");
            }
        }
        Ok(())
    }

    /// Drop candidates, choices and the whole buffer.
    pub fn reset_search(&mut self) {
        self.candidates.clear();
        self.choices.clear();
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_ime() -> Ime {
        let mut ime = Ime::new();
        ime.add_entry("输入", "shu'ru", 10).unwrap();
        ime.add_entry("输入法", "shu'ru'fa", 5).unwrap();
        ime.add_entry("法", "fa", 3).unwrap();
        ime
    }

    #[test]
    fn longer_prefix_query_comes_first() {
        let mut ime = demo_ime();
        ime.search("shurufa");
        assert_eq!(ime.candidates().len(), 2);
        assert_eq!(ime.candidate(0).unwrap().chinese(), "输入法");
        assert_eq!(ime.candidate(1).unwrap().chinese(), "输入");
    }

    #[test]
    fn choose_fixes_and_searches_the_rest() {
        let mut ime = demo_ime();
        ime.search("shurufa");
        ime.choose(1).unwrap();
        assert_eq!(ime.fixed_token_count(), 2);
        assert_eq!(&ime.letters()[ime.fixed_letters()..], "fa");
        assert_eq!(ime.candidate(0).unwrap().chinese(), "法");
        assert_eq!(ime.choices().len(), 1);
    }

    #[test]
    fn search_reconciles_by_prefix() {
        let mut ime = demo_ime();
        ime.search("shu");
        ime.search("shuru");
        assert_eq!(ime.letters(), "shuru");
        ime.search("sh");
        assert_eq!(ime.letters(), "sh");
        // Unrelated input starts over.
        ime.search("fa");
        assert_eq!(ime.letters(), "fa");
        assert_eq!(ime.candidate(0).unwrap().chinese(), "法");
    }

    #[test]
    fn add_entry_resets_the_session() {
        let mut ime = demo_ime();
        ime.search("shuru");
        assert!(!ime.candidates().is_empty());
        ime.add_entry("树", "shu", 2).unwrap();
        assert_eq!(ime.letters(), "");
        assert!(ime.candidates().is_empty());
    }

    #[test]
    fn entries_emit_in_traversal_order() {
        let ime = demo_ime();
        let pinyins: Vec<&str> = ime.iter_entries().map(|(_, p, _)| p).collect();
        assert_eq!(pinyins, ["fa", "shu'ru", "shu'ru'fa"]);
    }
}
