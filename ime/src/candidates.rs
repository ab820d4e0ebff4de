//! Candidate aggregation over multiple queries.

use pinyin_ime_core::{DictEntry, Lexicon};

use crate::query::Query;

/// An ordered list of queries presented as one flat index space.
///
/// Index `i` walks the queries in order until it falls inside one of them;
/// queries for longer token prefixes are pushed first by the session, so
/// more specific matches come first. A candidate list is a snapshot: any
/// session mutation replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    queries: Vec<Query>,
}

impl Candidates {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, query: Query) {
        self.queries.push(query);
    }

    pub(crate) fn clear(&mut self) {
        self.queries.clear();
    }

    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// Total number of candidates across all queries.
    pub fn len(&self) -> usize {
        self.queries.iter().map(Query::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.iter().all(Query::is_empty)
    }

    /// Map a flat index to the query holding it and the offset within.
    pub fn locate(&self, index: usize) -> Option<(&Query, usize)> {
        let mut index = index;
        for query in &self.queries {
            if index < query.len() {
                return Some((query, index));
            }
            index -= query.len();
        }
        None
    }

    /// Resolve the flat index against the lexicon the queries ran over.
    pub fn entry<'a>(&self, lexicon: &'a Lexicon, index: usize) -> Option<&'a DictEntry> {
        let (query, offset) = self.locate(index)?;
        query.entry(lexicon, offset)
    }

    /// Iterate all candidate entries in flat-index order.
    pub fn iter<'a>(&'a self, lexicon: &'a Lexicon) -> impl Iterator<Item = &'a DictEntry> + 'a {
        self.queries.iter().flat_map(move |query| {
            query
                .match_indices()
                .iter()
                .filter_map(move |&i| lexicon.dict(query.acronym()).and_then(|d| d.get(i)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinyin_ime_core::{Token, TokenKind};

    fn complete(text: &str, offset: usize) -> Token {
        Token::new(TokenKind::Complete, text, offset)
    }

    #[test]
    fn flat_index_concatenates_queries() {
        let mut lexicon = Lexicon::new();
        lexicon.add_entry("输入法", "shu'ru'fa", 5).unwrap();
        lexicon.add_entry("输入", "shu'ru", 10).unwrap();
        lexicon.add_entry("书", "shu", 7).unwrap();

        let mut candidates = Candidates::new();
        let long = [complete("shu", 0), complete("ru", 3), complete("fa", 5)];
        let short = [complete("shu", 0), complete("ru", 3)];
        candidates.push(Query::new(&lexicon, &long));
        candidates.push(Query::new(&lexicon, &short));

        assert_eq!(candidates.len(), 2);
        assert!(!candidates.is_empty());
        assert_eq!(candidates.entry(&lexicon, 0).unwrap().chinese(), "输入法");
        assert_eq!(candidates.entry(&lexicon, 1).unwrap().chinese(), "输入");
        assert!(candidates.entry(&lexicon, 2).is_none());

        let all: Vec<&str> = candidates.iter(&lexicon).map(|e| e.chinese()).collect();
        assert_eq!(all, ["输入法", "输入"]);
    }

    #[test]
    fn empty_queries_are_skipped_by_indexing() {
        let mut lexicon = Lexicon::new();
        lexicon.add_entry("法", "fa", 3).unwrap();
        let mut candidates = Candidates::new();
        candidates.push(Query::new(&lexicon, &[complete("shu", 0)]));
        candidates.push(Query::new(&lexicon, &[complete("fa", 0)]));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates.entry(&lexicon, 0).unwrap().chinese(), "法");
    }
}
