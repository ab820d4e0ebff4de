//! One search attempt: a token span resolved against a lexicon bucket.

use pinyin_ime_core::{span_acronym, DictEntry, Lexicon, Token};

/// A snapshot of one bucket search.
///
/// Holds the token span it ran over, the acronym it resolved to, and the
/// indices of the matching entries in that bucket. Indices stay meaningful
/// until the bucket is mutated (promotion or insertion), which is why the
/// session rebuilds its queries after every state change.
#[derive(Debug, Clone, Default)]
pub struct Query {
    tokens: Vec<Token>,
    acronym: String,
    matches: Vec<usize>,
}

impl Query {
    /// Run the search: resolve the span's acronym and match the bucket.
    /// A span whose acronym is not in the lexicon yields an empty query.
    pub fn new(lexicon: &Lexicon, tokens: &[Token]) -> Self {
        let acronym = span_acronym(tokens);
        let matches = lexicon
            .dict(&acronym)
            .map(|dict| dict.search_tokens(tokens))
            .unwrap_or_default();
        Self {
            tokens: tokens.to_vec(),
            acronym,
            matches,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn acronym(&self) -> &str {
        &self.acronym
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Bucket indices of the matched entries, in bucket order.
    pub fn match_indices(&self) -> &[usize] {
        &self.matches
    }

    /// Bucket index of the `i`-th match.
    pub fn entry_index(&self, i: usize) -> Option<usize> {
        self.matches.get(i).copied()
    }

    /// Resolve the `i`-th match against the lexicon it was built from.
    pub fn entry<'a>(&self, lexicon: &'a Lexicon, i: usize) -> Option<&'a DictEntry> {
        lexicon.dict(&self.acronym)?.get(self.entry_index(i)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinyin_ime_core::TokenKind;

    fn token(kind: TokenKind, text: &str, offset: usize) -> Token {
        Token::new(kind, text, offset)
    }

    #[test]
    fn query_resolves_acronym_and_matches() {
        let mut lexicon = Lexicon::new();
        lexicon.add_entry("输入", "shu'ru", 10).unwrap();
        let span = [
            token(TokenKind::Complete, "shu", 0),
            token(TokenKind::Complete, "ru", 3),
        ];
        let query = Query::new(&lexicon, &span);
        assert_eq!(query.acronym(), "sr");
        assert_eq!(query.len(), 1);
        assert_eq!(query.entry(&lexicon, 0).unwrap().chinese(), "输入");
        assert!(query.entry(&lexicon, 1).is_none());
    }

    #[test]
    fn unknown_acronym_yields_empty_query() {
        let lexicon = Lexicon::new();
        let span = [token(TokenKind::Complete, "shu", 0)];
        let query = Query::new(&lexicon, &span);
        assert!(query.is_empty());
        assert_eq!(query.acronym(), "s");
        assert!(query.entry(&lexicon, 0).is_none());
    }
}
