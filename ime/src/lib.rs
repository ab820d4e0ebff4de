//! pinyin-ime
//!
//! A pinyin input method engine over the `pinyin-ime-core` storage layer:
//! incremental segmentation of typed letters into syllable tokens, candidate
//! lookup keyed by syllable acronyms, prefix commitment through candidate
//! selection, and end-of-session learning.
//!
//! Public API:
//! - `Ime` - the session: edits, searches, selections, learning
//! - `PinyinBuffer` - editable letter buffer with fixed/unfixed split
//! - `Query` / `Candidates` - one bucket search and their aggregation
//! - `loader` - textual dictionary format (load/save)
//! - `syllables` - the standard Mandarin syllable inventory
//!
//! Example
//!
//! ```
//! use pinyin_ime::Ime;
//!
//! let mut ime = Ime::new();
//! ime.add_entry("输入", "shu'ru", 10).unwrap();
//! ime.search("shuru");
//! assert_eq!(ime.candidate(0).unwrap().chinese(), "输入");
//! ime.choose(0).unwrap();
//! ime.finish_search(true, true).unwrap();
//! ```

pub mod candidates;
pub mod loader;
pub mod query;
pub mod segmenter;
pub mod session;
pub mod syllables;

pub use candidates::Candidates;
pub use query::Query;
pub use segmenter::{PinyinBuffer, DELIMITER};
pub use session::{Choice, Ime};

// Re-export the core types callers handle directly.
pub use pinyin_ime_core::{
    Config, Dict, DictEntry, Error, Lexicon, MatchKind, Token, TokenKind,
};
