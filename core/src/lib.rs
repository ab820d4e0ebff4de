//! pinyin-ime-core
//!
//! Storage and data-model layer shared by the pinyin IME: the generic
//! 26-way prefix trie, dictionary entries and per-acronym buckets, the
//! lexicon that indexes them, and the configuration surface.
//!
//! Public API:
//! - `Trie` / `MatchKind` - prefix trie with 4-valued matching
//! - `DictEntry` - (chinese, pinyin, freq) with derived syllables
//! - `Dict` - ordered per-acronym bucket with token/pinyin/regex search
//! - `Lexicon` - acronym trie + syllable vocabulary + snapshots
//! - `Token` / `TokenKind` - segmenter tokens consumed by bucket search
//! - `Config` - runtime options
//! - `Error` - unified error values

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::Error;

pub mod trie;
pub use trie::{MatchKind, Trie};

pub mod token;
pub use token::{span_acronym, Token, TokenKind};

pub mod entry;
pub use entry::DictEntry;

pub mod dict;
pub use dict::Dict;

pub mod lexicon;
pub use lexicon::{EntryRecord, Lexicon};

/// Runtime options for the IME core.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Letter capacity of the input buffer. Edits that would grow the
    /// buffer past this are silent no-ops.
    pub capacity: usize,

    /// Frequency delta added to a chosen entry when a session ends with
    /// `inc_freq` set.
    pub promote_delta: u32,

    /// Cap on segmentation forks per re-segmentation. Past the cap no new
    /// branches are opened, leaving the greedy longest-first parse.
    pub max_forks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 128,
            promote_delta: 1,
            max_forks: 64,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.capacity, 128);
        assert_eq!(config.promote_delta, 1);
        assert_eq!(config.max_forks, 64);
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut config = Config::default();
        config.capacity = 64;
        config.promote_delta = 2;
        let text = config.to_toml_string().unwrap();
        let back = Config::from_toml_str(&text).unwrap();
        assert_eq!(back.capacity, 64);
        assert_eq!(back.promote_delta, 2);
        assert_eq!(back.max_forks, 64);
    }
}
