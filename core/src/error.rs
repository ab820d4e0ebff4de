//! Unified error type for the IME core.
//!
//! All recoverable failures across the trie, dictionary buckets, segmenter
//! and session surface through this one enum. Errors are plain values;
//! every failing operation leaves its receiver unchanged.

/// Error kinds surfaced by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A trie operation was given an empty key.
    #[error("trie key is empty")]
    EmptyKey,

    /// Strict insert over a key that is already present.
    #[error("trie key already exists")]
    Exists,

    /// Trie lookup missed.
    #[error("trie key not found")]
    NotFound,

    /// A bucket rejected an entry whose acronym does not match.
    #[error("entry acronym does not match the bucket acronym")]
    AcronymMismatch,

    /// An edit was attempted inside the committed prefix of the buffer.
    #[error("edit position lies in the fixed region")]
    FixedRegion,

    /// A selection index was out of range or could not be resolved to a
    /// committable token span.
    #[error("choice cannot be resolved")]
    InvalidChoice,
}
