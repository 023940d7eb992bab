// Error types for grammar loading and compilation

use std::path::PathBuf;

use numera_fst::FstError;

/// Failure to load lexicons, resources or configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A lexicon line without exactly two non-empty tab-separated fields.
    /// `line` is 1-based.
    #[error("malformed line {line} in {}", .path.display())]
    MalformedLine { path: PathBuf, line: usize },

    #[error("conflicting entries for {surface:?}: {first:?} and {second:?}")]
    DuplicateKeyConflict {
        surface: String,
        first: String,
        second: String,
    },

    /// A required archive entry or lexicon key is absent.
    #[error("missing entry {0:?}")]
    MissingEntry(String),

    #[error("invalid transducer data: {0}")]
    Format(#[from] FstError),

    #[error("invalid configuration in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure to build a grammar.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The factorization/acceptor intersection does not decompose the probe
    /// input as expected; the resources are inconsistent.
    #[error("self-check failed: {input:?} gave {actual:?}, expected {expected:?}")]
    SelfCheckFailure {
        input: String,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Fst(#[from] FstError),
}
