//! Weighted finite-state transducer algebra over the tropical semiring.
//!
//! This crate provides the transducer representation used by the numeral and
//! entity grammars, the rational operations that build them, composition,
//! optimization, best-path extraction, and a binary on-disk format for
//! precompiled transducers and named archives.
//!
//! # Architecture
//!
//! - [`weighted`] -- Mutable-while-building transducer representation
//! - [`symbols`] -- Label encoding (one Unicode scalar per label)
//! - [`ops`] -- Constructors and rational operations (accept, cross, concat, union, closure, ...)
//! - [`compose`] -- Epsilon-filtered transducer composition
//! - [`optimize`] -- Epsilon removal, determinization, minimization, trimming
//! - [`paths`] -- Shortest distance, top path and top-k distinct outputs
//! - [`config`] -- Build limits (state ceiling, search bound)
//! - [`format`] / [`transition`] -- Binary header and fixed-layout records
//! - [`archive`] -- Named transducer archives

pub mod archive;
pub mod compose;
pub mod config;
pub mod format;
pub mod ops;
pub mod optimize;
pub mod paths;
pub mod symbols;
pub mod transition;
pub mod weighted;

pub use archive::Archive;
pub use compose::{compose, compose_with};
pub use config::Limits;
pub use ops::{
    accept, add_weight, any_of, closure, concat, concat_all, cross, delete, epsilon, insert,
    invert, optional, project_input, project_output, union, union_all,
};
pub use optimize::{connect, determinize_with, minimize, optimize, optimize_with, rm_epsilon};
pub use paths::{shortest_distance, top_k_paths, top_k_paths_with, top_path, top_path_with};
pub use weighted::{Arc, Fst, State};

/// Arc label. `0` is epsilon; every other value is a Unicode scalar value.
pub type Label = u32;

/// State index inside a single [`Fst`].
pub type StateId = u32;

/// Tropical weight: paths add, alternatives take the minimum.
pub type Weight = f32;

/// The empty label.
pub const EPSILON: Label = 0;

/// Error type for transducer construction, traversal and (de)serialization.
#[derive(Debug, thiserror::Error)]
pub enum FstError {
    #[error("grammar too large: {states} states exceeds the ceiling of {limit}")]
    GrammarTooLarge { states: usize, limit: usize },
    #[error("input is not accepted by the transducer")]
    NoPath,
    #[error("path search exceeded {limit} expansions")]
    SearchLimit { limit: u32 },
    #[error("invalid label {0:#x}")]
    InvalidLabel(u32),
    #[error("invalid magic number in transducer header")]
    InvalidMagic,
    #[error("file too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("kind mismatch: expected {expected}, got {actual}")]
    KindMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("unknown file kind byte {0}")]
    UnknownKind(u8),
    #[error("invalid weight {0}: weights must be finite and non-negative")]
    InvalidWeight(f32),
    #[error("arc or start state points past the state table ({state} >= {count})")]
    DanglingArc { state: u32, count: u32 },
    #[error("invalid archive: {0}")]
    InvalidArchive(String),
    #[error("archive has no entry named {0:?}")]
    MissingEntry(String),
}
