//! Russian text-normalization grammars built on weighted transducers.
//!
//! Numeral names are compiled by intersecting a language-independent
//! arithmetic factorization with a numeral acceptor and composing the
//! result with inflected lexicons. Entity grammars (telephone numbers,
//! electronic addresses) are built on top of the numeral names with the
//! tag/verbalize composition pattern.
//!
//! # Architecture
//!
//! - [`lexicon`] -- Tab-separated lexicon loading and ambiguity policy
//! - [`arithmetic`] -- Reference factorization resources for 0..999
//! - [`resources`] -- Precompiled resource files and their handle
//! - [`numbers`] -- Numeral grammar compiler
//! - [`taggers`] -- Entity tagger/verbalizer composition (telephone, electronic)
//! - [`handle`] -- `GrammarHandle`, the compiled set of grammars
//! - [`config`] -- Compile options (`numera.toml`)
//! - [`russian`] -- Alphabets

pub mod arithmetic;
pub mod config;
pub mod error;
#[cfg(feature = "handle")]
pub mod handle;
pub mod lexicon;
pub mod numbers;
pub mod resources;
pub mod taggers;

pub mod russian {
    pub mod alphabet;
}

pub use config::CompileOptions;
pub use error::{GrammarError, LoadError};
pub use numbers::{NumeralClass, NumeralLexicons, NumeralNames, compile_numeral_grammar};
pub use resources::Resources;
pub use taggers::compose::EntityGrammar;

use numera_core::GrammarConfig;
use numera_fst::{Fst, Weight, top_k_paths};

/// Outputs returned by [`Grammar::apply`] when no count is given.
pub const DEFAULT_TOP_K: usize = 5;

/// A compiled grammar: a configuration record and its final transducer.
pub trait Grammar {
    fn config(&self) -> &GrammarConfig;

    fn fst(&self) -> &Fst;

    /// Weighted outputs for `input`, best first. Empty when the grammar does
    /// not accept `input`. A deterministic grammar yields at most one.
    fn apply(&self, input: &str) -> Result<Vec<(String, Weight)>, GrammarError> {
        self.apply_top_k(input, DEFAULT_TOP_K)
    }

    /// Like [`Grammar::apply`] with an explicit output count.
    fn apply_top_k(
        &self,
        input: &str,
        k: usize,
    ) -> Result<Vec<(String, Weight)>, GrammarError> {
        let k = self.config().output_limit(k);
        Ok(top_k_paths(self.fst(), input, k)?)
    }
}
