// Numeral names: digit strings to inflected Russian number words.

mod compiler;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use numera_core::GrammarConfig;
use numera_fst::Fst;

use crate::Grammar;
use crate::error::LoadError;
use crate::lexicon::{Ambiguity, Lexicon};

pub use compiler::{
    FIXED_POINT_ROUNDS, SELF_CHECK_EXPECTED, SELF_CHECK_INPUT, compile_numeral_grammar, factorize,
};

pub const CARDINALS_FILE: &str = "numbers/cardinals.tsv";
pub const ORDINALS_FILE: &str = "numbers/ordinals.tsv";
pub const NOMINATIVE_FILE: &str = "numbers/cardinals_nominative_case.tsv";

/// Leaf-number lexicons. Keys are the leaves of the arithmetic
/// factorization (`0`..`19`, round tens, round hundreds).
#[derive(Debug, Clone)]
pub struct NumeralLexicons {
    /// Cardinal words in every case, nominative first.
    pub cardinal: Lexicon,
    /// Ordinal words, masculine nominative first.
    pub ordinal: Lexicon,
    /// Cardinal words in the nominative case only.
    pub nominative: Lexicon,
}

impl NumeralLexicons {
    pub fn load(data_dir: &Path, deterministic: bool) -> Result<Self, LoadError> {
        Ok(Self {
            cardinal: Lexicon::load(
                &data_dir.join(CARDINALS_FILE),
                Ambiguity::inflected(deterministic),
            )?,
            ordinal: Lexicon::load(
                &data_dir.join(ORDINALS_FILE),
                Ambiguity::inflected(deterministic),
            )?,
            nominative: Lexicon::load(
                &data_dir.join(NOMINATIVE_FILE),
                Ambiguity::for_mode(deterministic),
            )?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumeralClass {
    Cardinal,
    Ordinal,
    /// Nominative case, leading zeros spoken one by one.
    NominativeLimited,
}

impl NumeralClass {
    pub const ALL: [NumeralClass; 3] = [
        NumeralClass::Cardinal,
        NumeralClass::Ordinal,
        NumeralClass::NominativeLimited,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NumeralClass::Cardinal => "cardinal",
            NumeralClass::Ordinal => "ordinal",
            NumeralClass::NominativeLimited => "nominative",
        }
    }
}

impl fmt::Display for NumeralClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumeralClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumeralClass::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown numeral class: {s}"))
    }
}

/// Compiled numeral-name transducers, one per class.
#[derive(Debug, Clone)]
pub struct NumeralNames {
    pub config: GrammarConfig,
    pub cardinal: Fst,
    pub ordinal: Fst,
    pub nominative_limited: Fst,
}

impl NumeralNames {
    pub fn fst(&self, class: NumeralClass) -> &Fst {
        match class {
            NumeralClass::Cardinal => &self.cardinal,
            NumeralClass::Ordinal => &self.ordinal,
            NumeralClass::NominativeLimited => &self.nominative_limited,
        }
    }

    /// The transducer for `class` as a [`Grammar`].
    pub fn grammar(&self, class: NumeralClass) -> NumeralGrammar<'_> {
        NumeralGrammar {
            config: GrammarConfig::new(class.name(), self.config.kind, self.config.deterministic),
            fst: self.fst(class),
        }
    }
}

/// Borrowed view of one numeral-name transducer.
#[derive(Debug, Clone)]
pub struct NumeralGrammar<'a> {
    config: GrammarConfig,
    fst: &'a Fst,
}

impl Grammar for NumeralGrammar<'_> {
    fn config(&self) -> &GrammarConfig {
        &self.config
    }

    fn fst(&self) -> &Fst {
        self.fst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_round_trip() {
        for class in NumeralClass::ALL {
            assert_eq!(class.name().parse::<NumeralClass>().unwrap(), class);
        }
        assert!("telephone".parse::<NumeralClass>().is_err());
    }

    #[test]
    fn missing_data_dir() {
        let err = NumeralLexicons::load(Path::new("/nonexistent/numera"), true).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
