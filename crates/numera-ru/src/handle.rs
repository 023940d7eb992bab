// GrammarHandle: the compiled set of Russian grammars.
//
// Owns the numeral names and the entity grammars built on them. Everything
// is compiled once in `new`; afterwards the handle is read-only and can be
// shared across threads.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use numera_fst::{Fst, Weight};
use tracing::{info, warn};

use crate::config::CompileOptions;
use crate::error::GrammarError;
use crate::numbers::{NumeralClass, NumeralLexicons, NumeralNames, compile_numeral_grammar};
use crate::resources::Resources;
use crate::taggers::compose::EntityGrammar;
use crate::taggers::electronic::{compile_electronic_grammar_with, load_symbols, spelled_normalizer};
use crate::taggers::telephone::compile_telephone_grammar_with;
use crate::Grammar;

/// Grammars reachable through [`GrammarHandle::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarClass {
    Cardinal,
    Ordinal,
    Telephone,
    Electronic,
}

impl GrammarClass {
    pub const ALL: [GrammarClass; 4] = [
        GrammarClass::Cardinal,
        GrammarClass::Ordinal,
        GrammarClass::Telephone,
        GrammarClass::Electronic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GrammarClass::Cardinal => "cardinal",
            GrammarClass::Ordinal => "ordinal",
            GrammarClass::Telephone => "telephone",
            GrammarClass::Electronic => "electronic",
        }
    }
}

impl fmt::Display for GrammarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrammarClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GrammarClass::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown grammar class: {s}"))
    }
}

/// Compiled Russian grammars.
pub struct GrammarHandle {
    options: CompileOptions,
    numbers: NumeralNames,
    telephone: EntityGrammar,
    spelled: Fst,
    electronic: EntityGrammar,
}

impl GrammarHandle {
    /// Compile every grammar from `resources` and the lexicons in `data_dir`.
    pub fn new(
        resources: &Resources,
        data_dir: &Path,
        options: CompileOptions,
    ) -> Result<Self, GrammarError> {
        let limits = options.limits();
        let lexicons = NumeralLexicons::load(data_dir, options.deterministic)?;
        let numbers = compile_numeral_grammar(resources, &lexicons, &options)?;
        let telephone = compile_telephone_grammar_with(&limits, &numbers, options.deterministic)?;

        let symbols = load_symbols(data_dir, options.deterministic)?;
        let spelled = spelled_normalizer(&symbols);
        let electronic = compile_electronic_grammar_with(&limits, &spelled, options.deterministic)?;

        info!(
            data_dir = %data_dir.display(),
            deterministic = options.deterministic,
            "grammar handle ready"
        );
        Ok(Self {
            options,
            numbers,
            telephone,
            spelled,
            electronic,
        })
    }

    /// Compile from a data directory: options from `numera.toml` if present,
    /// then the resource files. The reference resources are used only when
    /// both resource files are absent; a lone or malformed file is an error.
    pub fn open(data_dir: &Path) -> Result<Self, GrammarError> {
        let options = CompileOptions::load(data_dir)?;
        Self::open_with(data_dir, options)
    }

    pub fn open_with(data_dir: &Path, options: CompileOptions) -> Result<Self, GrammarError> {
        let resources = if Resources::absent_from(data_dir) {
            warn!(
                data_dir = %data_dir.display(),
                "no resource files in data directory; using reference resources"
            );
            Resources::reference()?
        } else {
            Resources::init(data_dir)?
        };
        Self::new(&resources, data_dir, options)
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn numeral_names(&self) -> &NumeralNames {
        &self.numbers
    }

    pub fn telephone_grammar(&self) -> &EntityGrammar {
        &self.telephone
    }

    pub fn electronic_grammar(&self) -> &EntityGrammar {
        &self.electronic
    }

    /// Digit string to cardinal words.
    pub fn cardinal(&self, input: &str) -> Result<Vec<(String, Weight)>, GrammarError> {
        self.numbers
            .grammar(NumeralClass::Cardinal)
            .apply_top_k(input, self.options.top_k)
    }

    /// Digit string to ordinal words.
    pub fn ordinal(&self, input: &str) -> Result<Vec<(String, Weight)>, GrammarError> {
        self.numbers
            .grammar(NumeralClass::Ordinal)
            .apply_top_k(input, self.options.top_k)
    }

    /// Written telephone number to `telephone { number_part: "..." }`.
    pub fn telephone(&self, input: &str) -> Result<Vec<(String, Weight)>, GrammarError> {
        self.telephone.apply_top_k(input, self.options.top_k)
    }

    /// Written telephone number to its spoken words, without framing.
    pub fn verbalize_telephone(&self, input: &str) -> Result<Vec<(String, Weight)>, GrammarError> {
        self.telephone.verbalize(input, self.options.top_k)
    }

    /// Spelled address to `electronic { username: "..." }`.
    pub fn electronic(&self, input: &str) -> Result<Vec<(String, Weight)>, GrammarError> {
        self.electronic.apply_top_k(input, self.options.top_k)
    }

    /// Written address to its spelled form.
    pub fn spell_electronic(&self, input: &str) -> Result<Vec<(String, Weight)>, GrammarError> {
        let k = self.electronic.config.output_limit(self.options.top_k);
        Ok(numera_fst::top_k_paths(&self.spelled, input, k)?)
    }

    pub fn apply(
        &self,
        class: GrammarClass,
        input: &str,
    ) -> Result<Vec<(String, Weight)>, GrammarError> {
        match class {
            GrammarClass::Cardinal => self.cardinal(input),
            GrammarClass::Ordinal => self.ordinal(input),
            GrammarClass::Telephone => self.telephone(input),
            GrammarClass::Electronic => self.electronic(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GrammarHandle>();
    }

    #[test]
    fn class_names_round_trip() {
        for class in GrammarClass::ALL {
            assert_eq!(class.to_string().parse::<GrammarClass>().unwrap(), class);
        }
        assert!("nominative".parse::<GrammarClass>().is_err());
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("numera-handle-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn lone_corrupt_archive_is_a_load_error() {
        let dir = scratch_dir("corrupt-archive");
        std::fs::write(dir.join(crate::resources::ARITHMETIC_ARCHIVE), b"garbage").unwrap();

        let err = GrammarHandle::open_with(&dir, CompileOptions::default())
            .err()
            .expect("corrupt archive must not fall back");
        assert!(matches!(err, GrammarError::Load(_)), "{err}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn lone_acceptor_is_a_load_error() {
        let dir = scratch_dir("lone-acceptor");
        let reference = Resources::reference().unwrap();
        std::fs::write(dir.join(crate::resources::ACCEPTOR_FILE), reference.acceptor.to_bytes())
            .unwrap();

        let err = GrammarHandle::open_with(&dir, CompileOptions::default())
            .err()
            .expect("missing archive must not fall back");
        assert!(
            matches!(err, GrammarError::Load(crate::error::LoadError::Io { .. })),
            "{err}"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
