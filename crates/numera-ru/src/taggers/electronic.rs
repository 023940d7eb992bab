// Electronic addresses: spelled-out symbols back to `ab@nd.ru`.
//
// The tagger is the inverse of the forward spelling grammar, which reads an
// address one symbol at a time (`ab@nd.ru` -> `эй би собака эн ди точка эр ю`).

use std::path::Path;

use numera_core::GrammarConfig;
use numera_fst::{Fst, Limits, closure, insert, invert, optimize_with};

use crate::GrammarError;
use crate::error::LoadError;
use crate::lexicon::{Ambiguity, Lexicon, sequence};
use crate::russian::alphabet::electronic_char;
use crate::taggers::compose::{EntityGrammar, delete_field, wrap_field};

pub const NAME: &str = "electronic";

pub const SYMBOLS_FILE: &str = "electronic/symbols.tsv";

const USERNAME: &str = "username";

/// Load the symbol-name lexicon (`a<TAB>эй`, `@<TAB>собака`, ...).
pub fn load_symbols(data_dir: &Path, deterministic: bool) -> Result<Lexicon, LoadError> {
    Lexicon::load(&data_dir.join(SYMBOLS_FILE), Ambiguity::for_mode(deterministic))
}

/// Forward spelling grammar: symbol names joined by single spaces.
pub fn spelled_normalizer(symbols: &Lexicon) -> Fst {
    sequence(&symbols.to_fst(), &insert(" "))
}

pub fn compile_electronic_grammar(
    tn_grammar: &Fst,
    deterministic: bool,
) -> Result<EntityGrammar, GrammarError> {
    compile_electronic_grammar_with(&Limits::default(), tn_grammar, deterministic)
}

pub fn compile_electronic_grammar_with(
    limits: &Limits,
    tn_grammar: &Fst,
    deterministic: bool,
) -> Result<EntityGrammar, GrammarError> {
    let inverted = optimize_with(limits, &invert(tn_grammar))?;
    let tag = wrap_field(&inverted, USERNAME);
    let verbalize = delete_field(&closure(&electronic_char(), 1, None), USERNAME);
    Ok(EntityGrammar::compose_with(
        limits,
        GrammarConfig::classify(NAME, deterministic),
        &tag,
        &verbalize,
        USERNAME,
    )?)
}
