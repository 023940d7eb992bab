// Telephone numbers: `8-913-985-56-78` to words.
//
// Tagger: optional `country_code: "..."` then `number_part: "..."` with the
// number written as groups of 3-3-2-2 digits joined by `-`. Each group is
// read as a nominative number; leading zeros are read one by one.

use numera_core::GrammarConfig;
use numera_fst::{
    Fst, Limits, Weight, add_weight, closure, compose_with, concat, concat_all, cross, delete,
    insert, optional,
};

use crate::GrammarError;
use crate::numbers::NumeralNames;
use crate::russian::alphabet::{digit, ru_alpha_or_space};
use crate::taggers::compose::{EntityGrammar, delete_field, delete_space, wrap_field};

pub const NAME: &str = "telephone";

/// Cost of reading a leading `+` by dropping it.
pub const PREFER_STRIP_PLUS: Weight = 0.1;

const COUNTRY_CODE: &str = "country_code";
const NUMBER_PART: &str = "number_part";

/// Digit-group sizes of the number part.
const GROUPS: [usize; 4] = [3, 3, 2, 2];

pub fn compile_telephone_grammar(
    names: &NumeralNames,
    deterministic: bool,
) -> Result<EntityGrammar, GrammarError> {
    compile_telephone_grammar_with(&Limits::default(), names, deterministic)
}

pub fn compile_telephone_grammar_with(
    limits: &Limits,
    names: &NumeralNames,
    deterministic: bool,
) -> Result<EntityGrammar, GrammarError> {
    let tag = tagger(limits, &names.nominative_limited)?;
    Ok(EntityGrammar::compose_with(
        limits,
        GrammarConfig::classify(NAME, deterministic),
        &tag,
        &verbalizer(),
        NUMBER_PART,
    )?)
}

fn tagger(limits: &Limits, number: &Fst) -> Result<Fst, GrammarError> {
    let separator = cross("-", " ");

    let plus = optional(&add_weight(&delete("+"), PREFER_STRIP_PLUS));
    let country_code = wrap_field(&concat_all([&plus, number, &separator]), COUNTRY_CODE);
    let country_code = optional(&concat(&country_code, &insert(" ")));

    let mut parts = Vec::with_capacity(GROUPS.len() * 2);
    for (i, &width) in GROUPS.iter().enumerate() {
        if i > 0 {
            parts.push(separator.clone());
        }
        let digits = closure(&digit(), width, Some(width));
        parts.push(compose_with(limits, &digits, number)?);
    }
    let number_part = wrap_field(&concat_all(&parts), NUMBER_PART);

    Ok(concat(&country_code, &number_part))
}

fn verbalizer() -> Fst {
    let content = closure(&ru_alpha_or_space(), 1, None);
    let country_code = optional(&concat(&delete_field(&content, COUNTRY_CODE), &delete_space()));
    concat(&country_code, &delete_field(&content, NUMBER_PART))
}
