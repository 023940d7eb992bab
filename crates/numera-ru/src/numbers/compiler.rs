// Numeral grammar compiler.
//
// FG = D ∘ (A ∘ (A ∘ (A ∘ G)))  (fixed point over A, each step optimized)
// names[c] = FG ∘ (P ∘ L[c])

use numera_core::GrammarConfig;
use numera_fst::{
    Fst, FstError, Limits, accept, closure, compose_with, concat, cross, optimize_with,
    top_path_with,
};
use tracing::{debug, info};

use crate::config::CompileOptions;
use crate::error::GrammarError;
use crate::lexicon::sequence;
use crate::numbers::{NumeralLexicons, NumeralNames};
use crate::resources::Resources;

/// Default number of arithmetic/acceptor intersection rounds.
pub const FIXED_POINT_ROUNDS: usize = 3;

/// Probe run through the factorization after intersection.
pub const SELF_CHECK_INPUT: &str = "230";
pub const SELF_CHECK_EXPECTED: &str = "(+ 200 30 +)";

const ZERO: &str = "0";

/// Intersect the factorization with the numeral acceptor and verify the
/// result on [`SELF_CHECK_INPUT`].
pub fn factorize(resources: &Resources, options: &CompileOptions) -> Result<Fst, GrammarError> {
    let limits = options.limits();
    let mut current = resources.acceptor.clone();

    for round in 1..=options.max_fixed_point_rounds {
        let next = optimize_with(
            &limits,
            &compose_with(&limits, &resources.restricted_arithmetic, &current)?,
        )?;
        let shrunk = next.num_states() < current.num_states();
        debug!(round, states = next.num_states(), "arithmetic intersection round");
        current = next;
        if round >= 2 && !shrunk {
            break;
        }
    }

    let fg = optimize_with(
        &limits,
        &compose_with(&limits, &resources.factorization, &current)?,
    )?;
    self_check(&limits, &fg)?;
    Ok(fg)
}

fn self_check(limits: &Limits, fg: &Fst) -> Result<(), GrammarError> {
    let actual = match top_path_with(limits, fg, SELF_CHECK_INPUT) {
        Ok((output, _)) => output,
        Err(FstError::NoPath) => String::new(),
        Err(e) => return Err(e.into()),
    };
    if actual != SELF_CHECK_EXPECTED {
        return Err(GrammarError::SelfCheckFailure {
            input: SELF_CHECK_INPUT.to_string(),
            expected: SELF_CHECK_EXPECTED.to_string(),
            actual,
        });
    }
    Ok(())
}

/// Build the cardinal, ordinal and nominative-limited numeral names.
pub fn compile_numeral_grammar(
    resources: &Resources,
    lexicons: &NumeralLexicons,
    options: &CompileOptions,
) -> Result<NumeralNames, GrammarError> {
    let limits = options.limits();
    let fg = factorize(resources, options)?;

    let space = accept(" ");
    let cardinal = lexicons.cardinal.to_fst();
    let nominative = lexicons.nominative.to_fst();

    let cardinal_l = sequence(&cardinal, &space);
    let ordinal_l = concat(
        &closure(&concat(&cardinal, &space), 0, None),
        &lexicons.ordinal.to_fst(),
    );
    let nominative_l = sequence(&nominative, &space);

    let names = |lexicon: &Fst| -> Result<Fst, FstError> {
        let lexicon = optimize_with(&limits, lexicon)?;
        let spoken_leaves = optimize_with(&limits, &compose_with(&limits, &resources.leaves, &lexicon)?)?;
        optimize_with(&limits, &compose_with(&limits, &fg, &spoken_leaves)?)
    };

    let cardinal = names(&cardinal_l)?;
    let ordinal = names(&ordinal_l)?;
    let nominative = names(&nominative_l)?;

    let zero_word = lexicons.nominative.require(ZERO)?;
    let zero_prefix = closure(&cross(ZERO, &format!("{zero_word} ")), 0, None);
    let nominative_limited = optimize_with(&limits, &concat(&zero_prefix, &nominative))?;

    info!(
        cardinal = cardinal.num_states(),
        ordinal = ordinal.num_states(),
        nominative_limited = nominative_limited.num_states(),
        "numeral names compiled"
    );

    Ok(NumeralNames {
        config: GrammarConfig::classify("number_names", options.deterministic),
        cardinal,
        ordinal,
        nominative_limited,
    })
}
