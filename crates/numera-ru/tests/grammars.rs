//! End-to-end tests over the shipped data directory and the reference
//! arithmetic resources.
//!
//! NUMERA_DATA_DIR overrides the data directory (default: the crate's
//! `data/`). NUMERA_LOG sets the log filter for the captured test output.
//!
//! Run: cargo test -p numera-ru --test grammars

use std::path::PathBuf;
use std::sync::OnceLock;

use numera_core::token::parse_tagged;
use numera_fst::{
    FstError, Limits, any_of, closure, compose_with, invert, top_k_paths, top_path,
};
use numera_ru::handle::GrammarHandle;
use numera_ru::numbers::factorize;
use numera_ru::taggers::telephone::PREFER_STRIP_PLUS;
use numera_ru::{CompileOptions, GrammarError, Resources};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NUMERA_DATA_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn init_log() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("NUMERA_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn deterministic() -> &'static GrammarHandle {
    static HANDLE: OnceLock<GrammarHandle> = OnceLock::new();
    HANDLE.get_or_init(|| {
        init_log();
        GrammarHandle::open_with(&data_dir(), CompileOptions::default())
            .expect("failed to compile deterministic grammars")
    })
}

fn ranked() -> &'static GrammarHandle {
    static HANDLE: OnceLock<GrammarHandle> = OnceLock::new();
    HANDLE.get_or_init(|| {
        init_log();
        let options = CompileOptions {
            deterministic: false,
            top_k: 10,
            ..CompileOptions::default()
        };
        GrammarHandle::open_with(&data_dir(), options)
            .expect("failed to compile ranked grammars")
    })
}

fn outputs(results: Vec<(String, f32)>) -> Vec<String> {
    results.into_iter().map(|(s, _)| s).collect()
}

// ---------------------------------------------------------------------------
// Numeral names
// ---------------------------------------------------------------------------

#[test]
fn deterministic_cardinal_has_single_output() {
    let results = deterministic().cardinal("230").unwrap();
    assert_eq!(outputs(results), vec!["двести тридцать"]);
}

#[test]
fn cardinal_examples() {
    let handle = deterministic();
    for (input, expected) in [
        ("0", "ноль"),
        ("7", "семь"),
        ("12", "двенадцать"),
        ("40", "сорок"),
        ("56", "пятьдесят шесть"),
        ("205", "двести пять"),
        ("999", "девятьсот девяносто девять"),
    ] {
        assert_eq!(outputs(handle.cardinal(input).unwrap()), vec![expected], "{input}");
    }
}

#[test]
fn ordinal_examples() {
    let handle = deterministic();
    assert_eq!(outputs(handle.ordinal("230").unwrap()), vec!["двести тридцатый"]);
    assert_eq!(outputs(handle.ordinal("3").unwrap()), vec!["третий"]);
    assert_eq!(outputs(handle.ordinal("41").unwrap()), vec!["сорок первый"]);
}

#[test]
fn unsupported_numerals_have_no_output() {
    let handle = deterministic();
    assert!(handle.cardinal("1000").unwrap().is_empty());
    assert!(handle.cardinal("07").unwrap().is_empty());
    assert!(handle.cardinal("abc").unwrap().is_empty());
}

#[test]
fn self_check_on_reference_resources() {
    let resources = Resources::reference().unwrap();
    let fg = factorize(&resources, &CompileOptions::default()).unwrap();
    assert_eq!(top_path(&fg, "230").unwrap().0, "(+ 200 30 +)");
}

#[test]
fn ranked_cardinal_orders_case_forms() {
    let results = ranked().cardinal("2").unwrap();
    assert!(results.len() > 1);
    assert_eq!(results[0].0, "два");
    for pair in results.windows(2) {
        assert!(pair[0].1 <= pair[1].1);
    }
    let mut strings = outputs(results.clone());
    strings.sort();
    strings.dedup();
    assert_eq!(strings.len(), results.len());
}

#[test]
fn ranked_ordinal_orders_distinct_forms() {
    let results = ranked().ordinal("230").unwrap();
    assert!(results.len() > 1);
    assert_eq!(results[0], ("двести тридцатый".to_string(), 0.0));
    for pair in results.windows(2) {
        assert!(pair[0].1 <= pair[1].1);
    }
    let mut strings = outputs(results.clone());
    strings.sort();
    strings.dedup();
    assert_eq!(strings.len(), results.len());
}

// ---------------------------------------------------------------------------
// Telephone
// ---------------------------------------------------------------------------

const SPOKEN: &str = "восемь девятьсот тринадцать девятьсот восемьдесят пять пятьдесят шесть семьдесят восемь";

#[test]
fn telephone_with_country_code() {
    let results = deterministic().telephone("8-913-985-56-78").unwrap();
    assert_eq!(
        outputs(results),
        vec![format!("telephone {{ number_part: \"{SPOKEN}\" }}")]
    );
}

#[test]
fn telephone_plus_prefix_is_identical() {
    let handle = deterministic();
    let plain = outputs(handle.telephone("8-913-985-56-78").unwrap());
    let plus = outputs(handle.telephone("+8-913-985-56-78").unwrap());
    assert_eq!(plain, plus);
}

#[test]
fn telephone_leading_zero_in_group() {
    let results = deterministic().verbalize_telephone("8-913-985-56-08").unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].0.contains("ноль восемь"), "{}", results[0].0);
}

#[test]
fn telephone_output_parses_as_tagged_token() {
    let results = deterministic().telephone("913-985-56-78").unwrap();
    let token = parse_tagged(&results[0].0).unwrap();
    assert_eq!(token.class, "telephone");
    assert_eq!(
        token.field("number_part"),
        Some("девятьсот тринадцать девятьсот восемьдесят пять пятьдесят шесть семьдесят восемь")
    );
}

#[test]
fn ranked_telephone_adds_no_ambiguity() {
    // Unique-key nominative names stay unambiguous inside the ranked grammar.
    let results = ranked().telephone("+8-913-985-56-08").unwrap();
    assert_eq!(results.len(), 1, "{results:?}");
    let (output, weight) = &results[0];
    assert!(output.contains("пятьдесят шесть ноль восемь"), "{output}");
    assert!((weight - PREFER_STRIP_PLUS).abs() < 1e-6, "{weight}");

    let plain = ranked().telephone("8-913-985-56-08").unwrap();
    assert_eq!(plain.len(), 1);
    assert_eq!(&plain[0].0, output);
    assert_eq!(plain[0].1, 0.0);
}

#[test]
fn malformed_telephone_has_no_output() {
    let handle = deterministic();
    assert!(handle.telephone("8-913-985-5678").unwrap().is_empty());
    assert!(handle.telephone("8 913 985 56 78").unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Electronic
// ---------------------------------------------------------------------------

#[test]
fn electronic_inverts_spelled_form() {
    let handle = deterministic();
    let spelled = handle.spell_electronic("ab@nd.ru").unwrap();
    assert_eq!(outputs(spelled.clone()), vec!["эй би собака эн ди точка эр ю"]);

    let results = handle.electronic(&spelled[0].0).unwrap();
    assert_eq!(
        outputs(results),
        vec!["electronic { username: \"ab@nd.ru\" }"]
    );
}

#[test]
fn ranked_electronic_has_single_reading() {
    let results = ranked().electronic("эй би собака эн ди точка эр ю").unwrap();
    assert_eq!(
        results,
        vec![("electronic { username: \"ab@nd.ru\" }".to_string(), 0.0)]
    );
}

#[test]
fn electronic_rejects_unknown_words() {
    assert!(deterministic().electronic("эй би решётка").unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

#[test]
fn composing_past_the_ceiling_fails() {
    let digits = closure(&any_of("0123456789"), 0, Some(200));
    let err = compose_with(&Limits::with_max_states(100), &digits, &digits).unwrap_err();
    assert!(matches!(err, FstError::GrammarTooLarge { limit: 100, .. }));
}

#[test]
fn handle_build_past_the_ceiling_fails() {
    let options = CompileOptions {
        max_states: 50,
        ..CompileOptions::default()
    };
    let err = GrammarHandle::open_with(&data_dir(), options)
        .err()
        .expect("compilation should fail");
    assert!(matches!(
        err,
        GrammarError::Fst(FstError::GrammarTooLarge { limit: 50, .. })
    ));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn nominative_inversion_recovers_digits(n in 0u32..1000, zeros in 0usize..3) {
        let names = deterministic().numeral_names();
        let input = format!("{}{n}", "0".repeat(zeros));
        let (spoken, _) = top_path(&names.nominative_limited, &input).unwrap();
        let back = top_k_paths(&invert(&names.nominative_limited), &spoken, 2).unwrap();
        prop_assert_eq!(back.len(), 1);
        prop_assert_eq!(&back[0].0, &input);
    }

    #[test]
    fn every_number_below_a_thousand_has_a_cardinal(n in 0u32..1000) {
        let results = deterministic().cardinal(&n.to_string()).unwrap();
        prop_assert_eq!(results.len(), 1);
    }
}
