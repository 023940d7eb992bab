//! Property-based tests for the transducer algebra using proptest.
//!
//! Each property builds small transducers from random strings and checks
//! the language-level meaning of an operation through `top_k_paths`.

use numera_fst::*;
use proptest::prelude::*;

fn word_strategy() -> impl Strategy<Value = String> {
    "[abc]{0,4}"
}

fn entry_strategy() -> impl Strategy<Value = (String, String, u8)> {
    ("[12]{1,2}", "[xyz]{0,3}", 0u8..4)
}

fn accepts(fst: &Fst, input: &str) -> bool {
    top_path(fst, input).is_ok()
}

proptest! {
    #[test]
    fn union_accepts_exactly_both_operands(a in word_strategy(), b in word_strategy(), w in word_strategy()) {
        let fst = union(&accept(&a), &accept(&b));
        prop_assert_eq!(accepts(&fst, &w), w == a || w == b);
    }

    #[test]
    fn concat_accepts_the_joined_string(a in word_strategy(), b in word_strategy()) {
        let fst = concat(&accept(&a), &accept(&b));
        let joined = format!("{a}{b}");
        prop_assert!(accepts(&fst, &joined));
    }

    #[test]
    fn bounded_closure_counts_repetitions(n in 0usize..6, min in 0usize..3, extra in 0usize..3) {
        let max = min + extra;
        let fst = closure(&accept("ab"), min, Some(max));
        let input = "ab".repeat(n);
        prop_assert_eq!(accepts(&fst, &input), n >= min && n <= max);
    }

    #[test]
    fn inversion_recovers_the_input(a in word_strategy(), b in "[xyz]{0,4}") {
        let forward = cross(&a, &b);
        let (spoken, _) = top_path(&forward, &a).unwrap();
        prop_assert_eq!(&spoken, &b);
        let (back, _) = top_path(&invert(&forward), &spoken).unwrap();
        prop_assert_eq!(back, a);
    }

    #[test]
    fn optimize_preserves_best_outputs(entries in prop::collection::vec(entry_strategy(), 1..8)) {
        let parts: Vec<Fst> = entries
            .iter()
            .map(|(i, o, w)| add_weight(&cross(i, o), *w as f32 * 0.5))
            .collect();
        let fst = union_all(&parts);
        let optimized = optimize(&fst).unwrap();
        for (input, _, _) in &entries {
            let mut before = top_k_paths(&fst, input, 16).unwrap();
            let mut after = top_k_paths(&optimized, input, 16).unwrap();
            before.sort_by(|a, b| a.0.cmp(&b.0));
            after.sort_by(|a, b| a.0.cmp(&b.0));
            prop_assert_eq!(before, after);
        }
    }

    #[test]
    fn top_k_is_sorted_and_distinct(entries in prop::collection::vec(entry_strategy(), 1..10), k in 1usize..6) {
        let parts: Vec<Fst> = entries
            .iter()
            .map(|(i, o, w)| add_weight(&cross(i, o), *w as f32))
            .collect();
        let fst = union_all(&parts);
        let input = &entries[0].0;
        let results = top_k_paths(&fst, input, k).unwrap();
        prop_assert!(!results.is_empty());
        prop_assert!(results.len() <= k);
        for pair in results.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].1);
            prop_assert_ne!(&pair[0].0, &pair[1].0);
        }
        let mut outputs: Vec<&String> = results.iter().map(|(s, _)| s).collect();
        outputs.sort();
        outputs.dedup();
        prop_assert_eq!(outputs.len(), results.len());
    }

    #[test]
    fn compose_with_identity_is_neutral(a in word_strategy(), b in "[xyz]{0,3}") {
        let mapping = cross(&a, &b);
        let identity = closure(&any_of("xyz"), 0, None);
        let composed = compose(&mapping, &identity).unwrap();
        prop_assert_eq!(top_path(&composed, &a).unwrap().0, b);
    }
}
