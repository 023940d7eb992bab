// Reference arithmetic resources for numbers 0..999.
//
// Expressions are either a single leaf (`7`, `13`, `40`, `200`) or a flat
// sum of leaves in brackets (`(+ 200 30 5 +)`). Leaves are the numbers that
// have their own lexicon entry: 0..19, round tens, round hundreds.

use numera_fst::{
    Fst, accept, any_of, closure, concat, concat_all, delete, insert, union, union_all,
};

use crate::russian::alphabet::DIGITS;

const NONZERO: &str = "123456789";
const TWO_TO_NINE: &str = "23456789";

/// Every character an arithmetic expression is written with.
pub const EXPRESSION_CHARS: &str = "0123456789(+) ";

const OPEN: &str = "(+ ";
const CLOSE: &str = " +)";

/// Acceptor for a single leaf.
pub fn leaf() -> Fst {
    union_all([
        &accept("0"),
        &any_of(NONZERO),
        &teen_or_round_ten(),
        &concat(&any_of(NONZERO), &accept("00")),
    ])
}

/// `10`..`19` and `20`, `30`, .. `90`, read as themselves.
fn teen_or_round_ten() -> Fst {
    union(
        &concat(&accept("1"), &any_of(DIGITS)),
        &concat(&any_of(TWO_TO_NINE), &accept("0")),
    )
}

/// `56` -> `50 6`, unbracketed.
fn tens_and_units() -> Fst {
    concat_all([&any_of(TWO_TO_NINE), &insert("0 "), &any_of(NONZERO)])
}

fn bracket(body: &Fst) -> Fst {
    concat_all([&insert(OPEN), body, &insert(CLOSE)])
}

/// Factorization (`DELTA_STAR`): digit string to arithmetic expression.
///
/// `230` -> `(+ 200 30 +)`, `235` -> `(+ 200 30 5 +)`, `56` -> `(+ 50 6 +)`,
/// `205` -> `(+ 200 5 +)`. Leaves map to themselves. Leading zeros are not
/// accepted.
pub fn factorization() -> Fst {
    let two_digit = union(&teen_or_round_ten(), &bracket(&tens_and_units()));
    let round_hundred = concat(&any_of(NONZERO), &accept("00"));

    let hundred_head = concat(&any_of(NONZERO), &insert("00 "));
    let hundred_tail = union_all([
        &concat(&delete("0"), &any_of(NONZERO)),
        &teen_or_round_ten(),
        &tens_and_units(),
    ]);
    let hundreds = bracket(&concat(&hundred_head, &hundred_tail));

    union_all([
        &accept("0"),
        &any_of(NONZERO),
        &two_digit,
        &round_hundred,
        &hundreds,
    ])
}

/// Restricted arithmetic (`IARITHMETIC_RESTRICTED`): identity over the
/// expression alphabet.
pub fn restricted_arithmetic() -> Fst {
    closure(&any_of(EXPRESSION_CHARS), 0, None)
}

/// Numeral acceptor (`g.fst`): a leaf or a flat sum of at least two leaves.
pub fn acceptor() -> Fst {
    let more = closure(&concat(&accept(" "), &leaf()), 1, None);
    union(
        &leaf(),
        &concat_all([&accept(OPEN), &leaf(), &more, &accept(CLOSE)]),
    )
}

/// Leaf transducer (`LEAVES`): expression to space-separated leaves.
pub fn leaves() -> Fst {
    let more = closure(&concat(&accept(" "), &leaf()), 1, None);
    union(
        &leaf(),
        &concat_all([&delete(OPEN), &leaf(), &more, &delete(CLOSE)]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use numera_fst::{top_k_paths, top_path};

    fn factor(input: &str) -> Option<String> {
        top_path(&factorization(), input).ok().map(|(s, _)| s)
    }

    #[test]
    fn factorization_examples() {
        assert_eq!(factor("230").as_deref(), Some("(+ 200 30 +)"));
        assert_eq!(factor("235").as_deref(), Some("(+ 200 30 5 +)"));
        assert_eq!(factor("56").as_deref(), Some("(+ 50 6 +)"));
        assert_eq!(factor("205").as_deref(), Some("(+ 200 5 +)"));
        assert_eq!(factor("913").as_deref(), Some("(+ 900 13 +)"));
    }

    #[test]
    fn leaves_are_identity() {
        for leaf in ["0", "7", "13", "40", "300"] {
            assert_eq!(factor(leaf).as_deref(), Some(leaf));
        }
    }

    #[test]
    fn leading_zeros_and_long_inputs_rejected() {
        assert_eq!(factor("08"), None);
        assert_eq!(factor("007"), None);
        assert_eq!(factor("1000"), None);
        assert_eq!(factor(""), None);
    }

    #[test]
    fn factorization_is_functional() {
        for input in ["230", "200", "19", "5"] {
            assert_eq!(top_k_paths(&factorization(), input, 3).unwrap().len(), 1);
        }
    }

    #[test]
    fn acceptor_takes_leaves_and_flat_sums() {
        let g = acceptor();
        assert!(top_path(&g, "200").is_ok());
        assert!(top_path(&g, "(+ 200 30 5 +)").is_ok());
        assert!(top_path(&g, "(+ 200 +)").is_err());
        assert!(top_path(&g, "(+ 200 (+ 30 5 +) +)").is_err());
    }

    #[test]
    fn leaves_strip_brackets() {
        let p = leaves();
        assert_eq!(top_path(&p, "(+ 200 30 +)").unwrap().0, "200 30");
        assert_eq!(top_path(&p, "40").unwrap().0, "40");
    }

    #[test]
    fn restricted_arithmetic_is_identity() {
        let a = restricted_arithmetic();
        assert_eq!(top_path(&a, "(+ 50 6 +)").unwrap().0, "(+ 50 6 +)");
        assert!(top_path(&a, "x").is_err());
    }
}
