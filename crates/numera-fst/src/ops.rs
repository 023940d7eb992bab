// Constructors and rational operations.
//
// None of these can fail and their results are linear in the operand
// sizes, so they take no limits. Results may contain
// epsilon arcs; run `optimize` before composing long chains.

use crate::symbols::{label, to_labels};
use crate::weighted::{Arc, Fst};
use crate::{EPSILON, Label, Weight};

/// Transducer mapping `a` to `b` at zero weight.
///
/// Symbols are paired position by position; the shorter side is padded
/// with epsilon.
pub fn cross(a: &str, b: &str) -> Fst {
    let input = to_labels(a);
    let output = to_labels(b);
    let len = input.len().max(output.len());

    let mut fst = Fst::new();
    let mut state = fst.add_state();
    fst.set_start(state);
    for i in 0..len {
        let next = fst.add_state();
        let ilabel = input.get(i).copied().unwrap_or(EPSILON);
        let olabel = output.get(i).copied().unwrap_or(EPSILON);
        fst.add_arc(state, Arc::new(ilabel, olabel, 0.0, next));
        state = next;
    }
    fst.set_final(state, 0.0);
    fst
}

/// Acceptor for exactly `s`.
pub fn accept(s: &str) -> Fst {
    cross(s, s)
}

/// Transducer mapping the empty string to `s`.
pub fn insert(s: &str) -> Fst {
    cross("", s)
}

/// Transducer mapping `s` to the empty string.
pub fn delete(s: &str) -> Fst {
    cross(s, "")
}

/// Acceptor for the empty string only.
pub fn epsilon() -> Fst {
    accept("")
}

/// Acceptor for any single character of `chars`.
pub fn any_of(chars: &str) -> Fst {
    let mut labels: Vec<Label> = chars.chars().map(label).filter(|&l| l != EPSILON).collect();
    labels.sort_unstable();
    labels.dedup();

    let mut fst = Fst::new();
    let s0 = fst.add_state();
    let s1 = fst.add_state();
    fst.set_start(s0);
    fst.set_final(s1, 0.0);
    for l in labels {
        fst.add_arc(s0, Arc::new(l, l, 0.0, s1));
    }
    fst
}

/// Path through `x` followed by a path through `y`.
pub fn concat(x: &Fst, y: &Fst) -> Fst {
    let (Some(_), Some(y_start)) = (x.start(), y.start()) else {
        return Fst::new();
    };

    let mut out = x.clone();
    let offset = out.append(y);
    for state in x.states() {
        if let Some(weight) = x.final_weight(state) {
            out.clear_final(state);
            out.add_arc(state, Arc::epsilon(weight, y_start + offset));
        }
    }
    out
}

/// Concatenation of a sequence of transducers (epsilon if empty).
pub fn concat_all<'a>(parts: impl IntoIterator<Item = &'a Fst>) -> Fst {
    let mut iter = parts.into_iter();
    let Some(first) = iter.next() else {
        return epsilon();
    };
    iter.fold(first.clone(), |acc, next| concat(&acc, next))
}

/// Alternation of `x` and `y`.
pub fn union(x: &Fst, y: &Fst) -> Fst {
    union_all([x, y])
}

/// Alternation of any number of transducers under a single new start state.
pub fn union_all<'a>(parts: impl IntoIterator<Item = &'a Fst>) -> Fst {
    let mut out = Fst::new();
    let start = out.add_state();
    out.set_start(start);
    let mut any = false;
    for part in parts {
        let Some(part_start) = part.start() else {
            continue;
        };
        let offset = out.append(part);
        out.add_arc(start, Arc::epsilon(0.0, part_start + offset));
        any = true;
    }
    if any { out } else { Fst::new() }
}

/// `x` or the empty string.
pub fn optional(x: &Fst) -> Fst {
    union(x, &epsilon())
}

/// Between `min` and `max` repetitions of `x`; `max = None` is unbounded.
///
/// Bounded repetitions are nested (`x (x (x)?)?)?`) so each repetition
/// count is reachable through exactly one sequence of choices.
pub fn closure(x: &Fst, min: usize, max: Option<usize>) -> Fst {
    if let Some(max) = max {
        if max < min {
            return Fst::new();
        }
    }

    let mut result = epsilon();
    for _ in 0..min {
        result = concat(&result, x);
    }

    match max {
        None => concat(&result, &star(x)),
        Some(max) => {
            let mut tail: Option<Fst> = None;
            for _ in min..max {
                let body = match tail {
                    None => x.clone(),
                    Some(t) => concat(x, &t),
                };
                tail = Some(optional(&body));
            }
            match tail {
                Some(t) => concat(&result, &t),
                None => result,
            }
        }
    }
}

/// Kleene star.
fn star(x: &Fst) -> Fst {
    let Some(x_start) = x.start() else {
        return epsilon();
    };

    let mut out = Fst::new();
    let start = out.add_state();
    out.set_start(start);
    out.set_final(start, 0.0);
    let offset = out.append(x);
    out.add_arc(start, Arc::epsilon(0.0, x_start + offset));
    for state in x.states() {
        if let Some(weight) = x.final_weight(state) {
            out.add_arc(state + offset, Arc::epsilon(weight, x_start + offset));
        }
    }
    out
}

/// Swap input and output labels on every arc.
pub fn invert(x: &Fst) -> Fst {
    map_arcs(x, |arc| Arc {
        ilabel: arc.olabel,
        olabel: arc.ilabel,
        ..arc
    })
}

/// Acceptor for the input side of `x`.
pub fn project_input(x: &Fst) -> Fst {
    map_arcs(x, |arc| Arc {
        olabel: arc.ilabel,
        ..arc
    })
}

/// Acceptor for the output side of `x`.
pub fn project_output(x: &Fst) -> Fst {
    map_arcs(x, |arc| Arc {
        ilabel: arc.olabel,
        ..arc
    })
}

/// Add `weight` to every complete path of `x`.
///
/// `weight` must be finite and non-negative; path search relies on it.
pub fn add_weight(x: &Fst, weight: Weight) -> Fst {
    debug_assert!(
        weight.is_finite() && weight >= 0.0,
        "add_weight: negative or non-finite weight {weight}"
    );
    let mut out = x.clone();
    for state in x.states() {
        if let Some(w) = x.final_weight(state) {
            out.set_final(state, w + weight);
        }
    }
    out
}

fn map_arcs(x: &Fst, f: impl Fn(Arc) -> Arc) -> Fst {
    let mut out = x.clone();
    for state in x.states() {
        for arc in out.arcs_mut(state) {
            *arc = f(*arc);
        }
    }
    out
}
