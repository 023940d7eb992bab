// Transducer composition with a three-state epsilon filter.
//
// Composite states are (x state, y state, filter). The filter admits
// exactly one interleaving of epsilon moves per pair of aligned paths:
//   0: after a matched move (or at the start)
//   1: after x moved alone on an epsilon output; y may not move alone next
//   2: after y moved alone on an epsilon input; x may not move alone next
// Simultaneous epsilon moves are only taken from filter state 0.

use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::config::Limits;
use crate::optimize::connect;
use crate::weighted::{Arc, Fst};
use crate::{EPSILON, FstError, Label, StateId};

type Composite = (StateId, StateId, u8);

/// Compose `x` with `y` under the default limits.
pub fn compose(x: &Fst, y: &Fst) -> Result<Fst, FstError> {
    compose_with(&Limits::default(), x, y)
}

/// Compose `x` with `y`: the output side of `x` is matched against the input
/// side of `y`, and path weights add.
///
/// Fails with [`FstError::GrammarTooLarge`] as soon as the result exceeds
/// `limits.max_states`. The result is trimmed.
pub fn compose_with(limits: &Limits, x: &Fst, y: &Fst) -> Result<Fst, FstError> {
    let (Some(x_start), Some(y_start)) = (x.start(), y.start()) else {
        return Ok(Fst::new());
    };

    let y_index = index_by_input(y);

    let mut out = Fst::new();
    let mut ids: HashMap<Composite, StateId> = HashMap::new();
    let mut queue: VecDeque<Composite> = VecDeque::new();

    let start = out.add_state();
    out.set_start(start);
    ids.insert((x_start, y_start, 0), start);
    queue.push_back((x_start, y_start, 0));

    while let Some(composite) = queue.pop_front() {
        let (q1, q2, filter) = composite;
        let id = ids[&composite];

        if let (Some(w1), Some(w2)) = (x.final_weight(q1), y.final_weight(q2)) {
            out.set_final(id, w1 + w2);
        }

        let mut pending: Vec<(Composite, Label, Label, f32)> = Vec::new();

        for a1 in x.arcs(q1) {
            if a1.olabel == EPSILON {
                if filter != 2 {
                    pending.push(((a1.nextstate, q2, 1), a1.ilabel, EPSILON, a1.weight));
                }
                if filter == 0 {
                    for &i in &y_index[q2 as usize].epsilon {
                        let a2 = &y.arcs(q2)[i];
                        pending.push((
                            (a1.nextstate, a2.nextstate, 0),
                            a1.ilabel,
                            a2.olabel,
                            a1.weight + a2.weight,
                        ));
                    }
                }
            } else if let Some(matches) = y_index[q2 as usize].by_label.get(&a1.olabel) {
                for &i in matches {
                    let a2 = &y.arcs(q2)[i];
                    pending.push((
                        (a1.nextstate, a2.nextstate, 0),
                        a1.ilabel,
                        a2.olabel,
                        a1.weight + a2.weight,
                    ));
                }
            }
        }

        if filter != 1 {
            for &i in &y_index[q2 as usize].epsilon {
                let a2 = &y.arcs(q2)[i];
                pending.push(((q1, a2.nextstate, 2), EPSILON, a2.olabel, a2.weight));
            }
        }

        for (target, ilabel, olabel, weight) in pending {
            let next = match ids.get(&target) {
                Some(&next) => next,
                None => {
                    let next = out.add_state();
                    limits.check_states(out.num_states())?;
                    ids.insert(target, next);
                    queue.push_back(target);
                    next
                }
            };
            out.add_arc(id, Arc::new(ilabel, olabel, weight, next));
        }
    }

    let trimmed = connect(&out);
    tracing::debug!(
        x_states = x.num_states(),
        y_states = y.num_states(),
        raw_states = out.num_states(),
        states = trimmed.num_states(),
        "composed"
    );
    Ok(trimmed)
}

/// Arcs of one state of the right operand, grouped by input label.
#[derive(Default)]
struct InputIndex {
    epsilon: Vec<usize>,
    by_label: HashMap<Label, Vec<usize>>,
}

fn index_by_input(y: &Fst) -> Vec<InputIndex> {
    y.states()
        .map(|state| {
            let mut index = InputIndex::default();
            for (i, arc) in y.arcs(state).iter().enumerate() {
                if arc.ilabel == EPSILON {
                    index.epsilon.push(i);
                } else {
                    index.by_label.entry(arc.ilabel).or_default().push(i);
                }
            }
            index
        })
        .collect()
}
