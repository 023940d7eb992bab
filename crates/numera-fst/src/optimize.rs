// Optimization: epsilon removal, determinization, minimization, trimming.
//
// Determinization treats every (input, output, weight) triple as a single
// symbol, so the subset construction always terminates. Paths that spell the
// same label pairs with the same weights are merged; at final states the
// minimum final weight wins.

use std::collections::{BTreeMap, BinaryHeap, VecDeque};

use hashbrown::HashMap;

use crate::config::Limits;
use crate::paths::Queued;
use crate::weighted::{Arc, Fst};
use crate::{FstError, Label, StateId, Weight};

/// Encoded arc symbol used by determinization and minimization.
type ArcKey = (Label, Label, u32);

#[inline]
fn weight_bits(w: Weight) -> u32 {
    // -0.0 and 0.0 must encode identically
    (w + 0.0).to_bits()
}

/// Optimize under the default limits.
pub fn optimize(x: &Fst) -> Result<Fst, FstError> {
    optimize_with(&Limits::default(), x)
}

/// Produce the smallest equivalent machine: remove epsilons, determinize
/// the label/weight encoded acceptor, minimize it and prune dead states.
pub fn optimize_with(limits: &Limits, x: &Fst) -> Result<Fst, FstError> {
    let eps_free = rm_epsilon(x);
    let det = determinize_with(limits, &eps_free)?;
    let min = connect(&minimize(&det));
    tracing::debug!(
        before = x.num_states(),
        determinized = det.num_states(),
        after = min.num_states(),
        "optimized"
    );
    Ok(min)
}

/// Remove arcs that are epsilon on both sides.
///
/// Each state takes over the non-epsilon arcs and the final weight of every
/// state in its epsilon closure, offset by the cheapest epsilon distance.
pub fn rm_epsilon(x: &Fst) -> Fst {
    let Some(start) = x.start() else {
        return Fst::new();
    };

    let mut out = Fst::new();
    for _ in x.states() {
        out.add_state();
    }
    out.set_start(start);

    for state in x.states() {
        let closure = epsilon_closure(x, state);
        let mut final_weight: Option<Weight> = None;
        let mut arcs: BTreeMap<(Label, Label, StateId), Weight> = BTreeMap::new();

        for (&member, &distance) in &closure {
            if let Some(w) = x.final_weight(member) {
                let total = distance + w;
                final_weight = Some(final_weight.map_or(total, |f| f.min(total)));
            }
            for arc in x.arcs(member).iter().filter(|a| !a.is_epsilon()) {
                let total = distance + arc.weight;
                arcs.entry((arc.ilabel, arc.olabel, arc.nextstate))
                    .and_modify(|w| *w = w.min(total))
                    .or_insert(total);
            }
        }

        if let Some(w) = final_weight {
            out.set_final(state, w);
        }
        for ((ilabel, olabel, nextstate), weight) in arcs {
            out.add_arc(state, Arc::new(ilabel, olabel, weight, nextstate));
        }
    }

    connect(&out)
}

/// Cheapest epsilon-only distance from `state` to every state it reaches.
fn epsilon_closure(x: &Fst, state: StateId) -> BTreeMap<StateId, Weight> {
    let mut distances: BTreeMap<StateId, Weight> = BTreeMap::new();
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    heap.push(Queued::new(0.0, seq, state));

    while let Some(Queued { weight, item, .. }) = heap.pop() {
        if distances.contains_key(&item) {
            continue;
        }
        distances.insert(item, weight);
        for arc in x.arcs(item).iter().filter(|a| a.is_epsilon()) {
            if !distances.contains_key(&arc.nextstate) {
                seq += 1;
                heap.push(Queued::new(weight + arc.weight, seq, arc.nextstate));
            }
        }
    }
    distances
}

/// Subset construction over the encoded alphabet. Expects an epsilon-free
/// input (see [`rm_epsilon`]).
pub fn determinize_with(limits: &Limits, x: &Fst) -> Result<Fst, FstError> {
    let Some(start) = x.start() else {
        return Ok(Fst::new());
    };

    let mut out = Fst::new();
    let mut ids: HashMap<Vec<StateId>, StateId> = HashMap::new();
    let mut queue: VecDeque<Vec<StateId>> = VecDeque::new();

    let initial = vec![start];
    let first = out.add_state();
    out.set_start(first);
    ids.insert(initial.clone(), first);
    queue.push_back(initial);

    while let Some(subset) = queue.pop_front() {
        let id = ids[&subset];

        let final_weight = subset
            .iter()
            .filter_map(|&s| x.final_weight(s))
            .reduce(Weight::min);
        if let Some(w) = final_weight {
            out.set_final(id, w);
        }

        let mut groups: BTreeMap<ArcKey, Vec<StateId>> = BTreeMap::new();
        for &member in &subset {
            for arc in x.arcs(member) {
                groups
                    .entry((arc.ilabel, arc.olabel, weight_bits(arc.weight)))
                    .or_default()
                    .push(arc.nextstate);
            }
        }

        for ((ilabel, olabel, bits), mut targets) in groups {
            targets.sort_unstable();
            targets.dedup();
            let next = match ids.get(&targets) {
                Some(&next) => next,
                None => {
                    let next = out.add_state();
                    limits.check_states(out.num_states())?;
                    ids.insert(targets.clone(), next);
                    queue.push_back(targets);
                    next
                }
            };
            out.add_arc(id, Arc::new(ilabel, olabel, f32::from_bits(bits), next));
        }
    }

    Ok(out)
}

/// Merge equivalent states of a deterministic (encoded) machine by
/// iterative partition refinement.
pub fn minimize(x: &Fst) -> Fst {
    let Some(start) = x.start() else {
        return Fst::new();
    };
    let n = x.num_states();

    // Initial partition: by final weight
    let mut class: Vec<usize> = {
        let mut by_final: HashMap<Option<u32>, usize> = HashMap::new();
        x.states()
            .map(|s| {
                let key = x.final_weight(s).map(weight_bits);
                let next = by_final.len();
                *by_final.entry(key).or_insert(next)
            })
            .collect()
    };
    let mut class_count = class.iter().copied().max().map_or(0, |m| m + 1);

    loop {
        let mut by_signature: HashMap<(usize, Vec<(ArcKey, usize)>), usize> = HashMap::new();
        let refined: Vec<usize> = x
            .states()
            .map(|s| {
                let mut arcs: Vec<(ArcKey, usize)> = x
                    .arcs(s)
                    .iter()
                    .map(|a| {
                        (
                            (a.ilabel, a.olabel, weight_bits(a.weight)),
                            class[a.nextstate as usize],
                        )
                    })
                    .collect();
                arcs.sort_unstable();
                let next = by_signature.len();
                *by_signature.entry((class[s as usize], arcs)).or_insert(next)
            })
            .collect();
        let refined_count = by_signature.len();
        class = refined;
        if refined_count == class_count {
            break;
        }
        class_count = refined_count;
    }

    let mut out = Fst::new();
    for _ in 0..class_count {
        out.add_state();
    }
    out.set_start(class[start as usize] as StateId);

    let mut done = vec![false; class_count];
    for s in 0..n {
        let c = class[s];
        if done[c] {
            continue;
        }
        done[c] = true;
        let state = s as StateId;
        if let Some(w) = x.final_weight(state) {
            out.set_final(c as StateId, w);
        }
        for arc in x.arcs(state) {
            out.add_arc(
                c as StateId,
                Arc {
                    nextstate: class[arc.nextstate as usize] as StateId,
                    ..*arc
                },
            );
        }
    }
    out
}

/// Keep only states that are reachable from the start and can reach a
/// final state. State order is preserved.
pub fn connect(x: &Fst) -> Fst {
    let Some(start) = x.start() else {
        return Fst::new();
    };
    let n = x.num_states();

    let mut accessible = vec![false; n];
    let mut stack = vec![start];
    accessible[start as usize] = true;
    while let Some(s) = stack.pop() {
        for arc in x.arcs(s) {
            if !accessible[arc.nextstate as usize] {
                accessible[arc.nextstate as usize] = true;
                stack.push(arc.nextstate);
            }
        }
    }

    let mut reverse: Vec<Vec<StateId>> = vec![Vec::new(); n];
    for s in x.states() {
        for arc in x.arcs(s) {
            reverse[arc.nextstate as usize].push(s);
        }
    }
    let mut coaccessible = vec![false; n];
    let mut stack: Vec<StateId> = x
        .states()
        .filter(|&s| x.final_weight(s).is_some())
        .collect();
    for &s in &stack {
        coaccessible[s as usize] = true;
    }
    while let Some(s) = stack.pop() {
        for &p in &reverse[s as usize] {
            if !coaccessible[p as usize] {
                coaccessible[p as usize] = true;
                stack.push(p);
            }
        }
    }

    if !coaccessible[start as usize] {
        return Fst::new();
    }

    let mut remap: Vec<Option<StateId>> = vec![None; n];
    let mut out = Fst::new();
    for s in 0..n {
        if accessible[s] && coaccessible[s] {
            remap[s] = Some(out.add_state());
        }
    }
    for s in x.states() {
        let Some(new) = remap[s as usize] else {
            continue;
        };
        if let Some(w) = x.final_weight(s) {
            out.set_final(new, w);
        }
        for arc in x.arcs(s) {
            if let Some(next) = remap[arc.nextstate as usize] {
                out.add_arc(
                    new,
                    Arc {
                        nextstate: next,
                        ..*arc
                    },
                );
            }
        }
    }
    if let Some(new_start) = remap[start as usize] {
        out.set_start(new_start);
    }
    out
}
