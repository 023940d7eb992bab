// Shortest distance and best-path extraction.
//
// `top_k_paths` composes the input acceptor with the transducer and runs a
// best-first (A*) search over (state, output-so-far) pairs, using the exact
// distance-to-final as the heuristic. Outputs come out in non-decreasing
// weight order; an output reached again through another path is skipped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashSet;

use crate::compose::compose_with;
use crate::config::Limits;
use crate::ops::accept;
use crate::symbols::render;
use crate::weighted::Fst;
use crate::{EPSILON, FstError, Label, StateId, Weight};

/// Min-heap entry: lowest weight first, then first pushed.
pub(crate) struct Queued<T> {
    pub(crate) weight: Weight,
    pub(crate) seq: u64,
    pub(crate) item: T,
}

impl<T> Queued<T> {
    pub(crate) fn new(weight: Weight, seq: u64, item: T) -> Self {
        Self { weight, seq, item }
    }
}

impl<T> PartialEq for Queued<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Queued<T> {}

impl<T> PartialOrd for Queued<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Queued<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Cheapest weight from every state to acceptance (final weight included).
/// States that cannot reach a final state get `Weight::INFINITY`.
pub fn shortest_distance(x: &Fst) -> Vec<Weight> {
    let n = x.num_states();
    let mut reverse: Vec<Vec<(StateId, Weight)>> = vec![Vec::new(); n];
    for s in x.states() {
        for arc in x.arcs(s) {
            reverse[arc.nextstate as usize].push((s, arc.weight));
        }
    }

    let mut distance = vec![Weight::INFINITY; n];
    let mut done = vec![false; n];
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    for s in x.states() {
        if let Some(w) = x.final_weight(s) {
            heap.push(Queued::new(w, seq, s));
            seq += 1;
        }
    }

    while let Some(Queued { weight, item, .. }) = heap.pop() {
        if done[item as usize] {
            continue;
        }
        done[item as usize] = true;
        distance[item as usize] = weight;
        for &(p, w) in &reverse[item as usize] {
            if !done[p as usize] {
                heap.push(Queued::new(weight + w, seq, p));
                seq += 1;
            }
        }
    }
    distance
}

/// Minimum-weight output for `input` under the default limits.
pub fn top_path(x: &Fst, input: &str) -> Result<(String, Weight), FstError> {
    top_path_with(&Limits::default(), x, input)
}

/// Minimum-weight output for `input`; [`FstError::NoPath`] if `input` is
/// not accepted.
pub fn top_path_with(
    limits: &Limits,
    x: &Fst,
    input: &str,
) -> Result<(String, Weight), FstError> {
    top_k_paths_with(limits, x, input, 1)?
        .into_iter()
        .next()
        .ok_or(FstError::NoPath)
}

/// Up to `k` distinct outputs for `input` under the default limits.
pub fn top_k_paths(x: &Fst, input: &str, k: usize) -> Result<Vec<(String, Weight)>, FstError> {
    top_k_paths_with(&Limits::default(), x, input, k)
}

/// Up to `k` distinct outputs for `input`, in non-decreasing weight order.
///
/// Returns an empty vector when `input` is not accepted.
pub fn top_k_paths_with(
    limits: &Limits,
    x: &Fst,
    input: &str,
    k: usize,
) -> Result<Vec<(String, Weight)>, FstError> {
    if k == 0 {
        return Ok(Vec::new());
    }
    let lattice = compose_with(limits, &accept(input), x)?;
    best_outputs(limits, &lattice, k)
}

enum Node {
    Partial(StateId),
    Complete,
}

struct SearchItem {
    node: Node,
    cost: Weight,
    output: Vec<Label>,
}

fn best_outputs(
    limits: &Limits,
    lattice: &Fst,
    k: usize,
) -> Result<Vec<(String, Weight)>, FstError> {
    let Some(start) = lattice.start() else {
        return Ok(Vec::new());
    };
    let potential = shortest_distance(lattice);
    if !potential[start as usize].is_finite() {
        return Ok(Vec::new());
    }

    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    heap.push(Queued::new(
        potential[start as usize],
        seq,
        SearchItem {
            node: Node::Partial(start),
            cost: 0.0,
            output: Vec::new(),
        },
    ));

    let mut expanded: HashSet<(StateId, Vec<Label>)> = HashSet::new();
    let mut emitted: HashSet<Vec<Label>> = HashSet::new();
    let mut results: Vec<(String, Weight)> = Vec::new();
    let mut pops: u32 = 0;

    while let Some(Queued { item, .. }) = heap.pop() {
        pops += 1;
        if pops > limits.max_search_pops {
            return Err(FstError::SearchLimit {
                limit: limits.max_search_pops,
            });
        }

        match item.node {
            Node::Complete => {
                if !emitted.contains(&item.output) {
                    results.push((render(&item.output), item.cost));
                    emitted.insert(item.output);
                    if results.len() == k {
                        break;
                    }
                }
            }
            Node::Partial(state) => {
                if !expanded.insert((state, item.output.clone())) {
                    continue;
                }
                if let Some(w) = lattice.final_weight(state) {
                    seq += 1;
                    let cost = item.cost + w;
                    heap.push(Queued::new(
                        cost,
                        seq,
                        SearchItem {
                            node: Node::Complete,
                            cost,
                            output: item.output.clone(),
                        },
                    ));
                }
                for arc in lattice.arcs(state) {
                    let h = potential[arc.nextstate as usize];
                    if !h.is_finite() {
                        continue;
                    }
                    let mut output = item.output.clone();
                    if arc.olabel != EPSILON {
                        output.push(arc.olabel);
                    }
                    let cost = item.cost + arc.weight;
                    seq += 1;
                    heap.push(Queued::new(
                        cost + h,
                        seq,
                        SearchItem {
                            node: Node::Partial(arc.nextstate),
                            cost,
                            output,
                        },
                    ));
                }
            }
        }
    }

    results.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(results)
}
