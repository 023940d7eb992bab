// Weighted transducer representation and binary (de)serialization.

use bytemuck::Zeroable;

use crate::format::{self, FileKind, HEADER_SIZE};
use crate::symbols;
use crate::transition::{ArcRecord, CountsRecord, NO_STATE, NON_FINAL, StateRecord};
use crate::{EPSILON, FstError, Label, StateId, Weight};

/// A weighted arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub ilabel: Label,
    pub olabel: Label,
    pub weight: Weight,
    pub nextstate: StateId,
}

impl Arc {
    pub fn new(ilabel: Label, olabel: Label, weight: Weight, nextstate: StateId) -> Self {
        Self {
            ilabel,
            olabel,
            weight,
            nextstate,
        }
    }

    /// An arc consuming and emitting nothing.
    pub fn epsilon(weight: Weight, nextstate: StateId) -> Self {
        Self::new(EPSILON, EPSILON, weight, nextstate)
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.ilabel == EPSILON && self.olabel == EPSILON
    }
}

/// A state: outgoing arcs plus an optional final weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub arcs: Vec<Arc>,
    pub final_weight: Option<Weight>,
}

/// Weighted finite-state transducer over the tropical semiring.
///
/// A transducer without a start state accepts nothing. Values are built
/// through the `add_*`/`set_*` methods and are never modified afterwards:
/// every algebraic operation in this crate takes `&Fst` and returns a new one,
/// so a finished transducer can be shared across threads for lookups.
#[derive(Clone, Default, PartialEq)]
pub struct Fst {
    states: Vec<State>,
    start: Option<StateId>,
}

impl std::fmt::Debug for Fst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fst")
            .field("state_count", &self.states.len())
            .field("arc_count", &self.num_arcs())
            .field("start", &self.start)
            .finish()
    }
}

impl Fst {
    /// An empty transducer (accepts no string).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self) -> StateId {
        self.states.push(State::default());
        (self.states.len() - 1) as StateId
    }

    pub fn set_start(&mut self, state: StateId) {
        self.start = Some(state);
    }

    pub fn set_final(&mut self, state: StateId, weight: Weight) {
        self.states[state as usize].final_weight = Some(weight);
    }

    pub fn clear_final(&mut self, state: StateId) {
        self.states[state as usize].final_weight = None;
    }

    pub fn add_arc(&mut self, state: StateId, arc: Arc) {
        self.states[state as usize].arcs.push(arc);
    }

    #[inline]
    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    #[inline]
    pub fn final_weight(&self, state: StateId) -> Option<Weight> {
        self.states[state as usize].final_weight
    }

    #[inline]
    pub fn arcs(&self, state: StateId) -> &[Arc] {
        &self.states[state as usize].arcs
    }

    pub(crate) fn arcs_mut(&mut self, state: StateId) -> &mut Vec<Arc> {
        &mut self.states[state as usize].arcs
    }

    /// Iterate over all state ids.
    pub fn states(&self) -> std::ops::Range<StateId> {
        0..self.states.len() as StateId
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.states.iter().map(|s| s.arcs.len()).sum()
    }

    /// Whether the transducer accepts nothing at all (no start state).
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    /// Whether every arc has identical input and output labels.
    pub fn is_acceptor(&self) -> bool {
        self.states
            .iter()
            .all(|s| s.arcs.iter().all(|a| a.ilabel == a.olabel))
    }

    /// Copy all states of `other` into `self`, returning the id offset.
    pub(crate) fn append(&mut self, other: &Fst) -> StateId {
        let offset = self.states.len() as StateId;
        self.states.extend(other.states.iter().map(|s| State {
            arcs: s
                .arcs
                .iter()
                .map(|a| Arc {
                    nextstate: a.nextstate + offset,
                    ..*a
                })
                .collect(),
            final_weight: s.final_weight,
        }));
        offset
    }

    /// Load a transducer from binary data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FstError> {
        format::expect_kind(data, FileKind::Transducer)?;

        let counts_end = HEADER_SIZE + size_of::<CountsRecord>();
        if data.len() < counts_end {
            return Err(FstError::TooShort {
                expected: counts_end,
                actual: data.len(),
            });
        }
        let counts: CountsRecord = bytemuck::pod_read_unaligned(&data[HEADER_SIZE..counts_end]);
        let state_count = counts.state_count as usize;
        let arc_count = counts.arc_count as usize;

        let states_end = counts_end + state_count * size_of::<StateRecord>();
        let arcs_end = states_end + arc_count * size_of::<ArcRecord>();
        if data.len() < arcs_end {
            return Err(FstError::TooShort {
                expected: arcs_end,
                actual: data.len(),
            });
        }

        // Copy into aligned Vecs
        let mut state_records = vec![StateRecord::zeroed(); state_count];
        bytemuck::cast_slice_mut::<StateRecord, u8>(&mut state_records)
            .copy_from_slice(&data[counts_end..states_end]);
        let mut arc_records = vec![ArcRecord::zeroed(); arc_count];
        bytemuck::cast_slice_mut::<ArcRecord, u8>(&mut arc_records)
            .copy_from_slice(&data[states_end..arcs_end]);

        let mut fst = Fst::new();
        for _ in 0..state_count {
            fst.add_state();
        }
        if counts.start != NO_STATE {
            if counts.start as usize >= state_count {
                return Err(FstError::DanglingArc {
                    state: counts.start,
                    count: counts.state_count,
                });
            }
            fst.set_start(counts.start);
        }

        for (id, record) in state_records.iter().enumerate() {
            let first = record.first_arc as usize;
            let end = first + record.arc_count as usize;
            if end > arc_count {
                return Err(FstError::TooShort {
                    expected: end,
                    actual: arc_count,
                });
            }
            if record.final_weight != NON_FINAL {
                fst.set_final(id as StateId, checked_weight(record.final_weight)?);
            }
            for arc in &arc_records[first..end] {
                symbols::validate(arc.ilabel)?;
                symbols::validate(arc.olabel)?;
                if arc.nextstate as usize >= state_count {
                    return Err(FstError::DanglingArc {
                        state: arc.nextstate,
                        count: counts.state_count,
                    });
                }
                fst.add_arc(
                    id as StateId,
                    Arc::new(arc.ilabel, arc.olabel, checked_weight(arc.weight)?, arc.nextstate),
                );
            }
        }

        Ok(fst)
    }

    /// Serialize to the binary format read by [`Fst::from_bytes`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let arc_count = self.num_arcs();
        let mut buf = Vec::with_capacity(
            HEADER_SIZE + 16 * (1 + self.states.len() + arc_count),
        );
        format::write_header(&mut buf, FileKind::Transducer);

        let counts = CountsRecord {
            state_count: self.states.len() as u32,
            arc_count: arc_count as u32,
            start: self.start.unwrap_or(NO_STATE),
            _reserved: 0,
        };
        buf.extend_from_slice(bytemuck::bytes_of(&counts));

        let mut first_arc = 0u32;
        for state in &self.states {
            let record = StateRecord {
                first_arc,
                arc_count: state.arcs.len() as u32,
                final_weight: state.final_weight.unwrap_or(NON_FINAL),
                _reserved: 0,
            };
            buf.extend_from_slice(bytemuck::bytes_of(&record));
            first_arc += state.arcs.len() as u32;
        }
        for state in &self.states {
            for arc in &state.arcs {
                let record = ArcRecord {
                    ilabel: arc.ilabel,
                    olabel: arc.olabel,
                    weight: arc.weight,
                    nextstate: arc.nextstate,
                };
                buf.extend_from_slice(bytemuck::bytes_of(&record));
            }
        }
        buf
    }
}

/// Tropical search assumes non-negative weights.
fn checked_weight(w: Weight) -> Result<Weight, FstError> {
    if w.is_finite() && w >= 0.0 {
        Ok(w)
    } else {
        Err(FstError::InvalidWeight(w))
    }
}
