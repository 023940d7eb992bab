// Build limits shared by composition, determinization and path search.

use crate::FstError;

/// Default ceiling on the number of states any single build step may create.
pub const DEFAULT_MAX_STATES: usize = 1_000_000;

/// Maximum number of queue pops in best-first path extraction.
/// Acts as a safety limit on pathological lattices.
pub const MAX_SEARCH_POPS: u32 = 1_000_000;

/// Limits applied while building and searching transducers.
///
/// Composition chains can grow exponentially; every operation that can
/// create states checks `max_states` and fails with
/// [`FstError::GrammarTooLarge`] instead of exhausting memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Ceiling on the state count of a composition or determinization result.
    pub max_states: usize,
    /// Ceiling on best-first search expansions.
    pub max_search_pops: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_states: DEFAULT_MAX_STATES,
            max_search_pops: MAX_SEARCH_POPS,
        }
    }
}

impl Limits {
    /// Default limits with a different state ceiling.
    pub fn with_max_states(max_states: usize) -> Self {
        Self {
            max_states,
            ..Self::default()
        }
    }

    #[inline]
    pub(crate) fn check_states(&self, states: usize) -> Result<(), FstError> {
        if states > self.max_states {
            return Err(FstError::GrammarTooLarge {
                states,
                limit: self.max_states,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_states, DEFAULT_MAX_STATES);
        assert_eq!(limits.max_search_pops, MAX_SEARCH_POPS);
    }

    #[test]
    fn check_states_at_ceiling() {
        let limits = Limits::with_max_states(10);
        assert!(limits.check_states(10).is_ok());
        let err = limits.check_states(11).unwrap_err();
        assert!(matches!(
            err,
            FstError::GrammarTooLarge {
                states: 11,
                limit: 10
            }
        ));
    }
}
