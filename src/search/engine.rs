use tracing::{debug, trace};

use super::state::{SelectionState, StateMap, StateValue};
use crate::catalog::{CandidateItem, ProfileDims};
use crate::config::ConfigurationError;

/// Terminal state set of a search, with the parameters it was built under.
#[derive(Debug, Clone)]
pub struct StateSpace {
    states: StateMap,
    dims: ProfileDims,
    max_budget: u64,
    candidates_considered: usize,
    states_evicted: usize,
}

impl StateSpace {
    pub fn states(&self) -> &StateMap {
        &self.states
    }

    pub fn into_states(self) -> StateMap {
        self.states
    }

    pub fn dims(&self) -> ProfileDims {
        self.dims
    }

    pub fn max_budget(&self) -> u64 {
        self.max_budget
    }

    pub fn candidates_considered(&self) -> usize {
        self.candidates_considered
    }

    /// Total states dropped by the ceiling over all rounds. Zero means the
    /// state set is exact.
    pub fn states_evicted(&self) -> usize {
        self.states_evicted
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Build every reachable selection state, one candidate per round.
///
/// Each round derives successors from the states as they stood before the
/// round, then merges them, so a candidate is never added twice to the same
/// selection. When more than `max_states` states survive a round, only the
/// best `max_states` by objective are kept; that eviction is irrevocable and
/// is the only way the result can fall short of the true optimum.
pub fn search(
    items: &[CandidateItem],
    dims: ProfileDims,
    max_budget: u64,
    max_states: usize,
) -> Result<StateSpace, ConfigurationError> {
    if max_states == 0 {
        return Err(ConfigurationError::ZeroMaxStates);
    }
    if let Some(item) = items
        .iter()
        .find(|item| item.theme >= dims.themes || item.country >= dims.countries)
    {
        return Err(ConfigurationError::ProfileMismatch {
            id: item.id.as_str().to_string(),
            themes: dims.themes,
            countries: dims.countries,
        });
    }

    let mut states = StateMap::with_root(dims);
    let mut states_evicted = 0;

    for (round, item) in items.iter().enumerate() {
        // Derive from the frozen pre-round map, then merge.
        let successors: Vec<(SelectionState, StateValue)> = states
            .iter()
            .filter_map(|(state, value)| {
                state
                    .successor(item, dims, max_budget)
                    .map(|next| (next, value.with_item(item)))
            })
            .collect();

        let derived = successors.len();
        for (state, value) in successors {
            states.merge(state, value);
        }

        let before = states.len();
        let evicted = states.retain_best(max_states);
        if evicted > 0 {
            states_evicted += evicted;
            debug!(
                round,
                candidate = %item.id,
                before,
                after = states.len(),
                "state ceiling reached, evicted lowest-ranked states"
            );
        }

        trace!(round, candidate = %item.id, derived, states = states.len(), "round complete");
    }

    Ok(StateSpace {
        states,
        dims,
        max_budget,
        candidates_considered: items.len(),
        states_evicted,
    })
}
