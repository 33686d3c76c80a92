use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;

use super::objective::{compare_objectives, Objective};
use crate::catalog::{CandidateItem, ProfileDims};
use crate::types::identifiers::ProjectId;

/// Footprint of a partial selection: how many items, how much budget, and how
/// they spread over themes and countries.
///
/// Distinct subsets with the same footprint collapse onto one state; only the
/// best objective reaching it is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SelectionState {
    pub selected_count: usize,
    pub budget_used: u64,
    /// Theme slots `[0, T)` followed by country slots `[T, T + C)`.
    pub profile: Vec<u32>,
}

impl SelectionState {
    pub fn empty(dims: ProfileDims) -> Self {
        Self {
            selected_count: 0,
            budget_used: 0,
            profile: vec![0; dims.slots()],
        }
    }

    /// State reached by adding `item`, or `None` when it would exceed `max_budget`.
    pub fn successor(
        &self,
        item: &CandidateItem,
        dims: ProfileDims,
        max_budget: u64,
    ) -> Option<SelectionState> {
        let budget_used = self
            .budget_used
            .checked_add(item.budget)
            .filter(|b| *b <= max_budget)?;

        let mut profile = self.profile.clone();
        profile[item.theme] += 1;
        profile[dims.themes + item.country] += 1;

        Some(SelectionState {
            selected_count: self.selected_count + 1,
            budget_used,
            profile,
        })
    }

    pub fn theme_counts(&self, dims: ProfileDims) -> &[u32] {
        &self.profile[..dims.themes]
    }

    pub fn country_counts(&self, dims: ProfileDims) -> &[u32] {
        &self.profile[dims.themes..]
    }
}

/// Best known objective for a state and one subset realizing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateValue {
    pub objective: Objective,
    pub ids: Vec<ProjectId>,
}

impl StateValue {
    pub fn root() -> Self {
        Self {
            objective: Objective::ZERO,
            ids: Vec::new(),
        }
    }

    pub fn with_item(&self, item: &CandidateItem) -> Self {
        let mut ids = Vec::with_capacity(self.ids.len() + 1);
        ids.extend(self.ids.iter().cloned());
        ids.push(item.id.clone());
        Self {
            objective: self.objective.with_item(item),
            ids,
        }
    }
}

/// Insertion-ordered map from state to its best value.
///
/// Iteration order is the order in which keys were first inserted (or the
/// ranking order after an eviction), which keeps tie-breaking reproducible.
#[derive(Debug, Clone, Default)]
pub struct StateMap {
    entries: IndexMap<SelectionState, StateValue>,
}

impl StateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding only the empty selection.
    pub fn with_root(dims: ProfileDims) -> Self {
        let mut map = Self::new();
        map.merge(SelectionState::empty(dims), StateValue::root());
        map
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, state: &SelectionState) -> Option<&StateValue> {
        self.entries.get(state)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SelectionState, &StateValue)> {
        self.entries.iter()
    }

    /// Store `value` for `state` if the state is new or `value` strictly beats
    /// the stored objective. Ties keep the earlier entry. Returns whether the
    /// map changed.
    pub fn merge(&mut self, state: SelectionState, value: StateValue) -> bool {
        match self.entries.entry(state) {
            Entry::Occupied(mut stored) => {
                if value.objective.beats(&stored.get().objective) {
                    *stored.get_mut() = value;
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Keep the `limit` best states by objective, dropping the rest.
    ///
    /// The sort is stable, so among equal objectives the earlier-inserted state
    /// survives. Returns how many states were evicted.
    pub fn retain_best(&mut self, limit: usize) -> usize {
        let before = self.entries.len();
        if before <= limit {
            return 0;
        }

        self.entries
            .sort_by(|_, a, _, b| compare_objectives(&b.objective, &a.objective));
        self.entries.truncate(limit);

        before - limit
    }
}
