use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::ProfileDims;
use crate::search::{Objective, SelectionState, StateSpace, StateValue};
use crate::types::identifiers::ProjectId;

/// Reporting figures for a chosen selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStats {
    pub selected_count: usize,
    pub budget_used: u64,
    pub max_theme_count: u32,
    pub max_country_count: u32,
}

/// The winning feasible state, resolved to the ids that realize it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub ids: Vec<ProjectId>,
    pub objective: Objective,
    pub stats: SelectionStats,
}

/// Largest count any single slot may hold in a selection of `selected` items.
pub fn diversity_cap(factor: f64, selected: usize) -> u32 {
    (factor * selected as f64).floor() as u32
}

/// Largest theme and country counts of `state`, if it honours both quotas.
pub fn check_diversity(
    state: &SelectionState,
    dims: ProfileDims,
    theme_diversity_factor: f64,
    country_diversity_factor: f64,
) -> Option<(u32, u32)> {
    let k = state.selected_count;
    let max_theme = state.theme_counts(dims).iter().copied().max().unwrap_or(0);
    let max_country = state.country_counts(dims).iter().copied().max().unwrap_or(0);

    let feasible = max_theme <= diversity_cap(theme_diversity_factor, k)
        && max_country <= diversity_cap(country_diversity_factor, k);
    feasible.then_some((max_theme, max_country))
}

/// Pick the best non-empty state that fits the budget and both diversity quotas.
///
/// Every state is examined before a winner is declared; among equal objectives
/// the one scanned first is kept. `None` means no subset satisfies the
/// constraints, which is an ordinary outcome rather than an error.
pub fn select_best(
    space: &StateSpace,
    theme_diversity_factor: f64,
    country_diversity_factor: f64,
) -> Option<Selection> {
    let dims = space.dims();
    let mut best: Option<(&SelectionState, &StateValue, u32, u32)> = None;

    for (state, value) in space.states().iter() {
        if state.selected_count == 0 || state.budget_used > space.max_budget() {
            continue;
        }
        let Some((max_theme, max_country)) =
            check_diversity(state, dims, theme_diversity_factor, country_diversity_factor)
        else {
            continue;
        };

        let improves = match &best {
            None => true,
            Some((_, incumbent, _, _)) => value.objective.beats(&incumbent.objective),
        };
        if improves {
            best = Some((state, value, max_theme, max_country));
        }
    }

    let (state, value, max_theme_count, max_country_count) = best?;
    let selection = Selection {
        ids: value.ids.clone(),
        objective: value.objective,
        stats: SelectionStats {
            selected_count: state.selected_count,
            budget_used: state.budget_used,
            max_theme_count,
            max_country_count,
        },
    };

    info!(
        selected = selection.stats.selected_count,
        total_budget = selection.stats.budget_used,
        max_theme = selection.stats.max_theme_count,
        max_country = selection.stats.max_country_count,
        "selected feasible portfolio"
    );

    Some(selection)
}
