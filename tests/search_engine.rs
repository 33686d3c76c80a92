use portfolio_core::catalog::{CandidateItem, ProfileDims, ProjectId};
use portfolio_core::config::ConfigurationError;
use portfolio_core::search::{search, SelectionState};
use portfolio_core::selection::select_best;

fn make_item(id: &str, theme: usize, country: usize, participants: u64, budget: u64, rating: f64) -> CandidateItem {
    CandidateItem {
        id: ProjectId::from(id),
        theme,
        country,
        participants,
        budget,
        rating,
    }
}

fn ids(list: &[&str]) -> Vec<ProjectId> {
    list.iter().map(|id| ProjectId::from(*id)).collect()
}

#[test]
fn empty_catalog_yields_only_root_state() {
    let space = search(&[], ProfileDims::default(), 1_000, 10).unwrap();
    assert_eq!(space.len(), 1);

    let (root, value) = space.states().iter().next().unwrap();
    assert_eq!(root.selected_count, 0);
    assert_eq!(root.budget_used, 0);
    assert!(value.ids.is_empty());
    assert!(select_best(&space, 1.0, 1.0).is_none());
}

#[test]
fn zero_state_ceiling_is_configuration_error() {
    let items = vec![make_item("a", 0, 0, 1, 10, 1.0)];
    let err = search(&items, ProfileDims::new(1, 1), 100, 0).unwrap_err();
    assert_eq!(err, ConfigurationError::ZeroMaxStates);
}

#[test]
fn item_outside_profile_is_configuration_error() {
    let items = vec![make_item("a", 2, 0, 1, 10, 1.0)];
    let err = search(&items, ProfileDims::new(2, 1), 100, 10).unwrap_err();
    assert!(matches!(err, ConfigurationError::ProfileMismatch { .. }));
}

#[test]
fn candidate_is_never_selected_twice() {
    let items = vec![make_item("a", 0, 0, 1, 10, 1.0)];
    let space = search(&items, ProfileDims::new(1, 1), 100, 10).unwrap();

    // root + {a}; no {a, a}
    assert_eq!(space.len(), 2);
    assert!(space.states().iter().all(|(state, _)| state.selected_count <= 1));
}

#[test]
fn every_subset_footprint_is_reached() {
    let dims = ProfileDims::new(2, 2);
    let items = vec![
        make_item("a", 0, 0, 1, 10, 1.0),
        make_item("b", 1, 1, 1, 20, 1.0),
        make_item("c", 0, 1, 1, 40, 1.0),
    ];
    let space = search(&items, dims, 1_000, 1_000).unwrap();

    // Eight subsets, all with distinct budgets, so eight distinct states.
    assert_eq!(space.len(), 8);
    assert_eq!(space.states_evicted(), 0);

    let full = SelectionState {
        selected_count: 3,
        budget_used: 70,
        profile: vec![2, 1, 1, 2],
    };
    assert_eq!(space.states().get(&full).unwrap().ids, ids(&["a", "b", "c"]));
}

#[test]
fn over_budget_candidate_is_dropped_silently() {
    let dims = ProfileDims::new(1, 1);
    let items = vec![
        make_item("big", 0, 0, 100, 500, 99.0),
        make_item("small", 0, 0, 1, 50, 1.0),
    ];
    let space = search(&items, dims, 100, 100).unwrap();

    assert_eq!(space.len(), 2);
    assert!(space
        .states()
        .iter()
        .all(|(_, value)| !value.ids.contains(&ProjectId::from("big"))));
}

#[test]
fn budgets_of_live_states_never_exceed_cap() {
    let dims = ProfileDims::new(2, 2);
    let items: Vec<_> = (0..8)
        .map(|i| make_item(&format!("p{i}"), i % 2, (i / 2) % 2, i as u64, 30 + 7 * i as u64, 1.0))
        .collect();
    let space = search(&items, dims, 120, 10_000).unwrap();

    for (state, value) in space.states().iter() {
        assert!(state.budget_used <= 120);
        assert_eq!(value.objective.total_budget(), state.budget_used);
        assert_eq!(value.ids.len(), state.selected_count);

        let themes: u32 = state.theme_counts(dims).iter().sum();
        let countries: u32 = state.country_counts(dims).iter().sum();
        assert_eq!(themes as usize, state.selected_count);
        assert_eq!(countries as usize, state.selected_count);
    }
}

#[test]
fn ties_keep_first_seen_subset() {
    // b and c are indistinguishable; {a, b} is derived before {a, c}.
    let dims = ProfileDims::new(2, 1);
    let items = vec![
        make_item("a", 0, 0, 5, 10, 2.0),
        make_item("b", 1, 0, 5, 10, 2.0),
        make_item("c", 1, 0, 5, 10, 2.0),
    ];
    let space = search(&items, dims, 1_000, 1_000).unwrap();

    let pair = SelectionState {
        selected_count: 2,
        budget_used: 20,
        profile: vec![1, 1, 2],
    };
    assert_eq!(space.states().get(&pair).unwrap().ids, ids(&["a", "b"]));

    let single = SelectionState {
        selected_count: 1,
        budget_used: 10,
        profile: vec![0, 1, 1],
    };
    assert_eq!(space.states().get(&single).unwrap().ids, ids(&["b"]));
}

#[test]
fn strictly_better_subset_replaces_stored_one() {
    // {a} and {b} share a footprint; b rates higher and must win.
    let dims = ProfileDims::new(1, 1);
    let items = vec![
        make_item("a", 0, 0, 5, 10, 1.0),
        make_item("b", 0, 0, 5, 10, 3.0),
    ];
    let space = search(&items, dims, 1_000, 1_000).unwrap();

    let single = SelectionState {
        selected_count: 1,
        budget_used: 10,
        profile: vec![1, 1],
    };
    let value = space.states().get(&single).unwrap();
    assert_eq!(value.ids, ids(&["b"]));
    assert_eq!(value.objective.total_rating, 3.0);
}

#[test]
fn ceiling_bounds_state_count_after_every_round() {
    let dims = ProfileDims::new(3, 3);
    let items: Vec<_> = (0..10)
        .map(|i| make_item(&format!("p{i}"), i % 3, (i + 1) % 3, i as u64, 10 + i as u64, i as f64))
        .collect();

    let space = search(&items, dims, 10_000, 16).unwrap();
    assert!(space.len() <= 16);
    assert!(space.states_evicted() > 0);
    assert_eq!(space.candidates_considered(), 10);
}

#[test]
fn pruning_keeps_highest_objectives() {
    let dims = ProfileDims::new(1, 1);
    let items = vec![
        make_item("a", 0, 0, 0, 10, 1.0),
        make_item("b", 0, 0, 0, 20, 5.0),
    ];
    // Unpruned: root, {a}, {b}, {a, b}. Keep the two best.
    let space = search(&items, dims, 1_000, 2).unwrap();
    assert_eq!(space.len(), 2);

    let kept: Vec<_> = space.states().iter().map(|(_, v)| v.ids.clone()).collect();
    assert_eq!(kept, vec![ids(&["a", "b"]), ids(&["b"])]);
}

#[test]
fn state_map_can_be_taken_out_of_the_space() {
    let dims = ProfileDims::new(1, 1);
    let items = vec![make_item("a", 0, 0, 1, 10, 1.0)];
    let space = search(&items, dims, 100, 10).unwrap();
    let expected_len = space.len();

    let states = space.into_states();
    assert_eq!(states.len(), expected_len);
    assert_eq!(states.get(&SelectionState::empty(dims)).unwrap().ids, Vec::<ProjectId>::new());
}
