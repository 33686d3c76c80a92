use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::CandidateItem;

/// Lexicographic ranking key of a selection.
///
/// Higher total rating wins, then more participants, then the smaller total
/// budget (held negated so that "larger is better" holds for every component).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Objective {
    pub total_rating: f64,
    pub total_participants: u64,
    pub negative_total_budget: i64,
}

impl Objective {
    pub const ZERO: Objective = Objective {
        total_rating: 0.0,
        total_participants: 0,
        negative_total_budget: 0,
    };

    /// Objective after adding `item` to the selection.
    pub fn with_item(&self, item: &CandidateItem) -> Objective {
        Objective {
            total_rating: self.total_rating + item.rating,
            total_participants: self.total_participants + item.participants,
            negative_total_budget: self
                .negative_total_budget
                .saturating_sub(i64::try_from(item.budget).unwrap_or(i64::MAX)),
        }
    }

    pub fn total_budget(&self) -> u64 {
        self.negative_total_budget.unsigned_abs()
    }

    pub fn beats(&self, other: &Objective) -> bool {
        compare_objectives(self, other) == Ordering::Greater
    }
}

/// Total order over objectives: rating, then participants, then negated budget.
///
/// Ratings use `f64::total_cmp`; the normalizer rejects non-finite ratings, so
/// this agrees with numeric comparison on every value the engine produces.
pub fn compare_objectives(a: &Objective, b: &Objective) -> Ordering {
    a.total_rating
        .total_cmp(&b.total_rating)
        .then(a.total_participants.cmp(&b.total_participants))
        .then(a.negative_total_budget.cmp(&b.negative_total_budget))
}
