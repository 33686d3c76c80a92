use std::collections::BTreeSet;

/// Overlap coefficient `|A ∩ B| / min(|A|, |B|)` between two selections.
///
/// Duplicates are ignored. Returns `0.0` when either selection is empty.
pub fn overlap_coefficient<T: Ord>(a: &[T], b: &[T]) -> f64 {
    let set_a: BTreeSet<&T> = a.iter().collect();
    let set_b: BTreeSet<&T> = b.iter().collect();

    let smaller = set_a.len().min(set_b.len());
    if smaller == 0 {
        return 0.0;
    }
    let shared = set_a.intersection(&set_b).count();
    shared as f64 / smaller as f64
}
