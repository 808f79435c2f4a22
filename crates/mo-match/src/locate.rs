use std::cmp::Ordering;

use crate::palette::GRID_CELLS;

/// Index of the entry closest to `target` in an ascending sorted slice.
///
/// Binary search, O(log n). Boundary rule, pinned by tests:
/// - `target` at or below the first element → 0;
/// - `target` at or above the last element → the last index;
/// - otherwise the two neighbors straddling `target` are resolved
///   against their midpoint — strictly above the midpoint picks the
///   upper neighbor, at or below it picks the lower one. An exact-match
///   tie among duplicates resolves to whichever duplicate the search
///   lands on, which is stable for a fixed input.
///
/// The result is always a valid index into `sorted`.
///
/// # Panics
/// Debug-asserts that `sorted` is non-empty; an empty palette is
/// rejected long before any lookup happens.
///
/// # Example
/// ```
/// use mo_match::locate::nearest_scalar;
/// let grays = [10.0, 20.0, 30.0, 40.0];
/// assert_eq!(nearest_scalar(&grays, 5.0), 0);
/// assert_eq!(nearest_scalar(&grays, 25.0), 1);
/// assert_eq!(nearest_scalar(&grays, 26.0), 2);
/// assert_eq!(nearest_scalar(&grays, 100.0), 3);
/// ```
#[must_use]
pub fn nearest_scalar(sorted: &[f64], target: f64) -> usize {
    debug_assert!(!sorted.is_empty(), "nearest_scalar on empty palette");
    let last = sorted.len() - 1;
    if target < sorted[0] {
        return 0;
    }
    if target > sorted[last] {
        return last;
    }
    match sorted.binary_search_by(|g| g.total_cmp(&target)) {
        Ok(i) => i,
        Err(0) => 0,
        Err(i) if i > last => last,
        Err(i) => {
            let (lo, hi) = (i - 1, i);
            let midpoint = (sorted[lo] + sorted[hi]) / 2.0;
            if target > midpoint { hi } else { lo }
        }
    }
}

/// Ordering of two brightness grids by the sign of the summed
/// per-cell differences.
///
/// This is the relation the grid palette is sorted under. It is a
/// deliberate approximation: grids with very different shapes but equal
/// sums compare as equal, so it is not a total order over distinct
/// grids. Kept as-is because the whole index is built and searched
/// under the same relation; swapping in a true distance metric would
/// silently change every match.
///
/// # Example
/// ```
/// use std::cmp::Ordering;
/// use mo_match::locate::grid_cmp;
/// assert_eq!(grid_cmp(&[1.0, 1.0, 1.0, 1.0], &[5.0, 5.0, 5.0, 5.0]), Ordering::Less);
/// assert_eq!(grid_cmp(&[0.0, 4.0, 0.0, 0.0], &[1.0, 1.0, 1.0, 1.0]), Ordering::Equal);
/// ```
#[must_use]
pub fn grid_cmp(a: &[f64; GRID_CELLS], b: &[f64; GRID_CELLS]) -> Ordering {
    let mut sum = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        sum += x - y;
    }
    if sum.abs() <= f64::EPSILON {
        Ordering::Equal
    } else if sum < 0.0 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Index of the grid closest to `target` under [`grid_cmp`].
///
/// Same search shape as [`nearest_scalar`], with one difference kept
/// from the scalar variant: a failed interior search resolves to the
/// insertion point (the upper neighbor), with no midpoint refinement.
///
/// # Example
/// ```
/// use mo_match::locate::nearest_grid;
/// let grids = [[1.0, 1.0, 1.0, 1.0], [5.0, 5.0, 5.0, 5.0]];
/// assert_eq!(nearest_grid(&grids, &[0.0, 0.0, 0.0, 0.0]), 0);
/// assert_eq!(nearest_grid(&grids, &[9.0, 9.0, 9.0, 9.0]), 1);
/// ```
#[must_use]
pub fn nearest_grid(sorted: &[[f64; GRID_CELLS]], target: &[f64; GRID_CELLS]) -> usize {
    debug_assert!(!sorted.is_empty(), "nearest_grid on empty palette");
    let last = sorted.len() - 1;
    if grid_cmp(target, &sorted[0]) == Ordering::Less {
        return 0;
    }
    if grid_cmp(target, &sorted[last]) == Ordering::Greater {
        return last;
    }
    match sorted.binary_search_by(|g| grid_cmp(g, target)) {
        Ok(i) => i,
        Err(i) => i.min(last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_first_clamps_to_zero() {
        assert_eq!(nearest_scalar(&[10.0, 20.0, 30.0], 5.0), 0);
    }

    #[test]
    fn above_last_clamps_to_last() {
        assert_eq!(nearest_scalar(&[10.0, 20.0, 30.0], 100.0), 2);
    }

    #[test]
    fn exact_match_returns_its_index() {
        assert_eq!(nearest_scalar(&[10.0, 20.0, 30.0], 20.0), 1);
    }

    #[test]
    fn midpoint_tie_resolves_to_lower_index() {
        // 25 is exactly between 20 and 30; the documented rule picks the
        // lower neighbor.
        assert_eq!(nearest_scalar(&[10.0, 20.0, 30.0, 40.0], 25.0), 1);
    }

    #[test]
    fn just_past_midpoint_picks_upper() {
        assert_eq!(nearest_scalar(&[10.0, 20.0, 30.0, 40.0], 25.001), 2);
    }

    #[test]
    fn single_entry_always_wins() {
        assert_eq!(nearest_scalar(&[42.0], -1e9), 0);
        assert_eq!(nearest_scalar(&[42.0], 42.0), 0);
        assert_eq!(nearest_scalar(&[42.0], 1e9), 0);
    }

    #[test]
    fn result_is_true_nearest_neighbor() {
        let sorted = [0.0, 3.0, 7.0, 7.5, 100.0, 101.0];
        for step in 0..2200 {
            let target = f64::from(step) * 0.05 - 5.0;
            let idx = nearest_scalar(&sorted, target);
            let best = (target - sorted[idx]).abs();
            for &g in &sorted {
                assert!(
                    best <= (target - g).abs() + 1e-12,
                    "target {target}: picked {} but {} is closer",
                    sorted[idx],
                    g
                );
            }
        }
    }

    #[test]
    fn grid_cmp_orders_by_sum() {
        let lo = [1.0, 1.0, 1.0, 1.0];
        let hi = [5.0, 5.0, 5.0, 5.0];
        assert_eq!(grid_cmp(&lo, &hi), Ordering::Less);
        assert_eq!(grid_cmp(&hi, &lo), Ordering::Greater);
        assert_eq!(grid_cmp(&lo, &lo), Ordering::Equal);
    }

    #[test]
    fn grid_cmp_ties_on_equal_sums_with_different_shapes() {
        // Known approximation: equal sums compare equal even though the
        // shapes differ.
        assert_eq!(
            grid_cmp(&[4.0, 0.0, 0.0, 0.0], &[1.0, 1.0, 1.0, 1.0]),
            Ordering::Equal
        );
    }

    #[test]
    fn grid_between_two_entries_rounds_up() {
        // Sums 4 and 20; target sum 12 sits between them. The grid rule
        // takes the insertion point, i.e. the upper neighbor.
        let grids = [[1.0, 1.0, 1.0, 1.0], [5.0, 5.0, 5.0, 5.0]];
        assert_eq!(nearest_grid(&grids, &[3.0, 3.0, 3.0, 3.0]), 1);
    }

    #[test]
    fn grid_boundaries_clamp() {
        let grids = [[1.0; 4], [5.0; 4], [9.0; 4]];
        assert_eq!(nearest_grid(&grids, &[0.0; 4]), 0);
        assert_eq!(nearest_grid(&grids, &[50.0; 4]), 2);
    }

    #[test]
    fn grid_exact_sum_match_returns_entry() {
        let grids = [[1.0; 4], [5.0; 4], [9.0; 4]];
        assert_eq!(nearest_grid(&grids, &[5.0; 4]), 1);
        // Equal sum, different shape: still an exact match under the
        // comparator.
        assert_eq!(nearest_grid(&grids, &[20.0, 0.0, 0.0, 0.0]), 1);
    }
}
