// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The fork/join decomposition behind every bulk operation. A task
//! covering more ordinals than the split threshold forks at the
//! midpoint; below it, or on a sequential frame, it runs inline. Both
//! modes produce identical observable results.

use std::ops::Range;

use tracing::trace;

/// Recursive split-and-merge over an ordinal range. The merge receives
/// (left, right) in range order, so order-preserving reductions stay
/// order-preserving under parallelism.
pub fn drive<T, L, M>(parallel: bool, range: Range<usize>, threshold: usize, leaf: &L, merge: &M) -> T
where
	T: Send,
	L: Fn(Range<usize>) -> T + Sync,
	M: Fn(T, T) -> T + Sync,
{
	let count = range.end - range.start;
	if parallel && count > threshold.max(1) {
		let mid = range.start + count / 2;
		trace!(start = range.start, end = range.end, mid, "forking bulk task");
		let (left, right) = rayon::join(
			|| drive(parallel, range.start..mid, threshold, leaf, merge),
			|| drive(parallel, mid..range.end, threshold, leaf, merge),
		);
		merge(left, right)
	} else {
		leaf(range)
	}
}

/// Order-preserving parallel selection: each leaf emits matches in
/// range order, the merge concatenates left then right.
pub fn select<F>(parallel: bool, count: usize, threshold: usize, matches: F) -> Vec<usize>
where
	F: Fn(usize) -> bool + Sync,
{
	drive(
		parallel,
		0..count,
		threshold,
		&|range: Range<usize>| range.filter(|&ordinal| matches(ordinal)).collect::<Vec<_>>(),
		&|mut left, mut right| {
			left.append(&mut right);
			left
		},
	)
}

/// Parallel count under a predicate.
pub fn count<F>(parallel: bool, total: usize, threshold: usize, matches: F) -> usize
where
	F: Fn(usize) -> bool + Sync,
{
	drive(
		parallel,
		0..total,
		threshold,
		&|range: Range<usize>| range.filter(|&ordinal| matches(ordinal)).count(),
		&|left, right| left + right,
	)
}

/// Parallel reduction to an optional extremum. `better` returns true
/// when the candidate should replace the incumbent; ties keep the
/// earlier ordinal, so results match the sequential pass.
pub fn extremum<F>(parallel: bool, total: usize, threshold: usize, better: F) -> Option<usize>
where
	F: Fn(usize, usize) -> bool + Sync,
{
	drive(
		parallel,
		0..total,
		threshold,
		&|range: Range<usize>| range.reduce(|best, next| if better(next, best) { next } else { best }),
		&|left, right| match (left, right) {
			(Some(a), Some(b)) => Some(if better(b, a) { b } else { a }),
			(a, b) => a.or(b),
		},
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parallel_matches_sequential() {
		let leaf = |range: std::ops::Range<usize>| range.sum::<usize>();
		let merge = |a: usize, b: usize| a + b;
		let sequential = drive(false, 0..10_000, 64, &leaf, &merge);
		let parallel = drive(true, 0..10_000, 64, &leaf, &merge);
		assert_eq!(sequential, parallel);
	}

	#[test]
	fn test_select_preserves_order() {
		let picked = select(true, 5_000, 32, |ordinal| ordinal % 7 == 0);
		let expected: Vec<usize> = (0..5_000).filter(|o| o % 7 == 0).collect();
		assert_eq!(picked, expected);
	}

	#[test]
	fn test_extremum_ties_keep_first() {
		let values = [3, 9, 2, 9, 1];
		let better = |candidate: usize, incumbent: usize| values[candidate] > values[incumbent];
		assert_eq!(extremum(false, values.len(), 2, better), Some(1));
		assert_eq!(extremum(true, values.len(), 1, better), Some(1));
	}

	#[test]
	fn test_below_threshold_runs_inline() {
		// a leaf spanning the whole range proves no fork happened
		let spans = drive(
			true,
			0..10,
			64,
			&|range: std::ops::Range<usize>| vec![(range.start, range.end)],
			&|mut l, mut r| {
				l.append(&mut r);
				l
			},
		);
		assert_eq!(spans, vec![(0, 10)]);
	}
}
