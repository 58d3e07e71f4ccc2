// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Axis sorting. Sorts are permutation-only: the ordinal -> coordinate
//! mapping of the axis index is reordered, column storage never moves.
//! A comparator panic aborts the sort and leaves the pre-sort
//! permutation in place.

use std::{cmp::Ordering, panic::AssertUnwindSafe};

use rayon::slice::ParallelSliceMut;
use tabula_array::SortOrder;
use tabula_type::{
	Result, Value, err,
	error::diagnostic::frame,
};
use tracing::debug;

use crate::{Frame, Key, settings};

/// A row handle bound to a stable coordinate, handed to custom row
/// comparators. Reads go straight through the coordinate, so the
/// in-flight permutation never shows through.
pub struct SortRow<'a, R: Key, C: Key> {
	frame: &'a Frame<R, C>,
	coordinate: usize,
}

impl<'a, R: Key, C: Key> SortRow<'a, R, C> {
	pub fn key(&self) -> &R {
		self.frame.content().rows().key_of_coordinate(self.coordinate).expect("coordinate in range")
	}

	pub fn value_of(&self, col_key: &C) -> Result<Value> {
		match self.frame.content().cols().coordinate(col_key) {
			Some(col_coordinate) => {
				self.frame.content().value_at_coords(self.coordinate, col_coordinate)
			}
			None => err!(frame::unknown_col_key(col_key)),
		}
	}

	pub fn get_double_of(&self, col_key: &C) -> f64 {
		self.value_of(col_key).ok().and_then(|v| v.as_f64()).unwrap_or(f64::NAN)
	}
}

/// A column handle bound to a stable coordinate, for custom column
/// comparators.
pub struct SortCol<'a, R: Key, C: Key> {
	frame: &'a Frame<R, C>,
	coordinate: usize,
}

impl<'a, R: Key, C: Key> SortCol<'a, R, C> {
	pub fn key(&self) -> &C {
		self.frame.content().cols().key_of_coordinate(self.coordinate).expect("coordinate in range")
	}

	pub fn value_of(&self, row_key: &R) -> Result<Value> {
		match self.frame.content().rows().coordinate(row_key) {
			Some(row_coordinate) => {
				self.frame.content().value_at_coords(row_coordinate, self.coordinate)
			}
			None => err!(frame::unknown_row_key(row_key)),
		}
	}

	pub fn get_double_of(&self, row_key: &R) -> f64 {
		self.value_of(row_key).ok().and_then(|v| v.as_f64()).unwrap_or(f64::NAN)
	}
}

fn apply_direction(ord: Ordering, order: SortOrder) -> Ordering {
	if order.descending() {
		ord.reverse()
	} else {
		ord
	}
}

/// Stable sort of a coordinate permutation, parallel above the
/// threshold. Both modes produce the same permutation for a total
/// order.
fn sort_coordinates(
	parallel: bool,
	threshold: usize,
	coordinates: &mut Vec<usize>,
	compare: impl Fn(usize, usize) -> Ordering + Sync,
) {
	if parallel && coordinates.len() > threshold {
		debug!(count = coordinates.len(), "parallel permutation sort");
		coordinates.par_sort_by(|&a, &b| compare(a, b));
	} else {
		coordinates.sort_by(|&a, &b| compare(a, b));
	}
}

/// Sorts the rows by one or more data columns, lexicographically, ties
/// preserving the prior order.
pub(crate) fn sort_rows_by_data<R: Key, C: Key>(
	frame: &mut Frame<R, C>,
	order: SortOrder,
	col_keys: &[C],
) -> Result<()> {
	let mut col_coordinates = Vec::with_capacity(col_keys.len());
	for key in col_keys {
		match frame.content().cols().coordinate(key) {
			Some(coordinate) => col_coordinates.push(coordinate),
			None => return err!(frame::unknown_col_key(key)),
		}
	}
	let mut coordinates = frame.content().rows().order_snapshot();
	let parallel = frame.is_parallel();
	let threshold = settings::row_split_threshold();

	if frame.content().is_transposed() {
		let content = frame.content();
		sort_coordinates(parallel, threshold, &mut coordinates, |a, b| {
			for &col in &col_coordinates {
				let left = content.value_at_coords(a, col).unwrap_or(Value::Undefined);
				let right = content.value_at_coords(b, col).unwrap_or(Value::Undefined);
				let ord = apply_direction(left.cmp(&right), order);
				if ord != Ordering::Equal {
					return ord;
				}
			}
			Ordering::Equal
		});
	} else {
		// fast path: hold the column read locks and compare inside the
		// arrays, no boxing per comparison
		let guards: Vec<_> = col_coordinates
			.iter()
			.map(|&c| frame.content().stores()[c].read().expect("column lock"))
			.collect();
		sort_coordinates(parallel, threshold, &mut coordinates, |a, b| {
			for guard in &guards {
				let ord = apply_direction(guard.compare(a, b), order);
				if ord != Ordering::Equal {
					return ord;
				}
			}
			Ordering::Equal
		});
		drop(guards);
	}
	frame.content_mut().rows_mut().set_order(coordinates)
}

/// Sorts the columns by the values in one or more rows.
pub(crate) fn sort_cols_by_data<R: Key, C: Key>(
	frame: &mut Frame<R, C>,
	order: SortOrder,
	row_keys: &[R],
) -> Result<()> {
	let mut row_coordinates = Vec::with_capacity(row_keys.len());
	for key in row_keys {
		match frame.content().rows().coordinate(key) {
			Some(coordinate) => row_coordinates.push(coordinate),
			None => return err!(frame::unknown_row_key(key)),
		}
	}
	let mut coordinates = frame.content().cols().order_snapshot();
	let parallel = frame.is_parallel();
	let threshold = settings::col_split_threshold();
	let content = frame.content();
	sort_coordinates(parallel, threshold, &mut coordinates, |a, b| {
		for &row in &row_coordinates {
			let left = content.value_at_coords(row, a).unwrap_or(Value::Undefined);
			let right = content.value_at_coords(row, b).unwrap_or(Value::Undefined);
			let ord = apply_direction(left.cmp(&right), order);
			if ord != Ordering::Equal {
				return ord;
			}
		}
		Ordering::Equal
	});
	frame.content_mut().cols_mut().set_order(coordinates)
}

/// Custom row comparator sort. A panicking comparator aborts the sort;
/// the permutation stays as it was.
pub(crate) fn sort_rows_with<R: Key, C: Key>(
	frame: &mut Frame<R, C>,
	comparator: impl Fn(&SortRow<'_, R, C>, &SortRow<'_, R, C>) -> Ordering + Sync,
) -> Result<()> {
	let mut coordinates = frame.content().rows().order_snapshot();
	let parallel = frame.is_parallel();
	let threshold = settings::row_split_threshold();
	let sorted = {
		let frame = &*frame;
		std::panic::catch_unwind(AssertUnwindSafe(|| {
			sort_coordinates(parallel, threshold, &mut coordinates, |a, b| {
				comparator(
					&SortRow {
						frame,
						coordinate: a,
					},
					&SortRow {
						frame,
						coordinate: b,
					},
				)
			});
		}))
	};
	match sorted {
		Ok(()) => frame.content_mut().rows_mut().set_order(coordinates),
		Err(_) => err!(frame::callback_panic("sort_rows_with")),
	}
}

/// Custom column comparator sort, mirroring [`sort_rows_with`].
pub(crate) fn sort_cols_with<R: Key, C: Key>(
	frame: &mut Frame<R, C>,
	comparator: impl Fn(&SortCol<'_, R, C>, &SortCol<'_, R, C>) -> Ordering + Sync,
) -> Result<()> {
	let mut coordinates = frame.content().cols().order_snapshot();
	let parallel = frame.is_parallel();
	let threshold = settings::col_split_threshold();
	let sorted = {
		let frame = &*frame;
		std::panic::catch_unwind(AssertUnwindSafe(|| {
			sort_coordinates(parallel, threshold, &mut coordinates, |a, b| {
				comparator(
					&SortCol {
						frame,
						coordinate: a,
					},
					&SortCol {
						frame,
						coordinate: b,
					},
				)
			});
		}))
	};
	match sorted {
		Ok(()) => frame.content_mut().cols_mut().set_order(coordinates),
		Err(_) => err!(frame::callback_panic("sort_cols_with")),
	}
}
