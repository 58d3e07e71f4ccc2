// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::cmp::Ordering;

use tabula_array::SortOrder;
use tabula_type::{Result, Value};

use crate::{
	Column, Frame, Key, Row,
	parallel,
	settings,
	sort::{self, SortCol, SortRow},
};

/// Read-side operations over the row axis.
pub struct Rows<'a, R: Key, C: Key> {
	frame: &'a Frame<R, C>,
}

impl<'a, R: Key, C: Key> Rows<'a, R, C> {
	pub(crate) fn new(frame: &'a Frame<R, C>) -> Self {
		Self {
			frame,
		}
	}

	pub fn count(&self) -> usize {
		self.frame.row_count()
	}

	pub fn keys(&self) -> impl Iterator<Item = &R> + '_ {
		self.frame.content().rows().keys()
	}

	pub fn contains(&self, key: &R) -> bool {
		self.frame.content().rows().contains(key)
	}

	pub fn at(&self, ordinal: usize) -> Result<Row<'a, R, C>> {
		self.frame.content().row_coordinate_at(ordinal)?;
		Ok(Row::new(self.frame, ordinal))
	}

	pub fn get(&self, key: &R) -> Result<Row<'a, R, C>> {
		let ordinal = self.frame.row_ordinal_of(key)?;
		Ok(Row::new(self.frame, ordinal))
	}

	/// Visits every row; partitioned across tasks when the frame is
	/// parallel, each leaf walking its sub-range in ordinal order.
	pub fn for_each(&self, consumer: impl Fn(&Row<'_, R, C>) + Sync) {
		let frame = self.frame;
		parallel::drive(
			frame.is_parallel(),
			0..self.count(),
			settings::row_split_threshold(),
			&|range| {
				for ordinal in range {
					consumer(&Row::new(frame, ordinal));
				}
			},
			&|(), ()| (),
		);
	}

	/// The keys whose rows match, in ordinal order regardless of
	/// parallelism.
	pub fn select_keys(&self, predicate: impl Fn(&Row<'_, R, C>) -> bool + Sync) -> Vec<R> {
		let frame = self.frame;
		let ordinals = parallel::select(
			frame.is_parallel(),
			self.count(),
			settings::row_split_threshold(),
			|ordinal| predicate(&Row::new(frame, ordinal)),
		);
		ordinals
			.into_iter()
			.map(|o| frame.content().rows().key_at(o).expect("ordinal in range").clone())
			.collect()
	}

	/// A filter view over the rows that match, preserving order.
	pub fn select(&self, predicate: impl Fn(&Row<'_, R, C>) -> bool + Sync) -> Result<Frame<R, C>> {
		let keys = self.select_keys(predicate);
		self.filter(keys)
	}

	/// A filter view over the given row keys.
	pub fn filter(&self, keys: impl IntoIterator<Item = R>) -> Result<Frame<R, C>> {
		let content = self.frame.content().filter(Some(keys.into_iter().collect()), None)?;
		Ok(self.frame.with_content(content))
	}

	/// The ordinal of the minimal row per the comparator; ties keep the
	/// earliest ordinal.
	pub fn min_by(&self, comparator: impl Fn(&Row<'_, R, C>, &Row<'_, R, C>) -> Ordering + Sync) -> Option<usize> {
		let frame = self.frame;
		parallel::extremum(
			frame.is_parallel(),
			self.count(),
			settings::row_split_threshold(),
			|candidate, incumbent| {
				comparator(&Row::new(frame, candidate), &Row::new(frame, incumbent))
					== Ordering::Less
			},
		)
	}

	pub fn max_by(&self, comparator: impl Fn(&Row<'_, R, C>, &Row<'_, R, C>) -> Ordering + Sync) -> Option<usize> {
		let frame = self.frame;
		parallel::extremum(
			frame.is_parallel(),
			self.count(),
			settings::row_split_threshold(),
			|candidate, incumbent| {
				comparator(&Row::new(frame, candidate), &Row::new(frame, incumbent))
					== Ordering::Greater
			},
		)
	}

	/// Groups the rows by their values in the given columns.
	pub fn group_by(&self, col_keys: &[C]) -> Result<Grouping<R, C>> {
		let mut order: Vec<Vec<Value>> = Vec::new();
		let mut members: Vec<Vec<R>> = Vec::new();
		for ordinal in 0..self.count() {
			let row = Row::new(self.frame, ordinal);
			let mut group = Vec::with_capacity(col_keys.len());
			for key in col_keys {
				group.push(row.value_of(key)?);
			}
			match order.iter().position(|g| g == &group) {
				Some(slot) => members[slot].push(row.key().clone()),
				None => {
					order.push(group);
					members.push(vec![row.key().clone()]);
				}
			}
		}
		let mut groups = Vec::with_capacity(order.len());
		for (group, keys) in order.into_iter().zip(members) {
			groups.push((group, self.filter(keys)?));
		}
		Ok(Grouping {
			groups,
		})
	}
}

/// Mutating operations over the row axis: key adds and sorting.
pub struct RowsMut<'a, R: Key, C: Key> {
	frame: &'a mut Frame<R, C>,
}

impl<'a, R: Key, C: Key> RowsMut<'a, R, C> {
	pub(crate) fn new(frame: &'a mut Frame<R, C>) -> Self {
		Self {
			frame,
		}
	}

	pub fn add(&mut self, key: R) -> Result<bool> {
		self.frame.content_mut().add_row(key)
	}

	pub fn add_all(&mut self, keys: impl IntoIterator<Item = R>) -> Result<usize> {
		let mut added = 0;
		for key in keys {
			if self.add(key)? {
				added += 1;
			}
		}
		Ok(added)
	}

	/// Sorts rows by their keys; `None` restores the pre-sort order.
	pub fn sort(&mut self, order: Option<SortOrder>) -> Result<()> {
		self.frame.content_mut().rows_mut().sort(order)
	}

	/// Sorts rows by data columns, lexicographically across the keys.
	pub fn sort_by(&mut self, order: SortOrder, col_keys: &[C]) -> Result<()> {
		sort::sort_rows_by_data(self.frame, order, col_keys)
	}

	pub fn sort_with(
		&mut self,
		comparator: impl Fn(&SortRow<'_, R, C>, &SortRow<'_, R, C>) -> Ordering + Sync,
	) -> Result<()> {
		sort::sort_rows_with(self.frame, comparator)
	}
}

/// Read-side operations over the column axis.
pub struct Cols<'a, R: Key, C: Key> {
	frame: &'a Frame<R, C>,
}

impl<'a, R: Key, C: Key> Cols<'a, R, C> {
	pub(crate) fn new(frame: &'a Frame<R, C>) -> Self {
		Self {
			frame,
		}
	}

	pub fn count(&self) -> usize {
		self.frame.col_count()
	}

	pub fn keys(&self) -> impl Iterator<Item = &C> + '_ {
		self.frame.content().cols().keys()
	}

	pub fn contains(&self, key: &C) -> bool {
		self.frame.content().cols().contains(key)
	}

	pub fn at(&self, ordinal: usize) -> Result<Column<'a, R, C>> {
		self.frame.content().col_coordinate_at(ordinal)?;
		Ok(Column::new(self.frame, ordinal))
	}

	pub fn get(&self, key: &C) -> Result<Column<'a, R, C>> {
		let ordinal = self.frame.col_ordinal_of(key)?;
		Ok(Column::new(self.frame, ordinal))
	}

	pub fn for_each(&self, consumer: impl Fn(&Column<'_, R, C>) + Sync) {
		let frame = self.frame;
		parallel::drive(
			frame.is_parallel(),
			0..self.count(),
			settings::col_split_threshold(),
			&|range| {
				for ordinal in range {
					consumer(&Column::new(frame, ordinal));
				}
			},
			&|(), ()| (),
		);
	}

	pub fn select_keys(&self, predicate: impl Fn(&Column<'_, R, C>) -> bool + Sync) -> Vec<C> {
		let frame = self.frame;
		let ordinals = parallel::select(
			frame.is_parallel(),
			self.count(),
			settings::col_split_threshold(),
			|ordinal| predicate(&Column::new(frame, ordinal)),
		);
		ordinals
			.into_iter()
			.map(|o| frame.content().cols().key_at(o).expect("ordinal in range").clone())
			.collect()
	}

	pub fn select(&self, predicate: impl Fn(&Column<'_, R, C>) -> bool + Sync) -> Result<Frame<R, C>> {
		let keys = self.select_keys(predicate);
		self.filter(keys)
	}

	pub fn filter(&self, keys: impl IntoIterator<Item = C>) -> Result<Frame<R, C>> {
		let content = self.frame.content().filter(None, Some(keys.into_iter().collect()))?;
		Ok(self.frame.with_content(content))
	}

	pub fn min_by(
		&self,
		comparator: impl Fn(&Column<'_, R, C>, &Column<'_, R, C>) -> Ordering + Sync,
	) -> Option<usize> {
		let frame = self.frame;
		parallel::extremum(
			frame.is_parallel(),
			self.count(),
			settings::col_split_threshold(),
			|candidate, incumbent| {
				comparator(&Column::new(frame, candidate), &Column::new(frame, incumbent))
					== Ordering::Less
			},
		)
	}

	pub fn max_by(
		&self,
		comparator: impl Fn(&Column<'_, R, C>, &Column<'_, R, C>) -> Ordering + Sync,
	) -> Option<usize> {
		let frame = self.frame;
		parallel::extremum(
			frame.is_parallel(),
			self.count(),
			settings::col_split_threshold(),
			|candidate, incumbent| {
				comparator(&Column::new(frame, candidate), &Column::new(frame, incumbent))
					== Ordering::Greater
			},
		)
	}
}

/// Mutating operations over the column axis.
pub struct ColsMut<'a, R: Key, C: Key> {
	frame: &'a mut Frame<R, C>,
}

impl<'a, R: Key, C: Key> ColsMut<'a, R, C> {
	pub(crate) fn new(frame: &'a mut Frame<R, C>) -> Self {
		Self {
			frame,
		}
	}

	pub fn add(&mut self, key: C, ty: tabula_type::Type) -> Result<bool> {
		self.frame.content_mut().add_column(key, ty)
	}

	pub fn add_array(&mut self, key: C, array: tabula_array::Array) -> Result<bool> {
		self.frame.content_mut().add_column_array(key, array)
	}

	/// Rewrites a column key in place; ordinals and storage survive.
	pub fn rename(&mut self, existing: &C, replacement: C) -> Result<usize> {
		self.frame.content_mut().rename_col(existing, replacement)
	}

	/// Sorts columns by their keys; `None` restores the pre-sort order.
	pub fn sort(&mut self, order: Option<SortOrder>) -> Result<()> {
		self.frame.content_mut().cols_mut().sort(order)
	}

	/// Sorts columns by the values in the given rows.
	pub fn sort_by(&mut self, order: SortOrder, row_keys: &[R]) -> Result<()> {
		sort::sort_cols_by_data(self.frame, order, row_keys)
	}

	pub fn sort_with(
		&mut self,
		comparator: impl Fn(&SortCol<'_, R, C>, &SortCol<'_, R, C>) -> Ordering + Sync,
	) -> Result<()> {
		sort::sort_cols_with(self.frame, comparator)
	}
}

/// The result of a group-by: group value tuples with a filter view per
/// group, in first-seen order.
pub struct Grouping<R: Key, C: Key> {
	groups: Vec<(Vec<Value>, Frame<R, C>)>,
}

impl<R: Key, C: Key> Grouping<R, C> {
	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}

	pub fn get(&self, group: &[Value]) -> Option<&Frame<R, C>> {
		self.groups.iter().find(|(g, _)| g.as_slice() == group).map(|(_, frame)| frame)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&[Value], &Frame<R, C>)> + '_ {
		self.groups.iter().map(|(g, f)| (g.as_slice(), f))
	}
}
