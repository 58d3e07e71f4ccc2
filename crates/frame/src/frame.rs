// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use tabula_array::Array;
use tabula_type::{
	Result, Type, Value, err,
	error::diagnostic::frame,
};
use tracing::debug;

use crate::{
	Cols, ColsMut, Cursor, FrameContent, Key, Rows, RowsMut,
	cursor::CellValue,
	parallel, settings,
	vector::{Column, Row},
};

/// The value bounds of a scan: minimum and maximum by value order.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
	pub min: Value,
	pub max: Value,
}

/// A two-dimensional table with typed, keyed row and column axes.
///
/// Clones share the underlying column storage (the filter-view model);
/// `copy` produces a detached deep copy. The parallel flag decides
/// whether eligible bulk operations fork across the thread pool; both
/// modes yield identical observable results.
#[derive(Clone)]
pub struct Frame<R: Key, C: Key> {
	content: FrameContent<R, C>,
	parallel: bool,
}

impl<R: Key, C: Key> Frame<R, C> {
	pub fn new(content: FrameContent<R, C>) -> Self {
		Self {
			content,
			parallel: false,
		}
	}

	pub(crate) fn content(&self) -> &FrameContent<R, C> {
		&self.content
	}

	pub(crate) fn content_mut(&mut self) -> &mut FrameContent<R, C> {
		&mut self.content
	}

	pub(crate) fn with_content(&self, content: FrameContent<R, C>) -> Frame<R, C> {
		Frame {
			content,
			parallel: self.parallel,
		}
	}

	pub fn row_count(&self) -> usize {
		self.content.row_count()
	}

	pub fn col_count(&self) -> usize {
		self.content.col_count()
	}

	pub fn is_empty(&self) -> bool {
		self.row_count() == 0 || self.col_count() == 0
	}

	pub fn is_parallel(&self) -> bool {
		self.parallel
	}

	/// A handle running bulk operations on the thread pool; storage is
	/// shared with this frame.
	pub fn parallel(&self) -> Frame<R, C> {
		Frame {
			content: self.content.clone(),
			parallel: true,
		}
	}

	pub fn sequential(&self) -> Frame<R, C> {
		Frame {
			content: self.content.clone(),
			parallel: false,
		}
	}

	pub fn rows(&self) -> Rows<'_, R, C> {
		Rows::new(self)
	}

	pub fn rows_mut(&mut self) -> RowsMut<'_, R, C> {
		RowsMut::new(self)
	}

	pub fn cols(&self) -> Cols<'_, R, C> {
		Cols::new(self)
	}

	pub fn cols_mut(&mut self) -> ColsMut<'_, R, C> {
		ColsMut::new(self)
	}

	pub fn cursor(&self) -> Cursor<'_, R, C> {
		Cursor::new(self)
	}

	pub fn row_at(&self, ordinal: usize) -> Result<Row<'_, R, C>> {
		self.rows().at(ordinal)
	}

	pub fn col_at(&self, ordinal: usize) -> Result<Column<'_, R, C>> {
		self.cols().at(ordinal)
	}

	pub fn row_ordinal_of(&self, key: &R) -> Result<usize> {
		match self.content.rows().ordinal_of(key) {
			Some(ordinal) => Ok(ordinal),
			None => err!(frame::unknown_row_key(key)),
		}
	}

	pub fn col_ordinal_of(&self, key: &C) -> Result<usize> {
		match self.content.cols().ordinal_of(key) {
			Some(ordinal) => Ok(ordinal),
			None => err!(frame::unknown_col_key(key)),
		}
	}

	pub fn value_at(&self, row_ordinal: usize, col_ordinal: usize) -> Result<Value> {
		self.content.value_at(row_ordinal, col_ordinal)
	}

	pub fn value(&self, row_key: &R, col_key: &C) -> Result<Value> {
		self.value_at(self.row_ordinal_of(row_key)?, self.col_ordinal_of(col_key)?)
	}

	pub fn set_value_at(&self, row_ordinal: usize, col_ordinal: usize, value: &Value) -> Result<Value> {
		self.content.set_value_at(row_ordinal, col_ordinal, value)
	}

	pub fn set_value(&self, row_key: &R, col_key: &C, value: &Value) -> Result<Value> {
		self.set_value_at(self.row_ordinal_of(row_key)?, self.col_ordinal_of(col_key)?, value)
	}

	pub fn get_double(&self, row_key: &R, col_key: &C) -> Result<f64> {
		Ok(self.value(row_key, col_key)?.as_f64().unwrap_or(f64::NAN))
	}

	pub fn get_double_at(&self, row_ordinal: usize, col_ordinal: usize) -> Result<f64> {
		Ok(self.value_at(row_ordinal, col_ordinal)?.as_f64().unwrap_or(f64::NAN))
	}

	pub fn get_long(&self, row_key: &R, col_key: &C) -> Result<i64> {
		Ok(self.value(row_key, col_key)?.as_i64().unwrap_or(0))
	}

	pub fn get_bool(&self, row_key: &R, col_key: &C) -> Result<bool> {
		Ok(self.value(row_key, col_key)?.as_bool().unwrap_or(false))
	}

	pub fn set_double(&self, row_key: &R, col_key: &C, value: f64) -> Result<Value> {
		self.set_value(row_key, col_key, &Value::float8(value))
	}

	pub fn set_long(&self, row_key: &R, col_key: &C, value: i64) -> Result<Value> {
		self.set_value(row_key, col_key, &Value::Int8(value))
	}

	fn linear_len(&self) -> usize {
		self.row_count() * self.col_count()
	}

	fn cell_at_linear(&self, linear: usize) -> Result<CellValue<R, C>> {
		let rows = self.row_count();
		let row_ordinal = linear % rows;
		let col_ordinal = linear / rows;
		Ok(CellValue::new(
			self.content.rows().key_at(row_ordinal)?.clone(),
			self.content.cols().key_at(col_ordinal)?.clone(),
			row_ordinal,
			col_ordinal,
			self.value_at(row_ordinal, col_ordinal)?,
		))
	}

	/// Visits every cell in column-major order (storage order). Under
	/// parallelism the visit order across tasks is unspecified.
	pub fn for_each_value(&self, consumer: impl Fn(&CellValue<R, C>) + Sync) -> Result<()> {
		if self.is_empty() {
			return Ok(());
		}
		parallel::drive(
			self.parallel,
			0..self.linear_len(),
			settings::row_split_threshold(),
			&|range| {
				for linear in range {
					if let Ok(cell) = self.cell_at_linear(linear) {
						consumer(&cell);
					}
				}
			},
			&|(), ()| (),
		);
		Ok(())
	}

	/// Cells in column-major order.
	pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
		(0..self.linear_len()).map(move |linear| {
			let rows = self.row_count();
			self.value_at(linear % rows, linear / rows).unwrap_or(Value::Undefined)
		})
	}

	pub fn count(&self, predicate: impl Fn(&CellValue<R, C>) -> bool + Sync) -> usize {
		if self.is_empty() {
			return 0;
		}
		parallel::count(self.parallel, self.linear_len(), settings::row_split_threshold(), |linear| {
			self.cell_at_linear(linear).map(|cell| predicate(&cell)).unwrap_or(false)
		})
	}

	fn extremum_cell(
		&self,
		predicate: &(impl Fn(&CellValue<R, C>) -> bool + Sync),
		keep_max: bool,
	) -> Option<CellValue<R, C>> {
		if self.is_empty() {
			return None;
		}
		let best = parallel::drive(
			self.parallel,
			0..self.linear_len(),
			settings::row_split_threshold(),
			&|range| {
				let mut best: Option<(usize, Value)> = None;
				for linear in range {
					let cell = match self.cell_at_linear(linear) {
						Ok(cell) => cell,
						Err(_) => continue,
					};
					if cell.is_null() || !predicate(&cell) {
						continue;
					}
					let replace = match &best {
						None => true,
						Some((_, incumbent)) => {
							if keep_max {
								cell.value() > incumbent
							} else {
								cell.value() < incumbent
							}
						}
					};
					if replace {
						best = Some((linear, cell.into_value()));
					}
				}
				best
			},
			&|left, right| match (left, right) {
				(Some(l), Some(r)) => {
					let replace = if keep_max {
						r.1 > l.1
					} else {
						r.1 < l.1
					};
					Some(if replace {
						r
					} else {
						l
					})
				}
				(l, r) => l.or(r),
			},
		);
		best.and_then(|(linear, _)| self.cell_at_linear(linear).ok())
	}

	/// The minimal matching cell by value order, nulls skipped.
	pub fn min(&self, predicate: impl Fn(&CellValue<R, C>) -> bool + Sync) -> Option<CellValue<R, C>> {
		self.extremum_cell(&predicate, false)
	}

	pub fn max(&self, predicate: impl Fn(&CellValue<R, C>) -> bool + Sync) -> Option<CellValue<R, C>> {
		self.extremum_cell(&predicate, true)
	}

	pub fn bounds(&self, predicate: impl Fn(&CellValue<R, C>) -> bool + Sync) -> Option<Bounds> {
		let min = self.min(&predicate)?;
		let max = self.max(&predicate)?;
		Some(Bounds {
			min: min.into_value(),
			max: max.into_value(),
		})
	}

	/// The shared bulk-write driver: every column must carry one of the
	/// accepted element types before any cell is touched, so a failed
	/// apply leaves the frame as it was.
	fn apply_cells(
		&self,
		accepted: &[Type],
		operation: &str,
		mapper: &(impl Fn(&CellValue<R, C>) -> Value + Sync),
	) -> Result<()> {
		for col_ordinal in 0..self.col_count() {
			let ty = self.content.column_type(col_ordinal)?;
			if !accepted.contains(&ty) {
				return err!(frame::type_mismatch(&accepted[0], &ty));
			}
		}
		debug!(operation, rows = self.row_count(), cols = self.col_count(), "bulk apply");
		if self.content.is_transposed() {
			// transposed storage is row-major; go cell-wise
			for col_ordinal in 0..self.col_count() {
				for row_ordinal in 0..self.row_count() {
					let cell = CellValue::new(
						self.content.rows().key_at(row_ordinal)?.clone(),
						self.content.cols().key_at(col_ordinal)?.clone(),
						row_ordinal,
						col_ordinal,
						self.value_at(row_ordinal, col_ordinal)?,
					);
					let mapped = mapper(&cell);
					self.set_value_at(row_ordinal, col_ordinal, &mapped)?;
				}
			}
			return Ok(());
		}
		let row_keys: Vec<R> = self.content.rows().keys().cloned().collect();
		let row_coordinates: Vec<usize> = (0..self.row_count())
			.map(|o| self.content.row_coordinate_at(o))
			.collect::<Result<Vec<_>>>()?;
		// one task per column: the write lock is held once per column
		// and ordinal partitions stay disjoint
		parallel::drive(
			self.parallel,
			0..self.col_count(),
			1,
			&|range| -> Result<()> {
				for col_ordinal in range {
					let col_key = self.content.cols().key_at(col_ordinal)?.clone();
					let col_coordinate = self.content.col_coordinate_at(col_ordinal)?;
					let store = &self.content.stores()[col_coordinate];
					let mut array = store.write().expect("column lock");
					for (row_ordinal, &row_coordinate) in row_coordinates.iter().enumerate() {
						let cell = CellValue::new(
							row_keys[row_ordinal].clone(),
							col_key.clone(),
							row_ordinal,
							col_ordinal,
							array.get_value(row_coordinate)?,
						);
						let mapped = mapper(&cell);
						array.set_value(row_coordinate, &mapped)?;
					}
				}
				Ok(())
			},
			&|left, right| left.and(right),
		)
	}

	/// Rewrites every boolean cell in place.
	pub fn apply_booleans(&self, mapper: impl Fn(&CellValue<R, C>) -> bool + Sync) -> Result<()> {
		self.apply_cells(&[Type::Boolean], "apply_booleans", &|cell| Value::Boolean(mapper(cell)))
	}

	pub fn apply_ints(&self, mapper: impl Fn(&CellValue<R, C>) -> i32 + Sync) -> Result<()> {
		self.apply_cells(&[Type::Int4], "apply_ints", &|cell| Value::Int4(mapper(cell)))
	}

	pub fn apply_longs(&self, mapper: impl Fn(&CellValue<R, C>) -> i64 + Sync) -> Result<()> {
		self.apply_cells(&[Type::Int8], "apply_longs", &|cell| Value::Int8(mapper(cell)))
	}

	pub fn apply_doubles(&self, mapper: impl Fn(&CellValue<R, C>) -> f64 + Sync) -> Result<()> {
		self.apply_cells(&[Type::Float8], "apply_doubles", &|cell| Value::float8(mapper(cell)))
	}

	/// Rewrites every cell; each column keeps its element type, so the
	/// mapped value must fit the column it lands in.
	pub fn apply_values(&self, mapper: impl Fn(&CellValue<R, C>) -> Value + Sync) -> Result<()> {
		self.apply_cells(
			&[
				Type::Boolean,
				Type::Int4,
				Type::Int8,
				Type::Float8,
				Type::Utf8,
				Type::Date,
				Type::Time,
				Type::DateTime,
				Type::Zoned,
				Type::Any,
			],
			"apply_values",
			&mapper,
		)
	}

	/// A new frame with the same keys and every column of the target
	/// type, cells produced by the mapper.
	fn map_to(&self, ty: Type, mapper: &(impl Fn(&CellValue<R, C>) -> Value + Sync)) -> Result<Frame<R, C>> {
		let rows = self.content.rows().copy(true);
		let cols = self.content.cols().copy(true);
		let mut data = Vec::with_capacity(self.col_count());
		for col_ordinal in 0..self.col_count() {
			let mut array = Array::of(ty, self.row_count());
			for row_ordinal in 0..self.row_count() {
				let cell = CellValue::new(
					self.content.rows().key_at(row_ordinal)?.clone(),
					self.content.cols().key_at(col_ordinal)?.clone(),
					row_ordinal,
					col_ordinal,
					self.value_at(row_ordinal, col_ordinal)?,
				);
				array.set_value(row_ordinal, &mapper(&cell))?;
			}
			data.push(std::sync::Arc::new(std::sync::RwLock::new(array)));
		}
		Ok(self.with_content(FrameContent::new(rows, cols, data)))
	}

	pub fn map_to_booleans(&self, mapper: impl Fn(&CellValue<R, C>) -> bool + Sync) -> Result<Frame<R, C>> {
		self.map_to(Type::Boolean, &|cell| Value::Boolean(mapper(cell)))
	}

	pub fn map_to_ints(&self, mapper: impl Fn(&CellValue<R, C>) -> i32 + Sync) -> Result<Frame<R, C>> {
		self.map_to(Type::Int4, &|cell| Value::Int4(mapper(cell)))
	}

	pub fn map_to_longs(&self, mapper: impl Fn(&CellValue<R, C>) -> i64 + Sync) -> Result<Frame<R, C>> {
		self.map_to(Type::Int8, &|cell| Value::Int8(mapper(cell)))
	}

	pub fn map_to_doubles(&self, mapper: impl Fn(&CellValue<R, C>) -> f64 + Sync) -> Result<Frame<R, C>> {
		self.map_to(Type::Float8, &|cell| Value::float8(mapper(cell)))
	}

	pub fn map_to_objects(&self, mapper: impl Fn(&CellValue<R, C>) -> Value + Sync) -> Result<Frame<R, C>> {
		self.map_to(Type::Any, &mapper)
	}

	/// Maps one column to a new element type; the remaining columns are
	/// deep-copied unchanged.
	pub fn map_col_to(
		&self,
		col_key: &C,
		ty: Type,
		mapper: impl Fn(&CellValue<R, C>) -> Value + Sync,
	) -> Result<Frame<R, C>> {
		let col_ordinal = self.col_ordinal_of(col_key)?;
		let mut copy = self.copy()?;
		let mut array = Array::of(ty, self.row_count());
		for row_ordinal in 0..self.row_count() {
			let cell = CellValue::new(
				self.content.rows().key_at(row_ordinal)?.clone(),
				col_key.clone(),
				row_ordinal,
				col_ordinal,
				self.value_at(row_ordinal, col_ordinal)?,
			);
			array.set_value(row_ordinal, &mapper(&cell))?;
		}
		copy.content_mut().replace_store(col_ordinal, array)?;
		Ok(copy)
	}

	/// A detached deep copy: each column keeps its element type and
	/// storage style.
	pub fn copy(&self) -> Result<Frame<R, C>> {
		Ok(self.with_content(self.content.deep_copy()?))
	}

	/// Overlays `other` onto this frame: the source wins at overlapping
	/// cells; missing keys join when the flags allow.
	pub fn update(&mut self, other: &Frame<R, C>, add_rows: bool, add_cols: bool) -> Result<()> {
		if add_rows {
			let missing: Vec<R> =
				other.rows().keys().filter(|k| !self.content.rows().contains(k)).cloned().collect();
			for key in missing {
				self.content.add_row(key)?;
			}
		}
		if add_cols {
			let missing: Vec<(C, Type)> = {
				let mut found = Vec::new();
				for col_ordinal in 0..other.col_count() {
					let key = other.content.cols().key_at(col_ordinal)?;
					if !self.content.cols().contains(key) {
						found.push((key.clone(), other.content.column_type(col_ordinal)?));
					}
				}
				found
			};
			for (key, ty) in missing {
				self.content.add_column(key, ty)?;
			}
		}
		for row_ordinal in 0..other.row_count() {
			let row_key = other.content.rows().key_at(row_ordinal)?.clone();
			if self.content.rows().ordinal_of(&row_key).is_none() {
				continue;
			}
			for col_ordinal in 0..other.col_count() {
				let col_key = other.content.cols().key_at(col_ordinal)?;
				if self.content.cols().ordinal_of(col_key).is_none() {
					continue;
				}
				let value = other.value_at(row_ordinal, col_ordinal)?;
				self.set_value(&row_key, col_key, &value)?;
			}
		}
		Ok(())
	}

	/// A new Int4 frame holding the sign (-1, 0, +1) of every numeric
	/// cell; nulls map to zero. Non-numeric columns are rejected.
	pub fn sign(&self) -> Result<Frame<R, C>> {
		for col_ordinal in 0..self.col_count() {
			let ty = self.content.column_type(col_ordinal)?;
			if !ty.is_number() {
				return err!(frame::type_mismatch(&Type::Float8, &ty));
			}
		}
		self.map_to(Type::Int4, &|cell| match cell.value().signum() {
			Value::Int4(sign) => Value::Int4(sign),
			_ => Value::Int4(0),
		})
	}

	/// A view over the first `count` rows.
	pub fn head(&self, count: usize) -> Result<Frame<R, C>> {
		let take = count.min(self.row_count());
		let ordinals: Vec<usize> = (0..take).collect();
		Ok(self.with_content(self.content.filter_ordinals(Some(&ordinals), None)?))
	}

	/// A view over the last `count` rows.
	pub fn tail(&self, count: usize) -> Result<Frame<R, C>> {
		let take = count.min(self.row_count());
		let ordinals: Vec<usize> = (self.row_count() - take..self.row_count()).collect();
		Ok(self.with_content(self.content.filter_ordinals(Some(&ordinals), None)?))
	}

	/// A view over the first `count` columns.
	pub fn left(&self, count: usize) -> Result<Frame<R, C>> {
		let take = count.min(self.col_count());
		let ordinals: Vec<usize> = (0..take).collect();
		Ok(self.with_content(self.content.filter_ordinals(None, Some(&ordinals))?))
	}

	/// A view over the last `count` columns.
	pub fn right(&self, count: usize) -> Result<Frame<R, C>> {
		let take = count.min(self.col_count());
		let ordinals: Vec<usize> = (self.col_count() - take..self.col_count()).collect();
		Ok(self.with_content(self.content.filter_ordinals(None, Some(&ordinals))?))
	}

	/// A view over the given keys on both axes.
	pub fn select(
		&self,
		row_keys: impl IntoIterator<Item = R>,
		col_keys: impl IntoIterator<Item = C>,
	) -> Result<Frame<R, C>> {
		let content = self.content.filter(
			Some(row_keys.into_iter().collect()),
			Some(col_keys.into_iter().collect()),
		)?;
		Ok(self.with_content(content))
	}

	/// A view over the rows and columns matching the predicates.
	pub fn select_by(
		&self,
		row_predicate: impl Fn(&Row<'_, R, C>) -> bool + Sync,
		col_predicate: impl Fn(&Column<'_, R, C>) -> bool + Sync,
	) -> Result<Frame<R, C>> {
		let row_keys = self.rows().select_keys(row_predicate);
		let col_keys = self.cols().select_keys(col_predicate);
		self.select(row_keys, col_keys)
	}

	/// The logical transpose view; every column must share one element
	/// type. Writes through the view land in this frame's storage.
	pub fn transpose(&self) -> Result<Frame<C, R>> {
		Ok(Frame {
			content: self.content.transpose()?,
			parallel: self.parallel,
		})
	}

	/// A materialized transpose for mixed-type frames: a new Any-typed
	/// frame, column by column.
	pub fn transpose_to_any(&self) -> Result<Frame<C, R>> {
		let rows = self.content.cols().copy(true);
		let cols = self.content.rows().copy(true);
		let mut data = Vec::with_capacity(self.row_count());
		for row_ordinal in 0..self.row_count() {
			let mut array = Array::of(Type::Any, self.col_count());
			for col_ordinal in 0..self.col_count() {
				let value = self.value_at(row_ordinal, col_ordinal)?;
				array.set_value(col_ordinal, &value)?;
			}
			data.push(std::sync::Arc::new(std::sync::RwLock::new(array)));
		}
		Ok(Frame {
			content: FrameContent::new(rows, cols, data),
			parallel: self.parallel,
		})
	}
}

impl<R: Key, C: Key> PartialEq for Frame<R, C> {
	/// Frames are equal when the row-key sequence, the column-key
	/// sequence and every cell value match.
	fn eq(&self, other: &Self) -> bool {
		if self.row_count() != other.row_count() || self.col_count() != other.col_count() {
			return false;
		}
		if !self.content.rows().keys().eq(other.content.rows().keys()) {
			return false;
		}
		if !self.content.cols().keys().eq(other.content.cols().keys()) {
			return false;
		}
		for col in 0..self.col_count() {
			for row in 0..self.row_count() {
				let left = self.value_at(row, col).unwrap_or(Value::Undefined);
				let right = other.value_at(row, col).unwrap_or(Value::Undefined);
				if left != right {
					return false;
				}
			}
		}
		true
	}
}

impl<R: Key, C: Key> std::fmt::Debug for Frame<R, C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Frame")
			.field("rows", &self.row_count())
			.field("cols", &self.col_count())
			.field("parallel", &self.parallel)
			.finish()
	}
}
