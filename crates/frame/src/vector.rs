// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::collections::HashSet;

use tabula_array::Array;
use tabula_type::{Result, Type, Value};

use crate::{Frame, Key, Stats};

/// A row vector: a lightweight handle fixed on one row ordinal, movable
/// along the columns.
#[derive(Clone, Copy)]
pub struct Row<'a, R: Key, C: Key> {
	frame: &'a Frame<R, C>,
	ordinal: usize,
}

impl<'a, R: Key, C: Key> Row<'a, R, C> {
	pub(crate) fn new(frame: &'a Frame<R, C>, ordinal: usize) -> Self {
		Self {
			frame,
			ordinal,
		}
	}

	pub fn key(&self) -> &R {
		self.frame.content().rows().key_at(self.ordinal).expect("row ordinal in range")
	}

	pub fn ordinal(&self) -> usize {
		self.ordinal
	}

	pub fn len(&self) -> usize {
		self.frame.col_count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn value_at(&self, col_ordinal: usize) -> Result<Value> {
		self.frame.content().value_at(self.ordinal, col_ordinal)
	}

	pub fn value_of(&self, col_key: &C) -> Result<Value> {
		let col_ordinal = self.frame.col_ordinal_of(col_key)?;
		self.value_at(col_ordinal)
	}

	pub fn get_double_at(&self, col_ordinal: usize) -> Result<f64> {
		Ok(self.value_at(col_ordinal)?.as_f64().unwrap_or(f64::NAN))
	}

	pub fn get_double_of(&self, col_key: &C) -> Result<f64> {
		Ok(self.value_of(col_key)?.as_f64().unwrap_or(f64::NAN))
	}

	pub fn get_long_at(&self, col_ordinal: usize) -> Result<i64> {
		Ok(self.value_at(col_ordinal)?.as_i64().unwrap_or(0))
	}

	pub fn set_value_at(&self, col_ordinal: usize, value: &Value) -> Result<Value> {
		self.frame.content().set_value_at(self.ordinal, col_ordinal, value)
	}

	pub fn set_value_of(&self, col_key: &C, value: &Value) -> Result<Value> {
		let col_ordinal = self.frame.col_ordinal_of(col_key)?;
		self.set_value_at(col_ordinal, value)
	}

	pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
		(0..self.len()).map(move |col| self.value_at(col).unwrap_or(Value::Undefined))
	}

	pub fn is_null_at(&self, col_ordinal: usize) -> Result<bool> {
		self.frame.content().is_null_at(self.ordinal, col_ordinal)
	}

	/// Statistics over the numeric cells of this row.
	pub fn stats(&self) -> Stats {
		Stats::of(self.values().filter_map(|v| v.as_f64()))
	}

	/// Order-preserving distinct values, nulls skipped.
	pub fn distinct(&self, limit: usize) -> Vec<Value> {
		distinct(self.values(), limit)
	}

	/// Copies the row into a new Any-typed array; rows span columns of
	/// mixed element types.
	pub fn to_array(&self) -> Result<Array> {
		let values: Vec<Value> = self.values().collect();
		Array::from_values(Type::Any, &values)
	}

	/// Binary search along the columns; the row must be sorted
	/// ascending in value order.
	pub fn binary_search(&self, value: &Value) -> Result<std::result::Result<usize, usize>> {
		binary_search(self.len(), value, |ordinal| self.value_at(ordinal))
	}
}

/// A column vector: fixed column ordinal, movable along the rows.
#[derive(Clone, Copy)]
pub struct Column<'a, R: Key, C: Key> {
	frame: &'a Frame<R, C>,
	ordinal: usize,
}

impl<'a, R: Key, C: Key> Column<'a, R, C> {
	pub(crate) fn new(frame: &'a Frame<R, C>, ordinal: usize) -> Self {
		Self {
			frame,
			ordinal,
		}
	}

	pub fn key(&self) -> &C {
		self.frame.content().cols().key_at(self.ordinal).expect("col ordinal in range")
	}

	pub fn ordinal(&self) -> usize {
		self.ordinal
	}

	pub fn len(&self) -> usize {
		self.frame.row_count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn element_type(&self) -> Result<Type> {
		self.frame.content().column_type(self.ordinal)
	}

	pub fn value_at(&self, row_ordinal: usize) -> Result<Value> {
		self.frame.content().value_at(row_ordinal, self.ordinal)
	}

	pub fn value_of(&self, row_key: &R) -> Result<Value> {
		let row_ordinal = self.frame.row_ordinal_of(row_key)?;
		self.value_at(row_ordinal)
	}

	pub fn get_double_at(&self, row_ordinal: usize) -> Result<f64> {
		Ok(self.value_at(row_ordinal)?.as_f64().unwrap_or(f64::NAN))
	}

	pub fn get_double_of(&self, row_key: &R) -> Result<f64> {
		Ok(self.value_of(row_key)?.as_f64().unwrap_or(f64::NAN))
	}

	pub fn get_long_at(&self, row_ordinal: usize) -> Result<i64> {
		Ok(self.value_at(row_ordinal)?.as_i64().unwrap_or(0))
	}

	pub fn set_value_at(&self, row_ordinal: usize, value: &Value) -> Result<Value> {
		self.frame.content().set_value_at(row_ordinal, self.ordinal, value)
	}

	pub fn set_value_of(&self, row_key: &R, value: &Value) -> Result<Value> {
		let row_ordinal = self.frame.row_ordinal_of(row_key)?;
		self.set_value_at(row_ordinal, value)
	}

	pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
		(0..self.len()).map(move |row| self.value_at(row).unwrap_or(Value::Undefined))
	}

	pub fn is_null_at(&self, row_ordinal: usize) -> Result<bool> {
		self.frame.content().is_null_at(row_ordinal, self.ordinal)
	}

	/// Statistics over the numeric cells of this column.
	pub fn stats(&self) -> Stats {
		Stats::of(self.values().filter_map(|v| v.as_f64()))
	}

	pub fn distinct(&self, limit: usize) -> Vec<Value> {
		distinct(self.values(), limit)
	}

	/// Copies the column into a new array of its element type, rows in
	/// ordinal order.
	pub fn to_array(&self) -> Result<Array> {
		let ty = self.element_type()?;
		let values: Vec<Value> = self.values().collect();
		Array::from_values(ty, &values)
	}

	/// Binary search along the rows; the column must be sorted
	/// ascending in value order.
	pub fn binary_search(&self, value: &Value) -> Result<std::result::Result<usize, usize>> {
		binary_search(self.len(), value, |ordinal| self.value_at(ordinal))
	}

	pub fn min(&self) -> Option<Value> {
		self.values().filter(|v| !v.is_undefined()).min()
	}

	pub fn max(&self) -> Option<Value> {
		self.values().filter(|v| !v.is_undefined()).max()
	}

	/// Applies a typed mapper to every cell of this column, in place.
	pub fn apply(&self, mapper: impl Fn(usize, &Value) -> Value) -> Result<()> {
		for row_ordinal in 0..self.len() {
			let value = self.value_at(row_ordinal)?;
			let mapped = mapper(row_ordinal, &value);
			if mapped != value {
				self.set_value_at(row_ordinal, &mapped)?;
			}
		}
		Ok(())
	}
}

fn distinct(values: impl Iterator<Item = Value>, limit: usize) -> Vec<Value> {
	let mut seen = HashSet::new();
	let mut kept = Vec::new();
	for value in values {
		if value.is_undefined() {
			continue;
		}
		if seen.insert(value.clone()) {
			kept.push(value);
			if kept.len() >= limit {
				break;
			}
		}
	}
	kept
}

fn binary_search(
	len: usize,
	value: &Value,
	read: impl Fn(usize) -> Result<Value>,
) -> Result<std::result::Result<usize, usize>> {
	let mut low = 0;
	let mut high = len;
	while low < high {
		let mid = (low + high) / 2;
		match read(mid)?.cmp(value) {
			std::cmp::Ordering::Less => low = mid + 1,
			std::cmp::Ordering::Greater => high = mid,
			std::cmp::Ordering::Equal => return Ok(Ok(mid)),
		}
	}
	Ok(Err(low))
}
