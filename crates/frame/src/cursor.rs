// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use tabula_type::{Result, Value};

use crate::{Frame, Key};

/// An owned snapshot of one cell, handed to bulk callbacks. Keys and
/// ordinals are captured at visit time; typed reads follow the null
/// rules of the element types (zero / false / NaN for null primitives).
#[derive(Clone, Debug, PartialEq)]
pub struct CellValue<R: Key, C: Key> {
	row_key: R,
	col_key: C,
	row_ordinal: usize,
	col_ordinal: usize,
	value: Value,
}

impl<R: Key, C: Key> CellValue<R, C> {
	pub(crate) fn new(row_key: R, col_key: C, row_ordinal: usize, col_ordinal: usize, value: Value) -> Self {
		Self {
			row_key,
			col_key,
			row_ordinal,
			col_ordinal,
			value,
		}
	}

	pub fn row_key(&self) -> &R {
		&self.row_key
	}

	pub fn col_key(&self) -> &C {
		&self.col_key
	}

	pub fn row_ordinal(&self) -> usize {
		self.row_ordinal
	}

	pub fn col_ordinal(&self) -> usize {
		self.col_ordinal
	}

	pub fn value(&self) -> &Value {
		&self.value
	}

	pub fn into_value(self) -> Value {
		self.value
	}

	pub fn is_null(&self) -> bool {
		self.value.is_undefined()
	}

	pub fn get_bool(&self) -> bool {
		self.value.as_bool().unwrap_or(false)
	}

	pub fn get_int(&self) -> i32 {
		self.value.as_i64().map(|v| v as i32).unwrap_or(0)
	}

	pub fn get_long(&self) -> i64 {
		self.value.as_i64().unwrap_or(0)
	}

	pub fn get_double(&self) -> f64 {
		self.value.as_f64().unwrap_or(f64::NAN)
	}
}

/// A movable (row ordinal, column ordinal) pointer into a frame. Reads
/// and writes dispatch on the current column's element type; writes go
/// through the shared column storage, so a cursor needs no exclusive
/// borrow of the frame.
#[derive(Clone)]
pub struct Cursor<'a, R: Key, C: Key> {
	frame: &'a Frame<R, C>,
	row: usize,
	col: usize,
}

impl<'a, R: Key, C: Key> Cursor<'a, R, C> {
	pub(crate) fn new(frame: &'a Frame<R, C>) -> Self {
		Self {
			frame,
			row: 0,
			col: 0,
		}
	}

	pub fn move_to(&mut self, row_ordinal: usize, col_ordinal: usize) -> &mut Self {
		self.row = row_ordinal;
		self.col = col_ordinal;
		self
	}

	pub fn to_row(&mut self, row_ordinal: usize) -> &mut Self {
		self.row = row_ordinal;
		self
	}

	pub fn to_col(&mut self, col_ordinal: usize) -> &mut Self {
		self.col = col_ordinal;
		self
	}

	pub fn row_ordinal(&self) -> usize {
		self.row
	}

	pub fn col_ordinal(&self) -> usize {
		self.col
	}

	pub fn row_key(&self) -> Result<&R> {
		self.frame.content().rows().key_at(self.row)
	}

	pub fn col_key(&self) -> Result<&C> {
		self.frame.content().cols().key_at(self.col)
	}

	pub fn value(&self) -> Result<Value> {
		self.frame.content().value_at(self.row, self.col)
	}

	pub fn set_value(&self, value: &Value) -> Result<Value> {
		self.frame.content().set_value_at(self.row, self.col, value)
	}

	pub fn is_null(&self) -> Result<bool> {
		self.frame.content().is_null_at(self.row, self.col)
	}

	pub fn get_bool(&self) -> Result<bool> {
		Ok(self.value()?.as_bool().unwrap_or(false))
	}

	pub fn get_int(&self) -> Result<i32> {
		Ok(self.value()?.as_i64().map(|v| v as i32).unwrap_or(0))
	}

	pub fn get_long(&self) -> Result<i64> {
		Ok(self.value()?.as_i64().unwrap_or(0))
	}

	pub fn get_double(&self) -> Result<f64> {
		Ok(self.value()?.as_f64().unwrap_or(f64::NAN))
	}

	pub fn set_bool(&self, value: bool) -> Result<Value> {
		self.set_value(&Value::Boolean(value))
	}

	pub fn set_int(&self, value: i32) -> Result<Value> {
		self.set_value(&Value::Int4(value))
	}

	pub fn set_long(&self, value: i64) -> Result<Value> {
		self.set_value(&Value::Int8(value))
	}

	pub fn set_double(&self, value: f64) -> Result<Value> {
		self.set_value(&Value::float8(value))
	}

	/// Snapshots the cell for hand-off to callbacks.
	pub fn snapshot(&self) -> Result<CellValue<R, C>> {
		Ok(CellValue::new(
			self.row_key()?.clone(),
			self.col_key()?.clone(),
			self.row,
			self.col,
			self.value()?,
		))
	}
}
