// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Typed column arrays for the tabula engine. One tagged variant per
//! element type, each arm selecting a dense, sparse, range-mapped or
//! coded storage behind a uniform, bounds-checked surface.

use std::{cmp::Ordering, collections::HashSet, sync::Arc};

use serde::{Deserialize, Serialize};
use tabula_type::{
	Date, DateTime, Result, Time, Type, Value, Zoned, err,
	error::diagnostic::array,
};

pub mod boolean;
pub mod builder;
pub mod codec;
pub mod coded;
pub mod coding;
pub mod data;
pub mod dense;
pub mod element;
pub mod mapped;
pub mod sparse;
pub mod style;
mod zoned;

pub use boolean::BoolArray;
pub use builder::ArrayBuilder;
pub use coded::CodedArray;
pub use coding::{Coding, NULL_CODE};
pub use data::ArrayData;
pub use element::{Element, EpochMillis, NULL_MILLIS};
pub use style::{ArrayStyle, SortOrder};
pub use zoned::ZonedArray;

/// A typed column array. All operations are bounds-checked and surface
/// failures as `ARRAY_xxx` diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Array {
	Boolean(BoolArray),
	Int4(ArrayData<i32>),
	Int8(ArrayData<i64>),
	Float8(ArrayData<f64>),
	Date(ArrayData<EpochMillis>),
	Time(ArrayData<EpochMillis>),
	DateTime(ArrayData<EpochMillis>),
	Zoned(ZonedArray),
	Utf8(ArrayData<Option<String>>),
	Coded(CodedArray),
	Any(ArrayData<Value>),
}

/// Dispatch for the operations every storage spells the same way.
macro_rules! for_each_storage {
	($self:expr, $data:ident => $body:expr) => {
		match $self {
			Array::Boolean($data) => $body,
			Array::Int4($data) => $body,
			Array::Int8($data) => $body,
			Array::Float8($data) => $body,
			Array::Date($data) => $body,
			Array::Time($data) => $body,
			Array::DateTime($data) => $body,
			Array::Zoned($data) => $body,
			Array::Utf8($data) => $body,
			Array::Coded($data) => $body,
			Array::Any($data) => $body,
		}
	};
}

impl Array {
	/// A dense array whose slots start out null where the element type
	/// has a null representation, and zero / false where it does not.
	pub fn of(ty: Type, length: usize) -> Array {
		match ty {
			Type::Boolean => Array::Boolean(BoolArray::dense(length, false)),
			Type::Int4 => Array::Int4(ArrayData::dense(length, 0)),
			Type::Int8 => Array::Int8(ArrayData::dense(length, 0)),
			Type::Float8 => Array::Float8(ArrayData::dense(length, f64::NAN)),
			Type::Date => Array::Date(ArrayData::dense(length, EpochMillis::null())),
			Type::Time => Array::Time(ArrayData::dense(length, EpochMillis::null())),
			Type::DateTime => Array::DateTime(ArrayData::dense(length, EpochMillis::null())),
			Type::Zoned => Array::Zoned(ZonedArray::dense(length, None)),
			Type::Utf8 => Array::Utf8(ArrayData::dense(length, None)),
			Type::Any => Array::Any(ArrayData::dense(length, Value::Undefined)),
		}
	}

	pub fn with_default(ty: Type, length: usize, default: &Value) -> Result<Array> {
		let mut array = Array::of(ty, 0);
		array.set_storage_default(default)?;
		array.expand(length);
		array.fill(default, 0, length)?;
		Ok(array)
	}

	/// A sparse array with the given default value and fill-factor
	/// hint.
	pub fn sparse(ty: Type, length: usize, fill_hint: f32, default: &Value) -> Result<Array> {
		let array = match ty {
			Type::Boolean => Array::Boolean(BoolArray::sparse(length, fill_hint, bool_repr(default)?)),
			Type::Int4 => Array::Int4(ArrayData::sparse(length, fill_hint, int4_repr(default)?)),
			Type::Int8 => Array::Int8(ArrayData::sparse(length, fill_hint, int8_repr(default)?)),
			Type::Float8 => Array::Float8(ArrayData::sparse(length, fill_hint, float8_repr(default)?)),
			Type::Date => Array::Date(ArrayData::sparse(length, fill_hint, date_repr(default)?)),
			Type::Time => Array::Time(ArrayData::sparse(length, fill_hint, time_repr(default)?)),
			Type::DateTime => {
				Array::DateTime(ArrayData::sparse(length, fill_hint, datetime_repr(default)?))
			}
			Type::Zoned => Array::Zoned(ZonedArray::sparse(length, fill_hint, zoned_repr(default)?)),
			Type::Utf8 => Array::Utf8(ArrayData::sparse(length, fill_hint, utf8_repr(default)?)),
			Type::Any => Array::Any(ArrayData::sparse(length, fill_hint, default.clone())),
		};
		Ok(array)
	}

	/// A range-compressed array; defined for Int4, Int8 and Date. The
	/// step is in element units (days for dates).
	pub fn mapped(ty: Type, start: &Value, step: i64, length: usize) -> Result<Array> {
		match ty {
			Type::Int4 => Ok(Array::Int4(ArrayData::mapped(int4_repr(start)?, step, length))),
			Type::Int8 => Ok(Array::Int8(ArrayData::mapped(int8_repr(start)?, step, length))),
			Type::Date => {
				let start = date_repr(start)?;
				Ok(Array::Date(ArrayData::mapped(start, step * 86_400_000, length)))
			}
			other => err!(array::unsupported_operation("mapped storage", &other)),
		}
	}

	pub fn coded_dense(coding: Arc<Coding>, length: usize) -> Array {
		Array::Coded(CodedArray::dense(coding, length))
	}

	pub fn coded_sparse(coding: Arc<Coding>, length: usize, fill_hint: f32) -> Array {
		Array::Coded(CodedArray::sparse(coding, length, fill_hint))
	}

	pub fn from_values(ty: Type, values: &[Value]) -> Result<Array> {
		let mut array = Array::of(ty, values.len());
		for (index, value) in values.iter().enumerate() {
			array.set_value(index, value)?;
		}
		Ok(array)
	}

	pub fn element_type(&self) -> Type {
		match self {
			Array::Boolean(_) => Type::Boolean,
			Array::Int4(_) => Type::Int4,
			Array::Int8(_) => Type::Int8,
			Array::Float8(_) => Type::Float8,
			Array::Date(_) => Type::Date,
			Array::Time(_) => Type::Time,
			Array::DateTime(_) => Type::DateTime,
			Array::Zoned(_) => Type::Zoned,
			Array::Utf8(_) => Type::Utf8,
			Array::Coded(arr) => arr.element_type(),
			Array::Any(_) => Type::Any,
		}
	}

	pub fn len(&self) -> usize {
		for_each_storage!(self, data => data.len())
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn style(&self) -> ArrayStyle {
		for_each_storage!(self, data => data.style())
	}

	pub fn load_factor(&self) -> f32 {
		for_each_storage!(self, data => data.load_factor())
	}

	pub fn default_value(&self) -> Value {
		match self {
			Array::Boolean(arr) => Value::Boolean(arr.default_value()),
			Array::Int4(arr) => Value::Int4(arr.default_value()),
			Array::Int8(arr) => Value::Int8(arr.default_value()),
			Array::Float8(arr) => Value::float8(arr.default_value()),
			Array::Date(arr) => millis_to_date(arr.default_value()),
			Array::Time(arr) => millis_to_time(arr.default_value()),
			Array::DateTime(arr) => millis_to_datetime(arr.default_value()),
			Array::Zoned(arr) => arr.default_value().map(Value::Zoned).unwrap_or(Value::Undefined),
			Array::Utf8(arr) => arr.default_value().map(Value::Utf8).unwrap_or(Value::Undefined),
			Array::Coded(_) => Value::Undefined,
			Array::Any(arr) => arr.default_value(),
		}
	}

	fn check_bounds(&self, index: usize) -> Result<()> {
		if index >= self.len() {
			return err!(array::out_of_bounds(index, self.len()));
		}
		Ok(())
	}

	fn check_range(&self, start: usize, end: usize) -> Result<()> {
		if start > end || end > self.len() {
			return err!(array::range_out_of_bounds(start, end, self.len()));
		}
		Ok(())
	}

	pub fn get_bool(&self, index: usize) -> Result<bool> {
		self.check_bounds(index)?;
		match self {
			Array::Boolean(arr) => Ok(arr.get(index)),
			_ => err!(array::unsupported_operation("get_bool", &self.element_type())),
		}
	}

	pub fn get_int(&self, index: usize) -> Result<i32> {
		self.check_bounds(index)?;
		match self {
			Array::Int4(arr) => Ok(arr.get(index)),
			Array::Coded(arr) => Ok(arr.code(index)),
			_ => err!(array::unsupported_operation("get_int", &self.element_type())),
		}
	}

	/// Longs widen from int4 and expose the epoch payload of the
	/// temporal arrays.
	pub fn get_long(&self, index: usize) -> Result<i64> {
		self.check_bounds(index)?;
		match self {
			Array::Int4(arr) => Ok(arr.get(index) as i64),
			Array::Int8(arr) => Ok(arr.get(index)),
			Array::Date(arr) | Array::Time(arr) | Array::DateTime(arr) => Ok(arr.get(index).0),
			Array::Zoned(arr) => Ok(arr.millis(index)),
			_ => err!(array::unsupported_operation("get_long", &self.element_type())),
		}
	}

	/// Doubles widen from the integer types; a null double reads NaN.
	pub fn get_double(&self, index: usize) -> Result<f64> {
		self.check_bounds(index)?;
		match self {
			Array::Int4(arr) => Ok(arr.get(index) as f64),
			Array::Int8(arr) => Ok(arr.get(index) as f64),
			Array::Float8(arr) => Ok(arr.get(index)),
			_ => err!(array::unsupported_operation("get_double", &self.element_type())),
		}
	}

	pub fn get_value(&self, index: usize) -> Result<Value> {
		self.check_bounds(index)?;
		Ok(match self {
			Array::Boolean(arr) => Value::Boolean(arr.get(index)),
			Array::Int4(arr) => Value::Int4(arr.get(index)),
			Array::Int8(arr) => Value::Int8(arr.get(index)),
			Array::Float8(arr) => Value::float8(arr.get(index)),
			Array::Date(arr) => millis_to_date(arr.get(index)),
			Array::Time(arr) => millis_to_time(arr.get(index)),
			Array::DateTime(arr) => millis_to_datetime(arr.get(index)),
			Array::Zoned(arr) => arr.get(index).map(Value::Zoned).unwrap_or(Value::Undefined),
			Array::Utf8(arr) => arr.get(index).map(Value::Utf8).unwrap_or(Value::Undefined),
			Array::Coded(arr) => arr.get(index),
			Array::Any(arr) => arr.get(index),
		})
	}

	pub fn set_bool(&mut self, index: usize, value: bool) -> Result<bool> {
		self.check_bounds(index)?;
		match self {
			Array::Boolean(arr) => Ok(arr.set(index, value)),
			_ => err!(array::unsupported_operation("set_bool", &self.element_type())),
		}
	}

	pub fn set_int(&mut self, index: usize, value: i32) -> Result<i32> {
		self.check_bounds(index)?;
		match self {
			Array::Int4(arr) => Ok(arr.set(index, value)),
			Array::Int8(arr) => Ok(arr.set(index, value as i64) as i32),
			Array::Float8(arr) => Ok(arr.set(index, value as f64) as i32),
			Array::Coded(arr) => arr.set_code(index, value),
			_ => err!(array::unsupported_operation("set_int", &self.element_type())),
		}
	}

	pub fn set_long(&mut self, index: usize, value: i64) -> Result<i64> {
		self.check_bounds(index)?;
		match self {
			Array::Int8(arr) => Ok(arr.set(index, value)),
			Array::Float8(arr) => Ok(arr.set(index, value as f64) as i64),
			Array::Date(arr) | Array::Time(arr) | Array::DateTime(arr) => {
				Ok(arr.set(index, EpochMillis(value)).0)
			}
			Array::Zoned(arr) => Ok(arr.set_millis(index, value)),
			_ => err!(array::unsupported_operation("set_long", &self.element_type())),
		}
	}

	pub fn set_double(&mut self, index: usize, value: f64) -> Result<f64> {
		self.check_bounds(index)?;
		match self {
			Array::Float8(arr) => Ok(arr.set(index, value)),
			_ => err!(array::unsupported_operation("set_double", &self.element_type())),
		}
	}

	/// Typed write with int4 -> int8 -> float8 widening. Writing
	/// `Undefined` stores the element type's null representation.
	pub fn set_value(&mut self, index: usize, value: &Value) -> Result<Value> {
		self.check_bounds(index)?;
		match self {
			Array::Boolean(arr) => Ok(Value::Boolean(arr.set(index, bool_repr(value)?))),
			Array::Int4(arr) => {
				let old = arr.set(index, int4_repr(value)?);
				Ok(Value::Int4(old))
			}
			Array::Int8(arr) => {
				let old = arr.set(index, int8_repr(value)?);
				Ok(Value::Int8(old))
			}
			Array::Float8(arr) => {
				let old = arr.set(index, float8_repr(value)?);
				Ok(Value::float8(old))
			}
			Array::Date(arr) => {
				let old = arr.set(index, date_repr(value)?);
				Ok(millis_to_date(old))
			}
			Array::Time(arr) => {
				let old = arr.set(index, time_repr(value)?);
				Ok(millis_to_time(old))
			}
			Array::DateTime(arr) => {
				let old = arr.set(index, datetime_repr(value)?);
				Ok(millis_to_datetime(old))
			}
			Array::Zoned(arr) => {
				let old = arr.set(index, zoned_repr(value)?);
				Ok(old.map(Value::Zoned).unwrap_or(Value::Undefined))
			}
			Array::Utf8(arr) => {
				let old = arr.set(index, utf8_repr(value)?);
				Ok(old.map(Value::Utf8).unwrap_or(Value::Undefined))
			}
			Array::Coded(arr) => arr.set(index, value),
			Array::Any(arr) => Ok(arr.set(index, value.clone())),
		}
	}

	pub fn is_null(&self, index: usize) -> bool {
		match self {
			Array::Boolean(_) => false,
			Array::Zoned(arr) => arr.is_null(index),
			Array::Coded(arr) => arr.is_null(index),
			Array::Int4(arr) => arr.is_null(index),
			Array::Int8(arr) => arr.is_null(index),
			Array::Float8(arr) => arr.is_null(index),
			Array::Date(arr) | Array::Time(arr) | Array::DateTime(arr) => arr.is_null(index),
			Array::Utf8(arr) => arr.is_null(index),
			Array::Any(arr) => arr.is_null(index),
		}
	}

	/// Element-type equality without boxing on the fast paths. Zoned
	/// slots additionally require a matching zone code.
	pub fn is_equal_to(&self, index: usize, value: &Value) -> bool {
		if value.is_undefined() {
			return self.is_null(index);
		}
		match self {
			Array::Boolean(arr) => value.as_bool() == Some(arr.get(index)),
			Array::Int4(arr) => value.as_i64() == Some(arr.get(index) as i64),
			Array::Int8(arr) => value.as_i64() == Some(arr.get(index)),
			Array::Float8(arr) => {
				value.as_f64().map(|v| v == arr.get(index)).unwrap_or(false)
			}
			Array::Date(arr) | Array::Time(arr) | Array::DateTime(arr) => {
				!arr.is_null(index)
					&& temporal_millis(value).map(|m| m == arr.get(index).0).unwrap_or(false)
			}
			Array::Zoned(arr) => match value {
				Value::Zoned(z) => arr.is_equal_to(index, z),
				_ => false,
			},
			Array::Utf8(arr) => match value {
				Value::Utf8(s) => arr.get(index).as_deref() == Some(s.as_str()),
				_ => false,
			},
			Array::Coded(arr) => arr.is_equal_to(index, value),
			Array::Any(arr) => &arr.get(index) == value,
		}
	}

	pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
		self.check_bounds(i)?;
		self.check_bounds(j)?;
		for_each_storage!(self, data => data.swap(i, j));
		Ok(())
	}

	/// Natural order on the element type; zoned arrays compare the
	/// epoch payload only, coded arrays their codes.
	pub fn compare(&self, i: usize, j: usize) -> Ordering {
		for_each_storage!(self, data => data.compare(i, j))
	}

	pub fn fill(&mut self, value: &Value, start: usize, end: usize) -> Result<()> {
		self.check_range(start, end)?;
		match self {
			Array::Boolean(arr) => arr.fill(bool_repr(value)?, start, end),
			Array::Int4(arr) => arr.fill(int4_repr(value)?, start, end),
			Array::Int8(arr) => arr.fill(int8_repr(value)?, start, end),
			Array::Float8(arr) => arr.fill(float8_repr(value)?, start, end),
			Array::Date(arr) => arr.fill(date_repr(value)?, start, end),
			Array::Time(arr) => arr.fill(time_repr(value)?, start, end),
			Array::DateTime(arr) => arr.fill(datetime_repr(value)?, start, end),
			Array::Zoned(arr) => arr.fill(zoned_repr(value)?, start, end),
			Array::Utf8(arr) => arr.fill(utf8_repr(value)?, start, end),
			Array::Coded(arr) => arr.fill(value, start, end)?,
			Array::Any(arr) => arr.fill(value.clone(), start, end),
		}
		Ok(())
	}

	pub fn expand(&mut self, new_length: usize) {
		for_each_storage!(self, data => data.expand(new_length));
	}

	/// In-place sort of the range. `None` restores the insertion order
	/// where the storage tracks it (dense storages; a no-op elsewhere).
	pub fn sort(&mut self, start: usize, end: usize, order: Option<SortOrder>) -> Result<()> {
		self.check_range(start, end)?;
		match order {
			Some(order) => {
				for_each_storage!(self, data => data.sort_range(start, end, order.descending()))
			}
			None => {
				for_each_storage!(self, data => { data.restore_order(); })
			}
		}
		Ok(())
	}

	/// A new array holding the values the predicate keeps, in order,
	/// with the source's style and density.
	pub fn filter(&self, mut predicate: impl FnMut(usize, &Value) -> bool) -> Result<Array> {
		let mut kept = Vec::new();
		for index in 0..self.len() {
			let value = self.get_value(index)?;
			if predicate(index, &value) {
				kept.push(index);
			}
		}
		Ok(self.copy_indexes(&kept))
	}

	pub fn copy(&self) -> Array {
		self.clone()
	}

	pub fn copy_range(&self, start: usize, end: usize) -> Result<Array> {
		self.check_range(start, end)?;
		Ok(match self {
			Array::Boolean(arr) => Array::Boolean(arr.copy_range(start, end)),
			Array::Int4(arr) => Array::Int4(arr.copy_range(start, end)),
			Array::Int8(arr) => Array::Int8(arr.copy_range(start, end)),
			Array::Float8(arr) => Array::Float8(arr.copy_range(start, end)),
			Array::Date(arr) => Array::Date(arr.copy_range(start, end)),
			Array::Time(arr) => Array::Time(arr.copy_range(start, end)),
			Array::DateTime(arr) => Array::DateTime(arr.copy_range(start, end)),
			Array::Zoned(arr) => Array::Zoned(arr.copy_range(start, end)),
			Array::Utf8(arr) => Array::Utf8(arr.copy_range(start, end)),
			Array::Coded(arr) => Array::Coded(arr.copy_range(start, end)),
			Array::Any(arr) => Array::Any(arr.copy_range(start, end)),
		})
	}

	/// Gather: the result keeps the source's density; slots gathered
	/// from beyond the source length take the default value.
	pub fn copy_indexes(&self, indexes: &[usize]) -> Array {
		match self {
			Array::Boolean(arr) => Array::Boolean(arr.gather(indexes)),
			Array::Int4(arr) => Array::Int4(arr.gather(indexes)),
			Array::Int8(arr) => Array::Int8(arr.gather(indexes)),
			Array::Float8(arr) => Array::Float8(arr.gather(indexes)),
			Array::Date(arr) => Array::Date(arr.gather(indexes)),
			Array::Time(arr) => Array::Time(arr.gather(indexes)),
			Array::DateTime(arr) => Array::DateTime(arr.gather(indexes)),
			Array::Zoned(arr) => Array::Zoned(arr.gather(indexes)),
			Array::Utf8(arr) => Array::Utf8(arr.gather(indexes)),
			Array::Coded(arr) => Array::Coded(arr.gather(indexes)),
			Array::Any(arr) => Array::Any(arr.gather(indexes)),
		}
	}

	/// Binary search over a range that must be sorted ascending in the
	/// element's natural order; behavior is undefined otherwise.
	pub fn binary_search(&self, start: usize, end: usize, value: &Value) -> Result<std::result::Result<usize, usize>> {
		self.check_range(start, end)?;
		match self {
			Array::Boolean(arr) => match value.as_bool() {
				Some(v) => Ok(arr.binary_search(start, end, v)),
				None => type_error(&Type::Boolean, value),
			},
			Array::Int4(arr) => Ok(arr.binary_search(start, end, &int4_repr(value)?)),
			Array::Int8(arr) => Ok(arr.binary_search(start, end, &int8_repr(value)?)),
			Array::Float8(arr) => Ok(arr.binary_search(start, end, &float8_repr(value)?)),
			Array::Date(arr) => Ok(arr.binary_search(start, end, &date_repr(value)?)),
			Array::Time(arr) => Ok(arr.binary_search(start, end, &time_repr(value)?)),
			Array::DateTime(arr) => Ok(arr.binary_search(start, end, &datetime_repr(value)?)),
			Array::Zoned(arr) => match value {
				Value::Zoned(z) => Ok(arr.binary_search(start, end, z)),
				other => type_error(&Type::Zoned, other),
			},
			Array::Utf8(arr) => Ok(arr.binary_search(start, end, &utf8_repr(value)?)),
			Array::Coded(arr) => arr.binary_search(start, end, value),
			Array::Any(arr) => Ok(arr.binary_search(start, end, value)),
		}
	}

	/// Order-preserving first occurrences, nulls skipped, up to `limit`.
	pub fn distinct(&self, limit: usize) -> Result<Array> {
		let mut seen = HashSet::new();
		let mut values = Vec::new();
		for index in 0..self.len() {
			if self.is_null(index) {
				continue;
			}
			let value = self.get_value(index)?;
			if seen.insert(value.clone()) {
				values.push(value);
				if values.len() >= limit {
					break;
				}
			}
		}
		Array::from_values(self.element_type(), &values)
	}

	/// Running sum over a numeric array, nulls contributing zero.
	pub fn cum_sum(&self) -> Result<Array> {
		match self {
			Array::Int4(arr) => {
				let mut sum = 0i32;
				let data = arr.iter().map(|v| {
					sum += v;
					sum
				});
				Ok(Array::Int4(ArrayData::dense_of(data.collect(), 0)))
			}
			Array::Int8(arr) => {
				let mut sum = 0i64;
				let data = arr.iter().map(|v| {
					sum += v;
					sum
				});
				Ok(Array::Int8(ArrayData::dense_of(data.collect(), 0)))
			}
			Array::Float8(arr) => {
				let mut sum = 0.0f64;
				let data = arr.iter().map(|v| {
					if !v.is_nan() {
						sum += v;
					}
					sum
				});
				Ok(Array::Float8(ArrayData::dense_of(data.collect(), f64::NAN)))
			}
			_ => err!(array::unsupported_operation("cum_sum", &self.element_type())),
		}
	}

	pub fn min(&self) -> Option<Value> {
		self.values().filter(|v| !v.is_undefined()).min()
	}

	pub fn max(&self) -> Option<Value> {
		self.values().filter(|v| !v.is_undefined()).max()
	}

	pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
		(0..self.len()).map(move |i| self.get_value(i).unwrap_or(Value::Undefined))
	}
}

fn type_error<T>(expected: &Type, actual: &Value) -> Result<T> {
	err!(array::type_mismatch(expected, &actual.kind()))
}

fn bool_repr(value: &Value) -> Result<bool> {
	match value {
		Value::Boolean(v) => Ok(*v),
		Value::Undefined => Ok(false),
		other => type_error(&Type::Boolean, other),
	}
}

fn int4_repr(value: &Value) -> Result<i32> {
	match value {
		Value::Int4(v) => Ok(*v),
		Value::Undefined => Ok(0),
		other => type_error(&Type::Int4, other),
	}
}

fn int8_repr(value: &Value) -> Result<i64> {
	match value {
		Value::Int4(v) => Ok(*v as i64),
		Value::Int8(v) => Ok(*v),
		Value::Undefined => Ok(0),
		other => type_error(&Type::Int8, other),
	}
}

fn float8_repr(value: &Value) -> Result<f64> {
	match value {
		Value::Int4(v) => Ok(*v as f64),
		Value::Int8(v) => Ok(*v as f64),
		Value::Float8(v) => Ok(v.value()),
		Value::Undefined => Ok(f64::NAN),
		other => type_error(&Type::Float8, other),
	}
}

fn date_repr(value: &Value) -> Result<EpochMillis> {
	match value {
		Value::Date(v) => Ok(EpochMillis(v.to_epoch_millis())),
		Value::Undefined => Ok(EpochMillis::null()),
		other => type_error(&Type::Date, other),
	}
}

fn time_repr(value: &Value) -> Result<EpochMillis> {
	match value {
		Value::Time(v) => Ok(EpochMillis(v.to_millis_of_day() as i64)),
		Value::Undefined => Ok(EpochMillis::null()),
		other => type_error(&Type::Time, other),
	}
}

fn datetime_repr(value: &Value) -> Result<EpochMillis> {
	match value {
		Value::DateTime(v) => Ok(EpochMillis(v.to_epoch_millis())),
		Value::Undefined => Ok(EpochMillis::null()),
		other => type_error(&Type::DateTime, other),
	}
}

fn zoned_repr(value: &Value) -> Result<Option<Zoned>> {
	match value {
		Value::Zoned(v) => Ok(Some(*v)),
		Value::Undefined => Ok(None),
		other => type_error(&Type::Zoned, other),
	}
}

fn utf8_repr(value: &Value) -> Result<Option<String>> {
	match value {
		Value::Utf8(v) => Ok(Some(v.clone())),
		Value::Undefined => Ok(None),
		other => type_error(&Type::Utf8, other),
	}
}

fn temporal_millis(value: &Value) -> Option<i64> {
	match value {
		Value::Date(v) => Some(v.to_epoch_millis()),
		Value::Time(v) => Some(v.to_millis_of_day() as i64),
		Value::DateTime(v) => Some(v.to_epoch_millis()),
		_ => None,
	}
}

fn millis_to_date(millis: EpochMillis) -> Value {
	if millis.is_null() {
		Value::Undefined
	} else {
		Value::Date(Date::from_epoch_millis(millis.0))
	}
}

fn millis_to_time(millis: EpochMillis) -> Value {
	if millis.is_null() {
		Value::Undefined
	} else {
		Time::from_millis_of_day(millis.0 as u32).map(Value::Time).unwrap_or(Value::Undefined)
	}
}

fn millis_to_datetime(millis: EpochMillis) -> Value {
	if millis.is_null() {
		Value::Undefined
	} else {
		Value::DateTime(DateTime::from_epoch_millis(millis.0))
	}
}

impl Array {
	/// Rebinds the storage default before filling a fresh array; only
	/// used by `with_default`, where the array is still empty.
	fn set_storage_default(&mut self, default: &Value) -> Result<()> {
		let length = self.len();
		debug_assert_eq!(length, 0);
		let rebuilt = match &*self {
			Array::Boolean(_) => Array::Boolean(BoolArray::dense(length, bool_repr(default)?)),
			Array::Int4(_) => Array::Int4(ArrayData::dense(length, int4_repr(default)?)),
			Array::Int8(_) => Array::Int8(ArrayData::dense(length, int8_repr(default)?)),
			Array::Float8(_) => Array::Float8(ArrayData::dense(length, float8_repr(default)?)),
			Array::Date(_) => Array::Date(ArrayData::dense(length, date_repr(default)?)),
			Array::Time(_) => Array::Time(ArrayData::dense(length, time_repr(default)?)),
			Array::DateTime(_) => Array::DateTime(ArrayData::dense(length, datetime_repr(default)?)),
			Array::Zoned(_) => Array::Zoned(ZonedArray::dense(length, zoned_repr(default)?)),
			Array::Utf8(_) => Array::Utf8(ArrayData::dense(length, utf8_repr(default)?)),
			Array::Coded(arr) => Array::Coded(CodedArray::dense(arr.coding().clone(), length)),
			Array::Any(_) => Array::Any(ArrayData::dense(length, default.clone())),
		};
		*self = rebuilt;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_stable_reads() {
		let mut arr = Array::of(Type::Float8, 4);
		arr.set_double(2, 1.25).unwrap();
		assert_eq!(arr.get_double(2).unwrap(), arr.get_double(2).unwrap());
	}

	#[test]
	fn test_null_reads_on_primitives() {
		let arr = Array::of(Type::Float8, 2);
		assert!(arr.is_null(0));
		assert!(arr.get_double(0).unwrap().is_nan());
		let arr = Array::of(Type::Int4, 2);
		assert!(!arr.is_null(0));
		assert_eq!(arr.get_int(0).unwrap(), 0);
		let arr = Array::of(Type::Boolean, 2);
		assert!(!arr.is_null(0));
		assert!(!arr.get_bool(0).unwrap());
	}

	#[test]
	fn test_out_of_bounds_is_rejected() {
		let arr = Array::of(Type::Int8, 3);
		let err = arr.get_long(3).unwrap_err();
		assert_eq!(err.code(), "ARRAY_001");
	}

	#[test]
	fn test_widening_writes() {
		let mut arr = Array::of(Type::Float8, 2);
		arr.set_value(0, &Value::Int4(7)).unwrap();
		assert_eq!(arr.get_double(0).unwrap(), 7.0);
		let mut arr = Array::of(Type::Int4, 2);
		assert!(arr.set_value(0, &Value::Int8(7)).is_err());
		assert!(arr.set_long(0, 7).is_err());
	}

	#[test]
	fn test_swap_twice_is_identity() {
		let mut arr = Array::from_values(
			Type::Utf8,
			&[Value::from("a"), Value::from("b"), Value::Undefined],
		)
		.unwrap();
		arr.swap(0, 2).unwrap();
		arr.swap(0, 2).unwrap();
		assert_eq!(arr.get_value(0).unwrap(), Value::from("a"));
		assert!(arr.is_null(2));
	}

	#[test]
	fn test_fill_range() {
		let mut arr = Array::of(Type::Int8, 5);
		arr.fill(&Value::Int8(9), 1, 4).unwrap();
		assert_eq!(arr.get_long(0).unwrap(), 0);
		assert_eq!(arr.get_long(2).unwrap(), 9);
		assert_eq!(arr.get_long(4).unwrap(), 0);
	}

	#[test]
	fn test_sort_then_compare_invariant() {
		let mut arr = Array::from_values(
			Type::Int4,
			&[Value::Int4(3), Value::Int4(1), Value::Int4(2), Value::Int4(0)],
		)
		.unwrap();
		arr.sort(0, 4, Some(SortOrder::Asc)).unwrap();
		for i in 0..3 {
			assert_ne!(arr.compare(i, i + 1), Ordering::Greater);
		}
		arr.sort(0, 4, None).unwrap();
		assert_eq!(arr.get_int(0).unwrap(), 3);
	}

	#[test]
	fn test_binary_search_round_trip() {
		let mut arr =
			Array::from_values(Type::Int8, &[5i64.into(), 1i64.into(), 3i64.into()]).unwrap();
		arr.sort(0, 3, Some(SortOrder::Asc)).unwrap();
		for i in 0..3 {
			let value = arr.get_value(i).unwrap();
			assert_eq!(arr.binary_search(0, 3, &value).unwrap(), Ok(i));
		}
		assert_eq!(arr.binary_search(0, 3, &Value::Int8(2)).unwrap(), Err(1));
	}

	#[test]
	fn test_filter_preserves_order_and_style() {
		let mut arr = Array::sparse(Type::Int4, 6, 0.5, &Value::Int4(0)).unwrap();
		arr.set_int(1, 4).unwrap();
		arr.set_int(3, 8).unwrap();
		let filtered = arr.filter(|_, v| v.as_i64().unwrap_or(0) > 0).unwrap();
		assert_eq!(filtered.style(), ArrayStyle::Sparse);
		assert_eq!(filtered.len(), 2);
		assert_eq!(filtered.get_int(0).unwrap(), 4);
		assert_eq!(filtered.get_int(1).unwrap(), 8);
	}

	#[test]
	fn test_distinct_limit() {
		let arr = Array::from_values(
			Type::Utf8,
			&["b".into(), "a".into(), "b".into(), "c".into(), Value::Undefined],
		)
		.unwrap();
		let distinct = arr.distinct(2).unwrap();
		assert_eq!(distinct.len(), 2);
		assert_eq!(distinct.get_value(0).unwrap(), Value::from("b"));
		assert_eq!(distinct.get_value(1).unwrap(), Value::from("a"));
	}

	#[test]
	fn test_cum_sum_skips_nulls() {
		let mut arr = Array::of(Type::Float8, 4);
		arr.set_double(0, 1.0).unwrap();
		arr.set_double(2, 2.5).unwrap();
		let sums = arr.cum_sum().unwrap();
		assert_eq!(sums.get_double(0).unwrap(), 1.0);
		assert_eq!(sums.get_double(1).unwrap(), 1.0);
		assert_eq!(sums.get_double(3).unwrap(), 3.5);
	}

	#[test]
	fn test_expand_takes_default() {
		let mut arr = Array::with_default(Type::Int4, 2, &Value::Int4(7)).unwrap();
		arr.expand(4);
		assert_eq!(arr.len(), 4);
		assert_eq!(arr.get_int(3).unwrap(), 7);
	}

	#[test]
	fn test_date_array_payload() {
		let date = Date::new(2013, 6, 2).unwrap();
		let mut arr = Array::of(Type::Date, 2);
		arr.set_value(0, &Value::Date(date)).unwrap();
		assert_eq!(arr.get_long(0).unwrap(), date.to_epoch_millis());
		assert_eq!(arr.get_value(0).unwrap(), Value::Date(date));
		assert!(arr.is_null(1));
	}

	#[test]
	fn test_mapped_date_range() {
		let start = Date::new(2013, 6, 2).unwrap();
		let arr = Array::mapped(Type::Date, &Value::Date(start), 1, 6).unwrap();
		assert_eq!(arr.style(), ArrayStyle::Mapped);
		assert_eq!(arr.get_value(5).unwrap(), Value::Date(start.plus_days(5)));
	}

	#[test]
	fn test_min_max() {
		let arr = Array::from_values(
			Type::Int4,
			&[Value::Int4(3), Value::Undefined, Value::Int4(1), Value::Int4(2)],
		)
		.unwrap();
		// Int4 null repr is 0, so min sees 0; doubles carry real nulls
		assert_eq!(arr.max(), Some(Value::Int4(3)));
		let mut arr = Array::of(Type::Float8, 3);
		arr.set_double(1, -2.0).unwrap();
		assert_eq!(arr.min(), Some(Value::float8(-2.0)));
	}
}
