// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{cmp::Ordering, sync::Arc};

use serde::{Deserialize, Serialize};
use tabula_type::{
	Result, Type, Value, err,
	error::diagnostic::array,
};

use crate::{
	coding::{Coding, NULL_CODE},
	data::ArrayData,
	style::ArrayStyle,
};

/// Integer codes resolved through a shared [`Coding`]. Ordering and
/// equality operate on the raw codes; two arrays sharing a coding copy
/// codes without decoding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CodedArray {
	coding: Arc<Coding>,
	codes: ArrayData<i32>,
}

impl PartialEq for CodedArray {
	fn eq(&self, other: &Self) -> bool {
		self.coding == other.coding && self.codes == other.codes
	}
}

impl CodedArray {
	pub fn dense(coding: Arc<Coding>, length: usize) -> Self {
		Self {
			coding,
			codes: ArrayData::dense(length, NULL_CODE),
		}
	}

	pub fn sparse(coding: Arc<Coding>, length: usize, fill_hint: f32) -> Self {
		Self {
			coding,
			codes: ArrayData::sparse(length, fill_hint, NULL_CODE),
		}
	}

	pub fn coding(&self) -> &Arc<Coding> {
		&self.coding
	}

	pub fn shares_coding(&self, other: &CodedArray) -> bool {
		Arc::ptr_eq(&self.coding, &other.coding)
	}

	pub fn element_type(&self) -> Type {
		self.coding.element_type()
	}

	pub fn len(&self) -> usize {
		self.codes.len()
	}

	pub fn style(&self) -> ArrayStyle {
		match self.codes.style() {
			ArrayStyle::Sparse => ArrayStyle::CodedSparse,
			_ => ArrayStyle::CodedDense,
		}
	}

	pub fn code(&self, index: usize) -> i32 {
		self.codes.get(index)
	}

	pub fn set_code(&mut self, index: usize, code: i32) -> Result<i32> {
		if code != NULL_CODE && self.coding.value_of(code).is_none() {
			return err!(array::unknown_code(code));
		}
		Ok(self.codes.set(index, code))
	}

	pub fn get(&self, index: usize) -> Value {
		self.coding.value_of(self.codes.get(index)).cloned().unwrap_or(Value::Undefined)
	}

	pub fn set(&mut self, index: usize, value: &Value) -> Result<Value> {
		let code = match self.coding.code_of(value) {
			Some(code) => code,
			None => return err!(array::value_not_in_coding(value)),
		};
		let old = self.codes.set(index, code);
		Ok(self.coding.value_of(old).cloned().unwrap_or(Value::Undefined))
	}

	pub fn is_null(&self, index: usize) -> bool {
		self.codes.get(index) == NULL_CODE
	}

	pub fn is_equal_to(&self, index: usize, value: &Value) -> bool {
		match self.coding.code_of(value) {
			Some(code) => self.codes.get(index) == code,
			None => false,
		}
	}

	pub fn swap(&mut self, i: usize, j: usize) {
		self.codes.swap(i, j);
	}

	pub fn fill(&mut self, value: &Value, start: usize, end: usize) -> Result<()> {
		let code = match self.coding.code_of(value) {
			Some(code) => code,
			None => return err!(array::value_not_in_coding(value)),
		};
		self.codes.fill(code, start, end);
		Ok(())
	}

	pub fn expand(&mut self, new_length: usize) {
		self.codes.expand(new_length);
	}

	/// Code order, which for enum-like codings follows declaration
	/// order.
	pub fn compare(&self, i: usize, j: usize) -> Ordering {
		self.codes.compare(i, j)
	}

	pub fn sort_range(&mut self, start: usize, end: usize, descending: bool) {
		self.codes.sort_range(start, end, descending);
	}

	pub fn restore_order(&mut self) -> bool {
		self.codes.restore_order()
	}

	pub fn copy_range(&self, start: usize, end: usize) -> Self {
		Self {
			coding: self.coding.clone(),
			codes: self.codes.copy_range(start, end),
		}
	}

	pub fn gather(&self, indexes: &[usize]) -> Self {
		Self {
			coding: self.coding.clone(),
			codes: self.codes.gather(indexes),
		}
	}

	/// Raw-code bulk copy between arrays of the same coding.
	pub fn copy_codes_from(&mut self, other: &CodedArray, from: usize, to: usize, count: usize) -> Result<()> {
		if !self.shares_coding(other) {
			return err!(array::coding_mismatch());
		}
		for offset in 0..count {
			self.codes.set(to + offset, other.codes.get(from + offset));
		}
		Ok(())
	}

	pub fn binary_search(&self, start: usize, end: usize, value: &Value) -> Result<std::result::Result<usize, usize>> {
		let code = match self.coding.code_of(value) {
			Some(code) => code,
			None => return err!(array::value_not_in_coding(value)),
		};
		Ok(self.codes.binary_search(start, end, &code))
	}

	pub fn load_factor(&self) -> f32 {
		self.codes.load_factor()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn currency_coding() -> Arc<Coding> {
		Arc::new(Coding::of(
			Type::Utf8,
			["GBP", "USD", "EUR", "JPY"].into_iter().map(Value::from),
		))
	}

	#[test]
	fn test_round_trip_through_codes() {
		let mut arr = CodedArray::dense(currency_coding(), 3);
		assert!(arr.is_null(0));
		arr.set(0, &Value::from("USD")).unwrap();
		assert_eq!(arr.get(0), Value::from("USD"));
		assert_eq!(arr.code(0), 1);
	}

	#[test]
	fn test_unknown_value_is_rejected() {
		let mut arr = CodedArray::dense(currency_coding(), 2);
		assert!(arr.set(0, &Value::from("CHF")).is_err());
	}

	#[test]
	fn test_copy_codes_requires_shared_coding() {
		let coding = currency_coding();
		let mut a = CodedArray::dense(coding.clone(), 3);
		let mut b = CodedArray::dense(coding, 3);
		b.set(0, &Value::from("EUR")).unwrap();
		b.set(1, &Value::from("GBP")).unwrap();
		a.copy_codes_from(&b, 0, 1, 2).unwrap();
		assert_eq!(a.get(1), Value::from("EUR"));
		assert_eq!(a.get(2), Value::from("GBP"));

		let other = CodedArray::dense(currency_coding(), 3);
		assert!(a.copy_codes_from(&other, 0, 0, 1).is_err());
	}

	#[test]
	fn test_compare_uses_code_order() {
		let mut arr = CodedArray::dense(currency_coding(), 2);
		arr.set(0, &Value::from("JPY")).unwrap();
		arr.set(1, &Value::from("GBP")).unwrap();
		assert_eq!(arr.compare(0, 1), Ordering::Greater);
	}

	#[test]
	fn test_sparse_style() {
		let arr = CodedArray::sparse(currency_coding(), 10, 0.2);
		assert_eq!(arr.style(), ArrayStyle::CodedSparse);
	}
}
