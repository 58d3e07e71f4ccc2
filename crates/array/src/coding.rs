// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tabula_type::{Type, Value};

/// A bidirectional value <-> code table shared by coded arrays. Codes
/// are assigned in insertion order and the table is immutable once
/// built, so arrays can exchange raw codes when they share a coding.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Coding {
	element_type: Type,
	values: Vec<Value>,
	codes: FxHashMap<Value, i32>,
}

pub const NULL_CODE: i32 = -1;

impl Coding {
	/// Builds a coding from distinct values; duplicates keep their
	/// first code.
	pub fn of(element_type: Type, values: impl IntoIterator<Item = Value>) -> Self {
		let mut table = Vec::new();
		let mut codes = FxHashMap::default();
		for value in values {
			if !codes.contains_key(&value) {
				codes.insert(value.clone(), table.len() as i32);
				table.push(value);
			}
		}
		Self {
			element_type,
			values: table,
			codes,
		}
	}

	pub fn element_type(&self) -> Type {
		self.element_type
	}

	pub fn size(&self) -> usize {
		self.values.len()
	}

	pub fn code_of(&self, value: &Value) -> Option<i32> {
		if value.is_undefined() {
			Some(NULL_CODE)
		} else {
			self.codes.get(value).copied()
		}
	}

	pub fn value_of(&self, code: i32) -> Option<&Value> {
		if code < 0 {
			None
		} else {
			self.values.get(code as usize)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_codes_follow_insertion_order() {
		let coding = Coding::of(
			Type::Utf8,
			["GBP", "USD", "EUR", "USD"].into_iter().map(Value::from),
		);
		assert_eq!(coding.size(), 3);
		assert_eq!(coding.code_of(&Value::from("GBP")), Some(0));
		assert_eq!(coding.code_of(&Value::from("USD")), Some(1));
		assert_eq!(coding.value_of(2), Some(&Value::from("EUR")));
	}

	#[test]
	fn test_unknown_value_has_no_code() {
		let coding = Coding::of(Type::Utf8, [Value::from("GBP")]);
		assert_eq!(coding.code_of(&Value::from("JPY")), None);
	}

	#[test]
	fn test_undefined_maps_to_null_code() {
		let coding = Coding::of(Type::Utf8, [Value::from("GBP")]);
		assert_eq!(coding.code_of(&Value::Undefined), Some(NULL_CODE));
		assert_eq!(coding.value_of(NULL_CODE), None);
	}
}
