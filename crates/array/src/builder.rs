// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use tabula_type::{Result, Type, Value};

use crate::Array;

/// Append-driven construction of a dense array. Preallocates to the
/// capacity hint and grows on demand.
#[derive(Debug)]
pub struct ArrayBuilder {
	ty: Type,
	values: Vec<Value>,
}

impl ArrayBuilder {
	pub fn of(ty: Type, capacity: usize) -> Self {
		Self {
			ty,
			values: Vec::with_capacity(capacity),
		}
	}

	pub fn element_type(&self) -> Type {
		self.ty
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn append(&mut self, value: Value) -> &mut Self {
		self.values.push(value);
		self
	}

	pub fn append_null(&mut self) -> &mut Self {
		self.append(Value::Undefined)
	}

	pub fn append_bool(&mut self, value: bool) -> &mut Self {
		self.append(Value::Boolean(value))
	}

	pub fn append_int(&mut self, value: i32) -> &mut Self {
		self.append(Value::Int4(value))
	}

	pub fn append_long(&mut self, value: i64) -> &mut Self {
		self.append(Value::Int8(value))
	}

	pub fn append_double(&mut self, value: f64) -> &mut Self {
		self.append(Value::float8(value))
	}

	pub fn append_all(&mut self, values: impl IntoIterator<Item = Value>) -> &mut Self {
		self.values.extend(values);
		self
	}

	pub fn to_array(&self) -> Result<Array> {
		Array::from_values(self.ty, &self.values)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_doubles() {
		let mut builder = ArrayBuilder::of(Type::Float8, 4);
		builder.append_double(1.0).append_null().append_double(3.0);
		let arr = builder.to_array().unwrap();
		assert_eq!(arr.len(), 3);
		assert_eq!(arr.get_double(0).unwrap(), 1.0);
		assert!(arr.is_null(1));
		assert_eq!(arr.get_double(2).unwrap(), 3.0);
	}

	#[test]
	fn test_type_mismatch_fails_at_build() {
		let mut builder = ArrayBuilder::of(Type::Int4, 2);
		builder.append(Value::from("nope"));
		assert!(builder.to_array().is_err());
	}
}
