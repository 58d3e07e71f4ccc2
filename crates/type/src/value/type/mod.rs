// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// All element types a column array can carry.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
	/// A boolean: true or false.
	Boolean,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// An 8-byte floating point
	Float8,
	/// A UTF-8 encoded text
	Utf8,
	/// A date value (year, month, day)
	Date,
	/// A time value (hour, minute, second, millisecond)
	Time,
	/// A date and time value in UTC
	DateTime,
	/// A date and time value carrying a zone code
	Zoned,
	/// A container that can hold any value type
	Any,
}

impl Type {
	pub fn is_number(&self) -> bool {
		matches!(self, Type::Int4 | Type::Int8 | Type::Float8)
	}

	pub fn is_integer(&self) -> bool {
		matches!(self, Type::Int4 | Type::Int8)
	}

	pub fn is_floating_point(&self) -> bool {
		matches!(self, Type::Float8)
	}

	pub fn is_temporal(&self) -> bool {
		matches!(self, Type::Date | Type::Time | Type::DateTime | Type::Zoned)
	}

	pub fn is_utf8(&self) -> bool {
		matches!(self, Type::Utf8)
	}

	/// Whether a value of `other` may be written into a column of `self`
	/// without loss: int4 -> int8 -> float8 widen, everything else must
	/// match exactly.
	pub fn accepts(&self, other: &Type) -> bool {
		match (self, other) {
			(a, b) if a == b => true,
			(Type::Int8, Type::Int4) => true,
			(Type::Float8, Type::Int4) | (Type::Float8, Type::Int8) => true,
			(Type::Any, _) => true,
			_ => false,
		}
	}

	/// The value an unset slot of this type reads as.
	pub fn null_value(&self) -> Value {
		Value::Undefined
	}

	pub fn to_u8(&self) -> u8 {
		match self {
			Type::Boolean => 1,
			Type::Int4 => 2,
			Type::Int8 => 3,
			Type::Float8 => 4,
			Type::Utf8 => 5,
			Type::Date => 6,
			Type::Time => 7,
			Type::DateTime => 8,
			Type::Zoned => 9,
			Type::Any => 10,
		}
	}

	pub fn from_u8(value: u8) -> Option<Self> {
		Some(match value {
			1 => Type::Boolean,
			2 => Type::Int4,
			3 => Type::Int8,
			4 => Type::Float8,
			5 => Type::Utf8,
			6 => Type::Date,
			7 => Type::Time,
			8 => Type::DateTime,
			9 => Type::Zoned,
			10 => Type::Any,
			_ => return None,
		})
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Int4 => f.write_str("INT4"),
			Type::Int8 => f.write_str("INT8"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Utf8 => f.write_str("UTF8"),
			Type::Date => f.write_str("DATE"),
			Type::Time => f.write_str("TIME"),
			Type::DateTime => f.write_str("DATETIME"),
			Type::Zoned => f.write_str("ZONED"),
			Type::Any => f.write_str("ANY"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_widening() {
		assert!(Type::Int8.accepts(&Type::Int4));
		assert!(Type::Float8.accepts(&Type::Int8));
		assert!(!Type::Int4.accepts(&Type::Int8));
		assert!(!Type::Int4.accepts(&Type::Float8));
		assert!(Type::Any.accepts(&Type::Utf8));
	}

	#[test]
	fn test_u8_round_trip() {
		for ty in [
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
		] {
			assert_eq!(Type::from_u8(ty.to_u8()), Some(ty));
		}
		assert_eq!(Type::from_u8(0), None);
	}
}
