// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! String-to-typed parsers. Every parser maps the process null literals
//! to `Value::Undefined` before attempting a typed parse.

use crate::{
	err,
	error::{Result, diagnostic::parse},
	value::{Date, DateTime, Time, Type, Value, Zoned},
};

/// The literals every parser treats as null by default.
pub const DEFAULT_NULL_LITERALS: [&str; 6] = ["null", "NULL", "Null", "N/A", "n/a", "-"];

pub fn is_null_literal(text: &str, nulls: &[&str]) -> bool {
	let trimmed = text.trim();
	trimmed.is_empty() || nulls.contains(&trimmed)
}

pub fn parse_value(ty: &Type, text: &str, nulls: &[&str]) -> Result<Value> {
	if is_null_literal(text, nulls) {
		return Ok(Value::Undefined);
	}
	let text = text.trim();
	match ty {
		Type::Boolean => parse_boolean(text),
		Type::Int4 => match text.parse::<i32>() {
			Ok(v) => Ok(Value::Int4(v)),
			Err(_) => err!(parse::invalid_literal(text, ty)),
		},
		Type::Int8 => match text.parse::<i64>() {
			Ok(v) => Ok(Value::Int8(v)),
			Err(_) => err!(parse::invalid_literal(text, ty)),
		},
		Type::Float8 => match text.parse::<f64>() {
			Ok(v) => Ok(Value::float8(v)),
			Err(_) => err!(parse::invalid_literal(text, ty)),
		},
		Type::Utf8 => Ok(Value::Utf8(text.to_string())),
		Type::Date => match text.parse::<Date>() {
			Ok(v) => Ok(Value::Date(v)),
			Err(_) => err!(parse::invalid_temporal(text, ty)),
		},
		Type::Time => match text.parse::<Time>() {
			Ok(v) => Ok(Value::Time(v)),
			Err(_) => err!(parse::invalid_temporal(text, ty)),
		},
		Type::DateTime => match text.parse::<DateTime>() {
			Ok(v) => Ok(Value::DateTime(v)),
			Err(_) => err!(parse::invalid_temporal(text, ty)),
		},
		Type::Zoned => match text.parse::<Zoned>() {
			Ok(v) => Ok(Value::Zoned(v)),
			Err(_) => err!(parse::invalid_temporal(text, ty)),
		},
		Type::Any => Ok(guess(text)),
	}
}

fn parse_boolean(text: &str) -> Result<Value> {
	match text {
		"true" | "TRUE" | "True" => Ok(Value::Boolean(true)),
		"false" | "FALSE" | "False" => Ok(Value::Boolean(false)),
		_ => err!(parse::invalid_boolean(text)),
	}
}

/// Best-effort typed interpretation for Any columns: boolean, integer,
/// float, date, datetime, else text.
fn guess(text: &str) -> Value {
	if let Ok(v) = parse_boolean(text) {
		return v;
	}
	if let Ok(v) = text.parse::<i64>() {
		return Value::Int8(v);
	}
	if let Ok(v) = text.parse::<f64>() {
		return Value::float8(v);
	}
	if let Ok(v) = text.parse::<Date>() {
		return Value::Date(v);
	}
	if let Ok(v) = text.parse::<DateTime>() {
		return Value::DateTime(v);
	}
	Value::Utf8(text.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_null_literals() {
		for literal in DEFAULT_NULL_LITERALS {
			let v = parse_value(&Type::Float8, literal, &DEFAULT_NULL_LITERALS).unwrap();
			assert_eq!(v, Value::Undefined);
		}
		assert_eq!(parse_value(&Type::Int4, "  ", &DEFAULT_NULL_LITERALS).unwrap(), Value::Undefined);
	}

	#[test]
	fn test_typed_parses() {
		let nulls = DEFAULT_NULL_LITERALS;
		assert_eq!(parse_value(&Type::Boolean, "true", &nulls).unwrap(), Value::Boolean(true));
		assert_eq!(parse_value(&Type::Int4, "42", &nulls).unwrap(), Value::Int4(42));
		assert_eq!(parse_value(&Type::Int8, "-7", &nulls).unwrap(), Value::Int8(-7));
		assert_eq!(parse_value(&Type::Float8, "2.5", &nulls).unwrap(), Value::float8(2.5));
		assert_eq!(
			parse_value(&Type::Date, "2013-06-02", &nulls).unwrap(),
			Value::Date(Date::new(2013, 6, 2).unwrap())
		);
	}

	#[test]
	fn test_invalid_literal_fails() {
		let nulls = DEFAULT_NULL_LITERALS;
		assert!(parse_value(&Type::Int4, "4.5", &nulls).is_err());
		assert!(parse_value(&Type::Boolean, "yep", &nulls).is_err());
		assert!(parse_value(&Type::Date, "2013-13-02", &nulls).is_err());
	}

	#[test]
	fn test_guess_for_any() {
		let nulls = DEFAULT_NULL_LITERALS;
		assert_eq!(parse_value(&Type::Any, "17", &nulls).unwrap(), Value::Int8(17));
		assert_eq!(parse_value(&Type::Any, "hello", &nulls).unwrap(), Value::Utf8("hello".into()));
	}
}
