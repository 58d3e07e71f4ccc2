// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::fmt::Debug;

use crate::{error::diagnostic::Diagnostic, value::r#type::Type};

pub fn out_of_bounds(index: usize, length: usize) -> Diagnostic {
	Diagnostic::new("ARRAY_001", "array index out of bounds")
		.with_label(format!("index {} on array of length {}", index, length))
		.with_help("use an index in 0..length")
}

pub fn range_out_of_bounds(start: usize, end: usize, length: usize) -> Diagnostic {
	Diagnostic::new("ARRAY_002", "array range out of bounds")
		.with_label(format!("range {}..{} on array of length {}", start, end, length))
}

pub fn unsupported_operation(operation: &str, ty: &Type) -> Diagnostic {
	Diagnostic::new("ARRAY_003", "unsupported array operation")
		.with_label(format!("{} is not defined for {} arrays", operation, ty))
}

pub fn type_mismatch(expected: &Type, actual: &Type) -> Diagnostic {
	Diagnostic::new("ARRAY_004", "array element type mismatch")
		.with_label(format!("expected {}, found {}", expected, actual))
		.with_help("narrowing writes are rejected; only int4 -> int8 -> float8 widen")
}

pub fn codec_failure(detail: impl Into<String>) -> Diagnostic {
	Diagnostic::new("ARRAY_005", "array serialization failed").with_label(detail.into())
}

pub fn length_mismatch(left: usize, right: usize) -> Diagnostic {
	Diagnostic::new("ARRAY_006", "array length mismatch")
		.with_label(format!("left has {} slots, right has {}", left, right))
}

pub fn coding_mismatch() -> Diagnostic {
	Diagnostic::new("ARRAY_007", "coded arrays do not share a coding")
		.with_help("copy between coded arrays requires the same coding instance")
}

pub fn unknown_code(code: i32) -> Diagnostic {
	Diagnostic::new("ARRAY_008", "code not present in coding").with_label(format!("code {}", code))
}

pub fn value_not_in_coding<V: Debug>(value: &V) -> Diagnostic {
	Diagnostic::new("ARRAY_009", "value not present in coding").with_label(format!("{:?}", value))
}

pub fn unknown_zone(name: &str) -> Diagnostic {
	Diagnostic::new("ARRAY_010", "unknown zone identifier").with_label(name.to_string())
}

pub fn mapped_write(detail: &str) -> Diagnostic {
	Diagnostic::new("ARRAY_011", "mapped array rejects the write").with_label(detail.to_string())
}
