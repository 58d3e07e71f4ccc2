// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::fmt::Debug;

use crate::{error::diagnostic::Diagnostic, value::r#type::Type};

pub fn unknown_row_key<K: Debug>(key: K) -> Diagnostic {
	Diagnostic::new("FRAME_001", "row key not present in frame").with_label(format!("{:?}", key))
}

pub fn unknown_col_key<K: Debug>(key: K) -> Diagnostic {
	Diagnostic::new("FRAME_002", "column key not present in frame").with_label(format!("{:?}", key))
}

pub fn ordinal_out_of_bounds(axis: &str, ordinal: usize, size: usize) -> Diagnostic {
	Diagnostic::new("FRAME_003", "ordinal out of bounds")
		.with_label(format!("{} ordinal {} on axis of size {}", axis, ordinal, size))
}

pub fn type_mismatch(expected: &Type, actual: &Type) -> Diagnostic {
	Diagnostic::new("FRAME_004", "cell type mismatch")
		.with_label(format!("expected {}, found {}", expected, actual))
}

pub fn transpose_mixed_types() -> Diagnostic {
	Diagnostic::new("FRAME_005", "transpose requires a uniform element type")
		.with_help("use transpose_to_any to materialize a mixed-type transpose")
}

pub fn view_mutation(operation: &str) -> Diagnostic {
	Diagnostic::new("FRAME_006", "structural mutation on a frame view")
		.with_label(operation.to_string())
		.with_help("copy the view to obtain a standalone frame")
}

pub fn empty_frame(operation: &str) -> Diagnostic {
	Diagnostic::new("FRAME_007", "operation requires a non-empty frame").with_label(operation.to_string())
}

pub fn callback_panic(operation: &str) -> Diagnostic {
	Diagnostic::new("FRAME_008", "user callback panicked during a bulk operation")
		.with_label(operation.to_string())
}
