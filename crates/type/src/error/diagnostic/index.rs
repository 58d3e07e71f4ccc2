// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::fmt::Debug;

use crate::error::diagnostic::Diagnostic;

pub fn duplicate_key<K: Debug>(key: K) -> Diagnostic {
	Diagnostic::new("INDEX_001", "duplicate key in index")
		.with_label(format!("{:?}", key))
		.with_help("keys in an index must be distinct; use add_all with ignore_duplicates to skip")
}

pub fn unknown_key<K: Debug>(key: K) -> Diagnostic {
	Diagnostic::new("INDEX_002", "key not present in index").with_label(format!("{:?}", key))
}

pub fn view_mutation(operation: &str) -> Diagnostic {
	Diagnostic::new("INDEX_003", "structural mutation on a filter view")
		.with_label(operation.to_string())
		.with_help("deep-copy the view to obtain a mutable root index")
}

pub fn replacement_exists<K: Debug>(key: K) -> Diagnostic {
	Diagnostic::new("INDEX_004", "replacement key already present in index").with_label(format!("{:?}", key))
}

pub fn ordinal_out_of_bounds(ordinal: usize, size: usize) -> Diagnostic {
	Diagnostic::new("INDEX_005", "ordinal out of bounds")
		.with_label(format!("ordinal {} on index of size {}", ordinal, size))
}
