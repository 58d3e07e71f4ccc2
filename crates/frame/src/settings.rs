// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Process-wide runtime settings. Initialized once at startup; there is
//! no teardown, and reconfiguring while a bulk operation is running is
//! unsupported.

use std::sync::RwLock;

use once_cell::sync::Lazy;
use tabula_type::parse::DEFAULT_NULL_LITERALS;

#[derive(Clone, Debug)]
pub struct Settings {
	/// Row count below which a parallel task runs sequentially.
	pub row_split_threshold: usize,
	/// Column count below which a parallel task runs sequentially.
	pub col_split_threshold: usize,
	/// Literals the parsers treat as null.
	pub null_literals: Vec<String>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			row_split_threshold: 100_000,
			col_split_threshold: 10_000,
			null_literals: DEFAULT_NULL_LITERALS.iter().map(|s| s.to_string()).collect(),
		}
	}
}

static SETTINGS: Lazy<RwLock<Settings>> = Lazy::new(|| RwLock::new(Settings::default()));

impl Settings {
	pub fn snapshot() -> Settings {
		SETTINGS.read().expect("settings lock").clone()
	}

	pub fn configure(apply: impl FnOnce(&mut Settings)) {
		let mut settings = SETTINGS.write().expect("settings lock");
		apply(&mut settings);
		assert!(settings.row_split_threshold > 0, "row_split_threshold must be positive");
		assert!(settings.col_split_threshold > 0, "col_split_threshold must be positive");
	}
}

pub fn row_split_threshold() -> usize {
	SETTINGS.read().expect("settings lock").row_split_threshold
}

pub fn col_split_threshold() -> usize {
	SETTINGS.read().expect("settings lock").col_split_threshold
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let settings = Settings::snapshot();
		assert!(settings.row_split_threshold > 0);
		assert!(settings.null_literals.iter().any(|s| s == "N/A"));
	}
}
