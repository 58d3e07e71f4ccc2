// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

/// Macro to create an Error from a diagnostic function call
///
/// Usage: `error!(diagnostic_function(args))`
/// Expands to: `Error(diagnostic_function(args))`
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::error::Error($diagnostic)
	};
}

/// Macro to return an error from a diagnostic function call
///
/// Usage: `return_error!(diagnostic_function(args))`
/// Expands to: `return Err(Error(diagnostic_function(args)))`
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error::Error($diagnostic))
	};
}

/// Macro to create an Err(Error()) from a diagnostic function call
///
/// Usage: `err!(diagnostic_function(args))`
/// Expands to: `Err(Error(diagnostic_function(args)))`
#[macro_export]
macro_rules! err {
	($diagnostic:expr) => {
		Err($crate::error::Error($diagnostic))
	};
}
