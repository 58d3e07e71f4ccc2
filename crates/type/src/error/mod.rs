// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{
	fmt::{Display, Formatter},
	ops::{Deref, DerefMut},
};

pub mod diagnostic;
mod r#macro;

use diagnostic::Diagnostic;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Deref for Error {
	type Target = Diagnostic;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Error {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.0.render().as_str())
	}
}

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}

	pub fn code(&self) -> &str {
		self.0.code.as_str()
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		crate::error!(diagnostic::array::codec_failure(err.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::diagnostic::index::duplicate_key;
	use crate::{err, error};

	#[test]
	fn test_error_carries_diagnostic() {
		let err = error!(duplicate_key("AAPL"));
		assert_eq!(err.code(), "INDEX_001");
		assert!(err.diagnostic().message.contains("duplicate"));
	}

	#[test]
	fn test_err_macro() {
		let result: crate::Result<()> = err!(duplicate_key("AAPL"));
		assert!(result.is_err());
	}

	#[test]
	fn test_display_contains_code() {
		let err = error!(duplicate_key("ORCL"));
		let rendered = format!("{}", err);
		assert!(rendered.contains("INDEX_001"));
		assert!(rendered.contains("ORCL"));
	}
}
