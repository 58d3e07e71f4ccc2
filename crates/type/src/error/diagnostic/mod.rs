// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use serde::{Deserialize, Serialize};

pub mod array;
pub mod frame;
pub mod index;
pub mod parse;

/// A structured description of a failure: a stable code, a one-line
/// message and optional label, help and notes for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
	pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			message: message.into(),
			label: None,
			help: None,
			notes: Vec::new(),
			cause: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_help(mut self, help: impl Into<String>) -> Self {
		self.help = Some(help.into());
		self
	}

	pub fn with_note(mut self, note: impl Into<String>) -> Self {
		self.notes.push(note.into());
		self
	}

	pub fn with_cause(mut self, cause: Diagnostic) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}

	pub fn render(&self) -> String {
		let mut out = format!("[{}] {}", self.code, self.message);
		if let Some(label) = &self.label {
			out.push_str(": ");
			out.push_str(label);
		}
		if let Some(help) = &self.help {
			out.push_str("\n  help: ");
			out.push_str(help);
		}
		for note in &self.notes {
			out.push_str("\n  note: ");
			out.push_str(note);
		}
		if let Some(cause) = &self.cause {
			out.push_str("\n  caused by: ");
			out.push_str(cause.render().as_str());
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_plain() {
		let d = Diagnostic::new("ARRAY_001", "index out of bounds");
		assert_eq!(d.render(), "[ARRAY_001] index out of bounds");
	}

	#[test]
	fn test_render_with_label_and_help() {
		let d = Diagnostic::new("ARRAY_001", "index out of bounds")
			.with_label("index 9, length 4")
			.with_help("use an index in 0..length");
		let out = d.render();
		assert!(out.contains("index 9, length 4"));
		assert!(out.contains("help: use an index in 0..length"));
	}

	#[test]
	fn test_render_with_cause() {
		let cause = Diagnostic::new("PARSE_001", "invalid literal");
		let d = Diagnostic::new("FRAME_004", "type mismatch").with_cause(cause);
		assert!(d.render().contains("caused by: [PARSE_001]"));
	}
}
