// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use crate::{error::diagnostic::Diagnostic, value::r#type::Type};

pub fn invalid_literal(text: &str, target: &Type) -> Diagnostic {
	Diagnostic::new("PARSE_001", "cannot parse literal")
		.with_label(format!("'{}' is not a valid {}", text, target))
}

pub fn invalid_boolean(text: &str) -> Diagnostic {
	Diagnostic::new("PARSE_002", "cannot parse boolean")
		.with_label(format!("'{}'", text))
		.with_help("use true or false")
}

pub fn invalid_temporal(text: &str, target: &Type) -> Diagnostic {
	Diagnostic::new("PARSE_003", "cannot parse temporal literal")
		.with_label(format!("'{}' is not a valid {}", text, target))
		.with_note("dates use YYYY-MM-DD, times HH:MM:SS[.mmm], datetimes YYYY-MM-DDTHH:MM:SS")
}

pub fn invalid_zone_offset(text: &str) -> Diagnostic {
	Diagnostic::new("PARSE_004", "cannot parse zone offset")
		.with_label(format!("'{}'", text))
		.with_help("use Z or +HH:MM / -HH:MM")
}
