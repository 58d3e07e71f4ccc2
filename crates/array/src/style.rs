// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The storage strategy behind an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayStyle {
	/// Contiguous storage, one slot per ordinal.
	Dense,
	/// Map-backed storage holding only the slots that differ from the
	/// default value.
	Sparse,
	/// Range-compressed storage: start plus constant stride, promoted
	/// to dense on the first out-of-pattern write.
	Mapped,
	/// Integer codes in dense storage, values resolved through a coding.
	CodedDense,
	/// Integer codes in sparse storage, values resolved through a coding.
	CodedSparse,
}

impl ArrayStyle {
	pub fn is_sparse(&self) -> bool {
		matches!(self, ArrayStyle::Sparse | ArrayStyle::CodedSparse)
	}

	pub fn is_coded(&self) -> bool {
		matches!(self, ArrayStyle::CodedDense | ArrayStyle::CodedSparse)
	}
}

impl Display for ArrayStyle {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ArrayStyle::Dense => f.write_str("dense"),
			ArrayStyle::Sparse => f.write_str("sparse"),
			ArrayStyle::Mapped => f.write_str("mapped"),
			ArrayStyle::CodedDense => f.write_str("coded-dense"),
			ArrayStyle::CodedSparse => f.write_str("coded-sparse"),
		}
	}
}

/// Sort direction for arrays and axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
	Asc,
	Desc,
}

impl SortOrder {
	pub fn descending(&self) -> bool {
		matches!(self, SortOrder::Desc)
	}
}
