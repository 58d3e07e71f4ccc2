// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{cmp::Ordering, fmt::Debug};

use serde::{Deserialize, Serialize};
use tabula_type::Value;

/// The contract every storable element representation satisfies:
/// equality that treats the null representation as equal to itself, a
/// total order, and a null test. `advance` exists only for the elements
/// that support range-compressed (mapped) storage.
pub trait Element: Clone + Debug + 'static {
	fn same(&self, other: &Self) -> bool;

	fn order(&self, other: &Self) -> Ordering;

	fn is_null(&self) -> bool {
		false
	}

	fn advance(start: Self, step: i64, n: usize) -> Self {
		let _ = (start, step, n);
		unreachable!("mapped style is not defined for this element")
	}
}

impl Element for bool {
	fn same(&self, other: &Self) -> bool {
		self == other
	}

	fn order(&self, other: &Self) -> Ordering {
		self.cmp(other)
	}
}

impl Element for i32 {
	fn same(&self, other: &Self) -> bool {
		self == other
	}

	fn order(&self, other: &Self) -> Ordering {
		self.cmp(other)
	}

	fn advance(start: Self, step: i64, n: usize) -> Self {
		(start as i64 + step * n as i64) as i32
	}
}

impl Element for i64 {
	fn same(&self, other: &Self) -> bool {
		self == other
	}

	fn order(&self, other: &Self) -> Ordering {
		self.cmp(other)
	}

	fn advance(start: Self, step: i64, n: usize) -> Self {
		start + step * n as i64
	}
}

impl Element for f64 {
	fn same(&self, other: &Self) -> bool {
		self == other || (self.is_nan() && other.is_nan())
	}

	fn order(&self, other: &Self) -> Ordering {
		self.total_cmp(other)
	}

	fn is_null(&self) -> bool {
		self.is_nan()
	}
}

/// Epoch-millisecond payload of the temporal arrays. `i64::MIN` is the
/// null sentinel, so nulls sort first in the raw order, the way the
/// primitive comparison falls out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EpochMillis(pub i64);

pub const NULL_MILLIS: i64 = i64::MIN;

impl EpochMillis {
	pub fn null() -> Self {
		Self(NULL_MILLIS)
	}
}

impl Element for EpochMillis {
	fn same(&self, other: &Self) -> bool {
		self.0 == other.0
	}

	fn order(&self, other: &Self) -> Ordering {
		self.0.cmp(&other.0)
	}

	fn is_null(&self) -> bool {
		self.0 == NULL_MILLIS
	}

	fn advance(start: Self, step: i64, n: usize) -> Self {
		Self(start.0 + step * n as i64)
	}
}

impl Element for Option<String> {
	fn same(&self, other: &Self) -> bool {
		self == other
	}

	fn order(&self, other: &Self) -> Ordering {
		// None sorts first
		match (self, other) {
			(None, None) => Ordering::Equal,
			(None, Some(_)) => Ordering::Less,
			(Some(_), None) => Ordering::Greater,
			(Some(a), Some(b)) => a.cmp(b),
		}
	}

	fn is_null(&self) -> bool {
		self.is_none()
	}
}

impl Element for Value {
	fn same(&self, other: &Self) -> bool {
		self == other
	}

	fn order(&self, other: &Self) -> Ordering {
		self.cmp(other)
	}

	fn is_null(&self) -> bool {
		self.is_undefined()
	}
}
