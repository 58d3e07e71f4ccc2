// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// An 8-byte float with a total order, usable as a key. NaN is rejected
/// at construction; null doubles are carried as NaN only inside array
/// storage, never inside a value.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct OrderedF64(f64);

impl OrderedF64 {
	pub fn zero() -> Self {
		Self(0.0)
	}

	pub fn value(&self) -> f64 {
		self.0
	}
}

impl TryFrom<f64> for OrderedF64 {
	type Error = ();

	fn try_from(value: f64) -> Result<Self, Self::Error> {
		if value.is_nan() {
			Err(())
		} else {
			Ok(Self(value))
		}
	}
}

impl From<OrderedF64> for f64 {
	fn from(value: OrderedF64) -> Self {
		value.0
	}
}

impl PartialEq for OrderedF64 {
	fn eq(&self, other: &Self) -> bool {
		self.0.total_cmp(&other.0) == Ordering::Equal
	}
}

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.0.total_cmp(&other.0))
	}
}

impl Ord for OrderedF64 {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.total_cmp(&other.0)
	}
}

impl Hash for OrderedF64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		// normalize -0.0 so both zeros land in one hash bucket
		let bits = if self.0 == 0.0 {
			0f64.to_bits()
		} else {
			self.0.to_bits()
		};
		bits.hash(state);
	}
}

impl Display for OrderedF64 {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

#[cfg(test)]
mod tests {
	use super::OrderedF64;

	#[test]
	fn test_rejects_nan() {
		assert!(OrderedF64::try_from(f64::NAN).is_err());
		assert!(OrderedF64::try_from(f64::INFINITY).is_ok());
	}

	#[test]
	fn test_total_order() {
		let a = OrderedF64::try_from(-1.0).unwrap();
		let b = OrderedF64::try_from(2.5).unwrap();
		assert!(a < b);
		assert_eq!(b.value(), 2.5);
	}
}
