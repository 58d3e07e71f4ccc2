// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use serde::{Deserialize, Serialize};

use crate::{dense::DenseArray, element::Element};

/// Range-compressed storage: slot `i` reads `start + step * i`. Nothing
/// is materialized until a write breaks the pattern, at which point the
/// owning storage promotes to dense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MappedArray<T> {
	start: T,
	step: i64,
	length: usize,
}

impl<T: Element> MappedArray<T> {
	pub fn new(start: T, step: i64, length: usize) -> Self {
		Self {
			start,
			step,
			length,
		}
	}

	pub fn len(&self) -> usize {
		self.length
	}

	pub fn is_empty(&self) -> bool {
		self.length == 0
	}

	pub fn step(&self) -> i64 {
		self.step
	}

	pub fn start(&self) -> &T {
		&self.start
	}

	pub fn get(&self, index: usize) -> T {
		T::advance(self.start.clone(), self.step, index)
	}

	pub fn matches(&self, index: usize, value: &T) -> bool {
		self.get(index).same(value)
	}

	pub fn expand(&mut self, new_length: usize) {
		self.length = self.length.max(new_length);
	}

	/// Whether the compressed range is already ordered the asked way.
	pub fn is_sorted(&self, descending: bool) -> bool {
		if descending {
			self.step <= 0
		} else {
			self.step >= 0
		}
	}

	pub fn to_dense(&self) -> DenseArray<T> {
		let data = (0..self.length).map(|i| self.get(i)).collect();
		DenseArray::from_vec(data, self.start.clone())
	}
}
