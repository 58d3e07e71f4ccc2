// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::element::Element;

/// Map-backed storage: the entries are exactly the slots whose value
/// differs from the default. Writing the default removes the entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SparseArray<T> {
	entries: FxHashMap<usize, T>,
	length: usize,
	default: T,
}

impl<T: Element> SparseArray<T> {
	pub fn new(length: usize, fill_hint: f32, default: T) -> Self {
		let capacity = ((length as f32 * fill_hint) as usize).max(5);
		let mut entries = FxHashMap::default();
		entries.reserve(capacity);
		Self {
			entries,
			length,
			default,
		}
	}

	pub fn len(&self) -> usize {
		self.length
	}

	pub fn is_empty(&self) -> bool {
		self.length == 0
	}

	pub fn default_value(&self) -> &T {
		&self.default
	}

	pub fn load_factor(&self) -> f32 {
		if self.length == 0 {
			0.0
		} else {
			self.entries.len() as f32 / self.length as f32
		}
	}

	pub fn get(&self, index: usize) -> &T {
		self.entries.get(&index).unwrap_or(&self.default)
	}

	pub fn is_set(&self, index: usize) -> bool {
		self.entries.contains_key(&index)
	}

	pub fn set(&mut self, index: usize, value: T) -> T {
		if value.same(&self.default) {
			self.entries.remove(&index).unwrap_or_else(|| self.default.clone())
		} else {
			self.entries.insert(index, value).unwrap_or_else(|| self.default.clone())
		}
	}

	pub fn swap(&mut self, i: usize, j: usize) {
		let a = self.entries.remove(&i);
		let b = self.entries.remove(&j);
		if let Some(value) = a {
			self.entries.insert(j, value);
		}
		if let Some(value) = b {
			self.entries.insert(i, value);
		}
	}

	pub fn fill(&mut self, value: T, start: usize, end: usize) {
		if value.same(&self.default) {
			self.entries.retain(|&index, _| index < start || index >= end);
		} else {
			for index in start..end {
				self.entries.insert(index, value.clone());
			}
		}
	}

	pub fn expand(&mut self, new_length: usize) {
		self.length = self.length.max(new_length);
	}

	pub fn iter_entries(&self) -> impl Iterator<Item = (usize, &T)> {
		self.entries.iter().map(|(&index, value)| (index, value))
	}

	pub fn copy_range(&self, start: usize, end: usize) -> Self {
		let mut copy = Self::new(end - start, self.load_factor(), self.default.clone());
		for (&index, value) in &self.entries {
			if index >= start && index < end {
				copy.entries.insert(index - start, value.clone());
			}
		}
		copy
	}

	pub fn gather(&self, indexes: &[usize]) -> Self {
		let mut copy = Self::new(indexes.len(), self.load_factor(), self.default.clone());
		for (slot, &index) in indexes.iter().enumerate() {
			if let Some(value) = self.entries.get(&index) {
				copy.entries.insert(slot, value.clone());
			}
		}
		copy
	}

	/// Materializes the range, sorts it and writes it back through
	/// `set`, which drops the slots that land on the default.
	pub fn sort_range(&mut self, start: usize, end: usize, descending: bool) {
		let mut values: Vec<T> = (start..end).map(|i| self.get(i).clone()).collect();
		if descending {
			values.sort_unstable_by(|a, b| b.order(a));
		} else {
			values.sort_unstable_by(|a, b| a.order(b));
		}
		for (offset, value) in values.into_iter().enumerate() {
			self.set(start + offset, value);
		}
	}

	pub fn binary_search(&self, start: usize, end: usize, value: &T) -> Result<usize, usize> {
		let mut low = start;
		let mut high = end;
		while low < high {
			let mid = (low + high) / 2;
			match self.get(mid).order(value) {
				std::cmp::Ordering::Less => low = mid + 1,
				std::cmp::Ordering::Greater => high = mid,
				std::cmp::Ordering::Equal => return Ok(mid),
			}
		}
		Err(low)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unset_reads_default() {
		let arr: SparseArray<i32> = SparseArray::new(10, 0.2, 7);
		assert_eq!(*arr.get(3), 7);
		assert!(!arr.is_set(3));
	}

	#[test]
	fn test_set_default_removes_entry() {
		let mut arr = SparseArray::new(10, 0.2, 0i32);
		arr.set(4, 9);
		assert!(arr.is_set(4));
		arr.set(4, 0);
		assert!(!arr.is_set(4));
		assert_eq!(*arr.get(4), 0);
	}

	#[test]
	fn test_swap_moves_entries() {
		let mut arr = SparseArray::new(4, 0.5, 0i64);
		arr.set(0, 5);
		arr.swap(0, 3);
		assert_eq!(*arr.get(0), 0);
		assert_eq!(*arr.get(3), 5);
		arr.swap(0, 3);
		assert_eq!(*arr.get(0), 5);
		assert_eq!(*arr.get(3), 0);
	}

	#[test]
	fn test_fill_with_default_clears_range() {
		let mut arr = SparseArray::new(6, 0.5, 0i32);
		arr.fill(2, 0, 6);
		assert_eq!(arr.load_factor(), 1.0);
		arr.fill(0, 1, 5);
		assert_eq!(*arr.get(0), 2);
		assert_eq!(*arr.get(3), 0);
		assert_eq!(*arr.get(5), 2);
	}

	#[test]
	fn test_sort_range() {
		let mut arr = SparseArray::new(4, 0.5, 0i32);
		arr.set(0, 3);
		arr.set(2, 1);
		// values: [3, 0, 1, 0] -> sorted: [0, 0, 1, 3]
		arr.sort_range(0, 4, false);
		assert_eq!(*arr.get(0), 0);
		assert_eq!(*arr.get(1), 0);
		assert_eq!(*arr.get(2), 1);
		assert_eq!(*arr.get(3), 3);
	}

	#[test]
	fn test_nan_default_write_is_dropped() {
		let mut arr = SparseArray::new(4, 0.5, f64::NAN);
		arr.set(1, f64::NAN);
		assert!(!arr.is_set(1));
		arr.set(1, 2.0);
		assert!(arr.is_set(1));
	}

	#[test]
	fn test_copy_range_shifts_keys() {
		let mut arr = SparseArray::new(6, 0.5, 0i32);
		arr.set(2, 5);
		arr.set(4, 7);
		let copy = arr.copy_range(2, 5);
		assert_eq!(copy.len(), 3);
		assert_eq!(*copy.get(0), 5);
		assert_eq!(*copy.get(2), 7);
	}
}
