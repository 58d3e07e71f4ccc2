// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use serde::{Deserialize, Serialize};
use tabula_type::CowVec;

use crate::element::Element;

/// Contiguous storage: one slot per ordinal on a copy-on-write vector.
/// A snapshot of the data is taken lazily before the first sort so the
/// insertion order can be restored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DenseArray<T> {
	data: CowVec<T>,
	default: T,
	restore: Option<CowVec<T>>,
}

impl<T: Element> DenseArray<T> {
	pub fn new(length: usize, default: T) -> Self {
		Self {
			data: CowVec::new(vec![default.clone(); length]),
			default,
			restore: None,
		}
	}

	pub fn from_vec(data: Vec<T>, default: T) -> Self {
		Self {
			data: CowVec::new(data),
			default,
			restore: None,
		}
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn default_value(&self) -> &T {
		&self.default
	}

	pub fn get(&self, index: usize) -> &T {
		&self.data[index]
	}

	pub fn set(&mut self, index: usize, value: T) -> T {
		self.data.set(index, value)
	}

	pub fn swap(&mut self, i: usize, j: usize) {
		self.data.swap(i, j);
	}

	pub fn fill(&mut self, value: T, start: usize, end: usize) {
		let data = self.data.make_mut();
		for slot in &mut data[start..end] {
			*slot = value.clone();
		}
	}

	pub fn expand(&mut self, new_length: usize) {
		while self.data.len() < new_length {
			self.data.push(self.default.clone());
		}
	}

	pub fn push(&mut self, value: T) {
		self.data.push(value);
	}

	pub fn as_slice(&self) -> &[T] {
		self.data.as_slice()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, T> {
		self.data.iter()
	}

	pub fn copy_range(&self, start: usize, end: usize) -> Self {
		Self {
			data: self.data.slice(start, end),
			default: self.default.clone(),
			restore: None,
		}
	}

	/// Gather: slots outside the source take the default value.
	pub fn gather(&self, indexes: &[usize]) -> Self {
		let data = indexes
			.iter()
			.map(|&i| {
				if i < self.len() {
					self.data[i].clone()
				} else {
					self.default.clone()
				}
			})
			.collect();
		Self {
			data: CowVec::new(data),
			default: self.default.clone(),
			restore: None,
		}
	}

	pub fn sort_range(&mut self, start: usize, end: usize, descending: bool) {
		if self.restore.is_none() {
			self.restore = Some(self.data.clone());
		}
		let data = self.data.make_mut();
		if descending {
			data[start..end].sort_unstable_by(|a, b| b.order(a));
		} else {
			data[start..end].sort_unstable_by(|a, b| a.order(b));
		}
	}

	/// Restores the data to the snapshot taken before the first sort.
	/// Returns false when no sort happened yet.
	pub fn restore_order(&mut self) -> bool {
		match &self.restore {
			Some(snapshot) => {
				self.data = snapshot.clone();
				true
			}
			None => false,
		}
	}

	pub fn binary_search(&self, start: usize, end: usize, value: &T) -> Result<usize, usize> {
		self.data.as_slice()[start..end]
			.binary_search_by(|probe| probe.order(value))
			.map(|i| i + start)
			.map_err(|i| i + start)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_filled_with_default() {
		let arr = DenseArray::new(3, 7i32);
		assert_eq!(arr.len(), 3);
		assert_eq!(*arr.get(2), 7);
	}

	#[test]
	fn test_set_returns_old() {
		let mut arr = DenseArray::new(2, 0i64);
		assert_eq!(arr.set(1, 5), 0);
		assert_eq!(*arr.get(1), 5);
	}

	#[test]
	fn test_sort_and_restore() {
		let mut arr = DenseArray::from_vec(vec![3i32, 1, 2], 0);
		arr.sort_range(0, 3, false);
		assert_eq!(arr.as_slice(), &[1, 2, 3]);
		arr.sort_range(0, 3, true);
		assert_eq!(arr.as_slice(), &[3, 2, 1]);
		assert!(arr.restore_order());
		assert_eq!(arr.as_slice(), &[3, 1, 2]);
	}

	#[test]
	fn test_restore_without_sort_is_noop() {
		let mut arr = DenseArray::from_vec(vec![3i32, 1], 0);
		assert!(!arr.restore_order());
		assert_eq!(arr.as_slice(), &[3, 1]);
	}

	#[test]
	fn test_gather_out_of_range_takes_default() {
		let arr = DenseArray::from_vec(vec![1i32, 2], 9);
		let gathered = arr.gather(&[1, 5]);
		assert_eq!(gathered.as_slice(), &[2, 9]);
	}

	#[test]
	fn test_binary_search_offsets() {
		let arr = DenseArray::from_vec(vec![9i32, 1, 3, 5, 9], 0);
		assert_eq!(arr.binary_search(1, 4, &3), Ok(2));
		assert_eq!(arr.binary_search(1, 4, &4), Err(3));
	}
}
