// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{dense::DenseArray, element::Element, mapped::MappedArray, sparse::SparseArray, style::ArrayStyle};

/// The storage behind one element type: dense, sparse or range-mapped.
/// Mutations that a mapped range cannot express promote it to dense in
/// place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ArrayData<T> {
	Dense(DenseArray<T>),
	Sparse(SparseArray<T>),
	Mapped(MappedArray<T>),
}

impl<T: Element> ArrayData<T> {
	pub fn dense(length: usize, default: T) -> Self {
		ArrayData::Dense(DenseArray::new(length, default))
	}

	pub fn dense_of(data: Vec<T>, default: T) -> Self {
		ArrayData::Dense(DenseArray::from_vec(data, default))
	}

	pub fn sparse(length: usize, fill_hint: f32, default: T) -> Self {
		ArrayData::Sparse(SparseArray::new(length, fill_hint, default))
	}

	pub fn mapped(start: T, step: i64, length: usize) -> Self {
		ArrayData::Mapped(MappedArray::new(start, step, length))
	}

	pub fn len(&self) -> usize {
		match self {
			ArrayData::Dense(arr) => arr.len(),
			ArrayData::Sparse(arr) => arr.len(),
			ArrayData::Mapped(arr) => arr.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn style(&self) -> ArrayStyle {
		match self {
			ArrayData::Dense(_) => ArrayStyle::Dense,
			ArrayData::Sparse(_) => ArrayStyle::Sparse,
			ArrayData::Mapped(_) => ArrayStyle::Mapped,
		}
	}

	pub fn default_value(&self) -> T {
		match self {
			ArrayData::Dense(arr) => arr.default_value().clone(),
			ArrayData::Sparse(arr) => arr.default_value().clone(),
			ArrayData::Mapped(arr) => arr.start().clone(),
		}
	}

	pub fn load_factor(&self) -> f32 {
		match self {
			ArrayData::Sparse(arr) => arr.load_factor(),
			_ => 1.0,
		}
	}

	pub fn get(&self, index: usize) -> T {
		match self {
			ArrayData::Dense(arr) => arr.get(index).clone(),
			ArrayData::Sparse(arr) => arr.get(index).clone(),
			ArrayData::Mapped(arr) => arr.get(index),
		}
	}

	pub fn is_null(&self, index: usize) -> bool {
		match self {
			ArrayData::Dense(arr) => arr.get(index).is_null(),
			ArrayData::Sparse(arr) => arr.get(index).is_null(),
			ArrayData::Mapped(arr) => arr.get(index).is_null(),
		}
	}

	fn promote(&mut self) {
		if let ArrayData::Mapped(arr) = self {
			*self = ArrayData::Dense(arr.to_dense());
		}
	}

	pub fn set(&mut self, index: usize, value: T) -> T {
		match self {
			ArrayData::Dense(arr) => arr.set(index, value),
			ArrayData::Sparse(arr) => arr.set(index, value),
			ArrayData::Mapped(arr) => {
				if arr.matches(index, &value) {
					return value;
				}
				self.promote();
				self.set(index, value)
			}
		}
	}

	pub fn swap(&mut self, i: usize, j: usize) {
		if i == j {
			return;
		}
		match self {
			ArrayData::Dense(arr) => arr.swap(i, j),
			ArrayData::Sparse(arr) => arr.swap(i, j),
			ArrayData::Mapped(_) => {
				self.promote();
				self.swap(i, j);
			}
		}
	}

	pub fn fill(&mut self, value: T, start: usize, end: usize) {
		match self {
			ArrayData::Dense(arr) => arr.fill(value, start, end),
			ArrayData::Sparse(arr) => arr.fill(value, start, end),
			ArrayData::Mapped(_) => {
				self.promote();
				self.fill(value, start, end);
			}
		}
	}

	pub fn expand(&mut self, new_length: usize) {
		match self {
			ArrayData::Dense(arr) => arr.expand(new_length),
			ArrayData::Sparse(arr) => arr.expand(new_length),
			ArrayData::Mapped(arr) => arr.expand(new_length),
		}
	}

	pub fn compare(&self, i: usize, j: usize) -> Ordering {
		match self {
			ArrayData::Dense(arr) => arr.get(i).order(arr.get(j)),
			ArrayData::Sparse(arr) => arr.get(i).order(arr.get(j)),
			ArrayData::Mapped(arr) => arr.get(i).order(&arr.get(j)),
		}
	}

	pub fn sort_range(&mut self, start: usize, end: usize, descending: bool) {
		match self {
			ArrayData::Dense(arr) => arr.sort_range(start, end, descending),
			ArrayData::Sparse(arr) => arr.sort_range(start, end, descending),
			ArrayData::Mapped(arr) => {
				if arr.is_sorted(descending) {
					return;
				}
				self.promote();
				self.sort_range(start, end, descending);
			}
		}
	}

	/// Restores insertion order where the storage tracks it (dense).
	/// Sparse and mapped storages do not; for them this is a no-op and
	/// returns false.
	pub fn restore_order(&mut self) -> bool {
		match self {
			ArrayData::Dense(arr) => arr.restore_order(),
			_ => false,
		}
	}

	pub fn binary_search(&self, start: usize, end: usize, value: &T) -> Result<usize, usize> {
		match self {
			ArrayData::Dense(arr) => arr.binary_search(start, end, value),
			ArrayData::Sparse(arr) => arr.binary_search(start, end, value),
			ArrayData::Mapped(_) => {
				let mut low = start;
				let mut high = end;
				while low < high {
					let mid = (low + high) / 2;
					match self.get(mid).order(value) {
						Ordering::Less => low = mid + 1,
						Ordering::Greater => high = mid,
						Ordering::Equal => return Ok(mid),
					}
				}
				Err(low)
			}
		}
	}

	pub fn copy_range(&self, start: usize, end: usize) -> Self {
		match self {
			ArrayData::Dense(arr) => ArrayData::Dense(arr.copy_range(start, end)),
			ArrayData::Sparse(arr) => ArrayData::Sparse(arr.copy_range(start, end)),
			ArrayData::Mapped(arr) => {
				ArrayData::Mapped(MappedArray::new(arr.get(start), arr.step(), end - start))
			}
		}
	}

	/// Gather keeps the source density: dense sources yield dense
	/// copies, sparse sources sparse ones, mapped sources materialize.
	pub fn gather(&self, indexes: &[usize]) -> Self {
		match self {
			ArrayData::Dense(arr) => ArrayData::Dense(arr.gather(indexes)),
			ArrayData::Sparse(arr) => ArrayData::Sparse(arr.gather(indexes)),
			ArrayData::Mapped(arr) => ArrayData::Dense(arr.to_dense().gather(indexes)),
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
		(0..self.len()).map(move |i| self.get(i))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_mapped_in_pattern_write_keeps_style() {
		let mut data = ArrayData::mapped(0i64, 2, 4);
		data.set(1, 2);
		assert_eq!(data.style(), ArrayStyle::Mapped);
	}

	#[test]
	fn test_mapped_out_of_pattern_write_promotes() {
		let mut data = ArrayData::mapped(0i64, 2, 4);
		let old = data.set(1, 9);
		assert_eq!(old, 2);
		assert_eq!(data.style(), ArrayStyle::Dense);
		assert_eq!(data.get(0), 0);
		assert_eq!(data.get(1), 9);
		assert_eq!(data.get(3), 6);
	}

	#[test]
	fn test_mapped_ascending_sort_is_noop() {
		let mut data = ArrayData::mapped(5i64, 3, 4);
		data.sort_range(0, 4, false);
		assert_eq!(data.style(), ArrayStyle::Mapped);
		data.sort_range(0, 4, true);
		assert_eq!(data.style(), ArrayStyle::Dense);
		assert_eq!(data.get(0), 14);
		assert_eq!(data.get(3), 5);
	}

	#[test]
	fn test_sparse_round_trip_through_uniform_surface() {
		let mut data = ArrayData::sparse(8, 0.25, 0.0f64);
		data.set(3, 1.5);
		assert_eq!(data.get(3), 1.5);
		assert_eq!(data.get(4), 0.0);
		data.swap(3, 4);
		assert_eq!(data.get(4), 1.5);
		assert!(!data.is_null(4));
	}

	#[test]
	fn test_binary_search_on_mapped() {
		let data: ArrayData<i64> = ArrayData::mapped(10, 10, 5);
		assert_eq!(data.binary_search(0, 5, &30), Ok(2));
		assert_eq!(data.binary_search(0, 5, &35), Err(3));
	}
}
