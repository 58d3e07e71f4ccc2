// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tabula_type::BitVec;

use crate::{sparse::SparseArray, style::ArrayStyle};

/// Boolean storage. The dense variant packs its data into a [`BitVec`];
/// boolean slots are never null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoolArray {
	Dense {
		data: BitVec,
		default: bool,
		restore: Option<BitVec>,
	},
	Sparse(SparseArray<bool>),
}

impl BoolArray {
	pub fn dense(length: usize, default: bool) -> Self {
		BoolArray::Dense {
			data: BitVec::repeat(length, default),
			default,
			restore: None,
		}
	}

	pub fn dense_of(values: &[bool]) -> Self {
		BoolArray::Dense {
			data: BitVec::from_slice(values),
			default: false,
			restore: None,
		}
	}

	pub fn sparse(length: usize, fill_hint: f32, default: bool) -> Self {
		BoolArray::Sparse(SparseArray::new(length, fill_hint, default))
	}

	pub fn len(&self) -> usize {
		match self {
			BoolArray::Dense {
				data, ..
			} => data.len(),
			BoolArray::Sparse(arr) => arr.len(),
		}
	}

	pub fn style(&self) -> ArrayStyle {
		match self {
			BoolArray::Dense {
				..
			} => ArrayStyle::Dense,
			BoolArray::Sparse(_) => ArrayStyle::Sparse,
		}
	}

	pub fn default_value(&self) -> bool {
		match self {
			BoolArray::Dense {
				default, ..
			} => *default,
			BoolArray::Sparse(arr) => *arr.default_value(),
		}
	}

	pub fn get(&self, index: usize) -> bool {
		match self {
			BoolArray::Dense {
				data, ..
			} => data.get(index),
			BoolArray::Sparse(arr) => *arr.get(index),
		}
	}

	pub fn set(&mut self, index: usize, value: bool) -> bool {
		match self {
			BoolArray::Dense {
				data, ..
			} => {
				let old = data.get(index);
				data.set(index, value);
				old
			}
			BoolArray::Sparse(arr) => arr.set(index, value),
		}
	}

	pub fn swap(&mut self, i: usize, j: usize) {
		if i == j {
			return;
		}
		match self {
			BoolArray::Dense {
				data, ..
			} => data.swap(i, j),
			BoolArray::Sparse(arr) => arr.swap(i, j),
		}
	}

	pub fn fill(&mut self, value: bool, start: usize, end: usize) {
		match self {
			BoolArray::Dense {
				data, ..
			} => data.fill_range(value, start, end),
			BoolArray::Sparse(arr) => arr.fill(value, start, end),
		}
	}

	pub fn expand(&mut self, new_length: usize) {
		match self {
			BoolArray::Dense {
				data,
				default,
				..
			} => {
				while data.len() < new_length {
					data.push(*default);
				}
			}
			BoolArray::Sparse(arr) => arr.expand(new_length),
		}
	}

	pub fn compare(&self, i: usize, j: usize) -> Ordering {
		self.get(i).cmp(&self.get(j))
	}

	/// Counting sort: the range becomes a run of one value followed by
	/// the other.
	pub fn sort_range(&mut self, start: usize, end: usize, descending: bool) {
		match self {
			BoolArray::Dense {
				data,
				restore,
				..
			} => {
				if restore.is_none() {
					*restore = Some(data.clone());
				}
				let ones = data.count_ones_in(start, end);
				let split = if descending {
					start + ones
				} else {
					end - ones
				};
				data.fill_range(descending, start, split);
				data.fill_range(!descending, split, end);
			}
			BoolArray::Sparse(arr) => arr.sort_range(start, end, descending),
		}
	}

	pub fn restore_order(&mut self) -> bool {
		match self {
			BoolArray::Dense {
				data,
				restore,
				..
			} => match restore {
				Some(snapshot) => {
					*data = snapshot.clone();
					true
				}
				None => false,
			},
			BoolArray::Sparse(_) => false,
		}
	}

	pub fn copy_range(&self, start: usize, end: usize) -> Self {
		match self {
			BoolArray::Dense {
				data,
				default,
				..
			} => BoolArray::Dense {
				data: data.slice(start, end),
				default: *default,
				restore: None,
			},
			BoolArray::Sparse(arr) => BoolArray::Sparse(arr.copy_range(start, end)),
		}
	}

	pub fn gather(&self, indexes: &[usize]) -> Self {
		match self {
			BoolArray::Dense {
				data,
				default,
				..
			} => BoolArray::Dense {
				data: BitVec::from_fn(indexes.len(), |slot| {
					let index = indexes[slot];
					if index < data.len() {
						data.get(index)
					} else {
						*default
					}
				}),
				default: *default,
				restore: None,
			},
			BoolArray::Sparse(arr) => BoolArray::Sparse(arr.gather(indexes)),
		}
	}

	pub fn load_factor(&self) -> f32 {
		match self {
			BoolArray::Dense {
				..
			} => 1.0,
			BoolArray::Sparse(arr) => arr.load_factor(),
		}
	}

	pub fn binary_search(&self, start: usize, end: usize, value: bool) -> Result<usize, usize> {
		let mut low = start;
		let mut high = end;
		while low < high {
			let mid = (low + high) / 2;
			match self.get(mid).cmp(&value) {
				Ordering::Less => low = mid + 1,
				Ordering::Greater => high = mid,
				Ordering::Equal => return Ok(mid),
			}
		}
		Err(low)
	}
}
