// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tabula_type::{CowVec, Zoned, zone};

use crate::{element::NULL_MILLIS, style::ArrayStyle};

/// Zoned timestamp storage, decomposed into an epoch-millisecond
/// payload and a parallel zone-code table so the hot path stays on a
/// primitive comparison. Comparison reads the payload only; equality
/// additionally requires a matching zone code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ZonedArray {
	Dense {
		payload: CowVec<i64>,
		zones: CowVec<u16>,
		default: Option<Zoned>,
		restore: Option<(CowVec<i64>, CowVec<u16>)>,
	},
	Sparse {
		payload: FxHashMap<usize, i64>,
		zones: FxHashMap<usize, u16>,
		length: usize,
		default: Option<Zoned>,
	},
}

impl ZonedArray {
	pub fn dense(length: usize, default: Option<Zoned>) -> Self {
		let (millis, code) = parts_of(&default);
		ZonedArray::Dense {
			payload: CowVec::new(vec![millis; length]),
			zones: CowVec::new(vec![code; length]),
			default,
			restore: None,
		}
	}

	pub fn sparse(length: usize, fill_hint: f32, default: Option<Zoned>) -> Self {
		let capacity = ((length as f32 * fill_hint) as usize).max(5);
		let mut payload = FxHashMap::default();
		payload.reserve(capacity);
		let mut zones = FxHashMap::default();
		zones.reserve(capacity);
		ZonedArray::Sparse {
			payload,
			zones,
			length,
			default,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			ZonedArray::Dense {
				payload, ..
			} => payload.len(),
			ZonedArray::Sparse {
				length, ..
			} => *length,
		}
	}

	pub fn style(&self) -> ArrayStyle {
		match self {
			ZonedArray::Dense {
				..
			} => ArrayStyle::Dense,
			ZonedArray::Sparse {
				..
			} => ArrayStyle::Sparse,
		}
	}

	pub fn default_value(&self) -> Option<Zoned> {
		match self {
			ZonedArray::Dense {
				default, ..
			} => *default,
			ZonedArray::Sparse {
				default, ..
			} => *default,
		}
	}

	fn default_parts(&self) -> (i64, u16) {
		parts_of(&self.default_value())
	}

	pub fn millis(&self, index: usize) -> i64 {
		match self {
			ZonedArray::Dense {
				payload, ..
			} => payload[index],
			ZonedArray::Sparse {
				payload, ..
			} => payload.get(&index).copied().unwrap_or(self.default_parts().0),
		}
	}

	pub fn zone_code(&self, index: usize) -> u16 {
		match self {
			ZonedArray::Dense {
				zones, ..
			} => zones[index],
			ZonedArray::Sparse {
				zones, ..
			} => zones.get(&index).copied().unwrap_or(self.default_parts().1),
		}
	}

	pub fn get(&self, index: usize) -> Option<Zoned> {
		let millis = self.millis(index);
		if millis == NULL_MILLIS {
			None
		} else {
			Some(Zoned::new(millis, self.zone_code(index)))
		}
	}

	pub fn is_null(&self, index: usize) -> bool {
		self.millis(index) == NULL_MILLIS
	}

	pub fn set(&mut self, index: usize, value: Option<Zoned>) -> Option<Zoned> {
		let old = self.get(index);
		let (millis, code) = parts_of(&value);
		let (default_millis, _) = self.default_parts();
		match self {
			ZonedArray::Dense {
				payload,
				zones,
				..
			} => {
				payload.set(index, millis);
				zones.set(index, code);
			}
			ZonedArray::Sparse {
				payload,
				zones,
				..
			} => {
				if millis == default_millis {
					payload.remove(&index);
					zones.remove(&index);
				} else {
					payload.insert(index, millis);
					zones.insert(index, code);
				}
			}
		}
		old
	}

	/// Writes the payload only, keeping the slot's zone (UTC when the
	/// slot had none).
	pub fn set_millis(&mut self, index: usize, millis: i64) -> i64 {
		let old = self.millis(index);
		let code = if self.is_null(index) {
			zone::UTC
		} else {
			self.zone_code(index)
		};
		let value = if millis == NULL_MILLIS {
			None
		} else {
			Some(Zoned::new(millis, code))
		};
		self.set(index, value);
		old
	}

	/// Swaps payload and zone metadata together.
	pub fn swap(&mut self, i: usize, j: usize) {
		if i == j {
			return;
		}
		let a = self.get(i);
		let b = self.get(j);
		self.set(i, b);
		self.set(j, a);
	}

	pub fn fill(&mut self, value: Option<Zoned>, start: usize, end: usize) {
		for index in start..end {
			self.set(index, value);
		}
	}

	pub fn expand(&mut self, new_length: usize) {
		match self {
			ZonedArray::Dense {
				payload,
				zones,
				default,
				..
			} => {
				let (millis, code) = parts_of(default);
				while payload.len() < new_length {
					payload.push(millis);
					zones.push(code);
				}
			}
			ZonedArray::Sparse {
				length, ..
			} => *length = (*length).max(new_length),
		}
	}

	/// Payload-only ordering; zones do not participate.
	pub fn compare(&self, i: usize, j: usize) -> Ordering {
		self.millis(i).cmp(&self.millis(j))
	}

	/// Payload equality plus matching zone code.
	pub fn is_equal_to(&self, index: usize, value: &Zoned) -> bool {
		self.millis(index) == value.millis() && !self.is_null(index) && self.zone_code(index) == value.zone_code()
	}

	pub fn sort_range(&mut self, start: usize, end: usize, descending: bool) {
		if let ZonedArray::Dense {
			payload,
			zones,
			restore,
			..
		} = self
		{
			if restore.is_none() {
				*restore = Some((payload.clone(), zones.clone()));
			}
		}
		// permutation sort so payload and zones move together
		let mut order: Vec<usize> = (start..end).collect();
		order.sort_by(|&a, &b| {
			let ord = self.millis(a).cmp(&self.millis(b));
			if descending {
				ord.reverse()
			} else {
				ord
			}
		});
		let snapshot: Vec<Option<Zoned>> = order.iter().map(|&i| self.get(i)).collect();
		for (offset, value) in snapshot.into_iter().enumerate() {
			self.set(start + offset, value);
		}
	}

	pub fn restore_order(&mut self) -> bool {
		match self {
			ZonedArray::Dense {
				payload,
				zones,
				restore,
				..
			} => match restore {
				Some((p, z)) => {
					*payload = p.clone();
					*zones = z.clone();
					true
				}
				None => false,
			},
			ZonedArray::Sparse {
				..
			} => false,
		}
	}

	pub fn copy_range(&self, start: usize, end: usize) -> Self {
		let mut copy = match self {
			ZonedArray::Dense {
				default, ..
			} => ZonedArray::dense(end - start, *default),
			ZonedArray::Sparse {
				default, ..
			} => ZonedArray::sparse(end - start, self.load_factor(), *default),
		};
		for index in start..end {
			copy.set(index - start, self.get(index));
		}
		copy
	}

	pub fn gather(&self, indexes: &[usize]) -> Self {
		let mut copy = match self {
			ZonedArray::Dense {
				default, ..
			} => ZonedArray::dense(indexes.len(), *default),
			ZonedArray::Sparse {
				default, ..
			} => ZonedArray::sparse(indexes.len(), self.load_factor(), *default),
		};
		for (slot, &index) in indexes.iter().enumerate() {
			let value = if index < self.len() {
				self.get(index)
			} else {
				self.default_value()
			};
			copy.set(slot, value);
		}
		copy
	}

	pub fn load_factor(&self) -> f32 {
		match self {
			ZonedArray::Dense {
				..
			} => 1.0,
			ZonedArray::Sparse {
				payload,
				length,
				..
			} => {
				if *length == 0 {
					0.0
				} else {
					payload.len() as f32 / *length as f32
				}
			}
		}
	}

	pub fn binary_search(&self, start: usize, end: usize, value: &Zoned) -> Result<usize, usize> {
		let target = value.millis();
		let mut low = start;
		let mut high = end;
		while low < high {
			let mid = (low + high) / 2;
			match self.millis(mid).cmp(&target) {
				Ordering::Less => low = mid + 1,
				Ordering::Greater => high = mid,
				Ordering::Equal => return Ok(mid),
			}
		}
		Err(low)
	}
}

fn parts_of(value: &Option<Zoned>) -> (i64, u16) {
	match value {
		Some(z) => (z.millis(), z.zone_code()),
		None => (NULL_MILLIS, zone::UTC),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn utc(millis: i64) -> Zoned {
		Zoned::utc(millis)
	}

	#[test]
	fn test_sparse_default_reads() {
		let arr = ZonedArray::sparse(4, 0.25, Some(utc(0)));
		assert_eq!(arr.get(3), Some(utc(0)));
		assert!(!arr.is_null(3));
	}

	#[test]
	fn test_equality_requires_zone() {
		// payload equal, zone differs
		let default: Zoned = "2020-01-01T00:00Z".parse().unwrap();
		let other: Zoned = "2020-01-01T00:00+05:00".parse().unwrap();
		let mut arr = ZonedArray::sparse(4, 0.25, Some(default));
		arr.set(1, Some(other));
		assert!(!arr.is_equal_to(1, &default));
		assert!(arr.is_equal_to(1, &other));
		assert_eq!(arr.get(3), Some(default));
	}

	#[test]
	fn test_swap_moves_zone_metadata() {
		let tokyo = Zoned::new(500, zone::code_of("Asia/Tokyo").unwrap());
		let mut arr = ZonedArray::dense(3, None);
		arr.set(0, Some(tokyo));
		arr.swap(0, 2);
		assert!(arr.is_null(0));
		assert_eq!(arr.get(2), Some(tokyo));
	}

	#[test]
	fn test_compare_is_payload_only() {
		let mut arr = ZonedArray::dense(2, None);
		arr.set(0, Some(Zoned::new(100, zone::code_of("+05:00").unwrap())));
		arr.set(1, Some(Zoned::new(100, zone::UTC)));
		assert_eq!(arr.compare(0, 1), Ordering::Equal);
	}

	#[test]
	fn test_sort_keeps_zone_with_payload() {
		let tokyo = zone::code_of("Asia/Tokyo").unwrap();
		let mut arr = ZonedArray::dense(3, None);
		arr.set(0, Some(Zoned::new(300, tokyo)));
		arr.set(1, Some(Zoned::new(100, zone::UTC)));
		arr.set(2, Some(Zoned::new(200, tokyo)));
		arr.sort_range(0, 3, false);
		// nulls would sort first via the MIN sentinel; here all set
		assert_eq!(arr.get(0), Some(Zoned::new(100, zone::UTC)));
		assert_eq!(arr.get(1), Some(Zoned::new(200, tokyo)));
		assert_eq!(arr.get(2), Some(Zoned::new(300, tokyo)));
		assert!(arr.restore_order());
		assert_eq!(arr.get(0), Some(Zoned::new(300, tokyo)));
	}

	#[test]
	fn test_set_millis_keeps_zone() {
		let tokyo = zone::code_of("Asia/Tokyo").unwrap();
		let mut arr = ZonedArray::dense(2, None);
		arr.set(0, Some(Zoned::new(100, tokyo)));
		arr.set_millis(0, 250);
		assert_eq!(arr.get(0), Some(Zoned::new(250, tokyo)));
		// null slot picks up UTC
		arr.set_millis(1, 50);
		assert_eq!(arr.get(1), Some(Zoned::new(50, zone::UTC)));
	}
}
