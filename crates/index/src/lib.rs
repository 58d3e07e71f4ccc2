// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! The keyed, ordered index behind each frame axis: insertion-ordered
//! keys, O(1) key -> coordinate lookup, permutation-only sorting, and
//! non-owning filter views bound to a parent's coordinate space.

use std::{cmp::Ordering, fmt::Debug, hash::Hash};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tabula_type::{
	CowVec, Result, err,
	error::diagnostic::index,
};

mod binary;

pub use binary::BinaryKey;
pub use tabula_array::SortOrder;

/// The bound every axis key satisfies. Generics stand in for the
/// per-key-type index specializations of a class hierarchy.
pub trait Key: Clone + Eq + Hash + Ord + Debug + Send + Sync + 'static {}

impl<T: Clone + Eq + Hash + Ord + Debug + Send + Sync + 'static> Key for T {}

/// A bidirectional keyed index.
///
/// Coordinates are slots in the root's key vector and never move for
/// the life of the root; ordinals are visible positions and change
/// under sorting and filtering. A filter view shares the root's key
/// storage and coordinate space but rejects structural mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Index<K: Key> {
	/// coordinate -> key; shared with views via copy-on-write
	keys: CowVec<K>,
	/// key -> coordinate; a view holds only its own keys
	map: FxHashMap<K, usize>,
	/// ordinal -> coordinate; `None` is the identity permutation
	order: Option<CowVec<usize>>,
	/// coordinate -> ordinal, maintained alongside `order`
	ordinals: Option<FxHashMap<usize, usize>>,
	/// a view's creation-time permutation, restored by `sort(None)`
	base: Option<CowVec<usize>>,
	view: bool,
}

impl<K: Key> Index<K> {
	pub fn empty() -> Self {
		Self::with_capacity(0)
	}

	pub fn with_capacity(capacity: usize) -> Self {
		let mut map = FxHashMap::default();
		map.reserve(capacity);
		Self {
			keys: CowVec::with_capacity(capacity),
			map,
			order: None,
			ordinals: None,
			base: None,
			view: false,
		}
	}

	pub fn of(keys: impl IntoIterator<Item = K>) -> Result<Self> {
		let mut this = Self::empty();
		this.add_all(keys, false)?;
		Ok(this)
	}

	pub fn len(&self) -> usize {
		match &self.order {
			Some(order) => order.len(),
			None => self.keys.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn is_view(&self) -> bool {
		self.view
	}

	/// Adds a key; false when the key is already present.
	pub fn add(&mut self, key: K) -> Result<bool> {
		if self.view {
			return err!(index::view_mutation("add"));
		}
		if self.map.contains_key(&key) {
			return Ok(false);
		}
		let coordinate = self.keys.len();
		self.keys.push(key.clone());
		self.map.insert(key, coordinate);
		if let Some(order) = &mut self.order {
			order.push(coordinate);
			if let Some(ordinals) = &mut self.ordinals {
				ordinals.insert(coordinate, order.len() - 1);
			}
		}
		Ok(true)
	}

	/// Adds every key, returning how many were new. A duplicate raises
	/// unless `ignore_duplicates` is set.
	pub fn add_all(&mut self, keys: impl IntoIterator<Item = K>, ignore_duplicates: bool) -> Result<usize> {
		let mut added = 0;
		for key in keys {
			if self.add(key.clone())? {
				added += 1;
			} else if !ignore_duplicates {
				return err!(index::duplicate_key(key));
			}
		}
		Ok(added)
	}

	/// Rewrites a key in place; the coordinate (and ordinal) survive.
	pub fn replace(&mut self, existing: &K, replacement: K) -> Result<usize> {
		if self.view {
			return err!(index::view_mutation("replace"));
		}
		let coordinate = match self.map.remove(existing) {
			Some(coordinate) => coordinate,
			None => return err!(index::unknown_key(existing)),
		};
		if self.map.contains_key(&replacement) {
			self.map.insert(existing.clone(), coordinate);
			return err!(index::replacement_exists(replacement));
		}
		self.keys.set(coordinate, replacement.clone());
		self.map.insert(replacement, coordinate);
		Ok(coordinate)
	}

	pub fn contains(&self, key: &K) -> bool {
		self.map.contains_key(key)
	}

	pub fn contains_all<'a>(&self, keys: impl IntoIterator<Item = &'a K>) -> bool {
		keys.into_iter().all(|key| self.contains(key))
	}

	/// The stable storage slot of the key, or None when absent. A view
	/// reports its parent's coordinate.
	pub fn coordinate(&self, key: &K) -> Option<usize> {
		self.map.get(key).copied()
	}

	pub fn coordinate_at(&self, ordinal: usize) -> Result<usize> {
		if ordinal >= self.len() {
			return err!(index::ordinal_out_of_bounds(ordinal, self.len()));
		}
		Ok(match &self.order {
			Some(order) => order[ordinal],
			None => ordinal,
		})
	}

	pub fn key_at(&self, ordinal: usize) -> Result<&K> {
		let coordinate = self.coordinate_at(ordinal)?;
		Ok(&self.keys[coordinate])
	}

	/// The key stored at a coordinate, regardless of visibility.
	pub fn key_of_coordinate(&self, coordinate: usize) -> Option<&K> {
		self.keys.get(coordinate)
	}

	pub fn ordinal_of_coordinate(&self, coordinate: usize) -> Option<usize> {
		match &self.ordinals {
			Some(ordinals) => ordinals.get(&coordinate).copied(),
			None => {
				if coordinate < self.keys.len() {
					Some(coordinate)
				} else {
					None
				}
			}
		}
	}

	pub fn ordinal_of(&self, key: &K) -> Option<usize> {
		self.coordinate(key).and_then(|c| self.ordinal_of_coordinate(c))
	}

	pub fn first(&self) -> Option<&K> {
		self.key_at(0).ok()
	}

	pub fn last(&self) -> Option<&K> {
		if self.is_empty() {
			None
		} else {
			self.key_at(self.len() - 1).ok()
		}
	}

	/// The key at the ordinal before `key`, if any.
	pub fn previous_key(&self, key: &K) -> Option<&K> {
		let ordinal = self.ordinal_of(key)?;
		if ordinal == 0 {
			None
		} else {
			self.key_at(ordinal - 1).ok()
		}
	}

	pub fn next_key(&self, key: &K) -> Option<&K> {
		let ordinal = self.ordinal_of(key)?;
		self.key_at(ordinal + 1).ok()
	}

	pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
		(0..self.len()).map(move |ordinal| self.key_at(ordinal).expect("ordinal in range"))
	}

	pub fn for_each_entry(&self, mut consumer: impl FnMut(&K, usize)) {
		for ordinal in 0..self.len() {
			let coordinate = self.coordinate_at(ordinal).expect("ordinal in range");
			consumer(&self.keys[coordinate], coordinate);
		}
	}

	/// The root this view's coordinates resolve against: its full key
	/// vector, shared copy-on-write.
	fn root_keys(&self) -> CowVec<K> {
		self.keys.clone()
	}

	fn view_of(&self, coordinates: Vec<usize>) -> Index<K> {
		let mut map = FxHashMap::default();
		map.reserve(coordinates.len());
		let mut ordinals = FxHashMap::default();
		ordinals.reserve(coordinates.len());
		for (ordinal, &coordinate) in coordinates.iter().enumerate() {
			map.insert(self.keys[coordinate].clone(), coordinate);
			ordinals.insert(coordinate, ordinal);
		}
		let order = CowVec::new(coordinates);
		Index {
			keys: self.root_keys(),
			map,
			order: Some(order.clone()),
			ordinals: Some(ordinals),
			base: Some(order),
			view: true,
		}
	}

	/// A filter view over the given keys, in the iterable's order.
	/// Unknown keys raise.
	pub fn filter(&self, keys: impl IntoIterator<Item = K>) -> Result<Index<K>> {
		let mut coordinates = Vec::new();
		for key in keys {
			match self.coordinate(&key) {
				Some(coordinate) => coordinates.push(coordinate),
				None => return err!(index::unknown_key(key)),
			}
		}
		Ok(self.view_of(coordinates))
	}

	/// A filter view over the keys matching the predicate, in this
	/// index's ordinal order.
	pub fn filter_by(&self, mut predicate: impl FnMut(&K) -> bool) -> Index<K> {
		let mut coordinates = Vec::new();
		for ordinal in 0..self.len() {
			let coordinate = self.coordinate_at(ordinal).expect("ordinal in range");
			if predicate(&self.keys[coordinate]) {
				coordinates.push(coordinate);
			}
		}
		self.view_of(coordinates)
	}

	/// The keys present in both indexes, in this index's order, as a
	/// view over this index.
	pub fn intersect(&self, other: &Index<K>) -> Index<K> {
		self.filter_by(|key| other.contains(key))
	}

	/// A shallow copy shares storage; a deep copy detaches into a new
	/// root whose coordinates follow the current ordinal order.
	pub fn copy(&self, deep: bool) -> Index<K> {
		if !deep {
			return self.clone();
		}
		let mut copy = Index::with_capacity(self.len());
		for ordinal in 0..self.len() {
			let key = self.key_at(ordinal).expect("ordinal in range").clone();
			copy.add(key).expect("distinct keys");
		}
		copy
	}

	/// The current ordinal -> coordinate permutation, materialized.
	pub fn order_snapshot(&self) -> Vec<usize> {
		match &self.order {
			Some(order) => order.to_vec(),
			None => (0..self.keys.len()).collect(),
		}
	}

	/// Installs a permutation computed elsewhere (the frame's sort
	/// driver). Must be a permutation of the current coordinates.
	pub fn set_order(&mut self, coordinates: Vec<usize>) -> Result<()> {
		if coordinates.len() != self.len() {
			return err!(index::ordinal_out_of_bounds(coordinates.len(), self.len()));
		}
		let mut ordinals = FxHashMap::default();
		ordinals.reserve(coordinates.len());
		for (ordinal, &coordinate) in coordinates.iter().enumerate() {
			ordinals.insert(coordinate, ordinal);
		}
		self.order = Some(CowVec::new(coordinates));
		self.ordinals = Some(ordinals);
		Ok(())
	}

	/// Sorts the visible keys; `None` restores the identity permutation
	/// (a view's creation order).
	pub fn sort(&mut self, order: Option<SortOrder>) -> Result<()> {
		match order {
			Some(order) => self.sort_by(move |a, b| {
				if order.descending() {
					b.cmp(a)
				} else {
					a.cmp(b)
				}
			}),
			None => {
				match (&self.base, self.view) {
					(Some(base), _) => {
						let base = base.clone();
						self.set_order(base.to_vec())?;
					}
					(None, false) => {
						self.order = None;
						self.ordinals = None;
					}
					(None, true) => {}
				}
				Ok(())
			}
		}
	}

	pub fn sort_by(&mut self, comparator: impl Fn(&K, &K) -> Ordering) -> Result<()> {
		let mut coordinates = self.order_snapshot();
		coordinates.sort_by(|&a, &b| comparator(&self.keys[a], &self.keys[b]));
		self.set_order(coordinates)
	}
}

impl<K: Key> PartialEq for Index<K> {
	/// Two indexes are equal when they present the same key sequence.
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.keys().eq(other.keys())
	}
}

impl<K: Key> Default for Index<K> {
	fn default() -> Self {
		Self::empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_add_and_lookup() {
		let mut index = Index::empty();
		assert!(index.add(10).unwrap());
		assert!(index.add(20).unwrap());
		assert!(!index.add(10).unwrap());
		assert_eq!(index.len(), 2);
		assert!(index.contains(&20));
		assert_eq!(index.coordinate(&20), Some(1));
		assert_eq!(index.ordinal_of(&20), Some(1));
	}

	#[test]
	fn test_add_all_duplicate_raises() {
		let mut index = Index::of([1, 2, 3]).unwrap();
		let err = index.add_all([4, 2], false).unwrap_err();
		assert_eq!(err.code(), "INDEX_001");
		// ignore_duplicates counts only the new keys
		assert_eq!(index.add_all([4, 2, 5], true).unwrap(), 2);
	}

	#[test]
	fn test_replace_keeps_coordinate_and_ordinal() {
		let mut index = Index::of([10, 20, 30]).unwrap();
		let coordinate = index.coordinate(&20).unwrap();
		let replaced = index.replace(&20, 25).unwrap();
		assert_eq!(replaced, coordinate);
		assert!(!index.contains(&20));
		assert!(index.contains(&25));
		assert_eq!(index.ordinal_of(&25), Some(1));
		assert_eq!(index.coordinate(&25), Some(coordinate));
	}

	#[test]
	fn test_replace_failures() {
		let mut index = Index::of([10, 20]).unwrap();
		assert_eq!(index.replace(&99, 1).unwrap_err().code(), "INDEX_002");
		assert_eq!(index.replace(&10, 20).unwrap_err().code(), "INDEX_004");
		// failed replace leaves the index intact
		assert!(index.contains(&10));
		assert_eq!(index.ordinal_of(&10), Some(0));
	}

	#[test]
	fn test_filter_view_shares_coordinates() {
		let root = Index::of(["a", "b", "c", "d"]).unwrap();
		let view = root.filter(["d", "b"]).unwrap();
		assert!(view.is_view());
		assert_eq!(view.len(), 2);
		assert_eq!(view.key_at(0).unwrap(), &"d");
		assert_eq!(view.coordinate(&"d"), root.coordinate(&"d"));
		assert_eq!(view.ordinal_of(&"b"), Some(1));
		assert!(!view.contains(&"a"));
	}

	#[test]
	fn test_filter_unknown_key_raises() {
		let root = Index::of(["a", "b"]).unwrap();
		assert_eq!(root.filter(["z"]).unwrap_err().code(), "INDEX_002");
	}

	#[test]
	fn test_view_rejects_structural_mutation() {
		let root = Index::of([1, 2, 3]).unwrap();
		let mut view = root.filter_by(|k| *k > 1);
		assert_eq!(view.add(9).unwrap_err().code(), "INDEX_003");
		assert_eq!(view.replace(&2, 9).unwrap_err().code(), "INDEX_003");
	}

	#[test]
	fn test_view_ordinals_are_subsequence() {
		let root = Index::of([5, 6, 7, 8]).unwrap();
		let view = root.filter_by(|k| k % 2 == 0);
		let root_ordinals: Vec<usize> =
			view.keys().map(|k| root.ordinal_of(k).unwrap()).collect();
		let mut sorted = root_ordinals.clone();
		sorted.sort_unstable();
		assert_eq!(root_ordinals, sorted);
	}

	#[test]
	fn test_sort_and_restore() {
		let mut index = Index::of([30, 10, 20]).unwrap();
		index.sort(Some(SortOrder::Asc)).unwrap();
		assert_eq!(index.keys().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
		// coordinates survive sorting
		assert_eq!(index.coordinate(&30), Some(0));
		assert_eq!(index.ordinal_of(&30), Some(2));
		index.sort(None).unwrap();
		assert_eq!(index.keys().copied().collect::<Vec<_>>(), vec![30, 10, 20]);
	}

	#[test]
	fn test_view_sort_none_restores_creation_order() {
		let root = Index::of([3, 1, 2]).unwrap();
		let mut view = root.filter([2, 1]).unwrap();
		view.sort(Some(SortOrder::Asc)).unwrap();
		assert_eq!(view.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
		view.sort(None).unwrap();
		assert_eq!(view.keys().copied().collect::<Vec<_>>(), vec![2, 1]);
	}

	#[test]
	fn test_intersect() {
		let left = Index::of([1, 2, 3, 4]).unwrap();
		let right = Index::of([4, 2, 9]).unwrap();
		let both = left.intersect(&right);
		assert_eq!(both.keys().copied().collect::<Vec<_>>(), vec![2, 4]);
	}

	#[test]
	fn test_deep_copy_detaches() {
		let root = Index::of(["a", "b", "c"]).unwrap();
		let view = root.filter(["c", "a"]).unwrap();
		let mut detached = view.copy(true);
		assert!(!detached.is_view());
		assert_eq!(detached.coordinate(&"c"), Some(0));
		detached.add("z").unwrap();
		assert_eq!(detached.len(), 3);
		assert_eq!(view.len(), 2);
	}

	#[test]
	fn test_neighbors_and_bounds() {
		let index = Index::of([10, 20, 30]).unwrap();
		assert_eq!(index.first(), Some(&10));
		assert_eq!(index.last(), Some(&30));
		assert_eq!(index.previous_key(&20), Some(&10));
		assert_eq!(index.next_key(&30), None);
		assert_eq!(index.previous_key(&10), None);
		assert_eq!(index.key_at(5).unwrap_err().code(), "INDEX_005");
	}
}
