// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::sync::{Arc, RwLock};

use tabula_array::Array;
use tabula_index::{Index, Key};
use tabula_type::{
	Result, Type, Value, err,
	error::diagnostic::frame,
};

/// A column's storage, shared between a frame and its filter views.
/// Element writes through a view land in the same array the parent
/// reads. The engine's bulk operations partition ordinals disjointly,
/// which is what makes concurrent writes safe.
pub type ColumnStore = Arc<RwLock<Array>>;

/// The composition of a row index, a column index and one typed array
/// per column. Storage is addressed by coordinates, so filter views and
/// sorted axes translate ordinals without touching the arrays.
///
/// A transposed content swaps the roles of the two indexes; storage
/// stays keyed by the original column coordinates, which the transposed
/// side sees as row coordinates.
#[derive(Clone, Debug)]
pub struct FrameContent<R: Key, C: Key> {
	rows: Index<R>,
	cols: Index<C>,
	data: Vec<ColumnStore>,
	transposed: bool,
	view: bool,
}

impl<R: Key, C: Key> FrameContent<R, C> {
	pub fn new(rows: Index<R>, cols: Index<C>, data: Vec<ColumnStore>) -> Self {
		Self {
			rows,
			cols,
			data,
			transposed: false,
			view: false,
		}
	}

	pub(crate) fn from_parts(
		rows: Index<R>,
		cols: Index<C>,
		data: Vec<ColumnStore>,
		transposed: bool,
		view: bool,
	) -> Self {
		Self {
			rows,
			cols,
			data,
			transposed,
			view,
		}
	}

	pub fn rows(&self) -> &Index<R> {
		&self.rows
	}

	pub fn cols(&self) -> &Index<C> {
		&self.cols
	}

	pub(crate) fn rows_mut(&mut self) -> &mut Index<R> {
		&mut self.rows
	}

	pub(crate) fn cols_mut(&mut self) -> &mut Index<C> {
		&mut self.cols
	}

	pub fn row_count(&self) -> usize {
		self.rows.len()
	}

	pub fn col_count(&self) -> usize {
		self.cols.len()
	}

	pub fn is_view(&self) -> bool {
		self.view
	}

	pub fn is_transposed(&self) -> bool {
		self.transposed
	}

	pub(crate) fn stores(&self) -> &[ColumnStore] {
		&self.data
	}

	pub fn row_coordinate_at(&self, row_ordinal: usize) -> Result<usize> {
		self.rows.coordinate_at(row_ordinal).map_err(|_| {
			tabula_type::error!(frame::ordinal_out_of_bounds("row", row_ordinal, self.rows.len()))
		})
	}

	pub fn col_coordinate_at(&self, col_ordinal: usize) -> Result<usize> {
		self.cols.coordinate_at(col_ordinal).map_err(|_| {
			tabula_type::error!(frame::ordinal_out_of_bounds("col", col_ordinal, self.cols.len()))
		})
	}

	/// The storage and the slot inside it for a coordinate pair.
	pub(crate) fn storage_slot(&self, row_coordinate: usize, col_coordinate: usize) -> (&ColumnStore, usize) {
		if self.transposed {
			(&self.data[row_coordinate], col_coordinate)
		} else {
			(&self.data[col_coordinate], row_coordinate)
		}
	}

	/// The storage backing a column ordinal (row ordinal when
	/// transposed storage applies).
	pub(crate) fn storage_of_col(&self, col_ordinal: usize) -> Result<&ColumnStore> {
		if self.transposed {
			// every transposed storage shares the element type; any
			// representative works for type queries only
			let coordinate = self.col_coordinate_at(col_ordinal)?;
			let _ = coordinate;
			self.data.first().ok_or_else(|| {
				tabula_type::error!(frame::empty_frame("storage_of_col"))
			})
		} else {
			let coordinate = self.col_coordinate_at(col_ordinal)?;
			Ok(&self.data[coordinate])
		}
	}

	pub fn column_type(&self, col_ordinal: usize) -> Result<Type> {
		let store = self.storage_of_col(col_ordinal)?;
		Ok(store.read().expect("column lock").element_type())
	}

	/// Reads through coordinates directly, bypassing ordinal
	/// translation; the sort drivers address rows this way.
	pub fn value_at_coords(&self, row_coordinate: usize, col_coordinate: usize) -> Result<Value> {
		let (store, slot) = self.storage_slot(row_coordinate, col_coordinate);
		store.read().expect("column lock").get_value(slot)
	}

	pub fn value_at(&self, row_ordinal: usize, col_ordinal: usize) -> Result<Value> {
		let row_coordinate = self.row_coordinate_at(row_ordinal)?;
		let col_coordinate = self.col_coordinate_at(col_ordinal)?;
		let (store, slot) = self.storage_slot(row_coordinate, col_coordinate);
		store.read().expect("column lock").get_value(slot)
	}

	pub fn set_value_at(&self, row_ordinal: usize, col_ordinal: usize, value: &Value) -> Result<Value> {
		let row_coordinate = self.row_coordinate_at(row_ordinal)?;
		let col_coordinate = self.col_coordinate_at(col_ordinal)?;
		let (store, slot) = self.storage_slot(row_coordinate, col_coordinate);
		store.write().expect("column lock").set_value(slot, value)
	}

	pub fn is_null_at(&self, row_ordinal: usize, col_ordinal: usize) -> Result<bool> {
		let row_coordinate = self.row_coordinate_at(row_ordinal)?;
		let col_coordinate = self.col_coordinate_at(col_ordinal)?;
		let (store, slot) = self.storage_slot(row_coordinate, col_coordinate);
		Ok(store.read().expect("column lock").is_null(slot))
	}

	/// Appends a row key; every column grows by one default-valued
	/// slot. Returns false when the key is already present.
	pub fn add_row(&mut self, key: R) -> Result<bool> {
		if self.view || self.transposed {
			return err!(frame::view_mutation("add_row"));
		}
		if !self.rows.add(key)? {
			return Ok(false);
		}
		let new_length = self.rows.len();
		for store in &self.data {
			store.write().expect("column lock").expand(new_length);
		}
		Ok(true)
	}

	/// Appends a column of the given element type, default-filled to
	/// the current row count.
	pub fn add_column(&mut self, key: C, ty: Type) -> Result<bool> {
		if self.view || self.transposed {
			return err!(frame::view_mutation("add_column"));
		}
		if !self.cols.add(key)? {
			return Ok(false);
		}
		self.data.push(Arc::new(RwLock::new(Array::of(ty, self.rows.len()))));
		Ok(true)
	}

	/// Appends a column backed by an existing array, which must cover
	/// the current row count.
	pub fn add_column_array(&mut self, key: C, array: Array) -> Result<bool> {
		if self.view || self.transposed {
			return err!(frame::view_mutation("add_column_array"));
		}
		if array.len() != self.rows.len() {
			return err!(frame::ordinal_out_of_bounds("row", array.len(), self.rows.len()));
		}
		if !self.cols.add(key)? {
			return Ok(false);
		}
		self.data.push(Arc::new(RwLock::new(array)));
		Ok(true)
	}

	/// Rewrites a column key in place; storage and ordinals survive.
	pub fn rename_col(&mut self, existing: &C, replacement: C) -> Result<usize> {
		self.cols.replace(existing, replacement)
	}

	/// Swaps out the storage behind a column ordinal.
	pub(crate) fn replace_store(&mut self, col_ordinal: usize, array: Array) -> Result<()> {
		if self.view || self.transposed {
			return err!(frame::view_mutation("replace_store"));
		}
		if array.len() != self.rows.len() {
			return err!(frame::ordinal_out_of_bounds("row", array.len(), self.rows.len()));
		}
		let coordinate = self.col_coordinate_at(col_ordinal)?;
		self.data[coordinate] = Arc::new(RwLock::new(array));
		Ok(())
	}

	/// A view restricted to the given keys; storage is shared with the
	/// parent, structural mutation is rejected.
	pub fn filter(&self, row_keys: Option<Vec<R>>, col_keys: Option<Vec<C>>) -> Result<FrameContent<R, C>> {
		let rows = match row_keys {
			Some(keys) => self.rows.filter(keys)?,
			None => self.rows.clone(),
		};
		let cols = match col_keys {
			Some(keys) => self.cols.filter(keys)?,
			None => self.cols.clone(),
		};
		Ok(FrameContent {
			rows,
			cols,
			data: self.data.clone(),
			transposed: self.transposed,
			view: true,
		})
	}

	pub fn filter_ordinals(&self, row_ordinals: Option<&[usize]>, col_ordinals: Option<&[usize]>) -> Result<FrameContent<R, C>> {
		let row_keys = match row_ordinals {
			Some(ordinals) => Some(
				ordinals
					.iter()
					.map(|&o| self.rows.key_at(o).cloned())
					.collect::<Result<Vec<_>>>()?,
			),
			None => None,
		};
		let col_keys = match col_ordinals {
			Some(ordinals) => Some(
				ordinals
					.iter()
					.map(|&o| self.cols.key_at(o).cloned())
					.collect::<Result<Vec<_>>>()?,
			),
			None => None,
		};
		self.filter(row_keys, col_keys)
	}

	/// The single element type all columns share, or an error.
	pub fn uniform_type(&self) -> Result<Type> {
		let mut uniform = None;
		for col_ordinal in 0..self.col_count() {
			let ty = self.column_type(col_ordinal)?;
			match uniform {
				None => uniform = Some(ty),
				Some(seen) if seen == ty => {}
				Some(_) => return err!(frame::transpose_mixed_types()),
			}
		}
		uniform.ok_or_else(|| tabula_type::error!(frame::empty_frame("uniform_type")))
	}

	/// The logical transpose: indexes swap roles, storage stays put.
	pub fn transpose(&self) -> Result<FrameContent<C, R>> {
		self.uniform_type()?;
		Ok(FrameContent {
			rows: self.cols.clone(),
			cols: self.rows.clone(),
			data: self.data.clone(),
			transposed: !self.transposed,
			view: true,
		})
	}

	/// Deep copy: detached indexes in current ordinal order and fresh
	/// arrays per column, each keeping its element type and style.
	pub fn deep_copy(&self) -> Result<FrameContent<R, C>> {
		let rows = self.rows.copy(true);
		let cols = self.cols.copy(true);
		let mut data = Vec::with_capacity(self.col_count());
		let row_coordinates: Vec<usize> =
			(0..self.row_count()).map(|o| self.row_coordinate_at(o)).collect::<Result<Vec<_>>>()?;
		for col_ordinal in 0..self.col_count() {
			if self.transposed {
				// a transposed copy materializes column-major storage
				let ty = self.column_type(col_ordinal)?;
				let mut array = Array::of(ty, self.row_count());
				for row_ordinal in 0..self.row_count() {
					let value = self.value_at(row_ordinal, col_ordinal)?;
					array.set_value(row_ordinal, &value)?;
				}
				data.push(Arc::new(RwLock::new(array)));
			} else {
				let col_coordinate = self.col_coordinate_at(col_ordinal)?;
				let source = self.data[col_coordinate].read().expect("column lock");
				data.push(Arc::new(RwLock::new(source.copy_indexes(&row_coordinates))));
			}
		}
		Ok(FrameContent {
			rows,
			cols,
			data,
			transposed: false,
			view: false,
		})
	}
}

#[cfg(test)]
mod tests {
	use tabula_index::Index;

	use super::*;

	fn content() -> FrameContent<i32, &'static str> {
		let rows = Index::of([1, 2, 3]).unwrap();
		let cols = Index::of(["a", "b"]).unwrap();
		let data = vec![
			Arc::new(RwLock::new(Array::of(Type::Float8, 3))),
			Arc::new(RwLock::new(Array::of(Type::Float8, 3))),
		];
		FrameContent::new(rows, cols, data)
	}

	#[test]
	fn test_coordinate_translation() {
		let content = content();
		assert_eq!(content.row_coordinate_at(1).unwrap(), 1);
		assert!(content.row_coordinate_at(9).is_err());
	}

	#[test]
	fn test_cell_round_trip() {
		let content = content();
		content.set_value_at(0, 1, &Value::float8(2.5)).unwrap();
		assert_eq!(content.value_at(0, 1).unwrap(), Value::float8(2.5));
		assert!(content.is_null_at(1, 1).unwrap());
	}

	#[test]
	fn test_add_column_grows_to_row_count() {
		let mut content = content();
		content.add_column("c", Type::Int8).unwrap();
		assert_eq!(content.col_count(), 3);
		assert_eq!(content.value_at(2, 2).unwrap(), Value::Int8(0));
	}

	#[test]
	fn test_add_row_expands_storage() {
		let mut content = content();
		content.add_row(4).unwrap();
		assert_eq!(content.row_count(), 4);
		assert!(content.is_null_at(3, 0).unwrap());
	}

	#[test]
	fn test_filter_view_shares_storage() {
		let mut content = content();
		let view = content.filter(Some(vec![2, 3]), None).unwrap();
		assert!(view.is_view());
		assert_eq!(view.row_count(), 2);
		// a write through the view lands in the parent
		view.set_value_at(0, 0, &Value::float8(9.0)).unwrap();
		assert_eq!(content.value_at(1, 0).unwrap(), Value::float8(9.0));
		// structural mutation on the view is rejected
		assert!(view.clone().add_row(9).is_err());
		assert!(content.add_row(5).is_ok());
	}

	#[test]
	fn test_transpose_swaps_axes() {
		let content = content();
		content.set_value_at(2, 0, &Value::float8(7.0)).unwrap();
		let transposed = content.transpose().unwrap();
		assert_eq!(transposed.row_count(), 2);
		assert_eq!(transposed.col_count(), 3);
		assert_eq!(transposed.value_at(0, 2).unwrap(), Value::float8(7.0));
		let back = transposed.transpose().unwrap();
		assert_eq!(back.value_at(2, 0).unwrap(), Value::float8(7.0));
	}

	#[test]
	fn test_rename_col_keeps_storage() {
		let mut content = content();
		content.set_value_at(0, 0, &Value::float8(1.0)).unwrap();
		content.rename_col(&"a", "alpha").unwrap();
		assert_eq!(content.cols().key_at(0).unwrap(), &"alpha");
		assert_eq!(content.value_at(0, 0).unwrap(), Value::float8(1.0));
	}
}
