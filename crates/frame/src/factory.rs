// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::sync::{Arc, RwLock};

use tabula_array::{Array, SortOrder};
use tabula_index::Index;
use tabula_type::{
	Result, Type, Value, err,
	error::diagnostic::frame,
};

use crate::{Frame, FrameContent, Key};

/// The column registrations collected by [`Frame::from_columns`].
pub struct Columns<C: Key> {
	row_count: usize,
	entries: Vec<(C, Array)>,
}

impl<C: Key> Columns<C> {
	/// A default-filled column of the given element type.
	pub fn add(&mut self, key: C, ty: Type) -> &mut Self {
		self.entries.push((key, Array::of(ty, self.row_count)));
		self
	}

	/// A column filled from values, which must cover every row.
	pub fn add_values(&mut self, key: C, ty: Type, values: &[Value]) -> Result<&mut Self> {
		if values.len() != self.row_count {
			return err!(frame::ordinal_out_of_bounds("row", values.len(), self.row_count));
		}
		self.entries.push((key, Array::from_values(ty, values)?));
		Ok(self)
	}

	/// A column backed by an existing array.
	pub fn add_array(&mut self, key: C, array: Array) -> Result<&mut Self> {
		if array.len() != self.row_count {
			return err!(frame::ordinal_out_of_bounds("row", array.len(), self.row_count));
		}
		self.entries.push((key, array));
		Ok(self)
	}
}

impl<R: Key, C: Key> Frame<R, C> {
	pub fn empty() -> Frame<R, C> {
		Frame::new(FrameContent::new(Index::empty(), Index::empty(), Vec::new()))
	}

	/// A frame over the given keys with every column of one element
	/// type, default-filled.
	pub fn of(
		row_keys: impl IntoIterator<Item = R>,
		col_keys: impl IntoIterator<Item = C>,
		ty: Type,
	) -> Result<Frame<R, C>> {
		let rows = Index::of(row_keys)?;
		let cols = Index::of(col_keys)?;
		let data = (0..cols.len())
			.map(|_| Arc::new(RwLock::new(Array::of(ty, rows.len()))))
			.collect();
		Ok(Frame::new(FrameContent::new(rows, cols, data)))
	}

	/// A frame built from typed column registrations.
	pub fn from_columns(
		row_keys: impl IntoIterator<Item = R>,
		configure: impl FnOnce(&mut Columns<C>) -> Result<()>,
	) -> Result<Frame<R, C>> {
		let rows = Index::of(row_keys)?;
		let mut columns = Columns {
			row_count: rows.len(),
			entries: Vec::new(),
		};
		configure(&mut columns)?;
		let mut cols = Index::with_capacity(columns.entries.len());
		let mut data = Vec::with_capacity(columns.entries.len());
		for (key, array) in columns.entries {
			if !cols.add(key.clone())? {
				return err!(tabula_type::error::diagnostic::index::duplicate_key(key));
			}
			data.push(Arc::new(RwLock::new(array)));
		}
		Ok(Frame::new(FrameContent::new(rows, cols, data)))
	}

	/// Overlays the frames, first non-null value winning per cell; the
	/// result carries the union of keys and is sorted ascending by row
	/// key (part of the contract, matching the source behavior).
	pub fn combine_first(frames: &[Frame<R, C>]) -> Result<Frame<R, C>> {
		let first = match frames.first() {
			Some(first) => first,
			None => return err!(frame::empty_frame("combine_first")),
		};
		let mut combined = first.copy()?;
		for other in &frames[1..] {
			let missing_rows: Vec<R> = other
				.rows()
				.keys()
				.filter(|k| !combined.content().rows().contains(k))
				.cloned()
				.collect();
			for key in missing_rows {
				combined.content_mut().add_row(key)?;
			}
			for col_ordinal in 0..other.col_count() {
				let key = other.content().cols().key_at(col_ordinal)?.clone();
				if !combined.content().cols().contains(&key) {
					let ty = other.content().column_type(col_ordinal)?;
					combined.content_mut().add_column(key, ty)?;
				}
			}
			// earlier frames win: only null cells take the new value
			for row_ordinal in 0..other.row_count() {
				let row_key = other.content().rows().key_at(row_ordinal)?.clone();
				for col_ordinal in 0..other.col_count() {
					let col_key = other.content().cols().key_at(col_ordinal)?;
					let value = other.value_at(row_ordinal, col_ordinal)?;
					if value.is_undefined() {
						continue;
					}
					if combined.value(&row_key, col_key)?.is_undefined() {
						combined.set_value(&row_key, col_key, &value)?;
					}
				}
			}
		}
		combined.rows_mut().sort(Some(SortOrder::Asc))?;
		Ok(combined)
	}

	/// Stacks frames vertically. Row keys must stay distinct; columns
	/// union, cells null where a frame lacks the column.
	pub fn concat_rows(frames: &[Frame<R, C>]) -> Result<Frame<R, C>> {
		let first = match frames.first() {
			Some(first) => first,
			None => return err!(frame::empty_frame("concat_rows")),
		};
		let mut combined = first.copy()?;
		for other in &frames[1..] {
			for key in other.rows().keys() {
				if combined.content().rows().contains(key) {
					return err!(tabula_type::error::diagnostic::index::duplicate_key(
						key.clone()
					));
				}
			}
			combined.update(other, true, true)?;
		}
		Ok(combined)
	}

	/// Joins frames horizontally over the first frame's rows. Column
	/// keys must stay distinct; values align by row key.
	pub fn concat_cols(frames: &[Frame<R, C>]) -> Result<Frame<R, C>> {
		let first = match frames.first() {
			Some(first) => first,
			None => return err!(frame::empty_frame("concat_cols")),
		};
		let mut combined = first.copy()?;
		for other in &frames[1..] {
			for key in other.cols().keys() {
				if combined.content().cols().contains(key) {
					return err!(tabula_type::error::diagnostic::index::duplicate_key(
						key.clone()
					));
				}
			}
			combined.update(other, false, true)?;
		}
		Ok(combined)
	}
}

/// The adapter hook for tabular result sets: anything exposing named,
/// typed columns and value rows can load into a frame. Implementations
/// map their native types onto the element-type set (SQL integers to
/// Int4/Int8, decimals and floats to Float8, character data to Utf8,
/// dates and timestamps to the temporal types).
pub trait TabularSource {
	/// Column names and element types, in column order.
	fn columns(&self) -> Vec<(String, Type)>;

	/// Streams every row to the consumer as one value per column.
	fn for_each_row(&mut self, consumer: &mut dyn FnMut(&[Value]) -> Result<()>) -> Result<()>;
}

impl<R: Key> Frame<R, String> {
	/// Loads a tabular source, deriving each row's key from its ordinal
	/// and values.
	pub fn from_source(
		source: &mut dyn TabularSource,
		capacity: usize,
		row_key: impl Fn(usize, &[Value]) -> R,
	) -> Result<Frame<R, String>> {
		let columns = source.columns();
		let mut row_keys: Vec<R> = Vec::with_capacity(capacity);
		let mut values: Vec<Vec<Value>> = columns.iter().map(|_| Vec::with_capacity(capacity)).collect();
		let mut ordinal = 0usize;
		source.for_each_row(&mut |row| {
			row_keys.push(row_key(ordinal, row));
			for (slot, column) in values.iter_mut().enumerate() {
				column.push(row.get(slot).cloned().unwrap_or(Value::Undefined));
			}
			ordinal += 1;
			Ok(())
		})?;
		Frame::from_columns(row_keys, |cols| {
			for ((name, ty), column) in columns.into_iter().zip(values) {
				cols.add_values(name, ty, &column)?;
			}
			Ok(())
		})
	}
}
