// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! tabula: an in-memory, typed, two-dimensional tabular data engine.
//! Rows and columns are addressed by typed keys; column storage is a
//! family of dense, sparse, range-mapped and coded typed arrays behind
//! a uniform surface; bulk operations run sequentially or under a
//! fork/join decomposition with identical results.

pub use tabula_array::{
	Array, ArrayBuilder, ArrayStyle, BoolArray, CodedArray, Coding, SortOrder, ZonedArray,
};
pub use tabula_frame::{
	Bounds, CellValue, Cols, ColsMut, Column, ColumnStore, Columns, Cursor, Frame, FrameContent,
	Grouping, Key, Row, Rows, RowsMut, Settings, SortCol, SortRow, Stats, TabularSource,
};
pub use tabula_index::{BinaryKey, Index};
pub use tabula_type::{
	Date, DateTime, Error, OrderedF64, Result, Time, Type, Value, Zoned, parse, zone,
};
