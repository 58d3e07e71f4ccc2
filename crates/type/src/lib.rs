// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Core value model for the tabula engine: element types, owned cell
//! values, temporal primitives, ordered floats, the copy-on-write
//! vectors every dense storage is built on, and the diagnostic error
//! system shared by all tabula crates.

pub mod error;
pub mod util;
pub mod value;

pub use error::{Error, Result, diagnostic};
pub use util::{BitVec, CowVec};
pub use value::{
	Date, DateTime, OrderedF64, Time, Type, Value, Zoned,
	parse::{self, DEFAULT_NULL_LITERALS},
	zone,
};
