// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::io::{Read, Write};

use tabula_type::{Date, OrderedF64, Result, error::diagnostic::array};

use crate::{Index, Key};

/// Keys with a little-endian binary form, giving indexes the same
/// positional codec the arrays carry.
pub trait BinaryKey: Key {
	fn write<W: Write>(&self, writer: &mut W) -> Result<()>;

	fn read<R: Read>(reader: &mut R) -> Result<Self>;
}

impl BinaryKey for i32 {
	fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
		writer.write_all(&self.to_le_bytes())?;
		Ok(())
	}

	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		let mut buf = [0u8; 4];
		reader.read_exact(&mut buf)?;
		Ok(i32::from_le_bytes(buf))
	}
}

impl BinaryKey for i64 {
	fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
		writer.write_all(&self.to_le_bytes())?;
		Ok(())
	}

	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		let mut buf = [0u8; 8];
		reader.read_exact(&mut buf)?;
		Ok(i64::from_le_bytes(buf))
	}
}

impl BinaryKey for OrderedF64 {
	fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
		writer.write_all(&self.value().to_bits().to_le_bytes())?;
		Ok(())
	}

	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		let mut buf = [0u8; 8];
		reader.read_exact(&mut buf)?;
		OrderedF64::try_from(f64::from_bits(u64::from_le_bytes(buf)))
			.map_err(|_| tabula_type::error!(array::codec_failure("NaN is not a valid key")))
	}
}

impl BinaryKey for String {
	fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
		writer.write_all(&(self.len() as u32).to_le_bytes())?;
		writer.write_all(self.as_bytes())?;
		Ok(())
	}

	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		let mut len = [0u8; 4];
		reader.read_exact(&mut len)?;
		let mut buf = vec![0u8; u32::from_le_bytes(len) as usize];
		reader.read_exact(&mut buf)?;
		String::from_utf8(buf).map_err(|e| tabula_type::error!(array::codec_failure(e.to_string())))
	}
}

impl BinaryKey for Date {
	fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
		writer.write_all(&self.to_days_since_epoch().to_le_bytes())?;
		Ok(())
	}

	fn read<R: Read>(reader: &mut R) -> Result<Self> {
		let mut buf = [0u8; 4];
		reader.read_exact(&mut buf)?;
		Ok(Date::from_days_since_epoch(i32::from_le_bytes(buf)))
	}
}

impl<K: BinaryKey> Index<K> {
	/// Writes the keys in ordinal order.
	pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
		for ordinal in 0..self.len() {
			self.key_at(ordinal)?.write(writer)?;
		}
		Ok(())
	}

	/// Reads `count` keys into a fresh root index.
	pub fn read_from<R: Read>(reader: &mut R, count: usize) -> Result<Index<K>> {
		let mut index = Index::with_capacity(count);
		for _ in 0..count {
			index.add(K::read(reader)?)?;
		}
		Ok(index)
	}
}
