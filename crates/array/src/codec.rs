// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Positional little-endian binary codec for arrays. Dense numerics are
//! raw primitive sequences; zoned slots append their zone code when the
//! payload differs from the default; strings are length-prefixed UTF-8.
//! The reader must know the element type and count — the format carries
//! no header.

use std::io::{Read, Write};

use tabula_type::{
	Result, Value, err,
	error::diagnostic::array,
};

use crate::{Array, NULL_MILLIS};

impl Array {
	/// Writes the slots selected by `indexes`, in that order.
	pub fn write_to<W: Write>(&self, writer: &mut W, indexes: &[usize]) -> Result<()> {
		match self {
			Array::Boolean(arr) => {
				for &index in indexes {
					write_u8(writer, arr.get(index) as u8)?;
				}
			}
			Array::Int4(arr) => {
				for &index in indexes {
					writer.write_all(&arr.get(index).to_le_bytes())?;
				}
			}
			Array::Int8(arr) => {
				for &index in indexes {
					writer.write_all(&arr.get(index).to_le_bytes())?;
				}
			}
			Array::Float8(arr) => {
				for &index in indexes {
					writer.write_all(&arr.get(index).to_bits().to_le_bytes())?;
				}
			}
			Array::Date(arr) | Array::Time(arr) | Array::DateTime(arr) => {
				for &index in indexes {
					writer.write_all(&arr.get(index).0.to_le_bytes())?;
				}
			}
			Array::Zoned(arr) => {
				let default_millis =
					arr.default_value().map(|z| z.millis()).unwrap_or(NULL_MILLIS);
				for &index in indexes {
					let millis = arr.millis(index);
					writer.write_all(&millis.to_le_bytes())?;
					if millis != default_millis {
						writer.write_all(&arr.zone_code(index).to_le_bytes())?;
					}
				}
			}
			Array::Utf8(arr) => {
				for &index in indexes {
					match arr.get(index) {
						Some(text) => {
							write_u8(writer, 1)?;
							write_bytes(writer, text.as_bytes())?;
						}
						None => write_u8(writer, 0)?,
					}
				}
			}
			Array::Coded(arr) => {
				for &index in indexes {
					writer.write_all(&arr.code(index).to_le_bytes())?;
				}
			}
			Array::Any(arr) => {
				for &index in indexes {
					write_value(writer, &arr.get(index))?;
				}
			}
		}
		Ok(())
	}

	/// Reads `count` records into slots `0..count`.
	pub fn read_from<R: Read>(&mut self, reader: &mut R, count: usize) -> Result<()> {
		if count > self.len() {
			return err!(array::range_out_of_bounds(0, count, self.len()));
		}
		match self {
			Array::Boolean(arr) => {
				for index in 0..count {
					arr.set(index, read_u8(reader)? != 0);
				}
			}
			Array::Int4(arr) => {
				for index in 0..count {
					arr.set(index, i32::from_le_bytes(read_array(reader)?));
				}
			}
			Array::Int8(arr) => {
				for index in 0..count {
					arr.set(index, i64::from_le_bytes(read_array(reader)?));
				}
			}
			Array::Float8(arr) => {
				for index in 0..count {
					arr.set(index, f64::from_bits(u64::from_le_bytes(read_array(reader)?)));
				}
			}
			Array::Date(arr) | Array::Time(arr) | Array::DateTime(arr) => {
				for index in 0..count {
					arr.set(index, crate::EpochMillis(i64::from_le_bytes(read_array(reader)?)));
				}
			}
			Array::Zoned(arr) => {
				let default = arr.default_value();
				let default_millis = default.map(|z| z.millis()).unwrap_or(NULL_MILLIS);
				let default_zone = default.map(|z| z.zone_code()).unwrap_or(0);
				for index in 0..count {
					let millis = i64::from_le_bytes(read_array(reader)?);
					let zone = if millis != default_millis {
						u16::from_le_bytes(read_array(reader)?)
					} else {
						default_zone
					};
					let value = if millis == NULL_MILLIS {
						None
					} else {
						Some(tabula_type::Zoned::new(millis, zone))
					};
					arr.set(index, value);
				}
			}
			Array::Utf8(arr) => {
				for index in 0..count {
					let value = if read_u8(reader)? == 1 {
						Some(read_string(reader)?)
					} else {
						None
					};
					arr.set(index, value);
				}
			}
			Array::Coded(arr) => {
				for index in 0..count {
					arr.set_code(index, i32::from_le_bytes(read_array(reader)?))?;
				}
			}
			Array::Any(arr) => {
				for index in 0..count {
					let value = read_value(reader)?;
					arr.set(index, value);
				}
			}
		}
		Ok(())
	}
}

fn write_value<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
	match value {
		Value::Undefined => write_u8(writer, 0)?,
		Value::Boolean(v) => {
			write_u8(writer, 1)?;
			write_u8(writer, *v as u8)?;
		}
		Value::Int4(v) => {
			write_u8(writer, 2)?;
			writer.write_all(&v.to_le_bytes())?;
		}
		Value::Int8(v) => {
			write_u8(writer, 3)?;
			writer.write_all(&v.to_le_bytes())?;
		}
		Value::Float8(v) => {
			write_u8(writer, 4)?;
			writer.write_all(&v.value().to_bits().to_le_bytes())?;
		}
		Value::Utf8(v) => {
			write_u8(writer, 5)?;
			write_bytes(writer, v.as_bytes())?;
		}
		Value::Date(v) => {
			write_u8(writer, 6)?;
			writer.write_all(&v.to_epoch_millis().to_le_bytes())?;
		}
		Value::Time(v) => {
			write_u8(writer, 7)?;
			writer.write_all(&(v.to_millis_of_day() as i64).to_le_bytes())?;
		}
		Value::DateTime(v) => {
			write_u8(writer, 8)?;
			writer.write_all(&v.to_epoch_millis().to_le_bytes())?;
		}
		Value::Zoned(v) => {
			write_u8(writer, 9)?;
			writer.write_all(&v.millis().to_le_bytes())?;
			writer.write_all(&v.zone_code().to_le_bytes())?;
		}
	}
	Ok(())
}

fn read_value<R: Read>(reader: &mut R) -> Result<Value> {
	let tag = read_u8(reader)?;
	Ok(match tag {
		0 => Value::Undefined,
		1 => Value::Boolean(read_u8(reader)? != 0),
		2 => Value::Int4(i32::from_le_bytes(read_array(reader)?)),
		3 => Value::Int8(i64::from_le_bytes(read_array(reader)?)),
		4 => Value::float8(f64::from_bits(u64::from_le_bytes(read_array(reader)?))),
		5 => Value::Utf8(read_string(reader)?),
		6 => {
			let millis = i64::from_le_bytes(read_array(reader)?);
			Value::Date(tabula_type::Date::from_epoch_millis(millis))
		}
		7 => {
			let millis = i64::from_le_bytes(read_array(reader)?);
			tabula_type::Time::from_millis_of_day(millis as u32)
				.map(Value::Time)
				.unwrap_or(Value::Undefined)
		}
		8 => {
			let millis = i64::from_le_bytes(read_array(reader)?);
			Value::DateTime(tabula_type::DateTime::from_epoch_millis(millis))
		}
		9 => {
			let millis = i64::from_le_bytes(read_array(reader)?);
			let zone = u16::from_le_bytes(read_array(reader)?);
			Value::Zoned(tabula_type::Zoned::new(millis, zone))
		}
		other => return err!(array::codec_failure(format!("unknown value tag {}", other))),
	})
}

fn write_u8<W: Write>(writer: &mut W, value: u8) -> Result<()> {
	writer.write_all(&[value])?;
	Ok(())
}

fn write_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<()> {
	writer.write_all(&(bytes.len() as u32).to_le_bytes())?;
	writer.write_all(bytes)?;
	Ok(())
}

fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
	let mut buf = [0u8; 1];
	reader.read_exact(&mut buf)?;
	Ok(buf[0])
}

fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
	let mut buf = [0u8; N];
	reader.read_exact(&mut buf)?;
	Ok(buf)
}

fn read_string<R: Read>(reader: &mut R) -> Result<String> {
	let len = u32::from_le_bytes(read_array(reader)?) as usize;
	let mut buf = vec![0u8; len];
	reader.read_exact(&mut buf)?;
	String::from_utf8(buf).map_err(|e| tabula_type::error!(array::codec_failure(e.to_string())))
}

#[cfg(test)]
mod tests {
	use tabula_type::{Type, Zoned};

	use super::*;
	use crate::{ArrayStyle, SortOrder};

	fn round_trip(source: &Array) -> Array {
		let indexes: Vec<usize> = (0..source.len()).collect();
		let mut buffer = Vec::new();
		source.write_to(&mut buffer, &indexes).unwrap();
		let mut target = match source.style() {
			ArrayStyle::Sparse => {
				Array::sparse(source.element_type(), source.len(), 0.5, &source.default_value())
					.unwrap()
			}
			_ => Array::of(source.element_type(), source.len()),
		};
		target.read_from(&mut buffer.as_slice(), source.len()).unwrap();
		target
	}

	fn assert_bit_exact(source: &Array) {
		let copy = round_trip(source);
		assert_eq!(copy.len(), source.len());
		for i in 0..source.len() {
			assert!(
				copy.is_equal_to(i, &source.get_value(i).unwrap()),
				"slot {} differs after round trip",
				i
			);
		}
	}

	#[test]
	fn test_dense_numeric_round_trips() {
		let mut ints = Array::of(Type::Int4, 4);
		ints.set_int(1, -5).unwrap();
		ints.set_int(3, 99).unwrap();
		assert_bit_exact(&ints);

		let mut doubles = Array::of(Type::Float8, 4);
		doubles.set_double(0, 1.5).unwrap();
		doubles.set_double(2, -0.25).unwrap();
		assert_bit_exact(&doubles);
	}

	#[test]
	fn test_sparse_round_trip() {
		let mut arr = Array::sparse(Type::Int8, 10, 0.2, &Value::Int8(0)).unwrap();
		arr.set_long(2, 7).unwrap();
		arr.set_long(8, -3).unwrap();
		assert_bit_exact(&arr);
	}

	#[test]
	fn test_zoned_round_trip_keeps_zone() {
		let mut arr = Array::of(Type::Zoned, 3);
		let z: Zoned = "2020-01-01T05:00:00+05:00".parse().unwrap();
		arr.set_value(1, &Value::Zoned(z)).unwrap();
		let copy = round_trip(&arr);
		assert!(copy.is_null(0));
		assert!(copy.is_equal_to(1, &Value::Zoned(z)));
		// payload equal but zone different must not match
		assert!(!copy.is_equal_to(1, &Value::Zoned(Zoned::utc(z.millis()))));
	}

	#[test]
	fn test_strings_and_any_round_trip() {
		let strings = Array::from_values(
			Type::Utf8,
			&["alpha".into(), Value::Undefined, "omega".into()],
		)
		.unwrap();
		assert_bit_exact(&strings);

		let mixed = Array::from_values(
			Type::Any,
			&[Value::Int8(1), Value::from("x"), Value::Boolean(true), Value::Undefined],
		)
		.unwrap();
		assert_bit_exact(&mixed);
	}

	#[test]
	fn test_subset_write() {
		let mut arr = Array::of(Type::Int4, 5);
		for i in 0..5 {
			arr.set_int(i, i as i32 * 10).unwrap();
		}
		let mut buffer = Vec::new();
		arr.write_to(&mut buffer, &[4, 0, 2]).unwrap();
		let mut target = Array::of(Type::Int4, 3);
		target.read_from(&mut buffer.as_slice(), 3).unwrap();
		assert_eq!(target.get_int(0).unwrap(), 40);
		assert_eq!(target.get_int(1).unwrap(), 0);
		assert_eq!(target.get_int(2).unwrap(), 20);
	}

	#[test]
	fn test_sorted_array_round_trips() {
		let mut arr = Array::from_values(Type::Int8, &[3i64.into(), 1i64.into(), 2i64.into()]).unwrap();
		arr.sort(0, 3, Some(SortOrder::Desc)).unwrap();
		assert_bit_exact(&arr);
	}
}
