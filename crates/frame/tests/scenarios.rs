// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! End-to-end scenarios across arrays, indexes and frames.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tabula_array::{Array, SortOrder};
use tabula_frame::Frame;
use tabula_type::{Date, Type, Value, Zoned};

fn june(day: u32) -> Date {
	Date::new(2013, 6, day).unwrap()
}

fn price_frame(seed: u64) -> Frame<Date, &'static str> {
	let rows: Vec<Date> = (2..=7).map(june).collect();
	let cols = ["AAPL", "ORCL", "GOOGL", "BLK", "YHOO"];
	let frame = Frame::of(rows, cols, Type::Float8).unwrap();
	let mut rng = StdRng::seed_from_u64(seed);
	for row in 0..frame.row_count() {
		for col in 0..frame.col_count() {
			frame.set_value_at(row, col, &Value::float8(rng.gen::<f64>() * 100.0)).unwrap();
		}
	}
	frame
}

#[test]
fn sorting_columns_by_one_row_orders_that_row() {
	let mut frame = price_frame(42);
	let row_keys_before: Vec<Date> = frame.rows().keys().cloned().collect();

	frame.cols_mut().sort_by(SortOrder::Asc, &[june(4)]).unwrap();

	let pivot = frame.rows().get(&june(4)).unwrap();
	for col in 1..frame.col_count() {
		let left = pivot.get_double_at(col - 1).unwrap();
		let right = pivot.get_double_at(col).unwrap();
		assert!(left <= right, "column {} out of order: {} > {}", col, left, right);
	}
	let row_keys_after: Vec<Date> = frame.rows().keys().cloned().collect();
	assert_eq!(row_keys_before, row_keys_after);
	// the column key multiset survives, only the order changed
	let mut cols: Vec<&str> = frame.cols().keys().copied().collect();
	cols.sort_unstable();
	assert_eq!(cols, ["AAPL", "BLK", "GOOGL", "ORCL", "YHOO"]);
}

fn mixed_frame(rows: usize) -> Frame<i32, &'static str> {
	let row_keys: Vec<i32> = (0..rows as i32).collect();
	Frame::from_columns(row_keys, |cols| {
		let booleans: Vec<Value> = (0..rows).map(|i| Value::Boolean(i % 2 == 0)).collect();
		let ints: Vec<Value> = (0..rows).map(|i| Value::Int4((i % 7) as i32)).collect();
		let longs: Vec<Value> = (0..rows).map(|i| Value::Int8((i % 5) as i64)).collect();
		let doubles: Vec<Value> = (0..rows).map(|i| Value::float8((i % 3) as f64)).collect();
		let strings: Vec<Value> = (0..rows).map(|i| Value::utf8(format!("s{}", i % 4))).collect();
		let dates: Vec<Value> =
			(0..rows).map(|i| Value::Date(june(2).plus_days((i % 4) as i32))).collect();
		cols.add_values("Booleans", Type::Any, &booleans)?;
		cols.add_values("Integers", Type::Any, &ints)?;
		cols.add_values("Longs", Type::Any, &longs)?;
		cols.add_values("Doubles", Type::Any, &doubles)?;
		cols.add_values("Strings", Type::Any, &strings)?;
		cols.add_values("Dates", Type::Any, &dates)?;
		Ok(())
	})
	.unwrap()
}

#[test]
fn multi_key_row_sort_is_lexicographic() {
	let keys = ["Booleans", "Integers", "Longs", "Doubles", "Dates"];
	let mut frame = mixed_frame(10_000);
	frame.rows_mut().sort_by(SortOrder::Asc, &keys).unwrap();

	for row in 1..frame.row_count() {
		let prev = frame.row_at(row - 1).unwrap();
		let next = frame.row_at(row).unwrap();
		let mut ordering = std::cmp::Ordering::Equal;
		for key in &keys {
			ordering = prev.value_of(key).unwrap().cmp(&next.value_of(key).unwrap());
			if ordering != std::cmp::Ordering::Equal {
				break;
			}
		}
		assert_ne!(ordering, std::cmp::Ordering::Greater, "rows {} and {} out of order", row - 1, row);
	}
	// the row key multiset is untouched
	let mut row_keys: Vec<i32> = frame.rows().keys().copied().collect();
	row_keys.sort_unstable();
	assert_eq!(row_keys, (0..10_000).collect::<Vec<_>>());
}

#[test]
fn parallel_and_sequential_sorts_agree() {
	let keys = ["Integers", "Longs"];
	let mut sequential = mixed_frame(3_000);
	let mut parallel = sequential.copy().unwrap().parallel();
	tabula_frame::Settings::configure(|s| s.row_split_threshold = s.row_split_threshold.min(256));
	sequential.rows_mut().sort_by(SortOrder::Asc, &keys).unwrap();
	parallel.rows_mut().sort_by(SortOrder::Asc, &keys).unwrap();
	let left: Vec<i32> = sequential.rows().keys().copied().collect();
	let right: Vec<i32> = parallel.rows().keys().copied().collect();
	assert_eq!(left, right);
}

#[test]
fn zoned_sparse_array_distinguishes_zones() {
	let default: Zoned = "2020-01-01T00:00Z".parse().unwrap();
	let offset: Zoned = "2020-01-01T00:00+05:00".parse().unwrap();
	let mut array = Array::sparse(Type::Zoned, 4, 0.25, &Value::Zoned(default)).unwrap();
	array.set_value(1, &Value::Zoned(offset)).unwrap();

	assert!(!array.is_equal_to(1, &Value::Zoned(default)));
	assert!(array.is_equal_to(1, &Value::Zoned(offset)));
	assert_eq!(array.get_value(3).unwrap(), Value::Zoned(default));
}

#[test]
fn parallel_apply_matches_sequential_bit_for_bit() {
	let frame = price_frame(7);
	let sequential = frame.copy().unwrap();
	let parallel = frame.copy().unwrap().parallel();

	sequential.apply_doubles(|v| v.get_double() * 2.0).unwrap();
	parallel.apply_doubles(|v| v.get_double() * 2.0).unwrap();

	for row in 0..frame.row_count() {
		for col in 0..frame.col_count() {
			let left = sequential.get_double_at(row, col).unwrap();
			let right = parallel.get_double_at(row, col).unwrap();
			assert_eq!(left.to_bits(), right.to_bits());
		}
	}
}

#[test]
fn head_is_a_shared_storage_view() {
	let row_keys: Vec<i32> = (0..10).collect();
	let frame = Frame::of(row_keys, ["a", "b"], Type::Float8).unwrap();
	let head = frame.head(3).unwrap();

	assert_eq!(head.row_count(), 3);
	assert_eq!(head.col_count(), 2);
	assert_eq!(head.rows().keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);

	// a write through the view is observable in the parent
	head.set_double(&1, &"b", 9.5).unwrap();
	assert_eq!(frame.get_double(&1, &"b").unwrap(), 9.5);
}

#[test]
fn copy_equals_source_and_detaches() {
	let frame = price_frame(11);
	let copy = frame.copy().unwrap();
	assert_eq!(copy, frame);
	copy.set_double(&june(2), &"AAPL", -1.0).unwrap();
	assert_ne!(copy, frame);
}

#[test]
fn transpose_round_trip_preserves_cells() {
	let frame = price_frame(13);
	let transposed = frame.transpose().unwrap();
	assert_eq!(transposed.row_count(), frame.col_count());
	assert_eq!(transposed.col_count(), frame.row_count());
	for row in 0..frame.row_count() {
		for col in 0..frame.col_count() {
			assert_eq!(
				frame.value_at(row, col).unwrap(),
				transposed.value_at(col, row).unwrap()
			);
		}
	}
	let back = transposed.transpose().unwrap();
	assert_eq!(back, frame);
}

#[test]
fn update_overlays_source_values() {
	let frame_a = price_frame(1);
	let mut target = frame_a.copy().unwrap();
	let source = price_frame(2);

	target.update(&source, false, false).unwrap();
	for row in 0..target.row_count() {
		for col in 0..target.col_count() {
			assert_eq!(
				target.value_at(row, col).unwrap(),
				source.value_at(row, col).unwrap()
			);
		}
	}
}

#[test]
fn sort_restore_returns_to_insertion_order() {
	let mut frame = price_frame(3);
	let before: Vec<Date> = frame.rows().keys().cloned().collect();
	frame.rows_mut().sort_by(SortOrder::Desc, &["AAPL"]).unwrap();
	frame.rows_mut().sort(None).unwrap();
	let after: Vec<Date> = frame.rows().keys().cloned().collect();
	assert_eq!(before, after);
}

#[test]
fn unknown_sort_key_is_rejected_and_harmless() {
	let mut frame = price_frame(5);
	let before: Vec<&str> = frame.cols().keys().copied().collect();
	let err = frame.rows_mut().sort_by(SortOrder::Asc, &["NOPE"]).unwrap_err();
	assert_eq!(err.code(), "FRAME_002");
	assert_eq!(frame.cols().keys().copied().collect::<Vec<_>>(), before);
}
