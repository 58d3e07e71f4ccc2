// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Facade smoke test: the re-exported surface composes end to end.

use tabula::{Array, Frame, Index, SortOrder, Type, Value};

#[test]
fn facade_round_trip() {
	let mut frame: Frame<i64, &str> = Frame::of([10, 20, 30], ["price", "volume"], Type::Float8).unwrap();
	frame.set_double(&20, &"price", 101.5).unwrap();
	frame.set_double(&10, &"price", 99.0).unwrap();
	frame.set_double(&30, &"price", 100.25).unwrap();

	frame.rows_mut().sort_by(SortOrder::Desc, &["price"]).unwrap();
	let keys: Vec<i64> = frame.rows().keys().copied().collect();
	assert_eq!(keys, vec![20, 30, 10]);

	let stats = frame.cols().get(&"price").unwrap().stats();
	assert_eq!(stats.count(), 3);
	assert_eq!(stats.max(), Some(101.5));
}

#[test]
fn facade_arrays_and_indexes() {
	let mut array = Array::of(Type::Int8, 4);
	array.set_long(2, 9).unwrap();
	assert_eq!(array.get_long(2).unwrap(), 9);
	assert_eq!(array.get_value(0).unwrap(), Value::Int8(0));

	let mut index = Index::of(["x", "y"]).unwrap();
	index.add("z").unwrap();
	assert_eq!(index.ordinal_of(&"z"), Some(2));
}
