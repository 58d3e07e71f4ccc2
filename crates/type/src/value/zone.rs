// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Process-wide zone registry. Zone identifiers are interned to `u16`
//! codes once at first use; the bimap is never mutated afterwards, so
//! zoned arrays can carry bare codes alongside their epoch payloads.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

pub const UTC: u16 = 0;

struct ZoneRegistry {
	names: Vec<String>,
	offsets: Vec<i32>,
	by_name: FxHashMap<String, u16>,
}

static REGISTRY: Lazy<ZoneRegistry> = Lazy::new(|| {
	let mut names = Vec::new();
	let mut offsets = Vec::new();
	let mut by_name = FxHashMap::default();

	let mut register = |name: String, offset_minutes: i32| {
		let code = names.len() as u16;
		by_name.insert(name.clone(), code);
		names.push(name);
		offsets.push(offset_minutes);
	};

	register("UTC".to_string(), 0);
	// fixed offsets at quarter-hour granularity cover every real offset
	let mut minutes: i32 = -12 * 60;
	while minutes <= 14 * 60 {
		if minutes != 0 {
			let sign = if minutes < 0 {
				'-'
			} else {
				'+'
			};
			let abs = minutes.abs();
			register(format!("{}{:02}:{:02}", sign, abs / 60, abs % 60), minutes);
		}
		minutes += 15;
	}
	// common region identifiers with their standard offsets
	for (name, offset) in [
		("America/New_York", -5 * 60),
		("America/Chicago", -6 * 60),
		("America/Denver", -7 * 60),
		("America/Los_Angeles", -8 * 60),
		("America/Sao_Paulo", -3 * 60),
		("Europe/London", 0),
		("Europe/Paris", 60),
		("Europe/Berlin", 60),
		("Europe/Zurich", 60),
		("Europe/Moscow", 3 * 60),
		("Africa/Johannesburg", 2 * 60),
		("Asia/Dubai", 4 * 60),
		("Asia/Kolkata", 5 * 60 + 30),
		("Asia/Singapore", 8 * 60),
		("Asia/Hong_Kong", 8 * 60),
		("Asia/Shanghai", 8 * 60),
		("Asia/Tokyo", 9 * 60),
		("Australia/Sydney", 10 * 60),
		("Pacific/Auckland", 12 * 60),
	] {
		register(name.to_string(), offset);
	}

	ZoneRegistry {
		names,
		offsets,
		by_name,
	}
});

/// Resolves a zone identifier ("UTC", "+05:00", "Asia/Tokyo") to its code.
pub fn code_of(name: &str) -> Option<u16> {
	REGISTRY.by_name.get(name).copied()
}

pub fn name_of(code: u16) -> Option<&'static str> {
	REGISTRY.names.get(code as usize).map(|s| s.as_str())
}

pub fn offset_minutes(code: u16) -> i32 {
	REGISTRY.offsets.get(code as usize).copied().unwrap_or(0)
}

/// The code for a fixed offset in minutes; the offset must land on a
/// quarter hour within -12:00..=+14:00.
pub fn code_of_offset(minutes: i32) -> Option<u16> {
	if minutes == 0 {
		return Some(UTC);
	}
	let sign = if minutes < 0 {
		'-'
	} else {
		'+'
	};
	let abs = minutes.abs();
	code_of(&format!("{}{:02}:{:02}", sign, abs / 60, abs % 60))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_utc_is_zero() {
		assert_eq!(code_of("UTC"), Some(UTC));
		assert_eq!(name_of(UTC), Some("UTC"));
		assert_eq!(offset_minutes(UTC), 0);
	}

	#[test]
	fn test_fixed_offsets() {
		let code = code_of("+05:00").unwrap();
		assert_eq!(offset_minutes(code), 300);
		assert_eq!(code_of_offset(300), Some(code));
		let code = code_of("-09:30").unwrap();
		assert_eq!(offset_minutes(code), -(9 * 60 + 30));
	}

	#[test]
	fn test_regions() {
		let code = code_of("Asia/Tokyo").unwrap();
		assert_eq!(offset_minutes(code), 540);
		assert_eq!(name_of(code), Some("Asia/Tokyo"));
	}

	#[test]
	fn test_unknown() {
		assert_eq!(code_of("Mars/Olympus_Mons"), None);
		assert_eq!(code_of_offset(7), None);
	}
}
