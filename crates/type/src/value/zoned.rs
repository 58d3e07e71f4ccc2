// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

use crate::value::{datetime::DateTime, zone};

/// A date and time value carrying a zone: an epoch-millisecond payload
/// plus a zone code from the process-wide registry. The hot path is the
/// primitive payload; the zone only participates in equality and
/// rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zoned {
	millis: i64,
	zone: u16,
}

impl Default for Zoned {
	fn default() -> Self {
		Self {
			millis: 0,
			zone: zone::UTC,
		}
	}
}

impl Zoned {
	pub fn new(millis: i64, zone: u16) -> Self {
		Self {
			millis,
			zone,
		}
	}

	pub fn utc(millis: i64) -> Self {
		Self {
			millis,
			zone: zone::UTC,
		}
	}

	/// Interprets a local datetime in the named zone.
	pub fn of(local: DateTime, zone_name: &str) -> Option<Self> {
		let zone = zone::code_of(zone_name)?;
		let millis = local.to_epoch_millis() - zone::offset_minutes(zone) as i64 * 60_000;
		Some(Self {
			millis,
			zone,
		})
	}

	pub fn millis(&self) -> i64 {
		self.millis
	}

	pub fn zone_code(&self) -> u16 {
		self.zone
	}

	pub fn zone_name(&self) -> &'static str {
		zone::name_of(self.zone).unwrap_or("UTC")
	}

	pub fn with_zone(&self, zone: u16) -> Self {
		Self {
			millis: self.millis,
			zone,
		}
	}

	/// The local datetime this value renders as in its zone.
	pub fn local(&self) -> DateTime {
		DateTime::from_epoch_millis(self.millis + zone::offset_minutes(self.zone) as i64 * 60_000)
	}

	/// Payload-only comparison, the ordering arrays sort by.
	pub fn compare_instant(&self, other: &Self) -> Ordering {
		self.millis.cmp(&other.millis)
	}
}

impl PartialOrd for Zoned {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Zoned {
	fn cmp(&self, other: &Self) -> Ordering {
		// payload first; the zone tiebreak keeps Ord consistent with Eq
		self.millis.cmp(&other.millis).then_with(|| self.zone.cmp(&other.zone))
	}
}

impl Display for Zoned {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}[{}]", self.local(), self.zone_name())
	}
}

impl std::str::FromStr for Zoned {
	type Err = ();

	/// Parses `YYYY-MM-DDTHH:MM[:SS][Z|+HH:MM|-HH:MM]`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if let Some(stripped) = s.strip_suffix('Z') {
			let local: DateTime = stripped.parse()?;
			return Ok(Zoned::utc(local.to_epoch_millis()));
		}
		// the offset sign can only appear after the 'T' separator
		let t = s.find('T').ok_or(())?;
		if let Some(pos) = s[t..].rfind(['+', '-']) {
			let (local_text, offset_text) = s.split_at(t + pos);
			let local: DateTime = local_text.parse()?;
			let minutes = parse_offset(offset_text).ok_or(())?;
			let zone = zone::code_of_offset(minutes).ok_or(())?;
			let millis = local.to_epoch_millis() - minutes as i64 * 60_000;
			return Ok(Zoned::new(millis, zone));
		}
		let local: DateTime = s.parse()?;
		Ok(Zoned::utc(local.to_epoch_millis()))
	}
}

fn parse_offset(text: &str) -> Option<i32> {
	let (sign, rest) = match text.as_bytes().first()? {
		b'+' => (1, &text[1..]),
		b'-' => (-1, &text[1..]),
		_ => return None,
	};
	let (hours, minutes) = match rest.split_once(':') {
		Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
		None => (rest.parse::<i32>().ok()?, 0),
	};
	Some(sign * (hours * 60 + minutes))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_utc() {
		let z: Zoned = "2020-01-01T00:00:00Z".parse().unwrap();
		assert_eq!(z.zone_code(), zone::UTC);
		assert_eq!(z.millis(), DateTime::from_ymd_hms(2020, 1, 1, 0, 0, 0).unwrap().to_epoch_millis());
	}

	#[test]
	fn test_parse_offset() {
		let utc: Zoned = "2020-01-01T00:00:00Z".parse().unwrap();
		let plus5: Zoned = "2020-01-01T05:00:00+05:00".parse().unwrap();
		// same instant, different zone
		assert_eq!(utc.millis(), plus5.millis());
		assert_ne!(utc, plus5);
		assert_eq!(utc.compare_instant(&plus5), Ordering::Equal);
	}

	#[test]
	fn test_local_rendering() {
		let z = Zoned::of(DateTime::from_ymd_hms(2020, 6, 1, 9, 30, 0).unwrap(), "+02:00").unwrap();
		assert_eq!(z.local(), DateTime::from_ymd_hms(2020, 6, 1, 9, 30, 0).unwrap());
		assert_eq!(z.to_string(), "2020-06-01T09:30:00[+02:00]");
	}

	#[test]
	fn test_equality_requires_zone() {
		let a = Zoned::utc(1000);
		let b = a.with_zone(zone::code_of("+01:00").unwrap());
		assert_eq!(a.millis(), b.millis());
		assert_ne!(a, b);
	}
}
