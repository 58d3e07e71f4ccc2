// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A time of day, stored as milliseconds since midnight.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Time {
	millis: u32,
}

const MILLIS_PER_DAY: u32 = 86_400_000;

impl Time {
	pub fn new(hour: u32, min: u32, sec: u32, milli: u32) -> Option<Self> {
		if hour > 23 || min > 59 || sec > 59 || milli > 999 {
			return None;
		}
		Some(Self {
			millis: ((hour * 60 + min) * 60 + sec) * 1000 + milli,
		})
	}

	pub fn from_millis_of_day(millis: u32) -> Option<Self> {
		if millis >= MILLIS_PER_DAY {
			return None;
		}
		Some(Self {
			millis,
		})
	}

	pub fn to_millis_of_day(&self) -> u32 {
		self.millis
	}

	pub fn hour(&self) -> u32 {
		self.millis / 3_600_000
	}

	pub fn minute(&self) -> u32 {
		self.millis / 60_000 % 60
	}

	pub fn second(&self) -> u32 {
		self.millis / 1000 % 60
	}

	pub fn millisecond(&self) -> u32 {
		self.millis % 1000
	}
}

impl Display for Time {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.millisecond() == 0 {
			write!(f, "{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())
		} else {
			write!(f, "{:02}:{:02}:{:02}.{:03}", self.hour(), self.minute(), self.second(), self.millisecond())
		}
	}
}

impl std::str::FromStr for Time {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (hms, milli) = match s.split_once('.') {
			Some((hms, frac)) => {
				// take millisecond precision from the fraction
				let frac = if frac.len() > 3 {
					&frac[..3]
				} else {
					frac
				};
				let scale = 10u32.pow(3 - frac.len() as u32);
				(hms, frac.parse::<u32>().map_err(|_| ())? * scale)
			}
			None => (s, 0),
		};
		let mut parts = hms.splitn(3, ':');
		let hour: u32 = parts.next().ok_or(())?.parse().map_err(|_| ())?;
		let min: u32 = parts.next().ok_or(())?.parse().map_err(|_| ())?;
		let sec: u32 = match parts.next() {
			Some(sec) => sec.parse().map_err(|_| ())?,
			None => 0,
		};
		Time::new(hour, min, sec, milli).ok_or(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_components() {
		let t = Time::new(13, 45, 30, 250).unwrap();
		assert_eq!(t.hour(), 13);
		assert_eq!(t.minute(), 45);
		assert_eq!(t.second(), 30);
		assert_eq!(t.millisecond(), 250);
	}

	#[test]
	fn test_rejects_invalid() {
		assert!(Time::new(24, 0, 0, 0).is_none());
		assert!(Time::new(0, 60, 0, 0).is_none());
	}

	#[test]
	fn test_display_and_parse() {
		let t = Time::new(9, 5, 0, 0).unwrap();
		assert_eq!(t.to_string(), "09:05:00");
		assert_eq!("09:05:00".parse::<Time>().unwrap(), t);
		assert_eq!("09:05".parse::<Time>().unwrap(), t);
		let with_frac = Time::new(9, 5, 1, 120).unwrap();
		assert_eq!("09:05:01.120".parse::<Time>().unwrap(), with_frac);
	}

	#[test]
	fn test_ordering() {
		assert!(Time::new(8, 0, 0, 0).unwrap() < Time::new(8, 0, 0, 1).unwrap());
	}
}
