// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::value::{date::Date, time::Time};

/// A date and time value in UTC, stored as milliseconds since the Unix
/// epoch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateTime {
	millis: i64,
}

const MILLIS_PER_DAY: i64 = 86_400_000;

impl DateTime {
	pub fn new(date: Date, time: Time) -> Self {
		Self {
			millis: date.to_epoch_millis() + time.to_millis_of_day() as i64,
		}
	}

	pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
		let date = Date::new(year, month, day)?;
		let time = Time::new(hour, min, sec, 0)?;
		Some(Self::new(date, time))
	}

	pub fn from_epoch_millis(millis: i64) -> Self {
		Self {
			millis,
		}
	}

	pub fn to_epoch_millis(&self) -> i64 {
		self.millis
	}

	pub fn date(&self) -> Date {
		Date::from_days_since_epoch(self.millis.div_euclid(MILLIS_PER_DAY) as i32)
	}

	pub fn time(&self) -> Time {
		Time::from_millis_of_day(self.millis.rem_euclid(MILLIS_PER_DAY) as u32).unwrap_or_default()
	}

	pub fn plus_millis(&self, millis: i64) -> Self {
		Self {
			millis: self.millis + millis,
		}
	}
}

impl Display for DateTime {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}T{}", self.date(), self.time())
	}
}

impl std::str::FromStr for DateTime {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (date, time) = match s.split_once('T').or_else(|| s.split_once(' ')) {
			Some((date, time)) => (date.parse::<Date>()?, time.parse::<Time>()?),
			None => (s.parse::<Date>()?, Time::default()),
		};
		Ok(Self::new(date, time))
	}
}
