//! Calendar dates and observer locations.
//!
//! Both types validate on construction and are immutable afterwards. The
//! solar math downstream never re-checks ranges.

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike};

use crate::core::{Error, Result};

/// Day of the year, 1 = January 1st, 366 = December 31st of a leap year.
pub type DayOfYear = u32;

const DAYS_PER_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Largest accepted distance from UTC, exclusive.
const MAX_UTC_OFFSET_MINUTES: i32 = 24 * 60;

/// Gregorian leap year rule.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_PER_MONTH[month as usize - 1],
        _ => 0,
    }
}

/// A local civil date and time together with its offset from UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeoDate {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    utc_offset_minutes: i32,
}

impl GeoDate {
    /// Build a date from local clock components.
    ///
    /// `utc_offset_minutes` is local time minus UTC, so `+60` for UTC+1.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        utc_offset_minutes: i32,
    ) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidDate(format!("month {month} out of range 1-12")));
        }
        let max_day = days_in_month(year, month);
        if day == 0 || day > max_day {
            return Err(Error::InvalidDate(format!(
                "day {day} out of range 1-{max_day} for {year}-{month:02}"
            )));
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(Error::InvalidDate(format!(
                "time {hour:02}:{minute:02}:{second:02} is not a valid clock time"
            )));
        }
        if utc_offset_minutes.abs() >= MAX_UTC_OFFSET_MINUTES {
            return Err(Error::InvalidDate(format!(
                "UTC offset of {utc_offset_minutes} minutes is out of range"
            )));
        }

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            utc_offset_minutes,
        })
    }

    /// Convenience constructor for a UTC timestamp.
    pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Result<Self> {
        Self::new(year, month, day, hour, minute, second, 0)
    }

    /// Convert a timezone-aware chrono `DateTime`, keeping its local clock
    /// reading and offset. Sub-second precision is dropped.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self> {
        let offset_seconds = datetime.offset().fix().local_minus_utc();
        Self::new(
            datetime.year(),
            datetime.month(),
            datetime.day(),
            datetime.hour(),
            datetime.minute(),
            // Leap seconds are reported as second 59 with a large nanosecond field
            datetime.second().min(59),
            offset_seconds / 60,
        )
    }

    /// Parse an RFC 3339 timestamp such as `2024-06-21T12:00:00+01:00`.
    pub fn parse_rfc3339(text: &str) -> Result<Self> {
        let datetime = DateTime::parse_from_rfc3339(text)
            .map_err(|e| Error::InvalidDate(format!("'{text}': {e}")))?;
        Self::from_datetime(&datetime)
    }

    /// The current date and time in the system's local time zone.
    pub fn now() -> Result<Self> {
        Self::from_datetime(&chrono::Local::now())
    }

    /// Day of the year in `[1, 366]`, counting February 29th in leap years.
    pub fn day_of_year(&self) -> DayOfYear {
        let before: u32 = (1..self.month).map(|m| days_in_month(self.year, m)).sum();
        before + self.day
    }

    /// Seconds elapsed since local midnight.
    #[inline]
    pub fn seconds_of_day(&self) -> u32 {
        self.hour * 3600 + self.minute * 60 + self.second
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }

    #[inline]
    pub fn day(&self) -> u32 {
        self.day
    }

    #[inline]
    pub fn hour(&self) -> u32 {
        self.hour
    }

    #[inline]
    pub fn minute(&self) -> u32 {
        self.minute
    }

    #[inline]
    pub fn second(&self) -> u32 {
        self.second
    }

    /// Local time minus UTC, in minutes.
    #[inline]
    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }
}

/// Geographic observer position in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    latitude_degrees: f64,
    longitude_degrees: f64,
}

impl Location {
    /// Create a location, rejecting latitudes outside `[-90, 90]` and
    /// longitudes outside `[-180, 180]`.
    pub fn new(latitude_degrees: f64, longitude_degrees: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude_degrees) {
            return Err(Error::InvalidLocation(format!(
                "latitude {latitude_degrees} out of range -90..90"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude_degrees) {
            return Err(Error::InvalidLocation(format!(
                "longitude {longitude_degrees} out of range -180..180"
            )));
        }
        Ok(Self {
            latitude_degrees,
            longitude_degrees,
        })
    }

    #[inline]
    pub fn latitude_degrees(&self) -> f64 {
        self.latitude_degrees
    }

    #[inline]
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude_degrees
    }

    #[inline]
    pub fn latitude_radians(&self) -> f64 {
        self.latitude_degrees.to_radians()
    }
}
