//! Target time handling.
//!
//! The routing service computes thermal comfort for a given hour of a given
//! day, so target times are normalised to UTC and truncated to the hour.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

/// Error returned when parsing an invalid target time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// The time of day a route is requested for, at hour resolution in UTC.
///
/// # Examples
///
/// ```
/// use thermal_route::domain::TargetTime;
/// use chrono::{TimeZone, Utc};
///
/// let t = TargetTime::from_datetime(Utc.with_ymd_and_hms(2026, 10, 19, 14, 37, 12).unwrap());
/// assert_eq!(t.to_param(), "2026-10-19-1400");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetTime(DateTime<Utc>);

impl TargetTime {
    /// The current hour.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Build a target time from any UTC instant, dropping minutes and below.
    pub fn from_datetime<Tz: TimeZone>(at: DateTime<Tz>) -> Self {
        let utc = at.with_timezone(&Utc);
        let hour = NaiveTime::from_hms_opt(utc.hour(), 0, 0).unwrap_or(NaiveTime::MIN);
        Self(Utc.from_utc_datetime(&utc.date_naive().and_time(hour)))
    }

    /// Build a target time from a calendar date and an hour (0-23).
    pub fn from_date_hour(date: NaiveDate, hour: u32) -> Result<Self, TimeError> {
        let time =
            NaiveTime::from_hms_opt(hour, 0, 0).ok_or_else(|| TimeError::new("hour must be 0-23"))?;
        Ok(Self(Utc.from_utc_datetime(&date.and_time(time))))
    }

    /// Parse the routing service's `YYYY-MM-DD-HHmm` format.
    ///
    /// Minutes must be `00`; the service works at hour resolution.
    ///
    /// ```
    /// use thermal_route::domain::TargetTime;
    ///
    /// assert!(TargetTime::parse_param("2026-07-01-1300").is_ok());
    /// assert!(TargetTime::parse_param("2026-07-01-1330").is_err());
    /// assert!(TargetTime::parse_param("2026-07-01 13:00").is_err());
    /// ```
    pub fn parse_param(s: &str) -> Result<Self, TimeError> {
        if !s.is_ascii() || s.len() != 15 || s.as_bytes()[10] != b'-' {
            return Err(TimeError::new("expected YYYY-MM-DD-HHmm format"));
        }
        let date = NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d")
            .map_err(|_| TimeError::new("invalid date"))?;
        let hour: u32 = s[11..13]
            .parse()
            .map_err(|_| TimeError::new("invalid hour digits"))?;
        if &s[13..15] != "00" {
            return Err(TimeError::new("minutes must be 00"));
        }
        Self::from_date_hour(date, hour)
    }

    /// Format as `YYYY-MM-DD-HHmm`, zero padded.
    pub fn to_param(&self) -> String {
        self.0.format("%Y-%m-%d-%H%M").to_string()
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Seconds since the Unix epoch, used as a cache key component.
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Debug for TargetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetTime({})", self.to_param())
    }
}

impl fmt::Display for TargetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:00 UTC", self.date(), self.hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn truncates_to_hour() {
        let t = TargetTime::from_datetime(Utc.with_ymd_and_hms(2026, 3, 5, 9, 59, 59).unwrap());
        assert_eq!(t.hour(), 9);
        assert_eq!(t.to_param(), "2026-03-05-0900");
    }

    #[test]
    fn normalises_to_utc() {
        // 07:30 in Arizona (UTC-7) is 14:30 UTC
        let mst = FixedOffset::west_opt(7 * 3600).unwrap();
        let local = mst.with_ymd_and_hms(2026, 7, 1, 7, 30, 0).unwrap();
        let t = TargetTime::from_datetime(local);
        assert_eq!(t.to_param(), "2026-07-01-1400");
    }

    #[test]
    fn local_evening_rolls_date_forward() {
        let mst = FixedOffset::west_opt(7 * 3600).unwrap();
        let local = mst.with_ymd_and_hms(2026, 7, 1, 20, 0, 0).unwrap();
        let t = TargetTime::from_datetime(local);
        assert_eq!(t.date(), date(2026, 7, 2));
        assert_eq!(t.hour(), 3);
    }

    #[test]
    fn from_date_hour_validates_hour() {
        assert!(TargetTime::from_date_hour(date(2026, 1, 1), 0).is_ok());
        assert!(TargetTime::from_date_hour(date(2026, 1, 1), 23).is_ok());
        assert!(TargetTime::from_date_hour(date(2026, 1, 1), 24).is_err());
    }

    #[test]
    fn param_is_zero_padded() {
        let t = TargetTime::from_date_hour(date(2026, 1, 2), 3).unwrap();
        assert_eq!(t.to_param(), "2026-01-02-0300");
    }

    #[test]
    fn parse_param_roundtrip() {
        let t = TargetTime::parse_param("2026-10-19-2300").unwrap();
        assert_eq!(t.date(), date(2026, 10, 19));
        assert_eq!(t.hour(), 23);
        assert_eq!(t.to_param(), "2026-10-19-2300");
    }

    #[test]
    fn parse_param_rejects_garbage() {
        assert!(TargetTime::parse_param("").is_err());
        assert!(TargetTime::parse_param("2026-13-01-1000").is_err());
        assert!(TargetTime::parse_param("2026-10-19-2400").is_err());
        assert!(TargetTime::parse_param("2026-10-19T1000").is_err());
        assert!(TargetTime::parse_param("2026-10-19-1015").is_err());
    }

    #[test]
    fn display_and_debug() {
        let t = TargetTime::from_date_hour(date(2026, 10, 19), 14).unwrap();
        assert_eq!(t.to_string(), "2026-10-19 14:00 UTC");
        assert_eq!(format!("{t:?}"), "TargetTime(2026-10-19-1400)");
    }

    #[test]
    fn ordering_follows_time() {
        let a = TargetTime::from_date_hour(date(2026, 10, 19), 14).unwrap();
        let b = TargetTime::from_date_hour(date(2026, 10, 19), 15).unwrap();
        assert!(a < b);
    }
}
