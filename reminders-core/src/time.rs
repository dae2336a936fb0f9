//! Dates and date-times as they are stored on reminders and events.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RemindersError, RemindersResult};

/// Format used for every date accepted or printed at the CLI boundary.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A date or date-time, preserving how the store expressed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarTime {
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
    /// Wall-clock time with no zone, interpreted in local time.
    DateTimeFloating(NaiveDateTime),
    DateTimeZoned {
        datetime: NaiveDateTime,
        tzid: String,
    },
}

impl CalendarTime {
    /// Parse `yyyy-MM-dd HH:mm` (local time) or `yyyy-MM-dd` (date only).
    pub fn parse_input(input: &str) -> RemindersResult<Self> {
        let trimmed = input.trim();

        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, DISPLAY_FORMAT) {
            return Ok(CalendarTime::DateTimeFloating(dt));
        }

        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(CalendarTime::Date)
            .map_err(|_| RemindersError::InvalidDate(input.to_string()))
    }

    /// Place this value on the timeline in the local zone.
    ///
    /// Returns `None` when it cannot be resolved: an unknown TZID, or a
    /// floating time that does not exist locally (DST gap).
    pub fn resolve(&self) -> Option<DateTime<Local>> {
        match self {
            CalendarTime::Date(d) => {
                let midnight = d.and_hms_opt(0, 0, 0)?;
                Local.from_local_datetime(&midnight).earliest()
            }
            CalendarTime::DateTimeUtc(dt) => Some(dt.with_timezone(&Local)),
            CalendarTime::DateTimeFloating(dt) => Local.from_local_datetime(dt).earliest(),
            CalendarTime::DateTimeZoned { datetime, tzid } => {
                let tz: chrono_tz::Tz = tzid.parse().ok()?;
                tz.from_local_datetime(datetime)
                    .earliest()
                    .map(|dt| dt.with_timezone(&Local))
            }
        }
    }

    pub fn is_date_only(&self) -> bool {
        matches!(self, CalendarTime::Date(_))
    }

    /// Shift by a duration. Date-only values move by whole days.
    pub fn add(&self, duration: Duration) -> CalendarTime {
        match self {
            CalendarTime::Date(d) => CalendarTime::Date(*d + Duration::days(duration.num_days())),
            CalendarTime::DateTimeUtc(dt) => CalendarTime::DateTimeUtc(*dt + duration),
            CalendarTime::DateTimeFloating(dt) => CalendarTime::DateTimeFloating(*dt + duration),
            CalendarTime::DateTimeZoned { datetime, tzid } => CalendarTime::DateTimeZoned {
                datetime: *datetime + duration,
                tzid: tzid.clone(),
            },
        }
    }

    /// `yyyy-MM-dd HH:mm` in local time, falling back to the stored wall
    /// clock when the value cannot be resolved.
    pub fn display_local(&self) -> String {
        match self.resolve() {
            Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
            None => self.wall_clock().format(DISPLAY_FORMAT).to_string(),
        }
    }

    fn wall_clock(&self) -> NaiveDateTime {
        match self {
            CalendarTime::Date(d) => d.and_time(chrono::NaiveTime::MIN),
            CalendarTime::DateTimeUtc(dt) => dt.naive_utc(),
            CalendarTime::DateTimeFloating(dt) => *dt,
            CalendarTime::DateTimeZoned { datetime, .. } => *datetime,
        }
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalendarTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CalendarTime::DateTimeUtc(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M UTC")),
            CalendarTime::DateTimeFloating(dt) => write!(f, "{}", dt.format(DISPLAY_FORMAT)),
            CalendarTime::DateTimeZoned { datetime, tzid } => {
                write!(f, "{} ({})", datetime.format(DISPLAY_FORMAT), tzid)
            }
        }
    }
}
