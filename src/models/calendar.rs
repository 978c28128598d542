//! Time window model.
//!
//! # Time Model
//! Minutes relative to midnight of an anchor day. The anchor date itself
//! never affects correctness; it only matters when a caller converts a
//! minute offset into a calendar timestamp.
//!
//! # Midnight Rule
//! A window whose end clock time is earlier than its start clock time
//! crosses midnight: the end is moved forward by one day before any
//! arithmetic. Equal clock times describe an empty window and are rejected.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Interval start (minutes from anchor midnight, inclusive).
    pub start_min: i64,
    /// Interval end (minutes from anchor midnight, exclusive).
    pub end_min: i64,
}

impl TimeWindow {
    /// Creates a new time window from raw minute offsets.
    pub fn new(start_min: i64, end_min: i64) -> Self {
        Self { start_min, end_min }
    }

    /// Builds a window from two clock times, applying the midnight rule.
    ///
    /// # Errors
    /// `InvalidWindow` if both clock times are equal.
    pub fn from_clock(start: NaiveTime, end: NaiveTime) -> PlanResult<Self> {
        let start_min = minute_of_day(start);
        let mut end_min = minute_of_day(end);
        if end_min == start_min {
            return Err(PlanError::window(format!(
                "window {} to {} has no length",
                clock_label(start_min),
                clock_label(end_min)
            )));
        }
        if end_min < start_min {
            end_min += MINUTES_PER_DAY;
        }
        Ok(Self { start_min, end_min })
    }

    /// A block of `minutes` starting at a clock time.
    pub fn block(at: NaiveTime, minutes: i64) -> Self {
        let start_min = minute_of_day(at);
        Self {
            start_min,
            end_min: start_min + minutes,
        }
    }

    /// Duration of this window (minutes).
    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Whether the window has positive length.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.end_min > self.start_min
    }

    /// Whether a minute offset falls within this window.
    #[inline]
    pub fn contains(&self, minute: i64) -> bool {
        minute >= self.start_min && minute < self.end_min
    }

    /// Whether `other` lies entirely inside this window.
    pub fn encloses(&self, other: &Self) -> bool {
        other.start_min >= self.start_min && other.end_min <= self.end_min
    }

    /// Whether two windows overlap.
    ///
    /// `[a, b)` and `[c, d)` overlap iff `a < d && c < b`.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }

    /// Overlap duration with another window (minutes), if any.
    pub fn overlap_min(&self, other: &Self) -> Option<i64> {
        let start = self.start_min.max(other.start_min);
        let end = self.end_min.min(other.end_min);
        if end > start {
            Some(end - start)
        } else {
            None
        }
    }

    /// Start label (`HH:MM`).
    pub fn start_label(&self) -> String {
        clock_label(self.start_min)
    }

    /// End label (`HH:MM`).
    pub fn end_label(&self) -> String {
        clock_label(self.end_min)
    }

    /// Whether this window runs past midnight of the anchor day.
    pub fn crosses_midnight(&self) -> bool {
        self.end_min > MINUTES_PER_DAY
    }
}

/// Minute of day of a clock time (seconds are dropped).
fn minute_of_day(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Formats a minute offset as a wall-clock `HH:MM` label.
///
/// Offsets past midnight wrap to the next day's clock.
pub fn clock_label(minute: i64) -> String {
    let wrapped = minute.rem_euclid(MINUTES_PER_DAY);
    NaiveTime::MIN
        .overflowing_add_signed(Duration::minutes(wrapped))
        .0
        .format("%H:%M")
        .to_string()
}

/// Converts a minute offset into a timestamp on the given anchor date.
pub fn at_anchor(anchor: NaiveDate, minute: i64) -> NaiveDateTime {
    anchor.and_time(NaiveTime::MIN) + Duration::minutes(minute)
}
