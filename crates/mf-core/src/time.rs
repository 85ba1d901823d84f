//! Simulated time model.
//!
//! # Design
//!
//! Time is a `SimTime`: milliseconds since the Unix epoch (UTC), held in an
//! `i64`.  Input records are dated by calendar month, entities arrive at
//! arbitrary instants within that month, and the renderer advances the clock
//! by a fixed number of simulated milliseconds per animation frame:
//!
//!   frame_time(n) = start + n * frame_duration_ms
//!
//! Integer milliseconds keep comparisons exact and ordering total, which the
//! sorted-population activation cursor relies on.

use std::fmt;

use chrono::{DateTime, NaiveDate};

use crate::{CoreError, CoreResult};

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated instant, in milliseconds since the Unix epoch (UTC).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub i64);

impl SimTime {
    pub const EPOCH: SimTime = SimTime(0);

    #[inline]
    pub fn from_millis(ms: i64) -> SimTime {
        SimTime(ms)
    }

    #[inline]
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// The instant `hours` (possibly fractional) after `self`, rounded to the
    /// nearest millisecond.  Negative `hours` move backwards.
    #[inline]
    pub fn plus_hours(self, hours: f64) -> SimTime {
        SimTime(self.0 + (hours * MS_PER_HOUR as f64).round() as i64)
    }

    /// Milliseconds elapsed from `earlier` to `self` (negative if `earlier`
    /// is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> i64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<i64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: i64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: SimTime) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp_millis(self.0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.3f")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

fn first_of_month(month: u32, year: i32) -> CoreResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CoreError::InvalidMonth { month, year })
}

/// Instant of 00:00 UTC on the first day of `month` (1–12) in `year`.
pub fn month_start(month: u32, year: i32) -> CoreResult<SimTime> {
    let first = first_of_month(month, year)?;
    let midnight = first
        .and_hms_opt(0, 0, 0)
        .ok_or(CoreError::InvalidMonth { month, year })?;
    Ok(SimTime(midnight.and_utc().timestamp_millis()))
}

/// Number of days in `month` (1–12) of `year`, Gregorian leap-year rules.
pub fn days_in_month(month: u32, year: i32) -> CoreResult<u32> {
    let first = first_of_month(month, year)?;
    let next = if month == 12 {
        first_of_month(1, year + 1)?
    } else {
        first_of_month(month + 1, year)?
    };
    Ok(next.signed_duration_since(first).num_days() as u32)
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Advances simulated time by a fixed step per animation frame.
///
/// `FrameClock` is cheap to copy and holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// Simulated milliseconds per frame.
    pub frame_duration_ms: i64,
    /// The current instant, moved forward by `FrameClock::advance()`.
    pub current: SimTime,
    /// Frames elapsed since construction.
    pub frame: u64,
}

impl FrameClock {
    pub fn new(start: SimTime, frame_duration_ms: i64) -> Self {
        Self {
            frame_duration_ms,
            current: start,
            frame: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> SimTime {
        self.current
    }

    /// Advance the clock by one frame.
    #[inline]
    pub fn advance(&mut self) {
        self.current = self.current + self.frame_duration_ms;
        self.frame += 1;
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {} ({})", self.frame, self.current)
    }
}
