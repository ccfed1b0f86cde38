//! Time window calculation utilities.
//!
//! A course period is cached in fixed-length windows. This module computes those windows
//! deterministically from the period boundaries so every run, for every wiki, agrees on the
//! window keys the timeslice records are stored under.

use chrono::{Duration, NaiveDateTime};

use crate::{error::Error, model::timeslice::Window};

/// Splits a course period into contiguous, non-overlapping cache windows.
///
/// Windows are `chunk` long and aligned to `start`. The final window is truncated to
/// `min(end, now)` and is closed so that it also contains its end instant.
///
/// # Arguments
/// - `start` - Beginning of the period
/// - `end` - End of the period
/// - `now` - Current time; activity after it cannot exist yet
/// - `chunk` - Window length
///
/// # Returns
/// - `Ok(Vec<Window>)` - Windows in increasing time order, empty when the period has not started
/// - `Err(Error::InvalidCoursePeriod)` - `end` is before `start`
/// - `Err(Error::InternalError)` - `chunk` is not positive or the calculation overflowed
///
/// # Example
/// ```ignore
/// // 2018-11-23T00:00 .. 2018-11-30T00:00 with 1 day chunks yields 7 windows,
/// // the last being 2018-11-29T00:00 ..= 2018-11-30T00:00
/// let windows = enumerate_windows(start, end, now, Duration::days(1))?;
/// ```
pub fn enumerate_windows(
    start: NaiveDateTime,
    end: NaiveDateTime,
    now: NaiveDateTime,
    chunk: Duration,
) -> Result<Vec<Window>, Error> {
    if end < start {
        return Err(Error::InvalidCoursePeriod { start, end });
    }
    if chunk <= Duration::zero() {
        return Err(Error::InternalError(format!(
            "Timeslice duration must be positive, got {} seconds",
            chunk.num_seconds()
        )));
    }

    let limit = end.min(now);
    if limit < start {
        return Ok(Vec::new());
    }

    let mut windows = Vec::new();
    let mut window_start = start;
    loop {
        let next = window_start.checked_add_signed(chunk).ok_or_else(|| {
            Error::InternalError(format!(
                "Window starting at {} overflows the supported time range",
                window_start
            ))
        })?;

        if next >= limit {
            windows.push(Window {
                start: window_start,
                end: limit,
                closed: true,
            });
            break;
        }

        windows.push(Window {
            start: window_start,
            end: next,
            closed: false,
        });
        window_start = next;
    }

    Ok(windows)
}

/// Finds the window containing `timestamp`, if any.
pub fn window_for(windows: &[Window], timestamp: NaiveDateTime) -> Option<Window> {
    let index = windows.partition_point(|window| window.end <= timestamp && !window.closed);
    windows
        .get(index)
        .copied()
        .filter(|window| window.contains(timestamp))
}

/// Number of days a period spans, rounded up.
pub fn span_days(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let span = end - start;
    if span <= Duration::zero() {
        return 0;
    }

    let days = span.num_days();
    if span > Duration::days(days) {
        days + 1
    } else {
        days
    }
}
