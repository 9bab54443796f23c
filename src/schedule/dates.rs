//! Calendar rules: day keys, cycle due dates and reset boundaries.
//!
//! Everything here is a pure function of a [`NaiveDate`] in the user's local
//! calendar. Weeks run Monday through Sunday.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use tracing::warn;

use super::period::Period;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical `YYYY-MM-DD` key for a calendar day.
///
/// Keys sort lexicographically in date order.
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Parses a day key back into a date.
///
/// Returns `None` for anything that is not a `YYYY-MM-DD` date.
#[must_use]
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(key.trim(), DAY_KEY_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(key, error = %err, "not a valid day key");
            None
        }
    }
}

/// Due date for an instance posted `today` in a cycle of `period`.
///
/// - week: the coming Sunday, or today when today is Sunday
/// - month: the last day of the current month
/// - year: December 31 of the current year
/// - anything else: today
#[must_use]
pub fn due_date(period: &Period, today: NaiveDate) -> NaiveDate {
    match period {
        Period::Week => {
            let remaining = 6 - today.weekday().num_days_from_monday();
            today.checked_add_days(Days::new(u64::from(remaining))).unwrap_or(today)
        }
        Period::Month => last_day_of_month(today),
        Period::Year => NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today),
        Period::Other(token) => {
            warn!(period = %token, "unknown period, defaulting due date to today");
            today
        }
    }
}

/// Whether `today` starts a new cycle that has not been reset yet.
///
/// Never true twice on the same day: once `last_reset` equals today's key the
/// boundary is considered consumed. Unknown periods never reset.
#[must_use]
pub fn is_reset_boundary(period: &Period, last_reset: &str, today: NaiveDate) -> bool {
    if day_key(today) == last_reset {
        return false;
    }
    match period {
        Period::Week => today.weekday() == Weekday::Mon,
        Period::Month => today.day() == 1,
        Period::Year => today.ordinal() == 1,
        Period::Other(_) => false,
    }
}

fn last_day_of_month(today: NaiveDate) -> NaiveDate {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).and_then(|first| first.pred_opt()).unwrap_or(today)
}
