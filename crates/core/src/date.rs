// SPDX-License-Identifier: MIT

//!
//! Calendar arithmetic on instants.
//!
//! Terms of office are measured in calendar years, not in a fixed number of
//! seconds: adding 4 years to noon on 14 May 2021 gives noon on 14 May 2025
//! regardless of how many leap days lie in between.
//!
//! Calendar year addition is not closed over every date.  A start date of
//! 29 February that lands in a non-leap year rolls over to 1 March of that
//! year, keeping the time of day.  Later additions continue from 1 March.
//!

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Add a whole number of calendar years to an instant.
///
/// Returns `None` only if the result falls outside the range `chrono` can
/// represent.
pub fn add_years(instant: DateTime<Utc>, years: u32) -> Option<DateTime<Utc>> {
    let date = instant.date_naive();
    let year = date.year().checked_add(i32::try_from(years).ok()?)?;
    let shifted = match NaiveDate::from_ymd_opt(year, date.month(), date.day()) {
        Some(shifted) => shifted,
        // 29 Feb in a non-leap year
        None => NaiveDate::from_ymd_opt(year, 3, 1)?,
    };
    Some(shifted.and_time(instant.time()).and_utc())
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn keeps_month_day_and_time() {
        assert_eq!(add_years(utc(2021, 5, 14, 12), 4), Some(utc(2025, 5, 14, 12)));
        assert_eq!(add_years(utc(1999, 12, 31, 23), 1), Some(utc(2000, 12, 31, 23)));
    }

    #[test]
    fn leap_day_to_leap_year() {
        assert_eq!(add_years(utc(2020, 2, 29, 9), 4), Some(utc(2024, 2, 29, 9)));
    }

    #[test]
    fn leap_day_to_non_leap_year_rolls_to_march() {
        assert_eq!(add_years(utc(2020, 2, 29, 9), 5), Some(utc(2025, 3, 1, 9)));
        assert_eq!(add_years(utc(2024, 2, 29, 0), 1), Some(utc(2025, 3, 1, 0)));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(add_years(utc(2020, 1, 1, 0), u32::MAX), None);
        assert_eq!(add_years(utc(2020, 1, 1, 0), 1_000_000), None);
    }
}
