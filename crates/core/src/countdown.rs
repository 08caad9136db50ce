// SPDX-License-Identifier: MIT

//!
//! The countdown to the end of a term
//!

use crate::TermWindow;
use chrono::{DateTime, Utc};
use std::fmt;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// The state of a countdown at some instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// The term has no end date (show a distinct indicator, not zeroes)
    NoEndDate,

    /// The term ended at or before the instant
    Expired,

    /// Time remaining until the end of the term
    Running(Remaining),
}

/// Remaining time split into days, hours, minutes & seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Remaining {
    pub days: i64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Remaining {
    /// Decompose a whole number of seconds.  `None` if there's no time left.
    pub fn from_seconds(total_seconds: i64) -> Option<Self> {
        if total_seconds <= 0 {
            return None;
        }
        Some(Self {
            days: total_seconds / SECONDS_PER_DAY,
            hours: (total_seconds / SECONDS_PER_HOUR % 24) as u8,
            minutes: (total_seconds / SECONDS_PER_MINUTE % 60) as u8,
            seconds: (total_seconds % SECONDS_PER_MINUTE) as u8,
        })
    }

    /// The total in seconds
    pub fn total_seconds(&self) -> i64 {
        self.days * SECONDS_PER_DAY
            + i64::from(self.hours) * SECONDS_PER_HOUR
            + i64::from(self.minutes) * SECONDS_PER_MINUTE
            + i64::from(self.seconds)
    }
}

/// e.g. `1342d 04:07:59`
impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

impl Countdown {
    /// The countdown for a window at `now`
    pub fn at(window: &TermWindow, now: DateTime<Utc>) -> Self {
        match window.term_end() {
            None => Countdown::NoEndDate,
            Some(term_end) => {
                // Whole seconds, rounded towards zero
                let remaining = (term_end - now).num_seconds();
                match Remaining::from_seconds(remaining) {
                    Some(remaining) => Countdown::Running(remaining),
                    None => Countdown::Expired,
                }
            }
        }
    }

    /// Whether the countdown will change on later ticks
    pub fn is_final(&self) -> bool {
        !matches!(self, Countdown::Running(_))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Name;
    use chrono::{Duration, TimeZone};

    fn fixed_window(term_end: DateTime<Utc>) -> TermWindow {
        TermWindow::Fixed {
            holder_name: Name::from("Jane Doe").unwrap(),
            portrait_url: None,
            term_start: term_end - Duration::days(4 * 365),
            term_end,
        }
    }

    #[test]
    fn decompose() {
        let remaining = Remaining::from_seconds(90_061).unwrap();
        assert_eq!(
            remaining,
            Remaining {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
        assert_eq!(remaining.total_seconds(), 90_061);
        assert_eq!(remaining.to_string(), "1d 01:01:01");

        let remaining = Remaining::from_seconds(86_399).unwrap();
        assert_eq!((remaining.days, remaining.hours), (0, 23));
        assert_eq!((remaining.minutes, remaining.seconds), (59, 59));
    }

    #[test]
    fn nothing_left() {
        assert_eq!(Remaining::from_seconds(0), None);
        assert_eq!(Remaining::from_seconds(-5), None);
    }

    #[test]
    fn at() {
        let term_end = Utc.with_ymd_and_hms(2028, 5, 1, 0, 0, 0).unwrap();
        let window = fixed_window(term_end);

        let countdown = Countdown::at(&window, term_end - Duration::seconds(90_061));
        assert!(matches!(countdown, Countdown::Running(r) if r.total_seconds() == 90_061));

        // Exactly at the end is expired
        assert_eq!(Countdown::at(&window, term_end), Countdown::Expired);
        assert_eq!(
            Countdown::at(&window, term_end + Duration::days(1)),
            Countdown::Expired
        );

        // Less than a second left is expired
        assert_eq!(
            Countdown::at(&window, term_end - Duration::milliseconds(400)),
            Countdown::Expired
        );
    }

    #[test]
    fn unlimited_has_no_end_date() {
        let window = TermWindow::Unlimited {
            holder_name: Name::from("Charles III").unwrap(),
            portrait_url: None,
        };
        let countdown = Countdown::at(&window, Utc::now());
        assert_eq!(countdown, Countdown::NoEndDate);
        assert!(countdown.is_final());
    }
}
