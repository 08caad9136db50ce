// SPDX-License-Identifier: MIT

//!
//! Term windows & the resolver that projects a single "assumed office" fact
//! forward to the term that is current now.
//!
//! The record on file is often stale: it can describe a term that has already
//! finished because the holder was re-elected and nobody added a new start
//! date.  The resolver assumes the holder has served equal-length terms back
//! to back since the recorded start, and advances one term at a time until
//! the window's end is no longer in the past.  It knows nothing about actual
//! elections, so a different holder or an irregular term interrupting the
//! sequence makes the projection wrong.
//!
//! Boundary rule: the loop advances only while `end < now`, so a window that
//! ends exactly at `now` is still the current window.  Presenters treat that
//! window as expired (zero seconds remaining).
//!

use crate::{CountryRule, Name, RawTermFact, TermKind, add_years};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can arise when resolving a [`TermWindow`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// A fixed-length term can't be projected without knowing when it began
    #[error("The fact has no term start date")]
    MissingStartDate,

    /// The projected dates can't be represented
    #[error("The term end date is out of range")]
    DateOutOfRange,
}

/// The resolved term of the current officeholder
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "term_type", rename_all = "snake_case")]
pub enum TermWindow {
    /// The office has no end date
    Unlimited {
        holder_name: Name,
        portrait_url: Option<String>,
    },

    /// The `[term_start, term_end)` window that contains the resolution
    /// instant
    Fixed {
        holder_name: Name,
        portrait_url: Option<String>,
        term_start: DateTime<Utc>,
        term_end: DateTime<Utc>,
    },
}

impl TermWindow {
    pub fn holder_name(&self) -> &Name {
        match self {
            TermWindow::Unlimited { holder_name, .. } => holder_name,
            TermWindow::Fixed { holder_name, .. } => holder_name,
        }
    }

    pub fn portrait_url(&self) -> Option<&str> {
        match self {
            TermWindow::Unlimited { portrait_url, .. } => portrait_url.as_deref(),
            TermWindow::Fixed { portrait_url, .. } => portrait_url.as_deref(),
        }
    }

    pub fn term_start(&self) -> Option<DateTime<Utc>> {
        match self {
            TermWindow::Unlimited { .. } => None,
            TermWindow::Fixed { term_start, .. } => Some(*term_start),
        }
    }

    pub fn term_end(&self) -> Option<DateTime<Utc>> {
        match self {
            TermWindow::Unlimited { .. } => None,
            TermWindow::Fixed { term_end, .. } => Some(*term_end),
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, TermWindow::Unlimited { .. })
    }
}

/// Resolve the term window that is current at `now`
pub fn resolve(
    fact: &RawTermFact,
    rule: &CountryRule,
    now: DateTime<Utc>,
) -> Result<TermWindow, ResolveError> {
    let years = match rule.term_kind() {
        TermKind::Unlimited => {
            return Ok(TermWindow::Unlimited {
                holder_name: fact.holder_name().clone(),
                portrait_url: fact.portrait_url().map(String::from),
            });
        }
        TermKind::FixedLength { years } => years.get(),
    };

    let mut start = fact.term_start().ok_or(ResolveError::MissingStartDate)?;
    let mut end = add_years(start, years).ok_or(ResolveError::DateOutOfRange)?;

    // Fast-forward through completed terms.  `end` strictly increases so this
    // terminates.
    let mut steps = 0;
    while end < now {
        start = end;
        end = add_years(start, years).ok_or(ResolveError::DateOutOfRange)?;
        steps += 1;
    }
    if steps > 0 {
        debug!(
            "{}: fast-forwarded {steps} term(s) of {years} years, now {start} -> {end}",
            rule.country_id()
        );
    }

    Ok(TermWindow::Fixed {
        holder_name: fact.holder_name().clone(),
        portrait_url: fact.portrait_url().map(String::from),
        term_start: start,
        term_end: end,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{CountryId, CountryNames, PositionRef};
    use chrono::{Datelike, TimeZone};

    fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn rule(term_kind: TermKind) -> CountryRule {
        CountryRule::new(
            CountryId::from("Q30").unwrap(),
            term_kind,
            PositionRef::head_of_state(),
            CountryNames {
                english: String::from("Testland"),
                french: String::from("Testland"),
            },
        )
    }

    fn fixed(years: u32) -> CountryRule {
        rule(TermKind::fixed(years).unwrap())
    }

    fn fact(term_start: Option<DateTime<Utc>>) -> RawTermFact {
        RawTermFact::new(
            Name::from("Jane Doe").unwrap(),
            Some(String::from("https://example.org/jane.jpg")),
            term_start,
        )
    }

    mod scenarios {
        use super::*;

        #[test]
        fn no_fast_forward_needed() {
            let window = resolve(
                &fact(Some(utc(2021, 5, 14))),
                &fixed(4),
                utc(2023, 1, 1),
            )
            .unwrap();
            assert_eq!(window.term_start(), Some(utc(2021, 5, 14)));
            assert_eq!(window.term_end(), Some(utc(2025, 5, 14)));
            assert_eq!(window.holder_name().as_str(), "Jane Doe");
            assert_eq!(window.portrait_url(), Some("https://example.org/jane.jpg"));
        }

        #[test]
        fn fast_forward_through_stale_terms() {
            let window = resolve(
                &fact(Some(utc(2012, 5, 1))),
                &fixed(4),
                utc(2024, 6, 1),
            )
            .unwrap();
            assert_eq!(window.term_start(), Some(utc(2024, 5, 1)));
            assert_eq!(window.term_end(), Some(utc(2028, 5, 1)));
        }

        #[test]
        fn unlimited_has_no_dates() {
            let window = resolve(&fact(None), &rule(TermKind::Unlimited), utc(2024, 6, 1)).unwrap();
            assert!(window.is_unlimited());
            assert_eq!(window.term_start(), None);
            assert_eq!(window.term_end(), None);
        }

        #[test]
        fn missing_start_date() {
            let result = resolve(&fact(None), &fixed(5), utc(2024, 6, 1));
            assert_eq!(result, Err(ResolveError::MissingStartDate));
        }
    }

    #[test]
    fn unlimited_ignores_start_date() {
        let with = resolve(
            &fact(Some(utc(1952, 2, 6))),
            &rule(TermKind::Unlimited),
            utc(2024, 6, 1),
        )
        .unwrap();
        let without = resolve(&fact(None), &rule(TermKind::Unlimited), utc(2024, 6, 1)).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn end_equal_to_now_is_current() {
        // Loop is strict, so the window ending exactly now is not advanced
        let window = resolve(
            &fact(Some(utc(2017, 5, 14))),
            &fixed(5),
            utc(2022, 5, 14),
        )
        .unwrap();
        assert_eq!(window.term_start(), Some(utc(2017, 5, 14)));
        assert_eq!(window.term_end(), Some(utc(2022, 5, 14)));

        // One second later it is
        let later = utc(2022, 5, 14) + chrono::Duration::seconds(1);
        let window = resolve(&fact(Some(utc(2017, 5, 14))), &fixed(5), later).unwrap();
        assert_eq!(window.term_end(), Some(utc(2027, 5, 14)));
    }

    #[test]
    fn leap_day_start_rolls_forward() {
        let window = resolve(
            &fact(Some(utc(2000, 2, 29))),
            &fixed(5),
            utc(2012, 1, 1),
        )
        .unwrap();
        assert_eq!(window.term_start(), Some(utc(2010, 3, 1)));
        assert_eq!(window.term_end(), Some(utc(2015, 3, 1)));
    }

    #[test]
    fn idempotent() {
        let fact = fact(Some(utc(1990, 7, 3)));
        let rule = fixed(6);
        let now = utc(2024, 2, 29);
        assert_eq!(resolve(&fact, &rule, now), resolve(&fact, &rule, now));
    }

    // term_end = start + k*years, k >= 1, and term_end - years <= now <= term_end
    #[test]
    fn window_contains_now() {
        let start = utc(1981, 5, 21);
        for years in 1..=8 {
            for now_year in 1982..2040 {
                let now = utc(now_year, 11, 3);
                let window = resolve(&fact(Some(start)), &fixed(years), now).unwrap();
                let term_start = window.term_start().unwrap();
                let term_end = window.term_end().unwrap();

                assert_eq!(add_years(term_start, years), Some(term_end));
                assert!(term_start <= now && now <= term_end);

                let k = term_end.year() - 1981;
                assert!(k >= 1 && k % years as i32 == 0);
            }
        }
    }

    #[test]
    fn term_end_is_monotonic_in_now() {
        let fact = fact(Some(utc(2004, 1, 20)));
        let rule = fixed(4);
        let mut previous = None;
        for offset in 0..400 {
            let now = utc(2004, 1, 20) + chrono::Duration::days(offset * 30);
            let term_end = resolve(&fact, &rule, now).unwrap().term_end();
            assert!(term_end >= previous);
            previous = term_end;
        }
    }

    #[test]
    fn serialize_tagged() {
        let window = resolve(&fact(None), &rule(TermKind::Unlimited), utc(2024, 1, 1)).unwrap();
        let json = serde_json::to_value(&window).unwrap();
        assert_eq!(json["term_type"], "unlimited");
        assert!(json.get("term_end").is_none());
    }
}
