// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Plain text rendering of windows, countdowns & errors in the user's language
//!

use mandate_countdown_core::{Countdown, Language, Message, TermWindow};

/// e.g. "1342 Days  04 Hours  07 Minutes  59 Seconds", or the unlimited term /
/// term ended message
pub fn countdown_line(countdown: &Countdown, language: Language) -> String {
    match countdown {
        Countdown::NoEndDate => language.translate(Message::UnlimitedTerm).to_string(),
        Countdown::Expired => language.translate(Message::TermEnded).to_string(),
        Countdown::Running(remaining) => format!(
            "{} {}  {:02} {}  {:02} {}  {:02} {}",
            remaining.days,
            language.translate(Message::Days),
            remaining.hours,
            language.translate(Message::Hours),
            remaining.minutes,
            language.translate(Message::Minutes),
            remaining.seconds,
            language.translate(Message::Seconds),
        ),
    }
}

/// e.g. "End of term scheduled for May 14, 2025".  `None` for unlimited terms.
pub fn end_date_line(window: &TermWindow, language: Language) -> Option<String> {
    window.term_end().map(|term_end| {
        format!(
            "{} {}",
            language.translate(Message::EndDatePrefix),
            language.long_date(term_end)
        )
    })
}

/// The holder, portrait & end date of a window, one per line.  Unlimited
/// terms have no end date line: their [`countdown_line`] says so.
pub fn window_summary(country_name: &str, window: &TermWindow, language: Language) -> String {
    let mut lines = vec![format!("{country_name}: {}", window.holder_name())];
    if let Some(portrait_url) = window.portrait_url() {
        lines.push(portrait_url.to_string());
    }
    if let Some(end_date) = end_date_line(window, language) {
        lines.push(end_date);
    }
    lines.join("\n")
}
