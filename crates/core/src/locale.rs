// SPDX-License-Identifier: MIT

//!
//! Languages & the user-facing message tables
//!

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// The languages messages & country names are available in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,

    #[serde(rename = "fr")]
    French,
}

/// The user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    Title,
    Subtitle,
    CountrySelectPlaceholder,
    Days,
    Hours,
    Minutes,
    Seconds,
    UnlimitedTerm,
    EndDatePrefix,
    TermEnded,
    ErrorLoading,
    ErrorNoLeader,
    ErrorMissingStartDate,
    ErrorUnknownCountry,
    ErrorDateOutOfRange,
}

impl Language {
    /// All supported languages
    pub fn all() -> [Language; 2] {
        [Language::English, Language::French]
    }

    /// The ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
        }
    }

    /// Parse a language tag such as `fr`, `fr-CA` or `fr_FR.UTF-8`.  Only the
    /// primary subtag is considered.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Language::English),
            "fr" => Some(Language::French),
            _ => None,
        }
    }

    /// Detect the user's language from the environment, falling back to
    /// English if the language isn't supported
    pub fn detect() -> Self {
        let detected = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| Language::from_tag(&value))
            .unwrap_or_default();
        debug!("Detected language = {detected:?}");
        detected
    }

    /// Value for the SPARQL label service (preferred language, then English)
    pub fn label_service_languages(&self) -> String {
        match self {
            Language::English => String::from("en"),
            other => format!("{},en", other.code()),
        }
    }

    /// Get a message in this language
    pub fn translate(&self, message: Message) -> &'static str {
        match self {
            Language::English => english(message),
            Language::French => french(message),
        }
    }

    /// Format a date the way it is written in this language, e.g.
    /// "May 14, 2025" or "14 mai 2025"
    pub fn long_date(&self, instant: DateTime<Utc>) -> String {
        let day = instant.day();
        let month = self.month_name(instant.month());
        let year = instant.year();
        match self {
            Language::English => format!("{month} {day}, {year}"),
            Language::French => format!("{day} {month} {year}"),
        }
    }

    fn month_name(&self, month: u32) -> &'static str {
        const ENGLISH: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        const FRENCH: [&str; 12] = [
            "janvier",
            "février",
            "mars",
            "avril",
            "mai",
            "juin",
            "juillet",
            "août",
            "septembre",
            "octobre",
            "novembre",
            "décembre",
        ];
        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            Language::English => ENGLISH[index],
            Language::French => FRENCH[index],
        }
    }
}

fn english(message: Message) -> &'static str {
    match message {
        Message::Title => "Presidential Countdown",
        Message::Subtitle => "How much time does he/she have left?",
        Message::CountrySelectPlaceholder => "-- Choose a country --",
        Message::Days => "Days",
        Message::Hours => "Hours",
        Message::Minutes => "Minutes",
        Message::Seconds => "Seconds",
        Message::UnlimitedTerm => "Unlimited term",
        Message::EndDatePrefix => "End of term scheduled for",
        Message::TermEnded => "The term is over!",
        Message::ErrorLoading => "Could not retrieve data.",
        Message::ErrorNoLeader => "Could not find current leader data.",
        Message::ErrorMissingStartDate => "The current leader's term start date is unknown.",
        Message::ErrorUnknownCountry => "No rules are defined for this country.",
        Message::ErrorDateOutOfRange => "The end of term cannot be calculated.",
    }
}

fn french(message: Message) -> &'static str {
    match message {
        Message::Title => "Compteur Présidentiel",
        Message::Subtitle => "Combien de temps lui reste-t-il ?",
        Message::CountrySelectPlaceholder => "-- Choisissez un pays --",
        Message::Days => "Jours",
        Message::Hours => "Heures",
        Message::Minutes => "Minutes",
        Message::Seconds => "Secondes",
        Message::UnlimitedTerm => "Mandat à durée indéterminée",
        Message::EndDatePrefix => "Fin du mandat prévue le",
        Message::TermEnded => "Le mandat est terminé !",
        Message::ErrorLoading => "Impossible de récupérer les données.",
        Message::ErrorNoLeader => "Impossible de trouver les données du dirigeant actuel.",
        Message::ErrorMissingStartDate => {
            "La date de début du mandat du dirigeant actuel est inconnue."
        }
        Message::ErrorUnknownCountry => "Aucune règle définie pour ce pays.",
        Message::ErrorDateOutOfRange => "La fin du mandat ne peut pas être calculée.",
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn from_tag() {
        assert_eq!(Language::from_tag("fr"), Some(Language::French));
        assert_eq!(Language::from_tag("fr-CA"), Some(Language::French));
        assert_eq!(Language::from_tag("fr_FR.UTF-8"), Some(Language::French));
        assert_eq!(Language::from_tag("EN_gb"), Some(Language::English));
        assert_eq!(Language::from_tag("de_DE"), None);
        assert_eq!(Language::from_tag(""), None);
    }

    #[test]
    fn label_service_languages() {
        assert_eq!(Language::English.label_service_languages(), "en");
        assert_eq!(Language::French.label_service_languages(), "fr,en");
    }

    #[test]
    fn long_date() {
        let date = Utc.with_ymd_and_hms(2025, 5, 14, 0, 0, 0).unwrap();
        assert_eq!(Language::English.long_date(date), "May 14, 2025");
        assert_eq!(Language::French.long_date(date), "14 mai 2025");
    }

    #[test]
    fn serde_codes() {
        assert_eq!(serde_json::to_string(&Language::French).unwrap(), r#""fr""#);
        let language: Language = serde_json::from_str(r#""en""#).unwrap();
        assert_eq!(language, Language::English);
    }
}
