// SPDX-License-Identifier: MIT

//!
//! Countries & the rules used to interpret their officeholder facts
//!

use crate::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use thiserror::Error;

/// The longest nominal term a [`TermKind::FixedLength`] rule may have
pub const MAX_TERM_YEARS: u32 = 100;

/// Errors that can arise when building country rules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CountryError {
    #[error("`{0}` is not a Wikidata item ID (e.g. Q30)")]
    InvalidCountryId(String),

    #[error("`{0}` is not a Wikidata property ID (e.g. P35)")]
    InvalidPositionRef(String),

    #[error("A term of {0} years is not allowed (must be 1 <= years <= {MAX_TERM_YEARS})")]
    InvalidTermLength(u32),

    #[error("Country `{0}` is defined more than once")]
    DuplicateCountry(CountryId),
}

/// Returned when looking up a country that has no rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No rule is defined for country `{0}`")]
pub struct RuleNotFound(pub String);

/// A Wikidata item ID identifying a country (e.g. `Q142`)
#[derive(derive_more::Display, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CountryId(String);

/// A Wikidata property ID identifying the office queried (e.g. `P35`, "head
/// of state")
#[derive(derive_more::Display, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PositionRef(String);

/// Whether `value` is `prefix` followed by at least one ASCII digit
fn is_wikidata_id(value: &str, prefix: char) -> bool {
    value
        .strip_prefix(prefix)
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

impl CountryId {
    /// Create a country ID if the string is a valid Wikidata item ID
    pub fn from<S: ToString>(id: S) -> Result<Self, CountryError> {
        let id = id.to_string().trim().to_ascii_uppercase();
        if is_wikidata_id(&id, 'Q') {
            Ok(CountryId(id))
        } else {
            Err(CountryError::InvalidCountryId(id))
        }
    }

    /// Get the underlying `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PositionRef {
    /// Create a position reference if the string is a valid Wikidata property
    /// ID
    pub fn from<S: ToString>(id: S) -> Result<Self, CountryError> {
        let id = id.to_string().trim().to_ascii_uppercase();
        if is_wikidata_id(&id, 'P') {
            Ok(PositionRef(id))
        } else {
            Err(CountryError::InvalidPositionRef(id))
        }
    }

    /// "Head of state"
    pub fn head_of_state() -> Self {
        PositionRef(String::from("P35"))
    }

    /// Get the underlying `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CountryId {
    type Error = CountryError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        CountryId::from(value)
    }
}

impl From<CountryId> for String {
    fn from(value: CountryId) -> Self {
        value.0
    }
}

impl TryFrom<String> for PositionRef {
    type Error = CountryError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        PositionRef::from(value)
    }
}

impl From<PositionRef> for String {
    fn from(value: PositionRef) -> Self {
        value.0
    }
}

/// How the term of an office is bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermKind {
    /// Back-to-back terms of a fixed number of calendar years
    FixedLength { years: NonZeroU32 },

    /// No computable end (monarchies, life tenures, ...)
    Unlimited,
}

impl TermKind {
    /// A fixed-length term, if the length is allowed
    pub fn fixed(years: u32) -> Result<Self, CountryError> {
        match NonZeroU32::new(years) {
            Some(years) if years.get() <= MAX_TERM_YEARS => Ok(TermKind::FixedLength { years }),
            _ => Err(CountryError::InvalidTermLength(years)),
        }
    }

    /// The nominal term length, if there is one
    pub fn years(&self) -> Option<u32> {
        match self {
            TermKind::FixedLength { years } => Some(years.get()),
            TermKind::Unlimited => None,
        }
    }
}

/// The display names of a country
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryNames {
    pub english: String,
    pub french: String,
}

impl CountryNames {
    /// The name in the given language
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::English => &self.english,
            Language::French => &self.french,
        }
    }
}

/// Identifies a country and how to interpret the facts fetched for it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryRule {
    country_id: CountryId,
    term_kind: TermKind,
    position_ref: PositionRef,
    names: CountryNames,
}

impl CountryRule {
    pub fn new(
        country_id: CountryId,
        term_kind: TermKind,
        position_ref: PositionRef,
        names: CountryNames,
    ) -> Self {
        Self {
            country_id,
            term_kind,
            position_ref,
            names,
        }
    }

    pub fn country_id(&self) -> &CountryId {
        &self.country_id
    }

    pub fn term_kind(&self) -> TermKind {
        self.term_kind
    }

    pub fn position_ref(&self) -> &PositionRef {
        &self.position_ref
    }

    /// The country's display name in the given language
    pub fn name(&self, language: Language) -> &str {
        self.names.get(language)
    }
}

/// (ID, nominal term years or `None` if unlimited, English name, French name)
#[rustfmt::skip]
const BUILTIN_RULES: &[(&str, Option<u32>, &str, &str)] = &[
    ("Q30",   Some(4), "United States",  "États-Unis"),
    ("Q96",   Some(6), "Mexico",         "Mexique"),
    ("Q155",  Some(4), "Brazil",         "Brésil"),
    ("Q414",  Some(4), "Argentina",      "Argentine"),
    ("Q142",  Some(5), "France",         "France"),
    ("Q159",  Some(6), "Russia",         "Russie"),
    ("Q183",  Some(5), "Germany",        "Allemagne"),
    ("Q38",   Some(7), "Italy",          "Italie"),
    ("Q145",  None,    "United Kingdom", "Royaume-Uni"),
    ("Q29",   None,    "Spain",          "Espagne"),
    ("Q16",   None,    "Canada",         "Canada"),
    ("Q17",   None,    "Japan",          "Japon"),
    ("Q408",  None,    "Australia",      "Australie"),
    ("Q423",  None,    "North Korea",    "Corée du Nord"),
    ("Q668",  Some(5), "India",          "Inde"),
    ("Q884",  Some(5), "South Korea",    "Corée du Sud"),
    ("Q115",  Some(5), "South Africa",   "Afrique du Sud"),
    ("Q962",  Some(5), "Benin",          "Bénin"),
    ("Q1032", Some(4), "Nigeria",        "Nigéria"),
];

/// The immutable table of [`CountryRule`]s, keyed by [`CountryId`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: BTreeMap<CountryId, CountryRule>,
}

impl RuleTable {
    /// Build a table, rejecting duplicate country IDs
    pub fn new(rules: Vec<CountryRule>) -> Result<Self, CountryError> {
        let mut map = BTreeMap::new();
        for rule in rules {
            let id = rule.country_id().clone();
            if map.insert(id.clone(), rule).is_some() {
                return Err(CountryError::DuplicateCountry(id));
            }
        }
        Ok(Self { rules: map })
    }

    /// The rules shipped with the application
    pub fn builtin() -> Result<Self, CountryError> {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(id, years, english, french)| -> Result<CountryRule, CountryError> {
                let term_kind = match years {
                    Some(years) => TermKind::fixed(*years)?,
                    None => TermKind::Unlimited,
                };
                let names = CountryNames {
                    english: english.to_string(),
                    french: french.to_string(),
                };
                Ok(CountryRule::new(
                    CountryId::from(id)?,
                    term_kind,
                    PositionRef::head_of_state(),
                    names,
                ))
            })
            .collect::<Result<Vec<_>, CountryError>>()?;
        Self::new(rules)
    }

    /// Look up the rule for a country
    pub fn lookup(&self, country_id: &str) -> Result<&CountryRule, RuleNotFound> {
        CountryId::from(country_id)
            .ok()
            .and_then(|id| self.rules.get(&id))
            .ok_or_else(|| RuleNotFound(country_id.to_string()))
    }

    /// All rules, ordered by country ID
    pub fn all(&self) -> impl Iterator<Item = &CountryRule> {
        self.rules.values()
    }

    /// All rules ordered alphabetically by their name in the given language
    pub fn sorted_for(&self, language: Language) -> Vec<&CountryRule> {
        let mut rules: Vec<&CountryRule> = self.rules.values().collect();
        rules.sort_by_cached_key(|rule| collation_key(rule.name(language)));
        rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Sort key that orders accented letters alongside their base letter
fn collation_key(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' | 'À' | 'Â' | 'Ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
            'î' | 'ï' | 'Î' | 'Ï' => 'i',
            'ô' | 'ö' | 'Ô' | 'Ö' => 'o',
            'ù' | 'û' | 'ü' | 'Ù' | 'Û' | 'Ü' => 'u',
            'ç' | 'Ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn country_id() {
        assert!(CountryId::from("Q30").is_ok());
        assert_eq!(CountryId::from(" q142 ").unwrap().as_str(), "Q142");
        assert!(CountryId::from("Q").is_err());
        assert!(CountryId::from("P35").is_err());
        assert!(CountryId::from("Q30a").is_err());
        assert!(serde_json::from_str::<CountryId>(r#""France""#).is_err());
    }

    #[test]
    fn term_kind() {
        assert!(TermKind::fixed(0).is_err());
        assert!(TermKind::fixed(MAX_TERM_YEARS + 1).is_err());
        assert_eq!(TermKind::fixed(4).unwrap().years(), Some(4));
        assert_eq!(TermKind::Unlimited.years(), None);
    }

    mod table {
        use super::*;

        #[test]
        fn builtin() {
            let table = RuleTable::builtin().unwrap();
            assert_eq!(table.len(), 19);

            let france = table.lookup("Q142").unwrap();
            assert_eq!(france.term_kind().years(), Some(5));
            assert_eq!(france.position_ref().as_str(), "P35");

            let uk = table.lookup("Q145").unwrap();
            assert_eq!(uk.term_kind(), TermKind::Unlimited);
            assert_eq!(uk.name(Language::French), "Royaume-Uni");
        }

        #[test]
        fn lookup_not_found() {
            let table = RuleTable::builtin().unwrap();
            assert_eq!(table.lookup("Q1"), Err(RuleNotFound(String::from("Q1"))));
            assert!(table.lookup("not an id").is_err());
        }

        #[test]
        fn duplicates_rejected() {
            let rule = RuleTable::builtin()
                .unwrap()
                .lookup("Q30")
                .unwrap()
                .clone();
            let result = RuleTable::new(vec![rule.clone(), rule]);
            assert!(matches!(result, Err(CountryError::DuplicateCountry(_))));
        }

        #[test]
        fn sorted_for_language() {
            let table = RuleTable::builtin().unwrap();

            let english: Vec<&str> = table
                .sorted_for(Language::English)
                .iter()
                .map(|rule| rule.name(Language::English))
                .collect();
            assert_eq!(english.first(), Some(&"Argentina"));
            assert_eq!(english.last(), Some(&"United States"));

            // "États-Unis" sorts with the Es, not after "Russie"
            let french: Vec<&str> = table
                .sorted_for(Language::French)
                .iter()
                .map(|rule| rule.name(Language::French))
                .collect();
            let etats_unis = french.iter().position(|n| *n == "États-Unis").unwrap();
            let espagne = french.iter().position(|n| *n == "Espagne").unwrap();
            let france = french.iter().position(|n| *n == "France").unwrap();
            assert!(espagne < etats_unis && etats_unis < france);
        }
    }
}
