// SPDX-License-Identifier: MIT

//!
//! The errors shown to the user when a countdown can't be produced
//!

use crate::{Language, Message, ResolveError, RuleNotFound};
use thiserror::Error;

/// Everything that can stop a country's countdown from being shown.  All of
/// these are recovered from by showing a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CountdownError {
    /// The country has no rule (rejected before any fetch)
    #[error("No rule is defined for country `{0}`")]
    RuleNotFound(String),

    /// The fact source couldn't be reached or sent something unusable.
    /// Retryable by selecting the country again.
    #[error("Could not retrieve data for `{country}`: {reason}")]
    Transport { country: String, reason: String },

    /// The query succeeded but returned no record
    #[error("No officeholder found for `{0}`")]
    NoFactFound(String),

    /// A fixed-length country's record has no term start date
    #[error("The officeholder record for `{0}` has no term start date")]
    MissingStartDate(String),

    /// The projected term end can't be represented
    #[error("The term end for `{0}` is out of range")]
    DateOutOfRange(String),
}

impl CountdownError {
    /// Map a resolver error for the given country
    pub fn from_resolve(country: impl ToString, error: ResolveError) -> Self {
        match error {
            ResolveError::MissingStartDate => CountdownError::MissingStartDate(country.to_string()),
            ResolveError::DateOutOfRange => CountdownError::DateOutOfRange(country.to_string()),
        }
    }

    /// Whether selecting the country again might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, CountdownError::Transport { .. })
    }

    /// The message to show the user
    pub fn message(&self, language: Language) -> String {
        match self {
            CountdownError::RuleNotFound(_) => {
                language.translate(Message::ErrorUnknownCountry).to_string()
            }
            CountdownError::Transport { reason, .. } => {
                format!("{} {reason}", language.translate(Message::ErrorLoading))
            }
            CountdownError::NoFactFound(_) => language.translate(Message::ErrorNoLeader).to_string(),
            CountdownError::MissingStartDate(_) => {
                language.translate(Message::ErrorMissingStartDate).to_string()
            }
            CountdownError::DateOutOfRange(_) => {
                language.translate(Message::ErrorDateOutOfRange).to_string()
            }
        }
    }
}

impl From<RuleNotFound> for CountdownError {
    fn from(value: RuleNotFound) -> Self {
        CountdownError::RuleNotFound(value.0)
    }
}
