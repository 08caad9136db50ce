// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Fact retrieval errors
//!

use mandate_countdown_core::{CountdownError, CountryId, NameError};
use thiserror::Error;

/// Errors that can occur when fetching a fact
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint couldn't be reached, answered with an error status, or
    /// sent a body that isn't SPARQL JSON results
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// The configured endpoint isn't a URL
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// The query succeeded but returned no record
    #[error("The query returned no officeholder")]
    NoFactFound,

    /// The record's holder has no usable name
    #[error("The officeholder record has an invalid name: {0}")]
    InvalidName(#[from] NameError),
}

impl FetchError {
    /// Convert to the error shown to the user for the given country
    pub fn for_country(self, country_id: &CountryId) -> CountdownError {
        let country = country_id.to_string();
        match self {
            FetchError::Reqwest(error) => CountdownError::Transport {
                country,
                reason: error.to_string(),
            },
            FetchError::InvalidEndpoint(reason) => CountdownError::Transport { country, reason },
            FetchError::NoFactFound | FetchError::InvalidName(_) => {
                CountdownError::NoFactFound(country)
            }
        }
    }
}
