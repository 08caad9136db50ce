// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Mandate Countdown project*
//!
//! This library crate fetches officeholder facts from the Wikidata SPARQL
//! endpoint.  It does the following:
//!
//! - Builds the officeholder query for a country's office
//! - Runs it & turns the first row into a `RawTermFact`
//! - Falls back to the holder's own "position held" statements when the
//! country's statement has no start date
//! - Loads portraits, falling back to a placeholder image
//!
//! Facts are fetched through the [`FactSource`] trait so that the controller
//! can be used with other sources (e.g. stubs in tests).
//!

mod client;
mod error;
mod portrait;
mod query;
mod response;
#[cfg(test)]
mod test_server;

pub use client::*;
pub use error::*;
pub use portrait::*;
pub use query::*;

use async_trait::async_trait;
use mandate_countdown_core::{CountryId, CountryRule, Language, PositionRef, RawTermFact, TermKind};

#[macro_use]
extern crate log;

/// What to fetch a fact for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FactRequest {
    pub country_id: CountryId,
    pub position_ref: PositionRef,

    /// Preferred language for the holder's name
    pub language: Language,

    /// Whether the fact is useless without a start date (fixed-length terms)
    pub needs_start_date: bool,
}

impl FactRequest {
    /// The request for a country's rule
    pub fn for_rule(rule: &CountryRule, language: Language) -> Self {
        Self {
            country_id: rule.country_id().clone(),
            position_ref: rule.position_ref().clone(),
            language,
            needs_start_date: matches!(rule.term_kind(), TermKind::FixedLength { .. }),
        }
    }
}

/// Implementing types can fetch the most recent officeholder fact for an
/// office.  Zero results must be reported as [`FetchError::NoFactFound`], not
/// as a transport error.
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch_fact(&self, request: &FactRequest) -> Result<RawTermFact, FetchError>;
}
