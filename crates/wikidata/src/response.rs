// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! SPARQL JSON results (the parts that are used)
//!

use crate::FetchError;
use chrono::{DateTime, Utc};
use mandate_countdown_core::{Name, RawTermFact};
use serde::Deserialize;

/// A SPARQL JSON results document
#[derive(Debug, Deserialize)]
pub struct SparqlResponse<B> {
    pub results: SparqlResults<B>,
}

#[derive(Debug, Deserialize)]
pub struct SparqlResults<B> {
    pub bindings: Vec<B>,
}

/// A single bound value (only the lexical value is used)
#[derive(Debug, Clone, Deserialize)]
pub struct BindingValue {
    pub value: String,
}

/// A row of the officeholder query
#[derive(Debug, Clone, Deserialize)]
pub struct OfficeholderBinding {
    pub leader: Option<BindingValue>,

    #[serde(rename = "leaderLabel")]
    pub leader_label: BindingValue,

    pub photo: Option<BindingValue>,

    #[serde(rename = "startTime")]
    pub start_time: Option<BindingValue>,
}

/// A row of the position held query
#[derive(Debug, Clone, Deserialize)]
pub struct StartTimeBinding {
    #[serde(rename = "startTime")]
    pub start_time: Option<BindingValue>,
}

impl<B> SparqlResponse<B> {
    /// The first row (the queries are ordered & limited to one row)
    pub fn into_first(self) -> Option<B> {
        self.results.bindings.into_iter().next()
    }
}

impl OfficeholderBinding {
    /// The holder's item ID (e.g. `Q3052772`), taken from the entity URI
    pub fn holder_id(&self) -> Option<&str> {
        self.leader
            .as_ref()
            .and_then(|leader| leader.value.rsplit('/').next())
            .filter(|id| id.starts_with('Q'))
    }

    /// Convert to a [`RawTermFact`].  An unreadable start time is treated as
    /// missing.
    pub fn to_fact(&self) -> Result<RawTermFact, FetchError> {
        let holder_name = Name::from(&self.leader_label.value)?;
        let portrait_url = self.photo.as_ref().map(|photo| photo.value.clone());
        let term_start = self.start_time.as_ref().and_then(parse_start_time);
        Ok(RawTermFact::new(holder_name, portrait_url, term_start))
    }
}

impl StartTimeBinding {
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time.as_ref().and_then(parse_start_time)
    }
}

/// Parse an `xsd:dateTime` value (e.g. `2017-05-14T00:00:00Z`)
fn parse_start_time(value: &BindingValue) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(&value.value) {
        Ok(start) => Some(start.with_timezone(&Utc)),
        Err(error) => {
            warn!("Ignoring unreadable start time `{}`: {error}", value.value);
            None
        }
    }
}
