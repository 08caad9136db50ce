// SPDX-License-Identifier: MIT

//!
//! The raw officeholder fact, as retrieved from the linked-data source
//!

use crate::Name;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single retrieved record asserting who holds an office and since when
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawTermFact {
    /// Who holds the office
    holder_name: Name,

    /// Link to a portrait of the holder
    portrait_url: Option<String>,

    /// When the holder assumed office (not every record has this)
    term_start: Option<DateTime<Utc>>,
}

impl RawTermFact {
    pub fn new(
        holder_name: Name,
        portrait_url: Option<String>,
        term_start: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            holder_name,
            portrait_url: portrait_url.filter(|url| !url.trim().is_empty()),
            term_start,
        }
    }

    pub fn holder_name(&self) -> &Name {
        &self.holder_name
    }

    pub fn portrait_url(&self) -> Option<&str> {
        self.portrait_url.as_deref()
    }

    pub fn term_start(&self) -> Option<DateTime<Utc>> {
        self.term_start
    }

    /// Set the start date (e.g. when it was found by a second query)
    pub fn set_term_start(&mut self, term_start: DateTime<Utc>) {
        self.term_start = Some(term_start);
    }
}
