// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The Wikidata SPARQL endpoint client
//!

use crate::query::{officeholder_query, position_held_query};
use crate::response::{OfficeholderBinding, SparqlResponse, StartTimeBinding};
use crate::{FactRequest, FactSource, FetchError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mandate_countdown_core::RawTermFact;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// The public Wikidata Query Service
pub const DEFAULT_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Sent with every request (the Wikidata Query Service asks clients to
/// identify themselves)
pub const DEFAULT_USER_AGENT: &str = concat!(
    "mandate-countdown/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/mandate-countdown/mandate-countdown)"
);

/// How the client talks to the endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout: Duration,

    /// Whether to look for a missing start date in the holder's own
    /// "position held" statements
    pub fallback_query: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: String::from(DEFAULT_ENDPOINT),
            user_agent: String::from(DEFAULT_USER_AGENT),
            timeout: Duration::from_secs(30),
            fallback_query: true,
        }
    }
}

/// Fetches officeholder facts from a SPARQL endpoint
#[derive(Debug, Clone)]
pub struct WikidataClient {
    http: Client,
    settings: ClientSettings,
}

impl WikidataClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        // Check the endpoint now rather than on every query
        Url::parse(&settings.endpoint)
            .map_err(|error| FetchError::InvalidEndpoint(format!("{}: {error}", settings.endpoint)))?;
        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// The underlying HTTP client (shared with e.g. portrait loading)
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Run a query & deserialize the results
    async fn run_query<B: DeserializeOwned>(
        &self,
        query: &str,
    ) -> Result<SparqlResponse<B>, FetchError> {
        let url = Url::parse_with_params(
            &self.settings.endpoint,
            &[("query", query), ("format", "json")],
        )
        .map_err(|error| FetchError::InvalidEndpoint(error.to_string()))?;
        debug!("Querying {}", self.settings.endpoint);
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;
        let results: SparqlResponse<B> = response.json().await?;
        debug!("Query returned {} row(s)", results.results.bindings.len());
        Ok(results)
    }

    /// The start of the holder's current term according to their own
    /// "position held" statements
    async fn position_held_start(
        &self,
        holder_id: &str,
        request: &FactRequest,
    ) -> Result<Option<DateTime<Utc>>, FetchError> {
        let Some(query) =
            position_held_query(holder_id, &request.country_id, &request.position_ref)
        else {
            debug!("No office known for {}", request.position_ref);
            return Ok(None);
        };
        let response: SparqlResponse<StartTimeBinding> = self.run_query(&query).await?;
        Ok(response
            .into_first()
            .and_then(|binding| binding.start_time()))
    }
}

#[async_trait]
impl FactSource for WikidataClient {
    async fn fetch_fact(&self, request: &FactRequest) -> Result<RawTermFact, FetchError> {
        info!(
            "Fetching {} officeholder for {} ({})",
            request.position_ref,
            request.country_id,
            request.language.code()
        );
        let query = officeholder_query(&request.country_id, &request.position_ref, request.language);
        let response: SparqlResponse<OfficeholderBinding> = self.run_query(&query).await?;
        let binding = response.into_first().ok_or(FetchError::NoFactFound)?;
        let mut fact = binding.to_fact()?;

        let wants_fallback = request.needs_start_date && self.settings.fallback_query;
        if fact.term_start().is_none() && wants_fallback {
            match binding.holder_id() {
                Some(holder_id) => {
                    // Best effort: the primary fact is still returned on failure
                    match self.position_held_start(holder_id, request).await {
                        Ok(Some(start)) => {
                            info!("Found start date {start} via {holder_id}'s positions held");
                            fact.set_term_start(start);
                        }
                        Ok(None) => debug!("No start date in {holder_id}'s positions held"),
                        Err(error) => warn!("Position held query failed: {error}"),
                    }
                }
                None => debug!("No holder ID to run the position held query with"),
            }
        }

        Ok(fact)
    }
}
