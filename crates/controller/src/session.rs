// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The session: which country is selected, the windows resolved so far, and
//! the countdown for the selected country.
//!
//! Everything is driven from one place (the owner of the [`Session`]).
//! Fetches run as background tasks and report back over a channel; so does
//! the countdown timer.  Both are tagged with the selection generation they
//! were started for, and anything tagged with an old generation is dropped.
//! This means a slow fetch for a previous selection can never overwrite the
//! current one, and a stopped timer's last ticks are never shown.
//!

use crate::ticker::{Tick, Ticker};
use chrono::{DateTime, Utc};
use mandate_countdown_core::{
    CountdownError, Countdown, CountryId, CountryRule, Language, RuleTable, TermCache, TermWindow,
    resolve,
};
use mandate_countdown_wikidata::{FactRequest, FactSource};
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Where "now" comes from
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The system clock
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Something for the presentation layer to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The selected country's window is available (the countdown follows)
    Resolved {
        country_id: CountryId,
        window: TermWindow,
    },

    /// The selected country's window couldn't be resolved
    Failed {
        country_id: CountryId,
        error: CountdownError,
    },

    /// The selected country's countdown was recalculated
    Tick {
        country_id: CountryId,
        countdown: Countdown,
    },
}

/// The result of a background resolution
#[derive(Debug)]
struct Resolution {
    generation: u64,
    country_id: CountryId,
    result: Result<TermWindow, CountdownError>,
}

/// The explicitly owned state of a countdown session
pub struct Session {
    rules: Arc<RuleTable>,
    cache: Arc<TermCache>,
    source: Arc<dyn FactSource>,
    language: Language,
    clock: Clock,

    /// Bumped on every selection change
    generation: u64,
    selection: Option<CountryId>,

    /// Whether the current selection's window is still being resolved
    resolving: bool,

    /// The countdown for the current selection, while it's running
    ticker: Option<Ticker>,

    tx_resolution: UnboundedSender<Resolution>,
    rx_resolution: UnboundedReceiver<Resolution>,
    tx_tick: UnboundedSender<Tick>,
    rx_tick: UnboundedReceiver<Tick>,
}

impl Session {
    pub fn new(rules: RuleTable, source: Arc<dyn FactSource>, language: Language) -> Self {
        let (tx_resolution, rx_resolution) = unbounded_channel();
        let (tx_tick, rx_tick) = unbounded_channel();
        Self {
            rules: Arc::new(rules),
            cache: Arc::new(TermCache::new()),
            source,
            language,
            clock: system_clock(),
            generation: 0,
            selection: None,
            resolving: false,
            ticker: None,
            tx_resolution,
            rx_resolution,
            tx_tick,
            rx_tick,
        }
    }

    /// Use a different clock (e.g. a fixed one in tests)
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn cache(&self) -> &TermCache {
        &self.cache
    }

    /// The currently selected country
    pub fn current_selection(&self) -> Option<&CountryId> {
        self.selection.as_ref()
    }

    /// Forget a country's resolved window so the next selection fetches again
    pub async fn invalidate(&self, country_id: &CountryId) -> bool {
        self.cache.invalidate(country_id).await
    }

    /// Change the selected country (`None` clears the selection).
    ///
    /// The previous countdown is stopped first.  An unknown country is
    /// rejected before anything is fetched.  Otherwise the window is resolved
    /// in the background (or taken from the cache) and reported by
    /// [`Session::next_event`].  Must be called from within a tokio runtime.
    pub fn select(&mut self, country_id: Option<&str>) -> Result<(), CountdownError> {
        self.ticker = None;
        self.generation += 1;
        self.selection = None;
        self.resolving = false;

        let Some(country_id) = country_id else {
            debug!("Selection cleared");
            return Ok(());
        };
        let rule = self.rules.lookup(country_id)?.clone();
        let country_id = rule.country_id().clone();
        info!("Selected {country_id} ({})", rule.name(self.language));
        self.selection = Some(country_id.clone());
        self.resolving = true;

        let generation = self.generation;
        let cache = Arc::clone(&self.cache);
        let source = Arc::clone(&self.source);
        let clock = Arc::clone(&self.clock);
        let language = self.language;
        let tx = self.tx_resolution.clone();
        tokio::spawn(async move {
            let result = cache
                .get_or_compute(&country_id, || resolve_country(source, rule, language, clock))
                .await;
            let _ = tx.send(Resolution {
                generation,
                country_id,
                result,
            });
        });

        Ok(())
    }

    /// Wait for the next thing to show.  Results & ticks that belong to an
    /// earlier selection are dropped.
    ///
    /// Returns `None` once nothing more can happen for the current selection:
    /// there is no selection, its resolution failed, or its countdown reached
    /// a final state.  Selecting again starts a new stream of events.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        loop {
            if !self.resolving && self.ticker.is_none() {
                return None;
            }
            tokio::select! {
                Some(resolution) = self.rx_resolution.recv() => {
                    if let Some(event) = self.handle_resolution(resolution) {
                        return Some(event);
                    }
                }
                Some(tick) = self.rx_tick.recv() => {
                    if let Some(event) = self.handle_tick(tick).await {
                        return Some(event);
                    }
                }
                else => return None,
            }
        }
    }

    fn handle_resolution(&mut self, resolution: Resolution) -> Option<SessionEvent> {
        let Resolution {
            generation,
            country_id,
            result,
        } = resolution;

        if generation != self.generation {
            debug!("Discarding superseded result for {country_id}");
            return None;
        }
        self.resolving = false;

        match result {
            Ok(window) => {
                self.ticker = Some(Ticker::start(
                    generation,
                    country_id.clone(),
                    window.clone(),
                    Arc::clone(&self.clock),
                    self.tx_tick.clone(),
                ));
                Some(SessionEvent::Resolved { country_id, window })
            }
            Err(error) => {
                warn!("{error}");
                Some(SessionEvent::Failed { country_id, error })
            }
        }
    }

    async fn handle_tick(&mut self, tick: Tick) -> Option<SessionEvent> {
        if tick.generation != self.generation {
            return None;
        }

        if tick.countdown.is_final() {
            // The ticker sends nothing after a final countdown
            self.ticker = None;
        }
        if tick.countdown == Countdown::Expired {
            // The cached window is over; fetch again next time it's selected
            info!("Term for {} has ended", tick.country_id);
            self.cache.invalidate(&tick.country_id).await;
        }

        Some(SessionEvent::Tick {
            country_id: tick.country_id,
            countdown: tick.countdown,
        })
    }
}

/// Fetch the fact for a country & resolve its current window
async fn resolve_country(
    source: Arc<dyn FactSource>,
    rule: CountryRule,
    language: Language,
    clock: Clock,
) -> Result<TermWindow, CountdownError> {
    let request = FactRequest::for_rule(&rule, language);
    let fact = source
        .fetch_fact(&request)
        .await
        .map_err(|error| error.for_country(rule.country_id()))?;
    resolve(&fact, &rule, clock())
        .map_err(|error| CountdownError::from_resolve(rule.country_id(), error))
}
