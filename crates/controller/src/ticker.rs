// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The once-a-second countdown timer
//!

use crate::Clock;
use mandate_countdown_core::{CountryId, Countdown, TermWindow};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// How often the countdown is recalculated
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A countdown sample sent by a [`Ticker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tick {
    /// The selection the ticker was started for
    pub generation: u64,
    pub country_id: CountryId,
    pub countdown: Countdown,
}

/// A running countdown timer.  Dropping it stops the timer, so replacing the
/// one held by the session can never leave two running.
#[derive(Debug)]
pub(crate) struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start sampling the window's countdown, immediately and then every
    /// [`TICK_PERIOD`].  The timer stops by itself once the countdown can't
    /// change any more (expired, or no end date).
    pub fn start(
        generation: u64,
        country_id: CountryId,
        window: TermWindow,
        clock: Clock,
        tx: UnboundedSender<Tick>,
    ) -> Self {
        debug!("Starting countdown for {country_id}");
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let countdown = Countdown::at(&window, clock());
                let tick = Tick {
                    generation,
                    country_id: country_id.clone(),
                    countdown,
                };
                if tx.send(tick).is_err() || countdown.is_final() {
                    break;
                }
            }
            debug!("Countdown for {country_id} finished");
        });
        Self { handle }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
