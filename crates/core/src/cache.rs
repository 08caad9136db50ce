// SPDX-License-Identifier: MIT

//!
//! Session cache of resolved term windows.
//!
//! A country's window is resolved at most once per session: callers asking
//! for the same country while a resolution is in flight wait for it rather
//! than starting their own.  Failed resolutions are not stored, so asking
//! again retries.  Nothing is refreshed in the background.
//!

use crate::{CountryId, TermWindow};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// Memoizes [`TermWindow`]s per [`CountryId`]
#[derive(Debug, Default)]
pub struct TermCache {
    entries: Mutex<HashMap<CountryId, Arc<OnceCell<TermWindow>>>>,
}

impl TermCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached window for a country, or compute & cache it.  `compute`
    /// is only called if there is neither a cached window nor a computation
    /// in flight for the country.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        country_id: &CountryId,
        compute: F,
    ) -> Result<TermWindow, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TermWindow, E>>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(country_id.clone()).or_default())
        };

        if let Some(window) = cell.get() {
            debug!("Cache hit for {country_id}");
            return Ok(window.clone());
        }

        let window = cell
            .get_or_try_init(|| {
                debug!("Cache miss for {country_id}");
                compute()
            })
            .await?;
        Ok(window.clone())
    }

    /// Get the cached window for a country without computing it
    pub async fn get(&self, country_id: &CountryId) -> Option<TermWindow> {
        self.entries
            .lock()
            .await
            .get(country_id)
            .and_then(|cell| cell.get().cloned())
    }

    /// Forget a country's window so that it is computed again next time.
    /// Returns whether there was a window to forget.
    pub async fn invalidate(&self, country_id: &CountryId) -> bool {
        let removed = self.entries.lock().await.remove(country_id);
        let had_window = removed.is_some_and(|cell| cell.initialized());
        if had_window {
            info!("Invalidated cached window for {country_id}");
        }
        had_window
    }

    /// Forget every window
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// The number of cached windows
    pub async fn len(&self) -> usize {
        self.entries
            .lock()
            .await
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
