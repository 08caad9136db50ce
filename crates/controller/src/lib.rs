// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Mandate Countdown project*
//!
//! This library crate ties the pure `core` crate to the `wikidata` fact
//! source.  It provides the session (selection, cache & the one live
//! countdown timer), the on-disk config, and plain text rendering for front
//! ends.
//!

mod config;
mod render;
mod session;
mod ticker;

pub use config::*;
pub use render::*;
pub use session::*;
pub use ticker::TICK_PERIOD;

#[macro_use]
extern crate log;
