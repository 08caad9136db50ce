// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Mandate Countdown project*
//!
//! This crate defines the country rules, the officeholder fact & term window
//! types, and the pure logic that turns a single "assumed office" fact into
//! the current term window & a live countdown.  It does no I/O: fetching facts
//! is the job of the `wikidata` crate, and driving the countdown is the job of
//! the `controller` crate.
//!
//! This crate aims to provide APIs for each type so that if a type is
//! instantiated, the developer can be sure it's valid.
//!

mod cache;
mod countdown;
mod country;
mod date;
mod error;
mod fact;
mod locale;
mod name;
mod term;

pub use cache::*;
pub use countdown::*;
pub use country::*;
pub use date::*;
pub use error::*;
pub use fact::*;
pub use locale::*;
pub use name::*;
pub use term::*;

#[macro_use]
extern crate log;
