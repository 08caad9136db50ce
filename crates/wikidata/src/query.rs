// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! SPARQL query text
//!

use mandate_countdown_core::{CountryId, Language, PositionRef};

/// Property for a statement's start time qualifier
const START_TIME: &str = "P580";

/// Property for a statement's end time qualifier
const END_TIME: &str = "P582";

/// Property for an item's image
const IMAGE: &str = "P18";

/// Property for the positions a person has held
const POSITION_HELD: &str = "P39";

/// Country properties for heads of state & of government
const HEAD_OF_STATE: &str = "P35";
const HEAD_OF_GOVERNMENT: &str = "P6";

/// Country properties linking to the office held by those positions
const OFFICE_HELD_BY_HEAD_OF_STATE: &str = "P1906";
const OFFICE_HELD_BY_HEAD_OF_GOVERNMENT: &str = "P1313";

/// The country property linking to the office held by whoever holds
/// `position_ref`, if it's known
pub fn office_property(position_ref: &PositionRef) -> Option<&'static str> {
    match position_ref.as_str() {
        HEAD_OF_STATE => Some(OFFICE_HELD_BY_HEAD_OF_STATE),
        HEAD_OF_GOVERNMENT => Some(OFFICE_HELD_BY_HEAD_OF_GOVERNMENT),
        _ => None,
    }
}

/// The most recent open-ended officeholder statement on the country, with its
/// start time & holder's image if there are any
pub fn officeholder_query(
    country_id: &CountryId,
    position_ref: &PositionRef,
    language: Language,
) -> String {
    let labels = language.label_service_languages();
    format!(
        r#"SELECT ?leader ?leaderLabel ?photo ?startTime WHERE {{
  wd:{country_id} p:{position_ref} ?statement.
  ?statement ps:{position_ref} ?leader.
  FILTER NOT EXISTS {{ ?statement pq:{END_TIME} ?endTime. }}
  OPTIONAL {{ ?statement pq:{START_TIME} ?startTime. }}
  OPTIONAL {{ ?leader wdt:{IMAGE} ?photo. }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "{labels}". }}
}} ORDER BY DESC(?startTime) LIMIT 1"#
    )
}

/// The start time of the holder's own open-ended "position held" statement
/// for the office the country's `position_ref` refers to.  Used when the
/// country's statement has no start time.  `None` if the office can't be found
/// for the position.
pub fn position_held_query(
    holder_id: &str,
    country_id: &CountryId,
    position_ref: &PositionRef,
) -> Option<String> {
    let office = office_property(position_ref)?;
    Some(format!(
        r#"SELECT ?startTime WHERE {{
  wd:{country_id} wdt:{office} ?office.
  wd:{holder_id} p:{POSITION_HELD} ?statement.
  ?statement ps:{POSITION_HELD} ?office.
  FILTER NOT EXISTS {{ ?statement pq:{END_TIME} ?endTime. }}
  ?statement pq:{START_TIME} ?startTime.
}} ORDER BY DESC(?startTime) LIMIT 1"#
    ))
}
