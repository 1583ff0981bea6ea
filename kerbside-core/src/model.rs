//! Domain data structures for locations and collection schedules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Collection type label used by the council for household rubbish.
pub const COLLECTION_RUBBISH: &str = "Rubbish";
/// Collection type label used by the council for recycling.
pub const COLLECTION_RECYCLING: &str = "Recycling";
/// Collection type label used by the council for food scraps.
pub const COLLECTION_FOOD_SCRAPS: &str = "Food scraps";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier the council uses to key a specific address's schedule.
///
/// An 11-digit string; it is embedded verbatim in request URLs and echoed
/// back in sensor attributes.
pub struct LocationId(pub String);

impl fmt::Display for LocationId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One (date label, collection type) pair as scraped from the council page.
///
/// Produced by the extractor and consumed immediately by the grouper.
pub struct CollectionEntry {
    /// Raw weekday/day/month string as it appears on the page, without a year.
    pub date_label: String,
    /// Collection type as labelled on the page, e.g. "Rubbish".
    pub collection_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// All collection types announced for one date label.
pub struct CollectionDay {
    /// Raw date label shared by the grouped entries.
    pub date_label: String,
    /// Collection types in the order they appeared on the page.
    pub collection_types: Vec<String>,
}

impl CollectionDay {
    /// Check whether a collection type is announced for this day.
    ///
    /// Matches by exact string equality against the council's labels.
    #[must_use]
    pub fn has_collection(&self, collection_type: &str) -> bool {
        self.collection_types
            .iter()
            .any(|candidate| candidate == collection_type)
    }
}
