//! Projection of a grouped schedule onto the two exposed sensor readings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    COLLECTION_FOOD_SCRAPS, COLLECTION_RECYCLING, COLLECTION_RUBBISH, CollectionDay, LocationId,
};
use crate::schedule::resolve_date_label;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Fixed-shape attribute record exposed alongside a sensor value.
pub struct BinCollectionAttributes {
    /// Location the schedule was fetched for.
    pub location_id: LocationId,
    /// Raw date label of the collection day, as scraped.
    pub date_label: String,
    /// Whether rubbish is collected on this day.
    pub rubbish: bool,
    /// Whether recycling is collected on this day.
    pub recycle: bool,
    /// Whether food scraps are collected on this day.
    pub food_scraps: bool,
    /// Public council page the schedule was read from.
    pub query_url: String,
}

/// One exposed reading over the schedule held by the host.
///
/// Two of these exist per location: "upcoming" over index 0 and "next" over
/// index 1 of the sorted schedule. The schedule itself is owned by the host
/// and injected into every read, so a sensor never caches data of its own.
pub struct BinSensor {
    name: String,
    location: LocationId,
    date_index: usize,
    query_url: String,
}

impl BinSensor {
    /// Construct a sensor reading the given index of the sorted schedule.
    #[must_use]
    pub fn new<N: Into<String>, U: Into<String>>(
        name: N,
        location: LocationId,
        date_index: usize,
        query_url: U,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            date_index,
            query_url: query_url.into(),
        }
    }

    /// Display name of the sensor.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved calendar date of this sensor's collection day.
    ///
    /// `None` when no schedule is available yet, when the schedule has fewer
    /// days than this sensor's index (a defined absent state, not an error),
    /// or when the stored label no longer parses at read time.
    #[must_use]
    pub fn value(&self, days: Option<&[CollectionDay]>, at: DateTime<Utc>) -> Option<NaiveDate> {
        let day = self.day(days)?;
        resolve_date_label(&day.date_label, at)
    }

    /// Attribute record for this sensor's collection day.
    ///
    /// Absent under the same conditions as [`BinSensor::value`], except that
    /// an unparseable date label still yields attributes: the label is
    /// echoed raw and the booleans only depend on the collection types.
    #[must_use]
    pub fn attributes(&self, days: Option<&[CollectionDay]>) -> Option<BinCollectionAttributes> {
        let day = self.day(days)?;
        Some(BinCollectionAttributes {
            location_id: self.location.clone(),
            date_label: day.date_label.clone(),
            rubbish: day.has_collection(COLLECTION_RUBBISH),
            recycle: day.has_collection(COLLECTION_RECYCLING),
            food_scraps: day.has_collection(COLLECTION_FOOD_SCRAPS),
            query_url: self.query_url.clone(),
        })
    }

    fn day<'schedule>(
        &self,
        days: Option<&'schedule [CollectionDay]>,
    ) -> Option<&'schedule CollectionDay> {
        let days = days?;
        let day = days.get(self.date_index);
        if day.is_none() {
            tracing::debug!(
                index = self.date_index,
                "schedule has no collection day at this sensor's index yet"
            );
        }
        day
    }
}
