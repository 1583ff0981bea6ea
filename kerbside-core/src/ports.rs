//! Trait describing council schedule backends and the shared error taxonomy.

use async_trait::async_trait;
use reqwest::{Error as ReqwestError, StatusCode};

use crate::model::{CollectionDay, LocationId};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while fetching and interpreting a council schedule.
pub enum ScheduleError {
    /// Network layer failed before a response arrived.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// The council page answered with a status other than 200.
    #[error("Council page returned status {0}")]
    Status(StatusCode),
    /// The page contained no schedule card for the location.
    #[error("No schedule card found for this location")]
    ScheduleNotFound,
    /// A schedule card was present but no collection entries could be read.
    #[error("Schedule card contains no collection entries")]
    NoEntries,
    /// A date label on the page did not match the expected format.
    #[error("Unrecognised date label: {0}")]
    DateLabel(String),
}

#[async_trait]
/// Trait for council-specific schedule backends.
pub trait SchedulePort: Send + Sync {
    /// Human-friendly name of the council handled by this port.
    fn council_name(&self) -> &str;

    /// Public URL of the schedule page for a location, as shown in sensor
    /// attributes.
    fn query_url(&self, location: &LocationId) -> String;

    /// Fetch the collection schedule for a location, grouped by date label
    /// and ordered ascending by resolved date.
    ///
    /// A successful result is never empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] when the request fails, the page has no
    /// schedule card, or the card cannot be interpreted.
    async fn collection_days(
        &self,
        location: &LocationId,
    ) -> Result<Vec<CollectionDay>, ScheduleError>;
}
