//! High-level service facade over a council schedule backend.

use std::sync::Arc;

use crate::model::{CollectionDay, LocationId};
use crate::ports::{ScheduleError, SchedulePort};
use crate::sensor::BinSensor;

/// Number of digits in a valid council location id.
pub const LOCATION_ID_LEN: usize = 11;

/// Display name of the sensor reading the first scheduled day.
pub const SENSOR_UPCOMING: &str = "Upcoming collection";
/// Display name of the sensor reading the second scheduled day.
pub const SENSOR_NEXT: &str = "Next collection";

#[derive(thiserror::Error, Debug)]
/// Why a candidate location id was rejected.
pub enum ValidationError {
    /// The candidate contains characters other than ASCII digits.
    #[error("Location id must contain only digits")]
    NotDigit,
    /// The candidate does not have the required number of digits.
    #[error("Location id must be exactly {} digits long", LOCATION_ID_LEN)]
    InvalidLength,
    /// The council has no collection schedule for this id.
    #[error("No collection schedule found for this location id")]
    NotFound,
}

impl ValidationError {
    /// Stable code for keying user-facing messages.
    ///
    /// Format failures share a single code since both mean the candidate can
    /// never be a location id; only an id the council does not serve gets a
    /// code of its own.
    #[must_use]
    pub fn user_code(&self) -> &'static str {
        match self {
            Self::NotDigit | Self::InvalidLength => "invalid_id",
            Self::NotFound => "not_found",
        }
    }
}

/// Public entry point for validating locations and reading their schedules.
pub struct KerbsideService {
    port: Arc<dyn SchedulePort>,
}

impl KerbsideService {
    /// Create a new service bound to the provided schedule backend.
    #[must_use]
    pub fn new(port: Arc<dyn SchedulePort>) -> Self {
        Self { port }
    }

    /// Display name of the council behind the backend.
    #[must_use]
    pub fn council_name(&self) -> &str {
        self.port.council_name()
    }

    /// Fetch the grouped, date-sorted schedule for a location.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] when the fetch or the interpretation of
    /// the council page fails.
    pub async fn collection_days(
        &self,
        location: &LocationId,
    ) -> Result<Vec<CollectionDay>, ScheduleError> {
        self.port.collection_days(location).await
    }

    /// Check a candidate location id and confirm the council serves it.
    ///
    /// Format checks run before any network traffic: the candidate must
    /// consist solely of ASCII digits and be exactly [`LOCATION_ID_LEN`]
    /// digits long. A well-formed candidate is then confirmed by fetching
    /// its schedule once.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first check that failed.
    pub async fn validate_location_id(
        &self,
        candidate: &str,
    ) -> Result<LocationId, ValidationError> {
        if !candidate.chars().all(|character| character.is_ascii_digit()) {
            return Err(ValidationError::NotDigit);
        }
        if candidate.len() != LOCATION_ID_LEN {
            return Err(ValidationError::InvalidLength);
        }
        let location = LocationId(candidate.to_owned());
        if let Err(error) = self.port.collection_days(&location).await {
            tracing::warn!(%location, %error, "location id failed the schedule lookup");
            return Err(ValidationError::NotFound);
        }
        Ok(location)
    }

    /// Build the pair of sensors exposed for a location.
    ///
    /// The first sensor reads index 0 of the sorted schedule, the second
    /// index 1. Both carry the backend's public query url so their
    /// attributes can point readers at the source page.
    #[must_use]
    pub fn sensors(&self, location: &LocationId) -> [BinSensor; 2] {
        let query_url = self.port.query_url(location);
        [
            BinSensor::new(SENSOR_UPCOMING, location.clone(), 0, query_url.clone()),
            BinSensor::new(SENSOR_NEXT, location.clone(), 1, query_url),
        ]
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;

    const VALID_ID: &str = "12345678901";

    struct FixedPort {
        days: Vec<CollectionDay>,
    }

    #[async_trait]
    impl SchedulePort for FixedPort {
        fn council_name(&self) -> &str {
            "Test Council"
        }

        fn query_url(&self, location: &LocationId) -> String {
            format!("https://example.test/collection-days/{location}")
        }

        async fn collection_days(
            &self,
            _location: &LocationId,
        ) -> Result<Vec<CollectionDay>, ScheduleError> {
            Ok(self.days.clone())
        }
    }

    struct FailingPort;

    #[async_trait]
    impl SchedulePort for FailingPort {
        fn council_name(&self) -> &str {
            "Test Council"
        }

        fn query_url(&self, location: &LocationId) -> String {
            format!("https://example.test/collection-days/{location}")
        }

        async fn collection_days(
            &self,
            _location: &LocationId,
        ) -> Result<Vec<CollectionDay>, ScheduleError> {
            Err(ScheduleError::ScheduleNotFound)
        }
    }

    fn service_with_schedule() -> KerbsideService {
        KerbsideService::new(Arc::new(FixedPort {
            days: vec![CollectionDay {
                date_label: String::from("Tuesday, 12 January"),
                collection_types: vec![String::from("Rubbish")],
            }],
        }))
    }

    #[tokio::test]
    async fn accepts_a_served_eleven_digit_id() {
        let service = service_with_schedule();

        let location = service
            .validate_location_id(VALID_ID)
            .await
            .expect("well-formed and served id passes validation");
        assert_eq!(location, LocationId(String::from(VALID_ID)));
    }

    #[tokio::test]
    async fn rejects_non_digit_candidates() {
        let service = service_with_schedule();

        let error = service
            .validate_location_id("abcdefghijk")
            .await
            .expect_err("letters are not a location id");
        assert!(matches!(error, ValidationError::NotDigit));
    }

    #[tokio::test]
    async fn rejects_wrong_length_candidates() {
        let service = service_with_schedule();

        let error = service
            .validate_location_id("12345")
            .await
            .expect_err("five digits are too short");
        assert!(matches!(error, ValidationError::InvalidLength));
    }

    #[tokio::test]
    async fn checks_digits_before_length() {
        let service = service_with_schedule();

        let error = service
            .validate_location_id("abc")
            .await
            .expect_err("letters fail before the length check");
        assert!(matches!(error, ValidationError::NotDigit));
    }

    #[tokio::test]
    async fn maps_failed_lookups_to_not_found() {
        let service = KerbsideService::new(Arc::new(FailingPort));

        let error = service
            .validate_location_id(VALID_ID)
            .await
            .expect_err("well-formed id the council does not serve");
        assert!(matches!(error, ValidationError::NotFound));
    }

    #[test]
    fn user_codes_group_format_failures() {
        assert_eq!(ValidationError::NotDigit.user_code(), "invalid_id");
        assert_eq!(ValidationError::InvalidLength.user_code(), "invalid_id");
        assert_eq!(ValidationError::NotFound.user_code(), "not_found");
    }

    #[test]
    fn builds_the_sensor_pair_for_a_location() {
        let service = service_with_schedule();
        let location = LocationId(String::from(VALID_ID));

        let [upcoming, next] = service.sensors(&location);
        assert_eq!(upcoming.name(), SENSOR_UPCOMING);
        assert_eq!(next.name(), SENSOR_NEXT);
    }
}
