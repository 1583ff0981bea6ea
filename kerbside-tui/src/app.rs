use std::sync::Arc;
use std::time::{Duration, Instant};

use kerbside_core::{
    model::{CollectionDay, LocationId},
    sensor::BinSensor,
    service::KerbsideService,
};

const REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy)]
pub(crate) enum Screen {
    Setup,
    Schedule,
}

pub(crate) struct App {
    pub service: Arc<KerbsideService>,

    pub screen: Screen,
    pub location_input: String,
    pub location: Option<LocationId>,

    pub sensors: Option<[BinSensor; 2]>,
    pub schedule: Option<Vec<CollectionDay>>,
    pub last_refresh: Option<Instant>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<KerbsideService>) -> Self {
        Self {
            service,
            screen: Screen::Setup,
            location_input: String::new(),
            location: None,
            sensors: None,
            schedule: None,
            last_refresh: None,
            is_loading: false,
            error_message: None,
        }
    }

    /// True once an active location has gone an hour without a fetch attempt.
    pub(crate) fn refresh_due(&self) -> bool {
        if self.location.is_none() {
            return false;
        }
        self.last_refresh
            .is_none_or(|at| at.elapsed() >= REFRESH_INTERVAL)
    }

    /// Switch to a validated location and drop data from the previous one.
    ///
    /// The cleared refresh timestamp makes the run loop fetch the new
    /// schedule on its next pass.
    pub(crate) fn apply_location(&mut self, location: LocationId) {
        self.sensors = Some(self.service.sensors(&location));
        self.location = Some(location);
        self.schedule = None;
        self.last_refresh = None;
        self.screen = Screen::Schedule;
    }

    pub(crate) fn back_to_setup(&mut self) {
        self.screen = Screen::Setup;
        self.error_message = None;
    }
}
