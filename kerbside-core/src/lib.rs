//! Core types and service wiring for the kerbside collection-day service.

/// Domain models for locations, collection entries, and grouped schedules.
pub mod model;
/// Trait describing a council schedule backend and its error taxonomy.
pub mod ports;
/// Date-label resolution and schedule grouping.
pub mod schedule;
/// Sensor projection of a grouped schedule onto the two exposed readings.
pub mod sensor;
/// High-level service facade used by hosts.
pub mod service;

pub use model::*;
pub use ports::*;
pub use schedule::*;
pub use sensor::*;
pub use service::*;
