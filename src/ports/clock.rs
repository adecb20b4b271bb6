//! Clock port for obtaining the current time.

use chrono::{DateTime, Utc};

/// Provides the reference time that task ages are measured against.
///
/// Tests and cassette playback substitute a fixed or recorded clock so that
/// rendered ages are stable.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
