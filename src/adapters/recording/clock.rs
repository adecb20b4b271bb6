//! Recording adapter for the `Clock` port.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::Clock;

/// Records clock reads while delegating to an inner implementation.
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingClock {
    /// Creates a new recording clock wrapping the given implementation.
    pub fn new(inner: Box<dyn Clock>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> DateTime<Utc> {
        let result = self.inner.now();
        record_interaction(&self.recorder, "clock", "now", &serde_json::json!({}), &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::ReplayingClock;
    use crate::adapters::seeded::FixedClock;
    use crate::cassette::config::CassetteConfig;

    #[test]
    fn recorded_time_replays_identically() {
        let dir = std::env::temp_dir().join("tkn_rec_clock_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("clock.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test", "")));
        let fixed = FixedClock::at("2024-06-15T10:30:00Z");
        let recorded = {
            let clock = RecordingClock::new(Box::new(fixed), Arc::clone(&recorder));
            clock.now()
        };

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let replay = ReplayingClock::new(CassetteConfig::load_port_cassette(&path).unwrap());
        assert_eq!(replay.now(), recorded);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
