//! Replaying adapter for the Clock port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let output = next_output(&self.replayer, "clock", "now");
        serde_json::from_value(output).expect("clock::now: failed to deserialize DateTime<Utc>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    fn clock_with(times: &[&str]) -> ReplayingClock {
        let interactions = times
            .iter()
            .enumerate()
            .map(|(seq, ts)| Interaction {
                seq: seq as u64,
                port: "clock".into(),
                method: "now".into(),
                input: json!({}),
                output: json!(ts),
            })
            .collect();
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            server: String::new(),
            interactions,
        };
        ReplayingClock::new(CassetteReplayer::new(&cassette))
    }

    #[test]
    fn serves_recorded_times_in_order() {
        let clock = clock_with(&["2024-06-15T10:30:00Z", "2024-06-15T10:31:00Z"]);
        assert_eq!(clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        assert_eq!(clock.now().to_rfc3339(), "2024-06-15T10:31:00+00:00");
    }

    #[test]
    #[should_panic(expected = "failed to deserialize")]
    fn garbage_time_panics() {
        let clock = clock_with(&["not a time"]);
        let _ = clock.now();
    }
}
