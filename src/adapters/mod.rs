//! Port implementations.
//!
//! - `live`: system clock and HTTP client for a real API server.
//! - `seeded`: in-memory cluster and fixed clock for tests.
//! - `replaying` / `recording`: cassette-backed adapters.

pub mod live;
pub mod recording;
pub mod replaying;
pub mod seeded;
