//! Live adapters for real external interactions.

pub mod clock;
pub mod cluster;

pub use clock::LiveClock;
pub use cluster::LiveCluster;
