//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the command logic and an
//! external system (time, the cluster API). Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod cluster;

pub use clock::Clock;
pub use cluster::{Cluster, ClusterFuture};
