//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{LiveClock, LiveCluster};
use crate::adapters::recording::{RecordingClock, RecordingCluster};
use crate::adapters::replaying::{ReplayingClock, ReplayingCluster};
use crate::adapters::seeded::{FixedClock, SeededCluster};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::ClientConfig;
use crate::ports::clock::Clock;
use crate::ports::cluster::{Cluster, ClusterFuture};
use crate::resource::{Namespace, Task};

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, seeded,
/// replaying, recording).
pub struct ServiceContext {
    /// Clock that task ages are measured against.
    pub clock: Box<dyn Clock>,
    /// Cluster API access.
    pub cluster: Box<dyn Cluster>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, cluster: Box<dyn Cluster>) -> Self {
        Self { clock, cluster }
    }

    /// Creates a live context talking to the configured API server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: &ClientConfig) -> Result<Self, String> {
        Ok(Self::new(Box::new(LiveClock), Box::new(LiveCluster::new(config)?)))
    }

    /// Creates a context over seeded in-memory data.
    #[must_use]
    pub fn seeded(cluster: SeededCluster, clock: FixedClock) -> Self {
        Self::new(Box::new(clock), Box::new(cluster))
    }

    /// Creates a live context that records every interaction.
    ///
    /// Cassettes are written under `base` when the returned session is
    /// finished, which must happen after this context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording directory or HTTP client cannot be
    /// created.
    pub fn recording_at(
        base: &Path,
        config: &ClientConfig,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(base, &config.server)?;
        let ctx = Self::new(
            Box::new(RecordingClock::new(Box::new(LiveClock), session.clock.clone())),
            Box::new(RecordingCluster::new(
                Box::new(LiveCluster::new(config)?),
                session.cluster.clone(),
            )),
        );
        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer over the same cassette, so per-port
    /// cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self::new(
            Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            Box::new(ReplayingCluster::new(CassetteReplayer::new(&cassette))),
        ))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use an adapter that panics with a
    /// clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        let clock: Box<dyn Clock> = match replayers.clock {
            Some(r) => Box::new(ReplayingClock::new(r)),
            None => Box::new(PanickingClock),
        };
        let cluster: Box<dyn Cluster> = match replayers.cluster {
            Some(r) => Box::new(ReplayingCluster::new(r)),
            None => Box::new(PanickingCluster),
        };
        Ok(Self::new(clock, cluster))
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not configured in CassetteConfig: no cassette loaded for clock");
    }
}

struct PanickingCluster;
impl Cluster for PanickingCluster {
    fn get_namespace(&self, _name: &str) -> ClusterFuture<'_, Namespace> {
        panic!("Cluster port not configured in CassetteConfig: no cassette loaded for cluster");
    }

    fn list_tasks(&self, _namespace: Option<&str>) -> ClusterFuture<'_, Vec<Task>> {
        panic!("Cluster port not configured in CassetteConfig: no cassette loaded for cluster");
    }
}
