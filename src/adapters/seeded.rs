//! In-memory adapters seeded with fixed data.
//!
//! These stand in for a cluster in tests: seed namespaces and tasks, pin the
//! clock, and run a command against them.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::error::ClusterError;
use crate::ports::{Clock, Cluster, ClusterFuture};
use crate::resource::{Namespace, Task};

/// A clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pins the clock to `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }

    /// Pins the clock to an RFC 3339 timestamp.
    ///
    /// # Panics
    ///
    /// Panics if `rfc3339` does not parse.
    #[must_use]
    pub fn at(rfc3339: &str) -> Self {
        let now = DateTime::parse_from_rfc3339(rfc3339)
            .unwrap_or_else(|e| panic!("invalid fixed clock time {rfc3339:?}: {e}"));
        Self::new(now.with_timezone(&Utc))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A cluster that answers from seeded namespaces and tasks.
///
/// Like a real API server, listing tasks in a namespace that does not exist
/// returns an empty list; only `get_namespace` reports the absence.
#[derive(Debug, Clone, Default)]
pub struct SeededCluster {
    namespaces: BTreeSet<String>,
    tasks: Vec<Task>,
}

impl SeededCluster {
    /// An empty cluster with no namespaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a namespace.
    #[must_use]
    pub fn with_namespace(mut self, name: impl Into<String>) -> Self {
        self.namespaces.insert(name.into());
        self
    }

    /// Adds a task. Its namespace is not created implicitly.
    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Adds several tasks, keeping their order.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks.extend(tasks);
        self
    }
}

impl Cluster for SeededCluster {
    fn get_namespace(&self, name: &str) -> ClusterFuture<'_, Namespace> {
        let result = if self.namespaces.contains(name) {
            Ok(Namespace::new(name))
        } else {
            Err(ClusterError::namespace_not_found(name))
        };
        Box::pin(async move { result })
    }

    fn list_tasks(&self, namespace: Option<&str>) -> ClusterFuture<'_, Vec<Task>> {
        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| namespace.map_or(true, |ns| task.namespace() == ns))
            .cloned()
            .collect();
        Box::pin(async move { Ok(tasks) })
    }
}
