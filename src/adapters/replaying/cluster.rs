//! Replaying adapter for the `Cluster` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{Cluster, ClusterFuture};
use crate::resource::{Namespace, Task};

/// Serves recorded cluster responses from a cassette.
///
/// Inputs are ignored; responses come back in recorded order per method.
pub struct ReplayingCluster {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingCluster {
    /// Create a replaying cluster backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Cluster for ReplayingCluster {
    fn get_namespace(&self, _name: &str) -> ClusterFuture<'_, Namespace> {
        let output = next_output(&self.replayer, "cluster", "get_namespace");
        Box::pin(async move { replay_result::<Namespace>(output) })
    }

    fn list_tasks(&self, _namespace: Option<&str>) -> ClusterFuture<'_, Vec<Task>> {
        let output = next_output(&self.replayer, "cluster", "list_tasks");
        Box::pin(async move { replay_result::<Vec<Task>>(output) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::error::ClusterError;
    use chrono::Utc;
    use serde_json::json;

    fn cluster_with(interactions: Vec<(&str, serde_json::Value)>) -> ReplayingCluster {
        let interactions = interactions
            .into_iter()
            .enumerate()
            .map(|(seq, (method, output))| Interaction {
                seq: seq as u64,
                port: "cluster".into(),
                method: method.into(),
                input: json!({}),
                output,
            })
            .collect();
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            server: String::new(),
            interactions,
        };
        ReplayingCluster::new(CassetteReplayer::new(&cassette))
    }

    #[tokio::test]
    async fn replays_namespace_and_tasks() {
        let cluster = cluster_with(vec![
            ("get_namespace", json!({"Ok": {"metadata": {"name": "ci"}}})),
            (
                "list_tasks",
                json!({"Ok": [{"metadata": {"name": "build", "namespace": "ci"}}]}),
            ),
        ]);

        let ns = cluster.get_namespace("ci").await.unwrap();
        assert_eq!(ns.metadata.name, "ci");
        let tasks = cluster.list_tasks(Some("ci")).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name(), "build");
    }

    #[tokio::test]
    async fn replays_not_found() {
        let cluster = cluster_with(vec![(
            "get_namespace",
            json!({"Err": {"type": "not_found", "resource": "namespaces", "name": "foo"}}),
        )]);

        let err = cluster.get_namespace("foo").await.unwrap_err();
        assert_eq!(err, ClusterError::namespace_not_found("foo"));
    }
}
