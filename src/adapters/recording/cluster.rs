//! Recording adapter for the `Cluster` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{Cluster, ClusterFuture};
use crate::resource::{Namespace, Task};

/// Records cluster calls while delegating to an inner implementation.
pub struct RecordingCluster {
    inner: Box<dyn Cluster>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCluster {
    /// Creates a new recording cluster wrapping the given implementation.
    pub fn new(inner: Box<dyn Cluster>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct NameInput<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct NamespaceInput<'a> {
    namespace: Option<&'a str>,
}

impl Cluster for RecordingCluster {
    fn get_namespace(&self, name: &str) -> ClusterFuture<'_, Namespace> {
        let name = name.to_string();
        Box::pin(async move {
            let result = self.inner.get_namespace(&name).await;
            let input = NameInput { name: &name };
            record_result(&self.recorder, "cluster", "get_namespace", &input, &result);
            result
        })
    }

    fn list_tasks(&self, namespace: Option<&str>) -> ClusterFuture<'_, Vec<Task>> {
        let namespace = namespace.map(str::to_string);
        Box::pin(async move {
            let result = self.inner.list_tasks(namespace.as_deref()).await;
            let input = NamespaceInput { namespace: namespace.as_deref() };
            record_result(&self.recorder, "cluster", "list_tasks", &input, &result);
            result
        })
    }
}
