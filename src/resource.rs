//! Kubernetes-style resource types read from the cluster.
//!
//! Only the fields the CLI looks at are modelled. A task's `spec` is kept as
//! opaque JSON so that `-o json` and `-o yaml` can echo it back unchanged.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API group that owns the `Task` kind.
pub const TEKTON_GROUP: &str = "tekton.dev";

/// Standard object metadata shared by every resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Name, unique within the namespace.
    pub name: String,
    /// Owning namespace. Absent for cluster-scoped objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// When the server persisted the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
    /// Free-form labels.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// A reusable unit of work definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// `tekton.dev/<version>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Always `Task` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Object metadata.
    pub metadata: ObjectMeta,
    /// Task body, not interpreted by the CLI.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub spec: serde_json::Value,
}

impl Task {
    /// Builds a bare task with the given name, namespace and creation time.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        created: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            api_version: None,
            kind: Some("Task".to_string()),
            metadata: ObjectMeta {
                name: name.into(),
                namespace: Some(namespace.into()),
                creation_timestamp: created,
                labels: BTreeMap::new(),
            },
            spec: serde_json::Value::Null,
        }
    }

    /// The task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// The task namespace, or an empty string when unset.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or_default()
    }
}

/// A namespace. Only its existence matters to the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Object metadata.
    pub metadata: ObjectMeta,
}

impl Namespace {
    /// Builds a namespace with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { metadata: ObjectMeta { name: name.into(), ..ObjectMeta::default() } }
    }
}

/// Metadata attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    /// Opaque token for fetching the next page.
    #[serde(default, rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,
}

/// A page of tasks as returned by the API server, also used for `-o json|yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    /// API version of the list envelope.
    #[serde(default)]
    pub api_version: String,
    /// Kind of the list envelope.
    #[serde(default)]
    pub kind: String,
    /// List metadata.
    #[serde(default)]
    pub metadata: ListMeta,
    /// The tasks on this page.
    #[serde(default)]
    pub items: Vec<Task>,
}

impl TaskList {
    /// Wraps tasks in a generic `v1/List` envelope for printing.
    #[must_use]
    pub fn printable(items: Vec<Task>) -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "List".to_string(),
            metadata: ListMeta::default(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_task_list() {
        let body = r#"{
            "apiVersion": "tekton.dev/v1beta1",
            "kind": "TaskList",
            "metadata": {"continue": "abc"},
            "items": [{
                "apiVersion": "tekton.dev/v1beta1",
                "kind": "Task",
                "metadata": {
                    "name": "build",
                    "namespace": "ci",
                    "creationTimestamp": "2024-03-01T12:00:00Z",
                    "uid": "ignored"
                },
                "spec": {"steps": [{"image": "alpine"}]}
            }]
        }"#;

        let list: TaskList = serde_json::from_str(body).unwrap();

        assert_eq!(list.metadata.continue_token.as_deref(), Some("abc"));
        assert_eq!(list.items.len(), 1);
        let task = &list.items[0];
        assert_eq!(task.name(), "build");
        assert_eq!(task.namespace(), "ci");
        assert_eq!(
            task.metadata.creation_timestamp.unwrap().to_rfc3339(),
            "2024-03-01T12:00:00+00:00"
        );
        assert_eq!(task.spec["steps"][0]["image"], "alpine");
    }

    #[test]
    fn missing_timestamp_and_spec_are_omitted_when_encoding() {
        let task = Task::new("lint", "ci", None);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "Task", "metadata": {"name": "lint", "namespace": "ci"}})
        );
    }
}
