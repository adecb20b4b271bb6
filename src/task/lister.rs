//! Fetches the tasks a listing should show.

use crate::error::ClusterError;
use crate::ports::Cluster;
use crate::resource::Task;

/// Which namespaces a listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Exactly one namespace, which must exist.
    Namespace(String),
    /// Every namespace.
    AllNamespaces,
}

impl Scope {
    /// The namespace name, if scoped to one.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Namespace(ns) => Some(ns),
            Self::AllNamespaces => None,
        }
    }
}

/// Lists tasks within `scope`.
///
/// A named namespace is looked up first so that a missing one fails with
/// `NotFound` instead of listing as empty.
///
/// # Errors
///
/// Returns [`ClusterError::NotFound`] for a missing namespace, and passes any
/// other cluster error through unchanged.
pub async fn list_tasks(cluster: &dyn Cluster, scope: &Scope) -> Result<Vec<Task>, ClusterError> {
    if let Scope::Namespace(ns) = scope {
        cluster.get_namespace(ns).await?;
    }
    let tasks = cluster.list_tasks(scope.namespace()).await?;
    tracing::debug!(?scope, count = tasks.len(), "fetched tasks");
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::seeded::SeededCluster;

    #[tokio::test]
    async fn missing_namespace_fails() {
        let cluster = SeededCluster::new().with_namespace("default");
        let err = list_tasks(&cluster, &Scope::Namespace("foo".into())).await.unwrap_err();
        assert_eq!(err, ClusterError::namespace_not_found("foo"));
    }

    #[tokio::test]
    async fn empty_namespace_is_not_an_error() {
        let cluster = SeededCluster::new().with_namespace("foo");
        let tasks = list_tasks(&cluster, &Scope::Namespace("foo".into())).await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn all_namespaces_skips_the_lookup() {
        let cluster = SeededCluster::new()
            .with_task(Task::new("build", "ci", None))
            .with_task(Task::new("deploy", "prod", None));
        let tasks = list_tasks(&cluster, &Scope::AllNamespaces).await.unwrap();
        assert_eq!(tasks.len(), 2);
    }
}
