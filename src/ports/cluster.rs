//! Cluster port for reading namespaces and tasks from an API server.

use std::future::Future;
use std::pin::Pin;

use crate::error::ClusterError;
use crate::resource::{Namespace, Task};

/// Boxed future type alias used by [`Cluster`] to keep the trait dyn-compatible.
pub type ClusterFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ClusterError>> + Send + 'a>>;

/// Read access to the orchestration API.
///
/// Both calls are single reads with no retries; any error is returned to the
/// caller unchanged.
pub trait Cluster: Send + Sync {
    /// Fetches a namespace by name.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::NotFound`] when the namespace does not exist, or
    /// any other error the server or transport produces.
    fn get_namespace(&self, name: &str) -> ClusterFuture<'_, Namespace>;

    /// Lists tasks in `namespace`, or in every namespace when `None`.
    ///
    /// Order is unspecified. An empty namespace yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the server or transport fails.
    fn list_tasks(&self, namespace: Option<&str>) -> ClusterFuture<'_, Vec<Task>>;
}
