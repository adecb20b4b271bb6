//! Errors raised at the cluster boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by a [`Cluster`](crate::ports::Cluster) implementation.
///
/// The enum is serializable so that recorded cassettes keep the variant, and a
/// replayed `NotFound` is still a `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClusterError {
    /// The named object does not exist. `resource` is the plural resource name.
    #[error("{resource} \"{name}\" not found")]
    NotFound {
        /// Plural resource name, e.g. `namespaces`.
        resource: String,
        /// Object name.
        name: String,
    },

    /// The API server rejected the request.
    #[error("{message} (status {code})")]
    Api {
        /// HTTP status code.
        code: u16,
        /// Server-provided message.
        message: String,
    },

    /// The request never got a response.
    #[error("request to API server failed: {message}")]
    Transport {
        /// Underlying client error.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode API response: {message}")]
    Decode {
        /// Underlying decoder error.
        message: String,
    },
}

impl ClusterError {
    /// Shorthand for a missing namespace.
    #[must_use]
    pub fn namespace_not_found(name: &str) -> Self {
        Self::NotFound {
            resource: "namespaces".to_string(),
            name: name.to_string(),
        }
    }
}
