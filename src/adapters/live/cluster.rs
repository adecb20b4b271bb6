//! Live adapter for the `Cluster` port over the Kubernetes REST API.

use reqwest::{Certificate, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::ClusterError;
use crate::ports::{Cluster, ClusterFuture};
use crate::resource::{Namespace, Task, TaskList, TEKTON_GROUP};

/// Talks to a real API server.
pub struct LiveCluster {
    client: Client,
    server: String,
    token: Option<String>,
    api_version: String,
    page_size: u32,
}

impl LiveCluster {
    /// Builds an HTTP client from resolved connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate bundle is invalid or the client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, String> {
        let mut builder =
            Client::builder().danger_accept_invalid_certs(config.insecure_skip_tls_verify);
        if let Some(pem) = &config.certificate_authority {
            let certs = Certificate::from_pem_bundle(pem)
                .map_err(|e| format!("Invalid certificate authority: {e}"))?;
            for cert in certs {
                builder = builder.add_root_certificate(cert);
            }
        }
        let client = builder.build().map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self::with_client(client, config))
    }

    /// Uses an already configured HTTP client; TLS settings in `config` are ignored.
    #[must_use]
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            server: config.server.clone(),
            token: config.token.clone(),
            api_version: config.api_version.clone(),
            page_size: config.page_size,
        }
    }

    fn namespace_url(&self, name: &str) -> String {
        format!("{}/api/v1/namespaces/{name}", self.server)
    }

    fn tasks_url(&self, namespace: Option<&str>) -> String {
        let base = format!("{}/apis/{TEKTON_GROUP}/{}", self.server, self.api_version);
        match namespace {
            Some(ns) => format!("{base}/namespaces/{ns}/tasks"),
            None => format!("{base}/tasks"),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClusterError> {
        tracing::debug!(%url, ?query, "GET");
        let mut request = self.client.get(url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClusterError::Transport { message: e.to_string() })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClusterError::Transport { message: e.to_string() })?;

        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "request rejected");
            return Err(status_error(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|e| ClusterError::Decode { message: e.to_string() })
    }
}

/// The `Status` object the API server returns alongside error codes.
#[derive(Deserialize)]
struct Status {
    #[serde(default)]
    message: String,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    details: Option<StatusDetails>,
}

#[derive(Deserialize)]
struct StatusDetails {
    #[serde(default)]
    name: String,
    #[serde(default)]
    group: String,
    #[serde(default)]
    kind: String,
}

impl StatusDetails {
    /// `kind.group` as the API server prints it, e.g. `tasks.tekton.dev`.
    fn resource(self) -> String {
        if self.group.is_empty() {
            self.kind
        } else {
            format!("{}.{}", self.kind, self.group)
        }
    }
}

/// Maps an error response to a [`ClusterError`].
///
/// Only a `NotFound` status that names its object becomes
/// [`ClusterError::NotFound`]; anything else keeps the server's message.
fn status_error(code: u16, body: &str) -> ClusterError {
    match serde_json::from_str::<Status>(body) {
        Ok(Status {
            reason,
            details: Some(details),
            ..
        }) if reason == "NotFound" && !details.name.is_empty() => {
            let name = details.name.clone();
            ClusterError::NotFound {
                resource: details.resource(),
                name,
            }
        }
        Ok(status) if !status.message.is_empty() => ClusterError::Api {
            code,
            message: status.message,
        },
        _ => ClusterError::Api {
            code,
            message: body.trim().to_string(),
        },
    }
}

impl Cluster for LiveCluster {
    fn get_namespace(&self, name: &str) -> ClusterFuture<'_, Namespace> {
        let name = name.to_string();
        Box::pin(async move {
            let url = self.namespace_url(&name);
            self.get_json::<Namespace>(&url, &[]).await.map_err(|err| match err {
                ClusterError::Api { code: 404, .. } => ClusterError::namespace_not_found(&name),
                other => other,
            })
        })
    }

    fn list_tasks(&self, namespace: Option<&str>) -> ClusterFuture<'_, Vec<Task>> {
        let url = self.tasks_url(namespace);
        Box::pin(async move {
            let mut tasks = Vec::new();
            let mut continue_token: Option<String> = None;
            loop {
                let mut query = vec![("limit", self.page_size.to_string())];
                if let Some(token) = continue_token.take() {
                    query.push(("continue", token));
                }
                let page: TaskList = self.get_json(&url, &query).await?;
                tasks.extend(page.items);
                match page.metadata.continue_token {
                    Some(token) if !token.is_empty() => continue_token = Some(token),
                    _ => break,
                }
            }
            tracing::debug!(count = tasks.len(), "listed tasks");
            Ok(tasks)
        })
    }
}
