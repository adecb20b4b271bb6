//! Connection settings for the API server.
//!
//! Flags and their environment fallbacks win over the kubeconfig file, which
//! wins over built-in defaults.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use serde::Deserialize;

use crate::cli::ConnectionArgs;

/// Namespace used when neither a flag nor the kubeconfig context names one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Number of tasks requested per list page.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Fully resolved settings for talking to one API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://10.0.0.1:6443`.
    pub server: String,
    /// Bearer token.
    pub token: Option<String>,
    /// Namespace to use when the command does not name one.
    pub namespace: String,
    /// Tekton API version, e.g. `v1beta1`.
    pub api_version: String,
    /// PEM bundle to trust in addition to the system roots.
    pub certificate_authority: Option<Vec<u8>>,
    /// Skip server certificate verification.
    pub insecure_skip_tls_verify: bool,
    /// Page size for list calls.
    pub page_size: u32,
}

impl ClientConfig {
    /// Resolve settings from CLI arguments and the kubeconfig file.
    ///
    /// # Errors
    ///
    /// Returns an error if a kubeconfig that was asked for cannot be read or
    /// parsed, the selected context does not exist, or no server is
    /// configured anywhere.
    pub fn resolve(args: &ConnectionArgs) -> Result<Self, String> {
        let kube = match kubeconfig_path(args.kubeconfig.as_deref()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading kubeconfig");
                Kubeconfig::load(&path)?.select(args.context.as_deref())?
            }
            None if args.context.is_some() => {
                return Err("a context was selected but no kubeconfig file was found".to_string());
            }
            None => KubeSettings::default(),
        };

        let server = args.server.clone().or(kube.server).ok_or_else(|| {
            "no API server configured: pass --server, set TKN_SERVER, or provide a kubeconfig"
                .to_string()
        })?;

        Ok(Self {
            server: server.trim_end_matches('/').to_string(),
            token: args.token.clone().or(kube.token),
            namespace: kube.namespace.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            api_version: args.api_version.clone(),
            certificate_authority: kube.certificate_authority,
            insecure_skip_tls_verify: args.insecure_skip_tls_verify
                || kube.insecure_skip_tls_verify,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }
}

/// Pick the kubeconfig to read.
///
/// An explicit value may be a path list like `$KUBECONFIG`; the first entry
/// is used even if it does not exist, so that the read error names it.
/// Without one, `~/.kube/config` is used only if present.
fn kubeconfig_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(value) = explicit.filter(|v| !v.is_empty()) {
        return std::env::split_paths(value).next();
    }
    dirs::home_dir().map(|home| home.join(".kube").join("config")).filter(|p| p.is_file())
}

/// The parts of a kubeconfig context the CLI uses.
#[derive(Debug, Default)]
struct KubeSettings {
    server: Option<String>,
    token: Option<String>,
    namespace: Option<String>,
    certificate_authority: Option<Vec<u8>>,
    insecure_skip_tls_verify: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Kubeconfig {
    #[serde(default)]
    clusters: Vec<NamedCluster>,
    #[serde(default)]
    contexts: Vec<NamedContext>,
    #[serde(default)]
    users: Vec<NamedUser>,
    #[serde(default)]
    current_context: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamedCluster {
    name: String,
    cluster: KubeCluster,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct KubeCluster {
    server: String,
    #[serde(default)]
    certificate_authority: Option<PathBuf>,
    #[serde(default)]
    certificate_authority_data: Option<String>,
    #[serde(default)]
    insecure_skip_tls_verify: bool,
}

#[derive(Debug, Deserialize)]
struct NamedContext {
    name: String,
    context: KubeContext,
}

#[derive(Debug, Deserialize)]
struct KubeContext {
    cluster: String,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    namespace: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamedUser {
    name: String,
    user: KubeUser,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KubeUser {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    token_file: Option<PathBuf>,
}

impl Kubeconfig {
    fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read kubeconfig {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse kubeconfig {}: {e}", path.display()))
    }

    /// Flatten the chosen context (or `current-context`) into settings.
    fn select(self, context: Option<&str>) -> Result<KubeSettings, String> {
        let Some(name) = context.map(str::to_string).or(self.current_context) else {
            return Ok(KubeSettings::default());
        };
        let context = self
            .contexts
            .into_iter()
            .find(|c| c.name == name)
            .map(|c| c.context)
            .ok_or_else(|| format!("context \"{name}\" not found in kubeconfig"))?;
        let cluster = self
            .clusters
            .into_iter()
            .find(|c| c.name == context.cluster)
            .map(|c| c.cluster)
            .ok_or_else(|| format!("cluster \"{}\" not found in kubeconfig", context.cluster))?;
        let user = context
            .user
            .as_deref()
            .and_then(|u| self.users.into_iter().find(|n| n.name == u))
            .map(|n| n.user)
            .unwrap_or_default();

        let certificate_authority =
            match (cluster.certificate_authority_data, cluster.certificate_authority) {
                (Some(data), _) => Some(
                    base64::engine::general_purpose::STANDARD
                        .decode(data.trim())
                        .map_err(|e| format!("invalid certificate-authority-data: {e}"))?,
                ),
                (None, Some(path)) => Some(std::fs::read(&path).map_err(|e| {
                    format!("Failed to read certificate authority {}: {e}", path.display())
                })?),
                (None, None) => None,
            };

        let token = match (user.token, user.token_file) {
            (Some(token), _) => Some(token),
            (None, Some(path)) => Some(
                std::fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read token file {}: {e}", path.display()))?
                    .trim()
                    .to_string(),
            ),
            (None, None) => None,
        };

        Ok(KubeSettings {
            server: Some(cluster.server),
            token,
            namespace: context.namespace,
            certificate_authority,
            insecure_skip_tls_verify: cluster.insecure_skip_tls_verify,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KUBECONFIG: &str = r"
apiVersion: v1
kind: Config
current-context: dev
clusters:
  - name: dev-cluster
    cluster:
      server: https://dev.example:6443/
      certificate-authority-data: LS0tLS1CRUdJTg==
  - name: prod-cluster
    cluster:
      server: https://prod.example:6443
      insecure-skip-tls-verify: true
contexts:
  - name: dev
    context:
      cluster: dev-cluster
      user: dev-user
      namespace: pipelines
  - name: prod
    context:
      cluster: prod-cluster
users:
  - name: dev-user
    user:
      token: dev-token
";

    fn write_kubeconfig(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config");
        std::fs::write(&path, KUBECONFIG).unwrap();
        path
    }

    fn args(kubeconfig: Option<&Path>) -> ConnectionArgs {
        ConnectionArgs {
            kubeconfig: kubeconfig.map(|p| p.display().to_string()),
            context: None,
            server: None,
            token: None,
            insecure_skip_tls_verify: false,
            api_version: "v1beta1".to_string(),
        }
    }

    #[test]
    fn current_context_supplies_everything() {
        let path = write_kubeconfig("tkn_config_current_context");
        let config = ClientConfig::resolve(&args(Some(&path))).unwrap();

        assert_eq!(config.server, "https://dev.example:6443");
        assert_eq!(config.token.as_deref(), Some("dev-token"));
        assert_eq!(config.namespace, "pipelines");
        assert_eq!(config.certificate_authority.as_deref(), Some(b"-----BEGIN".as_slice()));
        assert!(!config.insecure_skip_tls_verify);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn selected_context_without_user_or_namespace() {
        let path = write_kubeconfig("tkn_config_selected_context");
        let mut args = args(Some(&path));
        args.context = Some("prod".to_string());
        let config = ClientConfig::resolve(&args).unwrap();

        assert_eq!(config.server, "https://prod.example:6443");
        assert_eq!(config.token, None);
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert!(config.insecure_skip_tls_verify);
    }

    #[test]
    fn flags_override_kubeconfig() {
        let path = write_kubeconfig("tkn_config_flags_override");
        let mut args = args(Some(&path));
        args.server = Some("http://127.0.0.1:8001".to_string());
        args.token = Some("flag-token".to_string());
        let config = ClientConfig::resolve(&args).unwrap();

        assert_eq!(config.server, "http://127.0.0.1:8001");
        assert_eq!(config.token.as_deref(), Some("flag-token"));
        assert_eq!(config.namespace, "pipelines");
    }

    #[test]
    fn unknown_context_is_an_error() {
        let path = write_kubeconfig("tkn_config_unknown_context");
        let mut args = args(Some(&path));
        args.context = Some("staging".to_string());
        let err = ClientConfig::resolve(&args).unwrap_err();
        assert_eq!(err, "context \"staging\" not found in kubeconfig");
    }

    #[test]
    fn missing_explicit_kubeconfig_is_an_error() {
        let args = args(Some(Path::new("/nonexistent/tkn/kubeconfig")));
        let err = ClientConfig::resolve(&args).unwrap_err();
        assert!(err.starts_with("Failed to read kubeconfig /nonexistent/tkn/kubeconfig"));
    }

    #[test]
    fn server_flag_alone_is_enough() {
        let empty = std::env::temp_dir().join("tkn_config_server_only");
        std::fs::create_dir_all(&empty).unwrap();
        let path = empty.join("config");
        std::fs::write(&path, "apiVersion: v1\nkind: Config\n").unwrap();

        let mut args = args(Some(&path));
        args.server = Some("http://localhost:8080".to_string());
        let config = ClientConfig::resolve(&args).unwrap();
        assert_eq!(config.server, "http://localhost:8080");
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert_eq!(config.certificate_authority, None);
    }
}
