//! CLI argument definitions.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `tkn`.
#[derive(Debug, Parser)]
#[command(name = "tkn", version, about = "Inspect Tekton resources on a Kubernetes cluster")]
pub struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// How to reach the API server.
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// API server connection flags, shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// Kubeconfig file to read.
    #[arg(short = 'k', long, env = "KUBECONFIG", global = true)]
    pub kubeconfig: Option<String>,

    /// Kubeconfig context to use instead of the current one.
    #[arg(short = 'c', long, global = true)]
    pub context: Option<String>,

    /// API server URL, overriding the kubeconfig.
    #[arg(long, env = "TKN_SERVER", global = true)]
    pub server: Option<String>,

    /// Bearer token, overriding the kubeconfig.
    #[arg(long, env = "TKN_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Skip verification of the server certificate.
    #[arg(long, global = true)]
    pub insecure_skip_tls_verify: bool,

    /// Tekton API version to query.
    #[arg(long, env = "TKN_API_VERSION", default_value = "v1beta1", global = true)]
    pub api_version: String,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage tasks.
    Task {
        /// The task operation.
        #[command(subcommand)]
        command: TaskCommand,
    },
}

/// `tkn task` subcommands.
#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// List tasks in a namespace.
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

/// Flags for `tkn task list`.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Namespace to list from; defaults to the kubeconfig context's namespace.
    #[arg(short, long, conflicts_with = "all_namespaces")]
    pub namespace: Option<String>,

    /// List tasks from every namespace.
    #[arg(short = 'A', long)]
    pub all_namespaces: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Omit the table header row.
    #[arg(long)]
    pub no_headers: bool,
}

/// How `list` prints its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns.
    #[default]
    Table,
    /// A JSON `List` document.
    Json,
    /// A YAML `List` document.
    Yaml,
    /// One `task.tekton.dev/<name>` per line.
    Name,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_args(argv: &[&str]) -> ListArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        let Command::Task { command: TaskCommand::List(args) } = cli.command;
        args
    }

    #[test]
    fn parses_task_list_with_namespace() {
        let args = list_args(&["tkn", "task", "list", "-n", "foo"]);
        assert_eq!(args.namespace.as_deref(), Some("foo"));
        assert!(!args.all_namespaces);
        assert_eq!(args.output, OutputFormat::Table);
    }

    #[test]
    fn ls_alias_and_output_flag() {
        let args = list_args(&["tkn", "task", "ls", "-A", "-o", "json", "--no-headers"]);
        assert!(args.all_namespaces);
        assert!(args.no_headers);
        assert_eq!(args.output, OutputFormat::Json);
    }

    #[test]
    fn global_connection_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "tkn",
            "task",
            "list",
            "--server",
            "https://k8s.test",
            "-c",
            "dev",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.connection.server.as_deref(), Some("https://k8s.test"));
        assert_eq!(cli.connection.context.as_deref(), Some("dev"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn namespace_conflicts_with_all_namespaces() {
        let err = Cli::try_parse_from(["tkn", "task", "list", "-n", "foo", "-A"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["tkn", "pipeline"]).is_err());
    }
}
