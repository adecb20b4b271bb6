//! `tkn task` commands.

use std::io::Write;

use crate::cli::{ListArgs, OutputFormat};
use crate::context::ServiceContext;
use crate::resource::{TaskList, TEKTON_GROUP};
use crate::task::{self, Scope, TableFormatter};

/// Execute `tkn task list`.
///
/// Lists the tasks in the selected namespace (or every namespace with `-A`)
/// and prints them in the requested format.
///
/// # Errors
///
/// Returns an error string if the namespace does not exist, the cluster call
/// fails, or output cannot be written.
pub async fn list(
    ctx: &ServiceContext,
    args: &ListArgs,
    default_namespace: &str,
    out: &mut dyn Write,
) -> Result<(), String> {
    let scope = if args.all_namespaces {
        Scope::AllNamespaces
    } else {
        Scope::Namespace(args.namespace.clone().unwrap_or_else(|| default_namespace.to_string()))
    };
    tracing::info!(?scope, output = ?args.output, "listing tasks");

    let mut tasks =
        task::list_tasks(ctx.cluster.as_ref(), &scope).await.map_err(|e| e.to_string())?;

    match args.output {
        OutputFormat::Table => {
            let formatter = TableFormatter::default()
                .all_namespaces(args.all_namespaces)
                .headers(!args.no_headers);
            for line in formatter.lines(&tasks, ctx.clock.now()) {
                writeln!(out, "{line}").map_err(write_error)?;
            }
        }
        OutputFormat::Json => {
            task::sort_tasks(&mut tasks);
            serde_json::to_writer_pretty(&mut *out, &TaskList::printable(tasks))
                .map_err(|e| format!("Failed to encode tasks as JSON: {e}"))?;
            writeln!(out).map_err(write_error)?;
        }
        OutputFormat::Yaml => {
            task::sort_tasks(&mut tasks);
            let yaml = serde_yaml::to_string(&TaskList::printable(tasks))
                .map_err(|e| format!("Failed to encode tasks as YAML: {e}"))?;
            out.write_all(yaml.as_bytes()).map_err(write_error)?;
        }
        OutputFormat::Name => {
            task::sort_tasks(&mut tasks);
            for t in &tasks {
                writeln!(out, "task.{TEKTON_GROUP}/{}", t.name()).map_err(write_error)?;
            }
        }
    }
    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
fn write_error(err: std::io::Error) -> String {
    format!("Failed to write output: {err}")
}
