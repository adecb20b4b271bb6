//! Command dispatch and handlers.

pub mod task;

use std::env;
use std::io::Write;
use std::path::PathBuf;

use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command, TaskCommand};
use crate::config::{ClientConfig, DEFAULT_NAMESPACE};
use crate::context::ServiceContext;

/// Dispatch a parsed command line to its handler, writing results to `out`.
///
/// When `TKN_REPLAY` names a cassette file or a recording directory, ports
/// replay from it and no API server is contacted. When `TKN_RECORD` is set to
/// a directory path, all port interactions are recorded to per-port cassette
/// files under it.
///
/// # Errors
///
/// Returns an error string if configuration cannot be resolved or the
/// selected command handler fails.
pub fn dispatch(cli: &Cli, out: &mut dyn Write) -> Result<(), String> {
    if let Ok(path) = env::var("TKN_REPLAY") {
        let path = PathBuf::from(path);
        tracing::info!(path = %path.display(), "replaying cassettes");
        let ctx = if path.is_dir() {
            ServiceContext::replaying_from(&CassetteConfig::from_dir(&path))?
        } else {
            ServiceContext::replaying(&path)?
        };
        return dispatch_with_context(&cli.command, &ctx, DEFAULT_NAMESPACE, out);
    }

    let config = ClientConfig::resolve(&cli.connection)?;
    tracing::info!(server = %config.server, namespace = %config.namespace, "resolved cluster");

    if let Ok(dir) = env::var("TKN_RECORD") {
        let (ctx, session) = ServiceContext::recording_at(&PathBuf::from(dir), &config)?;
        let result = dispatch_with_context(&cli.command, &ctx, &config.namespace, out);

        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
        return result;
    }

    let ctx = ServiceContext::live(&config)?;
    dispatch_with_context(&cli.command, &ctx, &config.namespace, out)
}

/// Dispatch a command with the given service context.
///
/// `default_namespace` applies when a namespaced command gets no `-n`.
///
/// # Errors
///
/// Returns an error string if the async runtime cannot start or the handler
/// fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    default_namespace: &str,
    out: &mut dyn Write,
) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    match command {
        Command::Task { command: TaskCommand::List(args) } => {
            runtime.block_on(task::list(ctx, args, default_namespace, out))
        }
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
