//! Core library entry for the `tkn` CLI.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod formatted;
pub mod logging;
pub mod ports;
pub mod resource;
pub mod task;

use std::io::Write;

use clap::Parser;

use crate::context::ServiceContext;

/// Run an already parsed command line against the configured cluster,
/// printing to stdout.
///
/// # Errors
///
/// Returns an error string when configuration or command execution fails.
pub fn run(cli: &cli::Cli) -> Result<(), String> {
    logging::init(cli.verbose);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::dispatch(cli, &mut out)
}

/// Parse `args` and run the command against `ctx`, writing to `out`.
///
/// Namespaced commands default to `default` when no `-n` is given.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn execute<I, T>(ctx: &ServiceContext, args: I, out: &mut dyn Write) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch_with_context(&cli.command, ctx, config::DEFAULT_NAMESPACE, out)
}
