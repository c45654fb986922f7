//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod check;
pub mod completions;
pub mod keys;
pub mod show;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::config::loader::LoadResult;
use crate::error::SchedcfgError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), SchedcfgError> {
    match cli.command {
        Commands::Check(args) => check::run(&args),
        Commands::Show(args) => show::run(&args),
        Commands::Keys(args) => keys::run(&args),
        Commands::Completions(args) => {
            completions::run(&args, &mut std::io::stdout());
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Logs every warning attached to a successful load.
fn report_warnings(result: &LoadResult) {
    for warning in &result.warnings {
        tracing::warn!(
            line = warning.line,
            key = warning.key.map(|k| k.as_str()),
            "{}",
            warning.message
        );
    }
}
