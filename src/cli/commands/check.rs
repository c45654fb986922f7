//! `check` command: validate configuration files.

use crate::cli::args::CheckArgs;
use crate::config::loader::ConfigLoader;
use crate::error::SchedcfgError;

/// Validate each file in turn, stopping at the first failure.
///
/// # Errors
///
/// Returns the first file's load error.
pub fn run(args: &CheckArgs) -> Result<(), SchedcfgError> {
    let mut loader = ConfigLoader::new(args.load.loader_options());

    for path in &args.files {
        tracing::info!(file = %path.display(), "validating configuration");
        let result = loader.load(path)?;
        super::report_warnings(&result);
        tracing::info!(file = %path.display(), "configuration valid");
    }

    Ok(())
}
