//! `show` command: print the values a configuration file resolves to.

use std::io::Write;

use crate::cli::args::{OutputFormat, ShowArgs};
use crate::config::loader::ConfigLoader;
use crate::config::registry::FieldKey;
use crate::config::schema::ConfigurationSet;
use crate::error::SchedcfgError;

/// Load the file and print every field.
///
/// The human format is itself a valid configuration file.
///
/// # Errors
///
/// Returns the load error, or an I/O/JSON error while writing stdout.
pub fn run(args: &ShowArgs) -> Result<(), SchedcfgError> {
    let result = ConfigLoader::new(args.load.loader_options()).load(&args.file)?;
    super::report_warnings(&result);

    let mut out = std::io::stdout().lock();
    match args.format {
        OutputFormat::Human => out.write_all(render_human(&result.config).as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, result.config.as_ref())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Renders `set` in configuration-file syntax, one key per line.
#[must_use]
pub fn render_human(set: &ConfigurationSet) -> String {
    FieldKey::ALL
        .iter()
        .map(|key| format!("{key} {}\n", key.render(set)))
        .collect()
}
