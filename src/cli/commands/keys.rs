//! `keys` command: list recognized keys.

use std::io::Write;

use serde::Serialize;

use crate::cli::args::{KeysArgs, OutputFormat};
use crate::config::registry::FieldKey;
use crate::config::schema::ConfigurationSet;
use crate::error::SchedcfgError;

#[derive(Debug, Serialize)]
struct KeyInfo {
    key: &'static str,
    default: String,
    constraint: String,
}

fn key_table() -> Vec<KeyInfo> {
    let defaults = ConfigurationSet::default();
    FieldKey::ALL
        .into_iter()
        .map(|key| KeyInfo {
            key: key.as_str(),
            default: key.render(&defaults),
            constraint: key.rule().describe(),
        })
        .collect()
}

/// Print every recognized key with its default value and constraint.
///
/// # Errors
///
/// Returns an I/O or JSON error while writing stdout.
pub fn run(args: &KeysArgs) -> Result<(), SchedcfgError> {
    let table = key_table();
    let mut out = std::io::stdout().lock();

    match args.format {
        OutputFormat::Human => {
            let width = table.iter().map(|k| k.key.len()).max().unwrap_or(0);
            for info in &table {
                writeln!(
                    out,
                    "{:<width$}  default {:<6}  {}",
                    info.key, info.default, info.constraint
                )?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &table)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
