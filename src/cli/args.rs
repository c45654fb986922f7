//! CLI argument definitions
//!
//! All Clap derive structs for `schedcfg` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::loader::{CrossFieldMode, LoaderOptions};
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Validate and inspect scheduler simulator configuration files.
#[derive(Parser, Debug)]
#[command(name = "schedcfg", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "SCHEDCFG_COLOR")]
    pub color: ColorChoice,

    /// Log line format.
    #[arg(long, default_value = "human", global = true, env = "SCHEDCFG_LOG_FORMAT")]
    pub log_format: LogFormatChoice,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate one or more configuration files.
    Check(CheckArgs),

    /// Load a configuration file and print the resulting values.
    Show(ShowArgs),

    /// List recognized keys with their defaults and constraints.
    Keys(KeysArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Loader behavior shared by `check` and `show`.
#[derive(Args, Debug, Clone, Copy)]
pub struct LoadFlags {
    /// Check cross-field rules at the dependent key's line instead of
    /// after the whole file (order-dependent, matches older simulators).
    #[arg(long, env = "SCHEDCFG_SEQUENTIAL")]
    pub sequential: bool,

    /// Treat warnings (duplicate keys, extra tokens) as errors.
    #[arg(long)]
    pub strict: bool,
}

impl LoadFlags {
    /// Builds loader options from the flags.
    #[must_use]
    pub fn loader_options(self) -> LoaderOptions {
        LoaderOptions {
            cross_field: if self.sequential {
                CrossFieldMode::Sequential
            } else {
                CrossFieldMode::Deferred
            },
            strict: self.strict,
            ..LoaderOptions::default()
        }
    }
}

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub load: LoadFlags,
}

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Configuration file to load.
    #[arg(env = "SCHEDCFG_CONFIG")]
    pub file: PathBuf,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub load: LoadFlags,
}

/// Arguments for `keys`.
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormatChoice {
    /// Human-readable lines.
    #[default]
    Human,
    /// Newline-delimited JSON.
    Json,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Human => Self::Human,
            LogFormatChoice::Json => Self::Json,
        }
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// JSON.
    Json,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash
    Bash,
    /// Zsh
    Zsh,
    /// Fish
    Fish,
    /// `PowerShell`
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish
    Elvish,
}
