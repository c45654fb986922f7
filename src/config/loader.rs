//! Configuration loader
//!
//! This module implements the loading pipeline:
//! 1. Open and read the source (size-limited)
//! 2. Tokenize into `<key> <value>` directives
//! 3. Dispatch each directive through the key registry
//! 4. Per-field validation as each value is parsed
//! 5. Cross-field validation (inline or deferred, see [`CrossFieldMode`])
//! 6. Freeze with `Arc`
//!
//! The first violation aborts the load. A failed load never hands out a
//! partially populated [`ConfigurationSet`].

use crate::config::parser::{self, Directive};
use crate::config::registry::FieldKey;
use crate::config::schema::ConfigurationSet;
use crate::config::validation::{ORDERING_RULES, OrderingRule, Violation};
use crate::error::ConfigError;

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Public API
// ============================================================================

/// When ordering rules between two fields are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossFieldMode {
    /// After the whole source has been parsed, against the final values.
    /// Key order in the file does not matter.
    #[default]
    Deferred,
    /// At the dependent key's line, against whatever the companion holds
    /// at that moment (its default, or an earlier line's value). A bounding
    /// key written after its dependent is not taken into account.
    Sequential,
}

/// Options for the configuration loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// When cross-field rules run.
    pub cross_field: CrossFieldMode,

    /// Treat any load warning as a failure.
    pub strict: bool,

    /// Limits on the source itself.
    pub limits: ConfigLimits,
}

/// Limits applied to the configuration source.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum configuration source size in bytes.
    pub max_config_size: u64,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_config_size: env_or("SCHEDCFG_MAX_CONFIG_SIZE", 1024 * 1024),
        }
    }
}

/// Progress of a [`ConfigLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No load has been attempted.
    #[default]
    NotLoaded,
    /// A load is in progress.
    Loading,
    /// The last load succeeded.
    Loaded,
    /// The last load failed.
    Failed,
}

/// Result of loading a configuration source.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<ConfigurationSet>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Line the warning refers to, if any.
    pub line: Option<usize>,

    /// Key the warning refers to, if any.
    pub key: Option<FieldKey>,

    /// Warning message.
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        if let Some(key) = self.key {
            write!(f, "{key}: ")?;
        }
        f.write_str(&self.message)
    }
}

/// Configuration loader.
///
/// Each call to [`load`](Self::load) or [`load_from_str`](Self::load_from_str)
/// starts again from the documented defaults.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
    phase: LoadPhase,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            phase: LoadPhase::NotLoaded,
        }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Returns the outcome of the most recent load.
    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or read, or exceeds the size limit
    /// - A line names an unknown key
    /// - A value fails its field rule or a cross-field rule
    /// - Strict mode is on and any warning was raised
    pub fn load(&mut self, path: &Path) -> Result<LoadResult, ConfigError> {
        self.transition(LoadPhase::Loading);
        tracing::info!(config = %path.display(), "loading configuration");
        let result = self
            .read_source(path)
            .and_then(|text| self.parse(&text, path));
        self.finish(result)
    }

    /// Loads and validates configuration text held in memory.
    ///
    /// `source` names the text in diagnostics.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus the I/O failures.
    pub fn load_from_str(
        &mut self,
        text: &str,
        source: impl AsRef<Path>,
    ) -> Result<LoadResult, ConfigError> {
        let source = source.as_ref();
        self.transition(LoadPhase::Loading);
        let size = u64::try_from(text.len()).unwrap_or(u64::MAX);
        let result = self
            .check_size(source, size)
            .and_then(|()| self.parse(text, source));
        self.finish(result)
    }

    fn transition(&mut self, to: LoadPhase) {
        tracing::trace!(from = ?self.phase, to = ?to, "load phase transition");
        self.phase = to;
    }

    fn finish(
        &mut self,
        result: Result<LoadResult, ConfigError>,
    ) -> Result<LoadResult, ConfigError> {
        match &result {
            Ok(_) => self.transition(LoadPhase::Loaded),
            Err(e) => {
                tracing::debug!(error = %e, "configuration rejected");
                self.transition(LoadPhase::Failed);
            }
        }
        result
    }

    fn check_size(&self, path: &Path, size: u64) -> Result<(), ConfigError> {
        let limit = self.options.limits.max_config_size;
        if size > limit {
            return Err(ConfigError::SourceTooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }
        Ok(())
    }

    fn read_source(&self, path: &Path) -> Result<String, ConfigError> {
        let unavailable = |source| ConfigError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unavailable)?;
        let size = file.metadata().map_err(unavailable)?.len();
        self.check_size(path, size)?;

        // Metadata reports 0 for pipes and procfs, so bound the read itself.
        let limit = self.options.limits.max_config_size;
        let mut bytes = Vec::new();
        file.take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(unavailable)?;
        self.check_size(path, u64::try_from(bytes.len()).unwrap_or(u64::MAX))?;

        String::from_utf8(bytes).map_err(|e| ConfigError::InvalidEncoding {
            path: path.to_path_buf(),
            offset: e.utf8_error().valid_up_to(),
        })
    }

    fn parse(&self, text: &str, path: &Path) -> Result<LoadResult, ConfigError> {
        let mut set = ConfigurationSet::default();
        let mut warnings = Vec::new();
        let mut seen: HashMap<FieldKey, usize> = HashMap::new();

        for directive in parser::directives(text) {
            let key = apply_directive(&mut set, &directive, path)?;

            if let Some(previous) = seen.insert(key, directive.line) {
                warnings.push(LoadWarning {
                    line: Some(directive.line),
                    key: Some(key),
                    message: format!("already set at line {previous}; the later value wins"),
                });
            }
            if let Some(extra) = directive.trailing {
                warnings.push(LoadWarning {
                    line: Some(directive.line),
                    key: Some(key),
                    message: format!("ignoring extra tokens after the value: '{extra}'"),
                });
            }

            if self.options.cross_field == CrossFieldMode::Sequential {
                for rule in OrderingRule::inline_for(key) {
                    check_ordering(rule, &set, &seen, path)?;
                }
            }
        }

        match self.options.cross_field {
            CrossFieldMode::Deferred => {
                for rule in &ORDERING_RULES {
                    check_ordering(rule, &set, &seen, path)?;
                }
            }
            CrossFieldMode::Sequential => {
                for rule in ORDERING_RULES.iter().filter(|r| !r.checked_inline) {
                    if let Some(message) = rule.check(&set) {
                        warnings.push(LoadWarning {
                            line: seen.get(&rule.dependent).copied(),
                            key: Some(rule.dependent),
                            message,
                        });
                    }
                }
            }
        }

        if self.options.strict
            && let Some(first) = warnings.first()
        {
            return Err(ConfigError::Strict {
                path: path.to_path_buf(),
                count: warnings.len(),
                first: first.to_string(),
            });
        }

        tracing::info!(
            config = %path.display(),
            keys = seen.len(),
            warnings = warnings.len(),
            "configuration loaded"
        );

        Ok(LoadResult {
            config: Arc::new(set),
            warnings,
        })
    }
}

/// Resolves, parses, and stores one directive, returning the key it set.
fn apply_directive(
    set: &mut ConfigurationSet,
    directive: &Directive<'_>,
    path: &Path,
) -> Result<FieldKey, ConfigError> {
    let Some(key) = FieldKey::lookup(directive.key) else {
        return Err(ConfigError::UnknownKey {
            path: path.to_path_buf(),
            line: directive.line,
            key: directive.key.to_string(),
            suggestion: FieldKey::suggest(directive.key).map(|k| k.as_str().to_string()),
        });
    };

    let Some(raw) = directive.value else {
        return Err(ConfigError::FormatViolation {
            path: path.to_path_buf(),
            line: directive.line,
            key: key.as_str().to_string(),
            value: String::new(),
            expected: format!("followed by a value ({})", key.rule().describe()),
        });
    };

    let token = if key.is_string_valued() {
        parser::strip_quotes(raw)
    } else {
        raw
    };

    key.assign(set, token).map_err(|violation| {
        let path = path.to_path_buf();
        let line = directive.line;
        let key = key.as_str().to_string();
        let value = raw.to_string();
        match violation {
            Violation::Range { expected } => ConfigError::RangeViolation {
                path,
                line,
                key,
                value,
                expected,
            },
            Violation::Format { expected } => ConfigError::FormatViolation {
                path,
                line,
                key,
                value,
                expected,
            },
        }
    })?;

    tracing::debug!(line = directive.line, key = %key, value = token, "accepted directive");
    Ok(key)
}

/// Runs `rule` against `set`. `seen` holds the keys the source has set so
/// far; the message names any side of the rule still at its default.
fn check_ordering(
    rule: &OrderingRule,
    set: &ConfigurationSet,
    seen: &HashMap<FieldKey, usize>,
    path: &Path,
) -> Result<(), ConfigError> {
    let Some(mut message) = rule.check(set) else {
        return Ok(());
    };
    let defaulted: Vec<&str> = [rule.dependent, rule.companion]
        .into_iter()
        .filter(|key| !seen.contains_key(key))
        .map(FieldKey::as_str)
        .collect();
    if !defaulted.is_empty() {
        message.push_str(&format!("; {} not set, using the default", defaulted.join(" and ")));
    }
    Err(ConfigError::CrossFieldViolation {
        path: path.to_path_buf(),
        key: rule.dependent.as_str().to_string(),
        companion: rule.companion.as_str().to_string(),
        message,
    })
}

/// Reads an environment variable and parses it, falling back to `default`.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Convenience wrapper: loads `path` with default options.
///
/// # Errors
///
/// See [`ConfigLoader::load`].
pub fn load_file(path: impl AsRef<Path>) -> Result<LoadResult, ConfigError> {
    ConfigLoader::with_defaults().load(path.as_ref())
}

// ============================================================================
// Tests
// ============================================================================
