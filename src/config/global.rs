//! Process-wide configuration slot.
//!
//! Most code should take an `Arc<ConfigurationSet>` from its caller. This
//! module exists for programs that want a single global handle: the slot
//! is filled at most once, and every later reader sees the same frozen set.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::config::loader::{ConfigLoader, LoadResult, LoaderOptions};
use crate::config::schema::ConfigurationSet;
use crate::error::ConfigError;

static INSTALLED: OnceLock<Arc<ConfigurationSet>> = OnceLock::new();

/// Installs `config` as the process-wide configuration.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyInstalled`] if a configuration was
/// installed earlier; the existing one is kept.
pub fn install(config: Arc<ConfigurationSet>) -> Result<(), ConfigError> {
    INSTALLED
        .set(config)
        .map_err(|_| ConfigError::AlreadyInstalled)?;
    tracing::debug!("process-wide configuration installed");
    Ok(())
}

/// Returns the process-wide configuration, if one has been installed.
#[must_use]
pub fn get() -> Option<Arc<ConfigurationSet>> {
    INSTALLED.get().cloned()
}

/// Loads `path` and installs the result process-wide.
///
/// Nothing is installed when the load fails.
///
/// # Errors
///
/// Returns any load error, or [`ConfigError::AlreadyInstalled`] if the
/// slot was filled first (including by a concurrent caller).
pub fn load_global(path: &Path, options: LoaderOptions) -> Result<LoadResult, ConfigError> {
    if INSTALLED.get().is_some() {
        return Err(ConfigError::AlreadyInstalled);
    }
    let result = ConfigLoader::new(options).load(path)?;
    install(Arc::clone(&result.config))?;
    Ok(result)
}
