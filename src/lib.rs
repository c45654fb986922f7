//! `schedcfg` - configuration loader for the process scheduler simulator
//!
//! Parses the simulator's line-based configuration file, validates every
//! value (ranges, power-of-two memory sizes, scheduler names, and ordering
//! rules between related fields), and produces a frozen
//! [`ConfigurationSet`](config::ConfigurationSet) for the rest of the
//! simulator to read.
//!
//! ```no_run
//! use std::path::Path;
//! use schedcfg::config::ConfigLoader;
//!
//! let mut loader = ConfigLoader::with_defaults();
//! let loaded = loader.load(Path::new("config.txt"))?;
//! println!("{} CPUs, {}", loaded.config.cpu_count(), loaded.config.scheduler());
//! # Ok::<(), schedcfg::error::ConfigError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
