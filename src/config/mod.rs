//! Configuration module
//!
//! Loads and validates the scheduler simulator's configuration file: a
//! line-based `<key> <value>` format with `#` comments and eleven
//! recognized keys.

pub mod global;
pub mod loader;
pub mod parser;
pub mod registry;
pub mod schema;
pub mod validation;

pub use loader::{
    ConfigLimits, ConfigLoader, CrossFieldMode, LoadPhase, LoadResult, LoadWarning, LoaderOptions,
    load_file,
};
pub use registry::FieldKey;
pub use schema::{ConfigurationSet, SchedulerKind};
pub use validation::{OrderingRule, Rule};
