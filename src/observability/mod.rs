//! Observability module
//!
//! Logging setup for the `schedcfg` binary and embedding programs.

pub mod logging;

pub use logging::{LogFormat, init_logging};
