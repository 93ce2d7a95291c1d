//! Trace capture configuration, loaded from JSON.

pub mod error;
pub mod read_config;

pub use error::ConfigError;
pub use read_config::{CaptureMode, TraceConfig};
