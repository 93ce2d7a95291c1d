use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::error::ConfigError;
use crate::chain::Wrapper;
use crate::trace::{FixedTracer, NoTracer, StackTracer, Tracer, Truncate};

// { "capture": { "mode": "stack" }, "max_bytes": 4096 }
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TraceConfig {
    #[serde(default)]
    pub capture: CaptureMode,
    #[serde(default)]
    pub max_bytes: Option<usize>, // None keeps the whole snapshot
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum CaptureMode {
    #[default]
    Stack,
    Off,
    Fixed { trace: String },
}

impl TraceConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == Some(0) {
            return Err(ConfigError::Invalid(
                "max_bytes must be greater than zero".to_string(),
            ));
        }
        if let CaptureMode::Fixed { trace } = &self.capture {
            if trace.is_empty() {
                return Err(ConfigError::Invalid(
                    "fixed capture needs a non-empty trace".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Build the tracer this config describes.
    pub fn tracer(&self) -> Arc<dyn Tracer> {
        match (&self.capture, self.max_bytes) {
            (CaptureMode::Off, _) => Arc::new(NoTracer),
            (CaptureMode::Stack, None) => Arc::new(StackTracer),
            (CaptureMode::Stack, Some(max)) => Arc::new(Truncate::new(StackTracer, max)),
            (CaptureMode::Fixed { trace }, None) => Arc::new(FixedTracer::new(trace.as_str())),
            (CaptureMode::Fixed { trace }, Some(max)) => {
                Arc::new(Truncate::new(FixedTracer::new(trace.as_str()), max))
            }
        }
    }

    pub fn wrapper(&self) -> Wrapper {
        Wrapper::new(self.tracer())
    }
}

impl FromStr for TraceConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: TraceConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config: TraceConfig = "{}".parse().unwrap();
        assert_eq!(config.capture, CaptureMode::Stack);
        assert_eq!(config.max_bytes, None);
        assert_eq!(config, TraceConfig::default());
    }

    #[test]
    fn test_fixed_mode() {
        let config: TraceConfig =
            r#"{ "capture": { "mode": "fixed", "trace": "frames" }, "max_bytes": 3 }"#
                .parse()
                .unwrap();
        assert_eq!(config.tracer().capture(), b"fra");

        let err = config.wrapper().wrap("cause", "top");
        assert_eq!(format!("{:+}", err), "fra");
    }

    #[test]
    fn test_off_mode() {
        let config: TraceConfig = r#"{ "capture": { "mode": "off" } }"#.parse().unwrap();
        assert!(config.tracer().capture().is_empty());
    }

    #[test]
    fn test_rejects_zero_max_bytes() {
        let err = r#"{ "max_bytes": 0 }"#.parse::<TraceConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_fixed_trace() {
        let err = r#"{ "capture": { "mode": "fixed", "trace": "" } }"#
            .parse::<TraceConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let err = r#"{ "capture": { "mode": "sometimes" } }"#
            .parse::<TraceConfig>()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_misspelled_key() {
        let err = r#"{ "max_byte": 0 }"#.parse::<TraceConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("trace.json");
        fs::write(&config_path, r#"{ "capture": { "mode": "off" } }"#).unwrap();

        let config = TraceConfig::from_file(&config_path).unwrap();
        assert_eq!(config.capture, CaptureMode::Off);
    }

    #[test]
    fn test_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("missing.json");

        let err = TraceConfig::from_file(&config_path).unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert_eq!(path, config_path),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
