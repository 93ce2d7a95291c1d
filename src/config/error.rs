use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("couldnt read trace config at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("trace config is not valid json")]
    Parse(#[from] serde_json::Error),
    #[error("invalid trace config: {0}")]
    Invalid(String),
}
