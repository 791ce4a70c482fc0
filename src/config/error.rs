//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors. All of them abort the run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Vault root is not set; pass --vault or set [vault].root")]
    MissingVaultRoot,

    #[error("Vault root `{0}` is not an existing directory")]
    VaultNotFound(PathBuf),

    #[error("Config validation error: {0}")]
    Validation(String),
}
