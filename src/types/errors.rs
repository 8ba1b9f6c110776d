use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Cannot set nested property on non-object at path segment '{segment}' in '{path}'")]
    NonObjectIntermediate { segment: String, path: String },

    #[error("Immutable value already set at '{0}'. Use write() to override it")]
    ImmutableOverwrite(String),

    #[error("'{0}' is a reserved member name")]
    ReservedKey(String),

    #[error("Configuration load error: {0}")]
    Load(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
