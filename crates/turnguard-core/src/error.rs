use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error("refusing to replace non-symlink file: {0}")]
    NotASymlink(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GateError>;
