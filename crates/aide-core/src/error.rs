use thiserror::Error;

#[derive(Debug, Error)]
pub enum AideError {
    #[error("invalid agent kind '{0}': expected 'command' or 'prompt-file'")]
    InvalidAgentKind(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AideError>;
