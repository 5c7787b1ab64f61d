use maze_core::{ConfigError, ErrorSeverity, GameError, GenerationError};

/// Errors surfaced by the session driver.
///
/// Gameplay rejections never show up here; only structural failures do.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("maze generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(err) => err.severity(),
            Self::Generation(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(err) => err.error_code(),
            Self::Generation(err) => err.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
