use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Usage(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Could not complete the roundup with the bank API, cause: {0}")]
    Api(#[from] engine::ApiError),
}
