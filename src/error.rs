use thiserror::Error;

pub type ViewerResult<T> = Result<T, ViewerError>;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid container size: width={width}, height={height}")]
    InvalidContainer { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("source load failed: {0}")]
    SourceLoad(String),
}
