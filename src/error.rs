use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid chart input: {0}")]
    Validation(String),

    #[error("viewport time span is zero")]
    DegenerateTimeRange,

    #[error("chart handle is disposed")]
    Disposed,

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}
