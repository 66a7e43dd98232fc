use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at construction and configuration time.
///
/// A simulation tick never returns one of these: degenerate geometry and
/// numeric faults are absorbed inside the tick.
#[derive(Debug, Error)]
pub enum Error {
    /// A tuning value is outside its valid range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A state vector contained NaN or infinity.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    /// Settings JSON could not be parsed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Settings file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
