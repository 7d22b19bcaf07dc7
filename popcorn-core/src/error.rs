use thiserror::Error;

/// Errors originating from the core geometry engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("transform is not invertible (determinant {determinant})")]
    SingularMatrix { determinant: f64 },

    #[error("unknown plot variant: {0:?}")]
    UnknownPlot(String),

    #[error("unknown colour mode: {0:?}")]
    UnknownColourMode(String),

    #[error("plot variant {0:?} is already registered")]
    DuplicatePlot(String),

    #[error("invalid levels: {0} (must be >= 1)")]
    InvalidLevels(i64),
}
