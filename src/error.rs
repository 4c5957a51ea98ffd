use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// A k-nearest-neighbors query was made with `k < 1`.
    #[error("k must be greater than zero for k-nearest-neighbors queries")]
    NonPositiveK,

    /// A k-nearest-neighbors query was made with `k == 1`.
    #[error("k must be greater than one for k-nearest-neighbors queries; use `nearest` for a single neighbor")]
    UseNearestForSingle,

    /// A data row is shorter than the column layout requires.
    #[error("Row {row}: missing column {column}")]
    MissingColumn { row: usize, column: usize },

    /// A data row's coordinate column is not a `"lat, lon"` pair of floats.
    #[error("Row {row}: invalid coordinates {value:?}")]
    InvalidCoordinates { row: usize, value: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeocodeError>;
