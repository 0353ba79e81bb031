//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `bt-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("row {row} or column {col} out of bounds for a {rows}x{cols} grid")]
    CellOutOfBounds { row: u32, col: u32, rows: u32, cols: u32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
