//! Error types for grid construction, lookup and id parsing

use crate::cell::CellId;
use thiserror::Error;

/// Grid error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("cell {0} is not part of the grid")]
    UnknownCellId(CellId),

    #[error("grid must be at least 3x3, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

/// Failure to decode an "x,y" cell id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCellIdError {
    #[error("expected \"x,y\", got {0:?}")]
    Format(String),

    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
