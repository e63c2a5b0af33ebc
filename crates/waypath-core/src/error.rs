//! Errors raised while building or addressing a [`Grid`](crate::Grid).

use std::fmt;

use crate::geom::{Point, Range};

/// Errors that can occur when constructing or indexing a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Width or height was not strictly positive.
    InvalidDimension { width: i32, height: i32 },
    /// A coordinate fell outside the grid.
    OutOfBounds { pos: Point, bounds: Range },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid grid dimension {width}x{height}")
            }
            Self::OutOfBounds { pos, bounds } => {
                write!(f, "position {pos} is outside grid bounds {bounds}")
            }
        }
    }
}

impl std::error::Error for GridError {}
