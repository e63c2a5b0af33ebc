use std::fmt;

use waypath_core::{GridError, Point};

/// Errors returned by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The frontier emptied before the goal was reached. This is a normal
    /// outcome for walled-off or unreachable goals.
    NoPathFound { from: Point, to: Point },
    /// The configured expansion budget ran out before the search finished.
    BudgetExceeded { limit: usize },
    /// An endpoint was not addressable on the grid.
    Grid(GridError),
}

impl PathError {
    /// Whether this is the expected "no route" outcome rather than a misuse.
    #[inline]
    pub fn is_no_path(&self) -> bool {
        matches!(self, Self::NoPathFound { .. })
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPathFound { from, to } => write!(f, "no path from {from} to {to}"),
            Self::BudgetExceeded { limit } => {
                write!(f, "search gave up after expanding {limit} cells")
            }
            Self::Grid(e) => write!(f, "grid error: {e}"),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for PathError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
