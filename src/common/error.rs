//! Error types for grid_astar

use std::fmt;

/// Main error type for grid generation and pathfinding
#[derive(Debug)]
pub enum GridError {
    /// Invalid parameter (zero-sized grid, endpoint off the grid or on a wall)
    InvalidParameter(String),
    /// Every regenerated map failed to produce a route
    AttemptsExhausted(usize),
    /// I/O error
    IoError(std::io::Error),
    /// Visualization error
    VisualizationError(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            GridError::AttemptsExhausted(n) => {
                write!(f, "No route found after {} map attempts", n)
            }
            GridError::IoError(e) => write!(f, "I/O error: {}", e),
            GridError::VisualizationError(msg) => write!(f, "Visualization error: {}", msg),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GridError {
    fn from(e: std::io::Error) -> Self {
        GridError::IoError(e)
    }
}

/// Result type alias for grid operations
pub type GridResult<T> = Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GridError::InvalidParameter("start is blocked".to_string());
        assert_eq!(format!("{}", err), "Invalid parameter: start is blocked");

        let err = GridError::AttemptsExhausted(3);
        assert_eq!(format!("{}", err), "No route found after 3 map attempts");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GridError = io_err.into();
        assert!(matches!(err, GridError::IoError(_)));
    }
}
