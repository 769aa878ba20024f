//! grid_astar - A* route finding on noise-generated grid maps
//!
//! This crate generates a 2D occupancy grid from Perlin noise, picks two
//! floor cells, finds an 8-connected A* route between them and renders the
//! map and the route.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod mapping;
pub mod path_planning;
pub mod find_location;

// Re-export common types for convenience
pub use common::{CellKind, GridPoint, Point2D, Path2D};
pub use common::{GridPathPlanner, GridRenderer};
pub use common::{GridError, GridResult};
pub use mapping::{Grid, NoiseGridConfig};
pub use path_planning::{AStarConfig, AStarPlanner};
pub use find_location::{find_location, FindLocationConfig, Route};
