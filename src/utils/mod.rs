//! Utility modules for grid_astar

pub mod display;
pub mod visualization;

pub use display::*;
pub use visualization::{GridVisualizer, colors};
