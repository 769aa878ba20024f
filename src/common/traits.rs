//! Common traits defining the seams between the map, the planner and the renderer

use crate::common::types::*;
use crate::common::error::{GridError, GridResult};
use crate::mapping::Grid;

/// Trait for grid-based path planning algorithms
pub trait GridPathPlanner {
    /// Plan a route on `grid` from `start` to `goal`, both grid indices.
    ///
    /// The returned path is in display coordinates and is empty when the
    /// goal cannot be reached.
    fn find_path(&self, grid: &Grid, start: GridPoint, goal: GridPoint) -> Path2D;

    /// Like [`GridPathPlanner::find_path`], but rejects endpoints that are
    /// off the grid or on a blocked cell. An unreachable goal is not an error.
    fn try_find_path(&self, grid: &Grid, start: GridPoint, goal: GridPoint) -> GridResult<Path2D> {
        for (name, p) in [("start", start), ("goal", goal)] {
            if !grid.in_bounds(p) {
                return Err(GridError::InvalidParameter(format!(
                    "{} ({}, {}) is outside the {}x{} grid",
                    name, p.x, p.y, grid.width(), grid.height()
                )));
            }
            if !grid.is_passable(p) {
                return Err(GridError::InvalidParameter(format!(
                    "{} ({}, {}) is on a blocked cell",
                    name, p.x, p.y
                )));
            }
        }
        Ok(self.find_path(grid, start, goal))
    }
}

/// Rendering collaborator fed by the map and the route
pub trait GridRenderer {
    /// Fill the screen cell of grid position `(x, y)`
    fn draw_cell(&mut self, x: i32, y: i32, kind: CellKind);

    /// Draw a round marker centred at a display coordinate
    fn draw_marker(&mut self, center: Point2D, color: &str, radius: f64);
}
