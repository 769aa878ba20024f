//! A* path planning on an 8-connected occupancy grid
//!
//! Moves go to any of the eight neighbouring cells. Orthogonal steps cost
//! 1.0 and diagonal steps 1.41. A diagonal step is refused when both cells
//! sharing an edge with it (same row at the target column, same column at
//! the target row) are blocked, so routes never squeeze through a closed
//! wall corner. Partial corners may still be cut.
//!
//! The heuristic is the Manhattan distance on grid indices. It overestimates
//! on diagonal moves, so the result is a good route but not guaranteed to be
//! the cheapest one on every map.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::common::{GridPathPlanner, GridPoint, Path2D};
use crate::mapping::Grid;
use crate::utils::DisplayLayout;

/// Neighbour offsets in expansion order: orthogonal first, then diagonal
const MOTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Configuration for A* planner
#[derive(Debug, Clone)]
pub struct AStarConfig {
    /// Cost of a horizontal or vertical step
    pub orthogonal_cost: f64,
    /// Cost of a diagonal step
    pub diagonal_cost: f64,
    /// Heuristic weight applied to the Manhattan distance
    pub heuristic_weight: f64,
    /// Grid to display coordinate mapping used for the returned path
    pub layout: DisplayLayout,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            orthogonal_cost: 1.0,
            diagonal_cost: 1.41,
            heuristic_weight: 1.0,
            layout: DisplayLayout::default(),
        }
    }
}

/// Per-run search record for one cell
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    g: f64,
    h: f64,
    f: f64,
    parent: Option<usize>,
    /// Sequence number of the live open-set entry
    seq: u64,
    open: bool,
    closed: bool,
}

impl Default for SearchNode {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            h: f64::INFINITY,
            f: f64::INFINITY,
            parent: None,
            seq: 0,
            open: false,
            closed: false,
        }
    }
}

/// Open-set entry; smallest `f` first, then oldest insertion
#[derive(Debug, PartialEq, Eq)]
struct OpenEntry {
    f: Reverse<OrderedFloat<f64>>,
    seq: Reverse<u64>,
    index: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.cmp(&other.f).then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* path planner over a [`Grid`]
///
/// The planner holds no search state: every call allocates its own scratch
/// records, so one planner can serve any number of searches on shared grids.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner {
    config: AStarConfig,
}

impl AStarPlanner {
    pub fn new(config: AStarConfig) -> Self {
        AStarPlanner { config }
    }

    pub fn config(&self) -> &AStarConfig {
        &self.config
    }

    /// Heuristic estimate between two cells
    pub fn heuristic(&self, a: GridPoint, b: GridPoint) -> f64 {
        self.config.heuristic_weight * a.manhattan(&b) as f64
    }

    /// Cost of a single step between adjacent cells
    pub fn step_cost(&self, from: GridPoint, to: GridPoint) -> f64 {
        if from.is_diagonal_to(&to) {
            self.config.diagonal_cost
        } else {
            self.config.orthogonal_cost
        }
    }

    /// Total step cost of a grid route
    pub fn path_cost(&self, path: &[GridPoint]) -> f64 {
        path.windows(2).map(|w| self.step_cost(w[0], w[1])).sum()
    }

    /// Cells reachable in one move from `p`
    pub fn neighbors(&self, grid: &Grid, p: GridPoint) -> Vec<GridPoint> {
        let mut out = Vec::with_capacity(MOTIONS.len());
        for &(dx, dy) in MOTIONS.iter() {
            let n = p.offset(dx, dy);
            if !grid.is_passable(n) {
                continue;
            }
            if dx != 0 && dy != 0 {
                let horizontal = p.offset(dx, 0);
                let vertical = p.offset(0, dy);
                if grid.is_blocked(horizontal) && grid.is_blocked(vertical) {
                    continue;
                }
            }
            out.push(n);
        }
        out
    }

    /// Route from `start` to `goal` in grid indices, both inclusive.
    ///
    /// Empty when the goal cannot be reached. `start` and `goal` must be
    /// passable in-bounds cells; see [`GridPathPlanner::try_find_path`] for a
    /// checked entry point.
    pub fn find_grid_path(&self, grid: &Grid, start: GridPoint, goal: GridPoint) -> Vec<GridPoint> {
        debug_assert!(grid.in_bounds(start) && grid.in_bounds(goal));

        let mut nodes = vec![SearchNode::default(); grid.len()];
        let mut open_set = BinaryHeap::new();
        let mut seq: u64 = 0;

        let start_index = grid.index(start);
        let goal_index = grid.index(goal);
        {
            let node = &mut nodes[start_index];
            node.g = 0.0;
            node.h = self.heuristic(start, goal);
            node.f = node.g + node.h;
            node.open = true;
        }
        open_set.push(self.open_entry(nodes[start_index].f, seq, start_index));

        let mut expanded = 0usize;
        while let Some(entry) = open_set.pop() {
            let current_index = entry.index;
            let current_node = nodes[current_index];

            // Skip entries superseded by a cheaper push
            if !current_node.open || entry.seq.0 != current_node.seq {
                continue;
            }
            nodes[current_index].open = false;

            if current_index == goal_index {
                debug!(expanded, cost = current_node.g, "A* reached goal");
                return self.build_path(grid, goal_index, &nodes);
            }

            nodes[current_index].closed = true;
            expanded += 1;

            let current = grid.point(current_index);
            for neighbor in self.neighbors(grid, current) {
                let neighbor_index = grid.index(neighbor);
                if nodes[neighbor_index].closed {
                    continue;
                }

                let tentative_g = current_node.g + self.step_cost(current, neighbor);
                if tentative_g < nodes[neighbor_index].g {
                    let h = self.heuristic(neighbor, goal);
                    let node = &mut nodes[neighbor_index];
                    node.parent = Some(current_index);
                    node.g = tentative_g;
                    node.h = h;
                    node.f = node.g + node.h;
                    node.open = true;

                    seq += 1;
                    node.seq = seq;
                    open_set.push(self.open_entry(node.f, seq, neighbor_index));
                }
            }
        }

        debug!(expanded, "A* open set exhausted, goal unreachable");
        Vec::new()
    }

    /// Map a grid route to display coordinates
    pub fn to_display_path(&self, path: &[GridPoint]) -> Path2D {
        Path2D::from_points(path.iter().map(|&p| self.config.layout.to_display(p)).collect())
    }

    fn open_entry(&self, f: f64, seq: u64, index: usize) -> OpenEntry {
        OpenEntry {
            f: Reverse(OrderedFloat(f)),
            seq: Reverse(seq),
            index,
        }
    }

    fn build_path(&self, grid: &Grid, goal_index: usize, nodes: &[SearchNode]) -> Vec<GridPoint> {
        let mut path = Vec::new();
        let mut current_index = Some(goal_index);

        while let Some(index) = current_index {
            path.push(grid.point(index));
            current_index = nodes[index].parent;
        }

        path.reverse();
        path
    }
}

impl GridPathPlanner for AStarPlanner {
    fn find_path(&self, grid: &Grid, start: GridPoint, goal: GridPoint) -> Path2D {
        let path = self.find_grid_path(grid, start, goal);
        self.to_display_path(&path)
    }
}
