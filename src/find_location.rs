//! Generate a map, pick two floor cells and route between them
//!
//! Each attempt draws a fresh noise seed, builds the grid, samples a start
//! and a goal, and searches. An attempt with no route (or with no floor at
//! all) is thrown away and the whole map is regenerated. Only the winning
//! attempt is rendered: the grid, one marker per path waypoint, then the goal.

use rand::Rng;
use tracing::{info, warn};

use crate::common::{GridError, GridPoint, GridRenderer, GridResult, Path2D};
use crate::mapping::{Grid, NoiseGridConfig};
use crate::path_planning::{AStarConfig, AStarPlanner};
use crate::utils::colors;

/// Configuration for one run of the pipeline
#[derive(Debug, Clone)]
pub struct FindLocationConfig {
    pub grid: NoiseGridConfig,
    pub planner: AStarConfig,
    /// Radius of path and goal markers
    pub marker_radius: f64,
    /// Number of maps to try before giving up
    pub max_attempts: usize,
}

impl Default for FindLocationConfig {
    fn default() -> Self {
        Self {
            grid: NoiseGridConfig::default(),
            planner: AStarConfig::default(),
            marker_radius: 2.0,
            max_attempts: 100,
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct Route {
    /// Noise seed of the map that produced the route
    pub seed: u32,
    /// Number of maps generated, including the successful one
    pub attempts: usize,
    pub grid: Grid,
    pub start: GridPoint,
    pub goal: GridPoint,
    /// Route in grid indices
    pub grid_path: Vec<GridPoint>,
    /// Route in display coordinates
    pub path: Path2D,
}

/// Run generate -> sample -> search -> render until a route is found
pub fn find_location<R: Rng + ?Sized>(
    config: &FindLocationConfig,
    rng: &mut R,
    renderer: &mut dyn GridRenderer,
) -> GridResult<Route> {
    if config.max_attempts == 0 {
        return Err(GridError::InvalidParameter("max_attempts must be >= 1".to_string()));
    }
    let planner = AStarPlanner::new(config.planner.clone());

    for attempt in 1..=config.max_attempts {
        let seed: u32 = rng.gen();
        let grid = Grid::from_noise(&config.grid, seed)?;

        let (start, goal) = match (grid.sample_passable(&mut *rng), grid.sample_passable(&mut *rng)) {
            (Some(start), Some(goal)) => (start, goal),
            _ => {
                warn!(attempt, seed, "map has no floor cells, regenerating");
                continue;
            }
        };

        let grid_path = planner.find_grid_path(&grid, start, goal);
        if grid_path.is_empty() {
            warn!(
                attempt,
                seed,
                start = ?(start.x, start.y),
                goal = ?(goal.x, goal.y),
                "goal unreachable, regenerating"
            );
            continue;
        }
        let path = planner.to_display_path(&grid_path);

        info!(
            attempt,
            seed,
            waypoints = path.len(),
            cost = planner.path_cost(&grid_path),
            "route found"
        );
        render_route(config, &grid, goal, &path, renderer);

        return Ok(Route {
            seed,
            attempts: attempt,
            grid,
            start,
            goal,
            grid_path,
            path,
        });
    }

    Err(GridError::AttemptsExhausted(config.max_attempts))
}

fn render_route(
    config: &FindLocationConfig,
    grid: &Grid,
    goal: GridPoint,
    path: &Path2D,
    renderer: &mut dyn GridRenderer,
) {
    grid.render(renderer);
    for waypoint in &path.points {
        renderer.draw_marker(*waypoint, colors::PATH, config.marker_radius);
    }
    let goal_center = config.planner.layout.to_display(goal);
    renderer.draw_marker(goal_center, colors::GOAL, config.marker_radius);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CellKind, Point2D};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct RecordingRenderer {
        cells: Vec<(i32, i32, CellKind)>,
        markers: Vec<(Point2D, String, f64)>,
    }

    impl GridRenderer for RecordingRenderer {
        fn draw_cell(&mut self, x: i32, y: i32, kind: CellKind) {
            self.cells.push((x, y, kind));
        }

        fn draw_marker(&mut self, center: Point2D, color: &str, radius: f64) {
            self.markers.push((center, color.to_string(), radius));
        }
    }

    #[test]
    fn test_find_location_renders_route() {
        let config = FindLocationConfig::default();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut renderer = RecordingRenderer::default();

        let route = find_location(&config, &mut rng, &mut renderer).unwrap();

        assert!(route.attempts >= 1 && route.attempts <= config.max_attempts);
        assert!(route.grid.is_passable(route.start));
        assert!(route.grid.is_passable(route.goal));
        assert_eq!(route.grid_path.first(), Some(&route.start));
        assert_eq!(route.grid_path.last(), Some(&route.goal));
        assert_eq!(route.path.len(), route.grid_path.len());

        assert_eq!(renderer.cells.len(), 37 * 18);
        assert_eq!(renderer.markers.len(), route.path.len() + 1);
        let (goal_marker, color, radius) = renderer.markers.last().unwrap();
        assert_eq!(*goal_marker, config.planner.layout.to_display(route.goal));
        assert_eq!(color, colors::GOAL);
        assert_eq!(*radius, 2.0);
        assert!(renderer.markers[..route.path.len()].iter().all(|m| m.1 == colors::PATH));
    }

    #[test]
    fn test_find_location_is_reproducible_for_rng_seed() {
        let config = FindLocationConfig::default();
        let a = find_location(&config, &mut StdRng::seed_from_u64(9), &mut RecordingRenderer::default()).unwrap();
        let b = find_location(&config, &mut StdRng::seed_from_u64(9), &mut RecordingRenderer::default()).unwrap();
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.grid_path, b.grid_path);
        assert_eq!(a.path, b.path);
    }

    #[test]
    fn test_find_location_gives_up_on_walled_maps() {
        // A 1x1 grid sits on the noise lattice, so its only cell is always a wall
        let config = FindLocationConfig {
            grid: NoiseGridConfig { width: 1, height: 1, smoothing: 5.0 },
            max_attempts: 4,
            ..Default::default()
        };
        let mut renderer = RecordingRenderer::default();
        let result = find_location(&config, &mut StdRng::seed_from_u64(1), &mut renderer);

        assert!(matches!(result, Err(GridError::AttemptsExhausted(4))));
        assert!(renderer.cells.is_empty());
        assert!(renderer.markers.is_empty());
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        let config = FindLocationConfig { max_attempts: 0, ..Default::default() };
        let result = find_location(&config, &mut StdRng::seed_from_u64(1), &mut RecordingRenderer::default());
        assert!(matches!(result, Err(GridError::InvalidParameter(_))));
    }
}
