//! Noise-based occupancy grid
//!
//! Cells are classified by sampling 2D Perlin noise at scaled-down grid
//! coordinates: positive samples are passable floor, the rest are walls.
//! The same seed always yields the same classification.

use itertools::iproduct;
use nalgebra::DMatrix;
use noise::{NoiseFn, Perlin};
use rand::Rng;
use tracing::debug;

use crate::common::{CellKind, GridError, GridPoint, GridRenderer, GridResult};

/// Configuration for noise grid generation
#[derive(Debug, Clone)]
pub struct NoiseGridConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Grid indices are divided by this before sampling the noise
    pub smoothing: f64,
}

impl Default for NoiseGridConfig {
    fn default() -> Self {
        Self {
            width: 37,
            height: 18,
            smoothing: 5.0,
        }
    }
}

/// Fixed-size rectangular map of passable and blocked cells.
///
/// Stored row-major: matrix row is the grid `y`, column is the grid `x`.
/// Classification never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: DMatrix<CellKind>,
}

impl Grid {
    /// Generate a `width` x `height` grid from Perlin noise with the default smoothing
    pub fn generate(width: usize, height: usize, seed: u32) -> GridResult<Self> {
        let config = NoiseGridConfig {
            width,
            height,
            ..Default::default()
        };
        Self::from_noise(&config, seed)
    }

    /// Generate a grid from Perlin noise
    pub fn from_noise(config: &NoiseGridConfig, seed: u32) -> GridResult<Self> {
        check_dimensions(config.width, config.height)?;
        if !(config.smoothing > 0.0) {
            return Err(GridError::InvalidParameter(format!(
                "smoothing must be > 0, got {}",
                config.smoothing
            )));
        }

        let perlin = Perlin::new(seed);
        let cells = DMatrix::from_fn(config.height, config.width, |y, x| {
            let value = perlin.get([x as f64 / config.smoothing, y as f64 / config.smoothing]);
            if value > 0.0 {
                CellKind::Passable
            } else {
                CellKind::Blocked
            }
        });

        let grid = Grid { cells };
        debug!(
            seed,
            width = config.width,
            height = config.height,
            passable = grid.passable_count(),
            "generated noise grid"
        );
        Ok(grid)
    }

    /// Build a grid from row-major cells
    pub fn from_cells(width: usize, height: usize, cells: Vec<CellKind>) -> GridResult<Self> {
        check_dimensions(width, height)?;
        if cells.len() != width * height {
            return Err(GridError::InvalidParameter(format!(
                "expected {} cells for a {}x{} grid, got {}",
                width * height,
                width,
                height,
                cells.len()
            )));
        }
        Ok(Grid {
            cells: DMatrix::from_row_slice(height, width, &cells),
        })
    }

    /// Build a grid from text rows, `.` for passable and `#` for blocked
    pub fn from_ascii(rows: &[&str]) -> GridResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(GridError::InvalidParameter(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for c in row.chars() {
                let kind = match c {
                    '.' => CellKind::Passable,
                    '#' => CellKind::Blocked,
                    other => {
                        return Err(GridError::InvalidParameter(format!(
                            "unknown cell symbol '{}' in row {}",
                            other, y
                        )))
                    }
                };
                cells.push(kind);
            }
        }
        Self::from_cells(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, p: GridPoint) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width() && (p.y as usize) < self.height()
    }

    /// Classification of `p`, `None` outside the grid
    pub fn kind(&self, p: GridPoint) -> Option<CellKind> {
        if self.in_bounds(p) {
            Some(self.cells[(p.y as usize, p.x as usize)])
        } else {
            None
        }
    }

    /// Out-of-bounds positions count as not passable
    pub fn is_passable(&self, p: GridPoint) -> bool {
        self.kind(p) == Some(CellKind::Passable)
    }

    pub fn is_blocked(&self, p: GridPoint) -> bool {
        self.kind(p) == Some(CellKind::Blocked)
    }

    /// Row-major cell identity of an in-bounds position
    pub fn index(&self, p: GridPoint) -> usize {
        p.y as usize * self.width() + p.x as usize
    }

    /// Inverse of [`Grid::index`]
    pub fn point(&self, index: usize) -> GridPoint {
        GridPoint::new((index % self.width()) as i32, (index / self.width()) as i32)
    }

    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|k| k.is_passable()).count()
    }

    /// Iterate all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (GridPoint, CellKind)> + '_ {
        iproduct!(0..self.height(), 0..self.width()).map(move |(y, x)| {
            (GridPoint::new(x as i32, y as i32), self.cells[(y, x)])
        })
    }

    /// Draw a uniformly random passable cell by rejection sampling.
    ///
    /// Returns `None` when the grid has no passable cell at all.
    pub fn sample_passable<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<GridPoint> {
        if self.passable_count() == 0 {
            return None;
        }
        loop {
            let p = GridPoint::new(
                rng.gen_range(0..self.width()) as i32,
                rng.gen_range(0..self.height()) as i32,
            );
            if self.is_passable(p) {
                return Some(p);
            }
        }
    }

    /// Issue one `draw_cell` per grid cell
    pub fn render(&self, renderer: &mut dyn GridRenderer) {
        for (p, kind) in self.cells() {
            renderer.draw_cell(p.x, p.y, kind);
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> GridResult<()> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidParameter(format!(
            "grid dimensions must be non-zero, got {}x{}",
            width, height
        )));
    }
    if width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(GridError::InvalidParameter(format!(
            "grid dimensions {}x{} exceed the index range",
            width, height
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Point2D;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_is_reproducible() {
        let a = Grid::generate(37, 18, 42).unwrap();
        let b = Grid::generate(37, 18, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.width(), 37);
        assert_eq!(a.height(), 18);
    }

    #[test]
    fn test_lattice_points_are_blocked() {
        // Perlin noise is zero on integer lattice points and zero is not passable
        for seed in [0, 7, 1234] {
            let grid = Grid::generate(37, 18, seed).unwrap();
            for (x, y) in iproduct!((0..37).step_by(5), (0..18).step_by(5)) {
                assert!(grid.is_blocked(GridPoint::new(x, y)), "seed {} at ({}, {})", seed, x, y);
            }
        }
    }

    #[test]
    fn test_generate_rejects_empty_grid() {
        assert!(matches!(Grid::generate(0, 18, 1), Err(GridError::InvalidParameter(_))));
        let config = NoiseGridConfig { smoothing: 0.0, ..Default::default() };
        assert!(Grid::from_noise(&config, 1).is_err());
    }

    #[test]
    fn test_from_ascii() {
        let grid = Grid::from_ascii(&["..#", "#.."]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.kind(GridPoint::new(2, 0)), Some(CellKind::Blocked));
        assert_eq!(grid.kind(GridPoint::new(0, 1)), Some(CellKind::Blocked));
        assert_eq!(grid.kind(GridPoint::new(1, 1)), Some(CellKind::Passable));
        assert_eq!(grid.kind(GridPoint::new(3, 0)), None);
        assert_eq!(grid.passable_count(), 4);

        assert!(Grid::from_ascii(&["..", "."]).is_err());
        assert!(Grid::from_ascii(&[".x"]).is_err());
        assert!(Grid::from_ascii(&[]).is_err());
    }

    #[test]
    fn test_index_round_trip() {
        let grid = Grid::from_ascii(&["....", "....", "...."]).unwrap();
        let p = GridPoint::new(3, 2);
        assert_eq!(grid.index(p), 11);
        assert_eq!(grid.point(11), p);
        assert!(!grid.is_passable(GridPoint::new(-1, 0)));
    }

    #[test]
    fn test_sample_passable_only_returns_floor() {
        let grid = Grid::from_ascii(&["#.#", "###", "#.."]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let p = grid.sample_passable(&mut rng).unwrap();
            assert!(grid.is_passable(p));
        }
    }

    #[test]
    fn test_sample_passable_on_all_blocked_grid() {
        let grid = Grid::from_ascii(&["###", "###"]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(grid.sample_passable(&mut rng), None);
    }

    struct CellLog(Vec<(i32, i32, CellKind)>);

    impl GridRenderer for CellLog {
        fn draw_cell(&mut self, x: i32, y: i32, kind: CellKind) {
            self.0.push((x, y, kind));
        }

        fn draw_marker(&mut self, _center: Point2D, _color: &str, _radius: f64) {}
    }

    #[test]
    fn test_render_draws_every_cell_once() {
        let grid = Grid::from_ascii(&[".#", "..", "#."]).unwrap();
        let mut log = CellLog(Vec::new());
        grid.render(&mut log);
        assert_eq!(log.0.len(), 6);
        assert_eq!(log.0[1], (1, 0, CellKind::Blocked));
        assert_eq!(log.0[4], (0, 2, CellKind::Blocked));
    }
}
