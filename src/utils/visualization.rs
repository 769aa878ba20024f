//! Visualization utilities for grid_astar
//!
//! Provides a gnuplot-backed rendering collaborator for the map and the route.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, PointSize, PointSymbol};

use crate::common::{CellKind, GridError, GridPoint, GridRenderer, GridResult, Point2D};
use crate::utils::DisplayLayout;

/// Color palette for consistent styling
pub mod colors {
    pub const FLOOR: &str = "#535353";
    pub const WALL: &str = "#171717";
    pub const WHITE: &str = "#FFFFFF";
    pub const YELLOW: &str = "#FFFF00";

    // Semantic colors
    pub const PATH: &str = WHITE;
    pub const GOAL: &str = YELLOW;
}

/// gnuplot point size of one display unit
const POINT_SCALE: f64 = 0.25;

/// Markers sharing a color and radius, kept in draw order
#[derive(Debug, Clone)]
struct MarkerLayer {
    color: String,
    radius: f64,
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Rendering collaborator that collects cells and markers and plots them with gnuplot
pub struct GridVisualizer {
    layout: DisplayLayout,
    title: String,
    columns: i32,
    rows: i32,
    floor: (Vec<f64>, Vec<f64>),
    walls: (Vec<f64>, Vec<f64>),
    markers: Vec<MarkerLayer>,
}

impl GridVisualizer {
    /// Create a new visualizer
    pub fn new(layout: DisplayLayout) -> Self {
        Self {
            layout,
            title: String::new(),
            columns: 0,
            rows: 0,
            floor: (Vec::new(), Vec::new()),
            walls: (Vec::new(), Vec::new()),
            markers: Vec::new(),
        }
    }

    /// Set the plot title
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Number of cells drawn so far
    pub fn cell_count(&self) -> usize {
        self.floor.0.len() + self.walls.0.len()
    }

    /// Number of markers drawn so far
    pub fn marker_count(&self) -> usize {
        self.markers.iter().map(|m| m.x.len()).sum()
    }

    /// Finalize and show the plot
    pub fn show(&self) -> GridResult<()> {
        let mut figure = self.build_figure();
        figure
            .show()
            .map(|_| ())
            .map_err(|e| GridError::VisualizationError(e.to_string()))
    }

    /// Save plot to PNG file
    pub fn save_png(&self, path: &str, width: u32, height: u32) -> GridResult<()> {
        let mut figure = self.build_figure();
        figure
            .save_to_png(path, width, height)
            .map_err(|e| GridError::VisualizationError(e.to_string()))
    }

    fn build_figure(&self) -> Figure {
        let mut figure = Figure::new();
        let cell_size = self.layout.node_size * POINT_SCALE;
        let (canvas_w, canvas_h) = self.layout.canvas_size(self.columns as usize, self.rows as usize);

        {
            let axes = figure.axes2d();
            axes.points(&self.floor.0, &self.floor.1, &[
                Caption("Floor"),
                Color(colors::FLOOR),
                PointSymbol('S'),
                PointSize(cell_size),
            ]);
            axes.points(&self.walls.0, &self.walls.1, &[
                Caption("Wall"),
                Color(colors::WALL),
                PointSymbol('S'),
                PointSize(cell_size),
            ]);
            for layer in &self.markers {
                axes.points(&layer.x, &layer.y, &[
                    Color(layer.color.as_str()),
                    PointSymbol('O'),
                    PointSize(layer.radius * POINT_SCALE * 2.0),
                ]);
            }

            if !self.title.is_empty() {
                axes.set_title(&self.title, &[]);
            }
            // Display y grows downwards
            axes.set_x_range(AutoOption::Fix(0.0), AutoOption::Fix(canvas_w));
            axes.set_y_range(AutoOption::Fix(canvas_h), AutoOption::Fix(0.0));
            axes.set_aspect_ratio(AutoOption::Fix(canvas_h / canvas_w.max(1.0)));
        }
        figure
    }
}

impl GridRenderer for GridVisualizer {
    fn draw_cell(&mut self, x: i32, y: i32, kind: CellKind) {
        self.columns = self.columns.max(x + 1);
        self.rows = self.rows.max(y + 1);

        let center = self.layout.to_display(GridPoint::new(x, y));
        let target = match kind {
            CellKind::Passable => &mut self.floor,
            CellKind::Blocked => &mut self.walls,
        };
        target.0.push(center.x);
        target.1.push(center.y);
    }

    fn draw_marker(&mut self, center: Point2D, color: &str, radius: f64) {
        match self.markers.last_mut() {
            Some(layer) if layer.color == color && layer.radius == radius => {
                layer.x.push(center.x);
                layer.y.push(center.y);
            }
            _ => self.markers.push(MarkerLayer {
                color: color.to_string(),
                radius,
                x: vec![center.x],
                y: vec![center.y],
            }),
        }
    }
}

impl Default for GridVisualizer {
    fn default() -> Self {
        Self::new(DisplayLayout::default())
    }
}
