// Mapping between grid indices and display coordinates

use crate::common::{GridPoint, Point2D};

/// Screen geometry of the grid: square cells separated by a gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayLayout {
    /// Side of one cell
    pub node_size: f64,
    /// Space between neighbouring cells
    pub gap: f64,
}

impl Default for DisplayLayout {
    fn default() -> Self {
        Self {
            node_size: 7.0,
            gap: 1.0,
        }
    }
}

impl DisplayLayout {
    pub fn new(node_size: f64, gap: f64) -> Self {
        Self { node_size, gap }
    }

    /// Distance between the origins of two adjacent cells
    pub fn pitch(&self) -> f64 {
        self.node_size + self.gap
    }

    /// Centre of the screen cell for a grid index
    pub fn to_display(&self, p: GridPoint) -> Point2D {
        let half = self.node_size / 2.0;
        Point2D::new(
            p.x as f64 * self.pitch() + half,
            p.y as f64 * self.pitch() + half,
        )
    }

    /// Size of the whole canvas for a `width` x `height` grid
    pub fn canvas_size(&self, width: usize, height: usize) -> (f64, f64) {
        (width as f64 * self.pitch(), height as f64 * self.pitch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_display_default_layout() {
        let layout = DisplayLayout::default();
        assert_eq!(layout.to_display(GridPoint::new(0, 0)), Point2D::new(3.5, 3.5));
        assert_eq!(layout.to_display(GridPoint::new(2, 1)), Point2D::new(19.5, 11.5));
        assert_eq!(layout.to_display(GridPoint::new(36, 17)), Point2D::new(291.5, 139.5));
    }

    #[test]
    fn test_custom_layout_and_canvas() {
        let layout = DisplayLayout::new(4.0, 2.0);
        assert_eq!(layout.to_display(GridPoint::new(3, 2)), Point2D::new(20.0, 14.0));
        assert_eq!(layout.canvas_size(37, 18), (222.0, 108.0));
    }
}
