//! Brick grid and responsive grid sizing

use serde::{Deserialize, Serialize};

use crate::bricks::BrickKind;
use crate::consts::*;

/// Viewport the level is generated for (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides finite and positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// This viewport, or the default one if it is unusable
    pub fn sanitized(self) -> Self {
        if self.is_valid() { self } else { Self::default() }
    }
}

/// Row-major matrix of brick kinds. Always rectangular.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: Vec<Vec<BrickKind>>,
}

impl Grid {
    /// All-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![BrickKind::Empty; cols]; rows],
        }
    }

    /// Build from rows that are already known to be rectangular
    pub(crate) fn from_rows(cells: Vec<Vec<BrickKind>>) -> Self {
        debug_assert!(cells.windows(2).all(|w| w[0].len() == w[1].len()));
        Self { cells }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> BrickKind {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, kind: BrickKind) {
        self.cells[row][col] = kind;
    }

    pub fn row(&self, row: usize) -> &[BrickKind] {
        &self.cells[row]
    }

    /// Iterate rows in order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[BrickKind]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Iterate `(row, col, kind)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, BrickKind)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, &kind)| (r, c, kind))
        })
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: BrickKind) -> usize {
        self.iter().filter(|&(_, _, k)| k == kind).count()
    }

    /// Number of non-empty cells
    pub fn filled(&self) -> usize {
        self.iter().filter(|&(_, _, k)| !k.is_empty()).count()
    }

    /// Coordinates of cells holding `kind`, row-major
    pub fn cells_of(&self, kind: BrickKind) -> Vec<(usize, usize)> {
        self.iter()
            .filter(|&(_, _, k)| k == kind)
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    /// Clear the first and last column of every row
    pub fn clear_side_columns(&mut self) {
        for row in &mut self.cells {
            if let Some(first) = row.first_mut() {
                *first = BrickKind::Empty;
            }
            if let Some(last) = row.last_mut() {
                *last = BrickKind::Empty;
            }
        }
    }

    /// Grid as raw brick codes
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|k| k.code()).collect())
            .collect()
    }
}

/// Grid dimensions and the cell size hint they were derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
    pub target_cell: u32,
}

impl GridSize {
    /// Size the grid to the viewport
    pub fn for_viewport(viewport: Viewport) -> Self {
        let Viewport { width, height } = viewport;
        let target_cell = if width.min(height) <= SMALL_VIEWPORT_MAX {
            CELL_SIZE_SMALL
        } else {
            CELL_SIZE_LARGE
        };
        let cell = f64::from(target_cell);

        let cols = ((width / cell).round() as usize).clamp(MIN_COLS, MAX_COLS);
        let region_height = (height * BRICK_REGION_RATIO).floor();
        let rows = ((region_height / cell).floor() as usize).clamp(MIN_ROWS, MAX_ROWS);

        Self {
            cols,
            rows,
            target_cell,
        }
    }

    /// Size the grid for a level; the first level is capped small
    pub fn for_level(viewport: Viewport, level: u32) -> Self {
        let mut size = Self::for_viewport(viewport);
        if level <= 1 {
            size.rows = size.rows.min(FIRST_LEVEL_MAX_ROWS);
            size.cols = size.cols.clamp(MIN_COLS, FIRST_LEVEL_MAX_COLS);
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_desktop() {
        let size = GridSize::for_viewport(Viewport::new(800.0, 600.0));
        assert_eq!(size.target_cell, 56);
        assert_eq!(size.cols, 14); // round(800 / 56)
        assert_eq!(size.rows, 4); // floor(228 / 56)
    }

    #[test]
    fn test_grid_size_small_screen() {
        let size = GridSize::for_viewport(Viewport::new(360.0, 640.0));
        assert_eq!(size.target_cell, 50);
        assert_eq!(size.cols, 7);
        assert_eq!(size.rows, 4);
    }

    #[test]
    fn test_grid_size_clamps() {
        let huge = GridSize::for_viewport(Viewport::new(5000.0, 5000.0));
        assert_eq!((huge.cols, huge.rows), (MAX_COLS, MAX_ROWS));

        let tiny = GridSize::for_viewport(Viewport::new(10.0, 10.0));
        assert_eq!((tiny.cols, tiny.rows), (MIN_COLS, MIN_ROWS));
    }

    #[test]
    fn test_first_level_override() {
        let size = GridSize::for_level(Viewport::new(1920.0, 1080.0), 1);
        assert_eq!(size.cols, FIRST_LEVEL_MAX_COLS);
        assert_eq!(size.rows, FIRST_LEVEL_MAX_ROWS);

        let later = GridSize::for_level(Viewport::new(1920.0, 1080.0), 2);
        assert_eq!(later.cols, MAX_COLS);
    }

    #[test]
    fn test_viewport_sanitized() {
        assert_eq!(Viewport::new(0.0, 600.0).sanitized(), Viewport::default());
        assert_eq!(Viewport::new(f64::NAN, 600.0).sanitized(), Viewport::default());
        let v = Viewport::new(1024.0, 768.0);
        assert_eq!(v.sanitized(), v);
    }

    #[test]
    fn test_clear_side_columns() {
        let mut grid = Grid::from_rows(vec![vec![BrickKind::Normal; 6]; 2]);
        grid.clear_side_columns();
        for row in grid.iter_rows() {
            assert_eq!(row[0], BrickKind::Empty);
            assert_eq!(row[5], BrickKind::Empty);
            assert_eq!(row[1], BrickKind::Normal);
        }
        assert_eq!(grid.filled(), 8);
    }
}
