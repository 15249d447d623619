//! The bottom-origin rectangular grid container.
//!
//! Grids are 0-indexed with row 0 at the *bottom*, matching the physics
//! convention that +y points up. String-literal grids are written
//! top-to-bottom and are vertically flipped on construction.

use crate::error::GridError;

/// A rectangular `w × h` grid stored row-major, bottom row first.
///
/// `get`/`get_mut` return `None` for out-of-bounds coordinates rather
/// than panicking; iteration yields cells in canonical order (row 0
/// left-to-right, then row 1, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    w: usize,
    h: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a grid by evaluating `f(x, y)` for every cell.
    pub fn create_with(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                cells.push(f(x, y));
            }
        }
        Self { w, h, cells }
    }

    /// Grid width (columns).
    pub fn width(&self) -> usize {
        self.w
    }

    /// Grid height (rows).
    pub fn height(&self) -> usize {
        self.h
    }

    /// Whether `other` has the same width and height.
    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.w == other.w && self.h == other.h
    }

    /// The cell at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.w && y < self.h {
            self.cells.get(y * self.w + x)
        } else {
            None
        }
    }

    /// Mutable access to the cell at `(x, y)`, or `None` if out of bounds.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x < self.w && y < self.h {
            self.cells.get_mut(y * self.w + x)
        } else {
            None
        }
    }

    /// Replace the cell at `(x, y)`. Out-of-bounds coordinates are a
    /// caller error and are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if let Some(cell) = self.get_mut(x, y) {
            *cell = value;
        }
    }

    /// Iterate cells with their coordinates in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let w = self.w;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (i % w, i / w, v))
    }

    /// Iterate cells mutably with their coordinates in canonical order.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let w = self.w;
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(i, v)| (i % w, i / w, v))
    }

    /// Iterate cell values in canonical order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Map every cell through `f`, preserving the shape.
    pub fn map<U>(&self, mut f: impl FnMut(usize, usize, &T) -> U) -> Grid<U> {
        Grid::create_with(self.w, self.h, |x, y| {
            f(x, y, &self.cells[y * self.w + x])
        })
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`.
    pub fn filled(w: usize, h: usize, value: T) -> Self {
        Self {
            w,
            h,
            cells: vec![value; w * h],
        }
    }
}

impl Grid<bool> {
    /// Parse an occupancy grid from comma-separated rows.
    ///
    /// Any non-space character marks a present cell. Rows shorter than
    /// the widest row are padded with absent cells. Row 0 of the string
    /// is the *top* grid row, so rows are flipped vertically to match
    /// the bottom-origin convention.
    ///
    /// # Errors
    ///
    /// [`GridError::MalformedRows`] if the input is empty or every row
    /// is blank.
    pub fn from_rows(s: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = s.split(',').collect();
        let w = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        if w == 0 {
            return Err(GridError::MalformedRows {
                reason: "grid string has no non-empty rows".into(),
            });
        }
        let h = rows.len();
        let mut grid = Grid::filled(w, h, false);
        for (string_y, row) in rows.iter().enumerate() {
            // String row 0 is the top row.
            let y = h - string_y - 1;
            for (x, ch) in row.chars().enumerate() {
                grid.set(x, y, ch != ' ');
            }
        }
        Ok(grid)
    }

    /// Number of present cells.
    pub fn present_count(&self) -> usize {
        self.values().filter(|&&v| v).count()
    }
}
