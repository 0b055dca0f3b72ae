use crate::{GridWidthError, PlacementError};

use super::piece::{PieceKind, PieceShape};

/// A single row of the grid.
///
/// Cells hold small non-negative integers: `0` is empty, anything else is
/// occupied. Every row of a grid has exactly the grid's width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    cells: Box<[u8]>,
}

impl GridRow {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![0; width].into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Returns `true` when every cell of the row is occupied.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|&cell| cell != 0)
    }

    fn overlaps(&self, column: usize, piece_row: &[u8]) -> bool {
        self.cells[column..]
            .iter()
            .zip(piece_row)
            .any(|(&cell, &piece_cell)| cell != 0 && piece_cell != 0)
    }

    fn fill(&mut self, column: usize, piece_row: &[u8]) {
        for (cell, &piece_cell) in self.cells[column..].iter_mut().zip(piece_row) {
            *cell += piece_cell;
        }
    }
}

/// Growable board that pieces are dropped onto.
///
/// Rows are stored bottom first. The grid starts with no rows and grows
/// upward as pieces land; full rows are removed and the rows above them
/// shift down.
///
/// # Example
///
/// ```
/// use stackris_engine::{Grid, PieceKind};
///
/// let mut grid = Grid::new();
/// grid.add(PieceKind::I, 0)?;
/// grid.add(PieceKind::I, 0)?;
/// assert_eq!(grid.height(), 2);
/// # Ok::<(), stackris_engine::PlacementError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    rows: Vec<GridRow>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Width used by [`Grid::new`].
    pub const DEFAULT_WIDTH: usize = 10;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            rows: Vec::new(),
        }
    }

    pub fn with_width(width: usize) -> Result<Self, GridWidthError> {
        if width == 0 {
            return Err(GridWidthError);
        }
        Ok(Self {
            width,
            rows: Vec::new(),
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows currently in the grid.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of the grid, bottom row first.
    #[must_use]
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Returns the cell at `column` on `row` (counted from the bottom), or
    /// `None` outside the grid.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<u8> {
        self.rows.get(row)?.cells.get(column).copied()
    }

    /// Returns the row the piece's bottom row would land on if dropped at
    /// `column`, without modifying the grid.
    pub fn landing_row(&self, kind: PieceKind, column: usize) -> Result<usize, PlacementError> {
        self.check_bounds(kind, column)?;
        Ok(self.find_landing_row(kind.shape(), column))
    }

    /// Drops a piece at `column` and clears any rows it completes.
    ///
    /// Returns the number of rows cleared. Out-of-bounds placements fail
    /// without touching the grid.
    pub fn add(&mut self, kind: PieceKind, column: usize) -> Result<usize, PlacementError> {
        self.check_bounds(kind, column)?;
        let shape = kind.shape();
        let row = self.find_landing_row(shape, column);
        tracing::trace!(piece = %kind, column, row, "piece landed");
        self.fill_piece(kind, row, column)?;
        let cleared = self.clear_lines();
        if cleared > 0 {
            tracing::debug!(cleared, height = self.height(), "cleared full rows");
        }
        Ok(cleared)
    }

    fn check_bounds(&self, kind: PieceKind, column: usize) -> Result<(), PlacementError> {
        let fits = column
            .checked_add(kind.width())
            .is_some_and(|end| end <= self.width);
        if !fits {
            return Err(PlacementError::OutOfBounds {
                kind,
                column,
                width: self.width,
            });
        }
        Ok(())
    }

    fn is_colliding(&self, shape: PieceShape, row: usize, column: usize) -> bool {
        shape.rows().iter().enumerate().any(|(dy, piece_row)| {
            self.rows
                .get(row + dy)
                .is_some_and(|grid_row| grid_row.overlaps(column, piece_row))
        })
    }

    // Scans upward from the floor. Rows at or above the top are empty, so
    // the scan always stops at the current height at the latest.
    fn find_landing_row(&self, shape: PieceShape, column: usize) -> usize {
        (0..self.rows.len())
            .find(|&row| !self.is_colliding(shape, row, column))
            .unwrap_or(self.rows.len())
    }

    fn fill_piece(
        &mut self,
        kind: PieceKind,
        row: usize,
        column: usize,
    ) -> Result<(), PlacementError> {
        let shape = kind.shape();
        if self.is_colliding(shape, row, column) {
            return Err(PlacementError::Overlap { kind, column, row });
        }

        let top = row + shape.height();
        if self.rows.len() < top {
            let width = self.width;
            self.rows.resize_with(top, || GridRow::empty(width));
        }
        for (grid_row, piece_row) in self.rows[row..top].iter_mut().zip(shape.rows()) {
            grid_row.fill(column, piece_row);
        }
        Ok(())
    }

    /// Removes filled rows and returns how many were removed.
    fn clear_lines(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.is_filled());
        before - self.rows.len()
    }
}
