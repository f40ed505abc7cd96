//! Board module - the occupancy grid
//!
//! The board is a `height x width` grid, row 0 at the top, stored as a flat
//! row-major vector. Dimensions are fixed at construction.
//!
//! Locking never edits a board in place: [`lock_piece`] stamps a piece into a
//! fresh copy, clears full rows and compacts what is left.

use serde::Serialize;

use crate::pieces::{Position, Shape};
use crate::types::PieceKind;

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Cell {
    pub occupied: bool,
    /// Kind that filled the cell; `None` for empty or anonymous debug fill
    pub kind: Option<PieceKind>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        occupied: false,
        kind: None,
    };

    /// Occupied cell with no piece kind
    pub const BLOCK: Cell = Cell {
        occupied: true,
        kind: None,
    };

    pub fn filled(kind: PieceKind) -> Self {
        Self {
            occupied: true,
            kind: Some(kind),
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

/// Result of stamping a piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOutcome {
    pub board: Board,
    /// Rows that were full after stamping, top to bottom, in pre-clear indices
    pub cleared_rows: Vec<usize>,
}

impl Board {
    /// Create a new empty board
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::EMPTY; height * width],
        }
    }

    /// Fully occupied board, for debugging and tests
    pub fn filled(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::BLOCK; height * width],
        }
    }

    /// Build a board from text rows: `.` is empty, a piece letter is that
    /// kind, anything else is an anonymous block.
    ///
    /// ```
    /// use stackfall_core::Board;
    ///
    /// let board = Board::from_ascii(&["....", "TT.#"]);
    /// assert_eq!(board.height(), 2);
    /// assert!(board.is_occupied(1, 3));
    /// assert!(!board.is_occupied(1, 2));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut board = Self::new(rows.len(), width);
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::EMPTY,
                    other => PieceKind::from_str(&other.to_string())
                        .map(Cell::filled)
                        .unwrap_or(Cell::BLOCK),
                };
                board.cells[r * width + c] = cell;
            }
        }
        board
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Builder form of [`Board::set`]; out-of-bounds writes are ignored
    pub fn with_cell(mut self, row: i32, col: i32, cell: Cell) -> Self {
        self.set(row, col, cell);
        self
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).map(|cell| cell.occupied).unwrap_or(false)
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_some()
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> &[Cell] {
        if row >= self.height {
            return &[];
        }
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        (0..self.height).map(move |row| self.row(row))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.height && self.row(row).iter().all(|cell| cell.occupied)
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        self.row(row).iter().all(|cell| !cell.occupied)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.occupied).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn blank_row(&mut self, row: usize) {
        let start = row * self.width;
        for cell in &mut self.cells[start..start + self.width] {
            *cell = Cell::EMPTY;
        }
    }
}

/// Stamp a piece into a copy of `board`, then clear full rows.
///
/// Cells outside the grid are dropped. The input board is left untouched.
pub fn lock_piece(board: &Board, shape: &Shape, position: Position, kind: PieceKind) -> LockOutcome {
    let mut stamped = board.clone();
    for (row, col) in shape.cells_at(position) {
        stamped.set(row, col, Cell::filled(kind));
    }

    let cleared_rows: Vec<usize> = (0..stamped.height)
        .filter(|&row| stamped.is_row_full(row))
        .collect();

    if cleared_rows.is_empty() {
        return LockOutcome {
            board: stamped,
            cleared_rows,
        };
    }

    LockOutcome {
        board: compact(stamped, &cleared_rows),
        cleared_rows,
    }
}

/// Drop cleared and empty rows, keep the rest in order, pad at the top.
fn compact(stamped: Board, cleared_rows: &[usize]) -> Board {
    let (height, width) = (stamped.height, stamped.width);

    let retained: Vec<usize> = (0..height)
        .filter(|row| !cleared_rows.contains(row))
        .filter(|&row| !stamped.is_row_empty(row))
        .collect();

    if retained.is_empty() {
        return Board::new(height, width);
    }

    // Only a malformed cleared list (duplicates, stray indices) trips this;
    // rows are then blanked where they stand.
    if retained.len() > height.saturating_sub(cleared_rows.len()) {
        let mut fallback = stamped;
        for &row in cleared_rows {
            fallback.blank_row(row);
        }
        return fallback;
    }

    let mut compacted = Board::new(height, width);
    let top = height - retained.len();
    for (offset, &row) in retained.iter().enumerate() {
        let start = (top + offset) * width;
        compacted.cells[start..start + width].copy_from_slice(stamped.row(row));
    }
    compacted
}
