//! Grid coordinates and the agent's per-cell knowledge matrix
//!
//! Cells are 1-indexed (row, column) pairs; row 1 is the bottom row when the
//! knowledge matrix is printed.

use crate::{Result, SeekerError};
use std::fmt;
use std::str::FromStr;

/// A grid coordinate, 1-indexed, row and column in `[1, N]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row coordinate (vertical axis; larger rows are "above")
    pub row: u32,
    /// Column coordinate
    pub col: u32,
}

impl Cell {
    /// Creates a cell from 1-indexed coordinates
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Returns true if both coordinates lie in `[1, dim]`
    pub fn within(&self, dim: u32) -> bool {
        self.row >= 1 && self.row <= dim && self.col >= 1 && self.col <= dim
    }

    /// Euclidean distance to `other`, floored to an integer
    ///
    /// This is the single distance metric used for detector band geometry.
    /// Band boundaries compare against this value, never against per-axis
    /// offsets.
    pub fn floor_distance(&self, other: Cell) -> u32 {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr * dr + dc * dc).isqrt()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl FromStr for Cell {
    type Err = SeekerError;

    /// Parses the `"row,col"` form used by step scripts and the CLI
    fn from_str(s: &str) -> Result<Self> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| SeekerError::Script(format!("expected row,col, got {s:?}")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| SeekerError::Script(format!("bad coordinate in {s:?}")))
        };
        Ok(Cell::new(parse(row)?, parse(col)?))
    }
}

/// Public belief status of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStatus {
    /// The target may still be at this cell
    #[default]
    Unknown,
    /// The target has been proven not to be at this cell
    Excluded,
}

/// The N×N matrix of per-cell belief exposed to callers
///
/// Monotone: once a cell is `Excluded` it never reverts to `Unknown`.
/// Snapshots handed out by the engine are owned clones; mutating access is
/// reserved to this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeGrid {
    dim: u32,
    cells: Vec<CellStatus>,
}

impl KnowledgeGrid {
    /// Creates a grid of the given dimension with every cell `Unknown`
    pub fn new(dim: u32) -> Self {
        Self {
            dim,
            cells: vec![CellStatus::Unknown; (dim * dim) as usize],
        }
    }

    /// Grid dimension N
    pub fn dim(&self) -> u32 {
        self.dim
    }

    /// Status of one cell
    pub fn status(&self, cell: Cell) -> CellStatus {
        self.cells[self.index(cell)]
    }

    /// Returns true if the cell has been excluded
    pub fn is_excluded(&self, cell: Cell) -> bool {
        self.status(cell) == CellStatus::Excluded
    }

    /// Number of excluded cells
    pub fn excluded_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|s| **s == CellStatus::Excluded)
            .count()
    }

    /// All currently excluded cells, in row-major order
    pub fn excluded_cells(&self) -> Vec<Cell> {
        let mut out = Vec::new();
        for row in 1..=self.dim {
            for col in 1..=self.dim {
                let cell = Cell::new(row, col);
                if self.is_excluded(cell) {
                    out.push(cell);
                }
            }
        }
        out
    }

    pub(crate) fn exclude(&mut self, cell: Cell) {
        let idx = self.index(cell);
        self.cells[idx] = CellStatus::Excluded;
    }

    fn index(&self, cell: Cell) -> usize {
        debug_assert!(cell.within(self.dim), "cell {cell} outside {0}x{0} grid", self.dim);
        ((cell.row - 1) * self.dim + (cell.col - 1)) as usize
    }
}

impl fmt::Display for KnowledgeGrid {
    /// Prints the matrix top row first: `?` for unknown, `X` for excluded
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.dim).rev() {
            for col in 1..=self.dim {
                if col > 1 {
                    write!(f, " ")?;
                }
                match self.status(Cell::new(row, col)) {
                    CellStatus::Unknown => write!(f, "?")?,
                    CellStatus::Excluded => write!(f, "X")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
