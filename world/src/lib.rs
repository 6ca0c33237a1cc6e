#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid state for Maze Trail.
//!
//! The [`Grid`] owns every [`Cell`] of a maze. Cells start fully walled and
//! unvisited; the only way to open a passage is
//! [`Grid::remove_walls_between`], which clears both sides of a shared wall so
//! the symmetry invariant can never be broken by callers.

pub mod connectivity;

use maze_trail_core::{CellCoord, CellWalls, Direction};
use thiserror::Error;
use tracing::trace;

/// Errors that can occur while constructing a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Either dimension was zero or the cell count exceeds [`Grid::MAX_CELLS`].
    #[error(
        "grid dimensions must be positive and hold at most {} cells (received {columns}x{rows})",
        Grid::MAX_CELLS
    )]
    InvalidDimensions {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
}

/// Single maze cell with its wall state and generation bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: CellCoord,
    walls: CellWalls,
    visited: bool,
}

impl Cell {
    const fn closed(coord: CellCoord) -> Self {
        Self {
            coord,
            walls: CellWalls::CLOSED,
            visited: false,
        }
    }

    /// Coordinate of the cell, always equal to its position in the grid.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.coord.row()
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.coord.column()
    }

    /// Walls currently bounding the cell.
    #[must_use]
    pub const fn walls(&self) -> CellWalls {
        self.walls
    }

    /// Whether the generator has reached this cell.
    #[must_use]
    pub const fn visited(&self) -> bool {
        self.visited
    }
}

/// Up to four neighboring coordinates, kept in top, right, bottom, left order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbors {
    cells: [CellCoord; 4],
    len: usize,
}

impl Neighbors {
    const fn empty() -> Self {
        Self {
            cells: [CellCoord::new(0, 0); 4],
            len: 0,
        }
    }

    fn push(&mut self, cell: CellCoord) {
        self.cells[self.len] = cell;
        self.len += 1;
    }

    fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(CellCoord) -> bool,
    {
        let mut kept = Self::empty();
        for &cell in self.as_slice() {
            if keep(cell) {
                kept.push(cell);
            }
        }
        *self = kept;
    }

    /// Neighboring coordinates as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CellCoord] {
        &self.cells[..self.len]
    }

    /// Number of neighbors collected.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Reports whether no neighbor was collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Neighbor at the provided index, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CellCoord> {
        self.as_slice().get(index).copied()
    }

    /// Iterator over the neighboring coordinates in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.as_slice().iter().copied()
    }
}

/// Dense, row-major collection of maze cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Largest number of cells a grid may hold.
    pub const MAX_CELLS: usize = 1 << 24;

    /// Creates a grid whose cells all have four walls and are unvisited.
    ///
    /// Fails with [`GridError::InvalidDimensions`] when either dimension is
    /// zero or `columns * rows` exceeds [`Grid::MAX_CELLS`].
    pub fn new(columns: u32, rows: u32) -> Result<Self, GridError> {
        let invalid = GridError::InvalidDimensions { columns, rows };
        if columns == 0 || rows == 0 {
            return Err(invalid);
        }

        let width = usize::try_from(columns).map_err(|_| invalid)?;
        let height = usize::try_from(rows).map_err(|_| invalid)?;
        let capacity = width
            .checked_mul(height)
            .filter(|&count| count <= Self::MAX_CELLS)
            .ok_or(invalid)?;

        let mut cells = Vec::with_capacity(capacity);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(Cell::closed(CellCoord::new(column, row)));
            }
        }

        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; construction rejects empty grids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bottom-right corner of the grid.
    #[must_use]
    pub const fn last_cell(&self) -> CellCoord {
        CellCoord::new(self.columns - 1, self.rows - 1)
    }

    /// Reports whether the coordinate lies within the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Cells stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell located at the provided coordinate, if it lies within the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<&Cell> {
        self.index(cell).and_then(|index| self.cells.get(index))
    }

    /// In-bounds neighbors of `cell` in top, right, bottom, left order.
    #[must_use]
    pub fn neighbors_of(&self, cell: CellCoord) -> Neighbors {
        let mut neighbors = Neighbors::empty();
        if !self.contains(cell) {
            return neighbors;
        }

        for direction in Direction::ALL {
            if let Some(neighbor) = cell.step(direction) {
                if self.contains(neighbor) {
                    neighbors.push(neighbor);
                }
            }
        }

        neighbors
    }

    /// Neighbors of `cell` that the generator has not reached yet.
    #[must_use]
    pub fn unvisited_neighbors_of(&self, cell: CellCoord) -> Neighbors {
        let mut neighbors = self.neighbors_of(cell);
        neighbors.retain(|neighbor| self.cell(neighbor).is_some_and(|cell| !cell.visited));
        neighbors
    }

    /// Neighbors of `cell` reachable without crossing a wall.
    #[must_use]
    pub fn open_neighbors_of(&self, cell: CellCoord) -> Neighbors {
        let mut neighbors = self.neighbors_of(cell);
        neighbors.retain(|neighbor| self.is_open_between(cell, neighbor));
        neighbors
    }

    /// Reports whether `a` and `b` are adjacent with no wall between them.
    #[must_use]
    pub fn is_open_between(&self, a: CellCoord, b: CellCoord) -> bool {
        let Some(direction) = a.direction_to(b) else {
            return false;
        };
        let (Some(from), Some(to)) = (self.cell(a), self.cell(b)) else {
            return false;
        };

        !from.walls.has(direction) && !to.walls.has(direction.opposite())
    }

    /// Marks the cell as reached by the generator.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate lies outside the grid.
    pub fn mark_visited(&mut self, cell: CellCoord) {
        let index = self.expect_index(cell);
        self.cells[index].visited = true;
    }

    /// Carves a passage between two adjacent cells.
    ///
    /// Both sides of the shared wall are cleared together.
    ///
    /// # Panics
    ///
    /// Panics when either coordinate lies outside the grid or when the cells
    /// are not orthogonally adjacent. Callers only ever pass neighbors
    /// obtained from [`Grid::neighbors_of`], so reaching the panic indicates
    /// a bug rather than a recoverable condition.
    pub fn remove_walls_between(&mut self, a: CellCoord, b: CellCoord) {
        let Some(direction) = a.direction_to(b) else {
            panic!("cannot remove walls between non-adjacent cells {a:?} and {b:?}");
        };
        let from = self.expect_index(a);
        let to = self.expect_index(b);

        self.cells[from].walls = self.cells[from].walls.without(direction);
        self.cells[to].walls = self.cells[to].walls.without(direction.opposite());
        trace!(?a, ?b, ?direction, "carved passage");
    }

    /// Number of carved passages, counting each removed wall pair once.
    #[must_use]
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                let east = cell
                    .coord
                    .step(Direction::East)
                    .is_some_and(|east| self.is_open_between(cell.coord, east));
                let south = cell
                    .coord
                    .step(Direction::South)
                    .is_some_and(|south| self.is_open_between(cell.coord, south));
                usize::from(east) + usize::from(south)
            })
            .sum()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn expect_index(&self, cell: CellCoord) -> usize {
        match self.index(cell) {
            Some(index) => index,
            None => panic!(
                "cell {cell:?} lies outside the {}x{} grid",
                self.columns, self.rows
            ),
        }
    }
}
