#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Trail workspace.
//!
//! This crate defines the vocabulary that connects the authoritative grid, the
//! pure generation and navigation systems, and the adapters. Cells are
//! addressed by [`CellCoord`], movement is expressed with [`Direction`], cell
//! boundaries are described by [`CellWalls`], and every movement request is
//! answered with a [`MoveOutcome`] value rather than a side effect.

use serde::{Deserialize, Serialize};

/// Canonical title shown by adapters when the experience boots.
pub const WINDOW_TITLE: &str = "Maze Trail";

/// Banner presented once the player reaches the exit.
pub const VICTORY_BANNER: &str = "You Win!";

/// Cardinal movement directions available to the player.
///
/// The declaration order is the canonical neighbor order used throughout the
/// workspace: top, right, bottom, left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in canonical neighbor order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Direction pointing back toward the origin of a step.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Coordinate one step away in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are the grid's concern and are not checked here.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self
                .row
                .checked_sub(1)
                .map(|row| CellCoord::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| CellCoord::new(column, self.row)),
            Direction::South => self
                .row
                .checked_add(1)
                .map(|row| CellCoord::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| CellCoord::new(column, self.row)),
        }
    }

    /// Direction of travel from `self` to an orthogonally adjacent `other`.
    ///
    /// Returns `None` when the cells are identical, diagonal, or further apart.
    #[must_use]
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        let column_diff = self.column.abs_diff(other.column);
        let row_diff = self.row.abs_diff(other.row);

        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if other.column > self.column {
                Some(Direction::East)
            } else {
                Some(Direction::West)
            }
        } else if other.row > self.row {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

/// Presence of the four walls that bound a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellWalls {
    /// Wall shared with the cell in the previous row.
    pub top: bool,
    /// Wall shared with the cell in the next column.
    pub right: bool,
    /// Wall shared with the cell in the next row.
    pub bottom: bool,
    /// Wall shared with the cell in the previous column.
    pub left: bool,
}

impl CellWalls {
    /// Walls of a cell that has not been carved yet.
    pub const CLOSED: CellWalls = CellWalls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    /// Reports whether the wall on the given side is present.
    #[must_use]
    pub const fn has(&self, side: Direction) -> bool {
        match side {
            Direction::North => self.top,
            Direction::East => self.right,
            Direction::South => self.bottom,
            Direction::West => self.left,
        }
    }

    /// Copy of these walls with the given side removed.
    #[must_use]
    pub const fn without(self, side: Direction) -> Self {
        let mut walls = self;
        match side {
            Direction::North => walls.top = false,
            Direction::East => walls.right = false,
            Direction::South => walls.bottom = false,
            Direction::West => walls.left = false,
        }
        walls
    }

    /// Number of walls still standing.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.top as u32 + self.right as u32 + self.bottom as u32 + self.left as u32
    }
}

impl Default for CellWalls {
    fn default() -> Self {
        Self::CLOSED
    }
}

/// Reasons a move request may be rejected by the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// A wall separates the player from the requested cell.
    Blocked,
}

/// Result reported for every move request.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The player advanced to an ordinary cell.
    Moved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after moving.
        to: CellCoord,
    },
    /// The player advanced onto the exit cell.
    ReachedExit {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Exit cell the player now occupies.
        to: CellCoord,
    },
    /// The move was refused and the player did not move.
    Rejected {
        /// Direction that was requested.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
}

impl MoveOutcome {
    /// Reports whether the player position changed.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }

    /// Cell occupied after the move, if it was applied.
    #[must_use]
    pub const fn destination(&self) -> Option<CellCoord> {
        match self {
            Self::Moved { to, .. } | Self::ReachedExit { to, .. } => Some(*to),
            Self::Rejected { .. } => None,
        }
    }
}
