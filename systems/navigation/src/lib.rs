#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player navigation through a carved maze.

use maze_trail_core::{CellCoord, Direction, MoveOutcome, MoveRejection};
use maze_trail_world::Grid;
use tracing::trace;

/// Tracks the player and exit positions and validates moves against walls.
///
/// The navigator never owns the grid; every query borrows the finished maze
/// it was created for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigator {
    player: CellCoord,
    exit: CellCoord,
    won: bool,
}

impl Navigator {
    /// Places the player at the top-left cell and the exit at the bottom-right.
    #[must_use]
    pub fn new(grid: &Grid) -> Self {
        let player = CellCoord::new(0, 0);
        let exit = grid.last_cell();
        Self {
            player,
            exit,
            won: player == exit,
        }
    }

    /// Returns the navigator to its starting state for `grid`.
    pub fn reset(&mut self, grid: &Grid) {
        *self = Self::new(grid);
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub const fn player(&self) -> CellCoord {
        self.player
    }

    /// Cell the player needs to reach.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        self.exit
    }

    /// Whether the player has reached the exit at any point in this maze.
    #[must_use]
    pub const fn has_won(&self) -> bool {
        self.won
    }

    /// Reports whether the player may step onto `target`.
    ///
    /// The target must be in bounds, orthogonally adjacent to the player and
    /// have no wall on the side facing the player.
    #[must_use]
    pub fn can_move_to(&self, grid: &Grid, target: CellCoord) -> bool {
        let Some(direction) = self.player.direction_to(target) else {
            return false;
        };
        let Some(cell) = grid.cell(target) else {
            return false;
        };

        !cell.walls().has(direction.opposite())
    }

    /// Attempts to move the player one cell in `direction`.
    pub fn attempt_move(&mut self, grid: &Grid, direction: Direction) -> MoveOutcome {
        let from = self.player;
        let Some(target) = from.step(direction).filter(|cell| grid.contains(*cell)) else {
            trace!(?from, ?direction, "move rejected at grid edge");
            return MoveOutcome::Rejected {
                direction,
                reason: MoveRejection::OutOfBounds,
            };
        };

        if !self.can_move_to(grid, target) {
            trace!(?from, ?direction, "move rejected by wall");
            return MoveOutcome::Rejected {
                direction,
                reason: MoveRejection::Blocked,
            };
        }

        self.player = target;
        trace!(?from, to = ?target, "player moved");

        if target == self.exit {
            self.won = true;
            MoveOutcome::ReachedExit { from, to: target }
        } else {
            MoveOutcome::Moved { from, to: target }
        }
    }
}
