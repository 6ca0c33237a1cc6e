#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized depth-first maze carving.
//!
//! The generator walks the grid with an explicit stack. The cell on top of
//! the stack is inspected without popping it; when it still has unvisited
//! neighbors one of them is chosen, the shared wall is removed and the
//! neighbor is pushed. Cells without unvisited neighbors are popped, which is
//! the backtracking step. Every cell is pushed exactly once, so the carved
//! passages form a spanning tree over the grid.

use maze_trail_core::CellCoord;
use maze_trail_world::{Grid, GridError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Strategy used to choose the next cell among the unvisited candidates.
pub trait NeighborPicker {
    /// Returns an index in `0..candidates`.
    ///
    /// Callers never pass zero candidates.
    fn pick(&mut self, candidates: usize) -> usize;
}

/// Picks uniformly at random over the candidates available at each step.
#[derive(Clone, Debug)]
pub struct UniformPicker<R> {
    rng: R,
}

impl<R: Rng> UniformPicker<R> {
    /// Wraps the provided random number generator.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NeighborPicker for UniformPicker<R> {
    fn pick(&mut self, candidates: usize) -> usize {
        self.rng.gen_range(0..candidates)
    }
}

/// Always chooses the first candidate, yielding fully predictable layouts.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstNeighborPicker;

impl NeighborPicker for FirstNeighborPicker {
    fn pick(&mut self, _candidates: usize) -> usize {
        0
    }
}

/// Summary of a completed carving pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarveReport {
    /// Cells marked visited during the pass.
    pub visited_cells: usize,
    /// Wall pairs removed during the pass.
    pub carved_passages: usize,
    /// Largest stack depth reached while carving.
    pub max_stack_depth: usize,
}

/// Carves perfect mazes into freshly created grids.
#[derive(Clone, Debug)]
pub struct MazeGenerator<P> {
    picker: P,
}

impl MazeGenerator<UniformPicker<ChaCha8Rng>> {
    /// Creates a generator whose layouts are reproducible from `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(UniformPicker::new(ChaCha8Rng::seed_from_u64(seed)))
    }

    /// Creates a generator seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(UniformPicker::new(ChaCha8Rng::from_entropy()))
    }
}

impl<P: NeighborPicker> MazeGenerator<P> {
    /// Creates a generator driven by the provided picker.
    #[must_use]
    pub fn new(picker: P) -> Self {
        Self { picker }
    }

    /// Creates a `columns × rows` grid and carves a maze into it.
    pub fn generate(&mut self, columns: u32, rows: u32) -> Result<Grid, GridError> {
        let mut grid = Grid::new(columns, rows)?;
        let report = self.carve(&mut grid);
        debug!(
            columns,
            rows,
            visited = report.visited_cells,
            passages = report.carved_passages,
            max_stack_depth = report.max_stack_depth,
            "generated maze"
        );
        Ok(grid)
    }

    /// Carves a maze into `grid`, mutating its walls and visited flags.
    ///
    /// The grid is expected to be freshly created: carving starts from the
    /// top-left cell and only expands into unvisited cells.
    pub fn carve(&mut self, grid: &mut Grid) -> CarveReport {
        let start = CellCoord::new(0, 0);
        grid.mark_visited(start);

        let mut report = CarveReport {
            visited_cells: 1,
            carved_passages: 0,
            max_stack_depth: 1,
        };
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let candidates = grid.unvisited_neighbors_of(current);
            if candidates.is_empty() {
                let _ = stack.pop();
                continue;
            }

            let choice = self.picker.pick(candidates.len());
            let Some(next) = candidates.get(choice) else {
                panic!(
                    "neighbor picker returned index {choice} for {} candidates",
                    candidates.len()
                );
            };

            stack.push(next);
            grid.remove_walls_between(current, next);
            grid.mark_visited(next);
            trace!(?current, ?next, depth = stack.len(), "carved into neighbor");

            report.visited_cells += 1;
            report.carved_passages += 1;
            report.max_stack_depth = report.max_stack_depth.max(stack.len());
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of choices, wrapping each into the candidate range.
    struct ScriptedPicker {
        choices: Vec<usize>,
        cursor: usize,
        seen: Vec<usize>,
    }

    impl NeighborPicker for ScriptedPicker {
        fn pick(&mut self, candidates: usize) -> usize {
            self.seen.push(candidates);
            let choice = self.choices[self.cursor % self.choices.len()];
            self.cursor += 1;
            choice % candidates
        }
    }

    #[test]
    fn picker_is_consulted_once_per_carved_passage() {
        let mut grid = Grid::new(4, 3).expect("valid grid");
        let mut generator = MazeGenerator::new(ScriptedPicker {
            choices: vec![1, 0, 2],
            cursor: 0,
            seen: Vec::new(),
        });

        let report = generator.carve(&mut grid);

        assert_eq!(report.carved_passages, 11);
        assert_eq!(generator.picker.seen.len(), 11);
        assert!(generator
            .picker
            .seen
            .iter()
            .all(|candidates| (1..=4).contains(candidates)));
    }

    #[test]
    fn uniform_picker_stays_within_candidate_range() {
        let mut picker = UniformPicker::new(ChaCha8Rng::seed_from_u64(7));
        for candidates in 1..=4 {
            for _ in 0..64 {
                assert!(picker.pick(candidates) < candidates);
            }
        }
    }

    #[test]
    fn uniform_picker_reaches_every_candidate() {
        let mut picker = UniformPicker::new(ChaCha8Rng::seed_from_u64(0x5eed));
        let mut hits = [0usize; 4];
        for _ in 0..4_000 {
            hits[picker.pick(4)] += 1;
        }

        for count in hits {
            assert!(count > 800, "uneven distribution: {hits:?}");
        }
    }

    #[test]
    fn single_row_grid_carves_a_straight_corridor() {
        let mut grid = Grid::new(5, 1).expect("valid grid");
        let report = MazeGenerator::new(FirstNeighborPicker).carve(&mut grid);

        assert_eq!(report.carved_passages, 4);
        assert_eq!(report.max_stack_depth, 5);
        for column in 0..4 {
            assert!(grid.is_open_between(
                CellCoord::new(column, 0),
                CellCoord::new(column + 1, 0)
            ));
        }
    }
}
