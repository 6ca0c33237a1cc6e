//! Breadth-first distance field over the carved passages of a grid.

use std::collections::VecDeque;

use maze_trail_core::CellCoord;

use crate::Grid;

/// Dense passage-distance grid seeded from a single source cell.
///
/// Distances follow open passages only, so in a perfect maze they equal the
/// length of the unique path from the source. Cells that cannot be reached
/// keep `u32::MAX` so callers can tell them apart from the source itself.
#[derive(Clone, Debug, Default)]
pub struct DistanceField {
    columns: u32,
    rows: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Runs a breadth-first search from `source` across open passages.
    ///
    /// An out-of-bounds source produces a field where nothing is reachable.
    #[must_use]
    pub fn from_source(grid: &Grid, source: CellCoord) -> Self {
        let mut field = Self {
            columns: grid.columns(),
            rows: grid.rows(),
            distances: vec![u32::MAX; grid.len()],
        };

        let Some(source_index) = field.index(source) else {
            return field;
        };
        field.distances[source_index] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = field.index(cell) else {
                continue;
            };
            let next_distance = field.distances[current_index].saturating_add(1);

            for neighbor in grid.open_neighbors_of(cell).iter() {
                let Some(neighbor_index) = field.index(neighbor) else {
                    continue;
                };

                if field.distances[neighbor_index] <= next_distance {
                    continue;
                }

                field.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }

        field
    }

    /// Distance from the source to `cell`, if it was reached.
    #[must_use]
    pub fn distance(&self, cell: CellCoord) -> Option<u32> {
        self.index(cell)
            .and_then(|index| self.distances.get(index).copied())
            .filter(|distance| *distance != u32::MAX)
    }

    /// Number of cells reached from the source, including the source.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.distances
            .iter()
            .filter(|distance| **distance != u32::MAX)
            .count()
    }

    /// Reports whether every cell of the grid was reached.
    #[must_use]
    pub fn covers_grid(&self) -> bool {
        !self.distances.is_empty() && self.reachable_count() == self.distances.len()
    }

    /// Largest finite distance in the field.
    #[must_use]
    pub fn max_distance(&self) -> Option<u32> {
        self.distances
            .iter()
            .copied()
            .filter(|distance| *distance != u32::MAX)
            .max()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}
