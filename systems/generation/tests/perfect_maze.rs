use maze_trail_core::{CellCoord, CellWalls, Direction};
use maze_trail_system_generation::{FirstNeighborPicker, MazeGenerator};
use maze_trail_world::{connectivity::DistanceField, Grid, GridError};

fn walls(top: bool, right: bool, bottom: bool, left: bool) -> CellWalls {
    CellWalls {
        top,
        right,
        bottom,
        left,
    }
}

fn assert_walls_are_symmetric(grid: &Grid) {
    for cell in grid.cells() {
        for direction in Direction::ALL {
            let Some(neighbor) = cell.coord().step(direction) else {
                continue;
            };
            let Some(neighbor) = grid.cell(neighbor) else {
                continue;
            };
            assert_eq!(
                cell.walls().has(direction),
                neighbor.walls().has(direction.opposite()),
                "asymmetric wall between {:?} and {:?}",
                cell.coord(),
                neighbor.coord()
            );
        }
    }
}

fn assert_perimeter_is_closed(grid: &Grid) {
    for cell in grid.cells() {
        let walls = cell.walls();
        if cell.row() == 0 {
            assert!(walls.top, "top edge open at {:?}", cell.coord());
        }
        if cell.column() == 0 {
            assert!(walls.left, "left edge open at {:?}", cell.coord());
        }
        if cell.row() + 1 == grid.rows() {
            assert!(walls.bottom, "bottom edge open at {:?}", cell.coord());
        }
        if cell.column() + 1 == grid.columns() {
            assert!(walls.right, "right edge open at {:?}", cell.coord());
        }
    }
}

fn assert_perfect_maze(grid: &Grid) {
    assert!(grid.cells().iter().all(|cell| cell.visited()));
    assert_eq!(grid.passage_count(), grid.len() - 1);
    assert_walls_are_symmetric(grid);
    assert_perimeter_is_closed(grid);

    let field = DistanceField::from_source(grid, CellCoord::new(0, 0));
    assert!(field.covers_grid(), "unreachable cells remain");
}

#[test]
fn seeded_generators_carve_spanning_trees() {
    for (seed, columns, rows) in [(1, 10, 10), (2, 17, 5), (3, 1, 12), (4, 48, 36)] {
        let grid = MazeGenerator::seeded(seed)
            .generate(columns, rows)
            .expect("valid dimensions");
        assert_eq!(grid.columns(), columns);
        assert_eq!(grid.rows(), rows);
        assert_perfect_maze(&grid);
    }
}

#[test]
fn entropy_generator_carves_a_perfect_maze() {
    let grid = MazeGenerator::from_entropy()
        .generate(12, 9)
        .expect("valid dimensions");
    assert_perfect_maze(&grid);
}

#[test]
fn carve_report_matches_grid_state() {
    let mut grid = Grid::new(6, 4).expect("valid grid");
    let report = MazeGenerator::seeded(99).carve(&mut grid);

    assert_eq!(report.visited_cells, 24);
    assert_eq!(report.carved_passages, 23);
    assert!(report.max_stack_depth >= 2);
    assert!(report.max_stack_depth <= 24);
    assert_eq!(grid.passage_count(), report.carved_passages);
}

#[test]
fn identical_seeds_reproduce_identical_layouts() {
    let first = MazeGenerator::seeded(0xDEC0DE)
        .generate(20, 15)
        .expect("valid dimensions");
    let second = MazeGenerator::seeded(0xDEC0DE)
        .generate(20, 15)
        .expect("valid dimensions");
    assert_eq!(first, second);

    let different = MazeGenerator::seeded(0xDEC0DF)
        .generate(20, 15)
        .expect("valid dimensions");
    assert_ne!(first, different);
}

#[test]
fn reused_generator_keeps_producing_perfect_mazes() {
    let mut generator = MazeGenerator::seeded(5);
    let first = generator.generate(8, 8).expect("valid dimensions");
    let second = generator.generate(8, 8).expect("valid dimensions");

    assert_perfect_maze(&first);
    assert_perfect_maze(&second);
    assert_ne!(first, second);
}

#[test]
fn single_cell_grid_keeps_all_walls() {
    let grid = MazeGenerator::seeded(11)
        .generate(1, 1)
        .expect("valid dimensions");

    let cell = grid.cell(CellCoord::new(0, 0)).expect("only cell");
    assert!(cell.visited());
    assert_eq!(cell.walls(), CellWalls::CLOSED);
    assert_eq!(grid.passage_count(), 0);
}

#[test]
fn first_neighbor_picker_carves_a_known_two_by_two_layout() {
    let grid = MazeGenerator::new(FirstNeighborPicker)
        .generate(2, 2)
        .expect("valid dimensions");

    let expected = [
        (CellCoord::new(0, 0), walls(true, false, true, true)),
        (CellCoord::new(1, 0), walls(true, true, false, false)),
        (CellCoord::new(1, 1), walls(false, true, true, false)),
        (CellCoord::new(0, 1), walls(true, false, true, true)),
    ];
    for (coord, walls) in expected {
        assert_eq!(
            grid.cell(coord).expect("cell exists").walls(),
            walls,
            "unexpected walls at {coord:?}"
        );
    }
    assert_perfect_maze(&grid);
}

#[test]
fn zero_dimensions_are_reported_not_carved() {
    let error = MazeGenerator::seeded(1)
        .generate(0, 4)
        .expect_err("zero columns must be rejected");
    assert_eq!(
        error,
        GridError::InvalidDimensions {
            columns: 0,
            rows: 4
        }
    );
}
