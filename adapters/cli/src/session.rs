//! Frame-by-frame glue between the generator, the navigator, and the scene.

use anyhow::{Context, Result};
use maze_trail_core::{CellCoord, Direction, MoveOutcome, VICTORY_BANNER};
use maze_trail_rendering::{
    CellPresentation, FrameInput, HudPresentation, MazeLayout, Palette, Scene, Viewport,
};
use maze_trail_system_generation::{MazeGenerator, NeighborPicker};
use maze_trail_system_navigation::Navigator;
use maze_trail_world::{connectivity::DistanceField, Grid};
use tracing::{debug, info, warn};

/// One playable maze plus everything needed to replace it when the window
/// changes size.
#[derive(Debug)]
pub(crate) struct Session<P> {
    generator: MazeGenerator<P>,
    layout: MazeLayout,
    palette: Palette,
    grid: Grid,
    navigator: Navigator,
    moves: u32,
    shortest_route: Option<u32>,
}

impl<P: NeighborPicker> Session<P> {
    /// Carves the first maze sized to `viewport`.
    pub(crate) fn new(
        mut generator: MazeGenerator<P>,
        cell_length: f32,
        palette: Palette,
        viewport: Viewport,
    ) -> Result<Self> {
        let (columns, rows) = viewport
            .grid_dimensions(cell_length)
            .context("cannot size the maze to the window")?;
        let layout = MazeLayout::new(columns, rows, cell_length)
            .context("cannot lay out the maze")?;
        let grid = generator
            .generate(columns, rows)
            .context("failed to generate the first maze")?;
        let navigator = Navigator::new(&grid);
        let shortest_route = shortest_route(&grid, &navigator);
        info!(columns, rows, ?shortest_route, "maze ready");

        Ok(Self {
            generator,
            layout,
            palette,
            grid,
            navigator,
            moves: 0,
            shortest_route,
        })
    }

    /// Complete scene for the current maze.
    pub(crate) fn scene(&self) -> Scene {
        let cells = self
            .grid
            .cells()
            .iter()
            .map(|cell| CellPresentation::new(cell.coord(), cell.walls(), cell.visited()))
            .collect();
        let mut scene = Scene::new(
            self.layout,
            self.palette,
            cells,
            self.navigator.player(),
            self.navigator.exit(),
        );
        self.refresh_status(&mut scene);
        scene
    }

    /// Reacts to one frame of input and brings `scene` up to date.
    pub(crate) fn handle_frame(&mut self, input: FrameInput, scene: &mut Scene) {
        let regenerated = self.fit_to(input.viewport);

        for direction in input.directions {
            self.step(direction);
        }

        if regenerated {
            *scene = self.scene();
        } else {
            self.refresh_status(scene);
        }
    }

    fn fit_to(&mut self, viewport: Viewport) -> bool {
        let dimensions = match viewport.grid_dimensions(self.layout.cell_length) {
            Ok(dimensions) => dimensions,
            Err(error) => {
                warn!(%error, "keeping the current maze");
                return false;
            }
        };
        if dimensions == (self.layout.columns, self.layout.rows) {
            return false;
        }

        let (columns, rows) = dimensions;
        let grid = match self.generator.generate(columns, rows) {
            Ok(grid) => grid,
            Err(error) => {
                warn!(%error, "keeping the current maze");
                return false;
            }
        };

        self.layout = MazeLayout {
            columns,
            rows,
            ..self.layout
        };
        self.grid = grid;
        self.navigator.reset(&self.grid);
        self.moves = 0;
        self.shortest_route = shortest_route(&self.grid, &self.navigator);
        info!(
            columns,
            rows,
            shortest_route = ?self.shortest_route,
            "regenerated maze for new window size"
        );
        true
    }

    fn step(&mut self, direction: Direction) {
        let already_won = self.navigator.has_won();
        match self.navigator.attempt_move(&self.grid, direction) {
            MoveOutcome::Moved { .. } => {
                self.moves = self.moves.saturating_add(1);
            }
            MoveOutcome::ReachedExit { to, .. } => {
                self.moves = self.moves.saturating_add(1);
                if !already_won {
                    info!(
                        exit = ?to,
                        moves = self.moves,
                        shortest_route = ?self.shortest_route,
                        "player reached the exit"
                    );
                }
            }
            MoveOutcome::Rejected { direction, reason } => {
                debug!(?direction, ?reason, "move rejected");
            }
        }
    }

    fn refresh_status(&self, scene: &mut Scene) {
        scene.player = self.navigator.player();
        scene.exit = self.navigator.exit();
        scene.banner = self.navigator.has_won().then(|| VICTORY_BANNER.to_owned());
        scene.hud = HudPresentation {
            moves: self.moves,
            shortest_route: self.shortest_route,
        };
    }
}

fn shortest_route(grid: &Grid, navigator: &Navigator) -> Option<u32> {
    DistanceField::from_source(grid, CellCoord::new(0, 0)).distance(navigator.exit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_trail_system_generation::FirstNeighborPicker;

    fn session(viewport: Viewport) -> Session<FirstNeighborPicker> {
        Session::new(
            MazeGenerator::new(FirstNeighborPicker),
            20.0,
            Palette::default(),
            viewport,
        )
        .expect("valid session")
    }

    fn frame(directions: &[Direction], viewport: Viewport) -> FrameInput {
        FrameInput {
            directions: directions.to_vec(),
            viewport,
        }
    }

    #[test]
    fn first_maze_fills_the_window() {
        let session = session(Viewport::new(205.0, 99.0));

        assert_eq!(session.grid.columns(), 10);
        assert_eq!(session.grid.rows(), 4);
        assert_eq!(session.navigator.exit(), CellCoord::new(9, 3));

        let scene = session.scene();
        assert_eq!(scene.cells.len(), 40);
        assert!(scene.cells.iter().all(|cell| cell.visited));
        assert_eq!(scene.player, CellCoord::new(0, 0));
        assert!(scene.banner.is_none());
    }

    #[test]
    fn invalid_cell_length_is_reported() {
        let error = Session::new(
            MazeGenerator::new(FirstNeighborPicker),
            0.0,
            Palette::default(),
            Viewport::new(100.0, 100.0),
        )
        .expect_err("zero cell length");
        assert!(format!("{error:#}").contains("cell length"));
    }

    #[test]
    fn winning_shows_the_banner_and_counts_moves() {
        let viewport = Viewport::new(40.0, 40.0);
        let mut session = session(viewport);
        let mut scene = session.scene();
        assert_eq!(scene.hud.shortest_route, Some(2));

        session.handle_frame(frame(&[Direction::South], viewport), &mut scene);
        assert_eq!(scene.hud.moves, 0);
        assert_eq!(scene.player, CellCoord::new(0, 0));

        session.handle_frame(frame(&[Direction::East], viewport), &mut scene);
        session.handle_frame(frame(&[Direction::South], viewport), &mut scene);

        assert_eq!(scene.player, CellCoord::new(1, 1));
        assert_eq!(scene.hud.moves, 2);
        assert_eq!(scene.banner.as_deref(), Some(VICTORY_BANNER));

        session.handle_frame(frame(&[Direction::West], viewport), &mut scene);
        assert_eq!(scene.player, CellCoord::new(0, 1));
        assert_eq!(scene.banner.as_deref(), Some(VICTORY_BANNER));
    }

    #[test]
    fn every_arrow_pressed_in_one_frame_is_applied() {
        let viewport = Viewport::new(40.0, 40.0);
        let mut session = session(viewport);
        let mut scene = session.scene();

        session.handle_frame(
            frame(&[Direction::East, Direction::South], viewport),
            &mut scene,
        );

        assert_eq!(scene.player, CellCoord::new(1, 1));
        assert_eq!(scene.hud.moves, 2);
        assert_eq!(scene.banner.as_deref(), Some(VICTORY_BANNER));
    }

    #[test]
    fn blocked_moves_in_a_queue_do_not_stop_later_ones() {
        let viewport = Viewport::new(40.0, 40.0);
        let mut session = session(viewport);
        let mut scene = session.scene();

        session.handle_frame(
            frame(&[Direction::North, Direction::East, Direction::West], viewport),
            &mut scene,
        );

        assert_eq!(scene.player, CellCoord::new(0, 0));
        assert_eq!(scene.hud.moves, 2);
    }

    #[test]
    fn oversized_first_window_is_an_error_not_a_crash() {
        let error = Session::new(
            MazeGenerator::new(FirstNeighborPicker),
            20.0,
            Palette::default(),
            Viewport::new(1.0e9, 1.0e9),
        )
        .expect_err("too many cells");
        assert!(format!("{error:#}").contains("grid dimensions"));
    }

    #[test]
    fn oversized_resize_keeps_the_current_maze() {
        let viewport = Viewport::new(40.0, 40.0);
        let mut session = session(viewport);
        let mut scene = session.scene();
        let before = scene.clone();

        session.handle_frame(frame(&[], Viewport::new(f32::MAX, f32::MAX)), &mut scene);

        assert_eq!(scene, before);
        assert_eq!(session.grid.len(), 4);
    }

    #[test]
    fn idle_frames_leave_the_scene_unchanged() {
        let viewport = Viewport::new(60.0, 60.0);
        let mut session = session(viewport);
        let mut scene = session.scene();
        let before = scene.clone();

        session.handle_frame(frame(&[], viewport), &mut scene);

        assert_eq!(scene, before);
    }

    #[test]
    fn resizing_regenerates_and_resets_progress() {
        let viewport = Viewport::new(40.0, 40.0);
        let mut session = session(viewport);
        let mut scene = session.scene();
        session.handle_frame(frame(&[Direction::East], viewport), &mut scene);
        session.handle_frame(frame(&[Direction::South], viewport), &mut scene);
        assert!(session.navigator.has_won());

        let wider = Viewport::new(79.0, 40.0);
        session.handle_frame(frame(&[], wider), &mut scene);

        assert_eq!(session.grid.columns(), 3);
        assert_eq!(session.grid.rows(), 2);
        assert!(!session.navigator.has_won());
        assert_eq!(scene.cells.len(), 6);
        assert_eq!(scene.layout.columns, 3);
        assert_eq!(scene.player, CellCoord::new(0, 0));
        assert_eq!(scene.exit, CellCoord::new(2, 1));
        assert_eq!(scene.hud.moves, 0);
        assert!(scene.banner.is_none());
    }

    #[test]
    fn sub_cell_resizes_keep_the_current_maze() {
        let viewport = Viewport::new(40.0, 40.0);
        let mut session = session(viewport);
        let mut scene = session.scene();
        session.handle_frame(frame(&[Direction::East], viewport), &mut scene);

        session.handle_frame(frame(&[], Viewport::new(59.0, 45.0)), &mut scene);

        assert_eq!(scene.player, CellCoord::new(1, 0));
        assert_eq!(scene.hud.moves, 1);
    }

    #[test]
    fn collapsed_window_still_gets_a_single_cell_maze() {
        let mut session = session(Viewport::new(40.0, 40.0));
        let mut scene = session.scene();

        session.handle_frame(frame(&[], Viewport::new(0.0, 0.0)), &mut scene);

        assert_eq!(scene.cells.len(), 1);
        assert_eq!(scene.banner.as_deref(), Some(VICTORY_BANNER));
        assert_eq!(scene.hud.shortest_route, Some(0));
    }
}
