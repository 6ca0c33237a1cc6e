#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Trail adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_trail_core::{CellCoord, CellWalls, Direction};
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a copy of the color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

/// Colors used to draw every element of a maze scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Fill drawn behind cells the generator has reached.
    pub visited: Color,
    /// Stroke used for cell walls.
    pub wall: Color,
    /// Fill of the exit square.
    pub exit: Color,
    /// Fill of the player disc.
    pub player: Color,
    /// Text color used for the banner and status line.
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            visited: Color::from_rgb_u8(0xee, 0xee, 0xee),
            wall: Color::from_rgb_u8(0, 0, 0),
            exit: Color::from_rgb_u8(0, 128, 0),
            player: Color::from_rgb_u8(255, 255, 0),
            text: Color::from_rgb_u8(20, 20, 20),
        }
    }
}

/// Drawable area reported by the backend, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Viewport {
    /// Width of the drawable area.
    pub width: f32,
    /// Height of the drawable area.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport descriptor.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Number of whole cells of `cell_length` pixels that fit the viewport.
    ///
    /// Each axis is floored and clamped so at least one cell is produced,
    /// even for a collapsed window.
    pub fn grid_dimensions(&self, cell_length: f32) -> Result<(u32, u32), RenderingError> {
        let cell_length = validate_cell_length(cell_length)?;
        Ok((
            cells_along(self.width, cell_length),
            cells_along(self.height, cell_length),
        ))
    }
}

fn cells_along(extent: f32, cell_length: f32) -> u32 {
    if !extent.is_finite() || extent <= 0.0 {
        return 1;
    }

    // Float to int casts saturate, so huge extents cannot wrap.
    ((extent / cell_length).floor() as u32).max(1)
}

fn validate_cell_length(cell_length: f32) -> Result<f32, RenderingError> {
    if cell_length.is_finite() && cell_length > 0.0 {
        Ok(cell_length)
    } else {
        Err(RenderingError::InvalidCellLength { cell_length })
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Moves requested on this frame, applied in order.
    pub directions: Vec<Direction>,
    /// Current size of the drawable area.
    pub viewport: Viewport,
}

/// Walls and generation state of a single cell as seen by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPresentation {
    /// Coordinate of the cell.
    pub cell: CellCoord,
    /// Walls still standing around the cell.
    pub walls: CellWalls,
    /// Whether the cell receives the visited fill.
    pub visited: bool,
}

impl CellPresentation {
    /// Creates a new cell presentation descriptor.
    #[must_use]
    pub const fn new(cell: CellCoord, walls: CellWalls, visited: bool) -> Self {
        Self {
            cell,
            walls,
            visited,
        }
    }
}

/// Straight wall stroke expressed in scene pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSegment {
    /// First endpoint of the stroke.
    pub start: Vec2,
    /// Second endpoint of the stroke.
    pub end: Vec2,
}

/// Pixel layout of the maze: grid size, cell size and stroke width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeLayout {
    /// Number of columns contained in the maze.
    pub columns: u32,
    /// Number of rows contained in the maze.
    pub rows: u32,
    /// Side length of a single cell in pixels.
    pub cell_length: f32,
    /// Width of wall strokes in pixels.
    pub wall_thickness: f32,
}

impl MazeLayout {
    /// Stroke width used when none is configured.
    pub const DEFAULT_WALL_THICKNESS: f32 = 2.0;

    /// Creates a new layout descriptor.
    ///
    /// Returns an error when `cell_length` is not a positive finite number.
    pub fn new(columns: u32, rows: u32, cell_length: f32) -> Result<Self, RenderingError> {
        let cell_length = validate_cell_length(cell_length)?;
        Ok(Self {
            columns,
            rows,
            cell_length,
            wall_thickness: Self::DEFAULT_WALL_THICKNESS,
        })
    }

    /// Total width of the maze.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Total height of the maze.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Top-left corner of `cell`.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(cell.column() as f32, cell.row() as f32) * self.cell_length
    }

    /// Center point of `cell`.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_length * 0.5)
    }

    /// Radius of the disc drawn for the player.
    #[must_use]
    pub fn player_radius(&self) -> f32 {
        self.cell_length / 3.0
    }

    /// Strokes for the walls still standing around `cell`.
    #[must_use]
    pub fn wall_segments(&self, cell: &CellPresentation) -> Vec<WallSegment> {
        let top_left = self.cell_origin(cell.cell);
        let size = self.cell_length;
        let top_right = top_left + Vec2::new(size, 0.0);
        let bottom_left = top_left + Vec2::new(0.0, size);
        let bottom_right = top_left + Vec2::splat(size);

        Direction::ALL
            .into_iter()
            .filter(|side| cell.walls.has(*side))
            .map(|side| {
                let (start, end) = match side {
                    Direction::North => (top_left, top_right),
                    Direction::East => (top_right, bottom_right),
                    Direction::South => (bottom_right, bottom_left),
                    Direction::West => (bottom_left, top_left),
                };
                WallSegment { start, end }
            })
            .collect()
    }
}

/// Status counters shown alongside the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct HudPresentation {
    /// Moves the player has made in the current maze.
    pub moves: u32,
    /// Length of the shortest route from the start to the exit.
    pub shortest_route: Option<u32>,
}

/// Scene description combining the maze, the player, and the exit.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Pixel layout of the maze.
    pub layout: MazeLayout,
    /// Colors used to draw the scene.
    pub palette: Palette,
    /// Cells in row-major order.
    pub cells: Vec<CellPresentation>,
    /// Cell occupied by the player.
    pub player: CellCoord,
    /// Cell the player needs to reach.
    pub exit: CellCoord,
    /// Message drawn over the maze, such as the victory banner.
    pub banner: Option<String>,
    /// Status counters for the current maze.
    pub hud: HudPresentation,
}

impl Scene {
    /// Creates a scene with no banner and zeroed status counters.
    #[must_use]
    pub fn new(
        layout: MazeLayout,
        palette: Palette,
        cells: Vec<CellPresentation>,
        player: CellCoord,
        exit: CellCoord,
    ) -> Self {
        Self {
            layout,
            palette,
            cells,
            player,
            exit,
            banner: None,
            hud: HudPresentation::default(),
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Initial window size in pixels.
    pub window_size: Viewport,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, window_size: Viewport, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            window_size,
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Trail scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Cell length must be positive to produce a drawable grid.
    #[error("cell length must be a positive number of pixels (received {cell_length})")]
    InvalidCellLength {
        /// Provided cell length that failed validation.
        cell_length: f32,
    },
}
