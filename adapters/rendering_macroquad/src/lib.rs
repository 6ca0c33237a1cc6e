#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Trail.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! The adapter therefore depends on macroquad without its default `audio`
//! feature; the maze has no sound to play anyway.

mod input;

pub use self::input::ArrowKeys;

use self::input::KeyboardShortcuts;
use anyhow::Result;
use glam::Vec2;
use maze_trail_rendering::{
    FrameInput, HudPresentation, MazeLayout, Presentation, RenderingBackend, Scene, Viewport,
};
use std::time::Duration;
use tracing::{debug, info};

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self { swap_interval } = self;

        let Presentation {
            window_title,
            window_size,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_dimension(window_size.width),
            window_height: window_dimension(window_size.height),
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }
        debug!(
            width = config.window_width,
            height = config.window_height,
            ?swap_interval,
            "opening macroquad window"
        );

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    info!("quit requested");
                    break;
                }

                macroquad::window::clear_background(background);

                let viewport = Viewport::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    directions: keyboard.arrows.directions(),
                    viewport,
                };

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, viewport);
                draw_visited_cells(&scene, &metrics);
                draw_exit(&scene, &metrics);
                draw_walls(&scene, &metrics);
                draw_player(&scene, &metrics);
                draw_hud(&scene, viewport);
                if let Some(banner) = &scene.banner {
                    draw_banner(banner, &scene, viewport);
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn window_dimension(pixels: f32) -> i32 {
    if pixels.is_finite() && pixels >= 1.0 {
        pixels.round() as i32
    } else {
        1
    }
}

/// Screen-space placement of the maze.
///
/// The maze is drawn at its native pixel size when it fits and shrunk
/// uniformly when the window is smaller than the scene, e.g. a window
/// narrower than a single cell.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, viewport: Viewport) -> Self {
        let layout = &scene.layout;
        let width = layout.width();
        let height = layout.height();
        let scale = if width <= f32::EPSILON || height <= f32::EPSILON {
            1.0
        } else {
            (viewport.width / width)
                .min(viewport.height / height)
                .clamp(f32::EPSILON, 1.0)
        };

        let offset = Vec2::new(
            ((viewport.width - width * scale) * 0.5).max(0.0),
            ((viewport.height - height * scale) * 0.5).max(0.0),
        );

        Self { scale, offset }
    }

    fn to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    fn cell_step(&self, layout: &MazeLayout) -> f32 {
        layout.cell_length * self.scale
    }
}

fn draw_visited_cells(scene: &Scene, metrics: &SceneMetrics) {
    let color = to_macroquad_color(scene.palette.visited);
    let step = metrics.cell_step(&scene.layout);

    for cell in scene.cells.iter().filter(|cell| cell.visited) {
        let origin = metrics.to_screen(scene.layout.cell_origin(cell.cell));
        macroquad::shapes::draw_rectangle(origin.x, origin.y, step, step, color);
    }
}

fn draw_exit(scene: &Scene, metrics: &SceneMetrics) {
    let origin = metrics.to_screen(scene.layout.cell_origin(scene.exit));
    let step = metrics.cell_step(&scene.layout);
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        step,
        step,
        to_macroquad_color(scene.palette.exit),
    );
}

fn draw_walls(scene: &Scene, metrics: &SceneMetrics) {
    let color = to_macroquad_color(scene.palette.wall);
    let thickness = (scene.layout.wall_thickness * metrics.scale).max(1.0);

    for cell in &scene.cells {
        for segment in scene.layout.wall_segments(cell) {
            let start = metrics.to_screen(segment.start);
            let end = metrics.to_screen(segment.end);
            macroquad::shapes::draw_line(start.x, start.y, end.x, end.y, thickness, color);
        }
    }
}

fn draw_player(scene: &Scene, metrics: &SceneMetrics) {
    let center = metrics.to_screen(scene.layout.cell_center(scene.player));
    macroquad::shapes::draw_circle(
        center.x,
        center.y,
        scene.layout.player_radius() * metrics.scale,
        to_macroquad_color(scene.palette.player),
    );
}

fn hud_text(hud: &HudPresentation) -> String {
    match hud.shortest_route {
        Some(shortest) => format!("Moves: {}  Shortest: {shortest}", hud.moves),
        None => format!("Moves: {}", hud.moves),
    }
}

fn draw_hud(scene: &Scene, viewport: Viewport) {
    const FONT_SIZE: u16 = 18;
    const PADDING: f32 = 4.0;

    let text = hud_text(&scene.hud);
    let dimensions = macroquad::text::measure_text(&text, None, FONT_SIZE, 1.0);
    let x = (viewport.width - dimensions.width - 2.0 * PADDING).max(0.0);
    let y = (viewport.height - dimensions.height - 2.0 * PADDING).max(0.0);

    macroquad::shapes::draw_rectangle(
        x,
        y,
        dimensions.width + 2.0 * PADDING,
        dimensions.height + 2.0 * PADDING,
        to_macroquad_color(scene.palette.visited.with_alpha(0.85)),
    );
    let _ = macroquad::text::draw_text(
        &text,
        x + PADDING,
        y + PADDING + dimensions.offset_y,
        f32::from(FONT_SIZE),
        to_macroquad_color(scene.palette.text),
    );
}

fn draw_banner(banner: &str, scene: &Scene, viewport: Viewport) {
    const FONT_SIZE: u16 = 48;
    const PADDING: f32 = 16.0;

    let dimensions = macroquad::text::measure_text(banner, None, FONT_SIZE, 1.0);
    let box_width = dimensions.width + 2.0 * PADDING;
    let box_height = dimensions.height + 2.0 * PADDING;
    let x = ((viewport.width - box_width) * 0.5).max(0.0);
    let y = ((viewport.height - box_height) * 0.5).max(0.0);

    macroquad::shapes::draw_rectangle(
        x,
        y,
        box_width,
        box_height,
        to_macroquad_color(scene.palette.exit.with_alpha(0.9)),
    );
    let _ = macroquad::text::draw_text(
        banner,
        x + PADDING,
        y + PADDING + dimensions.offset_y,
        f32::from(FONT_SIZE),
        to_macroquad_color(scene.palette.player),
    );
}

fn to_macroquad_color(color: maze_trail_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
