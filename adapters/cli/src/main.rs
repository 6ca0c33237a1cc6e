#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Trail experience.

mod cli;
mod config;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use maze_trail_core::WINDOW_TITLE;
use maze_trail_rendering::{Color, Palette, Presentation, RenderingBackend, Viewport};
use maze_trail_rendering_macroquad::MacroquadBackend;
use maze_trail_system_generation::MazeGenerator;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{cli::Cli, config::MazeConfig, session::Session};

/// Entry point for the Maze Trail command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let file_config = match &cli.config {
        Some(path) => MazeConfig::load(path)?,
        None => MazeConfig::default(),
    };
    let config = file_config.with_overrides(cli.overrides());
    config.validate()?;
    info!(?config, "starting maze trail");

    let generator = match config.seed {
        Some(seed) => MazeGenerator::seeded(seed),
        None => MazeGenerator::from_entropy(),
    };
    let window_size = Viewport::new(config.window_width, config.window_height);
    let mut session = Session::new(generator, config.cell_size, Palette::default(), window_size)?;

    let presentation = Presentation::new(
        WINDOW_TITLE,
        window_size,
        Color::from_rgb_u8(255, 255, 255),
        session.scene(),
    );

    MacroquadBackend::new()
        .with_vsync(config.vsync)
        .run(presentation, move |_dt, input, scene| {
            session.handle_frame(input, scene);
        })
        .context("rendering backend failed")
}
