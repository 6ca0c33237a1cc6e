use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;

/// Walk a freshly carved maze from the top-left corner to the exit.
#[derive(Debug, Parser)]
#[command(name = "maze-trail", version, long_about = None)]
pub(crate) struct Cli {
    /// TOML file providing defaults for the remaining options.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Seed for reproducible maze layouts.
    #[arg(long)]
    seed: Option<u64>,

    /// Side length of a maze cell in pixels.
    #[arg(long, value_name = "PX")]
    cell_size: Option<f32>,

    /// Initial window width in pixels.
    #[arg(long, value_name = "PX")]
    width: Option<f32>,

    /// Initial window height in pixels.
    #[arg(long, value_name = "PX")]
    height: Option<f32>,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_name = "BOOL")]
    vsync: Option<bool>,
}

impl Cli {
    /// Values that take precedence over the configuration file.
    pub(crate) fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            cell_size: self.cell_size,
            window_width: self.width,
            window_height: self.height,
            seed: self.seed,
            vsync: self.vsync,
        }
    }
}
