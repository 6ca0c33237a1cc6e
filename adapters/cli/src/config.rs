//! Layered runtime configuration: defaults, then an optional TOML file, then
//! command-line flags.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

/// Settings that shape the window and the generated mazes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MazeConfig {
    /// Side length of a maze cell in pixels.
    pub(crate) cell_size: f32,
    /// Initial window width in pixels.
    pub(crate) window_width: f32,
    /// Initial window height in pixels.
    pub(crate) window_height: f32,
    /// Seed for reproducible layouts; entropy is used when absent.
    pub(crate) seed: Option<u64>,
    /// Whether presentation waits for the display refresh.
    pub(crate) vsync: bool,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            window_width: 960.0,
            window_height: 720.0,
            seed: None,
            vsync: true,
        }
    }
}

/// Values supplied on the command line; `None` keeps the lower layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ConfigOverrides {
    pub(crate) cell_size: Option<f32>,
    pub(crate) window_width: Option<f32>,
    pub(crate) window_height: Option<f32>,
    pub(crate) seed: Option<u64>,
    pub(crate) vsync: Option<bool>,
}

impl MazeConfig {
    /// Parses a configuration document, filling omitted keys with defaults.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid maze configuration")
    }

    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Applies command-line values on top of this configuration.
    #[must_use]
    pub(crate) fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        Self {
            cell_size: overrides.cell_size.unwrap_or(self.cell_size),
            window_width: overrides.window_width.unwrap_or(self.window_width),
            window_height: overrides.window_height.unwrap_or(self.window_height),
            seed: overrides.seed.or(self.seed),
            vsync: overrides.vsync.unwrap_or(self.vsync),
        }
    }

    /// Rejects sizes that cannot produce a window or a maze.
    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(
            self.cell_size.is_finite() && self.cell_size >= 1.0,
            "cell size must be at least one pixel (received {})",
            self.cell_size
        );
        ensure!(
            self.window_width.is_finite() && self.window_width >= 1.0,
            "window width must be at least one pixel (received {})",
            self.window_width
        );
        ensure!(
            self.window_height.is_finite() && self.window_height >= 1.0,
            "window height must be at least one pixel (received {})",
            self.window_height
        );
        Ok(())
    }
}
