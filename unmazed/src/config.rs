//! Driver settings, read from `config.json` in the data directory.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use unmaze::session::MazeConfig;

use crate::error::DriverError;

pub const FPS_ENV: &str = "UNMAZED_FPS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Solver steps per second.
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub braid: f32,
    /// Carve a new maze with the next seed after every finished solve.
    pub regenerate_after_round: bool,
    /// Stop after this many finished solves. `None` runs until Ctrl-C.
    pub max_rounds: Option<u32>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            width: 21,
            height: 15,
            seed: 1,
            braid: 0.05,
            regenerate_after_round: true,
            max_rounds: None,
        }
    }
}

impl DriverConfig {
    /// Reads the config file. A missing file is written out with the
    /// defaults so there is something to edit; a malformed file is an error.
    pub fn load_or_create(path: &Path) -> Result<Self, DriverError> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&self, path: &Path) -> Result<(), DriverError> {
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }

    /// Applies an `UNMAZED_FPS` value. Unparseable values are ignored.
    pub fn with_fps_override(mut self, raw: Option<&str>) -> Self {
        if let Some(fps) = raw.and_then(|v| v.trim().parse::<u32>().ok()) {
            self.fps = fps;
        }
        self.fps = self.fps.clamp(1, 1000);
        self
    }

    pub fn frame_millis(&self) -> u64 {
        (1000 / self.fps.max(1)).max(1) as u64
    }

    pub fn maze_config(&self, seed: u64) -> MazeConfig {
        MazeConfig::default()
            .with_size(self.width, self.height)
            .carved(seed, self.braid)
    }
}
