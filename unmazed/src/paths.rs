//! Where the driver keeps its files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DriverError;

#[derive(Debug, Clone)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    /// The OS data directory plus `unmaze/`, created if missing.
    pub fn new() -> Result<Self, DriverError> {
        let base = dirs::data_dir().ok_or(DriverError::NoDataDir)?;
        Self::at(base.join("unmaze"))
    }

    pub fn at(data_dir: PathBuf) -> Result<Self, DriverError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn maze_file(&self) -> PathBuf {
        self.data_dir.join("maze.txt")
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }
}
