use thiserror::Error;
use unmaze::error::MazeError;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("could not determine data directory")]
    NoDataDir,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Maze(#[from] MazeError),
}
