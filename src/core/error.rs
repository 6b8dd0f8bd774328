use thiserror::Error;

/// Everything that can go wrong in the maze core.
///
/// An exhausted search is not an error: it ends in
/// [`SolveStatus::Failed`](crate::solver::SolveStatus::Failed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// A grid must be at least 2x2.
    #[error("invalid maze dimensions {width}x{height} (both must be at least 2)")]
    InvalidDimensions { width: u32, height: u32 },

    /// The agent was placed, or the solver stepped, before a start was set.
    #[error("maze start was never set")]
    UninitializedStart,

    /// A coordinate handed to a mutator lies outside the grid.
    #[error("coordinate ({x}, {y}) is outside the maze")]
    OutOfBounds { x: i32, y: i32 },

    /// A share code could not be decoded.
    #[error("corrupt maze data: {0}")]
    CorruptData(String),
}

impl MazeError {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        MazeError::CorruptData(msg.into())
    }
}
