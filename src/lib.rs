//! # unmaze
//!
//! A grid maze editor core with a step-wise solver.
//!
//! The solver sees only the four cells around the agent. It explores depth
//! first, lays a trail behind it, and remembers junctions so it can back up
//! and try the next exit. It ends either `Solved` or `Failed`; it never loops
//! forever on a finite grid.
//!
//! ## Quick Start
//!
//! ```
//! use unmaze::prelude::*;
//!
//! let mut grid = Grid::open(3, 3).unwrap();
//! grid.toggle_wall(Coord::new(1, 1)).unwrap();
//! grid.set_start(Coord::new(0, 0)).unwrap();
//! grid.set_end(Coord::new(2, 2)).unwrap();
//! grid.place_agent_at_start().unwrap();
//!
//! let mut solver = Solver::new(&grid).unwrap();
//! while !solver.done() {
//!     solver.step(&mut grid).unwrap();
//! }
//! assert_eq!(solver.status(), SolveStatus::Solved);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): `Serialize`/`Deserialize` for grids, coordinates and
//!   statuses
//!
//! ## Modules
//!
//! - [`grid`]: cells, start, end and agent
//! - [`solver`]: the step-wise solver
//! - [`codec`]: share codes (`serialize` / `deserialize`)
//! - [`generate`]: seeded random mazes
//! - [`render`]: text views
//! - [`session`]: editor lifecycle around one grid and its solver

#[path = "core/error.rs"]
pub mod error;

#[path = "core/grid.rs"]
pub mod grid;

#[path = "core/solver.rs"]
pub mod solver;

#[path = "core/codec.rs"]
pub mod codec;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/generate.rs"]
pub mod generate;

#[path = "core/render.rs"]
pub mod render;

#[path = "core/session.rs"]
pub mod session;

/// Prelude module for convenient imports.
///
/// ```
/// use unmaze::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::MazeError;
    pub use crate::generate::carve;
    pub use crate::grid::{CellType, Coord, Direction, Grid};
    pub use crate::session::{Layout, MazeConfig, Session, UiMode};
    pub use crate::solver::{SolveStatus, Solver, SolverDiagnostics};
}
