//! Step-wise maze solver.
//!
//! The solver sees only the four cells around the agent. It walks depth
//! first, laying a [`CellType::Trail`] behind it, and never steps onto its own
//! trail while exploring. That is what keeps it out of cycles. Junctions it
//! has left are remembered together with the exits already taken, so that
//! after a dead end it can walk back along its move history and try the next
//! exit. When every branch is used up and it is back on the start, it gives up.
//!
//! Every call to [`Solver::step`] performs exactly one transition and moves
//! the agent at most one cell. Drivers can interleave steps with rendering or
//! delays as they like.

use hashbrown::HashMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::MazeError;
use crate::grid::{CellType, Coord, Direction, Grid};

/// Where the solver is in its search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolveStatus {
    /// Walking forward into unvisited cells.
    Exploring,
    /// Walking backwards along the move history towards the last junction
    /// with an untried exit.
    Retracing,
    /// The agent reached the end cell.
    Solved,
    /// Every branch reachable from the start has been exhausted.
    Failed,
}

impl SolveStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SolveStatus::Solved | SolveStatus::Failed)
    }

    pub fn label(self) -> &'static str {
        match self {
            SolveStatus::Exploring => "Exploring",
            SolveStatus::Retracing => "Retracing",
            SolveStatus::Solved => "Solved",
            SolveStatus::Failed => "Failed",
        }
    }
}

/// Snapshot of solver bookkeeping, for status lines and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverDiagnostics {
    pub status: SolveStatus,
    pub steps: u64,
    /// Length of the move history, i.e. how far the agent is from the start
    /// along its current path.
    pub path_len: usize,
    pub junctions: usize,
    pub last_direction: Option<Direction>,
}

/// Wall-following depth-first solver bound to one [`Grid`].
///
/// The solver does not own the grid; it is passed to every [`Solver::step`].
/// It must always be the same grid, and nothing else may move the agent in
/// between. After [`Grid::reset_agent`] the solver is stale: build a new one.
#[derive(Debug, Clone)]
pub struct Solver {
    status: SolveStatus,
    // Junction -> exits already taken from it, in the order they were tried.
    junctions: HashMap<Coord, Vec<Direction>>,
    history: Vec<Direction>,
    last_direction: Option<Direction>,
    steps: u64,
}

impl Solver {
    /// Creates a solver for `grid`, whose start must be set and agent placed.
    pub fn new(grid: &Grid) -> Result<Self, MazeError> {
        grid.start().ok_or(MazeError::UninitializedStart)?;
        grid.agent().ok_or(MazeError::UninitializedStart)?;
        Ok(Self {
            status: SolveStatus::Exploring,
            junctions: HashMap::new(),
            history: Vec::new(),
            last_direction: None,
            steps: 0,
        })
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// True once the solver is `Solved` or `Failed`.
    pub fn done(&self) -> bool {
        self.status.is_terminal()
    }

    /// Number of non-terminal steps taken, including the one that noticed
    /// the end cell.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Forward moves from the start to the agent's current cell.
    pub fn history(&self) -> &[Direction] {
        &self.history
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    pub fn junction_count(&self) -> usize {
        self.junctions.len()
    }

    /// Exits already taken from a remembered junction.
    pub fn junction_exits(&self, at: Coord) -> Option<&[Direction]> {
        self.junctions.get(&at).map(Vec::as_slice)
    }

    /// Cells from the start to the agent along the current history.
    pub fn path(&self, grid: &Grid) -> Vec<Coord> {
        let Some(mut at) = grid.start() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(self.history.len() + 1);
        out.push(at);
        for dir in &self.history {
            at = at.step(*dir);
            out.push(at);
        }
        out
    }

    pub fn diagnostics(&self) -> SolverDiagnostics {
        SolverDiagnostics {
            status: self.status,
            steps: self.steps,
            path_len: self.history.len(),
            junctions: self.junctions.len(),
            last_direction: self.last_direction,
        }
    }

    /// Advances the search by one transition.
    ///
    /// Once the solver is done this is a no-op that returns the final status.
    pub fn step(&mut self, grid: &mut Grid) -> Result<SolveStatus, MazeError> {
        if self.done() {
            return Ok(self.status);
        }
        let start = grid.start().ok_or(MazeError::UninitializedStart)?;
        let here = grid.agent().ok_or(MazeError::UninitializedStart)?;

        self.steps += 1;

        if grid.cell(here) == CellType::End {
            self.status = SolveStatus::Solved;
            debug!(steps = self.steps, path_len = self.history.len(), "maze solved");
            return Ok(self.status);
        }

        let neighbors = grid.neighbors(here);
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .zip(neighbors)
            .filter(|(_, cell)| cell.is_open())
            .map(|(dir, _)| dir)
            .collect();

        match self.status {
            SolveStatus::Exploring => self.explore(grid, here, &open),
            SolveStatus::Retracing => self.retrace(grid, here, start, &open),
            SolveStatus::Solved | SolveStatus::Failed => {}
        }

        trace!(
            x = here.x,
            y = here.y,
            open = open.len(),
            status = self.status.label(),
            "step"
        );
        Ok(self.status)
    }

    /// Steps until the solver is done.
    pub fn run(&mut self, grid: &mut Grid) -> Result<SolveStatus, MazeError> {
        loop {
            let status = self.step(grid)?;
            if status.is_terminal() {
                return Ok(status);
            }
        }
    }

    fn explore(&mut self, grid: &mut Grid, here: Coord, open: &[Direction]) {
        match open {
            [] => {
                trace!(x = here.x, y = here.y, "dead end");
                self.back_up(grid);
                self.status = SolveStatus::Retracing;
            }
            [only] => {
                grid.lay_trail(here);
                self.advance(grid, *only);
            }
            [first, ..] => {
                if self.junctions.contains_key(&here) {
                    // A loop led back onto a junction that is still being
                    // worked through.
                    self.back_up(grid);
                    self.status = SolveStatus::Retracing;
                } else {
                    self.junctions.insert(here, vec![*first]);
                    grid.lay_trail(here);
                    self.advance(grid, *first);
                }
            }
        }
    }

    fn retrace(&mut self, grid: &mut Grid, here: Coord, start: Coord, open: &[Direction]) {
        if open.len() > 1 {
            let taken = self.junctions.entry(here).or_default();
            if let Some(dir) = open.iter().copied().find(|dir| !taken.contains(dir)) {
                taken.push(dir);
                grid.lay_trail(here);
                self.status = SolveStatus::Exploring;
                self.advance(grid, dir);
                return;
            }
        }
        self.go_back(grid, here, start);
    }

    fn go_back(&mut self, grid: &mut Grid, here: Coord, start: Coord) {
        if here == start {
            self.status = SolveStatus::Failed;
            debug!(steps = self.steps, "no path to the end");
        } else {
            self.back_up(grid);
        }
    }

    fn advance(&mut self, grid: &mut Grid, dir: Direction) {
        self.history.push(dir);
        self.last_direction = Some(dir);
        grid.move_agent(dir);
    }

    /// Undoes the last forward move and clears the trail under the agent.
    /// With an empty history the agent stays where it is.
    fn back_up(&mut self, grid: &mut Grid) {
        if let Some(dir) = self.history.pop() {
            let back = dir.invert();
            self.last_direction = Some(back);
            grid.move_agent(back);
        }
        if let Some(at) = grid.agent() {
            grid.clear_trail(at);
        }
    }
}
