//! Editor session: one grid, the solver walking it, and the edit/watch mode.
//!
//! The session is the only place that creates solvers. Whenever the agent
//! goes back to the start the old solver is dropped with it, so junction
//! memory never outlives the walk it belongs to.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::MazeError;
use crate::generate;
use crate::grid::{Coord, Grid};
use crate::render;
use crate::solver::{SolveStatus, Solver};

/// How a fresh maze is laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Layout {
    /// Every cell a wall except the start and end; the user paints paths.
    Walled,
    /// Every cell free; the user paints walls.
    Open,
    /// A generated maze. See [`generate::carve`].
    Carved { seed: u64, braid: f32 },
}

/// Settings for building a maze.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MazeConfig {
    pub width: u32,
    pub height: u32,
    pub layout: Layout,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            layout: Layout::Open,
        }
    }
}

impl MazeConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn carved(self, seed: u64, braid: f32) -> Self {
        self.with_layout(Layout::Carved { seed, braid })
    }

    /// Builds the grid: start at the top-left, end at the bottom-right, agent
    /// on the start.
    pub fn build(&self) -> Result<Grid, MazeError> {
        let (w, h) = (self.width, self.height);
        let mut grid = match self.layout {
            Layout::Carved { seed, braid } => return generate::carve(w, h, seed, braid),
            Layout::Walled => Grid::new(w, h)?,
            Layout::Open => Grid::open(w, h)?,
        };
        let start = Coord::new(0, 0);
        grid.paint(start, false)?;
        grid.set_start(start)?;
        grid.set_end(Coord::new(w as i32 - 1, h as i32 - 1))?;
        grid.place_agent_at_start()?;
        Ok(grid)
    }
}

/// Whether the user is painting or watching a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Editing,
    Watching,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: MazeConfig,
    grid: Grid,
    solver: Option<Solver>,
    mode: UiMode,
}

impl Session {
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        let grid = config.build()?;
        Ok(Self {
            config,
            grid,
            solver: None,
            mode: UiMode::Editing,
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn solver(&self) -> Option<&Solver> {
        self.solver.as_ref()
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    /// `None` until the first step.
    pub fn status(&self) -> Option<SolveStatus> {
        self.solver.as_ref().map(Solver::status)
    }

    pub fn status_label(&self) -> &'static str {
        render::status_label(self.status())
    }

    pub fn done(&self) -> bool {
        self.status().is_some_and(SolveStatus::is_terminal)
    }

    /// Flips a cell between free and wall. Ignored unless editing.
    pub fn toggle_tile(&mut self, at: Coord) -> Result<bool, MazeError> {
        if self.mode != UiMode::Editing {
            return Ok(false);
        }
        self.grid.toggle_wall(at)
    }

    /// One solver step. The first call leaves editing mode.
    pub fn step(&mut self) -> Result<SolveStatus, MazeError> {
        self.mode = UiMode::Watching;
        let mut solver = match self.solver.take() {
            Some(s) => s,
            None => Solver::new(&self.grid)?,
        };
        let before = solver.status();
        let stepped = solver.step(&mut self.grid);
        self.solver = Some(solver);
        let status = stepped?;
        if status != before {
            debug!(from = before.label(), to = status.label(), "status changed");
        }
        Ok(status)
    }

    /// Steps until the solve finishes.
    pub fn solve_to_end(&mut self) -> Result<SolveStatus, MazeError> {
        loop {
            let status = self.step()?;
            if status.is_terminal() {
                info!(
                    status = status.label(),
                    steps = self.solver.as_ref().map_or(0, Solver::steps),
                    "solve finished"
                );
                return Ok(status);
            }
        }
    }

    /// Agent back to the start, trail wiped, solver discarded.
    pub fn reset_agent(&mut self) -> Result<(), MazeError> {
        self.grid.reset_agent()?;
        self.solver = None;
        self.mode = UiMode::Editing;
        Ok(())
    }

    /// Throws the maze away and builds a new one from the config.
    pub fn full_reset(&mut self) -> Result<(), MazeError> {
        self.grid = self.config.build()?;
        self.solver = None;
        self.mode = UiMode::Editing;
        Ok(())
    }

    /// Switches to a carved maze with a new seed, keeping size and braid.
    pub fn regenerate(&mut self, seed: u64) -> Result<(), MazeError> {
        let braid = match self.config.layout {
            Layout::Carved { braid, .. } => braid,
            Layout::Walled | Layout::Open => 0.0,
        };
        self.config.layout = Layout::Carved { seed, braid };
        self.full_reset()
    }

    /// Share code for the current maze.
    pub fn save(&self) -> String {
        self.grid.serialize()
    }

    /// Loads a share code. On error nothing changes.
    pub fn load(&mut self, code: &str) -> Result<(), MazeError> {
        let mut grid = self.grid.clone();
        grid.deserialize(code)?;
        grid.place_agent_at_start()?;
        self.config.width = grid.width();
        self.config.height = grid.height();
        self.grid = grid;
        self.solver = None;
        self.mode = UiMode::Editing;
        Ok(())
    }

    /// The grid as text followed by a status line.
    pub fn render(&self) -> String {
        let mut out = render::render(&self.grid);
        out.push_str(&render::status_line(self.solver.as_ref()));
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellType;

    fn open(w: u32, h: u32) -> Session {
        Session::new(MazeConfig::default().with_size(w, h)).unwrap()
    }

    #[test]
    fn setup_places_start_end_and_agent() {
        let s = open(4, 3);
        assert_eq!(s.grid().start(), Some(Coord::new(0, 0)));
        assert_eq!(s.grid().end(), Some(Coord::new(3, 2)));
        assert_eq!(s.grid().agent(), Some(Coord::new(0, 0)));
        assert_eq!(s.mode(), UiMode::Editing);
        assert_eq!(s.status(), None);
        assert_eq!(s.status_label(), "(none yet)");
    }

    #[test]
    fn walled_layout_keeps_start_passable() {
        let cfg = MazeConfig::default()
            .with_size(3, 3)
            .with_layout(Layout::Walled);
        let s = Session::new(cfg).unwrap();
        assert_eq!(s.grid().cell_at(0, 0), CellType::Free);
        assert_eq!(s.grid().cell_at(1, 0), CellType::Wall);
        assert_eq!(s.grid().cell_at(2, 2), CellType::End);
    }

    #[test]
    fn painting_is_locked_while_watching() {
        let mut s = open(3, 3);
        assert_eq!(s.toggle_tile(Coord::new(1, 1)), Ok(true));
        s.step().unwrap();
        assert_eq!(s.mode(), UiMode::Watching);
        assert_eq!(s.toggle_tile(Coord::new(1, 0)), Ok(false));
        assert_eq!(s.grid().cell_at(1, 1), CellType::Wall);
    }

    #[test]
    fn reset_agent_starts_a_fresh_solve() {
        let mut s = open(5, 5);
        for _ in 0..4 {
            s.step().unwrap();
        }
        assert!(s.grid().trail_len() > 0);

        s.reset_agent().unwrap();
        assert_eq!(s.grid().trail_len(), 0);
        assert_eq!(s.grid().agent(), s.grid().start());
        assert!(s.solver().is_none());
        assert_eq!(s.mode(), UiMode::Editing);

        assert_eq!(s.solve_to_end(), Ok(SolveStatus::Solved));
    }

    #[test]
    fn blocked_maze_fails_and_regenerate_recovers() {
        let mut s = open(4, 4);
        s.toggle_tile(Coord::new(3, 2)).unwrap();
        s.toggle_tile(Coord::new(2, 3)).unwrap();
        assert_eq!(s.solve_to_end(), Ok(SolveStatus::Failed));
        assert!(s.done());
        assert_eq!(s.status_label(), "Failed");

        s.regenerate(77).unwrap();
        assert!(matches!(
            s.config().layout,
            Layout::Carved { seed: 77, .. }
        ));
        assert_eq!(s.status(), None);
        assert_eq!(s.solve_to_end(), Ok(SolveStatus::Solved));
    }

    #[test]
    fn full_reset_discards_painting() {
        let mut s = open(4, 4);
        s.toggle_tile(Coord::new(1, 1)).unwrap();
        s.full_reset().unwrap();
        assert_eq!(s.grid().cell_at(1, 1), CellType::Free);
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut a = Session::new(MazeConfig::default().with_size(11, 7).carved(5, 0.1)).unwrap();
        let code = a.save();

        let mut b = open(3, 3);
        b.step().unwrap();
        b.load(&code).unwrap();
        assert!(b.grid().same_layout(a.grid()));
        assert_eq!(b.grid().agent(), b.grid().start());
        assert_eq!(b.config().width, 11);
        assert!(b.solver().is_none());

        assert_eq!(a.solve_to_end(), b.solve_to_end());
    }

    #[test]
    fn corrupt_load_leaves_session_alone() {
        let mut s = open(3, 3);
        s.toggle_tile(Coord::new(1, 1)).unwrap();
        let before = s.grid().clone();
        assert!(matches!(s.load("nope"), Err(MazeError::CorruptData(_))));
        assert_eq!(s.grid(), &before);
    }

    #[test]
    fn load_without_start_is_rejected() {
        let mut s = open(3, 3);
        let before = s.grid().clone();
        assert_eq!(s.load("2x2@-:4."), Err(MazeError::UninitializedStart));
        assert_eq!(s.grid(), &before);
    }

    #[test]
    fn render_appends_status() {
        let mut s = open(2, 2);
        assert!(s.render().ends_with("(none yet)\n"));
        s.solve_to_end().unwrap();
        assert!(s.render().contains("Solved"));
    }
}
