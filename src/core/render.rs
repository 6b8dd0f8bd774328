//! Read-only text views of a maze, for terminals and logs.
//!
//! Nothing here mutates the grid or the solver; a view can be taken between
//! any two steps.

use crate::grid::{CellType, Coord, Grid};
use crate::solver::{SolveStatus, Solver};

pub const AGENT_SYMBOL: char = '@';
pub const START_SYMBOL: char = 'S';

/// One line per row. The agent is drawn as `@`, the start as `S` while the
/// agent is elsewhere, and every other cell by its [`CellType::symbol`].
pub fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let at = Coord::new(x, y);
            let c = if grid.agent() == Some(at) {
                AGENT_SYMBOL
            } else if grid.start() == Some(at) && grid.cell(at) != CellType::Wall {
                START_SYMBOL
            } else {
                grid.cell(at).symbol()
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Human-readable status, with `(none yet)` before the first step.
pub fn status_label(status: Option<SolveStatus>) -> &'static str {
    match status {
        Some(s) => s.label(),
        None => "(none yet)",
    }
}

/// Status label plus step and path counters.
pub fn status_line(solver: Option<&Solver>) -> String {
    match solver {
        Some(s) => {
            let d = s.diagnostics();
            format!(
                "{:<10} steps={} path={} junctions={}",
                d.status.label(),
                d.steps,
                d.path_len,
                d.junctions
            )
        }
        None => status_label(None).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        let mut g = Grid::open(3, 2).unwrap();
        g.toggle_wall(Coord::new(1, 0)).unwrap();
        g.set_start(Coord::new(0, 0)).unwrap();
        g.set_end(Coord::new(2, 1)).unwrap();
        g
    }

    #[test]
    fn draws_cells_agent_and_start() {
        let mut g = sample();
        assert_eq!(render(&g), "S#.\n..E\n");

        g.place_agent_at_start().unwrap();
        assert_eq!(render(&g), "@#.\n..E\n");

        let mut s = Solver::new(&g).unwrap();
        s.step(&mut g).unwrap();
        assert_eq!(render(&g), "S#.\n@.E\n");
    }

    #[test]
    fn trail_shows_up_while_exploring() {
        let mut g = sample();
        g.place_agent_at_start().unwrap();
        let mut s = Solver::new(&g).unwrap();
        s.step(&mut g).unwrap();
        s.step(&mut g).unwrap();
        assert_eq!(render(&g), "S#.\n+@E\n");
    }

    #[test]
    fn labels_cover_every_status() {
        assert_eq!(status_label(None), "(none yet)");
        assert_eq!(status_label(Some(SolveStatus::Exploring)), "Exploring");
        assert_eq!(status_label(Some(SolveStatus::Retracing)), "Retracing");
        assert_eq!(status_label(Some(SolveStatus::Solved)), "Solved");
        assert_eq!(status_label(Some(SolveStatus::Failed)), "Failed");
    }

    #[test]
    fn status_line_reports_counters() {
        let mut g = sample();
        g.place_agent_at_start().unwrap();
        assert_eq!(status_line(None), "(none yet)");

        let mut s = Solver::new(&g).unwrap();
        s.step(&mut g).unwrap();
        let line = status_line(Some(&s));
        assert!(line.starts_with("Exploring"));
        assert!(line.contains("steps=1"));
        assert!(line.contains("path=1"));
    }
}
