//! Share codes: a compact, versionless text form of a grid.
//!
//! ```text
//! {width}x{height}@{start_x},{start_y}:{body}
//! ```
//!
//! `@-` stands for "no start". The body lists cells row-major, run-length
//! encoded as `[count]symbol` with the count left out for single cells.
//! Symbols are those of [`CellType::symbol`]. The agent is not part of the
//! code.

use crate::error::MazeError;
use crate::grid::{CellType, Coord, Grid, MAX_CELLS};

impl Grid {
    /// Encodes dimensions, start and every cell as a share code.
    pub fn serialize(&self) -> String {
        let mut out = format!("{}x{}@", self.width(), self.height());
        match self.start() {
            Some(s) => out.push_str(&format!("{},{}", s.x, s.y)),
            None => out.push('-'),
        }
        out.push(':');

        let mut cells = self.cells().iter().copied().peekable();
        while let Some(cell) = cells.next() {
            let mut run = 1usize;
            while cells.peek() == Some(&cell) {
                cells.next();
                run += 1;
            }
            if run > 1 {
                out.push_str(&run.to_string());
            }
            out.push(cell.symbol());
        }
        out
    }

    /// Replaces this grid's dimensions, cells, end and start with the ones
    /// in `code`.
    ///
    /// The agent is cleared; call [`Grid::place_agent_at_start`] afterwards.
    /// On error the grid is left exactly as it was.
    pub fn deserialize(&mut self, code: &str) -> Result<(), MazeError> {
        let decoded = decode(code)?;
        self.replace_with(decoded);
        Ok(())
    }

    /// Decodes a share code into a new grid, with the agent on the start if
    /// the code has one.
    pub fn from_code(code: &str) -> Result<Grid, MazeError> {
        let mut grid = decode(code)?;
        if grid.start().is_some() {
            grid.place_agent_at_start()?;
        }
        Ok(grid)
    }
}

fn decode(code: &str) -> Result<Grid, MazeError> {
    let code = code.trim();
    let (header, body) = code
        .split_once(':')
        .ok_or_else(|| MazeError::corrupt("missing ':' after header"))?;
    let (dims, start) = header
        .split_once('@')
        .ok_or_else(|| MazeError::corrupt("missing '@' before start"))?;
    let (w, h) = dims
        .split_once('x')
        .ok_or_else(|| MazeError::corrupt("dimensions must look like WxH"))?;
    let width = parse_num::<u32>(w, "width")?;
    let height = parse_num::<u32>(h, "height")?;

    let total = (width as u64) * (height as u64);
    if total > MAX_CELLS as u64 {
        return Err(MazeError::corrupt(format!(
            "{width}x{height} exceeds {MAX_CELLS} cells"
        )));
    }
    let total = total as usize;

    let start = if start == "-" {
        None
    } else {
        let (sx, sy) = start
            .split_once(',')
            .ok_or_else(|| MazeError::corrupt("start must look like X,Y"))?;
        Some(Coord::new(
            parse_num::<i32>(sx, "start x")?,
            parse_num::<i32>(sy, "start y")?,
        ))
    };

    let mut cells = Vec::with_capacity(total);
    let mut run: Option<usize> = None;
    for c in body.chars() {
        if let Some(d) = c.to_digit(10) {
            let next = run.unwrap_or(0) * 10 + d as usize;
            if next > total {
                return Err(MazeError::corrupt("run length exceeds the maze size"));
            }
            run = Some(next);
            continue;
        }
        let cell = CellType::from_symbol(c)
            .ok_or_else(|| MazeError::corrupt(format!("unknown cell symbol {c:?}")))?;
        let n = run.take().unwrap_or(1);
        if n == 0 {
            return Err(MazeError::corrupt("zero-length run"));
        }
        if cells.len() + n > total {
            return Err(MazeError::corrupt("more cells than the maze holds"));
        }
        cells.extend(std::iter::repeat(cell).take(n));
    }
    if run.is_some() {
        return Err(MazeError::corrupt("run length without a cell symbol"));
    }

    Grid::from_parts(width, height, cells, start)
}

fn parse_num<T: std::str::FromStr>(s: &str, what: &str) -> Result<T, MazeError> {
    s.parse::<T>()
        .map_err(|_| MazeError::corrupt(format!("bad {what}: {s:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::carve;
    use crate::solver::Solver;

    fn small() -> Grid {
        let mut g = Grid::open(3, 2).unwrap();
        g.set_start(Coord::new(0, 0)).unwrap();
        g.set_end(Coord::new(2, 1)).unwrap();
        g.place_agent_at_start().unwrap();
        g
    }

    #[test]
    fn encodes_runs_compactly() {
        assert_eq!(small().serialize(), "3x2@0,0:5.E");

        let mut g = small();
        g.toggle_wall(Coord::new(1, 0)).unwrap();
        g.toggle_wall(Coord::new(2, 0)).unwrap();
        assert_eq!(g.serialize(), "3x2@0,0:.2#2.E");
    }

    #[test]
    fn round_trip_preserves_layout() {
        let mut g = carve(17, 12, 3, 0.2).unwrap();
        // Stop mid-solve so the code carries trail cells too.
        let mut s = Solver::new(&g).unwrap();
        while s.steps() < 25 || g.trail_len() == 0 {
            s.step(&mut g).unwrap();
        }
        assert!(!s.done());

        let back = Grid::from_code(&g.serialize()).unwrap();
        assert!(back.same_layout(&g));
        assert_eq!(back.end(), g.end());
        assert_eq!(back.agent(), back.start());
    }

    #[test]
    fn missing_start_round_trips() {
        let mut g = Grid::new(2, 3).unwrap();
        g.set_end(Coord::new(1, 2)).unwrap();
        let code = g.serialize();
        assert!(code.starts_with("2x3@-:"));

        let back = Grid::from_code(&code).unwrap();
        assert_eq!(back.start(), None);
        assert_eq!(back.agent(), None);
        assert!(back.same_layout(&g));
    }

    #[test]
    fn deserialize_replaces_everything_but_the_agent() {
        let source = carve(9, 7, 1, 0.0).unwrap();
        let mut g = small();
        g.deserialize(&source.serialize()).unwrap();
        assert_eq!(g.width(), 9);
        assert_eq!(g.height(), 7);
        assert!(g.same_layout(&source));
        assert_eq!(g.agent(), None);
        g.place_agent_at_start().unwrap();
        assert_eq!(g, source);
    }

    #[test]
    fn rejects_corrupt_codes_without_touching_the_grid() {
        let bad = [
            "",
            "garbage",
            "3x2@0,0",
            "3x2-0,0:6.",
            "3by2@0,0:6.",
            "1x2@0,0:2.",
            "3x2@0,0:5.",
            "3x2@0,0:7.",
            "3x2@0,0:6",
            "3x2@0,0:4.?.",
            "3x2@0,0:0.6.",
            "3x2@3,0:6.",
            "3x2@0:6.",
            "3x2@0,0:4.2E",
            "99999x99999@0,0:.",
            "3x2@0,0:99999999999999999999.",
        ];
        for code in bad {
            let mut g = small();
            let before = g.clone();
            let err = g.deserialize(code).unwrap_err();
            assert!(matches!(err, MazeError::CorruptData(_)), "{code:?}: {err}");
            assert_eq!(g, before);
        }
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let g = Grid::from_code("  3x2@0,0:5.E\n").unwrap();
        assert!(g.same_layout(&small()));
    }
}
