//! Seeded random maze generation.
//!
//! Rooms sit on the even-coordinate lattice; the odd cells between them are
//! walls until the carver knocks them out. A randomized depth-first walk
//! yields a perfect maze (exactly one route between any two rooms). Braiding
//! then opens a fraction of the remaining lattice walls to add loops.

use crate::error::MazeError;
use crate::grid::{CellType, Coord, Direction, Grid};
use crate::prng::Prng;

/// Carves a `width` x `height` maze with the start at (0, 0) and the end at
/// the opposite corner. The end is always reachable.
///
/// `braid` is the chance (clamped to `0..=1`) that each wall left between
/// two rooms is opened afterwards.
pub fn carve(width: u32, height: u32, seed: u64, braid: f32) -> Result<Grid, MazeError> {
    let mut grid = Grid::new(width, height)?;
    let rooms_w = (width as i32 + 1) / 2;
    let rooms_h = (height as i32 + 1) / 2;
    let room_idx = |r: Coord| (r.y as usize) * (rooms_w as usize) + (r.x as usize);
    let in_lattice = |r: Coord| r.x >= 0 && r.y >= 0 && r.x < rooms_w && r.y < rooms_h;

    let mut rng = Prng::new(seed ^ 0xA5A5_5A5Au64);
    let mut visited = vec![false; (rooms_w as usize) * (rooms_h as usize)];
    let mut stack = vec![Coord::new(0, 0)];
    visited[0] = true;
    grid.set_cell(Coord::new(0, 0), CellType::Free);

    while let Some(&room) = stack.last() {
        let mut choices = [Direction::Up; 4];
        let mut n = 0usize;
        for dir in Direction::ALL {
            let next = room.step(dir);
            if in_lattice(next) && !visited[room_idx(next)] {
                choices[n] = dir;
                n += 1;
            }
        }

        if n == 0 {
            stack.pop();
            continue;
        }

        let dir = choices[rng.gen_range_usize(0, n)];
        let next = room.step(dir);
        let cell = Coord::new(room.x * 2, room.y * 2);
        grid.set_cell(cell.step(dir), CellType::Free);
        grid.set_cell(cell.step(dir).step(dir), CellType::Free);
        visited[room_idx(next)] = true;
        stack.push(next);
    }

    let braid = braid.clamp(0.0, 1.0);
    if braid > 0.0 {
        for wall in lattice_walls(width, height) {
            if rng.next_f32_01() < braid {
                grid.set_cell(wall, CellType::Free);
            }
        }
    }

    // The far corner is not a room when a dimension is even; join it to the
    // last room with a short corridor along the right edge.
    let last = Coord::new((rooms_w - 1) * 2, (rooms_h - 1) * 2);
    let end = Coord::new(width as i32 - 1, height as i32 - 1);
    for x in last.x..=end.x {
        grid.set_cell(Coord::new(x, last.y), CellType::Free);
    }
    for y in last.y..=end.y {
        grid.set_cell(Coord::new(end.x, y), CellType::Free);
    }

    grid.set_start(Coord::new(0, 0))?;
    grid.set_end(end)?;
    grid.place_agent_at_start()?;
    Ok(grid)
}

/// Cells that separate two horizontally or vertically adjacent rooms.
fn lattice_walls(width: u32, height: u32) -> Vec<Coord> {
    let (w, h) = (width as i32, height as i32);
    let mut out = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let between_columns = x % 2 == 1 && y % 2 == 0 && x + 1 < w;
            let between_rows = x % 2 == 0 && y % 2 == 1 && y + 1 < h;
            if between_columns || between_rows {
                out.push(Coord::new(x, y));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{SolveStatus, Solver};

    fn open_walls(g: &Grid) -> usize {
        lattice_walls(g.width(), g.height())
            .into_iter()
            .filter(|c| g.cell(*c) != CellType::Wall)
            .count()
    }

    #[test]
    fn carving_is_deterministic_per_seed() {
        let a = carve(15, 11, 123, 0.1).unwrap();
        let b = carve(15, 11, 123, 0.1).unwrap();
        assert_eq!(a, b);

        let c = carve(15, 11, 124, 0.1).unwrap();
        assert!(!a.same_layout(&c));
    }

    #[test]
    fn carved_mazes_are_always_solvable() {
        for w in 2..12 {
            for h in 2..12 {
                let mut g = carve(w, h, (w * 31 + h) as u64, 0.0).unwrap();
                assert_eq!(g.start(), Some(Coord::new(0, 0)));
                assert_eq!(g.end(), Some(Coord::new(w as i32 - 1, h as i32 - 1)));
                assert_eq!(g.agent(), g.start());

                let mut s = Solver::new(&g).unwrap();
                assert_eq!(s.run(&mut g), Ok(SolveStatus::Solved), "{w}x{h}");
            }
        }
    }

    #[test]
    fn unbraided_maze_is_a_tree() {
        let g = carve(13, 9, 7, 0.0).unwrap();
        let rooms = 7 * 5;
        assert_eq!(open_walls(&g), rooms - 1);
    }

    #[test]
    fn braiding_adds_loops() {
        let perfect = carve(21, 21, 9, 0.0).unwrap();
        let braided = carve(21, 21, 9, 0.5).unwrap();
        assert!(open_walls(&braided) > open_walls(&perfect));

        let full = carve(21, 21, 9, 1.0).unwrap();
        assert_eq!(open_walls(&full), lattice_walls(21, 21).len());
    }

    #[test]
    fn rejects_tiny_dimensions() {
        assert!(matches!(
            carve(1, 8, 0, 0.0),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }
}
