//! The maze grid: cell types, start, end and the agent position.
//!
//! Cells are stored row-major (`y * width + x`). Anything outside
//! `[0, width) x [0, height)` reads as [`CellType::Wall`], so neighbour
//! lookups near the border never need special cases.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MazeError;

/// One of the four cardinal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Enumeration order used for every tie-break: up, right, down, left.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn invert(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// `(dx, dy)` for one move. `y` grows downwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

}

/// A grid coordinate. Signed so the neighbours of border cells can be named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate one move away. May be off-grid.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellType {
    /// Passable and not on the current exploration path.
    Free,
    Wall,
    /// The goal.
    End,
    /// Passable, but part of the path the solver is currently walking.
    Trail,
}

impl CellType {
    /// Whether the solver may step onto this cell while exploring.
    ///
    /// `Trail` is excluded: the agent never re-enters its own path, which is
    /// what keeps it out of cycles.
    pub fn is_open(self) -> bool {
        matches!(self, CellType::Free | CellType::End)
    }

    /// Single-character form shared by share codes and rendering.
    pub fn symbol(self) -> char {
        match self {
            CellType::Free => '.',
            CellType::Wall => '#',
            CellType::End => 'E',
            CellType::Trail => '+',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(CellType::Free),
            '#' => Some(CellType::Wall),
            'E' => Some(CellType::End),
            '+' => Some(CellType::Trail),
            _ => None,
        }
    }
}

/// Upper bound on cells in one grid, so neither a size option nor foreign
/// input can request an arbitrarily large allocation.
pub const MAX_CELLS: usize = 1 << 20;

/// A rectangular maze with a start, at most one end, and an agent.
///
/// Deserializing goes through the same checks as [`Grid::from_code`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellType>,
    start: Option<Coord>,
    end: Option<Coord>,
    agent: Option<Coord>,
}

impl Grid {
    /// A grid with every cell set to [`CellType::Wall`].
    pub fn new(width: u32, height: u32) -> Result<Self, MazeError> {
        Self::filled(width, height, CellType::Wall)
    }

    /// A grid with every cell set to [`CellType::Free`].
    pub fn open(width: u32, height: u32) -> Result<Self, MazeError> {
        Self::filled(width, height, CellType::Free)
    }

    fn filled(width: u32, height: u32, fill: CellType) -> Result<Self, MazeError> {
        if width < 2 || height < 2 || (width as u64) * (height as u64) > MAX_CELLS as u64 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![fill; (width as usize) * (height as usize)],
            start: None,
            end: None,
            agent: None,
        })
    }

    /// Assembles a grid from decoded parts, enforcing the same invariants as
    /// the public mutators. The agent is left unplaced.
    pub(crate) fn from_parts(
        width: u32,
        height: u32,
        cells: Vec<CellType>,
        start: Option<Coord>,
    ) -> Result<Self, MazeError> {
        if width < 2 || height < 2 {
            return Err(MazeError::corrupt(format!(
                "dimensions {width}x{height} are too small"
            )));
        }
        if (width as u64) * (height as u64) > MAX_CELLS as u64 {
            return Err(MazeError::corrupt(format!(
                "{width}x{height} exceeds {MAX_CELLS} cells"
            )));
        }
        if cells.len() != (width as usize) * (height as usize) {
            return Err(MazeError::corrupt(format!(
                "expected {} cells, found {}",
                (width as usize) * (height as usize),
                cells.len()
            )));
        }

        let mut end = None;
        for (i, cell) in cells.iter().enumerate() {
            if *cell == CellType::End {
                if end.is_some() {
                    return Err(MazeError::corrupt("more than one end cell"));
                }
                end = Some(Coord::new(
                    (i % width as usize) as i32,
                    (i / width as usize) as i32,
                ));
            }
        }

        let grid = Self {
            width,
            height,
            cells,
            start,
            end,
            agent: None,
        };
        if let Some(s) = start {
            if !grid.contains(s) {
                return Err(MazeError::corrupt(format!(
                    "start ({}, {}) is outside the maze",
                    s.x, s.y
                )));
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major cell contents.
    pub fn cells(&self) -> &[CellType] {
        &self.cells
    }

    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    pub fn agent(&self) -> Option<Coord> {
        self.agent
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.x >= 0 && at.y >= 0 && (at.x as u32) < self.width && (at.y as u32) < self.height
    }

    fn idx(&self, at: Coord) -> Option<usize> {
        if !self.contains(at) {
            return None;
        }
        Some((at.y as usize) * (self.width as usize) + (at.x as usize))
    }

    fn idx_or_err(&self, at: Coord) -> Result<usize, MazeError> {
        self.idx(at)
            .ok_or(MazeError::OutOfBounds { x: at.x, y: at.y })
    }

    /// Cell type at `at`; off-grid coordinates are walls.
    pub fn cell(&self, at: Coord) -> CellType {
        match self.idx(at) {
            Some(i) => self.cells[i],
            None => CellType::Wall,
        }
    }

    /// Same as [`Grid::cell`], taking raw coordinates.
    pub fn cell_at(&self, x: i32, y: i32) -> CellType {
        self.cell(Coord::new(x, y))
    }

    /// The four neighbour cell types of `at`, in [`Direction::ALL`] order.
    pub fn neighbors(&self, at: Coord) -> [CellType; 4] {
        Direction::ALL.map(|dir| self.cell(at.step(dir)))
    }

    /// Records the start coordinate. The cell's type is not touched; callers
    /// keep it passable.
    pub fn set_start(&mut self, at: Coord) -> Result<(), MazeError> {
        self.idx_or_err(at)?;
        self.start = Some(at);
        Ok(())
    }

    /// Makes `at` the single end cell. A previous end cell becomes free.
    pub fn set_end(&mut self, at: Coord) -> Result<(), MazeError> {
        let i = self.idx_or_err(at)?;
        if let Some(old) = self.end.and_then(|old| self.idx(old)) {
            self.cells[old] = CellType::Free;
        }
        self.cells[i] = CellType::End;
        self.end = Some(at);
        Ok(())
    }

    pub fn place_agent_at_start(&mut self) -> Result<(), MazeError> {
        let start = self.start.ok_or(MazeError::UninitializedStart)?;
        self.agent = Some(start);
        Ok(())
    }

    /// Puts the agent back on the start and wipes every trail cell.
    ///
    /// Any solver that was stepping this grid is stale afterwards and must be
    /// replaced.
    pub fn reset_agent(&mut self) -> Result<(), MazeError> {
        self.place_agent_at_start()?;
        for cell in self.cells.iter_mut() {
            if *cell == CellType::Trail {
                *cell = CellType::Free;
            }
        }
        Ok(())
    }

    /// Flips a cell between free and wall. End and trail cells are left
    /// alone. Returns whether the cell changed.
    pub fn toggle_wall(&mut self, at: Coord) -> Result<bool, MazeError> {
        let i = self.idx_or_err(at)?;
        let next = match self.cells[i] {
            CellType::Free => CellType::Wall,
            CellType::Wall => CellType::Free,
            CellType::End | CellType::Trail => return Ok(false),
        };
        self.cells[i] = next;
        Ok(true)
    }

    /// Sets a free or wall cell to the requested state. Returns whether the
    /// cell changed.
    pub fn paint(&mut self, at: Coord, wall: bool) -> Result<bool, MazeError> {
        let i = self.idx_or_err(at)?;
        let want = if wall { CellType::Wall } else { CellType::Free };
        let current = self.cells[i];
        match current {
            CellType::Free | CellType::Wall if current != want => {
                self.cells[i] = want;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Marks a free cell as part of the solver's path.
    ///
    /// Only `Free -> Trail` happens here; a start cell painted over as a wall
    /// keeps its type.
    pub fn lay_trail(&mut self, at: Coord) {
        if let Some(i) = self.idx(at) {
            if self.cells[i] == CellType::Free {
                self.cells[i] = CellType::Trail;
            }
        }
    }

    /// Undoes [`Grid::lay_trail`]: `Trail -> Free`, anything else unchanged.
    pub fn clear_trail(&mut self, at: Coord) {
        if let Some(i) = self.idx(at) {
            if self.cells[i] == CellType::Trail {
                self.cells[i] = CellType::Free;
            }
        }
    }

    /// Overwrites a cell without any contract checks. Used by generators.
    pub(crate) fn set_cell(&mut self, at: Coord, cell: CellType) {
        if let Some(i) = self.idx(at) {
            self.cells[i] = cell;
        }
    }

    /// Moves the agent one cell. Bounds are the caller's responsibility.
    pub(crate) fn move_agent(&mut self, dir: Direction) {
        if let Some(agent) = self.agent {
            self.agent = Some(agent.step(dir));
        }
    }

    pub fn trail_len(&self) -> usize {
        self.cells.iter().filter(|c| **c == CellType::Trail).count()
    }

    /// Equal dimensions, start and cells. The agent is ignored.
    pub fn same_layout(&self, other: &Grid) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.start == other.start
            && self.cells == other.cells
    }

    pub(crate) fn replace_with(&mut self, other: Grid) {
        *self = other;
    }
}

/// Field-for-field mirror of [`Grid`], validated before it becomes one.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct GridRepr {
    width: u32,
    height: u32,
    cells: Vec<CellType>,
    start: Option<Coord>,
    end: Option<Coord>,
    agent: Option<Coord>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = MazeError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let mut grid = Grid::from_parts(repr.width, repr.height, repr.cells, repr.start)?;
        if repr.end != grid.end {
            return Err(MazeError::corrupt("end does not match the end cell"));
        }
        if let Some(agent) = repr.agent {
            if !grid.contains(agent) {
                return Err(MazeError::corrupt(format!(
                    "agent ({}, {}) is outside the maze",
                    agent.x, agent.y
                )));
            }
        }
        grid.agent = repr.agent;
        Ok(grid)
    }
}
