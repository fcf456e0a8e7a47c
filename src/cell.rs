use crate::error::ParseCellIdError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub x: i32,
    pub y: i32,
}

impl CellId {
    pub fn new(x: i32, y: i32) -> Self {
        CellId { x, y }
    }

    /// Euclidean distance to another position
    pub fn distance(&self, other: &CellId) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

// Row-major, so sorted ids come out in construction order
impl Ord for CellId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then_with(|| self.x.cmp(&other.x))
    }
}

impl PartialOrd for CellId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| ParseCellIdError::Format(s.to_string()))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| ParseCellIdError::Coordinate(part.trim().to_string()))
        };

        Ok(CellId::new(parse(x)?, parse(y)?))
    }
}

/// What the user painted on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Empty,
    Start,
    End,
    Wall,
}

impl Role {
    pub fn symbol(self) -> char {
        match self {
            Role::Empty => ' ',
            Role::Start => '&',
            Role::End => '#',
            Role::Wall => '@',
        }
    }
}

/// Transient annotation left by the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    #[default]
    None,
    Visited,
    Path,
}

impl Mark {
    /// Display character, `None` when unmarked
    pub fn symbol(self) -> Option<char> {
        match self {
            Mark::None => None,
            Mark::Visited => Some(';'),
            Mark::Path => Some('$'),
        }
    }
}

/// Outgoing edge to a neighboring cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: CellId,
    pub weight: f64,
}

/// A single grid position with its role, search mark and fixed adjacency
#[derive(Debug, Clone)]
pub struct Cell {
    id: CellId,
    neighbors: Vec<Edge>,
    role: Role,
    mark: Mark,
    passable: bool,
    is_frame: bool,
}

impl Cell {
    pub fn new(id: CellId) -> Self {
        Cell {
            id,
            neighbors: Vec::new(),
            role: Role::Empty,
            mark: Mark::None,
            passable: true,
            is_frame: false,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn neighbors(&self) -> &[Edge] {
        &self.neighbors
    }

    /// Weight of the edge to `id`, if `id` is a neighbor
    pub fn weight_to(&self, id: CellId) -> Option<f64> {
        self.neighbors.iter().find(|e| e.to == id).map(|e| e.weight)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Set the role; global start/end uniqueness is the caller's business
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn set_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    pub fn is_passable(&self) -> bool {
        self.passable
    }

    pub fn set_passable(&mut self, passable: bool) {
        self.passable = passable;
    }

    pub fn is_frame(&self) -> bool {
        self.is_frame
    }

    /// Freeze this cell as part of the border ring
    pub(crate) fn make_frame(&mut self) {
        self.is_frame = true;
        self.passable = false;
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: Vec<Edge>) {
        self.neighbors = neighbors;
    }

    /// Character shown for this cell: the mark wins over the role
    pub fn symbol(&self) -> char {
        self.mark.symbol().unwrap_or_else(|| self.role.symbol())
    }

    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            id: self.id,
            role: self.role,
            mark: self.mark,
            passable: self.passable,
            is_frame: self.is_frame,
        }
    }
}

/// Copy of a cell's observable state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSnapshot {
    pub id: CellId,
    pub role: Role,
    pub mark: Mark,
    pub passable: bool,
    pub is_frame: bool,
}
