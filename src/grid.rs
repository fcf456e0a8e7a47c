use crate::cell::{Cell, CellId, CellSnapshot, Edge, Mark, Role};
use crate::error::{GridError, Result};
use crate::pathfinding;
use log::{debug, warn};

/// Neighbor offsets in adjacency order: W, E, N, S, SW, SE, NW, NE
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
];

/// Grid graph owning every cell and its precomputed 8-neighbor adjacency.
/// Cells live in row-major order, so a cell's index is `x + y * width`.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    /// Revision number - incremented whenever a cell's role, passability or mark changes
    revision: u64,
}

impl Grid {
    /// Build a `width` x `height` grid with a frozen border ring
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width < 3 || height < 3 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        // Packed indices are computed in i32, so the cell count must fit there too
        let count = match width.checked_mul(height) {
            Some(count) => count as usize,
            None => return Err(GridError::InvalidDimensions { width, height }),
        };

        let mut cells = Vec::with_capacity(count);
        for y in 0..height {
            for x in 0..width {
                let mut cell = Cell::new(CellId::new(x, y));
                if x == 0 || x == width - 1 || y == 0 || y == height - 1 {
                    cell.make_frame();
                }

                let neighbors = NEIGHBOR_OFFSETS
                    .iter()
                    .map(|&(dx, dy)| CellId::new(x + dx, y + dy))
                    .filter(|n| n.x >= 0 && n.x < width && n.y >= 0 && n.y < height)
                    .map(|n| Edge {
                        to: n,
                        weight: cell.id().distance(&n),
                    })
                    .collect();
                cell.set_neighbors(neighbors);

                cells.push(cell);
            }
        }

        debug!("[Grid] built {}x{} grid with {} cells", width, height, cells.len());

        Ok(Grid {
            width,
            height,
            cells,
            revision: 0,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Current revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `id` lies inside the grid
    pub fn contains(&self, id: CellId) -> bool {
        id.x >= 0 && id.x < self.width && id.y >= 0 && id.y < self.height
    }

    /// Convert a cell id to its packed row-major index
    pub fn index_of(&self, id: CellId) -> Option<usize> {
        if self.contains(id) {
            Some((id.x + id.y * self.width) as usize)
        } else {
            None
        }
    }

    /// Convert a packed row-major index back to a cell id
    pub fn id_at(&self, index: usize) -> Option<CellId> {
        self.cells.get(index).map(Cell::id)
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.index_of(id).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, id: CellId) -> Result<&mut Cell> {
        let index = self.index_of(id).ok_or(GridError::UnknownCellId(id))?;
        Ok(&mut self.cells[index])
    }

    /// All cells in construction (row-major) order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn snapshot(&self, id: CellId) -> Result<CellSnapshot> {
        self.cell(id)
            .map(Cell::snapshot)
            .ok_or(GridError::UnknownCellId(id))
    }

    /// Snapshots of every cell in construction order
    pub fn snapshots(&self) -> Vec<CellSnapshot> {
        self.cells.iter().map(Cell::snapshot).collect()
    }

    /// Paint a role onto an interior cell and re-derive its passability.
    /// Returns `Ok(false)` without touching frame cells.
    pub fn set_cell_role(&mut self, id: CellId, role: Role) -> Result<bool> {
        let cell = self.cell_mut(id)?;
        if cell.is_frame() {
            warn!("[Grid] refusing to paint {:?} onto frame cell {}", role, id);
            return Ok(false);
        }

        let passable = role != Role::Wall;
        if cell.role() == role && cell.is_passable() == passable {
            return Ok(true);
        }
        cell.set_role(role);
        cell.set_passable(passable);
        self.revision += 1;
        Ok(true)
    }

    /// Toggle passability of an interior cell. Frame cells stay impassable.
    ///
    /// This overrides the value derived from the cell's role until the next
    /// `set_cell_role` on it, which derives passability from the role again.
    pub fn set_cell_passable(&mut self, id: CellId, passable: bool) -> Result<bool> {
        let cell = self.cell_mut(id)?;
        if cell.is_frame() {
            return Ok(false);
        }

        if cell.is_passable() != passable {
            cell.set_passable(passable);
            self.revision += 1;
        }
        Ok(true)
    }

    /// Set a transient mark. Used by the search; callers normally go through `mark_path`.
    pub fn set_cell_mark(&mut self, id: CellId, mark: Mark) -> Result<()> {
        let cell = self.cell_mut(id)?;
        if cell.mark() != mark {
            cell.set_mark(mark);
            self.revision += 1;
        }
        Ok(())
    }

    /// Mark the cells of a found path, leaving start/end (and any painted role) alone
    pub fn mark_path(&mut self, path: &[CellId]) -> Result<()> {
        for &id in path {
            if self.cell_mut(id)?.role() == Role::Empty {
                self.set_cell_mark(id, Mark::Path)?;
            }
        }
        Ok(())
    }

    /// Reset every `Visited`/`Path` mark back to `None`. Roles are untouched.
    pub fn clear_marks(&mut self) {
        let mut cleared = 0;
        for cell in self.cells.iter_mut() {
            if cell.mark() != Mark::None {
                cell.set_mark(Mark::None);
                cleared += 1;
            }
        }
        if cleared > 0 {
            self.revision += 1;
            debug!("[Grid] cleared {} marks", cleared);
        }
    }

    /// Shortest path from `start` to `end`, `Ok(None)` when the frontier runs dry
    pub fn find_path(&mut self, start: CellId, end: CellId) -> Result<Option<Vec<CellId>>> {
        pathfinding::find_path(self, start, end)
    }

    /// Text picture of the grid, one line per row
    pub fn render_ascii(&self) -> String {
        let mut result = String::with_capacity((self.width as usize + 1) * self.height as usize);

        for y in 0..self.height {
            for x in 0..self.width {
                let on_side = x == 0 || x == self.width - 1;
                let on_edge = y == 0 || y == self.height - 1;
                let symbol = if on_side && on_edge {
                    '+'
                } else if on_side {
                    '|'
                } else if on_edge {
                    '-'
                } else {
                    self.cells[(x + y * self.width) as usize].symbol()
                };
                result.push(symbol);
            }
            result.push('\n');
        }

        result
    }
}
