//! Painting session around a grid: tool selection, single start/end bookkeeping,
//! running the search and resetting.

use crate::cell::{CellId, Role};
use crate::error::Result;
use crate::frontier::FrontierKind;
use crate::grid::Grid;
use crate::pathfinding::{find_path_with, format_path};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Paint tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Start,
    End,
    #[default]
    Wall,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Start, Tool::End, Tool::Wall, Tool::Eraser];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Start => "start",
            Tool::End => "end",
            Tool::Wall => "wall",
            Tool::Eraser => "eraser",
        }
    }

    /// Start/end are placed on click; wall/eraser paint while dragging
    pub fn paints_on_drag(self) -> bool {
        matches!(self, Tool::Wall | Tool::Eraser)
    }
}

/// Result of running the search from the sandbox
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Start or end has not been placed yet
    MissingEndpoints,
    NoPath,
    Found(Vec<CellId>),
}

/// Grid plus the bookkeeping the painting UI needs
pub struct Sandbox {
    grid: Grid,
    tool: Tool,
    start: Option<CellId>,
    end: Option<CellId>,
    frontier: FrontierKind,
    last_path: Option<Vec<CellId>>,
}

impl Sandbox {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Ok(Sandbox {
            grid: Grid::new(width, height)?,
            tool: Tool::default(),
            start: None,
            end: None,
            frontier: FrontierKind::default(),
            last_path: None,
        })
    }

    pub fn with_frontier(mut self, frontier: FrontierKind) -> Self {
        self.frontier = frontier;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    pub fn end(&self) -> Option<CellId> {
        self.end
    }

    pub fn last_path(&self) -> Option<&[CellId]> {
        self.last_path.as_deref()
    }

    /// Apply the current tool to `id`. Returns whether the cell changed.
    pub fn paint(&mut self, id: CellId) -> Result<bool> {
        let role = self.grid.snapshot(id)?.role;
        if self.grid.cell(id).is_some_and(|c| c.is_frame()) {
            return Ok(false);
        }

        self.grid.clear_marks();
        self.last_path = None;

        match self.tool {
            Tool::Start | Tool::End => {
                let (slot, new_role) = match self.tool {
                    Tool::Start => (&mut self.start, Role::Start),
                    _ => (&mut self.end, Role::End),
                };
                if slot.is_some() || role != Role::Empty {
                    warn!(
                        "[Sandbox] cannot place {} at {}: slot taken or cell is {:?}",
                        self.tool.name(),
                        id,
                        role
                    );
                    return Ok(false);
                }
                *slot = Some(id);
                self.grid.set_cell_role(id, new_role)
            }
            Tool::Wall | Tool::Eraser => {
                let new_role = if self.tool == Tool::Wall {
                    Role::Wall
                } else {
                    Role::Empty
                };
                if role == new_role {
                    return Ok(false);
                }
                self.forget_endpoint(id);
                self.grid.set_cell_role(id, new_role)
            }
        }
    }

    fn forget_endpoint(&mut self, id: CellId) {
        if self.start == Some(id) {
            self.start = None;
        }
        if self.end == Some(id) {
            self.end = None;
        }
    }

    /// Clear old marks, search from start to end and mark the path found
    pub fn run(&mut self) -> Result<RunOutcome> {
        self.grid.clear_marks();
        self.last_path = None;

        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                warn!("[Sandbox] place both a start and an end before searching");
                return Ok(RunOutcome::MissingEndpoints);
            }
        };

        match find_path_with(&mut self.grid, start, end, self.frontier)? {
            Some(path) => {
                self.grid.mark_path(&path)?;
                info!("[Sandbox] path: {}", format_path(&path));
                self.last_path = Some(path.clone());
                Ok(RunOutcome::Found(path))
            }
            None => {
                info!("[Sandbox] no path from {} to {}", start, end);
                Ok(RunOutcome::NoPath)
            }
        }
    }

    /// Remove search marks without touching painted cells
    pub fn clear_marks(&mut self) {
        self.grid.clear_marks();
        self.last_path = None;
    }

    /// Replace the grid with a fresh one of the same size
    pub fn reset(&mut self) -> Result<()> {
        self.grid = Grid::new(self.grid.width(), self.grid.height())?;
        self.start = None;
        self.end = None;
        self.last_path = None;
        Ok(())
    }
}
