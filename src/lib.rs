pub mod action_log;
pub mod cell;
pub mod config;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod pathfinding;
pub mod sandbox;

pub use cell::{Cell, CellId, CellSnapshot, Edge, Mark, Role};
pub use error::{GridError, ParseCellIdError};
pub use frontier::{Frontier, FrontierKind, HeapFrontier, ScanFrontier};
pub use grid::Grid;
pub use pathfinding::{a_star, find_path, find_path_with, heuristic, reconstruct_path};
pub use sandbox::{RunOutcome, Sandbox, Tool};
