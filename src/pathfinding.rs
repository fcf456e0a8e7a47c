use crate::cell::{CellId, Mark};
use crate::error::{GridError, Result};
use crate::frontier::{Frontier, FrontierKind, HeapFrontier, ScanFrontier};
use crate::grid::Grid;
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// Taxicab distance between two cells.
///
/// This overestimates diagonal steps (2 instead of sqrt(2)), so the search favours
/// expanding toward the goal over strict cost optimality.
pub fn heuristic(a: CellId, b: CellId) -> f64 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as f64
}

/// Find a path using the default linear-scan frontier
pub fn find_path(grid: &mut Grid, start: CellId, end: CellId) -> Result<Option<Vec<CellId>>> {
    a_star(grid, start, end, ScanFrontier::new())
}

/// Find a path using the frontier picked by `kind`
pub fn find_path_with(
    grid: &mut Grid,
    start: CellId,
    end: CellId,
    kind: FrontierKind,
) -> Result<Option<Vec<CellId>>> {
    match kind {
        FrontierKind::Scan => a_star(grid, start, end, ScanFrontier::new()),
        FrontierKind::Heap => a_star(grid, start, end, HeapFrontier::new()),
    }
}

/// A* search from `start` to `end` over passable cells.
///
/// A cell enters the open set once, with the f-score it had at that moment; later
/// g-score improvements update `came_from` but not its place in the frontier.
/// Cells entering the open set are marked `Visited` (except `start` and `end`).
/// Returns `Ok(None)` when the open set empties without reaching `end`, and
/// `UnknownCellId` when either endpoint is outside the grid.
pub fn a_star<F: Frontier>(
    grid: &mut Grid,
    start: CellId,
    end: CellId,
    mut open: F,
) -> Result<Option<Vec<CellId>>> {
    for id in [start, end] {
        if !grid.contains(id) {
            return Err(GridError::UnknownCellId(id));
        }
    }

    debug!("[A*] START: {} -> {}", start, end);

    let mut closed: HashSet<CellId> = HashSet::new();
    let mut g_score: HashMap<CellId, f64> = HashMap::new();
    let mut came_from: HashMap<CellId, CellId> = HashMap::new();

    g_score.insert(start, 0.0);
    open.insert_or_update(start, heuristic(start, end));

    let mut expanded = 0usize;
    while let Some(current) = open.extract_min() {
        if current == end {
            let path = reconstruct_path(&came_from, current);
            debug!(
                "[A*] FOUND PATH: {} cells after {} expansions",
                path.len(),
                expanded
            );
            return Ok(Some(path));
        }

        closed.insert(current);
        expanded += 1;

        let current_g = g_score.get(&current).copied().unwrap_or(0.0);
        let edges = match grid.cell(current) {
            Some(cell) => cell.neighbors().to_vec(),
            None => continue,
        };

        trace!(
            "[A*] Expansion {}: {} g={:.2} open={}",
            expanded,
            current,
            current_g,
            open.len()
        );

        for edge in edges {
            let neighbor = edge.to;
            if edge.weight <= 0.0 || closed.contains(&neighbor) {
                continue;
            }
            if !grid.cell(neighbor).is_some_and(|c| c.is_passable()) {
                continue;
            }

            let tentative = current_g + edge.weight;
            let improves = match g_score.get(&neighbor) {
                Some(&best) => tentative < best,
                None => true,
            };
            if !improves {
                continue;
            }

            came_from.insert(neighbor, current);
            g_score.insert(neighbor, tentative);

            // An open cell keeps the f-score it entered with
            if !open.contains(neighbor) {
                open.insert_or_update(neighbor, tentative + heuristic(neighbor, end));
                if neighbor != start && neighbor != end {
                    grid.set_cell_mark(neighbor, Mark::Visited)?;
                }
            }
        }
    }

    debug!("[A*] NO PATH FOUND after {} expansions", expanded);
    Ok(None)
}

/// Walk the predecessor chain back from `current`, returning ids oldest-first
pub fn reconstruct_path(came_from: &HashMap<CellId, CellId>, current: CellId) -> Vec<CellId> {
    let mut path = vec![current];
    let mut cursor = current;
    while let Some(&previous) = came_from.get(&cursor) {
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    path
}

/// Sum of edge weights along `path`, `None` if two consecutive cells are not adjacent
pub fn path_cost(grid: &Grid, path: &[CellId]) -> Option<f64> {
    let mut total = 0.0;
    for pair in path.windows(2) {
        total += grid.cell(pair[0])?.weight_to(pair[1])?;
    }
    Some(total)
}

/// Format path for display
pub fn format_path(path: &[CellId]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|id| format!("({})", id))
        .collect::<Vec<_>>()
        .join(" -> ")
}
