#![allow(dead_code)]

use astar_sandbox::{find_path, CellId, Grid, Role};
use std::fs;
use std::path::Path;

/// A grid parsed from a text picture, with its endpoints
pub struct Layout {
    pub grid: Grid,
    pub start: CellId,
    pub end: CellId,
}

/// What a layout file expects the search to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Path,
    NoPath,
}

/// Parse a layout picture.
/// Format (same symbols as `Grid::render_ascii`):
/// - `+`, `|`, `-`: frame
/// - `@`: wall
/// - `&` or `S`: start
/// - `#` or `E`: end
/// - ` ` or `.`: free cell
pub fn parse_layout(text: &str) -> Result<Layout, Box<dyn std::error::Error>> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let grid_lines = collect_grid_lines(&lines);
    if grid_lines.is_empty() {
        return Err("No valid grid lines found in layout".into());
    }

    let width = grid_lines[0].chars().count() as i32;
    let height = grid_lines.len() as i32;
    let mut grid = Grid::new(width, height)?;
    let mut start = None;
    let mut end = None;

    for (y, line) in grid_lines.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            let id = CellId::new(x as i32, y as i32);
            match ch {
                '@' => {
                    grid.set_cell_role(id, Role::Wall)?;
                }
                '&' | 'S' => {
                    grid.set_cell_role(id, Role::Start)?;
                    start = Some(id);
                }
                '#' | 'E' => {
                    grid.set_cell_role(id, Role::End)?;
                    end = Some(id);
                }
                _ => {
                    // Frame or free cell, nothing to paint
                }
            }
        }
    }

    let start = start.ok_or("No start found in layout")?;
    let end = end.ok_or("No end found in layout")?;
    Ok(Layout { grid, start, end })
}

/// Leading lines of equal width made only of layout characters
fn collect_grid_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let valid_chars = ['+', '|', '-', '@', '&', 'S', '#', 'E', ' ', '.'];
    let Some(first) = lines.first() else {
        return Vec::new();
    };
    let width = first.chars().count();

    lines
        .iter()
        .copied()
        .take_while(|line| {
            line.chars().count() == width && line.chars().all(|c| valid_chars.contains(&c))
        })
        .collect()
}

/// Parse a layout file: the picture followed by an `expect: path|none` line
pub fn load_layout_file(path: &Path) -> Result<(Layout, Expectation), Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let layout = parse_layout(&contents)?;

    let expectation = contents
        .lines()
        .find_map(|line| line.trim().strip_prefix("expect:"))
        .map(str::trim)
        .ok_or("No 'expect:' line found in layout file")?;
    let expectation = match expectation {
        "path" => Expectation::Path,
        "none" => Expectation::NoPath,
        other => return Err(format!("Unknown expectation '{}'", other).into()),
    };

    Ok((layout, expectation))
}

/// Rebuild a layout with every cell moved through `map`
fn remap(layout: &Layout, map: impl Fn(CellId) -> CellId) -> Layout {
    let source = &layout.grid;
    let mut grid = Grid::new(source.width(), source.height()).expect("same dimensions");
    for cell in source.cells() {
        if !cell.is_frame() && cell.role() != Role::Empty {
            grid.set_cell_role(map(cell.id()), cell.role())
                .expect("mirrored cell is inside the grid");
        }
    }

    Layout {
        grid,
        start: map(layout.start),
        end: map(layout.end),
    }
}

/// Mirror left-right
pub fn flip_horizontal(layout: &Layout) -> Layout {
    let w = layout.grid.width();
    remap(layout, |id| CellId::new(w - 1 - id.x, id.y))
}

/// Mirror top-bottom
pub fn flip_vertical(layout: &Layout) -> Layout {
    let h = layout.grid.height();
    remap(layout, |id| CellId::new(id.x, h - 1 - id.y))
}

/// Mirror both ways
pub fn flip_both(layout: &Layout) -> Layout {
    let (w, h) = (layout.grid.width(), layout.grid.height());
    remap(layout, |id| CellId::new(w - 1 - id.x, h - 1 - id.y))
}

/// The layout and its three mirror images, tagged by name
pub fn variants(layout: &Layout) -> Vec<(&'static str, Layout)> {
    vec![
        ("original", remap(layout, |id| id)),
        ("h_flip", flip_horizontal(layout)),
        ("v_flip", flip_vertical(layout)),
        ("hv_flip", flip_both(layout)),
    ]
}

/// Search a layout, panicking on lookup errors
pub fn solve(layout: &mut Layout) -> Option<Vec<CellId>> {
    find_path(&mut layout.grid, layout.start, layout.end).expect("endpoints are inside the grid")
}

/// Check that `path` runs from start to end over adjacent passable cells
pub fn assert_valid_path(grid: &Grid, path: &[CellId], start: CellId, end: CellId) {
    assert!(!path.is_empty(), "path must not be empty");
    assert_eq!(path.first(), Some(&start), "path must begin at start");
    assert_eq!(path.last(), Some(&end), "path must end at end");

    for pair in path.windows(2) {
        let from = grid.cell(pair[0]).expect("path cell inside grid");
        assert!(
            from.weight_to(pair[1]).is_some(),
            "{} and {} are not adjacent",
            pair[0],
            pair[1]
        );
    }
    for id in path {
        let cell = grid.cell(*id).expect("path cell inside grid");
        assert!(cell.is_passable(), "path crosses impassable cell {}", id);
    }
}

/// Render the grid with the path drawn in, for test output
pub fn visualize_path(grid: &Grid, path: &[CellId]) -> String {
    let mut copy = grid.clone();
    copy.clear_marks();
    copy.mark_path(path).expect("path cells inside grid");
    copy.render_ascii()
}
