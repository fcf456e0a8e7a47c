mod common;

use astar_sandbox::pathfinding::{format_path, path_cost};
use astar_sandbox::{find_path, find_path_with, CellId, FrontierKind, Grid, GridError, Mark, Role};
use common::{assert_valid_path, parse_layout, solve, variants, visualize_path};

const MAZE: &str = "
+---------+
|S..@.....|
|.@.@.@@@.|
|.@...@...|
|.@@@@@.@@|
|......@.E|
+---------+
";

fn wall(grid: &mut Grid, cells: &[(i32, i32)]) {
    for &(x, y) in cells {
        grid.set_cell_role(CellId::new(x, y), Role::Wall).unwrap();
    }
}

#[test]
fn test_open_grid_diagonal() {
    let mut grid = Grid::new(5, 5).unwrap();
    let start = CellId::new(1, 1);
    let end = CellId::new(3, 3);

    let path = find_path(&mut grid, start, end).unwrap().unwrap();
    println!("{}", visualize_path(&grid, &path));

    assert_eq!(path, vec![start, CellId::new(2, 2), end]);
    assert_eq!(path_cost(&grid, &path), Some(2.0 * std::f64::consts::SQRT_2));
}

#[test]
fn test_open_grid_straight_row() {
    let mut grid = Grid::new(8, 7).unwrap();
    let start = CellId::new(1, 3);
    let end = CellId::new(6, 3);

    let path = find_path(&mut grid, start, end).unwrap().unwrap();
    println!("Path: {}", format_path(&path));

    assert_valid_path(&grid, &path, start, end);
    assert_eq!(path.len(), 6);
    assert_eq!(path_cost(&grid, &path), Some(5.0));
    assert!(path.iter().all(|id| id.y == 3));
}

#[test]
fn test_start_equals_end() {
    let mut grid = Grid::new(5, 5).unwrap();
    let id = CellId::new(2, 3);

    assert_eq!(find_path(&mut grid, id, id), Ok(Some(vec![id])));
    assert!(grid.cells().all(|c| c.mark() == Mark::None));
}

#[test]
fn test_boxed_start_on_small_grid() {
    // On a 5x5 grid these walls leave (1,1) with no passable neighbor
    let mut grid = Grid::new(5, 5).unwrap();
    wall(&mut grid, &[(2, 2), (2, 1), (1, 2)]);

    let path = find_path(&mut grid, CellId::new(1, 1), CellId::new(3, 3)).unwrap();
    assert_eq!(path, None);
}

#[test]
fn test_routes_around_blocked_diagonal() {
    let mut grid = Grid::new(7, 7).unwrap();
    wall(&mut grid, &[(3, 3), (3, 2), (2, 3)]);
    let start = CellId::new(2, 2);
    let end = CellId::new(4, 4);

    let path = find_path(&mut grid, start, end).unwrap().unwrap();
    println!("{}", visualize_path(&grid, &path));

    assert_valid_path(&grid, &path, start, end);
    assert!(path.len() > 3, "path must leave the blocked diagonal");
    let cost = path_cost(&grid, &path).unwrap();
    assert!(cost > 2.0 * std::f64::consts::SQRT_2);
}

#[test]
fn test_enclosed_end_has_no_path() {
    let mut grid = Grid::new(9, 9).unwrap();
    wall(
        &mut grid,
        &[
            (5, 5), (6, 5), (7, 5),
            (5, 6),         (7, 6),
            (5, 7), (6, 7), (7, 7),
        ],
    );

    let result = find_path(&mut grid, CellId::new(2, 2), CellId::new(6, 6)).unwrap();
    assert_eq!(result, None);

    // Everything reachable got explored, nothing inside the ring did
    assert_eq!(grid.cell(CellId::new(6, 6)).unwrap().mark(), Mark::None);
    assert_eq!(grid.cell(CellId::new(1, 7)).unwrap().mark(), Mark::Visited);
}

#[test]
fn test_full_wall_blocks_everything() {
    let mut grid = Grid::new(10, 10).unwrap();
    for y in 1..9 {
        grid.set_cell_role(CellId::new(5, y), Role::Wall).unwrap();
    }

    let result = find_path(&mut grid, CellId::new(2, 5), CellId::new(8, 5)).unwrap();
    assert!(result.is_none(), "frame and wall leave no gap to squeeze through");
}

#[test]
fn test_unknown_ids_fail() {
    let mut grid = Grid::new(6, 6).unwrap();
    let outside = CellId::new(6, 6);

    assert_eq!(
        find_path(&mut grid, outside, CellId::new(1, 1)),
        Err(GridError::UnknownCellId(outside))
    );
    assert_eq!(
        find_path_with(&mut grid, CellId::new(1, 1), outside, FrontierKind::Heap),
        Err(GridError::UnknownCellId(outside))
    );
}

#[test]
fn test_repeat_search_is_stable() {
    let mut grid = Grid::new(10, 10).unwrap();
    wall(&mut grid, &[(5, 4), (5, 5), (5, 6)]);
    let start = CellId::new(3, 5);
    let end = CellId::new(7, 5);

    let first = find_path(&mut grid, start, end).unwrap();
    let second = find_path(&mut grid, start, end).unwrap();
    grid.clear_marks();
    let third = find_path(&mut grid, start, end).unwrap();

    assert!(first.is_some());
    assert_eq!(first, second, "paths should be identical (deterministic)");
    assert_eq!(second, third, "paths should be identical (deterministic)");
}

#[test]
fn test_maze_in_every_orientation() {
    let layout = parse_layout(MAZE).unwrap();

    for (name, mut variant) in variants(&layout) {
        let path = solve(&mut variant).unwrap_or_else(|| panic!("[{}] path should exist", name));
        println!("[{}]\n{}", name, visualize_path(&variant.grid, &path));
        assert_valid_path(&variant.grid, &path, variant.start, variant.end);
        assert!(
            path.iter().all(|id| variant.grid.cell(*id).unwrap().role() != Role::Wall),
            "[{}] path crosses a wall",
            name
        );
    }
}

#[test]
fn test_ragged_layout_is_rejected() {
    // Second row is narrower than the first, so parsing stops after one row
    let layout = parse_layout(
        "
+-----+
|S..|
|...E|
+-----+
",
    );
    assert!(layout.is_err());
}

#[test]
fn test_frontiers_agree() {
    let layout = parse_layout(MAZE).unwrap();

    for (name, variant) in variants(&layout) {
        let mut scan_grid = variant.grid.clone();
        let mut heap_grid = variant.grid.clone();

        let scan = find_path_with(&mut scan_grid, variant.start, variant.end, FrontierKind::Scan)
            .unwrap();
        let heap = find_path_with(&mut heap_grid, variant.start, variant.end, FrontierKind::Heap)
            .unwrap();

        assert_eq!(scan, heap, "[{}] frontiers returned different paths", name);
        assert_eq!(
            scan_grid.render_ascii(),
            heap_grid.render_ascii(),
            "[{}] frontiers explored different cells",
            name
        );
    }
}
