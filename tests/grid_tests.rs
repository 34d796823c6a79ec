use melee_at_sea::config::{CELL_SIZE, GRID_COLS, GRID_ROWS};
use melee_at_sea::Grid;

#[test]
fn default_grid_dimensions() {
    let grid = Grid::default();
    assert_eq!(grid.cols(), GRID_COLS);
    assert_eq!(grid.rows(), GRID_ROWS);
    assert_eq!(grid.cell_size(), CELL_SIZE);
    assert_eq!(grid.width(), 800);
    assert_eq!(grid.height(), 600);
    assert_eq!(grid.cells().count(), (GRID_COLS * GRID_ROWS) as usize);
}

#[test]
fn bounds_are_half_open() {
    let grid = Grid::new(4, 3, 10);
    assert!(grid.contains((0, 0)));
    assert!(grid.contains((3, 2)));
    assert!(!grid.contains((4, 2)));
    assert!(!grid.contains((3, 3)));
    assert!(!grid.contains((-1, 0)));
    assert!(!grid.contains((0, -1)));
}

#[test]
fn screen_mapping_uses_cell_centres() {
    let grid = Grid::default();
    assert_eq!(grid.grid_to_screen((0, 0)), (20, 20));
    assert_eq!(grid.grid_to_screen((2, 1)), (100, 60));
    assert_eq!(grid.screen_to_grid(0, 0), (0, 0));
    assert_eq!(grid.screen_to_grid(39, 39), (0, 0));
    assert_eq!(grid.screen_to_grid(40, 79), (1, 1));
    for cell in grid.cells() {
        let (sx, sy) = grid.grid_to_screen(cell);
        assert_eq!(grid.screen_to_grid(sx, sy), cell);
    }
}

#[test]
fn points_left_of_the_grid_map_out_of_bounds() {
    let grid = Grid::default().centered(1000, 700);
    assert_eq!(grid.offset(), (100, 50));
    let cell = grid.screen_to_grid(99, 60);
    assert_eq!(cell, (-1, 0));
    assert!(!grid.contains(cell));
    assert_eq!(grid.screen_to_grid(100, 50), (0, 0));
}

#[test]
fn centering_on_exact_fit_has_no_offset() {
    let grid = Grid::default().centered(800, 600);
    assert_eq!(grid.offset(), (0, 0));
}

#[test]
#[should_panic(expected = "grid dimensions must be positive")]
fn zero_cell_size_is_rejected() {
    let _ = Grid::new(20, 15, 0);
}

#[test]
#[should_panic(expected = "grid dimensions must be positive")]
fn empty_grid_is_rejected() {
    let _ = Grid::new(0, 15, 40);
}
