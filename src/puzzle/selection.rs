//! Drag selection: resolving a start/end pair to a straight line of cells and
//! matching the letters under it against the remaining target words.

use std::collections::HashSet;

use super::{Cell, Grid};

/// Cells from `start` to `end` inclusive when the two lie on a horizontal,
/// vertical or 45° diagonal line. Any other pair collapses to `[start]`.
pub fn selection_cells(start: Cell, end: Cell) -> Vec<Cell> {
    let d_row = end.row as isize - start.row as isize;
    let d_col = end.col as isize - start.col as isize;
    if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
        return vec![start];
    }
    let steps = d_row.abs().max(d_col.abs());
    let (step_row, step_col) = (d_row.signum(), d_col.signum());
    (0..=steps)
        .map(|i| {
            Cell::new(
                (start.row as isize + i * step_row) as usize,
                (start.col as isize + i * step_col) as usize,
            )
        })
        .collect()
}

/// Pointer-held selection. Lives from pointer-down to pointer-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub start: Cell,
    pub end: Cell,
}

impl Selection {
    pub fn begin(cell: Cell) -> Self {
        Self {
            start: cell,
            end: cell,
        }
    }

    pub fn extend(&mut self, cell: Cell) {
        self.end = cell;
    }

    pub fn cells(&self) -> Vec<Cell> {
        selection_cells(self.start, self.end)
    }
}

/// First target not yet in `found` that equals the letters under `cells`
/// read forward or backward.
pub fn match_selection<'a, S: AsRef<str>>(
    grid: &Grid,
    cells: &[Cell],
    targets: &'a [S],
    found: &HashSet<String>,
) -> Option<&'a str> {
    let forward = grid.read(cells);
    if forward.is_empty() {
        return None;
    }
    let reversed: String = forward.chars().rev().collect();
    targets
        .iter()
        .map(AsRef::as_ref)
        .filter(|word| !found.contains(*word))
        .find(|word| *word == forward || *word == reversed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Direction, place_word};

    fn cat_grid() -> Grid {
        let mut grid = Grid::new(5);
        place_word(&mut grid, "CAT", Cell::new(2, 2), Direction::Right);
        grid
    }

    #[test]
    fn test_single_cell_selection() {
        let c = Cell::new(3, 1);
        assert_eq!(selection_cells(c, c), vec![c]);
        assert_eq!(Selection::begin(c).cells(), vec![c]);
    }

    #[test]
    fn test_bent_selection_collapses_to_start() {
        let start = Cell::new(0, 0);
        assert_eq!(selection_cells(start, Cell::new(1, 2)), vec![start]);
        assert_eq!(selection_cells(start, Cell::new(3, 1)), vec![start]);
        let mut sel = Selection::begin(start);
        sel.extend(Cell::new(2, 3));
        assert_eq!(sel.cells(), vec![start]);
    }

    #[test]
    fn test_straight_selections_in_all_directions() {
        let center = Cell::new(3, 3);
        for direction in Direction::ALL {
            let (dr, dc) = direction.delta();
            let end = Cell::new((3 + 2 * dr) as usize, (3 + 2 * dc) as usize);
            let cells = selection_cells(center, end);
            assert_eq!(cells.len(), 3, "{direction:?}");
            assert_eq!(cells[0], center);
            assert_eq!(cells[2], end);
            let mut sel = Selection::begin(center);
            sel.extend(end);
            assert_eq!(sel.cells(), cells);
        }
    }

    #[test]
    fn test_reverse_selection_is_mirror() {
        let a = Cell::new(4, 0);
        let b = Cell::new(0, 4);
        let mut back = selection_cells(b, a);
        back.reverse();
        assert_eq!(selection_cells(a, b), back);
    }

    #[test]
    fn test_reverse_read_matches_cat() {
        let grid = cat_grid();
        let targets = ["CAT"];
        let found = HashSet::new();
        let cells = selection_cells(Cell::new(2, 4), Cell::new(2, 2));
        assert_eq!(match_selection(&grid, &cells, &targets, &found), Some("CAT"));
        let cells = selection_cells(Cell::new(2, 2), Cell::new(2, 4));
        assert_eq!(match_selection(&grid, &cells, &targets, &found), Some("CAT"));
    }

    #[test]
    fn test_found_words_are_skipped() {
        let grid = cat_grid();
        let targets = ["CAT"];
        let found: HashSet<String> = ["CAT".to_string()].into_iter().collect();
        let cells = selection_cells(Cell::new(2, 2), Cell::new(2, 4));
        assert_eq!(match_selection(&grid, &cells, &targets, &found), None);
    }

    #[test]
    fn test_partial_selection_does_not_match() {
        let grid = cat_grid();
        let targets = ["CAT"];
        let cells = selection_cells(Cell::new(2, 2), Cell::new(2, 3));
        assert_eq!(match_selection(&grid, &cells, &targets, &HashSet::new()), None);
    }

    #[test]
    fn test_palindrome_matches_first_unfound_target() {
        let grid = Grid::from_rows(&["TOT", "...", "..."]).unwrap();
        let targets = ["TOT", "TO"];
        let cells = selection_cells(Cell::new(0, 0), Cell::new(0, 2));
        assert_eq!(match_selection(&grid, &cells, &targets, &HashSet::new()), Some("TOT"));
    }
}
