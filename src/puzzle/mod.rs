//! Word-search puzzle core.
//!
//! A [`Grid`] is a square letter matrix. The [`PuzzleBuilder`] embeds each
//! target word along one of the eight [`Direction`]s at a random anchor cell,
//! retrying up to a bounded number of attempts, then fills every remaining
//! cell with a random letter. Words that cannot be placed within the bound are
//! dropped and reported in [`Puzzle::dropped`].
//!
//! Nothing here touches the browser: all randomness is injected through
//! `rand::Rng` so generation is reproducible under a seeded RNG in tests.

use rand::Rng;
use rand::seq::SliceRandom;

pub mod selection;
pub mod session;

/// Random (direction, anchor) draws tried per word before it is dropped.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Filler alphabet for cells not covered by a placed word.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// --- Coordinates & Directions ------------------------------------------------

/// Zero-based (row, col) coordinate on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The eight straight lines a word may run along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
    DownRight,
    UpLeft,
    DownLeft,
    UpRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
        Direction::DownRight,
        Direction::UpLeft,
        Direction::DownLeft,
        Direction::UpRight,
    ];

    /// (d_row, d_col) unit step.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
            Direction::DownRight => (1, 1),
            Direction::UpLeft => (-1, -1),
            Direction::DownLeft => (1, -1),
            Direction::UpRight => (-1, 1),
        }
    }
}

// --- Grid --------------------------------------------------------------------

/// Square letter matrix, stored flat row-major. `None` marks a cell no word
/// has claimed yet; a finished puzzle has no empty cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a grid from equal-length rows; `.` marks an empty cell.
    /// Returns `None` if the rows do not form a square.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let before = cells.len();
            cells.extend(row.chars().map(|c| if c == '.' { None } else { Some(c) }));
            if cells.len() - before != size {
                return None;
            }
        }
        Some(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.size && cell.col < self.size).then(|| cell.row * self.size + cell.col)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    pub fn get(&self, cell: Cell) -> Option<char> {
        self.index(cell).and_then(|idx| self.cells[idx])
    }

    /// Write a letter; out-of-bounds cells are ignored.
    pub fn set(&mut self, cell: Cell, letter: char) {
        if let Some(idx) = self.index(cell) {
            self.cells[idx] = Some(letter);
        }
    }

    /// Cell reached after `n` steps from `from` along `direction`, if still on
    /// the grid.
    pub fn step(&self, from: Cell, direction: Direction, n: usize) -> Option<Cell> {
        let (d_row, d_col) = direction.delta();
        let n = isize::try_from(n).ok()?;
        let row = isize::try_from(from.row).ok()? + d_row * n;
        let col = isize::try_from(from.col).ok()? + d_col * n;
        if row < 0 || col < 0 {
            return None;
        }
        let cell = Cell::new(row as usize, col as usize);
        self.contains(cell).then_some(cell)
    }

    /// Letters along `cells` in order. Empty or off-grid cells contribute
    /// nothing.
    pub fn read(&self, cells: &[Cell]) -> String {
        cells.iter().filter_map(|&c| self.get(c)).collect()
    }

    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Printable rows, `.` for empty cells.
    pub fn rows(&self) -> Vec<String> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|c| c.unwrap_or('.')).collect())
            .collect()
    }
}

// --- Placement ---------------------------------------------------------------

/// A target word and the cells it occupies, in word order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedWord {
    pub word: String,
    pub cells: Vec<Cell>,
}

/// True iff every letter of `word` laid from `anchor` along `direction` lands
/// on the grid, on a cell that is empty or already holds that same letter.
pub fn can_place_word(grid: &Grid, word: &str, anchor: Cell, direction: Direction) -> bool {
    word.chars()
        .enumerate()
        .all(|(i, letter)| match grid.step(anchor, direction, i) {
            Some(cell) => grid.get(cell).is_none_or(|existing| existing == letter),
            None => false,
        })
}

/// Write `word` into the grid. Callers check [`can_place_word`] first.
pub fn place_word(grid: &mut Grid, word: &str, anchor: Cell, direction: Direction) -> PlacedWord {
    debug_assert!(can_place_word(grid, word, anchor, direction));
    let mut cells = Vec::with_capacity(word.len());
    for (i, letter) in word.chars().enumerate() {
        if let Some(cell) = grid.step(anchor, direction, i) {
            grid.set(cell, letter);
            cells.push(cell);
        }
    }
    PlacedWord {
        word: word.to_owned(),
        cells,
    }
}

/// Give every empty cell an independent uniformly random letter.
pub fn fill_empty_cells<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    for slot in grid.cells.iter_mut().filter(|c| c.is_none()) {
        *slot = Some(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
    }
}

// --- Generator ---------------------------------------------------------------

/// Outcome of one generation run.
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub grid: Grid,
    pub placed: Vec<PlacedWord>,
    /// Words that exhausted the attempt bound, in input order.
    pub dropped: Vec<String>,
}

impl Puzzle {
    pub fn placement(&self, word: &str) -> Option<&PlacedWord> {
        self.placed.iter().find(|p| p.word == word)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.placed.iter().map(|p| p.word.as_str())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PuzzleBuilder {
    size: usize,
    max_attempts: usize,
}

impl PuzzleBuilder {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Place `words` in order, then fill the rest of the grid.
    pub fn generate<R, S>(&self, words: &[S], rng: &mut R) -> Puzzle
    where
        R: Rng + ?Sized,
        S: AsRef<str>,
    {
        let mut grid = Grid::new(self.size);
        let mut placed = Vec::with_capacity(words.len());
        let mut dropped = Vec::new();
        for word in words.iter().map(AsRef::as_ref) {
            match self.try_place(&mut grid, word, rng) {
                Some(p) => placed.push(p),
                None => {
                    log::warn!("could not place word: {word}");
                    dropped.push(word.to_owned());
                }
            }
        }
        fill_empty_cells(&mut grid, rng);
        Puzzle {
            grid,
            placed,
            dropped,
        }
    }

    fn try_place<R: Rng + ?Sized>(&self, grid: &mut Grid, word: &str, rng: &mut R) -> Option<PlacedWord> {
        if self.size == 0 || word.is_empty() {
            return None;
        }
        for _ in 0..self.max_attempts {
            let direction = *Direction::ALL.choose(rng)?;
            let anchor = Cell::new(rng.gen_range(0..self.size), rng.gen_range(0..self.size));
            if can_place_word(grid, word, anchor, direction) {
                return Some(place_word(grid, word, anchor, direction));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_direction_deltas_are_distinct_units() {
        let mut seen = Vec::new();
        for d in Direction::ALL {
            let (dr, dc) = d.delta();
            assert!((-1..=1).contains(&dr) && (-1..=1).contains(&dc));
            assert_ne!((dr, dc), (0, 0));
            assert!(!seen.contains(&(dr, dc)), "duplicate delta for {d:?}");
            seen.push((dr, dc));
        }
    }

    #[test]
    fn test_step_stays_on_grid() {
        let grid = Grid::new(3);
        assert_eq!(grid.step(Cell::new(0, 0), Direction::Right, 2), Some(Cell::new(0, 2)));
        assert_eq!(grid.step(Cell::new(0, 0), Direction::Right, 3), None);
        assert_eq!(grid.step(Cell::new(0, 0), Direction::Up, 1), None);
        assert_eq!(grid.step(Cell::new(2, 0), Direction::UpRight, 2), Some(Cell::new(0, 2)));
        assert_eq!(grid.step(Cell::new(1, 1), Direction::UpLeft, 0), Some(Cell::new(1, 1)));
    }

    #[test]
    fn test_from_rows_requires_square() {
        let grid = Grid::from_rows(&["AB", "C."]).unwrap();
        assert_eq!(grid.get(Cell::new(1, 0)), Some('C'));
        assert_eq!(grid.get(Cell::new(1, 1)), None);
        assert_eq!(grid.rows(), vec!["AB".to_string(), "C.".to_string()]);
        assert!(Grid::from_rows(&["ABC", "DE"]).is_none());
    }

    #[test]
    fn test_can_place_rejects_out_of_bounds() {
        let grid = Grid::new(5);
        assert!(can_place_word(&grid, "CAT", Cell::new(2, 2), Direction::Right));
        assert!(!can_place_word(&grid, "CAT", Cell::new(2, 3), Direction::Right));
        assert!(!can_place_word(&grid, "CAT", Cell::new(1, 1), Direction::UpLeft));
        assert!(can_place_word(&grid, "CAT", Cell::new(2, 2), Direction::UpLeft));
    }

    #[test]
    fn test_can_place_allows_matching_overlap_only() {
        let mut grid = Grid::new(5);
        place_word(&mut grid, "CAT", Cell::new(0, 0), Direction::Right);
        // "ANT" crosses at the shared 'A'
        assert!(can_place_word(&grid, "ANT", Cell::new(0, 1), Direction::Down));
        // "DOG" would overwrite 'A'
        assert!(!can_place_word(&grid, "DOG", Cell::new(0, 1), Direction::Down));
    }

    #[test]
    fn test_can_place_matches_reference_for_every_direction() {
        let grid = Grid::from_rows(&["C....", ".A...", "..T..", ".....", "....X"]).unwrap();
        let word = "CAT";
        for direction in Direction::ALL {
            for row in 0..5 {
                for col in 0..5 {
                    let anchor = Cell::new(row, col);
                    let expected = (0..word.len()).all(|i| {
                        let (dr, dc) = direction.delta();
                        let r = row as isize + dr * i as isize;
                        let c = col as isize + dc * i as isize;
                        if !(0..5).contains(&r) || !(0..5).contains(&c) {
                            return false;
                        }
                        let cur = grid.get(Cell::new(r as usize, c as usize));
                        cur.is_none() || cur == word.chars().nth(i)
                    });
                    assert_eq!(
                        can_place_word(&grid, word, anchor, direction),
                        expected,
                        "anchor {anchor:?} dir {direction:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_place_word_records_cells_in_order() {
        let mut grid = Grid::new(5);
        let placed = place_word(&mut grid, "CAT", Cell::new(2, 4), Direction::Left);
        assert_eq!(placed.cells, vec![Cell::new(2, 4), Cell::new(2, 3), Cell::new(2, 2)]);
        assert_eq!(grid.read(&placed.cells), "CAT");
    }

    #[test]
    fn test_fill_leaves_placed_letters_untouched() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(4);
        let placed = place_word(&mut grid, "WORD", Cell::new(0, 0), Direction::DownRight);
        fill_empty_cells(&mut grid, &mut rng);
        assert!(grid.is_filled());
        assert_eq!(grid.read(&placed.cells), "WORD");
        for row in grid.rows() {
            assert!(row.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_generate_places_readable_words() {
        let mut rng = StdRng::seed_from_u64(42);
        let words = ["LION", "TIGER", "BEAR", "WOLF", "EAGLE", "SHARK", "WHALE", "HORSE"];
        let puzzle = PuzzleBuilder::new(10).generate(&words, &mut rng);
        assert!(puzzle.grid.is_filled());
        assert_eq!(puzzle.placed.len() + puzzle.dropped.len(), words.len());
        for p in &puzzle.placed {
            assert_eq!(p.cells.len(), p.word.len());
            assert_eq!(puzzle.grid.read(&p.cells), p.word);
        }
    }

    #[test]
    fn test_generate_is_deterministic_for_seed() {
        let words = ["APPLE", "BANANA", "ORANGE"];
        let a = PuzzleBuilder::new(8).generate(&words, &mut StdRng::seed_from_u64(3));
        let b = PuzzleBuilder::new(8).generate(&words, &mut StdRng::seed_from_u64(3));
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.placed, b.placed);
    }

    #[test]
    fn test_word_longer_than_grid_is_dropped() {
        let mut rng = StdRng::seed_from_u64(1);
        let puzzle = PuzzleBuilder::new(4).generate(&["HIPPOPOTAMUS", "CAT"], &mut rng);
        assert_eq!(puzzle.dropped, vec!["HIPPOPOTAMUS".to_string()]);
        assert!(puzzle.placement("CAT").is_some());
        assert!(puzzle.placement("HIPPOPOTAMUS").is_none());
    }

    #[test]
    fn test_zero_attempts_drops_everything() {
        let mut rng = StdRng::seed_from_u64(1);
        let puzzle = PuzzleBuilder::new(6).max_attempts(0).generate(&["CAT", "DOG"], &mut rng);
        assert!(puzzle.placed.is_empty());
        assert_eq!(puzzle.dropped.len(), 2);
        assert!(puzzle.grid.is_filled());
    }

    #[test]
    fn test_empty_grid_size_places_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let puzzle = PuzzleBuilder::new(0).generate(&["CAT"], &mut rng);
        assert!(puzzle.placed.is_empty());
        assert!(puzzle.grid.rows().is_empty());
    }
}
