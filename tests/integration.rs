// Integration tests (native) for the `word-search` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use rand::SeedableRng;
use rand::rngs::StdRng;

use word_search::words::{self, Category, Difficulty};
use word_search::{
    Cell, Direction, GameMode, GameSession, Grid, PuzzleBuilder, place_word, selection_cells,
};

// Placed words read back from the finished grid, across many seeds.
#[test]
fn placed_words_spell_themselves() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = words::pick_words(Category::Technology.words(), 12, &mut rng);
        let puzzle = PuzzleBuilder::new(15).generate(&picked, &mut rng);
        assert!(puzzle.grid.is_filled());
        for p in &puzzle.placed {
            assert_eq!(puzzle.grid.read(&p.cells), p.word, "seed {seed}");
            let line = selection_cells(p.cells[0], *p.cells.last().unwrap());
            assert_eq!(line, p.cells, "placement is not a straight line (seed {seed})");
        }
    }
}

// Easy boards with short words should never need to drop anything.
#[test]
fn easy_board_places_short_words() {
    let pool: Vec<&str> = Category::Animals
        .words()
        .iter()
        .copied()
        .filter(|w| w.len() <= 8)
        .collect();
    let settings = Difficulty::Easy.settings();
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = words::pick_words(&pool, settings.word_count, &mut rng);
        let puzzle = PuzzleBuilder::new(settings.grid_size).generate(&picked, &mut rng);
        assert!(puzzle.dropped.is_empty(), "seed {seed} dropped {:?}", puzzle.dropped);
        assert_eq!(puzzle.placed.len(), settings.word_count);
    }
}

// CAT laid left-to-right at (2,2)..(2,4) is found when dragged right-to-left.
#[test]
fn reverse_drag_finds_cat() {
    let mut grid = Grid::new(5);
    let placed = place_word(&mut grid, "CAT", Cell::new(2, 2), Direction::Right);
    assert_eq!(placed.cells.last(), Some(&Cell::new(2, 4)));
    let cells = selection_cells(Cell::new(2, 4), Cell::new(2, 2));
    let found = std::collections::HashSet::new();
    assert_eq!(word_search::match_selection(&grid, &cells, &["CAT"], &found), Some("CAT"));
}

#[test]
fn custom_game_plays_to_completion() {
    let list = words::parse_custom_words("rust\ncargo\ncrate\ntrait\nborrow\n").unwrap();
    let grid_size = words::validate_grid_size(10).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut session = GameSession::new(GameMode::Custom { grid_size }, &list, &mut rng, 0.0);
    assert_eq!(session.total_words(), list.len());

    let placements = session.puzzle().placed.clone();
    for (i, p) in placements.iter().enumerate() {
        let start = *p.cells.last().unwrap();
        let end = p.cells[0];
        session.begin_selection(start);
        session.update_selection(end);
        let hit = session.end_selection(1_000.0 * (i + 1) as f64).expect("reverse drag matches");
        assert_eq!(hit.word, p.word);
    }
    assert!(session.is_complete());
    assert_eq!(session.elapsed_ms(1e9), 5_000.0);
    assert_eq!(session.mode().difficulty_label(), "Custom");
}
