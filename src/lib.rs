//! Word Search core crate.
//!
//! Grid generation and drag-to-select matching live in [`puzzle`] and are plain
//! Rust, so they run under `cargo test` on the host. The browser surface binds
//! them to the page markup through wasm-bindgen exports (`mount`,
//! `start_game`, `start_custom_game`, `use_hint`, ...). Lifetime statistics are
//! kept in `localStorage` by [`stats`].

use wasm_bindgen::prelude::*;

pub mod logger;
pub mod puzzle;
pub mod stats;
pub mod words;

mod ui; // DOM wiring; only meaningful on wasm32

pub use puzzle::selection::{Selection, match_selection, selection_cells};
pub use puzzle::session::{FoundWord, GameMode, GameSession, HINTS_PER_GAME};
pub use puzzle::{
    Cell, Direction, Grid, MAX_PLACEMENT_ATTEMPTS, PlacedWord, Puzzle, PuzzleBuilder,
    can_place_word, fill_empty_cells, place_word,
};
pub use words::{Category, Difficulty, WordListError};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}
