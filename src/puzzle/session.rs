//! One game from grid generation to the last found word.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::selection::{Selection, match_selection};
use super::{Cell, PlacedWord, Puzzle, PuzzleBuilder};
use crate::stats::StatsBucket;
use crate::words::{Category, Difficulty};

pub const HINTS_PER_GAME: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Standard {
        category: Category,
        difficulty: Difficulty,
    },
    Custom {
        grid_size: usize,
    },
}

impl GameMode {
    pub fn grid_size(&self) -> usize {
        match self {
            GameMode::Standard { difficulty, .. } => difficulty.settings().grid_size,
            GameMode::Custom { grid_size } => *grid_size,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, GameMode::Custom { .. })
    }

    /// Header text, e.g. "Easy - animals".
    pub fn label(&self) -> String {
        match self {
            GameMode::Standard {
                category,
                difficulty,
            } => format!("{} - {}", difficulty.label(), category.key()),
            GameMode::Custom { .. } => "Custom".to_owned(),
        }
    }

    pub fn difficulty_label(&self) -> &'static str {
        match self {
            GameMode::Standard { difficulty, .. } => difficulty.label(),
            GameMode::Custom { .. } => "Custom",
        }
    }

    pub fn stats_bucket(&self) -> StatsBucket {
        match self {
            GameMode::Standard { difficulty, .. } => match difficulty {
                Difficulty::Easy => StatsBucket::Easy,
                Difficulty::Medium => StatsBucket::Medium,
                Difficulty::Hard => StatsBucket::Hard,
            },
            GameMode::Custom { .. } => StatsBucket::Custom,
        }
    }
}

/// A confirmed match and the cells the player dragged over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundWord {
    pub word: String,
    pub cells: Vec<Cell>,
}

pub struct GameSession {
    mode: GameMode,
    puzzle: Puzzle,
    targets: Vec<String>,
    found: HashSet<String>,
    hints_left: u8,
    selection: Option<Selection>,
    started_ms: f64,
    finished_ms: Option<f64>,
}

impl GameSession {
    /// Generate a fresh grid. Only words that were actually placed become
    /// targets.
    pub fn new<R: Rng + ?Sized>(mode: GameMode, words: &[String], rng: &mut R, now_ms: f64) -> Self {
        let puzzle = PuzzleBuilder::new(mode.grid_size()).generate(words, rng);
        let mut targets: Vec<String> = Vec::with_capacity(puzzle.placed.len());
        for word in puzzle.words() {
            if !targets.iter().any(|t| t == word) {
                targets.push(word.to_owned());
            }
        }
        log::info!(
            "new game: {} ({}x{}, {} words, {} dropped)",
            mode.label(),
            mode.grid_size(),
            mode.grid_size(),
            targets.len(),
            puzzle.dropped.len()
        );
        // With nothing placed there is nothing to find; the game is over at once.
        let finished_ms = targets.is_empty().then_some(now_ms);
        Self {
            mode,
            puzzle,
            targets,
            found: HashSet::new(),
            hints_left: HINTS_PER_GAME,
            selection: None,
            started_ms: now_ms,
            finished_ms,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found.contains(word)
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn total_words(&self) -> usize {
        self.targets.len()
    }

    pub fn is_complete(&self) -> bool {
        self.found.len() == self.targets.len()
    }

    pub fn hints_left(&self) -> u8 {
        self.hints_left
    }

    pub fn hints_used(&self) -> u8 {
        HINTS_PER_GAME - self.hints_left
    }

    // --- Selection lifecycle ---------------------------------------------

    pub fn begin_selection(&mut self, cell: Cell) {
        if self.puzzle.grid.contains(cell) {
            self.selection = Some(Selection::begin(cell));
        }
    }

    pub fn update_selection(&mut self, cell: Cell) {
        if let Some(sel) = self.selection.as_mut() {
            if self.puzzle.grid.contains(cell) {
                sel.extend(cell);
            }
        }
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_some()
    }

    /// Cells currently under the drag, empty when nothing is held.
    pub fn selecting_cells(&self) -> Vec<Cell> {
        self.selection.map(|s| s.cells()).unwrap_or_default()
    }

    /// Release the pointer and check the dragged line.
    pub fn end_selection(&mut self, now_ms: f64) -> Option<FoundWord> {
        let sel = self.selection.take()?;
        self.try_select(sel.start, sel.end, now_ms)
    }

    /// Match the line `start..=end`; on success the word is marked found and,
    /// if it was the last one, the clock stops.
    pub fn try_select(&mut self, start: Cell, end: Cell, now_ms: f64) -> Option<FoundWord> {
        if self.finished_ms.is_some() {
            return None;
        }
        let mut sel = Selection::begin(start);
        sel.extend(end);
        let cells = sel.cells();
        let word = match_selection(&self.puzzle.grid, &cells, &self.targets, &self.found)?.to_owned();
        self.found.insert(word.clone());
        if self.is_complete() {
            self.finished_ms = Some(now_ms);
            log::info!("all {} words found", self.targets.len());
        }
        Some(FoundWord { word, cells })
    }

    // --- Hints -------------------------------------------------------------

    /// Spend a hint on a random unfound word.
    pub fn use_hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&PlacedWord> {
        if self.hints_left == 0 || self.finished_ms.is_some() {
            return None;
        }
        let candidates: Vec<usize> = self
            .puzzle
            .placed
            .iter()
            .enumerate()
            .filter(|(_, p)| !self.found.contains(&p.word))
            .map(|(i, _)| i)
            .collect();
        let &idx = candidates.choose(rng)?;
        self.hints_left -= 1;
        self.puzzle.placed.get(idx)
    }

    /// Every placement still to be found. Costs no hint.
    pub fn remaining_placements(&self) -> impl Iterator<Item = &PlacedWord> {
        self.puzzle
            .placed
            .iter()
            .filter(|p| !self.found.contains(&p.word))
    }

    // --- Clock ---------------------------------------------------------------

    pub fn is_finished(&self) -> bool {
        self.finished_ms.is_some()
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (self.finished_ms.unwrap_or(now_ms) - self.started_ms).max(0.0)
    }
}
