//! Word lists, difficulty presets and validation of player-supplied words.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Category datasets (uppercase A-Z only, 24 words each)
// -----------------------------------------------------------------------------

pub const ANIMALS: &[&str] = &[
    "CAT", "DOG", "LION", "TIGER", "BEAR", "WOLF", "EAGLE", "SHARK", "WHALE", "HORSE",
    "ELEPHANT", "GIRAFFE", "PENGUIN", "DOLPHIN", "CHEETAH", "LEOPARD", "KANGAROO", "ZEBRA",
    "RHINOCEROS", "HIPPOPOTAMUS", "CROCODILE", "BUTTERFLY", "OCTOPUS", "FLAMINGO",
];

pub const COUNTRIES: &[&str] = &[
    "USA", "CANADA", "MEXICO", "BRAZIL", "FRANCE", "SPAIN", "ITALY", "GERMANY", "CHINA", "JAPAN",
    "AUSTRALIA", "INDIA", "RUSSIA", "EGYPT", "GREECE", "TURKEY", "THAILAND", "PORTUGAL",
    "NETHERLANDS", "SWITZERLAND", "ARGENTINA", "COLOMBIA", "BANGLADESH", "PHILIPPINES",
];

pub const FOOD: &[&str] = &[
    "PIZZA", "BURGER", "PASTA", "SALAD", "SOUP", "BREAD", "CAKE", "APPLE", "BANANA", "ORANGE",
    "SANDWICH", "CHOCOLATE", "COOKIES", "PANCAKES", "WAFFLES", "LASAGNA", "SPAGHETTI", "TACOS",
    "QUESADILLA", "CHEESECAKE", "STRAWBERRY", "WATERMELON", "PINEAPPLE", "AVOCADO",
];

pub const SPORTS: &[&str] = &[
    "SOCCER", "FOOTBALL", "BASKETBALL", "TENNIS", "GOLF", "BASEBALL", "HOCKEY", "SWIMMING",
    "BOXING", "RUGBY", "VOLLEYBALL", "BADMINTON", "CYCLING", "RUNNING", "SKIING", "SURFING",
    "WRESTLING", "GYMNASTICS", "SKATEBOARD", "SNOWBOARDING", "ARCHERY", "BOWLING", "CRICKET",
    "LACROSSE",
];

pub const TECHNOLOGY: &[&str] = &[
    "COMPUTER", "PHONE", "LAPTOP", "TABLET", "MOUSE", "KEYBOARD", "MONITOR", "CAMERA", "ROBOT",
    "INTERNET", "SOFTWARE", "HARDWARE", "WEBSITE", "DATABASE", "NETWORK", "SECURITY", "ALGORITHM",
    "PROGRAMMING", "SMARTPHONE", "ARTIFICIAL", "BLOCKCHAIN", "CYBERSECURITY", "MACHINE", "LEARNING",
];

pub const MIXED: &[&str] = &[
    "MUSIC", "BOOK", "MOVIE", "GAME", "SCHOOL", "HOUSE", "CAR", "TREE", "FLOWER", "MOUNTAIN",
    "OCEAN", "RIVER", "CLOUD", "RAINBOW", "SUNSHINE", "ADVENTURE", "FRIENDSHIP", "FAMILY",
    "HOLIDAY", "BIRTHDAY", "CELEBRATION", "JOURNEY", "DISCOVERY", "IMAGINATION",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Animals,
    Countries,
    Food,
    Sports,
    Technology,
    Mixed,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Animals,
        Category::Countries,
        Category::Food,
        Category::Sports,
        Category::Technology,
        Category::Mixed,
    ];

    /// Parse the `data-category` value used by the markup.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub const fn key(self) -> &'static str {
        match self {
            Category::Animals => "animals",
            Category::Countries => "countries",
            Category::Food => "food",
            Category::Sports => "sports",
            Category::Technology => "technology",
            Category::Mixed => "mixed",
        }
    }

    pub const fn words(self) -> &'static [&'static str] {
        match self {
            Category::Animals => ANIMALS,
            Category::Countries => COUNTRIES,
            Category::Food => FOOD,
            Category::Sports => SPORTS,
            Category::Technology => TECHNOLOGY,
            Category::Mixed => MIXED,
        }
    }
}

// -----------------------------------------------------------------------------
// Difficulty presets
// -----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultySettings {
    pub grid_size: usize,
    pub word_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }

    pub const fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub const fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings { grid_size: 10, word_count: 8 },
            Difficulty::Medium => DifficultySettings { grid_size: 15, word_count: 12 },
            Difficulty::Hard => DifficultySettings { grid_size: 20, word_count: 16 },
        }
    }
}

/// Uniform sample of `count` distinct entries from `pool` (all of them if the
/// pool is smaller).
pub fn pick_words<R: Rng + ?Sized>(pool: &[&str], count: usize, rng: &mut R) -> Vec<String> {
    pool.choose_multiple(rng, count)
        .map(|w| (*w).to_owned())
        .collect()
}

// -----------------------------------------------------------------------------
// Custom word input
// -----------------------------------------------------------------------------

pub const MIN_WORD_LEN: usize = 3;
pub const MAX_WORD_LEN: usize = 12;
pub const MIN_CUSTOM_WORDS: usize = 5;
pub const MAX_CUSTOM_WORDS: usize = 15;
pub const MIN_GRID_SIZE: usize = 8;
pub const MAX_GRID_SIZE: usize = 20;

/// Rejected custom-game input. The message is shown to the player verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordListError {
    #[error("Please enter some words!")]
    Empty,
    #[error("Please enter at least 5 valid words (3-12 letters each)!")]
    TooFew { valid: usize },
    #[error("Maximum 15 words allowed!")]
    TooMany { valid: usize },
    #[error("Grid size must be between 8 and 20, got {0}")]
    GridSizeOutOfRange(usize),
}

fn is_valid_word(word: &str) -> bool {
    (MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()) && word.bytes().all(|b| b.is_ascii_uppercase())
}

/// One word per line. Lines are trimmed and uppercased; blanks, non-letter
/// entries and words outside the length bounds are skipped, as are repeats.
pub fn parse_custom_words(text: &str) -> Result<Vec<String>, WordListError> {
    if text.trim().is_empty() {
        return Err(WordListError::Empty);
    }
    let mut words: Vec<String> = Vec::new();
    for line in text.lines() {
        let word = line.trim().to_uppercase();
        if is_valid_word(&word) && !words.contains(&word) {
            words.push(word);
        }
    }
    match words.len() {
        n if n < MIN_CUSTOM_WORDS => Err(WordListError::TooFew { valid: n }),
        n if n > MAX_CUSTOM_WORDS => Err(WordListError::TooMany { valid: n }),
        _ => Ok(words),
    }
}

pub fn validate_grid_size(size: usize) -> Result<usize, WordListError> {
    if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(WordListError::GridSizeOutOfRange(size))
    }
}
