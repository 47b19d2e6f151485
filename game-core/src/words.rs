use game_types::GameError;
use rand::seq::IndexedRandom;

static DEFAULT_WORDS: &str = include_str!("../words/default.txt");

/// Source of secret words for new games.
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Parse a newline-separated word list. Blank lines and `#` comments are
    /// skipped; entries are lower-cased and must be ASCII alphabetic.
    pub fn from_word_list(raw: &str) -> Result<Self, GameError> {
        let words: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .filter(|word| word.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();

        if words.is_empty() {
            return Err(GameError::Configuration("word list is empty".to_string()));
        }

        Ok(Self { words })
    }

    pub fn from_file(path: &str) -> Result<Self, GameError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| GameError::Configuration(format!("cannot read {path}: {err}")))?;
        Self::from_word_list(&raw)
    }

    /// The word list compiled into the binary.
    pub fn embedded() -> Result<Self, GameError> {
        Self::from_word_list(DEFAULT_WORDS)
    }

    /// Draw one word uniformly at random.
    pub fn pick_secret_word(&self) -> Result<String, GameError> {
        self.words
            .choose(&mut rand::rng())
            .cloned()
            .ok_or_else(|| GameError::Configuration("word list is empty".to_string()))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Whether `letter` occurs anywhere in `word`. Callers lower-case both sides.
pub fn contains_letter(word: &str, letter: char) -> bool {
    word.contains(letter)
}
