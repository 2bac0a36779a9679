use crate::alphabet::Alphabet;
use crate::game_state::Rules;
use crate::info_log;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.txt");

/// Dictionary and daily-solution source the game consults.
pub trait WordList {
    /// Whether `word` is a valid guess. Case and accents are normalized first.
    fn contains(&self, word: &str) -> bool;

    /// The solution for a day, counted from 1970-01-01.
    fn solution_for_day(&self, day_index: i64) -> &str;
}

#[derive(Debug)]
pub enum WordBankError {
    Io(io::Error),
    /// No line of the source was a usable word.
    Empty,
}

impl fmt::Display for WordBankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "could not read word list: {e}"),
            Self::Empty => write!(f, "word list has no usable words"),
        }
    }
}

impl std::error::Error for WordBankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Empty => None,
        }
    }
}

impl From<io::Error> for WordBankError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Normalize one list entry, or `None` if it is not a word for these rules.
pub fn normalize_entry(line: &str, word_length: usize, alphabet: &Alphabet) -> Option<String> {
    let letters = alphabet.normalize_word(line)?;
    (letters.len() == word_length).then(|| letters.into_iter().collect())
}

pub fn load_wordbank_from_str(data: &str, rules: &Rules) -> Vec<String> {
    dedup(
        data.lines()
            .filter_map(|line| normalize_entry(line, rules.word_length, &rules.alphabet)),
    )
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P, rules: &Rules) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_entry(&line?, rules.word_length, &rules.alphabet) {
            words.push(word);
        }
    }
    Ok(dedup(words))
}

// Keeps the first occurrence so day indices stay stable.
fn dedup(words: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .into_iter()
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// Fixed, deduplicated, uppercase word list.
///
/// Every word is both a valid guess and a possible solution. Never empty.
#[derive(Debug, Clone)]
pub struct WordBank {
    words: Vec<String>,
    index: HashSet<String>,
    alphabet: Alphabet,
}

impl WordBank {
    /// Build from raw entries; invalid ones are skipped.
    pub fn from_words<I, S>(words: I, rules: &Rules) -> Result<Self, WordBankError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = dedup(words.into_iter().filter_map(|w| {
            normalize_entry(w.as_ref(), rules.word_length, &rules.alphabet)
        }));
        Self::build(words, rules)
    }

    pub fn embedded(rules: &Rules) -> Result<Self, WordBankError> {
        Self::build(load_wordbank_from_str(EMBEDDED_WORDBANK, rules), rules)
    }

    /// One word per line; blank or invalid lines are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P, rules: &Rules) -> Result<Self, WordBankError> {
        Self::build(load_wordbank_from_file(path, rules)?, rules)
    }

    fn build(words: Vec<String>, rules: &Rules) -> Result<Self, WordBankError> {
        if words.is_empty() {
            return Err(WordBankError::Empty);
        }
        info_log!("WordBank::build() - {} words", words.len());
        let index = words.iter().cloned().collect();
        Ok(Self {
            words,
            index,
            alphabet: rules.alphabet.clone(),
        })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordList for WordBank {
    fn contains(&self, word: &str) -> bool {
        self.alphabet
            .normalize_word(word)
            .is_some_and(|letters| self.index.contains(&letters.into_iter().collect::<String>()))
    }

    fn solution_for_day(&self, day_index: i64) -> &str {
        let len = self.words.len() as i64;
        let slot = day_index.rem_euclid(len) as usize;
        &self.words[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_wordbank_from_str_normalizes() {
        let words = load_wordbank_from_str("dansk\n  Holde \nforår\n", &Rules::default());
        assert_eq!(words, vec!["DANSK", "HOLDE", "FORÅR"]);
    }

    #[test]
    fn test_load_wordbank_skips_invalid_entries() {
        let data = "dansk\nhold\nholder\nk4ffe\n\nen-to\ncafés\n";
        let words = load_wordbank_from_str(data, &Rules::default());
        // cafés folds to CAFES
        assert_eq!(words, vec!["DANSK", "CAFES"]);
    }

    #[test]
    fn test_load_wordbank_drops_duplicates_keeping_order() {
        let words = load_wordbank_from_str("holde\ndansk\nHOLDE\nkaffe\n", &Rules::default());
        assert_eq!(words, vec!["HOLDE", "DANSK", "KAFFE"]);
    }

    #[test]
    fn test_embedded_wordbank_is_clean() {
        let rules = Rules::default();
        let bank = WordBank::embedded(&rules).unwrap();
        let raw_lines = EMBEDDED_WORDBANK.lines().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(bank.len(), raw_lines, "every embedded line should be a valid word");
        assert!(bank.contains("dansk"));
        assert!(
            bank.words()
                .iter()
                .all(|w| w.chars().count() == rules.word_length)
        );
    }

    #[test]
    fn test_contains_is_case_and_accent_insensitive() {
        let bank = WordBank::from_words(["KAFFE", "FORÅR", "CAFES"], &Rules::default()).unwrap();
        assert!(bank.contains("kaffe"));
        assert!(bank.contains("forår"));
        assert!(bank.contains("FORÅR"));
        assert!(bank.contains("cafés"));
        assert!(!bank.contains("KAFFEE"));
        assert!(!bank.contains("TABEL"));
        assert!(!bank.contains("KAF3E"));
    }

    #[test]
    fn test_solution_for_day_cycles_through_list() {
        let bank = WordBank::from_words(["DANSK", "HOLDE", "KAFFE"], &Rules::default()).unwrap();
        assert_eq!(bank.solution_for_day(0), "DANSK");
        assert_eq!(bank.solution_for_day(1), "HOLDE");
        assert_eq!(bank.solution_for_day(2), "KAFFE");
        assert_eq!(bank.solution_for_day(3), "DANSK");
        assert_eq!(bank.solution_for_day(20_000), bank.solution_for_day(20_000 % 3));
        // Days before the epoch still land inside the list
        assert_eq!(bank.solution_for_day(-1), "KAFFE");
    }

    #[test]
    fn test_empty_wordbank_is_an_error() {
        let result = WordBank::from_words(["no", "words", "here!"], &Rules::default());
        assert!(matches!(result, Err(WordBankError::Empty)));
    }

    #[test]
    fn test_latin_rules_skip_danish_words() {
        let rules = Rules {
            alphabet: Alphabet::latin(),
            ..Rules::default()
        };
        let words = load_wordbank_from_str("forår\nkaffe\n", &rules);
        assert_eq!(words, vec!["KAFFE"]);
    }

    #[test]
    fn test_wordbank_from_file() {
        let path = std::env::temp_dir().join("ordle_test_wordbank.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "dansk").unwrap();
            writeln!(file, "holde").unwrap();
            writeln!(file, "toolong").unwrap();
        }

        let bank = WordBank::from_file(&path, &Rules::default()).unwrap();
        assert_eq!(bank.words(), ["DANSK", "HOLDE"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = WordBank::from_file("/nonexistent/ordle/words.txt", &Rules::default());
        assert!(matches!(result, Err(WordBankError::Io(_))));
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("could not read word list"));
    }
}
