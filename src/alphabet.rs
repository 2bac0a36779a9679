//! Letter sets the puzzle is played over.
//!
//! Letters are stored uppercase. Normalization is case-insensitive and folds
//! accented letters to their base letter, unless the accented letter is itself
//! part of the alphabet (Æ, Ø and Å stay as they are in the Danish alphabet).

use std::collections::BTreeSet;
use std::fmt;

const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DANISH_EXTRA: &str = "ÆØÅ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: BTreeSet<char>,
}

impl Alphabet {
    /// Build an alphabet from the given letters, uppercasing each.
    ///
    /// Letters whose uppercase form is more than one character (e.g. `ß`) are skipped.
    pub fn new(letters: impl IntoIterator<Item = char>) -> Self {
        let letters = letters.into_iter().filter_map(single_uppercase).collect();
        Self { letters }
    }

    pub fn latin() -> Self {
        Self::new(LATIN.chars())
    }

    pub fn danish() -> Self {
        Self::new(LATIN.chars().chain(DANISH_EXTRA.chars()))
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Map a typed character onto a letter of this alphabet, if it has one.
    pub fn normalize(&self, ch: char) -> Option<char> {
        let upper = single_uppercase(ch)?;
        if self.contains(upper) {
            return Some(upper);
        }
        fold_diacritic(upper).filter(|&base| self.contains(base))
    }

    /// `None` if any character falls outside the alphabet.
    pub fn normalize_word(&self, word: &str) -> Option<Vec<char>> {
        word.trim().chars().map(|c| self.normalize(c)).collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::danish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.letters {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

fn single_uppercase(ch: char) -> Option<char> {
    let mut upper = ch.to_uppercase();
    let first = upper.next()?;
    match upper.next() {
        Some(_) => None,
        None => Some(first),
    }
}

fn fold_diacritic(upper: char) -> Option<char> {
    let base = match upper {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' => 'A',
        'Ç' => 'C',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ñ' => 'N',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'Ý' => 'Y',
        _ => return None,
    };
    Some(base)
}
