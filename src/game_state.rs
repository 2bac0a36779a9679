use crate::alphabet::Alphabet;
use crate::feedback::{Feedback, compute_feedback, letter_hints};
use crate::hard_mode::{HardModeConstraints, HardModeViolation};
use crate::wordbank::WordList;
use crate::{debug_log, info_log};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const WORD_LENGTH: usize = 5;
pub const MAX_ATTEMPTS: usize = 6;

/// Board dimensions and the letters a guess may use.
///
/// `word_length` and `max_attempts` must both be at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    pub word_length: usize,
    pub max_attempts: usize,
    pub alphabet: Alphabet,
}

impl Rules {
    /// Whether `solution` can be played under these rules: right length, alphabet letters only.
    pub fn accepts_solution(&self, solution: &str) -> bool {
        solution.chars().count() == self.word_length
            && solution.chars().all(|c| self.alphabet.contains(c))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            word_length: WORD_LENGTH,
            max_attempts: MAX_ATTEMPTS,
            alphabet: Alphabet::danish(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Unsettled,
    Victory,
    Defeat,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Unsettled)
    }
}

/// Everything needed to redraw or resume one day's game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    guesses: Vec<Vec<Option<char>>>,
    current_row: usize,
    feedback_rows: Vec<Vec<Option<Feedback>>>,
    revealed_rows: Vec<Vec<bool>>,
    outcome: Outcome,
    #[serde(default)]
    started: bool,
}

impl GameState {
    pub fn new(rules: &Rules) -> Self {
        let (rows, cols) = (rules.max_attempts, rules.word_length);
        Self {
            guesses: vec![vec![None; cols]; rows],
            current_row: 0,
            feedback_rows: vec![vec![None; cols]; rows],
            revealed_rows: vec![vec![false; cols]; rows],
            outcome: Outcome::Unsettled,
            started: false,
        }
    }

    pub fn guesses(&self) -> &[Vec<Option<char>>] {
        &self.guesses
    }

    pub fn feedback_rows(&self) -> &[Vec<Option<Feedback>>] {
        &self.feedback_rows
    }

    pub fn revealed_rows(&self) -> &[Vec<bool>] {
        &self.revealed_rows
    }

    /// Number of scored attempts.
    pub fn current_row(&self) -> usize {
        self.current_row
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn current_guess(&self) -> Option<&[Option<char>]> {
        self.guesses.get(self.current_row).map(Vec::as_slice)
    }

    pub fn scored_rows(&self) -> impl Iterator<Item = (&[Option<char>], &[Option<Feedback>])> {
        self.guesses
            .iter()
            .zip(&self.feedback_rows)
            .take(self.current_row)
            .map(|(guess, feedback)| (guess.as_slice(), feedback.as_slice()))
    }

    pub fn letter_hints(&self) -> BTreeMap<char, Feedback> {
        letter_hints(&self.guesses, &self.feedback_rows)
    }

    /// Whether a stored state has the shape `rules` expects and is internally consistent.
    pub fn fits(&self, rules: &Rules) -> bool {
        let (rows, cols) = (rules.max_attempts, rules.word_length);
        // An unsettled game always has a row left to edit
        let row_limit = if self.outcome.is_terminal() {
            rows
        } else {
            rows.saturating_sub(1)
        };

        has_shape(&self.guesses, rows, cols)
            && has_shape(&self.feedback_rows, rows, cols)
            && has_shape(&self.revealed_rows, rows, cols)
            && self.current_row <= row_limit
            && self
                .feedback_rows
                .iter()
                .skip(self.current_row)
                .all(|row| row.iter().all(Option::is_none))
    }

    // Letters of `row` when every cell is filled.
    fn complete_row(&self, row: usize) -> Option<Vec<char>> {
        self.guesses.get(row)?.iter().copied().collect()
    }
}

fn has_shape<T>(grid: &[Vec<T>], rows: usize, cols: usize) -> bool {
    grid.len() == rows && grid.iter().all(|row| row.len() == cols)
}

/// Why `add_letter` left the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterRejection {
    GameOver,
    RowFull,
    InvalidCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Accepted {
        row: usize,
        feedback: Vec<Feedback>,
        outcome: Outcome,
    },
    /// Not every cell of the current row is filled.
    Incomplete,
    /// The word is not in the dictionary.
    InvalidWord,
    /// The guess ignores something an earlier row revealed.
    HardModeViolation(HardModeViolation),
    /// The game already ended.
    GameOver,
}

impl Submission {
    /// Outcome reached by this submission, when it ended the game.
    pub fn finished(&self) -> Option<Outcome> {
        match self {
            Self::Accepted { outcome, .. } if outcome.is_terminal() => Some(*outcome),
            _ => None,
        }
    }
}

/// One day's game: the board plus the solution it is scored against.
pub struct Game<'w> {
    state: GameState,
    rules: Rules,
    hard_mode: bool,
    solution: Vec<char>,
    words: &'w dyn WordList,
}

impl<'w> Game<'w> {
    /// `solution` must be uppercase and satisfy `rules.accepts_solution`.
    pub fn new(rules: Rules, words: &'w dyn WordList, solution: &str) -> Self {
        let state = GameState::new(&rules);
        Self::resume(state, rules, words, solution)
    }

    /// Continue from a stored board.
    ///
    /// The caller checks `state.fits(&rules)` and `rules.accepts_solution(solution)` first.
    pub fn resume(
        state: GameState,
        rules: Rules,
        words: &'w dyn WordList,
        solution: &str,
    ) -> Self {
        debug_assert!(
            rules.accepts_solution(solution),
            "solution does not fit the rules"
        );
        Self {
            state,
            rules,
            hard_mode: false,
            solution: solution.chars().collect(),
            words,
        }
    }

    pub fn with_hard_mode(mut self, hard_mode: bool) -> Self {
        self.hard_mode = hard_mode;
        self
    }

    pub fn set_hard_mode(&mut self, hard_mode: bool) {
        self.hard_mode = hard_mode;
    }

    pub fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn revealed_solution(&self) -> Option<String> {
        self.state
            .outcome
            .is_terminal()
            .then(|| self.solution.iter().collect())
    }

    /// Leave the front screen. Returns true if the state changed.
    pub fn start(&mut self) -> bool {
        if self.state.started || self.state.outcome.is_terminal() {
            return false;
        }
        self.state.started = true;
        true
    }

    /// Write `ch` into the leftmost empty cell of the current row.
    pub fn add_letter(&mut self, ch: char) -> Result<usize, LetterRejection> {
        if self.state.outcome.is_terminal() {
            return Err(LetterRejection::GameOver);
        }
        let current_row = self.state.current_row;
        let Some(row) = self.state.guesses.get_mut(current_row) else {
            return Err(LetterRejection::GameOver);
        };
        let Some(col) = row.iter().position(Option::is_none) else {
            return Err(LetterRejection::RowFull);
        };
        let Some(letter) = self.rules.alphabet.normalize(ch) else {
            debug_log!("add_letter() - rejected {:?}", ch);
            return Err(LetterRejection::InvalidCharacter);
        };
        row[col] = Some(letter);
        debug_log!("add_letter() - row {} col {} = {}", current_row, col, letter);
        Ok(col)
    }

    /// Clear the rightmost filled cell of the current row.
    pub fn remove_letter(&mut self) -> Option<usize> {
        if self.state.outcome.is_terminal() {
            return None;
        }
        let current_row = self.state.current_row;
        let row = self.state.guesses.get_mut(current_row)?;
        let col = row.iter().rposition(Option::is_some)?;
        row[col] = None;
        debug_log!("remove_letter() - row {} col {} cleared", current_row, col);
        Some(col)
    }

    pub fn submit_guess(&mut self) -> Submission {
        self.submit_guess_with(|_| {})
    }

    /// Score the current row.
    ///
    /// `on_result` runs once, with the new outcome, when this submission ends the game.
    pub fn submit_guess_with<F: FnOnce(Outcome)>(&mut self, on_result: F) -> Submission {
        if self.state.outcome.is_terminal() {
            return Submission::GameOver;
        }
        let row = self.state.current_row;
        let Some(guess) = self.state.complete_row(row) else {
            return Submission::Incomplete;
        };
        let word: String = guess.iter().collect();

        if self.hard_mode && row > 0 {
            let constraints = HardModeConstraints::from_state(&self.state);
            if let Err(violation) = constraints.check(&guess) {
                info_log!("submit_guess() - {} rejected in hard mode: {}", word, violation);
                return Submission::HardModeViolation(violation);
            }
        }

        if !self.words.contains(&word) {
            info_log!("submit_guess() - {} is not in the word list", word);
            return Submission::InvalidWord;
        }

        let check = compute_feedback(&guess, &self.solution);
        self.state.feedback_rows[row] = check.feedback.iter().copied().map(Some).collect();
        self.state.revealed_rows[row].fill(true);
        self.state.outcome = if check.correct {
            Outcome::Victory
        } else if row + 1 == self.rules.max_attempts {
            Outcome::Defeat
        } else {
            Outcome::Unsettled
        };
        self.state.current_row += 1;
        info_log!(
            "submit_guess() - row {} scored {:?}, outcome {:?}",
            row,
            check.feedback,
            self.state.outcome
        );

        if self.state.outcome.is_terminal() {
            on_result(self.state.outcome);
        }

        Submission::Accepted {
            row,
            feedback: check.feedback,
            outcome: self.state.outcome,
        }
    }
}
