//! Hard mode: later guesses must use what earlier rows revealed.

use crate::feedback::Feedback;
use crate::game_state::GameState;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The first rule a hard-mode guess breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardModeViolation {
    /// A letter revealed as Correct is missing from its position (0-based).
    Position { index: usize, letter: char },
    /// A letter revealed as Present does not appear.
    MissingLetter(char),
    /// A letter ruled out by an Absent verdict appears.
    ExcludedLetter(char),
}

impl fmt::Display for HardModeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position { index, letter } => {
                write!(f, "letter {} must be {letter}", index + 1)
            }
            Self::MissingLetter(letter) => write!(f, "guess must contain {letter}"),
            Self::ExcludedLetter(letter) => write!(f, "{letter} is not in the word"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HardModeConstraints {
    positions: BTreeMap<usize, char>,
    required: BTreeSet<char>,
    excluded: BTreeSet<char>,
}

impl HardModeConstraints {
    /// Collect constraints from the scored rows of `state`.
    ///
    /// A letter marked Absent is only excluded if no row marked it Correct or
    /// Present: with one copy in the solution and two in a guess, the second
    /// copy comes back Absent without ruling the letter out.
    pub fn from_state(state: &GameState) -> Self {
        let mut constraints = Self::default();
        let mut absent = BTreeSet::new();

        for (guess, feedback) in state.scored_rows() {
            for (index, (letter, fb)) in guess.iter().zip(feedback).enumerate() {
                let (Some(letter), Some(fb)) = (*letter, *fb) else {
                    continue;
                };
                match fb {
                    Feedback::Correct => {
                        constraints.positions.insert(index, letter);
                    }
                    Feedback::Present => {
                        constraints.required.insert(letter);
                    }
                    Feedback::Absent => {
                        absent.insert(letter);
                    }
                }
            }
        }

        constraints.excluded = absent
            .into_iter()
            .filter(|letter| {
                !constraints.required.contains(letter)
                    && !constraints.positions.values().any(|fixed| fixed == letter)
            })
            .collect();
        constraints
    }

    pub fn positions(&self) -> &BTreeMap<usize, char> {
        &self.positions
    }

    pub fn required(&self) -> &BTreeSet<char> {
        &self.required
    }

    pub fn excluded(&self) -> &BTreeSet<char> {
        &self.excluded
    }

    /// Check `guess`, reporting the first broken rule.
    ///
    /// Positions are checked first, then required letters, then excluded letters.
    pub fn check(&self, guess: &[char]) -> Result<(), HardModeViolation> {
        for (&index, &letter) in &self.positions {
            if guess.get(index) != Some(&letter) {
                return Err(HardModeViolation::Position { index, letter });
            }
        }
        if let Some(&letter) = self.required.iter().find(|&&l| !guess.contains(&l)) {
            return Err(HardModeViolation::MissingLetter(letter));
        }
        if let Some(&letter) = guess.iter().find(|&&l| self.excluded.contains(&l)) {
            return Err(HardModeViolation::ExcludedLetter(letter));
        }
        Ok(())
    }

    pub fn is_satisfied_by(&self, guess: &[char]) -> bool {
        self.check(guess).is_ok()
    }
}

/// Whether `guess` respects everything the scored rows of `state` revealed.
///
/// Always true before the first guess is scored.
pub fn validate_hard_mode_guess(state: &GameState, guess: &[char]) -> bool {
    state.current_row() == 0 || HardModeConstraints::from_state(state).is_satisfied_by(guess)
}
