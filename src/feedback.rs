//! Per-letter feedback for a guess against the solution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    /// Right letter, right position (green)
    Correct,
    /// Letter occurs elsewhere in the solution (yellow)
    Present,
    /// Letter not in the solution, or every copy already claimed (grey)
    Absent,
}

impl Feedback {
    pub fn to_emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬛',
        }
    }

    // Higher wins when several rows disagree about a letter.
    fn rank(self) -> u8 {
        match self {
            Self::Correct => 2,
            Self::Present => 1,
            Self::Absent => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessCheck {
    pub feedback: Vec<Feedback>,
    pub correct: bool,
}

/// Score `guess` against `solution`.
///
/// Both slices must have the same length and hold normalized letters.
///
/// # Algorithm
/// 1. First pass: exact matches are `Correct` and their letter is consumed
///    from the working copies of both words.
/// 2. Second pass, left to right: a remaining guess letter that still occurs
///    in the working solution is `Present` and consumes one copy; otherwise
///    it is `Absent`.
///
/// A letter is therefore never reported Correct or Present more often than
/// it occurs in the solution, and the leftmost guess position wins a contested copy.
pub fn compute_feedback(guess: &[char], solution: &[char]) -> GuessCheck {
    debug_assert_eq!(guess.len(), solution.len());

    let mut feedback = vec![Feedback::Absent; guess.len()];
    let mut remaining: Vec<Option<char>> = solution.iter().copied().map(Some).collect();
    let mut unmatched: Vec<Option<char>> = guess.iter().copied().map(Some).collect();

    // First pass: greens
    for (i, (g, s)) in guess.iter().zip(solution).enumerate() {
        if g == s {
            feedback[i] = Feedback::Correct;
            remaining[i] = None;
            unmatched[i] = None;
        }
    }

    // Second pass: yellows
    for (i, letter) in unmatched.iter().enumerate() {
        let Some(letter) = *letter else {
            continue;
        };
        if let Some(slot) = remaining.iter_mut().find(|slot| **slot == Some(letter)) {
            feedback[i] = Feedback::Present;
            *slot = None;
        }
    }

    let correct = feedback.iter().all(|&f| f == Feedback::Correct);
    GuessCheck { feedback, correct }
}

/// Render a feedback row as emoji tiles, e.g. "🟩🟨⬛⬛🟩".
pub fn to_emoji_row(feedback: &[Feedback]) -> String {
    feedback.iter().map(|f| f.to_emoji()).collect()
}

/// Best feedback each guessed letter has received so far (Correct > Present > Absent).
pub fn letter_hints(
    guesses: &[Vec<Option<char>>],
    feedback_rows: &[Vec<Option<Feedback>>],
) -> BTreeMap<char, Feedback> {
    let mut hints: BTreeMap<char, Feedback> = BTreeMap::new();
    for (guess, feedback) in guesses.iter().zip(feedback_rows) {
        for (letter, fb) in guess.iter().zip(feedback) {
            let (Some(letter), Some(fb)) = (*letter, *fb) else {
                continue;
            };
            hints
                .entry(letter)
                .and_modify(|best| {
                    if fb.rank() > best.rank() {
                        *best = fb;
                    }
                })
                .or_insert(fb);
        }
    }
    hints
}
