use crate::date_key::DateKey;
use crate::feedback::{Feedback, to_emoji_row};
use crate::game_state::{GameState, LetterRejection, Outcome, Rules, Submission};
use crate::session::{GameInterface, UserAction};
use clap::Parser;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Daily word puzzle: guess the word in six tries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Play the puzzle for this day (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub date: Option<DateKey>,

    /// Turn hard mode on and remember it
    #[arg(long, conflicts_with = "easy")]
    pub hard: bool,

    /// Turn hard mode off and remember it
    #[arg(long)]
    pub easy: bool,

    /// Directory for saved games and settings
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Keep this game in memory only
    #[arg(long)]
    pub no_save: bool,

    /// Use the 26-letter Latin alphabet instead of the Danish one
    #[arg(long)]
    pub latin: bool,

    /// Log game events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn hard_mode_override(&self) -> Option<bool> {
        match (self.hard, self.easy) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn parse_action(input: &str) -> Option<UserAction> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match input.to_lowercase().as_str() {
        "exit" => Some(UserAction::Exit),
        "?" => Some(UserAction::Hints),
        _ => Some(UserAction::Guess(input.to_string())),
    }
}

fn format_row(guess: &[Option<char>], feedback: &[Option<Feedback>]) -> String {
    let tiles: Vec<Feedback> = feedback.iter().flatten().copied().collect();
    let letters: String = guess.iter().map(|c| c.unwrap_or('_')).collect();
    format!("{}  {}", to_emoji_row(&tiles), letters)
}

fn format_hints(hints: &BTreeMap<char, Feedback>) -> String {
    if hints.is_empty() {
        return "No letters guessed yet.".to_string();
    }
    hints
        .iter()
        .map(|(letter, fb)| format!("{letter}{}", fb.to_emoji()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Line-based front end: one guess per line.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_welcome(&mut self, date: DateKey, rules: &Rules, hard_mode: bool) -> io::Result<()> {
        writeln!(
            self.writer,
            "Ordle {date}: guess the {}-letter word in {} tries.",
            rules.word_length, rules.max_attempts
        )?;
        if hard_mode {
            writeln!(self.writer, "Hard mode is on: revealed hints must be used.")?;
        }
        Ok(())
    }

    fn display_board(&mut self, state: &GameState) -> io::Result<()> {
        for (guess, feedback) in state.scored_rows() {
            writeln!(self.writer, "{}", format_row(guess, feedback))?;
        }
        Ok(())
    }

    fn read_action(&mut self) -> io::Result<Option<UserAction>> {
        writeln!(self.writer, "\nEnter your guess ('?' for hints, 'exit' to quit):")?;
        self.writer.flush()?;
        let mut input = String::new();
        // End of input leaves the game like `exit` does
        if self.reader.read_line(&mut input)? == 0 {
            return Ok(Some(UserAction::Exit));
        }
        Ok(parse_action(&input))
    }

    fn display_letter_rejection(&mut self, ch: char, rejection: LetterRejection) -> io::Result<()> {
        match rejection {
            LetterRejection::InvalidCharacter => {
                writeln!(self.writer, "'{ch}' is not a letter in this game.")
            }
            LetterRejection::RowFull => writeln!(self.writer, "Too many letters."),
            LetterRejection::GameOver => writeln!(self.writer, "The game is already over."),
        }
    }

    fn display_submission(&mut self, guess: &str, submission: &Submission) -> io::Result<()> {
        match submission {
            Submission::Accepted { feedback, .. } => writeln!(
                self.writer,
                "{}  {}",
                to_emoji_row(feedback),
                guess.to_uppercase()
            ),
            Submission::Incomplete => writeln!(self.writer, "Not enough letters."),
            Submission::InvalidWord => {
                writeln!(self.writer, "{} is not in the word list.", guess.to_uppercase())
            }
            Submission::HardModeViolation(violation) => {
                writeln!(self.writer, "Hard mode: {violation}.")
            }
            Submission::GameOver => writeln!(self.writer, "The game is already over."),
        }
    }

    fn display_hints(&mut self, hints: &BTreeMap<char, Feedback>) -> io::Result<()> {
        writeln!(self.writer, "{}", format_hints(hints))
    }

    fn display_result(
        &mut self,
        outcome: Outcome,
        attempts: usize,
        solution: &str,
    ) -> io::Result<()> {
        match outcome {
            Outcome::Victory => writeln!(
                self.writer,
                "Solved in {attempts}! The word was {solution}."
            ),
            Outcome::Defeat => writeln!(self.writer, "Out of tries. The word was {solution}."),
            Outcome::Unsettled => Ok(()),
        }
    }

    fn display_exit_message(&mut self) -> io::Result<()> {
        writeln!(self.writer, "Exiting. Your progress is saved for today.")
    }
}
