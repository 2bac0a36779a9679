//! One player's game for one calendar day, kept in step with storage.
//!
//! [`Session`] wraps a [`Game`] and writes the board back after every change,
//! so quitting at any point and reopening the same day resumes where the
//! player left off. [`game_loop`] drives a session from any [`GameInterface`].

use crate::date_key::DateKey;
use crate::feedback::Feedback;
use crate::game_state::{Game, GameState, LetterRejection, Outcome, Rules, Submission};
use crate::storage::{Config, Storage};
use crate::wordbank::WordList;
use crate::{debug_log, info_log, warn_log};
use std::collections::BTreeMap;
use std::io;

pub struct Session<'w, S: Storage> {
    game: Game<'w>,
    storage: S,
    date: DateKey,
}

impl<'w, S: Storage> Session<'w, S> {
    /// Load the game for `date`, or create and save a fresh one.
    ///
    /// A stored board that does not match `rules` is replaced.
    pub fn open(
        mut storage: S,
        words: &'w dyn WordList,
        rules: Rules,
        date: DateKey,
    ) -> io::Result<Self> {
        let config = storage.load_config()?;
        let solution = words.solution_for_day(date.day_index()).to_string();
        if !rules.accepts_solution(&solution) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("solution for {date} does not fit a {}-letter board", rules.word_length),
            ));
        }

        let stored = match storage.load_state(date)? {
            Some(state) if state.fits(&rules) => Some(state),
            Some(_) => {
                warn_log!("Discarding saved game for {} that does not match the rules", date);
                None
            }
            None => None,
        };
        let state = match stored {
            Some(state) => {
                info_log!("Session::open() - resuming {} at row {}", date, state.current_row());
                state
            }
            None => {
                info_log!("Session::open() - new game for {}", date);
                let state = GameState::new(&rules);
                storage.save_state(date, &state)?;
                state
            }
        };

        let game = Game::resume(state, rules, words, &solution).with_hard_mode(config.hard_mode);
        Ok(Self {
            game,
            storage,
            date,
        })
    }

    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn game(&self) -> &Game<'w> {
        &self.game
    }

    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    pub fn rules(&self) -> &Rules {
        self.game.rules()
    }

    pub fn outcome(&self) -> Outcome {
        self.game.outcome()
    }

    pub fn hard_mode(&self) -> bool {
        self.game.hard_mode()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Switch hard mode and remember the choice for later days.
    pub fn set_hard_mode(&mut self, hard_mode: bool) -> io::Result<()> {
        self.game.set_hard_mode(hard_mode);
        self.storage.save_config(&Config { hard_mode })
    }

    pub fn start(&mut self) -> io::Result<bool> {
        let changed = self.game.start();
        if changed {
            self.save()?;
        }
        Ok(changed)
    }

    pub fn add_letter(&mut self, ch: char) -> io::Result<Result<usize, LetterRejection>> {
        let result = self.game.add_letter(ch);
        if result.is_ok() {
            self.save()?;
        }
        Ok(result)
    }

    pub fn remove_letter(&mut self) -> io::Result<Option<usize>> {
        let result = self.game.remove_letter();
        if result.is_some() {
            self.save()?;
        }
        Ok(result)
    }

    /// Empty the row being edited. Returns how many letters were removed.
    pub fn clear_row(&mut self) -> io::Result<usize> {
        let mut removed = 0;
        while self.game.remove_letter().is_some() {
            removed += 1;
        }
        if removed > 0 {
            self.save()?;
        }
        Ok(removed)
    }

    pub fn submit_guess(&mut self) -> io::Result<Submission> {
        let submission = self.game.submit_guess();
        if matches!(submission, Submission::Accepted { .. }) {
            self.save()?;
        }
        Ok(submission)
    }

    fn save(&mut self) -> io::Result<()> {
        self.storage.save_state(self.date, self.game.state())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Hints,
    Exit,
}

/// Front end a session is played through.
pub trait GameInterface {
    fn display_welcome(&mut self, date: DateKey, rules: &Rules, hard_mode: bool) -> io::Result<()>;
    fn display_board(&mut self, state: &GameState) -> io::Result<()>;
    /// `None` means nothing usable was entered; ask again.
    fn read_action(&mut self) -> io::Result<Option<UserAction>>;
    fn display_letter_rejection(&mut self, ch: char, rejection: LetterRejection) -> io::Result<()>;
    fn display_submission(&mut self, guess: &str, submission: &Submission) -> io::Result<()>;
    fn display_hints(&mut self, hints: &BTreeMap<char, Feedback>) -> io::Result<()>;
    fn display_result(
        &mut self,
        outcome: Outcome,
        attempts: usize,
        solution: &str,
    ) -> io::Result<()>;
    fn display_exit_message(&mut self) -> io::Result<()>;
}

/// Play `session` until the game ends or the player leaves.
///
/// Returns the outcome at that point.
pub fn game_loop<S, I>(session: &mut Session<'_, S>, interface: &mut I) -> io::Result<Outcome>
where
    S: Storage,
    I: GameInterface,
{
    interface.display_welcome(session.date(), session.rules(), session.hard_mode())?;
    if session.state().current_row() > 0 {
        interface.display_board(session.state())?;
    }
    if session.outcome().is_terminal() {
        display_result(session, interface)?;
        return Ok(session.outcome());
    }
    session.start()?;
    // A half-typed row from an earlier run is not shown, so start clean
    session.clear_row()?;

    loop {
        let Some(action) = interface.read_action()? else {
            continue;
        };
        match action {
            UserAction::Exit => {
                interface.display_exit_message()?;
                break;
            }
            UserAction::Hints => interface.display_hints(&session.state().letter_hints())?,
            UserAction::Guess(word) => {
                debug_log!("game_loop() - guess {:?}", word);
                if !type_word(session, interface, &word)? {
                    session.clear_row()?;
                    continue;
                }
                let submission = session.submit_guess()?;
                interface.display_submission(&word, &submission)?;
                if submission.finished().is_some() {
                    display_result(session, interface)?;
                    break;
                }
                if !matches!(submission, Submission::Accepted { .. }) {
                    session.clear_row()?;
                }
            }
        }
    }
    Ok(session.outcome())
}

// Types `word` into the current row, stopping at the first rejected letter.
fn type_word<S, I>(session: &mut Session<'_, S>, interface: &mut I, word: &str) -> io::Result<bool>
where
    S: Storage,
    I: GameInterface,
{
    for ch in word.chars() {
        if let Err(rejection) = session.add_letter(ch)? {
            interface.display_letter_rejection(ch, rejection)?;
            return Ok(false);
        }
    }
    Ok(true)
}

fn display_result<S, I>(session: &Session<'_, S>, interface: &mut I) -> io::Result<()>
where
    S: Storage,
    I: GameInterface,
{
    let solution = session.game().revealed_solution().unwrap_or_default();
    interface.display_result(session.outcome(), session.state().current_row(), &solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::wordbank::WordBank;

    // Day 0 is DANSK
    fn bank() -> WordBank {
        WordBank::from_words(["DANSK", "HOLDE", "KAFFE", "BANSK"], &Rules::default()).unwrap()
    }

    fn day(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn epoch() -> DateKey {
        day("1970-01-01")
    }

    fn open_fresh(words: &WordBank) -> Session<'_, MemoryStorage> {
        Session::open(MemoryStorage::new(), words, Rules::default(), epoch()).unwrap()
    }

    fn type_and_submit(session: &mut Session<'_, MemoryStorage>, word: &str) -> Submission {
        for ch in word.chars() {
            session.add_letter(ch).unwrap().unwrap();
        }
        session.submit_guess().unwrap()
    }

    #[test]
    fn test_open_creates_and_saves_fresh_state() {
        let words = bank();
        let session = open_fresh(&words);
        assert_eq!(session.state(), &GameState::new(&Rules::default()));
        assert_eq!(session.storage().saved_days(), 1);
        assert!(!session.hard_mode());
    }

    #[test]
    fn test_every_change_is_saved() {
        let words = bank();
        let mut session = open_fresh(&words);

        session.add_letter('h').unwrap().unwrap();
        let stored = session.storage().load_state(epoch()).unwrap().unwrap();
        assert_eq!(stored.guesses()[0][0], Some('H'));

        session.remove_letter().unwrap();
        let stored = session.storage().load_state(epoch()).unwrap().unwrap();
        assert_eq!(stored.guesses()[0][0], None);

        type_and_submit(&mut session, "HOLDE");
        let stored = session.storage().load_state(epoch()).unwrap().unwrap();
        assert_eq!(stored.current_row(), 1);
        assert_eq!(&stored, session.state());
    }

    #[test]
    fn test_reopen_resumes_same_day() {
        let words = bank();
        let mut session = open_fresh(&words);
        type_and_submit(&mut session, "HOLDE");
        let storage = session.into_storage();

        let mut session = Session::open(storage, &words, Rules::default(), epoch()).unwrap();
        assert_eq!(session.state().current_row(), 1);
        assert_eq!(type_and_submit(&mut session, "DANSK").finished(), Some(Outcome::Victory));
    }

    #[test]
    fn test_next_day_starts_fresh() {
        let words = bank();
        let mut session = open_fresh(&words);
        type_and_submit(&mut session, "DANSK");
        let storage = session.into_storage();

        let next = Session::open(storage, &words, Rules::default(), day("1970-01-02")).unwrap();
        assert_eq!(next.outcome(), Outcome::Unsettled);
        assert_eq!(next.state().current_row(), 0);
        assert_eq!(next.storage().saved_days(), 2);
    }

    #[test]
    fn test_mismatched_saved_state_is_replaced() {
        let words = bank();
        let mut storage = MemoryStorage::new();
        let longer_words = Rules {
            word_length: 6,
            ..Rules::default()
        };
        storage.save_state(epoch(), &GameState::new(&longer_words)).unwrap();

        let session = Session::open(storage, &words, Rules::default(), epoch()).unwrap();
        assert!(session.state().fits(&Rules::default()));
        let stored = session.storage().load_state(epoch()).unwrap().unwrap();
        assert!(stored.fits(&Rules::default()));
    }

    #[test]
    fn test_solution_length_must_match_rules() {
        let words = bank();
        let rules = Rules {
            word_length: 4,
            ..Rules::default()
        };
        let result = Session::open(MemoryStorage::new(), &words, rules, epoch());
        assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::InvalidInput));
    }

    #[test]
    fn test_hard_mode_comes_from_config_and_persists() {
        let words = bank();
        let storage = MemoryStorage::with_config(Config { hard_mode: true });
        let mut session = Session::open(storage, &words, Rules::default(), epoch()).unwrap();
        assert!(session.hard_mode());

        session.set_hard_mode(false).unwrap();
        assert!(!session.hard_mode());
        assert!(!session.storage().load_config().unwrap().hard_mode);
    }

    #[test]
    fn test_rejected_submission_is_not_saved_as_progress() {
        let words = bank();
        let mut session = open_fresh(&words);
        assert_eq!(type_and_submit(&mut session, "ABCDE"), Submission::InvalidWord);
        assert_eq!(session.clear_row().unwrap(), 5);

        let stored = session.storage().load_state(epoch()).unwrap().unwrap();
        assert_eq!(stored, GameState::new(&Rules::default()));
    }

    #[test]
    fn test_start_is_saved() {
        let words = bank();
        let mut session = open_fresh(&words);
        assert!(session.start().unwrap());
        assert!(!session.start().unwrap());
        assert!(session.storage().load_state(epoch()).unwrap().unwrap().started());
    }

    #[derive(Default)]
    struct ScriptedInterface {
        actions: Vec<UserAction>,
        submissions: Vec<Submission>,
        results: Vec<(Outcome, usize, String)>,
        boards_shown: usize,
        exited: bool,
    }

    impl GameInterface for ScriptedInterface {
        fn display_welcome(&mut self, _: DateKey, _: &Rules, _: bool) -> io::Result<()> {
            Ok(())
        }

        fn display_board(&mut self, _: &GameState) -> io::Result<()> {
            self.boards_shown += 1;
            Ok(())
        }

        fn read_action(&mut self) -> io::Result<Option<UserAction>> {
            if self.actions.is_empty() {
                return Ok(Some(UserAction::Exit));
            }
            Ok(Some(self.actions.remove(0)))
        }

        fn display_letter_rejection(&mut self, _: char, _: LetterRejection) -> io::Result<()> {
            Ok(())
        }

        fn display_submission(&mut self, _: &str, submission: &Submission) -> io::Result<()> {
            self.submissions.push(submission.clone());
            Ok(())
        }

        fn display_hints(&mut self, _: &BTreeMap<char, Feedback>) -> io::Result<()> {
            Ok(())
        }

        fn display_result(
            &mut self,
            outcome: Outcome,
            attempts: usize,
            solution: &str,
        ) -> io::Result<()> {
            self.results.push((outcome, attempts, solution.to_string()));
            Ok(())
        }

        fn display_exit_message(&mut self) -> io::Result<()> {
            self.exited = true;
            Ok(())
        }
    }

    #[test]
    fn test_game_loop_plays_to_victory() {
        let words = bank();
        let mut session = open_fresh(&words);
        let mut interface = ScriptedInterface {
            actions: vec![
                UserAction::Guess("kaf".into()),
                UserAction::Guess("holde".into()),
                UserAction::Hints,
                UserAction::Guess("dansk".into()),
            ],
            ..ScriptedInterface::default()
        };

        let outcome = game_loop(&mut session, &mut interface).unwrap();
        assert_eq!(outcome, Outcome::Victory);
        assert_eq!(interface.submissions.len(), 3);
        assert_eq!(interface.submissions[0], Submission::Incomplete);
        assert_eq!(interface.results, vec![(Outcome::Victory, 2, "DANSK".to_string())]);
        assert!(!interface.exited);
    }

    #[test]
    fn test_game_loop_on_finished_day_only_shows_result() {
        let words = bank();
        let mut session = open_fresh(&words);
        type_and_submit(&mut session, "DANSK");

        let mut interface = ScriptedInterface {
            actions: vec![UserAction::Guess("holde".into())],
            ..ScriptedInterface::default()
        };
        game_loop(&mut session, &mut interface).unwrap();
        assert_eq!(interface.boards_shown, 1);
        assert!(interface.submissions.is_empty());
        assert_eq!(interface.results.len(), 1);
    }

    #[test]
    fn test_game_loop_exit_keeps_progress() {
        let words = bank();
        let mut session = open_fresh(&words);
        let mut interface = ScriptedInterface {
            actions: vec![UserAction::Guess("holde".into()), UserAction::Exit],
            ..ScriptedInterface::default()
        };

        assert_eq!(game_loop(&mut session, &mut interface).unwrap(), Outcome::Unsettled);
        assert!(interface.exited);
        let stored = session.storage().load_state(epoch()).unwrap().unwrap();
        assert_eq!(stored.current_row(), 1);
        assert!(stored.started());
    }
}
