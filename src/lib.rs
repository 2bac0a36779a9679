// Library interface for ordle
// This allows integration tests to access internal modules

pub mod alphabet;
pub mod cli;
pub mod date_key;
pub mod feedback;
pub mod game_state;
pub mod hard_mode;
pub mod logging;
pub mod session;
pub mod storage;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use alphabet::Alphabet;
pub use date_key::DateKey;
pub use feedback::{Feedback, GuessCheck, compute_feedback, letter_hints};
pub use game_state::{Game, GameState, LetterRejection, Outcome, Rules, Submission};
pub use hard_mode::{HardModeConstraints, HardModeViolation, validate_hard_mode_guess};
pub use session::{GameInterface, Session, UserAction, game_loop};
pub use storage::{Config, FileStorage, MemoryStorage, Storage};
pub use wordbank::{
    WordBank, WordBankError, WordList, load_wordbank_from_file, load_wordbank_from_str,
};
