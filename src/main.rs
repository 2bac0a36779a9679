use ordle::cli::{Cli, CliInterface, parse_cli};
use ordle::{
    Alphabet, DateKey, FileStorage, MemoryStorage, Rules, Session, Storage, WordBank, game_loop,
    logging,
};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let rules = if cli.latin {
        Rules {
            alphabet: Alphabet::latin(),
            ..Rules::default()
        }
    } else {
        Rules::default()
    };

    let words = match &cli.wordbank_path {
        Some(path) => match WordBank::from_file(path, &rules) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load word bank from '{}': {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => match WordBank::embedded(&rules) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load the built-in word bank: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let result = if cli.no_save {
        play(MemoryStorage::new(), &words, rules, &cli)
    } else {
        let storage = match &cli.data_dir {
            Some(dir) => FileStorage::open(dir),
            None => FileStorage::open_default(),
        };
        storage.and_then(|storage| play(storage, &words, rules, &cli))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn play<S: Storage>(storage: S, words: &WordBank, rules: Rules, cli: &Cli) -> io::Result<()> {
    let date = cli.date.unwrap_or_else(DateKey::today);
    let mut session = Session::open(storage, words, rules, date)?;
    if let Some(hard_mode) = cli.hard_mode_override() {
        session.set_hard_mode(hard_mode)?;
    }

    let stdin = io::stdin();
    let mut interface = CliInterface::new(stdin.lock(), io::stdout());
    game_loop(&mut session, &mut interface)?;
    Ok(())
}
