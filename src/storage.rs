//! Saved games and settings.
//!
//! Games are partitioned by calendar day: one JSON file per [`DateKey`], so
//! a new day simply finds nothing and starts fresh.

use crate::date_key::DateKey;
use crate::game_state::GameState;
use crate::{debug_log, warn_log};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "ordle-config.json";
const GAME_FILE_PREFIX: &str = "ordle-game-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hard_mode: bool,
}

pub trait Storage {
    fn load_state(&self, date: DateKey) -> io::Result<Option<GameState>>;
    fn save_state(&mut self, date: DateKey, state: &GameState) -> io::Result<()>;
    fn load_config(&self) -> io::Result<Config>;
    fn save_config(&mut self, config: &Config) -> io::Result<()>;
}

/// `dirs::data_dir()/ordle`, or `~/.ordle` when there is no data dir.
pub fn default_data_dir() -> io::Result<PathBuf> {
    if let Some(dir) = dirs::data_dir() {
        return Ok(dir.join("ordle"));
    }
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(".ordle"))
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir`, creating it if needed.
    pub fn open<P: Into<PathBuf>>(dir: P) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn open_default() -> io::Result<Self> {
        Self::open(default_data_dir()?)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn game_path(&self, date: DateKey) -> PathBuf {
        self.dir.join(format!("{GAME_FILE_PREFIX}{date}.json"))
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }
}

// Missing file is `None`; a file that does not parse is logged and treated as missing.
fn read_json<T: DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    match serde_json::from_str(&json) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn_log!("Ignoring unreadable save file {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

// The old file stays intact until the new one is fully written.
fn write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let tmp_path = temp_path(path);
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    debug_log!("Saved {}", path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

impl Storage for FileStorage {
    fn load_state(&self, date: DateKey) -> io::Result<Option<GameState>> {
        read_json(&self.game_path(date))
    }

    fn save_state(&mut self, date: DateKey, state: &GameState) -> io::Result<()> {
        write_json(&self.game_path(date), state)
    }

    fn load_config(&self) -> io::Result<Config> {
        Ok(read_json(&self.config_path())?.unwrap_or_default())
    }

    fn save_config(&mut self, config: &Config) -> io::Result<()> {
        write_json(&self.config_path(), config)
    }
}

/// Keeps everything in memory; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    games: HashMap<DateKey, GameState>,
    config: Config,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn saved_days(&self) -> usize {
        self.games.len()
    }
}

impl Storage for MemoryStorage {
    fn load_state(&self, date: DateKey) -> io::Result<Option<GameState>> {
        Ok(self.games.get(&date).cloned())
    }

    fn save_state(&mut self, date: DateKey, state: &GameState) -> io::Result<()> {
        self.games.insert(date, state.clone());
        Ok(())
    }

    fn load_config(&self) -> io::Result<Config> {
        Ok(self.config)
    }

    fn save_config(&mut self, config: &Config) -> io::Result<()> {
        self.config = *config;
        Ok(())
    }
}
