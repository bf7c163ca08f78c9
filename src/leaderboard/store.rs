use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info, warn};

use super::table::Leaderboard;

/// Where the highscore list lives between sessions
pub trait LeaderboardStore {
    /// The stored list, or `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<Leaderboard>>;

    fn save(&self, board: &Leaderboard) -> Result<()>;
}

/// Highscores kept as a JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardStore for JsonFileStore {
    fn load(&self) -> Result<Option<Leaderboard>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read highscores from {:?}", self.path))?;
        let board: Leaderboard = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse highscores in {:?}", self.path))?;

        Ok(Some(Leaderboard::from_entries(board.entries().to_vec())))
    }

    fn save(&self, board: &Leaderboard) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json =
            serde_json::to_string_pretty(board).context("Failed to serialize highscores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write highscores to {:?}", self.path))?;
        Ok(())
    }
}

/// Store that forgets everything when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    board: Mutex<Option<Leaderboard>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(board: Leaderboard) -> Self {
        Self {
            board: Mutex::new(Some(board)),
        }
    }

    /// Last saved list
    pub fn saved(&self) -> Option<Leaderboard> {
        self.board.lock().ok().and_then(|board| board.clone())
    }
}

impl LeaderboardStore for MemoryStore {
    fn load(&self) -> Result<Option<Leaderboard>> {
        let board = self
            .board
            .lock()
            .map_err(|_| anyhow::anyhow!("highscore store lock poisoned"))?;
        Ok(board.clone())
    }

    fn save(&self, board: &Leaderboard) -> Result<()> {
        let mut slot = self
            .board
            .lock()
            .map_err(|_| anyhow::anyhow!("highscore store lock poisoned"))?;
        *slot = Some(board.clone());
        Ok(())
    }
}

/// Load the list, creating and saving a blank one when there is none.
///
/// A list that cannot be read is treated the same as a missing one.
pub fn load_or_init(store: &dyn LeaderboardStore) -> Leaderboard {
    match store.load() {
        Ok(Some(board)) => board,
        Ok(None) => {
            info!("no highscore list yet, creating a blank one");
            init(store)
        }
        Err(err) => {
            warn!(error = %format!("{err:#}"), "highscore list unreadable, starting over");
            init(store)
        }
    }
}

fn init(store: &dyn LeaderboardStore) -> Leaderboard {
    let board = Leaderboard::default();
    save_logged(store, &board);
    board
}

/// Put `score` on the list under `name` and persist it.
/// Returns the 0-based place, or `None` when the score did not make the list.
pub fn record_score(
    store: &dyn LeaderboardStore,
    board: &mut Leaderboard,
    name: &str,
    score: u32,
) -> Option<usize> {
    let place = board.insert(name, score)?;
    info!(score, place = place + 1, "new highscore");
    save_logged(store, board);
    Some(place)
}

fn save_logged(store: &dyn LeaderboardStore, board: &Leaderboard) {
    if let Err(err) = store.save(board) {
        error!(error = %format!("{err:#}"), "failed to save highscores");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::table::CAPACITY;
    use tempfile::TempDir;

    struct BrokenStore;

    impl LeaderboardStore for BrokenStore {
        fn load(&self) -> Result<Option<Leaderboard>> {
            anyhow::bail!("disk on fire")
        }

        fn save(&self, _board: &Leaderboard) -> Result<()> {
            anyhow::bail!("disk on fire")
        }
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("highscore.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("highscore.json"));

        let mut board = Leaderboard::default();
        board.insert("amy", 12);
        store.save(&board).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, board);
    }

    #[test]
    fn test_hand_edited_names_are_trimmed_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("highscore.json");
        std::fs::write(&path, r#"[{"name":"longname","score":3},{"name":"al","score":5}]"#)
            .unwrap();

        let loaded = JsonFileStore::new(&path).load().unwrap().unwrap();
        let rows: Vec<_> = loaded.rows().collect();
        assert_eq!(rows[0], ("1st", "AL ", "05".to_string()));
        assert_eq!(rows[1], ("2nd", "LON", "03".to_string()));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("highscore.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(JsonFileStore::new(&path).load().is_err());
    }

    #[test]
    fn test_load_or_init_creates_and_saves_blank_list() {
        let store = MemoryStore::new();
        let board = load_or_init(&store);

        assert_eq!(board, Leaderboard::default());
        assert_eq!(store.saved(), Some(Leaderboard::default()));
    }

    #[test]
    fn test_load_or_init_replaces_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("highscore.json");
        std::fs::write(&path, "{ broken").unwrap();
        let store = JsonFileStore::new(&path);

        let board = load_or_init(&store);
        assert_eq!(board.entries().len(), CAPACITY);
        assert_eq!(store.load().unwrap(), Some(Leaderboard::default()));
    }

    #[test]
    fn test_load_or_init_survives_broken_store() {
        let board = load_or_init(&BrokenStore);
        assert_eq!(board, Leaderboard::default());
    }

    #[test]
    fn test_record_score_persists() {
        let store = MemoryStore::new();
        let mut board = load_or_init(&store);

        assert_eq!(record_score(&store, &mut board, "zed", 4), Some(0));
        assert_eq!(record_score(&store, &mut board, "nil", 0), None);

        let saved = store.saved().unwrap();
        assert_eq!(saved.entries()[0].name, "ZED");
        assert_eq!(saved.entries()[0].score, 4);
        assert_eq!(saved.entries().len(), CAPACITY);
    }

    #[test]
    fn test_existing_list_is_kept() {
        let mut existing = Leaderboard::default();
        existing.insert("old", 20);
        let store = MemoryStore::with_board(existing.clone());

        assert_eq!(load_or_init(&store), existing);
    }
}
