//! Local highscore list: ten ranked `(name, score)` places kept on disk.

pub mod store;
pub mod table;

pub use store::{JsonFileStore, LeaderboardStore, MemoryStore, load_or_init, record_score};
pub use table::{CAPACITY, HighscoreEntry, Leaderboard, NAME_LEN, normalize_name};
