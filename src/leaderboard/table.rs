use serde::{Deserialize, Serialize};

/// Number of places on the list
pub const CAPACITY: usize = 10;
/// Characters kept from a player's name
pub const NAME_LEN: usize = 3;

const RANKS: [&str; CAPACITY] = [
    "1st", "2nd", "3rd", "4th", "5th", "6th", "7th", "8th", "9th", "10th",
];

/// One place on the highscore list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighscoreEntry {
    pub name: String,
    pub score: u32,
}

impl HighscoreEntry {
    pub fn new(name: &str, score: u32) -> Self {
        Self {
            name: normalize_name(name),
            score,
        }
    }

    /// Blank name with no score, used to fill a fresh list
    pub fn placeholder() -> Self {
        Self::new("", 0)
    }
}

/// First three characters of `raw`, upper-cased and padded with spaces
pub fn normalize_name(raw: &str) -> String {
    let mut name: String = raw
        .trim()
        .chars()
        .flat_map(char::to_uppercase)
        .take(NAME_LEN)
        .collect();
    while name.chars().count() < NAME_LEN {
        name.push(' ');
    }
    name
}

/// Highscores sorted from best to worst, at most [`CAPACITY`] long
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<HighscoreEntry>,
}

impl Default for Leaderboard {
    /// Ten blank zero-score places
    fn default() -> Self {
        Self {
            entries: vec![HighscoreEntry::placeholder(); CAPACITY],
        }
    }
}

impl Leaderboard {
    /// Build from stored entries, restoring name format, order and the size limit
    pub fn from_entries(mut entries: Vec<HighscoreEntry>) -> Self {
        for entry in &mut entries {
            entry.name = normalize_name(&entry.name);
        }
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(CAPACITY);
        Self { entries }
    }

    pub fn entries(&self) -> &[HighscoreEntry] {
        &self.entries
    }

    /// True when `score` would earn a place: it beats the lowest entry, or
    /// the list still has room
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < CAPACITY {
            return true;
        }
        self.entries
            .last()
            .is_some_and(|lowest| lowest.score < score)
    }

    /// Insert ahead of the first strictly lower score and drop whatever falls
    /// off the end. Returns the 0-based place, or `None` if it did not qualify.
    pub fn insert(&mut self, name: &str, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let place = self
            .entries
            .iter()
            .position(|entry| entry.score < score)
            .unwrap_or(self.entries.len());
        self.entries.insert(place, HighscoreEntry::new(name, score));
        self.entries.truncate(CAPACITY);
        Some(place)
    }

    /// `(rank label, name, zero-padded score)` for each place
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &str, String)> + '_ {
        RANKS
            .iter()
            .zip(&self.entries)
            .map(|(rank, entry)| (*rank, entry.name.as_str(), format!("{:02}", entry.score)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(scores: &[u32]) -> Leaderboard {
        Leaderboard::from_entries(
            scores
                .iter()
                .map(|score| HighscoreEntry::new("abc", *score))
                .collect(),
        )
    }

    #[test]
    fn test_default_is_ten_blank_places() {
        let board = Leaderboard::default();
        assert_eq!(board.entries().len(), CAPACITY);
        assert!(board
            .entries()
            .iter()
            .all(|entry| entry.name == "   " && entry.score == 0));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("bob"), "BOB");
        assert_eq!(normalize_name("alexander"), "ALE");
        assert_eq!(normalize_name("x"), "X  ");
        assert_eq!(normalize_name(""), "   ");
    }

    #[test]
    fn test_zero_does_not_qualify_on_fresh_list() {
        let mut board = Leaderboard::default();
        assert!(!board.qualifies(0));
        assert_eq!(board.insert("bob", 0), None);
        assert!(board.qualifies(1));
    }

    #[test]
    fn test_insert_keeps_descending_order() {
        let mut board = Leaderboard::default();
        assert_eq!(board.insert("amy", 5), Some(0));
        assert_eq!(board.insert("bob", 9), Some(0));
        assert_eq!(board.insert("cat", 7), Some(1));

        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 7, 5, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(board.entries()[1].name, "CAT");
    }

    #[test]
    fn test_tie_goes_below_existing_entry() {
        let mut board = board(&[10, 8, 6, 4, 2, 1, 1, 1, 1, 1]);
        assert_eq!(board.insert("new", 8), Some(2));
        assert_eq!(board.entries()[1].name, "ABC");
        assert_eq!(board.entries()[2].name, "NEW");
    }

    #[test]
    fn test_insert_evicts_lowest() {
        let mut board = board(&[10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);
        assert!(!board.qualifies(1));
        assert_eq!(board.insert("top", 11), Some(0));

        assert_eq!(board.entries().len(), CAPACITY);
        assert_eq!(board.entries()[0].score, 11);
        assert_eq!(board.entries().last().unwrap().score, 2);
    }

    #[test]
    fn test_short_list_accepts_any_score() {
        let mut board = board(&[4]);
        assert_eq!(board.insert("low", 0), Some(1));
        assert_eq!(board.entries().len(), 2);
    }

    #[test]
    fn test_stored_names_are_normalized() {
        let board = Leaderboard::from_entries(vec![
            HighscoreEntry {
                name: "maximilian".to_string(),
                score: 4,
            },
            HighscoreEntry {
                name: "z".to_string(),
                score: 9,
            },
        ]);
        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Z  ", "MAX"]);
    }

    #[test]
    fn test_rows_format() {
        let mut board = Leaderboard::default();
        board.insert("amy", 7);
        let rows: Vec<_> = board.rows().collect();
        assert_eq!(rows.len(), CAPACITY);
        assert_eq!(rows[0], ("1st", "AMY", "07".to_string()));
        assert_eq!(rows[9], ("10th", "   ", "00".to_string()));
    }

    #[test]
    fn test_json_shape_is_plain_array() {
        let board = board(&[3]);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"[{"name":"ABC","score":3}]"#);

        let back: Leaderboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
