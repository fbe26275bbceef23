/// High-score records and the durable score store.
///
/// Ranking and trimming live in `ScoreBoard`, a plain in-memory type,
/// so the ordering contract is testable without touching disk. The
/// store itself is `scores.toml`, resolved like the rest of the
/// game's data files: exe directory if writable, then XDG data home,
/// then CWD. A missing or corrupt file loads as an empty board.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted player name, in characters after trimming.
pub const MAX_NAME_LEN: usize = 20;
/// The store keeps this many best runs; anything slower falls off.
pub const MAX_RECORDS: usize = 1000;
/// How many entries the score table shows.
pub const TOP_DISPLAY: usize = 10;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("enter a name first")]
    Empty,
    #[error("name too long (20 characters max)")]
    TooLong,
}

/// One finished run. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    /// Run duration in seconds, rounded to 2 decimals.
    pub time: f64,
    pub date: String,
}

impl ScoreRecord {
    /// Build a record from the raw name prompt: trims whitespace,
    /// validates length, rounds the time.
    pub fn new(name: &str, time_secs: f64, date: String) -> Result<Self, NameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(NameError::TooLong);
        }
        Ok(ScoreRecord {
            name: name.to_string(),
            time: round_time(time_secs),
            date,
        })
    }
}

pub fn round_time(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

/// Current local timestamp for a finished run.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

// ── Ranking ──

#[derive(Clone, Debug, Default)]
pub struct ScoreBoard {
    records: Vec<ScoreRecord>,
}

impl ScoreBoard {
    /// Adopt a loaded list, re-sorting and capping it. The file is
    /// external input; its order is not trusted.
    pub fn from_records(mut records: Vec<ScoreRecord>) -> Self {
        records.sort_by(|a, b| a.time.total_cmp(&b.time));
        records.truncate(MAX_RECORDS);
        ScoreBoard { records }
    }

    /// Insert keeping ascending time order; equal times keep the
    /// earlier submission first. Over the cap, the worst entry drops.
    pub fn insert(&mut self, record: ScoreRecord) {
        let pos = self.records.partition_point(|r| r.time <= record.time);
        self.records.insert(pos, record);
        self.records.truncate(MAX_RECORDS);
    }

    /// Best `n` runs, fastest first.
    pub fn top(&self, n: usize) -> &[ScoreRecord] {
        &self.records[..self.records.len().min(n)]
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Store ──

const SCORES_FILE: &str = "scores.toml";

#[derive(Serialize, Deserialize, Default)]
struct ScoresFile {
    #[serde(default)]
    scores: Vec<ScoreRecord>,
}

fn data_dir() -> PathBuf {
    // 1. Exe directory (local/portable installs), if writable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            let test_path = parent.join(".write_test_minedelver");
            if std::fs::write(&test_path, "").is_ok() {
                let _ = std::fs::remove_file(&test_path);
                return parent.to_path_buf();
            }
        }
    }

    // 2. XDG data home for system installs
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/minedelver");
        if std::fs::create_dir_all(&xdg).is_ok() {
            return xdg;
        }
    }

    // 3. Fallback to CWD
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn scores_path() -> PathBuf {
    data_dir().join(SCORES_FILE)
}

/// Load the stored score list. Missing or unparseable file → empty.
pub fn load_scores() -> ScoreBoard {
    match std::fs::read_to_string(scores_path()) {
        Ok(text) => match toml::from_str::<ScoresFile>(&text) {
            Ok(file) => ScoreBoard::from_records(file.scores),
            Err(_) => ScoreBoard::default(),
        },
        Err(_) => ScoreBoard::default(),
    }
}

/// Persist the full board. Failure is reported, not fatal — the
/// in-memory list stays authoritative for the session.
pub fn save_scores(board: &ScoreBoard) -> Result<(), String> {
    let file = ScoresFile { scores: board.records().to_vec() };
    let text = toml::to_string(&file).map_err(|e| format!("Score encode failed: {e}"))?;
    std::fs::write(scores_path(), text).map_err(|e| format!("Score save failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, time: f64) -> ScoreRecord {
        ScoreRecord { name: name.to_string(), time, date: "2026-08-07 12:00".to_string() }
    }

    #[test]
    fn inserts_keep_ascending_time_order() {
        let mut board = ScoreBoard::default();
        board.insert(record("a", 12.34));
        board.insert(record("b", 9.01));
        board.insert(record("c", 15.00));

        let times: Vec<f64> = board.records().iter().map(|r| r.time).collect();
        assert_eq!(times, vec![9.01, 12.34, 15.00]);
    }

    #[test]
    fn equal_times_keep_submission_order() {
        let mut board = ScoreBoard::default();
        board.insert(record("first", 10.0));
        board.insert(record("second", 10.0));

        assert_eq!(board.records()[0].name, "first");
        assert_eq!(board.records()[1].name, "second");
    }

    #[test]
    fn cap_evicts_the_worst_entry() {
        let mut board = ScoreBoard::default();
        for i in 0..MAX_RECORDS {
            board.insert(record("r", 100.0 + i as f64));
        }
        assert_eq!(board.len(), MAX_RECORDS);

        // A better run pushes the slowest one off the end.
        board.insert(record("fast", 1.0));
        assert_eq!(board.len(), MAX_RECORDS);
        assert_eq!(board.records()[0].name, "fast");
        let slowest = board.records()[MAX_RECORDS - 1].time;
        assert_eq!(slowest, 100.0 + (MAX_RECORDS - 2) as f64);

        // A run slower than everything is itself the worst: dropped.
        board.insert(record("slow", 9999.0));
        assert_eq!(board.len(), MAX_RECORDS);
        assert!(board.records().iter().all(|r| r.time < 9999.0));
    }

    #[test]
    fn top_limits_the_view() {
        let mut board = ScoreBoard::default();
        for i in 0..15 {
            board.insert(record("r", i as f64));
        }
        assert_eq!(board.top(TOP_DISPLAY).len(), TOP_DISPLAY);
        assert_eq!(board.top(TOP_DISPLAY)[0].time, 0.0);

        let small = ScoreBoard::from_records(vec![record("x", 5.0)]);
        assert_eq!(small.top(TOP_DISPLAY).len(), 1);
    }

    #[test]
    fn from_records_sorts_untrusted_input() {
        let board = ScoreBoard::from_records(vec![
            record("c", 3.0),
            record("a", 1.0),
            record("b", 2.0),
        ]);
        let names: Vec<&str> = board.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn name_validation() {
        assert_eq!(
            ScoreRecord::new("", 1.0, String::new()),
            Err(NameError::Empty)
        );
        assert_eq!(
            ScoreRecord::new("   ", 1.0, String::new()),
            Err(NameError::Empty)
        );
        assert_eq!(
            ScoreRecord::new(&"x".repeat(21), 1.0, String::new()),
            Err(NameError::TooLong)
        );

        let ok = ScoreRecord::new("  miner joe  ", 1.0, String::new());
        assert_eq!(ok.map(|r| r.name), Ok("miner joe".to_string()));
        assert!(ScoreRecord::new(&"x".repeat(20), 1.0, String::new()).is_ok());
    }

    #[test]
    fn time_rounds_to_two_decimals() {
        let rec = ScoreRecord::new("a", 12.3456, String::new());
        assert_eq!(rec.map(|r| r.time), Ok(12.35));
        assert_eq!(round_time(9.014), 9.01);
    }
}
