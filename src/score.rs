use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::warn;
use thiserror::Error;

pub const DEFAULT_SCORE_FILE: &str = "scores.txt";

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ScoreData {
    pub previous: u32,
    pub high: u32,
}

/// A score field that was present but not a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadField {
    pub field: &'static str,
    pub value: String,
}

impl ScoreData {
    /// Parses `previous high`. Missing or malformed fields read as zero; the
    /// malformed ones are handed back so the caller can report them.
    pub fn parse(text: &str) -> (ScoreData, Vec<BadField>) {
        let mut bad = vec![];
        let mut fields = text.split_whitespace();
        let mut read = |field: &'static str| match fields.next() {
            None => 0,
            Some(raw) => raw.parse::<u32>().unwrap_or_else(|_| {
                bad.push(BadField { field, value: raw.to_string() });
                0
            }),
        };

        let previous = read("previous score");
        let high = read("high score");
        (ScoreData { previous, high }, bad)
    }

    pub fn to_record(&self) -> String {
        format!("{} {}\n", self.previous, self.high)
    }
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("could not read scores from {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write scores to {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("bad {field} `{value}` in {}, using 0", .path.display())]
    Parse { path: PathBuf, field: &'static str, value: String },
}

/// Durable home of the previous and high scores.
pub trait ScoreStore {
    fn load(&mut self) -> Result<ScoreData, ScoreError>;
    fn save(&mut self, scores: &ScoreData) -> Result<(), ScoreError>;

    /// Like `load`, but any failure reads as no prior scores.
    fn load_or_default(&mut self) -> ScoreData {
        self.load().unwrap_or_else(|e| {
            warn!("{}", e);
            ScoreData::default()
        })
    }
}

/// Plain text score file, overwritten in full on every save.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        FileScoreStore::new(DEFAULT_SCORE_FILE)
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&mut self) -> Result<ScoreData, ScoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let (scores, bad) = ScoreData::parse(&text);
                for BadField { field, value } in bad {
                    warn!("{}", ScoreError::Parse { path: self.path.clone(), field, value });
                }
                Ok(scores)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ScoreData::default()),
            Err(source) => Err(ScoreError::Read { path: self.path.clone(), source }),
        }
    }

    fn save(&mut self, scores: &ScoreData) -> Result<(), ScoreError> {
        fs::write(&self.path, scores.to_record())
            .map_err(|source| ScoreError::Write { path: self.path.clone(), source })
    }
}

/// Keeps scores in memory only. Used for headless runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    pub stored: Option<ScoreData>,
    pub saves: usize,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> Result<ScoreData, ScoreError> {
        Ok(self.stored.unwrap_or_default())
    }

    fn save(&mut self, scores: &ScoreData) -> Result<(), ScoreError> {
        self.stored = Some(*scores);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_tolerates_garbage() {
        let parse = |text| ScoreData::parse(text).0;
        assert_eq!(parse("7 12\n"), ScoreData { previous: 7, high: 12 });
        assert_eq!(parse("  3\t\n 9 "), ScoreData { previous: 3, high: 9 });
        assert_eq!(parse("5"), ScoreData { previous: 5, high: 0 });
        assert_eq!(parse("abc 4"), ScoreData { previous: 0, high: 4 });
        assert_eq!(parse("-1 x"), ScoreData::default());
        assert_eq!(parse(""), ScoreData::default());
    }

    #[test]
    fn parse_reports_malformed_fields() {
        let (scores, bad) = ScoreData::parse("7 abc");
        assert_eq!(scores, ScoreData { previous: 7, high: 0 });
        assert_eq!(bad, vec![BadField { field: "high score", value: "abc".to_string() }]);

        assert!(ScoreData::parse("5").1.is_empty());
        assert!(ScoreData::parse("").1.is_empty());
        assert_eq!(ScoreData::parse("x y").1.len(), 2);
    }

    #[test]
    fn parse_error_names_field_and_file() {
        let err = ScoreError::Parse { path: PathBuf::from("s.txt"), field: "high score", value: "abc".to_string() };
        assert_eq!(err.to_string(), "bad high score `abc` in s.txt, using 0");
    }

    #[test]
    fn corrupt_field_keeps_the_good_one() {
        let dir = tempdir().unwrap();
        let mut store = FileScoreStore::new(dir.path().join("scores.txt"));
        fs::write(store.path(), "7 abc\n").unwrap();
        assert_eq!(store.load().unwrap(), ScoreData { previous: 7, high: 0 });
    }

    #[test]
    fn file_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = FileScoreStore::new(dir.path().join("scores.txt"));

        store.save(&ScoreData { previous: 7, high: 12 }).unwrap();
        assert_eq!(store.load().unwrap(), ScoreData { previous: 7, high: 12 });
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "7 12\n");
    }

    #[test]
    fn missing_file_loads_zeroes() {
        let dir = tempdir().unwrap();
        let mut store = FileScoreStore::new(dir.path().join("nope.txt"));
        assert_eq!(store.load().unwrap(), ScoreData::default());
    }

    #[test]
    fn unreadable_path_defaults_and_unwritable_path_errors() {
        let dir = tempdir().unwrap();
        // A directory cannot be read or written as a file.
        let mut store = FileScoreStore::new(dir.path());
        assert_eq!(store.load_or_default(), ScoreData::default());
        assert!(matches!(store.save(&ScoreData::default()), Err(ScoreError::Write { .. })));
    }
}
