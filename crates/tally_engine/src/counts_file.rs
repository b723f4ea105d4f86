use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use tally_logging::tally_info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CountsFileError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: expected \"<count> <label>\"")]
    MissingSeparator { line: usize },
    #[error("line {line}: invalid count {value:?}")]
    InvalidCount { line: usize, value: String },
    #[error("line {line}: label {label:?} listed twice")]
    DuplicateLabel { line: usize, label: String },
}

/// Parse `"<count> <label>"` lines into a label map.
///
/// The label is everything after the first space, so it may itself contain
/// spaces. Blank lines are skipped.
pub fn parse_counts(text: &str) -> Result<HashMap<String, i64>, CountsFileError> {
    let mut counts = HashMap::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.is_empty() {
            continue;
        }
        let (count, label) = raw
            .split_once(' ')
            .ok_or(CountsFileError::MissingSeparator { line })?;
        let count: i64 = count.parse().map_err(|_| CountsFileError::InvalidCount {
            line,
            value: count.to_string(),
        })?;
        match counts.entry(label.to_string()) {
            Entry::Occupied(entry) => {
                return Err(CountsFileError::DuplicateLabel {
                    line,
                    label: entry.key().clone(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(count);
            }
        }
    }
    Ok(counts)
}

/// Load a counts file from disk.
pub fn load_counts(path: &Path) -> Result<HashMap<String, i64>, CountsFileError> {
    let text = fs::read_to_string(path)?;
    let counts = parse_counts(&text)?;
    tally_info!("Loaded {} counts from {:?}", counts.len(), path);
    Ok(counts)
}
