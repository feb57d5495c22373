use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// File name of the score table written next to the docking results.
pub const SCORES_FILE_NAME: &str = "binding_scores.csv";

const VINA_RESULT_MARKER: &str = "REMARK VINA RESULT";

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// The best (lowest) predicted binding affinity of one docked ligand, in kcal/mol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LigandScore {
    #[serde(rename = "Ligand")]
    pub ligand: String,
    #[serde(rename = "Best ΔG (kcal/mol)")]
    pub affinity: f64,
}

/// Extracts the affinity of the top-ranked pose from docking-engine output.
///
/// The value is the fourth whitespace-separated token of the first line containing
/// `REMARK VINA RESULT`, e.g. `-5.830` in `REMARK VINA RESULT:    -5.830  0.000  0.000`.
/// Returns `Ok(None)` if no such line exists or the token is not a number.
pub fn best_affinity(reader: impl BufRead) -> io::Result<Option<f64>> {
    for line in reader.lines() {
        let line = line?;
        if line.contains(VINA_RESULT_MARKER) {
            return Ok(line
                .split_whitespace()
                .nth(3)
                .and_then(|token| token.parse::<f64>().ok()));
        }
    }
    Ok(None)
}

/// Reads the best affinity from a pose file, treating unreadable files as unscored.
pub fn read_best_affinity(path: &Path) -> Option<f64> {
    match File::open(path).and_then(|file| best_affinity(BufReader::new(file))) {
        Ok(score) => score,
        Err(e) => {
            debug!(path = %path.display(), "Cannot read pose file: {}", e);
            None
        }
    }
}

/// Sorts scores from best (most negative) to worst.
pub fn sort_by_affinity(scores: &mut [LigandScore]) {
    scores.sort_by(|a, b| a.affinity.total_cmp(&b.affinity));
}

pub fn write_scores(path: &Path, scores: &[LigandScore]) -> Result<(), ScoreError> {
    let mut writer = csv::Writer::from_path(path)?;
    for score in scores {
        writer.serialize(score)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a score table back, returning rows sorted by affinity.
pub fn read_scores(path: &Path) -> Result<Vec<LigandScore>, ScoreError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut scores = reader
        .deserialize::<LigandScore>()
        .collect::<Result<Vec<_>, _>>()?;
    sort_by_affinity(&mut scores);
    Ok(scores)
}
