//! Rank-vector persistence: one value per line, in node-index order.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Write `scores` one per line.
pub fn write_vector<W: Write>(mut writer: W, scores: &[f64]) -> Result<()> {
    for score in scores {
        writeln!(writer, "{score}")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_vector_file(path: impl AsRef<Path>, scores: &[f64]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_vector(BufWriter::new(file), scores)
}

/// Read a vector written by [`write_vector`]. Blank lines are skipped.
pub fn read_vector<R: BufRead>(reader: R) -> Result<Vec<f64>> {
    let mut scores = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value = trimmed
            .parse::<f64>()
            .map_err(|e| Error::malformed(i + 1, format!("invalid score {trimmed:?}: {e}")))?;
        scores.push(value);
    }
    Ok(scores)
}

pub fn read_vector_file(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    read_vector(BufReader::new(File::open(path.as_ref())?))
}
