// src/utils/exclusion_table.rs - Reads the caller's exclusion word table
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use log::{debug, info};
use std::io::Read;
use std::path::Path;

/// First column of every row, trimmed; blank rows and empty cells are skipped.
pub fn read_exclusion_words(path: &Path, has_header: bool) -> Result<Vec<String>> {
    let reader = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open exclusion table {}", path.display()))?;
    let words = collect_first_column(reader)
        .with_context(|| format!("Failed to read exclusion table {}", path.display()))?;
    info!(
        "Loaded {} exclusion words from {}",
        words.len(),
        path.display()
    );
    Ok(words)
}

pub fn read_exclusion_words_from_reader<R: Read>(reader: R, has_header: bool) -> Result<Vec<String>> {
    let reader = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(reader);
    collect_first_column(reader)
}

fn collect_first_column<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut skipped = 0usize;
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed exclusion row {}", row_idx + 1))?;
        match record.get(0).map(str::trim) {
            Some(word) if !word.is_empty() => words.push(word.to_string()),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!("Skipped {} blank exclusion rows", skipped);
    }
    Ok(words)
}
