use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Dataset;
use crate::error::BaselineError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a two-column dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` – header row, exactly two columns (taken as x, y)
/// * anything else – whitespace-delimited text, no header, two columns
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let dataset = match ext.as_str() {
        "csv" => parse_csv(file),
        _ => parse_whitespace(file),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: one header row naming the two columns, then numeric rows.
/// Header names are ignored; the first column is x, the second y.
pub fn parse_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let n_columns = reader.headers().context("reading CSV header")?.len();
    if n_columns != 2 {
        return Err(BaselineError::Format(format!(
            "expected 2 columns, header has {n_columns}"
        ))
        .into());
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let fields: Vec<&str> = record.iter().collect();
        rows.push(parse_pair(&fields, row_no)?);
    }

    Ok(Dataset::from_rows(rows)?)
}

// ---------------------------------------------------------------------------
// Whitespace-delimited loader
// ---------------------------------------------------------------------------

/// Plain text: two numbers per line separated by any whitespace.
/// Blank lines are skipped.
pub fn parse_whitespace<R: Read>(mut reader: R) -> Result<Dataset> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("reading text file")?;

    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        rows.push(parse_pair(&fields, line_no)?);
    }

    Ok(Dataset::from_rows(rows)?)
}

fn parse_pair(fields: &[&str], row: usize) -> Result<(f64, f64), BaselineError> {
    let [x, y] = fields else {
        return Err(BaselineError::Format(format!(
            "row {row}: expected 2 fields, found {}",
            fields.len()
        )));
    };
    Ok((parse_number(x, row, "x")?, parse_number(y, row, "y")?))
}

fn parse_number(tok: &str, row: usize, col: &str) -> Result<f64, BaselineError> {
    tok.parse::<f64>()
        .map_err(|_| BaselineError::Format(format!("row {row}, {col}: '{tok}' is not a number")))
}
