use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// Tab-separated export
// ---------------------------------------------------------------------------

/// Write `(x, y)` rows as tab-separated text, no header, fixed decimals.
pub fn write_rows<W: Write>(writer: W, rows: &[(f64, f64)], decimals: usize) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);

    for &(x, y) in rows {
        writer
            .write_record([format!("{x:.decimals$}"), format!("{y:.decimals$}")])
            .context("writing row")?;
    }
    writer.flush().context("flushing output")?;
    Ok(())
}

/// Write rows to `path`, creating or truncating the file.
pub fn save_file(path: &Path, rows: &[(f64, f64)], decimals: usize) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_rows(std::io::BufWriter::new(file), rows, decimals)
        .with_context(|| format!("saving {}", path.display()))
}

/// Give `path` a `.txt` extension if the user typed a bare name.
pub fn with_default_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("txt");
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_tab_separated_with_eight_decimals() {
        let mut out = Vec::new();
        write_rows(&mut out, &[(1.0, -0.5), (2.25, 1.0 / 3.0)], 8).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1.00000000\t-0.50000000\n2.25000000\t0.33333333\n"
        );
    }

    #[test]
    fn empty_rows_write_nothing() {
        let mut out = Vec::new();
        write_rows(&mut out, &[], 8).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn save_file_round_trips_through_the_text_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        save_file(&path, &[(0.0, 1.5), (1.0, -2.0)], 8).unwrap();

        let ds = crate::data::loader::load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.samples()[1].y, -2.0);
    }

    #[test]
    fn bare_file_names_get_txt_extension() {
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/baseline")),
            PathBuf::from("/tmp/baseline.txt")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/baseline.dat")),
            PathBuf::from("/tmp/baseline.dat")
        );
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        assert!(save_file(&path, &[(0.0, 0.0)], 8).is_err());
        assert!(!path.exists());
    }
}
