//! Flat CSV exchange format for measured frequency responses.
//!
//! One header row `freq,mag,db`, then one row per frequency bin with the
//! frequency in Hz, the linear magnitude, and the same magnitude in dB.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::{Error, Result};

const HEADER: &str = "freq,mag,db";

/// Write a linear magnitude response as `freq,mag,db` CSV.
///
/// The dB column is derived from the linear magnitude with a floor of
/// -200 dB, matching the spectrum analysis convention.
///
/// # Panics
/// Panics if `frequencies` and `magnitudes` differ in length.
pub fn export_response<P: AsRef<Path>>(
    path: P,
    frequencies: &[f64],
    magnitudes: &[f64],
) -> Result<()> {
    assert_eq!(
        frequencies.len(),
        magnitudes.len(),
        "one magnitude per frequency"
    );

    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{HEADER}")?;
    for (&freq, &mag) in frequencies.iter().zip(magnitudes.iter()) {
        let db = 20.0 * mag.max(1e-10).log10();
        writeln!(writer, "{freq},{mag},{db}")?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), rows = frequencies.len(), "exported response CSV");
    Ok(())
}

/// Read back a `freq,mag,db` CSV written by [`export_response`].
///
/// Returns frequencies and linear magnitudes; the dB column is redundant
/// and skipped. Blank lines are tolerated, anything else malformed is an
/// error.
pub fn import_response<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, Vec<f64>)> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| Error::MalformedCsv("empty file".into()))??;
    if header.trim() != HEADER {
        return Err(Error::MalformedCsv(format!(
            "unexpected header: {header:?}"
        )));
    }

    let mut frequencies = Vec::new();
    let mut magnitudes = Vec::new();
    for (row, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.splitn(3, ',');
        frequencies.push(parse_field(fields.next(), row)?);
        magnitudes.push(parse_field(fields.next(), row)?);
    }
    Ok((frequencies, magnitudes))
}

fn parse_field(field: Option<&str>, row: usize) -> Result<f64> {
    field
        .and_then(|text| text.trim().parse().ok())
        .ok_or_else(|| Error::MalformedCsv(format!("bad number in data row {row}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_export_import_round_trip() {
        let frequencies = [20.0, 100.0, 1000.0, 20000.0];
        let magnitudes = [1.0, 1.995262314968879, 0.5011872336272722, 1.0];

        let file = NamedTempFile::new().unwrap();
        export_response(file.path(), &frequencies, &magnitudes).unwrap();
        let (read_freqs, read_mags) = import_response(file.path()).unwrap();

        // The exporter prints full-precision values, so the trip is exact.
        assert_eq!(read_freqs, frequencies.to_vec());
        assert_eq!(read_mags, magnitudes.to_vec());
    }

    #[test]
    fn test_db_column_content() {
        let file = NamedTempFile::new().unwrap();
        export_response(file.path(), &[100.0], &[1.0]).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("freq,mag,db"));
        assert_eq!(lines.next(), Some("100,1,0"));
    }

    #[test]
    fn test_rejects_wrong_header() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "frequency,magnitude\n100,1\n").unwrap();
        assert!(matches!(
            import_response(file.path()),
            Err(Error::MalformedCsv(_))
        ));
    }

    #[test]
    fn test_rejects_bad_row() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "freq,mag,db\n100,not-a-number,0\n").unwrap();
        assert!(matches!(
            import_response(file.path()),
            Err(Error::MalformedCsv(_))
        ));
    }

    #[test]
    fn test_tolerates_blank_lines() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "freq,mag,db\n100,1,0\n\n200,2,6.02\n").unwrap();
        let (freqs, mags) = import_response(file.path()).unwrap();
        assert_eq!(freqs, vec![100.0, 200.0]);
        assert_eq!(mags, vec![1.0, 2.0]);
    }

    #[test]
    #[should_panic]
    fn test_mismatched_lengths_panic() {
        let file = NamedTempFile::new().unwrap();
        let _ = export_response(file.path(), &[100.0, 200.0], &[1.0]);
    }
}
