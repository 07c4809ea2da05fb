//! FILENAME: grid-csv/src/sniff.rs
//! PURPOSE: Detects the dialect of CSV text from a sample of its first bytes.
//! CONTEXT: Each candidate delimiter is tried in preference order by parsing
//! the sample with the csv crate, first with `"` as the quote character and
//! then with `'`. A candidate is accepted when every complete record it
//! produces has the same number of fields, and more than one. A sample that
//! reads as one consistent column under every delimiter is a single-column
//! table and gets the default dialect. Anything else fails; the caller must
//! then supply a dialect explicitly.

use crate::dialect::{Dialect, LineTerminator};
use crate::error::CsvError;

/// Number of leading bytes inspected when detecting a dialect.
pub const SNIFF_SAMPLE_LEN: usize = 1024;

/// Delimiters tried, in order of preference.
const CANDIDATE_DELIMITERS: [u8; 5] = [b',', b'\t', b';', b'|', b':'];

/// Quote characters tried for each delimiter, in order of preference.
const CANDIDATE_QUOTES: [u8; 2] = [b'"', b'\''];

/// Detects the dialect of `input` from its first `SNIFF_SAMPLE_LEN` bytes.
pub fn sniff(input: &[u8]) -> Result<Dialect, CsvError> {
    let truncated = input.len() > SNIFF_SAMPLE_LEN;
    let sample = &input[..input.len().min(SNIFF_SAMPLE_LEN)];

    if sample.iter().all(u8::is_ascii_whitespace) {
        return Err(CsvError::format(None, "cannot detect dialect of empty input"));
    }

    let terminator = if sample.windows(2).any(|pair| pair == b"\r\n") {
        LineTerminator::CrLf
    } else {
        LineTerminator::Lf
    };

    // Stays true while every delimiter reads the sample as one column.
    let mut single_column = true;

    for &delimiter in &CANDIDATE_DELIMITERS {
        for &quote in &CANDIDATE_QUOTES {
            let dialect = Dialect::default()
                .with_delimiter(delimiter)
                .with_quote(quote)
                .with_terminator(terminator);

            let width = consistent_width(&dialect, sample, truncated);
            if quote == b'"' && width != Some(1) {
                single_column = false;
            }

            if let Some(width) = width.filter(|&width| width > 1) {
                log::debug!(
                    "sniffed dialect: delimiter={:?} quote={:?} terminator={:?} ({} fields)",
                    delimiter as char,
                    quote as char,
                    terminator,
                    width
                );
                return Ok(dialect);
            }
        }
    }

    if single_column {
        log::debug!("sniffed single-column input, terminator={:?}", terminator);
        return Ok(Dialect::default().with_terminator(terminator));
    }

    Err(CsvError::format(
        None,
        "could not detect a consistent delimiter; supply a dialect explicitly",
    ))
}

/// The shared field count of all records in `sample`, if there is one. A
/// truncated sample's last record is ignored when there are others, since it
/// may be cut short.
fn consistent_width(dialect: &Dialect, sample: &[u8], truncated: bool) -> Option<usize> {
    let mut reader = dialect.reader_builder().from_reader(sample);
    let mut widths = Vec::new();
    for record in reader.byte_records() {
        widths.push(record.ok()?.len());
    }
    if truncated && widths.len() > 1 {
        widths.pop();
    }

    let (&first, rest) = widths.split_first()?;
    log::trace!(
        "delimiter {:?} quote {:?}: {} records, first has {} fields",
        dialect.delimiter as char,
        dialect.quote as char,
        widths.len(),
        first
    );
    if rest.iter().all(|&width| width == first) {
        Some(first)
    } else {
        None
    }
}
