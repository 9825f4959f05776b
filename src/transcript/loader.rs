//! CSV transcript loader
//!
//! Recognized columns are `Start Timecode`, `End Timecode`, `Speaker`,
//! `Transcript` and `Code`; any others are ignored. Loading is tolerant:
//! bad timecodes collapse the row to a zero-length window at 0, missing
//! columns fall back to defaults, and undecodable rows are skipped. Only a
//! missing file or an unreadable header aborts the load.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use super::entry::{Transcript, TranscriptEntry, UNKNOWN_SPEAKER};
use super::timecode::{parse_window, DEFAULT_TIMECODE};

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Failed to open transcript {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read transcript header: {0}")]
    Header(#[source] csv::Error),
}

const START_COLUMN: &str = "Start Timecode";
const END_COLUMN: &str = "End Timecode";
const SPEAKER_COLUMN: &str = "Speaker";
const TEXT_COLUMN: &str = "Transcript";
const CODE_COLUMN: &str = "Code";

/// Positions of the recognized columns in the header row
#[derive(Debug, Clone, Copy, Default)]
struct Columns {
    start: Option<usize>,
    end: Option<usize>,
    speaker: Option<usize>,
    text: Option<usize>,
    code: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            start: find(START_COLUMN),
            end: find(END_COLUMN),
            speaker: find(SPEAKER_COLUMN),
            text: find(TEXT_COLUMN),
            code: find(CODE_COLUMN),
        }
    }

    /// Build an entry from one row.
    ///
    /// A column absent from the header, or a field missing from a short row,
    /// takes the column default. A field that is present but blank is kept
    /// as-is, so a blank timecode is malformed while a missing one is zero.
    fn entry(&self, record: &StringRecord) -> TranscriptEntry {
        let field = |column: Option<usize>, default: &str| -> String {
            column
                .and_then(|i| record.get(i))
                .unwrap_or(default)
                .to_string()
        };

        let (start, end) = parse_window(
            &field(self.start, DEFAULT_TIMECODE),
            &field(self.end, DEFAULT_TIMECODE),
        );

        TranscriptEntry {
            start,
            end,
            speaker: field(self.speaker, UNKNOWN_SPEAKER),
            text: field(self.text, ""),
            code: field(self.code, ""),
        }
    }
}

/// Load a transcript from a CSV file
pub fn load_transcript(path: &Path) -> Result<Transcript, TranscriptError> {
    let file = File::open(path).map_err(|source| TranscriptError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let transcript = parse_transcript(file)?;
    tracing::debug!("Loaded {} entries from {}", transcript.len(), path.display());
    Ok(transcript)
}

/// Parse CSV transcript data from any reader
pub fn parse_transcript<R: Read>(reader: R) -> Result<Transcript, TranscriptError> {
    let mut rows = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(rows.headers().map_err(TranscriptError::Header)?);
    if columns.start.is_none() || columns.end.is_none() {
        tracing::warn!("Transcript is missing a timecode column; those offsets default to 0");
    }

    let mut transcript = Transcript::new();
    for (index, record) in rows.records().enumerate() {
        match record {
            Ok(record) => transcript.push(columns.entry(&record)),
            Err(e) => tracing::warn!("Skipping transcript row {}: {}", index + 1, e),
        }
    }

    if !transcript.is_chronological() {
        tracing::warn!("Transcript start times are not in chronological order");
    }

    Ok(transcript)
}
