//! Transcript entries

use std::time::Duration;

use crate::time::seconds;

/// Speaker name used when a row has no speaker column
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// A single line of dialogue with its time window
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    /// Seconds from the epoch at which the entry becomes active
    pub start: f64,
    /// Seconds from the epoch at which the entry's window closes
    pub end: f64,
    /// Selects display styling
    pub speaker: String,
    /// Dialogue to type out
    pub text: String,
    /// Optional code fragment; blank means none
    pub code: String,
}

impl TranscriptEntry {
    /// Create an entry with no code callout
    pub fn new(start: f64, end: f64, speaker: &str, text: &str) -> Self {
        Self {
            start,
            end,
            speaker: speaker.to_string(),
            text: text.to_string(),
            code: String::new(),
        }
    }

    /// Attach a code fragment
    pub fn with_code(mut self, code: &str) -> Self {
        self.code = code.to_string();
        self
    }

    /// Length of the entry's window in seconds, never negative
    pub fn duration_secs(&self) -> f64 {
        let span = self.end - self.start;
        if span.is_finite() && span > 0.0 {
            span
        } else {
            0.0
        }
    }

    /// Length of the entry's window
    pub fn duration(&self) -> Duration {
        seconds(self.duration_secs())
    }

    /// Whether the entry carries a non-blank code fragment
    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }
}

/// Ordered sequence of transcript entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, keeping supplied order
    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// End of the latest-closing window
    pub fn total_duration(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.end.max(e.start))
            .fold(0.0, f64::max)
    }

    /// Whether start offsets never decrease
    pub fn is_chronological(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].start <= w[1].start)
    }
}

impl From<Vec<TranscriptEntry>> for Transcript {
    fn from(entries: Vec<TranscriptEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<TranscriptEntry> for Transcript {
    fn from_iter<I: IntoIterator<Item = TranscriptEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptEntry;
    type IntoIter = std::slice::Iter<'a, TranscriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
