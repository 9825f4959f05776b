//! INI-style property file parser
//!
//! Reads `[Section]` headers followed by `key = value` or `key: value`
//! lines. Lines starting with `#` or `;` are comments. Key case is
//! preserved but lookups ignore it; section names are matched exactly.
//! Malformed lines are skipped with a warning rather than failing the load.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("Property file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("I/O error reading property file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One `[Section]` and its entries in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    entries: Vec<(String, String)>,
}

impl Section {
    /// Value for `key`, ignoring key case. Later duplicates win.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Entries in file order, keys as written
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed property file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFile {
    sections: Vec<(String, Section)>,
}

impl PropertyFile {
    /// Load and parse a property file from disk
    pub fn load(path: &Path) -> Result<Self, PropertyError> {
        let data = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => PropertyError::FileNotFound(path.to_path_buf()),
            _ => PropertyError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Ok(Self::parse(&data))
    }

    /// Parse property file content
    pub fn parse(data: &str) -> Self {
        let mut file = Self::default();
        let mut current: Option<usize> = None;

        for (number, raw) in data.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = Some(file.section_index(name.trim()));
                continue;
            }

            let Some((key, value)) = split_entry(line) else {
                log::warn!("Line {}: expected key = value, got {:?}", number + 1, line);
                continue;
            };

            match current {
                Some(index) => file.sections[index]
                    .1
                    .entries
                    .push((key.to_string(), value.to_string())),
                None => log::warn!("Line {}: key {:?} outside of any section", number + 1, key),
            }
        }

        file
    }

    /// Look up a section by exact name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    fn section_index(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.sections.push((name.to_string(), Section::default()));
                self.sections.len() - 1
            }
        }
    }
}

/// Split at the first `=` or `:`, whichever comes first
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let at = line.find(['=', ':'])?;
    let key = line[..at].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, line[at + 1..].trim()))
}
