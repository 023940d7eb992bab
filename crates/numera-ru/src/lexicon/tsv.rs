// Tab-separated lexicon files: `surface<TAB>spoken`, one entry per line

use std::path::Path;

use crate::error::LoadError;
use crate::lexicon::Entry;

/// Read every entry of a lexicon file.
pub fn read_entries(path: &Path) -> Result<Vec<Entry>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_entries(path, &text)
}

/// Parse lexicon text. `path` is only used in error values.
pub fn parse_entries(path: &Path, text: &str) -> Result<Vec<Entry>, LoadError> {
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        let (Some(surface), Some(spoken), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed(path, idx));
        };
        if surface.is_empty() || spoken.is_empty() {
            return Err(malformed(path, idx));
        }
        entries.push(Entry::new(surface, spoken));
    }
    Ok(entries)
}

fn malformed(path: &Path, idx: usize) -> LoadError {
    LoadError::MalformedLine {
        path: path.to_path_buf(),
        line: idx + 1,
    }
}
