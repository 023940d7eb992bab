// Named transducer archives.
//
// Layout after the 16-byte header:
//   entry_count: u32
//   per entry: name_len u32, name (UTF-8), body_len u32, body (a complete
//   single-transducer file, header included)

use std::collections::BTreeMap;

use crate::format::{self, FileKind, HEADER_SIZE, read_u32};
use crate::weighted::Fst;
use crate::FstError;

/// An immutable-after-load collection of transducers addressed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Archive {
    entries: BTreeMap<String, Fst>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, fst: Fst) {
        self.entries.insert(name.into(), fst);
    }

    pub fn get(&self, name: &str) -> Option<&Fst> {
        self.entries.get(name)
    }

    /// Look up an entry, failing with [`FstError::MissingEntry`].
    pub fn require(&self, name: &str) -> Result<&Fst, FstError> {
        self.get(name)
            .ok_or_else(|| FstError::MissingEntry(name.to_string()))
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load an archive from binary data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FstError> {
        format::expect_kind(data, FileKind::Archive)?;

        let mut pos = HEADER_SIZE;
        let count = take_u32(data, &mut pos)?;
        let mut archive = Archive::new();

        for i in 0..count {
            let name_len = take_u32(data, &mut pos)? as usize;
            let name_bytes = take(data, &mut pos, name_len)?;
            let name = std::str::from_utf8(name_bytes).map_err(|_| {
                FstError::InvalidArchive(format!("invalid UTF-8 in entry name {i}"))
            })?;

            let body_len = take_u32(data, &mut pos)? as usize;
            let body = take(data, &mut pos, body_len)?;
            let fst = Fst::from_bytes(body)?;

            if archive.entries.contains_key(name) {
                return Err(FstError::InvalidArchive(format!(
                    "duplicate entry name {name:?}"
                )));
            }
            archive.insert(name, fst);
        }

        Ok(archive)
    }

    /// Serialize to the binary format read by [`Archive::from_bytes`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        format::write_header(&mut buf, FileKind::Archive);
        buf.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());
        for (name, fst) in &self.entries {
            let body = fst.to_bytes();
            buf.extend_from_slice(&(name.len() as u32).to_le_bytes());
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(&(body.len() as u32).to_le_bytes());
            buf.extend_from_slice(&body);
        }
        buf
    }
}

fn take<'a>(data: &'a [u8], pos: &mut usize, len: usize) -> Result<&'a [u8], FstError> {
    let end = *pos + len;
    if end > data.len() {
        return Err(FstError::TooShort {
            expected: end,
            actual: data.len(),
        });
    }
    let slice = &data[*pos..end];
    *pos = end;
    Ok(slice)
}

fn take_u32(data: &[u8], pos: &mut usize) -> Result<u32, FstError> {
    take(data, pos, 4)?;
    Ok(read_u32(data, *pos - 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{accept, cross};
    use crate::paths::top_path;

    fn sample() -> Archive {
        let mut archive = Archive::new();
        archive.insert("LEAVES", cross("(+ 200 30 +)", "200 30"));
        archive.insert("DELTA_STAR", accept("230"));
        archive
    }

    #[test]
    fn names_are_sorted() {
        let archive = sample();
        let names: Vec<&str> = archive.names().collect();
        assert_eq!(names, vec!["DELTA_STAR", "LEAVES"]);
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn require_missing_entry() {
        let err = sample().require("IARITHMETIC_RESTRICTED").unwrap_err();
        assert!(matches!(err, FstError::MissingEntry(name) if name == "IARITHMETIC_RESTRICTED"));
    }

    #[test]
    fn serialize_and_load() {
        let archive = sample();
        let loaded = Archive::from_bytes(&archive.to_bytes()).unwrap();
        assert_eq!(loaded, archive);
        let leaves = loaded.require("LEAVES").unwrap();
        assert_eq!(top_path(leaves, "(+ 200 30 +)").unwrap().0, "200 30");
    }

    #[test]
    fn empty_archive() {
        let loaded = Archive::from_bytes(&Archive::new().to_bytes()).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn reject_truncated_entry() {
        let bytes = sample().to_bytes();
        let err = Archive::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, FstError::TooShort { .. }));
    }

    #[test]
    fn reject_single_transducer_file() {
        let bytes = accept("x").to_bytes();
        let err = Archive::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, FstError::KindMismatch { .. }));
    }
}
