// Precompiled arithmetic resources.
//
// A data directory holds `util_arithmetic.far` (an archive with the
// factorization, restricted arithmetic and leaf transducers) and `g.fst`
// (the numeral acceptor). They are loaded once into a `Resources` value
// that is passed explicitly to the compiler.

use std::path::{Path, PathBuf};

use numera_fst::{Archive, Fst, FstError, optimize};
use tracing::{debug, info};

use crate::arithmetic;
use crate::error::LoadError;

pub const ARITHMETIC_ARCHIVE: &str = "util_arithmetic.far";
pub const ACCEPTOR_FILE: &str = "g.fst";

pub const DELTA_STAR: &str = "DELTA_STAR";
pub const IARITHMETIC_RESTRICTED: &str = "IARITHMETIC_RESTRICTED";
pub const LEAVES: &str = "LEAVES";

/// The inputs of the numeral grammar compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct Resources {
    /// Digit string to arithmetic expression (`DELTA_STAR`).
    pub factorization: Fst,
    /// Restricted arithmetic (`IARITHMETIC_RESTRICTED`).
    pub restricted_arithmetic: Fst,
    /// Language numeral acceptor (`g.fst`).
    pub acceptor: Fst,
    /// Expression to space-separated leaves (`LEAVES`).
    pub leaves: Fst,
}

impl Resources {
    /// Load the resource files from `dir`.
    pub fn init(dir: &Path) -> Result<Self, LoadError> {
        let archive_path = dir.join(ARITHMETIC_ARCHIVE);
        let archive = Archive::from_bytes(&read(&archive_path)?)?;
        let acceptor = Fst::from_bytes(&read(&dir.join(ACCEPTOR_FILE))?)?;
        let resources = Self::from_parts(&archive, acceptor)?;
        info!(dir = %dir.display(), "arithmetic resources loaded");
        Ok(resources)
    }

    /// Whether `dir` contains the resource files.
    pub fn exist_in(dir: &Path) -> bool {
        dir.join(ARITHMETIC_ARCHIVE).is_file() && dir.join(ACCEPTOR_FILE).is_file()
    }

    /// Whether `dir` contains neither resource file.
    pub fn absent_from(dir: &Path) -> bool {
        !dir.join(ARITHMETIC_ARCHIVE).exists() && !dir.join(ACCEPTOR_FILE).exists()
    }

    pub fn from_parts(archive: &Archive, acceptor: Fst) -> Result<Self, LoadError> {
        let entry = |name: &str| {
            archive
                .get(name)
                .cloned()
                .ok_or_else(|| LoadError::MissingEntry(name.to_string()))
        };
        Ok(Self {
            factorization: entry(DELTA_STAR)?,
            restricted_arithmetic: entry(IARITHMETIC_RESTRICTED)?,
            acceptor,
            leaves: entry(LEAVES)?,
        })
    }

    /// The reference resources for 0..999, optimized.
    pub fn reference() -> Result<Self, FstError> {
        let resources = Self {
            factorization: optimize(&arithmetic::factorization())?,
            restricted_arithmetic: optimize(&arithmetic::restricted_arithmetic())?,
            acceptor: optimize(&arithmetic::acceptor())?,
            leaves: optimize(&arithmetic::leaves())?,
        };
        debug!(
            factorization = resources.factorization.num_states(),
            acceptor = resources.acceptor.num_states(),
            leaves = resources.leaves.num_states(),
            "reference resources built"
        );
        Ok(resources)
    }

    pub fn to_archive(&self) -> Archive {
        let mut archive = Archive::new();
        archive.insert(DELTA_STAR, self.factorization.clone());
        archive.insert(IARITHMETIC_RESTRICTED, self.restricted_arithmetic.clone());
        archive.insert(LEAVES, self.leaves.clone());
        archive
    }

    /// Write both resource files into `dir`, creating it if needed.
    pub fn write(&self, dir: &Path) -> Result<(), LoadError> {
        std::fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;
        write(&dir.join(ARITHMETIC_ARCHIVE), &self.to_archive().to_bytes())?;
        write(&dir.join(ACCEPTOR_FILE), &self.acceptor.to_bytes())?;
        info!(dir = %dir.display(), "arithmetic resources written");
        Ok(())
    }
}

fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| io_error(path, source))
}

fn write(path: &Path, data: &[u8]) -> Result<(), LoadError> {
    std::fs::write(path, data).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: PathBuf::from(path),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numera_fst::top_path;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("numera-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn write_then_init() {
        let dir = scratch_dir("resources");
        let reference = Resources::reference().unwrap();
        reference.write(&dir).unwrap();
        assert!(Resources::exist_in(&dir));

        let loaded = Resources::init(&dir).unwrap();
        assert_eq!(loaded, reference);
        assert_eq!(
            top_path(&loaded.factorization, "230").unwrap().0,
            "(+ 200 30 +)"
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn init_missing_dir_is_io_error() {
        let dir = scratch_dir("resources-missing");
        assert!(!Resources::exist_in(&dir));
        assert!(Resources::absent_from(&dir));
        assert!(matches!(Resources::init(&dir), Err(LoadError::Io { .. })));
    }

    #[test]
    fn one_file_is_neither_present_nor_absent() {
        let dir = scratch_dir("resources-partial");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(ARITHMETIC_ARCHIVE), b"").unwrap();
        assert!(!Resources::exist_in(&dir));
        assert!(!Resources::absent_from(&dir));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_archive_entry() {
        let reference = Resources::reference().unwrap();
        let archive = reference.to_archive();
        let mut partial = Archive::new();
        partial.insert(DELTA_STAR, reference.factorization.clone());
        let err = Resources::from_parts(&partial, reference.acceptor.clone()).unwrap_err();
        assert!(matches!(err, LoadError::MissingEntry(name) if name == IARITHMETIC_RESTRICTED));
        assert!(Resources::from_parts(&archive, reference.acceptor).is_ok());
    }

    #[test]
    fn corrupt_archive_is_format_error() {
        let dir = scratch_dir("resources-corrupt");
        Resources::reference().unwrap().write(&dir).unwrap();
        std::fs::write(dir.join(ARITHMETIC_ARCHIVE), b"not a transducer").unwrap();
        assert!(matches!(Resources::init(&dir), Err(LoadError::Format(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
