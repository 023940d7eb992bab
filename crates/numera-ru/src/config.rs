// Compile options, optionally read from `numera.toml` in the data directory

use std::path::Path;

use numera_fst::Limits;
use numera_fst::config::DEFAULT_MAX_STATES;
use serde::Deserialize;

use crate::DEFAULT_TOP_K;
use crate::error::LoadError;
use crate::numbers::FIXED_POINT_ROUNDS;

/// Name of the optional options file inside a data directory.
pub const CONFIG_FILE: &str = "numera.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    /// Single canonical output per input instead of ranked alternatives.
    pub deterministic: bool,
    /// State ceiling for every composition and optimization step.
    pub max_states: usize,
    /// Rounds of the arithmetic/acceptor intersection.
    pub max_fixed_point_rounds: usize,
    /// Outputs returned per input in non-deterministic mode.
    pub top_k: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            deterministic: true,
            max_states: DEFAULT_MAX_STATES,
            max_fixed_point_rounds: FIXED_POINT_ROUNDS,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl CompileOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read `numera.toml` from `dir`, or return the defaults if it is absent.
    pub fn load(dir: &Path) -> Result<Self, LoadError> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| LoadError::Config { path, source })
    }

    pub fn limits(&self) -> Limits {
        Limits::with_max_states(self.max_states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(
            CompileOptions::from_toml_str("").unwrap(),
            CompileOptions::default()
        );
    }

    #[test]
    fn partial_document_overrides_fields() {
        let options = CompileOptions::from_toml_str(
            "deterministic = false\nmax_states = 5000\ntop_k = 3\n",
        )
        .unwrap();
        assert!(!options.deterministic);
        assert_eq!(options.max_states, 5000);
        assert_eq!(options.top_k, 3);
        assert_eq!(options.max_fixed_point_rounds, FIXED_POINT_ROUNDS);
        assert_eq!(options.limits().max_states, 5000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CompileOptions::from_toml_str("max_state = 10").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = std::env::temp_dir().join("numera-config-missing");
        assert_eq!(
            CompileOptions::load(&dir).unwrap(),
            CompileOptions::default()
        );
    }
}
