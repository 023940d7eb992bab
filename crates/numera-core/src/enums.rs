// Shared enums: GrammarKind

use std::fmt;

/// Which direction a grammar runs in the normalization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarKind {
    /// Written form to tagged token fields.
    Classify,
    /// Tagged token fields to spoken form.
    Verbalize,
}

impl GrammarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GrammarKind::Classify => "classify",
            GrammarKind::Verbalize => "verbalize",
        }
    }
}

impl fmt::Display for GrammarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(GrammarKind::Classify.to_string(), "classify");
        assert_eq!(GrammarKind::Verbalize.to_string(), "verbalize");
    }
}
