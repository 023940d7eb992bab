// Grammar configuration record

use crate::enums::GrammarKind;

/// Identity and mode of a built grammar.
///
/// Every compiled grammar carries one of these; the `name` doubles as the
/// class label written around tagged output (`telephone { ... }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrammarConfig {
    pub name: String,
    pub kind: GrammarKind,
    /// When true, consumers take a single lowest-weight output and lexicon
    /// ambiguity is resolved to one canonical form.
    pub deterministic: bool,
}

impl GrammarConfig {
    pub fn new(name: impl Into<String>, kind: GrammarKind, deterministic: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            deterministic,
        }
    }

    pub fn classify(name: impl Into<String>, deterministic: bool) -> Self {
        Self::new(name, GrammarKind::Classify, deterministic)
    }

    pub fn verbalize(name: impl Into<String>, deterministic: bool) -> Self {
        Self::new(name, GrammarKind::Verbalize, deterministic)
    }

    /// Number of outputs a caller should take from `apply`.
    pub fn output_limit(&self, requested: usize) -> usize {
        if self.deterministic {
            requested.min(1)
        } else {
            requested
        }
    }
}
