// Lexicon loading: (surface, spoken) records to a union of cross products.

pub mod tsv;

use std::path::Path;

use hashbrown::HashMap;
use numera_fst::{Fst, Weight, add_weight, closure, concat, cross, union_all};
use tracing::{debug, info};

use crate::error::LoadError;

/// Weight added per rank to the alternatives of one surface form.
/// The first-listed form costs nothing, the second this much, and so on.
pub const ALTERNATE_FORM_WEIGHT: Weight = 0.5;

/// One lexicon record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub surface: String,
    pub spoken: String,
}

impl Entry {
    pub fn new(surface: impl Into<String>, spoken: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            spoken: spoken.into(),
        }
    }
}

/// What to do when a surface form has more than one spoken form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiguity {
    /// Fail with [`LoadError::DuplicateKeyConflict`].
    Reject,
    /// Keep the first-listed spoken form, drop the rest.
    Canonical,
    /// Keep every form as a competing path ranked by listing order.
    Compete,
}

impl Ambiguity {
    /// Policy for lexicons expected to be unambiguous.
    pub fn for_mode(deterministic: bool) -> Self {
        if deterministic {
            Ambiguity::Reject
        } else {
            Ambiguity::Compete
        }
    }

    /// Policy for inflection tables, where several case forms share a key.
    pub fn inflected(deterministic: bool) -> Self {
        if deterministic {
            Ambiguity::Canonical
        } else {
            Ambiguity::Compete
        }
    }
}

/// A loaded lexicon with the ambiguity policy already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    /// Surface forms in first-appearance order, each with its kept spoken
    /// forms in listing order.
    forms: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl Lexicon {
    pub fn from_entries(
        entries: impl IntoIterator<Item = Entry>,
        ambiguity: Ambiguity,
    ) -> Result<Self, LoadError> {
        let mut forms: Vec<(String, Vec<String>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut dropped = 0usize;

        for Entry { surface, spoken } in entries {
            let Some(&slot) = index.get(&surface) else {
                index.insert(surface.clone(), forms.len());
                forms.push((surface, vec![spoken]));
                continue;
            };
            let spoken_forms = &mut forms[slot].1;
            if spoken_forms.contains(&spoken) {
                continue;
            }
            match ambiguity {
                Ambiguity::Reject => {
                    return Err(LoadError::DuplicateKeyConflict {
                        surface,
                        first: spoken_forms[0].clone(),
                        second: spoken,
                    });
                }
                Ambiguity::Canonical => dropped += 1,
                Ambiguity::Compete => spoken_forms.push(spoken),
            }
        }

        if dropped > 0 {
            info!(dropped, "kept canonical forms only; alternates dropped");
        }
        debug!(surfaces = forms.len(), ?ambiguity, "lexicon built");
        Ok(Self { forms, index })
    }

    /// Load a `surface<TAB>spoken` file.
    pub fn load(path: &Path, ambiguity: Ambiguity) -> Result<Self, LoadError> {
        let entries = tsv::read_entries(path)?;
        debug!(path = %path.display(), entries = entries.len(), "lexicon read");
        Self::from_entries(entries, ambiguity)
    }

    /// Kept spoken forms of `surface`, best first.
    pub fn forms(&self, surface: &str) -> &[String] {
        match self.index.get(surface) {
            Some(&slot) => &self.forms[slot].1,
            None => &[],
        }
    }

    /// Canonical spoken form of `surface`.
    pub fn lookup(&self, surface: &str) -> Option<&str> {
        self.forms(surface).first().map(String::as_str)
    }

    /// Like [`Lexicon::lookup`], failing with [`LoadError::MissingEntry`].
    pub fn require(&self, surface: &str) -> Result<&str, LoadError> {
        self.lookup(surface)
            .ok_or_else(|| LoadError::MissingEntry(surface.to_string()))
    }

    /// Number of distinct surface forms.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Union of `cross(surface, spoken)` over every kept form. The n-th
    /// alternative of a surface (counting from zero) costs
    /// `n * ALTERNATE_FORM_WEIGHT`.
    pub fn to_fst(&self) -> Fst {
        let mut parts = Vec::new();
        for (surface, spoken_forms) in &self.forms {
            for (rank, spoken) in spoken_forms.iter().enumerate() {
                let pair = cross(surface, spoken);
                if rank == 0 {
                    parts.push(pair);
                } else {
                    parts.push(add_weight(&pair, rank as Weight * ALTERNATE_FORM_WEIGHT));
                }
            }
        }
        union_all(&parts)
    }
}

/// `closure(entry + sep) + entry`: one or more entries joined by `sep`.
pub fn sequence(entry: &Fst, sep: &Fst) -> Fst {
    concat(&closure(&concat(entry, sep), 0, None), entry)
}
