// Tag/verbalize composition shared by the entity grammars.
//
// A tagger maps written text to `field: "value"` framing; a verbalizer
// strips the framing again. Their composition is the spoken rendering,
// which is then wrapped as `name { outer_field: "..." }`.

use numera_core::token::{FIELD_CLOSE, TOKEN_CLOSE, field_open, token_open};
use numera_core::GrammarConfig;
use numera_fst::{
    Fst, FstError, Limits, Weight, closure, compose_with, concat_all, delete, insert,
    optimize_with, top_k_paths, union_all,
};
use tracing::info;

use crate::russian::alphabet::WHITESPACE;
use crate::{Grammar, GrammarError};

/// `name { ` + fst + ` }`.
pub fn add_tokens(fst: &Fst, name: &str) -> Fst {
    concat_all([&insert(&token_open(name)), fst, &insert(TOKEN_CLOSE)])
}

/// `field: "` + fst + `"`, inserted on the output side.
pub fn wrap_field(fst: &Fst, field: &str) -> Fst {
    concat_all([&insert(&field_open(field)), fst, &insert(FIELD_CLOSE)])
}

/// Accept `field: "` + content + `"` and keep only the content.
pub fn delete_field(content: &Fst, field: &str) -> Fst {
    concat_all([&delete(&field_open(field)), content, &delete(FIELD_CLOSE)])
}

/// Delete any run of whitespace, including none.
pub fn delete_space() -> Fst {
    let parts: Vec<Fst> = WHITESPACE
        .chars()
        .map(|c| delete(c.encode_utf8(&mut [0; 4])))
        .collect();
    closure(&union_all(&parts), 0, None)
}

/// A finished entity grammar.
#[derive(Debug, Clone)]
pub struct EntityGrammar {
    pub config: GrammarConfig,
    /// Written form to spoken form, without framing.
    pub verbalized: Fst,
    /// Written form to `name { outer_field: "spoken" }`.
    pub fst: Fst,
}

impl EntityGrammar {
    /// Compose `tag` with `verbalize` under the default limits.
    pub fn compose(
        config: GrammarConfig,
        tag: &Fst,
        verbalize: &Fst,
        outer_field: &str,
    ) -> Result<Self, FstError> {
        Self::compose_with(&Limits::default(), config, tag, verbalize, outer_field)
    }

    pub fn compose_with(
        limits: &Limits,
        config: GrammarConfig,
        tag: &Fst,
        verbalize: &Fst,
        outer_field: &str,
    ) -> Result<Self, FstError> {
        let tag = optimize_with(limits, tag)?;
        let verbalize = optimize_with(limits, verbalize)?;
        let verbalized = optimize_with(limits, &compose_with(limits, &tag, &verbalize)?)?;
        let fst = optimize_with(
            limits,
            &add_tokens(&wrap_field(&verbalized, outer_field), &config.name),
        )?;
        info!(
            grammar = %config.name,
            states = fst.num_states(),
            arcs = fst.num_arcs(),
            "entity grammar compiled"
        );
        Ok(Self {
            config,
            verbalized,
            fst,
        })
    }

    /// Spoken renderings of `input` without framing, best first.
    pub fn verbalize(&self, input: &str, k: usize) -> Result<Vec<(String, Weight)>, GrammarError> {
        let k = self.config.output_limit(k);
        Ok(top_k_paths(&self.verbalized, input, k)?)
    }
}

impl Grammar for EntityGrammar {
    fn config(&self) -> &GrammarConfig {
        &self.config
    }

    fn fst(&self) -> &Fst {
        &self.fst
    }
}
