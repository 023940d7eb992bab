//! Shared types for numera text-normalization grammars.
//!
//! # Architecture
//!
//! - [`enums`] -- Grammar kinds
//! - [`grammar`] -- Configuration record attached to every built grammar
//! - [`token`] -- Tagged-token field framing and parsing

pub mod enums;
pub mod grammar;
pub mod token;

pub use enums::GrammarKind;
pub use grammar::GrammarConfig;
pub use token::{
    FIELD_CLOSE, Field, TOKEN_CLOSE, TaggedToken, TokenError, field_open, parse_fields,
    parse_tagged, token_open,
};
