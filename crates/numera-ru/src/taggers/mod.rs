// Entity grammars built with the tag/verbalize pattern.

pub mod compose;
#[cfg(feature = "electronic")]
pub mod electronic;
#[cfg(feature = "telephone")]
pub mod telephone;
