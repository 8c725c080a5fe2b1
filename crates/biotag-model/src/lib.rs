//! Entity-model backends for biotag.
//!
//! Two ways to get an [`biotag_core::AnnotatedDocument`]:
//!
//! - [`LexiconTagger`]: built-in dictionary tagger for chemical and
//!   disease mentions, no model files required
//! - [`extraction`]: parse the JSON output of a pretrained tagger run out
//!   of process

pub mod extraction;
pub mod lexicon;

pub use extraction::*;
pub use lexicon::*;
