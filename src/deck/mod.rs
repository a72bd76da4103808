//! Declarative decks and their assembly into laid-out documents.

mod assembler;
mod spec;

pub use assembler::{AssembleOptions, DocumentAssembler};
pub use spec::{BlockSpec, BulletSpec, DeckSpec, PageSpec};
