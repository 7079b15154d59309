//! # epilinker
//!
//! Randomized, linked peptide-epitope constructs from T-cell and B-cell
//! epitope tables.
//!
//! This crate re-exports the main functionality from its submodules.

pub mod input_parsers;
pub mod pipeline;

pub mod epitopes {
    pub use ::el_epitopes::*;
}

pub mod fasta {
    pub use ::el_fasta::*;
}

