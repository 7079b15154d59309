/// InputError and friends.
mod error;

/// EpitopeSet and the tabular input loader.
mod epitope_set;

/// Shuffled draws over epitope sets.
mod randomizer;

/// Chunking, linkers and B-T fusion.
mod assembly;

pub use error::*;
pub use epitope_set::*;
pub use randomizer::*;
pub use assembly::*;

