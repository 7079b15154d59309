mod error;
mod record;
mod record_groups;
mod writer;

pub use error::*;
pub use record::*;
pub use record_groups::*;
pub use writer::*;

/// Maximum number of sequence characters per FASTA line.
pub const LINE_WIDTH: usize = 60;

