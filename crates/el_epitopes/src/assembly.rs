use std::fmt;
use std::ops::Deref;

/// Joins the B-cell half to the T-cell half of a fusion construct.
pub const CONNECTOR_LINKER: &str = "AKFVAAWTLKAAAEAAAK";

pub const DEFAULT_TCELL_LINKER: &str = "AAY";
pub const DEFAULT_BCELL_LINKER: &str = "GPGPG";

/// A linker peptide, always stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Linker(String);

impl Linker {
    pub fn new(s: &str) -> Self {
        Linker(s.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits `raw` into chunks of `epi_len` characters and joins them with
    /// this linker. See [`chunk`] for how a trailing remainder is handled.
    pub fn link(&self, raw: &str, epi_len: usize) -> String {
        chunk(raw, epi_len).join(&self.0)
    }
}

impl Deref for Linker {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for Linker {
    fn from(s: &str) -> Self {
        Linker::new(s)
    }
}

impl fmt::Display for Linker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Consecutive, non-overlapping pieces of exactly `epi_len` characters.
/// A trailing remainder shorter than `epi_len` is dropped.
///
/// Panics if `epi_len` is zero; [`crate::EpitopeSet`] never reports a zero length.
pub fn chunk(raw: &str, epi_len: usize) -> Vec<&str> {
    assert!(epi_len > 0, "chunk length must be positive");
    let bounds: Vec<usize> = raw.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(raw.len()))
        .collect();
    bounds.windows(epi_len + 1)
        .step_by(epi_len)
        .map(|w| &raw[w[0]..w[epi_len]])
        .collect()
}

/// `CONNECTOR_LINKER` + B-cell linked + T-cell linker + T-cell linked.
pub fn fuse(bcell_linked: &str, tcell_linker: &Linker, tcell_linked: &str) -> String {
    let mut s = String::with_capacity(CONNECTOR_LINKER.len()
        + bcell_linked.len() + tcell_linker.len() + tcell_linked.len());
    s.push_str(CONNECTOR_LINKER);
    s.push_str(bcell_linked);
    s.push_str(tcell_linker);
    s.push_str(tcell_linked);
    s
}
