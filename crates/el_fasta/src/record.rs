use std::fmt;
use std::io;
use std::io::Write;

use crate::LINE_WIDTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    header: String,
    sequence: String,
}

impl FastaRecord {
    /// The header is written verbatim, it should carry its own '>'.
    pub fn new(header: String, sequence: String) -> Self {
        FastaRecord { header, sequence }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Header line, then the sequence in lines of at most `LINE_WIDTH`.
    /// Sequences of length 0 or 1 skip the wrapping and go out as they are.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{}", self.header)?;
        if self.sequence.chars().count() > 1 {
            writeln!(w, "{}", wrap(&self.sequence, LINE_WIDTH).join("\n"))?;
        } else {
            writeln!(w, "{}", self.sequence)?;
        }
        Ok(())
    }
}

impl fmt::Display for FastaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        self.write_to(&mut buf).map_err(|_| fmt::Error)?;
        write!(f, "{}", String::from_utf8_lossy(&buf))
    }
}

/// Splits `seq` into lines of `width` characters; the last one may be shorter.
pub fn wrap(seq: &str, width: usize) -> Vec<&str> {
    let mut lines = Vec::with_capacity(seq.len() / width.max(1) + 1);
    let mut start = 0;
    for (n, (i, _)) in seq.char_indices().enumerate() {
        if n > 0 && n % width == 0 {
            lines.push(&seq[start..i]);
            start = i;
        }
    }
    if start < seq.len() {
        lines.push(&seq[start..]);
    }
    lines
}
