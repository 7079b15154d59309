use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use log::debug;

use crate::FastaRecord;
use crate::WriteError;

/// Creates `dir` and all its parents, if needed.
pub fn create_output_dir<P: AsRef<Path>>(dir: P) -> Result<(), WriteError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        debug!("Creating output directory {}", dir.display());
    }
    fs::create_dir_all(dir).map_err(|e| WriteError::new(dir, e))
}

/// A buffered FASTA output file. The file is closed when the writer is
/// dropped; call [`FastaWriter::finish`] to see errors from the final flush.
pub struct FastaWriter {
    path: PathBuf,
    inner: BufWriter<File>,
    count: usize,
}

impl FastaWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, WriteError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| WriteError::new(&path, e))?;
        Ok(FastaWriter { path, inner: BufWriter::new(file), count: 0 })
    }

    /// The file name, for progress messages.
    pub fn file_name(&self) -> String {
        self.path.file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn write_record(&mut self, record: &FastaRecord) -> Result<(), WriteError> {
        record.write_to(&mut self.inner)
            .map_err(|e| WriteError::new(&self.path, e))?;
        self.count += 1;
        Ok(())
    }

    /// Flushes and closes the file, returns the number of records written.
    pub fn finish(mut self) -> Result<usize, WriteError> {
        self.inner.flush().map_err(|e| WriteError::new(&self.path, e))?;
        debug!("Wrote {} records to {}", self.count, self.path.display());
        Ok(self.count)
    }
}
