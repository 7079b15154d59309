use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;
use csv::ReaderBuilder;

use crate::InputError;

/// An ordered list of epitopes from one input table, e.g. all T-cell
/// epitopes. The epitope length is inferred once, on construction, as
/// `floor(total characters / number of epitopes)`. Individual epitope
/// lengths are never checked against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpitopeSet {
    name: String,
    epi_len: usize,
    epitopes: Vec<String>,
}

impl EpitopeSet {
    pub fn new(name: &str, epitopes: Vec<String>) -> Result<Self, InputError> {
        if epitopes.is_empty() {
            return Err(InputError::NoEpitopes(name.to_string()));
        }
        let total: usize = epitopes.iter().map(|e| e.chars().count()).sum();
        let epi_len = total / epitopes.len();
        if epi_len == 0 {
            return Err(InputError::ZeroLength(name.to_string()));
        }
        if epitopes.iter().any(|e| e.chars().count() != epi_len) {
            warn!("Epitopes in '{}' differ in length, using the average ({}).", name, epi_len);
        }
        Ok(EpitopeSet { name: name.to_string(), epi_len, epitopes })
    }

    /// Reads a comma-separated table with a header row and takes the
    /// second column (index 1) of every row as an epitope.
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self, InputError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = rdr.headers()?.len();
        if columns == 0 {
            return Err(InputError::NoEpitopes(name.to_string()));
        }
        if columns < 2 {
            return Err(InputError::MissingColumn { row: 0, found: columns });
        }

        let mut epitopes = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            let epitope = record.get(1).ok_or(InputError::MissingColumn {
                row: i + 1,
                found: record.len(),
            })?;
            epitopes.push(epitope.to_string());
        }
        debug!("Read {} epitopes for '{}'.", epitopes.len(), name);
        EpitopeSet::new(name, epitopes)
    }

    /// The group name is the file name without its extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let path = path.as_ref();
        let name = path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = File::open(path)?;
        EpitopeSet::from_reader(&name, file)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn epi_len(&self) -> usize {
        self.epi_len
    }

    pub fn epitopes(&self) -> &[String] {
        &self.epitopes
    }

    pub fn len(&self) -> usize {
        self.epitopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epitopes.is_empty()
    }

    /// Group name and epitope length, e.g. `tcell_9`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.name, self.epi_len)
    }

    /// Uniform in-place permutation of the epitope order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.epitopes.shuffle(rng);
    }

    /// The epitopes in their current order, without linkers.
    pub fn flatten(&self) -> String {
        self.epitopes.concat()
    }
}
