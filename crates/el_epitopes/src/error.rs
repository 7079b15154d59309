use std::fmt;
use std::error::Error;

#[derive(Debug)]
pub enum InputError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn { row: usize, found: usize },
    NoEpitopes(String),         // the table had a header but no rows
    ZeroLength(String),         // all epitopes were empty strings
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Csv(e) => write!(f, "Malformed table: {}", e),
            Self::MissingColumn { row, found } => write!(f,
                "Expected at least 2 columns in row {}, found {}", row, found),
            Self::NoEpitopes(name) => write!(f,
                "No epitopes in table '{}', cannot infer epitope length", name),
            Self::ZeroLength(name) => write!(f,
                "Epitopes in table '{}' have zero length", name),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> Self { Self::Io(e) }
}

impl From<csv::Error> for InputError {
    fn from(e: csv::Error) -> Self { Self::Csv(e) }
}

