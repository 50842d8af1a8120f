use std::fmt;
use std::io;

/// Represents the different types of errors that can occur while classifying a CSV file.
#[derive(Debug)]
pub enum ClassifierError {
    /// Error occurred while building the client
    BuildError(String),
    /// The HTTP request could not be sent or its body could not be read
    RequestError(reqwest::Error),
    /// The classifier answered with a non-success status code
    StatusError(u16),
    /// The classifier answered with a body we could not interpret
    ResponseError(String),
    /// Error occurred due to invalid input parameters
    ValidationError(String),
    /// Error occurred while reading or writing CSV data
    CsvError(csv::Error),
    /// Error occurred while touching the filesystem
    IoError(io::Error),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
            Self::RequestError(err) => write!(f, "Request error: {}", err),
            Self::StatusError(status) => write!(f, "Classifier returned status {}", status),
            Self::ResponseError(msg) => write!(f, "Response error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::CsvError(err) => write!(f, "CSV error: {}", err),
            Self::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClassifierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RequestError(err) => Some(err),
            Self::CsvError(err) => Some(err),
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClassifierError {
    fn from(err: reqwest::Error) -> Self {
        ClassifierError::RequestError(err)
    }
}

impl From<csv::Error> for ClassifierError {
    fn from(err: csv::Error) -> Self {
        ClassifierError::CsvError(err)
    }
}

impl From<io::Error> for ClassifierError {
    fn from(err: io::Error) -> Self {
        ClassifierError::IoError(err)
    }
}
