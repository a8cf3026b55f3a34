use thiserror::Error;

#[derive(Error, Debug)]
pub enum PedigreeError {
    #[error("Pedigree error: {0}")]
    Pedigree(String),

    #[error("Duplicate individual ID: '{0}'")]
    DuplicateIndividual(String),

    #[error("Individual '{0}' not found in pedigree")]
    UnknownIndividual(String),

    #[error("Individual index {index} is out of range (pedigree has {len} individuals)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid sex tag '{0}': expected 'M' or 'F'")]
    InvalidSex(String),

    #[error("Invalid affection status '{0}'")]
    InvalidAffection(String),

    #[error("Individual '{0}' cannot be its own parent")]
    SelfParent(String),

    #[error("Pedigree contains a cycle through '{0}'")]
    Cycle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PedigreeError>;
