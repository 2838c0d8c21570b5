use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid {name} threshold: {value} (must be a finite, non-negative number)")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Cannot run Double Check on an empty ensemble")]
    EmptyEnsemble,

    #[error(
        "Structure mismatch at ensemble index {index}: expected {expected} atoms, found {found}"
    )]
    StructureMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Structure at ensemble index {index} has {count} atom(s); at least 2 are required")]
    TooFewAtoms { index: usize, count: usize },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
