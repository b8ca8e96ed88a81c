use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog table '{table}' has no entry for '{key}'")]
    MissingEntry { table: &'static str, key: String },

    #[error("Requested {requested} user ids but only {capacity} are representable")]
    IdentitySpaceExhausted { requested: usize, capacity: usize },

    #[error("Gave up after {draws} draws with {generated} of {requested} unique user ids")]
    IdentityDrawsExhausted {
        requested: usize,
        generated: usize,
        draws: u64,
    },

    #[error("Date arithmetic out of range: {0}")]
    DateOutOfRange(String),
}

impl GenError {
    pub fn missing(table: &'static str, key: impl Into<String>) -> Self {
        Self::MissingEntry {
            table,
            key: key.into(),
        }
    }
}

pub type GenResult<T> = Result<T, GenError>;
