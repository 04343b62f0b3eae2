use thiserror::Error;

/// Failures while reading a roster CSV. A failed load keeps nothing.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}' (expected name, sex, age, region)")]
    MissingColumn(&'static str),

    #[error("row {row}: missing value for '{column}'")]
    MissingValue { row: usize, column: &'static str },

    #[error("row {row}: age '{value}' is not a whole number from 0 to {max}", max = crate::roster::MAX_AGE)]
    InvalidAge { row: usize, value: String },

    #[error("row {row}: unrecognised sex '{value}'")]
    InvalidSex { row: usize, value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port '{0}'")]
    InvalidPort(String),

    #[error("invalid seed '{0}' in BOOM_PAM_SEED")]
    InvalidSeed(String),

    #[error("usage: boom-pam web [port] | boom-pam play <roster.csv>")]
    Usage,
}
