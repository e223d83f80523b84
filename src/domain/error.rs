//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for valuesim.
#[derive(Debug, thiserror::Error)]
pub enum ValuesimError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no observations in input series")]
    EmptySeries,

    #[error("observations out of order at {date}")]
    UnorderedObservations { date: NaiveDate },

    #[error("non-positive {field} at {date}")]
    NonPositivePrice {
        field: &'static str,
        date: NaiveDate,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ValuesimError> for std::process::ExitCode {
    fn from(err: &ValuesimError) -> Self {
        let code: u8 = match err {
            ValuesimError::Io(_) => 1,
            ValuesimError::ConfigParse { .. }
            | ValuesimError::ConfigMissing { .. }
            | ValuesimError::ConfigInvalid { .. } => 2,
            ValuesimError::Data { .. } => 3,
            ValuesimError::EmptySeries
            | ValuesimError::UnorderedObservations { .. }
            | ValuesimError::NonPositivePrice { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
