use thiserror::Error;

/// Result type used across the timerange crates.
pub type Result<T> = std::result::Result<T, TimeRangeError>;

/// Canonical error representation shared by the library and the CLI.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeRangeError {
    #[error("invalid time range arguments: {0}")]
    Shape(String),

    #[error("could not parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("cannot split a time range into {0} parts")]
    InvalidSplit(usize),

    #[error("invalid window: {0}")]
    InvalidWindow(String),

    #[error("time value out of range: {0}")]
    OutOfRange(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    General(String),
}

impl TimeRangeError {
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        TimeRangeError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn out_of_range(message: impl Into<String>) -> Self {
        TimeRangeError::OutOfRange(message.into())
    }
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {key}: {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("environment variable {key} is not valid unicode")]
    NotUnicode {
        key: String,
        #[source]
        source: std::env::VarError,
    },
}

impl From<ConfigError> for TimeRangeError {
    fn from(value: ConfigError) -> Self {
        TimeRangeError::Config(value.to_string())
    }
}
