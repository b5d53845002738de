use thiserror::Error;

/// Fatal ingest failures. Any of these aborts the whole reconstruction.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Missing required column: {column}")]
    MissingColumn { column: &'static str },

    #[error("Line {line}: column '{column}' is not numeric: '{value}'")]
    InvalidNumber { line: u64, column: &'static str, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input contains no data rows")]
    EmptyInput,
}

impl ParseError {
    /// Schema errors are detected from the header alone.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, ParseError::MissingColumn { .. })
    }

    /// Column named by the error, when there is one.
    pub fn column(&self) -> Option<&'static str> {
        match self {
            ParseError::MissingColumn { column } => Some(column),
            ParseError::InvalidNumber { column, .. } => Some(column),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReplayError>;
