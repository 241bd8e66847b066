use std::fmt;

#[derive(Debug)]
pub enum PipelineError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (no sources, bad date format, bad rules).
    ConfigValidation(String),
    /// An input batch references a source tag with no config entry.
    UnknownSource(String),
    /// Missing required column in a source feed.
    MissingColumn { source: String, column: String },
    /// A date string does not match its source's asserted format.
    DateParse { source: String, record_id: String, value: String, format: String },
    /// Quantity is not a non-negative integer.
    QuantityParse { source: String, record_id: String, value: String },
    /// CSV read error.
    Csv(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::UnknownSource(source) => write!(f, "unknown source: {source}"),
            Self::MissingColumn { source, column } => {
                write!(f, "source '{source}': missing column '{column}'")
            }
            Self::DateParse { source, record_id, value, format } => {
                write!(
                    f,
                    "source '{source}', record '{record_id}': date '{value}' does not match format '{format}'"
                )
            }
            Self::QuantityParse { source, record_id, value } => {
                write!(f, "source '{source}', record '{record_id}': cannot parse quantity '{value}'")
            }
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}
