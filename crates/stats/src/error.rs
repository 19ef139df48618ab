use std::fmt;

#[derive(Debug)]
pub enum StatsError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad delimiter, empty stop word, etc.).
    ConfigValidation(String),
    /// A word listed as both positive and negative in the lexicon overrides.
    LexiconConflict(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::LexiconConflict(word) => {
                write!(f, "lexicon word '{word}' is listed as both positive and negative")
            }
        }
    }
}

impl std::error::Error for StatsError {}

/// Failure of a single classification call.
///
/// Never fatal to a batch: enrichment downgrades the affected record to
/// `Label::Unknown` and carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// Input had no tokens to classify.
    EmptyText,
    /// Classifier-specific failure.
    Model(String),
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "text is empty"),
            Self::Model(msg) => write!(f, "classifier error: {msg}"),
        }
    }
}

impl std::error::Error for ClassifyError {}
