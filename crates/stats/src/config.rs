use serde::Deserialize;

use crate::error::StatsError;
use crate::words::{StopWords, TextSource, DEFAULT_WORD_LIMIT};

/// Upper bound on how many tokens a negation may reach forward.
pub const MAX_NEGATION_WINDOW: usize = 10;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsConfig {
    pub input: InputConfig,
    pub words: WordsConfig,
    pub classifier: ClassifierConfig,
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Dataset path, resolved relative to the config file.
    pub file: Option<String>,
    pub delimiter: String,
    pub has_headers: bool,
    pub strip_markup: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file: None,
            delimiter: ",".into(),
            has_headers: true,
            strip_markup: true,
        }
    }
}

impl InputConfig {
    /// Delimiter as a byte. Only meaningful after `validate`.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }
}

// ---------------------------------------------------------------------------
// Words
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WordsConfig {
    pub limit: usize,
    pub text_source: TextSource,
    /// Replaces the default stop-word set when present.
    pub stop_words: Option<Vec<String>>,
    /// Added to whichever set is active.
    pub extra_stop_words: Vec<String>,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_WORD_LIMIT,
            text_source: TextSource::Raw,
            stop_words: None,
            extra_stop_words: Vec::new(),
        }
    }
}

impl WordsConfig {
    pub fn stop_words(&self) -> StopWords {
        let mut set = match &self.stop_words {
            Some(words) => StopWords::new(words),
            None => StopWords::default(),
        };
        set.extend(&self.extra_stop_words);
        set
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    #[default]
    Lexicon,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    pub kind: ClassifierKind,
    pub negation_window: usize,
    pub extra_positive: Vec<String>,
    pub extra_negative: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            kind: ClassifierKind::Lexicon,
            negation_window: 3,
            extra_positive: Vec::new(),
            extra_negative: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl StatsConfig {
    pub fn from_toml(input: &str) -> Result<Self, StatsError> {
        let config: StatsConfig =
            toml::from_str(input).map_err(|e| StatsError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StatsError> {
        // Delimiter must be a single ASCII byte the CSV reader can split on
        let delim = self.input.delimiter.as_bytes();
        if delim.len() != 1 || !delim[0].is_ascii() {
            return Err(StatsError::ConfigValidation(format!(
                "input.delimiter must be a single ASCII character, got {:?}",
                self.input.delimiter
            )));
        }
        if matches!(delim[0], b'"' | b'\n' | b'\r') {
            return Err(StatsError::ConfigValidation(format!(
                "input.delimiter cannot be {:?}",
                self.input.delimiter
            )));
        }

        let stop_lists = self
            .words
            .stop_words
            .iter()
            .flatten()
            .chain(self.words.extra_stop_words.iter());
        for word in stop_lists {
            if word.trim().is_empty() {
                return Err(StatsError::ConfigValidation(
                    "stop words cannot be empty or whitespace".into(),
                ));
            }
            if word.split_whitespace().count() > 1 {
                return Err(StatsError::ConfigValidation(format!(
                    "stop word {word:?} contains whitespace and can never match a token"
                )));
            }
        }

        if self.classifier.negation_window > MAX_NEGATION_WINDOW {
            return Err(StatsError::ConfigValidation(format!(
                "classifier.negation_window must be at most {MAX_NEGATION_WINDOW}, got {}",
                self.classifier.negation_window
            )));
        }

        for word in &self.classifier.extra_positive {
            if self
                .classifier
                .extra_negative
                .iter()
                .any(|n| n.eq_ignore_ascii_case(word))
            {
                return Err(StatsError::LexiconConflict(word.to_lowercase()));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[input]
file = "products.csv"
delimiter = ";"
has_headers = false
strip_markup = false

[words]
limit = 25
text_source = "annotated"
stop_words = ["The", "a"]
extra_stop_words = ["an"]

[classifier]
kind = "lexicon"
negation_window = 2
extra_positive = ["sturdy"]
extra_negative = ["flimsy"]
"#;

    #[test]
    fn parse_full_config() {
        let config = StatsConfig::from_toml(FULL).unwrap();
        assert_eq!(config.input.file.as_deref(), Some("products.csv"));
        assert_eq!(config.input.delimiter_byte(), b';');
        assert!(!config.input.has_headers);
        assert!(!config.input.strip_markup);
        assert_eq!(config.words.limit, 25);
        assert_eq!(config.words.text_source, TextSource::Annotated);
        assert_eq!(config.classifier.negation_window, 2);
        assert_eq!(config.classifier.extra_positive, vec!["sturdy"]);

        let sw = config.words.stop_words();
        assert_eq!(sw.sorted(), vec!["a", "an", "the"]);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = StatsConfig::from_toml("").unwrap();
        assert!(config.input.file.is_none());
        assert_eq!(config.input.delimiter_byte(), b',');
        assert!(config.input.has_headers);
        assert!(config.input.strip_markup);
        assert_eq!(config.words.limit, DEFAULT_WORD_LIMIT);
        assert_eq!(config.words.text_source, TextSource::Raw);
        assert_eq!(config.words.stop_words(), StopWords::default());
        assert_eq!(config.classifier.kind, ClassifierKind::Lexicon);
    }

    #[test]
    fn extra_stop_words_extend_default_set() {
        let config = StatsConfig::from_toml("[words]\nextra_stop_words = [\"the\"]\n").unwrap();
        let sw = config.words.stop_words();
        assert!(sw.contains("the"));
        assert!(sw.contains("and"));
    }

    #[test]
    fn reject_unknown_key() {
        let err = StatsConfig::from_toml("[words]\nlimt = 3\n").unwrap_err();
        assert!(matches!(err, StatsError::ConfigParse(_)));
    }

    #[test]
    fn reject_unknown_text_source() {
        let err = StatsConfig::from_toml("[words]\ntext_source = \"tagged\"\n");
        assert!(err.is_err(), "typo in text_source should fail deserialization");
    }

    #[test]
    fn reject_multi_char_delimiter() {
        let err = StatsConfig::from_toml("[input]\ndelimiter = \";;\"\n").unwrap_err();
        assert!(err.to_string().contains("single ASCII character"));
    }

    #[test]
    fn reject_quote_delimiter() {
        let err = StatsConfig::from_toml("[input]\ndelimiter = '\"'\n").unwrap_err();
        assert!(err.to_string().contains("cannot be"));
    }

    #[test]
    fn reject_blank_stop_word() {
        let err = StatsConfig::from_toml("[words]\nstop_words = [\"and\", \" \"]\n").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn reject_stop_word_with_space() {
        let err = StatsConfig::from_toml("[words]\nextra_stop_words = [\"of the\"]\n").unwrap_err();
        assert!(err.to_string().contains("contains whitespace"));
    }

    #[test]
    fn reject_wide_negation_window() {
        let err = StatsConfig::from_toml("[classifier]\nnegation_window = 50\n").unwrap_err();
        assert!(err.to_string().contains("negation_window"));
    }

    #[test]
    fn reject_conflicting_lexicon_words() {
        let input = r#"
[classifier]
extra_positive = ["Cheap"]
extra_negative = ["cheap"]
"#;
        let err = StatsConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, StatsError::LexiconConflict(ref w) if w == "cheap"));
    }
}
