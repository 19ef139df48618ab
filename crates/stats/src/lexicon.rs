//! Rule-based sentiment classifier.
//!
//! Scores each token against a small product-review lexicon, applies
//! intensity modifiers and a forward negation window, and labels the text by
//! the mean score of the tokens that hit the lexicon.

use std::collections::{HashMap, HashSet};

use crate::classifier::Classifier;
use crate::config::ClassifierConfig;
use crate::error::{ClassifyError, StatsError};
use crate::model::{Classification, Label};

pub const POSITIVE_MARKER: &str = "<POS>";
pub const NEGATIVE_MARKER: &str = "<NEG>";

/// Score given to words added through `extra_positive` / `extra_negative`.
const EXTRA_WORD_SCORE: f64 = 0.6;

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("amazing", 0.9),
    ("awesome", 0.8),
    ("best", 0.8),
    ("excellent", 0.9),
    ("outstanding", 0.9),
    ("perfect", 0.9),
    ("great", 0.7),
    ("love", 0.7),
    ("delicious", 0.7),
    ("tasty", 0.6),
    ("effective", 0.6),
    ("premium", 0.5),
    ("quality", 0.4),
    ("high-quality", 0.6),
    ("good", 0.5),
    ("nice", 0.4),
    ("healthy", 0.4),
    ("natural", 0.3),
    ("ideal", 0.5),
    ("recommended", 0.5),
    ("support", 0.3),
    ("boost", 0.4),
    ("improve", 0.4),
    ("improves", 0.4),
    ("benefit", 0.4),
    ("benefits", 0.4),
    ("easy", 0.3),
    ("fresh", 0.3),
    ("popular", 0.4),
    ("satisfied", 0.6),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("awful", -0.9),
    ("terrible", -0.9),
    ("worst", -0.9),
    ("horrible", -0.9),
    ("bad", -0.7),
    ("poor", -0.6),
    ("disappointing", -0.7),
    ("disappointed", -0.7),
    ("useless", -0.8),
    ("bitter", -0.4),
    ("bland", -0.4),
    ("harmful", -0.7),
    ("broken", -0.6),
    ("problem", -0.5),
    ("problems", -0.5),
    ("weak", -0.5),
    ("expensive", -0.3),
    ("artificial", -0.3),
    ("lumpy", -0.4),
    ("waste", -0.7),
    ("fake", -0.7),
    ("nausea", -0.6),
    ("bloating", -0.5),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "without", "cannot", "can't", "cant", "don't", "dont",
    "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt", "wasn't", "wasnt", "won't", "wont",
    "hardly", "barely",
];

const MODIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("extremely", 2.0),
    ("highly", 1.5),
    ("really", 1.3),
    ("super", 1.5),
    ("incredibly", 1.8),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("fairly", 0.8),
];

/// Deterministic lexicon classifier.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    scores: HashMap<String, f64>,
    modifiers: HashMap<String, f64>,
    negations: HashSet<String>,
    negation_window: usize,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::builtin(ClassifierConfig::default().negation_window)
    }
}

impl LexiconClassifier {
    fn builtin(negation_window: usize) -> Self {
        let scores = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS)
            .map(|&(w, s)| (w.to_string(), s))
            .collect();
        let modifiers = MODIFIERS.iter().map(|&(w, m)| (w.to_string(), m)).collect();
        let negations = NEGATIONS.iter().map(|w| w.to_string()).collect();
        Self {
            scores,
            modifiers,
            negations,
            negation_window,
        }
    }

    /// Build from config. Extra words override built-in scores.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, StatsError> {
        let positive: HashSet<String> =
            config.extra_positive.iter().map(|w| normalize(w)).collect();
        let negative: HashSet<String> =
            config.extra_negative.iter().map(|w| normalize(w)).collect();

        let mut conflicts: Vec<&String> = positive.intersection(&negative).collect();
        conflicts.sort();
        if let Some(word) = conflicts.first() {
            return Err(StatsError::LexiconConflict((*word).clone()));
        }

        let mut lexicon = Self::builtin(config.negation_window);
        for word in positive.into_iter().filter(|w| !w.is_empty()) {
            lexicon.scores.insert(word, EXTRA_WORD_SCORE);
        }
        for word in negative.into_iter().filter(|w| !w.is_empty()) {
            lexicon.scores.insert(word, -EXTRA_WORD_SCORE);
        }
        log::debug!(
            "lexicon ready: {} scored words, negation window {}",
            lexicon.scores.len(),
            lexicon.negation_window
        );
        Ok(lexicon)
    }

    pub fn score_of(&self, word: &str) -> Option<f64> {
        self.scores.get(&normalize(word)).copied()
    }

    pub fn negation_window(&self) -> usize {
        self.negation_window
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<Classification, ClassifyError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(ClassifyError::EmptyText);
        }

        let mut annotated: Vec<&str> = Vec::with_capacity(tokens.len() * 2);
        let mut hits: Vec<f64> = Vec::new();
        // Tokens remaining under the most recent negation
        let mut negated_for = 0usize;
        let mut modifier = 1.0;

        for token in tokens {
            annotated.push(token);
            let key = normalize(token);

            if self.negations.contains(&key) {
                negated_for = self.negation_window;
                continue;
            }
            if let Some(&m) = self.modifiers.get(&key) {
                modifier = m;
                negated_for = negated_for.saturating_sub(1);
                continue;
            }

            if let Some(&base) = self.scores.get(&key) {
                let mut score = base * modifier;
                if negated_for > 0 {
                    score = -score;
                }
                hits.push(score);
                annotated.push(if score > 0.0 {
                    POSITIVE_MARKER
                } else {
                    NEGATIVE_MARKER
                });
            }
            modifier = 1.0;
            negated_for = negated_for.saturating_sub(1);
        }

        let mean = if hits.is_empty() {
            0.0
        } else {
            hits.iter().sum::<f64>() / hits.len() as f64
        };

        let (label, confidence) = if mean > 0.0 {
            (Label::Positive, polar_confidence(mean))
        } else if mean < 0.0 {
            (Label::Negative, polar_confidence(mean))
        } else {
            (Label::Unknown, 0.0)
        };

        Ok(Classification {
            label,
            confidence,
            annotated_text: annotated.join(" "),
        })
    }
}

fn polar_confidence(mean: f64) -> f64 {
    (0.5 + mean.abs() / 2.0).clamp(0.5, 1.0)
}

/// Lowercase and trim surrounding ASCII punctuation. Used for lookup only;
/// the annotated text keeps tokens as written.
fn normalize(token: &str) -> String {
    token
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase()
}
