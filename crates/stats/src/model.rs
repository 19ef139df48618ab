use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single product row as produced by the loader, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub description: String,
}

impl Product {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    Positive,
    Negative,
    Unknown,
}

impl Label {
    /// Parse a classifier label. Anything other than POSITIVE/NEGATIVE
    /// (NEUTRAL included) maps to `Unknown`.
    pub fn from_classifier(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => Self::Positive,
            "NEGATIVE" => Self::Negative,
            _ => Self::Unknown,
        }
    }

    pub fn is_polar(&self) -> bool {
        matches!(self, Self::Positive | Self::Negative)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "POSITIVE"),
            Self::Negative => write!(f, "NEGATIVE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Output contract of a classifier call.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: Label,
    pub confidence: f64,
    /// Tagged rendering of the classified text.
    pub annotated_text: String,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One classified item. Immutable once built.
///
/// `confidence` is clamped to [0.0, 1.0] (NaN becomes 0.0) and forced to 0.0
/// for `Label::Unknown`, so it is only meaningful for polar labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    identity: String,
    raw_text: String,
    label: Label,
    confidence: f64,
    token_text: String,
}

impl Record {
    pub fn new(
        identity: impl Into<String>,
        raw_text: impl Into<String>,
        label: Label,
        confidence: f64,
        token_text: impl Into<String>,
    ) -> Self {
        let confidence = if label.is_polar() {
            sanitize_confidence(confidence)
        } else {
            0.0
        };
        Self {
            identity: identity.into(),
            raw_text: raw_text.into(),
            label,
            confidence,
            token_text: token_text.into(),
        }
    }

    /// Record for a product that was never classified, or whose
    /// classification failed.
    pub fn unclassified(product: Product) -> Self {
        let token_text = product.description.clone();
        Self::new(product.name, product.description, Label::Unknown, 0.0, token_text)
    }

    pub fn classified(product: Product, classification: Classification) -> Self {
        Self::new(
            product.name,
            product.description,
            classification.label,
            classification.confidence,
            classification.annotated_text,
        )
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn token_text(&self) -> &str {
        &self.token_text
    }
}

fn sanitize_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Word statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// An input row left out of the product list by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line where the row starts in the file.
    pub line: u64,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub unknown: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    #[serde(flatten)]
    pub labels: LabelSummary,
    pub classification_failures: usize,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub source: String,
    pub engine_version: String,
    pub run_at: String,
    pub text_source: crate::words::TextSource,
    pub word_limit: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub meta: ReportMeta,
    pub summary: ReportSummary,
    pub most_positive: Option<Record>,
    pub most_negative: Option<Record>,
    pub top_words: Vec<WordCount>,
    pub skipped: Vec<SkippedRow>,
    pub failures: Vec<crate::enrich::ClassificationFailure>,
}
