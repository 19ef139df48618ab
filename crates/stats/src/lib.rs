//! `prodsent-stats`: sentiment aggregation engine.
//!
//! Pure engine crate: receives loaded products, classifies them into
//! immutable records and answers statistical queries over the finished
//! collection (extremal sentiment, ranked word frequency).
//! No CLI or IO dependencies.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod enrich;
pub mod error;
pub mod extremal;
pub mod lexicon;
pub mod model;
pub mod words;

pub use classifier::Classifier;
pub use config::StatsConfig;
pub use engine::{RunContext, Statistics};
pub use enrich::{enrich, ClassificationFailure, Enrichment};
pub use error::{ClassifyError, StatsError};
pub use lexicon::LexiconClassifier;
pub use model::{Classification, Label, Product, Record, SkippedRow, StatsReport, WordCount};
pub use words::{FrequencyTable, StopWords, TextSource};
