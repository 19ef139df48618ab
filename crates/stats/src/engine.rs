use crate::config::StatsConfig;
use crate::enrich::ClassificationFailure;
use crate::extremal;
use crate::model::{
    Label, LabelSummary, Record, ReportMeta, ReportSummary, SkippedRow, StatsReport, WordCount,
};
use crate::words::{self, FrequencyTable, StopWords, TextSource};

/// Facts about a run that the records themselves do not carry.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// Dataset path or other label for where the products came from.
    pub source: String,
    /// Rows the loader left out.
    pub skipped: Vec<SkippedRow>,
    /// Products kept as Unknown because the classifier failed.
    pub failures: Vec<ClassificationFailure>,
}

/// Read-only queries over a finished collection of records.
///
/// Every query borrows the collection and recomputes from scratch, so
/// repeated calls return identical results.
#[derive(Debug, Clone, Copy)]
pub struct Statistics<'a> {
    records: &'a [Record],
    text_source: TextSource,
}

impl<'a> Statistics<'a> {
    pub fn new(records: &'a [Record]) -> Self {
        Self {
            records,
            text_source: TextSource::default(),
        }
    }

    pub fn with_text_source(mut self, text_source: TextSource) -> Self {
        self.text_source = text_source;
        self
    }

    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    pub fn text_source(&self) -> TextSource {
        self.text_source
    }

    pub fn most_positive(&self) -> Option<&'a Record> {
        extremal::most_positive(self.records)
    }

    pub fn most_negative(&self) -> Option<&'a Record> {
        extremal::most_negative(self.records)
    }

    pub fn most_used_words(&self, limit: usize, stop_words: &StopWords) -> Vec<WordCount> {
        self.most_used_words_from(limit, stop_words, self.text_source)
    }

    pub fn most_used_words_from(
        &self,
        limit: usize,
        stop_words: &StopWords,
        source: TextSource,
    ) -> Vec<WordCount> {
        words::most_used_words(self.records, limit, stop_words, source)
    }

    /// Full frequency table, unranked, in first-seen order.
    pub fn word_frequencies(&self, stop_words: &StopWords, source: TextSource) -> FrequencyTable {
        FrequencyTable::from_records(self.records, stop_words, source)
    }

    pub fn label_summary(&self) -> LabelSummary {
        let mut summary = LabelSummary {
            total: self.records.len(),
            ..LabelSummary::default()
        };
        for record in self.records {
            match record.label() {
                Label::Positive => summary.positive += 1,
                Label::Negative => summary.negative += 1,
                Label::Unknown => summary.unknown += 1,
            }
        }
        summary
    }

    /// Bundle every query into a serializable report. Word settings come from
    /// `config.words` and take precedence over the facade's text source.
    pub fn report(&self, config: &StatsConfig, run: &RunContext) -> StatsReport {
        let stop_words = config.words.stop_words();
        let text_source = config.words.text_source;
        let top_words = self.most_used_words_from(config.words.limit, &stop_words, text_source);

        StatsReport {
            meta: ReportMeta {
                source: run.source.clone(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
                text_source,
                word_limit: config.words.limit,
            },
            summary: ReportSummary {
                labels: self.label_summary(),
                classification_failures: run.failures.len(),
                skipped_rows: run.skipped.len(),
            },
            most_positive: self.most_positive().cloned(),
            most_negative: self.most_negative().cloned(),
            top_words,
            skipped: run.skipped.clone(),
            failures: run.failures.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("A", "great product", Label::Positive, 0.95, "great <POS> product"),
            Record::new("B", "bad product", Label::Negative, 0.88, "bad <NEG> product"),
            Record::new("C", "amazing product", Label::Positive, 0.92, "amazing <POS> product"),
        ]
    }

    #[test]
    fn facade_answers_all_queries() {
        let records = sample();
        let stats = Statistics::new(&records);
        assert_eq!(stats.most_positive().map(Record::identity), Some("A"));
        assert_eq!(stats.most_negative().map(Record::identity), Some("B"));
        assert_eq!(
            stats.most_used_words(2, &StopWords::default()),
            vec![WordCount::new("product", 3), WordCount::new("great", 1)]
        );
    }

    #[test]
    fn configured_text_source_is_used() {
        let records = sample();
        let stats = Statistics::new(&records).with_text_source(TextSource::Annotated);
        let top = stats.most_used_words(2, &StopWords::default());
        assert_eq!(top, vec![WordCount::new("product", 3), WordCount::new("<pos>", 2)]);
    }

    #[test]
    fn label_summary_counts_every_label() {
        let mut records = sample();
        records.push(Record::new("D", "plain", Label::Unknown, 0.0, "plain"));
        let summary = Statistics::new(&records).label_summary();
        assert_eq!(
            summary,
            LabelSummary {
                total: 4,
                positive: 2,
                negative: 1,
                unknown: 1
            }
        );
    }

    #[test]
    fn empty_collection() {
        let stats = Statistics::new(&[]);
        assert!(stats.most_positive().is_none());
        assert!(stats.most_negative().is_none());
        assert!(stats.most_used_words(10, &StopWords::default()).is_empty());
        assert_eq!(stats.label_summary(), LabelSummary::default());
    }

    #[test]
    fn report_bundles_queries_and_run_facts() {
        let records = sample();
        let config = StatsConfig::from_toml("[words]\nlimit = 1\n").unwrap();
        let run = RunContext {
            source: "products.csv".into(),
            skipped: vec![SkippedRow {
                line: 4,
                reason: "expected 2 columns, got 1".into(),
            }],
            failures: vec![
                ClassificationFailure {
                    index: 0,
                    identity: "A".into(),
                    reason: "text is empty".into(),
                },
                ClassificationFailure {
                    index: 2,
                    identity: "C".into(),
                    reason: "classifier error: timeout".into(),
                },
            ],
        };
        let report = Statistics::new(&records).report(&config, &run);

        assert_eq!(report.meta.source, "products.csv");
        assert_eq!(report.meta.word_limit, 1);
        assert_eq!(report.meta.text_source, TextSource::Raw);
        assert_eq!(report.meta.engine_version, env!("CARGO_PKG_VERSION"));
        assert!(chrono::DateTime::parse_from_rfc3339(&report.meta.run_at).is_ok());
        assert_eq!(report.summary.labels.total, 3);
        assert_eq!(report.summary.classification_failures, 2);
        assert_eq!(report.summary.skipped_rows, 1);
        assert_eq!(report.skipped, run.skipped);
        assert_eq!(report.failures, run.failures);
        assert_eq!(report.most_positive.as_ref().map(Record::identity), Some("A"));
        assert_eq!(report.top_words, vec![WordCount::new("product", 3)]);
    }

    #[test]
    fn report_serializes_flat_summary() {
        let records = sample();
        let report = Statistics::new(&records).report(&StatsConfig::default(), &RunContext::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["positive"], 2);
        assert_eq!(json["summary"]["skipped_rows"], 0);
        assert_eq!(json["most_negative"]["label"], "NEGATIVE");
        assert_eq!(json["meta"]["text_source"], "raw");
        assert_eq!(json["top_words"][0]["word"], "product");
        assert_eq!(json["skipped"], serde_json::json!([]));
        assert_eq!(json["failures"], serde_json::json!([]));
    }

    #[test]
    fn report_serializes_skipped_rows_and_failures() {
        let records = sample();
        let run = RunContext {
            source: "products.csv".into(),
            skipped: vec![SkippedRow {
                line: 7,
                reason: "expected 2 columns, got 3".into(),
            }],
            failures: vec![ClassificationFailure {
                index: 1,
                identity: "B".into(),
                reason: "classifier error: timeout".into(),
            }],
        };
        let report = Statistics::new(&records).report(&StatsConfig::default(), &run);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["summary"]["skipped_rows"], 1);
        assert_eq!(json["summary"]["classification_failures"], 1);
        assert_eq!(json["skipped"][0]["line"], 7);
        assert_eq!(json["skipped"][0]["reason"], "expected 2 columns, got 3");
        assert_eq!(json["failures"][0]["index"], 1);
        assert_eq!(json["failures"][0]["identity"], "B");
        assert_eq!(json["failures"][0]["reason"], "classifier error: timeout");
    }
}
